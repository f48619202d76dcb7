//! Common type definitions shared across the crate.
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: User account identifier
//! - [`LocationId`]: Office location identifier
//! - [`EmissionRecordId`]: Emission line-item identifier
//! - [`ConnectionId`]: Accounting connection identifier
//! - [`StateTokenId`]: OAuth state token identifier

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type LocationId = Uuid;
pub type EmissionRecordId = Uuid;
pub type ConnectionId = Uuid;
pub type StateTokenId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
