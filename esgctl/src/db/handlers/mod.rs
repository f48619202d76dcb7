//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction and encapsulates
//! all queries for one entity. CRUD-shaped entities implement the
//! [`Repository`] trait; entities with upsert or whole-set-replacement
//! semantics expose their own methods.
//!
//! # Available Repositories
//!
//! - [`Users`]: User account management and authentication
//! - [`Profiles`]: Company profile single-row upserts
//! - [`Locations`]: Office locations with the lazy "Main Office" default
//! - [`EmissionRecords`]: Transactional record-set replacement per category
//! - [`Connections`]: Accounting tenant connections and organisation metadata
//! - [`OAuthStates`]: One-shot OAuth state token lifecycle

pub mod connections;
pub mod emissions;
pub mod locations;
pub mod oauth_states;
pub mod profiles;
pub mod repository;
pub mod users;

pub use connections::Connections;
pub use emissions::EmissionRecords;
pub use locations::Locations;
pub use oauth_states::OAuthStates;
pub use profiles::Profiles;
pub use repository::Repository;
pub use users::Users;
