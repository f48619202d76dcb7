//! Database repository for emission records.
//!
//! Saves are whole-set replacements: every save deletes the existing rows
//! for a (user, category) pair and inserts the replacement rows inside one
//! transaction. There is never an observable state with a partially-written
//! record set, and a failed insert rolls the delete back.

use crate::api::models::emissions::EmissionCategory;
use crate::db::{
    errors::Result,
    models::emissions::{EmissionRecordDBResponse, EmissionRecordInsert},
};
use crate::types::{UserId, abbrev_uuid};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

pub struct EmissionRecords<'c> {
    db: &'c mut PgConnection,
}

impl<'c> EmissionRecords<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), fields(user_id = %abbrev_uuid(&user_id), category = %category), err)]
    pub async fn list_for_user(
        &mut self,
        user_id: UserId,
        category: EmissionCategory,
    ) -> Result<Vec<EmissionRecordDBResponse>> {
        let records = sqlx::query_as::<_, EmissionRecordDBResponse>(
            "SELECT * FROM emission_records WHERE user_id = $1 AND category = $2 ORDER BY created_at ASC, id ASC",
        )
        .bind(user_id)
        .bind(category)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(records)
    }

    /// Replace the full record set for (user, category) atomically.
    #[instrument(
        skip(self, inserts),
        fields(user_id = %abbrev_uuid(&user_id), category = %category, count = inserts.len()),
        err
    )]
    pub async fn replace_for_user(
        &mut self,
        user_id: UserId,
        category: EmissionCategory,
        inserts: &[EmissionRecordInsert],
    ) -> Result<Vec<EmissionRecordDBResponse>> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM emission_records WHERE user_id = $1 AND category = $2")
            .bind(user_id)
            .bind(category)
            .execute(&mut *tx)
            .await?;

        let mut saved = Vec::with_capacity(inserts.len());
        for insert in inserts {
            let record = sqlx::query_as::<_, EmissionRecordDBResponse>(
                r#"
                INSERT INTO emission_records (user_id, category, source_type, quantity, unit, is_applicable)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(category)
            .bind(&insert.source_type)
            .bind(insert.quantity)
            .bind(&insert.unit)
            .bind(insert.is_applicable)
            .fetch_one(&mut *tx)
            .await?;
            saved.push(record);
        }

        tx.commit().await?;
        Ok(saved)
    }
}
