//! Repository for the `settings` key/value table.

use std::collections::BTreeMap;

use serde_json::Value;
use sqlx::PgPool;

use crate::models::setting::Setting;

const COLUMNS: &str = "id, key, value, created_at, updated_at";

pub struct SettingRepo;

impl SettingRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY key");
        sqlx::query_as::<_, Setting>(&query).fetch_all(pool).await
    }

    /// All settings as a `key -> value` map.
    pub async fn map(pool: &PgPool) -> Result<BTreeMap<String, Value>, sqlx::Error> {
        Ok(Self::list(pool)
            .await?
            .into_iter()
            .map(|s| (s.key, s.value))
            .collect())
    }

    /// Upsert every entry in `values`. Keys not mentioned are left untouched.
    pub async fn merge(pool: &PgPool, values: &BTreeMap<String, Value>) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (key, value) in values {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_settings_key DO UPDATE SET value = EXCLUDED.value",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
