use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgDatabaseError;
use sqlx::query_builder::Separated;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use super::{CatalogStore, StoreFailure, CONNECTION_FAILURE_CODE, ROW_NOT_FOUND_CODE};
use crate::models::catalog::{CatalogPatch, CatalogRow};
use crate::models::storefront::PublicCatalogDocument;
use crate::models::theme::ThemeConfigDocument;
use crate::services::catalog::CatalogError;

// Exact column list; never `*`.
const CATALOG_COLUMNS: &str = "id, organization_id, name, slug, whatsapp_number, description, \
                               is_active, theme_config, created_at, updated_at";

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

enum ColumnValue {
    Text(String),
    NullableText(Option<String>),
    Flag(bool),
    Theme(Json<ThemeConfigDocument>),
    Timestamp(DateTime<Utc>),
}

fn patch_columns(patch: CatalogPatch) -> Vec<(&'static str, ColumnValue)> {
    let mut columns = Vec::new();
    if let Some(name) = patch.name {
        columns.push(("name", ColumnValue::Text(name)));
    }
    if let Some(slug) = patch.slug {
        columns.push(("slug", ColumnValue::Text(slug)));
    }
    if let Some(number) = patch.whatsapp_number {
        columns.push(("whatsapp_number", ColumnValue::Text(number)));
    }
    if let Some(description) = patch.description {
        columns.push(("description", ColumnValue::NullableText(description)));
    }
    if let Some(is_active) = patch.is_active {
        columns.push(("is_active", ColumnValue::Flag(is_active)));
    }
    if let Some(theme) = patch.theme_config {
        columns.push(("theme_config", ColumnValue::Theme(Json(theme))));
    }
    if let Some(updated_at) = patch.updated_at {
        columns.push(("updated_at", ColumnValue::Timestamp(updated_at)));
    }
    columns
}

fn push_value<'args>(values: &mut Separated<'_, 'args, Postgres, &'static str>, value: ColumnValue) {
    match value {
        ColumnValue::Text(v) => values.push_bind(v),
        ColumnValue::NullableText(v) => values.push_bind(v),
        ColumnValue::Flag(v) => values.push_bind(v),
        ColumnValue::Theme(v) => values.push_bind(v),
        ColumnValue::Timestamp(v) => values.push_bind(v),
    };
}

fn push_assignment<'args>(
    sets: &mut Separated<'_, 'args, Postgres, &'static str>,
    column: &str,
    value: ColumnValue,
) {
    sets.push(format!("{column} = "));
    match value {
        ColumnValue::Text(v) => sets.push_bind_unseparated(v),
        ColumnValue::NullableText(v) => sets.push_bind_unseparated(v),
        ColumnValue::Flag(v) => sets.push_bind_unseparated(v),
        ColumnValue::Theme(v) => sets.push_bind_unseparated(v),
        ColumnValue::Timestamp(v) => sets.push_bind_unseparated(v),
    };
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<CatalogRow>, StoreFailure> {
        let sql = format!("SELECT {CATALOG_COLUMNS} FROM catalogs ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, CatalogRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<CatalogRow, StoreFailure> {
        let sql = format!("SELECT {CATALOG_COLUMNS} FROM catalogs WHERE id = $1");
        let row = sqlx::query_as::<_, CatalogRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    #[instrument(skip(self, patch))]
    async fn insert(&self, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure> {
        let columns = patch_columns(patch);
        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO catalogs ");

        if columns.is_empty() {
            builder.push("DEFAULT VALUES");
        } else {
            builder.push("(");
            let mut names = builder.separated(", ");
            for (column, _) in &columns {
                names.push(*column);
            }
            builder.push(") VALUES (");
            let mut values = builder.separated(", ");
            for (_, value) in columns {
                push_value(&mut values, value);
            }
            builder.push(")");
        }
        builder.push(format!(" RETURNING {CATALOG_COLUMNS}"));

        let row = builder
            .build_query_as::<CatalogRow>()
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure> {
        let columns = patch_columns(patch);
        if columns.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE catalogs SET ");
        let mut sets = builder.separated(", ");
        for (column, value) in columns {
            push_assignment(&mut sets, column, value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);
        builder.push(format!(" RETURNING {CATALOG_COLUMNS}"));

        let row = builder
            .build_query_as::<CatalogRow>()
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), StoreFailure> {
        sqlx::query("DELETE FROM catalogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_by_slug(&self, slug: &str) -> Result<i64, StoreFailure> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM catalogs WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn public_catalog(
        &self,
        slug: &str,
    ) -> Result<Option<PublicCatalogDocument>, StoreFailure> {
        let document = sqlx::query_scalar::<_, Option<Json<PublicCatalogDocument>>>(
            "SELECT get_public_catalog($1)",
        )
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(document.map(|Json(doc)| doc))
    }
}

impl From<sqlx::Error> for StoreFailure {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let details = db_err
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(|pg| pg.detail())
                    .map(str::to_owned);
                StoreFailure::coded(
                    db_err.code().map(|c| c.into_owned()).unwrap_or_default(),
                    db_err.message(),
                    details,
                )
            }
            sqlx::Error::RowNotFound => StoreFailure::coded(
                ROW_NOT_FOUND_CODE,
                "query returned no rows where exactly one was expected",
                None,
            ),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreFailure::coded(
                CONNECTION_FAILURE_CODE,
                format!("network failure talking to the database: {err}"),
                None,
            ),
            other => StoreFailure::Raised(CatalogError::Other(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_sentinel_code() {
        let failure = StoreFailure::from(sqlx::Error::RowNotFound);
        assert!(failure.is_row_not_found());
    }

    #[test]
    fn pool_timeout_is_reported_as_network_failure() {
        match StoreFailure::from(sqlx::Error::PoolTimedOut) {
            StoreFailure::Coded(f) => {
                assert_eq!(f.code, CONNECTION_FAILURE_CODE);
                assert!(f.message.to_lowercase().contains("network"));
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn other_driver_errors_keep_their_message() {
        let failure = StoreFailure::from(sqlx::Error::Protocol("bad frame".into()));
        match failure {
            StoreFailure::Raised(CatalogError::Other(msg)) => assert!(msg.contains("bad frame")),
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn only_present_patch_fields_become_columns() {
        let patch = CatalogPatch {
            name: Some("Editado".into()),
            updated_at: Some(Utc::now()),
            ..CatalogPatch::default()
        };

        let names: Vec<_> = patch_columns(patch).into_iter().map(|(c, _)| c).collect();
        assert_eq!(names, vec!["name", "updated_at"]);
    }

    #[test]
    fn cleared_description_is_written_as_null() {
        let patch = CatalogPatch {
            description: Some(None),
            ..CatalogPatch::default()
        };

        let columns = patch_columns(patch);
        assert_eq!(columns.len(), 1);
        assert!(matches!(columns[0], ("description", ColumnValue::NullableText(None))));
    }
}
