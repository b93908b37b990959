//! Row-store seam for catalogs.
//!
//! [`CatalogStore`] is the only surface the catalog service depends on. It
//! speaks in persistence rows and reports failures as [`StoreFailure`], which
//! keeps the shape the error classifier inspects (SQLSTATE-like `code`,
//! `message`, `details`).

pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::models::catalog::{CatalogPatch, CatalogRow};
use crate::models::storefront::PublicCatalogDocument;
use crate::services::catalog::CatalogError;

pub use postgres::PgCatalogStore;

/// Code reported when a single-row query matched nothing.
pub const ROW_NOT_FOUND_CODE: &str = "PGRST116";
/// SQLSTATE `connection_failure`, reported for transport-level failures.
pub const CONNECTION_FAILURE_CODE: &str = "08006";

/// Failure carrying a database error code.
#[derive(Debug, Clone, PartialEq)]
pub struct CodedFailure {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

/// Anything a store call can fail with.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreFailure {
    /// Recognized database error shape.
    Coded(CodedFailure),
    /// An error that already carries its own message.
    Raised(CatalogError),
    /// A failure of no known shape.
    Unrecognized(Value),
}

impl StoreFailure {
    pub fn coded(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<String>,
    ) -> Self {
        StoreFailure::Coded(CodedFailure {
            code: code.into(),
            message: message.into(),
            details,
        })
    }

    pub fn is_row_not_found(&self) -> bool {
        matches!(self, StoreFailure::Coded(f) if f.code == ROW_NOT_FOUND_CODE)
    }
}

/// Recognizes an untyped JSON error: any object with a string `code` is a
/// coded failure, everything else is unrecognized.
impl From<Value> for StoreFailure {
    fn from(value: Value) -> Self {
        let code = value.get("code").and_then(Value::as_str).map(str::to_owned);
        match code {
            Some(code) => {
                let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
                StoreFailure::Coded(CodedFailure {
                    code,
                    message: text("message").unwrap_or_default(),
                    details: text("details"),
                })
            }
            None => StoreFailure::Unrecognized(value),
        }
    }
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All catalogs, newest first.
    async fn list(&self) -> Result<Vec<CatalogRow>, StoreFailure>;

    /// Exactly one catalog. A missing row fails with [`ROW_NOT_FOUND_CODE`].
    async fn find_by_id(&self, id: Uuid) -> Result<CatalogRow, StoreFailure>;

    async fn insert(&self, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure>;

    /// Writes only the columns present in `patch`.
    async fn update(&self, id: Uuid, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreFailure>;

    async fn count_by_slug(&self, slug: &str) -> Result<i64, StoreFailure>;

    /// Public projection of an active catalog, `None` when the slug is unknown.
    async fn public_catalog(
        &self,
        slug: &str,
    ) -> Result<Option<PublicCatalogDocument>, StoreFailure>;
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Store double that replays canned replies and records every call.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug)]
    pub enum Reply {
        Rows(Vec<CatalogRow>),
        Row(CatalogRow),
        Count(i64),
        Document(Option<PublicCatalogDocument>),
        Done,
        Fail(StoreFailure),
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum StoreCall {
        List,
        FindById(Uuid),
        Insert(CatalogPatch),
        Update(Uuid, CatalogPatch),
        Delete(Uuid),
        CountBySlug(String),
        PublicCatalog(String),
    }

    #[derive(Default)]
    pub struct ScriptedStore {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<Vec<StoreCall>>,
    }

    impl ScriptedStore {
        pub fn replying(reply: Reply) -> Arc<Self> {
            let store = Self::default();
            store.replies.lock().expect("Lock poisoned").push_back(reply);
            Arc::new(store)
        }

        pub fn silent() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn calls(&self) -> Vec<StoreCall> {
            self.calls.lock().expect("Lock poisoned").clone()
        }

        fn next(&self, call: StoreCall) -> Reply {
            self.calls.lock().expect("Lock poisoned").push(call.clone());
            self.replies
                .lock()
                .expect("Lock poisoned")
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted reply for {call:?}"))
        }
    }

    #[async_trait]
    impl CatalogStore for ScriptedStore {
        async fn list(&self) -> Result<Vec<CatalogRow>, StoreFailure> {
            match self.next(StoreCall::List) {
                Reply::Rows(rows) => Ok(rows),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for list: {other:?}"),
            }
        }

        async fn find_by_id(&self, id: Uuid) -> Result<CatalogRow, StoreFailure> {
            match self.next(StoreCall::FindById(id)) {
                Reply::Row(row) => Ok(row),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for find_by_id: {other:?}"),
            }
        }

        async fn insert(&self, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure> {
            match self.next(StoreCall::Insert(patch)) {
                Reply::Row(row) => Ok(row),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for insert: {other:?}"),
            }
        }

        async fn update(&self, id: Uuid, patch: CatalogPatch) -> Result<CatalogRow, StoreFailure> {
            match self.next(StoreCall::Update(id, patch)) {
                Reply::Row(row) => Ok(row),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for update: {other:?}"),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<(), StoreFailure> {
            match self.next(StoreCall::Delete(id)) {
                Reply::Done => Ok(()),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for delete: {other:?}"),
            }
        }

        async fn count_by_slug(&self, slug: &str) -> Result<i64, StoreFailure> {
            match self.next(StoreCall::CountBySlug(slug.to_owned())) {
                Reply::Count(count) => Ok(count),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for count_by_slug: {other:?}"),
            }
        }

        async fn public_catalog(
            &self,
            slug: &str,
        ) -> Result<Option<PublicCatalogDocument>, StoreFailure> {
            match self.next(StoreCall::PublicCatalog(slug.to_owned())) {
                Reply::Document(doc) => Ok(doc),
                Reply::Fail(failure) => Err(failure),
                other => panic!("unexpected reply for public_catalog: {other:?}"),
            }
        }
    }
}
