use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{NewLabelRecord, PackageRecord};
use crate::shared::error::AppError;

/// Create/query access to the remote record store. Transport is opaque to
/// callers; failures are normalized into [`AppError`].
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Persist a captured label. An unauthenticated response maps to
    /// [`AppError::Unauthenticated`] with an operator-facing message,
    /// distinct from generic failure.
    async fn create(&self, record: &NewLabelRecord) -> Result<(), AppError>;

    /// Up to `limit` of the most recent records with `arrived_at` in
    /// `[from, to)`. An unauthenticated response yields an empty vec
    /// silently; read-auth lapses are tolerable, write-auth lapses are not.
    async fn recent(
        &self,
        limit: usize,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<PackageRecord>, AppError>;
}
