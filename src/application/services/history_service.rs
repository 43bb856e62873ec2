use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::RecordGateway;
use crate::domain::entities::{DateRangeFilter, HistoryRow};

/// Owns the visible history: the active date-range filter, the derived rows,
/// and the monotonic sequence counter that serializes concurrent refreshes.
///
/// Out-of-order responses are never cancelled, only suppressed: a refresh
/// whose sequence number is no longer current discards its response without
/// touching state. Sequence numbers are issued inside the same critical
/// section that records the filter, so sequence order always matches
/// filter-write order and the rows visible at any instant correspond to
/// exactly one filter value.
pub struct HistoryService {
    gateway: Arc<dyn RecordGateway>,
    query_limit: usize,
    state: Mutex<HistoryState>,
}

#[derive(Default)]
struct HistoryState {
    filter: DateRangeFilter,
    rows: Vec<HistoryRow>,
    last_error: Option<String>,
    sequence: u64,
}

impl HistoryService {
    pub fn new(gateway: Arc<dyn RecordGateway>, query_limit: usize) -> Self {
        Self {
            gateway,
            query_limit,
            state: Mutex::new(HistoryState::default()),
        }
    }

    pub async fn current_filter(&self) -> DateRangeFilter {
        self.state.lock().await.filter.clone()
    }

    /// Last accepted rows, newest first.
    pub async fn rows(&self) -> Vec<HistoryRow> {
        self.state.lock().await.rows.clone()
    }

    /// Message from the most recent failed refresh, if its outcome still
    /// stands. Replaced, never accumulated.
    pub async fn last_error(&self) -> Option<String> {
        self.state.lock().await.last_error.clone()
    }

    /// Updates the filter immediately (the UI reflects the typed value
    /// without delay) and refreshes with it. The previous refresh is not
    /// awaited or cancelled; its effect is suppressed by the sequence check.
    pub async fn set_filter(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        let filter = DateRangeFilter::new(from, to);
        let my_seq = {
            // Filter write and sequence grab happen under one lock, so a
            // later filter always carries a higher sequence number.
            let mut state = self.state.lock().await;
            state.filter = filter.clone();
            state.sequence += 1;
            state.sequence
        };
        self.refresh(my_seq, filter).await;
    }

    /// Refresh with whatever filter is currently active.
    pub async fn refresh_current(&self) {
        let (my_seq, filter) = {
            let mut state = self.state.lock().await;
            state.sequence += 1;
            (state.sequence, state.filter.clone())
        };
        self.refresh(my_seq, filter).await;
    }

    async fn refresh(&self, my_seq: u64, filter: DateRangeFilter) {
        let (from, to) = filter.query_bounds();

        let result = self.gateway.recent(self.query_limit, from, to).await;

        let mut state = self.state.lock().await;
        if state.sequence != my_seq {
            debug!(sequence = my_seq, "discarding superseded history response");
            return;
        }

        match result {
            Ok(mut records) => {
                // Stable sort: ties on arrived_at keep store order, so
                // repeated identical queries render identically.
                records.sort_by(|a, b| b.arrived_at.cmp(&a.arrived_at));
                state.rows = records.into_iter().map(HistoryRow::from).collect();
                state.last_error = None;
                debug!(sequence = my_seq, rows = state.rows.len(), "history reconciled");
            }
            Err(err) => {
                // Rows keep their last accepted value; no empty flash.
                warn!(sequence = my_seq, error = %err, "history refresh failed");
                state.last_error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::record_gateway::RecordGateway;
    use crate::domain::entities::{NewLabelRecord, PackageRecord};
    use crate::shared::error::AppError;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::Mutex as StdMutex;

    struct StaticGateway {
        responses: StdMutex<Vec<Result<Vec<PackageRecord>, AppError>>>,
        seen_bounds: StdMutex<Vec<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)>>,
    }

    impl StaticGateway {
        fn new(responses: Vec<Result<Vec<PackageRecord>, AppError>>) -> Self {
            Self {
                responses: StdMutex::new(responses),
                seen_bounds: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RecordGateway for StaticGateway {
        async fn create(&self, _record: &NewLabelRecord) -> Result<(), AppError> {
            Ok(())
        }

        async fn recent(
            &self,
            _limit: usize,
            from: Option<DateTime<Utc>>,
            to: Option<DateTime<Utc>>,
        ) -> Result<Vec<PackageRecord>, AppError> {
            self.seen_bounds.lock().unwrap().push((from, to));
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn record(id: &str, age_minutes: i64) -> PackageRecord {
        PackageRecord {
            id: id.to_string(),
            apartment: "101".to_string(),
            package_code: format!("PKG-{id}"),
            label_package_code: None,
            arrived_at: Utc::now() - Duration::minutes(age_minutes),
            created_by: "desk@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn rows_are_sorted_newest_first_regardless_of_store_order() {
        let gateway = Arc::new(StaticGateway::new(vec![Ok(vec![
            record("old", 30),
            record("new", 1),
            record("mid", 10),
        ])]));
        let service = HistoryService::new(gateway, 200);

        service.refresh_current().await;

        let rows = service.rows().await;
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_prior_rows_and_records_message() {
        let gateway = Arc::new(StaticGateway::new(vec![
            Ok(vec![record("kept", 5)]),
            Err(AppError::Network("Failed to load label history.".to_string())),
        ]));
        let service = HistoryService::new(gateway, 200);

        service.refresh_current().await;
        assert_eq!(service.rows().await.len(), 1);
        assert!(service.last_error().await.is_none());

        service.refresh_current().await;
        assert_eq!(service.rows().await[0].id, "kept");
        let message = service.last_error().await.expect("error surfaced");
        assert!(message.contains("Failed to load label history."));
    }

    #[tokio::test]
    async fn set_filter_passes_day_boundaries_downstream() {
        let gateway = Arc::new(StaticGateway::new(vec![Ok(vec![])]));
        let service = HistoryService::new(Arc::clone(&gateway) as Arc<dyn RecordGateway>, 200);

        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        service.set_filter(Some(day), Some(day)).await;

        let bounds = gateway.seen_bounds.lock().unwrap();
        let (from, to) = &bounds[0];
        assert_eq!(from.unwrap().to_rfc3339(), "2024-01-10T00:00:00+00:00");
        assert_eq!(to.unwrap().to_rfc3339(), "2024-01-11T00:00:00+00:00");
        assert_eq!(service.current_filter().await.from, Some(day));
    }
}
