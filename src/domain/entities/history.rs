use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::package_record::PackageRecord;

/// View-model row derived from a [`PackageRecord`]. Recomputed wholesale on
/// every accepted reconciliation, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub apartment: String,
    pub package_code: String,
}

impl From<PackageRecord> for HistoryRow {
    fn from(record: PackageRecord) -> Self {
        let package_code = record.display_code().to_string();
        Self {
            id: record.id,
            created_at: record.arrived_at,
            apartment: record.apartment,
            package_code,
        }
    }
}

/// Calendar-date range as the operator edits it. Both ends optional; the
/// query boundary is inclusive at `from` and exclusive one day past `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRangeFilter {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Instant bounds handed to the store: `[from 00:00, to+1day 00:00)`.
    /// A single-day filter (`from == to`) therefore covers exactly that day.
    pub fn query_bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let from = self.from.map(start_of_day_utc);
        let to = self.to.and_then(|d| d.succ_opt()).map(start_of_day_utc);
        (from, to)
    }
}

fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn single_day_filter_covers_exactly_that_day() {
        let filter = DateRangeFilter::new(Some(date(2024, 1, 10)), Some(date(2024, 1, 10)));
        let (from, to) = filter.query_bounds();
        assert_eq!(from.expect("from").to_rfc3339(), "2024-01-10T00:00:00+00:00");
        assert_eq!(to.expect("to").to_rfc3339(), "2024-01-11T00:00:00+00:00");
    }

    #[test]
    fn absent_ends_stay_absent() {
        let (from, to) = DateRangeFilter::default().query_bounds();
        assert!(from.is_none());
        assert!(to.is_none());

        let (from, to) = DateRangeFilter::new(Some(date(2024, 3, 1)), None).query_bounds();
        assert!(from.is_some());
        assert!(to.is_none());
    }

    #[test]
    fn row_mapping_uses_display_code() {
        let record = PackageRecord {
            id: "r1".to_string(),
            apartment: "101".to_string(),
            package_code: "NORMALIZED".to_string(),
            label_package_code: Some("AS-TYPED".to_string()),
            arrived_at: Utc::now(),
            created_by: "desk@example.com".to_string(),
        };
        let row = HistoryRow::from(record);
        assert_eq!(row.package_code, "AS-TYPED");
    }
}
