use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Validate;
use crate::domain::entities::HistoryRow;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-range filter as typed by the operator, `YYYY-MM-DD` or empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryFilterRequest {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl HistoryFilterRequest {
    pub fn parsed_from(&self) -> Option<NaiveDate> {
        parse_date(self.from.as_deref())
    }

    pub fn parsed_to(&self) -> Option<NaiveDate> {
        parse_date(self.to.as_deref())
    }
}

impl Validate for HistoryFilterRequest {
    fn validate(&self) -> Result<(), String> {
        for (label, value) in [("from", &self.from), ("to", &self.to)] {
            if let Some(value) = value {
                let trimmed = value.trim();
                if !trimmed.is_empty() && NaiveDate::parse_from_str(trimmed, DATE_FORMAT).is_err() {
                    return Err(format!("Invalid {label} date: expected YYYY-MM-DD"));
                }
            }
        }
        Ok(())
    }
}

fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRowDto {
    pub id: String,
    pub created_at: i64,
    pub apartment: String,
    pub package_code: String,
}

impl From<&HistoryRow> for HistoryRowDto {
    fn from(row: &HistoryRow) -> Self {
        Self {
            id: row.id.clone(),
            created_at: row.created_at.timestamp_millis(),
            apartment: row.apartment.clone(),
            package_code: row.package_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryViewResponse {
    pub rows: Vec<HistoryRowDto>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_and_empty_dates_pass_validation() {
        let request = HistoryFilterRequest {
            from: Some("2024-01-10".to_string()),
            to: Some("".to_string()),
        };
        assert!(request.validate().is_ok());
        assert!(request.parsed_from().is_some());
        assert!(request.parsed_to().is_none());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let request = HistoryFilterRequest {
            from: Some("10/01/2024".to_string()),
            to: None,
        };
        assert!(request.validate().is_err());
    }
}
