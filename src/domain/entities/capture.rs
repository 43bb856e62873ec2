use serde::{Deserialize, Serialize};

use super::package_record::NewLabelRecord;

/// Which capture field currently holds keyboard focus.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusField {
    Code,
    Apartment,
}

/// The two editable capture fields. Transient: created empty, mutated on
/// every keystroke or scan, cleared when a submit settles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureDraft {
    pub code: String,
    pub apartment: String,
}

impl CaptureDraft {
    /// Submit eligibility: both fields non-empty after trimming.
    pub fn is_submittable(&self) -> bool {
        !self.code.trim().is_empty() && !self.apartment.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.code.clear();
        self.apartment.clear();
    }

    /// Values are sent as typed; trimming applies to eligibility only.
    pub fn to_new_record(&self) -> NewLabelRecord {
        NewLabelRecord {
            package_code: self.code.clone(),
            apartment: self.apartment.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_not_submittable() {
        let mut draft = CaptureDraft::default();
        assert!(!draft.is_submittable());

        draft.code = "PKG-1".to_string();
        assert!(!draft.is_submittable());

        draft.apartment = "   ".to_string();
        assert!(!draft.is_submittable());

        draft.apartment = "204".to_string();
        assert!(draft.is_submittable());
    }

    #[test]
    fn clear_empties_both_fields() {
        let mut draft = CaptureDraft {
            code: "PKG-1".to_string(),
            apartment: "204".to_string(),
        };
        draft.clear();
        assert!(draft.code.is_empty());
        assert!(draft.apartment.is_empty());
    }
}
