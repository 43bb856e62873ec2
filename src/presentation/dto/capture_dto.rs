use serde::{Deserialize, Serialize};

use crate::domain::entities::FocusField;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureStateResponse {
    pub code: String,
    pub apartment: String,
    pub focus: FocusField,
    pub saving: bool,
    pub error: Option<String>,
}
