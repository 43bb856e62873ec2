use serde::{Deserialize, Serialize};

/// Symbologies the capture device is allowed to decode.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    QrCode,
    Code128,
    Code39,
    Ean13,
    Ean8,
    UpcA,
    Itf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub history: HistoryConfig,
    pub printing: PrintingConfig,
    pub scanner: ScannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Cap on records fetched per history query.
    pub query_limit: usize,
    /// Cap on rows shown in the history table and its printout.
    pub visible_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintingConfig {
    pub spool_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub fps: u32,
    /// Side length of the square viewfinder box, in pixels.
    pub viewfinder_box: u32,
    pub symbologies: Vec<Symbology>,
    pub enable_torch: bool,
    pub enable_zoom: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8080".to_string(),
            },
            history: HistoryConfig {
                query_limit: 200,
                visible_rows: 10,
            },
            printing: PrintingConfig {
                spool_dir: "./spool".to_string(),
            },
            scanner: ScannerConfig::default(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: 10,
            viewfinder_box: 250,
            symbologies: vec![
                Symbology::QrCode,
                Symbology::Code128,
                Symbology::Code39,
                Symbology::Ean13,
                Symbology::Ean8,
                Symbology::UpcA,
                Symbology::Itf,
            ],
            enable_torch: true,
            enable_zoom: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("PACKDESK_API_BASE_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("PACKDESK_HISTORY_QUERY_LIMIT") {
            if let Some(value) = parse_usize(&v) {
                cfg.history.query_limit = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("PACKDESK_HISTORY_VISIBLE_ROWS") {
            if let Some(value) = parse_usize(&v) {
                cfg.history.visible_rows = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("PACKDESK_SPOOL_DIR") {
            if !v.trim().is_empty() {
                cfg.printing.spool_dir = v.trim().to_string();
            }
        }
        if let Ok(v) = std::env::var("PACKDESK_SCANNER_FPS") {
            if let Some(value) = parse_u32(&v) {
                cfg.scanner.fps = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("PACKDESK_SCANNER_TORCH") {
            cfg.scanner.enable_torch = parse_bool(&v, cfg.scanner.enable_torch);
        }
        if let Ok(v) = std::env::var("PACKDESK_SCANNER_ZOOM") {
            cfg.scanner.enable_zoom = parse_bool(&v, cfg.scanner.enable_zoom);
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if self.history.query_limit == 0 {
            return Err("History query_limit must be greater than 0".to_string());
        }
        if self.history.visible_rows == 0 {
            return Err("History visible_rows must be greater than 0".to_string());
        }
        if self.scanner.fps == 0 {
            return Err("Scanner fps must be greater than 0".to_string());
        }
        if self.scanner.symbologies.is_empty() {
            return Err("Scanner symbology allow-list must not be empty".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok()
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_query_limit_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.history.query_limit = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_symbology_list_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.scanner.symbologies.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parse_bool_falls_back_to_default() {
        assert!(parse_bool("on", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("garbage", true));
    }
}
