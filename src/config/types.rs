use std::time::Duration;

use serde::Deserialize;

use crate::args::{PresenterKind, parse_duration_value};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub update_interval: Option<DurationValue>,
    pub max_history_size: Option<usize>,
    pub enabled: Option<bool>,
    pub strict: Option<bool>,
    pub presenter: Option<PresenterKind>,
    pub export_json: Option<String>,
    pub export_csv: Option<String>,
    pub export_stats: Option<String>,
    pub summary: Option<bool>,
    pub no_color: Option<bool>,
}

/// Either an integer number of milliseconds or a duration string such as `"2s"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Millis(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, String> {
        match self {
            DurationValue::Millis(ms) => {
                if *ms == 0 {
                    Err("Duration must be > 0.".to_owned())
                } else {
                    Ok(Duration::from_millis(*ms))
                }
            }
            DurationValue::Text(text) => parse_duration_value(text).map_err(|err| err.to_string()),
        }
    }
}
