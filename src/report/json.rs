// src/report/json.rs

use super::Report;
use crate::error::Result;

/// Pretty-printed JSON for the report file (and for `--json` on stdout).
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
