use serde::{Deserialize, Serialize};

use crate::errors::invalid_options_error;
use crate::IseriesError;

pub const DEFAULT_DUMMY_TABLE: &str = "SYSIBM.SYSDUMMY1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Replace projection markers with literals. When off, statements are still validated.
    pub inline_projection_markers: bool,
    /// One-row table used by the EXISTS emulation.
    pub dummy_table: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            inline_projection_markers: true,
            dummy_table: DEFAULT_DUMMY_TABLE.to_string(),
        }
    }
}

impl RewriteOptions {
    pub fn from_json(raw: &str) -> Result<Self, IseriesError> {
        serde_json::from_str(raw).map_err(invalid_options_error)
    }
}

#[cfg(test)]
mod tests {
    use super::{RewriteOptions, DEFAULT_DUMMY_TABLE};

    #[test]
    fn partial_json_keeps_defaults() {
        let options = RewriteOptions::from_json(r#"{"dummy_table":"QSYS2.DUAL"}"#)
            .expect("options should parse");
        assert!(options.inline_projection_markers);
        assert_eq!(options.dummy_table, "QSYS2.DUAL");

        let defaults = RewriteOptions::from_json("{}").expect("empty object should parse");
        assert_eq!(defaults.dummy_table, DEFAULT_DUMMY_TABLE);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let error = RewriteOptions::from_json("{\"inline_projection_markers\": \"yes\"}")
            .expect_err("string is not a bool");
        assert_eq!(error.code, crate::errors::ErrorCode::Config);
    }
}
