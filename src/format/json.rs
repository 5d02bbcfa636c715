//! JSON output formatter

use crate::error::Result;
use crate::format::{OfferRecord, OutputFormatter};

/// JSON formatter - outputs the records as a pretty-printed array
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of offers"
    }

    fn format(&self, records: &[OfferRecord]) -> Result<String> {
        Ok(serde_json::to_string_pretty(records)?)
    }
}
