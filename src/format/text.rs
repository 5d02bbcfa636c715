//! Human-readable text output formatter

use crate::error::Result;
use crate::format::{OfferRecord, OutputFormatter};

/// Text formatter - one line per offer, nearest first
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable list"
    }

    fn format(&self, records: &[OfferRecord]) -> Result<String> {
        let mut output = format!("{} offers, nearest first\n\n", records.len());

        for (i, record) in records.iter().enumerate() {
            output.push_str(&format!(
                "{:>3}. {} ({} m)\n",
                i + 1,
                record.name,
                record.distance_meters
            ));
            output.push_str(&format!(
                "     {} - {} ({} nights), {}, price {}\n",
                record.start_date, record.end_date, record.nights_amount, record.airline, record.price
            ));
            output.push_str(&format!("     {}\n", record.url));
            output.push_str(&format!("     {}\n", record.google_maps_url));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_records;

    #[test]
    fn test_text_format() {
        let output = TextFormatter.format(&sample_records()).unwrap();

        assert!(output.starts_with("2 offers, nearest first"));
        assert!(output.contains("  1. Hotel Trevi (33 m)"));
        assert!(output.contains("  2. Hotel Colosseo (1403 m)"));
        assert!(output.contains("01/10/2025 - 06/10/2025 (5 nights), El Al, price 480"));
    }

    #[test]
    fn test_text_formatter_info() {
        assert_eq!(TextFormatter.name(), "text");
        assert!(!TextFormatter.description().is_empty());
    }
}
