//! Search command handler
//!
//! Runs one batch search from the `[search]` config section and writes the
//! ranked offers as JSON to the output file.

use crate::config::{Config, SearchConfig};
use crate::error::{Error, Result};
use crate::format::json::JsonFormatter;
use crate::format::{available_formats, get_formatter, to_records, OfferRecord, OutputFormatter};
use crate::geo::ReferencePoint;
use crate::offers::{DefaultSearch, SearchCriteria};
use clap::Args;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Search command arguments
#[derive(Args, Default)]
pub struct SearchArgs {
    /// Destination city
    #[arg(long, short = 'c')]
    pub city: Option<String>,

    /// Address to measure hotel distances from
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Minimum trip length in nights
    #[arg(long)]
    pub min_nights: Option<u32>,

    /// Maximum trip length in nights
    #[arg(long)]
    pub max_nights: Option<u32>,

    /// Minimum package price
    #[arg(long)]
    pub budget_min: Option<u32>,

    /// Maximum package price
    #[arg(long)]
    pub budget_max: Option<u32>,

    /// Stdout format; the output file is always JSON, `text` also prints a table
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// JSON output file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging();

    let mut config = Config::load()?;
    apply_overrides(&mut config.search, &args);

    let formatter = get_formatter(&config.search.format).ok_or_else(|| {
        Error::Config(format!("Unknown format: {}", config.search.format))
    })?;

    let criteria = SearchCriteria::from_config(&config.search);
    criteria.validate()?;
    let reference = batch_reference(&config.search, &config.destinations.landmarks);

    let search = DefaultSearch::from_config(&config)?;
    let outcome = search.run(&criteria, &reference).await?;
    let records = to_records(&outcome.offers);

    let (file, view) = render(formatter.as_ref(), &records)?;
    let path = Path::new(&config.search.output);
    write_output(path, &file)?;
    info!(path = %path.display(), "offers written");
    if let Some(view) = view {
        println!("{}", view);
    }

    println!("{}", summary(&records)?);
    Ok(())
}

/// Apply command-line overrides on top of the configured search
fn apply_overrides(search: &mut SearchConfig, args: &SearchArgs) {
    if let Some(city) = &args.city {
        search.city = city.clone();
    }
    if let Some(address) = &args.address {
        search.comparison_address = Some(address.clone());
    }
    if let Some(min) = args.min_nights {
        search.min_nights = min;
    }
    if let Some(max) = args.max_nights {
        search.max_nights = max;
    }
    if let Some(min) = args.budget_min {
        search.budget_min = min;
    }
    if let Some(max) = args.budget_max {
        search.budget_max = max;
    }
    if let Some(format) = &args.format {
        search.format = format.clone();
    }
    if let Some(output) = &args.output {
        search.output = output.clone();
    }
}

/// Reference point for a batch search
///
/// An explicit comparison address wins, then the city's landmark, then the
/// city itself.
fn batch_reference(search: &SearchConfig, landmarks: &HashMap<String, String>) -> ReferencePoint {
    match search
        .comparison_address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    {
        Some(address) => ReferencePoint::Address(address.to_string()),
        None => ReferencePoint::for_city(&search.city, landmarks),
    }
}

/// Render batch results as the output file body and an optional stdout view
///
/// The file is JSON whatever the format. Other formats add a stdout view.
fn render(
    formatter: &dyn OutputFormatter,
    records: &[OfferRecord],
) -> Result<(String, Option<String>)> {
    let file = JsonFormatter.format(records)?;
    let view = if formatter.name() == JsonFormatter.name() {
        None
    } else {
        Some(formatter.format(records)?)
    };
    Ok((file, view))
}

/// Write `contents` to `path`, creating parent directories
fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Summary printed after a batch search
fn summary(records: &[OfferRecord]) -> Result<String> {
    let mut out = format!("got {} offers", records.len());
    if let Some(closest) = records.first() {
        out.push_str("\nClosest offer: ");
        out.push_str(&serde_json::to_string_pretty(closest)?);
    }
    Ok(out)
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::tests::sample_records;
    use tempfile::TempDir;

    fn landmarks() -> HashMap<String, String> {
        HashMap::from([("Rome".to_string(), "Trevi Fountain".to_string())])
    }

    #[test]
    fn test_apply_overrides() {
        let mut search = SearchConfig::default();
        let args = SearchArgs {
            city: Some("Prague".to_string()),
            min_nights: Some(3),
            max_nights: Some(4),
            budget_max: Some(900),
            format: Some("text".to_string()),
            ..Default::default()
        };

        apply_overrides(&mut search, &args);

        assert_eq!(search.city, "Prague");
        assert_eq!(search.min_nights, 3);
        assert_eq!(search.max_nights, 4);
        assert_eq!(search.budget_min, 0);
        assert_eq!(search.budget_max, 900);
        assert_eq!(search.format, "text");
        assert_eq!(search.output, "output/hotels_output.json");
    }

    #[test]
    fn test_batch_reference_prefers_explicit_address() {
        let search = SearchConfig {
            comparison_address: Some("Piazza Navona".to_string()),
            ..SearchConfig::default()
        };
        assert_eq!(
            batch_reference(&search, &landmarks()),
            ReferencePoint::Address("Piazza Navona".to_string())
        );
    }

    #[test]
    fn test_batch_reference_uses_landmark() {
        assert_eq!(
            batch_reference(&SearchConfig::default(), &landmarks()),
            ReferencePoint::Address("Trevi Fountain".to_string())
        );
    }

    #[test]
    fn test_batch_reference_falls_back_to_city() {
        let search = SearchConfig {
            city: "Lisbon".to_string(),
            comparison_address: Some("   ".to_string()),
            ..SearchConfig::default()
        };
        assert_eq!(
            batch_reference(&search, &landmarks()),
            ReferencePoint::City("Lisbon".to_string())
        );
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output").join("hotels_output.json");

        write_output(&path, "[]").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_render_json_has_no_stdout_view() {
        let records = sample_records();
        let (file, view) = render(&JsonFormatter, &records).unwrap();

        let parsed: Vec<OfferRecord> = serde_json::from_str(&file).unwrap();
        assert_eq!(parsed, records);
        assert!(view.is_none());
    }

    #[test]
    fn test_render_text_still_writes_json() {
        let records = sample_records();
        let text = get_formatter("text").unwrap();
        let (file, view) = render(text.as_ref(), &records).unwrap();

        let parsed: Vec<OfferRecord> = serde_json::from_str(&file).unwrap();
        assert_eq!(parsed, records);
        assert_eq!(view, Some(text.format(&records).unwrap()));
    }

    #[test]
    fn test_summary() {
        let records = sample_records();
        let out = summary(&records).unwrap();

        assert!(out.starts_with("got 2 offers\nClosest offer: {"));
        assert!(out.contains("\"name\": \"Hotel Trevi\""));
    }

    #[test]
    fn test_summary_without_offers() {
        assert_eq!(summary(&[]).unwrap(), "got 0 offers");
    }
}
