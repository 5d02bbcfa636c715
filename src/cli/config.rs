//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "search.city")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[upstream]");
    println!("base_url = \"{}\"", config.upstream.base_url);
    println!("user_agent = \"{}\"", config.upstream.user_agent);
    println!("limit = {}", config.upstream.limit);
    println!();

    println!("[geocoder]");
    println!("base_url = \"{}\"", config.geocoder.base_url);
    println!("user_agent = \"{}\"", config.geocoder.user_agent);
    println!();

    println!("[rate_limit]");
    println!("calls = {}", config.rate_limit.calls);
    println!("period_secs = {}", config.rate_limit.period_secs);
    println!();

    let search = &config.search;
    println!("[search]");
    println!("city = \"{}\"", search.city);
    match &search.comparison_address {
        Some(address) => println!("comparison_address = \"{}\"", address),
        None => println!("comparison_address = \"\" # city landmark"),
    }
    println!("locale = \"{}\"", search.locale);
    println!("currency = \"{}\"", search.currency);
    println!("from_where = {:?}", search.from_where);
    println!("market = {}", search.market);
    println!("min_nights = {}", search.min_nights);
    println!("max_nights = {}", search.max_nights);
    println!("budget_min = {}", search.budget_min);
    println!("budget_max = {}", search.budget_max);
    println!("adults = {}", search.adults);
    println!("children = {}", search.children);
    println!("rooms = {}", search.rooms);
    println!("flex = {}", search.flex);
    println!("output = \"{}\"", search.output);
    println!("format = \"{}\"", search.format);
    for period in &search.periods {
        println!("period = {} - {}", period.start, period.end);
    }
    println!();

    println!("[destinations.ids]");
    let mut ids: Vec<_> = config.destinations.ids.iter().collect();
    ids.sort();
    for (city, id) in ids {
        println!("{} = {}", city, id);
    }
    println!();

    println!("[destinations.landmarks]");
    let mut landmarks: Vec<_> = config.destinations.landmarks.iter().collect();
    landmarks.sort();
    for (city, landmark) in landmarks {
        println!("{} = \"{}\"", city, landmark);
    }
}
