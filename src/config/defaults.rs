//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Requests allowed per client within one rate limit window
pub const DEFAULT_RATE_LIMIT_CALLS: usize = 20;

/// Rate limit window length in seconds
pub const DEFAULT_RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Destination searched in batch mode
pub const DEFAULT_CITY: &str = "Rome";

/// Offers API locale
pub const DEFAULT_LOCALE: &str = "he";

/// Offers API currency
pub const DEFAULT_CURRENCY: &str = "USD";

/// Departure airport code
pub const DEFAULT_FROM_WHERE: &str = "TLV";

/// Offers API market id
pub const DEFAULT_MARKET: u32 = 4;

/// Batch mode night range
pub const DEFAULT_MIN_NIGHTS: u32 = 5;
pub const DEFAULT_MAX_NIGHTS: u32 = 6;

/// Batch mode budget range
pub const DEFAULT_BUDGET_MIN: u32 = 0;
pub const DEFAULT_BUDGET_MAX: u32 = 550;

/// Traveler composition
pub const DEFAULT_ADULTS: u32 = 2;
pub const DEFAULT_CHILDREN: u32 = 0;
pub const DEFAULT_ROOMS: u32 = 1;

/// Batch mode travel periods (day/month/year)
pub const DEFAULT_PERIODS: &[(&str, &str)] = &[
    ("01/10/2025", "31/10/2025"),
    ("01/11/2025", "30/11/2025"),
];

/// Batch mode output file
pub const DEFAULT_OUTPUT: &str = "output/hotels_output.json";

/// Batch mode output format
pub const DEFAULT_FORMAT: &str = "json";

/// City names the offers API only matches by numeric id
pub const DEFAULT_DESTINATION_IDS: &[(&str, u32)] = &[("Prague", 28), ("Rome", 19)];

/// Landmark address used as the reference point for a city
pub const DEFAULT_LANDMARKS: &[(&str, &str)] = &[
    ("Budapest", "St. Stephen's Basilica"),
    ("Vienna", "Dorotheergasse 13"),
    ("Prague", "Staroměstské nám."),
    ("Rome", "Trevi Fountain"),
];

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "holiday-finder";
