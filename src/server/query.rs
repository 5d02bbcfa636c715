//! `GET /api/offers` query parsing
//!
//! Query parameters may repeat (`from-where`, `where-txt`, `who.childAges`),
//! so they arrive as raw pairs rather than a flat struct.

use chrono::{Days, NaiveDate};

use crate::config::defaults::{
    DEFAULT_ADULTS, DEFAULT_CHILDREN, DEFAULT_CURRENCY, DEFAULT_FROM_WHERE, DEFAULT_LOCALE,
    DEFAULT_MARKET, DEFAULT_ROOMS,
};
use crate::error::{Error, Result};
use crate::offers::criteria::format_date;
use crate::offers::{Budget, SearchCriteria, TravelWindow, Travelers};

const DEFAULT_WINDOW_DAYS: u64 = 7;
const DEFAULT_MIN_NIGHTS: u32 = 1;
const DEFAULT_MAX_NIGHTS: u32 = 2;
const DEFAULT_BUDGET_MIN: u32 = 0;
const DEFAULT_BUDGET_MAX: u32 = 1000;

/// A parsed offers request
#[derive(Debug, Clone, PartialEq)]
pub struct OffersQuery {
    /// Explicit reference address, if given
    pub comparison_address: Option<String>,
    pub criteria: SearchCriteria,
}

impl OffersQuery {
    /// Parse query pairs, filling request defaults relative to `today`
    pub fn parse(pairs: &[(String, String)], today: NaiveDate) -> Result<Self> {
        let mut comparison_address = None;
        let mut locale = DEFAULT_LOCALE.to_string();
        let mut currency = DEFAULT_CURRENCY.to_string();
        let mut from_where = Vec::new();
        let mut market = DEFAULT_MARKET;
        let mut destination_names = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut min_nights = DEFAULT_MIN_NIGHTS;
        let mut max_nights = DEFAULT_MAX_NIGHTS;
        let mut travelers = Travelers {
            adult: DEFAULT_ADULTS,
            child: DEFAULT_CHILDREN,
            room: DEFAULT_ROOMS,
            child_ages: Vec::new(),
        };
        let mut budget = Budget {
            min: DEFAULT_BUDGET_MIN,
            max: DEFAULT_BUDGET_MAX,
        };
        let mut flex = false;

        for (key, value) in pairs {
            match key.as_str() {
                "comparison-address" => comparison_address = Some(value.clone()),
                "locale" => locale = value.clone(),
                "currency" => currency = value.clone(),
                "from-where" => from_where.push(value.clone()),
                "market" => market = parse_number(key, value)?,
                "where-txt" => destination_names.push(value.clone()),
                "start-date" => start = Some(value.clone()),
                "end-date" => end = Some(value.clone()),
                "min-nights" => min_nights = parse_number(key, value)?,
                "max-nights" => max_nights = parse_number(key, value)?,
                "who.adult" => travelers.adult = parse_number(key, value)?,
                "who.child" => travelers.child = parse_number(key, value)?,
                "who.room" => travelers.room = parse_number(key, value)?,
                "who.childAges" => {
                    for age in value.split(',').filter(|a| !a.trim().is_empty()) {
                        travelers.child_ages.push(parse_number(key, age)?);
                    }
                }
                "budget-min" => budget.min = parse_number(key, value)?,
                "budget-max" => budget.max = parse_number(key, value)?,
                "flex" => flex = parse_flag(key, value)?,
                _ => {}
            }
        }

        if budget.max < 1 {
            return Err(Error::InvalidQuery("budget-max must be at least 1".to_string()));
        }
        if from_where.is_empty() {
            from_where.push(DEFAULT_FROM_WHERE.to_string());
        }

        let start = start.unwrap_or_else(|| format_date(today));
        let end = end.unwrap_or_else(|| {
            format_date(
                today
                    .checked_add_days(Days::new(DEFAULT_WINDOW_DAYS))
                    .unwrap_or(today),
            )
        });

        let criteria = SearchCriteria {
            locale,
            currency,
            from_where,
            market,
            destination_ids: None,
            destination_names,
            window: TravelWindow::flexible(start, end, min_nights, max_nights),
            travelers,
            budget,
            flex,
        };
        criteria.validate()?;

        Ok(Self {
            comparison_address,
            criteria,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidQuery(format!("{} must be a non-negative integer, got {:?}", key, value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidQuery(format!("{} must be a boolean, got {:?}", key, value))),
    }
}
