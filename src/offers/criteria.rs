//! Search criteria and the offers API query encoding
//!
//! The offers API takes a single `data` query parameter carrying a JSON
//! object. [`SearchCriteria::upstream_query`] produces that object.

use crate::config::SearchConfig;
use crate::constants::query::{BEST_FIRST, DATE_FORMAT, OFFSET};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A travel period in day/month/year format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Period {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// When the traveler wants to go
///
/// Serialized externally tagged, e.g. `{"months": {...}}`, which is the shape
/// the offers API expects under `engine.when`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelWindow {
    /// One or more fixed periods
    Months {
        periods: Vec<Period>,
        min: u32,
        max: u32,
        nights: Vec<u32>,
    },
    /// Any departure between `start` and `end`
    Flexible {
        start: String,
        end: String,
        min: u32,
        max: u32,
        nights: Vec<u32>,
    },
}

impl TravelWindow {
    /// Fixed periods with a night range
    pub fn months(periods: Vec<Period>, min_nights: u32, max_nights: u32) -> Self {
        Self::Months {
            periods,
            min: min_nights,
            max: max_nights,
            nights: night_choices(min_nights, max_nights),
        }
    }

    /// A flexible departure range with a night range
    pub fn flexible(
        start: impl Into<String>,
        end: impl Into<String>,
        min_nights: u32,
        max_nights: u32,
    ) -> Self {
        Self::Flexible {
            start: start.into(),
            end: end.into(),
            min: min_nights,
            max: max_nights,
            nights: night_choices(min_nights, max_nights),
        }
    }

    fn night_range(&self) -> (u32, u32) {
        match self {
            Self::Months { min, max, .. } | Self::Flexible { min, max, .. } => (*min, *max),
        }
    }

    fn dates(&self) -> Vec<&str> {
        match self {
            Self::Months { periods, .. } => periods
                .iter()
                .flat_map(|p| [p.start.as_str(), p.end.as_str()])
                .collect(),
            Self::Flexible { start, end, .. } => vec![start.as_str(), end.as_str()],
        }
    }
}

fn night_choices(min: u32, max: u32) -> Vec<u32> {
    if min == max {
        vec![min]
    } else {
        vec![min, max]
    }
}

/// Traveler composition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Travelers {
    pub adult: u32,
    pub child: u32,
    pub room: u32,
    #[serde(rename = "childAges")]
    pub child_ages: Vec<u32>,
}

impl Default for Travelers {
    fn default() -> Self {
        Self {
            adult: 2,
            child: 0,
            room: 1,
            child_ages: Vec::new(),
        }
    }
}

/// Package price range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub min: u32,
    pub max: u32,
}

/// Everything needed to ask the offers API for packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub locale: String,
    pub currency: String,
    /// Departure airport codes
    pub from_where: Vec<String>,
    pub market: u32,
    /// Numeric destination ids, when known
    pub destination_ids: Option<Vec<u32>>,
    /// Free-text destination names
    pub destination_names: Vec<String>,
    pub window: TravelWindow,
    pub travelers: Travelers,
    pub budget: Budget,
    pub flex: bool,
}

#[derive(Serialize)]
struct UpstreamQuery<'a> {
    locale: &'a str,
    currency: &'a str,
    fromwhere: &'a [String],
    engine: UpstreamEngine<'a>,
    sort: BestSort,
    limit: u32,
    offset: u32,
}

#[derive(Serialize)]
struct UpstreamEngine<'a> {
    market: u32,
    #[serde(rename = "where")]
    destination_ids: Option<Vec<u32>>,
    when: &'a TravelWindow,
    who: &'a Travelers,
    #[serde(rename = "whereTxt")]
    destination_names: &'a [String],
    budget: Budget,
    flex: bool,
}

#[derive(Serialize)]
struct BestSort {
    best: i32,
}

impl SearchCriteria {
    /// Build the batch criteria from the `[search]` config section
    pub fn from_config(search: &SearchConfig) -> Self {
        Self {
            locale: search.locale.clone(),
            currency: search.currency.clone(),
            from_where: search.from_where.clone(),
            market: search.market,
            destination_ids: None,
            destination_names: vec![search.city.clone()],
            window: TravelWindow::months(
                search.periods.clone(),
                search.min_nights,
                search.max_nights,
            ),
            travelers: Travelers {
                adult: search.adults,
                child: search.children,
                room: search.rooms,
                child_ages: search.child_ages.clone(),
            },
            budget: Budget {
                min: search.budget_min,
                max: search.budget_max,
            },
            flex: search.flex,
        }
    }

    /// Check ranges and date formats
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.window.night_range();
        if min > max {
            return Err(Error::InvalidQuery(format!(
                "min nights {} is greater than max nights {}",
                min, max
            )));
        }
        if self.budget.min > self.budget.max {
            return Err(Error::InvalidQuery(format!(
                "budget min {} is greater than budget max {}",
                self.budget.min, self.budget.max
            )));
        }
        for date in self.window.dates() {
            parse_date(date)?;
        }
        Ok(())
    }

    /// Destination ids to send upstream
    ///
    /// Explicit ids win. Otherwise the first destination name is looked up
    /// in `known_ids`, since the offers API does not match some cities by
    /// name alone. An exact key wins; failing that, the case-insensitive
    /// match with the smallest key is used so the result does not depend on
    /// map order.
    pub fn upstream_destination_ids(&self, known_ids: &HashMap<String, u32>) -> Option<Vec<u32>> {
        if let Some(ids) = &self.destination_ids {
            return Some(ids.clone());
        }

        let name = self.destination_names.first()?.trim();
        if let Some(id) = known_ids.get(name) {
            return Some(vec![*id]);
        }

        known_ids
            .iter()
            .filter(|(city, _)| city.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, id)| vec![*id])
    }

    /// Encode the criteria as the offers API `data` JSON object
    pub fn upstream_query(
        &self,
        known_ids: &HashMap<String, u32>,
        limit: u32,
    ) -> Result<serde_json::Value> {
        let query = UpstreamQuery {
            locale: &self.locale,
            currency: &self.currency,
            fromwhere: &self.from_where,
            engine: UpstreamEngine {
                market: self.market,
                destination_ids: self.upstream_destination_ids(known_ids),
                when: &self.window,
                who: &self.travelers,
                destination_names: &self.destination_names,
                budget: self.budget,
                flex: self.flex,
            },
            sort: BestSort { best: BEST_FIRST },
            limit,
            offset: OFFSET,
        };

        Ok(serde_json::to_value(query)?)
    }
}

/// Parse a day/month/year date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidQuery(format!("Invalid date (expected DD/MM/YYYY): {}", value)))
}

/// Format a date as day/month/year
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
