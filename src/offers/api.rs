//! Offers API response schema
//!
//! The offers API is external and returns far more than we use. Unknown
//! fields are ignored. Only the envelope shape is strict: everything inside
//! an offer is read leniently, so a missing or mistyped field becomes `None`
//! (or an empty record) and is judged per offer during enrichment. One bad
//! offer never rejects a whole response.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Top-level response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct OffersResponse {
    pub data: OffersPage,
}

/// `data` member of the response
#[derive(Debug, Clone, Deserialize)]
pub struct OffersPage {
    #[serde(deserialize_with = "offer_records")]
    pub offers: Vec<RawOffer>,
    #[serde(default, deserialize_with = "or_none")]
    pub pagination: Option<Pagination>,
}

/// Paging information reported by the offers API
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default, deserialize_with = "integer")]
    pub total_offers_count: Option<u64>,
    #[serde(default, deserialize_with = "integer")]
    pub limit: Option<u64>,
    #[serde(default, deserialize_with = "integer")]
    pub offset: Option<u64>,
}

/// A flight+hotel package as returned by the offers API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default, deserialize_with = "or_default")]
    pub destination_data: DestinationData,
    #[serde(default, deserialize_with = "or_default")]
    pub offer: PackageData,
    #[serde(default, deserialize_with = "or_default")]
    pub hotel: HotelData,
    #[serde(default, deserialize_with = "or_default")]
    pub flight: FlightData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestinationData {
    #[serde(default, deserialize_with = "or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub name_en: Option<String>,
    #[serde(rename = "destinationId", default, deserialize_with = "integer")]
    pub destination_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageData {
    #[serde(default, deserialize_with = "or_none")]
    pub offer_id: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub outbound_date: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub inbound_date: Option<String>,
    #[serde(default, deserialize_with = "integer")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "or_none")]
    pub package_deeplink_url: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelData {
    #[serde(default, deserialize_with = "or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub board: Option<String>,
    #[serde(default, deserialize_with = "integer")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "or_none")]
    pub photos: Option<Vec<String>>,
    #[serde(default, deserialize_with = "or_none")]
    pub coordinates: Option<RawCoordinates>,
}

/// Hotel position, sometimes sent as numbers and sometimes as strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoordinates {
    #[serde(default, deserialize_with = "or_none")]
    pub latitude: Option<Degrees>,
    #[serde(default, deserialize_with = "or_none")]
    pub longitude: Option<Degrees>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    /// Numeric value, if it parses to a finite number
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightData {
    #[serde(default, deserialize_with = "or_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub company_code: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub takeoff_hour: Option<String>,
    #[serde(default, deserialize_with = "or_none")]
    pub landing_hour: Option<String>,
}

/// The value as `T`, or `None` when it is null or of another shape
fn or_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

/// The value as `T`, or an empty `T` when it is of another shape
fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// A whole number given as a JSON number or numeric string
///
/// `480`, `480.0` and `"480"` read as 480; `4.5`, `"cheap"` and values out
/// of range for `T` read as `None`.
fn integer<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_integer(&value).and_then(|n| T::try_from(n).ok()))
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }
}

fn whole(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

/// Offer records from a JSON array; a record that is not an object reads as empty
fn offer_records<'de, D>(deserializer: D) -> std::result::Result<Vec<RawOffer>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or_default())
        .collect())
}

/// Parse an offers API body into its offer records
///
/// Accepts the `{"data": {"offers": [...]}}` envelope or a bare array.
///
/// # Errors
/// [`Error::UpstreamSchemaMismatch`] when the body is not JSON or the
/// envelope does not hold an `offers` array.
pub fn parse_offers(body: &[u8]) -> Result<Vec<RawOffer>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::UpstreamSchemaMismatch(format!("response is not JSON: {}", e)))?;

    if value.is_array() {
        return offer_records(value).map_err(|e| Error::UpstreamSchemaMismatch(e.to_string()));
    }

    let response: OffersResponse = serde_json::from_value(value)
        .map_err(|e| Error::UpstreamSchemaMismatch(e.to_string()))?;

    if let Some(pagination) = &response.data.pagination {
        debug!(
            total = ?pagination.total_offers_count,
            limit = ?pagination.limit,
            offset = ?pagination.offset,
            "offers page"
        );
    }

    Ok(response.data.offers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offers::enrich::{enrich, enrich_all, SkipReason};
    use crate::offers::testing::raw_offer_json;
    use serde_json::json;

    fn parse(body: Value) -> Result<Vec<RawOffer>> {
        parse_offers(body.to_string().as_bytes())
    }

    #[test]
    fn test_parse_envelope() {
        let body = json!({
            "data": {
                "offers": [raw_offer_json("Hotel Trevi", 41.9009, 12.4833)],
                "pagination": {"total_offers_count": 1, "limit": 1000, "offset": 0}
            }
        });

        let offers = parse(body).unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].hotel.name.as_deref(), Some("Hotel Trevi"));
        assert_eq!(offers[0].destination_data.destination_id, Some(19));
        assert_eq!(offers[0].offer.price, Some(480));
        assert_eq!(offers[0].hotel.rating, Some(4));
    }

    #[test]
    fn test_parse_bare_array() {
        let body = json!([raw_offer_json("Hotel Trevi", 41.9009, 12.4833)]);
        let offers = parse(body).unwrap();
        assert_eq!(offers.len(), 1);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut offer = raw_offer_json("Hotel Trevi", 41.9009, 12.4833);
        offer["hotel"]["facilities"] = json!({"wifi": {"name": "WiFi"}});
        offer["somethingNew"] = json!([1, 2, 3]);

        assert!(parse(json!({"data": {"offers": [offer]}})).is_ok());
    }

    #[test]
    fn test_mistyped_offer_does_not_reject_response() {
        let good = raw_offer_json("Hotel Trevi", 41.9009, 12.4833);
        let mut bad = raw_offer_json("Hotel Bad", 41.9, 12.5);
        bad["offer"]["price"] = json!("cheap");
        bad["hotel"]["rating"] = json!(4.5);
        bad["destinationData"]["destinationId"] = json!({"id": 19});
        bad["hotel"]["photos"] = json!("https://img.example/1.jpg");

        let offers = parse(json!({"data": {"offers": [good, bad]}})).unwrap();
        assert_eq!(offers.len(), 2);

        let bad = &offers[1];
        assert_eq!(bad.offer.price, None);
        assert_eq!(bad.hotel.rating, None);
        assert_eq!(bad.destination_data.destination_id, None);
        assert!(bad.hotel.photos.is_none());
        assert_eq!(enrich(bad), Err(SkipReason::MissingPrice));

        let enrichment = enrich_all(&offers);
        assert_eq!(enrichment.skipped, 1);
        assert_eq!(enrichment.offers.len(), 1);
        assert_eq!(enrichment.offers[0].hotel_name, "Hotel Trevi");
    }

    #[test]
    fn test_numeric_strings_and_whole_floats() {
        let mut offer = raw_offer_json("Hotel Trevi", 41.9009, 12.4833);
        offer["offer"]["price"] = json!("480");
        offer["hotel"]["rating"] = json!(4.0);
        offer["destinationData"]["destinationId"] = json!(" 19 ");

        let offers = parse(json!([offer])).unwrap();

        assert_eq!(offers[0].offer.price, Some(480));
        assert_eq!(offers[0].hotel.rating, Some(4));
        assert_eq!(offers[0].destination_data.destination_id, Some(19));
    }

    #[test]
    fn test_missing_or_mistyped_record_reads_as_empty() {
        let mut no_hotel = raw_offer_json("Hotel Trevi", 41.9009, 12.4833);
        no_hotel.as_object_mut().unwrap().remove("hotel");
        let mut string_flight = raw_offer_json("Hotel Trevi", 41.9009, 12.4833);
        string_flight["flight"] = json!("LY 386");

        let offers = parse(json!({"data": {"offers": [no_hotel, string_flight, 42]}})).unwrap();

        assert_eq!(offers.len(), 3);
        assert_eq!(enrich(&offers[0]), Err(SkipReason::MissingCoordinates));
        assert!(enrich(&offers[1]).is_ok());
        assert_eq!(enrich(&offers[2]), Err(SkipReason::MissingCoordinates));
    }

    #[test]
    fn test_wrong_envelope_is_schema_mismatch() {
        for body in [
            json!({"data": {"offers": {"0": {}}}}),
            json!({"data": {"offers": "none"}}),
            json!({"data": {"pagination": {}}}),
            json!({"offers": []}),
        ] {
            assert!(
                matches!(parse(body.clone()), Err(Error::UpstreamSchemaMismatch(_))),
                "{}",
                body
            );
        }
        assert!(matches!(
            parse_offers(b"<html>busy</html>"),
            Err(Error::UpstreamSchemaMismatch(_))
        ));
    }

    #[test]
    fn test_degrees_accepts_numbers_and_strings() {
        assert_eq!(Degrees::Number(41.9).value(), Some(41.9));
        assert_eq!(Degrees::Text(" 12.5 ".to_string()).value(), Some(12.5));
        assert_eq!(Degrees::Text("north".to_string()).value(), None);
    }
}
