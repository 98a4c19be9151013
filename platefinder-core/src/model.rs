//! Wire shapes of the restaurant directory API.
//!
//! The session record stores these envelopes as-is, so the field names here
//! double as the persisted format.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub res_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantSummary {
    #[serde(rename = "R")]
    pub r: RestaurantRef,
    pub name: String,
    #[serde(default)]
    pub phone_numbers: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

impl RestaurantSummary {
    pub fn id(&self) -> u64 {
        self.r.res_id
    }
}

/// One element of `restaurants` in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantEntry {
    pub restaurant: RestaurantSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cuisine {
    pub cuisine_id: u64,
    pub cuisine_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisineEntry {
    pub cuisine: Cuisine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRating {
    pub aggregate_rating: Rating,
}

/// A rating exactly as the directory sent it. It has been seen both as
/// `4.1` and as `"4.1"`; either form is stored and printed unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for Rating {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RestaurantLocation {
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetail {
    #[serde(rename = "R", default, skip_serializing_if = "Option::is_none")]
    pub r: Option<RestaurantRef>,
    pub name: String,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub cuisines: String,
    pub user_rating: UserRating,
    #[serde(default)]
    pub timings: String,
    #[serde(default)]
    pub location: RestaurantLocation,
    #[serde(default)]
    pub phone_numbers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results_found: u64,
    #[serde(default)]
    pub restaurants: Vec<RestaurantEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuisinesResponse {
    #[serde(default)]
    pub cuisines: Vec<CuisineEntry>,
}

/// What a search filters on.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Name(String),
    Cuisine(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_parses_nested_ids() {
        let body = r#"{
            "results_found": 1,
            "restaurants": [{"restaurant": {
                "R": {"res_id": 16774318},
                "name": "Otto Enoteca",
                "phone_numbers": "(212) 995-9559, (212) 995-9560",
                "thumb": "",
                "cuisines": "Italian"
            }}]
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.results_found, 1);
        let r = &resp.restaurants[0].restaurant;
        assert_eq!(r.id(), 16774318);
        assert_eq!(r.thumb.as_deref(), Some(""));
    }

    #[test]
    fn rating_keeps_text_and_number_as_sent() {
        let text: UserRating = serde_json::from_str(r#"{"aggregate_rating": "4.0"}"#).unwrap();
        let num: UserRating = serde_json::from_str(r#"{"aggregate_rating": 3.9}"#).unwrap();
        assert_eq!(text.aggregate_rating, Rating::from("4.0"));
        assert_eq!(text.aggregate_rating.to_string(), "4.0");
        assert_eq!(num.aggregate_rating.to_string(), "3.9");
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"{"aggregate_rating":"4.0"}"#);
        assert_eq!(serde_json::to_string(&num).unwrap(), r#"{"aggregate_rating":3.9}"#);
    }

    #[test]
    fn detail_tolerates_missing_optional_fields() {
        let d: RestaurantDetail =
            serde_json::from_str(r#"{"name": "Katz's", "user_rating": {"aggregate_rating": 4.9}}"#)
                .unwrap();
        assert_eq!(d.location.address, "");
        assert!(d.thumb.is_none());
        assert!(d.r.is_none());
    }
}
