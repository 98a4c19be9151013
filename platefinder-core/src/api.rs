use crate::model::{Coordinates, CuisineEntry, CuisinesResponse, RestaurantDetail, SearchQuery, SearchResponse};
use platefinder_common::{ApiConfig, PlateFinderError, Result};
use serde::de::DeserializeOwned;

/// The remote restaurant directory.
#[async_trait::async_trait]
pub trait RestaurantApi: Send + Sync {
    async fn search(&self, query: &SearchQuery, at: Coordinates) -> Result<SearchResponse>;
    async fn cuisines(&self, at: Coordinates) -> Result<Vec<CuisineEntry>>;
    /// `Ok(None)` when the directory has no restaurant with that id.
    async fn restaurant(&self, id: u64) -> Result<Option<RestaurantDetail>>;
}

/// reqwest client for the Zomato v2.1 wire format.
#[derive(Debug, Clone)]
pub struct ZomatoClient {
    client: reqwest::Client,
    base_url: String,
    user_key: String,
}

impl ZomatoClient {
    pub fn new(base_url: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            user_key: user_key.into(),
        }
    }

    pub fn from_config(cfg: &ApiConfig) -> Self {
        Self::new(&cfg.base_url, cfg.resolved_user_key())
    }

    async fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {url} {params:?}");
        let resp = self
            .client
            .get(&url)
            .header("user-key", &self.user_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| PlateFinderError::Http(e.to_string()))?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(serde_json::json!({ "code": 404 }));
        }
        if !status.is_success() {
            return Err(PlateFinderError::Http(format!("{endpoint} returned HTTP {status}")));
        }
        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| PlateFinderError::Http(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

fn is_not_found(value: &serde_json::Value) -> bool {
    value.get("code").and_then(|c| c.as_u64()) == Some(404)
}

fn coords(at: Coordinates) -> [(&'static str, String); 2] {
    [("lat", at.latitude.to_string()), ("lon", at.longitude.to_string())]
}

#[async_trait::async_trait]
impl RestaurantApi for ZomatoClient {
    async fn search(&self, query: &SearchQuery, at: Coordinates) -> Result<SearchResponse> {
        let mut params = coords(at).to_vec();
        match query {
            SearchQuery::Name(term) => params.push(("q", term.clone())),
            SearchQuery::Cuisine(id) => params.push(("cuisines", id.to_string())),
        }
        let value = self.get_json("search", &params).await?;
        if is_not_found(&value) {
            return Ok(SearchResponse { results_found: 0, restaurants: Vec::new() });
        }
        decode(value)
    }

    async fn cuisines(&self, at: Coordinates) -> Result<Vec<CuisineEntry>> {
        let value = self.get_json("cuisines", &coords(at)).await?;
        if is_not_found(&value) {
            return Ok(Vec::new());
        }
        Ok(decode::<CuisinesResponse>(value)?.cuisines)
    }

    async fn restaurant(&self, id: u64) -> Result<Option<RestaurantDetail>> {
        let value = self.get_json("restaurant", &[("res_id", id.to_string())]).await?;
        if is_not_found(&value) {
            return Ok(None);
        }
        decode(value).map(Some)
    }
}

#[async_trait::async_trait]
impl<T: RestaurantApi + ?Sized> RestaurantApi for std::sync::Arc<T> {
    async fn search(&self, query: &SearchQuery, at: Coordinates) -> Result<SearchResponse> {
        (**self).search(query, at).await
    }
    async fn cuisines(&self, at: Coordinates) -> Result<Vec<CuisineEntry>> {
        (**self).cuisines(at).await
    }
    async fn restaurant(&self, id: u64) -> Result<Option<RestaurantDetail>> {
        (**self).restaurant(id).await
    }
}
