use crate::api::RestaurantApi;
use crate::locate::Locator;
use crate::model::{CuisineEntry, RestaurantDetail, SearchQuery};
use crate::session::{SessionState, SessionStore};
use crate::storage::KeyValueStore;
use platefinder_common::{PlateFinderError, Result};

/// Runs user actions against the directory and keeps the session record in
/// step. Every method is one sequential chain: locate, one request, one save.
pub struct SearchService<A, L, S> {
    api: A,
    locator: L,
    sessions: SessionStore<S>,
    page_size: usize,
}

impl<A, L, S> SearchService<A, L, S>
where
    A: RestaurantApi,
    L: Locator,
    S: KeyValueStore,
{
    pub fn new(api: A, locator: L, sessions: SessionStore<S>, page_size: usize) -> Self {
        Self { api, locator, sessions, page_size }
    }

    pub fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Startup restore. A page left out of range by a page size change is
    /// moved back onto the list and saved.
    pub fn current(&self) -> Result<SessionState> {
        let state = self.sessions.load()?;
        let page = state.effective_page(self.page_size);
        if page == state.page {
            return Ok(state);
        }
        log::info!("stored page {} is out of range, showing page {page}", state.page);
        self.sessions.update(|state| state.page = page)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<SessionState> {
        self.search(SearchQuery::Name(term.to_owned())).await
    }

    pub async fn search_by_cuisine(&self, cuisine_id: u64) -> Result<SessionState> {
        self.search(SearchQuery::Cuisine(cuisine_id)).await
    }

    /// Replaces the result list and rewinds to page 1. A previously selected
    /// detail is kept even if it is not in the new list.
    pub async fn search(&self, query: SearchQuery) -> Result<SessionState> {
        let at = self.locator.locate().await?;
        let resp = self.api.search(&query, at).await?;
        if resp.results_found < 1 {
            log::info!("search {query:?} found nothing");
            return Err(PlateFinderError::NoResultsFound);
        }
        log::info!(
            "search {query:?} found {} ({} returned)",
            resp.results_found,
            resp.restaurants.len()
        );
        self.sessions.update(|state| {
            state.restaurants = resp.restaurants;
            state.page = 1;
        })
    }

    /// Cuisines are fetched once and then served from the session record.
    pub async fn load_cuisines(&self) -> Result<Vec<CuisineEntry>> {
        let cached = self.sessions.load()?;
        if !cached.cuisines.is_empty() {
            log::debug!("cuisines served from session ({})", cached.cuisines.len());
            return Ok(cached.cuisines);
        }
        let at = self.locator.locate().await?;
        let cuisines = self.api.cuisines(at).await?;
        log::info!("fetched {} cuisines", cuisines.len());
        let saved = self.sessions.update(|state| state.cuisines = cuisines)?;
        Ok(saved.cuisines)
    }

    pub async fn select_restaurant(&self, id: u64) -> Result<RestaurantDetail> {
        let detail = self
            .api
            .restaurant(id)
            .await?
            .ok_or(PlateFinderError::RestaurantNotFound(id))?;
        log::info!("selected restaurant {id} ({})", detail.name);
        self.sessions
            .update(|state| state.restaurant_info = Some(detail.clone()))?;
        Ok(detail)
    }

    pub fn change_page(&self, page: u32) -> Result<SessionState> {
        let state = self.sessions.load()?;
        let last = state.num_pages(self.page_size).max(1);
        if page == 0 || page > last {
            return Err(PlateFinderError::InvalidPage(page));
        }
        self.sessions.update(|state| state.page = page)
    }
}
