use crate::model::{CuisineEntry, RestaurantDetail, RestaurantEntry};
use crate::paginate::{num_pages, paginate};
use crate::storage::KeyValueStore;
use platefinder_common::{CorruptPolicy, PlateFinderError, Result};
use serde::{Deserialize, Serialize};

/// The single persisted search session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub restaurants: Vec<RestaurantEntry>,
    #[serde(rename = "restaurantInfo", default)]
    pub restaurant_info: Option<RestaurantDetail>,
    #[serde(default)]
    pub cuisines: Vec<CuisineEntry>,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            restaurants: Vec::new(),
            restaurant_info: None,
            cuisines: Vec::new(),
            page: first_page(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    Listed,
    Detailed,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.restaurants.is_empty() {
            SessionPhase::Empty
        } else if self.restaurant_info.is_some() {
            SessionPhase::Detailed
        } else {
            SessionPhase::Listed
        }
    }

    pub fn num_pages(&self, page_size: usize) -> u32 {
        num_pages(self.restaurants.len(), page_size)
    }

    /// The stored page pulled back onto `1..=num_pages`. A record saved under a
    /// smaller page size can point past the end of the list.
    pub fn effective_page(&self, page_size: usize) -> u32 {
        self.page.clamp(1, self.num_pages(page_size).max(1))
    }

    pub fn visible(&self, page_size: usize) -> &[RestaurantEntry] {
        paginate(&self.restaurants, self.effective_page(page_size), page_size)
    }
}

/// Reads and writes the session record under one key of a [`KeyValueStore`].
pub struct SessionStore<S> {
    store: S,
    key: String,
    on_corrupt: CorruptPolicy,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, key: impl Into<String>, on_corrupt: CorruptPolicy) -> Self {
        Self {
            store,
            key: key.into(),
            on_corrupt,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Returns the stored session, creating and persisting the default one
    /// when nothing (or a JSON `null`) is stored.
    pub fn load(&self) -> Result<SessionState> {
        let raw = self.store.get(&self.key)?;
        let parsed = match raw.as_deref().map(str::trim) {
            None | Some("") | Some("null") => None,
            Some(text) => match serde_json::from_str::<SessionState>(text) {
                Ok(state) => Some(state),
                Err(e) => return self.recover(e),
            },
        };
        match parsed {
            Some(mut state) => {
                if state.page == 0 {
                    state.page = 1;
                }
                Ok(state)
            }
            None => {
                log::debug!("no stored session under {:?}, creating default", self.key);
                let state = SessionState::default();
                self.save(&state)?;
                Ok(state)
            }
        }
    }

    fn recover(&self, err: serde_json::Error) -> Result<SessionState> {
        match self.on_corrupt {
            CorruptPolicy::Reset => {
                log::warn!("stored session {:?} is malformed ({err}), resetting", self.key);
                let state = SessionState::default();
                self.save(&state)?;
                Ok(state)
            }
            CorruptPolicy::Error => Err(PlateFinderError::MalformedStoredState(err.to_string())),
        }
    }

    /// Replaces the whole record.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let text = serde_json::to_string(state)?;
        self.store.set(&self.key, &text)
    }

    /// Loads, applies `f` to the loaded value and saves the result in one go.
    pub fn update<F>(&self, f: F) -> Result<SessionState>
    where
        F: FnOnce(&mut SessionState),
    {
        let mut state = self.load()?;
        f(&mut state);
        self.save(&state)?;
        Ok(state)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}
