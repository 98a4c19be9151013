pub mod api;
pub mod locate;
pub mod model;
pub mod paginate;
pub mod search;
pub mod session;
pub mod storage;
pub mod view;

pub use api::{RestaurantApi, ZomatoClient};
pub use locate::{ConfiguredLocator, FixedLocator, IpLocator, Locator};
pub use model::{
    Coordinates, Cuisine, CuisineEntry, RestaurantDetail, RestaurantEntry, RestaurantSummary,
    Rating, SearchQuery, SearchResponse,
};
pub use paginate::{num_pages, page_label, page_nav, paginate, PageNav, DEFAULT_PAGE_SIZE};
pub use platefinder_common::{PlateFinderError, Result};
pub use search::SearchService;
pub use session::{SessionPhase, SessionState, SessionStore};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{DetailView, RestaurantRow, SessionView};
