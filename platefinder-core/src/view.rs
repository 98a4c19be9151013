//! Pure projection of a [`SessionState`] into what a renderer needs.

use crate::model::{RestaurantDetail, RestaurantSummary};
use crate::paginate::{page_label, page_nav, PageNav};
use crate::session::{SessionPhase, SessionState};
use platefinder_common::DisplayConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantRow {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub name: String,
    pub thumb: String,
    pub cuisines: String,
    pub rating_label: String,
    pub timings: String,
    pub address: String,
    pub phones: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub rows: Vec<RestaurantRow>,
    pub page: u32,
    pub num_pages: u32,
    pub page_label: Option<String>,
    pub nav: PageNav,
    pub detail: Option<DetailView>,
    pub cuisine_options: Vec<(u64, String)>,
}

impl SessionView {
    pub fn project(state: &SessionState, display: &DisplayConfig) -> Self {
        let num_pages = state.num_pages(display.page_size);
        let page = state.effective_page(display.page_size);
        let rows = state
            .visible(display.page_size)
            .iter()
            .map(|e| row(&e.restaurant, display))
            .collect();
        let page_label = (!state.restaurants.is_empty()).then(|| page_label(page, num_pages));
        Self {
            phase: state.phase(),
            rows,
            page,
            num_pages,
            page_label,
            nav: page_nav(page, num_pages),
            detail: state.restaurant_info.as_ref().map(|d| detail(d, display)),
            cuisine_options: state
                .cuisines
                .iter()
                .map(|c| (c.cuisine.cuisine_id, c.cuisine.cuisine_name.clone()))
                .collect(),
        }
    }
}

fn row(r: &RestaurantSummary, display: &DisplayConfig) -> RestaurantRow {
    RestaurantRow {
        id: r.id(),
        name: shorten(&r.name, display.name_max_chars),
        phone: first_phone(&r.phone_numbers).to_owned(),
        thumb: thumb_or(r.thumb.as_deref(), &display.placeholder_thumb),
    }
}

fn detail(d: &RestaurantDetail, display: &DisplayConfig) -> DetailView {
    DetailView {
        name: d.name.clone(),
        thumb: thumb_or(d.thumb.as_deref(), &display.placeholder_thumb),
        cuisines: d.cuisines.clone(),
        rating_label: format!("{} stars.", d.user_rating.aggregate_rating),
        timings: d.timings.clone(),
        address: d.location.address.clone(),
        phones: d.phone_numbers.clone(),
    }
}

/// First entry of a comma-joined phone list.
pub fn first_phone(numbers: &str) -> &str {
    numbers.split(',').next().unwrap_or(numbers).trim()
}

/// Cuts `name` to `max` characters and marks the cut with `...`.
pub fn shorten(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let cut: String = name.chars().take(max).collect();
        format!("{cut}...")
    } else {
        name.to_owned()
    }
}

fn thumb_or(thumb: Option<&str>, placeholder: &str) -> String {
    match thumb {
        Some(t) if !t.trim().is_empty() => t.to_owned(),
        _ => placeholder.to_owned(),
    }
}
