//! The event catalogue: search/filter/sort engine and pager.
//!
//! Both submodules are pure functions over slices. The listing controller and the HTTP
//! handlers call them; neither keeps any state here.

pub mod pager;
pub mod search;

pub use pager::{PAGE_SIZE, PageControls, PageLink, clamp_page, page, page_numbers, total_pages};
pub use search::{ALL_CATEGORIES, CategoryFilter, categories, featured, filter_events, sort_by_date};
