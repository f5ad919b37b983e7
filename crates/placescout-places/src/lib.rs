pub mod client;
pub mod error;
mod http;
pub mod location;
pub mod normalize;
pub mod types;

pub use client::{PlacesClient, DEFAULT_PAGE_DELAY, MAX_PAGES, PAGE_SIZE};
pub use error::{PlacesError, Service};
pub use location::LocationClient;
pub use normalize::{normalize_place, synthesize_email};
pub use types::{Place, PriceLevel, SearchTextResponse, CALIFORNIA_BOUNDS};
