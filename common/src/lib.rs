//! MeAd Common Library
//!
//! CLIとWeb(WASM)で共有される型とエクスプローラロジック

pub mod error;
pub mod explorer;
pub mod format;
pub mod images;
pub mod types;

#[cfg(feature = "native-client")]
pub mod client;

pub use error::{MeadError, Result};
pub use explorer::carousel::{CarouselState, SWIPE_DISTANCE_THRESHOLD};
pub use explorer::pagination::{
    paginate, CollectionEntry, PageView, QueryState, DEFAULT_PAGE_SIZE,
};
pub use explorer::selection::{FetchTicket, SelectionController, SelectionState};
pub use types::{ConditionDetail, ConditionSummary, RegionDetail, RegionSummary};

#[cfg(feature = "native-client")]
pub use client::{ConditionsClient, GeographyClient};
