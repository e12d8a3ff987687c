//! Faceted filtering and reconciliation engine.
//!
//! The catalog layer turns the raw dataset into the filtered, sorted view the
//! dashboard shows. It is split into:
//!
//! - [`columns`]: the [`Column`](columns::Column) key every facet hangs off
//! - [`facets`]: available-option derivation and the sub-module cascade
//! - [`session`]: the staged (pending vs. applied) filter state machine
//! - [`stats`]: aggregate counts for the dashboard's stats panel
//! - [`store`]: the record list, writes, and view recomputation

pub mod columns;
pub mod facets;
pub mod session;
pub mod stats;
pub mod store;

pub use columns::Column;
pub use facets::FacetIndex;
pub use session::{FacetState, FilterSession, SortDirection, SortSpec};
pub use stats::CatalogStats;
pub use store::CatalogStore;
