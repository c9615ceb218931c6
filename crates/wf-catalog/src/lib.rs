//! `wf-catalog`: the points of interest a guidance session watches.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`category`] | `Category`: accessibility feature kinds                     |
//! | [`point`]    | `PointOfInterest`                                            |
//! | [`catalog`]  | `Catalog` (ordered points + R-tree), `CatalogBuilder`        |
//! | [`loader`]   | `load_points_json*` (points endpoint shape), `load_points_csv*` |
//! | [`error`]    | `CatalogError`, `CatalogResult<T>`                           |
//!
//! A catalog is immutable once built.  Sessions share it through an
//! `Arc<Catalog>`; refreshing the catalog means building a new one.

pub mod catalog;
pub mod category;
pub mod error;
pub mod loader;
pub mod point;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogBuilder};
pub use category::Category;
pub use error::{CatalogError, CatalogResult};
pub use loader::{
    load_points_csv, load_points_csv_reader, load_points_json, load_points_json_reader,
    load_points_json_str, LoadMode,
};
pub use point::PointOfInterest;
