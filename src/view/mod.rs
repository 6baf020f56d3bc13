//! Interactive view state
//!
//! `flatten` turns the tree into the list of visible rows; `Controller` holds
//! the cursor, sort, threshold and display format and applies user actions,
//! re-flattening after every change that affects what is visible.

mod config;
mod controller;
mod flatten;

pub use config::{DEFAULT_PAGE_SIZE, ViewConfig};
pub use controller::{Action, Controller, Marker, Row};
pub use flatten::{Sort, SortKey, flatten};
