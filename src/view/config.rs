//! Configuration for the interactive view

use crate::output::NumberFormat;

use super::flatten::Sort;

/// Rows moved by page up/down until the renderer reports its real height.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Initial state of a [`Controller`](super::Controller).
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Children smaller than this are hidden.
    pub threshold: u64,
    pub sort: Option<Sort>,
    pub number_format: NumberFormat,
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            sort: None,
            number_format: NumberFormat::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
