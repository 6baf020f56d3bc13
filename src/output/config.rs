//! Output configuration types

use crate::view::Sort;

use super::format::NumberFormat;

/// Configuration for non-interactive output.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    pub number_format: NumberFormat,
    /// Order of children in the listing; `None` keeps build order.
    pub sort: Option<Sort>,
}
