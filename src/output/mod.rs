//! Size formatting and non-interactive output
//!
//! # Module Structure
//!
//! - `format` - `NumberFormat`, the exact/human-readable size strategy
//! - `config` - Output configuration types
//! - `utils` - Row layout shared with the interactive view
//! - `listing` - Fully expanded, optionally colored listing (`--print`)
//! - `json` - JSON export (`--json`)

mod config;
mod format;
mod json;
mod listing;
mod utils;

pub use config::OutputConfig;
pub use format::{NumberFormat, format_grouped, format_human};
pub use json::{print_json, to_json};
pub use listing::{ListingFormatter, expanded_rows};
pub use utils::{SIZE_GAP, indent, row_text, size_cell, size_column_width};
