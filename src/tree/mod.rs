//! Scan-output tree
//!
//! - `model` - the arena-backed `Tree` and its `Node`s
//! - `line` - parsing of `<size> <path>` lines
//! - `builder` - `TreeBuilder`, which rebuilds the hierarchy from reversed input
//! - `config` - `BuildConfig` thresholds and tuning

mod builder;
mod config;
mod line;
mod model;

pub use builder::{BuiltTree, Progress, TreeBuilder};
pub use config::{BuildConfig, DEFAULT_PROGRESS_INTERVAL, DEFAULT_RELATIVE_THRESHOLD};
pub use line::{ScanLine, parse_line};
pub use model::{Node, NodeId, Tree};
