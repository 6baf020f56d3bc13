//! dusauce - browse `du` output as a collapsible tree
//!
//! The input is read backward with [`ReverseLines`], rebuilt into a [`Tree`]
//! by [`TreeBuilder`], and presented either through the interactive
//! [`tui`] (driven by a [`Controller`]) or as a plain listing or JSON.

pub mod error;
pub mod output;
pub mod reverse;
pub mod tree;
pub mod tui;
pub mod view;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, FormatReason, Result};
pub use output::{ListingFormatter, NumberFormat, OutputConfig, expanded_rows, print_json, to_json};
pub use reverse::{DEFAULT_CHUNK_SIZE, ReverseLines};
pub use tree::{BuildConfig, BuiltTree, Node, NodeId, Progress, Tree, TreeBuilder};
pub use view::{Action, Controller, Marker, Row, Sort, SortKey, ViewConfig, flatten};
