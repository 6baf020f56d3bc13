//! Shared row layout used by the listing and the interactive view

use crate::view::Row;

use super::format::NumberFormat;

/// Spaces between the size column and the marker.
pub const SIZE_GAP: &str = "   ";

/// Width of the size column: the root is the largest entry in a du listing,
/// so its formatted size sets the alignment.
pub fn size_column_width(root_size: u64, format: NumberFormat) -> usize {
    format.format(root_size).chars().count()
}

/// Indentation for a row at `depth`.
pub fn indent(depth: usize) -> String {
    " ".repeat(depth)
}

/// Size right-aligned to `width`.
pub fn size_cell(size: u64, width: usize, format: NumberFormat) -> String {
    format!("{:>width$}", format.format(size), width = width)
}

/// A whole row as plain text: indent, size, marker, name.
pub fn row_text(row: &Row, width: usize, format: NumberFormat) -> String {
    format!(
        "{}{}{}{}{}",
        indent(row.depth),
        size_cell(row.size, width, format),
        SIZE_GAP,
        row.marker.as_str(),
        row.name
    )
}
