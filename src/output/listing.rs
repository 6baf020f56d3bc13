//! Non-interactive listing of the whole tree
//!
//! Prints every node above the threshold, fully expanded, in the same row
//! layout the interactive view uses.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::Tree;
use crate::view::{Marker, Row, flatten};

use super::config::OutputConfig;
use super::utils::{SIZE_GAP, indent, row_text, size_cell, size_column_width};

/// Open every directory and flatten, giving the rows of a fully expanded view.
pub fn expanded_rows(tree: &mut Tree, config: &OutputConfig, threshold: u64) -> Vec<Row> {
    let dirs: Vec<_> = tree.ids().filter(|&id| tree.node(id).has_children()).collect();
    for id in dirs {
        tree.set_open(id, true);
    }
    flatten(tree, config.sort, threshold)
        .into_iter()
        .map(|id| Row::new(tree, id))
        .collect()
}

/// Formatter for the `--print` listing.
pub struct ListingFormatter {
    config: OutputConfig,
}

impl ListingFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn format(&self, rows: &[Row], root_size: u64) -> String {
        let format = self.config.number_format;
        let width = size_column_width(root_size, format);
        let mut output = String::new();
        for row in rows {
            output.push_str(&row_text(row, width, format));
            output.push('\n');
        }
        output
    }

    pub fn print(&self, rows: &[Row], root_size: u64) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        self.write_rows(&mut stdout, rows, root_size)?;
        stdout.flush()
    }

    fn write_rows<W: WriteColor>(&self, out: &mut W, rows: &[Row], root_size: u64) -> io::Result<()> {
        let format = self.config.number_format;
        let width = size_column_width(root_size, format);

        for row in rows {
            write!(out, "{}", indent(row.depth))?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, "{}", size_cell(row.size, width, format))?;
            out.reset()?;
            write!(out, "{}{}", SIZE_GAP, row.marker.as_str())?;

            if row.marker == Marker::Leaf {
                out.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
            } else {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
            }
            write!(out, "{}", row.name)?;
            out.reset()?;
            writeln!(out)?;
        }
        Ok(())
    }
}
