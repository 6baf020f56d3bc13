//! State machine behind the interactive browser

use crate::output::NumberFormat;
use crate::tree::{Node, NodeId, Tree};

use super::config::ViewConfig;
use super::flatten::{Sort, SortKey, flatten};

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Open the selected node.
    Expand,
    /// Close the selected node, or jump to its parent if it is already closed.
    CollapseOrAscend,
    /// Sort by this key; selecting the current key again flips the direction.
    SortBy(SortKey),
    SetThreshold(u64),
    ToggleNumberFormat,
    /// The screen now shows `page_size` rows.
    Resize { page_size: usize },
}

/// Tree-drawing marker for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Leaf,
    Open,
    Closed,
}

impl Marker {
    pub fn of(node: &Node) -> Self {
        if !node.has_children() {
            Marker::Leaf
        } else if node.is_open() {
            Marker::Open
        } else {
            Marker::Closed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Marker::Leaf => " | ",
            Marker::Open => " \\ ",
            Marker::Closed => " + ",
        }
    }
}

/// Everything a renderer needs to draw one visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
    pub size: u64,
    pub marker: Marker,
    pub name: String,
}

impl Row {
    pub fn new(tree: &Tree, id: NodeId) -> Self {
        let node = tree.node(id);
        Self {
            id,
            depth: node.depth(),
            size: node.size(),
            marker: Marker::of(node),
            name: node.display_name(),
        }
    }
}

/// Owns the tree and all interactive state.
///
/// `rows` is never empty: the root is always visible, so `cursor` always
/// points at a row.
pub struct Controller {
    tree: Tree,
    rows: Vec<NodeId>,
    cursor: usize,
    sort: Option<Sort>,
    threshold: u64,
    page_size: usize,
    number_format: NumberFormat,
    quit: bool,
}

impl Controller {
    pub fn new(tree: Tree, config: ViewConfig) -> Self {
        let mut controller = Self {
            tree,
            rows: Vec::new(),
            cursor: 0,
            sort: config.sort,
            threshold: config.threshold,
            page_size: config.page_size.max(1),
            number_format: config.number_format,
            quit: false,
        };
        controller.rows = flatten(&mut controller.tree, controller.sort, controller.threshold);
        controller
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit = true,
            Action::Up => self.move_to(self.cursor.saturating_sub(1)),
            Action::Down => self.move_to(self.cursor.saturating_add(1)),
            Action::PageUp => self.move_to(self.cursor.saturating_sub(self.page_size)),
            Action::PageDown => self.move_to(self.cursor.saturating_add(self.page_size)),
            Action::Home => self.move_to(0),
            Action::End => self.move_to(usize::MAX),
            Action::Expand => {
                let id = self.selected();
                let node = self.tree.node(id);
                if node.has_children() && !node.is_open() {
                    self.tree.set_open(id, true);
                    self.refresh();
                }
            }
            Action::CollapseOrAscend => {
                let id = self.selected();
                let node = self.tree.node(id);
                if node.is_open() {
                    self.tree.set_open(id, false);
                    self.refresh();
                } else if let Some(parent) = node.parent() {
                    if let Some(row) = self.row_of(parent) {
                        self.cursor = row;
                    }
                }
            }
            Action::SortBy(key) => {
                self.sort = Some(match self.sort {
                    Some(current) if current.key == key => Sort {
                        key,
                        descending: !current.descending,
                    },
                    _ => Sort::new(key),
                });
                self.refresh();
            }
            Action::SetThreshold(threshold) => {
                self.threshold = threshold;
                self.refresh();
            }
            Action::ToggleNumberFormat => self.number_format = self.number_format.toggled(),
            Action::Resize { page_size } => self.page_size = page_size.max(1),
        }
    }

    /// Re-flatten and keep the cursor on the same node if it is still
    /// visible, otherwise on the nearest valid row.
    fn refresh(&mut self) {
        let selected = self.selected();
        self.rows = flatten(&mut self.tree, self.sort, self.threshold);
        self.cursor = self
            .row_of(selected)
            .unwrap_or_else(|| self.cursor.min(self.rows.len() - 1));
    }

    fn move_to(&mut self, row: usize) {
        self.cursor = row.min(self.rows.len() - 1);
    }

    fn row_of(&self, id: NodeId) -> Option<usize> {
        self.rows.iter().position(|&row| row == id)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn selected(&self) -> NodeId {
        self.rows[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Visible node ids in display order.
    pub fn visible(&self) -> &[NodeId] {
        &self.rows
    }

    /// Visible rows in display order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row> + '_ {
        self.rows.iter().map(|&id| Row::new(&self.tree, id))
    }

    pub fn root_size(&self) -> u64 {
        self.tree.node(self.tree.root()).size()
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}
