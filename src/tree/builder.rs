//! Rebuilding the directory hierarchy from reversed scan output
//!
//! `du` lists every directory after all of its contents. Read backward, each
//! directory therefore shows up before anything inside it, so every line can
//! be attached to a node that already exists: the most recently created node
//! or one of its ancestors.

use std::io::{self, Read, Seek};

use crate::error::{Error, FormatReason, Result};
use crate::reverse::ReverseLines;

use super::config::BuildConfig;
use super::line::{child_segment, leading_size, parse_line};
use super::model::{NodeId, Tree};

/// A finished tree plus the size cutoff used while building it.
#[derive(Debug, Clone)]
pub struct BuiltTree {
    pub tree: Tree,
    /// `max(relative × root size, absolute)`; entries below it were dropped.
    pub threshold: u64,
}

/// Snapshot passed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Lines consumed so far, skipped ones included.
    pub lines: usize,
    /// Nodes created so far, root included.
    pub nodes: usize,
}

/// Outcome of looking for the parent of a path.
enum Resolve<'a> {
    /// Attach under this node with this name.
    Child(NodeId, &'a str),
    /// Walked past the root without a match.
    Exhausted,
}

/// The chain of nodes from the root to the most recently created one, with
/// the full path of the deepest node kept in a single buffer.
struct Position {
    /// Each entry records the node and the length of its full path.
    chain: Vec<(NodeId, usize)>,
    path: String,
}

impl Position {
    fn at_root(tree: &Tree) -> Self {
        let root = tree.root();
        let path = tree.node(root).name().to_string();
        Self {
            chain: vec![(root, path.len())],
            path,
        }
    }

    /// Walk up from the current node until `path` is one segment below it.
    fn resolve<'a>(&mut self, path: &'a str) -> Resolve<'a> {
        while let Some(&(id, _)) = self.chain.last() {
            if let Some(segment) = child_segment(path, &self.path) {
                return Resolve::Child(id, segment);
            }
            self.chain.pop();
            let len = self.chain.last().map_or(0, |&(_, len)| len);
            self.path.truncate(len);
        }
        Resolve::Exhausted
    }

    fn descend(&mut self, id: NodeId, segment: &str) {
        self.path.push_str(segment);
        self.chain.push((id, self.path.len()));
    }
}

/// Builds a [`Tree`] from scan lines delivered last line first.
pub struct TreeBuilder<'p> {
    config: BuildConfig,
    progress: Option<Box<dyn FnMut(Progress) + 'p>>,
}

impl<'p> TreeBuilder<'p> {
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Call `f` every `progress_interval` consumed lines.
    pub fn with_progress(mut self, f: impl FnMut(Progress) + 'p) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    /// Read `reader` from the end and build the tree.
    pub fn build_from_reader<R: Read + Seek>(self, reader: R) -> Result<BuiltTree> {
        let lines = ReverseLines::with_chunk_size(reader, self.config.chunk_size)?;
        self.build(lines)
    }

    /// Build from lines that are already in reverse (root first) order.
    ///
    /// Any malformed line or unresolvable path aborts the whole build.
    pub fn build<I>(mut self, lines: I) -> Result<BuiltTree>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut lines = lines.into_iter();

        let first = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::format(0, "", FormatReason::Empty)),
        };
        let root = parse_line(&first).ok_or_else(|| Error::format(1, &first, FormatReason::Grammar))?;

        let mut tree = Tree::new(root.path, root.size);
        let threshold = self.config.effective_threshold(root.size);
        log::debug!(
            "root '{}' size {}, effective threshold {}",
            root.path,
            root.size,
            threshold
        );

        let mut position = Position::at_root(&tree);
        let mut count = 1;
        let mut skipped = 0usize;

        for line in lines {
            let line = line?;
            count += 1;

            if leading_size(&line) < threshold {
                skipped += 1;
            } else {
                let entry = parse_line(&line)
                    .ok_or_else(|| Error::format(count, &line, FormatReason::Grammar))?;
                match position.resolve(entry.path) {
                    Resolve::Child(parent, segment) => {
                        let id = tree.add_child(parent, segment, entry.size);
                        position.descend(id, segment);
                    }
                    Resolve::Exhausted => {
                        return Err(Error::format(count, &line, FormatReason::NoMatchingAncestor));
                    }
                }
            }

            if self.config.progress_interval > 0 && count % self.config.progress_interval == 0 {
                if let Some(report) = self.progress.as_mut() {
                    report(Progress {
                        lines: count,
                        nodes: tree.node_count(),
                    });
                }
            }
        }

        log::debug!(
            "built {} nodes from {} lines ({} below threshold)",
            tree.node_count(),
            count,
            skipped
        );

        Ok(BuiltTree { tree, threshold })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config(absolute: u64, relative: f64) -> BuildConfig {
        BuildConfig {
            absolute_threshold: absolute,
            relative_threshold: relative,
            ..Default::default()
        }
    }

    /// Build from forward-order text, the way it comes out of `du`.
    fn build_forward(input: &str, config: BuildConfig) -> Result<BuiltTree> {
        TreeBuilder::new(config).build_from_reader(Cursor::new(input.as_bytes().to_vec()))
    }

    fn names(tree: &Tree, id: NodeId) -> Vec<String> {
        tree.node(id)
            .children()
            .map(|c| tree.node(c).name().to_string())
            .collect()
    }

    #[test]
    fn test_basic_example() {
        let built = build_forward("10 /a/b\n20 /a/c\n35 /a\n", config(0, 0.0)).unwrap();
        let tree = &built.tree;
        let root = tree.root();

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.node(root).name(), "/a");
        assert_eq!(tree.node(root).size(), 35);
        // Reversed input creates c before b; b is prepended last
        assert_eq!(names(tree, root), vec!["/b", "/c"]);
        let sizes: Vec<u64> = tree.node(root).children().map(|c| tree.node(c).size()).collect();
        assert_eq!(sizes, vec![10, 20]);
        assert_eq!(built.threshold, 0);
    }

    #[test]
    fn test_nested_directories_and_full_names() {
        let input = "\
4\t./src/tree/line.rs
8\t./src/tree/builder.rs
16\t./src/tree
2\t./src/lib.rs
20\t./src
1\t./Cargo.toml
24\t.
";
        let built = build_forward(input, config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node_count(), 7);

        let mut full: Vec<String> = tree.ids().map(|id| tree.full_name(id)).collect();
        full.sort();
        assert_eq!(
            full,
            vec![
                ".",
                "./Cargo.toml",
                "./src",
                "./src/lib.rs",
                "./src/tree",
                "./src/tree/builder.rs",
                "./src/tree/line.rs",
            ]
        );

        for id in tree.ids() {
            if let Some(parent) = tree.node(id).parent() {
                assert_eq!(tree.node(id).depth(), tree.node(parent).depth() + 1);
                assert!(tree.node(parent).children().any(|c| c == id));
            }
        }
    }

    #[test]
    fn test_trailing_separators_are_stripped() {
        let built = build_forward("3\t/data/x/\n9\t/data/\n", config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node(tree.root()).name(), "/data");
        assert_eq!(names(tree, tree.root()), vec!["/x"]);
    }

    #[test]
    fn test_trailing_separator_followed_by_whitespace() {
        let built = build_forward("10 /a/b/ \n35 /a/\t\n", config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node(tree.root()).name(), "/a");
        assert_eq!(names(tree, tree.root()), vec!["/b"]);
    }

    #[test]
    fn test_filesystem_root() {
        let built = build_forward("5\t/usr/bin\n6\t/usr\n2\t/etc\n9\t/\n", config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node(tree.root()).name(), "");
        assert_eq!(names(tree, tree.root()), vec!["/usr", "/etc"]);
        let usr = tree.node(tree.root()).children().next().unwrap();
        assert_eq!(tree.full_name(usr), "/usr");
    }

    #[test]
    fn test_missing_intermediate_directory_is_format_error() {
        let err = build_forward("5 /a/b/x\n35 /a\n", config(0, 0.0)).unwrap_err();
        match err {
            Error::Format { line, content, reason } => {
                assert_eq!(line, 2);
                assert_eq!(content, "5 /a/b/x");
                assert_eq!(reason, FormatReason::NoMatchingAncestor);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_path_is_format_error() {
        let err = build_forward("5 /b/x\n35 /a\n", config(0, 0.0)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_malformed_line_is_format_error() {
        let err = build_forward("garbage\n35 /a\n", config(0, 0.0)).unwrap_err();
        match err {
            Error::Format { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, FormatReason::Grammar);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_root_is_format_error() {
        let err = build_forward("10 /a/b\nnot a root\n", config(0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Format { line: 1, reason: FormatReason::Grammar, .. }
        ));
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = build_forward("", config(0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::Format { reason: FormatReason::Empty, .. }));
    }

    #[test]
    fn test_small_entries_are_skipped() {
        let input = "1 /a/b/tiny\n10 /a/b\n20 /a/c\n35 /a\n";
        let built = build_forward(input, config(5, 0.0)).unwrap();
        assert_eq!(built.threshold, 5);
        assert_eq!(built.tree.node_count(), 3);
    }

    #[test]
    fn test_skipped_line_does_not_take_part_in_resolution() {
        // /a/b falls below the cutoff and never becomes a node
        let input = "2 /a/b\n20 /a/c\n35 /a\n";
        let built = build_forward(input, config(5, 0.0)).unwrap();
        assert_eq!(names(&built.tree, built.tree.root()), vec!["/c"]);

        let input = "9 /a/b/x\n2 /a/b\n35 /a\n";
        let err = build_forward(input, config(5, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            Error::Format { line: 3, reason: FormatReason::NoMatchingAncestor, .. }
        ));
    }

    #[test]
    fn test_small_malformed_lines_are_ignored() {
        let input = "10 /a/b\nnoise\n20 /a/c\n35 /a\n";
        let built = build_forward(input, config(1, 0.0)).unwrap();
        assert_eq!(built.tree.node_count(), 3);
    }

    #[test]
    fn test_relative_threshold() {
        let input = "100 /a/b\n600 /a/c\n1 /a/d\n1000 /a\n";
        let built = build_forward(input, config(0, 0.25)).unwrap();
        assert_eq!(built.threshold, 250);
        assert_eq!(names(&built.tree, built.tree.root()), vec!["/c"]);
    }

    #[test]
    fn test_absolute_threshold_wins_when_larger() {
        let built = build_forward("10 /a/b\n1000 /a\n", config(50, 0.01)).unwrap();
        assert_eq!(built.threshold, 50);
        assert_eq!(built.tree.node_count(), 1);
    }

    #[test]
    fn test_backtracking_across_siblings() {
        let input = "\
1 /r/a/x
2 /r/a
3 /r/b/y/z
4 /r/b/y
5 /r/b
6 /r/c
20 /r
";
        let built = build_forward(input, config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node_count(), 7);
        assert_eq!(names(tree, tree.root()), vec!["/a", "/b", "/c"]);
        let max_depth = tree.ids().map(|id| tree.node(id).depth()).max();
        assert_eq!(max_depth, Some(3));
    }

    #[test]
    fn test_multi_segment_root_name() {
        let built = build_forward("1 home/user/docs\n7 home/user\n", config(0, 0.0)).unwrap();
        let tree = &built.tree;
        assert_eq!(tree.node(tree.root()).name(), "home/user");
        assert_eq!(names(tree, tree.root()), vec!["/docs"]);
    }

    #[test]
    fn test_progress_is_reported() {
        let input: String = (0..10)
            .map(|i| format!("1 /r/f{}\n", i))
            .chain(std::iter::once("10 /r\n".to_string()))
            .collect();
        let mut seen = Vec::new();
        let built = TreeBuilder::new(BuildConfig {
            progress_interval: 4,
            ..config(0, 0.0)
        })
        .with_progress(|p| seen.push(p.lines))
        .build_from_reader(Cursor::new(input.into_bytes()))
        .unwrap();
        assert_eq!(built.tree.node_count(), 11);
        assert_eq!(seen, vec![4, 8]);
    }

    #[test]
    fn test_io_errors_propagate() {
        let lines = vec![
            Ok("35 /a".to_string()),
            Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
        ];
        let err = TreeBuilder::new(config(0, 0.0)).build(lines).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
