//! JSON output formatting

use std::io;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::tree::{NodeId, Tree};

/// Serializes the subtree under `id` without copying it.
#[derive(Clone, Copy)]
struct Subtree<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Serialize for Subtree<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut state = serializer.serialize_struct("Node", 3)?;
        state.serialize_field("name", node.name())?;
        state.serialize_field("size", &node.size())?;
        state.serialize_field("children", &Children(self))?;
        state.end()
    }
}

struct Children<'a, 'b>(&'b Subtree<'a>);

impl Serialize for Children<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Subtree { tree, id } = *self.0;
        serializer.collect_seq(tree.node(id).children().map(|child| Subtree { tree, id: child }))
    }
}

/// Render the whole tree as pretty-printed JSON.
pub fn to_json(tree: &Tree) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Subtree {
        tree,
        id: tree.root(),
    })
}

/// Print the whole tree as pretty-printed JSON to stdout.
pub fn print_json(tree: &Tree) -> io::Result<()> {
    let json = to_json(tree).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
