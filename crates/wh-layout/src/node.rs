//! Nodes (areas).

use std::collections::BTreeSet;

use wh_core::{BoxId, NodeId, NodeKind, Position};

/// A location robots dock at to pick up or store boxes.
///
/// `index` is the per-kind number external commands use ("pickup 2",
/// "storage 5"); `id` is the global arena index.  The box set holds every box
/// physically resting at the node and is kept in id order so scans are
/// deterministic.
#[derive(Debug, Clone)]
pub struct Node {
    pub id:       NodeId,
    pub kind:     NodeKind,
    pub index:    u32,
    pub position: Position,
    boxes:        BTreeSet<BoxId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind, index: u32, position: Position) -> Self {
        Self { id, kind, index, position, boxes: BTreeSet::new() }
    }

    /// `true` if at least one box rests here.
    #[inline]
    pub fn has_box(&self) -> bool {
        !self.boxes.is_empty()
    }

    pub fn contains_box(&self, b: BoxId) -> bool {
        self.boxes.contains(&b)
    }

    /// Boxes present, in ascending id order.
    pub fn boxes(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.iter().copied()
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Record `b` as present.  Returns `false` if it already was.
    pub fn insert_box(&mut self, b: BoxId) -> bool {
        self.boxes.insert(b)
    }

    /// Record `b` as gone.  Returns `false` if it was not here.
    pub fn remove_box(&mut self, b: BoxId) -> bool {
        self.boxes.remove(&b)
    }

    /// `"StorageArea 3"`, the form used in audit lines.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.area_label(), self.index)
    }
}
