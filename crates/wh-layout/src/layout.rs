//! The warehouse layout and its builder.
//!
//! # Data layout
//!
//! Nodes, rails, and junctions live in flat `Vec`s indexed by their typed
//! IDs.  Rails hold their coverage as an ordered dock list, and robot `i` is
//! always bound to rail `i`, so every cross reference is an index lookup.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps floor positions to junction zones.  The
//! mobility engine queries it every tick for every moving robot to detect
//! zone entry and exit.

use std::collections::{HashMap, VecDeque};

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wh_core::{JunctionId, NodeId, NodeKind, Position, RailId, RobotId};

use crate::{Dock, LayoutError, LayoutResult, Node, Rail};

// ── Junctions ─────────────────────────────────────────────────────────────────

/// A lane-crossing zone.  A robot is "in" the junction while it is closer
/// than `radius` to `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JunctionSpec {
    pub id:       JunctionId,
    pub position: Position,
    pub radius:   f32,
}

/// Entry stored in the R-tree: a junction centre with its id.
#[derive(Clone)]
struct JunctionEntry {
    point: [f32; 2],
    id:    JunctionId,
}

impl RTreeObject for JunctionEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for JunctionEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Static warehouse topology plus the live per-node box sets.
///
/// Do not construct directly; use [`LayoutBuilder`] or the loader, both of
/// which validate the rail graph.
pub struct Layout {
    nodes:         Vec<Node>,
    rails:         Vec<Rail>,
    junctions:     Vec<JunctionSpec>,
    by_kind_index: HashMap<(NodeKind, u32), NodeId>,
    junction_idx:  RTree<JunctionEntry>,
    max_radius:    f32,
}

impl Layout {
    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn rail_count(&self) -> usize {
        self.rails.len()
    }

    /// One robot per rail.
    pub fn robot_count(&self) -> usize {
        self.rails.len()
    }

    // ── Entity access ─────────────────────────────────────────────────────

    /// The node with `id`.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this layout.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable access for box-set updates.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this layout.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rails in declaration order.
    pub fn rails(&self) -> &[Rail] {
        &self.rails
    }

    /// # Panics
    /// Panics if `id` was not issued by this layout.
    #[inline]
    pub fn rail(&self, id: RailId) -> &Rail {
        &self.rails[id.index()]
    }

    /// The rail `robot` is bound to, or `None` for an unknown robot.
    pub fn rail_of(&self, robot: RobotId) -> Option<&Rail> {
        self.rails.get(robot.index()).filter(|r| r.robot == robot)
    }

    pub fn junctions(&self) -> &[JunctionSpec] {
        &self.junctions
    }

    /// Resolve a per-kind index ("storage 3") to a node.
    pub fn node_of(&self, kind: NodeKind, index: u32) -> Option<NodeId> {
        self.by_kind_index.get(&(kind, index)).copied()
    }

    /// Like [`node_of`](Self::node_of) but reports the miss as an error.
    pub fn require_node(&self, kind: NodeKind, index: u32) -> LayoutResult<NodeId> {
        self.node_of(kind, index)
            .ok_or(LayoutError::UnknownNode { kind, index })
    }

    // ── Rail map ──────────────────────────────────────────────────────────

    /// Does `rail` cover `node`?
    #[inline]
    pub fn serves_node(&self, rail: RailId, node: NodeId) -> bool {
        self.rail(rail).serves(node)
    }

    /// First node of `kind` on `rail`, in coverage order.
    ///
    /// Rails carry exactly one Pickup node, so for `NodeKind::Pickup` this is
    /// the rail's pickup.
    pub fn find_node_of_kind(&self, rail: RailId, kind: NodeKind) -> Option<NodeId> {
        self.rail(rail)
            .docks()
            .iter()
            .map(|d| d.node)
            .find(|&n| self.node(n).kind == kind)
    }

    /// Where `rail`'s robot must stop to service `node`.
    pub fn dock_position(&self, rail: RailId, node: NodeId) -> LayoutResult<Position> {
        self.rail(rail)
            .dock_for(node)
            .ok_or(LayoutError::NotServed { rail, node })
    }

    /// Rails covering `node`, in declaration order.
    pub fn rails_serving(&self, node: NodeId) -> impl Iterator<Item = RailId> + '_ {
        self.rails.iter().filter(move |r| r.serves(node)).map(|r| r.id)
    }

    /// First Share node covered by both rails, with the dock on `rail`.
    pub fn shared_dock(&self, rail: RailId, other: RailId) -> Option<Dock> {
        let other = self.rail(other);
        self.rail(rail)
            .docks()
            .iter()
            .find(|d| self.node(d.node).kind == NodeKind::Share && other.serves(d.node))
            .copied()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The junction whose zone contains `pos`, nearest centre first.
    pub fn junction_at(&self, pos: Position) -> Option<JunctionId> {
        if self.junctions.is_empty() {
            return None;
        }
        let p = pos.to_array();
        self.junction_idx
            .locate_within_distance(p, self.max_radius * self.max_radius)
            .filter(|e| {
                let spec = &self.junctions[e.id.index()];
                pos.within(spec.position, spec.radius)
            })
            .min_by(|a, b| a.distance_2(&p).total_cmp(&b.distance_2(&p)))
            .map(|e| e.id)
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────────

/// Construct a [`Layout`] incrementally, then call [`build`](Self::build).
///
/// Per-kind node indices are assigned in insertion order, matching how
/// external commands count areas.  Robot `i` is bound to the `i`-th rail.
///
/// # Example
///
/// ```
/// use wh_core::{NodeKind, Position};
/// use wh_layout::LayoutBuilder;
///
/// let mut b = LayoutBuilder::new();
/// let pickup  = b.add_node(NodeKind::Pickup,  Position::new(0.0, 0.0));
/// let storage = b.add_node(NodeKind::Storage, Position::new(5.0, 0.0));
/// let rail = b.add_rail(Position::new(0.0, -1.0));
/// b.add_dock(rail, pickup,  Position::new(0.0, -0.5));
/// b.add_dock(rail, storage, Position::new(5.0, -0.5));
/// let layout = b.build().unwrap();
/// assert_eq!(layout.robot_count(), 1);
/// ```
pub struct LayoutBuilder {
    nodes:     Vec<Node>,
    rails:     Vec<Rail>,
    raw_docks: Vec<RawDock>,
    junctions: Vec<JunctionSpec>,
    counters:  HashMap<NodeKind, u32>,
}

struct RawDock {
    rail:     RailId,
    node:     NodeId,
    position: Position,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            rails:     Vec::new(),
            raw_docks: Vec::new(),
            junctions: Vec::new(),
            counters:  HashMap::new(),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let counter = self.counters.entry(kind).or_insert(0);
        let index = *counter;
        *counter += 1;
        self.nodes.push(Node::new(id, kind, index, position));
        id
    }

    /// Add a rail whose robot parks at `home`.  The rail's robot gets the
    /// same numeric id as the rail.
    pub fn add_rail(&mut self, home: Position) -> RailId {
        let n = self.rails.len() as u32;
        self.rails.push(Rail::new(RailId(n), RobotId(n), home));
        RailId(n)
    }

    /// Declare that `rail` serves `node` from `position`.  Order matters:
    /// it is the rail's coverage order.
    pub fn add_dock(&mut self, rail: RailId, node: NodeId, position: Position) {
        self.raw_docks.push(RawDock { rail, node, position });
    }

    /// Add a junction zone and return its id.
    pub fn add_junction(&mut self, position: Position, radius: f32) -> JunctionId {
        let id = JunctionId(self.junctions.len() as u16);
        self.junctions.push(JunctionSpec { id, position, radius });
        id
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn rail_count(&self) -> usize { self.rails.len() }

    /// Validate the topology and produce a [`Layout`].
    ///
    /// Fails if there are no rails, a dock names an unknown rail or node or
    /// repeats a node, a rail does not have exactly one Pickup node, a node
    /// is not served, a Share node has fewer than two rails, or the rails do
    /// not form one component linked through Share nodes.
    pub fn build(self) -> LayoutResult<Layout> {
        let LayoutBuilder { nodes, mut rails, raw_docks, junctions, .. } = self;

        if rails.is_empty() {
            return Err(LayoutError::NoRails);
        }

        // ── Attach docks ──────────────────────────────────────────────────
        for d in raw_docks {
            if d.node.index() >= nodes.len() {
                return Err(LayoutError::NodeNotFound(d.node));
            }
            let rail = rails
                .get_mut(d.rail.index())
                .ok_or_else(|| LayoutError::Parse(format!("dock references unknown rail {}", d.rail)))?;
            if rail.serves(d.node) {
                return Err(LayoutError::DuplicateDock { rail: d.rail, node: d.node });
            }
            rail.push_dock(Dock { node: d.node, position: d.position });
        }

        // ── One pickup per rail ───────────────────────────────────────────
        for rail in &rails {
            let pickups = rail
                .docks()
                .iter()
                .filter(|d| nodes[d.node.index()].kind == NodeKind::Pickup)
                .count();
            match pickups {
                0 => return Err(LayoutError::NoPickup(rail.id)),
                1 => {}
                _ => return Err(LayoutError::MultiplePickups(rail.id)),
            }
        }

        // ── Coverage of every node ────────────────────────────────────────
        for node in &nodes {
            let serving = rails.iter().filter(|r| r.serves(node.id)).count();
            if serving == 0 {
                return Err(LayoutError::UnservedNode(node.id));
            }
            if node.kind == NodeKind::Share && serving < 2 {
                return Err(LayoutError::ShareNotShared(node.id));
            }
        }

        check_connected(&nodes, &rails)?;

        let by_kind_index = nodes.iter().map(|n| ((n.kind, n.index), n.id)).collect();

        let entries: Vec<JunctionEntry> = junctions
            .iter()
            .map(|j| JunctionEntry { point: j.position.to_array(), id: j.id })
            .collect();
        let max_radius = junctions.iter().map(|j| j.radius).fold(0.0_f32, f32::max);

        tracing::debug!(
            nodes = nodes.len(),
            rails = rails.len(),
            junctions = junctions.len(),
            "layout built"
        );

        Ok(Layout {
            nodes,
            rails,
            junctions,
            by_kind_index,
            junction_idx: RTree::bulk_load(entries),
            max_radius,
        })
    }
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Breadth-first search over rails, where two rails are adjacent if they
/// cover a common Share node.
fn check_connected(nodes: &[Node], rails: &[Rail]) -> LayoutResult<()> {
    let mut seen = vec![false; rails.len()];
    let mut queue = VecDeque::from([0usize]);
    seen[0] = true;

    while let Some(r) = queue.pop_front() {
        for dock in rails[r].docks() {
            if nodes[dock.node.index()].kind != NodeKind::Share {
                continue;
            }
            for (other, rail) in rails.iter().enumerate() {
                if !seen[other] && rail.serves(dock.node) {
                    seen[other] = true;
                    queue.push_back(other);
                }
            }
        }
    }

    match seen.iter().position(|&s| !s) {
        None => Ok(()),
        Some(unreached) => Err(LayoutError::Disconnected {
            rail:  rails[0].id,
            other: rails[unreached].id,
        }),
    }
}
