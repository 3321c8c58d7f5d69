//! Unit tests for wh-layout.
//!
//! All tests use hand-built layouts; the loader tests parse inline TOML.

#[cfg(test)]
pub(crate) mod helpers {
    use wh_core::{NodeId, NodeKind, Position};
    use crate::{Layout, LayoutBuilder};

    /// Node handles of [`three_rails`], named by role.
    pub struct Nodes {
        pub p0: NodeId,
        pub p1: NodeId,
        pub p2: NodeId,
        pub s0: NodeId,
        pub s1: NodeId,
        pub s2: NodeId,
        pub h01: NodeId,
        pub h12: NodeId,
    }

    /// Three horizontal rails chained by two share nodes.
    ///
    /// ```text
    ///   rail 0 (y=0): P0  S0  H01
    ///   rail 1 (y=2): P1  H01 S1  H12
    ///   rail 2 (y=4): P2  H12 S2
    /// ```
    pub fn three_rails() -> (Layout, Nodes) {
        let mut b = LayoutBuilder::new();
        let p0 = b.add_node(NodeKind::Pickup, Position::new(0.0, 0.5));
        let p1 = b.add_node(NodeKind::Pickup, Position::new(0.0, 2.5));
        let p2 = b.add_node(NodeKind::Pickup, Position::new(0.0, 4.5));
        let s0 = b.add_node(NodeKind::Storage, Position::new(3.0, 0.5));
        let s1 = b.add_node(NodeKind::Storage, Position::new(6.0, 2.5));
        let s2 = b.add_node(NodeKind::Storage, Position::new(9.0, 4.5));
        let h01 = b.add_node(NodeKind::Share, Position::new(4.0, 1.0));
        let h12 = b.add_node(NodeKind::Share, Position::new(8.0, 3.0));

        let r0 = b.add_rail(Position::new(-1.0, 0.0));
        b.add_dock(r0, p0, Position::new(0.0, 0.0));
        b.add_dock(r0, s0, Position::new(3.0, 0.0));
        b.add_dock(r0, h01, Position::new(4.0, 0.0));

        let r1 = b.add_rail(Position::new(-1.0, 2.0));
        b.add_dock(r1, p1, Position::new(0.0, 2.0));
        b.add_dock(r1, h01, Position::new(4.0, 2.0));
        b.add_dock(r1, s1, Position::new(6.0, 2.0));
        b.add_dock(r1, h12, Position::new(8.0, 2.0));

        let r2 = b.add_rail(Position::new(-1.0, 4.0));
        b.add_dock(r2, p2, Position::new(0.0, 4.0));
        b.add_dock(r2, h12, Position::new(8.0, 4.0));
        b.add_dock(r2, s2, Position::new(9.0, 4.0));

        b.add_junction(Position::new(4.0, 1.0), 0.5);
        b.add_junction(Position::new(8.0, 3.0), 0.5);

        let layout = b.build().expect("three_rails layout is valid");
        (layout, Nodes { p0, p1, p2, s0, s1, s2, h01, h12 })
    }
}

// ── Builder & lookups ─────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wh_core::{NodeKind, RailId, RobotId};

    #[test]
    fn per_kind_indices_follow_insertion_order() {
        let (layout, n) = super::helpers::three_rails();
        assert_eq!(layout.node(n.p2).index, 2);
        assert_eq!(layout.node(n.s0).index, 0);
        assert_eq!(layout.node(n.h12).index, 1);
        assert_eq!(layout.node_of(NodeKind::Storage, 1), Some(n.s1));
        assert_eq!(layout.node_of(NodeKind::Storage, 9), None);
    }

    #[test]
    fn robots_bound_to_rails_by_index() {
        let (layout, _) = super::helpers::three_rails();
        assert_eq!(layout.robot_count(), 3);
        for (i, rail) in layout.rails().iter().enumerate() {
            assert_eq!(rail.robot, RobotId(i as u32));
        }
        assert_eq!(layout.rail_of(RobotId(1)).map(|r| r.id), Some(RailId(1)));
        assert!(layout.rail_of(RobotId(7)).is_none());
    }

    #[test]
    fn node_label_uses_area_name() {
        let (layout, n) = super::helpers::three_rails();
        assert_eq!(layout.node(n.s1).label(), "StorageArea 1");
        assert_eq!(layout.node(n.h01).label(), "ShareArea 0");
    }

    #[test]
    fn require_node_reports_unknown_index() {
        let (layout, _) = super::helpers::three_rails();
        let err = layout.require_node(NodeKind::Pickup, 4).unwrap_err();
        assert!(matches!(err, crate::LayoutError::UnknownNode { index: 4, .. }));
    }
}

#[cfg(test)]
mod rail_map {
    use wh_core::{NodeKind, Position, RailId};
    use crate::LayoutError;

    #[test]
    fn serves_node_matches_coverage() {
        let (layout, n) = super::helpers::three_rails();
        assert!(layout.serves_node(RailId(0), n.h01));
        assert!(layout.serves_node(RailId(1), n.h01));
        assert!(!layout.serves_node(RailId(2), n.h01));
        assert!(!layout.serves_node(RailId(0), n.s2));
    }

    #[test]
    fn find_node_of_kind_takes_coverage_order() {
        let (layout, n) = super::helpers::three_rails();
        assert_eq!(layout.find_node_of_kind(RailId(1), NodeKind::Pickup), Some(n.p1));
        assert_eq!(layout.find_node_of_kind(RailId(1), NodeKind::Share), Some(n.h01));
        assert_eq!(layout.find_node_of_kind(RailId(0), NodeKind::Storage), Some(n.s0));
    }

    #[test]
    fn dock_position_and_not_served() {
        let (layout, n) = super::helpers::three_rails();
        assert_eq!(layout.dock_position(RailId(2), n.h12).unwrap(), Position::new(8.0, 4.0));
        let err = layout.dock_position(RailId(0), n.s1).unwrap_err();
        assert!(matches!(err, LayoutError::NotServed { .. }));
    }

    #[test]
    fn rails_serving_in_declaration_order() {
        let (layout, n) = super::helpers::three_rails();
        let rails: Vec<_> = layout.rails_serving(n.h12).collect();
        assert_eq!(rails, vec![RailId(1), RailId(2)]);
    }

    #[test]
    fn shared_dock_between_neighbours() {
        let (layout, n) = super::helpers::three_rails();
        let dock = layout.shared_dock(RailId(1), RailId(2)).unwrap();
        assert_eq!(dock.node, n.h12);
        assert_eq!(dock.position, Position::new(8.0, 2.0));
        assert!(layout.shared_dock(RailId(0), RailId(2)).is_none());
    }
}

// ── Junction index ────────────────────────────────────────────────────────────

#[cfg(test)]
mod junctions {
    use wh_core::{JunctionId, NodeKind, Position};
    use crate::LayoutBuilder;

    #[test]
    fn inside_and_outside_zone() {
        let (layout, _) = super::helpers::three_rails();
        assert_eq!(layout.junction_at(Position::new(4.0, 1.3)), Some(JunctionId(0)));
        assert_eq!(layout.junction_at(Position::new(8.2, 3.0)), Some(JunctionId(1)));
        assert_eq!(layout.junction_at(Position::new(4.0, 1.6)), None);
        assert_eq!(layout.junction_at(Position::new(0.0, 0.0)), None);
    }

    #[test]
    fn overlapping_zones_pick_nearest() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, Position::new(0.0, 0.0));
        let r = b.add_rail(Position::new(0.0, -1.0));
        b.add_dock(r, p, Position::new(0.0, -0.5));
        let small = b.add_junction(Position::new(1.0, 0.0), 0.3);
        let large = b.add_junction(Position::new(1.5, 0.0), 1.0);
        let layout = b.build().unwrap();

        assert_eq!(layout.junction_at(Position::new(1.1, 0.0)), Some(small));
        assert_eq!(layout.junction_at(Position::new(1.4, 0.0)), Some(large));
    }

    #[test]
    fn no_junctions() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, Position::new(0.0, 0.0));
        let r = b.add_rail(Position::new(0.0, -1.0));
        b.add_dock(r, p, Position::new(0.0, -0.5));
        let layout = b.build().unwrap();
        assert!(layout.junction_at(Position::ORIGIN).is_none());
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use wh_core::{NodeId, NodeKind, Position, RailId};
    use crate::{LayoutBuilder, LayoutError};

    fn at(x: f32) -> Position {
        Position::new(x, 0.0)
    }

    #[test]
    fn no_rails() {
        let mut b = LayoutBuilder::new();
        b.add_node(NodeKind::Pickup, at(0.0));
        assert!(matches!(b.build(), Err(LayoutError::NoRails)));
    }

    #[test]
    fn rail_without_pickup() {
        let mut b = LayoutBuilder::new();
        let s = b.add_node(NodeKind::Storage, at(1.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, s, at(1.0));
        assert!(matches!(b.build(), Err(LayoutError::NoPickup(RailId(0)))));
    }

    #[test]
    fn rail_with_two_pickups() {
        let mut b = LayoutBuilder::new();
        let p0 = b.add_node(NodeKind::Pickup, at(0.0));
        let p1 = b.add_node(NodeKind::Pickup, at(1.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, p0, at(0.0));
        b.add_dock(r, p1, at(1.0));
        assert!(matches!(b.build(), Err(LayoutError::MultiplePickups(RailId(0)))));
    }

    #[test]
    fn duplicate_dock() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, at(0.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, p, at(0.0));
        b.add_dock(r, p, at(0.5));
        assert!(matches!(b.build(), Err(LayoutError::DuplicateDock { .. })));
    }

    #[test]
    fn dock_for_unknown_node() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, at(0.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, p, at(0.0));
        b.add_dock(r, NodeId(42), at(1.0));
        assert!(matches!(b.build(), Err(LayoutError::NodeNotFound(NodeId(42)))));
    }

    #[test]
    fn unserved_node() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, at(0.0));
        let orphan = b.add_node(NodeKind::Storage, at(5.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, p, at(0.0));
        match b.build() {
            Err(LayoutError::UnservedNode(n)) => assert_eq!(n, orphan),
            other => panic!("expected UnservedNode, got {:?}", other.err()),
        }
    }

    #[test]
    fn share_node_on_one_rail() {
        let mut b = LayoutBuilder::new();
        let p = b.add_node(NodeKind::Pickup, at(0.0));
        let h = b.add_node(NodeKind::Share, at(2.0));
        let r = b.add_rail(at(0.0));
        b.add_dock(r, p, at(0.0));
        b.add_dock(r, h, at(2.0));
        assert!(matches!(b.build(), Err(LayoutError::ShareNotShared(_))));
    }

    #[test]
    fn disconnected_rails() {
        let mut b = LayoutBuilder::new();
        let p0 = b.add_node(NodeKind::Pickup, at(0.0));
        let p1 = b.add_node(NodeKind::Pickup, at(10.0));
        let r0 = b.add_rail(at(0.0));
        let r1 = b.add_rail(at(10.0));
        b.add_dock(r0, p0, at(0.0));
        b.add_dock(r1, p1, at(10.0));
        match b.build() {
            Err(LayoutError::Disconnected { rail, other }) => {
                assert_eq!(rail, r0);
                assert_eq!(other, r1);
            }
            other => panic!("expected Disconnected, got {:?}", other.err()),
        }
    }
}

// ── Bridge search ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod bridge {
    use wh_core::{NodeKind, Position, RailId, RobotId};
    use crate::{BridgeRouter, FirstBridgeRouter, LayoutBuilder};

    #[test]
    fn direct_bridge_preferred_over_earlier_indirect() {
        // Rail 1 reaches H01 first in coverage, but only H12 leads to a rail
        // covering S2.
        let (layout, n) = super::helpers::three_rails();
        let b = FirstBridgeRouter.find_bridge(&layout, RailId(1), n.s2).unwrap();
        assert_eq!(b.share_node, n.h12);
        assert_eq!(b.next_rail, RailId(2));
        assert_eq!(b.next_robot, RobotId(2));
        assert!(b.direct);
    }

    #[test]
    fn indirect_bridge_when_two_hops_needed() {
        let (layout, n) = super::helpers::three_rails();
        let b = FirstBridgeRouter.find_bridge(&layout, RailId(0), n.s2).unwrap();
        assert_eq!(b.share_node, n.h01);
        assert_eq!(b.next_rail, RailId(1));
        assert!(!b.direct);
    }

    #[test]
    fn bridge_node_is_on_requester_rail() {
        let (layout, n) = super::helpers::three_rails();
        for rail in layout.rails() {
            for dest in [n.p0, n.p1, n.p2, n.s0, n.s1, n.s2] {
                if rail.serves(dest) {
                    continue;
                }
                let b = FirstBridgeRouter.find_bridge(&layout, rail.id, dest).unwrap();
                assert!(rail.serves(b.share_node));
                assert_eq!(layout.node(b.share_node).kind, NodeKind::Share);
                assert_ne!(b.next_rail, rail.id);
            }
        }
    }

    #[test]
    fn single_rail_has_no_bridge() {
        let mut bld = LayoutBuilder::new();
        let p = bld.add_node(NodeKind::Pickup, Position::new(0.0, 0.0));
        let r = bld.add_rail(Position::new(0.0, -1.0));
        bld.add_dock(r, p, Position::new(0.0, -0.5));
        let layout = bld.build().unwrap();
        assert!(FirstBridgeRouter.find_bridge(&layout, r, p).is_err());
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use wh_core::{NodeKind, Position, RailId};
    use crate::{LayoutError, load_layout_str};

    const TWO_RAILS: &str = r#"
[sim]
robot_speed = 2.5
seed = 7

[[nodes]]
kind = "pickup"
position = [0.0, 0.5]

[[nodes]]
kind = "PickupArea"
position = [0.0, 2.5]

[[nodes]]
kind = "storage"
position = [5.0, 2.5]

[[nodes]]
kind = "share"
position = [3.0, 1.0]

[[rails]]
home = [-1.0, 0.0]
docks = [
    { kind = "pickup", index = 0, at = [0.0, 0.0] },
    { kind = "share",  index = 0, at = [3.0, 0.0] },
]

[[rails]]
home = [-1.0, 2.0]
docks = [
    { kind = "pickup",  index = 1, at = [0.0, 2.0] },
    { kind = "share",   index = 0, at = [3.0, 2.0] },
    { kind = "storage", index = 0, at = [5.0, 2.0] },
]

[[junctions]]
position = [3.0, 1.0]
radius = 0.4
"#;

    #[test]
    fn loads_layout_and_sim_table() {
        let loaded = load_layout_str(TWO_RAILS).unwrap();
        assert_eq!(loaded.sim.robot_speed, 2.5);
        assert_eq!(loaded.sim.seed, 7);
        assert_eq!(loaded.sim.tick_duration_ms, 20, "unspecified fields keep defaults");

        let layout = &loaded.layout;
        assert_eq!(layout.rail_count(), 2);
        assert_eq!(layout.junctions().len(), 1);
        let share = layout.node_of(NodeKind::Share, 0).unwrap();
        assert_eq!(layout.rails_serving(share).count(), 2);
        assert_eq!(layout.rail(RailId(1)).home, Position::new(-1.0, 2.0));
    }

    #[test]
    fn missing_sim_table_uses_defaults() {
        let text = r#"
[[nodes]]
kind = "pickup"
position = [0.0, 0.0]

[[rails]]
home = [0.0, -1.0]
docks = [{ kind = "pickup", index = 0, at = [0.0, -0.5] }]
"#;
        let loaded = load_layout_str(text).unwrap();
        assert_eq!(loaded.sim, wh_core::SimConfig::default());
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let text = r#"
[[nodes]]
kind = "loading-bay"
position = [0.0, 0.0]
"#;
        assert!(matches!(load_layout_str(text), Err(LayoutError::Parse(_))));
    }

    #[test]
    fn dock_for_missing_index() {
        let text = r#"
[[nodes]]
kind = "pickup"
position = [0.0, 0.0]

[[rails]]
home = [0.0, -1.0]
docks = [{ kind = "storage", index = 3, at = [1.0, -0.5] }]
"#;
        assert!(matches!(
            load_layout_str(text),
            Err(LayoutError::UnknownNode { kind: NodeKind::Storage, index: 3 })
        ));
    }

    #[test]
    fn malformed_toml() {
        assert!(matches!(load_layout_str("[[rails]\n"), Err(LayoutError::Parse(_))));
    }
}
