//! Layout Node Registry - item bookkeeping for one container.
//!
//! Tracks every registered item node:
//! - parent link and current FlexProperties
//! - ordering key (explicit index, else registration sequence)
//! - center-anchor flag and result callback
//! - parents whose child order must be re-resolved before the next pass
//!
//! The registry mirrors the solver tree. Registration appends the node to
//! its parent; [`LayoutRegistry::resolve`] later moves children into the
//! resolved order with the fewest remove/insert pairs.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{FlexError, Result};
use crate::layout::{BoxTransform, LayoutNode, Solver, TransformCallback};

use super::flex_props::FlexProperties;
use super::ordering::{plan_moves, resolve_order};

// =============================================================================
// Registry Entry
// =============================================================================

/// Everything known about one registered item.
pub struct RegistryEntry {
    pub node: LayoutNode,
    pub parent: LayoutNode,
    pub props: FlexProperties,
    /// Explicit sibling index, if any.
    pub index: Option<i32>,
    /// Registration sequence; orders unindexed siblings.
    pub seq: u64,
    pub center_anchor: bool,
    pub on_update: Option<TransformCallback>,
    /// Width and height written outside FlexProperties, in logical units.
    pub size: (Option<f32>, Option<f32>),
    /// Transform reported by the most recent pass.
    pub last: Option<BoxTransform>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("node", &self.node)
            .field("parent", &self.parent)
            .field("index", &self.index)
            .field("seq", &self.seq)
            .field("center_anchor", &self.center_anchor)
            .field("has_callback", &self.on_update.is_some())
            .field("size", &self.size)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Default)]
pub struct LayoutRegistry {
    entries: HashMap<LayoutNode, RegistryEntry>,
    next_seq: u64,
    dirty: HashSet<LayoutNode>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `node` to `parent` in the solver tree and record it.
    ///
    /// Registering a node twice re-parents it and keeps its original
    /// registration sequence.
    pub fn register(&mut self, solver: &mut dyn Solver, node: LayoutNode, parent: LayoutNode) -> Result<()> {
        if let Some(old_parent) = solver.parent(node) {
            solver.remove_child(old_parent, node)?;
            self.dirty.insert(old_parent);
        }
        let end = solver.child_count(parent)?;
        solver.insert_child(parent, node, end)?;

        let seq = match self.entries.get_mut(&node) {
            Some(existing) => {
                existing.parent = parent;
                existing.seq
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                seq
            }
        };
        self.entries.entry(node).or_insert_with(|| RegistryEntry {
            node,
            parent,
            props: FlexProperties::default(),
            index: None,
            seq,
            center_anchor: false,
            on_update: None,
            size: (None, None),
            last: None,
        });
        self.dirty.insert(parent);

        log::trace!("registered {node:?} under {parent:?} (seq {seq})");
        Ok(())
    }

    /// Update ordering key, callback and anchoring of a registered node.
    pub fn update(
        &mut self,
        node: LayoutNode,
        index: Option<i32>,
        on_update: Option<TransformCallback>,
        center_anchor: bool,
    ) -> Result<()> {
        let entry = self.entries.get_mut(&node).ok_or(FlexError::UnknownNode(node))?;
        if entry.index != index {
            self.dirty.insert(entry.parent);
        }
        entry.index = index;
        entry.on_update = on_update;
        entry.center_anchor = center_anchor;
        Ok(())
    }

    /// Replace the property record used during readback.
    ///
    /// A width or height present in `props` overrides any recorded size on
    /// that axis.
    pub fn set_properties(&mut self, node: LayoutNode, props: FlexProperties) -> Result<()> {
        let entry = self.entries.get_mut(&node).ok_or(FlexError::UnknownNode(node))?;
        if props.width.is_some() {
            entry.size.0 = None;
        }
        if props.height.is_some() {
            entry.size.1 = None;
        }
        entry.props = props;
        Ok(())
    }

    /// Record a size written straight to the solver node. `None` leaves that
    /// axis as it was.
    pub fn set_size(&mut self, node: LayoutNode, width: Option<f32>, height: Option<f32>) -> Result<()> {
        let entry = self.entries.get_mut(&node).ok_or(FlexError::UnknownNode(node))?;
        if width.is_some() {
            entry.size.0 = width;
        }
        if height.is_some() {
            entry.size.1 = height;
        }
        Ok(())
    }

    /// Forget `node`, detach it and free it in the solver.
    ///
    /// Children registered under it stay in the registry as orphans and are
    /// skipped by traversal until they unregister themselves.
    pub fn unregister(&mut self, solver: &mut dyn Solver, node: LayoutNode) -> Result<RegistryEntry> {
        let entry = self.entries.remove(&node).ok_or(FlexError::UnknownNode(node))?;
        self.dirty.remove(&node);
        self.dirty.insert(entry.parent);

        if let Err(err) = solver.remove_node(node) {
            log::warn!("failed to free {node:?}: {err}");
        }

        let orphans = self.entries.values().filter(|e| e.parent == node).count();
        if orphans > 0 {
            log::warn!("{node:?} unregistered with {orphans} registered children");
        }

        log::trace!("unregistered {node:?}");
        Ok(entry)
    }

    /// Re-resolve sibling order under every dirty parent.
    ///
    /// Only children whose position changed are moved. Returns the number of
    /// moves applied.
    pub fn resolve(&mut self, solver: &mut dyn Solver) -> usize {
        let mut dirty: Vec<LayoutNode> = self.dirty.drain().collect();
        dirty.sort();

        let mut applied = 0;
        for parent in dirty {
            let desired = self.resolved_children(parent);
            let current = match solver.children(parent) {
                Ok(children) => children,
                Err(err) => {
                    log::warn!("skipping order resolution under {parent:?}: {err}");
                    continue;
                }
            };

            for step in plan_moves(&current, &desired) {
                let moved = solver
                    .remove_child(parent, step.key)
                    .and_then(|()| solver.insert_child(parent, step.key, step.to));
                match moved {
                    Ok(()) => {
                        applied += 1;
                        log::trace!("moved {:?} to {} under {parent:?}", step.key, step.to);
                    }
                    Err(err) => log::warn!("failed to move {:?}: {err}", step.key),
                }
            }
        }
        applied
    }

    /// Registered children of `parent` in resolved order.
    pub fn resolved_children(&self, parent: LayoutNode) -> Vec<LayoutNode> {
        let mut siblings: Vec<&RegistryEntry> =
            self.entries.values().filter(|e| e.parent == parent).collect();
        siblings.sort_by_key(|e| e.seq);

        let keyed: Vec<(LayoutNode, Option<i32>)> =
            siblings.iter().map(|e| (e.node, e.index)).collect();
        resolve_order(&keyed)
    }

    /// Every node reachable from `root`, paired with its parent. Siblings
    /// are contiguous and in resolved order; a node always comes after its
    /// parent. Orphans are not reached.
    pub fn traversal(&self, root: LayoutNode) -> Vec<(LayoutNode, LayoutNode)> {
        let mut out = Vec::with_capacity(self.entries.len());
        let mut stack = vec![root];
        while let Some(parent) = stack.pop() {
            let children = self.resolved_children(parent);
            out.extend(children.iter().map(|&child| (child, parent)));
            stack.extend(children.iter().rev());
        }
        out
    }

    pub fn get(&self, node: LayoutNode) -> Option<&RegistryEntry> {
        self.entries.get(&node)
    }

    pub fn get_mut(&mut self, node: LayoutNode) -> Option<&mut RegistryEntry> {
        self.entries.get_mut(&node)
    }

    pub fn contains(&self, node: LayoutNode) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any parent awaits order resolution.
    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drop every entry without touching the solver.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.dirty.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::testing::ScriptedSolver;

    fn setup(n: usize) -> (ScriptedSolver, LayoutRegistry, LayoutNode, Vec<LayoutNode>) {
        let mut solver = ScriptedSolver::new();
        let mut registry = LayoutRegistry::new();
        let root = solver.create_node().unwrap();
        let items = (0..n)
            .map(|_| {
                let node = solver.create_node().unwrap();
                registry.register(&mut solver, node, root).unwrap();
                node
            })
            .collect();
        (solver, registry, root, items)
    }

    #[test]
    fn test_register_appends() {
        let (solver, registry, root, items) = setup(3);

        assert_eq!(solver.children(root).unwrap(), items);
        assert_eq!(registry.len(), 3);
        assert!(registry.has_dirty());
    }

    #[test]
    fn test_index_moves_one_child() {
        let (mut solver, mut registry, root, items) = setup(4);
        registry.resolve(&mut solver);
        let edits = solver.tree_edits();

        registry.update(items[3], Some(0), None, false).unwrap();
        let moves = registry.resolve(&mut solver);

        assert_eq!(moves, 1);
        assert_eq!(solver.tree_edits() - edits, 2);
        assert_eq!(
            solver.children(root).unwrap(),
            vec![items[3], items[0], items[1], items[2]]
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (mut solver, mut registry, _, items) = setup(3);
        registry.update(items[2], Some(0), None, false).unwrap();
        registry.resolve(&mut solver);

        registry.update(items[2], Some(0), None, true).unwrap();
        assert!(!registry.has_dirty());
        assert_eq!(registry.resolve(&mut solver), 0);
    }

    #[test]
    fn test_update_unknown_node() {
        let mut registry = LayoutRegistry::new();
        let ghost = LayoutNode::from_raw(42);
        assert_eq!(
            registry.update(ghost, None, None, false),
            Err(FlexError::UnknownNode(ghost))
        );
    }

    #[test]
    fn test_unregister_frees_node() {
        let (mut solver, mut registry, root, items) = setup(3);

        let entry = registry.unregister(&mut solver, items[1]).unwrap();

        assert_eq!(entry.node, items[1]);
        assert!(!registry.contains(items[1]));
        assert_eq!(solver.children(root).unwrap(), vec![items[0], items[2]]);
        assert_eq!(solver.node_count(), 3);
    }

    #[test]
    fn test_nested_traversal() {
        let (mut solver, mut registry, root, items) = setup(2);
        let inner = solver.create_node().unwrap();
        registry.register(&mut solver, inner, items[0]).unwrap();
        registry.update(items[1], Some(0), None, false).unwrap();
        registry.resolve(&mut solver);

        assert_eq!(
            registry.traversal(root),
            vec![(items[1], root), (items[0], root), (inner, items[0])]
        );
    }

    #[test]
    fn test_orphans_are_skipped() {
        let (mut solver, mut registry, root, items) = setup(1);
        let inner = solver.create_node().unwrap();
        registry.register(&mut solver, inner, items[0]).unwrap();

        registry.unregister(&mut solver, items[0]).unwrap();

        assert!(registry.contains(inner));
        assert!(registry.traversal(root).is_empty());
    }

    #[test]
    fn test_solver_order_follows_mixed_edits() {
        let (mut solver, mut registry, root, _) = setup(0);
        let mut live: Vec<LayoutNode> = Vec::new();

        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = |bound: usize| {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((seed >> 33) as usize) % bound
        };

        for step in 0..500 {
            match next(5) {
                0 | 1 => {
                    let node = solver.create_node().unwrap();
                    registry.register(&mut solver, node, root).unwrap();
                    live.push(node);
                }
                2 if !live.is_empty() => {
                    let node = live.remove(next(live.len()));
                    registry.unregister(&mut solver, node).unwrap();
                }
                _ if !live.is_empty() => {
                    let node = live[next(live.len())];
                    let index = match next(4) {
                        0 => None,
                        _ => Some(next(6) as i32),
                    };
                    registry.update(node, index, None, false).unwrap();
                }
                _ => {}
            }

            if step % 3 == 0 {
                registry.resolve(&mut solver);
                assert!(!registry.has_dirty());
                assert_eq!(
                    solver.children(root).unwrap(),
                    registry.resolved_children(root),
                    "step {step}"
                );
            }
        }

        registry.resolve(&mut solver);
        assert_eq!(solver.children(root).unwrap(), registry.resolved_children(root));
    }

    #[test]
    fn test_recorded_size_yields_to_props() {
        let (_, mut registry, _, items) = setup(1);
        registry.set_size(items[0], Some(1.0), None).unwrap();
        registry.set_size(items[0], None, Some(2.0)).unwrap();
        assert_eq!(registry.get(items[0]).unwrap().size, (Some(1.0), Some(2.0)));

        let props = FlexProperties::new().with_width(3.0);
        registry.set_properties(items[0], props).unwrap();

        assert_eq!(registry.get(items[0]).unwrap().size, (None, Some(2.0)));
    }
}
