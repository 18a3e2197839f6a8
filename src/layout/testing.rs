//! Scripted solver for unit tests.
//!
//! Keeps a real node tree and records every style setter, but computed boxes
//! come from a script instead of a flexbox pass. Clones share state, so a
//! test can hand one clone to a container and inspect the other.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::{FlexError, Result};
use crate::types::LayoutDirection;

use super::solver::{LayoutNode, Solver, StyleProperty};
use super::types::{ComputedBox, MeasureFunc};

#[derive(Default)]
struct ScriptedNode {
    styles: Vec<StyleProperty>,
    measure: Option<MeasureFunc>,
    children: Vec<LayoutNode>,
    parent: Option<LayoutNode>,
}

#[derive(Default)]
struct Script {
    nodes: HashMap<LayoutNode, ScriptedNode>,
    boxes: HashMap<LayoutNode, ComputedBox>,
    next_id: u64,
    rejected: HashSet<&'static str>,
    layout_calls: usize,
    tree_edits: usize,
    last_pass: Option<(LayoutNode, f32, f32, LayoutDirection)>,
}

impl Script {
    fn node(&self, node: LayoutNode) -> Result<&ScriptedNode> {
        self.nodes.get(&node).ok_or(FlexError::UnknownNode(node))
    }

    fn node_mut(&mut self, node: LayoutNode) -> Result<&mut ScriptedNode> {
        self.nodes.get_mut(&node).ok_or(FlexError::UnknownNode(node))
    }
}

#[derive(Clone, Default)]
pub struct ScriptedSolver(Rc<RefCell<Script>>);

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every setter with this name fail as unsupported.
    pub fn reject(&self, property: &'static str) {
        self.0.borrow_mut().rejected.insert(property);
    }

    /// Box reported for `node` by every later read. Node ids are handed out
    /// from zero in creation order.
    pub fn script(&self, node: LayoutNode, layout: ComputedBox) {
        self.0.borrow_mut().boxes.insert(node, layout);
    }

    pub fn styles(&self, node: LayoutNode) -> Vec<StyleProperty> {
        self.0
            .borrow()
            .nodes
            .get(&node)
            .map(|n| n.styles.clone())
            .unwrap_or_default()
    }

    pub fn has_measure(&self, node: LayoutNode) -> bool {
        self.0.borrow().nodes.get(&node).is_some_and(|n| n.measure.is_some())
    }

    pub fn layout_calls(&self) -> usize {
        self.0.borrow().layout_calls
    }

    /// Insert and remove calls seen so far.
    pub fn tree_edits(&self) -> usize {
        self.0.borrow().tree_edits
    }

    pub fn last_pass(&self) -> Option<(LayoutNode, f32, f32, LayoutDirection)> {
        self.0.borrow().last_pass
    }

    pub fn node_count(&self) -> usize {
        self.0.borrow().nodes.len()
    }
}

impl Solver for ScriptedSolver {
    fn create_node(&mut self) -> Result<LayoutNode> {
        let mut s = self.0.borrow_mut();
        let node = LayoutNode::from_raw(s.next_id);
        s.next_id += 1;
        s.nodes.insert(node, ScriptedNode::default());
        Ok(node)
    }

    fn remove_node(&mut self, node: LayoutNode) -> Result<()> {
        let mut s = self.0.borrow_mut();
        let removed = s.nodes.remove(&node).ok_or(FlexError::UnknownNode(node))?;
        if let Some(parent) = removed.parent.and_then(|p| s.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        for child in removed.children {
            if let Some(c) = s.nodes.get_mut(&child) {
                c.parent = None;
            }
        }
        Ok(())
    }

    fn set_style(&mut self, node: LayoutNode, property: StyleProperty) -> Result<()> {
        let mut s = self.0.borrow_mut();
        if s.rejected.contains(property.name()) {
            return Err(FlexError::UnsupportedStyle {
                property: property.name(),
                reason: "rejected by script".into(),
            });
        }
        s.node_mut(node)?.styles.push(property);
        Ok(())
    }

    fn set_measure_func(&mut self, node: LayoutNode, measure: Option<MeasureFunc>) -> Result<()> {
        self.0.borrow_mut().node_mut(node)?.measure = measure;
        Ok(())
    }

    fn insert_child(&mut self, parent: LayoutNode, child: LayoutNode, index: usize) -> Result<()> {
        let mut s = self.0.borrow_mut();
        s.node(child)?;
        let siblings = &mut s.node_mut(parent)?.children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        s.node_mut(child)?.parent = Some(parent);
        s.tree_edits += 1;
        Ok(())
    }

    fn remove_child(&mut self, parent: LayoutNode, child: LayoutNode) -> Result<()> {
        let mut s = self.0.borrow_mut();
        s.node_mut(parent)?.children.retain(|c| *c != child);
        s.node_mut(child)?.parent = None;
        s.tree_edits += 1;
        Ok(())
    }

    fn children(&self, parent: LayoutNode) -> Result<Vec<LayoutNode>> {
        Ok(self.0.borrow().node(parent)?.children.clone())
    }

    fn parent(&self, node: LayoutNode) -> Option<LayoutNode> {
        self.0.borrow().nodes.get(&node).and_then(|n| n.parent)
    }

    fn calculate_layout(
        &mut self,
        root: LayoutNode,
        width: f32,
        height: f32,
        direction: LayoutDirection,
    ) -> Result<()> {
        let mut s = self.0.borrow_mut();
        s.node(root)?;
        s.layout_calls += 1;
        s.last_pass = Some((root, width, height, direction));
        Ok(())
    }

    fn computed_layout(&self, node: LayoutNode) -> Result<ComputedBox> {
        let s = self.0.borrow();
        s.node(node)?;
        Ok(s.boxes.get(&node).copied().unwrap_or_default())
    }
}
