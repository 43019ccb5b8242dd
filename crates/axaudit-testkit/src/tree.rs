//! Buildable fake host tree.
//!
//! `FakeNode` is a builder: capabilities are off by default and opt in per
//! node, mirroring how hosts expose the `Node` surface. `build` freezes
//! the tree into shared handles; expandable-group state lives behind a
//! mutex so checks can drive transitions through `&self`.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axaudit_tree::{Node, NodeHandle, PixelRect};
use axaudit_types::{DescriptorId, NodeId};

#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    id: u64,
    children: Vec<FakeNode>,
    text_carrier: bool,
    text: Option<String>,
    label: Option<String>,
    editable: bool,
    text_size: Option<f32>,
    focusable: bool,
    hidden: bool,
    disabled: bool,
    clickable: bool,
    long_clickable: bool,
    control: bool,
    label_target: Option<u64>,
    bounds: Option<PixelRect>,
    density: Option<f32>,
    embedded_surface: bool,
    script_enabled: bool,
    descriptor: Option<u64>,
    items: Option<Vec<FakeNode>>,
    groups: Option<Vec<FakeGroup>>,
}

impl FakeNode {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn child(mut self, child: FakeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn text_carrier(mut self, text: &str) -> Self {
        self.text_carrier = true;
        self.text = Some(text.to_string());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn text_size(mut self, sp: f32) -> Self {
        self.text_size = Some(sp);
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    pub fn long_clickable(mut self) -> Self {
        self.long_clickable = true;
        self
    }

    pub fn control(mut self) -> Self {
        self.control = true;
        self
    }

    pub fn label_target(mut self, target: u64) -> Self {
        self.label_target = Some(target);
        self
    }

    pub fn bounds(mut self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        self.bounds = Some(PixelRect::new(left, top, right, bottom));
        self
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = Some(density);
        self
    }

    pub fn embedded_surface(mut self) -> Self {
        self.embedded_surface = true;
        self
    }

    pub fn script_enabled(mut self) -> Self {
        self.script_enabled = true;
        self
    }

    pub fn descriptor(mut self, id: u64) -> Self {
        self.descriptor = Some(id);
        self
    }

    /// Make this node a flat list over the given item nodes.
    pub fn items(mut self, items: Vec<FakeNode>) -> Self {
        self.items = Some(items);
        self
    }

    /// Make this node an expandable group list.
    pub fn groups(mut self, groups: Vec<FakeGroup>) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn build(self) -> NodeHandle {
        let children = self.children.iter().cloned().map(FakeNode::build).collect();
        let items = self
            .items
            .as_ref()
            .map(|items| items.iter().cloned().map(FakeNode::build).collect());
        let expandable = self.groups.as_ref().map(|groups| {
            let state = Arc::new(Mutex::new(ExpandState::default()));
            let built = groups
                .iter()
                .enumerate()
                .map(|(index, g)| g.build(index, &state))
                .collect();
            Expandable {
                groups: built,
                state,
            }
        });
        Arc::new(BuiltNode {
            spec: self,
            children,
            items,
            expandable,
        })
    }
}

#[derive(Debug, Clone)]
pub struct FakeGroup {
    id: u64,
    collapsed_label: String,
    expanded_label: String,
    children: Vec<FakeGroupChild>,
}

impl FakeGroup {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            collapsed_label: String::new(),
            expanded_label: String::new(),
            children: Vec::new(),
        }
    }

    pub fn collapsed(mut self, label: &str) -> Self {
        self.collapsed_label = label.to_string();
        self
    }

    pub fn expanded(mut self, label: &str) -> Self {
        self.expanded_label = label.to_string();
        self
    }

    pub fn child(mut self, child: FakeGroupChild) -> Self {
        self.children.push(child);
        self
    }

    fn build(&self, index: usize, state: &Arc<Mutex<ExpandState>>) -> BuiltGroup {
        let node = Arc::new(GroupNode {
            id: NodeId(self.id),
            index,
            collapsed_label: self.collapsed_label.clone(),
            expanded_label: self.expanded_label.clone(),
            state: Arc::clone(state),
        });
        let children = self
            .children
            .iter()
            .enumerate()
            .map(|(child_index, c)| {
                Arc::new(ChildNode {
                    id: NodeId(c.id),
                    group: index,
                    index: child_index,
                    unselected_label: c.unselected_label.clone(),
                    selected_label: c.selected_label.clone(),
                    focusable: c.focusable,
                    state: Arc::clone(state),
                })
            })
            .collect();
        BuiltGroup {
            node,
            children,
            selectable: self.children.iter().map(|c| c.selectable).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeGroupChild {
    id: u64,
    unselected_label: Option<String>,
    selected_label: Option<String>,
    selectable: bool,
    focusable: bool,
}

impl FakeGroupChild {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            unselected_label: None,
            selected_label: None,
            selectable: false,
            focusable: false,
        }
    }

    pub fn unselected_label(mut self, label: &str) -> Self {
        self.unselected_label = Some(label.to_string());
        self
    }

    pub fn selected_label(mut self, label: &str) -> Self {
        self.selected_label = Some(label.to_string());
        self
    }

    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }
}

#[derive(Debug, Default)]
struct ExpandState {
    expanded: BTreeSet<usize>,
    selected: BTreeSet<(usize, usize)>,
}

struct Expandable {
    groups: Vec<BuiltGroup>,
    state: Arc<Mutex<ExpandState>>,
}

struct BuiltGroup {
    node: Arc<GroupNode>,
    children: Vec<Arc<ChildNode>>,
    selectable: Vec<bool>,
}

struct BuiltNode {
    spec: FakeNode,
    children: Vec<NodeHandle>,
    items: Option<Vec<NodeHandle>>,
    expandable: Option<Expandable>,
}

impl Node for BuiltNode {
    fn id(&self) -> NodeId {
        NodeId(self.spec.id)
    }

    fn children(&self) -> Vec<NodeHandle> {
        self.children.clone()
    }

    fn is_text_carrier(&self) -> bool {
        self.spec.text_carrier
    }

    fn text(&self) -> Option<String> {
        self.spec.text.clone()
    }

    fn accessible_label(&self) -> Option<String> {
        self.spec.label.clone()
    }

    fn is_editable(&self) -> bool {
        self.spec.editable
    }

    fn text_size_sp(&self) -> Option<f32> {
        self.spec.text_size
    }

    fn is_focusable(&self) -> bool {
        self.spec.focusable
    }

    fn is_visible(&self) -> bool {
        !self.spec.hidden
    }

    fn is_enabled(&self) -> bool {
        !self.spec.disabled
    }

    fn is_clickable(&self) -> bool {
        self.spec.clickable
    }

    fn is_long_clickable(&self) -> bool {
        self.spec.long_clickable
    }

    fn is_control(&self) -> bool {
        self.spec.control
    }

    fn label_target_id(&self) -> Option<NodeId> {
        self.spec.label_target.map(NodeId)
    }

    fn bounds_px(&self) -> Option<PixelRect> {
        self.spec.bounds
    }

    fn display_density(&self) -> Option<f32> {
        self.spec.density
    }

    fn is_embedded_surface(&self) -> bool {
        self.spec.embedded_surface
    }

    fn script_enabled(&self) -> bool {
        self.spec.script_enabled
    }

    fn layout_descriptor_id(&self) -> Option<DescriptorId> {
        self.spec.descriptor.map(DescriptorId)
    }

    fn item_count(&self) -> Option<usize> {
        self.items.as_ref().map(Vec::len)
    }

    fn item_at(&self, index: usize) -> Option<NodeHandle> {
        self.items.as_ref()?.get(index).cloned()
    }

    fn group_count(&self) -> Option<usize> {
        self.expandable.as_ref().map(|e| e.groups.len())
    }

    fn group_at(&self, group: usize) -> Option<NodeHandle> {
        let e = self.expandable.as_ref()?;
        e.groups.get(group).map(|g| Arc::clone(&g.node) as NodeHandle)
    }

    fn child_count(&self, group: usize) -> usize {
        self.expandable
            .as_ref()
            .and_then(|e| e.groups.get(group))
            .map_or(0, |g| g.children.len())
    }

    fn child_at(&self, group: usize, child: usize) -> Option<NodeHandle> {
        let e = self.expandable.as_ref()?;
        e.groups
            .get(group)?
            .children
            .get(child)
            .map(|c| Arc::clone(c) as NodeHandle)
    }

    fn expand(&self, group: usize) -> bool {
        let Some(e) = self.expandable.as_ref() else {
            return false;
        };
        if group >= e.groups.len() {
            return false;
        }
        e.state.lock().expect("state lock").expanded.insert(group);
        true
    }

    fn collapse(&self, group: usize) -> bool {
        let Some(e) = self.expandable.as_ref() else {
            return false;
        };
        if group >= e.groups.len() {
            return false;
        }
        e.state.lock().expect("state lock").expanded.remove(&group);
        true
    }

    fn select(&self, group: usize, child: usize) -> bool {
        let Some(e) = self.expandable.as_ref() else {
            return false;
        };
        if e.groups.get(group).is_none_or(|g| child >= g.children.len()) {
            return false;
        }
        e.state
            .lock()
            .expect("state lock")
            .selected
            .insert((group, child));
        true
    }

    fn is_child_selectable(&self, group: usize, child: usize) -> bool {
        self.expandable
            .as_ref()
            .and_then(|e| e.groups.get(group))
            .and_then(|g| g.selectable.get(child).copied())
            .unwrap_or(false)
    }
}

struct GroupNode {
    id: NodeId,
    index: usize,
    collapsed_label: String,
    expanded_label: String,
    state: Arc<Mutex<ExpandState>>,
}

impl Node for GroupNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn children(&self) -> Vec<NodeHandle> {
        Vec::new()
    }

    fn accessible_label(&self) -> Option<String> {
        let state = self.state.lock().expect("state lock");
        let label = if state.expanded.contains(&self.index) {
            &self.expanded_label
        } else {
            &self.collapsed_label
        };
        Some(label.clone())
    }
}

struct ChildNode {
    id: NodeId,
    group: usize,
    index: usize,
    unselected_label: Option<String>,
    selected_label: Option<String>,
    focusable: bool,
    state: Arc<Mutex<ExpandState>>,
}

impl Node for ChildNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn children(&self) -> Vec<NodeHandle> {
        Vec::new()
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }

    fn accessible_label(&self) -> Option<String> {
        let state = self.state.lock().expect("state lock");
        let selected = state.selected.contains(&(self.group, self.index));
        let label = if selected {
            self.selected_label.as_ref().or(self.unselected_label.as_ref())
        } else {
            self.unselected_label.as_ref()
        };
        label.cloned()
    }
}
