use std::io;
use std::sync::Arc;

use axaudit_types::{DescriptorId, NodeId};

/// Shared read handle to one host node.
pub type NodeHandle = Arc<dyn Node>;

/// On-screen bounds of a node, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PixelRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        (self.right - self.left).abs()
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).abs()
    }
}

/// Capability surface of one audited UI node.
///
/// `id` and `children` are the only required methods; everything else
/// defaults to "capability absent" so hosts expose exactly what they have.
/// No check may require a capability to function: absence maps to a
/// `NOT_RUN` result, never a panic.
///
/// Contract: `id()` is unique within one audited tree and stable for the
/// duration of an audit. Mutating capabilities (`expand`, `collapse`,
/// `select`) return whether the host applied the transition.
pub trait Node: Send + Sync {
    fn id(&self) -> NodeId;

    /// Direct children in host order. Hosts guarantee an acyclic tree.
    fn children(&self) -> Vec<NodeHandle>;

    // ── Text / label capabilities ──────────────────────────────

    fn is_text_carrier(&self) -> bool {
        false
    }

    fn text(&self) -> Option<String> {
        None
    }

    /// The assistive-technology label, distinct from `text()`.
    fn accessible_label(&self) -> Option<String> {
        None
    }

    fn is_editable(&self) -> bool {
        false
    }

    /// Text size in scale-independent units, when the node renders text.
    fn text_size_sp(&self) -> Option<f32> {
        None
    }

    // ── Interaction capabilities ───────────────────────────────

    fn is_focusable(&self) -> bool {
        false
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn is_clickable(&self) -> bool {
        false
    }

    fn is_long_clickable(&self) -> bool {
        false
    }

    /// True for interactive control widgets (buttons, toggles, pickers...).
    fn is_control(&self) -> bool {
        false
    }

    /// Id of the node this node labels, if it acts as a label for another.
    fn label_target_id(&self) -> Option<NodeId> {
        None
    }

    // ── Geometry / display capabilities ────────────────────────

    fn bounds_px(&self) -> Option<PixelRect> {
        None
    }

    /// Pixels per density-independent unit for the hosting display.
    fn display_density(&self) -> Option<f32> {
        None
    }

    // ── Embedded-surface capabilities ──────────────────────────

    fn is_embedded_surface(&self) -> bool {
        false
    }

    fn script_enabled(&self) -> bool {
        false
    }

    // ── Layout-descriptor capability ───────────────────────────

    /// Id of the serialized layout description this node originates from.
    fn layout_descriptor_id(&self) -> Option<DescriptorId> {
        None
    }

    // ── Flat / virtualized list capabilities ───────────────────

    fn item_count(&self) -> Option<usize> {
        None
    }

    /// Materialize the item node at `index`.
    fn item_at(&self, index: usize) -> Option<NodeHandle> {
        let _ = index;
        None
    }

    // ── Expandable group-list capabilities ─────────────────────

    fn group_count(&self) -> Option<usize> {
        None
    }

    fn group_at(&self, group: usize) -> Option<NodeHandle> {
        let _ = group;
        None
    }

    fn child_count(&self, group: usize) -> usize {
        let _ = group;
        0
    }

    fn child_at(&self, group: usize, child: usize) -> Option<NodeHandle> {
        let _ = (group, child);
        None
    }

    fn expand(&self, group: usize) -> bool {
        let _ = group;
        false
    }

    fn collapse(&self, group: usize) -> bool {
        let _ = group;
        false
    }

    fn select(&self, group: usize, child: usize) -> bool {
        let _ = (group, child);
        false
    }

    /// Queried once per child before any selection transition, so that a
    /// transition is never misread as a capability change.
    fn is_child_selectable(&self, group: usize, child: usize) -> bool {
        let _ = (group, child);
        false
    }
}

/// Source of serialized layout descriptions, keyed by descriptor id.
///
/// Each `open` yields a fresh forward-only stream; streams are never
/// rewound or shared between scans.
pub trait DescriptorSource: Send + Sync {
    fn open(&self, id: DescriptorId) -> io::Result<Box<dyn io::Read + Send>>;
}
