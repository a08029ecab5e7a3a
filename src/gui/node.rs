//! Widget nodes - the per-redraw tree the layout function records.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]; parent/child links are
//! indices, rebuilt from scratch on every redraw. Each node carries a stable
//! guid (parent guid combined with a label hash, so the same widget gets the
//! same guid frame after frame), a [`WidgetKind`] payload with the snapshot
//! value and binding the host needs to draw and dispatch input, and a
//! `taffy::Style` of author-writable layout hints that the host's flexbox
//! pass reads during rendering.

use std::rc::Rc;

use taffy::{LengthPercentage, LengthPercentageAuto, Rect, Style};

use crate::binding::Binding;

/// Index of a widget node within the current frame's arena.
pub type NodeId = usize;

bitflags::bitflags! {
    /// Presentation flags the host reads alongside the widget kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Node is the root of a widget tree (main frame or overlay).
        const ROOT = 1;
        /// Draw grayed out; input is not dispatched to this node.
        const DISABLED = 1 << 1;
        /// Children overflowing the node's bounds are clipped.
        const HIDDEN_OVERFLOW = 1 << 2;
    }
}

/// Author-assigned placement for an overlay root, in host frame coordinates.
///
/// Only meaningful on nodes with [`NodeFlags::ROOT`]; unplaced overlay roots
/// are positioned by the host (the combo popup path relies on that).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootPlacement {
    pub x: f32,
    pub y: f32,
    pub min_width: f32,
}

/// What a node is, plus the snapshot value and binding the host draws and
/// dispatches with. Snapshots are re-read from the store on every redraw.
pub enum WidgetKind {
    /// Root of a widget tree; no visual of its own.
    Root,
    /// Bordered vertical group with a heading.
    Group { label: String },
    /// Static text.
    Label { text: String },
    /// Checkbox; pressing it toggles the binding.
    Checkbox {
        label: String,
        checked: bool,
        binding: Binding<bool>,
    },
    /// Small open/closed arrow; pressing it toggles the binding.
    ArrowToggle { open: bool, binding: Binding<bool> },
    /// Unbounded float editor with nudge arrows.
    FloatEditor {
        label: String,
        value: f32,
        binding: Binding<f32>,
    },
    /// Float editor with an inclusive range; bounds are passed through to
    /// the host unmodified, clamping is the host's job.
    BoundedFloat {
        label: String,
        value: f32,
        min: f32,
        max: f32,
        binding: Binding<f32>,
    },
    /// Int editor with an inclusive range.
    BoundedInt {
        label: String,
        value: i32,
        min: i32,
        max: i32,
        binding: Binding<i32>,
    },
    /// Int slider with a draggable thumb over an inclusive range.
    SliderInt {
        label: String,
        value: i32,
        min: i32,
        max: i32,
        binding: Binding<i32>,
    },
    /// Closed combo control showing the selected option; pressing it
    /// toggles `open_binding`. While open, the frame also contains an
    /// overlay root of [`WidgetKind::ComboItem`] children.
    Combo {
        label: String,
        items: Vec<String>,
        selected: i32,
        open: bool,
        open_binding: Binding<bool>,
    },
    /// One selectable row of an open combo popup; activating it writes the
    /// index through the combo's binding and closes the popup.
    ComboItem {
        label: String,
        index: i32,
        selected: bool,
        select: Rc<dyn Fn()>,
    },
    /// Collapsible container: header row (arrow + label) plus a content
    /// container that the block author fills only while open.
    Collapsing { label: String, open: bool },
    /// Overlay container drawn above the main tree, as its own root.
    Hovering,
    /// Chrome-less horizontal row; overflow hidden.
    HiddenHorizontal,
}

impl WidgetKind {
    /// Short name for logs and test assertions.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Root => "root",
            WidgetKind::Group { .. } => "group",
            WidgetKind::Label { .. } => "label",
            WidgetKind::Checkbox { .. } => "checkbox",
            WidgetKind::ArrowToggle { .. } => "arrow_toggle",
            WidgetKind::FloatEditor { .. } => "float_editor",
            WidgetKind::BoundedFloat { .. } => "bounded_float",
            WidgetKind::BoundedInt { .. } => "bounded_int",
            WidgetKind::SliderInt { .. } => "slider_int",
            WidgetKind::Combo { .. } => "combo",
            WidgetKind::ComboItem { .. } => "combo_item",
            WidgetKind::Collapsing { .. } => "collapsing",
            WidgetKind::Hovering => "hovering",
            WidgetKind::HiddenHorizontal => "hidden_horizontal",
        }
    }
}

/// One widget in the current frame's tree.
pub struct WidgetNode {
    /// Stable identity across frames: parent guid combined with label hash.
    pub guid: u64,
    pub kind: WidgetKind,
    /// Layout hints (grow, margin, alignment, ...). Write-only from the
    /// block author's perspective; the host reads them while rendering.
    pub style: Style,
    pub flags: NodeFlags,
    /// Author-assigned placement, overlay roots only.
    pub placement: Option<RootPlacement>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl WidgetNode {
    pub(crate) fn new(guid: u64, kind: WidgetKind) -> Self {
        Self {
            guid,
            kind,
            style: Style::default(),
            flags: NodeFlags::empty(),
            placement: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes, in emission order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The node's label or text, when its kind has one.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            WidgetKind::Group { label }
            | WidgetKind::Checkbox { label, .. }
            | WidgetKind::FloatEditor { label, .. }
            | WidgetKind::BoundedFloat { label, .. }
            | WidgetKind::BoundedInt { label, .. }
            | WidgetKind::SliderInt { label, .. }
            | WidgetKind::Combo { label, .. }
            | WidgetKind::ComboItem { label, .. }
            | WidgetKind::Collapsing { label, .. } => Some(label),
            WidgetKind::Label { text } => Some(text),
            _ => None,
        }
    }
}

// =============================================================================
// Style Helpers
// =============================================================================

/// Uniform margin in points.
pub(crate) fn margin_all(points: f32) -> Rect<LengthPercentageAuto> {
    Rect {
        left: LengthPercentageAuto::Length(points),
        right: LengthPercentageAuto::Length(points),
        top: LengthPercentageAuto::Length(points),
        bottom: LengthPercentageAuto::Length(points),
    }
}

/// Uniform padding in points.
pub(crate) fn padding_all(points: f32) -> Rect<LengthPercentage> {
    Rect {
        left: LengthPercentage::Length(points),
        right: LengthPercentage::Length(points),
        top: LengthPercentage::Length(points),
        bottom: LengthPercentage::Length(points),
    }
}
