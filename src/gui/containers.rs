//! Scoped containers.
//!
//! Every `begin_*` must be matched by its `end_*` before the frame ends,
//! whether or not any content was emitted in between; the counters checked
//! at `end_frame` catch a missing close. The closure wrappers below pair
//! the calls structurally and are the recommended surface.

use taffy::FlexDirection;

use super::node::{margin_all, padding_all};
use super::{Gui, NodeFlags, NodeId, WidgetKind};

const GROUP_PADDING: f32 = 2.0;

/// Handle returned by [`Gui::begin_collapsing`]: the section's node (for
/// layout hints) and whether it is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub node: NodeId,
    pub open: bool,
}

impl Gui {
    // =========================================================================
    // Group
    // =========================================================================

    /// Open a bordered vertical group with a heading.
    pub fn begin_group(&mut self, label: &str) -> NodeId {
        self.count_open();
        let id = self.push_container(
            label,
            WidgetKind::Group {
                label: label.to_string(),
            },
        );
        self.nodes[id].style.flex_direction = FlexDirection::Column;
        self.nodes[id].style.padding = padding_all(GROUP_PADDING);
        self.nodes[id].style.margin = margin_all(1.0);
        id
    }

    pub fn end_group(&mut self) {
        self.count_close();
        self.pop_container();
    }

    /// Group with the body scoped by a closure, so the pair cannot be
    /// left unbalanced.
    pub fn group(&mut self, label: &str, body: impl FnOnce(&mut Gui)) {
        self.begin_group(label);
        body(self);
        self.end_group();
    }

    // =========================================================================
    // Collapsing
    // =========================================================================

    /// Open a collapsible section: a header row with an arrow toggle and
    /// the label, then the section container itself. Emit content only
    /// while [`Section::open`], but call [`Gui::end_collapsing`] either
    /// way.
    ///
    /// Sections start closed; the open state is keyed by guid and kept
    /// across frames.
    pub fn begin_collapsing(&mut self, label: &str) -> Section {
        self.count_open();
        let id = self.push_container(
            label,
            WidgetKind::Collapsing {
                label: label.to_string(),
                open: false,
            },
        );
        let guid = self.nodes[id].guid;
        let open = self.open_state(guid, false);
        if let WidgetKind::Collapsing { open: node_open, .. } = &mut self.nodes[id].kind {
            *node_open = open;
        }
        self.nodes[id].style.flex_direction = FlexDirection::Column;
        self.nodes[id].style.margin = margin_all(1.0);

        // Header row: arrow toggle bound to the open table, then the label.
        let header = self.push_container("##header", WidgetKind::HiddenHorizontal);
        self.nodes[header].style.flex_direction = FlexDirection::Row;
        let toggle = self.open_binding(guid, false);
        self.arrow_toggle("##arrow", toggle);
        self.label(label);
        self.pop_container();

        Section { node: id, open }
    }

    pub fn end_collapsing(&mut self) {
        self.count_close();
        self.pop_container();
    }

    /// Collapsible section with the body scoped by a closure. The body
    /// runs only while the section is open; the pair stays balanced
    /// either way.
    pub fn collapsing(&mut self, label: &str, body: impl FnOnce(&mut Gui)) {
        let section = self.begin_collapsing(label);
        if section.open {
            body(self);
        }
        self.end_collapsing();
    }

    // =========================================================================
    // Hovering
    // =========================================================================

    /// Open an overlay drawn above the main tree, recorded as its own
    /// root. Placement defaults to host-chosen; assign one with
    /// [`Gui::set_root_placement`].
    pub fn begin_hovering(&mut self) -> NodeId {
        self.count_open();
        self.push_root("##hovering", WidgetKind::Hovering)
    }

    pub fn end_hovering(&mut self) {
        self.count_close();
        self.pop_root();
    }

    /// Overlay with the body scoped by a closure.
    pub fn hovering(&mut self, body: impl FnOnce(&mut Gui)) -> NodeId {
        let id = self.begin_hovering();
        body(self);
        self.end_hovering();
        id
    }

    // =========================================================================
    // Hidden Horizontal
    // =========================================================================

    /// Open a chrome-less horizontal row that clips overflowing children.
    pub fn begin_hidden_horizontal(&mut self) -> NodeId {
        self.count_open();
        let id = self.push_container("##row", WidgetKind::HiddenHorizontal);
        self.nodes[id].style.flex_direction = FlexDirection::Row;
        self.nodes[id].flags |= NodeFlags::HIDDEN_OVERFLOW;
        id
    }

    pub fn end_hidden_horizontal(&mut self) {
        self.count_close();
        self.pop_container();
    }

    /// Horizontal row with the body scoped by a closure.
    pub fn hidden_horizontal(&mut self, body: impl FnOnce(&mut Gui)) -> NodeId {
        let id = self.begin_hidden_horizontal();
        body(self);
        self.end_hidden_horizontal();
        id
    }
}
