//! Immediate-mode widget recorder.
//!
//! A [`Gui`] is handed to a block's layout function once per redraw. The
//! layout function calls widget methods top to bottom; each call appends a
//! node to the current frame's tree and returns. Nothing is retained from
//! the previous frame except the open/closed table for collapsing sections
//! and combo popups, so the tree is a pure function of store state plus
//! that table.
//!
//! Internally the recorder keeps two stacks, mirroring how overlays work:
//! the working stack tracks the container new widgets attach to, and the
//! root stack tracks which tree (main frame or a hovering overlay) is being
//! recorded. Author-facing scope pairs are counted and checked at
//! `end_frame`; internal container plumbing bypasses the counters.

mod containers;
mod node;
mod widgets;

pub use containers::Section;
pub use node::{NodeFlags, NodeId, RootPlacement, WidgetKind, WidgetNode};

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::rc::Rc;

use taffy::FlexDirection;

use crate::binding::Binding;
use crate::error::{Error, Result};

fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Records one widget tree per redraw.
pub struct Gui {
    nodes: Vec<WidgetNode>,
    roots: Vec<NodeId>,
    working_stack: Vec<NodeId>,
    root_stack: Vec<NodeId>,
    /// Guid-keyed open/closed state for collapsing sections and combo
    /// popups. Survives across frames; everything else is rebuilt.
    open_states: Rc<RefCell<HashMap<u64, bool>>>,
    /// Per-frame occurrence counts used to keep guids unique when the same
    /// label repeats under one parent (list rows).
    guid_seen: HashMap<u64, u64>,
    opened_scopes: usize,
    closed_scopes: usize,
    in_frame: bool,
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}

impl Gui {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            working_stack: Vec::new(),
            root_stack: Vec::new(),
            open_states: Rc::new(RefCell::new(HashMap::new())),
            guid_seen: HashMap::new(),
            opened_scopes: 0,
            closed_scopes: 0,
            in_frame: false,
        }
    }

    // =========================================================================
    // Frame Lifecycle
    // =========================================================================

    /// Discard the previous frame's tree and start recording a new one.
    ///
    /// The open/closed table is the only state carried over.
    pub fn begin_frame(&mut self) {
        tracing::trace!("begin frame");
        self.nodes.clear();
        self.roots.clear();
        self.working_stack.clear();
        self.root_stack.clear();
        self.guid_seen.clear();
        self.opened_scopes = 0;
        self.closed_scopes = 0;
        self.in_frame = true;

        let mut root = WidgetNode::new(hash_key("frame-root"), WidgetKind::Root);
        root.flags |= NodeFlags::ROOT;
        root.style.flex_direction = FlexDirection::Column;
        self.nodes.push(root);
        self.roots.push(0);
        self.root_stack.push(0);
        self.working_stack.push(0);
    }

    /// Finish the frame, verifying every author-opened scope was closed.
    pub fn end_frame(&mut self) -> Result<()> {
        self.in_frame = false;
        if self.opened_scopes != self.closed_scopes {
            return Err(Error::UnbalancedScope {
                opened: self.opened_scopes,
                closed: self.closed_scopes,
            });
        }
        debug_assert_eq!(self.working_stack.len(), 1, "internal container leak");
        self.working_stack.clear();
        self.root_stack.clear();
        tracing::trace!(widgets = self.nodes.len(), "end frame");
        Ok(())
    }

    /// Scope counters for the frame so far, `(opened, closed)`.
    pub fn scope_balance(&self) -> (usize, usize) {
        (self.opened_scopes, self.closed_scopes)
    }

    // =========================================================================
    // Guids and Open State
    // =========================================================================

    /// Guid for a widget identified by `key` under the current container.
    ///
    /// Parent guid xor key hash, salted with the per-frame occurrence count
    /// so repeated labels under one parent (list rows) stay distinct while
    /// remaining stable across frames for a stable emission order.
    fn make_guid(&mut self, key: &str) -> u64 {
        let parent_guid = self
            .working_stack
            .last()
            .map(|&id| self.nodes[id].guid)
            .unwrap_or(0);
        let base = parent_guid ^ hash_key(key);
        let seen = self.guid_seen.entry(base).or_insert(0);
        let guid = base.wrapping_add((*seen).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        *seen += 1;
        guid
    }

    /// Current open/closed state for `guid`, seeding the table with
    /// `default` on first sight.
    pub(crate) fn open_state(&self, guid: u64, default: bool) -> bool {
        *self.open_states.borrow_mut().entry(guid).or_insert(default)
    }

    /// Binding into the open/closed table, for arrow toggles and combo
    /// headers. Writes persist across frames.
    pub(crate) fn open_binding(&self, guid: u64, default: bool) -> Binding<bool> {
        let read = self.open_states.clone();
        let write = self.open_states.clone();
        Binding::new(
            move || *read.borrow_mut().entry(guid).or_insert(default),
            move |open| {
                write.borrow_mut().insert(guid, open);
            },
        )
    }

    /// Force a guid's open state, e.g. from host-side input handling.
    pub fn set_open(&mut self, guid: u64, open: bool) {
        self.open_states.borrow_mut().insert(guid, open);
    }

    // =========================================================================
    // Tree Plumbing
    // =========================================================================

    /// Append a leaf node under the current container.
    pub(crate) fn push_child(&mut self, key: &str, kind: WidgetKind) -> NodeId {
        let guid = self.make_guid(key);
        let id = self.nodes.len();
        let mut node = WidgetNode::new(guid, kind);
        let parent = *self
            .working_stack
            .last()
            .unwrap_or(&0);
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    /// Append a container node and make it the current container.
    /// Not scope-counted; author-facing pairs count themselves.
    pub(crate) fn push_container(&mut self, key: &str, kind: WidgetKind) -> NodeId {
        let id = self.push_child(key, kind);
        self.working_stack.push(id);
        id
    }

    pub(crate) fn pop_container(&mut self) {
        // The frame root at depth 1 is never popped by widget code.
        if self.working_stack.len() > 1 {
            self.working_stack.pop();
        }
    }

    /// Start a new widget tree (overlay) and make it current.
    pub(crate) fn push_root(&mut self, key: &str, kind: WidgetKind) -> NodeId {
        let guid = self.make_guid(key);
        let id = self.nodes.len();
        let mut node = WidgetNode::new(guid, kind);
        node.flags |= NodeFlags::ROOT;
        node.style.flex_direction = FlexDirection::Column;
        self.nodes.push(node);
        self.roots.push(id);
        self.root_stack.push(id);
        self.working_stack.push(id);
        id
    }

    pub(crate) fn pop_root(&mut self) {
        if self.root_stack.len() > 1 {
            self.root_stack.pop();
            self.working_stack.pop();
        }
    }

    pub(crate) fn count_open(&mut self) {
        self.opened_scopes += 1;
    }

    pub(crate) fn count_close(&mut self) {
        self.closed_scopes += 1;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// All roots recorded this frame; index 0 is the main frame root.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The main frame root.
    pub fn main_root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &WidgetNode {
        &self.nodes[id]
    }

    /// Mutable style of the most recently emitted node, for layout hints
    /// applied right after a widget call.
    pub fn style_mut(&mut self, id: NodeId) -> &mut taffy::Style {
        &mut self.nodes[id].style
    }

    pub fn flags_mut(&mut self, id: NodeId) -> &mut NodeFlags {
        &mut self.nodes[id].flags
    }

    /// Children of `id`, in emission order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id].children()
    }

    /// Total nodes recorded this frame, all roots included.
    pub fn widget_count(&self) -> usize {
        self.nodes.len()
    }

    /// Assign where an overlay root should land in host coordinates.
    pub fn set_root_placement(&mut self, id: NodeId, placement: RootPlacement) {
        self.nodes[id].placement = Some(placement);
    }
}
