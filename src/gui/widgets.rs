//! Leaf widgets.
//!
//! Every method appends one node (the combo also records its popup overlay
//! while open) and returns its [`NodeId`] so the caller can apply layout
//! hints. Values shown are snapshots read through the binding at emission
//! time; input goes back through the same binding.

use std::rc::Rc;

use super::node::margin_all;
use super::{Gui, NodeFlags, NodeId, WidgetKind};
use crate::binding::Binding;

const WIDGET_MARGIN: f32 = 1.0;

impl Gui {
    /// Static text.
    pub fn label(&mut self, text: &str) -> NodeId {
        let id = self.push_child(
            text,
            WidgetKind::Label {
                text: text.to_string(),
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Static text drawn grayed out, for fields currently absent from the
    /// store.
    pub fn disabled_label(&mut self, text: &str) -> NodeId {
        let id = self.label(text);
        self.nodes[id].flags |= NodeFlags::DISABLED;
        id
    }

    /// Read-only `label: value` text for values without an editor.
    pub fn value_label(&mut self, label: &str, value: impl std::fmt::Display) -> NodeId {
        let text = format!("{label}: {value}");
        let id = self.push_child(
            label,
            WidgetKind::Label { text },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Two-state checkbox.
    pub fn checkbox(&mut self, label: &str, binding: Binding<bool>) -> NodeId {
        let checked = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::Checkbox {
                label: label.to_string(),
                checked,
                binding,
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Open/closed arrow, used in collapsing headers.
    pub(crate) fn arrow_toggle(&mut self, key: &str, binding: Binding<bool>) -> NodeId {
        let open = binding.get();
        self.push_child(key, WidgetKind::ArrowToggle { open, binding })
    }

    /// Unbounded float editor.
    pub fn float_editor(&mut self, label: &str, binding: Binding<f32>) -> NodeId {
        let value = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::FloatEditor {
                label: label.to_string(),
                value,
                binding,
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Float editor over the inclusive range `min..=max`. The bounds are
    /// carried on the node for the host to enforce.
    pub fn bounded_float(
        &mut self,
        label: &str,
        min: f32,
        max: f32,
        binding: Binding<f32>,
    ) -> NodeId {
        let value = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::BoundedFloat {
                label: label.to_string(),
                value,
                min,
                max,
                binding,
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Int editor over the inclusive range `min..=max`.
    pub fn bounded_int(
        &mut self,
        label: &str,
        min: i32,
        max: i32,
        binding: Binding<i32>,
    ) -> NodeId {
        let value = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::BoundedInt {
                label: label.to_string(),
                value,
                min,
                max,
                binding,
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Int slider with a draggable thumb over `min..=max`.
    pub fn slider_int(
        &mut self,
        label: &str,
        min: i32,
        max: i32,
        binding: Binding<i32>,
    ) -> NodeId {
        let value = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::SliderInt {
                label: label.to_string(),
                value,
                min,
                max,
                binding,
            },
        );
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);
        id
    }

    /// Drop-down selector over `items`; the binding carries the selected
    /// index. While open, the frame also records a hovering overlay of
    /// selectable rows; picking one writes the index and closes the popup.
    pub fn combo(&mut self, label: &str, items: &[&str], binding: Binding<i32>) -> NodeId {
        let selected = binding.get();
        let id = self.push_child(
            label,
            WidgetKind::Combo {
                label: label.to_string(),
                items: items.iter().map(|s| s.to_string()).collect(),
                selected,
                open: false,
                open_binding: Binding::new(|| false, |_| {}),
            },
        );
        let guid = self.nodes[id].guid;
        let open = self.open_state(guid, false);
        let open_binding = self.open_binding(guid, false);
        if let WidgetKind::Combo {
            open: node_open,
            open_binding: node_binding,
            ..
        } = &mut self.nodes[id].kind
        {
            *node_open = open;
            *node_binding = open_binding;
        }
        self.nodes[id].style.margin = margin_all(WIDGET_MARGIN);

        if open {
            self.record_combo_popup(label, items, selected, guid, &binding);
        }
        id
    }

    /// The popup is its own root so the host draws it above the main tree;
    /// it carries no placement, the host anchors it to the combo control.
    fn record_combo_popup(
        &mut self,
        label: &str,
        items: &[&str],
        selected: i32,
        combo_guid: u64,
        binding: &Binding<i32>,
    ) {
        let popup_key = format!("{label}##popup");
        self.push_root(&popup_key, WidgetKind::Hovering);
        for (index, item) in items.iter().enumerate() {
            let index = index as i32;
            let select_binding = binding.clone();
            let states = self.open_states.clone();
            let select: Rc<dyn Fn()> = Rc::new(move || {
                select_binding.set(index);
                states.borrow_mut().insert(combo_guid, false);
            });
            self.push_child(
                item,
                WidgetKind::ComboItem {
                    label: item.to_string(),
                    index,
                    selected: index == selected,
                    select,
                },
            );
        }
        self.pop_root();
    }
}
