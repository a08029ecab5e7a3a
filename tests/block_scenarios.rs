//! End-to-end block scenarios: register, redraw, interact through
//! bindings, redraw again, and inspect the recorded tree.

use adaptive_gui::{BlockRegistry, Float3, Gui, NodeFlags, NodeId, WidgetKind};

/// Depth-first kind names under `id`, the node itself included.
fn kinds_under(gui: &Gui, id: NodeId) -> Vec<&'static str> {
    let mut out = vec![gui.node(id).kind.name()];
    for &child in gui.children(id) {
        out.extend(kinds_under(gui, child));
    }
    out
}

fn find_by_label(gui: &Gui, id: NodeId, label: &str) -> Option<NodeId> {
    if gui.node(id).label() == Some(label) {
        return Some(id);
    }
    gui.children(id)
        .iter()
        .find_map(|&child| find_by_label(gui, child, label))
}

/// A block with one optional override: while `freezeAmt` is absent the
/// layout shows a disabled placeholder, while present a bounded editor.
fn freeze_registry() -> BlockRegistry {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Freezable",
            |schema| {
                schema.declare("freezeAmt", 0.55f32)?;
                Ok(())
            },
            |gui, store| {
                gui.checkbox("override freezeAmt", store.presence_binding("freezeAmt")?);
                if store.has_value("freezeAmt")? {
                    gui.bounded_float("freezeAmt", 0.0, 1.0, store.binding("freezeAmt")?);
                } else {
                    gui.disabled_label("freezeAmt");
                }
                Ok(())
            },
        )
        .unwrap();
    registry
}

#[test]
fn optional_override_lifecycle() {
    let registry = freeze_registry();
    let store = registry.create_store("Freezable").unwrap();
    let mut gui = Gui::new();

    // Absent: placeholder only, drawn disabled.
    registry.redraw("Freezable", &mut gui, &store).unwrap();
    let placeholder = find_by_label(&gui, gui.main_root(), "freezeAmt").unwrap();
    assert_eq!(gui.node(placeholder).kind.name(), "label");
    assert!(gui.node(placeholder).flags.contains(NodeFlags::DISABLED));

    // Toggle the override on through the checkbox binding, as a click would.
    let toggle = find_by_label(&gui, gui.main_root(), "override freezeAmt").unwrap();
    match &gui.node(toggle).kind {
        WidgetKind::Checkbox { checked, binding, .. } => {
            assert!(!checked);
            binding.toggle();
        }
        other => panic!("expected checkbox, got {}", other.name()),
    }

    // Next redraw: the editor appears, showing the declared default.
    registry.redraw("Freezable", &mut gui, &store).unwrap();
    let editor = find_by_label(&gui, gui.main_root(), "freezeAmt").unwrap();
    match &gui.node(editor).kind {
        WidgetKind::BoundedFloat { value, binding, .. } => {
            assert_eq!(*value, 0.55, "enabling restores the declared default");
            binding.set(0.8);
        }
        other => panic!("expected bounded_float, got {}", other.name()),
    }

    registry.redraw("Freezable", &mut gui, &store).unwrap();
    let editor = find_by_label(&gui, gui.main_root(), "freezeAmt").unwrap();
    match &gui.node(editor).kind {
        WidgetKind::BoundedFloat { value, .. } => assert_eq!(*value, 0.8),
        other => panic!("expected bounded_float, got {}", other.name()),
    }

    // Toggle off then on again: the 0.8 edit is forgotten.
    store.remove_value("freezeAmt").unwrap();
    registry.redraw("Freezable", &mut gui, &store).unwrap();
    let toggle = find_by_label(&gui, gui.main_root(), "override freezeAmt").unwrap();
    if let WidgetKind::Checkbox { binding, .. } = &gui.node(toggle).kind {
        binding.toggle();
    }

    registry.redraw("Freezable", &mut gui, &store).unwrap();
    let editor = find_by_label(&gui, gui.main_root(), "freezeAmt").unwrap();
    match &gui.node(editor).kind {
        WidgetKind::BoundedFloat { value, .. } => {
            assert_eq!(*value, 0.55, "re-enable shows the default, not the old edit");
        }
        other => panic!("expected bounded_float, got {}", other.name()),
    }
}

/// A block whose combo selection swaps in a different subtree per option.
fn shape_registry() -> BlockRegistry {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Scatter",
            |schema| {
                schema
                    .declare("shape", 0i32)?
                    .declare("subdivisions", 2i32)?
                    .declare("radius", 1.0f32)?
                    .declare("height", 2.0f32)?;
                Ok(())
            },
            |gui, store| {
                gui.combo(
                    "shape",
                    &["Quads", "Spheres", "Cylinders"],
                    store.binding("shape")?,
                );
                match store.get_or_default::<i32>("shape")? {
                    0 => {
                        gui.bounded_int("subdivisions", 0, 8, store.binding("subdivisions")?);
                    }
                    1 => {
                        gui.bounded_float("radius", 0.0, 10.0, store.binding("radius")?);
                    }
                    _ => {
                        gui.bounded_float("radius", 0.0, 10.0, store.binding("radius")?);
                        gui.bounded_float("height", 0.0, 10.0, store.binding("height")?);
                    }
                }
                Ok(())
            },
        )
        .unwrap();
    registry
}

#[test]
fn combo_selection_swaps_subtree() {
    let registry = shape_registry();
    let store = registry.create_store("Scatter").unwrap();
    let mut gui = Gui::new();

    registry.redraw("Scatter", &mut gui, &store).unwrap();
    assert_eq!(
        kinds_under(&gui, gui.main_root()),
        ["root", "combo", "bounded_int"],
        "Quads shows the subdivisions editor"
    );

    store.set("shape", 1i32).unwrap();
    registry.redraw("Scatter", &mut gui, &store).unwrap();
    assert_eq!(
        kinds_under(&gui, gui.main_root()),
        ["root", "combo", "bounded_float"],
        "Spheres shows the radius editor"
    );

    store.set("shape", 2i32).unwrap();
    registry.redraw("Scatter", &mut gui, &store).unwrap();
    assert_eq!(
        kinds_under(&gui, gui.main_root()),
        ["root", "combo", "bounded_float", "bounded_float"],
        "Cylinders shows radius and height"
    );
}

#[test]
fn combo_popup_selection_closes_and_swaps() {
    let registry = shape_registry();
    let store = registry.create_store("Scatter").unwrap();
    let mut gui = Gui::new();

    registry.redraw("Scatter", &mut gui, &store).unwrap();
    let combo = find_by_label(&gui, gui.main_root(), "shape").unwrap();
    let guid = gui.node(combo).guid;

    // Open the popup, as pressing the combo would.
    gui.set_open(guid, true);
    registry.redraw("Scatter", &mut gui, &store).unwrap();
    assert_eq!(gui.roots().len(), 2, "open combo records its popup overlay");

    // Pick "Cylinders".
    let popup = gui.roots()[1];
    let row = gui
        .children(popup)
        .iter()
        .copied()
        .find(|&id| gui.node(id).label() == Some("Cylinders"))
        .unwrap();
    if let WidgetKind::ComboItem { select, .. } = &gui.node(row).kind {
        select();
    }

    registry.redraw("Scatter", &mut gui, &store).unwrap();
    assert_eq!(gui.roots().len(), 1, "popup closed after selection");
    assert_eq!(store.get_or_default::<i32>("shape").unwrap(), 2);
    assert_eq!(
        kinds_under(&gui, gui.main_root()),
        ["root", "combo", "bounded_float", "bounded_float"],
    );
}

#[test]
fn redraw_is_idempotent_for_unchanged_state() {
    let registry = shape_registry();
    let store = registry.create_store("Scatter").unwrap();
    store.set("shape", 2i32).unwrap();
    let mut gui = Gui::new();

    registry.redraw("Scatter", &mut gui, &store).unwrap();
    let first_kinds = kinds_under(&gui, gui.main_root());
    let first_guids: Vec<u64> = gui
        .children(gui.main_root())
        .iter()
        .map(|&id| gui.node(id).guid)
        .collect();
    let first_count = gui.widget_count();

    registry.redraw("Scatter", &mut gui, &store).unwrap();
    let second_guids: Vec<u64> = gui
        .children(gui.main_root())
        .iter()
        .map(|&id| gui.node(id).guid)
        .collect();

    assert_eq!(kinds_under(&gui, gui.main_root()), first_kinds);
    assert_eq!(second_guids, first_guids, "identity is stable across redraws");
    assert_eq!(gui.widget_count(), first_count);
}

#[test]
fn component_editors_edit_one_lane() {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Tinted",
            |schema| {
                schema.declare("tint", Float3::new(1.0, 1.0, 1.0))?;
                Ok(())
            },
            |gui, store| {
                let x = store.component_binding::<Float3>("tint", 0)?;
                let y = store.component_binding::<Float3>("tint", 1)?;
                let z = store.component_binding::<Float3>("tint", 2)?;
                gui.hidden_horizontal(|gui| {
                    gui.float_editor("r", x);
                    gui.float_editor("g", y);
                    gui.float_editor("b", z);
                });
                Ok(())
            },
        )
        .unwrap();

    let store = registry.create_store("Tinted").unwrap();
    let mut gui = Gui::new();
    registry.redraw("Tinted", &mut gui, &store).unwrap();

    let g = find_by_label(&gui, gui.main_root(), "g").unwrap();
    match &gui.node(g).kind {
        WidgetKind::FloatEditor { value, binding, .. } => {
            assert_eq!(*value, 1.0, "absent field shows the default component");
            binding.set(0.25);
        }
        other => panic!("expected float_editor, got {}", other.name()),
    }

    assert_eq!(
        store.get_or_default::<Float3>("tint").unwrap(),
        Float3::new(1.0, 0.25, 1.0),
        "only the edited lane changed"
    );

    registry.redraw("Tinted", &mut gui, &store).unwrap();
    let g = find_by_label(&gui, gui.main_root(), "g").unwrap();
    match &gui.node(g).kind {
        WidgetKind::FloatEditor { value, .. } => assert_eq!(*value, 0.25),
        other => panic!("expected float_editor, got {}", other.name()),
    }
}

#[test]
fn list_rows_stay_distinct_and_balanced() {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Layers",
            |schema| {
                schema.declare("count", 3i32)?;
                Ok(())
            },
            |gui, store| {
                let count = store.get_or_default::<i32>("count")?;
                for _ in 0..count {
                    gui.hidden_horizontal(|gui| {
                        gui.label("layer");
                    });
                }
                Ok(())
            },
        )
        .unwrap();

    let store = registry.create_store("Layers").unwrap();
    let mut gui = Gui::new();
    registry.redraw("Layers", &mut gui, &store).unwrap();

    let rows = gui.children(gui.main_root()).to_vec();
    assert_eq!(rows.len(), 3);
    let mut guids: Vec<u64> = rows.iter().map(|&id| gui.node(id).guid).collect();
    let before_dedup = guids.len();
    guids.sort_unstable();
    guids.dedup();
    assert_eq!(guids.len(), before_dedup, "repeated rows keep distinct guids");
    assert_eq!(gui.scope_balance(), (3, 3));

    // Fewer rows next frame, still balanced.
    store.set("count", 1i32).unwrap();
    registry.redraw("Layers", &mut gui, &store).unwrap();
    assert_eq!(gui.children(gui.main_root()).len(), 1);
    assert_eq!(gui.scope_balance(), (1, 1));
}

#[test]
fn unbalanced_layout_fails_the_redraw() {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Leaky",
            |schema| {
                schema.declare("on", false)?;
                Ok(())
            },
            |gui, _store| {
                gui.begin_group("settings");
                // missing end_group
                Ok(())
            },
        )
        .unwrap();

    let store = registry.create_store("Leaky").unwrap();
    let mut gui = Gui::new();
    let err = registry.redraw("Leaky", &mut gui, &store).unwrap_err();
    assert_eq!(
        err,
        adaptive_gui::Error::UnbalancedScope {
            opened: 1,
            closed: 0
        }
    );
}

#[test]
fn collapsing_section_toggles_presence_of_content() {
    let mut registry = BlockRegistry::new();
    registry
        .register(
            "Material",
            |schema| {
                schema.declare("roughness", 0.4f32)?;
                Ok(())
            },
            |gui, store| {
                let roughness = store.binding("roughness")?;
                gui.collapsing("Advanced", |gui| {
                    gui.bounded_float("roughness", 0.0, 1.0, roughness);
                });
                Ok(())
            },
        )
        .unwrap();

    let store = registry.create_store("Material").unwrap();
    let mut gui = Gui::new();

    registry.redraw("Material", &mut gui, &store).unwrap();
    assert!(
        find_by_label(&gui, gui.main_root(), "roughness").is_none(),
        "closed section records no content"
    );

    let section = gui.children(gui.main_root())[0];
    let guid = gui.node(section).guid;
    gui.set_open(guid, true);

    registry.redraw("Material", &mut gui, &store).unwrap();
    assert!(find_by_label(&gui, gui.main_root(), "roughness").is_some());
}
