//! Block registry.
//!
//! A block type is registered once, by name, with two callbacks: a
//! declaration callback that runs immediately against a
//! [`SchemaBuilder`], and a layout callback kept for the block's lifetime
//! and re-run on every redraw. Stores are created per instance from the
//! registered schema, so a failing redraw of one instance never touches
//! another's data.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::gui::Gui;
use crate::schema::{Schema, SchemaBuilder};
use crate::store::DataStore;

type LayoutFn = Box<dyn Fn(&mut Gui, &DataStore) -> Result<()>>;

struct Block {
    schema: Rc<Schema>,
    layout: LayoutFn,
}

/// Name-keyed collection of registered block types.
#[derive(Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, Block>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block type. `declare` runs now and fixes the schema;
    /// `layout` runs on every redraw of an instance of this block.
    ///
    /// Registering a name twice fails with [`Error::DuplicateBlockName`]
    /// and leaves the first registration in place.
    pub fn register(
        &mut self,
        name: &str,
        declare: impl FnOnce(&mut SchemaBuilder) -> Result<()>,
        layout: impl Fn(&mut Gui, &DataStore) -> Result<()> + 'static,
    ) -> Result<()> {
        if self.blocks.contains_key(name) {
            return Err(Error::DuplicateBlockName {
                name: name.to_string(),
            });
        }
        let mut builder = SchemaBuilder::new(name);
        declare(&mut builder)?;
        let schema = Rc::new(builder.build());
        tracing::debug!(block = name, fields = schema.len(), "registered block");
        self.blocks.insert(
            name.to_string(),
            Block {
                schema,
                layout: Box::new(layout),
            },
        );
        Ok(())
    }

    /// Schema of a registered block.
    pub fn schema(&self, name: &str) -> Result<Rc<Schema>> {
        self.blocks
            .get(name)
            .map(|block| block.schema.clone())
            .ok_or_else(|| Error::UnknownBlock {
                name: name.to_string(),
            })
    }

    /// Create an empty per-instance store for a registered block. Absent
    /// fields read as their declared defaults until written.
    pub fn create_store(&self, name: &str) -> Result<DataStore> {
        Ok(DataStore::new(self.schema(name)?))
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Run one full redraw of a block instance: begin a frame, replay the
    /// block's layout against the store, end the frame. On failure the
    /// frame is abandoned; the store is untouched beyond any writes the
    /// layout already made.
    pub fn redraw(&self, name: &str, gui: &mut Gui, store: &DataStore) -> Result<()> {
        let block = self.blocks.get(name).ok_or_else(|| Error::UnknownBlock {
            name: name.to_string(),
        })?;
        gui.begin_frame();
        let result = (block.layout)(gui, store).and_then(|_| gui.end_frame());
        if let Err(err) = &result {
            tracing::error!(block = name, error = %err, "redraw failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn sprinkle_registry() -> BlockRegistry {
        let mut registry = BlockRegistry::new();
        registry
            .register(
                "Sprinkle",
                |schema| {
                    schema.declare("radius", 1.0f32)?.declare("count", 8i32)?;
                    Ok(())
                },
                |gui, store| {
                    gui.float_editor("radius", store.binding("radius")?);
                    gui.bounded_int("count", 0, 64, store.binding("count")?);
                    Ok(())
                },
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_register_and_redraw() {
        let registry = sprinkle_registry();
        let store = registry.create_store("Sprinkle").unwrap();
        let mut gui = Gui::new();

        registry.redraw("Sprinkle", &mut gui, &store).unwrap();
        assert_eq!(gui.widget_count(), 3, "root plus two editors");
    }

    #[test]
    fn test_duplicate_block_name_rejected() {
        let mut registry = sprinkle_registry();
        let err = registry
            .register("Sprinkle", |_| Ok(()), |_, _| Ok(()))
            .unwrap_err();

        assert_eq!(
            err,
            Error::DuplicateBlockName {
                name: "Sprinkle".into()
            }
        );
        assert_eq!(
            registry.schema("Sprinkle").unwrap().len(),
            2,
            "first registration kept"
        );
    }

    #[test]
    fn test_failed_declaration_not_registered() {
        let mut registry = BlockRegistry::new();
        let err = registry
            .register(
                "Broken",
                |schema| {
                    schema.declare("size", 1.0f32)?.declare("size", 2.0f32)?;
                    Ok(())
                },
                |_, _| Ok(()),
            )
            .unwrap_err();

        assert_eq!(err, Error::DuplicateField { name: "size".into() });
        assert!(!registry.is_registered("Broken"));
    }

    #[test]
    fn test_unknown_block() {
        let registry = BlockRegistry::new();
        let mut gui = Gui::new();
        let store_err = registry.create_store("Missing").unwrap_err();
        assert_eq!(
            store_err,
            Error::UnknownBlock {
                name: "Missing".into()
            }
        );

        let schema = sprinkle_registry().schema("Sprinkle").unwrap();
        let store = DataStore::new(schema);
        let redraw_err = registry.redraw("Missing", &mut gui, &store).unwrap_err();
        assert_eq!(
            redraw_err,
            Error::UnknownBlock {
                name: "Missing".into()
            }
        );
    }

    #[test]
    fn test_schema_lookup() {
        let registry = sprinkle_registry();
        let schema = registry.schema("Sprinkle").unwrap();
        assert_eq!(schema.field("radius").unwrap().kind(), FieldKind::Float);
    }

    #[test]
    fn test_failing_layout_surfaces_error_and_isolates_stores() {
        let mut registry = sprinkle_registry();
        registry
            .register(
                "Faulty",
                |schema| {
                    schema.declare("level", 0i32)?;
                    Ok(())
                },
                |gui, store| {
                    gui.bounded_int("level", 0, 10, store.binding("level")?);
                    // Asks for a field the schema never declared.
                    store.get_or_default::<f32>("ghost")?;
                    Ok(())
                },
            )
            .unwrap();

        let mut gui = Gui::new();
        let faulty_store = registry.create_store("Faulty").unwrap();
        let err = registry.redraw("Faulty", &mut gui, &faulty_store).unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));

        // Another block's instance is unaffected.
        let store = registry.create_store("Sprinkle").unwrap();
        store.set("radius", 2.5f32).unwrap();
        registry.redraw("Sprinkle", &mut gui, &store).unwrap();
        assert_eq!(store.get_or_default::<f32>("radius").unwrap(), 2.5);
    }
}
