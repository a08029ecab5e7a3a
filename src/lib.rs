//! # adaptive-gui
//!
//! Schema-declared data blocks with immediate-mode reactive layout.
//!
//! A *block* is a named unit of editable data. Registering one fixes its
//! schema (typed fields with defaults and optional host-facing aliases)
//! and supplies a layout function that is replayed from scratch on every
//! redraw, recording a widget tree from the block's current store state.
//! Because nothing is cached between frames, the tree always reflects the
//! store: edit a value, redraw, and the new tree shows it.
//!
//! ## Architecture
//!
//! - **Schema** ([`SchemaBuilder`], [`Schema`]): declared once per block
//!   type, immutable afterwards. Field kinds are inferred from defaults.
//! - **Store** ([`DataStore`]): per-instance sparse key/value storage over
//!   a schema. Absent fields read as their declared defaults; presence
//!   itself is editable, which is how optional overrides work.
//! - **Bindings** ([`Binding`]): uncached getter/setter pairs connecting
//!   widgets to store fields, recreated each redraw.
//! - **Gui** ([`Gui`]): the immediate-mode recorder. Leaf widgets snapshot
//!   their value at emission; scoped containers (groups, collapsing
//!   sections, hovering overlays, horizontal rows) shape the tree and are
//!   balance-checked at end of frame. Layout hints ride on each node as a
//!   `taffy::Style` for the host's flexbox pass.
//! - **Registry** ([`BlockRegistry`]): name-keyed block types, store
//!   creation, and the redraw entry point.
//!
//! ## Example
//!
//! ```
//! use adaptive_gui::{BlockRegistry, Gui};
//!
//! let mut registry = BlockRegistry::new();
//! registry.register(
//!     "Sprinkle",
//!     |schema| {
//!         schema.declare("radius", 1.0f32)?
//!             .declare("wireframe", false)?;
//!         Ok(())
//!     },
//!     |gui, store| {
//!         let wireframe = store.binding("wireframe")?;
//!         let radius = store.binding("radius")?;
//!         gui.group("Sprinkle", |gui| {
//!             gui.checkbox("wireframe", wireframe);
//!             gui.bounded_float("radius", 0.0, 10.0, radius);
//!         });
//!         Ok(())
//!     },
//! )?;
//!
//! let store = registry.create_store("Sprinkle")?;
//! let mut gui = Gui::new();
//! registry.redraw("Sprinkle", &mut gui, &store)?;
//! # Ok::<(), adaptive_gui::Error>(())
//! ```

pub mod binding;
pub mod error;
pub mod gui;
pub mod registry;
pub mod schema;
pub mod store;
pub mod types;

pub use binding::Binding;
pub use error::{Error, Result};
pub use gui::{Gui, NodeFlags, NodeId, RootPlacement, Section, WidgetKind, WidgetNode};
pub use registry::BlockRegistry;
pub use schema::{Field, Schema, SchemaBuilder};
pub use store::DataStore;
pub use types::{FieldKind, FieldValue, Float2, Float3, Float4, Value, VectorValue};
