//! Error taxonomy.
//!
//! Everything here is a programming error on the block author's or host's
//! side: surfaced immediately, never retried. A failing redraw is abandoned
//! for that frame; per-instance store isolation keeps other blocks intact.

use crate::types::FieldKind;

/// Errors surfaced by schema declaration, store access, registration and
/// end-of-frame scope checking.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("field `{name}` is already declared")]
    DuplicateField { name: String },

    #[error("block `{name}` is already registered")]
    DuplicateBlockName { name: String },

    #[error("no block named `{name}` is registered")]
    UnknownBlock { name: String },

    #[error("schema `{schema}` has no field `{name}`")]
    UnknownField { schema: String, name: String },

    #[error("field `{name}` is declared as {declared:?} but was accessed as {requested:?}")]
    TypeMismatch {
        name: String,
        declared: FieldKind,
        requested: FieldKind,
    },

    #[error("widget scopes unbalanced at end of redraw: {opened} opened, {closed} closed")]
    UnbalancedScope { opened: usize, closed: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
