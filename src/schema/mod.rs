//! Schema - the declared, immutable shape of one block type.
//!
//! A block's registration callback receives a [`SchemaBuilder`] exactly once
//! and declares every persisted field: name, kind (inferred from the default
//! value), default, and optionally the host-side native property name the
//! field aliases. No widget or layout logic runs during declaration; the
//! schema only describes shape.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{FieldKind, FieldValue, Value};

// =============================================================================
// Field
// =============================================================================

/// One declared field: name, kind, default, optional external alias.
///
/// The kind is fixed for the field's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    default: Value,
    external_alias: Option<String>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The declared default, returned by reads of an absent field and
    /// restored by a toggle-on after a toggle-off.
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Host-side native property this field maps to, when the persisted
    /// storage key differs from the host-facing name.
    pub fn external_alias(&self) -> Option<&str> {
        self.external_alias.as_deref()
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Ordered, immutable field collection for one block type.
///
/// Field order is declaration order; lookups go through a name index built
/// once at registration.
#[derive(Debug)]
pub struct Schema {
    block_name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    /// The block name this schema was registered under.
    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    /// All fields, in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Look up a field by name, failing fast on unknown names.
    pub(crate) fn field_checked(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| Error::UnknownField {
            schema: self.block_name.clone(),
            name: name.to_string(),
        })
    }

    /// Validate a typed access of `name` as `T`, returning the field.
    pub(crate) fn typed_field<T: FieldValue>(&self, name: &str) -> Result<&Field> {
        let field = self.field_checked(name)?;
        if field.kind() != T::KIND {
            return Err(Error::TypeMismatch {
                name: name.to_string(),
                declared: field.kind(),
                requested: T::KIND,
            });
        }
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// Schema Builder
// =============================================================================

/// Collects field declarations during a block's registration callback.
#[derive(Debug)]
pub struct SchemaBuilder {
    block_name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
}

impl SchemaBuilder {
    pub(crate) fn new(block_name: &str) -> Self {
        Self {
            block_name: block_name.to_string(),
            fields: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Declare a field. The kind is inferred from the default value's type.
    ///
    /// Declaring the same name twice fails with
    /// [`Error::DuplicateField`].
    pub fn declare<T: FieldValue>(&mut self, name: &str, default: T) -> Result<&mut Self> {
        self.push_field(name, default.into_value(), None)
    }

    /// Declare a field whose persisted storage key differs from its
    /// host-facing native property name.
    pub fn declare_aliased<T: FieldValue>(
        &mut self,
        name: &str,
        default: T,
        alias: &str,
    ) -> Result<&mut Self> {
        self.push_field(name, default.into_value(), Some(alias.to_string()))
    }

    fn push_field(
        &mut self,
        name: &str,
        default: Value,
        external_alias: Option<String>,
    ) -> Result<&mut Self> {
        if self.by_name.contains_key(name) {
            return Err(Error::DuplicateField {
                name: name.to_string(),
            });
        }
        self.by_name.insert(name.to_string(), self.fields.len());
        self.fields.push(Field {
            name: name.to_string(),
            kind: default.kind(),
            default,
            external_alias,
        });
        Ok(self)
    }

    pub(crate) fn build(self) -> Schema {
        Schema {
            block_name: self.block_name,
            fields: self.fields,
            by_name: self.by_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Float3;

    #[test]
    fn test_declaration_order_preserved() {
        let mut builder = SchemaBuilder::new("test");
        builder
            .declare("alpha", 1.0f32)
            .unwrap()
            .declare("beta", 2i32)
            .unwrap()
            .declare("gamma", true)
            .unwrap();
        let schema = builder.build();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"], "insertion order, not sorted");
    }

    #[test]
    fn test_kind_inferred_from_default() {
        let mut builder = SchemaBuilder::new("test");
        builder.declare("color", Float3::new(1.0, 0.5, 0.0)).unwrap();
        let schema = builder.build();

        assert_eq!(schema.field("color").unwrap().kind(), FieldKind::Float3);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut builder = SchemaBuilder::new("test");
        builder.declare("size", 1.0f32).unwrap();
        let err = builder.declare("size", 2.0f32).unwrap_err();

        assert_eq!(
            err,
            Error::DuplicateField {
                name: "size".into()
            }
        );
    }

    #[test]
    fn test_external_alias() {
        let mut builder = SchemaBuilder::new("test");
        builder
            .declare_aliased("diffuse", Float3::default(), "DiffuseColor")
            .unwrap();
        let schema = builder.build();

        assert_eq!(
            schema.field("diffuse").unwrap().external_alias(),
            Some("DiffuseColor")
        );
        assert_eq!(schema.field("diffuse").unwrap().name(), "diffuse");
    }

    #[test]
    fn test_unknown_field_lookup() {
        let schema = SchemaBuilder::new("sprinkle").build();
        let err = schema.field_checked("missing").unwrap_err();

        assert_eq!(
            err,
            Error::UnknownField {
                schema: "sprinkle".into(),
                name: "missing".into()
            }
        );
    }

    #[test]
    fn test_typed_field_kind_mismatch() {
        let mut builder = SchemaBuilder::new("test");
        builder.declare("count", 3i32).unwrap();
        let schema = builder.build();

        let err = schema.typed_field::<f32>("count").unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                name: "count".into(),
                declared: FieldKind::Int,
                requested: FieldKind::Float,
            }
        );
    }
}
