//! Store - the mutable key/value state of one block instance.
//!
//! A [`DataStore`] holds the current values for one instance of a declared
//! block. Absence of an entry is meaningful and distinct from a zero or
//! default value: it is what drives "enabled/disabled" widget state. All
//! mutation goes through typed accessors validated against the owning
//! schema at every call, and every write lands immediately - layout logic
//! relies on reading back a value it just set within the same redraw.
//!
//! One store per block instance, never shared across instances. The handle
//! is `Rc`-backed (clone-cheap) so binding closures can capture it; this is
//! single-threaded shared ownership, not thread safety.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::binding::Binding;
use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::types::{FieldValue, Value, VectorValue};

/// Mutable typed key/value state for one block instance.
#[derive(Clone, Debug)]
pub struct DataStore {
    schema: Rc<Schema>,
    values: Rc<RefCell<HashMap<String, Value>>>,
}

impl DataStore {
    /// Create an empty store for the given schema.
    ///
    /// Empty means *no* field has a value yet - reads fall back to declared
    /// defaults and `has_value` answers false everywhere.
    pub fn new(schema: Rc<Schema>) -> Self {
        Self {
            schema,
            values: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// The schema this store conforms to.
    pub fn schema(&self) -> &Rc<Schema> {
        &self.schema
    }

    // =========================================================================
    // Typed Accessors
    // =========================================================================

    /// Read a field's value, falling back to its declared default when the
    /// field has no value.
    pub fn get_or_default<T: FieldValue>(&self, name: &str) -> Result<T> {
        let field = self.schema.typed_field::<T>(name)?;
        let values = self.values.borrow();
        let raw = values.get(name).unwrap_or(field.default_value());
        T::from_value(raw).ok_or_else(|| Error::TypeMismatch {
            name: name.to_string(),
            declared: raw.kind(),
            requested: T::KIND,
        })
    }

    /// Write a field's value. Write-through: a `get_or_default` later in the
    /// same redraw observes it.
    pub fn set<T: FieldValue>(&self, name: &str, value: T) -> Result<()> {
        self.schema.typed_field::<T>(name)?;
        self.values
            .borrow_mut()
            .insert(name.to_string(), value.into_value());
        Ok(())
    }

    /// Whether the field currently holds a value (as opposed to falling
    /// back to its default on read).
    pub fn has_value(&self, name: &str) -> Result<bool> {
        self.schema.field_checked(name)?;
        Ok(self.values.borrow().contains_key(name))
    }

    /// Remove the field's value entirely. The prior value is discarded, not
    /// remembered: a later enable restores the declared default.
    pub fn remove_value(&self, name: &str) -> Result<()> {
        self.schema.field_checked(name)?;
        self.values.borrow_mut().remove(name);
        Ok(())
    }

    // =========================================================================
    // Bindings
    // =========================================================================

    /// Build a typed two-way binding over `name`.
    ///
    /// The field name and kind are validated here, once, so the returned
    /// closures are infallible; they re-read the store on every call and
    /// cache nothing across redraws.
    pub fn binding<T: FieldValue>(&self, name: &str) -> Result<Binding<T>> {
        let field = self.schema.typed_field::<T>(name)?;
        let fallback = typed_default::<T>(name, field.default_value())?;

        let key = name.to_string();
        let values = self.values.clone();
        let get = move || {
            values
                .borrow()
                .get(&key)
                .and_then(T::from_value)
                .unwrap_or_else(|| fallback.clone())
        };

        let key = name.to_string();
        let values = self.values.clone();
        let set = move |value: T| {
            values.borrow_mut().insert(key.clone(), value.into_value());
        };

        Ok(Binding::new(get, set))
    }

    /// Build a binding over the *presence* of `name`.
    ///
    /// Getter answers `has_value`. Setting `true` gives the field a value -
    /// its current one if present (a no-op), otherwise the declared default.
    /// Setting `false` removes the entry entirely rather than zeroing it,
    /// preserving the unset-versus-zero distinction.
    pub fn presence_binding(&self, name: &str) -> Result<Binding<bool>> {
        let field = self.schema.field_checked(name)?;
        let default = field.default_value().clone();

        let key = name.to_string();
        let values = self.values.clone();
        let get = move || values.borrow().contains_key(&key);

        let key = name.to_string();
        let values = self.values.clone();
        let set = move |enable: bool| {
            let mut values = values.borrow_mut();
            if enable {
                values.entry(key.clone()).or_insert_with(|| default.clone());
            } else {
                values.remove(&key);
            }
        };

        Ok(Binding::new(get, set))
    }

    /// Build an `f32` binding over one component of a vector field.
    ///
    /// The getter reads component `component`; the setter reads the full
    /// current vector, replaces that component and writes the whole vector
    /// back, leaving the other components untouched. Single-threaded per
    /// redraw, so the read-modify-write is atomic from the store's view.
    ///
    /// # Panics
    /// Panics if `component >= V::COMPONENTS`; the component index is part
    /// of the block's source, not runtime data.
    pub fn component_binding<V: VectorValue>(
        &self,
        name: &str,
        component: usize,
    ) -> Result<Binding<f32>> {
        assert!(
            component < V::COMPONENTS,
            "component index {component} out of range for a {}-component field",
            V::COMPONENTS
        );
        let field = self.schema.typed_field::<V>(name)?;
        let fallback = typed_default::<V>(name, field.default_value())?;

        let key = name.to_string();
        let values = self.values.clone();
        let read_fallback = fallback;
        let read_vector = move |values: &RefCell<HashMap<String, Value>>, key: &str| -> V {
            values
                .borrow()
                .get(key)
                .and_then(V::from_value)
                .unwrap_or(read_fallback)
        };

        let get_values = values.clone();
        let get_key = key.clone();
        let read = read_vector.clone();
        let get = move || read(&get_values, &get_key).component(component);

        let set = move |value: f32| {
            let mut vector = read_vector(&values, &key);
            vector.set_component(component, value);
            values.borrow_mut().insert(key.clone(), vector.into_value());
        };

        Ok(Binding::new(get, set))
    }
}

/// Convert a field's declared default into `T`, which always succeeds after
/// kind validation; kept as a checked conversion rather than an unwrap.
fn typed_default<T: FieldValue>(name: &str, default: &Value) -> Result<T> {
    T::from_value(default).ok_or_else(|| Error::TypeMismatch {
        name: name.to_string(),
        declared: default.kind(),
        requested: T::KIND,
    })
}
