//! Core types - field kinds, tagged values, and small vector payloads.
//!
//! Every persisted field is one of seven kinds. Values travel through the
//! store as the [`Value`] tagged union; typed access goes through the
//! [`FieldValue`] conversion trait so accessors can check the declared kind
//! against the requested Rust type at the boundary.

// =============================================================================
// Field Kind
// =============================================================================

/// The type tag of a declared field. Fixed for the field's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Float,
    Float2,
    Float3,
    Float4,
    String,
}

impl FieldKind {
    /// The zero/empty value for this kind.
    ///
    /// Used when a field is enabled without a declared default and when a
    /// typed read needs a fallback of the right shape.
    pub fn zero_value(self) -> Value {
        match self {
            FieldKind::Bool => Value::Bool(false),
            FieldKind::Int => Value::Int(0),
            FieldKind::Float => Value::Float(0.0),
            FieldKind::Float2 => Value::Float2(Float2::default()),
            FieldKind::Float3 => Value::Float3(Float3::default()),
            FieldKind::Float4 => Value::Float4(Float4::default()),
            FieldKind::String => Value::String(String::new()),
        }
    }
}

// =============================================================================
// Vector Payloads
// =============================================================================

/// Two-component value (e.g. a UV offset).
///
/// These are data-model payloads, not a math library - the host's vector
/// types live on the host side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

/// Three-component value (e.g. a position or color).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Four-component value (e.g. a color with alpha).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Float4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Float2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Float3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Float4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Component-wise access for the vector kinds.
///
/// Component editors read one lane and write the whole vector back with the
/// other lanes untouched; this trait is the seam that makes that generic.
pub trait VectorValue: FieldValue + Copy {
    /// Number of components (2, 3 or 4).
    const COMPONENTS: usize;

    /// Read component `index`.
    ///
    /// # Panics
    /// Panics if `index >= Self::COMPONENTS`. Component indices come from
    /// block authors and are validated when a component binding is built.
    fn component(&self, index: usize) -> f32;

    /// Replace component `index`, leaving the others untouched.
    ///
    /// # Panics
    /// Panics if `index >= Self::COMPONENTS`.
    fn set_component(&mut self, index: usize, value: f32);
}

impl VectorValue for Float2 {
    const COMPONENTS: usize = 2;

    fn component(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => panic!("Float2 component index out of range: {index}"),
        }
    }

    fn set_component(&mut self, index: usize, value: f32) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => panic!("Float2 component index out of range: {index}"),
        }
    }
}

impl VectorValue for Float3 {
    const COMPONENTS: usize = 3;

    fn component(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("Float3 component index out of range: {index}"),
        }
    }

    fn set_component(&mut self, index: usize, value: f32) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => panic!("Float3 component index out of range: {index}"),
        }
    }
}

impl VectorValue for Float4 {
    const COMPONENTS: usize = 4;

    fn component(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            3 => self.w,
            _ => panic!("Float4 component index out of range: {index}"),
        }
    }

    fn set_component(&mut self, index: usize, value: f32) {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => panic!("Float4 component index out of range: {index}"),
        }
    }
}

// =============================================================================
// Tagged Value
// =============================================================================

/// A stored field value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Float(f32),
    Float2(Float2),
    Float3(Float3),
    Float4(Float4),
    String(String),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Bool(_) => FieldKind::Bool,
            Value::Int(_) => FieldKind::Int,
            Value::Float(_) => FieldKind::Float,
            Value::Float2(_) => FieldKind::Float2,
            Value::Float3(_) => FieldKind::Float3,
            Value::Float4(_) => FieldKind::Float4,
            Value::String(_) => FieldKind::String,
        }
    }
}

// =============================================================================
// Typed Conversion
// =============================================================================

/// Conversion between a Rust value type and its [`Value`] representation.
///
/// Implemented for exactly the seven storable types. Accessors use
/// `T::KIND` to validate a typed read/write against the declared field kind
/// before touching the store.
pub trait FieldValue: Clone + 'static {
    /// The kind tag this type maps to.
    const KIND: FieldKind;

    /// Wrap into the tagged union.
    fn into_value(self) -> Value;

    /// Unwrap from the tagged union; `None` on a kind mismatch.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Float2 {
    const KIND: FieldKind = FieldKind::Float2;

    fn into_value(self) -> Value {
        Value::Float2(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float2(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Float3 {
    const KIND: FieldKind = FieldKind::Float3;

    fn into_value(self) -> Value {
        Value::Float3(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float3(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for Float4 {
    const KIND: FieldKind = FieldKind::Float4;

    fn into_value(self) -> Value {
        Value::Float4(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float4(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.clone()),
            _ => None,
        }
    }
}
