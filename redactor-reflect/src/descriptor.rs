//! Schema descriptors for dynamic messages.
//!
//! This module provides the read-only schema side of the crate:
//!
//! - [`MessageDescriptor`]: a named message type and its fields
//! - [`FieldDescriptor`]: one field's number, name, kind, and cardinality
//! - [`Kind`] / [`Cardinality`]: what a field holds and how many
//! - [`ExtensionId`] / [`ExtensionValue`]: caller-defined metadata attached
//!   to a field descriptor
//!
//! Descriptors are immutable once built. [`MessageDescriptor`] is a cheap
//! handle over shared storage, so cloning one never copies the schema.

use std::{borrow::Cow, collections::BTreeMap, fmt, sync::Arc};

use crate::{
    error::ReflectError,
    message::DynamicMessage,
    value::{ListValue, MapValue, Value},
};

// =============================================================================
// Kind / Cardinality
// =============================================================================

/// The kind of value a field holds.
///
/// For list fields this is the element kind; for map fields it is the kind of
/// the map's values (map keys are constrained separately, see
/// [`MapKey`](crate::MapKey)).
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// A boolean.
    Bool,
    /// A signed 64-bit integer.
    I64,
    /// An unsigned 64-bit integer.
    U64,
    /// A 64-bit float.
    F64,
    /// A UTF-8 string.
    String,
    /// An opaque byte string.
    Bytes,
    /// A nested message of the given type.
    Message(MessageDescriptor),
}

impl Kind {
    /// Returns a short lowercase name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I64 => "i64",
            Kind::U64 => "u64",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Bytes => "bytes",
            Kind::Message(_) => "message",
        }
    }

    /// Returns the zero value for this kind.
    ///
    /// Nested message kinds yield an empty message of the declared type.
    pub fn default_value(&self) -> Value {
        match self {
            Kind::Bool => Value::Bool(false),
            Kind::I64 => Value::I64(0),
            Kind::U64 => Value::U64(0),
            Kind::F64 => Value::F64(0.0),
            Kind::String => Value::String(String::new()),
            Kind::Bytes => Value::Bytes(Vec::new()),
            Kind::Message(descriptor) => Value::Message(DynamicMessage::new(descriptor.clone())),
        }
    }
}

/// How many values a field holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one value of the field's kind.
    Singular,
    /// An ordered list of values of the field's kind.
    List,
    /// A keyed map whose values are of the field's kind.
    Map,
}

impl Cardinality {
    /// Returns a short lowercase name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Cardinality::Singular => "singular",
            Cardinality::List => "list",
            Cardinality::Map => "map",
        }
    }
}

// =============================================================================
// ExtensionId / ExtensionValue
// =============================================================================

/// Opaque identifier under which callers attach metadata to a field.
///
/// Identifiers are plain strings compared by value. Library-level identifiers
/// are usually declared once as a constant:
///
/// ```
/// use redactor_reflect::ExtensionId;
///
/// const SENSITIVE: ExtensionId = ExtensionId::from_static("acme.sensitive");
/// assert_eq!(SENSITIVE.as_str(), "acme.sensitive");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionId(Cow<'static, str>);

impl ExtensionId {
    /// Creates an identifier from a static string without allocating.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates an identifier from an owned or borrowed string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata payload attached to a field descriptor under an [`ExtensionId`].
///
/// The shape is deliberately small: a marker flag, free-form text, a list of
/// strings, or a named record of further payloads. Consumers interpret the
/// payload themselves; descriptors only store it.
#[derive(Clone, Debug, PartialEq)]
pub enum ExtensionValue {
    /// A boolean marker.
    Bool(bool),
    /// Free-form text.
    String(String),
    /// A list of strings.
    StringList(Vec<String>),
    /// A named record of nested payloads.
    Record(BTreeMap<String, ExtensionValue>),
}

impl ExtensionValue {
    /// Returns the payload as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExtensionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the payload as text, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtensionValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the payload as a string list, if it is one.
    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            ExtensionValue::StringList(values) => Some(values),
            _ => None,
        }
    }

    /// Looks up an entry of a record payload by name.
    ///
    /// Returns `None` for non-record payloads and missing names.
    pub fn get(&self, name: &str) -> Option<&ExtensionValue> {
        match self {
            ExtensionValue::Record(entries) => entries.get(name),
            _ => None,
        }
    }
}

impl From<bool> for ExtensionValue {
    fn from(value: bool) -> Self {
        ExtensionValue::Bool(value)
    }
}

impl From<&str> for ExtensionValue {
    fn from(value: &str) -> Self {
        ExtensionValue::String(value.to_string())
    }
}

impl From<String> for ExtensionValue {
    fn from(value: String) -> Self {
        ExtensionValue::String(value)
    }
}

impl From<Vec<String>> for ExtensionValue {
    fn from(values: Vec<String>) -> Self {
        ExtensionValue::StringList(values)
    }
}

// =============================================================================
// FieldDescriptor
// =============================================================================

/// Immutable schema metadata for one field of a message type.
///
/// A field is identified by its number within the message; the name exists for
/// human-facing lookups and diagnostics. Extension metadata rides along on the
/// descriptor and is never interpreted by this crate.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    number: u32,
    name: String,
    kind: Kind,
    cardinality: Cardinality,
    extensions: BTreeMap<ExtensionId, ExtensionValue>,
}

impl FieldDescriptor {
    /// Creates a singular field of the given kind.
    pub fn new(number: u32, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            number,
            name: name.into(),
            kind,
            cardinality: Cardinality::Singular,
            extensions: BTreeMap::new(),
        }
    }

    /// Creates a list field whose elements are of the given kind.
    pub fn list(number: u32, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            cardinality: Cardinality::List,
            ..Self::new(number, name, kind)
        }
    }

    /// Creates a map field whose values are of the given kind.
    pub fn map(number: u32, name: impl Into<String>, value_kind: Kind) -> Self {
        Self {
            cardinality: Cardinality::Map,
            ..Self::new(number, name, value_kind)
        }
    }

    /// Attaches an extension payload under the given identifier.
    ///
    /// Attaching under an identifier that is already present replaces the
    /// previous payload.
    #[must_use]
    pub fn with_extension(mut self, id: ExtensionId, value: impl Into<ExtensionValue>) -> Self {
        self.extensions.insert(id, value.into());
        self
    }

    /// Returns the field number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of value this field holds.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the field's cardinality.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Returns `true` if this is a list field.
    pub fn is_list(&self) -> bool {
        self.cardinality == Cardinality::List
    }

    /// Returns `true` if this is a map field.
    pub fn is_map(&self) -> bool {
        self.cardinality == Cardinality::Map
    }

    /// Returns `true` if an extension payload is attached under `id`.
    pub fn has_extension(&self, id: &ExtensionId) -> bool {
        self.extensions.contains_key(id)
    }

    /// Returns the extension payload attached under `id`, if any.
    pub fn extension(&self, id: &ExtensionId) -> Option<&ExtensionValue> {
        self.extensions.get(id)
    }

    /// Returns the zero value for this field.
    ///
    /// Singular fields yield their kind's zero value; list and map fields
    /// yield an empty list or map.
    pub fn default_value(&self) -> Value {
        match self.cardinality {
            Cardinality::Singular => self.kind.default_value(),
            Cardinality::List => Value::List(ListValue::new()),
            Cardinality::Map => Value::Map(MapValue::new()),
        }
    }
}

// =============================================================================
// MessageDescriptor
// =============================================================================

#[derive(Debug)]
struct DescriptorInner {
    name: String,
    fields: BTreeMap<u32, FieldDescriptor>,
    numbers_by_name: BTreeMap<String, u32>,
}

/// A named message type: the schema for a [`DynamicMessage`].
///
/// Built once via [`MessageDescriptor::builder`] and shared from there on.
/// The handle is a thin reference; cloning it is cheap and every clone
/// describes the same type.
///
/// Two descriptors compare equal when they describe the same type name.
#[derive(Clone, Debug)]
pub struct MessageDescriptor {
    inner: Arc<DescriptorInner>,
}

impl MessageDescriptor {
    /// Starts building a descriptor for the named message type.
    pub fn builder(name: impl Into<String>) -> MessageDescriptorBuilder {
        MessageDescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the message type name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the field with the given number, if any.
    pub fn field(&self, number: u32) -> Option<&FieldDescriptor> {
        self.inner.fields.get(&number)
    }

    /// Returns the field with the given name, if any.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        let number = self.inner.numbers_by_name.get(name)?;
        self.inner.fields.get(number)
    }

    /// Iterates all fields in field-number order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.inner.fields.values()
    }

    /// Returns the number of fields in this message type.
    pub fn field_count(&self) -> usize {
        self.inner.fields.len()
    }
}

impl PartialEq for MessageDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.name == other.inner.name
    }
}

impl Eq for MessageDescriptor {}

/// Builder for [`MessageDescriptor`].
///
/// Collects fields and validates them once at [`build`](Self::build): field
/// numbers and field names must both be unique within the message.
#[derive(Debug)]
pub struct MessageDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl MessageDescriptorBuilder {
    /// Adds a field to the message type.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Validates the collected fields and builds the descriptor.
    pub fn build(self) -> Result<MessageDescriptor, ReflectError> {
        let mut fields: BTreeMap<u32, FieldDescriptor> = BTreeMap::new();
        let mut numbers_by_name: BTreeMap<String, u32> = BTreeMap::new();

        for field in self.fields {
            if fields.contains_key(&field.number()) {
                return Err(ReflectError::DuplicateFieldNumber {
                    message: self.name,
                    number: field.number(),
                });
            }
            if numbers_by_name.contains_key(field.name()) {
                return Err(ReflectError::DuplicateFieldName {
                    message: self.name,
                    name: field.name().to_string(),
                });
            }
            numbers_by_name.insert(field.name().to_string(), field.number());
            fields.insert(field.number(), field);
        }

        Ok(MessageDescriptor {
            inner: Arc::new(DescriptorInner {
                name: self.name,
                fields,
                numbers_by_name,
            }),
        })
    }
}
