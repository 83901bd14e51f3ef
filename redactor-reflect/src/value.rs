//! Dynamic values stored inside messages.
//!
//! This module provides the mutable side of the crate:
//!
//! - [`Value`]: one field value of any kind
//! - [`ListValue`]: the backing store of a list field
//! - [`MapValue`] / [`MapKey`]: the backing store of a map field
//!
//! List and map handles expose a deliberately narrow mutation surface
//! (push/truncate, insert/remove) so that callers holding one cannot corrupt
//! the owning message's field table.

use std::{borrow::Cow, collections::BTreeMap};

use crate::message::DynamicMessage;

// =============================================================================
// Value
// =============================================================================

/// A single dynamic value.
///
/// Scalar variants mirror [`Kind`](crate::Kind); `List` and `Map` only appear
/// as the stored value of list and map fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean.
    Bool(bool),
    /// A signed 64-bit integer.
    I64(i64),
    /// An unsigned 64-bit integer.
    U64(u64),
    /// A 64-bit float.
    F64(f64),
    /// A UTF-8 string.
    String(String),
    /// An opaque byte string.
    Bytes(Vec<u8>),
    /// A nested message.
    Message(DynamicMessage),
    /// A list of values.
    List(ListValue),
    /// A keyed map of values.
    Map(MapValue),
}

impl Value {
    /// Returns a short lowercase name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I64(_) => "i64",
            Value::U64(_) => "u64",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Message(_) => "message",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the boolean, if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `I64` value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is a `U64` value.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float, if this is an `F64` value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the text, if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a `Bytes` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested message, if this is a `Message` value.
    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            Value::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the nested message mutably, if this is a `Message` value.
    pub fn as_message_mut(&mut self) -> Option<&mut DynamicMessage> {
        match self {
            Value::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the list, if this is a `List` value.
    pub fn as_list(&self) -> Option<&ListValue> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the list mutably, if this is a `List` value.
    pub fn as_list_mut(&mut self) -> Option<&mut ListValue> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the map, if this is a `Map` value.
    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the map mutably, if this is a `Map` value.
    pub fn as_map_mut(&mut self) -> Option<&mut MapValue> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<DynamicMessage> for Value {
    fn from(message: DynamicMessage) -> Self {
        Value::Message(message)
    }
}

impl From<ListValue> for Value {
    fn from(list: ListValue) -> Self {
        Value::List(list)
    }
}

impl From<MapValue> for Value {
    fn from(map: MapValue) -> Self {
        Value::Map(map)
    }
}

// =============================================================================
// MapKey
// =============================================================================

/// A map entry key.
///
/// Keys are restricted to the kinds that can index a map. [`MapKey::as_text`]
/// gives every key a canonical text form, which is what key-based matching
/// (e.g. sensitive-key sets) compares against.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// A boolean key.
    Bool(bool),
    /// A signed 64-bit integer key.
    I64(i64),
    /// An unsigned 64-bit integer key.
    U64(u64),
    /// A string key.
    String(String),
}

impl MapKey {
    /// Returns the canonical text form of the key.
    ///
    /// String keys borrow; other kinds render to their decimal or
    /// `true`/`false` form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            MapKey::Bool(value) => Cow::Owned(value.to_string()),
            MapKey::I64(value) => Cow::Owned(value.to_string()),
            MapKey::U64(value) => Cow::Owned(value.to_string()),
            MapKey::String(value) => Cow::Borrowed(value),
        }
    }
}

impl From<bool> for MapKey {
    fn from(value: bool) -> Self {
        MapKey::Bool(value)
    }
}

impl From<i64> for MapKey {
    fn from(value: i64) -> Self {
        MapKey::I64(value)
    }
}

impl From<u64> for MapKey {
    fn from(value: u64) -> Self {
        MapKey::U64(value)
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        MapKey::String(value.to_string())
    }
}

impl From<String> for MapKey {
    fn from(value: String) -> Self {
        MapKey::String(value)
    }
}

// =============================================================================
// ListValue
// =============================================================================

/// The backing store of a list field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListValue {
    values: Vec<Value>,
}

impl ListValue {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the element at `index` mutably, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    /// Appends an element.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    /// Shortens the list to at most `len` elements.
    pub fn truncate(&mut self, len: usize) {
        self.values.truncate(len);
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.iter()
    }

    /// Iterates the elements in order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> + '_ {
        self.values.iter_mut()
    }
}

impl<V: Into<Value>> FromIterator<V> for ListValue {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// MapValue
// =============================================================================

/// The backing store of a map field.
///
/// Entries are kept in key order, so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapValue {
    entries: BTreeMap<MapKey, Value>,
}

impl MapValue {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value stored under `key`, if present.
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the value stored under `key` mutably, if present.
    pub fn get_mut(&mut self, key: &MapKey) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if an entry is stored under `key`.
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts an entry, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes the entry stored under `key`, returning its value if present.
    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &MapKey> + '_ {
        self.entries.keys()
    }

    /// Iterates the values in key order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    /// Iterates the values in key order, mutably.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> + '_ {
        self.entries.values_mut()
    }

    /// Iterates the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MapKey, &Value)> + '_ {
        self.entries.iter()
    }

    /// Iterates the entries in key order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&MapKey, &mut Value)> + '_ {
        self.entries.iter_mut()
    }
}

impl<K: Into<MapKey>, V: Into<Value>> FromIterator<(K, V)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
