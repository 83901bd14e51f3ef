//! Dynamic message instances.
//!
//! A [`DynamicMessage`] stores field values keyed by field number, checked
//! against its [`MessageDescriptor`] on every write. Presence is explicit: a
//! field is populated once set and unpopulated once cleared; reading an
//! unpopulated field through [`get_field_or_default`](DynamicMessage::get_field_or_default)
//! yields the field's zero value without populating it.
//!
//! Cloning a message deep-copies every stored value; the descriptor handle
//! stays shared.

use std::collections::BTreeMap;

use crate::{
    descriptor::{Cardinality, FieldDescriptor, Kind, MessageDescriptor},
    error::ReflectError,
    value::Value,
};

/// A message instance described by a [`MessageDescriptor`].
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicMessage {
    descriptor: MessageDescriptor,
    fields: BTreeMap<u32, Value>,
}

impl DynamicMessage {
    /// Creates an empty message of the given type.
    pub fn new(descriptor: MessageDescriptor) -> Self {
        Self {
            descriptor,
            fields: BTreeMap::new(),
        }
    }

    /// Returns the message's descriptor.
    pub fn descriptor(&self) -> &MessageDescriptor {
        &self.descriptor
    }

    /// Returns the stored value for `field`, if populated.
    pub fn get(&self, field: &FieldDescriptor) -> Option<&Value> {
        self.fields.get(&field.number())
    }

    /// Returns the stored value for `field` mutably, if populated.
    pub fn get_mut(&mut self, field: &FieldDescriptor) -> Option<&mut Value> {
        self.fields.get_mut(&field.number())
    }

    /// Stores a value for `field`.
    ///
    /// The field must belong to this message's descriptor and the value must
    /// match the kind and cardinality declared there; otherwise nothing is
    /// stored and an error is returned. The check always runs against this
    /// message's own declaration, so a caller-built descriptor sharing the
    /// field's number and name cannot smuggle in a different shape.
    pub fn set(&mut self, field: &FieldDescriptor, value: impl Into<Value>) -> Result<(), ReflectError> {
        let value = value.into();
        let number = {
            let own = self.check_known(field)?;
            check_value(own, &value)?;
            own.number()
        };
        self.fields.insert(number, value);
        Ok(())
    }

    /// Removes the stored value for `field`, leaving it unpopulated.
    pub fn clear(&mut self, field: &FieldDescriptor) {
        self.fields.remove(&field.number());
    }

    /// Returns `true` if `field` currently holds a value.
    pub fn is_populated(&self, field: &FieldDescriptor) -> bool {
        self.fields.contains_key(&field.number())
    }

    /// Iterates populated fields in field-number order.
    pub fn populated_fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &Value)> + '_ {
        self.fields
            .iter()
            .filter_map(|(number, value)| self.descriptor.field(*number).map(|field| (field, value)))
    }

    /// Returns the stored value for the named field, if populated.
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        let number = self.descriptor.field_by_name(name)?.number();
        self.fields.get(&number)
    }

    /// Returns the stored value for the named field mutably, if populated.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Value> {
        let number = self.descriptor.field_by_name(name)?.number();
        self.fields.get_mut(&number)
    }

    /// Returns the named field's value, or its zero value if unpopulated.
    ///
    /// Fails only when the name does not exist in the descriptor. The message
    /// itself is never modified.
    pub fn get_field_or_default(&self, name: &str) -> Result<Value, ReflectError> {
        let field = self.field_named(name)?;
        Ok(self
            .fields
            .get(&field.number())
            .cloned()
            .unwrap_or_else(|| field.default_value()))
    }

    /// Stores a value for the named field.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ReflectError> {
        let field = self.field_named(name)?.clone();
        self.set(&field, value)
    }

    /// Removes the stored value for the named field, leaving it unpopulated.
    pub fn clear_field(&mut self, name: &str) -> Result<(), ReflectError> {
        let number = self.field_named(name)?.number();
        self.fields.remove(&number);
        Ok(())
    }

    fn field_named(&self, name: &str) -> Result<&FieldDescriptor, ReflectError> {
        self.descriptor
            .field_by_name(name)
            .ok_or_else(|| ReflectError::UnknownField {
                message: self.descriptor.name().to_string(),
                field: name.to_string(),
            })
    }

    // Resolves `field` to this message's own declaration; the name check is a
    // sanity guard against a descriptor from an unrelated type reusing the
    // number.
    fn check_known(&self, field: &FieldDescriptor) -> Result<&FieldDescriptor, ReflectError> {
        match self.descriptor.field(field.number()) {
            Some(own) if own.name() == field.name() => Ok(own),
            _ => Err(ReflectError::UnknownField {
                message: self.descriptor.name().to_string(),
                field: field.name().to_string(),
            }),
        }
    }
}

fn check_value(field: &FieldDescriptor, value: &Value) -> Result<(), ReflectError> {
    match field.cardinality() {
        Cardinality::Singular => check_kind(field, value),
        Cardinality::List => match value {
            Value::List(list) => {
                for element in list.iter() {
                    check_kind(field, element)?;
                }
                Ok(())
            }
            other => Err(cardinality_mismatch(field, other)),
        },
        Cardinality::Map => match value {
            Value::Map(map) => {
                for entry in map.values() {
                    check_kind(field, entry)?;
                }
                Ok(())
            }
            other => Err(cardinality_mismatch(field, other)),
        },
    }
}

fn check_kind(field: &FieldDescriptor, value: &Value) -> Result<(), ReflectError> {
    let matches = match (field.kind(), value) {
        (Kind::Bool, Value::Bool(_))
        | (Kind::I64, Value::I64(_))
        | (Kind::U64, Value::U64(_))
        | (Kind::F64, Value::F64(_))
        | (Kind::String, Value::String(_))
        | (Kind::Bytes, Value::Bytes(_)) => true,
        // Nested message values match by type name, the same identity
        // MessageDescriptor equality uses; field shapes are not compared.
        (Kind::Message(descriptor), Value::Message(message)) => {
            descriptor.name() == message.descriptor().name()
        }
        _ => false,
    };

    if matches {
        Ok(())
    } else {
        Err(ReflectError::KindMismatch {
            field: field.name().to_string(),
            expected: kind_label(field.kind()),
            actual: value_label(value),
        })
    }
}

fn cardinality_mismatch(field: &FieldDescriptor, value: &Value) -> ReflectError {
    ReflectError::CardinalityMismatch {
        field: field.name().to_string(),
        expected: field.cardinality().name(),
        actual: value_label(value),
    }
}

// Message kinds carry the type name so mismatches between two message types
// stay readable.
fn kind_label(kind: &Kind) -> String {
    match kind {
        Kind::Message(descriptor) => format!("message `{}`", descriptor.name()),
        other => other.name().to_string(),
    }
}

fn value_label(value: &Value) -> String {
    match value {
        Value::Message(message) => format!("message `{}`", message.descriptor().name()),
        other => other.kind_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ListValue, MapValue};

    fn contact_descriptor() -> MessageDescriptor {
        MessageDescriptor::builder("Contact")
            .with_field(FieldDescriptor::new(1, "email", Kind::String))
            .build()
            .unwrap()
    }

    fn profile_descriptor() -> MessageDescriptor {
        MessageDescriptor::builder("Profile")
            .with_field(FieldDescriptor::new(1, "login", Kind::String))
            .with_field(FieldDescriptor::new(2, "age", Kind::U64))
            .with_field(FieldDescriptor::list(3, "tags", Kind::String))
            .with_field(FieldDescriptor::map(4, "contacts", Kind::String))
            .with_field(FieldDescriptor::new(5, "contact", Kind::Message(contact_descriptor())))
            .build()
            .unwrap()
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut message = DynamicMessage::new(profile_descriptor());
        message.set_field("login", "alice").unwrap();
        message.set_field("age", 30u64).unwrap();

        assert_eq!(message.get_field("login").and_then(Value::as_str), Some("alice"));
        assert_eq!(message.get_field("age").and_then(Value::as_u64), Some(30));
        assert!(message.get_field("tags").is_none());
    }

    #[test]
    fn set_rejects_wrong_kind() {
        let mut message = DynamicMessage::new(profile_descriptor());
        let err = message.set_field("login", 1i64).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::KindMismatch { ref expected, ref actual, .. }
                if expected == "string" && actual == "i64"
        ));
        assert!(message.get_field("login").is_none());
    }

    #[test]
    fn set_rejects_wrong_cardinality() {
        let mut message = DynamicMessage::new(profile_descriptor());
        let err = message.set_field("tags", "oops").unwrap_err();
        assert!(matches!(
            err,
            ReflectError::CardinalityMismatch { expected: "list", ref actual, .. }
                if actual == "string"
        ));
    }

    #[test]
    fn list_elements_are_kind_checked() {
        let mut message = DynamicMessage::new(profile_descriptor());
        let mut list = ListValue::from_iter(["ok"]);
        list.push(1i64);
        let err = message.set_field("tags", list).unwrap_err();
        assert!(matches!(err, ReflectError::KindMismatch { .. }));
    }

    #[test]
    fn set_checks_the_messages_own_declaration_not_the_argument() {
        let mut message = DynamicMessage::new(profile_descriptor());

        // Same number and name as `login`, but claiming a different kind
        let forged_kind = FieldDescriptor::new(1, "login", Kind::I64);
        let err = message.set(&forged_kind, 42i64).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::KindMismatch { ref expected, ref actual, .. }
                if expected == "string" && actual == "i64"
        ));
        assert!(message.get_field("login").is_none());

        // Same number and name as `tags`, but claiming singular cardinality
        let forged_cardinality = FieldDescriptor::new(3, "tags", Kind::String);
        let err = message.set(&forged_cardinality, "oops").unwrap_err();
        assert!(matches!(
            err,
            ReflectError::CardinalityMismatch { expected: "list", .. }
        ));
        assert!(message.get_field("tags").is_none());
    }

    #[test]
    fn set_rejects_foreign_field() {
        let mut message = DynamicMessage::new(profile_descriptor());
        let foreign = FieldDescriptor::new(9, "other", Kind::String);
        let err = message.set(&foreign, "x").unwrap_err();
        assert!(matches!(err, ReflectError::UnknownField { ref field, .. } if field == "other"));
    }

    #[test]
    fn clear_removes_presence() {
        let mut message = DynamicMessage::new(profile_descriptor());
        message.set_field("login", "alice").unwrap();
        message.clear_field("login").unwrap();

        assert!(message.get_field("login").is_none());
        let login = message.descriptor().field_by_name("login").cloned().unwrap();
        assert!(!message.is_populated(&login));
    }

    #[test]
    fn default_reads_do_not_populate() {
        let message = DynamicMessage::new(profile_descriptor());
        assert_eq!(
            message.get_field_or_default("login").unwrap(),
            Value::String(String::new())
        );
        assert_eq!(
            message.get_field_or_default("tags").unwrap(),
            Value::List(ListValue::new())
        );
        assert!(message.get_field("login").is_none());

        let err = message.get_field_or_default("missing").unwrap_err();
        assert!(matches!(err, ReflectError::UnknownField { .. }));
    }

    #[test]
    fn populated_fields_iterate_in_number_order() {
        let mut message = DynamicMessage::new(profile_descriptor());
        message.set_field("age", 30u64).unwrap();
        message.set_field("login", "alice").unwrap();

        let names: Vec<&str> = message
            .populated_fields()
            .map(|(field, _)| field.name())
            .collect();
        assert_eq!(names, ["login", "age"]);
    }

    #[test]
    fn nested_message_values_check_descriptor_type() {
        let mut message = DynamicMessage::new(profile_descriptor());
        let contact = DynamicMessage::new(contact_descriptor());
        message.set_field("contact", contact).unwrap();

        let stranger = DynamicMessage::new(
            MessageDescriptor::builder("Stranger").build().unwrap(),
        );
        let err = message.set_field("contact", stranger).unwrap_err();
        assert!(matches!(
            err,
            ReflectError::KindMismatch { ref expected, ref actual, .. }
                if expected == "message `Contact`" && actual == "message `Stranger`"
        ));
    }

    #[test]
    fn clone_is_deep_for_values() {
        let mut message = DynamicMessage::new(profile_descriptor());
        message
            .set_field("contacts", MapValue::from_iter([("email", "a@b")]))
            .unwrap();

        let mut copy = message.clone();
        if let Some(map) = copy.get_field_mut("contacts").and_then(Value::as_map_mut) {
            map.clear();
        }

        let original_len = message
            .get_field("contacts")
            .and_then(Value::as_map)
            .map(MapValue::len);
        assert_eq!(original_len, Some(1));
    }
}
