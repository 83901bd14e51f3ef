//! JSON views of dynamic values. Available with the `json` feature.
//!
//! [`DynamicMessage::to_json`] renders a message as a `serde_json::Value`
//! tree:
//!
//! - messages become objects keyed by field name (populated fields only)
//! - maps become objects keyed by each entry key's text form
//! - lists become arrays, bytes become arrays of numbers
//! - non-finite floats become `null`
//!
//! The `Serialize` implementations delegate to the same rendering, so dynamic
//! values can feed any serde-based sink directly.

use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};

use crate::{message::DynamicMessage, value::Value};

impl DynamicMessage {
    /// Renders the message as a JSON object keyed by field name.
    ///
    /// Unpopulated fields are omitted rather than rendered as zero values.
    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonMap::new();
        for (field, value) in self.populated_fields() {
            object.insert(field.name().to_string(), value.to_json());
        }
        JsonValue::Object(object)
    }
}

impl Value {
    /// Renders the value as JSON.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Bool(value) => JsonValue::Bool(*value),
            Value::I64(value) => JsonValue::Number((*value).into()),
            Value::U64(value) => JsonValue::Number((*value).into()),
            Value::F64(value) => {
                Number::from_f64(*value).map_or(JsonValue::Null, JsonValue::Number)
            }
            Value::String(value) => JsonValue::String(value.clone()),
            Value::Bytes(value) => JsonValue::Array(
                value.iter().map(|byte| JsonValue::Number((*byte).into())).collect(),
            ),
            Value::Message(message) => message.to_json(),
            Value::List(list) => JsonValue::Array(list.iter().map(Value::to_json).collect()),
            Value::Map(map) => {
                let mut object = JsonMap::new();
                for (key, value) in map.iter() {
                    object.insert(key.as_text().into_owned(), value.to_json());
                }
                JsonValue::Object(object)
            }
        }
    }
}

impl Serialize for DynamicMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        DynamicMessage, FieldDescriptor, Kind, ListValue, MapValue, MessageDescriptor, Value,
    };

    fn profile() -> DynamicMessage {
        let contact = MessageDescriptor::builder("Contact")
            .with_field(FieldDescriptor::new(1, "email", Kind::String))
            .build()
            .unwrap();
        let descriptor = MessageDescriptor::builder("Profile")
            .with_field(FieldDescriptor::new(1, "login", Kind::String))
            .with_field(FieldDescriptor::map(2, "contacts", Kind::String))
            .with_field(FieldDescriptor::list(3, "follow_ids", Kind::String))
            .with_field(FieldDescriptor::new(4, "contact", Kind::Message(contact.clone())))
            .build()
            .unwrap();

        let mut nested = DynamicMessage::new(contact);
        nested.set_field("email", "a@b").unwrap();

        let mut message = DynamicMessage::new(descriptor);
        message.set_field("login", "alice").unwrap();
        message
            .set_field("contacts", MapValue::from_iter([("addr", "street")]))
            .unwrap();
        message
            .set_field("follow_ids", ListValue::from_iter(["1", "2"]))
            .unwrap();
        message.set_field("contact", nested).unwrap();
        message
    }

    #[test]
    fn renders_populated_fields_by_name() {
        assert_eq!(
            profile().to_json(),
            json!({
                "login": "alice",
                "contacts": {"addr": "street"},
                "follow_ids": ["1", "2"],
                "contact": {"email": "a@b"},
            })
        );
    }

    #[test]
    fn unpopulated_fields_are_omitted() {
        let descriptor = MessageDescriptor::builder("Empty")
            .with_field(FieldDescriptor::new(1, "login", Kind::String))
            .build()
            .unwrap();
        assert_eq!(DynamicMessage::new(descriptor).to_json(), json!({}));
    }

    #[test]
    fn scalars_and_bytes_render() {
        assert_eq!(Value::Bool(true).to_json(), json!(true));
        assert_eq!(Value::I64(-3).to_json(), json!(-3));
        assert_eq!(Value::U64(7).to_json(), json!(7));
        assert_eq!(Value::F64(1.5).to_json(), json!(1.5));
        assert_eq!(Value::Bytes(vec![1, 2]).to_json(), json!([1, 2]));
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(Value::F64(f64::NAN).to_json(), json!(null));
        assert_eq!(Value::F64(f64::INFINITY).to_json(), json!(null));
    }

    #[test]
    fn serialize_delegates_to_json_rendering() {
        let rendered = serde_json::to_value(profile()).unwrap();
        assert_eq!(rendered, profile().to_json());
    }
}
