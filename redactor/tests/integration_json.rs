//! Integration tests for JSON rendering of redacted messages.
//!
//! These tests verify that:
//! - `redact_to_json()` redacts a copy and renders it as `serde_json::Value`
//! - cleared fields disappear from the JSON object entirely
//! - policy failures surface as errors instead of partially redacted JSON

#![cfg(feature = "json")]

use redactor::reflect::{
    DynamicMessage, ExtensionId, FieldDescriptor, Kind, ListValue, MapValue, MessageDescriptor,
    Value,
};
use redactor::{Redactor, common_sensitive_keys, map_keys_extension};
use serde_json::json;

const SENSITIVE: ExtensionId = ExtensionId::from_static("sensitive");

fn profile_descriptor() -> MessageDescriptor {
    MessageDescriptor::builder("Profile")
        .with_field(
            FieldDescriptor::new(1, "password", Kind::String).with_extension(SENSITIVE, true),
        )
        .with_field(FieldDescriptor::new(2, "login", Kind::String))
        .with_field(
            FieldDescriptor::map(3, "contacts", Kind::String)
                .with_extension(SENSITIVE, map_keys_extension(["email", "phone"])),
        )
        .with_field(
            FieldDescriptor::list(4, "follow_ids", Kind::String).with_extension(SENSITIVE, true),
        )
        .build()
        .unwrap()
}

fn sample_profile() -> DynamicMessage {
    let mut message = DynamicMessage::new(profile_descriptor());
    message.set_field("password", "password_test").unwrap();
    message.set_field("login", "login_test").unwrap();
    message
        .set_field(
            "contacts",
            MapValue::from_iter([
                ("email", "email_test"),
                ("phone", "phone_test"),
                ("addr", "addr_test"),
                ("city", "city_test"),
            ]),
        )
        .unwrap();
    message
        .set_field("follow_ids", ListValue::from_iter(["1", "2", "3"]))
        .unwrap();
    message
}

fn clearing_redactor() -> Redactor {
    Redactor::clearing(SENSITIVE)
        .with_key_extractor(common_sensitive_keys)
        .build()
        .unwrap()
}

mod rendering {
    use super::*;

    #[test]
    fn cleared_fields_are_absent_from_the_object() {
        let rendered = clearing_redactor().redact_to_json(&sample_profile()).unwrap();

        assert_eq!(
            rendered,
            json!({
                "login": "login_test",
                "contacts": {"addr": "addr_test", "city": "city_test"},
                "follow_ids": [],
            })
        );
    }

    #[test]
    fn truncated_lists_render_as_empty_arrays() {
        let rendered = clearing_redactor().redact_to_json(&sample_profile()).unwrap();

        assert_eq!(rendered["follow_ids"], json!([]));
        assert!(rendered.get("password").is_none());
    }

    #[test]
    fn original_message_is_not_modified() {
        let message = sample_profile();
        let _ = clearing_redactor().redact_to_json(&message).unwrap();

        assert_eq!(
            message.get_field("password").and_then(Value::as_str),
            Some("password_test")
        );
        let contacts = message.get_field("contacts").and_then(Value::as_map).unwrap();
        assert_eq!(contacts.len(), 4);
    }
}

mod nested {
    use super::*;

    #[test]
    fn nested_messages_render_as_redacted_objects() {
        let contact = MessageDescriptor::builder("Contact")
            .with_field(
                FieldDescriptor::new(1, "email", Kind::String).with_extension(SENSITIVE, true),
            )
            .with_field(FieldDescriptor::new(2, "city", Kind::String))
            .build()
            .unwrap();
        let customer = MessageDescriptor::builder("Customer")
            .with_field(FieldDescriptor::new(1, "name", Kind::String))
            .with_field(FieldDescriptor::new(2, "contact", Kind::Message(contact.clone())))
            .build()
            .unwrap();

        let mut inner = DynamicMessage::new(contact);
        inner.set_field("email", "someone@example.com").unwrap();
        inner.set_field("city", "Lisbon").unwrap();
        let mut message = DynamicMessage::new(customer);
        message.set_field("name", "acme").unwrap();
        message.set_field("contact", inner).unwrap();

        let rendered = clearing_redactor().redact_to_json(&message).unwrap();
        assert_eq!(
            rendered,
            json!({
                "name": "acme",
                "contact": {"city": "Lisbon"},
            })
        );
    }
}

mod failures {
    use super::*;

    #[test]
    fn failing_policy_yields_an_error_not_json() {
        let redactor = Redactor::builder(SENSITIVE)
            .with_field_policy(|_, _| Err(anyhow::anyhow!("backend unavailable")))
            .build()
            .unwrap();

        let message = sample_profile();
        assert!(redactor.redact_to_json(&message).is_err());
        assert_eq!(
            message.get_field("password").and_then(Value::as_str),
            Some("password_test")
        );
    }
}
