//! Pre-order traversal of dynamic messages.
//!
//! The walk visits each populated field of a message in field number order.
//! Flagged fields are dispatched to the policy chain for their structural
//! kind first, then the walk descends into whatever value the field holds
//! afterwards, so nested messages inside a redacted container are still
//! visited. The first failing policy aborts the walk.

use redactor_reflect::{Cardinality, DynamicMessage, FieldDescriptor, MapKey, Value};

use crate::redaction::{
    error::{Error, PolicyStage},
    redactor::Redactor,
};

pub(crate) fn redact_message(
    redactor: &Redactor,
    message: &mut DynamicMessage,
) -> Result<(), Error> {
    let descriptor = message.descriptor().clone();
    for field in descriptor.fields() {
        if !message.is_populated(field) {
            continue;
        }
        if field.has_extension(redactor.extension_id()) {
            match field.cardinality() {
                Cardinality::Map => dispatch_map(redactor, message, field)?,
                Cardinality::List => dispatch_list(redactor, message, field)?,
                Cardinality::Singular => dispatch_field(redactor, message, field)?,
            }
        }
        descend(redactor, message, field)?;
    }
    Ok(())
}

/// Runs every field policy against the parent message.
///
/// Policies see the message as left by their predecessors, including a field
/// already cleared by an earlier policy.
fn dispatch_field(
    redactor: &Redactor,
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    for policy in redactor.field_policies() {
        policy(message, field).map_err(|source| policy_error(PolicyStage::Field, field, source))?;
    }
    Ok(())
}

fn dispatch_list(
    redactor: &Redactor,
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    if redactor.list_policies().is_empty() {
        return Ok(());
    }
    let Some(value) = message.get_mut(field) else {
        return Ok(());
    };
    match value {
        Value::List(list) => {
            for policy in redactor.list_policies() {
                policy(list).map_err(|source| policy_error(PolicyStage::List, field, source))?;
            }
            Ok(())
        }
        other => Err(structure_error(field, "list", other.kind_name())),
    }
}

/// Runs the map entry policies against each matched entry.
///
/// The entry value handed to the policies is captured when the entry is
/// matched; every policy in the chain for that entry sees the same snapshot,
/// while mutations land in the live map. An entry removed by an earlier
/// entry's policies is skipped.
fn dispatch_map(
    redactor: &Redactor,
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    let Some(extractor) = redactor.key_extractor() else {
        return Ok(());
    };
    if redactor.map_policies().is_empty() {
        return Ok(());
    }
    let Some(payload) = field.extension(redactor.extension_id()) else {
        return Ok(());
    };
    let keys = extractor(payload);
    if keys.is_empty() {
        return Ok(());
    }
    let Some(value) = message.get_mut(field) else {
        return Ok(());
    };
    match value {
        Value::Map(map) => {
            let matched: Vec<MapKey> = map
                .keys()
                .filter(|key| keys.contains(key.as_text().as_ref()))
                .cloned()
                .collect();
            for key in matched {
                let Some(entry) = map.get(&key).cloned() else {
                    continue;
                };
                for policy in redactor.map_policies() {
                    policy(map, &key, &entry)
                        .map_err(|source| policy_error(PolicyStage::MapEntry, field, source))?;
                }
            }
            Ok(())
        }
        other => Err(structure_error(field, "map", other.kind_name())),
    }
}

/// Recurses into the value a field holds after any policies ran.
fn descend(
    redactor: &Redactor,
    message: &mut DynamicMessage,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    let Some(value) = message.get_mut(field) else {
        return Ok(());
    };
    walk_value(redactor, value)
}

fn walk_value(redactor: &Redactor, value: &mut Value) -> Result<(), Error> {
    match value {
        Value::Message(inner) => redact_message(redactor, inner),
        Value::List(list) => {
            for element in list.iter_mut() {
                walk_value(redactor, element)?;
            }
            Ok(())
        }
        Value::Map(map) => {
            for entry in map.values_mut() {
                walk_value(redactor, entry)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn policy_error(stage: PolicyStage, field: &FieldDescriptor, source: anyhow::Error) -> Error {
    Error::Policy {
        stage,
        field: field.name().to_string(),
        source,
    }
}

fn structure_error(field: &FieldDescriptor, expected: &'static str, actual: &'static str) -> Error {
    Error::Structure {
        field: field.name().to_string(),
        expected,
        actual,
    }
}
