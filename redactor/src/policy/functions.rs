//! Policy function shapes and the built-in clear policies.
//!
//! A policy is a caller-supplied mutator invoked when the walk reaches a
//! flagged field of the matching structural kind:
//!
//! - [`FieldPolicy`]: singular fields, called with the owning message and the
//!   field's descriptor
//! - [`MapEntryPolicy`]: matched map entries, called with the map handle, the
//!   entry key, and the entry value as captured when the entry matched
//! - [`ListPolicy`]: list fields, called with the whole list handle
//!
//! Policies of one category run in registration order against the same
//! target, so later policies observe earlier mutations. The first failure
//! aborts the walk.

use redactor_reflect::{DynamicMessage, FieldDescriptor, ListValue, MapKey, MapValue, Value};

/// Policy over a flagged singular field, invoked with the owning message.
pub type FieldPolicy =
    Box<dyn Fn(&mut DynamicMessage, &FieldDescriptor) -> anyhow::Result<()> + Send + Sync>;

/// Policy over one matched entry of a flagged map field.
pub type MapEntryPolicy =
    Box<dyn Fn(&mut MapValue, &MapKey, &Value) -> anyhow::Result<()> + Send + Sync>;

/// Policy over a flagged list field.
pub type ListPolicy = Box<dyn Fn(&mut ListValue) -> anyhow::Result<()> + Send + Sync>;

/// Clears the flagged field on its owning message, leaving it unpopulated.
pub fn clear_field(message: &mut DynamicMessage, field: &FieldDescriptor) -> anyhow::Result<()> {
    message.clear(field);
    Ok(())
}

/// Removes the matched entry from its map.
pub fn clear_map_entry(map: &mut MapValue, key: &MapKey, _value: &Value) -> anyhow::Result<()> {
    map.remove(key);
    Ok(())
}

/// Truncates the flagged list to zero length.
pub fn clear_list(list: &mut ListValue) -> anyhow::Result<()> {
    list.truncate(0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use redactor_reflect::{Kind, MessageDescriptor};

    use super::*;

    #[test]
    fn clear_field_removes_presence() {
        let descriptor = MessageDescriptor::builder("Login")
            .with_field(FieldDescriptor::new(1, "password", Kind::String))
            .build()
            .unwrap();
        let field = descriptor.field_by_name("password").cloned().unwrap();

        let mut message = DynamicMessage::new(descriptor);
        message.set_field("password", "secret").unwrap();

        clear_field(&mut message, &field).unwrap();
        assert!(!message.is_populated(&field));
    }

    #[test]
    fn clear_map_entry_removes_only_that_key() {
        let mut map = MapValue::from_iter([("email", "a@b"), ("addr", "street")]);
        let key = MapKey::from("email");
        let value = map.get(&key).cloned().unwrap();

        clear_map_entry(&mut map, &key, &value).unwrap();
        assert!(!map.contains_key(&key));
        assert!(map.contains_key(&MapKey::from("addr")));
    }

    #[test]
    fn clear_list_empties_the_list() {
        let mut list = ListValue::from_iter(["1", "2", "3"]);
        clear_list(&mut list).unwrap();
        assert!(list.is_empty());
    }
}
