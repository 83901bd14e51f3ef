//! Redactor construction and validation.

use std::collections::HashSet;

use redactor_reflect::{
    DynamicMessage, ExtensionId, ExtensionValue, FieldDescriptor, ListValue, MapKey, MapValue,
    Value,
};

use crate::{
    policy::{FieldPolicy, KeyExtractor, ListPolicy, MapEntryPolicy},
    redaction::{error::Error, redactor::Redactor},
};

/// Builder for [`Redactor`].
///
/// Policies accumulate: registering two field policies runs both, in
/// registration order, against each flagged singular field. The key
/// extractor is single-valued; a later [`with_key_extractor`] replaces the
/// earlier one.
///
/// [`build`](Self::build) fails with [`Error::InvalidConfiguration`] unless
/// at least one policy of any category was registered.
///
/// [`with_key_extractor`]: Self::with_key_extractor
pub struct RedactorBuilder {
    extension_id: ExtensionId,
    field_policies: Vec<FieldPolicy>,
    map_policies: Vec<MapEntryPolicy>,
    list_policies: Vec<ListPolicy>,
    key_extractor: Option<KeyExtractor>,
}

impl RedactorBuilder {
    pub(crate) fn new(extension_id: ExtensionId) -> Self {
        Self {
            extension_id,
            field_policies: Vec::new(),
            map_policies: Vec::new(),
            list_policies: Vec::new(),
            key_extractor: None,
        }
    }

    /// Appends a policy for flagged singular fields.
    #[must_use]
    pub fn with_field_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&mut DynamicMessage, &FieldDescriptor) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.field_policies.push(Box::new(policy));
        self
    }

    /// Appends a policy for matched entries of flagged map fields.
    #[must_use]
    pub fn with_map_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&mut MapValue, &MapKey, &Value) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.map_policies.push(Box::new(policy));
        self
    }

    /// Appends a policy for flagged list fields.
    #[must_use]
    pub fn with_list_policy<F>(mut self, policy: F) -> Self
    where
        F: Fn(&mut ListValue) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.list_policies.push(Box::new(policy));
        self
    }

    /// Sets the sensitive-key extractor consulted for flagged map fields.
    ///
    /// Without an extractor, flagged map fields are skipped entirely.
    #[must_use]
    pub fn with_key_extractor<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&ExtensionValue) -> HashSet<String> + Send + Sync + 'static,
    {
        self.key_extractor = Some(Box::new(extractor));
        self
    }

    /// Validates the configuration and builds the redactor.
    pub fn build(self) -> Result<Redactor, Error> {
        if self.field_policies.is_empty()
            && self.map_policies.is_empty()
            && self.list_policies.is_empty()
        {
            return Err(Error::InvalidConfiguration);
        }

        Ok(Redactor::from_parts(
            self.extension_id,
            self.field_policies,
            self.map_policies,
            self.list_policies,
            self.key_extractor,
        ))
    }
}

#[cfg(test)]
mod tests {
    use redactor_reflect::ExtensionId;

    use super::*;
    use crate::policy::{clear_field, common_sensitive_keys};

    const SENSITIVE: ExtensionId = ExtensionId::from_static("sensitive");

    #[test]
    fn build_without_policies_is_invalid() {
        let err = Redactor::builder(SENSITIVE)
            .with_key_extractor(common_sensitive_keys)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration));
    }

    #[test]
    fn one_policy_of_any_category_suffices() {
        assert!(Redactor::builder(SENSITIVE).with_field_policy(clear_field).build().is_ok());
        assert!(
            Redactor::builder(SENSITIVE)
                .with_map_policy(|map, key, _| {
                    map.remove(key);
                    Ok(())
                })
                .build()
                .is_ok()
        );
        assert!(
            Redactor::builder(SENSITIVE)
                .with_list_policy(|list| {
                    list.clear();
                    Ok(())
                })
                .build()
                .is_ok()
        );
    }

    #[test]
    fn clearing_builder_is_prevalidated() {
        let redactor = Redactor::clearing(SENSITIVE).build().unwrap();
        assert_eq!(redactor.extension_id().as_str(), "sensitive");
    }

    #[test]
    fn redactor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Redactor>();
    }
}
