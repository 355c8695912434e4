//! Registry key and value resource (xRegistry)
//!
//! An empty `ValueName` addresses the key itself when no type or data
//! accompanies it, and the key's default value when they do.

use log::debug;

use super::require;
use crate::error::{Error, Result};
use crate::types::{Ensure, RegistryValueType, Resource, ResourceKind};

/// A registry key or value.
#[derive(Debug, Clone, Default)]
pub struct RegistryEntry {
    pub id: String,
    pub description: String,
    /// Full key path including the hive (e.g., "HKLM:\SOFTWARE\Contoso")
    pub key: String,
    pub value_name: String,
    /// Raw value type, validated at build time; empty means unspecified
    pub value_type: String,
    /// Value data; more than one element only for MultiString
    pub value_data: Vec<String>,
    /// Data is hexadecimal (DWord/QWord only)
    pub hex: bool,
    /// Overwrite existing values or delete keys with subkeys
    pub force: bool,
}

impl RegistryEntry {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_value_name(mut self, value_name: &str) -> Self {
        self.value_name = value_name.to_string();
        self
    }

    /// Accepts a [`RegistryValueType`] or a raw literal.
    pub fn with_value_type(mut self, value_type: impl AsRef<str>) -> Self {
        self.value_type = value_type.as_ref().to_string();
        self
    }

    pub fn with_value_data<I, S>(mut self, value_data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_data = value_data.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hex(mut self, hex: bool) -> Self {
        self.hex = hex;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Create the key. Value settings on this builder are ignored.
    pub fn add_key(&self) -> Result<Resource> {
        self.reshape("", "", false, false).build(Ensure::Present)
    }

    /// Set the key's default (unnamed) value.
    pub fn update_default_value(&self) -> Result<Resource> {
        let mut entry = self.clone();
        entry.value_name.clear();
        entry.force = false;
        entry.build(Ensure::Present)
    }

    /// Create or update a named value.
    pub fn add_value(&self) -> Result<Resource> {
        self.build(Ensure::Present)
    }

    /// Delete the key; `force` allows deleting keys that have subkeys.
    pub fn remove_key(&self) -> Result<Resource> {
        self.reshape("", "", false, self.force).build(Ensure::Absent)
    }

    /// Delete a named value from the key.
    pub fn remove_value(&self) -> Result<Resource> {
        let name = self.value_name.clone();
        self.reshape(&name, "", false, false).build(Ensure::Absent)
    }

    /// Copy identity and key with the given value addressing, and the
    /// placeholder data used when no value is being written.
    fn reshape(&self, value_name: &str, value_type: &str, hex: bool, force: bool) -> Self {
        Self {
            id: self.id.clone(),
            description: self.description.clone(),
            key: self.key.clone(),
            value_name: value_name.to_string(),
            value_type: value_type.to_string(),
            value_data: vec![String::new()],
            hex,
            force,
        }
    }

    /// Validate and build with an explicit ensure state.
    pub fn build(&self, ensure: Ensure) -> Result<Resource> {
        require("key", &self.key)?;

        let value_type = if self.value_type.is_empty() {
            None
        } else {
            Some(self.value_type.parse::<RegistryValueType>()?)
        };

        if self.value_data.is_empty() {
            return Err(Error::EmptyValueData);
        }

        let multi = value_type == Some(RegistryValueType::MultiString);
        if !multi && self.value_data.len() > 1 {
            return Err(Error::MultipleValues {
                value_type: self.value_type.clone(),
                count: self.value_data.len(),
            });
        }

        let mut r = Resource::new(ResourceKind::Registry, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("Key", self.key.as_str());
        settings.set("ValueName", self.value_name.as_str());
        if let Some(value_type) = value_type {
            settings.set("ValueType", value_type.as_str());
        }
        if multi {
            settings.set("ValueData", self.value_data.clone());
        } else {
            settings.set("ValueData", self.value_data[0].as_str());
        }
        settings.set("Force", self.force);
        settings.set_if(
            value_type.is_some_and(|t| t.is_numeric()),
            "Hex",
            self.hex,
        );
        settings.set("Ensure", ensure);

        debug!("built {} resource for {}", r.kind(), self.key);
        Ok(r)
    }
}
