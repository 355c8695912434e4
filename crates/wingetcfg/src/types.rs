//! Core types for WinGet configuration documents.
//!
//! Resource kinds, ensure states and registry value types are closed
//! enumerations internally and only become their external string literals
//! when a document is serialized.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Whether a piece of state should exist or be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ensure {
    /// The state should exist
    #[default]
    Present,
    /// The state should be removed
    Absent,
}

impl Ensure {
    /// External literal for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ensure::Present => "Present",
            Ensure::Absent => "Absent",
        }
    }

    /// Parse an ensure literal, coercing anything that is not exactly
    /// `"Present"` or `"Absent"` to [`Ensure::Present`].
    pub fn normalize(value: &str) -> Self {
        match value {
            "Absent" => Ensure::Absent,
            _ => Ensure::Present,
        }
    }
}

impl From<bool> for Ensure {
    fn from(present: bool) -> Self {
        if present {
            Ensure::Present
        } else {
            Ensure::Absent
        }
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The external provider a resource targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// WinGet package install/uninstall
    WinGetPackage,
    /// MSI package install/uninstall
    MsiPackage,
    /// Local user account
    LocalUser,
    /// Local group and its membership
    LocalGroup,
    /// Registry key or value
    Registry,
    /// Ad-hoc PowerShell script
    PowerShell,
}

impl ResourceKind {
    /// Provider identifier written to the `resource` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::WinGetPackage => "Microsoft.WinGet.DSC/WinGetPackage",
            ResourceKind::MsiPackage => "xPSDesiredStateConfiguration/xMsiPackage",
            ResourceKind::LocalUser => "xPSDesiredStateConfiguration/xUser",
            ResourceKind::LocalGroup => "xPSDesiredStateConfiguration/xGroup",
            ResourceKind::Registry => "xPSDesiredStateConfiguration/xRegistry",
            ResourceKind::PowerShell => "openuem/Powershell",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Data type of a registry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryValueType {
    String,
    Binary,
    DWord,
    QWord,
    MultiString,
    ExpandString,
}

impl RegistryValueType {
    /// External literal for this value type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryValueType::String => "String",
            RegistryValueType::Binary => "Binary",
            RegistryValueType::DWord => "DWord",
            RegistryValueType::QWord => "QWord",
            RegistryValueType::MultiString => "MultiString",
            RegistryValueType::ExpandString => "ExpandString",
        }
    }

    /// Whether the `Hex` flag applies to this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, RegistryValueType::DWord | RegistryValueType::QWord)
    }
}

impl FromStr for RegistryValueType {
    type Err = Error;

    /// Case-sensitive parse of the six supported literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "String" => Ok(RegistryValueType::String),
            "Binary" => Ok(RegistryValueType::Binary),
            "DWord" => Ok(RegistryValueType::DWord),
            "QWord" => Ok(RegistryValueType::QWord),
            "MultiString" => Ok(RegistryValueType::MultiString),
            "ExpandString" => Ok(RegistryValueType::ExpandString),
            _ => Err(Error::InvalidValueType {
                value: s.to_string(),
            }),
        }
    }
}

impl AsRef<str> for RegistryValueType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RegistryValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash algorithm used to verify an MSI file before installing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Ripemd160,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// External literal for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "MD5",
            HashAlgorithm::Ripemd160 => "RIPEMD160",
            HashAlgorithm::Sha1 => "SHA1",
            HashAlgorithm::Sha256 => "SHA256",
            HashAlgorithm::Sha384 => "SHA384",
            HashAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD5" => Ok(HashAlgorithm::Md5),
            "RIPEMD160" => Ok(HashAlgorithm::Ripemd160),
            "SHA1" => Ok(HashAlgorithm::Sha1),
            "SHA256" => Ok(HashAlgorithm::Sha256),
            "SHA384" => Ok(HashAlgorithm::Sha384),
            "SHA512" => Ok(HashAlgorithm::Sha512),
            _ => Err(Error::InvalidHashAlgorithm {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directives {
    /// Free text describing the resource
    pub description: String,
    /// Opt-in to pre-release provider modules
    #[serde(rename = "allowPrerelease")]
    pub allow_prerelease: bool,
}

impl Directives {
    fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            allow_prerelease: true,
        }
    }
}

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Bool(bool),
    List(Vec<String>),
}

impl SettingValue {
    /// Get the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SettingValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(value: Vec<String>) -> Self {
        SettingValue::List(value)
    }
}

impl From<Ensure> for SettingValue {
    fn from(value: Ensure) -> Self {
        SettingValue::String(value.as_str().to_string())
    }
}

/// Kind-specific settings, kept in insertion order.
///
/// Each setter encodes the emission policy of its field: `set` always
/// emits, `set_non_empty` drops empty strings, `set_if` drops the field when
/// the condition is false.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    entries: Vec<(String, SettingValue)>,
}

impl Settings {
    /// Create an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Set a string key only when the value is non-empty.
    pub fn set_non_empty(&mut self, key: &str, value: &str) {
        if !value.is_empty() {
            self.set(key, value);
        }
    }

    /// Set a key only when `condition` holds.
    pub fn set_if(&mut self, condition: bool, key: &str, value: impl Into<SettingValue>) {
        if condition {
            self.set(key, value);
        }
    }

    /// Look up a setting by name.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether a setting is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Setting names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over settings in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One declarative unit of desired state.
///
/// Resources are only produced by the builders in [`crate::resources`], so a
/// value of this type always carries its kind-mandatory settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    #[serde(rename = "resource")]
    kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "dependsOn", skip_serializing_if = "Option::is_none")]
    depends_on: Option<String>,
    #[serde(rename = "Directives")]
    directives: Directives,
    #[serde(rename = "Settings")]
    settings: Settings,
}

impl Resource {
    /// Start a resource of the given kind. An empty `id` leaves it unset.
    pub(crate) fn new(kind: ResourceKind, id: &str, description: &str) -> Self {
        Self {
            kind,
            id: non_empty(id),
            depends_on: None,
            directives: Directives::new(description),
            settings: Settings::new(),
        }
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Set the identifier. An empty string clears it.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = non_empty(id);
        self
    }

    /// Reference another resource's id. An empty string clears it.
    pub fn with_depends_on(mut self, depends_on: &str) -> Self {
        self.depends_on = non_empty(depends_on);
        self
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn depends_on(&self) -> Option<&str> {
        self.depends_on.as_deref()
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shorthand for `settings().get(key)`.
    pub fn setting(&self, key: &str) -> Option<&SettingValue> {
        self.settings.get(key)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_from_bool() {
        assert_eq!(Ensure::from(true), Ensure::Present);
        assert_eq!(Ensure::from(false), Ensure::Absent);
    }

    #[test]
    fn test_registry_value_type_case_sensitive() {
        assert_eq!(
            "MultiString".parse::<RegistryValueType>().unwrap(),
            RegistryValueType::MultiString
        );
        assert!("Multistring".parse::<RegistryValueType>().is_err());
        assert!("dword".parse::<RegistryValueType>().is_err());
    }

    #[test]
    fn test_hash_algorithm_parse() {
        assert_eq!(
            "SHA256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sha256
        );
        let err = "sha256".parse::<HashAlgorithm>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_settings_replace_keeps_position() {
        let mut settings = Settings::new();
        settings.set("id", "Git.Git");
        settings.set("uselatest", true);
        settings.set("version", "2.44.0");
        settings.set("uselatest", false);

        let keys: Vec<_> = settings.keys().collect();
        assert_eq!(keys, vec!["id", "uselatest", "version"]);
        assert_eq!(settings.get("uselatest"), Some(&SettingValue::Bool(false)));
    }

    #[test]
    fn test_settings_policies() {
        let mut settings = Settings::new();
        settings.set_non_empty("Password", "");
        settings.set_if(false, "Hex", true);
        assert!(settings.is_empty());

        settings.set_non_empty("Password", "s3cret");
        settings.set_if(true, "Hex", true);
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn test_resource_id_omitted_when_empty() {
        let resource = Resource::new(ResourceKind::Registry, "", "desc");
        assert_eq!(resource.id(), None);
        assert!(resource.directives().allow_prerelease);

        let resource = resource.with_id("reg1").with_depends_on("pkg1");
        assert_eq!(resource.id(), Some("reg1"));
        assert_eq!(resource.depends_on(), Some("pkg1"));
    }

    #[test]
    fn test_settings_serialize_in_order() {
        let mut settings = Settings::new();
        settings.set("Key", "HKEY_LOCAL_MACHINE\\Software\\Test");
        settings.set("ValueData", vec!["a".to_string(), "b".to_string()]);
        settings.set("Force", false);

        let yaml = serde_yaml::to_string(&settings).unwrap();
        assert_eq!(
            yaml,
            "Key: HKEY_LOCAL_MACHINE\\Software\\Test\nValueData:\n- a\n- b\nForce: false\n"
        );
    }
}
