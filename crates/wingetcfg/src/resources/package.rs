//! WinGet package resource

use log::debug;

use super::require;
use crate::error::Result;
use crate::types::{Ensure, Resource, ResourceKind};

/// Source used when none is given.
pub const DEFAULT_SOURCE: &str = "winget";

/// A package installed or removed through WinGet.
#[derive(Debug, Clone, Default)]
pub struct WinGetPackage {
    pub id: String,
    pub description: String,
    /// WinGet package identifier (e.g., "Mozilla.Firefox")
    pub package_id: String,
    /// Source name, "winget" when empty
    pub source: String,
    /// Pinned version; when set `uselatest` is forced off
    pub version: String,
    pub use_latest: bool,
}

impl WinGetPackage {
    pub fn new(package_id: &str) -> Self {
        Self {
            package_id: package_id.to_string(),
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

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn with_use_latest(mut self, use_latest: bool) -> Self {
        self.use_latest = use_latest;
        self
    }

    /// Ensure the package is installed.
    pub fn install(&self) -> Result<Resource> {
        self.build(Ensure::Present)
    }

    /// Ensure the package is not installed.
    pub fn uninstall(&self) -> Result<Resource> {
        self.build(Ensure::Absent)
    }

    /// Build the resource with an explicit ensure state.
    pub fn build(&self, ensure: Ensure) -> Result<Resource> {
        require("packageID", &self.package_id)?;

        let mut r = Resource::new(ResourceKind::WinGetPackage, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("id", self.package_id.as_str());
        let source = if self.source.is_empty() {
            DEFAULT_SOURCE
        } else {
            self.source.as_str()
        };
        settings.set("source", source);
        settings.set("uselatest", self.use_latest);

        if !self.version.is_empty() {
            settings.set("version", self.version.as_str());
            settings.set("uselatest", false);
        }

        settings.set("Ensure", ensure);

        debug!("built {} resource for {}", r.kind(), self.package_id);
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SettingValue;

    #[test]
    fn test_install_defaults() {
        let r = WinGetPackage::new("Mozilla.Firefox")
            .with_use_latest(true)
            .install()
            .unwrap();

        assert_eq!(r.kind(), ResourceKind::WinGetPackage);
        assert_eq!(r.id(), None);
        assert_eq!(r.setting("id").and_then(|v| v.as_str()), Some("Mozilla.Firefox"));
        assert_eq!(r.setting("source").and_then(|v| v.as_str()), Some("winget"));
        assert_eq!(r.setting("uselatest"), Some(&SettingValue::Bool(true)));
        assert!(r.setting("version").is_none());
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Present"));
        assert!(r.directives().allow_prerelease);
    }

    #[test]
    fn test_version_forces_use_latest_off() {
        let r = WinGetPackage::new("Git.Git")
            .with_version("2.44.0")
            .with_use_latest(true)
            .install()
            .unwrap();

        assert_eq!(r.setting("version").and_then(|v| v.as_str()), Some("2.44.0"));
        assert_eq!(r.setting("uselatest"), Some(&SettingValue::Bool(false)));
        let keys: Vec<_> = r.settings().keys().collect();
        assert_eq!(keys, vec!["id", "source", "uselatest", "version", "Ensure"]);
    }

    #[test]
    fn test_uninstall_with_custom_source() {
        let r = WinGetPackage::new("9NBLGGH4NNS1")
            .with_id("store-app")
            .with_description("Remove app")
            .with_source("msstore")
            .uninstall()
            .unwrap();

        assert_eq!(r.id(), Some("store-app"));
        assert_eq!(r.directives().description, "Remove app");
        assert_eq!(r.setting("source").and_then(|v| v.as_str()), Some("msstore"));
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Absent"));
    }

    #[test]
    fn test_empty_package_id_fails() {
        let err = WinGetPackage::new("").install().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "packageID cannot be empty");
    }
}
