//! MSI package resource (xMsiPackage)

use log::debug;

use super::require;
use crate::error::Result;
use crate::types::{Ensure, HashAlgorithm, Resource, ResourceKind};

/// An MSI package installed or removed from a local or network path.
#[derive(Debug, Clone, Default)]
pub struct MsiPackage {
    pub id: String,
    pub description: String,
    /// Product code GUID of the package
    pub product_id: String,
    /// Path or URL of the .msi file
    pub path: String,
    /// Extra msiexec arguments
    pub arguments: String,
    /// Expected file hash; emitted only together with `hash_algorithm`
    pub file_hash: String,
    pub hash_algorithm: Option<HashAlgorithm>,
    /// Where msiexec writes its log
    pub log_path: String,
}

impl MsiPackage {
    pub fn new(product_id: &str, path: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            path: path.to_string(),
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

    pub fn with_arguments(mut self, arguments: &str) -> Self {
        self.arguments = arguments.to_string();
        self
    }

    /// Verify the file against `hash` before installing.
    pub fn with_file_hash(mut self, algorithm: HashAlgorithm, hash: &str) -> Self {
        self.hash_algorithm = Some(algorithm);
        self.file_hash = hash.to_string();
        self
    }

    pub fn with_log_path(mut self, log_path: &str) -> Self {
        self.log_path = log_path.to_string();
        self
    }

    pub fn install(&self) -> Result<Resource> {
        self.build(Ensure::Present)
    }

    pub fn uninstall(&self) -> Result<Resource> {
        self.build(Ensure::Absent)
    }

    pub fn build(&self, ensure: Ensure) -> Result<Resource> {
        require("productID", &self.product_id)?;
        require("path", &self.path)?;

        let mut r = Resource::new(ResourceKind::MsiPackage, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("ProductId", self.product_id.as_str());
        settings.set("Path", self.path.as_str());
        settings.set_non_empty("Arguments", &self.arguments);

        if let Some(algorithm) = self.hash_algorithm
            && !self.file_hash.is_empty()
        {
            settings.set("HashAlgorithm", algorithm.as_str());
            settings.set("FileHash", self.file_hash.as_str());
        }

        settings.set_non_empty("LogPath", &self.log_path);
        settings.set("Ensure", ensure);

        debug!("built {} resource for {}", r.kind(), self.product_id);
        Ok(r)
    }
}
