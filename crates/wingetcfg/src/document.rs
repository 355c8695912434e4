//! The configuration document: resources, assertions and schema version.

use log::debug;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::types::Resource;
use crate::writer;

/// Schema version written to `configurationVersion`.
pub const CONFIGURATION_VERSION: &str = "0.2.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Properties {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    assertions: Vec<Resource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resources: Vec<Resource>,
    #[serde(rename = "configurationVersion")]
    configuration_version: String,
}

/// An ordered collection of resources and assertions.
///
/// Entries are only ever appended. Writing the document does not consume or
/// reset it, so it can be emitted any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationDocument {
    properties: Properties,
}

impl Default for ConfigurationDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            properties: Properties {
                assertions: Vec::new(),
                resources: Vec::new(),
                configuration_version: CONFIGURATION_VERSION.to_string(),
            },
        }
    }

    /// Append a resource to enforce.
    pub fn add_resource(&mut self, resource: Resource) {
        debug!(
            "adding resource {} ({})",
            resource.id().unwrap_or("<no id>"),
            resource.kind()
        );
        self.properties.resources.push(resource);
    }

    /// Append a resource used as a pre-condition.
    pub fn add_assertion(&mut self, resource: Resource) {
        debug!(
            "adding assertion {} ({})",
            resource.id().unwrap_or("<no id>"),
            resource.kind()
        );
        self.properties.assertions.push(resource);
    }

    pub fn resources(&self) -> &[Resource] {
        &self.properties.resources
    }

    pub fn assertions(&self) -> &[Resource] {
        &self.properties.assertions
    }

    pub fn configuration_version(&self) -> &str {
        &self.properties.configuration_version
    }

    /// Total number of resources and assertions.
    pub fn len(&self) -> usize {
        self.properties.resources.len() + self.properties.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the document, schema header included.
    pub fn to_yaml(&self) -> Result<String> {
        writer::write_string(self)
    }

    /// Write the document to `sink` and flush it.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        writer::write_to(self, sink)
    }

    /// Create `path`, write the document and sync it to disk.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        writer::write_file(self, path)
    }
}
