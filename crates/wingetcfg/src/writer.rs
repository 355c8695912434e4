//! Writer for emitting configuration documents.
//!
//! Output is the schema header line followed by the YAML body.

use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::document::ConfigurationDocument;
use crate::error::Result;

/// First line of every emitted document.
pub const DSC_SCHEMA_HEADER: &str =
    "# yaml-language-server: $schema=https://aka.ms/configuration-dsc-schema/0.2";

/// Render a document to a string.
pub fn write_string(doc: &ConfigurationDocument) -> Result<String> {
    let body = serde_yaml::to_string(doc)?;
    Ok(format!("{DSC_SCHEMA_HEADER}\n{body}"))
}

/// Write a document to any sink, flushing before returning.
pub fn write_to<W: Write>(doc: &ConfigurationDocument, sink: &mut W) -> Result<()> {
    let content = write_string(doc)?;
    sink.write_all(content.as_bytes())?;
    sink.flush()?;
    Ok(())
}

/// Write a document to a file.
///
/// The file is created (or truncated), written and synced. On failure the
/// file may be left partially written.
pub fn write_file(doc: &ConfigurationDocument, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    write_to(doc, &mut file)?;
    file.sync_all()?;

    info!(
        "wrote {} ({} resources, {} assertions)",
        path.display(),
        doc.resources().len(),
        doc.assertions().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{RegistryEntry, WinGetPackage};
    use serde_yaml::Value;

    fn sample() -> ConfigurationDocument {
        let mut doc = ConfigurationDocument::new();
        doc.add_resource(
            WinGetPackage::new("Mozilla.Firefox")
                .with_id("firefox")
                .with_description("Install Firefox")
                .with_use_latest(true)
                .install()
                .unwrap(),
        );
        doc.add_resource(
            RegistryEntry::new("HKLM:\\SOFTWARE\\Contoso")
                .with_value_name("Enabled")
                .with_value_type("DWord")
                .with_value_data(["1"])
                .add_value()
                .unwrap()
                .with_depends_on("firefox"),
        );
        doc
    }

    fn body(output: &str) -> Value {
        serde_yaml::from_str(output).unwrap()
    }

    #[test]
    fn test_header_is_first_line() {
        let output = write_string(&sample()).unwrap();
        assert_eq!(output.lines().next(), Some(DSC_SCHEMA_HEADER));
        assert!(!output.contains("---"));
    }

    #[test]
    fn test_document_shape() {
        let output = write_string(&sample()).unwrap();
        let value = body(&output);
        let properties = &value["properties"];

        assert_eq!(properties["configurationVersion"].as_str(), Some("0.2.0"));
        assert!(properties.get("assertions").is_none());

        let resources = properties["resources"].as_sequence().unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(
            resources[0]["resource"].as_str(),
            Some("Microsoft.WinGet.DSC/WinGetPackage")
        );
        assert_eq!(resources[0]["id"].as_str(), Some("firefox"));
        assert_eq!(
            resources[0]["Directives"]["description"].as_str(),
            Some("Install Firefox")
        );
        assert_eq!(
            resources[0]["Directives"]["allowPrerelease"].as_bool(),
            Some(true)
        );
        assert_eq!(
            resources[0]["Settings"]["id"].as_str(),
            Some("Mozilla.Firefox")
        );
        assert_eq!(
            resources[1]["resource"].as_str(),
            Some("xPSDesiredStateConfiguration/xRegistry")
        );
        assert_eq!(resources[1]["dependsOn"].as_str(), Some("firefox"));
        assert_eq!(resources[1]["Settings"]["Hex"].as_bool(), Some(false));
    }

    #[test]
    fn test_empty_id_and_depends_on_are_omitted() {
        let output = write_string(&sample()).unwrap();
        let value = body(&output);
        let registry = &value["properties"]["resources"][1];

        assert!(registry.get("id").is_none());
        assert!(value["properties"]["resources"][0].get("dependsOn").is_none());
    }

    #[test]
    fn test_top_level_key_order() {
        let mut doc = sample();
        doc.add_assertion(WinGetPackage::new("Git.Git").install().unwrap());
        let output = write_string(&doc).unwrap();

        let assertions = output.find("  assertions:").unwrap();
        let resources = output.find("  resources:").unwrap();
        let version = output.find("  configurationVersion:").unwrap();
        assert!(assertions < resources && resources < version);
    }

    #[test]
    fn test_empty_document() {
        let output = write_string(&ConfigurationDocument::new()).unwrap();
        let value = body(&output);
        assert!(value["properties"].get("resources").is_none());
        assert!(value["properties"].get("assertions").is_none());
        assert_eq!(
            value["properties"]["configurationVersion"].as_str(),
            Some("0.2.0")
        );
    }

    #[test]
    fn test_write_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.winget");
        let second = dir.path().join("second.winget");
        let doc = sample();

        write_file(&doc, &first).unwrap();
        write_file(&doc, &second).unwrap();

        let a = std::fs::read(&first).unwrap();
        let b = std::fs::read(&second).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, write_string(&doc).unwrap().into_bytes());
        assert_eq!(doc.resources().len(), 2);
    }

    #[test]
    fn test_write_file_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.winget");

        let err = write_file(&sample(), &path).unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Io);
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        sample().write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(DSC_SCHEMA_HEADER));
        assert!(text.contains("configurationVersion:"));
    }
}
