//! # wingetcfg
//!
//! Typed builders for WinGet DSC configuration documents.
//!
//! This crate provides functionality for:
//! - Building resources (WinGet packages, MSI packages, local users and
//!   groups, registry keys and values, PowerShell scripts) with input
//!   validation
//! - Assembling them into an ordered configuration document
//! - Writing the document as YAML, prefixed by the DSC schema header
//!
//! Interpreting or applying the resulting configuration is left to WinGet.
//!
//! ## Example
//!
//! ```no_run
//! use wingetcfg::{ConfigurationDocument, RegistryEntry, WinGetPackage};
//! use std::path::Path;
//!
//! let mut doc = ConfigurationDocument::new();
//!
//! let firefox = WinGetPackage::new("Mozilla.Firefox")
//!     .with_id("firefox")
//!     .with_description("Install Firefox")
//!     .install()?;
//! doc.add_resource(firefox);
//!
//! let telemetry = RegistryEntry::new("HKLM:\\SOFTWARE\\Policies\\Mozilla\\Firefox")
//!     .with_value_name("DisableTelemetry")
//!     .with_value_type("DWord")
//!     .with_value_data(["1"])
//!     .add_value()?
//!     .with_depends_on("firefox");
//! doc.add_resource(telemetry);
//!
//! doc.write_file(Path::new("configuration.winget"))?;
//! # Ok::<(), wingetcfg::Error>(())
//! ```

#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod resources;
pub mod types;
pub mod validate;
pub mod writer;

pub use document::{CONFIGURATION_VERSION, ConfigurationDocument};
pub use error::{Error, ErrorCategory, Result};
pub use resources::{
    GroupMembers, LocalGroup, LocalUser, MsiPackage, PowerShellScript, RegistryEntry,
    WinGetPackage,
};
pub use types::{
    Directives, Ensure, HashAlgorithm, RegistryValueType, Resource, ResourceKind, SettingValue,
    Settings,
};
pub use validate::{is_valid_registry_value_type, normalize_ensure, qualify_members};
pub use writer::DSC_SCHEMA_HEADER;
