//! TOML manifest describing the resources of a configuration document.
//!
//! Each `[[resources]]` or `[[assertions]]` entry maps onto one builder call
//! in `wingetcfg`; the manifest adds no semantics of its own.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use wingetcfg::{
    ConfigurationDocument, GroupMembers, HashAlgorithm, LocalGroup, LocalUser, MsiPackage,
    PowerShellScript, RegistryEntry, Resource, WinGetPackage,
};

/// Environment variables consulted for the hostname, in order.
const HOSTNAME_VARS: [&str; 2] = ["COMPUTERNAME", "HOSTNAME"];

#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Hostname used to qualify local group members
    #[serde(default)]
    pub hostname: Option<String>,

    /// Qualify bare member names with the hostname
    #[serde(default = "default_true")]
    pub qualify_members: bool,

    #[serde(default)]
    pub resources: Vec<Entry>,

    #[serde(default)]
    pub assertions: Vec<Entry>,
}

fn default_true() -> bool {
    true
}

/// One resource definition.
#[derive(Debug, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub depends_on: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub spec: EntrySpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntrySpec {
    Package {
        #[serde(default)]
        action: PackageAction,
        #[serde(default)]
        package_id: String,
        #[serde(default)]
        source: String,
        #[serde(default)]
        version: String,
        #[serde(default)]
        use_latest: bool,
    },
    Msi {
        #[serde(default)]
        action: PackageAction,
        #[serde(default)]
        product_id: String,
        #[serde(default)]
        path: String,
        #[serde(default)]
        arguments: String,
        #[serde(default)]
        file_hash: String,
        #[serde(default)]
        hash_algorithm: Option<String>,
        #[serde(default)]
        log_path: String,
    },
    User {
        #[serde(default)]
        action: AccountAction,
        #[serde(default)]
        username: String,
        #[serde(default)]
        disabled: bool,
        #[serde(default)]
        full_name: String,
        #[serde(default)]
        password: String,
        #[serde(default)]
        password_change_not_allowed: bool,
        #[serde(default)]
        password_change_required: bool,
        #[serde(default)]
        password_never_expires: bool,
    },
    Group {
        #[serde(default)]
        action: AccountAction,
        #[serde(default)]
        group_name: String,
        #[serde(default)]
        members: String,
    },
    GroupMembers {
        #[serde(default)]
        action: MembershipAction,
        #[serde(default)]
        group_name: String,
        #[serde(default)]
        members: String,
    },
    Registry {
        #[serde(default)]
        action: RegistryAction,
        #[serde(default)]
        key: String,
        #[serde(default)]
        value_name: String,
        #[serde(default)]
        value_type: String,
        #[serde(default)]
        value_data: Vec<String>,
        #[serde(default)]
        hex: bool,
        #[serde(default)]
        force: bool,
    },
    Script {
        #[serde(default)]
        name: String,
        #[serde(default)]
        script: String,
        #[serde(default)]
        script_run: String,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageAction {
    #[default]
    Install,
    Uninstall,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    #[default]
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipAction {
    #[default]
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryAction {
    AddKey,
    UpdateDefaultValue,
    #[default]
    AddValue,
    RemoveKey,
    RemoveValue,
}

impl EntrySpec {
    /// Manifest name of this entry's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            EntrySpec::Package { .. } => "package",
            EntrySpec::Msi { .. } => "msi",
            EntrySpec::User { .. } => "user",
            EntrySpec::Group { .. } => "group",
            EntrySpec::GroupMembers { .. } => "group_members",
            EntrySpec::Registry { .. } => "registry",
            EntrySpec::Script { .. } => "script",
        }
    }
}

impl Entry {
    /// Build the resource this entry describes.
    ///
    /// `hostname` is passed to group builders for member qualification.
    pub fn build(&self, hostname: Option<&str>) -> wingetcfg::Result<Resource> {
        let id = self.id.as_str();
        let description = self.description.as_str();

        let resource = match &self.spec {
            EntrySpec::Package {
                action,
                package_id,
                source,
                version,
                use_latest,
            } => {
                let package = WinGetPackage::new(package_id)
                    .with_id(id)
                    .with_description(description)
                    .with_source(source)
                    .with_version(version)
                    .with_use_latest(*use_latest);
                match action {
                    PackageAction::Install => package.install()?,
                    PackageAction::Uninstall => package.uninstall()?,
                }
            }
            EntrySpec::Msi {
                action,
                product_id,
                path,
                arguments,
                file_hash,
                hash_algorithm,
                log_path,
            } => {
                let mut package = MsiPackage::new(product_id, path)
                    .with_id(id)
                    .with_description(description)
                    .with_arguments(arguments)
                    .with_log_path(log_path);
                if let Some(algorithm) = hash_algorithm {
                    let algorithm: HashAlgorithm = algorithm.parse()?;
                    package = package.with_file_hash(algorithm, file_hash);
                }
                match action {
                    PackageAction::Install => package.install()?,
                    PackageAction::Uninstall => package.uninstall()?,
                }
            }
            EntrySpec::User {
                action,
                username,
                disabled,
                full_name,
                password,
                password_change_not_allowed,
                password_change_required,
                password_never_expires,
            } => {
                let user = LocalUser::new(username)
                    .with_id(id)
                    .with_description(description)
                    .with_disabled(*disabled)
                    .with_full_name(full_name)
                    .with_password(password)
                    .with_password_change_not_allowed(*password_change_not_allowed)
                    .with_password_change_required(*password_change_required)
                    .with_password_never_expires(*password_never_expires);
                match action {
                    AccountAction::Add => user.add_or_modify()?,
                    AccountAction::Remove => user.remove()?,
                }
            }
            EntrySpec::Group {
                action,
                group_name,
                members,
            } => {
                let mut group = LocalGroup::new(group_name)
                    .with_id(id)
                    .with_description(description)
                    .with_members(members);
                if let Some(host) = hostname {
                    group = group.qualify_with_hostname(host);
                }
                match action {
                    AccountAction::Add => group.add_or_modify()?,
                    AccountAction::Remove => group.remove()?,
                }
            }
            EntrySpec::GroupMembers {
                action,
                group_name,
                members,
            } => {
                let mut membership = GroupMembers::new(group_name, members).with_id(id);
                if let Some(host) = hostname {
                    membership = membership.qualify_with_hostname(host);
                }
                match action {
                    MembershipAction::Include => membership.include()?,
                    MembershipAction::Exclude => membership.exclude()?,
                }
            }
            EntrySpec::Registry {
                action,
                key,
                value_name,
                value_type,
                value_data,
                hex,
                force,
            } => {
                let entry = RegistryEntry::new(key)
                    .with_id(id)
                    .with_description(description)
                    .with_value_name(value_name)
                    .with_value_type(value_type)
                    .with_value_data(value_data.iter().cloned())
                    .with_hex(*hex)
                    .with_force(*force);
                match action {
                    RegistryAction::AddKey => entry.add_key()?,
                    RegistryAction::UpdateDefaultValue => entry.update_default_value()?,
                    RegistryAction::AddValue => entry.add_value()?,
                    RegistryAction::RemoveKey => entry.remove_key()?,
                    RegistryAction::RemoveValue => entry.remove_value()?,
                }
            }
            EntrySpec::Script {
                name,
                script,
                script_run,
            } => PowerShellScript::new(name, script)
                .with_id(id)
                .with_description(description)
                .with_script_run(script_run)
                .build()?,
        };

        Ok(resource.with_depends_on(&self.depends_on))
    }
}

impl Manifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read manifest: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML format in manifest")
    }

    /// Hostname to qualify members with, taken from the manifest or the
    /// environment. `None` when qualification is disabled.
    pub fn resolve_hostname(&self) -> Option<String> {
        self.resolve_hostname_with(|var| std::env::var(var).ok())
    }

    fn resolve_hostname_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.qualify_members {
            return None;
        }
        self.hostname
            .clone()
            .filter(|h| !h.is_empty())
            .or_else(|| {
                HOSTNAME_VARS
                    .iter()
                    .find_map(|&var| lookup(var).filter(|h| !h.is_empty()))
            })
    }

    /// Build every entry into a document.
    pub fn build_document(&self) -> Result<ConfigurationDocument> {
        let hostname = self.resolve_hostname();
        if self.qualify_members && hostname.is_none() && self.has_members() {
            log::warn!("no hostname available, group members will not be qualified");
        }
        self.build_document_with(hostname.as_deref())
    }

    fn build_document_with(&self, hostname: Option<&str>) -> Result<ConfigurationDocument> {
        let mut doc = ConfigurationDocument::new();

        for (i, entry) in self.assertions.iter().enumerate() {
            let resource = entry
                .build(hostname)
                .with_context(|| format!("assertions[{i}] ({})", entry.spec.kind()))?;
            doc.add_assertion(resource);
        }

        for (i, entry) in self.resources.iter().enumerate() {
            let resource = entry
                .build(hostname)
                .with_context(|| format!("resources[{i}] ({})", entry.spec.kind()))?;
            doc.add_resource(resource);
        }

        Ok(doc)
    }

    fn has_members(&self) -> bool {
        self.resources
            .iter()
            .chain(&self.assertions)
            .any(|e| matches!(e.spec, EntrySpec::Group { .. } | EntrySpec::GroupMembers { .. }))
    }
}
