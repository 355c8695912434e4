//! Ad-hoc PowerShell script resource
//!
//! There is no stock DSC resource that runs arbitrary PowerShell, so this
//! targets a custom provider. Nothing is validated.

use log::debug;

use crate::error::Result;
use crate::types::{Resource, ResourceKind};

#[derive(Debug, Clone, Default)]
pub struct PowerShellScript {
    pub id: String,
    pub description: String,
    pub name: String,
    /// Script body
    pub script: String,
    /// Execution mode understood by the provider (e.g., "once", "always")
    pub script_run: String,
}

impl PowerShellScript {
    pub fn new(name: &str, script: &str) -> Self {
        Self {
            name: name.to_string(),
            script: script.to_string(),
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

    pub fn with_script_run(mut self, script_run: &str) -> Self {
        self.script_run = script_run.to_string();
        self
    }

    pub fn build(&self) -> Result<Resource> {
        let mut r = Resource::new(ResourceKind::PowerShell, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("Script", self.script.as_str());
        settings.set_non_empty("ScriptRun", &self.script_run);
        settings.set("Name", self.name.as_str());

        debug!("built {} resource {}", r.kind(), self.name);
        Ok(r)
    }
}
