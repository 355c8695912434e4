use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::commands::expand_path;
use crate::manifest::Manifest;
use crate::ui;

pub fn run(ctx: &Context, manifest: &Path) -> Result<()> {
    let path = expand_path(manifest);
    let manifest = Manifest::load(&path)?;
    let doc = manifest.build_document()?;

    if doc.is_empty() {
        ui::warn(&format!("{} defines no resources", path.display()));
        return Ok(());
    }

    if ctx.quiet {
        return Ok(());
    }

    ui::success(&format!("{} is valid", path.display()));
    ui::kv("resources", &doc.resources().len().to_string());
    ui::kv("assertions", &doc.assertions().len().to_string());

    if ctx.verbose > 0 {
        for resource in doc.assertions().iter().chain(doc.resources()) {
            ui::info(&format!(
                "{} {}",
                resource.kind(),
                resource.id().unwrap_or("")
            ));
        }
    }

    Ok(())
}
