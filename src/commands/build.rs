use anyhow::{Context as _, Result};
use std::io;

use crate::Context;
use crate::cli::BuildArgs;
use crate::commands::expand_path;
use crate::manifest::Manifest;
use crate::ui;

pub fn run(ctx: &Context, args: BuildArgs) -> Result<()> {
    let manifest_path = expand_path(&args.manifest);
    let manifest = Manifest::load(&manifest_path)?;
    let doc = manifest.build_document()?;

    match args.output {
        Some(output) => {
            let output = expand_path(&output);
            doc.write_file(&output)
                .with_context(|| format!("Could not write {}", output.display()))?;

            if !ctx.quiet {
                ui::success(&format!(
                    "Wrote {} ({}, {})",
                    output.display(),
                    ui::plural(doc.resources().len(), "resource"),
                    ui::plural(doc.assertions().len(), "assertion")
                ));
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            doc.write_to(&mut stdout)
                .context("Could not write configuration to stdout")?;
        }
    }

    Ok(())
}
