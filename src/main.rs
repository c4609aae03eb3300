use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use chordmap::cli::{CliArgs, OutputTarget, RunConfig};
use chordmap::keymap::{compile_with, load_table};
use chordmap::output::{existing_records, render_json, splice_manifest};
use chordmap::tracing::CompileSummary;

fn main() -> Result<()> {
    chordmap::tracing::init();

    let args = CliArgs::parse();
    let generator = args.load_config().map_err(anyhow::Error::msg)?;
    let config = args.into_config(generator);

    run(&config)
}

fn run(config: &RunConfig) -> Result<()> {
    let table = load_table(config.overlay.as_deref()).context("Failed to build key table")?;
    let records = compile_with(table, &config.generator.compile_options())
        .context("Failed to compile key table")?;
    tracing::info!("Compiled {} keybinding records", records.len());

    match &config.target {
        OutputTarget::Stdout => {
            let json = render_json(&records, config.generator.pretty)?;
            std::io::stdout()
                .write_all(json.as_bytes())
                .context("Failed to write to stdout")?;
        }
        OutputTarget::File(path) => {
            let json = render_json(&records, config.generator.pretty)?;
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        OutputTarget::Manifest(path) => {
            let manifest = fs::read_to_string(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;

            let before = match existing_records(&manifest) {
                Ok(existing) => Some(CompileSummary::from_records(&existing)),
                Err(e) => {
                    tracing::warn!("Could not read existing keybindings: {}", e);
                    None
                }
            };

            let spliced = splice_manifest(&manifest, &records)
                .with_context(|| format!("Failed to update manifest {}", path.display()))?;
            fs::write(path, spliced)
                .with_context(|| format!("Failed to write manifest {}", path.display()))?;

            let after = CompileSummary::from_records(&records);
            match before.and_then(|before| before.diff(&after)) {
                Some(changes) => tracing::info!("Updated {}: {}", path.display(), changes),
                None => tracing::info!("Updated {}", path.display()),
            }
        }
    }

    Ok(())
}
