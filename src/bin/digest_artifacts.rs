//! Checksum utility for Riskscope model artifacts.
//!
//! Writes `checksums.json` with the SHA-256 of `scaler.json`, `model.json`
//! and `features.json`, so the three files are only ever loaded together.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin digest_artifacts -- <model_dir> [--check]
//! ```
//!
//! With `--check` the existing `checksums.json` is verified instead of
//! rewritten. In both modes the artifacts must parse and agree on shape.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use riskscope::adapters::json::{ArtifactChecksums, ARTIFACT_FILES, CHECKSUMS_FILE};
use riskscope::adapters::JsonArtifactStore;
use riskscope::ports::ArtifactSource;

fn usage() -> String {
    "Usage: digest_artifacts <model_dir> [--check]".to_string()
}

fn parse_args() -> Result<(PathBuf, bool)> {
    let mut dir = None;
    let mut check = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--check" => check = true,
            "-h" | "--help" => bail!(usage()),
            _ if dir.is_none() => dir = Some(PathBuf::from(arg)),
            _ => bail!(usage()),
        }
    }

    let dir = dir.with_context(usage)?;
    Ok((dir, check))
}

fn main() -> Result<()> {
    let (model_dir, check) = parse_args()?;

    // Refuse to bind files that would not load together.
    let bundle = JsonArtifactStore::new(&model_dir)
        .load()
        .with_context(|| format!("Artifacts in {model_dir:?} are not loadable"))?;

    let checksums_path = model_dir.join(CHECKSUMS_FILE);

    if check {
        let bytes = fs::read(&checksums_path)
            .with_context(|| format!("Failed to read {checksums_path:?}"))?;
        let recorded = ArtifactChecksums::from_slice(&bytes)?;
        for name in ARTIFACT_FILES {
            let data = fs::read(model_dir.join(name))
                .with_context(|| format!("Failed to read {name}"))?;
            recorded.verify(name, &data)?;
            println!("OK {name}");
        }
        return Ok(());
    }

    let checksums = ArtifactChecksums::compute(&model_dir, &ARTIFACT_FILES)?;
    let mut json = serde_json::to_string_pretty(&checksums)?;
    json.push('\n');
    fs::write(&checksums_path, json)
        .with_context(|| format!("Failed to write {checksums_path:?}"))?;

    println!("Wrote checksums: {checksums_path:?}");
    println!("Features bound: {}", bundle.manifest.len());
    for (name, digest) in &checksums.files {
        println!("  {name}  {digest}");
    }

    Ok(())
}
