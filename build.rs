//! Build script for the Last.fm signing proxy.
//!
//! Copies `.env.example` into the local data directory so a configuration
//! template sits next to the place where [`lfmproxy::config::load_env`] looks
//! for the real `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies the configuration template into the local data directory.
///
/// The template is looked up in the crate root. The destination is:
/// - Linux: `~/.local/share/lfmproxy/.env.example`
/// - macOS: `~/Library/Application Support/lfmproxy/.env.example`
/// - Windows: `%LOCALAPPDATA%/lfmproxy/.env.example`
///
/// Failures only produce a cargo warning.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("lfmproxy");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // Read-only home directories (CI, sandboxes) must not break the build.
    let copied = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::read_to_string(&env_example_path))
        .and_then(|contents| fs::write(out_dir.join(".env.example"), contents));
    if let Err(e) = copied {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
