use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use nodeweave::{convert, ConverterConfigBuilder, Settings};

/// Turn proxy share links into a Clash configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Text file with links; `LABEL=FILE` sets the source label (defaults to the path)
    #[arg(short, long, value_name = "[LABEL=]FILE", required = true)]
    input: Vec<String>,

    /// Output file (defaults to output.directory/output.clash-config-file)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,
}

/// Split `LABEL=FILE`; labels may themselves contain `=`.
///
/// An argument naming an existing file is always taken as a bare path.
fn split_input(input: &str) -> (String, PathBuf) {
    if Path::new(input).is_file() {
        return (input.to_string(), PathBuf::from(input));
    }
    match input.rsplit_once('=') {
        Some((label, file)) if !label.is_empty() && !file.is_empty() => {
            (label.to_string(), PathBuf::from(file))
        }
        _ => (input.to_string(), PathBuf::from(input)),
    }
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let output = args.output.clone().unwrap_or_else(|| settings.output_path());

    let mut builder = ConverterConfigBuilder::new().settings(settings);
    for input in &args.input {
        let (label, file) = split_input(input);
        let text = fs::read_to_string(&file)
            .with_context(|| format!("failed to read input {}", file.display()))?;
        builder = builder.add_text(&text, &label);
    }

    let result = match convert(builder.build()) {
        Ok(result) => result,
        Err(e) => {
            warn!("No nodes to write, {} not updated", output.display());
            return Err(e.into());
        }
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let existed = output.exists();
    fs::write(&output, &result.content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        "{} {} with {} nodes",
        if existed { "Updated" } else { "Created" },
        output.display(),
        result.stats.accepted
    );
    Ok(())
}
