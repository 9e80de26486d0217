//! `jsx-to-tsx` command line front end.

use anyhow::{bail, Context, Result};
use clap::Parser;
use jsx_to_tsx_native::{
    convert_batch, write_archive, BatchResult, ConversionConfig, ConversionLevel, ErrorDetail,
    FileDiagnostics, SourceFile,
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["jsx", "js"];

#[derive(Debug, Parser)]
#[command(name = "jsx-to-tsx", version, about = "Convert React JSX components to typed TSX")]
struct Cli {
    /// Files or directories to convert. Directories are searched for .jsx and .js files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Conversion level: basic, standard or advanced.
    #[arg(long)]
    level: Option<ConversionLevel>,

    /// Prefix for generated props interface names.
    #[arg(long)]
    prefix: Option<String>,

    /// Suffix for generated props interface names.
    #[arg(long)]
    suffix: Option<String>,

    /// JSON conversion config. Flags on the command line take precedence.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write converted files into this directory.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Write converted files into a ZIP archive.
    #[arg(long, value_name = "FILE")]
    archive: Option<PathBuf>,

    /// Print the batch result as JSON on stdout.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn conversion_config(&self) -> Result<ConversionConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                ConversionConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => ConversionConfig::default(),
        };

        if let Some(level) = self.level {
            config.conversion_level = level;
        }
        if let Some(prefix) = &self.prefix {
            config.custom_interface_naming = true;
            config.interface_prefix = prefix.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.custom_interface_naming = true;
            config.interface_suffix = suffix.clone();
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when at least one file failed to convert.
fn run(cli: Cli) -> Result<bool> {
    let config = cli.conversion_config()?;
    let files = collect_sources(&cli.inputs)?;
    if files.is_empty() {
        bail!("no .jsx or .js files found");
    }

    let result = convert_batch(&files, &config);
    report_diagnostics(&result);

    if cli.json {
        let stdout = std::io::stdout();
        serde_json::to_writer_pretty(stdout.lock(), &result)?;
        println!();
    }
    if let Some(dir) = &cli.out_dir {
        write_tree(dir, &result.converted_files)?;
    }
    if let Some(path) = &cli.archive {
        write_archive(path, &result.converted_files)
            .with_context(|| format!("writing archive {}", path.display()))?;
    }
    if !cli.json && cli.out_dir.is_none() && cli.archive.is_none() {
        print_to_stdout(&result.converted_files)?;
    }

    Ok(result.is_clean())
}

/// Reads every input. Files under a directory are named relative to it.
fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_source(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            for path in found {
                let name = path.strip_prefix(input).unwrap_or(&path);
                files.push(read_source(&path, name)?);
            }
        } else {
            let name = input.file_name().map(Path::new).unwrap_or(input);
            files.push(read_source(input, name)?);
        }
    }
    Ok(files)
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn read_source(path: &Path, name: &Path) -> Result<SourceFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let name = name.to_string_lossy().replace('\\', "/");
    Ok(SourceFile::new(name, content))
}

fn write_tree(dir: &Path, files: &[SourceFile]) -> Result<()> {
    for file in files {
        let path = dir.join(&file.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&path, &file.content).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn print_to_stdout(files: &[SourceFile]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match files {
        [single] => out.write_all(single.content.as_bytes())?,
        _ => {
            for file in files {
                writeln!(out, "// ── {} ──", file.name)?;
                out.write_all(file.content.as_bytes())?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn report_diagnostics(result: &BatchResult) {
    for file in &result.errors {
        eprint!("{}", render_file_diagnostics(file));
    }
    for file in &result.warnings {
        eprint!("{}", render_file_diagnostics(file));
    }
}

fn render_file_diagnostics(file: &FileDiagnostics) -> String {
    file.errors
        .iter()
        .map(|detail| render_detail(&file.file_name, detail))
        .collect()
}

fn render_detail(file_name: &str, detail: &ErrorDetail) -> String {
    let mut out = format!(
        "{}[{}]: {}\n  --> {}:{}:{}\n",
        detail.severity, detail.code, detail.message, file_name, detail.line, detail.column
    );
    if let Some(snippet) = &detail.snippet {
        for line in snippet.lines() {
            out.push_str("   ");
            out.push_str(line);
            out.push('\n');
        }
    }
    for suggestion in &detail.suggestions {
        out.push_str("  help: ");
        out.push_str(suggestion);
        out.push('\n');
    }
    out
}
