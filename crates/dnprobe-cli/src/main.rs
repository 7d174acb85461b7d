mod container;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use dnprobe_core::hexdump::{HexDumpStyle, format_hex_dump};
use dnprobe_core::manifest::{manifest_tags_from_str, merge_tags};
use dnprobe_core::preset::{ParamKind, ParameterRecord, decode_preset};
use dnprobe_core::report::{PatchBlock, render_patch_report};
use dnprobe_core::sysex::{KeywordClassifier, TagClassifier, scan_sysex};

use container::MANIFEST_FILE;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DNPROBE_BUILD_COMMIT"),
    ", ",
    env!("DNPROBE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "dnprobe")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Inspect Digitone preset payloads and SysEx patch dumps.",
    long_about = None,
    after_help = "Examples:\n  dnprobe preset 'Hidden Tears.dn2pst' --pretty --stdout\n  dnprobe patches 'patches/*.dn2pst' -o patches.md\n  dnprobe sysex bank.syx -o patches.md --append\n  dnprobe dump hidden-tears --table"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode preset containers or unwrapped payloads into a JSON parameter report.
    Preset {
        /// Preset container (.dn2pst/.dn2prj), payload path, or glob pattern
        input: PathBuf,

        /// Manifest whose MetaInfo.Tags are attached to the report (overrides container manifests)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Include the payload hex dump in the report
        #[arg(long)]
        hexdump: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Write a Markdown summary (name, tags, hex dump) of preset containers or payloads.
    Patches {
        /// Preset container, payload path, or glob pattern
        input: PathBuf,

        /// Output Markdown path
        #[arg(short = 'o', long)]
        report: PathBuf,

        /// Append to an existing report instead of replacing it
        #[arg(long)]
        append: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Write a Markdown summary of every patch in SysEx dumps.
    Sysex {
        /// SysEx dump path or glob pattern
        input: PathBuf,

        /// Output Markdown path
        #[arg(short = 'o', long)]
        report: PathBuf,

        /// Append to an existing report instead of replacing it
        #[arg(long)]
        append: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// Print a hex dump of any file.
    Dump {
        /// File to dump
        input: PathBuf,

        /// Uppercase hex with a column header
        #[arg(long)]
        table: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Preset {
            input,
            manifest,
            report,
            stdout,
            pretty,
            compact,
            hexdump,
            quiet,
        } => cmd_preset(PresetArgs {
            input,
            manifest,
            report,
            stdout,
            pretty,
            compact,
            hexdump,
            quiet,
        }),
        Commands::Patches {
            input,
            report,
            append,
            quiet,
        } => cmd_patches(input, report, append, quiet),
        Commands::Sysex {
            input,
            report,
            append,
            quiet,
        } => cmd_sysex(input, report, append, quiet),
        Commands::Dump { input, table } => cmd_dump(input, table),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

struct PresetArgs {
    input: PathBuf,
    manifest: Option<PathBuf>,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    hexdump: bool,
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct PresetReport {
    input: String,
    bytes: usize,
    tags: Vec<String>,
    summary: BTreeMap<&'static str, usize>,
    parameters: ParameterRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    hexdump: Option<String>,
}

fn cmd_preset(args: PresetArgs) -> Result<(), CliError> {
    let inputs = resolve_inputs(&args.input)?;
    let explicit_tags = match args.manifest.as_ref() {
        Some(path) => Some(read_manifest_tags(path)?),
        None => None,
    };

    let mut reports = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let PresetInput {
            payload,
            manifest_tags,
        } = load_preset_input(input)?;
        let tags = explicit_tags
            .clone()
            .or(manifest_tags)
            .unwrap_or_default();
        let parameters = decode_preset(&payload).map_err(|err| {
            CliError::new(
                format!("failed to decode {}: {}", input.display(), err),
                Some("pass a .dn2pst container or its unwrapped preset payload".to_string()),
            )
        })?;
        let summary: BTreeMap<&'static str, usize> = parameters
            .kind_counts()
            .into_iter()
            .map(|(kind, count)| (kind.as_str(), count))
            .collect();
        info!(input = %input.display(), bytes = payload.len(), "decoded preset");
        reports.push(PresetReport {
            input: input.display().to_string(),
            bytes: payload.len(),
            tags,
            summary,
            hexdump: args
                .hexdump
                .then(|| format_hex_dump(&payload, &HexDumpStyle::canonical())),
            parameters,
        });
    }

    let json = if reports.len() == 1 {
        serialize_json(&reports[0], args.pretty, args.compact)?
    } else {
        serialize_json(&reports, args.pretty, args.compact)?
    };

    if args.stdout {
        print!("{}", json);
        return Ok(());
    }

    let report = args.report.ok_or_else(|| {
        CliError::new(
            "missing output path",
            Some("use -o/--report or --stdout".to_string()),
        )
    })?;
    ensure_distinct_output(&inputs, &report)?;
    write_output(&report, &json, false)?;
    if !args.quiet {
        let fixed = reports
            .iter()
            .filter_map(|rep| rep.summary.get(ParamKind::Fixed.as_str()))
            .sum::<usize>();
        if fixed > 0 {
            eprintln!("note: {} known-fixed parameters are not derived from bytes", fixed);
        }
        eprintln!("OK: report written -> {}", report.display());
    }
    Ok(())
}

fn cmd_patches(input: PathBuf, report: PathBuf, append: bool, quiet: bool) -> Result<(), CliError> {
    let inputs = resolve_inputs(&input)?;
    ensure_distinct_output(&inputs, &report)?;
    let classifier = KeywordClassifier::default();

    let loaded = inputs
        .iter()
        .map(|path| load_preset_input(path))
        .collect::<Result<Vec<_>, _>>()?;
    let mut blocks = Vec::with_capacity(inputs.len());
    for (ordinal, (path, preset)) in inputs.iter().zip(&loaded).enumerate() {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let manifest_tags = preset
            .manifest_tags
            .clone()
            .unwrap_or_else(|| sibling_manifest_tags(path));
        let tags = merge_tags(&manifest_tags, &classifier.classify(&name, ordinal));
        debug!(name = %name, tags = ?tags, "patch block");
        blocks.push(PatchBlock {
            name,
            tags,
            bytes: &preset.payload,
        });
    }

    let body = render_patch_report(&blocks, &HexDumpStyle::canonical());
    let continues = append && !report_is_empty(&report);
    let text = with_report_header("Preset patches", &input, &body, continues);
    write_output(&report, &text, append)?;
    if !quiet {
        eprintln!(
            "OK: {} patches written -> {}",
            blocks.len(),
            report.display()
        );
    }
    Ok(())
}

fn cmd_sysex(input: PathBuf, report: PathBuf, append: bool, quiet: bool) -> Result<(), CliError> {
    let inputs = resolve_inputs(&input)?;
    ensure_distinct_output(&inputs, &report)?;

    let payloads = inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;
    let mut blocks = Vec::new();
    for (path, payload) in inputs.iter().zip(&payloads) {
        if path.extension().and_then(|ext| ext.to_str()) != Some("syx") {
            warn!(input = %path.display(), "input does not have a .syx extension");
        }
        let frames = scan_sysex(payload).map_err(|err| {
            CliError::new(
                format!("{}: {}", path.display(), err),
                Some("expected a MIDI SysEx dump (F0 ... F7 frames)".to_string()),
            )
        })?;
        info!(input = %path.display(), frames = frames.len(), "scanned SysEx dump");
        blocks.extend(frames.iter().map(|frame| frame.block()));
    }

    let body = render_patch_report(&blocks, &HexDumpStyle::canonical());
    let continues = append && !report_is_empty(&report);
    let text = with_report_header("SysEx patches", &input, &body, continues);
    write_output(&report, &text, append)?;
    if !quiet {
        eprintln!(
            "OK: {} patches written -> {}",
            blocks.len(),
            report.display()
        );
    }
    Ok(())
}

fn cmd_dump(input: PathBuf, table: bool) -> Result<(), CliError> {
    validate_input_file(&input)?;
    let payload = read_input(&input)?;
    let style = if table {
        HexDumpStyle::table()
    } else {
        HexDumpStyle::canonical()
    };
    let dump = format_hex_dump(&payload, &style);
    let mut stdout = std::io::stdout().lock();
    if !dump.is_empty() {
        writeln!(stdout, "{}", dump).context("Failed to write to stdout")?;
    }
    Ok(())
}

fn serialize_json<T: Serialize>(value: &T, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

/// `continues` is set when appending to a report that already has content;
/// otherwise the title block is written.
fn with_report_header(title: &str, input: &Path, body: &str, continues: bool) -> String {
    let mut text = String::new();
    if continues {
        text.push('\n');
    } else {
        let generated = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string());
        text.push_str(&format!(
            "# {}\n\nsource: {}\ngenerated: {}\n\n",
            title,
            input.display(),
            generated
        ));
    }
    text.push_str(body);
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn report_is_empty(report: &Path) -> bool {
    fs::metadata(report)
        .map(|meta| meta.len() == 0)
        .unwrap_or(true)
}

struct PresetInput {
    payload: Vec<u8>,
    /// Tags from the container's own manifest, when the input is a container.
    manifest_tags: Option<Vec<String>>,
}

fn load_preset_input(path: &Path) -> Result<PresetInput, CliError> {
    let bytes = read_input(path)?;
    if !container::is_container(&bytes) {
        return Ok(PresetInput {
            payload: bytes,
            manifest_tags: None,
        });
    }

    let stem = path.file_stem().and_then(|stem| stem.to_str());
    let unwrapped = container::unwrap_container(&bytes, stem).map_err(|err| {
        CliError::new(
            format!("failed to unwrap {}: {:#}", path.display(), err),
            Some("expected a .dn2pst/.dn2prj zip holding one preset entry".to_string()),
        )
    })?;
    info!(
        input = %path.display(),
        entry = %unwrapped.entry,
        bytes = unwrapped.payload.len(),
        "unwrapped container"
    );
    Ok(PresetInput {
        payload: unwrapped.payload,
        manifest_tags: unwrapped.manifest_tags,
    })
}

fn read_manifest_tags(path: &Path) -> Result<Vec<String>, CliError> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    Ok(manifest_tags_from_str(&text))
}

fn sibling_manifest_tags(path: &Path) -> Vec<String> {
    let Some(manifest) = path.parent().map(|dir| dir.join(MANIFEST_FILE)) else {
        return Vec::new();
    };
    if !manifest.is_file() {
        return Vec::new();
    }
    match fs::read_to_string(&manifest) {
        Ok(text) => manifest_tags_from_str(&text),
        Err(err) => {
            warn!(manifest = %manifest.display(), error = %err, "unreadable manifest");
            Vec::new()
        }
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>, CliError> {
    let payload = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    Ok(payload)
}

fn write_output(report: &Path, text: &str, append: bool) -> Result<(), CliError> {
    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    if append {
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(report)
            .with_context(|| format!("Failed to open report: {}", report.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    } else {
        fs::write(report, text)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    }
    Ok(())
}

fn ensure_distinct_output(inputs: &[PathBuf], report: &Path) -> Result<(), CliError> {
    let Ok(report_abs) = fs::canonicalize(report) else {
        // Report does not exist yet, so it cannot be one of the inputs.
        return Ok(());
    };
    for input in inputs {
        let input_abs = fs::canonicalize(input)
            .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
        if input_abs == report_abs {
            return Err(CliError::new(
                format!("report path must differ from input: {}", report.display()),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a preset container, an unwrapped payload, or a .syx dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a preset container, an unwrapped payload, or a .syx dump".to_string()),
        ));
    }
    Ok(())
}

fn resolve_inputs(input: &Path) -> Result<Vec<PathBuf>, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        validate_input_file(input)?;
        return Ok(vec![input.to_path_buf()]);
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() && path.file_name().and_then(|n| n.to_str()) != Some(MANIFEST_FILE) {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
