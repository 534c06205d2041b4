//! Command handlers for the `sgc` binary.
//!
//! Argument parsing and the pass itself live here so they can be tested
//! without spawning the binary; `main.rs` only dispatches and exits.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use sg_diagnostic::{ColorMode, DiagnosticQueue, ErrorCode, TerminalEmitter};
use sg_emit::{Dialect, EmitterRegistry};
use tracing::warn;

use crate::{
    manifest, ArtifactSink, CliError, DirectoryArtifacts, GenerationDriver, GeneratorConfig,
    PassContext, PassSummary, TypeCandidate,
};

/// Options of `sgc generate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    pub manifest: PathBuf,
    pub config: GeneratorConfig,
    pub color: ColorMode,
}

/// Parse the arguments following `generate`.
pub fn parse_generate_args(args: &[String]) -> Result<GenerateOptions, CliError> {
    let mut manifest = None;
    let mut config = GeneratorConfig::default();
    let mut color = ColorMode::Auto;
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "-o" {
            let Some(dir) = args.get(i + 1) else {
                return Err(CliError::MissingValue("-o"));
            };
            config.output_dir = PathBuf::from(dir);
            i += 2;
            continue;
        }
        if let Some(name) = arg.strip_prefix("--dialect=") {
            let dialect =
                Dialect::from_name(name).ok_or_else(|| CliError::UnknownDialect(name.to_owned()))?;
            config.dialect = dialect;
        } else if let Some(suffix) = arg.strip_prefix("--suffix=") {
            config.suffix = suffix.to_owned();
        } else if arg == "--color=always" {
            color = ColorMode::Always;
        } else if arg == "--color=never" || arg == "--no-color" {
            color = ColorMode::Never;
        } else if !arg.starts_with('-') && manifest.is_none() {
            manifest = Some(PathBuf::from(arg));
        } else {
            return Err(CliError::UnexpectedArgument(arg.to_owned()));
        }
        i += 1;
    }
    let manifest = manifest.ok_or(CliError::MissingValue("<manifest.json>"))?;
    Ok(GenerateOptions {
        manifest,
        config,
        color,
    })
}

/// Run one pass over `candidates`, writing diagnostics to `out`.
pub fn generate_with(
    candidates: &[TypeCandidate],
    config: &GeneratorConfig,
    artifacts: &mut dyn ArtifactSink,
    out: &mut TerminalEmitter<impl Write>,
) -> Result<PassSummary, CliError> {
    let driver = GenerationDriver::new(config.clone());
    let mut ctx = PassContext::new();
    let mut diagnostics = DiagnosticQueue::new();
    let summary = driver.run_pass(&mut ctx, candidates, artifacts, &mut diagnostics);

    let (shown, suppressed) = diagnostics.for_display();
    let report = out
        .emit_all(shown)
        .and_then(|()| out.emit_suppressed(suppressed))
        .and_then(|()| {
            out.emit_summary(diagnostics.error_count(), diagnostics.warning_count())
        });
    if let Err(error) = report {
        warn!(%error, "could not write diagnostics");
    }

    if summary.failed > 0 {
        return Err(CliError::GenerationFailed {
            errors: summary.failed,
        });
    }
    Ok(summary)
}

/// `sgc generate`: load the manifest and write sources below the output dir.
pub fn generate(options: &GenerateOptions) -> Result<PassSummary, CliError> {
    let candidates = manifest::load(&options.manifest)?;
    let mut artifacts = DirectoryArtifacts::new(&options.config.output_dir);
    let is_tty = io::stderr().is_terminal();
    let mut out = TerminalEmitter::with_color_mode(io::stderr(), options.color, is_tty);
    generate_with(&candidates, &options.config, &mut artifacts, &mut out)
}

/// Known dialects and whether a built-in generator handles each.
pub fn dialect_support() -> Vec<(Dialect, bool)> {
    let registry = EmitterRegistry::with_defaults();
    Dialect::ALL
        .iter()
        .map(|&dialect| (dialect, registry.contains(dialect)))
        .collect()
}

/// One-line description of a diagnostic code, for `sgc explain`.
pub fn explain(code: &str) -> Option<&'static str> {
    ErrorCode::parse(&code.to_ascii_uppercase()).map(|code| code.description())
}
