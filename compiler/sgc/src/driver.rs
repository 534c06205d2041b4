//! Per-type generation and whole passes.

use std::path::PathBuf;

use sg_derive::{derive_method, DeriveError, DerivedMethod};
use sg_diagnostic::{
    declared_properties_only, generation_failed, ineffective_exclusion, DiagnosticSink,
    ErrorGuaranteed,
};
use sg_emit::{render, Dialect, EmitterRegistry};
use sg_model::ClassDef;
use tracing::{debug, trace, warn};

use crate::{
    artifact_path, ArtifactSink, GenerationError, GeneratorConfig, Markers, PassContext,
    TypeCandidate,
};

/// Why a candidate produced no file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The type carries no generation marker.
    Unmarked,
    /// The type was already handled in this pass.
    AlreadyProcessed,
    /// No source generator is registered for the dialect.
    NoGenerator(Dialect),
}

/// Result of offering one candidate to the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A file was written at this path, relative to the artifact root.
    Generated(PathBuf),
    Skipped(SkipReason),
    /// A fatal diagnostic was reported for the type.
    Failed(ErrorGuaranteed),
}

/// Counts for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PassSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Generated(_) => self.generated += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    /// Proof of failure, if any type failed.
    pub fn error_guaranteed(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.failed)
    }
}

/// Builds companion classes and hands them to a source generator.
pub struct GenerationDriver {
    config: GeneratorConfig,
    registry: EmitterRegistry,
}

impl GenerationDriver {
    /// A driver using the built-in generators.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_registry(config, EmitterRegistry::with_defaults())
    }

    pub fn with_registry(config: GeneratorConfig, registry: EmitterRegistry) -> Self {
        GenerationDriver { config, registry }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Start a new pass in `ctx` and offer every candidate in order.
    pub fn run_pass(
        &self,
        ctx: &mut PassContext,
        candidates: &[TypeCandidate],
        artifacts: &mut dyn ArtifactSink,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> PassSummary {
        ctx.start_pass();
        let mut summary = PassSummary::default();
        for candidate in candidates {
            let outcome = self.generate(ctx, candidate, artifacts, diagnostics);
            summary.record(&outcome);
        }
        debug!(
            pass = ctx.pass_number(),
            generated = summary.generated,
            skipped = summary.skipped,
            failed = summary.failed,
            "pass finished"
        );
        summary
    }

    /// Generate the companion class for one candidate.
    ///
    /// The type is marked processed before its class is assembled; any
    /// failure from then on removes the mark and reports a fatal diagnostic
    /// attributed to the type. A dialect without a generator is skipped
    /// without a diagnostic and leaves the mark in place.
    pub fn generate(
        &self,
        ctx: &mut PassContext,
        candidate: &TypeCandidate,
        artifacts: &mut dyn ArtifactSink,
        diagnostics: &mut dyn DiagnosticSink,
    ) -> Outcome {
        let type_name = candidate.qualified_name();
        if !candidate.is_marked() {
            trace!(type_name = %type_name, "no generation marker");
            return Outcome::Skipped(SkipReason::Unmarked);
        }
        if ctx.is_processed(&type_name) {
            trace!(type_name = %type_name, "already processed in this pass");
            return Outcome::Skipped(SkipReason::AlreadyProcessed);
        }

        report_advisories(candidate, &type_name, diagnostics);
        ctx.mark(&type_name);

        match self.try_generate(candidate, artifacts) {
            Ok(Some(path)) => {
                debug!(
                    type_name = %type_name,
                    path = %path.display(),
                    dialect = %self.config.dialect,
                    "generated derived methods"
                );
                Outcome::Generated(path)
            }
            Ok(None) => {
                // Not reported: an unsupported dialect is a silent skip.
                debug!(
                    type_name = %type_name,
                    dialect = %self.config.dialect,
                    "no source generator registered, skipping"
                );
                Outcome::Skipped(SkipReason::NoGenerator(self.config.dialect))
            }
            Err(error) => {
                ctx.unmark(&type_name);
                warn!(type_name = %type_name, error = %error, "generation failed");
                let guarantee = diagnostics.emit_error(generation_failed(
                    &type_name,
                    error.code(),
                    &error.to_string(),
                ));
                Outcome::Failed(guarantee)
            }
        }
    }

    /// Assemble the public final companion class for `candidate`.
    pub fn assemble(&self, candidate: &TypeCandidate) -> Result<ClassDef, DeriveError> {
        let ty = &candidate.ty;
        let generated = self.config.generated_name(ty.simple_name());
        let qualified = if ty.package().is_empty() {
            generated
        } else {
            format!("{}.{generated}", ty.package())
        };
        let mut builder = ClassDef::builder(&qualified).final_class();
        for method in candidate.markers.methods() {
            builder.add_method(derive_method(method, ty, &candidate.properties)?);
        }
        Ok(builder.build())
    }

    fn try_generate(
        &self,
        candidate: &TypeCandidate,
        artifacts: &mut dyn ArtifactSink,
    ) -> Result<Option<PathBuf>, GenerationError> {
        let class = self.assemble(candidate)?;
        let Some(generator) = self.registry.find(self.config.dialect) else {
            return Ok(None);
        };
        // Render fully before touching the sink so failures leave no partial file.
        let text = render(generator, &class)?;
        let path = artifact_path(&class, generator.file_extension());
        artifacts.write(&path, &text)?;
        Ok(Some(path))
    }
}

fn report_advisories(
    candidate: &TypeCandidate,
    type_name: &str,
    diagnostics: &mut dyn DiagnosticSink,
) {
    let to_string = candidate.markers.contains(Markers::TO_STRING);
    let equality = candidate.markers.contains(Markers::EQUALS_AND_HASH_CODE);
    if to_string {
        diagnostics.report(declared_properties_only(type_name));
    }
    for property in &candidate.properties {
        if property.exclude_from_string && !to_string {
            diagnostics.report(ineffective_exclusion(
                type_name,
                &property.name,
                DerivedMethod::ToString.method_name(),
            ));
        }
        if property.exclude_from_equals_and_hash && !equality {
            diagnostics.report(ineffective_exclusion(
                type_name,
                &property.name,
                DerivedMethod::Equals.method_name(),
            ));
        }
    }
}
