//! High-level orchestration for the CLI.
//!
//! Wires config, prompt resolution, target enumeration and the resume filter
//! together, then drives the batch strictly in enumeration order. A target
//! that exhausts its retries is logged and skipped; the batch never aborts
//! because of one item.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::config::RetoqueConfig;
use crate::gemini::{GeminiClient, GenerateContent};
use crate::generator::Generator;
use crate::images::{Target, collect_targets};
use crate::prompts::{PROMPT_SAMPLE_SUFFIX, PromptResolver, PromptStore, format_prompt_listing};
use crate::resume::filter_pending;
use crate::retry::{RetryPolicy, run_with_retry};
use crate::samples::{SampleBundle, build_sample_bundle};
use crate::ui::BatchProgress;

/// Serializable record of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
    pub processed: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub skipped: u32,
    pub outputs: Vec<PathBuf>,
}

/// Drives the batch: one target at a time, each wrapped in the retry
/// executor.
pub struct BatchRunner<C: GenerateContent> {
    generator: Generator<C>,
    policy: RetryPolicy,
}

impl<C: GenerateContent> BatchRunner<C> {
    pub fn new(generator: Generator<C>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    /// Process every target in order and return the run record.
    ///
    /// `skipped` is the number of targets the resume filter already dropped;
    /// it is carried into the summary untouched.
    pub async fn run_batch(
        &self,
        targets: &[Target],
        prompt: &str,
        output_dir: &Path,
        samples: Option<&SampleBundle>,
        skipped: u32,
        progress: &BatchProgress,
    ) -> BatchSummary {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let mut succeeded: u32 = 0;
        let mut failed: u32 = 0;
        let mut outputs = Vec::new();

        for target in targets {
            progress.processing(&target.path);
            let description = format!("Gemini request for {}", target.path.display());

            let result = run_with_retry(
                || self.generator.generate(prompt, target, output_dir, samples),
                &self.policy,
                progress,
                &description,
            )
            .await;

            match result {
                Ok(paths) => {
                    succeeded += 1;
                    for path in &paths {
                        progress.saved(path);
                    }
                    outputs.extend(paths);
                }
                Err(err) => {
                    failed += 1;
                    progress.target_failed(&target.path, &err.to_string());
                }
            }
        }

        let completed_at = Utc::now();
        BatchSummary {
            run_id,
            started_at,
            completed_at,
            duration_ms: (completed_at - started_at).num_milliseconds(),
            processed: targets.len() as u32,
            succeeded,
            failed,
            skipped,
            outputs,
        }
    }
}

/// Entry point called from `main` after CLI parsing.
pub async fn run(cli: Cli) -> Result<()> {
    let config = RetoqueConfig::load()?;
    let store = PromptStore::new(&config.prompts_dir);

    match cli.command {
        Command::Prompts => {
            let ids = store.available_ids();
            if ids.is_empty() {
                bail!("No prompt snippets found in '{}'", config.prompts_dir);
            }
            println!("{}", format_prompt_listing(&ids));
            println!(
                "\nTip: append '{PROMPT_SAMPLE_SUFFIX}' to any prompt ID when using --sample-input/--sample-output."
            );
            Ok(())
        }
        Command::Run {
            input,
            output_dir,
            prompt_id,
            prompt_text,
            prompt_file,
            sample_input,
            sample_output,
            top_level_only,
            stride,
            resume,
        } => {
            let sample_bundle =
                build_sample_bundle(sample_input.as_deref(), sample_output.as_deref())?;

            let resolver = PromptResolver::new(&store);
            let prompt_id = prompt_id.unwrap_or_else(|| config.default_prompt_id.clone());
            let prompt = resolver.resolve(
                &prompt_id,
                prompt_text.as_deref(),
                prompt_file.as_deref(),
                sample_bundle.is_some(),
            )?;

            let output_dir = output_dir
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(&config.output_dir));
            std::fs::create_dir_all(&output_dir).with_context(|| {
                format!(
                    "failed to create output directory '{}'",
                    output_dir.display()
                )
            })?;

            let targets = collect_targets(Path::new(&input), !top_level_only, stride)?;
            let found = targets.len();

            let progress = BatchProgress::start(found);

            let targets = if resume {
                filter_pending(targets, &output_dir, &progress)?
            } else {
                targets
            };
            let skipped = (found - targets.len()) as u32;
            if resume && targets.is_empty() {
                progress.info("Resume mode: nothing left to process.");
                progress.clear();
                return Ok(());
            }
            progress.info(&format!("Found {} image(s) to process.", targets.len()));

            let api_key = config.resolve_api_key(cli.api_key)?;
            let model = cli.model.unwrap_or_else(|| config.model.clone());
            let policy = config.retry_policy(cli.max_retries, cli.max_sleep);

            let generator = Generator::new(GeminiClient::new(api_key), model);
            let runner = BatchRunner::new(generator, policy);
            let summary = runner
                .run_batch(
                    &targets,
                    &prompt,
                    &output_dir,
                    sample_bundle.as_ref(),
                    skipped,
                    &progress,
                )
                .await;

            progress.finish(&summary);
            if cli.verbose {
                progress.print_summary(&summary);
            }
            Ok(())
        }
    }
}
