//! Sequential measurement scheduler
//!
//! Drives the pipeline for every selected dependency, one at a time:
//! provision sandbox → write manifest → install → measure.
//!
//! Installs never overlap. They compete for CPU, network and disk, so running
//! them side by side would make the per-dependency timings incomparable. The
//! first failure in any step aborts the run and no record is produced for the
//! failing dependency or anything after it.

use crate::domain::{DependencySet, MeasurementRecord};
use crate::error::AppError;
use crate::interrupt::Interrupt;
use crate::manifest::LockEntries;
use crate::measure::measure;
use crate::package_manager::InstallRunner;
use crate::progress::Progress;
use crate::sandbox::{write_manifest, SandboxRegistry};
use serde_json::Value;
use std::path::PathBuf;

/// Scheduler for one measurement run
pub struct Scheduler<'a, R: InstallRunner> {
    /// Runner used for every install
    runner: &'a R,
    /// Project directory the `.npmrc` is copied from
    project_dir: PathBuf,
    /// Progress bar advanced once per measured dependency
    progress: Progress,
}

impl<'a, R: InstallRunner> Scheduler<'a, R> {
    /// Create a scheduler for the given project directory
    pub fn new(runner: &'a R, project_dir: impl Into<PathBuf>, show_progress: bool) -> Self {
        Self {
            runner,
            project_dir: project_dir.into(),
            progress: Progress::new(show_progress),
        }
    }

    /// Measure every dependency in enumeration order
    ///
    /// `interrupt` is checked before each dependency and after each
    /// measurement, and raced against every install. An install still in
    /// flight when it fires is killed. Either way the run fails with
    /// [`AppError::Interrupted`].
    pub async fn run(
        &mut self,
        dependencies: &DependencySet,
        locks: &LockEntries,
        sandboxes: &mut SandboxRegistry,
        interrupt: &mut Interrupt,
    ) -> Result<Vec<MeasurementRecord>, AppError> {
        let mut records = Vec::with_capacity(dependencies.len());
        self.progress.start(dependencies.len() as u64);

        for (index, (name, version)) in dependencies.iter().enumerate() {
            tracing::info!(
                dependency = name,
                version,
                position = index + 1,
                total = dependencies.len(),
                "measuring dependency"
            );
            self.progress.set_message(name);

            let result = self
                .measure_one(name, version, locks.get(name), sandboxes, interrupt)
                .await;

            match result {
                Ok(record) => {
                    records.push(record);
                    self.progress.inc();
                }
                Err(e) => {
                    self.progress.finish_and_clear();
                    tracing::debug!(dependency = name, error = %e, "measurement aborted");
                    return Err(e);
                }
            }
        }

        self.progress.finish_and_clear();
        Ok(records)
    }

    /// Run the full pipeline for a single dependency
    async fn measure_one(
        &self,
        name: &str,
        version: &str,
        lock: Option<&Value>,
        sandboxes: &mut SandboxRegistry,
        interrupt: &mut Interrupt,
    ) -> Result<MeasurementRecord, AppError> {
        interrupt.check(Some(name))?;

        let sandbox = sandboxes.provision(&self.project_dir)?;
        write_manifest(&sandbox, name, version, lock)?;

        let outcome = tokio::select! {
            result = self.runner.install(name, &sandbox) => result?,
            _ = interrupt.triggered() => return Err(AppError::interrupted(Some(name))),
        };

        let footprint = measure(&sandbox.node_modules())?;
        interrupt.check(Some(name))?;

        Ok(MeasurementRecord::new(
            name,
            outcome.duration,
            footprint.size,
            footprint.sub_dependencies,
        ))
    }
}
