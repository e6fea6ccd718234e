//! Pipeline Engine
//!
//! Strictly sequential: stage N+1 receives whatever stage N returned. No
//! retries, no skipping, no parallelism. A stage error ends the run and is
//! returned to the caller untouched.

use std::collections::HashSet;
use std::time::Instant;

use super::context::{ContextField, RunContext};
use super::stage::Stage;
use crate::error::{PipelineError, PipelineResult};

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Append a stage at the end
    pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Verify every declared input is available before its stage runs.
    ///
    /// An input is available if the initial context already carries it or
    /// an earlier stage declares it as output.
    pub fn check_dependencies(&self, initial: &RunContext) -> PipelineResult<()> {
        let mut available: HashSet<ContextField> = HashSet::new();

        for stage in &self.stages {
            for field in stage.requires() {
                if !available.contains(field) && !initial.has(*field) {
                    return Err(PipelineError::UnsatisfiedDependency {
                        stage: stage.name(),
                        field: *field,
                    });
                }
            }
            available.extend(stage.produces().iter().copied());
        }

        Ok(())
    }

    /// Run every stage in order
    pub fn execute(&self, initial: RunContext) -> PipelineResult<RunContext> {
        self.check_dependencies(&initial)?;

        let run_id = initial.run_id;
        let total = self.stages.len();
        let started = Instant::now();
        log::info!("Pipeline {} starting ({} stages)", run_id, total);

        let mut context = initial;
        for (i, stage) in self.stages.iter().enumerate() {
            let stage_started = Instant::now();
            log::info!("[{}/{}] Stage '{}' started", i + 1, total, stage.name());

            context = stage.process(context).map_err(|e| {
                log::error!("[{}/{}] Stage '{}' failed: {}", i + 1, total, stage.name(), e);
                e
            })?;

            log::info!(
                "[{}/{}] Stage '{}' finished in {} ms",
                i + 1,
                total,
                stage.name(),
                stage_started.elapsed().as_millis()
            );
        }

        log::info!(
            "Pipeline {} finished in {} ms",
            run_id,
            started.elapsed().as_millis()
        );
        Ok(context)
    }
}
