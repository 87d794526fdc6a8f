//! The poll → decode → stage → execute → report cycle.
//!
//! Strictly sequential: one exchange, at most one probe, one report, then
//! sleep. Every failure inside a cycle is logged and swallowed at the cycle
//! boundary; a bad task costs one iteration, never the process.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use picket_control::ControlClient;
use picket_exec::{Runtime, StagedProbe, cost, cpu_time};
use picket_model::{Execution, Report, parse_task};

use crate::config::AgentConfig;

/// Drives the agent's poll/execute/report loop against one controller.
pub struct Agent<R> {
    config: AgentConfig,
    client: ControlClient,
    runtime: R,
}

impl<R: Runtime> Agent<R> {
    pub fn new(config: AgentConfig, client: ControlClient, runtime: R) -> Self {
        Self {
            config,
            client,
            runtime,
        }
    }

    /// Poll until the configured cycle count runs out (forever by default).
    ///
    /// The request body is the previous cycle's report when there is one,
    /// and the OS identifier otherwise; reporting and fetching the next
    /// task are always the same exchange.
    pub async fn run(&self) {
        let mut report: Option<Report> = None;
        let mut cycle: u64 = 0;

        while self.config.max_cycles.is_none_or(|max| cycle < max) {
            let query = match report.take() {
                Some(report) => report.to_string(),
                None => self.config.os.clone(),
            };
            debug!(target: "picket.agent", cycle, query = %query, "requesting");

            let body = self.client.exchange(query).await;
            report = if body.is_empty() {
                debug!(target: "picket.agent", "no task this cycle");
                None
            } else {
                self.run_task(&body)
            };

            cycle += 1;
            if self.config.max_cycles.is_some_and(|max| cycle >= max) {
                break;
            }
            sleep(self.config.interval).await;
        }

        info!(target: "picket.agent", cycles = cycle, "cycle count exhausted, shutting down");
    }

    /// One task: decode, stage, execute, account.
    ///
    /// Returns the report to send on the next exchange, or `None` when the
    /// task had to be discarded. The staged artifact is released on every
    /// path out of here.
    fn run_task(&self, body: &[u8]) -> Option<Report> {
        let task = match parse_task(body) {
            Ok(task) => task,
            Err(e) => {
                warn!(target: "picket.agent", "discarding task: {e}");
                return None;
            }
        };
        info!(target: "picket.agent", task = %task.id, bytes = task.payload.len(), "task received");

        let artifact = match StagedProbe::write_in(&self.config.work_dir, &task.payload) {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(target: "picket.agent", task = %task.id, "staging failed: {e}");
                return None;
            }
        };

        let before = self.sample();
        let exit_code = match self.runtime.execute(artifact.path()) {
            Ok(exit_code) => exit_code,
            Err(e) => {
                warn!(target: "picket.agent", task = %task.id, "probe failed: {e}");
                return None;
            }
        };
        let after = self.sample();
        drop(artifact);

        let execution = Execution {
            exit_code,
            cpu_seconds: cost(before, after),
        };
        info!(
            target: "picket.agent",
            task = %task.id,
            exit_code,
            cpu_seconds = execution.cpu_seconds,
            "probe complete"
        );
        Some(Report::new(self.config.os.clone(), task.id, execution))
    }

    fn sample(&self) -> f64 {
        match cpu_time() {
            Ok(seconds) => seconds,
            Err(e) => {
                warn!(target: "picket.agent", "cpu accounting unavailable: {e}");
                0.0
            }
        }
    }
}
