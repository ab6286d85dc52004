//! Machine-readable run report.

use anyhow::Context;
use cliquesat_base::Graph;
use cliquesat_kit::{DecisionResult, SearchOutcome};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize, Debug)]
pub struct RunReport {
    pub mode: &'static str,
    pub input: String,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub steps: Vec<StepReport>,
    /// Only set by the max-clique search.
    pub omega: Option<usize>,
    pub clique: Option<Vec<usize>>,
}

#[derive(Serialize, Debug)]
pub struct StepReport {
    pub k: usize,
    pub status: &'static str,
    pub clique: Option<Vec<usize>>,
    pub stats: Vec<String>,
    pub time_ms: u128,
}

impl From<&DecisionResult> for StepReport {
    fn from(step: &DecisionResult) -> Self {
        Self {
            k: step.k,
            status: if step.is_satisfiable() { "SAT" } else { "UNSAT" },
            clique: step.clique.as_ref().map(|c| c.vertices().to_vec()),
            stats: step.stats.clone(),
            time_ms: step.elapsed.as_millis(),
        }
    }
}

impl RunReport {
    pub fn fixed(input: &Path, graph: &Graph, step: &DecisionResult) -> Self {
        Self {
            mode: "fixed",
            input: input.display().to_string(),
            num_vertices: graph.num_vertices(),
            num_edges: graph.num_edges(),
            steps: vec![StepReport::from(step)],
            omega: None,
            clique: step.clique.as_ref().map(|c| c.vertices().to_vec()),
        }
    }

    pub fn max(
        input: &Path,
        graph: &Graph,
        steps: &[DecisionResult],
        outcome: &SearchOutcome,
    ) -> Self {
        Self {
            mode: "max",
            input: input.display().to_string(),
            num_vertices: graph.num_vertices(),
            num_edges: graph.num_edges(),
            steps: steps.iter().map(StepReport::from).collect(),
            omega: Some(outcome.omega()),
            clique: outcome.clique().map(|c| c.vertices().to_vec()),
        }
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("cannot create report file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("cannot write report file {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("cannot write report file {}", path.display()))?;
        tracing::info!("Report written to {}", path.display());
        Ok(())
    }
}
