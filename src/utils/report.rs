//! Per-turn probability snapshots, appended to a JSON-lines file

use crate::agent::{Agent, ProbabilityTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub holder: String,
    pub card: String,
    pub approx_probability: f64,
}

/// One agent's approximate probabilities at the start of a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityReport {
    pub game_id: u64,
    pub agent_kind: String,
    pub agent_index: usize,
    pub turn_index: usize,
    pub entries: Vec<ReportEntry>,
}

impl ProbabilityReport {
    pub fn new(game_id: u64, agent: &Agent, turn_index: usize, table: &ProbabilityTable) -> Self {
        let entries = table
            .entries()
            .iter()
            .map(|e| ReportEntry {
                holder: e.holder.to_string(),
                card: e.card.to_string(),
                approx_probability: e.approx_probability,
            })
            .collect();

        Self {
            game_id,
            agent_kind: agent.kind().label().to_string(),
            agent_index: agent.index(),
            turn_index,
            entries,
        }
    }

    pub fn probability(&self, holder: &str, card: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.holder == holder && e.card == card)
            .map(|e| e.approx_probability)
    }
}

/// Appends reports to a JSON-lines file and reads them back
pub struct ReportWriter {
    path: PathBuf,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, reports: &[ProbabilityReport]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open report file: {}", self.path.display()))?;

        for report in reports {
            let line = serde_json::to_string(report).context("Failed to serialize probability report")?;
            writeln!(file, "{}", line)
                .with_context(|| format!("Failed to write report file: {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Every stored report
    pub fn read_all(&self) -> Result<Vec<ProbabilityReport>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open report file: {}", self.path.display()))?;

        let mut reports = Vec::new();
        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read report file: {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let report = serde_json::from_str(&line)
                .with_context(|| format!("Malformed report on line {}", line_number + 1))?;
            reports.push(report);
        }
        Ok(reports)
    }

    /// The report stored for one agent at one turn of one game
    pub fn find(
        &self,
        game_id: u64,
        agent_kind: &str,
        agent_index: usize,
        turn_index: usize,
    ) -> Result<Option<ProbabilityReport>> {
        Ok(self.read_all()?.into_iter().find(|r| {
            r.game_id == game_id && r.agent_kind == agent_kind && r.agent_index == agent_index && r.turn_index == turn_index
        }))
    }
}
