//! Result sinks: one JSON line per game (optionally gzipped) plus a CSV
//! summary, both stamped with the run's start time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;

use crate::metrics::{CsvSummaryRow, GameMetrics};
use crate::types::OutputFormat;

type BoxError = Box<dyn std::error::Error>;

/// Trailing JSONL record with per-tier aggregates.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub games: u32,
    pub failed: u32,
    pub tiers: Vec<TierLine>,
}

#[derive(Debug, Serialize)]
pub struct TierLine {
    pub difficulty: &'static str,
    pub seats_played: u32,
    pub wins: u32,
    pub exact_bid_pct: f64,
}

pub struct OutputWriter {
    games: Option<(Box<dyn Write>, PathBuf)>,
    summary: csv::Writer<BufWriter<File>>,
    summary_path: PathBuf,
}

fn run_stamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string())
        .replace(':', "-")
}

impl OutputWriter {
    pub fn new(output_dir: &Path, format: &OutputFormat, compress: bool) -> Result<Self, BoxError> {
        std::fs::create_dir_all(output_dir)?;
        let stamp = run_stamp();

        let games = match format {
            OutputFormat::Jsonl if compress => {
                let path = output_dir.join(format!("jossing_{stamp}.jsonl.gz"));
                let gz = GzEncoder::new(File::create(&path)?, Compression::default());
                Some((Box::new(BufWriter::new(gz)) as Box<dyn Write>, path))
            }
            OutputFormat::Jsonl => {
                let path = output_dir.join(format!("jossing_{stamp}.jsonl"));
                Some((Box::new(BufWriter::new(File::create(&path)?)) as Box<dyn Write>, path))
            }
            OutputFormat::Csv => None,
        };

        let summary_path = output_dir.join(format!("jossing_{stamp}_summary.csv"));
        let summary = csv::Writer::from_writer(BufWriter::new(File::create(&summary_path)?));

        Ok(Self {
            games,
            summary,
            summary_path,
        })
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), BoxError> {
        if let Some((writer, _)) = self.games.as_mut() {
            serde_json::to_writer(&mut *writer, metrics)?;
            writer.write_all(b"\n")?;
        }
        self.summary.serialize(CsvSummaryRow::from(metrics))?;
        Ok(())
    }

    /// Append the run summary line and flush everything.
    pub fn finish(mut self, summary: &RunSummary) -> Result<(), BoxError> {
        if let Some((writer, _)) = self.games.as_mut() {
            serde_json::to_writer(&mut *writer, summary)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        self.summary.flush()?;
        Ok(())
    }

    /// JSONL path (if any) and CSV path.
    pub fn output_paths(&self) -> (Option<&Path>, &Path) {
        (
            self.games.as_ref().map(|(_, p)| p.as_path()),
            self.summary_path.as_path(),
        )
    }
}
