//! Accumulation and persistence of verification results.

use chrono::{DateTime, Local};
use log::info;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::alignment_record::Strand;
use crate::error::VerifyErr;
use crate::locate::LocatedPosition;

/// Timestamp used to name report and export files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

const STANZA_SEPARATOR: &str = "----";

pub fn run_timestamp(now: &DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// A record whose resolved window disagrees with its claimed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchRecord {
    pub participant_id: usize,
    pub source_name: String,
    pub strand: Strand,
    pub contig_index: usize,
    pub target_offset: i64,
    pub alignment_length: i64,
    pub contig_length: usize,
    pub resolved: String,
    pub claimed: String,
    pub located: Option<LocatedPosition>,
}

impl fmt::Display for MismatchRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "participant: {}", self.participant_id)?;
        writeln!(f, "source: {}", self.source_name)?;
        writeln!(f, "strand: {}", self.strand.symbol())?;
        writeln!(
            f,
            "declared position: s{}:p{}",
            self.contig_index, self.target_offset
        )?;
        if let Some(located) = &self.located {
            writeln!(
                f,
                "located position: s{}:p{}",
                located.contig_index, located.offset
            )?;
            writeln!(f, "offset delta: {}", located.delta)?;
        }
        writeln!(
            f,
            "contig length: {}, target: {}, alignment length: {}, claimed length: {}",
            self.contig_length,
            self.target_offset,
            self.alignment_length,
            self.claimed.len()
        )?;
        writeln!(f, "resolved: {}", self.resolved)?;
        writeln!(f, "claimed: {}", self.claimed)?;
        writeln!(f, "{}", STANZA_SEPARATOR)
    }
}

/// Run-wide accumulator. Single writer: mismatches are appended participant
/// by participant, in record order.
#[derive(Debug, Default)]
pub struct ReportSink {
    mismatches: Vec<MismatchRecord>,
    records_checked: usize,
    reverse_matches: usize,
}

impl ReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_match(&mut self, strand: Strand) {
        self.records_checked += 1;
        if strand == Strand::Reverse {
            self.reverse_matches += 1;
        }
    }

    pub fn record_mismatch(&mut self, mismatch: MismatchRecord) {
        self.records_checked += 1;
        self.mismatches.push(mismatch);
    }

    pub fn mismatches(&self) -> &[MismatchRecord] {
        &self.mismatches
    }

    pub fn records_checked(&self) -> usize {
        self.records_checked
    }

    /// Reverse-strand records whose window matched.
    pub fn reverse_matches(&self) -> usize {
        self.reverse_matches
    }

    pub fn located_count(&self) -> usize {
        self.mismatches
            .iter()
            .filter(|mismatch| mismatch.located.is_some())
            .count()
    }

    pub fn write_report<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for mismatch in &self.mismatches {
            write!(writer, "{}", mismatch)?;
        }
        writer.flush()
    }

    /// Writes the report to a new file; an existing file is never overwritten.
    pub fn persist(&self, path: &Path) -> Result<(), VerifyErr> {
        let file = create_new_file(path)?;
        let mut writer = BufWriter::new(file);
        self.write_report(&mut writer)?;
        info!(
            "Wrote {} mismatches to '{}'",
            self.mismatches.len(),
            path.display()
        );
        Ok(())
    }
}

/// Creates `path`, failing if it already exists.
pub fn create_new_file(path: &Path) -> Result<File, VerifyErr> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| VerifyErr::ReportCreateError {
            path: path.to_path_buf(),
            source,
        })
}
