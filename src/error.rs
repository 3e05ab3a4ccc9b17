//! Run-wide error taxonomy.
//!
//! Every variant is fatal: once a header line, a source file or a contig base
//! cannot be trusted, no later record can be verified, so the run stops before
//! any report is created. Sequence mismatches are not errors.

use std::io::Error as IoError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum VerifyErr {
    /// Malformed header or coordinate line (1-based line number).
    ParseError {
        line: usize,
        content: String,
        reason: String,
    },
    SourceNotFound {
        participant: usize,
        path: PathBuf,
    },
    InvalidBase {
        base: u8,
        position: usize,
    },
    ReportCreateError {
        path: PathBuf,
        source: IoError,
    },
    ContigOutOfRange {
        participant: usize,
        contig_index: usize,
        contig_count: usize,
    },
    Fasta(String),
    Io(IoError),
}

impl VerifyErr {
    pub fn parse(line: usize, content: &str, reason: impl Into<String>) -> Self {
        VerifyErr::ParseError {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for VerifyErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyErr::ParseError {
                line,
                content,
                reason,
            } => write!(f, "Parse error at line {}: {} ('{}')", line, reason, content),
            VerifyErr::SourceNotFound { participant, path } => write!(
                f,
                "Source file for sequence {} not found: '{}'",
                participant,
                path.display()
            ),
            VerifyErr::InvalidBase { base, position } => write!(
                f,
                "Invalid base '{}' (0x{:02x}) at position {}",
                base.escape_ascii(),
                base,
                position
            ),
            VerifyErr::ReportCreateError { path, source } => write!(
                f,
                "Failed to create report '{}': {}",
                path.display(),
                source
            ),
            VerifyErr::ContigOutOfRange {
                participant,
                contig_index,
                contig_count,
            } => write!(
                f,
                "Sequence {} has {} contigs, but contig s{} was referenced",
                participant, contig_count, contig_index
            ),
            VerifyErr::Fasta(msg) => write!(f, "FASTA error: {}", msg),
            VerifyErr::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for VerifyErr {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyErr::ReportCreateError { source, .. } => Some(source),
            VerifyErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for VerifyErr {
    fn from(e: IoError) -> Self {
        VerifyErr::Io(e)
    }
}
