use std::path::{Path, PathBuf};

use crate::alignment_record::ComparisonWindow;

/// Options of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    pub xmfa_path: PathBuf,
    /// Directory holding the reference (first) sequence file.
    pub reference_path: PathBuf,
    /// Directory holding every other sequence file.
    pub sources_path: PathBuf,
    pub export_alternate_format: bool,
    /// Search for misplaced fragments (slow).
    pub locate_mismatches: bool,
    pub comparison_window: ComparisonWindow,
    /// Where the report and the optional MAF file are created.
    pub output_dir: PathBuf,
}

impl VerifyConfig {
    pub fn new(xmfa_path: &Path, reference_path: &Path, sources_path: &Path) -> Self {
        VerifyConfig {
            xmfa_path: xmfa_path.to_path_buf(),
            reference_path: reference_path.to_path_buf(),
            sources_path: sources_path.to_path_buf(),
            export_alternate_format: false,
            locate_mismatches: false,
            comparison_window: ComparisonWindow::default(),
            output_dir: PathBuf::from("."),
        }
    }
}
