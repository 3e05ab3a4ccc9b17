use chrono::Local;
use log::{debug, info, warn};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::config::VerifyConfig;
use crate::contig_store::ContigStore;
use crate::error::VerifyErr;
use crate::maf::{export_alignment, MafExporter};
use crate::report::{create_new_file, run_timestamp, ReportSink};
use crate::verify::verify_participant;
use crate::xmfa::{open_xmfa, parse_xmfa_file, ParsedAlignment, XmfaReader};

/// Outcome of a verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub records_checked: usize,
    pub mismatches: usize,
    pub located: usize,
    /// Reverse-strand records whose window matched.
    pub reverse_matches: usize,
    pub report_path: PathBuf,
    pub maf_path: Option<PathBuf>,
}

/// Loads every declared participant and verifies its records.
///
/// Sources are loaded even for participants without records, so a missing
/// file is always fatal.
pub fn verify_alignment(
    parsed: &ParsedAlignment,
    store: &mut ContigStore,
    locate_mismatches: bool,
) -> Result<ReportSink, VerifyErr> {
    let mut sink = ReportSink::new();

    for participant in &parsed.header.participants {
        let records = parsed.records_for(participant.id);
        let contigs = store.load(participant)?;
        verify_participant(participant, records, contigs, locate_mismatches, &mut sink)?;
    }

    Ok(sink)
}

/// Parse, verify, then write the report (and the MAF export when enabled).
/// Nothing is written unless parsing and verification both succeed.
pub fn run_verify(config: &VerifyConfig) -> Result<RunSummary, VerifyErr> {
    let mut store = ContigStore::with_fasta(&config.reference_path, &config.sources_path);
    run_verify_with_store(config, &mut store)
}

pub fn run_verify_with_store(
    config: &VerifyConfig,
    store: &mut ContigStore,
) -> Result<RunSummary, VerifyErr> {
    let timestamp = run_timestamp(&Local::now());
    info!("Verifying '{}'", config.xmfa_path.display());
    if config.locate_mismatches {
        info!("Fallback search for mismatched fragments is enabled");
    }

    let parsed = parse_xmfa_file(&config.xmfa_path, config.comparison_window)?;
    info!(
        "Parsed {} sequences, {} blocks, {} records",
        parsed.header.participant_count(),
        parsed.block_count,
        parsed.record_count()
    );

    let sink = verify_alignment(&parsed, store, config.locate_mismatches)?;
    if sink.mismatches().is_empty() {
        info!("All {} records match their sources", sink.records_checked());
    } else {
        warn!(
            "{} of {} records do not match their sources",
            sink.mismatches().len(),
            sink.records_checked()
        );
    }

    let report_path = config.output_dir.join(format!("{timestamp}.txt"));
    sink.persist(&report_path)?;

    let maf_path = if config.export_alternate_format {
        let maf_path = config.output_dir.join(format!("{timestamp}.maf"));
        let reader = XmfaReader::new(
            open_xmfa(&config.xmfa_path)?,
            config.comparison_window,
            true,
        )?;
        let mut exporter = MafExporter::new(BufWriter::new(create_new_file(&maf_path)?));
        let blocks = export_alignment(reader, |id| store.sizes(id), &mut exporter)?;
        exporter.into_inner().flush()?;
        debug!("Exported {} blocks to '{}'", blocks, maf_path.display());
        Some(maf_path)
    } else {
        None
    };

    Ok(RunSummary {
        records_checked: sink.records_checked(),
        mismatches: sink.mismatches().len(),
        located: sink.located_count(),
        reverse_matches: sink.reverse_matches(),
        report_path,
        maf_path,
    })
}
