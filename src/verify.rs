//! Gap-tolerant comparison of resolved windows against claimed text.

use log::debug;
use rayon::prelude::*;

use crate::alignment_record::{IntervalRecord, SourceParticipant};
use crate::contig_store::LoadedContigs;
use crate::error::VerifyErr;
use crate::locate::locate;
use crate::report::{MismatchRecord, ReportSink};
use crate::resolve::resolve_record;

pub const GAP: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Equal length, and equal at every position where neither side is a gap.
pub fn gap_tolerant_eq(a: &[u8], b: &[u8]) -> bool {
    if a == b {
        return true;
    }
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .filter(|(x, y)| **x != GAP && **y != GAP)
        .all(|(x, y)| x == y)
}

pub fn verify(resolved: &[u8], claimed: &[u8]) -> Verdict {
    if gap_tolerant_eq(resolved, claimed) {
        Verdict::Match
    } else {
        Verdict::Mismatch
    }
}

/// Verifies every record of one participant against its loaded contigs,
/// feeding matches and mismatches into `sink` in record order.
///
/// With `locate_mismatches`, the fallback search runs in parallel over the
/// mismatches; it only reads the contigs.
pub fn verify_participant(
    participant: &SourceParticipant,
    records: &[IntervalRecord],
    contigs: &LoadedContigs,
    locate_mismatches: bool,
    sink: &mut ReportSink,
) -> Result<(), VerifyErr> {
    let mut mismatches = Vec::new();

    for record in records {
        let contig = contigs.contig(record.contig_index)?;
        let resolved = resolve_record(contig, record)?;
        let claimed = record.claimed_text.to_ascii_lowercase();

        match verify(&resolved, claimed.as_bytes()) {
            Verdict::Match => sink.record_match(record.strand),
            Verdict::Mismatch => mismatches.push((
                record,
                contig,
                MismatchRecord {
                    participant_id: participant.id,
                    source_name: participant.name.clone(),
                    strand: record.strand,
                    contig_index: record.contig_index,
                    target_offset: record.target_offset,
                    alignment_length: record.alignment_length,
                    contig_length: contig.len(),
                    resolved: String::from_utf8_lossy(&resolved).into_owned(),
                    claimed,
                    located: None,
                },
            )),
        }
    }

    if locate_mismatches && !mismatches.is_empty() {
        debug!(
            "Searching for {} mismatched fragments of sequence {}",
            mismatches.len(),
            participant.id
        );
        mismatches
            .par_iter_mut()
            .for_each(|(record, contig, mismatch)| {
                mismatch.located = locate(*contig, *record);
            });
    }

    debug!(
        "Sequence {} ({}): {} records, {} mismatches",
        participant.id,
        participant.name,
        records.len(),
        mismatches.len()
    );

    for (_, _, mismatch) in mismatches {
        sink.record_mismatch(mismatch);
    }
    Ok(())
}
