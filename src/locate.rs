//! Fallback search for misplaced fragments.
//!
//! When a record's window does not match, the claimed text is searched for
//! verbatim in the declared contig. A hit means the aligner pointed at the
//! wrong coordinate; no hit means the genomic content itself differs.

use log::debug;

use crate::alignment_record::{IntervalRecord, Strand};
use crate::resolve::reverse_complement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedPosition {
    pub contig_index: usize,
    /// 0-based offset of the first occurrence.
    pub offset: usize,
    /// Declared window start minus located offset.
    pub delta: i64,
}

/// First exact occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Searches `contig` (lower-cased) for the record's claimed text, using its
/// reverse complement on the reverse strand.
pub fn locate(contig: &[u8], record: &IntervalRecord) -> Option<LocatedPosition> {
    let claimed = record.claimed_text.to_ascii_lowercase().into_bytes();
    let length = claimed.len() as i64;

    let (needle, declared_start) = match record.strand {
        Strand::Forward => (claimed, record.target_offset.saturating_sub(1)),
        Strand::Reverse => match reverse_complement(&claimed) {
            Ok(rc) => (rc, record.target_offset.saturating_sub(length)),
            Err(e) => {
                debug!("Cannot search for claimed text '{}': {}", record.claimed_text, e);
                return None;
            }
        },
    };

    find_subsequence(contig, &needle).map(|offset| LocatedPosition {
        contig_index: record.contig_index,
        offset,
        delta: declared_start.saturating_sub(offset as i64),
    })
}
