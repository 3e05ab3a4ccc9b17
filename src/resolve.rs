//! Reconstruction of the window a record claims to align.

use crate::alignment_record::{IntervalRecord, Strand};
use crate::error::VerifyErr;

/// Watson-Crick complement over the IUPAC nucleotide alphabet plus gap
/// symbols, preserving case. `None` for anything else.
pub fn complement(base: u8) -> Option<u8> {
    let upper = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'S' => b'S',
        b'W' => b'W',
        b'N' => b'N',
        b'-' => b'-',
        b'.' => b'.',
        _ => return None,
    };
    if base.is_ascii_lowercase() {
        Some(upper.to_ascii_lowercase())
    } else {
        Some(upper)
    }
}

/// Returns the reverse complement of a nucleotide sequence.
/// Fails on a byte outside the complement alphabet; `position` is its index
/// in `seq`.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>, VerifyErr> {
    seq.iter()
        .enumerate()
        .rev()
        .map(|(position, &base)| {
            complement(base).ok_or(VerifyErr::InvalidBase { base, position })
        })
        .collect()
}

/// 0-based half-open bounds of the window, clamped to the contig.
///
/// Forward: `[target_offset - 1, target_offset - 1 + length)`.
/// Reverse: `[target_offset - length, target_offset)`.
pub fn window_bounds(
    contig_len: usize,
    strand: Strand,
    target_offset: i64,
    length: usize,
) -> (usize, usize) {
    let length = length as i64;
    let (start, end) = match strand {
        Strand::Forward => {
            let start = target_offset.saturating_sub(1);
            (start, start.saturating_add(length))
        }
        Strand::Reverse => (target_offset.saturating_sub(length), target_offset),
    };
    let clamp = |pos: i64| pos.clamp(0, contig_len as i64) as usize;
    (clamp(start), clamp(end))
}

/// Lower-cased bases of the window, reverse complemented on the reverse strand.
pub fn resolve_window(
    contig: &[u8],
    strand: Strand,
    target_offset: i64,
    length: usize,
) -> Result<Vec<u8>, VerifyErr> {
    let (start, end) = window_bounds(contig.len(), strand, target_offset, length);
    let window = contig[start..end].to_ascii_lowercase();
    match strand {
        Strand::Forward => Ok(window),
        Strand::Reverse => reverse_complement(&window).map_err(|e| match e {
            VerifyErr::InvalidBase { base, position } => VerifyErr::InvalidBase {
                base,
                position: start + position,
            },
            other => other,
        }),
    }
}

/// Window for an interval record, sized by its claimed text.
pub fn resolve_record(contig: &[u8], record: &IntervalRecord) -> Result<Vec<u8>, VerifyErr> {
    resolve_window(
        contig,
        record.strand,
        record.target_offset,
        record.claimed_length(),
    )
}
