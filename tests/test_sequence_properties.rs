/// Property-based tests for window resolution and comparison
///
/// Uses proptest over random nucleotide strings to check the invariants the
/// verifier relies on regardless of input.
use proptest::prelude::*;
use xmfacheck::alignment_record::{IntervalRecord, Strand};
use xmfacheck::locate::locate;
use xmfacheck::resolve::{resolve_window, reverse_complement, window_bounds};
use xmfacheck::verify::{gap_tolerant_eq, GAP};

fn bases(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ACGTacgt".to_vec()), 0..max_len)
}

fn record(strand: Strand, target_offset: i64, claimed: &[u8]) -> IntervalRecord {
    IntervalRecord {
        participant_id: 2,
        alignment_length: claimed.len() as i64,
        strand,
        contig_index: 1,
        target_offset,
        claimed_text: String::from_utf8_lossy(claimed).into_owned(),
    }
}

/// Property: reverse complement is an involution and keeps the length
#[test]
fn prop_reverse_complement_involution() {
    proptest!(|(seq in bases(200))| {
        let rc = reverse_complement(&seq).unwrap();
        prop_assert_eq!(rc.len(), seq.len());
        prop_assert_eq!(reverse_complement(&rc).unwrap(), seq);
    });
}

/// Property: a sequence always matches itself
#[test]
fn prop_gap_tolerant_eq_reflexive() {
    proptest!(|(seq in bases(200))| {
        prop_assert!(gap_tolerant_eq(&seq, &seq));
    });
}

/// Property: gaps on either side never cause a mismatch
#[test]
fn prop_gaps_are_wildcards() {
    proptest!(|(
        seq in bases(200),
        mask in prop::collection::vec(any::<bool>(), 200)
    )| {
        let gapped: Vec<u8> = seq
            .iter()
            .zip(&mask)
            .map(|(&base, &gap)| if gap { GAP } else { base })
            .collect();
        prop_assert!(gap_tolerant_eq(&seq, &gapped));
        prop_assert!(gap_tolerant_eq(&gapped, &seq));
    });
}

/// Property: sequences of different lengths never match
#[test]
fn prop_length_difference_mismatches() {
    proptest!(|(seq in bases(200), extra in 1usize..10)| {
        let longer: Vec<u8> = seq.iter().copied().chain(std::iter::repeat(GAP).take(extra)).collect();
        prop_assert!(!gap_tolerant_eq(&seq, &longer));
        prop_assert!(!gap_tolerant_eq(&longer, &seq));
    });
}

/// Property: windows stay inside the contig, even for out-of-range offsets
#[test]
fn prop_window_bounds_clamped() {
    proptest!(|(
        contig_len in 0usize..1_000,
        target_offset in -2_000i64..2_000,
        length in 0usize..500,
        reverse in any::<bool>()
    )| {
        let strand = if reverse { Strand::Reverse } else { Strand::Forward };
        let (start, end) = window_bounds(contig_len, strand, target_offset, length);
        prop_assert!(start <= end);
        prop_assert!(end <= contig_len);
        prop_assert!(end - start <= length);
    });
}

/// Property: a fragment cut from the contig is located at or before its
/// origin, and the window at the located position reproduces it
#[test]
fn prop_located_fragment_resolves() {
    proptest!(|(
        contig in bases(300),
        start_frac in 0.0f64..1.0,
        len in 1usize..30,
        declared in 1i64..400,
        reverse in any::<bool>()
    )| {
        prop_assume!(contig.len() >= len);
        let contig = contig.to_ascii_lowercase();
        let start = ((contig.len() - len) as f64 * start_frac) as usize;
        let fragment = &contig[start..start + len];

        let (strand, claimed) = if reverse {
            (Strand::Reverse, reverse_complement(fragment).unwrap())
        } else {
            (Strand::Forward, fragment.to_vec())
        };

        let located = locate(&contig, &record(strand, declared, &claimed));
        prop_assert!(located.is_some());
        let located = located.unwrap();
        prop_assert!(located.offset <= start);

        let target_offset = match strand {
            Strand::Forward => located.offset as i64 + 1,
            Strand::Reverse => (located.offset + len) as i64,
        };
        let resolved = resolve_window(&contig, strand, target_offset, len).unwrap();
        prop_assert_eq!(resolved, claimed);
    });
}
