/// Suffix parsnp appends to the reference genome's file name in the header.
pub const REFERENCE_MARKER: &str = ".ref";

/// One aligned genome, as declared in the XMFA header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceParticipant {
    pub id: usize,
    pub name: String,
}

impl SourceParticipant {
    pub fn new(id: usize, raw_name: &str) -> Self {
        let name = raw_name.strip_suffix(REFERENCE_MARKER).unwrap_or(raw_name);
        SourceParticipant {
            id,
            name: name.to_string(),
        }
    }

    /// By convention the first declared sequence is the reference.
    pub fn is_reference(&self) -> bool {
        self.id == 1
    }

    /// File name without its extensions, as used for MAF sequence names.
    pub fn stem(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

/// Strand orientation of an interval
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug)]
#[repr(u8)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    pub fn symbol(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

/// One participant's entry within an alignment block.
///
/// `target_offset` is 1-based: the first base of the ungapped region on the
/// forward strand, the last one on the reverse strand. It is signed because
/// the format can carry a literal minus sign there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalRecord {
    pub participant_id: usize,
    pub alignment_length: i64,
    pub strand: Strand,
    pub contig_index: usize,
    pub target_offset: i64,
    pub claimed_text: String,
}

impl IntervalRecord {
    /// Number of bases the record claims to cover.
    pub fn claimed_length(&self) -> usize {
        self.claimed_text.len()
    }
}

/// A block entry: the record plus, on request, the full gapped aligned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub record: IntervalRecord,
    pub aligned_text: Option<String>,
}

/// Entries between two `=` terminators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentBlock {
    pub entries: Vec<BlockEntry>,
}

/// How much of an entry's sequence is compared against the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonWindow {
    /// Leading characters of the entry's first sequence line.
    Prefix(usize),
    /// The whole entry, gap symbols removed.
    Full,
}

impl ComparisonWindow {
    pub const DEFAULT_PREFIX: usize = 20;
}

impl Default for ComparisonWindow {
    fn default() -> Self {
        ComparisonWindow::Prefix(Self::DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_marker_stripped() {
        let reference = SourceParticipant::new(1, "genome1.fna.ref");
        assert_eq!(reference.name, "genome1.fna");
        assert!(reference.is_reference());

        let other = SourceParticipant::new(2, "genome2.fna");
        assert_eq!(other.name, "genome2.fna");
        assert!(!other.is_reference());
        assert_eq!(other.stem(), "genome2");
    }

    #[test]
    fn test_strand_symbols() {
        assert_eq!(Strand::from_symbol("+"), Some(Strand::Forward));
        assert_eq!(Strand::from_symbol("-"), Some(Strand::Reverse));
        assert_eq!(Strand::from_symbol("*"), None);
        assert_eq!(Strand::Reverse.symbol(), '-');
        assert_eq!(Strand::default(), Strand::Forward);
    }
}
