use std::path::Path;

use crate::alignment_record::SourceParticipant;
use crate::error::VerifyErr;

/// A named contig, bases lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub name: String,
    pub sequence: Vec<u8>,
}

impl Contig {
    pub fn new(name: &str, sequence: &[u8]) -> Self {
        Contig {
            name: name.to_string(),
            sequence: sequence.to_ascii_lowercase(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

// Trait for loading a participant's contigs from different backends
pub trait ContigSource {
    /// Loads every contig of `participant` from `path`, in file order.
    /// A missing backing file must fail with [`VerifyErr::SourceNotFound`].
    fn load_contigs(
        &self,
        participant: &SourceParticipant,
        path: &Path,
    ) -> Result<Vec<Contig>, VerifyErr>;
}
