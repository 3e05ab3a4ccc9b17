//! Per-participant contig cache.
//!
//! Each participant's contigs are loaded once, on first access, and kept for
//! the rest of the run together with their [`ContigSizeIndex`].

use log::debug;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use crate::alignment_record::SourceParticipant;
use crate::error::VerifyErr;
use crate::faidx::FastaContigSource;
use crate::sequence_index::{Contig, ContigSource};

/// Contig index (1-based) to contig length in bases.
pub type ContigSizeIndex = FxHashMap<usize, usize>;

#[derive(Debug)]
pub struct LoadedContigs {
    pub participant_id: usize,
    pub contigs: Vec<Contig>,
    pub sizes: ContigSizeIndex,
}

impl LoadedContigs {
    fn new(participant_id: usize, contigs: Vec<Contig>) -> Self {
        let sizes = contigs
            .iter()
            .enumerate()
            .map(|(idx, contig)| (idx + 1, contig.len()))
            .collect();
        LoadedContigs {
            participant_id,
            contigs,
            sizes,
        }
    }

    /// Bases of the 1-based `contig_index`.
    pub fn contig(&self, contig_index: usize) -> Result<&[u8], VerifyErr> {
        contig_index
            .checked_sub(1)
            .and_then(|idx| self.contigs.get(idx))
            .map(|contig| contig.sequence.as_slice())
            .ok_or_else(|| VerifyErr::ContigOutOfRange {
                participant: self.participant_id,
                contig_index,
                contig_count: self.contigs.len(),
            })
    }
}

pub struct ContigStore {
    reference_path: PathBuf,
    sources_path: PathBuf,
    source: Box<dyn ContigSource + Send + Sync>,
    cache: FxHashMap<usize, LoadedContigs>,
}

impl ContigStore {
    pub fn new(
        reference_path: &Path,
        sources_path: &Path,
        source: Box<dyn ContigSource + Send + Sync>,
    ) -> Self {
        ContigStore {
            reference_path: reference_path.to_path_buf(),
            sources_path: sources_path.to_path_buf(),
            source,
            cache: FxHashMap::default(),
        }
    }

    /// Store backed by FASTA files.
    pub fn with_fasta(reference_path: &Path, sources_path: &Path) -> Self {
        Self::new(reference_path, sources_path, Box::new(FastaContigSource))
    }

    /// The reference comes from the reference directory, everything else from
    /// the sources directory.
    pub fn source_path(&self, participant: &SourceParticipant) -> PathBuf {
        if participant.is_reference() {
            self.reference_path.join(&participant.name)
        } else {
            self.sources_path.join(&participant.name)
        }
    }

    pub fn load(&mut self, participant: &SourceParticipant) -> Result<&LoadedContigs, VerifyErr> {
        let path = self.source_path(participant);
        match self.cache.entry(participant.id) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(
                    "Loading sequence {} ({}) from '{}'",
                    participant.id,
                    participant.name,
                    path.display()
                );
                let contigs = self.source.load_contigs(participant, &path)?;
                Ok(entry.insert(LoadedContigs::new(participant.id, contigs)))
            }
        }
    }

    pub fn get(&self, participant_id: usize) -> Option<&LoadedContigs> {
        self.cache.get(&participant_id)
    }

    /// Size index of an already loaded participant.
    pub fn sizes(&self, participant_id: usize) -> Option<&ContigSizeIndex> {
        self.get(participant_id).map(|loaded| &loaded.sizes)
    }
}
