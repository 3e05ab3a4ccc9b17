use log::{debug, info};
use rust_htslib::faidx;
use std::path::Path;

use crate::alignment_record::SourceParticipant;
use crate::error::VerifyErr;
use crate::sequence_index::{Contig, ContigSource};

/// Loads contigs from (optionally bgzipped) FASTA files through htslib's faidx.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastaContigSource;

impl FastaContigSource {
    /// Contig names and lengths, in file order, from the `.fai` next to `fasta_path`.
    fn read_fai(fasta_path: &Path) -> Result<Vec<(String, usize)>, VerifyErr> {
        let fai_path = format!("{}.fai", fasta_path.display());
        let fai_content = std::fs::read_to_string(&fai_path)?;

        let mut entries = Vec::new();
        for line in fai_content.lines() {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 || fields[0].is_empty() {
                continue;
            }
            let length = fields[1].parse::<usize>().map_err(|e| {
                VerifyErr::Fasta(format!(
                    "Invalid length for '{}' in '{}': {}",
                    fields[0], fai_path, e
                ))
            })?;
            entries.push((fields[0].to_string(), length));
        }
        Ok(entries)
    }

    fn fetch_contig(
        reader: &faidx::Reader,
        fasta_path: &Path,
        name: &str,
        length: usize,
    ) -> Result<Vec<u8>, VerifyErr> {
        if length == 0 {
            return Ok(Vec::new());
        }
        // fetch_seq expects 0-based inclusive end coordinate
        match reader.fetch_seq(name, 0, length - 1) {
            Ok(seq) => {
                let mut seq_vec = seq.to_vec();
                unsafe { libc::free(seq.as_ptr() as *mut std::ffi::c_void) }; // Free up memory to avoid memory leak (bug https://github.com/rust-bio/rust-htslib/issues/401#issuecomment-1704290171)
                seq_vec.make_ascii_lowercase();
                Ok(seq_vec)
            }
            Err(e) => Err(VerifyErr::Fasta(format!(
                "Failed to fetch sequence {} from '{}': {}",
                name,
                fasta_path.display(),
                e
            ))),
        }
    }
}

impl ContigSource for FastaContigSource {
    fn load_contigs(
        &self,
        participant: &SourceParticipant,
        path: &Path,
    ) -> Result<Vec<Contig>, VerifyErr> {
        if !path.is_file() {
            return Err(VerifyErr::SourceNotFound {
                participant: participant.id,
                path: path.to_path_buf(),
            });
        }

        // Opening the reader creates the .fai when it is missing
        let reader = faidx::Reader::from_path(path).map_err(|e| {
            VerifyErr::Fasta(format!(
                "Failed to open FASTA file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let entries = Self::read_fai(path)?;
        debug!(
            "'{}' has {} contigs according to its index",
            path.display(),
            entries.len()
        );

        let mut contigs = Vec::with_capacity(entries.len());
        for (name, length) in entries {
            let sequence = Self::fetch_contig(&reader, path, &name, length)?;
            contigs.push(Contig { name, sequence });
        }

        info!(
            "Loaded {} contigs ({} bp) from '{}'",
            contigs.len(),
            contigs.iter().map(|contig| contig.len()).sum::<usize>(),
            path.display()
        );
        Ok(contigs)
    }
}
