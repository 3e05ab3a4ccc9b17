//! MAF export of verified XMFA blocks.
//!
//! Only the serialization lives here; block contents come from a second
//! streaming pass over the XMFA file and contig sizes from the contig store.

use std::io::{self, BufRead, Write};

use crate::alignment_record::{AlignmentBlock, Strand};
use crate::contig_store::ContigSizeIndex;
use crate::error::VerifyErr;
use crate::verify::GAP;
use crate::xmfa::XmfaReader;

/// One sequence line of an exported block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// `<source name stem>:<contig index>`
    pub name: String,
    /// 0-based start on the row's strand.
    pub start: usize,
    pub strand: Strand,
    pub source_size: usize,
    pub aligned_text: String,
}

pub trait AlignmentExporter {
    fn write_header(&mut self) -> io::Result<()>;
    fn write_block(&mut self, rows: &[ExportRow]) -> io::Result<()>;
}

pub struct MafExporter<W: Write> {
    writer: W,
}

impl<W: Write> MafExporter<W> {
    pub fn new(writer: W) -> Self {
        MafExporter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AlignmentExporter for MafExporter<W> {
    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.writer, "##maf version=1")
    }

    fn write_block(&mut self, rows: &[ExportRow]) -> io::Result<()> {
        writeln!(self.writer)?; // blank line before block
        writeln!(self.writer, "a score=0.0")?;
        for row in rows {
            // Count non-gap characters to get the actual aligned size
            let aligned_size = row.aligned_text.chars().filter(|&c| c != GAP as char).count();
            writeln!(
                self.writer,
                "s {} {} {} {} {} {}",
                row.name,
                row.start,
                aligned_size,
                row.strand.symbol(),
                row.source_size,
                row.aligned_text
            )?;
        }
        Ok(())
    }
}

/// Builds export rows for one block. `sizes` yields the contig size index of
/// a participant id.
fn block_rows<'a, F>(
    block: &AlignmentBlock,
    stems: &[&str],
    sizes: F,
) -> Result<Vec<ExportRow>, VerifyErr>
where
    F: Fn(usize) -> Option<&'a ContigSizeIndex>,
{
    let mut rows = Vec::with_capacity(block.entries.len());
    for entry in &block.entries {
        let record = &entry.record;
        let index = sizes(record.participant_id);
        let source_size = index
            .and_then(|index| index.get(&record.contig_index))
            .copied()
            .ok_or_else(|| VerifyErr::ContigOutOfRange {
                participant: record.participant_id,
                contig_index: record.contig_index,
                contig_count: index.map(|index| index.len()).unwrap_or(0),
            })?;
        let aligned_text = entry.aligned_text.clone().unwrap_or_default();
        let size = aligned_text.chars().filter(|&c| c != GAP as char).count() as i64;

        // For MAF format, if strand is "-", start is relative to reverse-complemented sequence
        let start = match record.strand {
            Strand::Forward => record.target_offset.saturating_sub(1),
            Strand::Reverse => (source_size as i64).saturating_sub(record.target_offset),
        };
        let start = start.clamp(0, (source_size as i64 - size).max(0)) as usize;

        let stem = stems
            .get(record.participant_id - 1)
            .copied()
            .unwrap_or_default();
        rows.push(ExportRow {
            name: format!("{}:{}", stem, record.contig_index),
            start,
            strand: record.strand,
            source_size,
            aligned_text,
        });
    }
    Ok(rows)
}

/// Streams every block of `reader` into `exporter`. The reader must keep
/// aligned text. Returns the number of blocks written.
pub fn export_alignment<'a, R, E, F>(
    mut reader: XmfaReader<R>,
    sizes: F,
    exporter: &mut E,
) -> Result<usize, VerifyErr>
where
    R: BufRead,
    E: AlignmentExporter,
    F: Fn(usize) -> Option<&'a ContigSizeIndex>,
{
    let stems: Vec<String> = reader
        .header()
        .participants
        .iter()
        .map(|participant| participant.stem().to_string())
        .collect();
    let stems: Vec<&str> = stems.iter().map(|stem| stem.as_str()).collect();

    exporter.write_header()?;
    let mut blocks = 0;
    for block in reader.by_ref() {
        let rows = block_rows(&block?, &stems, &sizes)?;
        exporter.write_block(&rows)?;
        blocks += 1;
    }
    Ok(blocks)
}
