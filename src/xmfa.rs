//! XMFA (eXtended Multi-FastA) parsing
//!
//! Streams the header and the interval blocks written by parsnp/Mauve.
//! Supports both uncompressed and BGZF-compressed files.

use crate::alignment_record::{
    AlignmentBlock, BlockEntry, ComparisonWindow, IntervalRecord, SourceParticipant, Strand,
};
use crate::error::VerifyErr;
use crate::verify::GAP;
use log::{debug, info};
use noodles::bgzf;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Lines per participant stanza in the header; the file name is on the second.
const STANZA_LINES: usize = 4;
const STANZA_NAME_LINE: usize = 1;

const ENTRY_MARKER: char = '>';
const TERMINATOR_MARKER: char = '=';

/// Terminators between two progress messages.
const PROGRESS_STEP: usize = 10_000;

/// Number of positional fields in an entry's coordinate line.
const COORDINATE_FIELDS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmfaHeader {
    pub participants: Vec<SourceParticipant>,
    pub interval_count: usize,
}

impl XmfaHeader {
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn participant(&self, id: usize) -> Option<&SourceParticipant> {
        id.checked_sub(1).and_then(|idx| self.participants.get(idx))
    }
}

/// Output of the parsing phase: every record, grouped by participant and kept
/// in file order. Read-only for the rest of the run.
#[derive(Debug)]
pub struct ParsedAlignment {
    pub header: XmfaHeader,
    pub records: Vec<Vec<IntervalRecord>>,
    pub block_count: usize,
}

impl ParsedAlignment {
    pub fn records_for(&self, participant_id: usize) -> &[IntervalRecord] {
        participant_id
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx))
            .map(|records| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn record_count(&self) -> usize {
        self.records.iter().map(|records| records.len()).sum()
    }
}

/// Coordinates of one entry, in the order they appear on the line.
#[derive(Debug, PartialEq, Eq)]
struct Coordinates {
    participant_id: usize,
    start: i64,
    end: i64,
    strand: Strand,
    contig_index: usize,
    target_offset: i64,
}

/// Streaming reader over an XMFA file. The header is parsed on construction;
/// iterating yields one [`AlignmentBlock`] per `=` terminator.
pub struct XmfaReader<R: BufRead> {
    reader: R,
    header: XmfaHeader,
    window: ComparisonWindow,
    keep_aligned_text: bool,
    line_number: usize,
    buffer: String,
    pending: Option<String>,
    terminators: usize,
    finished: bool,
}

impl<R: BufRead> XmfaReader<R> {
    pub fn new(
        reader: R,
        window: ComparisonWindow,
        keep_aligned_text: bool,
    ) -> Result<Self, VerifyErr> {
        let mut xmfa = XmfaReader {
            reader,
            header: XmfaHeader {
                participants: Vec::new(),
                interval_count: 0,
            },
            window,
            keep_aligned_text,
            line_number: 0,
            buffer: String::new(),
            pending: None,
            terminators: 0,
            finished: false,
        };
        xmfa.header = xmfa.parse_header()?;
        Ok(xmfa)
    }

    pub fn header(&self) -> &XmfaHeader {
        &self.header
    }

    /// Terminator lines consumed so far.
    pub fn terminators_seen(&self) -> usize {
        self.terminators
    }

    fn next_line(&mut self) -> Result<Option<String>, VerifyErr> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        self.buffer.clear();
        if self.reader.read_line(&mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(self.buffer.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn require_line(&mut self, what: &str) -> Result<String, VerifyErr> {
        self.next_line()?.ok_or_else(|| {
            VerifyErr::parse(
                self.line_number + 1,
                "",
                format!("unexpected end of file, expected {what}"),
            )
        })
    }

    fn parse_header(&mut self) -> Result<XmfaHeader, VerifyErr> {
        // Format version preamble
        self.require_line("format version line")?;

        let line = self.require_line("sequence count line")?;
        let participant_count = second_token(&line)
            .and_then(|token| token.parse::<usize>().ok())
            .ok_or_else(|| VerifyErr::parse(self.line_number, &line, "invalid sequence count"))?;

        let mut participants = Vec::with_capacity(participant_count);
        for id in 1..=participant_count {
            let mut name = None;
            for stanza_line in 0..STANZA_LINES {
                let line = self.require_line("sequence stanza line")?;
                if stanza_line == STANZA_NAME_LINE {
                    let token = second_token(&line).ok_or_else(|| {
                        VerifyErr::parse(self.line_number, &line, "missing sequence file name")
                    })?;
                    name = Some(token.to_string());
                }
            }
            // STANZA_NAME_LINE < STANZA_LINES, so the name was set above
            let name = name.unwrap_or_default();
            participants.push(SourceParticipant::new(id, &name));
        }

        let line = self.require_line("interval count line")?;
        let interval_count = second_token(&line)
            .and_then(|token| token.parse::<usize>().ok())
            .ok_or_else(|| VerifyErr::parse(self.line_number, &line, "invalid interval count"))?;

        debug!(
            "XMFA header: {} sequences, {} intervals",
            participant_count, interval_count
        );

        Ok(XmfaHeader {
            participants,
            interval_count,
        })
    }

    fn read_block(&mut self) -> Result<Option<AlignmentBlock>, VerifyErr> {
        let mut block = AlignmentBlock::default();

        loop {
            let Some(line) = self.next_line()? else {
                return self.finish(block).map(|_| None);
            };

            if line.trim().is_empty() {
                continue;
            }

            if line.starts_with(TERMINATOR_MARKER) {
                self.terminators += 1;
                if self.terminators % PROGRESS_STEP == 0 {
                    debug!(
                        "Parsed {}/{} intervals",
                        self.terminators, self.header.interval_count
                    );
                }
                if block.entries.is_empty() {
                    continue;
                }
                return Ok(Some(block));
            }

            if let Some(body) = line.strip_prefix(ENTRY_MARKER) {
                let entry_line = self.line_number;
                let coordinates = tokenize_coordinates(body)
                    .map_err(|reason| VerifyErr::parse(entry_line, &line, reason))?;
                if self.header.participant(coordinates.participant_id).is_none() {
                    return Err(VerifyErr::parse(
                        entry_line,
                        &line,
                        format!(
                            "sequence {} is not declared in the header",
                            coordinates.participant_id
                        ),
                    ));
                }
                block
                    .entries
                    .push(self.read_entry(coordinates, entry_line, &line)?);
                continue;
            }

            return Err(VerifyErr::parse(
                self.line_number,
                &line,
                "expected an entry or a terminator line",
            ));
        }
    }

    /// Reads the sequence lines of one entry, leaving the next marker line pending.
    fn read_entry(
        &mut self,
        coordinates: Coordinates,
        entry_line: usize,
        entry_header: &str,
    ) -> Result<BlockEntry, VerifyErr> {
        let mut first_line: Option<String> = None;
        let mut aligned = String::new();
        let collect_all = self.keep_aligned_text || self.window == ComparisonWindow::Full;

        while let Some(line) = self.next_line()? {
            if line.starts_with(ENTRY_MARKER) || line.starts_with(TERMINATOR_MARKER) {
                self.pending = Some(line);
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let content = line.trim_end();
            if first_line.is_none() {
                first_line = Some(content.to_string());
            }
            if collect_all {
                aligned.push_str(content.trim_start());
            }
        }

        let Some(first_line) = first_line else {
            return Err(VerifyErr::parse(
                entry_line,
                entry_header,
                "entry has no sequence line",
            ));
        };

        let claimed_text = match self.window {
            ComparisonWindow::Prefix(bound) => claimed_prefix(&first_line, bound),
            ComparisonWindow::Full => aligned
                .chars()
                .filter(|&c| c != GAP as char)
                .collect::<String>()
                .to_ascii_lowercase(),
        };

        Ok(BlockEntry {
            record: IntervalRecord {
                participant_id: coordinates.participant_id,
                alignment_length: coordinates.end - coordinates.start,
                strand: coordinates.strand,
                contig_index: coordinates.contig_index,
                target_offset: coordinates.target_offset,
                claimed_text,
            },
            aligned_text: self.keep_aligned_text.then_some(aligned),
        })
    }

    /// End of input: the terminator count must match the header.
    fn finish(&mut self, block: AlignmentBlock) -> Result<(), VerifyErr> {
        self.finished = true;
        if !block.entries.is_empty() {
            return Err(VerifyErr::parse(
                self.line_number,
                "<end of file>",
                "alignment block is missing its terminator",
            ));
        }
        if self.terminators != self.header.interval_count {
            return Err(VerifyErr::parse(
                self.line_number,
                "<end of file>",
                format!(
                    "header declares {} intervals but {} were found",
                    self.header.interval_count, self.terminators
                ),
            ));
        }
        info!("Parsed {} intervals", self.terminators);
        Ok(())
    }
}

impl<R: BufRead> Iterator for XmfaReader<R> {
    type Item = Result<AlignmentBlock, VerifyErr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.read_block();
        if result.is_err() {
            self.finished = true;
        }
        result.transpose()
    }
}

fn second_token(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}

/// Leading `bound` characters of a sequence line, trailing whitespace trimmed.
fn claimed_prefix(content: &str, bound: usize) -> String {
    let prefix: String = content.chars().take(bound).collect();
    prefix.trim_end().to_ascii_lowercase()
}

/// Splits a coordinate line (without the leading `>`) into its positional
/// tokens. Delimiters are `-`, `:p`, ` cluster`, ` s`, `:` and whitespace;
/// `keep_dash` decides, per dash position, whether that dash belongs to a token.
fn split_coordinates<F>(body: &str, keep_dash: F) -> Vec<&str>
where
    F: Fn(&[u8], usize) -> bool,
{
    let bytes = body.as_bytes();
    let mut tokens = Vec::with_capacity(COORDINATE_FIELDS);
    let mut token_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];
        let delimiter_len = if bytes[i] == b'-' {
            if keep_dash(bytes, i) {
                0
            } else {
                1
            }
        } else if rest.starts_with(b":p") {
            2
        } else if rest.starts_with(b" cluster") {
            8
        } else if rest.starts_with(b" s") {
            2
        } else if bytes[i] == b':' || bytes[i].is_ascii_whitespace() {
            1
        } else {
            0
        };

        if delimiter_len == 0 {
            i += 1;
        } else {
            tokens.push(&body[token_start..i]);
            i += delimiter_len;
            token_start = i;
        }
    }
    tokens.push(&body[token_start..]);
    tokens
}

/// Forward entries: every dash is a delimiter.
fn tokenize_forward(body: &str) -> Vec<&str> {
    split_coordinates(body, |_, _| false)
}

/// Reverse entries: a dash preceded by whitespace is the strand symbol, and a
/// dash right after the `:p` marker is the sign of a negative offset.
fn tokenize_reverse(body: &str) -> Vec<&str> {
    split_coordinates(body, |bytes, i| {
        i > 0 && (bytes[i - 1].is_ascii_whitespace() || bytes[..i].ends_with(b":p"))
    })
}

fn tokenize_coordinates(body: &str) -> Result<Coordinates, String> {
    let body = body.trim_end();
    let (tokens, expected_strand) = if body.contains(" + ") {
        (tokenize_forward(body), Strand::Forward)
    } else {
        (tokenize_reverse(body), Strand::Reverse)
    };

    if tokens.len() != COORDINATE_FIELDS {
        return Err(format!(
            "expected {} coordinate fields, found {}",
            COORDINATE_FIELDS,
            tokens.len()
        ));
    }

    let participant_id = parse_field::<usize>(tokens[0], "sequence number")?;
    let start = parse_field::<i64>(tokens[1], "region start")?;
    let end = parse_field::<i64>(tokens[2], "region end")?;
    let strand = Strand::from_symbol(tokens[3])
        .filter(|&strand| strand == expected_strand)
        .ok_or_else(|| format!("invalid strand '{}'", tokens[3]))?;
    // tokens[4] is the cluster id, which verification does not use
    let contig_index = parse_field::<usize>(tokens[5], "contig index")?;
    let target_offset = parse_field::<i64>(tokens[6], "contig offset")?;

    if participant_id == 0 {
        return Err("sequence numbers are 1-based".to_string());
    }
    if contig_index == 0 {
        return Err("contig indices are 1-based".to_string());
    }

    Ok(Coordinates {
        participant_id,
        start,
        end,
        strand,
        contig_index,
        target_offset,
    })
}

fn parse_field<T: std::str::FromStr>(token: &str, name: &str) -> Result<T, String> {
    token
        .parse::<T>()
        .map_err(|_| format!("invalid {} '{}'", name, token))
}

const BGZF_HEADER_SIZE: usize = 18;

/// Check whether a file starts with a valid BGZF header.
/// Returns `Ok(false)` for regular gzip, too-small files, or plain text.
fn is_bgzf<R: Read + Seek>(reader: &mut R) -> std::io::Result<bool> {
    let mut header = [0u8; BGZF_HEADER_SIZE];
    let result = match reader.read_exact(&mut header) {
        Ok(()) => {
            Ok(header[0..2] == [0x1f, 0x8b]      // gzip magic
                && header[2] == 0x08              // DEFLATE
                && header[3] == 0x04              // FEXTRA
                && header[10..12] == [0x06, 0x00] // XLEN=6
                && header[12..14] == [b'B', b'C'] // BC subfield
                && header[14..16] == [0x02, 0x00]) // SLEN=2
        }
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    };
    reader.seek(SeekFrom::Start(0))?;
    result
}

/// Opens an XMFA file, transparently decompressing `.gz`/`.bgz` BGZF input.
pub fn open_xmfa(xmfa_path: &Path) -> Result<Box<dyn BufRead>, VerifyErr> {
    let mut file = File::open(xmfa_path).map_err(|e| {
        VerifyErr::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to open XMFA file '{}': {}", xmfa_path.display(), e),
        ))
    })?;

    let name = xmfa_path.to_string_lossy();
    if [".gz", ".bgz"].iter().any(|e| name.ends_with(e)) {
        if !is_bgzf(&mut file)? {
            return Err(VerifyErr::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "'{}' is regular gzip, not BGZF. Convert with: zcat '{}' | bgzip > output.xmfa.gz",
                    name, name
                ),
            )));
        }
        debug!("Reading {} as BGZF", name);
        Ok(Box::new(BufReader::new(bgzf::io::Reader::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parses a whole XMFA stream into records grouped by participant.
pub fn parse_xmfa<R: BufRead>(
    reader: R,
    window: ComparisonWindow,
) -> Result<ParsedAlignment, VerifyErr> {
    let mut xmfa = XmfaReader::new(reader, window, false)?;
    let mut records: Vec<Vec<IntervalRecord>> = vec![Vec::new(); xmfa.header().participant_count()];
    let mut block_count = 0;

    for block in xmfa.by_ref() {
        for entry in block?.entries {
            // Participant ids were checked against the header while parsing
            records[entry.record.participant_id - 1].push(entry.record);
        }
        block_count += 1;
    }

    Ok(ParsedAlignment {
        header: xmfa.header,
        records,
        block_count,
    })
}

pub fn parse_xmfa_file(
    xmfa_path: &Path,
    window: ComparisonWindow,
) -> Result<ParsedAlignment, VerifyErr> {
    parse_xmfa(open_xmfa(xmfa_path)?, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "#FormatVersion Parsnp v1.1\n\
        #SequenceCount 2\n\
        ##SequenceIndex 1\n\
        ##SequenceFile genome1.fna.ref\n\
        ##SequenceHeader >contig1\n\
        ##SequenceLength 100bp\n\
        ##SequenceIndex 2\n\
        ##SequenceFile genome2.fna\n\
        ##SequenceHeader >contig1\n\
        ##SequenceLength 100bp\n";

    fn xmfa(interval_count: usize, body: &str) -> String {
        format!("{HEADER}#IntervalCount {interval_count}\n{body}")
    }

    #[test]
    fn test_tokenize_forward_line() {
        let coordinates = tokenize_coordinates("1:1-100 + cluster1 s1:p1").unwrap();
        assert_eq!(
            coordinates,
            Coordinates {
                participant_id: 1,
                start: 1,
                end: 100,
                strand: Strand::Forward,
                contig_index: 1,
                target_offset: 1,
            }
        );
    }

    #[test]
    fn test_tokenize_reverse_line_keeps_strand_dash() {
        let coordinates = tokenize_coordinates("2:201-300 - cluster7 s3:p450").unwrap();
        assert_eq!(coordinates.participant_id, 2);
        assert_eq!(coordinates.start, 201);
        assert_eq!(coordinates.end, 300);
        assert_eq!(coordinates.strand, Strand::Reverse);
        assert_eq!(coordinates.contig_index, 3);
        assert_eq!(coordinates.target_offset, 450);
    }

    #[test]
    fn test_tokenize_reverse_negative_offset() {
        let coordinates = tokenize_coordinates("2:1-10 - cluster1 s1:p-5").unwrap();
        assert_eq!(coordinates.target_offset, -5);
    }

    #[test]
    fn test_tokenize_forward_negative_offset_is_rejected() {
        // Forward lines split on every dash, so the sign yields an extra field
        assert!(tokenize_coordinates("1:1-10 + cluster1 s1:p-5").is_err());
    }

    #[test]
    fn test_tokenize_rules_differ_on_strand_dash() {
        let body = "2:1-10 - cluster1 s1:p5";
        assert_eq!(tokenize_reverse(body), vec!["2", "1", "10", "-", "1", "1", "5"]);
        assert_eq!(tokenize_forward(body).len(), 8);
    }

    #[test]
    fn test_tokenize_invalid_lines() {
        assert!(tokenize_coordinates("1:1-100 + cluster1").is_err());
        assert!(tokenize_coordinates("x:1-100 + cluster1 s1:p1").is_err());
        assert!(tokenize_coordinates("1:1-100 + cluster1 s0:p1").is_err());
        assert!(tokenize_coordinates("0:1-100 + cluster1 s1:p1").is_err());
    }

    #[test]
    fn test_parse_header() {
        let input = xmfa(0, "");
        let reader = XmfaReader::new(Cursor::new(input), ComparisonWindow::default(), false).unwrap();
        let header = reader.header();
        assert_eq!(header.participant_count(), 2);
        assert_eq!(header.interval_count, 0);
        assert_eq!(header.participants[0].name, "genome1.fna");
        assert!(header.participants[0].is_reference());
        assert_eq!(header.participants[1].name, "genome2.fna");
    }

    #[test]
    fn test_parse_header_idempotent() {
        let input = xmfa(0, "");
        let first = XmfaReader::new(Cursor::new(input.clone()), ComparisonWindow::default(), false)
            .unwrap()
            .header()
            .clone();
        let second = XmfaReader::new(Cursor::new(input), ComparisonWindow::default(), false)
            .unwrap()
            .header()
            .clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_header_bad_count() {
        let input = "#FormatVersion Parsnp v1.1\n#SequenceCount two\n";
        match XmfaReader::new(Cursor::new(input), ComparisonWindow::default(), false) {
            Err(VerifyErr::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other.map(|r| r.header().clone())),
        }
    }

    #[test]
    fn test_parse_header_truncated() {
        let input = "#FormatVersion Parsnp v1.1\n#SequenceCount 2\n##SequenceIndex 1\n";
        assert!(matches!(
            XmfaReader::new(Cursor::new(input), ComparisonWindow::default(), false),
            Err(VerifyErr::ParseError { .. })
        ));
    }

    #[test]
    fn test_parse_blocks() {
        let body = ">1:1-30 + cluster1 s1:p1\n\
            ACGTACGTACGTACGTACGTACGTAC\n\
            >2:5-35 - cluster1 s2:p40\n\
            ACG-ACGT\n\
            =\n\
            >1:31-40 + cluster2 s1:p31\n\
            TTTT\n\
            =\n";
        let parsed = parse_xmfa(Cursor::new(xmfa(2, body)), ComparisonWindow::default()).unwrap();

        assert_eq!(parsed.block_count, 2);
        assert_eq!(parsed.record_count(), 3);

        let first = &parsed.records_for(1)[0];
        assert_eq!(first.alignment_length, 29);
        assert_eq!(first.claimed_text, "acgtacgtacgtacgtacgt");
        assert_eq!(first.claimed_length(), 20);

        let reverse = &parsed.records_for(2)[0];
        assert_eq!(reverse.strand, Strand::Reverse);
        assert_eq!(reverse.contig_index, 2);
        assert_eq!(reverse.target_offset, 40);
        assert_eq!(reverse.claimed_text, "acg-acgt");

        assert_eq!(parsed.records_for(1)[1].claimed_text, "tttt");
        assert!(parsed.records_for(3).is_empty());
    }

    #[test]
    fn test_prefix_comes_from_first_line_only() {
        let body = ">1:1-12 + cluster1 s1:p1\nACGT\nGGGG\n=\n";
        let parsed = parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()).unwrap();
        assert_eq!(parsed.records_for(1)[0].claimed_text, "acgt");
    }

    #[test]
    fn test_full_window_drops_gaps() {
        let body = ">1:1-12 + cluster1 s1:p1\nAC-GT\nGG--GG\n=\n";
        let parsed = parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::Full).unwrap();
        assert_eq!(parsed.records_for(1)[0].claimed_text, "acgtgggg");
    }

    #[test]
    fn test_aligned_text_kept_on_request() {
        let body = ">1:1-12 + cluster1 s1:p1\nAC-GT\nGG\n=\n";
        let mut reader =
            XmfaReader::new(Cursor::new(xmfa(1, body)), ComparisonWindow::default(), true).unwrap();
        let block = reader.next().unwrap().unwrap();
        assert_eq!(block.entries[0].aligned_text.as_deref(), Some("AC-GTGG"));
        assert!(reader.next().is_none());
        assert_eq!(reader.terminators_seen(), 1);
    }

    #[test]
    fn test_fewer_terminators_than_declared() {
        let body = ">1:1-4 + cluster1 s1:p1\nACGT\n=\n";
        assert!(matches!(
            parse_xmfa(Cursor::new(xmfa(2, body)), ComparisonWindow::default()),
            Err(VerifyErr::ParseError { .. })
        ));
    }

    #[test]
    fn test_more_terminators_than_declared() {
        let body = ">1:1-4 + cluster1 s1:p1\nACGT\n=\n>1:5-8 + cluster2 s1:p5\nACGT\n=\n";
        assert!(parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()).is_err());
    }

    #[test]
    fn test_missing_final_terminator() {
        let body = ">1:1-4 + cluster1 s1:p1\nACGT\n=\n>1:5-8 + cluster2 s1:p5\nACGT\n";
        assert!(parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()).is_err());
    }

    #[test]
    fn test_malformed_coordinate_line_names_line() {
        let body = ">1:1-4 + cluster1\nACGT\n=\n";
        match parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()) {
            Err(VerifyErr::ParseError { line, content, .. }) => {
                assert_eq!(line, 12);
                assert_eq!(content, ">1:1-4 + cluster1");
            }
            other => panic!("expected parse error, got {:?}", other.map(|p| p.block_count)),
        }
    }

    #[test]
    fn test_entry_without_sequence_before_next_entry() {
        let body = ">1:1-8 + cluster1 s1:p1\n>2:1-8 - cluster1 s1:p8\nACGTACGT\n=\n";
        match parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()) {
            Err(VerifyErr::ParseError { line, content, .. }) => {
                assert_eq!(line, 12);
                assert_eq!(content, ">1:1-8 + cluster1 s1:p1");
            }
            other => panic!("expected parse error, got {:?}", other.map(|p| p.block_count)),
        }
    }

    #[test]
    fn test_entry_without_sequence_before_terminator() {
        let body = ">1:1-8 + cluster1 s1:p1\nACGTACGT\n>2:1-8 - cluster1 s1:p8\n=\n";
        for window in [ComparisonWindow::default(), ComparisonWindow::Full] {
            match parse_xmfa(Cursor::new(xmfa(1, body)), window) {
                Err(VerifyErr::ParseError { line, content, .. }) => {
                    assert_eq!(line, 14);
                    assert_eq!(content, ">2:1-8 - cluster1 s1:p8");
                }
                other => panic!("expected parse error, got {:?}", other.map(|p| p.block_count)),
            }
        }
    }

    #[test]
    fn test_blank_lines_inside_entry_are_skipped() {
        let body = ">1:1-8 + cluster1 s1:p1\n\n  \nACGTACGT\n=\n";
        let parsed = parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()).unwrap();
        assert_eq!(parsed.records_for(1)[0].claimed_text, "acgtacgt");

        let only_blank = ">1:1-8 + cluster1 s1:p1\n\n=\n";
        assert!(matches!(
            parse_xmfa(Cursor::new(xmfa(1, only_blank)), ComparisonWindow::default()),
            Err(VerifyErr::ParseError { .. })
        ));
    }

    #[test]
    fn test_undeclared_participant() {
        let body = ">3:1-4 + cluster1 s1:p1\nACGT\n=\n";
        assert!(parse_xmfa(Cursor::new(xmfa(1, body)), ComparisonWindow::default()).is_err());
    }
}
