//! Recursive-boundary text splitter.
//!
//! Text is split on the coarsest separator present (paragraph, line,
//! sentence, word, character), pieces still longer than the chunk size are
//! split again with the next separator, and neighbouring pieces are merged
//! back up to the chunk size with a trailing overlap.
//!
//! Separators stay attached to the end of the piece they terminate and no
//! whitespace is trimmed, so every chunk is an exact slice of the input.
//! Lengths are measured in characters.

use std::ops::Range;

use crate::error::{AnalystError, Result};
use crate::types::config::ChunkingConfig;

/// Separators in priority order. The empty separator splits characters.
pub const SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Splits text into overlapping chunks no longer than `chunk_size` characters
/// (a single unsplittable piece may exceed it only when `chunk_size` is 1).
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<&'static str>,
}

impl RecursiveSplitter {
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(AnalystError::Config("chunk_size must be positive".into()));
        }
        if config.chunk_overlap >= config.chunk_size {
            return Err(AnalystError::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }

        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            separators: SEPARATORS.to_vec(),
        })
    }

    /// Split `text` into chunk strings.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.split_spans(text)
            .into_iter()
            .map(|span| &text[span])
            .collect()
    }

    /// Byte ranges of each chunk within `text`, in order.
    ///
    /// Consecutive ranges either touch or overlap; together they cover the
    /// whole input.
    pub fn split_spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        self.split_range(text, 0..text.len(), &self.separators, &mut chunks);
        chunks
    }

    fn split_range(
        &self,
        text: &str,
        range: Range<usize>,
        separators: &[&'static str],
        out: &mut Vec<Range<usize>>,
    ) {
        let slice = &text[range.clone()];

        // First separator present in this piece; "" always matches
        let position = separators
            .iter()
            .position(|sep| sep.is_empty() || slice.contains(sep))
            .unwrap_or(separators.len().saturating_sub(1));
        let separator = separators.get(position).copied().unwrap_or("");
        let finer = separators.get(position + 1..).unwrap_or(&[]);

        let mut good: Vec<Range<usize>> = Vec::new();
        for piece in split_keeping_separator(slice, separator, range.start) {
            if char_len(text, &piece) < self.chunk_size {
                good.push(piece);
                continue;
            }

            if !good.is_empty() {
                self.merge(text, &good, out);
                good.clear();
            }

            if finer.is_empty() {
                out.push(piece);
            } else {
                self.split_range(text, piece, finer, out);
            }
        }

        if !good.is_empty() {
            self.merge(text, &good, out);
        }
    }

    /// Greedily merge contiguous pieces into chunks, carrying at most
    /// `chunk_overlap` characters of trailing pieces into the next chunk.
    fn merge(&self, text: &str, pieces: &[Range<usize>], out: &mut Vec<Range<usize>>) {
        let mut window: std::collections::VecDeque<(Range<usize>, usize)> = Default::default();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(text, piece);

            if total + len > self.chunk_size && !window.is_empty() {
                out.push(span_of(&window));

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    match window.pop_front() {
                        Some((_, dropped)) => total -= dropped,
                        None => break,
                    }
                }
            }

            window.push_back((piece.clone(), len));
            total += len;
        }

        if !window.is_empty() {
            out.push(span_of(&window));
        }
    }
}

fn span_of(window: &std::collections::VecDeque<(Range<usize>, usize)>) -> Range<usize> {
    let start = window.front().map(|(r, _)| r.start).unwrap_or(0);
    let end = window.back().map(|(r, _)| r.end).unwrap_or(start);
    start..end
}

fn char_len(text: &str, range: &Range<usize>) -> usize {
    text[range.clone()].chars().count()
}

/// Split `slice` after every occurrence of `separator`, dropping empty pieces.
/// Returned ranges are offset by `base`.
fn split_keeping_separator(slice: &str, separator: &str, base: usize) -> Vec<Range<usize>> {
    if separator.is_empty() {
        return slice
            .char_indices()
            .map(|(i, c)| base + i..base + i + c.len_utf8())
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, matched) in slice.match_indices(separator) {
        let end = idx + matched.len();
        pieces.push(base + start..base + end);
        start = end;
    }
    if start < slice.len() {
        pieces.push(base + start..base + slice.len());
    }
    pieces
}

/// Rebuild the original text from chunk spans, skipping overlapped bytes.
pub fn reconstruct(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut covered = 0;
    for span in spans {
        if span.end > covered {
            out.push_str(&text[span.start.max(covered)..span.end]);
            covered = span.end;
        }
    }
    out
}
