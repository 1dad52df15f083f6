//! Text chunking for long records

use crate::SourceError;
use serde::{Deserialize, Serialize};

/// Approximate characters per model token
pub const CHARS_PER_TOKEN: usize = 4;

/// Chunk sizing, in approximate tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk size
    pub chunk_tokens: usize,

    /// Tokens repeated at the start of the next chunk
    pub overlap_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_tokens: 256,
            overlap_tokens: 20,
        }
    }
}

impl ChunkingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.chunk_tokens == 0 {
            return Err(SourceError::InvalidChunking(
                "chunk_tokens must be greater than 0".to_string(),
            ));
        }
        if self.overlap_tokens >= self.chunk_tokens {
            return Err(SourceError::InvalidChunking(format!(
                "overlap_tokens ({}) must be smaller than chunk_tokens ({})",
                self.overlap_tokens, self.chunk_tokens
            )));
        }
        Ok(())
    }
}

/// Boundaries tried in order: paragraphs, lines, words
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Splits text into overlapping chunks
///
/// Text is cut at the coarsest boundary that works: paragraphs (blank-line
/// separated), then lines, then words. Pieces are packed into chunks up to
/// the size limit. When a chunk is full, its trailing pieces that fit in the
/// overlap budget are carried into the next one. A piece with no usable
/// boundary that is larger than a whole chunk is cut into character windows.
#[derive(Debug, Clone)]
pub struct TextChunker {
    max_chars: usize,
    overlap_chars: usize,
}

impl TextChunker {
    /// Create a chunker from a validated configuration
    pub fn new(config: ChunkingConfig) -> Result<Self, SourceError> {
        config.validate()?;
        Ok(Self {
            max_chars: config.chunk_tokens * CHARS_PER_TOKEN,
            overlap_chars: config.overlap_tokens * CHARS_PER_TOKEN,
        })
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if char_len(text) <= self.max_chars {
            return vec![text.to_string()];
        }
        self.split(text, 0)
    }

    /// Pack the pieces of `text` between `SEPARATORS[level]` boundaries
    fn split(&self, text: &str, level: usize) -> Vec<String> {
        let separator = match SEPARATORS.get(level) {
            Some(separator) => *separator,
            None => return self.split_long(text),
        };
        let separator_len = char_len(separator);

        let mut chunks = Vec::new();
        let mut window: Vec<&str> = Vec::new();
        let mut window_len = 0;

        for piece in text.split(separator).map(str::trim).filter(|p| !p.is_empty()) {
            let piece_len = char_len(piece);

            if piece_len > self.max_chars {
                if !window.is_empty() {
                    chunks.push(window.join(separator));
                    window.clear();
                    window_len = 0;
                }
                chunks.extend(self.split(piece, level + 1));
                continue;
            }

            if !window.is_empty() && window_len + separator_len + piece_len > self.max_chars {
                chunks.push(window.join(separator));

                while !window.is_empty()
                    && (window_len > self.overlap_chars
                        || window_len + separator_len + piece_len > self.max_chars)
                {
                    let removed = window.remove(0);
                    window_len -= char_len(removed);
                    if !window.is_empty() {
                        window_len -= separator_len;
                    }
                }
            }

            if !window.is_empty() {
                window_len += separator_len;
            }
            window_len += piece_len;
            window.push(piece);
        }

        if !window.is_empty() {
            chunks.push(window.join(separator));
        }

        chunks
    }

    /// Cut one oversized word into overlapping character windows
    fn split_long(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let step = self.max_chars - self.overlap_chars;
        let mut pieces = Vec::new();
        let mut start = 0;

        loop {
            let end = std::cmp::min(start + self.max_chars, chars.len());
            pieces.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }

        pieces
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
