//! Word-level re-chunking of provider output.
//!
//! Providers emit deltas at whatever granularity their tokenizer produces,
//! which can split words mid-way. The relay re-emits on word boundaries so
//! the browser never renders half a word. Concatenating everything a chunker
//! emits (including the final `flush`) reproduces the input byte-for-byte.

/// Stateful splitter that buffers partial words between deltas.
#[derive(Debug, Default)]
pub struct WordChunker {
    buffer: String,
}

impl WordChunker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a delta and collect the complete words it unlocks.
    ///
    /// A chunk is `[leading whitespace][word]`; the boundary sits at the
    /// first whitespace character after the word, which stays buffered as
    /// the next chunk's leading whitespace.
    pub fn push(&mut self, delta: &str) -> Vec<String> {
        self.buffer.push_str(delta);

        let mut chunks = Vec::new();
        while let Some(end) = word_boundary(&self.buffer) {
            let chunk: String = self.buffer.drain(..end).collect();
            chunks.push(chunk);
        }
        chunks
    }

    /// Drain whatever is left (the final, possibly unterminated word).
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Byte index of the first whitespace character that follows at least one
/// non-whitespace character, or `None` if no complete word is buffered yet.
fn word_boundary(s: &str) -> Option<usize> {
    let mut seen_word = false;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if seen_word {
                return Some(i);
            }
        } else {
            seen_word = true;
        }
    }
    None
}
