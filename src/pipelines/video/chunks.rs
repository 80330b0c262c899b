// SPDX-License-Identifier: MPL-2.0

//! Append-only buffer for encoded media chunks
//!
//! The platform encoder emits muxed byte chunks at its own cadence during a
//! recording session. Chunks are kept in arrival order; the final artifact
//! is their plain concatenation, so dropping or reordering a chunk corrupts
//! the clip.

/// Ordered accumulation of encoded media chunks
#[derive(Debug, Default)]
pub struct ChunkBuffer {
    chunks: Vec<Vec<u8>>,
}

impl ChunkBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk in arrival order
    pub fn push(&mut self, chunk: Vec<u8>) {
        self.chunks.push(chunk);
    }

    /// Number of accumulated chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunks have arrived yet
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total payload size in bytes
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// Concatenate all chunks, in accumulated order, into one artifact
    pub fn assemble(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_bytes());
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Discard all accumulated chunks
    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}
