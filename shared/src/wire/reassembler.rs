use crate::wire::error::ReassemblyError;

/// Accumulates fragments until a short one closes the message
pub struct Reassembler {
    chunk_size: usize,
    buffer: Vec<u8>,
}

impl Reassembler {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            buffer: Vec::new(),
        }
    }

    /// Feed one fragment. Returns the whole message once the closing fragment
    /// arrives. An oversized fragment discards anything buffered so far.
    pub fn push(&mut self, fragment: &[u8]) -> Result<Option<Vec<u8>>, ReassemblyError> {
        if fragment.len() > self.chunk_size {
            self.buffer.clear();
            return Err(ReassemblyError::OversizedFragment {
                len: fragment.len(),
                chunk_size: self.chunk_size,
            });
        }

        self.buffer.extend_from_slice(fragment);

        if fragment.len() < self.chunk_size {
            return Ok(Some(std::mem::take(&mut self.buffer)));
        }
        Ok(None)
    }

    /// Bytes buffered from an unfinished message
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
