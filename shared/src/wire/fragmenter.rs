/// Splits one encoded call into socket-sized fragments.
///
/// Yields `len / chunk_size` full fragments followed by exactly one shorter
/// fragment, which is empty when `len` is a multiple of `chunk_size`. The
/// short fragment tells the receiver the message is complete.
pub struct Fragmenter<'a> {
    payload: &'a [u8],
    chunk_size: usize,
    offset: usize,
    finished: bool,
}

impl<'a> Fragmenter<'a> {
    pub fn new(payload: &'a [u8], chunk_size: usize) -> Self {
        if chunk_size == 0 {
            panic!("Fragmenter chunk size must be greater than zero");
        }
        Self {
            payload,
            chunk_size,
            offset: 0,
            finished: false,
        }
    }

    /// Number of fragments this payload produces
    pub fn fragment_count(&self) -> usize {
        self.payload.len() / self.chunk_size + 1
    }
}

impl<'a> Iterator for Fragmenter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let remaining = self.payload.len() - self.offset;
        let len = remaining.min(self.chunk_size);
        let fragment = &self.payload[self.offset..self.offset + len];
        self.offset += len;
        if len < self.chunk_size {
            self.finished = true;
        }
        Some(fragment)
    }
}

pub fn fragment(payload: &[u8], chunk_size: usize) -> Fragmenter<'_> {
    Fragmenter::new(payload, chunk_size)
}
