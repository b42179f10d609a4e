/// Trailer closing every encoded call. Catches framing desync, nothing more.
pub const CALL_SENTINEL: u32 = 0xBAAD_F00D;

/// Largest binary fragment put on the socket. A message is sent as a run of
/// full-size fragments closed by one shorter (possibly empty) fragment.
pub const MAX_CHUNK_SIZE: usize = 1024;
