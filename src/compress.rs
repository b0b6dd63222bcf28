use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressError {
    /// The destination buffer cannot hold the result. Callers recover by
    /// growing the destination and retrying; never surfaced further.
    #[error("output buffer too small")]
    OutputTooSmall,
    /// The input is not a valid compressed block. Decompression only.
    #[error("corrupt compressed block: {0}")]
    Corrupt(String),
}

/// Lossless block compressor over whole in-memory buffers.
///
/// Both calls write into a caller-provided destination of fixed capacity
/// and report how many bytes they produced, or `OutputTooSmall` when the
/// capacity does not suffice.
pub trait BlockCompressor {
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError>;
    fn decompress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError>;
}

/// Raw-deflate block compressor used for canvas snapshots.
///
/// The stream state is reset on every call, so one instance serves a whole
/// history ring without per-snapshot allocation.
pub struct DeflateCompressor {
    deflate: Compress,
    inflate: Decompress,
}

impl DeflateCompressor {
    pub fn new() -> Self {
        Self {
            deflate: Compress::new(Compression::fast(), false),
            inflate: Decompress::new(false),
        }
    }
}

impl Default for DeflateCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCompressor for DeflateCompressor {
    fn compress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
        self.deflate.reset();
        match self.deflate.compress(src, dst, FlushCompress::Finish) {
            Ok(Status::StreamEnd) => Ok(self.deflate.total_out() as usize),
            Ok(Status::Ok) | Ok(Status::BufError) => Err(CompressError::OutputTooSmall),
            Err(err) => Err(CompressError::Corrupt(err.to_string())),
        }
    }

    fn decompress(&mut self, src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
        self.inflate.reset(false);
        match self.inflate.decompress(src, dst, FlushDecompress::Finish) {
            Ok(Status::StreamEnd) => Ok(self.inflate.total_out() as usize),
            Ok(Status::Ok) | Ok(Status::BufError) => Err(CompressError::OutputTooSmall),
            Err(err) => Err(CompressError::Corrupt(err.to_string())),
        }
    }
}
