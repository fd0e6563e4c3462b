//! Pure gzip byte compression helpers
//!
//! Two plain byte-to-byte functions; no custom header or magic bytes are
//! added around the gzip stream.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Compress bytes with gzip at the default level.
pub fn gzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    gzip_with(bytes, Compression::default())
}

/// Compress bytes with gzip at an explicit level.
pub fn gzip_with(bytes: &[u8], level: Compression) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), level);
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Decompress a gzip stream back into bytes.
pub fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_round_trip() {
        let input = b"homogeneous records compress well well well".to_vec();
        let compressed = gzip(&input).unwrap();
        assert_eq!(gunzip(&compressed).unwrap(), input);
    }

    #[test]
    fn test_gunzip_rejects_garbage() {
        assert!(gunzip(b"not a gzip stream").is_err());
    }

    #[test]
    fn test_levels_round_trip() {
        let input = vec![7u8; 4096];
        for level in [Compression::none(), Compression::fast(), Compression::best()] {
            let compressed = gzip_with(&input, level).unwrap();
            assert_eq!(gunzip(&compressed).unwrap(), input);
        }
    }
}
