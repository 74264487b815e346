//! AVS-LZ integration tests.

use avslz::{AvsLzError, END_MARKER, LzConfig, LzReader, LzWriter, compress, decompress};
use std::io::{self, Read, Write};

const SAMPLE: &[u8] = include_bytes!("fixtures/sample.txt");
const SAMPLE_LZ: &[u8] = include_bytes!("fixtures/sample.txt.lz");

/// Reproducible pseudo-random bytes (LCG).
fn noise(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut seed: u64 = 0x123456789ABCDEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

#[test]
fn test_decode_reference_fixture() {
    let decompressed = decompress(SAMPLE_LZ).expect("decompression failed");
    assert_eq!(decompressed.len(), SAMPLE.len());
    assert_eq!(decompressed, SAMPLE);
}

#[test]
fn test_encode_reproduces_reference_fixture() {
    // The fixture spans several staging buffers.
    assert!(SAMPLE.len() > 2 * LzConfig::AVS.staging_size);

    let compressed = compress(SAMPLE).expect("compression failed");
    assert_eq!(compressed, SAMPLE_LZ);
}

#[test]
fn test_roundtrip_text() {
    let original = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let compressed = compress(&original).expect("compression failed");
    let decompressed = decompress(&compressed).expect("decompression failed");

    assert!(compressed.len() < original.len() / 4);
    assert_eq!(decompressed, original);
}

#[test]
fn test_roundtrip_all_byte_values() {
    let original: Vec<u8> = (0..=255).cycle().take(5000).collect();
    let compressed = compress(&original).expect("compression failed");
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_roundtrip_longer_than_window() {
    // Forces the window to wrap many times on both sides.
    let mut original = noise(3000);
    original.extend_from_slice(&b"wrap-around ".repeat(2000));
    original.extend(noise(5000));

    let compressed = compress(&original).expect("compression failed");
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_incompressible_expansion_bound() {
    for size in [1usize, 7, 8, 9, 1024, 1025, 10_000] {
        let original = noise(size);
        let compressed = compress(&original).expect("compression failed");

        let bound = size + size.div_ceil(8) + 4;
        assert!(
            compressed.len() <= bound,
            "{} bytes expanded to {} (bound {})",
            size,
            compressed.len(),
            bound
        );
        assert_eq!(decompress(&compressed).expect("decompression failed"), original);
    }
}

#[test]
fn test_highly_repetitive_input() {
    let original = vec![0x42; 100_000];
    let compressed = compress(&original).expect("compression failed");

    // One 2-byte code per 18 bytes plus flag bytes.
    assert!(
        compressed.len() < original.len() / 7,
        "compressed to {} bytes",
        compressed.len()
    );
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_alternating_pattern() {
    let original = b"ab".repeat(10);
    let compressed = compress(&original).expect("compression failed");
    assert_eq!(
        compressed,
        [
            0x0F, b'a', b'b', b'a', b'b', 0x00, 0x41, 0x00, 0x85, 0x00, 0x41, 0x00, 0x00, 0x00
        ]
    );
    assert_eq!(decompress(&compressed).expect("decompression failed"), original);
}

#[test]
fn test_truncated_stream_rejected() {
    let truncated = &SAMPLE_LZ[..SAMPLE_LZ.len() - END_MARKER.len()];
    let err = decompress(truncated).unwrap_err();
    assert!(matches!(err, AvsLzError::UnexpectedEof { .. }), "{err}");
}

#[test]
fn test_every_short_prefix_rejected() {
    let compressed = compress(b"Hello Hello Hello World").expect("compression failed");

    // The final block ends on its end code, leaving only the last marker
    // byte unread.
    for cut in 0..compressed.len() - 1 {
        assert!(
            decompress(&compressed[..cut]).is_err(),
            "prefix of {} bytes decoded without error",
            cut
        );
    }
    assert!(decompress(&compressed[..compressed.len() - 1]).is_ok());
}

#[test]
fn test_split_writes_match_single_write() {
    let expected = compress(SAMPLE).expect("compression failed");

    for chunk_size in [1usize, 3, 17, 1023, 1024, 1025, 4096] {
        let mut writer = LzWriter::new(Vec::new());
        for chunk in SAMPLE.chunks(chunk_size) {
            writer.write_all(chunk).expect("write failed");
        }
        let compressed = writer.finish().expect("finish failed");
        assert_eq!(compressed, expected, "chunk size {}", chunk_size);
    }
}

#[test]
fn test_streaming_reader_small_buffers() {
    let mut reader = LzReader::new(SAMPLE_LZ);
    let mut output = Vec::new();
    let mut buf = [0u8; 7];

    loop {
        let n = reader.read(&mut buf).expect("read failed");
        if n == 0 {
            break;
        }
        output.extend_from_slice(&buf[..n]);
    }

    assert_eq!(output, SAMPLE);
    assert!(reader.is_finished());
    assert_eq!(reader.total_out(), SAMPLE.len() as u64);
    // The encoder's trailing marker byte is never needed.
    assert_eq!(reader.total_in(), SAMPLE_LZ.len() as u64 - 1);
}

#[test]
fn test_io_copy_pipeline() {
    let mut writer = LzWriter::new(Vec::new());
    io::copy(&mut &SAMPLE[..], &mut writer).expect("copy into encoder failed");
    assert_eq!(writer.total_in(), SAMPLE.len() as u64);
    let compressed = writer.finish().expect("finish failed");

    let mut output = Vec::new();
    io::copy(&mut LzReader::new(&compressed[..]), &mut output).expect("copy from decoder failed");
    assert_eq!(output, SAMPLE);
}

#[test]
fn test_custom_config_roundtrip() {
    let config = LzConfig::new(1024, 6, 2, 128, 300).expect("valid config");
    let original = b"custom widths, custom widths, custom widths! ".repeat(40);

    let compressed = avslz::compress_with_config(&original, config).expect("compression failed");
    let decompressed =
        avslz::decompress_with_config(&compressed, config).expect("decompression failed");
    assert_eq!(decompressed, original);

    // The stream does not describe its own parameters.
    let other = avslz::decompress(&compressed);
    assert!(other.map(|d| d != original).unwrap_or(true));
}

#[test]
fn test_sink_error_propagates() {
    #[derive(Debug)]
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    // Small inputs stay staged, so the failure surfaces at finish.
    let mut writer = LzWriter::new(Broken);
    writer.write_all(b"staged").expect("staging never touches the sink");
    let err = writer.finish().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

    // Overflowing the staging buffer surfaces it during write.
    let mut writer = LzWriter::new(Broken);
    let err = writer.write_all(&noise(4096)).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}
