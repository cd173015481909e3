//! End-to-end tests for URL-safe compression.
//!
//! These tests exercise the public API across every mode and both output
//! alphabets, plus the failure paths of the decoder.

use oxiurl_codec::{
    ErrorKind, Mode, OutputAlphabet, OxiUrlError, UrlDecoder, UrlEncoder, compress, compress_raw,
    compress_utf16, compress_with, decode_utf8, encode_utf8, expand, expand_raw, expand_utf16,
    expand_with, peek_mode,
};

fn is_url_safe(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

// ============================================================================
// Round-trips
// ============================================================================

#[test]
fn test_roundtrip_every_mode_both_alphabets() {
    let samples = [
        ("\u{0100}", Mode::Utf8),
        ("\u{e9}", Mode::Latin1),
        ("\u{1}", Mode::Ascii),
        ("Hello, World!", Mode::Printable),
        ("\u{65e5}\u{672c}\u{8a9e}\u{306e}\u{30c6}\u{30ad}\u{30b9}\u{30c8}", Mode::Utf8),
        ("na\u{ef}ve caf\u{e9} r\u{e9}sum\u{e9}", Mode::Latin1),
        ("bell\u{7}\r\nreturn", Mode::Ascii),
        ("tabs\tand\nnewlines ~ {}", Mode::Printable),
    ];

    for (text, mode) in samples {
        for alphabet in [OutputAlphabet::Url, OutputAlphabet::Raw] {
            let packed = compress_with(text, alphabet).unwrap();
            assert_eq!(peek_mode(&packed, alphabet).unwrap(), mode, "{text:?}");
            assert_eq!(expand_with(&packed, alphabet).unwrap(), text, "{text:?}");
        }
    }
}

#[test]
fn test_url_output_is_url_safe() {
    for text in ["", "x", "Hello, World!", "\u{1F600}\u{1F601}", "\u{0}\u{ff}"] {
        let packed = compress(text).unwrap();
        assert!(is_url_safe(&packed), "{packed:?}");
    }
}

#[test]
fn test_raw_output_stays_below_256() {
    let packed = compress_with("\u{3042}\u{3044}\u{3046} raw", OutputAlphabet::Raw).unwrap();
    assert!(packed.chars().all(|c| u32::from(c) < 256));
}

#[test]
fn test_empty_string_roundtrip() {
    let packed = compress("").unwrap();
    assert_eq!(packed.len(), 1);
    assert_eq!(expand(&packed).unwrap(), "");

    let raw = compress_raw("").unwrap();
    assert_eq!(raw.len(), 1);
    assert_eq!(expand_raw(&raw).unwrap(), "");
}

#[test]
fn test_repetition_compresses() {
    let text = "abcabcabcabcabcabc";
    let packed = compress(text).unwrap();
    assert!(packed.len() < text.len(), "{packed:?}");
    assert_eq!(expand(&packed).unwrap(), text);
}

#[test]
fn test_long_run_exceeds_match_limit() {
    let text = "a".repeat(5000);
    let packed = compress(&text).unwrap();
    assert!(packed.len() < 200, "{}", packed.len());
    assert_eq!(expand(&packed).unwrap(), text);
}

#[test]
fn test_early_match_offset_width() {
    // The first back-reference starts at position 1 with a 0-bit offset.
    for text in ["aaaa", "aaa", "abab", "ababab"] {
        let packed = compress(text).unwrap();
        assert_eq!(expand(&packed).unwrap(), text, "{text:?}");
    }
}

#[test]
fn test_matches_beyond_window() {
    let mut text = String::from("0123456789abcdef");
    for i in 0..3000u32 {
        text.push(char::from(b'g' + (i * 7 % 19) as u8));
    }
    text.push_str("0123456789abcdef");
    let packed = compress(&text).unwrap();
    assert_eq!(expand(&packed).unwrap(), text);
}

#[test]
fn test_long_mixed_text() {
    let paragraph = "It is a truth universally acknowledged, that a single man in \
                     possession of a good fortune, must be in want of a wife.\n";
    let text = paragraph.repeat(40);
    let packed = compress(&text).unwrap();
    assert!(packed.len() * 4 < text.len());
    assert_eq!(expand(&packed).unwrap(), text);
}

#[test]
fn test_encoder_decoder_objects() {
    let units = utf16("reusable encoder, reusable decoder");
    let encoder = UrlEncoder::new(OutputAlphabet::Url);
    let decoder = UrlDecoder::new(OutputAlphabet::Url);

    // Each call starts from fresh state.
    let first = encoder.encode(&units).unwrap();
    let second = encoder.encode(&units).unwrap();
    assert_eq!(first, second);
    assert_eq!(decoder.decode(&first).unwrap(), units);
    assert_eq!(decoder.decode(&second).unwrap(), units);
}

#[test]
fn test_compression_is_deterministic() {
    let text = "deterministic output for identical input";
    assert_eq!(compress(text).unwrap(), compress(text).unwrap());
}

// ============================================================================
// Surrogates and transcoding
// ============================================================================

#[test]
fn test_surrogate_pairs_roundtrip() {
    let text = "emoji \u{1F600}\u{1F680} and \u{10FFFF}";
    let packed = compress(text).unwrap();
    assert_eq!(expand(&packed).unwrap(), text);
}

#[test]
fn test_lone_trail_surrogate_roundtrip() {
    let units = [0x61, 0xDFFF, 0x62];
    let packed = compress_utf16(&units, OutputAlphabet::Url).unwrap();
    assert_eq!(expand_utf16(&packed, OutputAlphabet::Url).unwrap(), units);
}

#[test]
fn test_unpaired_lead_surrogate_rejected() {
    let err = compress_utf16(&[0x61, 0xD800, 0x62], OutputAlphabet::Url).unwrap_err();
    assert_eq!(err, OxiUrlError::unpaired_surrogate(1));
    assert_eq!(err.kind(), ErrorKind::EncodingFailed);

    let err = compress_utf16(&[0xDBFF], OutputAlphabet::Url).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingFailed);
}

#[test]
fn test_standalone_transcoder() {
    let units = utf16("\u{e9}\u{3042}\u{1F600}");
    let bytes = encode_utf8(&units).unwrap();
    assert_eq!(bytes, "\u{e9}\u{3042}\u{1F600}".as_bytes());
    assert_eq!(decode_utf8(&bytes).unwrap(), units);
    assert_eq!(decode_utf8(&[0xFF]).unwrap_err().kind(), ErrorKind::CorruptStream);
}

// ============================================================================
// Corrupt input
// ============================================================================

#[test]
fn test_empty_compressed_input_rejected() {
    assert_eq!(expand("").unwrap_err().kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        expand_with("", OutputAlphabet::Raw).unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(expand_raw(&[]).unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_foreign_character_rejected() {
    let mut packed = compress("Hello, World!").unwrap();
    packed.insert(2, '+');
    let err = expand(&packed).unwrap_err();
    assert_eq!(err, OxiUrlError::invalid_character(2, '+'));
    assert_eq!(err.kind(), ErrorKind::CorruptStream);

    assert!(expand("abc=").is_err());
    assert!(expand("\u{e9}").is_err());
}

#[test]
fn test_raw_rejects_wide_characters() {
    let err = expand_with("\u{100}", OutputAlphabet::Raw).unwrap_err();
    assert!(matches!(err, OxiUrlError::InvalidCharacter { position: 0, .. }));
}

#[test]
fn test_truncated_back_reference_rejected() {
    // One literal, then a single long back-reference. Some cut lands inside
    // its length field.
    let text = "x".repeat(200);
    let units = UrlEncoder::new(OutputAlphabet::Raw)
        .encode(&utf16(&text))
        .unwrap();
    let decoder = UrlDecoder::new(OutputAlphabet::Raw);

    let mut saw_error = false;
    for cut in 1..units.len() {
        match decoder.decode(&units[..cut]) {
            Ok(prefix) => assert!(prefix.len() < text.len()),
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::CorruptStream, "{err}");
                saw_error = true;
            }
        }
    }
    assert!(saw_error);
}

// ============================================================================
// Known outputs
// ============================================================================

/// Low-redundancy lowercase text from the ZX81 generator.
fn zx81_letters(count: usize) -> String {
    let mut x: u32 = 1;
    (0..count)
        .map(|_| {
            x = (x * 75 + 74) % 65537;
            char::from(b'a' + (x % 26) as u8)
        })
        .collect()
}

#[test]
fn test_known_url_outputs() {
    let cases = [
        ("Hello, World!", "3ICfoQjgcmpnBaO"),
        ("abcabcabcabcabcabc", "ww0t5XW"),
        ("\u{e9}t\u{e9}", "T-_D"),
        (
            "\u{3042}\u{3044}\u{3042}\u{3044}\u{3042}\u{3044}",
            "CWImxRKUWbo",
        ),
    ];
    for (text, packed) in cases {
        assert_eq!(compress(text).unwrap(), packed, "{text:?}");
        assert_eq!(expand(packed).unwrap(), text);
    }
}

#[test]
fn test_known_output_past_eager_rebuilds() {
    // Well over 256 coded symbols, so the later trees are rebuilt on every
    // eighth update only.
    let text = zx81_letters(400);
    assert!(text.starts_with("trbgbpvvsvgmiuiugsaf"));
    let expected = concat!(
        "ypIvK5ux7YZLdABKeVdulNUXPxxtYLqxiBEacQsm406c8PZ6Drf3Sg6R2Gsnjuk81lDZMtb7YbFR9rjgXsDHV2fVHE",
        "HsbJJ9FoGNQidaAyxFcLUEOSK7AX69sL-tKijnTUziAVUpCVh4BV_z6-QtFFxVCAKdQk-WYweBNcpeQoA_zr8IlLA_",
        "iRhwziVUUibTSUqckZxzYNFrOA6lzSDFud1qYzj0lYIUtrq2c8b-aLT0yMKJOK1rw3O6Jm9dbWZxWQ7OhuPxmjYBI8",
        "bTKPkQ2DWSNxlz40LEURDqc4VIGgn4i46x16TZBprE2oQyQxbxJZylrXJgW-yNvEHUKzdh52nDP",
    );
    let packed = compress(&text).unwrap();
    assert_eq!(packed.len(), 345);
    assert_eq!(packed, expected);
    assert_eq!(expand(expected).unwrap(), text);
}
