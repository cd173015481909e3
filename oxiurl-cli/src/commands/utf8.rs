//! UTF-8 transcoder commands.

use crate::utils::{parse_hex, read_text, to_hex};
use oxiurl_codec::{decode_utf8, encode_utf8};

pub fn cmd_utf8_encode(text: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(text, None)?;
    let units: Vec<u16> = text.encode_utf16().collect();
    println!("{}", to_hex(&encode_utf8(&units)?));
    Ok(())
}

pub fn cmd_utf8_decode(hex: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = parse_hex(hex)?;
    let units = decode_utf8(&bytes)?;

    match String::from_utf16(&units) {
        Ok(text) => println!("{}", text),
        // Lone trail surrogates survive transcoding but not `String`.
        Err(_) => println!(
            "{}",
            units
                .iter()
                .map(|u| format!("U+{u:04X}"))
                .collect::<Vec<_>>()
                .join(" ")
        ),
    }

    Ok(())
}
