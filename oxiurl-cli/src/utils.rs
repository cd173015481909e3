//! Utility functions for the CLI.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read input bytes from the argument, a file, or stdin, in that order.
pub fn read_input(text: Option<String>, input: Option<&Path>) -> io::Result<Vec<u8>> {
    if let Some(text) = text {
        return Ok(text.into_bytes());
    }
    if let Some(path) = input {
        return fs::read(path);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Read input as text.
pub fn read_text(
    text: Option<String>,
    input: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = read_input(text, input)?;
    Ok(String::from_utf8(bytes)?)
}

/// Write raw bytes to stdout.
pub fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}

/// Format bytes as space-separated lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex bytes, ignoring whitespace.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(digits)
}
