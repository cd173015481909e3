//! Inspect command implementation.

use crate::utils::read_text;
use oxiurl_codec::{Mode, UrlEncoder};
use oxiurl_core::OutputAlphabet;
use serde::Serialize;
use std::path::Path;

/// JSON output for the inspect command.
#[derive(Debug, Serialize)]
struct InspectJson {
    mode: String,
    mode_id: u8,
    symbol_count: usize,
    code_units: usize,
    url_length: usize,
    raw_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    compressed: String,
}

impl InspectJson {
    fn new(units: &[u16]) -> oxiurl_core::Result<Self> {
        let mode = Mode::classify(units);
        let url = UrlEncoder::new(OutputAlphabet::Url).encode(units)?;
        let raw = UrlEncoder::new(OutputAlphabet::Raw).encode(units)?;

        Ok(Self {
            mode: mode.name().to_string(),
            mode_id: mode.id(),
            symbol_count: mode.symbol_count(),
            code_units: units.len(),
            url_length: url.len(),
            raw_length: raw.len(),
            ratio: (!units.is_empty()).then(|| url.len() as f64 / units.len() as f64),
            compressed: OutputAlphabet::Url.render(&url),
        })
    }
}

pub fn cmd_inspect(
    text: Option<String>,
    input: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(text, input)?;
    let units: Vec<u16> = text.encode_utf16().collect();
    let report = InspectJson::new(&units)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Compression Information");
    println!("=======================");
    println!("Mode: {} ({})", report.mode, report.mode_id);
    println!("Symbols: {}", report.symbol_count);
    println!("Input: {} code units", report.code_units);
    println!("URL output: {} characters", report.url_length);
    println!("Raw output: {} bytes", report.raw_length);
    if let Some(ratio) = report.ratio {
        println!("Ratio: {:.1}%", ratio * 100.0);
    }
    println!();
    println!("{}", report.compressed);

    Ok(())
}
