//! Compress command implementation.

use crate::utils::{read_text, write_stdout};
use oxiurl_codec::{compress, compress_raw};
use std::path::Path;

pub fn cmd_compress(
    text: Option<String>,
    input: Option<&Path>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(text, input)?;

    if raw {
        let bytes = compress_raw(&text)?;
        tracing::info!(input = text.len(), output = bytes.len(), "compressed (raw)");
        write_stdout(&bytes)?;
    } else {
        let packed = compress(&text)?;
        tracing::info!(input = text.len(), output = packed.len(), "compressed");
        println!("{}", packed);
    }

    Ok(())
}
