//! Expand command implementation.

use crate::utils::{read_input, read_text};
use oxiurl_codec::{expand, expand_raw};
use std::path::Path;

pub fn cmd_expand(
    text: Option<String>,
    input: Option<&Path>,
    raw: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let expanded = if raw {
        let bytes = read_input(text, input)?;
        expand_raw(&bytes)?
    } else {
        // Tolerate the trailing newline of piped or saved input.
        let packed = read_text(text, input)?;
        expand(packed.trim_end())?
    };

    print!("{}", expanded);
    Ok(())
}
