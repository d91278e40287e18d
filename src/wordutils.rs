use std::io::BufRead;

use crate::{DisasmError, Result};

/// Word that terminates program input.
pub const SENTINEL: u32 = 0xffff_ffff;

pub fn parse_hex_word(token: &str) -> Result<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    u32::from_str_radix(digits, 16).map_err(|source| DisasmError::ParseWord {
        token: token.to_string(),
        source,
    })
}

/// Reads whitespace-separated hex words up to the sentinel or end of input.
pub fn read_hex_words<R: BufRead>(reader: R) -> Result<Vec<u32>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            let word = parse_hex_word(token)?;
            if word == SENTINEL {
                return Ok(words);
            }
            words.push(word);
        }
    }
    Ok(words)
}
