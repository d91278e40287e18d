mod bitutils;
mod instruction;
mod opcode;
mod wordutils;

#[cfg(test)]
mod tests;

pub use crate::bitutils::{extract_bits, field, BitExtractor};
pub use crate::instruction::{IInstr, Instruction, JInstr, Operands, RInstr};
pub use crate::opcode::{Funct, FunctParseError, InstrType, Opcode, OpcodeParseError};
pub use crate::wordutils::{parse_hex_word, read_hex_words, SENTINEL};

use rustc_hash::FxHashMap;
use std::io::{BufRead, Write};
use std::num::ParseIntError;
use thiserror::Error;

/// Load address of the first instruction in a listing.
pub const START_ADDR: u32 = 0x40_0000;

/// Largest program [`Program::read`] accepts.
pub const MAX_INSTRUCTIONS: usize = 1000;

#[derive(Error, Debug)]
pub enum DisasmError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid hex word {token:?}: {source}")]
    ParseWord {
        token: String,
        source: ParseIntError,
    },

    #[error("Unrecognised instruction: {0}")]
    InvalidOpcode(#[from] OpcodeParseError),

    #[error("Invalid register-type word: {0}")]
    InvalidFunct(#[from] FunctParseError),

    #[error("Invalid MUL detected in word {0:#010x}")]
    InvalidMul(u32),

    #[error("Word {index} ({word:#010x}): {source}")]
    Decode {
        index: usize,
        word: u32,
        source: Box<DisasmError>,
    },

    #[error("Program exceeds {} instructions", MAX_INSTRUCTIONS)]
    TooManyInstructions,
}

pub type Result<T> = std::result::Result<T, DisasmError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn decode(words: &[u32]) -> Result<Self> {
        if words.len() > MAX_INSTRUCTIONS {
            return Err(DisasmError::TooManyInstructions);
        }

        let instructions = words
            .iter()
            .enumerate()
            .map(|(index, &word)| {
                Instruction::decode(word).map_err(|e| DisasmError::Decode {
                    index,
                    word,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Program { instructions })
    }

    /// Reads hex words up to the sentinel or end of input and decodes them.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let words = read_hex_words(reader)?;
        log::debug!("read {} words", words.len());
        Self::decode(&words)
    }

    pub fn write_listing<W: Write>(&self, mut writer: W, start_addr: u32) -> Result<()> {
        let mut addr = start_addr;
        for instruction in &self.instructions {
            writeln!(writer, "[{:#010x}] {:#010x} {}", addr, instruction.word, instruction)?;
            addr = addr.wrapping_add(4);
        }
        Ok(())
    }

    pub fn histogram(&self) -> FxHashMap<InstrType, usize> {
        let mut counts = FxHashMap::default();
        for instruction in &self.instructions {
            *counts.entry(instruction.kind).or_insert(0) += 1;
        }
        counts
    }
}
