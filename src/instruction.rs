//! Decoding and disassembly of 32-bit MIPS machine words.
//!
//! There are three word layouts, most significant field first:
//! - register: 6-bit opcode, 5-bit rs, 5-bit rt, 5-bit rd, 5-bit shamt, 6-bit funct.
//! - immediate: 6-bit opcode, 5-bit rs, 5-bit rt, 16-bit immediate.
//! - jump: 6-bit opcode, 26-bit target address.

use std::fmt;

use crate::bitutils::bit_field;
use crate::opcode::{Funct, InstrType, Opcode};
use crate::{DisasmError, Result};

const OPCODE: u32 = 6;
const RS: u32 = 5;
const RT: u32 = 5;
const RD: u32 = 5;
const SHAMT: u32 = 5;
const FUNCT: u32 = 6;
const IMM: u32 = 16;
const ADDR: u32 = 26;
const SIZE: u32 = 32;

/// Branch and load/store immediates count words, not bytes.
const WORD_BYTES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RInstr {
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IInstr {
    pub rs: u8,
    pub rt: u8,
    pub imm: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JInstr {
    pub addr: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    R(RInstr),
    I(IInstr),
    J(JInstr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstrType,
    pub operands: Operands,
    pub word: u32,
}

impl RInstr {
    fn parse(word: u32) -> Self {
        Self {
            rs: bit_field!(word, RS, RT + RD + SHAMT + FUNCT) as u8,
            rt: bit_field!(word, RT, RD + SHAMT + FUNCT) as u8,
            rd: bit_field!(word, RD, SHAMT + FUNCT) as u8,
            shamt: bit_field!(word, SHAMT, FUNCT) as u8,
        }
    }
}

impl IInstr {
    fn parse(word: u32) -> Self {
        Self {
            rs: bit_field!(word, RS, RT + IMM) as u8,
            rt: bit_field!(word, RT, IMM) as u8,
            imm: bit_field!(word, IMM, 0) as u16,
        }
    }
}

impl JInstr {
    fn parse(word: u32) -> Self {
        Self {
            addr: bit_field!(word, ADDR, 0) as u32,
        }
    }
}

impl Instruction {
    pub fn decode(word: u32) -> Result<Self> {
        let opcode = Opcode::try_from(bit_field!(word, OPCODE, SIZE - OPCODE) as u8)?;

        let instruction = match opcode {
            Opcode::Addi => Self::immediate(InstrType::Addi, word),
            Opcode::Addiu => Self::immediate(InstrType::Addiu, word),
            Opcode::Andi => Self::immediate(InstrType::Andi, word),
            Opcode::Beq => Self::immediate(InstrType::Beq, word),
            Opcode::Bgtz => Self::immediate(InstrType::Bgtz, word),
            Opcode::Blez => Self::immediate(InstrType::Blez, word),
            Opcode::Bne => Self::immediate(InstrType::Bne, word),
            Opcode::Lb => Self::immediate(InstrType::Lb, word),
            Opcode::Lui => Self::immediate(InstrType::Lui, word),
            Opcode::Lw => Self::immediate(InstrType::Lw, word),
            Opcode::Ori => Self::immediate(InstrType::Ori, word),
            Opcode::Sb => Self::immediate(InstrType::Sb, word),
            Opcode::Sw => Self::immediate(InstrType::Sw, word),
            Opcode::RegImm => {
                if bit_field!(word, RT, IMM) != 0 {
                    Self::immediate(InstrType::Bgez, word)
                } else {
                    Self::immediate(InstrType::Bltz, word)
                }
            }
            Opcode::J => Self::jump(InstrType::J, word),
            Opcode::Jal => Self::jump(InstrType::Jal, word),
            Opcode::Special2 => Self::register(InstrType::Mul, word),
            Opcode::Special => Self::register(Self::special_type(word)?, word),
        };

        log::debug!("decoded {:#010x} as {}", word, instruction.kind);
        Ok(instruction)
    }

    fn special_type(word: u32) -> Result<InstrType> {
        let funct = Funct::try_from(bit_field!(word, FUNCT, 0) as u8)?;
        match funct {
            Funct::Add => Ok(InstrType::Add),
            Funct::Addu => Ok(InstrType::Addu),
            Funct::And => Ok(InstrType::And),
            Funct::Jalr => Ok(InstrType::Jalr),
            Funct::Jr => Ok(InstrType::Jr),
            Funct::Mul => Err(DisasmError::InvalidMul(word)),
            Funct::Slt => Ok(InstrType::Slt),
            Funct::Sra => Ok(InstrType::Sra),
            Funct::Sub => Ok(InstrType::Sub),
            Funct::Syscall => Ok(InstrType::Syscall),
            // sll $0, $0, 0 is the canonical nop
            Funct::Sll if word == 0 => Ok(InstrType::Nop),
            Funct::Sll => Ok(InstrType::Sll),
        }
    }

    fn immediate(kind: InstrType, word: u32) -> Self {
        Self {
            kind,
            operands: Operands::I(IInstr::parse(word)),
            word,
        }
    }

    fn jump(kind: InstrType, word: u32) -> Self {
        Self {
            kind,
            operands: Operands::J(JInstr::parse(word)),
            word,
        }
    }

    fn register(kind: InstrType, word: u32) -> Self {
        Self {
            kind,
            operands: Operands::R(RInstr::parse(word)),
            word,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind.mnemonic();
        match (self.kind, self.operands) {
            (InstrType::Nop | InstrType::Syscall, _) => f.write_str(name),
            (InstrType::Jr, Operands::R(r)) => write!(f, "jr ${}", r.rs),
            (InstrType::Jalr, Operands::R(r)) => write!(f, "jalr ${}, ${}", r.rd, r.rs),
            (InstrType::Sll | InstrType::Sra, Operands::R(r)) => {
                write!(f, "{} ${}, ${}, {}", name, r.rd, r.rt, r.shamt)
            }
            (_, Operands::R(r)) => write!(f, "{} ${}, ${}, ${}", name, r.rd, r.rs, r.rt),
            (InstrType::Lui, Operands::I(i)) => write!(f, "lui ${}, {}", i.rt, i.imm),
            (InstrType::Lb | InstrType::Lw | InstrType::Sb | InstrType::Sw, Operands::I(i)) => {
                write!(f, "{} ${}, {}(${})", name, i.rt, WORD_BYTES * u32::from(i.imm), i.rs)
            }
            (InstrType::Beq | InstrType::Bne, Operands::I(i)) => {
                write!(f, "{} ${}, ${}, {}", name, i.rs, i.rt, WORD_BYTES * u32::from(i.imm))
            }
            (
                InstrType::Bgez | InstrType::Bgtz | InstrType::Blez | InstrType::Bltz,
                Operands::I(i),
            ) => write!(f, "{} ${} {}", name, i.rs, WORD_BYTES * u32::from(i.imm)),
            (_, Operands::I(i)) => write!(f, "{} ${}, ${}, {}", name, i.rt, i.rs, i.imm),
            (_, Operands::J(j)) => write!(f, "{} {:#010x}", name, j.addr << 2),
        }
    }
}
