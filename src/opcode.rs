use std::fmt;
use thiserror::Error;

/// Primary opcode, bits 26..31 of a machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    Special = 0x0,
    RegImm = 0x1,
    J = 0x2,
    Jal = 0x3,
    Beq = 0x4,
    Bne = 0x5,
    Blez = 0x6,
    Bgtz = 0x7,
    Addi = 0x8,
    Addiu = 0x9,
    Andi = 0xc,
    Ori = 0xd,
    Lui = 0xf,
    Special2 = 0x1c,
    Lb = 0x20,
    Lw = 0x23,
    Sb = 0x28,
    Sw = 0x2b,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Invalid opcode {0:#04x}")]
pub struct OpcodeParseError(pub u8);

impl TryFrom<u8> for Opcode {
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Special),
            0x1 => Ok(Self::RegImm),
            0x2 => Ok(Self::J),
            0x3 => Ok(Self::Jal),
            0x4 => Ok(Self::Beq),
            0x5 => Ok(Self::Bne),
            0x6 => Ok(Self::Blez),
            0x7 => Ok(Self::Bgtz),
            0x8 => Ok(Self::Addi),
            0x9 => Ok(Self::Addiu),
            0xc => Ok(Self::Andi),
            0xd => Ok(Self::Ori),
            0xf => Ok(Self::Lui),
            0x1c => Ok(Self::Special2),
            0x20 => Ok(Self::Lb),
            0x23 => Ok(Self::Lw),
            0x28 => Ok(Self::Sb),
            0x2b => Ok(Self::Sw),
            _ => Err(OpcodeParseError(value)),
        }
    }

    type Error = OpcodeParseError;
}

/// Function code of a SPECIAL (opcode 0) word, bits 0..5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Funct {
    Sll = 0x0,
    Mul = 0x2,
    Sra = 0x3,
    Jr = 0x8,
    Jalr = 0x9,
    Syscall = 0xc,
    Add = 0x20,
    Addu = 0x21,
    Sub = 0x22,
    And = 0x24,
    Slt = 0x2a,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Invalid function code {0:#04x}")]
pub struct FunctParseError(pub u8);

impl TryFrom<u8> for Funct {
    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0x0 => Ok(Self::Sll),
            0x2 => Ok(Self::Mul),
            0x3 => Ok(Self::Sra),
            0x8 => Ok(Self::Jr),
            0x9 => Ok(Self::Jalr),
            0xc => Ok(Self::Syscall),
            0x20 => Ok(Self::Add),
            0x21 => Ok(Self::Addu),
            0x22 => Ok(Self::Sub),
            0x24 => Ok(Self::And),
            0x2a => Ok(Self::Slt),
            _ => Err(FunctParseError(value)),
        }
    }

    type Error = FunctParseError;
}

/// Decoded instruction, independent of the opcode/funct pair that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrType {
    Add,
    Addi,
    Addiu,
    Addu,
    And,
    Andi,
    Beq,
    Bgez,
    Bgtz,
    Blez,
    Bltz,
    Bne,
    J,
    Jal,
    Jalr,
    Jr,
    Lb,
    Lui,
    Lw,
    Mul,
    Nop,
    Ori,
    Sb,
    Sll,
    Slt,
    Sra,
    Sub,
    Sw,
    Syscall,
}

impl InstrType {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Addi => "addi",
            Self::Addiu => "addiu",
            Self::Addu => "addu",
            Self::And => "and",
            Self::Andi => "andi",
            Self::Beq => "beq",
            Self::Bgez => "bgez",
            Self::Bgtz => "bgtz",
            Self::Blez => "blez",
            Self::Bltz => "bltz",
            Self::Bne => "bne",
            Self::J => "j",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Jr => "jr",
            Self::Lb => "lb",
            Self::Lui => "lui",
            Self::Lw => "lw",
            Self::Mul => "mul",
            Self::Nop => "nop",
            Self::Ori => "ori",
            Self::Sb => "sb",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sra => "sra",
            Self::Sub => "sub",
            Self::Sw => "sw",
            Self::Syscall => "syscall",
        }
    }
}

impl fmt::Display for InstrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
