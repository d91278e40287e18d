use crate::instruction::{IInstr, Instruction, JInstr, Operands, RInstr};
use crate::opcode::InstrType;
use crate::{DisasmError, Result};

#[cfg(test)]
#[allow(clippy::identity_op)]
mod tests {
    use super::*;

    fn r_word(opcode: u32, rs: u32, rt: u32, rd: u32, shamt: u32, funct: u32) -> u32 {
        (opcode << 26) | (rs << 21) | (rt << 16) | (rd << 11) | (shamt << 6) | funct
    }

    fn i_word(opcode: u32, rs: u32, rt: u32, imm: u32) -> u32 {
        (opcode << 26) | (rs << 21) | (rt << 16) | imm
    }

    fn disasm(word: u32) -> Result<String> {
        Ok(Instruction::decode(word)?.to_string())
    }

    #[test]
    fn test_register_fields() -> Result<()> {
        // add $3, $1, $2
        let word = r_word(0, 1, 2, 3, 0, 0x20);
        let instr = Instruction::decode(word)?;

        assert_eq!(instr.kind, InstrType::Add);
        assert_eq!(instr.word, word);
        assert_eq!(
            instr.operands,
            Operands::R(RInstr {
                rs: 1,
                rt: 2,
                rd: 3,
                shamt: 0
            })
        );
        Ok(())
    }

    #[test]
    fn test_immediate_fields() -> Result<()> {
        // lw $9, 3($29)
        let word = i_word(0x23, 29, 9, 3);
        let instr = Instruction::decode(word)?;

        assert_eq!(instr.kind, InstrType::Lw);
        assert_eq!(
            instr.operands,
            Operands::I(IInstr {
                rs: 29,
                rt: 9,
                imm: 3
            })
        );
        Ok(())
    }

    #[test]
    fn test_jump_fields() -> Result<()> {
        let instr = Instruction::decode(0x0c10_0004)?;
        assert_eq!(instr.kind, InstrType::Jal);
        assert_eq!(instr.operands, Operands::J(JInstr { addr: 0x10_0004 }));
        Ok(())
    }

    #[test]
    fn test_nop_and_sll() -> Result<()> {
        assert_eq!(Instruction::decode(0)?.kind, InstrType::Nop);
        assert_eq!(disasm(0)?, "nop");

        // sll $2, $3, 4
        let word = r_word(0, 0, 3, 2, 4, 0x0);
        assert_eq!(Instruction::decode(word)?.kind, InstrType::Sll);
        assert_eq!(disasm(word)?, "sll $2, $3, 4");
        Ok(())
    }

    #[test]
    fn test_regimm_branch_selection() -> Result<()> {
        assert_eq!(Instruction::decode(i_word(0x1, 4, 1, 2))?.kind, InstrType::Bgez);
        assert_eq!(Instruction::decode(i_word(0x1, 4, 0, 2))?.kind, InstrType::Bltz);
        assert_eq!(disasm(i_word(0x1, 4, 1, 2))?, "bgez $4 8");
        Ok(())
    }

    #[test]
    fn test_disassembly_formats() -> Result<()> {
        assert_eq!(disasm(r_word(0, 8, 9, 10, 0, 0x21))?, "addu $10, $8, $9");
        assert_eq!(disasm(r_word(0, 8, 9, 10, 0, 0x22))?, "sub $10, $8, $9");
        assert_eq!(disasm(r_word(0, 8, 9, 10, 0, 0x24))?, "and $10, $8, $9");
        assert_eq!(disasm(r_word(0, 8, 9, 10, 0, 0x2a))?, "slt $10, $8, $9");
        assert_eq!(disasm(r_word(0x1c, 8, 9, 10, 0, 0x2))?, "mul $10, $8, $9");
        assert_eq!(disasm(r_word(0, 0, 9, 10, 2, 0x3))?, "sra $10, $9, 2");
        assert_eq!(disasm(r_word(0, 31, 0, 0, 0, 0x8))?, "jr $31");
        assert_eq!(disasm(r_word(0, 8, 0, 31, 0, 0x9))?, "jalr $31, $8");
        assert_eq!(disasm(0x0000_000c)?, "syscall");

        assert_eq!(disasm(i_word(0x9, 29, 29, 8))?, "addiu $29, $29, 8");
        assert_eq!(disasm(i_word(0xc, 2, 3, 0xff))?, "andi $3, $2, 255");
        assert_eq!(disasm(i_word(0xd, 0, 4, 0xffff))?, "ori $4, $0, 65535");
        assert_eq!(disasm(i_word(0xf, 0, 1, 0x1001))?, "lui $1, 4097");
        assert_eq!(disasm(i_word(0x20, 4, 5, 1))?, "lb $5, 4($4)");
        assert_eq!(disasm(i_word(0x28, 4, 5, 2))?, "sb $5, 8($4)");
        assert_eq!(disasm(i_word(0x2b, 29, 31, 0))?, "sw $31, 0($29)");
        assert_eq!(disasm(i_word(0x4, 8, 9, 3))?, "beq $8, $9, 12");
        assert_eq!(disasm(i_word(0x5, 8, 0, 1))?, "bne $8, $0, 4");
        assert_eq!(disasm(i_word(0x7, 8, 0, 5))?, "bgtz $8 20");
        assert_eq!(disasm(i_word(0x6, 8, 0, 5))?, "blez $8 20");

        assert_eq!(disasm(0x0810_0000)?, "j 0x00400000");
        assert_eq!(disasm(0x0c10_0004)?, "jal 0x00400010");
        Ok(())
    }

    #[test]
    fn test_invalid_words() {
        assert!(matches!(
            Instruction::decode(r_word(0, 1, 2, 3, 0, 0x2)),
            Err(DisasmError::InvalidMul(_))
        ));
        assert!(matches!(
            Instruction::decode(r_word(0, 1, 2, 3, 0, 0x25)),
            Err(DisasmError::InvalidFunct(_))
        ));
        assert!(matches!(
            Instruction::decode(0xffff_ffff),
            Err(DisasmError::InvalidOpcode(_))
        ));
    }
}
