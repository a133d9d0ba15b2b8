//! Increment/decrement operations (INC, DEC)
//!
//! The 8-bit forms set zero/subtract/half-carry and leave carry alone;
//! the 16-bit forms touch no flags at all.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Reg8, Reg16};

/// Byte-pattern law for `INC r`: `0b00_rrr_100`.
const INC_REGISTER_BASE: u8 = 0b0000_0100;
/// Byte-pattern law for `DEC r`: `0b00_rrr_101`.
const DEC_REGISTER_BASE: u8 = 0b0000_0101;
/// `INC (HL)` / `DEC (HL)`: register-select code 6 in the same patterns.
const INC_HL: u8 = 0x34;
const DEC_HL: u8 = 0x35;
/// Byte-pattern law for `INC rr`: `0x03 | pair code << 4`.
const INC_PAIR_BASE: u8 = 0x03;
/// Byte-pattern law for `DEC rr`: `0x0B | pair code << 4`.
const DEC_PAIR_BASE: u8 = 0x0B;

/// Builds the increment/decrement family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for reg in Reg8::ALL {
        ops.push(Operation::new(
            INC_REGISTER_BASE | reg.code() << 3,
            1,
            CycleCost::Fixed(1),
            move |_, _| format!("INC {}", reg.name()),
            move |regs, _| {
                let result = alu::increment(&mut regs.flags, regs.reg8(reg));
                regs.set_reg8(reg, result);
            },
        ));

        ops.push(Operation::new(
            DEC_REGISTER_BASE | reg.code() << 3,
            1,
            CycleCost::Fixed(1),
            move |_, _| format!("DEC {}", reg.name()),
            move |regs, _| {
                let result = alu::decrement(&mut regs.flags, regs.reg8(reg));
                regs.set_reg8(reg, result);
            },
        ));
    }

    ops.push(Operation::new(
        INC_HL,
        1,
        CycleCost::Fixed(3),
        |_, _: &M| "INC (HL)".to_string(),
        |regs, mem| {
            let addr = regs.hl();
            let result = alu::increment(&mut regs.flags, mem.read_byte(addr));
            mem.write_byte(addr, result);
        },
    ));

    ops.push(Operation::new(
        DEC_HL,
        1,
        CycleCost::Fixed(3),
        |_, _: &M| "DEC (HL)".to_string(),
        |regs, mem| {
            let addr = regs.hl();
            let result = alu::decrement(&mut regs.flags, mem.read_byte(addr));
            mem.write_byte(addr, result);
        },
    ));

    for pair in Reg16::WORD {
        ops.push(Operation::new(
            INC_PAIR_BASE | pair.code() << 4,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("INC {}", pair.name()),
            move |regs, _| {
                regs.set_reg16(pair, regs.reg16(pair).wrapping_add(1));
            },
        ));

        ops.push(Operation::new(
            DEC_PAIR_BASE | pair.code() << 4,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("DEC {}", pair.name()),
            move |regs, _| {
                regs.set_reg16(pair, regs.reg16(pair).wrapping_sub(1));
            },
        ));
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;
    use crate::registers::RegisterFile;

    fn find(ops: &[Operation<FlatMemory>], opcode: u8) -> &Operation<FlatMemory> {
        ops.iter().find(|op| op.opcode == opcode).unwrap()
    }

    #[test]
    fn test_byte_pattern_law() {
        let ops = operations::<FlatMemory>();
        // INC B=0x04, INC C=0x0C, ... DEC A=0x3D; INC BC=0x03, DEC SP=0x3B.
        for reg in Reg8::ALL {
            assert!(ops.iter().any(|op| op.opcode == 0x04 | reg.code() << 3));
            assert!(ops.iter().any(|op| op.opcode == 0x05 | reg.code() << 3));
        }
        for pair in Reg16::WORD {
            assert!(ops.iter().any(|op| op.opcode == 0x03 | pair.code() << 4));
            assert!(ops.iter().any(|op| op.opcode == 0x0B | pair.code() << 4));
        }
        assert!(ops.iter().any(|op| op.opcode == 0x34));
        assert!(ops.iter().any(|op| op.opcode == 0x35));
        assert_eq!(ops.len(), 14 + 2 + 8);
    }

    #[test]
    fn test_inc_register_wraps_and_leaves_carry() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.b = 0xFF;
        regs.flags.carry = true;
        find(&ops, 0x04).execute(&mut regs, &mut mem);
        assert_eq!(regs.b, 0x00);
        assert!(regs.flags.zero);
        assert!(regs.flags.half_carry);
        assert!(regs.flags.carry);
    }

    #[test]
    fn test_dec_register() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0x01;
        find(&ops, 0x3D).execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 0x00);
        assert!(regs.flags.zero);
        assert!(regs.flags.subtract);
    }

    #[test]
    fn test_inc_hl_memory() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_hl(0xC000);
        mem.write_byte(0xC000, 0x0F);
        find(&ops, 0x34).execute(&mut regs, &mut mem);
        assert_eq!(mem.read_byte(0xC000), 0x10);
        assert!(regs.flags.half_carry);
    }

    #[test]
    fn test_inc_pair_no_flags() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_reg16(Reg16::DE, 0xFFFF);
        find(&ops, 0x13).execute(&mut regs, &mut mem);
        assert_eq!(regs.reg16(Reg16::DE), 0x0000);
        assert_eq!(regs.flags, Default::default());
    }

    #[test]
    fn test_dec_sp() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        find(&ops, 0x3B).execute(&mut regs, &mut mem);
        assert_eq!(regs.sp(), 0xFFFF);
    }
}
