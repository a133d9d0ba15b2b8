//! Bit operations (BIT, RES, SET)
//!
//! The CB-prefixed single-bit block: BIT tests a bit into the zero flag,
//! RES clears it, SET sets it. RES and SET touch no flags.

use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Flags, Reg8};

/// Byte-pattern law for `BIT b,r`: `0x40 | bit << 3 | register code`.
const BIT_BASE: u8 = 0x40;
/// Byte-pattern law for `RES b,r`: `0x80 | bit << 3 | register code`.
const RES_BASE: u8 = 0x80;
/// Byte-pattern law for `SET b,r`: `0xC0 | bit << 3 | register code`.
const SET_BASE: u8 = 0xC0;

fn test_bit(flags: &mut Flags, value: u8, bit: u8) {
    flags.zero = value & 1 << bit == 0;
    flags.subtract = false;
    flags.half_carry = true;
    // Carry is untouched.
}

/// Builds the CB-prefixed bit block.
pub fn prefixed_operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for bit in 0..8u8 {
        for reg in Reg8::ALL {
            ops.push(Operation::new(
                BIT_BASE | bit << 3 | reg.code(),
                2,
                CycleCost::Fixed(2),
                move |_, _| format!("BIT {},{}", bit, reg.name()),
                move |regs, _| {
                    test_bit(&mut regs.flags, regs.reg8(reg), bit);
                },
            ));

            ops.push(Operation::new(
                RES_BASE | bit << 3 | reg.code(),
                2,
                CycleCost::Fixed(2),
                move |_, _| format!("RES {},{}", bit, reg.name()),
                move |regs, _| {
                    regs.set_reg8(reg, regs.reg8(reg) & !(1 << bit));
                },
            ));

            ops.push(Operation::new(
                SET_BASE | bit << 3 | reg.code(),
                2,
                CycleCost::Fixed(2),
                move |_, _| format!("SET {},{}", bit, reg.name()),
                move |regs, _| {
                    regs.set_reg8(reg, regs.reg8(reg) | 1 << bit);
                },
            ));
        }

        ops.push(Operation::new(
            BIT_BASE | bit << 3 | 6,
            2,
            CycleCost::Fixed(3),
            move |_, _: &M| format!("BIT {},(HL)", bit),
            move |regs, mem| {
                test_bit(&mut regs.flags, mem.read_byte(regs.hl()), bit);
            },
        ));

        ops.push(Operation::new(
            RES_BASE | bit << 3 | 6,
            2,
            CycleCost::Fixed(4),
            move |_, _: &M| format!("RES {},(HL)", bit),
            move |regs, mem| {
                let addr = regs.hl();
                let value = mem.read_byte(addr);
                mem.write_byte(addr, value & !(1 << bit));
            },
        ));

        ops.push(Operation::new(
            SET_BASE | bit << 3 | 6,
            2,
            CycleCost::Fixed(4),
            move |_, _: &M| format!("SET {},(HL)", bit),
            move |regs, mem| {
                let addr = regs.hl();
                let value = mem.read_byte(addr);
                mem.write_byte(addr, value | 1 << bit);
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
    fn test_family_covers_upper_three_quarters() {
        let ops = prefixed_operations::<FlatMemory>();
        assert_eq!(ops.len(), 192);
        for opcode in 0x40..=0xFFu8 {
            assert!(ops.iter().any(|op| op.opcode == opcode));
        }
    }

    #[test]
    fn test_bit_sets_zero_from_tested_bit() {
        let ops = prefixed_operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.h = 0x80;
        regs.flags.carry = true;
        find(&ops, 0x7C).execute(&mut regs, &mut mem); // BIT 7,H
        assert!(!regs.flags.zero);
        assert!(regs.flags.half_carry);
        assert!(regs.flags.carry); // untouched

        regs.h = 0x00;
        find(&ops, 0x7C).execute(&mut regs, &mut mem);
        assert!(regs.flags.zero);
    }

    #[test]
    fn test_res_and_set_round_trip() {
        let ops = prefixed_operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.b = 0xFF;
        find(&ops, 0x90).execute(&mut regs, &mut mem); // RES 2,B
        assert_eq!(regs.b, 0xFB);
        find(&ops, 0xD0).execute(&mut regs, &mut mem); // SET 2,B
        assert_eq!(regs.b, 0xFF);
        assert_eq!(regs.flags, Default::default());
    }

    #[test]
    fn test_hl_forms() {
        let ops = prefixed_operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_hl(0xC000);
        mem.write_byte(0xC000, 0x00);
        find(&ops, 0xFE).execute(&mut regs, &mut mem); // SET 7,(HL)
        assert_eq!(mem.read_byte(0xC000), 0x80);
        find(&ops, 0x7E).execute(&mut regs, &mut mem); // BIT 7,(HL)
        assert!(!regs.flags.zero);
        find(&ops, 0xBE).execute(&mut regs, &mut mem); // RES 7,(HL)
        assert_eq!(mem.read_byte(0xC000), 0x00);
    }

    #[test]
    fn test_mnemonics() {
        let ops = prefixed_operations::<FlatMemory>();
        let regs = RegisterFile::new();
        let mem = FlatMemory::new();
        assert_eq!(find(&ops, 0x7C).mnemonic(&regs, &mem), "BIT 7,H");
        assert_eq!(find(&ops, 0x86).mnemonic(&regs, &mem), "RES 0,(HL)");
        assert_eq!(find(&ops, 0xC7).mnemonic(&regs, &mem), "SET 0,A");
    }
}
