//! Exclusive-or operations (XOR)
//!
//! XOR combines the operand into the accumulator. Carry, half-carry and
//! subtract are always cleared; zero tracks the result.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::Reg8;

/// Byte-pattern law for `XOR r`: `0b10101000 + register code`.
const XOR_REGISTER_BASE: u8 = 0b1010_1000;
/// `XOR (HL)`: register-select code 6 in the same pattern.
const XOR_HL: u8 = 0b1010_1110;
/// `XOR d8`.
const XOR_IMMEDIATE: u8 = 0b1110_1110;

/// Builds the exclusive-or family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for reg in Reg8::ALL {
        ops.push(Operation::new(
            XOR_REGISTER_BASE + reg.code(),
            1,
            CycleCost::Fixed(1),
            move |_, _| format!("XOR {}", reg.name()),
            move |regs, _| {
                regs.a = alu::xor(&mut regs.flags, regs.a, regs.reg8(reg));
            },
        ));
    }

    ops.push(Operation::new(
        XOR_HL,
        1,
        CycleCost::Fixed(2),
        |_, _: &M| "XOR (HL)".to_string(),
        |regs, mem| {
            let value = mem.read_byte(regs.hl());
            regs.a = alu::xor(&mut regs.flags, regs.a, value);
        },
    ));

    ops.push(Operation::new(
        XOR_IMMEDIATE,
        2,
        CycleCost::Fixed(2),
        |regs, mem: &M| {
            format!("XOR 0x{:02X}", mem.read_byte(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            let value = mem.read_byte(regs.pc());
            regs.advance_pc(1);
            regs.a = alu::xor(&mut regs.flags, regs.a, value);
        },
    ));

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
        for reg in Reg8::ALL {
            assert!(ops.iter().any(|op| op.opcode == 0xA8 + reg.code()));
        }
        assert!(ops.iter().any(|op| op.opcode == 0xAE));
        assert!(ops.iter().any(|op| op.opcode == 0xEE));
        assert_eq!(ops.len(), 9);
    }

    #[test]
    fn test_xor_a_self_clears() {
        let ops = operations::<FlatMemory>();
        let mut mem = FlatMemory::new();
        for value in [0x00, 0x01, 0x5A, 0xFF] {
            let mut regs = RegisterFile::new();
            regs.a = value;
            regs.flags.carry = true;
            regs.flags.half_carry = true;
            regs.flags.subtract = true;
            find(&ops, 0xAF).execute(&mut regs, &mut mem);
            assert_eq!(regs.a, 0);
            assert!(regs.flags.zero);
            assert!(!regs.flags.carry);
            assert!(!regs.flags.half_carry);
            assert!(!regs.flags.subtract);
        }
    }

    #[test]
    fn test_xor_is_involutive() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0x3C;
        regs.b = 0xA7;
        let op = find(&ops, 0xA8);
        op.execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 0x3C ^ 0xA7);
        op.execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 0x3C);
    }

    #[test]
    fn test_xor_immediate_consumes_operand() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0xF0;
        regs.set_pc(0x0101);
        mem.write_byte(0x0101, 0x0F);
        find(&ops, 0xEE).execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 0xFF);
        assert_eq!(regs.pc(), 0x0102);
        assert!(!regs.flags.zero);
    }

    #[test]
    fn test_xor_hl_reads_memory() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0xAA;
        regs.set_hl(0x8000);
        mem.write_byte(0x8000, 0xAA);
        find(&ops, 0xAE).execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 0x00);
        assert!(regs.flags.zero);
    }

    #[test]
    fn test_mnemonic_renders_operand_from_memory() {
        let ops = operations::<FlatMemory>();
        let mut mem = FlatMemory::new();
        let mut regs = RegisterFile::new();
        regs.set_pc(0x0300);
        mem.write_byte(0x0301, 0x42);
        assert_eq!(find(&ops, 0xEE).mnemonic(&regs, &mem), "XOR 0x42");
        assert_eq!(find(&ops, 0xAF).mnemonic(&regs, &mem), "XOR A");
    }
}
