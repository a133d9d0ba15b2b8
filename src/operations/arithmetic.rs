//! Arithmetic operations (ADD, ADC, SUB, SBC, 16-bit ADD)
//!
//! The four 8-bit groups share one layout: seven register forms, a
//! `(HL)` form at register-select code 6, and an immediate form. The
//! 16-bit additions (`ADD HL,rr`, `ADD SP,e8`) ride along here since
//! they share the ALU helpers.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Flags, Reg8, Reg16};

type ArithOp = fn(&mut Flags, u8, u8) -> u8;

/// The 8-bit groups: (rendered prefix, register base, immediate opcode,
/// combining function). Bases step by 8 through the `0b10ooo_rrr` block.
const GROUPS: [(&str, u8, u8, ArithOp); 4] = [
    ("ADD A,", 0b1000_0000, 0xC6, alu::add),
    ("ADC A,", 0b1000_1000, 0xCE, alu::add_with_carry),
    ("SUB ", 0b1001_0000, 0xD6, alu::subtract),
    ("SBC A,", 0b1001_1000, 0xDE, alu::subtract_with_borrow),
];

/// Byte-pattern law for `ADD HL,rr`: `0x09 | pair code << 4`.
const ADD_HL_BASE: u8 = 0x09;
/// `ADD SP,e8`.
const ADD_SP: u8 = 0xE8;

/// Builds the arithmetic family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for (prefix, base, immediate, combine) in GROUPS {
        for reg in Reg8::ALL {
            ops.push(Operation::new(
                base + reg.code(),
                1,
                CycleCost::Fixed(1),
                move |_, _| format!("{}{}", prefix, reg.name()),
                move |regs, _| {
                    regs.a = combine(&mut regs.flags, regs.a, regs.reg8(reg));
                },
            ));
        }

        ops.push(Operation::new(
            base + 6,
            1,
            CycleCost::Fixed(2),
            move |_, _: &M| format!("{}(HL)", prefix),
            move |regs, mem| {
                let value = mem.read_byte(regs.hl());
                regs.a = combine(&mut regs.flags, regs.a, value);
            },
        ));

        ops.push(Operation::new(
            immediate,
            2,
            CycleCost::Fixed(2),
            move |regs, mem: &M| {
                format!(
                    "{}0x{:02X}",
                    prefix,
                    mem.read_byte(regs.pc().wrapping_add(1))
                )
            },
            move |regs, mem| {
                let value = mem.read_byte(regs.pc());
                regs.advance_pc(1);
                regs.a = combine(&mut regs.flags, regs.a, value);
            },
        ));
    }

    for pair in Reg16::WORD {
        ops.push(Operation::new(
            ADD_HL_BASE | pair.code() << 4,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("ADD HL,{}", pair.name()),
            move |regs, _| {
                let result = alu::add16(&mut regs.flags, regs.hl(), regs.reg16(pair));
                regs.set_hl(result);
            },
        ));
    }

    ops.push(Operation::new(
        ADD_SP,
        2,
        CycleCost::Fixed(4),
        |regs, mem: &M| {
            let offset = mem.read_signed_byte(regs.pc().wrapping_add(1));
            if offset >= 0 {
                format!("ADD SP,0x{:02X}", offset)
            } else {
                format!("ADD SP,-0x{:02X}", -(offset as i16))
            }
        },
        |regs, mem| {
            let offset = mem.read_signed_byte(regs.pc());
            regs.advance_pc(1);
            regs.sp = alu::add_signed_offset(&mut regs.flags, regs.sp, offset);
        },
    ));

    ops
}
