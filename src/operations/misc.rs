//! Miscellaneous operations (NOP, HALT, STOP, DI, EI, DAA, CPL, SCF, CCF)
//!
//! The one-byte odds and ends: the no-op, the halt/stop latches, the
//! interrupt-master-enable switches and the accumulator/carry fix-ups.

use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};

/// Builds the miscellaneous family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    ops.push(Operation::new(
        0x00,
        1,
        CycleCost::Fixed(1),
        |_, _| "NOP".to_string(),
        |_, _| {},
    ));

    // STOP is encoded with a pad byte that the execute action swallows.
    ops.push(Operation::new(
        0x10,
        2,
        CycleCost::Fixed(1),
        |_, _| "STOP".to_string(),
        |regs, _| {
            regs.advance_pc(1);
            regs.halted = true;
        },
    ));

    ops.push(Operation::new(
        0x76,
        1,
        CycleCost::Fixed(1),
        |_, _| "HALT".to_string(),
        |regs, _| {
            regs.halted = true;
        },
    ));

    ops.push(Operation::new(
        0xF3,
        1,
        CycleCost::Fixed(1),
        |_, _| "DI".to_string(),
        |regs, _| {
            regs.ime = false;
        },
    ));

    ops.push(Operation::new(
        0xFB,
        1,
        CycleCost::Fixed(1),
        |_, _| "EI".to_string(),
        |regs, _| {
            regs.ime = true;
        },
    ));

    // DAA adjusts A back to packed BCD after an 8-bit add or subtract,
    // steering by the subtract/half-carry/carry flags left behind.
    ops.push(Operation::new(
        0x27,
        1,
        CycleCost::Fixed(1),
        |_, _| "DAA".to_string(),
        |regs, _| {
            let flags = &mut regs.flags;
            let mut adjust = 0u8;
            let mut carry = flags.carry;

            if !flags.subtract {
                if flags.half_carry || regs.a & 0x0F > 0x09 {
                    adjust |= 0x06;
                }
                if flags.carry || regs.a > 0x99 {
                    adjust |= 0x60;
                    carry = true;
                }
                regs.a = regs.a.wrapping_add(adjust);
            } else {
                if flags.half_carry {
                    adjust |= 0x06;
                }
                if flags.carry {
                    adjust |= 0x60;
                }
                regs.a = regs.a.wrapping_sub(adjust);
            }

            regs.flags.zero = regs.a == 0;
            regs.flags.half_carry = false;
            regs.flags.carry = carry;
        },
    ));

    ops.push(Operation::new(
        0x2F,
        1,
        CycleCost::Fixed(1),
        |_, _| "CPL".to_string(),
        |regs, _| {
            regs.a = !regs.a;
            regs.flags.subtract = true;
            regs.flags.half_carry = true;
        },
    ));

    ops.push(Operation::new(
        0x37,
        1,
        CycleCost::Fixed(1),
        |_, _| "SCF".to_string(),
        |regs, _| {
            regs.flags.carry = true;
            regs.flags.subtract = false;
            regs.flags.half_carry = false;
        },
    ));

    ops.push(Operation::new(
        0x3F,
        1,
        CycleCost::Fixed(1),
        |_, _| "CCF".to_string(),
        |regs, _| {
            regs.flags.carry = !regs.flags.carry;
            regs.flags.subtract = false;
            regs.flags.half_carry = false;
        },
    ));

    ops
}
