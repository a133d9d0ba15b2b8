//! Rotate and shift operations (RLCA/RLA/RRCA/RRA and the CB block)
//!
//! The four unprefixed forms rotate the accumulator and always clear the
//! zero flag. The CB-prefixed block applies the same transforms (plus the
//! shifts and SWAP) to any register or `(HL)`, with zero tracking the
//! result. Subtract and half-carry are cleared throughout; carry receives
//! the shifted-out bit, except SWAP which clears it.

use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Flags, Reg8};

type ShiftOp = fn(&mut Flags, u8) -> u8;

/// Rotate left circular: bit 7 into carry and bit 0.
fn rlc(flags: &mut Flags, value: u8) -> u8 {
    let result = value.rotate_left(1);
    set_shift_flags(flags, result, value & 0x80 != 0);
    result
}

/// Rotate right circular: bit 0 into carry and bit 7.
fn rrc(flags: &mut Flags, value: u8) -> u8 {
    let result = value.rotate_right(1);
    set_shift_flags(flags, result, value & 0x01 != 0);
    result
}

/// Rotate left through carry.
fn rl(flags: &mut Flags, value: u8) -> u8 {
    let result = value << 1 | flags.carry as u8;
    set_shift_flags(flags, result, value & 0x80 != 0);
    result
}

/// Rotate right through carry.
fn rr(flags: &mut Flags, value: u8) -> u8 {
    let result = value >> 1 | (flags.carry as u8) << 7;
    set_shift_flags(flags, result, value & 0x01 != 0);
    result
}

/// Arithmetic shift left: zero into bit 0.
fn sla(flags: &mut Flags, value: u8) -> u8 {
    let result = value << 1;
    set_shift_flags(flags, result, value & 0x80 != 0);
    result
}

/// Arithmetic shift right: bit 7 is preserved.
fn sra(flags: &mut Flags, value: u8) -> u8 {
    let result = value >> 1 | value & 0x80;
    set_shift_flags(flags, result, value & 0x01 != 0);
    result
}

/// Swap the nibbles. Carry is always cleared.
fn swap(flags: &mut Flags, value: u8) -> u8 {
    let result = value.rotate_left(4);
    set_shift_flags(flags, result, false);
    result
}

/// Logical shift right: zero into bit 7.
fn srl(flags: &mut Flags, value: u8) -> u8 {
    let result = value >> 1;
    set_shift_flags(flags, result, value & 0x01 != 0);
    result
}

fn set_shift_flags(flags: &mut Flags, result: u8, carry: bool) {
    flags.zero = result == 0;
    flags.subtract = false;
    flags.half_carry = false;
    flags.carry = carry;
}

/// The CB sub-families in base-pattern order: `base + register code`,
/// with the `(HL)` form at code 6.
const PREFIXED_GROUPS: [(&str, u8, ShiftOp); 8] = [
    ("RLC", 0x00, rlc),
    ("RRC", 0x08, rrc),
    ("RL", 0x10, rl),
    ("RR", 0x18, rr),
    ("SLA", 0x20, sla),
    ("SRA", 0x28, sra),
    ("SWAP", 0x30, swap),
    ("SRL", 0x38, srl),
];

/// The unprefixed accumulator rotates: (mnemonic, opcode, transform).
const ACCUMULATOR_GROUPS: [(&str, u8, ShiftOp); 4] = [
    ("RLCA", 0x07, rlc),
    ("RRCA", 0x0F, rrc),
    ("RLA", 0x17, rl),
    ("RRA", 0x1F, rr),
];

/// Builds the unprefixed accumulator rotates.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for (name, opcode, transform) in ACCUMULATOR_GROUPS {
        ops.push(Operation::new(
            opcode,
            1,
            CycleCost::Fixed(1),
            move |_, _| name.to_string(),
            move |regs, _| {
                regs.a = transform(&mut regs.flags, regs.a);
                // The accumulator forms never report zero.
                regs.flags.zero = false;
            },
        ));
    }

    ops
}

/// Builds the CB-prefixed rotate/shift block.
pub fn prefixed_operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for (name, base, transform) in PREFIXED_GROUPS {
        for reg in Reg8::ALL {
            ops.push(Operation::new(
                base + reg.code(),
                2,
                CycleCost::Fixed(2),
                move |_, _| format!("{} {}", name, reg.name()),
                move |regs, _| {
                    let result = transform(&mut regs.flags, regs.reg8(reg));
                    regs.set_reg8(reg, result);
                },
            ));
        }

        ops.push(Operation::new(
            base + 6,
            2,
            CycleCost::Fixed(4),
            move |_, _: &M| format!("{} (HL)", name),
            move |regs, mem| {
                let addr = regs.hl();
                let result = transform(&mut regs.flags, mem.read_byte(addr));
                mem.write_byte(addr, result);
            },
        ));
    }

    ops
}
