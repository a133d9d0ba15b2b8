//! Boolean operations (AND, OR)
//!
//! Both combine the operand into the accumulator and clear carry and
//! subtract; AND additionally sets half-carry, OR clears it.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Flags, Reg8};

/// Byte-pattern law for `AND r`: `0b10100000 + register code`.
const AND_REGISTER_BASE: u8 = 0b1010_0000;
/// Byte-pattern law for `OR r`: `0b10110000 + register code`.
const OR_REGISTER_BASE: u8 = 0b1011_0000;

type BoolOp = fn(&mut Flags, u8, u8) -> u8;

/// The two sub-families: (mnemonic, register base, immediate opcode,
/// combining function). The `(HL)` form sits at register-select code 6.
const GROUPS: [(&str, u8, u8, BoolOp); 2] = [
    ("AND", AND_REGISTER_BASE, 0xE6, alu::and),
    ("OR", OR_REGISTER_BASE, 0xF6, alu::or),
];

/// Builds the AND/OR family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for (name, base, immediate, combine) in GROUPS {
        for reg in Reg8::ALL {
            ops.push(Operation::new(
                base + reg.code(),
                1,
                CycleCost::Fixed(1),
                move |_, _| format!("{} {}", name, reg.name()),
                move |regs, _| {
                    regs.a = combine(&mut regs.flags, regs.a, regs.reg8(reg));
                },
            ));
        }

        ops.push(Operation::new(
            base + 6,
            1,
            CycleCost::Fixed(2),
            move |_, _: &M| format!("{} (HL)", name),
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
                    "{} 0x{:02X}",
                    name,
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

    ops
}
