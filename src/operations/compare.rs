//! Compare operations (CP)
//!
//! Compare subtracts the operand from the accumulator for its flag
//! effects only: the difference is discarded and A is never written.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::Reg8;

/// Byte-pattern law for `CP r`: `0b10111000 + register code`.
const CP_REGISTER_BASE: u8 = 0b1011_1000;
/// `CP (HL)`: register-select code 6 in the same pattern.
const CP_HL: u8 = 0b1011_1110;
/// `CP d8`.
const CP_IMMEDIATE: u8 = 0b1111_1110;

/// Builds the compare family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for reg in Reg8::ALL {
        ops.push(Operation::new(
            CP_REGISTER_BASE + reg.code(),
            1,
            CycleCost::Fixed(1),
            move |_, _| format!("CP {}", reg.name()),
            move |regs, _| {
                let _ = alu::subtract(&mut regs.flags, regs.a, regs.reg8(reg));
            },
        ));
    }

    ops.push(Operation::new(
        CP_HL,
        1,
        CycleCost::Fixed(2),
        |_, _: &M| "CP (HL)".to_string(),
        |regs, mem| {
            let value = mem.read_byte(regs.hl());
            let _ = alu::subtract(&mut regs.flags, regs.a, value);
        },
    ));

    ops.push(Operation::new(
        CP_IMMEDIATE,
        2,
        CycleCost::Fixed(2),
        |regs, mem: &M| {
            format!("CP 0x{:02X}", mem.read_byte(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            let value = mem.read_byte(regs.pc());
            regs.advance_pc(1);
            let _ = alu::subtract(&mut regs.flags, regs.a, value);
        },
    ));

    ops
}
