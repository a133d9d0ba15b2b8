//! Jump operations (JP, JR)
//!
//! Absolute jumps load PC with a literal 16-bit target; relative jumps
//! add a signed 8-bit offset to the PC after the offset byte. Conditional
//! forms cost one machine cycle more when taken, computed from live flag
//! state at the moment the cost is queried.
//!
//! At execute time PC has already consumed the opcode byte, so the
//! operand word (or offset byte) sits exactly at PC. A not-taken branch
//! skips over its operands without following them.

use crate::memory::MemoryBus;
use crate::operation::{Condition, CycleCost, Operation};

/// `JP a16`.
const JP_IMMEDIATE: u8 = 0b1100_0011;
/// Byte-pattern law for `JP cc,a16`: `0b110_cc_010`.
const JP_CONDITIONAL_BASE: u8 = 0b1100_0010;
/// `JP HL`.
const JP_HL: u8 = 0b1110_1001;
/// `JR e8`.
const JR_IMMEDIATE: u8 = 0b0001_1000;
/// Byte-pattern law for `JR cc,e8`: `0b001_cc_000`.
const JR_CONDITIONAL_BASE: u8 = 0b0010_0000;

/// Renders a signed jump offset the way it reads in a listing.
fn signed_operand(offset: i8) -> String {
    if offset >= 0 {
        format!("0x{:02X}", offset)
    } else {
        format!("-0x{:02X}", -(offset as i16))
    }
}

/// Builds the jump family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    ops.push(Operation::new(
        JP_IMMEDIATE,
        3,
        CycleCost::Fixed(4),
        |regs, mem: &M| {
            format!("JP 0x{:04X}", mem.read_word(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            regs.set_pc(mem.read_word(regs.pc()));
        },
    ));

    for condition in Condition::ALL {
        ops.push(Operation::new(
            JP_CONDITIONAL_BASE | condition.code() << 3,
            3,
            CycleCost::Branch {
                condition,
                taken: 4,
                not_taken: 3,
            },
            move |regs, mem: &M| {
                format!(
                    "JP {}, 0x{:04X}",
                    condition.name(),
                    mem.read_word(regs.pc().wrapping_add(1))
                )
            },
            move |regs, mem| {
                if condition.holds(&regs.flags) {
                    regs.set_pc(mem.read_word(regs.pc()));
                } else {
                    regs.advance_pc(2);
                }
            },
        ));
    }

    ops.push(Operation::new(
        JP_HL,
        1,
        CycleCost::Fixed(1),
        |_, _| "JP HL".to_string(),
        |regs, _| {
            regs.set_pc(regs.hl());
        },
    ));

    ops.push(Operation::new(
        JR_IMMEDIATE,
        2,
        CycleCost::Fixed(3),
        |regs, mem: &M| {
            format!(
                "JR {}",
                signed_operand(mem.read_signed_byte(regs.pc().wrapping_add(1)))
            )
        },
        |regs, mem| {
            let distance = mem.read_signed_byte(regs.pc());
            regs.advance_pc(1);
            regs.set_pc(regs.pc().wrapping_add(distance as u16));
        },
    ));

    for condition in Condition::ALL {
        ops.push(Operation::new(
            JR_CONDITIONAL_BASE | condition.code() << 3,
            2,
            CycleCost::Branch {
                condition,
                taken: 3,
                not_taken: 2,
            },
            move |regs, mem| {
                format!(
                    "JR {}, {}",
                    condition.name(),
                    signed_operand(mem.read_signed_byte(regs.pc().wrapping_add(1)))
                )
            },
            move |regs, mem| {
                if condition.holds(&regs.flags) {
                    let distance = mem.read_signed_byte(regs.pc());
                    regs.advance_pc(1);
                    regs.set_pc(regs.pc().wrapping_add(distance as u16));
                } else {
                    regs.advance_pc(1);
                }
            },
        ));
    }

    ops
}
