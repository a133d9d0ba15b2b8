//! Call and return operations (CALL, RET, RETI, RST)
//!
//! CALL pushes the address of the instruction after its operand word and
//! jumps; RET pops it back. Conditional forms cost more when taken. RST
//! is a one-byte call to one of eight fixed low-memory targets.

use super::stack::{pop_word, push_word};
use crate::memory::MemoryBus;
use crate::operation::{Condition, CycleCost, Operation};

/// `CALL a16`.
const CALL_IMMEDIATE: u8 = 0b1100_1101;
/// Byte-pattern law for `CALL cc,a16`: `0b110_cc_100`.
const CALL_CONDITIONAL_BASE: u8 = 0b1100_0100;
/// `RET`.
const RET: u8 = 0b1100_1001;
/// Byte-pattern law for `RET cc`: `0b110_cc_000`.
const RET_CONDITIONAL_BASE: u8 = 0b1100_0000;
/// `RETI`.
const RETI: u8 = 0b1101_1001;
/// Byte-pattern law for `RST t`: `0b11_ttt_111`, target = t * 8.
const RST_BASE: u8 = 0b1100_0111;

/// Builds the call family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    ops.push(Operation::new(
        CALL_IMMEDIATE,
        3,
        CycleCost::Fixed(6),
        |regs, mem: &M| {
            format!("CALL 0x{:04X}", mem.read_word(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            let target = mem.read_word(regs.pc());
            let return_addr = regs.pc().wrapping_add(2);
            push_word(regs, mem, return_addr);
            regs.set_pc(target);
        },
    ));

    for condition in Condition::ALL {
        ops.push(Operation::new(
            CALL_CONDITIONAL_BASE | condition.code() << 3,
            3,
            CycleCost::Branch {
                condition,
                taken: 6,
                not_taken: 3,
            },
            move |regs, mem: &M| {
                format!(
                    "CALL {}, 0x{:04X}",
                    condition.name(),
                    mem.read_word(regs.pc().wrapping_add(1))
                )
            },
            move |regs, mem| {
                if condition.holds(&regs.flags) {
                    let target = mem.read_word(regs.pc());
                    let return_addr = regs.pc().wrapping_add(2);
                    push_word(regs, mem, return_addr);
                    regs.set_pc(target);
                } else {
                    regs.advance_pc(2);
                }
            },
        ));
    }

    ops.push(Operation::new(
        RET,
        1,
        CycleCost::Fixed(4),
        |_, _| "RET".to_string(),
        |regs, mem| {
            let target = pop_word(regs, mem);
            regs.set_pc(target);
        },
    ));

    for condition in Condition::ALL {
        ops.push(Operation::new(
            RET_CONDITIONAL_BASE | condition.code() << 3,
            1,
            CycleCost::Branch {
                condition,
                taken: 5,
                not_taken: 2,
            },
            move |_, _| format!("RET {}", condition.name()),
            move |regs, mem| {
                if condition.holds(&regs.flags) {
                    let target = pop_word(regs, mem);
                    regs.set_pc(target);
                }
            },
        ));
    }

    ops.push(Operation::new(
        RETI,
        1,
        CycleCost::Fixed(4),
        |_, _| "RETI".to_string(),
        |regs, mem| {
            let target = pop_word(regs, mem);
            regs.set_pc(target);
            regs.ime = true;
        },
    ));

    for slot in 0..8u8 {
        let target = (slot as u16) * 8;
        ops.push(Operation::new(
            RST_BASE | slot << 3,
            1,
            CycleCost::Fixed(4),
            move |_, _| format!("RST 0x{:02X}", target),
            move |regs, mem| {
                let return_addr = regs.pc();
                push_word(regs, mem, return_addr);
                regs.set_pc(target);
            },
        ));
    }

    ops
}
