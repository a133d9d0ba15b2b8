//! Stack operations (PUSH, POP)
//!
//! The stack grows downward; words are pushed high byte first so they
//! read back little-endian. The word helpers here are shared with the
//! call family.

use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Reg16, RegisterFile};

/// Byte-pattern law for `PUSH rr`: `0xC5 | pair code << 4` over BC, DE,
/// HL, AF.
const PUSH_BASE: u8 = 0xC5;
/// Byte-pattern law for `POP rr`: `0xC1 | pair code << 4`.
const POP_BASE: u8 = 0xC1;

/// Pushes a word, decrementing SP twice.
pub(crate) fn push_word<M: MemoryBus>(regs: &mut RegisterFile, mem: &mut M, value: u16) {
    regs.sp = regs.sp.wrapping_sub(1);
    mem.write_byte(regs.sp, (value >> 8) as u8);
    regs.sp = regs.sp.wrapping_sub(1);
    mem.write_byte(regs.sp, value as u8);
}

/// Pops a word, incrementing SP twice.
pub(crate) fn pop_word<M: MemoryBus>(regs: &mut RegisterFile, mem: &M) -> u16 {
    let low = mem.read_byte(regs.sp) as u16;
    regs.sp = regs.sp.wrapping_add(1);
    let high = mem.read_byte(regs.sp) as u16;
    regs.sp = regs.sp.wrapping_add(1);
    high << 8 | low
}

/// Builds the stack family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    for pair in Reg16::STACK {
        ops.push(Operation::new(
            PUSH_BASE | pair.code() << 4,
            1,
            CycleCost::Fixed(4),
            move |_, _| format!("PUSH {}", pair.name()),
            move |regs, mem| {
                let value = regs.reg16(pair);
                push_word(regs, mem, value);
            },
        ));

        ops.push(Operation::new(
            POP_BASE | pair.code() << 4,
            1,
            CycleCost::Fixed(3),
            move |_, _| format!("POP {}", pair.name()),
            move |regs, mem| {
                let value = pop_word(regs, mem);
                regs.set_reg16(pair, value);
            },
        ));
    }

    ops
}
