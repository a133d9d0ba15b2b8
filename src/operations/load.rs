//! Load operations (LD, LDH)
//!
//! Register-to-register moves, immediate loads, the `(HL)` forms, the
//! post-increment/decrement HL forms, absolute and high-page addressed
//! accumulator transfers, and the 16-bit loads. No load mutates flags
//! except `LD HL,SP+e8`, which computes them like `ADD SP,e8`.

use super::alu;
use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::registers::{Reg8, Reg16};

/// Byte-pattern law for `LD r,r'`: `0b01_ddd_sss`.
const LD_REGISTER_BASE: u8 = 0b0100_0000;
/// Byte-pattern law for `LD r,d8`: `0b00_rrr_110`.
const LD_IMMEDIATE_BASE: u8 = 0b0000_0110;
/// Byte-pattern law for `LD rr,d16`: `0x01 | pair code << 4`.
const LD_PAIR_IMMEDIATE_BASE: u8 = 0x01;
/// High-page base address for the LDH forms.
const HIGH_PAGE: u16 = 0xFF00;

/// Builds the load family.
pub fn operations<M: MemoryBus + 'static>() -> Vec<Operation<M>> {
    let mut ops = Vec::new();

    // LD r,r' over every destination/source pair.
    for dst in Reg8::ALL {
        for src in Reg8::ALL {
            ops.push(Operation::new(
                LD_REGISTER_BASE | dst.code() << 3 | src.code(),
                1,
                CycleCost::Fixed(1),
                move |_, _| format!("LD {},{}", dst.name(), src.name()),
                move |regs, _| {
                    regs.set_reg8(dst, regs.reg8(src));
                },
            ));
        }
    }

    // LD r,(HL) and LD (HL),r at register-select code 6. The slot where
    // both selectors would be 6 (0x76) belongs to HALT.
    for reg in Reg8::ALL {
        ops.push(Operation::new(
            LD_REGISTER_BASE | reg.code() << 3 | 6,
            1,
            CycleCost::Fixed(2),
            move |_, _: &M| format!("LD {},(HL)", reg.name()),
            move |regs, mem| {
                regs.set_reg8(reg, mem.read_byte(regs.hl()));
            },
        ));

        ops.push(Operation::new(
            LD_REGISTER_BASE | 6 << 3 | reg.code(),
            1,
            CycleCost::Fixed(2),
            move |_, _: &M| format!("LD (HL),{}", reg.name()),
            move |regs, mem| {
                mem.write_byte(regs.hl(), regs.reg8(reg));
            },
        ));
    }

    // LD r,d8.
    for reg in Reg8::ALL {
        ops.push(Operation::new(
            LD_IMMEDIATE_BASE | reg.code() << 3,
            2,
            CycleCost::Fixed(2),
            move |regs, mem: &M| {
                format!(
                    "LD {},0x{:02X}",
                    reg.name(),
                    mem.read_byte(regs.pc().wrapping_add(1))
                )
            },
            move |regs, mem| {
                let value = mem.read_byte(regs.pc());
                regs.advance_pc(1);
                regs.set_reg8(reg, value);
            },
        ));
    }

    ops.push(Operation::new(
        0x36,
        2,
        CycleCost::Fixed(3),
        |regs, mem| {
            format!(
                "LD (HL),0x{:02X}",
                mem.read_byte(regs.pc().wrapping_add(1))
            )
        },
        |regs, mem| {
            let value = mem.read_byte(regs.pc());
            regs.advance_pc(1);
            mem.write_byte(regs.hl(), value);
        },
    ));

    // Accumulator transfers through the BC/DE pointers.
    for (pair, load, store) in [(Reg16::BC, 0x0A, 0x02), (Reg16::DE, 0x1A, 0x12)] {
        ops.push(Operation::new(
            load,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("LD A,({})", pair.name()),
            move |regs, mem| {
                regs.a = mem.read_byte(regs.reg16(pair));
            },
        ));

        ops.push(Operation::new(
            store,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("LD ({}),A", pair.name()),
            move |regs, mem| {
                mem.write_byte(regs.reg16(pair), regs.a);
            },
        ));
    }

    // Accumulator transfers through HL with post-increment/decrement.
    for (suffix, step, load, store) in [("+", 1i16, 0x2A, 0x22), ("-", -1i16, 0x3A, 0x32)] {
        ops.push(Operation::new(
            load,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("LD A,(HL{})", suffix),
            move |regs, mem| {
                let addr = regs.hl();
                regs.a = mem.read_byte(addr);
                regs.set_hl(addr.wrapping_add(step as u16));
            },
        ));

        ops.push(Operation::new(
            store,
            1,
            CycleCost::Fixed(2),
            move |_, _| format!("LD (HL{}),A", suffix),
            move |regs, mem| {
                let addr = regs.hl();
                mem.write_byte(addr, regs.a);
                regs.set_hl(addr.wrapping_add(step as u16));
            },
        ));
    }

    // Absolute accumulator transfers.
    ops.push(Operation::new(
        0xFA,
        3,
        CycleCost::Fixed(4),
        |regs, mem| {
            format!("LD A,(0x{:04X})", mem.read_word(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            let addr = mem.read_word(regs.pc());
            regs.advance_pc(2);
            regs.a = mem.read_byte(addr);
        },
    ));

    ops.push(Operation::new(
        0xEA,
        3,
        CycleCost::Fixed(4),
        |regs, mem| {
            format!("LD (0x{:04X}),A", mem.read_word(regs.pc().wrapping_add(1)))
        },
        |regs, mem| {
            let addr = mem.read_word(regs.pc());
            regs.advance_pc(2);
            mem.write_byte(addr, regs.a);
        },
    ));

    // High-page transfers: address = 0xFF00 + offset.
    ops.push(Operation::new(
        0xF0,
        2,
        CycleCost::Fixed(3),
        |regs, mem| {
            format!(
                "LDH A,(0x{:02X})",
                mem.read_byte(regs.pc().wrapping_add(1))
            )
        },
        |regs, mem| {
            let offset = mem.read_byte(regs.pc());
            regs.advance_pc(1);
            regs.a = mem.read_byte(HIGH_PAGE + offset as u16);
        },
    ));

    ops.push(Operation::new(
        0xE0,
        2,
        CycleCost::Fixed(3),
        |regs, mem| {
            format!(
                "LDH (0x{:02X}),A",
                mem.read_byte(regs.pc().wrapping_add(1))
            )
        },
        |regs, mem| {
            let offset = mem.read_byte(regs.pc());
            regs.advance_pc(1);
            mem.write_byte(HIGH_PAGE + offset as u16, regs.a);
        },
    ));

    ops.push(Operation::new(
        0xF2,
        1,
        CycleCost::Fixed(2),
        |_, _| "LD A,(C)".to_string(),
        |regs, mem| {
            regs.a = mem.read_byte(HIGH_PAGE + regs.c as u16);
        },
    ));

    ops.push(Operation::new(
        0xE2,
        1,
        CycleCost::Fixed(2),
        |_, _| "LD (C),A".to_string(),
        |regs, mem| {
            mem.write_byte(HIGH_PAGE + regs.c as u16, regs.a);
        },
    ));

    // 16-bit loads.
    for pair in Reg16::WORD {
        ops.push(Operation::new(
            LD_PAIR_IMMEDIATE_BASE | pair.code() << 4,
            3,
            CycleCost::Fixed(3),
            move |regs, mem| {
                format!(
                    "LD {},0x{:04X}",
                    pair.name(),
                    mem.read_word(regs.pc().wrapping_add(1))
                )
            },
            move |regs, mem| {
                let value = mem.read_word(regs.pc());
                regs.advance_pc(2);
                regs.set_reg16(pair, value);
            },
        ));
    }

    ops.push(Operation::new(
        0x08,
        3,
        CycleCost::Fixed(5),
        |regs, mem| {
            format!(
                "LD (0x{:04X}),SP",
                mem.read_word(regs.pc().wrapping_add(1))
            )
        },
        |regs, mem| {
            let addr = mem.read_word(regs.pc());
            regs.advance_pc(2);
            mem.write_word(addr, regs.sp);
        },
    ));

    ops.push(Operation::new(
        0xF9,
        1,
        CycleCost::Fixed(2),
        |_, _| "LD SP,HL".to_string(),
        |regs, _| {
            regs.sp = regs.hl();
        },
    ));

    ops.push(Operation::new(
        0xF8,
        2,
        CycleCost::Fixed(3),
        |regs, mem| {
            let offset = mem.read_signed_byte(regs.pc().wrapping_add(1));
            if offset >= 0 {
                format!("LD HL,SP+0x{:02X}", offset)
            } else {
                format!("LD HL,SP-0x{:02X}", -(offset as i16))
            }
        },
        |regs, mem| {
            let offset = mem.read_signed_byte(regs.pc());
            regs.advance_pc(1);
            let result = alu::add_signed_offset(&mut regs.flags, regs.sp, offset);
            regs.set_hl(result);
        },
    ));

    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::RegisterFile;
    use crate::memory::FlatMemory;

    fn find(ops: &[Operation<FlatMemory>], opcode: u8) -> &Operation<FlatMemory> {
        ops.iter().find(|op| op.opcode == opcode).unwrap()
    }

    #[test]
    fn test_family_size_and_halt_hole() {
        let ops = operations::<FlatMemory>();
        assert_eq!(ops.len(), 92);
        // 0x76 is HALT, not LD (HL),(HL).
        assert!(!ops.iter().any(|op| op.opcode == 0x76));
    }

    #[test]
    fn test_register_to_register() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.c = 0x42;
        find(&ops, 0x41).execute(&mut regs, &mut mem); // LD B,C
        assert_eq!(regs.b, 0x42);
        assert_eq!(regs.c, 0x42);
        assert_eq!(regs.flags, Default::default());
    }

    #[test]
    fn test_immediate_load() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_pc(0x0101);
        mem.write_byte(0x0101, 0x99);
        find(&ops, 0x3E).execute(&mut regs, &mut mem); // LD A,d8
        assert_eq!(regs.a, 0x99);
        assert_eq!(regs.pc(), 0x0102);
    }

    #[test]
    fn test_hl_forms() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_hl(0xC000);
        regs.d = 0x7E;
        find(&ops, 0x72).execute(&mut regs, &mut mem); // LD (HL),D
        assert_eq!(mem.read_byte(0xC000), 0x7E);

        find(&ops, 0x5E).execute(&mut regs, &mut mem); // LD E,(HL)
        assert_eq!(regs.e, 0x7E);
    }

    #[test]
    fn test_post_increment_and_decrement() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0x11;
        regs.set_hl(0xC000);
        find(&ops, 0x22).execute(&mut regs, &mut mem); // LD (HL+),A
        assert_eq!(mem.read_byte(0xC000), 0x11);
        assert_eq!(regs.hl(), 0xC001);

        mem.write_byte(0xC001, 0x33);
        find(&ops, 0x3A).execute(&mut regs, &mut mem); // LD A,(HL-)
        assert_eq!(regs.a, 0x33);
        assert_eq!(regs.hl(), 0xC000);
    }

    #[test]
    fn test_absolute_accumulator_transfers() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0x55;
        regs.set_pc(0x0101);
        mem.write_word(0x0101, 0xC123);
        find(&ops, 0xEA).execute(&mut regs, &mut mem); // LD (a16),A
        assert_eq!(mem.read_byte(0xC123), 0x55);
        assert_eq!(regs.pc(), 0x0103);
    }

    #[test]
    fn test_high_page_transfers() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.a = 0x91;
        regs.set_pc(0x0101);
        mem.write_byte(0x0101, 0x40);
        find(&ops, 0xE0).execute(&mut regs, &mut mem); // LDH (0x40),A
        assert_eq!(mem.read_byte(0xFF40), 0x91);

        regs.c = 0x44;
        mem.write_byte(0xFF44, 0x90);
        find(&ops, 0xF2).execute(&mut regs, &mut mem); // LD A,(C)
        assert_eq!(regs.a, 0x90);
    }

    #[test]
    fn test_pair_immediate_load() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.set_pc(0x0101);
        mem.write_word(0x0101, 0xFFFE);
        find(&ops, 0x31).execute(&mut regs, &mut mem); // LD SP,d16
        assert_eq!(regs.sp, 0xFFFE);
        assert_eq!(regs.pc(), 0x0103);
    }

    #[test]
    fn test_store_sp_to_memory() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.sp = 0xDFF0;
        regs.set_pc(0x0101);
        mem.write_word(0x0101, 0xC100);
        find(&ops, 0x08).execute(&mut regs, &mut mem);
        assert_eq!(mem.read_word(0xC100), 0xDFF0);
    }

    #[test]
    fn test_hl_from_sp_offset_sets_flags() {
        let ops = operations::<FlatMemory>();
        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        regs.sp = 0x00FF;
        regs.set_pc(0x0101);
        mem.write_byte(0x0101, 0x01);
        find(&ops, 0xF8).execute(&mut regs, &mut mem);
        assert_eq!(regs.hl(), 0x0100);
        assert!(regs.flags.carry);
        assert!(regs.flags.half_carry);
        assert!(!regs.flags.zero);
        // SP itself is untouched.
        assert_eq!(regs.sp, 0x00FF);
    }

    #[test]
    fn test_mnemonics() {
        let ops = operations::<FlatMemory>();
        let mut mem = FlatMemory::new();
        let mut regs = RegisterFile::new();
        regs.set_pc(0x0200);
        mem.write_byte(0x0201, 0x7F);
        assert_eq!(find(&ops, 0x06).mnemonic(&regs, &mem), "LD B,0x7F");
        assert_eq!(find(&ops, 0x41).mnemonic(&regs, &mem), "LD B,C");
        assert_eq!(find(&ops, 0x2A).mnemonic(&regs, &mem), "LD A,(HL+)");
        mem.write_word(0x0201, 0xFF40);
        assert_eq!(find(&ops, 0xEA).mnemonic(&regs, &mem), "LD (0xFF40),A");
        mem.write_byte(0x0201, 0xFE);
        assert_eq!(find(&ops, 0xF8).mnemonic(&regs, &mem), "LD HL,SP-0x02");
    }
}
