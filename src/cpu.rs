//! SM83 CPU Core
//!
//! This module implements the dispatch engine. The CPU is responsible
//! for:
//!
//! - Fetching the opcode byte at the current PC
//! - Resolving the CB prefix escape into the prefixed table
//! - Looking up the unique operation descriptor for the byte
//! - Running the descriptor's execute action
//! - Reporting the machine cycles consumed
//!
//! The engine has no state of its own beyond the running cycle counter:
//! everything the instructions touch lives in the register file, so
//! isolating two emulator instances means nothing more than not sharing
//! their register files and memories.
//!
//! # Instruction Cycle
//!
//! 1. **Fetch**: read the byte at PC and advance past it
//! 2. **Decode**: look the byte up in the operation table
//! 3. **Execute**: run the descriptor's action; it advances PC past any
//!    operand bytes itself
//! 4. **Report**: return the descriptor's current cycle cost

use crate::memory::MemoryBus;
use crate::registers::{Flags, RegisterFile};
use crate::table::{OperationTable, TableError, CB_PREFIX};
use log::warn;
use std::fmt;

/// Error type for instruction execution.
///
/// An unimplemented opcode signals a gap in table coverage (or a guest
/// program running through one of the 11 undefined SM83 slots), distinct
/// from any normal execution outcome. The core reports it and leaves the
/// choice of halting, skipping or logging to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The fetched byte has no descriptor.
    UnimplementedOpcode {
        /// The offending opcode byte (the sub-opcode for CB fetches).
        opcode: u8,
        /// The address the fetch started at; PC is rewound here.
        address: u16,
        /// True if the byte was fetched from the CB-prefixed space.
        prefixed: bool,
    },
}

impl std::error::Error for StepError {}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnimplementedOpcode {
                opcode,
                address,
                prefixed,
            } => write!(
                f,
                "Unimplemented opcode {}0x{:02X} at 0x{:04X}",
                if *prefixed { "0xCB " } else { "" },
                opcode,
                address
            ),
        }
    }
}

/// CPU register state for serialization, polled by debugger front ends.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CpuState {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub pc: u16,
    pub sp: u16,
    pub flags: Flags,
    pub ime: bool,
    pub halted: bool,
    pub cycles: u64,
}

/// The SM83 instruction core.
///
/// Owns one register file, one memory bus and one operation table; the
/// table is built once at construction and bound to this instance. The
/// CPU is generic over the memory implementation via the [`MemoryBus`]
/// trait.
pub struct Cpu<M: MemoryBus + 'static> {
    /// The register file (A..L, PC, SP, flags, latches).
    pub registers: RegisterFile,
    /// The memory bus.
    pub memory: M,
    table: OperationTable<M>,
    cycles: u64,
}

impl<M: MemoryBus + 'static> Cpu<M> {
    /// Creates a CPU around the given memory bus.
    ///
    /// Building the operation table checks every byte pattern for
    /// collisions; a duplicate is a fatal construction error, detected
    /// here and never discovered lazily at step time.
    pub fn new(memory: M) -> Result<Self, TableError> {
        let table = OperationTable::build()?;
        Ok(Self {
            registers: RegisterFile::new(),
            memory,
            table,
            cycles: 0,
        })
    }

    /// Resets registers, latches and the cycle counter.
    ///
    /// Memory belongs to the host and is left alone.
    pub fn reset(&mut self) {
        self.registers = RegisterFile::new();
        self.cycles = 0;
    }

    /// Returns the total number of machine cycles executed.
    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the operation table bound to this CPU.
    #[must_use]
    pub fn table(&self) -> &OperationTable<M> {
        &self.table
    }

    /// Executes a single instruction and returns its machine-cycle cost.
    ///
    /// On an unimplemented opcode PC is rewound to the fetch address, so
    /// the host sees exactly where the gap is and decides what to do
    /// about it.
    pub fn step(&mut self) -> Result<u8, StepError> {
        let fetch_addr = self.registers.pc();
        let opcode = self.memory.read_byte(fetch_addr);
        self.registers.advance_pc(1);

        let (op, resolved, prefixed) = if opcode == CB_PREFIX {
            let sub = self.memory.read_byte(self.registers.pc());
            self.registers.advance_pc(1);
            (self.table.get_prefixed(sub), sub, true)
        } else {
            (self.table.get(opcode), opcode, false)
        };

        let Some(op) = op else {
            self.registers.set_pc(fetch_addr);
            warn!(
                "unimplemented opcode {}0x{:02X} at 0x{:04X}",
                if prefixed { "0xCB " } else { "" },
                resolved,
                fetch_addr
            );
            return Err(StepError::UnimplementedOpcode {
                opcode: resolved,
                address: fetch_addr,
                prefixed,
            });
        };

        // The cost is queried against the flag state that governs the
        // branch decision, before execute mutates anything.
        let cost = op.cycles.current(&self.registers.flags);
        op.execute(&mut self.registers, &mut self.memory);
        self.cycles += cost as u64;
        Ok(cost)
    }

    /// Executes up to `max_instructions` instructions.
    ///
    /// Returns the number of instructions executed. Stopping after N
    /// steps or N cycles is purely the host's loop; this is a
    /// convenience for tests and simple hosts.
    pub fn run(&mut self, max_instructions: u64) -> Result<u64, StepError> {
        let mut count = 0;
        while count < max_instructions {
            self.step()?;
            count += 1;
        }
        Ok(count)
    }

    /// Renders the instruction at the current PC without executing it.
    ///
    /// Returns `None` when the byte at PC has no descriptor.
    #[must_use]
    pub fn disassemble(&self) -> Option<String> {
        let opcode = self.memory.read_byte(self.registers.pc());
        if opcode == CB_PREFIX {
            let sub = self.memory.read_byte(self.registers.pc().wrapping_add(1));
            self.table
                .get_prefixed(sub)
                .map(|op| op.mnemonic(&self.registers, &self.memory))
        } else {
            self.table
                .get(opcode)
                .map(|op| op.mnemonic(&self.registers, &self.memory))
        }
    }

    /// Returns the serializable register snapshot.
    #[must_use]
    pub fn state(&self) -> CpuState {
        CpuState {
            a: self.registers.a,
            b: self.registers.b,
            c: self.registers.c,
            d: self.registers.d,
            e: self.registers.e,
            h: self.registers.h,
            l: self.registers.l,
            pc: self.registers.pc,
            sp: self.registers.sp,
            flags: self.registers.flags,
            ime: self.registers.ime,
            halted: self.registers.halted,
            cycles: self.cycles,
        }
    }

    /// Prints the current CPU state for debugging.
    #[must_use]
    pub fn dump_state(&self) -> String {
        format!("{}Cycles={}", self.registers, self.cycles)
    }
}

impl<M: MemoryBus + 'static> fmt::Debug for Cpu<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("registers", &self.registers)
            .field("table", &self.table)
            .field("cycles", &self.cycles)
            .finish()
    }
}
