//! # SM83 CPU Instruction Core
//!
//! The instruction-execution core of a Game Boy (SM83 / LR35902) CPU
//! emulator: the register/flag model, the operation-descriptor table and
//! the fetch-decode-execute dispatch engine. Memory, peripherals, ROM
//! loading and any front end are external collaborators: the core
//! consumes a [`MemoryBus`] and exposes [`Cpu::step`] plus a queryable
//! [`OperationTable`].
//!
//! ## Quick Start
//!
//! ```rust
//! use sm83::{Cpu, FlatMemory};
//!
//! // A tiny program at the cartridge entry point:
//! // LD A,0x10 / CP 0x01 / JP NZ,0x0150
//! let mut memory = FlatMemory::new();
//! memory.load_binary(0x0100, &[0x3E, 0x10, 0xFE, 0x01, 0xC2, 0x50, 0x01]);
//!
//! let mut cpu = Cpu::new(memory).expect("opcode table is collision-free");
//! cpu.registers.set_pc(0x0100);
//!
//! cpu.step().unwrap(); // LD A,0x10: 2 cycles
//! cpu.step().unwrap(); // CP 0x01: flags only, A unchanged
//! let cycles = cpu.step().unwrap(); // JP NZ taken
//! assert_eq!(cycles, 4);
//! assert_eq!(cpu.registers.pc(), 0x0150);
//! ```
//!
//! ## Architecture
//!
//! - **Register/Flag Model** (`registers`): 8-bit registers, computed
//!   16-bit pairs, PC/SP and the four status flags; every write wraps
//!   silently to its register width.
//! - **Memory Interface** (`memory`): the consumed [`MemoryBus`] trait
//!   (little-endian words, two's-complement signed bytes, no failure
//!   modes) plus a flat 64 KiB implementation.
//! - **Operation Descriptors** (`operation`): opcode byte, length,
//!   flag-dependent cycle cost, deferred mnemonic rendering, execute
//!   action.
//! - **Table Builders** (`operations`): one pure builder per instruction
//!   family, encoding that family's byte-pattern, cycle and flag laws.
//! - **Dispatch Engine** (`cpu`): merges the builders into the collision-
//!   checked [`OperationTable`] and steps the guest one instruction at a
//!   time.

pub mod cpu;
pub mod memory;
pub mod operation;
pub mod operations;
pub mod registers;
pub mod table;

// Re-export the public API.
pub use cpu::{Cpu, CpuState, StepError};
pub use memory::{FlatMemory, MemoryBus, ADDRESS_SPACE_SIZE};
pub use operation::{Condition, CycleCost, Operation};
pub use registers::{Flags, Reg16, Reg8, RegisterFile};
pub use table::{OperationInfo, OperationTable, TableError, CB_PREFIX};
