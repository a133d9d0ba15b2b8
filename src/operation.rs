//! Operation Descriptors
//!
//! An [`Operation`] is the unit of dispatch: a unique opcode byte, a byte
//! length, a cycle cost, a deferred mnemonic renderer and an execute
//! action. Descriptors are built once at table-construction time and are
//! structurally immutable afterwards; only the register/flag/memory state
//! they are applied to changes.
//!
//! The execute and mnemonic actions are closures over nothing but `Copy`
//! selector data (a register code, a bit index, a reset target). All CPU
//! state is passed in explicitly as `(&mut RegisterFile, &mut M)`, so two
//! emulator instances can never share state through their tables.

use crate::memory::MemoryBus;
use crate::registers::{Flags, RegisterFile};
use std::fmt;

/// A branch condition, as encoded in the SM83 condition-code field
/// (NZ=0, Z=1, NC=2, C=3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    /// All conditions in encoding order.
    pub const ALL: [Self; 4] = [Self::NotZero, Self::Zero, Self::NotCarry, Self::Carry];

    /// Returns the 2-bit condition code.
    #[must_use]
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Self::NotZero => 0,
            Self::Zero => 1,
            Self::NotCarry => 2,
            Self::Carry => 3,
        }
    }

    /// Returns the mnemonic name of the condition.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotZero => "NZ",
            Self::Zero => "Z",
            Self::NotCarry => "NC",
            Self::Carry => "C",
        }
    }

    /// Evaluates the condition against the current flags.
    #[must_use]
    #[inline]
    pub const fn holds(self, flags: &Flags) -> bool {
        match self {
            Self::NotZero => !flags.zero,
            Self::Zero => flags.zero,
            Self::NotCarry => !flags.carry,
            Self::Carry => flags.carry,
        }
    }
}

/// The cycle cost of an operation, in machine cycles.
///
/// Conditional branches cost more when taken than when not. The cost is
/// recomputed from live flag state on every query and never cached, so it
/// is correct at the moment the dispatch engine asks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleCost {
    /// The same cost on every execution.
    Fixed(u8),
    /// A flag-dependent cost: `taken` when `condition` holds, `not_taken`
    /// otherwise.
    Branch {
        condition: Condition,
        taken: u8,
        not_taken: u8,
    },
}

impl CycleCost {
    /// Returns the cost given the current flag state.
    #[must_use]
    #[inline]
    pub const fn current(self, flags: &Flags) -> u8 {
        match self {
            Self::Fixed(cycles) => cycles,
            Self::Branch {
                condition,
                taken,
                not_taken,
            } => {
                if condition.holds(flags) {
                    taken
                } else {
                    not_taken
                }
            }
        }
    }

    /// Returns true if the cost depends on flag state.
    #[must_use]
    #[inline]
    pub const fn is_conditional(self) -> bool {
        matches!(self, Self::Branch { .. })
    }
}

/// The execute action of an operation.
///
/// Mutates registers, flags and PC, and may read or write memory. At
/// invocation time PC has already consumed the opcode byte(s); the action
/// advances PC past any operand bytes it consumes.
pub type ExecuteFn<M> = Box<dyn Fn(&mut RegisterFile, &mut M)>;

/// The deferred mnemonic renderer of an operation.
///
/// Renders the instruction at the current PC, with PC pointing at the
/// opcode byte and operand bytes following it. Computed from live memory
/// on every call and never cached, since operand bytes are only
/// meaningful relative to the fetch that is about to happen.
pub type MnemonicFn<M> = Box<dyn Fn(&RegisterFile, &M) -> String>;

/// One dispatchable instruction.
///
/// The `'static` bound keeps the boxed actions free of borrowed state;
/// they may only capture owned selector data.
pub struct Operation<M: MemoryBus + 'static> {
    /// The opcode byte this descriptor claims. Unique within its table.
    pub opcode: u8,
    /// Total encoded length in bytes, operands and any prefix included.
    pub length: u8,
    /// Machine-cycle cost, possibly flag-dependent.
    pub cycles: CycleCost,
    mnemonic: MnemonicFn<M>,
    execute: ExecuteFn<M>,
}

impl<M: MemoryBus + 'static> Operation<M> {
    /// Creates a descriptor.
    pub fn new(
        opcode: u8,
        length: u8,
        cycles: CycleCost,
        mnemonic: impl Fn(&RegisterFile, &M) -> String + 'static,
        execute: impl Fn(&mut RegisterFile, &mut M) + 'static,
    ) -> Self {
        Self {
            opcode,
            length,
            cycles,
            mnemonic: Box::new(mnemonic),
            execute: Box::new(execute),
        }
    }

    /// Renders the mnemonic against the current register/memory state.
    #[must_use]
    pub fn mnemonic(&self, registers: &RegisterFile, memory: &M) -> String {
        (self.mnemonic)(registers, memory)
    }

    /// Runs the execute action.
    pub fn execute(&self, registers: &mut RegisterFile, memory: &mut M) {
        (self.execute)(registers, memory)
    }
}

impl<M: MemoryBus + 'static> fmt::Debug for Operation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("opcode", &format_args!("0x{:02X}", self.opcode))
            .field("length", &self.length)
            .field("cycles", &self.cycles)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;

    #[test]
    fn test_condition_codes_match_encoding_table() {
        assert_eq!(Condition::NotZero.code(), 0);
        assert_eq!(Condition::Zero.code(), 1);
        assert_eq!(Condition::NotCarry.code(), 2);
        assert_eq!(Condition::Carry.code(), 3);
    }

    #[test]
    fn test_condition_holds() {
        let mut flags = Flags::default();
        assert!(Condition::NotZero.holds(&flags));
        assert!(!Condition::Zero.holds(&flags));

        flags.zero = true;
        flags.carry = true;
        assert!(Condition::Zero.holds(&flags));
        assert!(Condition::Carry.holds(&flags));
        assert!(!Condition::NotZero.holds(&flags));
        assert!(!Condition::NotCarry.holds(&flags));
    }

    #[test]
    fn test_cycle_cost_fixed() {
        let flags = Flags::default();
        assert_eq!(CycleCost::Fixed(3).current(&flags), 3);
        assert!(!CycleCost::Fixed(3).is_conditional());
    }

    #[test]
    fn test_cycle_cost_tracks_live_flags() {
        let cost = CycleCost::Branch {
            condition: Condition::Zero,
            taken: 4,
            not_taken: 3,
        };
        let mut flags = Flags::default();
        assert_eq!(cost.current(&flags), 3);
        flags.zero = true;
        assert_eq!(cost.current(&flags), 4);
        flags.zero = false;
        assert_eq!(cost.current(&flags), 3);
        assert!(cost.is_conditional());
    }

    #[test]
    fn test_operation_execute_mutates_passed_state() {
        let op: Operation<FlatMemory> = Operation::new(
            0x00,
            1,
            CycleCost::Fixed(1),
            |_, _| "NOP".to_string(),
            |regs, mem| {
                regs.a = regs.a.wrapping_add(1);
                mem.write_byte(0x0010, 0x42);
            },
        );

        let mut regs = RegisterFile::new();
        let mut mem = FlatMemory::new();
        op.execute(&mut regs, &mut mem);
        assert_eq!(regs.a, 1);
        assert_eq!(mem.read_byte(0x0010), 0x42);
        assert_eq!(op.mnemonic(&regs, &mem), "NOP");
    }
}
