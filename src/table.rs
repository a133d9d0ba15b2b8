//! Operation Table construction and lookup
//!
//! The table merges every family builder's descriptors into two 256-slot
//! arrays: the unprefixed opcodes and the CB-prefixed block. Merging
//! checks every slot exhaustively at build time, because the dispatch
//! engine has no secondary key: a duplicate byte pattern is a fatal
//! construction error, never a silent shadowing.
//!
//! The built table is structurally immutable. It is also queryable from
//! the outside (per-descriptor metadata, deferred mnemonic rendering), so
//! a disassembler or debugger front end never has to re-derive opcode
//! encodings.

use crate::memory::MemoryBus;
use crate::operation::{CycleCost, Operation};
use crate::operations::{self, FamilyOps};
use log::debug;
use std::fmt;

/// The escape byte introducing the two-byte CB opcode space. The dispatch
/// engine consumes it; no unprefixed descriptor may claim it.
pub const CB_PREFIX: u8 = 0xCB;

/// Error type for table construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableError {
    /// Two descriptors claimed the same byte pattern.
    DuplicateOpcode {
        opcode: u8,
        prefixed: bool,
        first: &'static str,
        second: &'static str,
    },
}

impl std::error::Error for TableError {}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateOpcode {
                opcode,
                prefixed,
                first,
                second,
            } => write!(
                f,
                "Duplicate byte pattern {}0x{:02X}: claimed by both '{}' and '{}'",
                if *prefixed { "0xCB " } else { "" },
                opcode,
                first,
                second
            ),
        }
    }
}

/// Serializable per-descriptor metadata, for debugger front ends.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct OperationInfo {
    /// The opcode byte.
    pub opcode: u8,
    /// True for CB-prefixed descriptors.
    pub prefixed: bool,
    /// Total encoded length in bytes.
    pub length: u8,
    /// Machine-cycle cost; the not-taken cost for conditional branches.
    pub cycles: u8,
    /// Taken cost, present only for conditional branches.
    pub taken_cycles: Option<u8>,
}

/// The full opcode-to-descriptor mapping.
pub struct OperationTable<M: MemoryBus + 'static> {
    unprefixed: Vec<Option<Operation<M>>>,
    prefixed: Vec<Option<Operation<M>>>,
}

impl<M: MemoryBus + 'static> OperationTable<M> {
    /// Builds the table from every family builder.
    ///
    /// Fails if any two descriptors collide on a byte pattern, or if a
    /// builder claims the CB prefix escape.
    pub fn build() -> Result<Self, TableError> {
        let unprefixed = Self::merge(operations::unprefixed_families(), false)?;
        let prefixed = Self::merge(operations::prefixed_families(), true)?;

        let table = Self {
            unprefixed,
            prefixed,
        };
        debug!(
            "operation table built: {} unprefixed, {} prefixed descriptors",
            table.iter().count(),
            table.iter_prefixed().count()
        );
        Ok(table)
    }

    fn merge(
        families: Vec<FamilyOps<M>>,
        prefixed: bool,
    ) -> Result<Vec<Option<Operation<M>>>, TableError> {
        let mut slots: Vec<Option<Operation<M>>> = (0..256).map(|_| None).collect();
        let mut owners: [Option<&'static str>; 256] = [None; 256];

        // The prefix escape is owned by the dispatch engine itself.
        if !prefixed {
            owners[CB_PREFIX as usize] = Some("prefix escape");
        }

        for (family, ops) in families {
            for op in ops {
                let slot = op.opcode as usize;
                if let Some(first) = owners[slot] {
                    return Err(TableError::DuplicateOpcode {
                        opcode: op.opcode,
                        prefixed,
                        first,
                        second: family,
                    });
                }
                owners[slot] = Some(family);
                slots[slot] = Some(op);
            }
        }

        Ok(slots)
    }

    /// Looks up an unprefixed descriptor.
    #[must_use]
    pub fn get(&self, opcode: u8) -> Option<&Operation<M>> {
        self.unprefixed[opcode as usize].as_ref()
    }

    /// Looks up a CB-prefixed descriptor.
    #[must_use]
    pub fn get_prefixed(&self, opcode: u8) -> Option<&Operation<M>> {
        self.prefixed[opcode as usize].as_ref()
    }

    /// Iterates the populated unprefixed slots in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation<M>> {
        self.unprefixed.iter().flatten()
    }

    /// Iterates the populated CB-prefixed slots in opcode order.
    pub fn iter_prefixed(&self) -> impl Iterator<Item = &Operation<M>> {
        self.prefixed.iter().flatten()
    }

    /// Returns serializable metadata for every descriptor, unprefixed
    /// first, in opcode order.
    #[must_use]
    pub fn metadata(&self) -> Vec<OperationInfo> {
        let describe = |op: &Operation<M>, prefixed: bool| {
            let (cycles, taken_cycles) = match op.cycles {
                CycleCost::Fixed(cycles) => (cycles, None),
                CycleCost::Branch {
                    taken, not_taken, ..
                } => (not_taken, Some(taken)),
            };
            OperationInfo {
                opcode: op.opcode,
                prefixed,
                length: op.length,
                cycles,
                taken_cycles,
            }
        };

        self.iter()
            .map(|op| describe(op, false))
            .chain(self.iter_prefixed().map(|op| describe(op, true)))
            .collect()
    }
}

impl<M: MemoryBus + 'static> fmt::Debug for OperationTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationTable")
            .field("unprefixed", &self.iter().count())
            .field("prefixed", &self.iter_prefixed().count())
            .finish()
    }
}
