//! Operation Table Builders
//!
//! One module per instruction family, each exposing a builder that
//! returns the family's descriptors. Builders are pure functions and
//! share no mutable state; composing the full table is nothing more than
//! concatenating their outputs, which [`crate::table::OperationTable`]
//! does with exhaustive collision checking.
//!
//! Each builder encodes its family's byte-pattern law (base pattern OR
//! register-select code), cycle-cost law and flag law. The shared flag
//! arithmetic lives in [`alu`].

pub(crate) mod alu;

pub mod arithmetic;
pub mod bit;
pub mod boolean;
pub mod call;
pub mod compare;
pub mod inc_dec;
pub mod jump;
pub mod load;
pub mod misc;
pub mod rotate_shift;
pub mod stack;
pub mod xor;

use crate::memory::MemoryBus;
use crate::operation::Operation;

/// A family builder's output: the family name (used in collision
/// diagnostics) and its descriptors.
pub(crate) type FamilyOps<M> = (&'static str, Vec<Operation<M>>);

/// All unprefixed-table builders.
pub(crate) fn unprefixed_families<M: MemoryBus + 'static>() -> Vec<FamilyOps<M>> {
    vec![
        ("load", load::operations()),
        ("arithmetic", arithmetic::operations()),
        ("compare", compare::operations()),
        ("xor", xor::operations()),
        ("boolean", boolean::operations()),
        ("inc_dec", inc_dec::operations()),
        ("jump", jump::operations()),
        ("call", call::operations()),
        ("stack", stack::operations()),
        ("rotate_shift", rotate_shift::operations()),
        ("misc", misc::operations()),
    ]
}

/// All CB-prefixed-table builders.
pub(crate) fn prefixed_families<M: MemoryBus + 'static>() -> Vec<FamilyOps<M>> {
    vec![
        ("rotate_shift", rotate_shift::prefixed_operations()),
        ("bit", bit::prefixed_operations()),
    ]
}
