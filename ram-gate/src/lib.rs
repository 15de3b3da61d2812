//! Access gates over the fixed-capacity region.
//!
//! Two interchangeable disciplines, with very different guarantees:
//!
//! - [`ExclusiveGate`] admits at most one session at a time. Acquisition
//!   never waits; a second caller is refused with [`Busy`] on the spot and
//!   owns its own retry policy. Everything a holder does is totally
//!   ordered against every other session.
//! - [`ReclaimingGate`] admits any number of concurrent readers and
//!   writers. Readers pin the generation of the contents current at entry;
//!   writers publish mutated copies instead of touching the published
//!   allocation. A superseded generation is only released once the last
//!   pin referencing it drops, so a reader never observes a torn mix of
//!   old and new bytes within one call.
mod exclusive;
mod reclaim;

pub use exclusive::{Busy, ExclusiveGate, ExclusiveGuard};
pub use reclaim::{Generation, ReadGuard, ReclaimingGate};
