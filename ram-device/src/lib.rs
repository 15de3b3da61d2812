//! File-like front end over the gated RAM region.
//!
//! A device pairs one [`BoundedStore`](ram_store::BoundedStore) with one
//! access gate and hands out sessions: `open` performs the gate's
//! admission, the session carries the cursor and answers `read`, `write`,
//! `seek` and the control operations, and dropping the session is the
//! release. Two renditions exist, one per gate:
//!
//! - [`ExclusiveDevice`]: one session at a time, a second `open` fails
//!   with [`DeviceError::Busy`] immediately.
//! - [`ReclaimingDevice`]: unlimited sessions; reads pin a generation and
//!   are never torn by concurrent writers.
//!
//! The numeric surface (control magic `'R'`, codes 1/2/3, seek whence
//! 0/1/2, default capacity 1024) is a contract with external callers and
//! must not drift.
mod control;
mod error;
mod exclusive;
mod reclaiming;

pub use control::{ControlOp, ControlReply, CONTROL_MAGIC};
pub use error::DeviceError;
pub use exclusive::{ExclusiveDevice, ExclusiveSession};
pub use reclaiming::{ReclaimingDevice, ReclaimingSession};

pub use ram_store::{Whence, DEFAULT_CAPACITY};
