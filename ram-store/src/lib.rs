//! Fixed-capacity, RAM-backed byte regions with clamped positional I/O.
//!
//! ## ram-store is not a growable buffer
//!
//! The region is sized exactly once, when it is created, and keeps that
//! size until it is dropped. Transfers that would cross the capacity
//! boundary are clamped, not grown and not failed: a read at or past the
//! end returns zero bytes (end-of-region, analogous to end-of-stream) and
//! a write drops whatever falls past the boundary. Callers that need an
//! error on overflow have to check the returned transfer count themselves.
//!
//! The store performs no admission control of its own. Concurrent access
//! disciplines are layered on top by the gate crate; here a `&mut`
//! receiver on the mutating operations is the only exclusion.
mod cursor;
mod store;

pub use cursor::{OutOfRange, PositionCursor, Whence};
pub use store::{BoundedStore, DEFAULT_CAPACITY};
