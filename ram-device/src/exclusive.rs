//! The single-owner rendition of the device.
use ram_gate::{ExclusiveGate, ExclusiveGuard};
use ram_store::{BoundedStore, PositionCursor, Whence};
use tracing::{debug, info};

use crate::control::{is_vowel, ControlOp, ControlReply};
use crate::error::DeviceError;

/// Device admitting one session at a time.
///
/// While a session is live every other `open` fails with
/// [`DeviceError::Busy`] on the spot, without queueing or waiting. All
/// operations of the admitted session are totally ordered against every
/// other session's.
pub struct ExclusiveDevice {
    gate: ExclusiveGate<BoundedStore>,
    capacity: u32,
}

/// One open session against an [`ExclusiveDevice`].
///
/// Holds the admission for its whole lifetime; dropping it releases the
/// device.
pub struct ExclusiveSession<'dev> {
    store: ExclusiveGuard<'dev, BoundedStore>,
    cursor: PositionCursor,
}

impl ExclusiveDevice {
    pub fn new(capacity: u32) -> Result<Self, std::io::Error> {
        let store = BoundedStore::with_capacity(capacity)?;
        info!(capacity, "device registered");
        Ok(ExclusiveDevice {
            gate: ExclusiveGate::new(store),
            capacity,
        })
    }

    /// Capacity of the region, independent of any session.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn open(&self) -> Result<ExclusiveSession<'_>, DeviceError> {
        let store = self.gate.try_acquire()?;
        info!("device opened");
        Ok(ExclusiveSession {
            store,
            cursor: PositionCursor::new(self.capacity),
        })
    }
}

impl ExclusiveSession<'_> {
    /// Read from the current position, advancing it by the bytes
    /// transferred.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let n = self.store.read_at(self.cursor.offset(), buf);
        debug!(bytes = n, position = self.cursor.offset(), "read");
        self.cursor.advance(n);
        Ok(n)
    }

    /// Write at the current position, advancing it by the bytes actually
    /// written (possibly fewer than offered, clamped at capacity).
    pub fn write(&mut self, data: &[u8]) -> Result<usize, DeviceError> {
        let n = self.store.write_at(self.cursor.offset(), data);
        debug!(bytes = n, position = self.cursor.offset(), "write");
        self.cursor.advance(n);
        Ok(n)
    }

    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64, DeviceError> {
        let position = self.cursor.seek(offset, whence)?;
        debug!(position, "seek");
        Ok(position)
    }

    pub fn position(&self) -> i64 {
        self.cursor.offset()
    }

    /// Run a control operation. Independent of the cursor.
    pub fn control(&mut self, op: ControlOp) -> Result<ControlReply, DeviceError> {
        match op {
            ControlOp::GetSize => Ok(ControlReply::Size(self.store.capacity())),
            ControlOp::Clear => {
                self.store.clear();
                debug!("buffer cleared");
                Ok(ControlReply::Cleared)
            }
            ControlOp::CountVowels => {
                let count = self.store.count_matching(is_vowel);
                debug!(count, "counted vowels");
                Ok(ControlReply::VowelCount(count))
            }
        }
    }

    /// Entry point for callers speaking the numeric control contract.
    pub fn control_raw(&mut self, code: u32) -> Result<ControlReply, DeviceError> {
        let op = ControlOp::from_raw(code).ok_or(DeviceError::InvalidOperation)?;
        self.control(op)
    }
}

impl Drop for ExclusiveSession<'_> {
    fn drop(&mut self) {
        info!("device released");
    }
}
