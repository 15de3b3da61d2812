//! The reader-protected rendition of the device.
use ram_gate::ReclaimingGate;
use ram_store::{BoundedStore, PositionCursor, Whence};
use tracing::{debug, info};

use crate::control::{is_vowel, ControlOp, ControlReply};
use crate::error::DeviceError;

/// Device admitting unlimited concurrent sessions.
///
/// Reads pin the generation published at the time of the call, so a single
/// read is never torn by a concurrent writer. Writes and `Clear` go
/// through the gate's copy-and-swap publication: the mutation lands on a
/// private duplicate which then replaces the published contents under a
/// bumped generation, and the superseded allocation is reclaimed once its
/// last reader is done.
pub struct ReclaimingDevice {
    gate: ReclaimingGate,
    capacity: u32,
}

/// One open session against a [`ReclaimingDevice`].
pub struct ReclaimingSession<'dev> {
    device: &'dev ReclaimingDevice,
    cursor: PositionCursor,
}

impl ReclaimingDevice {
    pub fn new(capacity: u32) -> Result<Self, std::io::Error> {
        let store = BoundedStore::with_capacity(capacity)?;
        info!(capacity, "device registered");
        Ok(ReclaimingDevice {
            gate: ReclaimingGate::new(store),
            capacity,
        })
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Open a session. Never refuses admission under this gate.
    pub fn open(&self) -> Result<ReclaimingSession<'_>, DeviceError> {
        info!("device opened");
        Ok(ReclaimingSession {
            device: self,
            cursor: PositionCursor::new(self.capacity),
        })
    }
}

impl ReclaimingSession<'_> {
    /// Read from the current position, advancing it by the bytes
    /// transferred.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let pin = self.device.gate.pin();
        let n = pin.store().read_at(self.cursor.offset(), buf);
        debug!(
            bytes = n,
            position = self.cursor.offset(),
            generation = pin.generation(),
            "read"
        );
        self.cursor.advance(n);
        Ok(n)
    }

    /// Write at the current position, advancing it by the bytes actually
    /// written (possibly fewer than offered, clamped at capacity).
    pub fn write(&mut self, data: &[u8]) -> Result<usize, DeviceError> {
        let offset = self.cursor.offset();
        let (generation, n) = self
            .device
            .gate
            .publish_with(|store| store.write_at(offset, data))
            .map_err(|_| DeviceError::TransferFault)?;
        debug!(bytes = n, position = offset, generation, "write");
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
            ControlOp::GetSize => Ok(ControlReply::Size(self.device.capacity)),
            ControlOp::Clear => {
                let (generation, _) = self
                    .device
                    .gate
                    .publish_with(|store| store.clear())
                    .map_err(|_| DeviceError::TransferFault)?;
                debug!(generation, "buffer cleared");
                Ok(ControlReply::Cleared)
            }
            ControlOp::CountVowels => {
                let pin = self.device.gate.pin();
                let count = pin.store().count_matching(is_vowel);
                debug!(count, generation = pin.generation(), "counted vowels");
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

impl Drop for ReclaimingSession<'_> {
    fn drop(&mut self) {
        info!("device released");
    }
}
