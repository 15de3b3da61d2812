/// Errors surfaced by the device front end.
///
/// All of these are reported synchronously to the caller of the operation
/// that detected them; nothing is retried internally. A read past the end
/// of the region is *not* an error (it transfers zero bytes), and an
/// overflowing write is clamped, not refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// Seek target outside `[0, capacity]`.
    OutOfRange,
    /// The exclusive gate is already held by another session. Retry policy
    /// belongs to the caller.
    Busy,
    /// A copy to or from the caller's buffer failed.
    ///
    /// In-process slice copies cannot fault, so this only surfaces when a
    /// copy-on-write duplication cannot allocate its backing region. A
    /// fallible transport fronting this device would map its copy failures
    /// here as well.
    TransferFault,
    /// Unrecognized control code.
    InvalidOperation,
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DeviceError::OutOfRange => write!(f, "seek target outside the region"),
            DeviceError::Busy => write!(f, "device busy"),
            DeviceError::TransferFault => write!(f, "transfer to or from the caller failed"),
            DeviceError::InvalidOperation => write!(f, "invalid control operation"),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<ram_store::OutOfRange> for DeviceError {
    fn from(_: ram_store::OutOfRange) -> Self {
        DeviceError::OutOfRange
    }
}

impl From<ram_gate::Busy> for DeviceError {
    fn from(_: ram_gate::Busy) -> Self {
        DeviceError::Busy
    }
}
