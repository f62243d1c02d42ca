//! Line transport trait for the operator command channel.
//!
//! The operator talks to the controller through a serial terminal (a phone
//! app over a Bluetooth serial bridge on the reference build). Commands and
//! replies are ASCII lines terminated by CR LF.
//!
//! ```text
//! > spot 0.2 1.0
//! < OK spot
//! > counters?
//! < spot counter: 3, stitch counter: 0
//! ```

/// Byte channel carrying the line protocol.
///
/// This trait uses the same sync-first shape as the rest of the hardware
/// seams: `try_read` never blocks, `write_all` blocks until the bytes are
/// queued. Framing into lines is done by
/// [`LineAssembler`](crate::console::LineAssembler).
pub trait LineTransport {
    /// Error type for transport operations.
    type Error;

    /// Read whatever bytes are available into `buf` (non-blocking).
    ///
    /// Returns the number of bytes read; `0` when nothing is pending.
    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write all of `bytes` to the channel.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}
