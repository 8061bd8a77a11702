//! Half-duplex serial link abstraction
//!
//! Models the interrupt/DMA-driven UART primitive the display link runs on:
//! bursts are handed to the hardware and complete asynchronously, reception
//! assembles chunks into one linear buffer until the engine drains it.

/// Half-duplex framed serial port.
///
/// Implementations wrap a UART with transmit-complete, receive-chunk and
/// line-error notifications. The notifications themselves are delivered out
/// of band (the interrupt glue forwards them to the engine's `LinkIrq`
/// handlers); this trait only carries the operations the engine invokes from
/// the cooperative main loop.
///
/// # Contract
///
/// - [`start_transmit`](SerialPort::start_transmit) must not block: it either
///   accepts the whole burst (copying it before returning - the slice is only
///   valid for the duration of the call) and later raises transmit-complete,
///   or refuses it outright.
/// - A single armed receive window stays listening across chunk events,
///   assembling into one linear buffer from offset zero; each chunk event
///   reports the total assembled length so far.
/// - Line-error flags (overrun, framing, noise) are cleared by the
///   implementation's interrupt glue before the error is reported upward.
pub trait SerialPort {
    /// Error type for port operations
    type Error;

    /// Hand a burst of bytes to the transmitter.
    ///
    /// Returns `Err` if the hardware refuses the burst; no bytes are sent
    /// in that case and the caller may retry later.
    fn start_transmit(&mut self, burst: &[u8]) -> Result<(), Self::Error>;

    /// Discard any assembled bytes and (re)arm reception.
    fn arm_receive(&mut self) -> Result<(), Self::Error>;

    /// Stop listening and clear any latched line-error condition.
    fn abort_receive(&mut self);

    /// Copy the currently assembled receive bytes into `out`.
    ///
    /// Returns the number of bytes copied (bounded by `out.len()` and by
    /// the assembled length).
    fn read_received(&self, out: &mut [u8]) -> usize;
}

/// Serial port configuration
///
/// The link runs at a fixed line setting per channel; nothing is negotiated.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
