//! Wire-level command encoding for daisy-chained MAX7219 drivers.
//!
//! Every transmission to the chain is one flat byte sequence of N
//! (register, data) pairs, one pair per chip in physical chain order. The
//! first chip in the chain receives the first pair.

use heapless::Vec;
use scroller_core::{Canvas, MATRIX_SIZE, MAX_CHAIN_LEN};

/// Capacity of one command: a (register, data) pair per chip.
pub const MAX_COMMAND_BYTES: usize = 2 * MAX_CHAIN_LEN;

/// One command transaction for the whole chain.
pub type Command = Vec<u8, MAX_COMMAND_BYTES>;

/// MAX7219 control register addresses.
///
/// Row data uses registers `0x01..=0x08` (see [`row_register`]), not
/// listed here.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    /// BCD decode for 7-segment digits; raw bitmap mode wants it off.
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

/// Raw bitmap mode, no 7-segment decoding.
pub const DECODE_MODE_NONE: u8 = 0x00;
/// Drive all 8 digits (matrix rows).
pub const SCAN_LIMIT_ALL_DIGITS: u8 = 0x07;
pub const SHUTDOWN_DEVICE_OFF: u8 = 0x00;
pub const SHUTDOWN_DEVICE_ON: u8 = 0x01;
pub const DISPLAY_TEST_OFF: u8 = 0x00;
pub const DISPLAY_TEST_ON: u8 = 0x01;
pub const INTENSITY_MIN: u8 = 0x00;
pub const INTENSITY_MAX: u8 = 0x0F;

/// Maps a row index 0..=7 to its data register 0x01..=0x08.
///
/// # Panics
///
/// Panics when `row` is outside `0..8`.
#[inline]
pub fn row_register(row: usize) -> u8 {
    assert!(row < MATRIX_SIZE, "row {row} outside 0..{MATRIX_SIZE}");
    row as u8 + 1
}

/// Builds a command repeating the same (register, data) pair for every
/// chip in a chain of `chain_len`.
///
/// # Panics
///
/// Panics when `chain_len` exceeds [`MAX_CHAIN_LEN`].
pub fn broadcast(register: u8, data: u8, chain_len: usize) -> Command {
    assert!(
        chain_len <= MAX_CHAIN_LEN,
        "chain length {chain_len} exceeds cap of {MAX_CHAIN_LEN}"
    );

    let mut command = Command::new();
    for _ in 0..chain_len {
        let _ = command.push(register);
        let _ = command.push(data);
    }
    command
}

/// One full refresh for a chain: eight row commands, registers
/// `0x01..=0x08` in increasing order, each sent as its own transaction.
///
/// Frames are plain values and may be precomputed ahead of transmission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    rows: [Command; MATRIX_SIZE],
}

impl Frame {
    /// The eight row commands in transmission order.
    pub fn rows(&self) -> &[Command] {
        &self.rows
    }
}

/// Encodes a canvas into one frame.
///
/// For each row, the command holds the pair
/// `(row_register(row), image.row_of_matrix(m, row))` for every matrix
/// `m` in chain order. The canvas must already be cropped to the physical
/// chain length and orientation-corrected.
pub fn encode_frame(image: &Canvas) -> Frame {
    let rows = core::array::from_fn(|row| {
        let mut command = Command::new();
        for matrix in 0..image.len() {
            let _ = command.push(row_register(row));
            let _ = command.push(image.row_of_matrix(matrix, row));
        }
        command
    });
    Frame { rows }
}
