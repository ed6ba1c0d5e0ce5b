#![cfg_attr(not(test), no_std)]

//! Driver for daisy-chained MAX7219 8x8 LED matrix controllers.
//!
//! The chips sit on one shared SPI shift-register chain: every transaction
//! is a flat sequence of (register, data) pairs, one pair per chip, and a
//! full canvas refresh takes eight such transactions (row registers
//! `0x01..=0x08`). [`Max7219Chain`] owns the chain topology (length,
//! per-board rotation, upside-down mounting, intensity) and turns a
//! [`Canvas`] into those transactions.
//!
//! The bus itself is whatever implements `embedded_hal::spi::SpiDevice`;
//! the driver never inspects, retries, or times transmissions.

pub mod protocol;

use embedded_hal::spi::SpiDevice;
use scroller_core::{Canvas, MATRIX_SIZE, MAX_CHAIN_LEN};

use protocol::{
    DECODE_MODE_NONE, DISPLAY_TEST_OFF, Frame, INTENSITY_MAX, Register, SCAN_LIMIT_ALL_DIGITS,
    SHUTDOWN_DEVICE_OFF, SHUTDOWN_DEVICE_ON, encode_frame, row_register,
};

/// Physical mounting description for one chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChainConfig {
    /// Number of MAX7219 chips (8x8 tiles) on the device.
    pub length: usize,
    /// Quarter-turn clockwise rotations applied to each tile so images
    /// display upright on this board's wiring.
    pub matrix_orientation: usize,
    /// Whole chain mounted upside-down.
    pub upside_down: bool,
    /// LED brightness, `0x00..=0x0F`.
    pub intensity: u8,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            length: 4,
            matrix_orientation: 0,
            upside_down: false,
            intensity: protocol::INTENSITY_MIN,
        }
    }
}

/// Driver errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<SpiErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// Chain length or intensity outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr> = Result<(), Error<SpiErr>>;

/// A chain of MAX7219 chips behind one SPI device.
#[derive(Debug)]
pub struct Max7219Chain<SPI> {
    spi: SPI,
    config: ChainConfig,
}

impl<SPI> Max7219Chain<SPI>
where
    SPI: SpiDevice<u8>,
{
    /// Creates a driver for a chain described by `config`.
    ///
    /// Fails with [`Error::InvalidInput`] when the length is outside
    /// `1..=MAX_CHAIN_LEN` or the intensity is above
    /// [`protocol::INTENSITY_MAX`]. No bus traffic happens here; see
    /// [`initialize`](Self::initialize).
    pub fn new(spi: SPI, config: ChainConfig) -> Result<Self, Error<SPI::Error>> {
        if config.length == 0 || config.length > MAX_CHAIN_LEN || config.intensity > INTENSITY_MAX {
            return Err(Error::InvalidInput);
        }
        Ok(Self { spi, config })
    }

    /// Returns the configured chain topology.
    pub fn config(&self) -> ChainConfig {
        self.config
    }

    /// Releases the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Brings every chip into raw-bitmap display mode.
    ///
    /// Blanks the chain while configuring: display off, test mode off,
    /// scan limit to all eight rows, decode mode off, configured
    /// intensity, all rows cleared, then display on.
    pub fn initialize(&mut self) -> DriverResult<SPI::Error> {
        self.power_off()?;
        self.broadcast(Register::DisplayTest, DISPLAY_TEST_OFF)?;
        self.broadcast(Register::ScanLimit, SCAN_LIMIT_ALL_DIGITS)?;
        self.broadcast(Register::DecodeMode, DECODE_MODE_NONE)?;
        self.set_intensity(self.config.intensity)?;
        self.clear()?;
        self.power_on()
    }

    /// Blanks the chain and puts every chip in shutdown mode.
    pub fn shutdown(&mut self) -> DriverResult<SPI::Error> {
        self.clear()?;
        self.power_off()
    }

    /// Leaves low-power mode, turning the display output on.
    pub fn power_on(&mut self) -> DriverResult<SPI::Error> {
        self.broadcast(Register::Shutdown, SHUTDOWN_DEVICE_ON)
    }

    /// Enters low-power mode, turning the display output off. Register
    /// contents survive.
    pub fn power_off(&mut self) -> DriverResult<SPI::Error> {
        self.broadcast(Register::Shutdown, SHUTDOWN_DEVICE_OFF)
    }

    /// Sets LED brightness for the whole chain, `0x00..=0x0F`.
    pub fn set_intensity(&mut self, intensity: u8) -> DriverResult<SPI::Error> {
        if intensity > INTENSITY_MAX {
            return Err(Error::InvalidInput);
        }
        self.broadcast(Register::Intensity, intensity)?;
        self.config.intensity = intensity;
        Ok(())
    }

    /// Writes a blank byte to every row register of every chip.
    pub fn clear(&mut self) -> DriverResult<SPI::Error> {
        for row in 0..MATRIX_SIZE {
            self.broadcast_raw(row_register(row), 0x00)?;
        }
        Ok(())
    }

    /// Applies this chain's orientation corrections to a canvas in place:
    /// the upside-down 180° flip first, then the per-tile rotation.
    pub fn preprocess(&self, image: &mut Canvas) {
        image.rotate_canvas(self.config.upside_down as usize);
        image.rotate_matrices(self.config.matrix_orientation);
    }

    /// Preprocesses a device-sized canvas and encodes it into a frame.
    ///
    /// Takes the canvas by value: the caller hands over a cropped copy
    /// (see [`Canvas::cropped`]) and the orientation correction mutates it
    /// freely. Frames may be stockpiled and sent later at a fixed cadence.
    pub fn generate_frame(&self, mut image: Canvas) -> Frame {
        self.preprocess(&mut image);
        encode_frame(&image)
    }

    /// Transmits one frame as eight row transactions.
    pub fn send_frame(&mut self, frame: &Frame) -> DriverResult<SPI::Error> {
        for command in frame.rows() {
            self.send(command)?;
        }
        Ok(())
    }

    /// Crops `image` to the chain length, corrects orientation, and
    /// transmits it.
    ///
    /// # Panics
    ///
    /// Panics when `image` is shorter than the configured chain.
    pub fn display(&mut self, image: &Canvas) -> DriverResult<SPI::Error> {
        let frame = self.generate_frame(image.cropped(self.config.length));
        self.send_frame(&frame)
    }

    /// Transmits `image` as-is, without cropping or orientation
    /// correction. The canvas length must match the chain for the pairs
    /// to land on the right chips.
    pub fn display_raw(&mut self, image: &Canvas) -> DriverResult<SPI::Error> {
        let frame = encode_frame(image);
        self.send_frame(&frame)
    }

    fn broadcast(&mut self, register: Register, data: u8) -> DriverResult<SPI::Error> {
        self.broadcast_raw(register as u8, data)
    }

    fn broadcast_raw(&mut self, register: u8, data: u8) -> DriverResult<SPI::Error> {
        let command = protocol::broadcast(register, data, self.config.length);
        self.send(&command)
    }

    fn send(&mut self, command: &[u8]) -> DriverResult<SPI::Error> {
        self.spi.write(command).map_err(Error::Spi)
    }
}
