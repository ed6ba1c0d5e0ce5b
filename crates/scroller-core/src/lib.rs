#![cfg_attr(not(test), no_std)]

//! Canvas and bitmap-font primitives for chains of 8x8 monochrome LED
//! matrices.
//!
//! The core pipeline is: load a [`Font`] from a flat bitmap resource, draw
//! text onto a [`Canvas`] (a horizontal chain of [`Matrix`] tiles with a
//! layout cursor), and scroll it one pixel column at a time with
//! [`Canvas::shift_left`]. Orientation corrections for the physical
//! mounting ([`Canvas::rotate_matrices`], [`Canvas::rotate_canvas`]) run on
//! a cropped copy just before encoding, so the scroll buffer itself stays
//! in logical orientation.
//!
//! Everything here is a pure in-memory transform; no I/O, no allocation.

mod canvas;
mod font;
mod matrix;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use canvas::{Canvas, MAX_CHAIN_LEN};
pub use font::{
    FONT_RESOURCE_LEN, Font, FontConfig, FontError, GLYPH_COUNT, GLYPH_HEIGHT, GLYPH_WIDTH_MAX,
    Glyph,
};
pub use matrix::{MATRIX_SIZE, Matrix};
