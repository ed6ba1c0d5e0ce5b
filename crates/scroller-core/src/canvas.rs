//! Chain-wide canvas: an ordered row of 8x8 tiles with a text cursor.

use heapless::Vec;
use log::debug;

use crate::font::Font;
use crate::matrix::{MATRIX_SIZE, Matrix};

/// Maximum number of tiles in one canvas.
///
/// Scroll buffers are usually several times the physical chain length, so
/// the cap is well above any realistic MAX7219 chain.
pub const MAX_CHAIN_LEN: usize = 64;

/// A monochrome canvas spanning a chain of 8x8 matrices.
///
/// The canvas is `8 * len()` pixels wide and 8 pixels tall. Matrix 0 is
/// the head of the chain (leftmost on a conventionally mounted display).
/// A cursor column tracks where [`draw_text`](Self::draw_text) places the
/// next glyph; [`shift_left`](Self::shift_left) scrolls the whole canvas
/// one pixel column and drags the cursor along.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Canvas {
    matrices: Vec<Matrix, MAX_CHAIN_LEN>,
    cursor: usize,
}

impl Canvas {
    /// Creates a blank canvas of `length` tiles with the cursor at 0.
    ///
    /// # Panics
    ///
    /// Panics when `length` exceeds [`MAX_CHAIN_LEN`].
    pub fn new(length: usize) -> Self {
        assert!(
            length <= MAX_CHAIN_LEN,
            "canvas length {length} exceeds cap of {MAX_CHAIN_LEN}"
        );

        let mut matrices = Vec::new();
        for _ in 0..length {
            let _ = matrices.push(Matrix::new());
        }
        Self {
            matrices,
            cursor: 0,
        }
    }

    /// Number of tiles in the chain.
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether the canvas has no tiles.
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Canvas width in pixels (`8 * len()`).
    pub fn pixel_width(&self) -> usize {
        self.matrices.len() * MATRIX_SIZE
    }

    /// Current text cursor column, `0..=pixel_width()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reads a pixel in whole-canvas coordinates.
    ///
    /// # Panics
    ///
    /// Panics when `row >= 8` or `col >= pixel_width()`.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        assert!(
            col < self.pixel_width(),
            "column {col} outside canvas width {}",
            self.pixel_width()
        );
        self.matrices[col / MATRIX_SIZE].pixel(row, col % MATRIX_SIZE)
    }

    /// Sets a pixel in whole-canvas coordinates.
    ///
    /// # Panics
    ///
    /// Panics when `row >= 8` or `col >= pixel_width()`.
    pub fn set_pixel(&mut self, row: usize, col: usize, on: bool) {
        assert!(
            col < self.pixel_width(),
            "column {col} outside canvas width {}",
            self.pixel_width()
        );
        self.matrices[col / MATRIX_SIZE].set_pixel(row, col % MATRIX_SIZE, on);
    }

    /// Returns the row byte of one tile, as the frame encoder consumes it.
    ///
    /// # Panics
    ///
    /// Panics when `matrix >= len()` or `row >= 8`.
    pub fn row_of_matrix(&self, matrix: usize, row: usize) -> u8 {
        self.matrices[matrix].row(row)
    }

    /// Whether every pixel is off.
    pub fn is_blank(&self) -> bool {
        self.matrices
            .iter()
            .all(|matrix| (0..MATRIX_SIZE).all(|row| matrix.row(row) == 0))
    }

    /// Draws `text` at the cursor and returns the unconsumed suffix.
    ///
    /// Characters are drawn in order; when a glyph is wider than the
    /// remaining canvas, layout stops and that character plus everything
    /// after it comes back untouched. A partial glyph is never drawn and
    /// a non-empty leftover is normal control flow, not an error.
    ///
    /// Code points above U+00FF have no slot in a 256-glyph font and are
    /// rendered as `?`.
    pub fn draw_text<'a>(&mut self, text: &'a str, font: &Font) -> &'a str {
        for (index, ch) in text.char_indices() {
            let code_point = u8::try_from(ch as u32).unwrap_or(b'?');

            let remaining = self.pixel_width() - self.cursor;
            if font.width_of(code_point) > remaining {
                debug!("draw_text stopped at byte {index}: glyph wider than {remaining}px left");
                return &text[index..];
            }

            self.draw_glyph(code_point, font);
        }
        ""
    }

    fn draw_glyph(&mut self, code_point: u8, font: &Font) {
        let width = font.width_of(code_point);
        for row in 0..MATRIX_SIZE {
            for col in 0..width {
                self.set_pixel(row, self.cursor + col, font.pixel_at(code_point, row, col));
            }
        }
        self.cursor += width;
    }

    /// Scrolls the whole canvas one pixel column to the left.
    ///
    /// Each row is shifted as a single logical `8 * len()`-bit value: the
    /// bit evicted from a tile becomes the fill bit of the tile toward the
    /// head, and the tail tile fills with 0. The cursor moves left with
    /// the content, floored at 0.
    pub fn shift_left(&mut self) {
        for row in 0..MATRIX_SIZE {
            let mut fill_bit = 0u8;
            for matrix in self.matrices.iter_mut().rev() {
                fill_bit = matrix.left_shift_row(row, fill_bit);
            }
        }
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Rotates every tile in place by `quarter_turns * 90°` clockwise.
    ///
    /// Corrects per-board wiring orientation; tiles keep their position in
    /// the chain.
    pub fn rotate_matrices(&mut self, quarter_turns: usize) {
        for matrix in self.matrices.iter_mut() {
            matrix.rotate(quarter_turns);
        }
    }

    /// Rotates the whole canvas by `half_turns * 180°`.
    ///
    /// Even `half_turns` is a no-op. An odd count swaps each top-half row
    /// `(m, r)` with `(len()-1-m, 7-r)`, bit-reversing both row bytes,
    /// which both flips every tile and reverses the chain order. This is
    /// the correction for a chain mounted upside-down, where per-tile
    /// rotation alone is not sufficient.
    pub fn rotate_canvas(&mut self, half_turns: usize) {
        if half_turns % 2 == 0 {
            return;
        }

        let length = self.matrices.len();
        for matrix in 0..length {
            for row in 0..MATRIX_SIZE / 2 {
                let mirror_matrix = length - 1 - matrix;
                let mirror_row = MATRIX_SIZE - 1 - row;

                let value = self.matrices[matrix].row(row);
                let mirror_value = self.matrices[mirror_matrix].row(mirror_row);

                self.matrices[mirror_matrix].set_row(mirror_row, value.reverse_bits());
                self.matrices[matrix].set_row(row, mirror_value.reverse_bits());
            }
        }
    }

    /// Returns an independent deep copy of the first `length` tiles.
    ///
    /// The copy owns its tiles and starts with a fresh cursor; mutating
    /// either canvas never affects the other. Used to cut a device-sized
    /// window out of a longer scroll buffer.
    ///
    /// # Panics
    ///
    /// Panics when `length` exceeds `len()`.
    pub fn cropped(&self, length: usize) -> Self {
        assert!(
            length <= self.matrices.len(),
            "crop length {length} exceeds canvas length {}",
            self.matrices.len()
        );

        let mut matrices = Vec::new();
        for matrix in &self.matrices[..length] {
            let _ = matrices.push(*matrix);
        }
        Self {
            matrices,
            cursor: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FONT_RESOURCE_LEN, FontConfig, GLYPH_HEIGHT};

    // Test font: 'I' is a 3-wide bar glyph, 'M' spans the full 8 columns,
    // each placed flush-left so derived widths are predictable.
    fn test_font(spacing: usize) -> Font {
        let mut data = vec![0u8; FONT_RESOURCE_LEN];

        let i_rows = [0b1110_0000u8; GLYPH_HEIGHT];
        let m_rows = [0b1111_1111u8; GLYPH_HEIGHT];
        data[b'I' as usize * GLYPH_HEIGHT..][..GLYPH_HEIGHT].copy_from_slice(&i_rows);
        data[b'M' as usize * GLYPH_HEIGHT..][..GLYPH_HEIGHT].copy_from_slice(&m_rows);

        Font::from_bytes(
            &data,
            FontConfig {
                proportional: true,
                spacing,
            },
        )
        .unwrap()
    }

    #[test]
    fn pixel_addressing_routes_to_the_right_tile() {
        let mut canvas = Canvas::new(3);
        canvas.set_pixel(2, 0, true);
        canvas.set_pixel(2, 8, true);
        canvas.set_pixel(7, 23, true);

        assert_eq!(canvas.row_of_matrix(0, 2), 0b1000_0000);
        assert_eq!(canvas.row_of_matrix(1, 2), 0b1000_0000);
        assert_eq!(canvas.row_of_matrix(2, 7), 0b0000_0001);
        assert!(canvas.pixel(2, 8));
        assert!(!canvas.pixel(2, 9));
    }

    #[test]
    #[should_panic(expected = "outside canvas width")]
    fn column_past_canvas_width_panics() {
        let canvas = Canvas::new(2);
        let _ = canvas.pixel(0, 16);
    }

    #[test]
    fn draw_text_advances_cursor_by_glyph_widths() {
        let font = test_font(1);
        let mut canvas = Canvas::new(2);

        let leftover = canvas.draw_text("II", &font);
        assert_eq!(leftover, "");
        // 'I' trims to 3 columns + 1 spacing = 4.
        assert_eq!(canvas.cursor(), 8);
        assert_eq!(canvas.row_of_matrix(0, 0), 0b1110_1110);
    }

    #[test]
    fn draw_text_returns_unconsumed_suffix_without_partial_glyphs() {
        let font = test_font(0);
        let mut canvas = Canvas::new(1);

        // 'I' is 3 wide, 'M' is 8 wide: after one 'I' only 5 columns
        // remain, so 'M' and everything after it comes back.
        let leftover = canvas.draw_text("IMI", &font);
        assert_eq!(leftover, "MI");
        assert_eq!(canvas.cursor(), 3);
        assert_eq!(canvas.row_of_matrix(0, 4), 0b1110_0000);
    }

    #[test]
    fn draw_text_split_matches_single_call() {
        let font = test_font(1);

        let mut whole = Canvas::new(3);
        let whole_leftover = whole.draw_text("IIMI", &font);

        let mut split = Canvas::new(3);
        let mid = split.draw_text("II", &font);
        assert_eq!(mid, "");
        let split_leftover = split.draw_text("MI", &font);

        assert_eq!(whole_leftover, split_leftover);
        assert_eq!(whole, split);
    }

    #[test]
    fn non_latin1_characters_fall_back_to_question_mark() {
        let mut data = vec![0u8; FONT_RESOURCE_LEN];
        data[b'?' as usize * GLYPH_HEIGHT] = 0b1100_0000;
        let font = Font::from_bytes(
            &data,
            FontConfig {
                proportional: true,
                spacing: 0,
            },
        )
        .unwrap();

        let mut canvas = Canvas::new(1);
        canvas.draw_text("\u{4e16}", &font);
        assert_eq!(canvas.row_of_matrix(0, 0), 0b1100_0000);
    }

    #[test]
    fn shift_left_carries_bits_across_tile_boundaries() {
        let mut canvas = Canvas::new(2);
        canvas.set_pixel(0, 8, true); // leftmost column of tile 1

        canvas.shift_left();

        assert!(canvas.pixel(0, 7));
        assert!(!canvas.pixel(0, 8));
        assert_eq!(canvas.row_of_matrix(0, 0), 0b0000_0001);
        assert_eq!(canvas.row_of_matrix(1, 0), 0);
    }

    #[test]
    fn full_width_of_shifts_blanks_the_canvas_and_floors_the_cursor() {
        let font = test_font(1);
        let mut canvas = Canvas::new(2);
        canvas.draw_text("II", &font);

        for _ in 0..canvas.pixel_width() {
            canvas.shift_left();
        }

        assert!(canvas.is_blank());
        assert_eq!(canvas.cursor(), 0);

        // Further shifts stay blank and keep the cursor at 0.
        canvas.shift_left();
        assert!(canvas.is_blank());
        assert_eq!(canvas.cursor(), 0);
    }

    #[test]
    fn rotate_matrices_keeps_chain_order() {
        let mut canvas = Canvas::new(2);
        canvas.set_pixel(0, 0, true); // tile 0
        canvas.set_pixel(0, 8, true); // tile 1

        canvas.rotate_matrices(1);

        // Each tile rotated in place: (0,0) -> (0,7) inside its own tile.
        assert_eq!(canvas.row_of_matrix(0, 0), 0b0000_0001);
        assert_eq!(canvas.row_of_matrix(1, 0), 0b0000_0001);
    }

    #[test]
    fn rotate_canvas_even_half_turns_is_a_no_op() {
        let font = test_font(1);
        let mut canvas = Canvas::new(2);
        canvas.draw_text("IM", &font);
        let before = canvas.clone();

        canvas.rotate_canvas(0);
        assert_eq!(canvas, before);
        canvas.rotate_canvas(2);
        assert_eq!(canvas, before);
    }

    #[test]
    fn rotate_canvas_equals_per_tile_flip_plus_reversed_chain() {
        let mut canvas = Canvas::new(3);
        canvas.set_pixel(0, 0, true);
        canvas.set_pixel(3, 10, true);
        canvas.set_pixel(6, 20, true);

        let mut expected = Canvas::new(3);
        for matrix in 0..3 {
            for row in 0..MATRIX_SIZE {
                let mut tile_row = canvas.row_of_matrix(2 - matrix, MATRIX_SIZE - 1 - row);
                tile_row = tile_row.reverse_bits();
                for col in 0..MATRIX_SIZE {
                    expected.set_pixel(row, matrix * MATRIX_SIZE + col, tile_row & (1 << (7 - col)) != 0);
                }
            }
        }

        canvas.rotate_canvas(1);
        assert_eq!(canvas, expected);
    }

    #[test]
    fn rotate_canvas_is_its_own_inverse() {
        let font = test_font(1);
        let mut canvas = Canvas::new(4);
        canvas.draw_text("IMI", &font);
        let before = canvas.clone();

        canvas.rotate_canvas(1);
        assert_ne!(canvas, before);
        canvas.rotate_canvas(1);
        assert_eq!(canvas, before);
    }

    #[test]
    fn cropped_copy_is_independent_of_the_source() {
        let font = test_font(1);
        let mut canvas = Canvas::new(4);
        canvas.draw_text("IM", &font);

        let cropped = canvas.cropped(2);
        assert_eq!(cropped.len(), 2);
        assert_eq!(cropped.cursor(), 0);
        for matrix in 0..2 {
            for row in 0..MATRIX_SIZE {
                assert_eq!(
                    cropped.row_of_matrix(matrix, row),
                    canvas.row_of_matrix(matrix, row)
                );
            }
        }

        // Later mutation of the source leaves the crop untouched.
        let snapshot = cropped.clone();
        canvas.shift_left();
        canvas.set_pixel(0, 0, true);
        assert_eq!(cropped, snapshot);
    }

    #[test]
    #[should_panic(expected = "exceeds canvas length")]
    fn crop_longer_than_source_panics() {
        let canvas = Canvas::new(2);
        let _ = canvas.cropped(3);
    }
}
