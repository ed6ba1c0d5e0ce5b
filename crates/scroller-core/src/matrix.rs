//! Packed 8x8 monochrome tile, one byte per row.

/// Width and height of one LED matrix in pixels.
pub const MATRIX_SIZE: usize = 8;

/// One 8x8 1bpp tile.
///
/// Row `r` is stored as one byte; bit `7 - c` of that byte is pixel
/// `(r, c)`, so bit 7 is the leftmost column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Matrix {
    rows: [u8; MATRIX_SIZE],
}

impl Matrix {
    /// Creates a blank (all-off) tile.
    pub const fn new() -> Self {
        Self {
            rows: [0; MATRIX_SIZE],
        }
    }

    /// Creates a tile from raw row bytes.
    pub const fn from_rows(rows: [u8; MATRIX_SIZE]) -> Self {
        Self { rows }
    }

    /// Reads a pixel state.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is outside `0..8`.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        assert!(
            row < MATRIX_SIZE && col < MATRIX_SIZE,
            "pixel ({row},{col}) outside 8x8 matrix"
        );
        self.rows[row] & (1 << (MATRIX_SIZE - 1 - col)) != 0
    }

    /// Sets a pixel state.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is outside `0..8`.
    pub fn set_pixel(&mut self, row: usize, col: usize, on: bool) {
        assert!(
            row < MATRIX_SIZE && col < MATRIX_SIZE,
            "pixel ({row},{col}) outside 8x8 matrix"
        );

        let bit_mask = 1u8 << (MATRIX_SIZE - 1 - col);
        if on {
            self.rows[row] |= bit_mask;
        } else {
            self.rows[row] &= !bit_mask;
        }
    }

    /// Returns the byte for one row.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `0..8`.
    pub fn row(&self, row: usize) -> u8 {
        self.rows[row]
    }

    /// Overwrites the byte for one row.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `0..8`.
    pub fn set_row(&mut self, row: usize, value: u8) {
        self.rows[row] = value;
    }

    /// Shifts one row left by a single bit and fills bit 0 with `fill_bit`.
    ///
    /// Returns the evicted bit 7. Chaining the return value into the next
    /// tile's `fill_bit` scrolls a whole chain as one logical row; see
    /// [`Canvas::shift_left`](crate::Canvas::shift_left).
    ///
    /// `fill_bit` must be 0 or 1; other values produce unspecified row
    /// contents.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `0..8`.
    pub fn left_shift_row(&mut self, row: usize, fill_bit: u8) -> u8 {
        debug_assert!(fill_bit <= 1, "fill_bit must be 0 or 1");

        let evicted = self.rows[row] >> (MATRIX_SIZE - 1);
        self.rows[row] = (self.rows[row] << 1) | fill_bit;
        evicted
    }

    /// Rotates the tile in place by `quarter_turns * 90°` clockwise.
    ///
    /// Only `quarter_turns % 4` matters, and rotations compose:
    /// `rotate(a)` then `rotate(b)` equals `rotate(a + b)`.
    pub fn rotate(&mut self, quarter_turns: usize) {
        let old = *self;

        match quarter_turns % 4 {
            0 => {}
            1 => {
                for row in 0..MATRIX_SIZE {
                    for col in 0..MATRIX_SIZE {
                        self.set_pixel(row, col, old.pixel(MATRIX_SIZE - 1 - col, row));
                    }
                }
            }
            2 => {
                // Reverse the row order and the bit order within each row.
                for row in 0..MATRIX_SIZE {
                    self.rows[row] = old.rows[MATRIX_SIZE - 1 - row].reverse_bits();
                }
            }
            3 => {
                for row in 0..MATRIX_SIZE {
                    for col in 0..MATRIX_SIZE {
                        self.set_pixel(row, col, old.pixel(col, MATRIX_SIZE - 1 - row));
                    }
                }
            }
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_row() {
        let mut matrix = Matrix::new();
        matrix.set_pixel(0, 0, true);
        matrix.set_pixel(0, 7, true);
        matrix.set_pixel(3, 2, true);

        assert_eq!(matrix.row(0), 0b1000_0001);
        assert_eq!(matrix.row(3), 0b0010_0000);
        assert!(matrix.pixel(0, 0));
        assert!(!matrix.pixel(0, 1));
    }

    #[test]
    fn set_pixel_off_clears_only_that_bit() {
        let mut matrix = Matrix::from_rows([0xFF; MATRIX_SIZE]);
        matrix.set_pixel(5, 3, false);
        assert_eq!(matrix.row(5), 0b1110_1111);
        assert_eq!(matrix.row(4), 0xFF);
    }

    #[test]
    #[should_panic(expected = "outside 8x8 matrix")]
    fn out_of_range_column_panics() {
        let matrix = Matrix::new();
        let _ = matrix.pixel(0, 8);
    }

    #[test]
    #[should_panic(expected = "outside 8x8 matrix")]
    fn out_of_range_row_panics() {
        let mut matrix = Matrix::new();
        matrix.set_pixel(8, 0, true);
    }

    #[test]
    fn left_shift_row_evicts_msb_and_installs_fill_bit() {
        let mut matrix = Matrix::new();
        matrix.set_row(2, 0b1010_0000);

        assert_eq!(matrix.left_shift_row(2, 1), 1);
        assert_eq!(matrix.row(2), 0b0100_0001);

        assert_eq!(matrix.left_shift_row(2, 0), 0);
        assert_eq!(matrix.row(2), 0b1000_0010);
    }

    #[test]
    fn rotate_90_moves_top_left_to_top_right() {
        // A single set pixel at (0,0) lands at (0,7).
        let mut matrix = Matrix::new();
        matrix.set_pixel(0, 0, true);
        matrix.rotate(1);

        assert!(matrix.pixel(0, 7));
        for row in 0..MATRIX_SIZE {
            for col in 0..MATRIX_SIZE {
                if (row, col) != (0, 7) {
                    assert!(!matrix.pixel(row, col), "unexpected pixel at ({row},{col})");
                }
            }
        }
    }

    #[test]
    fn rotate_180_reverses_rows_and_bits() {
        let mut matrix = Matrix::from_rows([
            0b1100_0000,
            0b0000_0001,
            0,
            0,
            0,
            0,
            0,
            0b1111_0000,
        ]);
        matrix.rotate(2);

        assert_eq!(matrix.row(0), 0b0000_1111);
        assert_eq!(matrix.row(6), 0b1000_0000);
        assert_eq!(matrix.row(7), 0b0000_0011);
    }

    #[test]
    fn rotate_180_is_its_own_inverse() {
        let original = Matrix::from_rows([0x3C, 0x42, 0xA5, 0x81, 0xA5, 0x99, 0x42, 0x3C]);
        let mut matrix = original;
        matrix.rotate(2);
        matrix.rotate(2);
        assert_eq!(matrix, original);
    }

    #[test]
    fn rotate_composes_modulo_four() {
        let original = Matrix::from_rows([0x01, 0x80, 0x18, 0x24, 0x00, 0xFF, 0x55, 0xAA]);

        for a in 0..4usize {
            for b in 0..4usize {
                let mut stepped = original;
                stepped.rotate(a);
                stepped.rotate(b);

                let mut direct = original;
                direct.rotate(a + b);

                assert_eq!(stepped, direct, "rotate({a}) then rotate({b})");
            }
        }

        let mut wrapped = original;
        wrapped.rotate(7);
        let mut reduced = original;
        reduced.rotate(3);
        assert_eq!(wrapped, reduced);

        let mut unrotated = original;
        unrotated.rotate(0);
        assert_eq!(unrotated, original);
    }

    #[test]
    fn rotate_270_matches_documented_formula() {
        let mut matrix = Matrix::new();
        matrix.set_pixel(0, 0, true);
        matrix.rotate(3);

        // new(r,c) = old(c, 7-r): old (0,0) appears at (7,0).
        assert!(matrix.pixel(7, 0));
    }
}
