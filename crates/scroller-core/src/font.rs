//! Bitmap font: 256 fixed-height glyphs with derived proportional widths.

use core::fmt;

use log::debug;

/// Height of every glyph in rows. Glyph placement never moves vertically.
pub const GLYPH_HEIGHT: usize = 8;

/// Maximum (and non-proportional default) glyph width in columns.
pub const GLYPH_WIDTH_MAX: usize = 8;

/// Number of glyphs in a font, indexed by byte code point.
pub const GLYPH_COUNT: usize = 256;

/// Required length of a font resource: 256 records of 8 row bytes.
pub const FONT_RESOURCE_LEN: usize = GLYPH_COUNT * GLYPH_HEIGHT;

/// Width-derivation parameters applied uniformly to every glyph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FontConfig {
    /// Trim excess whitespace from both sides of each glyph.
    pub proportional: bool,
    /// Blank columns appended after each glyph.
    pub spacing: usize,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            proportional: true,
            spacing: 1,
        }
    }
}

/// Font resource decoding errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontError {
    /// Resource is shorter than the 256 x 8 bytes a full font requires.
    ///
    /// A short resource fails the whole load; there are no default glyphs
    /// for missing code points.
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { expected, actual } => {
                write!(f, "font resource truncated: {actual} of {expected} bytes")
            }
        }
    }
}

/// One character bitmap plus its derived display width.
///
/// The bitmap uses the same packing as a canvas row: bit `7 - col` of row
/// byte `r` is pixel `(r, col)`. After proportional derivation the glyph
/// is flush against column 0 and `width` covers its ink plus spacing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph {
    rows: [u8; GLYPH_HEIGHT],
    width: u8,
}

impl Glyph {
    /// Builds a glyph from raw row bytes, deriving its width.
    ///
    /// Non-proportional fonts keep the bitmap unmodified at the maximum
    /// width. Proportional derivation runs in a fixed order: trim leading
    /// empty columns by shifting rows left, drop trailing empty columns
    /// from the width (scanning from column 6 down; the rightmost column
    /// is never scanned), force the space glyph (0x20) to width 4, add
    /// `spacing`, force 0xFF to width 1 ignoring spacing, and clamp to 8.
    pub fn new(rows: [u8; GLYPH_HEIGHT], code_point: u8, config: FontConfig) -> Self {
        if !config.proportional {
            return Self {
                rows,
                width: GLYPH_WIDTH_MAX as u8,
            };
        }

        let mut rows = rows;
        let mut width = GLYPH_WIDTH_MAX;

        let left_spacing = (0..GLYPH_WIDTH_MAX)
            .take_while(|&col| column_is_empty(&rows, col))
            .count();

        // u16 intermediate: a fully blank glyph shifts by the full width.
        for row in rows.iter_mut() {
            *row = ((*row as u16) << left_spacing) as u8;
        }

        for col in (0..GLYPH_WIDTH_MAX - 1).rev() {
            if column_is_empty(&rows, col) {
                width -= 1;
            } else {
                break;
            }
        }

        // The blank space glyph has a fixed base width and still receives
        // spacing; 0xFF is a one-column hair space that ignores spacing.
        if code_point == 0x20 {
            width = 4;
        }
        width += config.spacing;
        if code_point == 0xFF {
            width = 1;
        }

        Self {
            rows,
            width: width.min(GLYPH_WIDTH_MAX) as u8,
        }
    }

    /// Display width in columns, `1..=8`.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Reads a pixel of the glyph bitmap.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is outside `0..8`.
    pub fn pixel(&self, row: usize, col: usize) -> bool {
        assert!(
            col < GLYPH_WIDTH_MAX,
            "glyph column {col} outside 0..{GLYPH_WIDTH_MAX}"
        );
        self.rows[row] & (1 << (GLYPH_WIDTH_MAX - 1 - col)) != 0
    }

    /// Returns the byte for one bitmap row.
    pub fn row(&self, row: usize) -> u8 {
        self.rows[row]
    }
}

fn column_is_empty(rows: &[u8; GLYPH_HEIGHT], col: usize) -> bool {
    rows.iter()
        .all(|row| row & (1 << (GLYPH_WIDTH_MAX - 1 - col)) == 0)
}

/// A complete 256-glyph bitmap font.
pub struct Font {
    glyphs: [Glyph; GLYPH_COUNT],
}

impl Font {
    /// Decodes a font from a flat resource of 256 consecutive 8-byte
    /// records, record `i` holding the row bytes for code point `i`.
    ///
    /// Fails when the resource is shorter than [`FONT_RESOURCE_LEN`];
    /// extra trailing bytes are ignored.
    pub fn from_bytes(data: &[u8], config: FontConfig) -> Result<Self, FontError> {
        if data.len() < FONT_RESOURCE_LEN {
            return Err(FontError::Truncated {
                expected: FONT_RESOURCE_LEN,
                actual: data.len(),
            });
        }

        let glyphs = core::array::from_fn(|code_point| {
            let start = code_point * GLYPH_HEIGHT;
            let mut rows = [0u8; GLYPH_HEIGHT];
            rows.copy_from_slice(&data[start..start + GLYPH_HEIGHT]);
            Glyph::new(rows, code_point as u8, config)
        });

        debug!(
            "font loaded: proportional={} spacing={}",
            config.proportional, config.spacing
        );
        Ok(Self { glyphs })
    }

    /// Returns the glyph for a byte code point.
    pub fn glyph(&self, code_point: u8) -> &Glyph {
        &self.glyphs[code_point as usize]
    }

    /// Display width of the glyph for `code_point`.
    pub fn width_of(&self, code_point: u8) -> usize {
        self.glyphs[code_point as usize].width()
    }

    /// Reads a pixel of the glyph for `code_point`.
    ///
    /// # Panics
    ///
    /// Panics when `row` or `col` is outside `0..8`.
    pub fn pixel_at(&self, code_point: u8, row: usize, col: usize) -> bool {
        self.glyphs[code_point as usize].pixel(row, col)
    }
}
