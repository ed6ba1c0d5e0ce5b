use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::canvas::Canvas;
use crate::matrix::MATRIX_SIZE;

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let col = point.x as usize;
            let row = point.y as usize;
            if col >= self.pixel_width() || row >= MATRIX_SIZE {
                continue;
            }

            self.set_pixel(row, col, color.is_on());
        }

        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.pixel_width() as u32, MATRIX_SIZE as u32)
    }
}
