//! Bitmap blitting: 1-bit packed, 8-bit grayscale, 16-bit RGB565.
//!
//! Each entry point iterates the source row-major over w x h and brackets
//! the whole blit once. The 1-bit format packs 8 pixels per byte, MSB
//! first, with every row padded to a whole byte.

use super::Gfx;
use crate::driver::DisplayDriver;

impl<D: DisplayDriver> Gfx<D> {
    /// 1-bit bitmap with transparent background: only set bits are
    /// written, in `color`.
    pub fn draw_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16, color: u16) {
        let byte_width = (w + 7) / 8;
        let mut byte: u8 = 0;

        self.driver.start_write();
        for j in 0..h {
            for i in 0..w {
                if i & 7 != 0 {
                    byte <<= 1;
                } else {
                    byte = bitmap[(j * byte_width + i / 8) as usize];
                }
                if byte & 0x80 != 0 {
                    self.driver.write_pixel(x + i, y + j, color);
                }
            }
        }
        self.driver.end_write();
    }

    /// 1-bit bitmap with opaque background: set bits are written in
    /// `color`, clear bits in `bg`.
    pub fn draw_bitmap_bg(
        &mut self,
        x: i16,
        y: i16,
        bitmap: &[u8],
        w: i16,
        h: i16,
        color: u16,
        bg: u16,
    ) {
        let byte_width = (w + 7) / 8;
        let mut byte: u8 = 0;

        self.driver.start_write();
        for j in 0..h {
            for i in 0..w {
                if i & 7 != 0 {
                    byte <<= 1;
                } else {
                    byte = bitmap[(j * byte_width + i / 8) as usize];
                }
                let c = if byte & 0x80 != 0 { color } else { bg };
                self.driver.write_pixel(x + i, y + j, c);
            }
        }
        self.driver.end_write();
    }

    /// 8-bit bitmap, one byte per pixel. The byte is forwarded as the
    /// color verbatim; drivers that do not accept 8-bit values need the
    /// caller to pre-convert.
    pub fn draw_grayscale_bitmap(&mut self, x: i16, y: i16, bitmap: &[u8], w: i16, h: i16) {
        self.driver.start_write();
        for j in 0..h {
            for i in 0..w {
                let c = u16::from(bitmap[(j * w + i) as usize]);
                self.driver.write_pixel(x + i, y + j, c);
            }
        }
        self.driver.end_write();
    }

    /// 16-bit RGB565 bitmap, one element per pixel, no conversion.
    pub fn draw_rgb_bitmap(&mut self, x: i16, y: i16, bitmap: &[u16], w: i16, h: i16) {
        self.driver.start_write();
        for j in 0..h {
            for i in 0..w {
                self.driver
                    .write_pixel(x + i, y + j, bitmap[(j * w + i) as usize]);
            }
        }
        self.driver.end_write();
    }
}

#[cfg(test)]
mod tests {
    use crate::gfx::Gfx;
    use crate::testutil::RecordingDriver;
    use std::collections::HashSet;

    fn recording() -> Gfx<RecordingDriver> {
        Gfx::new(RecordingDriver::new(), 64, 64)
    }

    #[test]
    fn one_bit_blit_is_msb_first() {
        // Single row: 0b1010_0001 -> pixels at columns 0, 2, 7.
        let mut gfx = recording();
        gfx.draw_bitmap(0, 0, &[0xA1], 8, 1, 5);
        assert_eq!(
            gfx.driver().pixel_set(),
            HashSet::from([(0, 0), (2, 0), (7, 0)])
        );
    }

    #[test]
    fn one_bit_rows_are_byte_padded() {
        // 10 pixels wide -> 2 bytes per row; the pad bits of byte 2 are
        // never consumed. Row 0 sets columns 0 and 9, row 1 sets column 8.
        let rows = [0x80, 0x40, 0x00, 0x80];
        let mut gfx = recording();
        gfx.draw_bitmap(0, 0, &rows, 10, 2, 5);
        assert_eq!(
            gfx.driver().pixel_set(),
            HashSet::from([(0, 0), (9, 0), (8, 1)])
        );
    }

    #[test]
    fn one_bit_blit_honors_origin() {
        let mut gfx = recording();
        gfx.draw_bitmap(5, 7, &[0x80], 1, 1, 5);
        assert_eq!(gfx.driver().pixel_set(), HashSet::from([(5, 7)]));
    }

    #[test]
    fn opaque_variant_writes_every_cell() {
        let mut gfx = recording();
        gfx.draw_bitmap_bg(0, 0, &[0xA1], 8, 1, 5, 9);
        let d = gfx.driver();
        assert_eq!(d.pixels().len(), 8);
        let fg: HashSet<(i16, i16)> = d
            .ops
            .iter()
            .filter_map(|op| match op {
                crate::testutil::Op::Pixel { x, y, color: 5 } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(fg, HashSet::from([(0, 0), (2, 0), (7, 0)]));
    }

    #[test]
    fn grayscale_passes_bytes_through_as_colors() {
        let mut gfx = recording();
        gfx.draw_grayscale_bitmap(0, 0, &[0, 128, 255, 7], 2, 2);
        assert_eq!(gfx.driver().colors(), vec![0, 128, 255, 7]);
        assert_eq!(
            gfx.driver().pixels(),
            vec![(0, 0), (1, 0), (0, 1), (1, 1)]
        );
    }

    #[test]
    fn rgb565_passes_elements_through() {
        let mut gfx = recording();
        gfx.draw_rgb_bitmap(2, 3, &[0xF800, 0x07E0, 0x001F, 0xFFFF], 2, 2);
        assert_eq!(gfx.driver().colors(), vec![0xF800, 0x07E0, 0x001F, 0xFFFF]);
        assert_eq!(
            gfx.driver().pixels(),
            vec![(2, 3), (3, 3), (2, 4), (3, 4)]
        );
    }

    #[test]
    fn blits_bracket_once() {
        let mut gfx = recording();
        gfx.draw_bitmap(0, 0, &[0xFF], 8, 1, 1);
        gfx.draw_bitmap_bg(0, 2, &[0xFF], 8, 1, 1, 0);
        gfx.draw_grayscale_bitmap(0, 4, &[1, 2], 2, 1);
        gfx.draw_rgb_bitmap(0, 6, &[1, 2], 2, 1);
        let d = gfx.driver();
        assert_eq!(d.bracket_opens(), 4);
        assert_eq!(d.bracket_closes(), 4);
        assert!(d.brackets_balanced());
    }
}
