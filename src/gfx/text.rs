//! Text rendering: the built-in 6x8 cell font and custom descriptor
//! fonts, cursor tracking, wrapping, and bounds measurement.
//!
//! The two font modes differ in more than glyph data. Built-in cells sit
//! below-right of the cursor and support an opaque background; custom
//! glyphs hang off a baseline through per-glyph offsets and are always
//! transparent. `write` owns the cursor; `draw_char` renders at explicit
//! coordinates and never moves it.

use super::Gfx;
use crate::driver::DisplayDriver;
use crate::font::{classic_glyph, TextFont};

impl<D: DisplayDriver> Gfx<D> {
    /// Draw one character at (x, y) without touching the cursor.
    ///
    /// In built-in mode (x, y) is the top-left of the 6x8 cell and a
    /// `bg` different from `color` paints the whole cell including the
    /// spacing column. In custom mode (x, y) is the baseline cursor
    /// position, the glyph offsets place the bitmap, and `bg` is
    /// ignored. Characters outside the custom font's range draw
    /// nothing.
    pub fn draw_char(
        &mut self,
        x: i16,
        y: i16,
        c: u8,
        color: u16,
        bg: u16,
        size_x: u8,
        size_y: u8,
    ) {
        let sx = i16::from(size_x);
        let sy = i16::from(size_y);
        match self.font {
            TextFont::Builtin => {
                if x >= self.width
                    || y >= self.height
                    || x + 6 * sx - 1 < 0
                    || y + 8 * sy - 1 < 0
                {
                    return;
                }
                let c = if !self.cp437 && c >= 176 {
                    // Skip the gap the legacy charset left at 176.
                    c.wrapping_add(1)
                } else {
                    c
                };

                self.driver.start_write();
                let columns = classic_glyph(c);
                for i in 0..5i16 {
                    let mut line = columns[i as usize];
                    for j in 0..8i16 {
                        if line & 1 != 0 {
                            if size_x == 1 && size_y == 1 {
                                self.driver.write_pixel(x + i, y + j, color);
                            } else {
                                self.driver
                                    .write_fill_rect(x + i * sx, y + j * sy, sx, sy, color);
                            }
                        } else if bg != color {
                            if size_x == 1 && size_y == 1 {
                                self.driver.write_pixel(x + i, y + j, bg);
                            } else {
                                self.driver
                                    .write_fill_rect(x + i * sx, y + j * sy, sx, sy, bg);
                            }
                        }
                        line >>= 1;
                    }
                }
                if bg != color {
                    if size_x == 1 && size_y == 1 {
                        self.driver.write_fast_vline(x + 5, y, 8, bg);
                    } else {
                        self.driver.write_fill_rect(x + 5 * sx, y, sx, 8 * sy, bg);
                    }
                }
                self.driver.end_write();
            },
            TextFont::Custom(font) => {
                let Some(glyph) = font.glyph(c) else {
                    return;
                };
                let w = i16::from(glyph.width);
                let h = i16::from(glyph.height);
                let xo = i16::from(glyph.x_offset);
                let yo = i16::from(glyph.y_offset);
                let mut bo = glyph.bitmap_offset as usize;
                let mut bits: u8 = 0;
                let mut bit: u32 = 0;

                self.driver.start_write();
                for yy in 0..h {
                    for xx in 0..w {
                        if bit & 7 == 0 {
                            bits = font.bitmap[bo];
                            bo += 1;
                        }
                        bit += 1;
                        if bits & 0x80 != 0 {
                            if size_x == 1 && size_y == 1 {
                                self.driver.write_pixel(x + xo + xx, y + yo + yy, color);
                            } else {
                                self.driver.write_fill_rect(
                                    x + (xo + xx) * sx,
                                    y + (yo + yy) * sy,
                                    sx,
                                    sy,
                                    color,
                                );
                            }
                        }
                        bits <<= 1;
                    }
                }
                self.driver.end_write();
            },
        }
    }

    /// Process one byte of text at the cursor: render printable
    /// characters, advance the cursor, wrap and feed lines.
    ///
    /// `\n` returns the cursor to column zero and drops one line;
    /// `\r` is swallowed. With wrapping enabled a character that would
    /// overrun the right edge moves to the next line first.
    pub fn write(&mut self, c: u8) {
        let tsx = i16::from(self.text_size_x);
        let tsy = i16::from(self.text_size_y);
        match self.font {
            TextFont::Builtin => {
                if c == b'\n' {
                    self.cursor_x = 0;
                    self.cursor_y += tsy * 8;
                } else if c != b'\r' {
                    if self.wrap && self.cursor_x + tsx * 6 > self.width {
                        self.cursor_x = 0;
                        self.cursor_y += tsy * 8;
                    }
                    self.draw_char(
                        self.cursor_x,
                        self.cursor_y,
                        c,
                        self.text_color,
                        self.text_bg_color,
                        self.text_size_x,
                        self.text_size_y,
                    );
                    self.cursor_x += tsx * 6;
                }
            },
            TextFont::Custom(font) => {
                if c == b'\n' {
                    self.cursor_x = 0;
                    self.cursor_y += tsy * i16::from(font.y_advance);
                } else if c != b'\r' {
                    let Some(glyph) = font.glyph(c) else {
                        return;
                    };
                    let w = i16::from(glyph.width);
                    let h = i16::from(glyph.height);
                    // Zero-area glyphs (space) advance without drawing.
                    if w > 0 && h > 0 {
                        let xo = i16::from(glyph.x_offset);
                        if self.wrap && self.cursor_x + tsx * (xo + w) > self.width {
                            self.cursor_x = 0;
                            self.cursor_y += tsy * i16::from(font.y_advance);
                        }
                        self.draw_char(
                            self.cursor_x,
                            self.cursor_y,
                            c,
                            self.text_color,
                            self.text_bg_color,
                            self.text_size_x,
                            self.text_size_y,
                        );
                    }
                    self.cursor_x += i16::from(glyph.x_advance) * tsx;
                }
            },
        }
    }

    /// Feed every byte of `text` through `write`.
    pub fn write_str(&mut self, text: &str) {
        for &b in text.as_bytes() {
            self.write(b);
        }
    }

    pub fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn cursor_x(&self) -> i16 {
        self.cursor_x
    }

    pub fn cursor_y(&self) -> i16 {
        self.cursor_y
    }

    /// Foreground-only text: the background color is set equal to the
    /// foreground, which the renderer reads as transparent.
    pub fn set_text_color(&mut self, color: u16) {
        self.text_color = color;
        self.text_bg_color = color;
    }

    pub fn set_text_color_bg(&mut self, color: u16, bg: u16) {
        self.text_color = color;
        self.text_bg_color = bg;
    }

    /// Uniform integer magnification. Zero is clamped to one.
    pub fn set_text_size(&mut self, size: u8) {
        self.set_text_size_xy(size, size);
    }

    /// Independent horizontal and vertical magnification. Zero is
    /// clamped to one on each axis.
    pub fn set_text_size_xy(&mut self, size_x: u8, size_y: u8) {
        self.text_size_x = size_x.max(1);
        self.text_size_y = size_y.max(1);
    }

    pub fn set_text_wrap(&mut self, wrap: bool) {
        self.wrap = wrap;
    }

    /// Use the original code-page 437 layout for codes at 176 and
    /// above instead of the off-by-one legacy mapping.
    pub fn set_cp437(&mut self, enable: bool) {
        self.cp437 = enable;
    }

    /// Select the active font.
    ///
    /// Built-in cells hang below the cursor while custom glyphs sit on
    /// a baseline above it, so switching modes shifts the cursor by
    /// roughly one line to keep existing text positions sensible.
    pub fn set_font(&mut self, font: TextFont) {
        match (self.font, font) {
            (TextFont::Builtin, TextFont::Custom(_)) => self.cursor_y += 6,
            (TextFont::Custom(_), TextFont::Builtin) => self.cursor_y -= 6,
            _ => {},
        }
        self.font = font;
    }

    /// Replay `write`'s cursor movement for one byte and fold the
    /// character's covered box into the running min/max extents.
    fn char_bounds(
        &self,
        c: u8,
        x: &mut i16,
        y: &mut i16,
        min_x: &mut i16,
        min_y: &mut i16,
        max_x: &mut i16,
        max_y: &mut i16,
    ) {
        let tsx = i16::from(self.text_size_x);
        let tsy = i16::from(self.text_size_y);
        match self.font {
            TextFont::Builtin => {
                if c == b'\n' {
                    *x = 0;
                    *y += tsy * 8;
                } else if c != b'\r' {
                    if self.wrap && *x + tsx * 6 > self.width {
                        *x = 0;
                        *y += tsy * 8;
                    }
                    let x2 = *x + tsx * 6 - 1;
                    let y2 = *y + tsy * 8 - 1;
                    if x2 > *max_x {
                        *max_x = x2;
                    }
                    if y2 > *max_y {
                        *max_y = y2;
                    }
                    if *x < *min_x {
                        *min_x = *x;
                    }
                    if *y < *min_y {
                        *min_y = *y;
                    }
                    *x += tsx * 6;
                }
            },
            TextFont::Custom(font) => {
                if c == b'\n' {
                    *x = 0;
                    *y += tsy * i16::from(font.y_advance);
                } else if c != b'\r' {
                    let Some(glyph) = font.glyph(c) else {
                        return;
                    };
                    let gw = i16::from(glyph.width);
                    let gh = i16::from(glyph.height);
                    let xo = i16::from(glyph.x_offset);
                    let yo = i16::from(glyph.y_offset);
                    if self.wrap && *x + tsx * (xo + gw) > self.width {
                        *x = 0;
                        *y += tsy * i16::from(font.y_advance);
                    }
                    let x1 = *x + xo * tsx;
                    let y1 = *y + yo * tsy;
                    let x2 = x1 + gw * tsx - 1;
                    let y2 = y1 + gh * tsy - 1;
                    if x1 < *min_x {
                        *min_x = x1;
                    }
                    if y1 < *min_y {
                        *min_y = y1;
                    }
                    if x2 > *max_x {
                        *max_x = x2;
                    }
                    if y2 > *max_y {
                        *max_y = y2;
                    }
                    *x += i16::from(glyph.x_advance) * tsx;
                }
            },
        }
    }

    /// Bounding box `(x1, y1, w, h)` that `write_str(text)` would cover
    /// starting at (x, y), under the current font, size, and wrap
    /// settings. A string with no rendered pixels reports a zero-sized
    /// box at the start position.
    pub fn text_bounds(&self, text: &str, x: i16, y: i16) -> (i16, i16, u16, u16) {
        let mut x1 = x;
        let mut y1 = y;
        let mut w = 0u16;
        let mut h = 0u16;

        let mut cx = x;
        let mut cy = y;
        let mut min_x = self.width;
        let mut min_y = self.height;
        let mut max_x = -1i16;
        let mut max_y = -1i16;
        for &c in text.as_bytes() {
            self.char_bounds(c, &mut cx, &mut cy, &mut min_x, &mut min_y, &mut max_x, &mut max_y);
        }
        if max_x >= min_x {
            x1 = min_x;
            w = (max_x - min_x + 1) as u16;
        }
        if max_y >= min_y {
            y1 = min_y;
            h = (max_y - min_y + 1) as u16;
        }
        (x1, y1, w, h)
    }
}

#[cfg(test)]
mod tests {
    use crate::font::{Font, Glyph, TextFont};
    use crate::gfx::Gfx;
    use crate::testutil::{Op, RecordingDriver, SpanDriver};
    use std::collections::HashSet;

    static GLYPHS: [Glyph; 2] = [
        // 3x2 bitmap, rows 101 / 010 packed MSB first.
        Glyph {
            bitmap_offset: 0,
            width: 3,
            height: 2,
            x_advance: 4,
            x_offset: 1,
            y_offset: -2,
        },
        // Zero-area glyph in the style of a space.
        Glyph {
            bitmap_offset: 1,
            width: 0,
            height: 0,
            x_advance: 5,
            x_offset: 0,
            y_offset: 0,
        },
    ];
    static SMALL: Font = Font {
        bitmap: &[0xA8],
        glyphs: &GLYPHS,
        first: b'A',
        last: b'B',
        y_advance: 7,
    };

    fn recording() -> Gfx<RecordingDriver> {
        Gfx::new(RecordingDriver::new(), 64, 64)
    }

    #[test]
    fn builtin_bang_matches_column_pattern() {
        // '!' is a single column 0x5F: rows 0..4 and row 6 at column 2.
        let mut gfx = recording();
        gfx.draw_char(0, 0, b'!', 1, 1, 1, 1);
        assert_eq!(
            gfx.driver().pixel_set(),
            HashSet::from([(2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 6)])
        );
    }

    #[test]
    fn transparent_char_writes_only_set_bits() {
        let mut gfx = recording();
        gfx.draw_char(0, 0, b'!', 1, 1, 1, 1);
        assert_eq!(gfx.driver().pixels().len(), 6);
    }

    #[test]
    fn opaque_char_paints_cell_and_spacing_column() {
        let mut gfx = Gfx::new(SpanDriver::new(), 64, 64);
        gfx.draw_char(0, 0, b'!', 1, 9, 1, 1);
        let ops = &gfx.driver().ops;
        let pixel_count = ops
            .iter()
            .filter(|op| matches!(op, Op::Pixel { .. }))
            .count();
        assert_eq!(pixel_count, 40);
        assert_eq!(
            ops[ops.len() - 2],
            Op::VLine {
                x: 5,
                y: 0,
                h: 8,
                color: 9
            }
        );
    }

    #[test]
    fn scaled_char_uses_fill_rects() {
        let mut gfx = Gfx::new(SpanDriver::new(), 64, 64);
        gfx.draw_char(0, 0, b'!', 1, 1, 2, 3);
        let rects: Vec<_> = gfx
            .driver()
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Rect { x, y, w, h, .. } => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0], (4, 0, 2, 3));
        assert_eq!(rects[5], (4, 18, 2, 3));
    }

    #[test]
    fn fully_offscreen_char_emits_nothing() {
        let mut gfx = recording();
        gfx.draw_char(64, 0, b'A', 1, 1, 1, 1);
        gfx.draw_char(0, 64, b'A', 1, 1, 1, 1);
        gfx.draw_char(-6, 0, b'A', 1, 1, 1, 1);
        gfx.draw_char(0, -8, b'A', 1, 1, 1, 1);
        assert!(gfx.driver().ops.is_empty());
    }

    #[test]
    fn high_codes_render_blank_in_both_charsets() {
        let mut gfx = recording();
        gfx.draw_char(0, 0, 0xB0, 1, 1, 1, 1);
        gfx.set_cp437(true);
        gfx.draw_char(0, 0, 0xB0, 1, 1, 1, 1);
        assert!(gfx.driver().pixels().is_empty());
    }

    #[test]
    fn write_advances_by_cell_width() {
        let mut gfx = recording();
        gfx.write(b'A');
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (6, 0));
        gfx.set_text_size(2);
        gfx.write(b'A');
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (18, 0));
    }

    #[test]
    fn newline_resets_column_and_feeds_line() {
        let mut gfx = recording();
        gfx.write_str("A\nB");
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (6, 8));
    }

    #[test]
    fn carriage_return_is_swallowed() {
        let mut gfx = recording();
        gfx.write(b'\r');
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (0, 0));
        assert!(gfx.driver().ops.is_empty());
    }

    #[test]
    fn wrap_moves_overflowing_char_to_next_line() {
        // 64 wide fits ten 6-pixel cells; the eleventh wraps.
        let mut gfx = recording();
        for _ in 0..11 {
            gfx.write(b'A');
        }
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (6, 8));
    }

    #[test]
    fn wrap_disabled_runs_past_the_edge() {
        let mut gfx = recording();
        gfx.set_text_wrap(false);
        for _ in 0..11 {
            gfx.write(b'A');
        }
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (66, 0));
    }

    #[test]
    fn empty_text_bounds_is_zero_box_at_start() {
        let gfx = recording();
        assert_eq!(gfx.text_bounds("", 3, 4), (3, 4, 0, 0));
    }

    #[test]
    fn builtin_text_bounds_covers_cells() {
        let gfx = recording();
        assert_eq!(gfx.text_bounds("A", 0, 0), (0, 0, 6, 8));
        assert_eq!(gfx.text_bounds("AB", 2, 1), (2, 1, 12, 8));
        assert_eq!(gfx.text_bounds("A\nB", 0, 0), (0, 0, 6, 16));
    }

    #[test]
    fn font_switch_round_trip_restores_cursor() {
        let mut gfx = recording();
        gfx.set_cursor(0, 20);
        gfx.set_font(TextFont::Custom(&SMALL));
        assert_eq!(gfx.cursor_y(), 26);
        gfx.set_font(TextFont::Builtin);
        assert_eq!(gfx.cursor_y(), 20);
    }

    #[test]
    fn custom_glyph_lands_at_offset_from_baseline() {
        let mut gfx = recording();
        gfx.set_font(TextFont::Custom(&SMALL));
        gfx.set_cursor(10, 10);
        gfx.write(b'A');
        assert_eq!(
            gfx.driver().pixel_set(),
            HashSet::from([(11, 8), (13, 8), (12, 9)])
        );
        assert_eq!(gfx.cursor_x(), 14);
    }

    #[test]
    fn zero_area_glyph_advances_without_drawing() {
        let mut gfx = recording();
        gfx.set_font(TextFont::Custom(&SMALL));
        gfx.set_cursor(10, 10);
        gfx.write(b'B');
        assert!(gfx.driver().ops.is_empty());
        assert_eq!(gfx.cursor_x(), 15);
    }

    #[test]
    fn out_of_range_code_is_ignored_entirely() {
        let mut gfx = recording();
        gfx.set_font(TextFont::Custom(&SMALL));
        gfx.set_cursor(10, 10);
        gfx.write(b'Z');
        assert!(gfx.driver().ops.is_empty());
        assert_eq!(gfx.cursor_x(), 10);
    }

    #[test]
    fn custom_newline_uses_font_y_advance() {
        let mut gfx = recording();
        gfx.set_font(TextFont::Custom(&SMALL));
        gfx.set_cursor(10, 10);
        gfx.write(b'\n');
        assert_eq!((gfx.cursor_x(), gfx.cursor_y()), (0, 17));
    }

    #[test]
    fn custom_text_bounds_uses_glyph_metrics() {
        let mut gfx = recording();
        gfx.set_font(TextFont::Custom(&SMALL));
        assert_eq!(gfx.text_bounds("A", 10, 10), (11, 8, 3, 2));
    }

    #[test]
    fn text_size_zero_clamps_to_one() {
        let mut gfx = recording();
        gfx.set_text_size(0);
        gfx.write(b'A');
        assert_eq!(gfx.cursor_x(), 6);
        gfx.set_text_size_xy(0, 3);
        gfx.write(b'A');
        assert_eq!(gfx.cursor_x(), 12);
    }

    #[test]
    fn chars_bracket_once() {
        let mut gfx = recording();
        gfx.draw_char(0, 0, b'A', 1, 9, 1, 1);
        let d = gfx.driver();
        assert_eq!(d.bracket_opens(), 1);
        assert!(d.brackets_balanced());
    }
}
