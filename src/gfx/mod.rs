//! Display frame state and dispatch-level drawing primitives.

pub mod bitmap;
pub mod shapes;
pub mod text;

use crate::driver::DisplayDriver;
use crate::font::TextFont;

/// Rasterization engine over a display driver.
///
/// Owns the driver plus all per-display state: raw and rotated logical
/// dimensions, text cursor and attributes, and the active font. The
/// engine holds no pixel memory; every draw becomes a minimal sequence
/// of capability calls on the driver, bracketed once per compound
/// operation.
pub struct Gfx<D: DisplayDriver> {
    pub(crate) driver: D,
    raw_width: i16,
    raw_height: i16,
    pub(crate) width: i16,
    pub(crate) height: i16,
    rotation: u8,
    pub(crate) cursor_x: i16,
    pub(crate) cursor_y: i16,
    pub(crate) text_color: u16,
    pub(crate) text_bg_color: u16,
    pub(crate) text_size_x: u8,
    pub(crate) text_size_y: u8,
    pub(crate) wrap: bool,
    pub(crate) cp437: bool,
    pub(crate) font: TextFont,
}

impl<D: DisplayDriver> Gfx<D> {
    /// Wrap `driver` with unrotated dimensions `width` x `height`.
    ///
    /// Text starts at the origin in the built-in font, color 0xFFFF on a
    /// matching (transparent) background, size 1, wrapping enabled.
    pub fn new(driver: D, width: i16, height: i16) -> Self {
        Self {
            driver,
            raw_width: width,
            raw_height: height,
            width,
            height,
            rotation: 0,
            cursor_x: 0,
            cursor_y: 0,
            text_color: 0xFFFF,
            text_bg_color: 0xFFFF,
            text_size_x: 1,
            text_size_y: 1,
            wrap: true,
            cp437: false,
            font: TextFont::Builtin,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Logical width after rotation.
    pub fn width(&self) -> i16 {
        self.width
    }

    /// Logical height after rotation.
    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Set the display rotation. Odd rotations swap the logical
    /// dimensions; the driver is notified with the masked value.
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = rotation & 3;
        match self.rotation {
            0 | 2 => {
                self.width = self.raw_width;
                self.height = self.raw_height;
            },
            _ => {
                self.width = self.raw_height;
                self.height = self.raw_width;
            },
        }
        self.driver.set_rotation(self.rotation);
    }

    /// Forward an invert request to the driver. Pure notification, no
    /// engine state changes.
    pub fn invert_display(&mut self, invert: bool) {
        self.driver.invert_display(invert);
    }

    /// Single pixel, outside any bracket.
    pub fn draw_pixel(&mut self, x: i16, y: i16, color: u16) {
        self.driver.draw_pixel(x, y, color);
    }

    /// Vertical span of `h` pixels growing downward from (x, y).
    pub fn draw_fast_vline(&mut self, x: i16, y: i16, h: i16, color: u16) {
        self.driver.start_write();
        self.driver.write_fast_vline(x, y, h, color);
        self.driver.end_write();
    }

    /// Horizontal span of `w` pixels growing rightward from (x, y).
    pub fn draw_fast_hline(&mut self, x: i16, y: i16, w: i16, color: u16) {
        self.driver.start_write();
        self.driver.write_fast_hline(x, y, w, color);
        self.driver.end_write();
    }

    /// Line between two endpoints. Purely horizontal or vertical input
    /// is routed to the fast span primitives before the Bresenham walk.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: u16) {
        if x0 == x1 {
            let (top, bottom) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
            self.draw_fast_vline(x0, top, bottom - top + 1, color);
        } else if y0 == y1 {
            let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
            self.draw_fast_hline(left, y0, right - left + 1, color);
        } else {
            self.driver.start_write();
            self.driver.write_line(x0, y0, x1, y1, color);
            self.driver.end_write();
        }
    }

    /// Rectangle outline: two horizontal and two vertical spans in one
    /// bracket.
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        self.driver.start_write();
        self.driver.write_fast_hline(x, y, w, color);
        self.driver.write_fast_hline(x, y + h - 1, w, color);
        self.driver.write_fast_vline(x, y, h, color);
        self.driver.write_fast_vline(x + w - 1, y, h, color);
        self.driver.end_write();
    }

    /// Solid rectangle.
    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        self.driver.start_write();
        self.driver.write_fill_rect(x, y, w, h, color);
        self.driver.end_write();
    }

    /// Fill the whole logical extent with one color.
    pub fn fill_screen(&mut self, color: u16) {
        self.driver.start_write();
        self.driver.fill_screen(self.width, self.height, color);
        self.driver.end_write();
    }
}
