//! Driver capability interface and software synthesis fallbacks.
//!
//! A concrete display driver implements `draw_pixel` and overrides only the
//! slots it can accelerate. Every default body synthesizes the operation
//! from lower-level slots, so all unaccelerated paths terminate in
//! `draw_pixel` calls.

use std::mem::swap;

/// Capability interface between the rasterization engine and a display.
///
/// The `write_*` slots assume the caller already holds a batch bracket
/// (`start_write`/`end_write`) and never open one themselves. Compound
/// engine operations own the bracket; a driver that needs per-burst
/// transport setup hooks the bracket methods.
pub trait DisplayDriver {
    /// Write one pixel in the driver's native color format. Required.
    fn draw_pixel(&mut self, x: i16, y: i16, color: u16);

    /// Open a burst of writes. Transaction-oriented transports override
    /// this to hold the bus for the whole burst.
    fn start_write(&mut self) {}

    /// Close a burst opened by `start_write`.
    fn end_write(&mut self) {}

    /// Pixel write inside an open bracket.
    fn write_pixel(&mut self, x: i16, y: i16, color: u16) {
        self.draw_pixel(x, y, color);
    }

    /// Vertical span of `h` pixels starting at (x, y), growing downward.
    fn write_fast_vline(&mut self, x: i16, y: i16, h: i16, color: u16) {
        for i in 0..h {
            self.write_pixel(x, y + i, color);
        }
    }

    /// Horizontal span of `w` pixels starting at (x, y), growing rightward.
    fn write_fast_hline(&mut self, x: i16, y: i16, w: i16, color: u16) {
        for i in 0..w {
            self.write_pixel(x + i, y, color);
        }
    }

    /// Solid rectangle, synthesized as stacked vertical spans.
    fn write_fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        for i in x..x + w {
            self.write_fast_vline(i, y, h, color);
        }
    }

    /// Arbitrary line between two endpoints.
    ///
    /// Degenerate horizontal and vertical cases are routed to the fast
    /// span slots by the engine before this is reached, but the walk
    /// handles them correctly anyway.
    fn write_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: u16) {
        bresenham(self, x0, y0, x1, y1, color);
    }

    /// Clear the full logical extent. The engine passes its rotated
    /// dimensions so the driver does not need to track rotation itself.
    fn fill_screen(&mut self, width: i16, height: i16, color: u16) {
        self.write_fill_rect(0, 0, width, height, color);
    }

    /// Rotation change notification. `rotation` is already masked to 0..=3.
    fn set_rotation(&mut self, rotation: u8) {
        let _ = rotation;
    }

    /// Invert-display notification.
    fn invert_display(&mut self, invert: bool) {
        let _ = invert;
    }
}

/// Integer Bresenham walk: traverse the major axis monotonically, step the
/// minor axis when the accumulated error crosses zero. Axes and endpoints
/// are normalized first so the loop runs in one direction regardless of
/// input point order.
fn bresenham<D: DisplayDriver + ?Sized>(
    driver: &mut D,
    mut x0: i16,
    mut y0: i16,
    mut x1: i16,
    mut y1: i16,
    color: u16,
) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut err = dx / 2;
    let ystep: i16 = if y0 < y1 { 1 } else { -1 };

    for x in x0..=x1 {
        if steep {
            driver.write_pixel(y0, x, color);
        } else {
            driver.write_pixel(x, y0, color);
        }
        err -= dy;
        if err < 0 {
            y0 += ystep;
            err += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingDriver;

    #[test]
    fn line_golden_sequence() {
        let mut d = RecordingDriver::new();
        d.write_line(0, 0, 4, 2, 1);
        assert_eq!(d.pixels(), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn line_endpoint_order_is_irrelevant() {
        let mut a = RecordingDriver::new();
        let mut b = RecordingDriver::new();
        a.write_line(0, 0, 4, 2, 1);
        b.write_line(4, 2, 0, 0, 1);
        assert_eq!(a.pixel_set(), b.pixel_set());
    }

    #[test]
    fn steep_line_walks_major_axis() {
        let mut d = RecordingDriver::new();
        d.write_line(0, 0, 2, 4, 1);
        // Five steps along y, mirrored from the shallow golden case.
        assert_eq!(d.pixels(), vec![(0, 0), (0, 1), (1, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn horizontal_line_matches_fast_hline() {
        let mut line = RecordingDriver::new();
        let mut span = RecordingDriver::new();
        line.write_line(2, 5, 9, 5, 1);
        span.write_fast_hline(2, 5, 8, 1);
        assert_eq!(line.pixel_set(), span.pixel_set());
    }

    #[test]
    fn vertical_line_matches_fast_vline() {
        let mut line = RecordingDriver::new();
        let mut span = RecordingDriver::new();
        line.write_line(3, -2, 3, 4, 1);
        span.write_fast_vline(3, -2, 7, 1);
        assert_eq!(line.pixel_set(), span.pixel_set());
    }

    #[test]
    fn fill_rect_stacks_vlines_column_major() {
        let mut d = RecordingDriver::new();
        d.write_fill_rect(1, 2, 3, 2, 7);
        assert_eq!(
            d.pixels(),
            vec![(1, 2), (1, 3), (2, 2), (2, 3), (3, 2), (3, 3)]
        );
    }

    #[test]
    fn fill_screen_covers_bounds() {
        let mut d = RecordingDriver::new();
        d.fill_screen(4, 3, 7);
        assert_eq!(d.pixels().len(), 12);
        assert!(d.pixel_set().contains(&(0, 0)));
        assert!(d.pixel_set().contains(&(3, 2)));
    }

    #[test]
    fn write_slots_never_bracket() {
        let mut d = RecordingDriver::new();
        d.write_fast_vline(0, 0, 4, 1);
        d.write_fast_hline(0, 0, 4, 1);
        d.write_fill_rect(0, 0, 2, 2, 1);
        d.write_line(0, 0, 3, 3, 1);
        d.fill_screen(2, 2, 1);
        assert_eq!(d.bracket_opens(), 0);
    }

    #[test]
    fn zero_length_spans_write_nothing() {
        let mut d = RecordingDriver::new();
        d.write_fast_vline(0, 0, 0, 1);
        d.write_fast_hline(0, 0, 0, 1);
        d.write_fill_rect(0, 0, 0, 5, 1);
        d.write_fill_rect(0, 0, 5, 0, 1);
        assert!(d.pixels().is_empty());
    }
}
