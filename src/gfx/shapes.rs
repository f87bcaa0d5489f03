//! Circle, triangle and rounded-rectangle rasterization.
//!
//! Circles use the integer midpoint algorithm with octant mirroring;
//! triangles are filled scanline by scanline with incremental edge
//! interpolation. All compound operations bracket their driver writes
//! exactly once.

use std::mem::swap;

use super::Gfx;
use crate::driver::DisplayDriver;

impl<D: DisplayDriver> Gfx<D> {
    /// Circle outline of radius `r` centered on (cx, cy).
    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: u16) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        self.driver.start_write();
        self.driver.write_pixel(cx, cy + r, color);
        self.driver.write_pixel(cx, cy - r, color);
        self.driver.write_pixel(cx + r, cy, color);
        self.driver.write_pixel(cx - r, cy, color);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            self.driver.write_pixel(cx + x, cy + y, color);
            self.driver.write_pixel(cx - x, cy + y, color);
            self.driver.write_pixel(cx + x, cy - y, color);
            self.driver.write_pixel(cx - x, cy - y, color);
            self.driver.write_pixel(cx + y, cy + x, color);
            self.driver.write_pixel(cx - y, cy + x, color);
            self.driver.write_pixel(cx + y, cy - x, color);
            self.driver.write_pixel(cx - y, cy - x, color);
        }

        self.driver.end_write();
    }

    /// Quarter-circle arcs for the corners selected by `corners`, one
    /// mask bit per corner: 0x1 top-left, 0x2 top-right, 0x4
    /// bottom-right, 0x8 bottom-left.
    ///
    /// Emits no bracket; the caller owns it. Skips the four axis
    /// extremal pixels, which rounded rectangles cover with their edge
    /// spans.
    pub(crate) fn draw_quarter_circle(&mut self, cx: i16, cy: i16, r: i16, corners: u8, color: u16) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if corners & 0x4 != 0 {
                self.driver.write_pixel(cx + x, cy + y, color);
                self.driver.write_pixel(cx + y, cy + x, color);
            }
            if corners & 0x2 != 0 {
                self.driver.write_pixel(cx + x, cy - y, color);
                self.driver.write_pixel(cx + y, cy - x, color);
            }
            if corners & 0x8 != 0 {
                self.driver.write_pixel(cx - y, cy + x, color);
                self.driver.write_pixel(cx - x, cy + y, color);
            }
            if corners & 0x1 != 0 {
                self.driver.write_pixel(cx - y, cy - x, color);
                self.driver.write_pixel(cx - x, cy - y, color);
            }
        }
    }

    /// Solid circle of radius `r` centered on (cx, cy).
    pub fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: u16) {
        self.driver.start_write();
        self.driver.write_fast_vline(cx, cy - r, 2 * r + 1, color);
        self.fill_quarter_circle(cx, cy, r, 3, 0, color);
        self.driver.end_write();
    }

    /// Vertical-span fill of the right (mask 0x1) and/or left (mask 0x2)
    /// circle halves, excluding the center column. `delta` stretches each
    /// span downward, which lets rounded rectangles reuse this for their
    /// corner fills without re-covering the center body.
    ///
    /// Emits no bracket; the caller owns it. The `x < y + 1` and
    /// `y != py` guards keep every column from being emitted twice,
    /// which matters to drivers with XOR/invert drawing modes. Keep them.
    pub(crate) fn fill_quarter_circle(
        &mut self,
        cx: i16,
        cy: i16,
        r: i16,
        corners: u8,
        delta: i16,
        color: u16,
    ) {
        let mut f = 1 - r;
        let mut ddf_x = 1;
        let mut ddf_y = -2 * r;
        let mut x = 0;
        let mut y = r;
        let mut px = x;
        let mut py = y;

        let delta = delta + 1;

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            if x < y + 1 {
                if corners & 1 != 0 {
                    self.driver.write_fast_vline(cx + x, cy - y, 2 * y + delta, color);
                }
                if corners & 2 != 0 {
                    self.driver.write_fast_vline(cx - x, cy - y, 2 * y + delta, color);
                }
            }
            if y != py {
                if corners & 1 != 0 {
                    self.driver.write_fast_vline(cx + py, cy - px, 2 * px + delta, color);
                }
                if corners & 2 != 0 {
                    self.driver.write_fast_vline(cx - py, cy - px, 2 * px + delta, color);
                }
                py = y;
            }
            px = x;
        }
    }

    /// Triangle outline through three vertices.
    pub fn draw_triangle(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        x2: i16,
        y2: i16,
        color: u16,
    ) {
        self.draw_line(x0, y0, x1, y1, color);
        self.draw_line(x1, y1, x2, y2, color);
        self.draw_line(x2, y2, x0, y0, color);
    }

    /// Solid triangle through three vertices, filled scanline by
    /// scanline.
    pub fn fill_triangle(
        &mut self,
        mut x0: i16,
        mut y0: i16,
        mut x1: i16,
        mut y1: i16,
        mut x2: i16,
        mut y2: i16,
        color: u16,
    ) {
        // Sort vertices by ascending y (three-comparison network).
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }
        if y1 > y2 {
            swap(&mut y2, &mut y1);
            swap(&mut x2, &mut x1);
        }
        if y0 > y1 {
            swap(&mut y0, &mut y1);
            swap(&mut x0, &mut x1);
        }

        self.driver.start_write();

        if y0 == y2 {
            // All on one scanline: a single span over min..max x.
            let mut a = x0;
            let mut b = x0;
            if x1 < a {
                a = x1;
            } else if x1 > b {
                b = x1;
            }
            if x2 < a {
                a = x2;
            } else if x2 > b {
                b = x2;
            }
            self.driver.write_fast_hline(a, y0, b - a + 1, color);
            self.driver.end_write();
            return;
        }

        let dx01 = x1 - x0;
        let dy01 = y1 - y0;
        let dx02 = x2 - x0;
        let dy02 = y2 - y0;
        let dx12 = x2 - x1;
        let dy12 = y2 - y1;
        let mut sa: i32 = 0;
        let mut sb: i32 = 0;

        // Upper part walks edges 0-1 and 0-2. A flat-bottomed triangle
        // (y1 == y2) includes scanline y1 here and skips the lower loop;
        // otherwise y1 is left to the lower loop. Either way the loop
        // with a zero y-span is never entered, so neither division can
        // see a zero denominator.
        let last = if y1 == y2 { y1 } else { y1 - 1 };

        let mut y = y0;
        while y <= last {
            let mut a = x0 + (sa / i32::from(dy01)) as i16;
            let mut b = x0 + (sb / i32::from(dy02)) as i16;
            sa += i32::from(dx01);
            sb += i32::from(dx02);
            if a > b {
                swap(&mut a, &mut b);
            }
            self.driver.write_fast_hline(a, y, b - a + 1, color);
            y += 1;
        }

        // Lower part walks edges 1-2 and 0-2.
        sa = i32::from(dx12) * i32::from(y - y1);
        sb = i32::from(dx02) * i32::from(y - y0);
        while y <= y2 {
            let mut a = x1 + (sa / i32::from(dy12)) as i16;
            let mut b = x0 + (sb / i32::from(dy02)) as i16;
            sa += i32::from(dx12);
            sb += i32::from(dx02);
            if a > b {
                swap(&mut a, &mut b);
            }
            self.driver.write_fast_hline(a, y, b - a + 1, color);
            y += 1;
        }

        self.driver.end_write();
    }

    /// Rounded-rectangle outline. `r` is clamped to half the shorter
    /// side.
    pub fn draw_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: u16) {
        let max_radius = w.min(h) / 2;
        let r = r.min(max_radius);

        self.driver.start_write();
        self.driver.write_fast_hline(x + r, y, w - 2 * r, color);
        self.driver.write_fast_hline(x + r, y + h - 1, w - 2 * r, color);
        self.driver.write_fast_vline(x, y + r, h - 2 * r, color);
        self.driver.write_fast_vline(x + w - 1, y + r, h - 2 * r, color);
        self.draw_quarter_circle(x + r, y + r, r, 1, color);
        self.draw_quarter_circle(x + w - r - 1, y + r, r, 2, color);
        self.draw_quarter_circle(x + w - r - 1, y + h - r - 1, r, 4, color);
        self.draw_quarter_circle(x + r, y + h - r - 1, r, 8, color);
        self.driver.end_write();
    }

    /// Solid rounded rectangle. `r` is clamped to half the shorter side.
    pub fn fill_round_rect(&mut self, x: i16, y: i16, w: i16, h: i16, r: i16, color: u16) {
        let max_radius = w.min(h) / 2;
        let r = r.min(max_radius);

        self.driver.start_write();
        self.driver.write_fill_rect(x + r, y, w - 2 * r, h, color);
        self.fill_quarter_circle(x + w - r - 1, y + r, r, 1, h - 2 * r - 1, color);
        self.fill_quarter_circle(x + r, y + r, r, 2, h - 2 * r - 1, color);
        self.driver.end_write();
    }
}
