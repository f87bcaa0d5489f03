//! Test fixtures that capture the exact operation stream a drawing call
//! sends through the driver interface.

use std::collections::HashSet;

use crate::driver::DisplayDriver;

/// One recorded driver call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Start,
    End,
    Pixel { x: i16, y: i16, color: u16 },
    VLine { x: i16, y: i16, h: i16, color: u16 },
    HLine { x: i16, y: i16, w: i16, color: u16 },
    Rect { x: i16, y: i16, w: i16, h: i16, color: u16 },
    Line { x0: i16, y0: i16, x1: i16, y1: i16, color: u16 },
    Screen { w: i16, h: i16, color: u16 },
    Rotation(u8),
    Invert(bool),
}

/// Pixel-only driver: every default slot synthesizes down to `draw_pixel`,
/// so the recorded stream is the full software fallback expansion.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub ops: Vec<Op>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixel coordinates in write order.
    pub fn pixels(&self) -> Vec<(i16, i16)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Pixel { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Distinct pixel coordinates.
    pub fn pixel_set(&self) -> HashSet<(i16, i16)> {
        self.pixels().into_iter().collect()
    }

    /// Colors seen at each write, in order.
    pub fn colors(&self) -> Vec<u16> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Pixel { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn bracket_opens(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::Start).count()
    }

    pub fn bracket_closes(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::End).count()
    }

    /// True when every bracket closes after it opens and depth returns
    /// to zero at the end of the stream.
    pub fn brackets_balanced(&self) -> bool {
        let mut depth: i32 = 0;
        for op in &self.ops {
            match op {
                Op::Start => depth += 1,
                Op::End => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                },
                _ => {},
            }
        }
        depth == 0
    }
}

impl DisplayDriver for RecordingDriver {
    fn draw_pixel(&mut self, x: i16, y: i16, color: u16) {
        self.ops.push(Op::Pixel { x, y, color });
    }

    fn start_write(&mut self) {
        self.ops.push(Op::Start);
    }

    fn end_write(&mut self) {
        self.ops.push(Op::End);
    }
}

/// Fully accelerated driver: overrides every optional slot and records it
/// without expanding, so tests can assert the dispatcher delegates to a
/// declared slot instead of synthesizing.
#[derive(Debug, Default)]
pub struct SpanDriver {
    pub ops: Vec<Op>,
}

impl SpanDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayDriver for SpanDriver {
    fn draw_pixel(&mut self, x: i16, y: i16, color: u16) {
        self.ops.push(Op::Pixel { x, y, color });
    }

    fn start_write(&mut self) {
        self.ops.push(Op::Start);
    }

    fn end_write(&mut self) {
        self.ops.push(Op::End);
    }

    fn write_fast_vline(&mut self, x: i16, y: i16, h: i16, color: u16) {
        self.ops.push(Op::VLine { x, y, h, color });
    }

    fn write_fast_hline(&mut self, x: i16, y: i16, w: i16, color: u16) {
        self.ops.push(Op::HLine { x, y, w, color });
    }

    fn write_fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: u16) {
        self.ops.push(Op::Rect { x, y, w, h, color });
    }

    fn write_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, color: u16) {
        self.ops.push(Op::Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn fill_screen(&mut self, width: i16, height: i16, color: u16) {
        self.ops.push(Op::Screen {
            w: width,
            h: height,
            color,
        });
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.ops.push(Op::Rotation(rotation));
    }

    fn invert_display(&mut self, invert: bool) {
        self.ops.push(Op::Invert(invert));
    }
}
