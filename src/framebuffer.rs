//! The in-memory bit-packed image of the full panel, and the drawing primitives
//! that operate on it. Everything here is pure state; nothing touches the bus.

use itertools::iproduct;

use crate::command::consts::*;

/// A monochrome pixel value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Off,
    On,
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

impl From<u8> for Color {
    /// Zero is off, any other value is on.
    fn from(value: u8) -> Self {
        Color::from(value != 0)
    }
}

/// The packed framebuffer for the panel.
///
/// Bytes are laid out page-major, column-minor: the byte at `page * WIDTH + x`
/// holds the 8 vertically-adjacent pixels of column `x` within that page, bit 0
/// topmost. This is exactly the order the controller consumes RAM bytes in, so
/// `as_bytes` can be streamed to it unmodified; reordering it scrambles the image
/// with diagonal tearing across page boundaries.
pub struct Framebuffer {
    buf: [u8; FRAME_BUF_LEN],
}

impl Framebuffer {
    /// An all-off framebuffer. Allocated once; every later operation mutates it in
    /// place.
    pub fn new() -> Self {
        Framebuffer {
            buf: [0; FRAME_BUF_LEN],
        }
    }

    /// Reset every pixel to off.
    pub fn clear(&mut self) {
        for byte in self.buf.iter_mut() {
            *byte = 0;
        }
    }

    /// The packed bytes in controller RAM order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Replace the framebuffer contents with an already-packed byte sequence, e.g.
    /// from an image pipeline that emits this layout directly. Input beyond the
    /// framebuffer length is dropped; short input leaves the tail untouched.
    pub fn load(&mut self, bytes: &[u8]) {
        let n = bytes.len().min(FRAME_BUF_LEN);
        self.buf[..n].copy_from_slice(&bytes[..n]);
    }

    /// Set or clear the pixel at the 1-based coordinates `(x, y)`, with `(1, 1)`
    /// the top left corner of the panel. Coordinates off the panel are silently
    /// ignored, so callers doing batch geometry need not clip first.
    pub fn set_pixel(&mut self, x: i16, y: i16, color: Color) {
        self.plot(x - 1, y - 1, color);
    }

    /// Apply `set_pixel` to each `(x, y, color)` triple. Purely a call-site
    /// convenience; the pixels are independent.
    pub fn set_pixels<I>(&mut self, pixels: I)
    where
        I: IntoIterator<Item = (i16, i16, Color)>,
    {
        for (x, y, color) in pixels {
            self.set_pixel(x, y, color);
        }
    }

    // 0-based plot; the one place the page/bit addressing math lives.
    fn plot(&mut self, x: i16, y: i16, color: Color) {
        if x < 0 || y < 0 || x >= NUM_PIXEL_COLS as i16 || y >= NUM_PIXEL_ROWS as i16 {
            return;
        }
        let page = y / 8;
        let bit = 1u8 << (y - 8 * page);
        let index = page as usize * NUM_PIXEL_COLS as usize + x as usize;
        match color {
            Color::On => self.buf[index] |= bit,
            Color::Off => self.buf[index] &= !bit,
        }
    }

    /// Rasterize a line from `(x0, y0)` to `(x1, y1)`, inclusive, in 0-based
    /// coordinates, lighting every pixel on it. Uses the integer Bresenham error
    /// recurrence, so vertical, horizontal and 45-degree lines come out exact.
    /// Portions of the line off the panel are dropped pixel by pixel.
    pub fn draw_line(&mut self, mut x0: i16, mut y0: i16, x1: i16, y1: i16) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = (y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = if dx > dy { dx } else { -dy } / 2;

        loop {
            self.plot(x0, y0, Color::On);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x0 += sx;
            }
            if e2 < dy {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Blit a flat row-major sequence of pixel values over the panel, top left
    /// pixel first. Coordinates derive purely from the element index, so input
    /// longer than WIDTH*HEIGHT is silently dropped and shorter input leaves the
    /// remaining pixels untouched.
    pub fn draw_bitmap<I, C>(&mut self, pixels: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Color>,
    {
        let coords = iproduct!(0..NUM_PIXEL_ROWS as i16, 0..NUM_PIXEL_COLS as i16);
        for ((y, x), color) in coords.zip(pixels) {
            self.plot(x, y, color.into());
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new()
    }
}
