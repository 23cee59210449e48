//! Monochrome frame buffer in SSD1306 page layout
//!
//! Each byte holds 8 vertically stacked pixels; a page is one byte row of
//! `width` bytes. Bit 0 is the top pixel of the page.

/// Fixed-size 1-bit pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let pages = height.div_ceil(8);
        Self {
            width,
            height,
            bytes: vec![0; (pages * width) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw page-ordered bytes, ready for the display bus
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        let index = (y / 8) * self.width + x;
        Some((index as usize, 1 << (y % 8)))
    }

    /// Set one pixel; writes outside the panel are dropped
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = self.locate(x, y) {
            if on {
                self.bytes[index] |= mask;
            } else {
                self.bytes[index] &= !mask;
            }
        }
    }

    /// Read one pixel; outside the panel reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(index, mask)| self.bytes[index] & mask != 0)
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }
}
