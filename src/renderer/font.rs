//! Tiny 3x5 digit font for the ball counter

use super::frame::FrameBuffer;

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;
/// Horizontal advance per character (glyph + 1 px gap)
pub const ADVANCE: i32 = GLYPH_WIDTH + 1;

/// Rows of each digit, 3 bits per row, MSB = leftmost column
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Draw one digit with its top-left corner at (x, y)
pub fn draw_digit(fb: &mut FrameBuffer, x: i32, y: i32, digit: u8) {
    let Some(rows) = DIGITS.get(digit as usize) else {
        return;
    };
    for (dy, bits) in rows.iter().enumerate() {
        for dx in 0..GLYPH_WIDTH {
            if bits & (0b100 >> dx) != 0 {
                fb.set_pixel(x + dx, y + dy as i32, true);
            }
        }
    }
}

/// Draw `value` right-aligned in a field of at least `min_width` characters
/// (like `%3d`); returns the field width in pixels
pub fn draw_number(fb: &mut FrameBuffer, x: i32, y: i32, value: usize, min_width: usize) -> i32 {
    let mut digits = [0u8; 20];
    let mut len = 0;
    let mut v = value;
    loop {
        digits[len] = (v % 10) as u8;
        len += 1;
        v /= 10;
        if v == 0 {
            break;
        }
    }

    let field = len.max(min_width);
    let mut cx = x + (field - len) as i32 * ADVANCE;
    for &d in digits[..len].iter().rev() {
        draw_digit(fb, cx, y, d);
        cx += ADVANCE;
    }
    field as i32 * ADVANCE
}
