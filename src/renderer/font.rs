use super::RenderConfig;

/// Status bar layout constants.
pub(crate) const FONT_WIDTH: usize = 5;
pub(crate) const FONT_HEIGHT: usize = 7;
pub(crate) const STATUS_PAD_TOP: usize = 3;
pub(crate) const STATUS_PAD_BOTTOM: usize = 2;
pub(crate) const STATUS_BAR_HEIGHT: usize = STATUS_PAD_TOP + FONT_HEIGHT + STATUS_PAD_BOTTOM;

/// 5x7 bitmap glyphs for the status line. Each row is a u8 with lower 5 bits = pixels (bit4=left).
pub(crate) const fn glyph(ch: u8) -> [u8; FONT_HEIGHT] {
    match ch {
        b' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00],
        b'-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        b'0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        b'1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        b'2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        b'3' => [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E],
        b'4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        b'5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        b'6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        b'7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        b'8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        b'9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        b'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        b'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        b'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        b'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        b'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        b's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        b't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        b'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        b'x' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        b'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        b'z' => [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
        _ => [0x00; FONT_HEIGHT],
    }
}

pub(crate) fn draw_char(buf: &mut [u8], frame_width: usize, x: usize, y: usize, ch: u8, color: [u8; 3]) {
    let g = glyph(ch);
    for (row, bits) in g.iter().enumerate() {
        for col in 0..FONT_WIDTH {
            if bits & (1 << (FONT_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let px = x + col;
            if px >= frame_width {
                continue;
            }
            let offset = ((y + row) * frame_width + px) * 4;
            if offset + 3 < buf.len() {
                buf[offset] = color[0];
                buf[offset + 1] = color[1];
                buf[offset + 2] = color[2];
                buf[offset + 3] = 255;
            }
        }
    }
}

/// Pixel width of `text` when drawn with `draw_text`.
pub(crate) fn text_width(text: &str) -> usize {
    text.len() * (FONT_WIDTH + 1)
}

/// Draw a string of text at (x, y), clipped to the frame width.
/// Returns the x position after the last character drawn.
pub(crate) fn draw_text(buf: &mut [u8], frame_width: usize, x: usize, y: usize, text: &str, color: [u8; 3]) -> usize {
    let char_step = FONT_WIDTH + 1;
    let mut cx = x;
    for &ch in text.as_bytes() {
        if cx + FONT_WIDTH > frame_width {
            break;
        }
        draw_char(buf, frame_width, cx, y, ch, color);
        cx += char_step;
    }
    cx
}

/// Draw the status bar under the display area: `left` flush left, `right` flush right.
pub fn render_status(buf: &mut [u8], cfg: &RenderConfig, left: &str, right: &str) {
    let fw = cfg.frame_width;
    let y_start = cfg.display_height;

    // Fill status bar background (#0D0D0D)
    for y in y_start..cfg.frame_height {
        for x in 0..fw {
            let offset = (y * fw + x) * 4;
            if offset + 3 < buf.len() {
                buf[offset] = 0x0D;
                buf[offset + 1] = 0x0D;
                buf[offset + 2] = 0x0D;
                buf[offset + 3] = 255;
            }
        }
    }

    // Separator line (#333333)
    for x in 0..fw {
        let offset = (y_start * fw + x) * 4;
        if offset + 3 < buf.len() {
            buf[offset] = 0x33;
            buf[offset + 1] = 0x33;
            buf[offset + 2] = 0x33;
            buf[offset + 3] = 255;
        }
    }

    let text_y = y_start + STATUS_PAD_TOP;
    let left_end = draw_text(buf, fw, 4, text_y, left, [0x88, 0x88, 0x88]);

    // Right-hand label only if it fits without overlapping the left text
    let rw = text_width(right);
    if !right.is_empty() && fw >= rw + 4 && fw - rw - 4 >= left_end {
        draw_text(buf, fw, fw - rw - 4, text_y, right, [0xE0, 0xAF, 0x68]);
    }
}
