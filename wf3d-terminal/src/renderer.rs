/// ASCII downsampler for showing a frame in the terminal
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::{Color, Frame};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Renders a [`Frame`] onto a grid of terminal cells.
///
/// Each cell covers a block of frame pixels and shows the brightest of them,
/// so one-pixel lines survive the downsampling.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Color::BLACK; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Color::BLACK);
    }

    /// Sample `frame` into the cell grid.
    pub fn resample(&mut self, frame: &Frame) {
        self.clear();
        if self.width == 0 || self.height == 0 || frame.width() == 0 || frame.height() == 0 {
            return;
        }

        for (row, pixels) in frame.rows().enumerate() {
            let cy = row * self.height / frame.height();
            for (col, &pixel) in pixels.iter().enumerate() {
                let cx = col * self.width / frame.width();
                let cell = &mut self.cells[cy * self.width + cx];
                if pixel.luminance() > cell.luminance() {
                    *cell = pixel;
                }
            }
        }
    }

    /// Character shown for a cell; any lit cell gets at least the faintest mark.
    pub fn glyph(color: Color) -> char {
        if color == Color::BLACK {
            return LUMINOSITY_RAMP[0];
        }
        let last = LUMINOSITY_RAMP.len() - 1;
        let index = (color.luminance() * last as f32).round() as usize;
        LUMINOSITY_RAMP[index.clamp(1, last)]
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(TermColor::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                }))?;
                writer.queue(Print(Self::glyph(c)))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
