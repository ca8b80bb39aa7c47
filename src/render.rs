use std::{fmt::Write, path::Path};

use thiserror::Error;

use crate::frame::{CellKind, FrameBuffer};

/// Characters from dark to light used by the shaded text output.
pub const ASCII_GRADIENT: &str = " ·∙:;░▒▓█";

/// Glyphs for the plain text output.
pub const GLYPH_OBJECT: char = '.';
pub const GLYPH_LIGHT: char = '*';
pub const GLYPH_LIT: char = '█';
pub const GLYPH_SHADOW: char = '▒';

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cell size must be at least 1x1 pixels")]
    EmptyCell,

    #[error("could not write image: {0}")]
    Image(#[from] image::ImageError),
}

/// How a frame is turned into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextMode {
    /// Objects, the light, lit and shadowed cells as four fixed glyphs.
    Glyph,

    /// Each cell's brightness picked from `ASCII_GRADIENT`.
    Shaded,

    /// Full blocks colored with 24-bit ANSI escapes.
    Ansi,
}

impl std::str::FromStr for TextMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glyph" => Ok(Self::Glyph),
            "shaded" => Ok(Self::Shaded),
            "ansi" => Ok(Self::Ansi),
            other => Err(format!("unknown text mode {:?}", other)),
        }
    }
}

impl FrameBuffer {
    /// Render the frame as text, one line per row.
    pub fn to_text(&self, mode: TextMode) -> String {
        match mode {
            TextMode::Glyph => self.to_glyphs(),
            TextMode::Shaded => self.to_ascii(),
            TextMode::Ansi => self.to_ansi(),
        }
    }

    /// The classic character view: `.` for objects, `*` for the light, a
    /// full block where the light reaches directly and a shade elsewhere.
    pub fn to_glyphs(&self) -> String {
        self.rows_of(|frame, cell| match frame.kind(cell) {
            CellKind::Object(_) => GLYPH_OBJECT,
            CellKind::Light => GLYPH_LIGHT,
            CellKind::Empty if frame.is_lit(cell) => GLYPH_LIT,
            CellKind::Empty => GLYPH_SHADOW,
        })
    }

    /// Map each cell's displayed luminance onto the gradient.
    pub fn to_ascii(&self) -> String {
        let gradient: Vec<char> = ASCII_GRADIENT.chars().collect();
        self.rows_of(|frame, cell| {
            let luminance = frame.display_color(cell).luminance().clamp(0., 1.);
            let index = ((luminance * (gradient.len() - 1) as f64).round() as usize)
                .min(gradient.len() - 1);
            gradient[index]
        })
    }

    /// Full blocks in each cell's display color, as 24-bit ANSI escapes.
    pub fn to_ansi(&self) -> String {
        let mut result = String::with_capacity(self.grid().len() * 20);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let c = self.display_color((x, y));
                // writing into a String cannot fail
                let _ = write!(result, "\x1b[38;2;{};{};{}m{}", c.r, c.g, c.b, GLYPH_LIT);
            }
            result.push_str("\x1b[0m\n");
        }
        result
    }

    /// Paint the frame into an image, each cell a `cell_w` by `cell_h` block.
    pub fn to_image(&self, cell_w: u32, cell_h: u32) -> Result<image::RgbImage, RenderError> {
        if cell_w == 0 || cell_h == 0 {
            return Err(RenderError::EmptyCell);
        }

        let (w, h) = (self.width().max(0) as u32, self.height().max(0) as u32);
        let imgbuf: image::RgbImage =
            image::ImageBuffer::from_fn(w * cell_w, h * cell_h, |px, py| {
                let cell = ((px / cell_w) as i32, (py / cell_h) as i32);
                self.display_color(cell).into()
            });
        Ok(imgbuf)
    }

    /// Render the frame out to a PNG file.
    pub fn save_png<P: AsRef<Path>>(
        &self,
        path: P,
        cell_w: u32,
        cell_h: u32,
    ) -> Result<(), RenderError> {
        let imgbuf = self.to_image(cell_w, cell_h)?;
        imgbuf.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    fn rows_of<F>(&self, mut glyph: F) -> String
    where
        F: FnMut(&FrameBuffer, (i32, i32)) -> char,
    {
        let mut result = String::with_capacity(self.grid().len() * 3 + self.height() as usize);
        for y in 0..self.height() {
            for x in 0..self.width() {
                result.push(glyph(self, (x, y)));
            }
            result.push('\n');
        }
        result
    }
}
