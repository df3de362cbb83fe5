use crate::ui::span::Span;
use crate::ui::style::{Color, Style};

const FRAMES: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: u8,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len() as u8;
    }

    pub fn glyph(&self) -> char {
        FRAMES[self.frame as usize % FRAMES.len()]
    }

    pub fn span(&self) -> Span {
        Span::styled(self.glyph().to_string(), Style::new().color(Color::Cyan))
    }
}
