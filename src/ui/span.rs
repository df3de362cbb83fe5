use crate::ui::style::Style;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }
}

pub type SpanLine = Vec<Span>;

pub fn line_text(line: &SpanLine) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

pub fn line_width(line: &SpanLine) -> usize {
    line.iter().map(Span::width).sum()
}
