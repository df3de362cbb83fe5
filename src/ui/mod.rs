pub mod render;
pub mod span;
pub mod spinner;
pub mod style;

pub use span::{Span, SpanLine};
pub use spinner::Spinner;
pub use style::{Color, Style};
