use crate::core::submit::SubmitState;
use crate::ui::span::{Span, SpanLine};
use crate::ui::spinner::Spinner;
use crate::ui::style::{Color, Style};

/// Purely presentational banner reflecting the submission state. It owns
/// nothing but the spinner animation frame.
#[derive(Debug, Clone, Default)]
pub struct SubmitOverlay {
    spinner: Spinner,
}

impl SubmitOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    pub fn is_visible(&self, state: &SubmitState) -> bool {
        !matches!(state, SubmitState::Idle)
    }

    pub fn label(&self, state: &SubmitState) -> Option<String> {
        match state {
            SubmitState::Idle => None,
            SubmitState::Submitting => Some("Submitting form...".to_string()),
            SubmitState::Submitted => Some("Submitted!".to_string()),
            SubmitState::Failed(message) => Some(format!("Submission failed: {}", message)),
        }
    }

    pub fn lines(&self, state: &SubmitState) -> Vec<SpanLine> {
        match state {
            SubmitState::Idle => vec![],
            SubmitState::Submitting => vec![vec![
                self.spinner.span(),
                Span::new(" Submitting form..."),
            ]],
            SubmitState::Submitted => vec![vec![
                Span::styled("✔", Style::new().color(Color::Green).bold()),
                Span::new(" Submitted!"),
            ]],
            SubmitState::Failed(message) => vec![
                vec![
                    Span::styled("✖", Style::new().color(Color::Red).bold()),
                    Span::styled(
                        format!(" Submission failed: {}", message),
                        Style::new().color(Color::Red),
                    ),
                ],
                vec![Span::styled(
                    "Press Enter to edit and retry",
                    Style::new().color(Color::DarkGrey),
                )],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SubmitOverlay;
    use crate::core::submit::SubmitState;
    use crate::ui::span::line_text;

    #[test]
    fn label_follows_the_state() {
        let overlay = SubmitOverlay::new();
        assert_eq!(overlay.label(&SubmitState::Idle), None);
        assert_eq!(
            overlay.label(&SubmitState::Submitting).as_deref(),
            Some("Submitting form...")
        );
        assert_eq!(
            overlay.label(&SubmitState::Submitted).as_deref(),
            Some("Submitted!")
        );
    }

    #[test]
    fn failure_lines_carry_the_message_and_retry_hint() {
        let overlay = SubmitOverlay::new();
        let lines = overlay.lines(&SubmitState::Failed("offline".to_string()));
        assert_eq!(lines.len(), 2);
        assert!(line_text(&lines[0]).contains("offline"));
        assert!(line_text(&lines[1]).contains("retry"));
    }

    #[test]
    fn hidden_while_idle() {
        let overlay = SubmitOverlay::new();
        assert!(!overlay.is_visible(&SubmitState::Idle));
        assert!(overlay.is_visible(&SubmitState::Submitting));
    }
}
