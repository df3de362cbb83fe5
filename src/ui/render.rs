use crate::core::form::Form;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Lays the whole form out as styled lines: title, description, overlay
/// banner, one block per field, submit button and key hints.
pub fn render_form(form: &Form) -> Vec<SpanLine> {
    let mut lines: Vec<SpanLine> = Vec::new();

    if let Some(title) = &form.config().title {
        lines.push(vec![Span::styled(
            title.clone(),
            Style::new().color(Color::Cyan).bold(),
        )]);
    }
    if let Some(description) = &form.config().description {
        lines.push(vec![Span::new(description.clone())]);
    }
    if !lines.is_empty() {
        lines.push(vec![]);
    }

    let overlay_lines = form.overlay().lines(form.submit_state());
    if !overlay_lines.is_empty() {
        lines.extend(overlay_lines);
        lines.push(vec![]);
    }

    for (spec, input) in form.config().fields.iter().zip(form.inputs()) {
        let focused = input.is_focused() && !form.is_locked();
        let marker = if focused { "› " } else { "  " };
        let mut label_style = Style::new();
        if focused {
            label_style = label_style.bold();
        }
        let mut label_line = vec![
            Span::styled(marker, Style::new().color(Color::Cyan)),
            Span::styled(spec.label.clone(), label_style),
        ];
        if spec.required {
            label_line.push(Span::styled(" *", Style::new().color(Color::Red)));
        }
        lines.push(label_line);

        for content_line in input.render_content() {
            let mut indented: SpanLine = vec![Span::new("    ")];
            indented.extend(content_line);
            lines.push(indented);
        }

        if let Some(error) = input.error() {
            lines.push(vec![Span::styled(
                format!("    ! {}", error),
                Style::new().color(Color::Red),
            )]);
        }
    }

    lines.push(vec![]);
    let button_style = if form.is_locked() {
        Style::new().color(Color::DarkGrey)
    } else {
        Style::new().color(Color::Black).background(Color::Cyan)
    };
    lines.push(vec![Span::styled(
        format!("[ {} ]", form.config().submit_label),
        button_style,
    )]);

    if !form.is_locked() {
        let hint = form
            .focused_input()
            .and_then(|input| input.hint())
            .map(|h| format!("{}  •  ", h))
            .unwrap_or_default();
        let submit_key = form
            .focused_input()
            .map(|input| input.submit_key())
            .unwrap_or("Enter");
        lines.push(vec![Span::styled(
            format!("{}Tab to move  •  {} to submit", hint, submit_key),
            Style::new().color(Color::DarkGrey),
        )]);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::render_form;
    use crate::core::field::{FieldKind, FieldSpec, FormConfig};
    use crate::core::form::Form;
    use crate::ui::span::line_text;
    use std::sync::Arc;

    fn sample_form() -> Form {
        let config = FormConfig::new(
            "Request",
            vec![
                FieldSpec::new("Name", FieldKind::text()).required(),
                FieldSpec::new("Email", FieldKind::email()),
            ],
        )
        .with_title("Request a tutor");
        Form::new(config, Arc::new(|_| Ok(()))).expect("valid config")
    }

    fn rendered_text(form: &Form) -> String {
        render_form(form)
            .iter()
            .map(|line| line_text(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_title_fields_and_button_in_order() {
        let form = sample_form();
        let text = rendered_text(&form);

        let title_at = text.find("Request a tutor").expect("title");
        let name_at = text.find("Name").expect("name field");
        let email_at = text.find("Email").expect("email field");
        let button_at = text.find("[ Request ]").expect("submit button");
        assert!(title_at < name_at && name_at < email_at && email_at < button_at);
    }

    #[test]
    fn marks_required_fields() {
        let form = sample_form();
        assert!(rendered_text(&form).contains("Name *"));
    }

    #[test]
    fn submit_hint_follows_the_focused_input() {
        let form = sample_form();
        assert!(rendered_text(&form).contains("Enter to submit"));

        let config = FormConfig::new(
            "Request",
            vec![FieldSpec::new("Message", FieldKind::textarea())],
        );
        let form = Form::new(config, Arc::new(|_| Ok(()))).expect("valid config");
        assert!(rendered_text(&form).contains("Ctrl+Enter to submit"));
    }

    #[test]
    fn overlay_banner_appears_while_submitting() {
        let mut form = sample_form();
        form.set_field_value("Name", "Ada".into());
        form.request_submit();
        assert!(rendered_text(&form).contains("Submitting form..."));
    }
}
