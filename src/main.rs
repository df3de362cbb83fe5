use formline::terminal::{KeyCode, Terminal, TerminalEvent};
use formline::{FieldKind, FieldSpec, Form, FormConfig, SubmitHandler, SubmitState, render_form};
use std::io;
use std::sync::Arc;
use std::time::Duration;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;
    terminal.hide_cursor()?;

    let result = event_loop(&mut terminal);

    terminal.move_below_block()?;
    terminal.show_cursor()?;
    terminal.exit_raw_mode()?;
    println!();

    result
}

fn signup_form() -> FormConfig {
    FormConfig::new(
        "Request a tutor",
        vec![
            FieldSpec::new("Name", FieldKind::text()).required(),
            FieldSpec::new("Email", FieldKind::email())
                .required()
                .with_placeholder("you@example.com"),
            FieldSpec::new("Phone", FieldKind::phone()),
            FieldSpec::new(
                "Grade",
                FieldKind::select(vec![
                    "9".to_string(),
                    "10".to_string(),
                    "11".to_string(),
                    "12".to_string(),
                ]),
            ),
            FieldSpec::new(
                "Subjects",
                FieldKind::subject_select(vec![
                    "Math".to_string(),
                    "Physics".to_string(),
                    "Chemistry".to_string(),
                    "English".to_string(),
                ]),
            )
            .required(),
            FieldSpec::new("Availability", FieldKind::schedule_input()),
            FieldSpec::new("Message", FieldKind::textarea())
                .with_placeholder("Anything your tutor should know"),
        ],
    )
    .with_title("Free tutoring signup")
    .with_description("Tell us who you are and when you are available.")
}

fn submit_handler() -> SubmitHandler {
    Arc::new(|values| {
        // simulated transport latency so the overlay is visible
        std::thread::sleep(Duration::from_millis(800));
        let json = serde_json::to_string_pretty(&values).map_err(|e| e.to_string())?;
        std::fs::write("submission.json", json).map_err(|e| e.to_string())?;
        Ok(())
    })
}

fn event_loop(terminal: &mut Terminal) -> io::Result<()> {
    let mut form = Form::new(signup_form(), submit_handler())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut render_requested = true;

    loop {
        if terminal.poll(Duration::from_millis(100))? {
            match terminal.read_event()? {
                TerminalEvent::Key(key) => {
                    if key.code == KeyCode::Esc
                        && matches!(
                            form.submit_state(),
                            SubmitState::Idle | SubmitState::Submitted
                        )
                    {
                        break;
                    }
                    form.handle_key(key);
                    render_requested = true;
                }
                TerminalEvent::Resize { .. } => {
                    render_requested = true;
                }
            }
        }

        if !form.tick().is_empty() {
            render_requested = true;
        }
        if form.submit_state() == &SubmitState::Submitting {
            render_requested = true;
        }

        if render_requested {
            terminal.draw(&render_form(&form))?;
            render_requested = false;
        }
    }

    Ok(())
}
