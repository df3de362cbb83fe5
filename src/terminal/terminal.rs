use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::terminal::terminal_event::TerminalEvent;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Color;
use unicode_width::UnicodeWidthChar;
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{Attribute, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Inline terminal wrapper: the form is drawn in place starting at the row
/// the cursor occupied when drawing began, not on an alternate screen.
pub struct Terminal {
    stdout: Stdout,
    size: Size,
    block_start: Option<u16>,
    last_drawn_lines: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout();
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            size: Size { width, height },
            block_start: None,
            last_drawn_lines: 0,
        })
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<TerminalEvent> {
        loop {
            match read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    return Ok(TerminalEvent::Key(map_key_event(key)));
                }
                Event::Resize(width, height) => {
                    self.size = Size { width, height };
                    self.block_start = None;
                    return Ok(TerminalEvent::Resize { width, height });
                }
                _ => continue,
            }
        }
    }

    pub fn draw(&mut self, lines: &[SpanLine]) -> io::Result<()> {
        let start = match self.block_start {
            Some(row) => row,
            None => {
                let (_, row) = cursor::position()?;
                self.block_start = Some(row);
                row
            }
        };

        queue!(self.stdout, cursor::MoveTo(0, start))?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let max_width = self.size.width as usize;
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                queue!(self.stdout, crossterm::style::Print("\r\n"))?;
            }
            let line = truncate_line(line, max_width);
            self.queue_line(&line)?;
        }

        self.last_drawn_lines = lines.len() as u16;
        self.stdout.flush()
    }

    pub fn move_below_block(&mut self) -> io::Result<()> {
        if let Some(start) = self.block_start {
            let row = start.saturating_add(self.last_drawn_lines);
            execute!(self.stdout, cursor::MoveTo(0, row.min(self.size.height.saturating_sub(1))))?;
        }
        Ok(())
    }

    fn queue_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let styled = span.style.color.is_some() || span.style.background.is_some() || span.style.bold;

            if let Some(fg) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }

            queue!(self.stdout, crossterm::style::Print(&span.text))?;

            if styled {
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                queue!(self.stdout, ResetColor)?;
            }
        }
        Ok(())
    }
}

fn truncate_line(line: &SpanLine, max_width: usize) -> SpanLine {
    let mut out: SpanLine = Vec::new();
    let mut used = 0;
    for span in line {
        if used + span.width() <= max_width {
            used += span.width();
            out.push(span.clone());
            continue;
        }
        let mut text = String::new();
        for ch in span.text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used + ch_width > max_width {
                break;
            }
            used += ch_width;
            text.push(ch);
        }
        if !text.is_empty() {
            out.push(Span::styled(text, span.style));
        }
        break;
    }
    out
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped = mapped | KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped = mapped | KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped = mapped | KeyModifiers::ALT;
    }
    mapped
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Reset => crossterm::style::Color::Reset,
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}
