use crate::core::FieldId;
use crate::core::schedule::{Schedule, TimeSlot};
use crate::core::value::FieldValue;
use crate::input::{Input, InputBase, KeyResult};
use crate::input::validators::Validator;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Day,
    Start,
    End,
}

impl Segment {
    fn next(self) -> Option<Segment> {
        match self {
            Segment::Day => Some(Segment::Start),
            Segment::Start => Some(Segment::End),
            Segment::End => None,
        }
    }

    fn prev(self) -> Option<Segment> {
        match self {
            Segment::Day => None,
            Segment::Start => Some(Segment::Day),
            Segment::End => Some(Segment::Start),
        }
    }
}

/// Weekly availability picker. Edits a list of day/start/end slots segment
/// by segment; the reported value is always the structured schedule, never
/// a flattened string.
pub struct ScheduleInput {
    base: InputBase,
    slots: Vec<TimeSlot>,
    cursor_slot: usize,
    cursor_segment: Segment,
    max_slots: usize,
}

impl ScheduleInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: InputBase::new(label),
            slots: Vec::new(),
            cursor_slot: 0,
            cursor_segment: Segment::Day,
            max_slots: 5,
        }
    }

    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots.max(1);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.base = self.base.with_validator(validator);
        self
    }

    fn add_slot(&mut self) {
        if self.slots.len() >= self.max_slots {
            return;
        }
        let template = self.slots.last().copied().unwrap_or_default();
        self.slots.push(template);
        self.cursor_slot = self.slots.len() - 1;
        self.cursor_segment = Segment::Day;
        self.base.error = None;
    }

    fn remove_slot(&mut self) {
        if self.slots.is_empty() {
            return;
        }
        self.slots.remove(self.cursor_slot);
        if self.cursor_slot >= self.slots.len() && self.cursor_slot > 0 {
            self.cursor_slot -= 1;
        }
        self.cursor_segment = Segment::Day;
        self.base.error = None;
    }

    fn move_cursor(&mut self, direction: isize) {
        if self.slots.is_empty() {
            return;
        }
        if direction > 0 {
            match self.cursor_segment.next() {
                Some(segment) => self.cursor_segment = segment,
                None if self.cursor_slot + 1 < self.slots.len() => {
                    self.cursor_slot += 1;
                    self.cursor_segment = Segment::Day;
                }
                None => {}
            }
        } else {
            match self.cursor_segment.prev() {
                Some(segment) => self.cursor_segment = segment,
                None if self.cursor_slot > 0 => {
                    self.cursor_slot -= 1;
                    self.cursor_segment = Segment::End;
                }
                None => {}
            }
        }
    }

    fn adjust(&mut self, delta: i8) {
        let Some(slot) = self.slots.get_mut(self.cursor_slot) else {
            return;
        };
        match self.cursor_segment {
            Segment::Day => {
                slot.day = if delta >= 0 { slot.day.next() } else { slot.day.prev() };
            }
            Segment::Start => slot.shift_start(delta),
            Segment::End => slot.shift_end(delta),
        }
        self.base.error = None;
    }
}

impl Input for ScheduleInput {
    fn id(&self) -> &FieldId {
        &self.base.id
    }

    fn label(&self) -> &str {
        &self.base.label
    }

    fn value(&self) -> FieldValue {
        FieldValue::Schedule(Schedule::new(self.slots.clone()))
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Schedule(schedule) = value {
            self.slots = schedule.slots;
            self.slots.truncate(self.max_slots);
            self.cursor_slot = 0;
            self.cursor_segment = Segment::Day;
        }
    }

    fn is_focused(&self) -> bool {
        self.base.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.base.focused = focused;
    }

    fn error(&self) -> Option<&str> {
        self.base.error.as_deref()
    }

    fn set_error(&mut self, error: Option<String>) {
        self.base.error = error;
    }

    fn validators(&self) -> &[Validator] {
        &self.base.validators
    }

    fn captures_key(&self, code: KeyCode) -> bool {
        matches!(code, KeyCode::Up | KeyCode::Down) && !self.slots.is_empty()
    }

    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> KeyResult {
        match code {
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.add_slot();
                KeyResult::Handled
            }
            KeyCode::Delete | KeyCode::Char('x') => {
                self.remove_slot();
                KeyResult::Handled
            }
            KeyCode::Left => {
                self.move_cursor(-1);
                KeyResult::Handled
            }
            KeyCode::Right => {
                self.move_cursor(1);
                KeyResult::Handled
            }
            KeyCode::Up => {
                self.adjust(1);
                KeyResult::Handled
            }
            KeyCode::Down => {
                self.adjust(-1);
                KeyResult::Handled
            }
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Vec<SpanLine> {
        if self.slots.is_empty() {
            return vec![vec![Span::styled(
                "no slots yet, press 'a' to add one",
                Style::new().color(Color::DarkGrey),
            )]];
        }

        let focus_style = Style::new().color(Color::Black).background(Color::Cyan);
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| {
                let focused_slot = self.base.focused && i == self.cursor_slot;
                let segment_style = |segment: Segment| {
                    if focused_slot && self.cursor_segment == segment {
                        focus_style
                    } else {
                        Style::new()
                    }
                };
                vec![
                    Span::new(if focused_slot { "› " } else { "  " }),
                    Span::styled(slot.day.short_name(), segment_style(Segment::Day)),
                    Span::new(" "),
                    Span::styled(format!("{:02}:00", slot.start_hour), segment_style(Segment::Start)),
                    Span::new("-"),
                    Span::styled(format!("{:02}:00", slot.end_hour), segment_style(Segment::End)),
                ]
            })
            .collect()
    }

    fn hint(&self) -> Option<&'static str> {
        Some("'a' adds a slot, 'x' removes, arrows edit")
    }
}
