use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }

    pub fn next(self) -> Weekday {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Weekday {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One recurring weekly availability window, whole hours only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeSlot {
    pub fn new(day: Weekday, start_hour: u8, end_hour: u8) -> Self {
        let start_hour = start_hour.min(22);
        let end_hour = end_hour.clamp(start_hour + 1, 23);
        Self {
            day,
            start_hour,
            end_hour,
        }
    }

    pub fn shift_start(&mut self, delta: i8) {
        let start = (self.start_hour as i16 + delta as i16).clamp(0, 22) as u8;
        self.start_hour = start;
        if self.end_hour <= self.start_hour {
            self.end_hour = self.start_hour + 1;
        }
    }

    pub fn shift_end(&mut self, delta: i8) {
        let end = (self.end_hour as i16 + delta as i16).clamp(1, 23) as u8;
        self.end_hour = end.max(self.start_hour + 1);
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {:02}:00-{:02}:00",
            self.day.short_name(),
            self.start_hour,
            self.end_hour
        )
    }
}

impl Default for TimeSlot {
    fn default() -> Self {
        Self::new(Weekday::Monday, 15, 17)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub slots: Vec<TimeSlot>,
}

impl Schedule {
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn summary(&self) -> String {
        self.slots
            .iter()
            .map(TimeSlot::summary)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::{Schedule, TimeSlot, Weekday};

    #[test]
    fn weekday_cycles_through_the_whole_week() {
        let mut day = Weekday::Monday;
        for _ in 0..7 {
            day = day.next();
        }
        assert_eq!(day, Weekday::Monday);
        assert_eq!(Weekday::Monday.prev(), Weekday::Sunday);
    }

    #[test]
    fn slot_end_stays_after_start() {
        let mut slot = TimeSlot::new(Weekday::Friday, 16, 17);
        slot.shift_start(3);
        assert_eq!(slot.start_hour, 19);
        assert!(slot.end_hour > slot.start_hour);

        slot.shift_end(-10);
        assert_eq!(slot.end_hour, slot.start_hour + 1);
    }

    #[test]
    fn extreme_shifts_clamp_to_the_hour_range() {
        let mut slot = TimeSlot::new(Weekday::Friday, 20, 22);
        slot.shift_start(i8::MAX);
        assert_eq!(slot.start_hour, 22);
        assert_eq!(slot.end_hour, 23);

        slot.shift_end(i8::MIN);
        assert_eq!(slot.end_hour, 23);

        slot.shift_start(i8::MIN);
        assert_eq!(slot.start_hour, 0);
    }

    #[test]
    fn summary_lists_slots_in_order() {
        let schedule = Schedule::new(vec![
            TimeSlot::new(Weekday::Monday, 15, 17),
            TimeSlot::new(Weekday::Thursday, 9, 11),
        ]);
        assert_eq!(schedule.summary(), "Mon 15:00-17:00, Thu 09:00-11:00");
    }
}
