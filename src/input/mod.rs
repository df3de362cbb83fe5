pub mod input;
pub mod schedule_input;
pub mod select_input;
pub mod subject_select;
pub mod text_input;
pub mod textarea_input;
pub mod validators;

pub use input::{Input, InputBase, KeyResult};
pub use schedule_input::ScheduleInput;
pub use select_input::SelectInput;
pub use subject_select::SubjectSelect;
pub use text_input::TextInput;
pub use textarea_input::TextareaInput;
