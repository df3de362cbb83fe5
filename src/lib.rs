pub mod core;
pub mod input;
pub mod terminal;
pub mod ui;

pub use self::core::FieldId;
pub use self::core::field::{ConfigError, FieldKind, FieldSpec, FormConfig, InputType};
pub use self::core::form::{Form, build_input};
pub use self::core::form_event::FormEvent;
pub use self::core::overlay::SubmitOverlay;
pub use self::core::schedule::{Schedule, TimeSlot, Weekday};
pub use self::core::submit::{SubmitHandler, SubmitState};
pub use self::core::value::{FieldValue, FormValues};

pub use input::{Input, ScheduleInput, SelectInput, SubjectSelect, TextInput, TextareaInput};
pub use input::validators;

pub use ui::render::render_form;
