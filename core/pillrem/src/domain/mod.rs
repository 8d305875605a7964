//! ドメイン型（Newtype、enum、ルール）

pub mod action;
pub mod clock_time;
pub mod dates;
pub mod entry;
pub mod month;
pub mod record;
pub mod settings;
pub mod status;
pub mod time_of_day;

pub use action::ActionId;
pub use clock_time::ClockTime;
pub use entry::{DayEntries, EntryBook, MedicineEntry};
pub use month::MonthCursor;
pub use record::{RecordBook, RecordEntry, RecordSource};
pub use settings::{SettingKey, Settings};
pub use status::IntakeStatus;
pub use time_of_day::TimeOfDay;
