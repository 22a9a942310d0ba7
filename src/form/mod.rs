//! Form model: service categories, field rules and the appointment slot.

pub mod category;
pub mod requirements;
pub mod schedule;

pub use category::ServiceCategory;
pub use requirements::{FieldRequirement, FieldRule, FieldSet};
pub use schedule::{booking_range, ScheduleWindow, DATE_FIELD, TIME_FIELD};
