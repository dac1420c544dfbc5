pub mod hello;
pub mod schedule;
pub mod users;

pub use schedule::{ScheduleHandler, ScheduleRule};
pub use users::UserHandler;
