pub mod fixtures;
pub mod test_logging;

pub use fixtures::{booking_body, task_body};
pub use test_logging::init_test_logging;
