/// Schedule management modules
mod birthday_tasks;
mod manager;
mod role_lifecycle;
mod types;

// Re-export public types and functions
pub use birthday_tasks::{run_birthday_cycle, send_announcement};
pub use manager::start_schedule_manager;
pub use role_lifecycle::{ensure_birthday_role, grant_role};
