// Command modules
mod birthday;
mod check;
mod list;
mod stats;

// Re-export all commands
pub use birthday::birthday;
pub use check::{check_birthdays, test_birthday};
pub use list::birthday_list;
pub use stats::birthday_stats;
