/// Name of the role granted to members on their birthday
pub const BIRTHDAY_ROLE_NAME: &str = "Happy Birthday";

/// Colour of the birthday role (Discord gold)
pub const BIRTHDAY_ROLE_COLOUR: u32 = 0x00F1_C40F;

/// Default cron expression for the daily birthday check (09:00 in the reference timezone)
pub const DEFAULT_BIRTHDAY_CRON: &str = "0 0 9 * * *";

/// Default reference timezone for all date matching
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default path of the birthday store file
pub const DEFAULT_STORE_PATH: &str = "birthdays.json";

/// Message length limit used when paginating the birthday list
pub const MESSAGE_SPLIT_LIMIT: usize = 2000;

/// Announcement templates; each contains a single `{member}` placeholder
pub const BIRTHDAY_MESSAGES: &[&str] = &[
    "Happy Birthday, {member}! 🎉🎂",
    "It's {member}'s special day! Happy Birthday! 🥳🎈",
    "Wishing you a wonderful birthday, {member}! 🎊🍰",
    "Happy Birthday to {member}! 🎁😄",
];

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "birthdaybot_rs=info";
