use chrono_tz::Tz;

use crate::store::BirthdayStore;

/// Bot state shared across all command handlers and the scheduler
#[derive(Clone)]
pub struct Data {
    /// Durable member-id → birthday mapping
    pub store: BirthdayStore,
    /// Timezone all "today" comparisons are evaluated in
    pub reference_tz: Tz,
}

impl Data {
    /// Create a new Data instance with the given store and reference timezone
    pub fn new(store: BirthdayStore, reference_tz: Tz) -> Self {
        Self {
            store,
            reference_tz,
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
