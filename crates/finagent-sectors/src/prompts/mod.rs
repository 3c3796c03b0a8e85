//! Prompt templates for the financial agent
//!
//! Templates use MiniJinja syntax; the only variable is `today`.

mod system;

pub use system::FINANCIAL_AGENT;

use crate::error::Result;
use chrono::{Local, NaiveDate};
use minijinja::{Environment, context};

/// Render the system prompt for a session started on `today`
pub fn system_prompt(today: NaiveDate) -> Result<String> {
    let env = Environment::new();
    let rendered = env.render_str(
        FINANCIAL_AGENT,
        context! { today => today.format("%Y-%m-%d").to_string() },
    )?;
    Ok(rendered)
}

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
