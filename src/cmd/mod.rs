//! Command implementations for the `lostfound` binary.

mod config;
mod mark;
mod serve;

pub use config::cmd_config_show;
pub use mark::{cmd_mark_found, cmd_mark_lost};
pub use serve::cmd_serve;

use serde_json::Value;

use crate::error::Result;

/// Output of a one-shot command, printable as text or JSON
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, as_json: bool) -> Result<()> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
            return Ok(());
        }
        match self.text {
            Some(text) => println!("{text}"),
            None => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}
