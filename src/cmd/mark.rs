use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::Config;
use crate::error::{LostFoundError, Result};
use crate::outcome::Outcome;
use crate::types::Handle;
use crate::workflow::StatusWorkflow;

/// Mark a pet lost from the command line
pub async fn cmd_mark_lost(
    config: &Config,
    handle: &str,
    location: Option<String>,
    as_json: bool,
) -> Result<()> {
    let handle: Handle = handle.parse()?;
    let workflow = StatusWorkflow::from_config(config)?;
    let outcome = workflow.mark_lost(&handle, location).await;
    report(outcome, as_json)
}

/// Mark a pet found from the command line
pub async fn cmd_mark_found(config: &Config, handle: &str, as_json: bool) -> Result<()> {
    let handle: Handle = handle.parse()?;
    let workflow = StatusWorkflow::from_config(config)?;
    let outcome = workflow.mark_found(&handle).await;
    report(outcome, as_json)
}

/// Print a successful outcome; turn anything else back into an error so the
/// process exits non-zero.
fn report(outcome: Outcome, as_json: bool) -> Result<()> {
    match outcome {
        Outcome::Success {
            handle,
            reference,
            status,
        } => {
            let json = json!({
                "handle": handle,
                "reference": reference,
                "status": status,
                "success": true,
            });
            let text = format!(
                "Pet {} marked as {} ({})",
                handle.cyan(),
                status.to_string().green().bold(),
                reference.to_string().dimmed()
            );
            CommandOutput::new(json).with_text(text).print(as_json)
        }
        Outcome::NotFound { handle } => Err(LostFoundError::HandleNotFound(handle)),
        Outcome::ValidationRejected(errors) => Err(LostFoundError::ValidationRejected(errors)),
        Outcome::TransportFailure(detail) => Err(LostFoundError::Api(detail)),
    }
}
