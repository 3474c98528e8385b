use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::error::{LostFoundError, Result};
use crate::server::{AppState, serve};
use crate::workflow::StatusWorkflow;

/// Run the HTTP service until ctrl-c
pub async fn cmd_serve(config: &Config) -> Result<()> {
    let workflow = StatusWorkflow::from_config(config)?;
    info!(
        endpoint = %config.store_endpoint()?,
        metaobject_type = %config.store.metaobject_type,
        "Store configured"
    );

    let bind = config.server.bind_address();
    let listener = TcpListener::bind(&bind)
        .await
        .map_err(|e| LostFoundError::Config(format!("failed to bind {bind}: {e}")))?;

    serve(listener, AppState::new(workflow)).await
}
