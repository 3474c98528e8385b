use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::Config;
use crate::error::Result;

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show the effective configuration (file + environment), token masked
pub fn cmd_config_show(config: &Config, as_json: bool) -> Result<()> {
    let endpoint = config.store_endpoint().map(|u| u.to_string());
    let token = config.access_token().map(mask_sensitive_value);

    let json_output = json!({
        "store": {
            "shop": config.store.shop,
            "endpoint": endpoint.as_ref().ok(),
            "api_version": config.store.api_version,
            "metaobject_type": config.store.metaobject_type,
            "access_token": token,
            "timeout_secs": config.store.timeout_secs,
            "connect_timeout_secs": config.store.connect_timeout_secs,
        },
        "server": {
            "host": config.server.host,
            "port": config.server.port,
        },
    });

    let mut text_output = String::new();
    text_output.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text_output.push_str(&format!("{}:\n", "store".cyan()));
    match &config.store.shop {
        Some(shop) => text_output.push_str(&format!("  shop: {shop}\n")),
        None => text_output.push_str(&format!("  shop: {}\n", "not configured".dimmed())),
    }
    match &endpoint {
        Ok(url) => text_output.push_str(&format!("  endpoint: {url}\n")),
        Err(e) => text_output.push_str(&format!("  endpoint: {}\n", e.to_string().red())),
    }
    text_output.push_str(&format!("  api_version: {}\n", config.store.api_version));
    text_output.push_str(&format!(
        "  metaobject_type: {}\n",
        config.store.metaobject_type
    ));
    match &token {
        Some(masked) => text_output.push_str(&format!("  access_token: {}\n", masked.green())),
        None => text_output.push_str(&format!(
            "  access_token: {}\n",
            "not configured".dimmed()
        )),
    }
    text_output.push_str(&format!(
        "  timeouts: {}s total, {}s connect\n",
        config.store.timeout_secs, config.store.connect_timeout_secs
    ));

    text_output.push('\n');
    text_output.push_str(&format!("{}:\n", "server".cyan()));
    text_output.push_str(&format!("  listen: {}", config.server.bind_address()));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(as_json)
}
