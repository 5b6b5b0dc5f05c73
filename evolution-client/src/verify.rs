//! Health, connection state and test message, run in order.

use evolution_common::{is_valid_number, normalize_number, ConnectionStatus, GatewayResponse};

use crate::client::EvolutionClient;
use crate::config::DefaultsConfig;
use crate::error::Result;

/// Run health -> connectionState -> sendText against the configured targets,
/// printing each outcome.
///
/// Steps without a configured target are skipped. Returns `false` if any step
/// that ran failed.
pub async fn run(client: &EvolutionClient, defaults: &DefaultsConfig) -> bool {
    let mut ok = report("health", client.health().await);

    let Some(instance) = defaults.instance.as_deref() else {
        tracing::warn!("No instance configured, skipping connection state and sendText");
        return ok;
    };

    let state = client.connection_state(instance).await;
    if let Ok(response) = &state {
        tracing::info!(
            "Instance {} is {}",
            instance,
            ConnectionStatus::from_body(&response.data)
        );
    }
    ok &= report("connectionState", state);

    match defaults.number.as_deref() {
        None => tracing::warn!("No recipient number configured, skipping sendText"),
        Some(raw) => match recipient(raw, defaults.country_code.as_deref()) {
            Some(number) => {
                let sent = client.send_text(instance, &number, &defaults.text).await;
                ok &= report("sendText", sent);
            }
            None => {
                tracing::error!(
                    "Invalid recipient number {:?} (use digits with country code)",
                    raw
                );
                eprintln!("sendText failed: invalid recipient number {:?}", raw);
                ok = false;
            }
        },
    }

    ok
}

/// Normalized recipient, or `None` if it is not a number the gateway accepts.
pub fn recipient(raw: &str, country_code: Option<&str>) -> Option<String> {
    normalize_number(raw, country_code).filter(|number| is_valid_number(number))
}

/// Print a step's outcome. Returns whether the step succeeded.
fn report(step: &str, result: Result<GatewayResponse>) -> bool {
    match result {
        Ok(response) => {
            println!("{}: {}", step, pretty(&response));
            true
        }
        Err(e) => {
            if let Some(response) = e.response() {
                println!("{}: {}", step, pretty(response));
            }
            eprintln!("{} failed: {}", step, e);
            false
        }
    }
}

fn pretty(response: &GatewayResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| format!("{:?}", response))
}
