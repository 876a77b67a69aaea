use anyhow::{anyhow, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::{
    acquire_location, render_lines, AlertForm, AlertPhase, DispatchApiClient, EnvLocationProvider,
    LocationProvider, NotificationsPanel,
};
use crate::core::config::ClientConfig;
use crate::shared::severity::Severity;

/// Runs a client command when one is named on the command line.
/// Returns `false` when the binary should start the server instead.
pub async fn handle_commands(args: &[String]) -> Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("sos") => {
            run_sos(args.get(2).map(|s| s.as_str())).await?;
            Ok(true)
        }
        Some("watch") => {
            run_watch().await?;
            Ok(true)
        }
        Some("help") | Some("--help") => {
            print_help();
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn print_help() {
    println!("Usage: najm-dispatch [COMMAND]");
    println!();
    println!("With no command the HTTP service is started.");
    println!();
    println!("Commands:");
    println!("  sos [High|Moderate|Low]  Send an SOS alert after confirmation");
    println!("  watch                    Follow the live phone alert feed");
    println!();
    println!("Location for `sos` comes from DISPATCH_LATITUDE / DISPATCH_LONGITUDE");
    println!("(and optionally DISPATCH_ACCURACY).");
}

async fn run_sos(severity: Option<&str>) -> Result<()> {
    let severity = severity
        .map(str::parse::<Severity>)
        .transpose()?
        .unwrap_or_default();
    let config = ClientConfig::from_env().map_err(|e| anyhow!(e))?;
    let client = Arc::new(DispatchApiClient::new(config.api_url.clone())?);

    let provider = EnvLocationProvider;
    let location = acquire_location(
        Some(&provider as &dyn LocationProvider),
        config.geolocation_timeout,
    )
    .await;

    let mut form = AlertForm::new(client, config.reset_delay);
    form.set_location(location);
    form.select_severity(severity);
    form.press_sos();

    println!(
        "Send {} alert from {}? [y/N]",
        form.severity(),
        form.location().address
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();

    if !matches!(answer.trim(), "y" | "Y" | "yes") {
        form.cancel();
        println!("Cancelled");
        return Ok(());
    }

    let mut phase = form.subscribe();
    form.confirm().await;
    println!("Alert sent. Help is on the way.");

    phase.wait_for(|p| *p == AlertPhase::Idle).await?;
    Ok(())
}

async fn run_watch() -> Result<()> {
    let config = ClientConfig::from_env().map_err(|e| anyhow!(e))?;
    let client = Arc::new(DispatchApiClient::new(config.api_url.clone())?);

    tracing::info!("Watching alerts at {}", config.api_url);
    let panel = NotificationsPanel::start(client, config.poll_interval);
    let mut feed = panel.subscribe();

    loop {
        tokio::select! {
            changed = feed.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = feed.borrow_and_update().clone();
                println!("--- Phone Alerts ({}) ---", snapshot.alerts.len());
                for line in render_lines(&snapshot) {
                    println!("{}", line);
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    panel.stop();
    Ok(())
}
