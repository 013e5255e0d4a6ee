//! One-shot and live weather display for a chosen location.

use std::{io::Write, time::Duration};

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use weather_core::{LocationCandidate, WeatherProvider};

use crate::{display::format_snapshot, live::LiveOutput};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Query the current weather once and print it.
pub async fn run_once<W: Write>(
    provider: &dyn WeatherProvider,
    candidate: &LocationCandidate,
    out: &mut W,
) -> anyhow::Result<()> {
    let snapshot = provider.current_weather(candidate.coordinates()).await?;
    writeln!(out, "{}", format_snapshot(&candidate.name, &snapshot))
        .context("Failed to write weather output")?;
    Ok(())
}

/// Refresh the weather for `candidate` every `interval` until `cancel` fires.
///
/// The first failed query ends the loop with that error. `output` is stopped on
/// every exit path.
pub async fn run_polling(
    provider: &dyn WeatherProvider,
    candidate: &LocationCandidate,
    output: &mut dyn LiveOutput,
    interval: Duration,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let result = poll(provider, candidate, output, interval, cancel).await;
    let stopped = output.stop().context("Failed to stop live output");
    result.and(stopped)
}

async fn poll(
    provider: &dyn WeatherProvider,
    candidate: &LocationCandidate,
    output: &mut dyn LiveOutput,
    interval: Duration,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let coords = candidate.coordinates();
    let mut cycle: u64 = 0;

    loop {
        cycle += 1;
        debug!(cycle, location = %candidate.name, "polling current weather");

        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            res = provider.current_weather(coords) => res?,
        };

        debug!(
            cycle,
            condition = %snapshot.condition(),
            time = %snapshot.time,
            "received current weather"
        );

        output
            .write_snapshot(&format_snapshot(&candidate.name, &snapshot))
            .context("Failed to write live weather output")?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!(cycles = cycle, "live updates cancelled");
    Ok(())
}
