use std::{
    io::{self, BufRead, BufReader, Write},
    time::Duration,
};

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use weather_core::{
    ClientConfig, LocationCandidate, OpenMeteoProvider, WeatherProvider,
    config::{DEFAULT_FORECAST_BASE_URL, DEFAULT_GEOCODING_BASE_URL},
};

use crate::{
    display::select_location,
    live::TerminalWriter,
    prompt::Prompter,
    session::{DEFAULT_POLL_INTERVAL, run_once, run_polling},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Look up the current weather for a place")]
pub struct Cli {
    /// Place to search for. Prompted for when omitted.
    pub location: Option<String>,

    /// Base URL of the geocoding API.
    #[arg(long, default_value = DEFAULT_GEOCODING_BASE_URL)]
    pub geocoding_url: String,

    /// Base URL of the forecast API.
    #[arg(long, default_value = DEFAULT_FORECAST_BASE_URL)]
    pub forecast_url: String,

    /// Seconds between live updates.
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Log filter used when `RUST_LOG` is not set. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let provider =
            OpenMeteoProvider::new(ClientConfig::new(self.geocoding_url, self.forecast_url));
        // Prompts block the runtime thread on stdin. Nothing else runs until live
        // updates start, so there is no task to starve.
        let mut prompter = Prompter::new(BufReader::new(io::stdin()), io::stdout());

        let Some(selected) = resolve_location(&provider, &mut prompter, self.location).await? else {
            return Ok(());
        };

        if !ask_live_updates(&mut prompter)? {
            return run_once(&provider, &selected, &mut io::stdout()).await;
        }

        let cancel = CancellationToken::new();
        let listener = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    debug!("interrupt received");
                    cancel.cancel();
                }
            }
        });

        info!(location = %selected.name, interval = self.interval, "starting live updates");
        let mut output = TerminalWriter::new(io::stdout());
        let result = run_polling(
            &provider,
            &selected,
            &mut output,
            Duration::from_secs(self.interval),
            &cancel,
        )
        .await;

        listener.abort();
        result
    }
}

/// Collect a query, search it and let the user pick a match.
///
/// `Ok(None)` means the search matched nothing; that is a normal exit.
async fn resolve_location<R, W>(
    provider: &dyn WeatherProvider,
    prompter: &mut Prompter<R, W>,
    location: Option<String>,
) -> anyhow::Result<Option<LocationCandidate>>
where
    R: BufRead,
    W: Write,
{
    prompter.say("Welcome to the Weather Checker...")?;

    let query = match location {
        Some(location) => location,
        None => {
            prompter.ask("Enter a location: ")?;
            prompter.read_line()?
        }
    };
    prompter.say(format!("The selected location is {query}"))?;

    let candidates = provider.search_locations(&query).await?;
    Ok(select_location(prompter, &candidates)?.cloned())
}

fn ask_live_updates<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> anyhow::Result<bool> {
    prompter.ask("Would you like to receive live updates? - enter y/n: ")?;
    Ok(prompter.read_yes_no()?)
}
