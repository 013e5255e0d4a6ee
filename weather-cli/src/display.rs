//! Human-friendly rendering of candidates and weather readings.

use std::io::{BufRead, Write};

use weather_core::{LocationCandidate, WeatherSnapshot};

use crate::prompt::{PromptError, Prompter};

/// Let the user pick one of `candidates` by its 0-based index.
///
/// Returns `None` without prompting when there is nothing to choose from.
pub fn select_location<'a, R, W>(
    prompter: &mut Prompter<R, W>,
    candidates: &'a [LocationCandidate],
) -> Result<Option<&'a LocationCandidate>, PromptError>
where
    R: BufRead,
    W: Write,
{
    if candidates.is_empty() {
        prompter.say("No results matching this search were found please try again.")?;
        return Ok(None);
    }

    loop {
        prompter.say("Confirm the location to check weather")?;
        for (idx, candidate) in candidates.iter().enumerate() {
            prompter.say(candidate_line(idx, candidate))?;
        }

        let selected = prompter.read_index()?;
        match usize::try_from(selected).ok().and_then(|idx| candidates.get(idx)) {
            Some(candidate) => return Ok(Some(candidate)),
            None => prompter.say("Invalid value - please select one of the values displayed")?,
        }
    }
}

fn candidate_line(idx: usize, candidate: &LocationCandidate) -> String {
    format!("{idx}. {} - {}", candidate.name, candidate.country_name())
}

pub fn format_snapshot(location_name: &str, snapshot: &WeatherSnapshot) -> String {
    format!(
        "The Current Weather in {location_name} \nTemperature: {}°C\nWindspeed: {}km/h\nWinddirection: {}°\n",
        snapshot.temperature, snapshot.windspeed, snapshot.winddirection,
    )
}
