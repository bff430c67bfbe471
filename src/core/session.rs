use crate::core::controls::Controls;
use crate::core::dashboard::{Dashboard, Event, Outcome};
use crate::domain::ports::Storage;
use crate::render::text::{ranking_table, summary_table};
use crate::utils::error::{DashError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Commands:
  start <year>   set the first year (1960-2011)
  end <year>     set the last year (1960-2011)
  top <n>        set how many countries to rank (5-20)
  bar            top emitters bar chart
  map            animated emissions map
  summary        dataset overview
  controls       show current settings
  help           this message
  quit           leave the session
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Controls,
    Help,
    Quit,
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    let unknown = || DashError::UnknownCommand {
        input: line.trim().to_string(),
    };

    let command = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("start", Some(v)) => Command::Event(Event::SetStartYear(v.parse().map_err(|_| unknown())?)),
        ("end", Some(v)) => Command::Event(Event::SetEndYear(v.parse().map_err(|_| unknown())?)),
        ("top", Some(v)) => {
            Command::Event(Event::SetCountryCount(v.parse().map_err(|_| unknown())?))
        }
        ("bar", None) => Command::Event(Event::ShowTopEmitters),
        ("map", None) => Command::Event(Event::ShowEmissionsMap),
        ("summary", None) => Command::Event(Event::ShowSummary),
        ("controls", None) => Command::Controls,
        ("help", None) | ("?", None) => Command::Help,
        ("quit", None) | ("exit", None) => Command::Quit,
        _ => return Err(unknown()),
    };

    if parts.next().is_some() {
        return Err(unknown());
    }
    Ok(Some(command))
}

pub fn describe_controls(controls: &Controls) -> String {
    format!(
        "Years {}-{}, top {} countries\n",
        controls.start_year(),
        controls.end_year(),
        controls.country_count()
    )
}

pub fn describe_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::ControlsChanged(controls) => describe_controls(controls),
        Outcome::Summary(summary) => summary_table(summary),
        Outcome::TopEmitters { ranking, written } => {
            let mut out = ranking_table(ranking);
            for location in written {
                out.push_str(&format!("📁 {}\n", location));
            }
            out
        }
        Outcome::EmissionsMap {
            rows,
            frames,
            written,
        } => {
            let mut out = format!("Map built from {} rows, {} yearly frames\n", rows, frames);
            for location in written {
                out.push_str(&format!("📁 {}\n", location));
            }
            out
        }
    }
}

/// Reads commands line by line until `quit` or end of input. A failed
/// command is reported and the session goes on.
pub async fn run_session<S, R, W>(
    dashboard: &mut Dashboard<S>,
    reader: R,
    writer: &mut W,
) -> Result<()>
where
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    writer.write_all(HELP.as_bytes()).await?;

    loop {
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => HELP.to_string(),
            Ok(Some(Command::Controls)) => describe_controls(&dashboard.controls()),
            Ok(Some(Command::Event(event))) => match dashboard.handle(event).await {
                Ok(outcome) => describe_outcome(&outcome),
                Err(e) => {
                    tracing::warn!("Command '{}' failed: {}", line.trim(), e);
                    format!("❌ {}\n💡 {}\n", e.user_friendly_message(), e.recovery_suggestion())
                }
            },
            Err(e) => format!("❌ {}\n💡 {}\n", e, e.recovery_suggestion()),
        };

        writer.write_all(reply.as_bytes()).await?;
    }

    writer.flush().await?;
    Ok(())
}
