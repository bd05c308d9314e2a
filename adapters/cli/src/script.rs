use std::{str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context, Result};
use gift_hunt_session::Session;
use gift_hunt_system_confirmation::{Control, Resolution};
use gift_hunt_system_picker::Viewport;
use glam::Vec2;

use crate::{presenter::LoggingPresenter, room};

/// Single line of a pointer script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ScriptCommand {
    /// Pointer click at viewport coordinates.
    Click { x: f32, y: f32 },
    /// Activates the accept control of the open prompt.
    Accept,
    /// Activates the decline control of the open prompt.
    Decline,
    /// Clicks outside any control, closing whatever overlay is open.
    Dismiss,
    /// Resizes the viewport.
    Resize { width: f32, height: f32 },
    /// Lets time pass on the outcome timeline.
    Wait(Duration),
    /// Completes loading of the room model.
    LoadRoom,
    /// Completes loading of the gift model.
    LoadGift,
}

impl FromStr for ScriptCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let command = match verb {
            "click" => Self::Click {
                x: number(words.next(), "x")?,
                y: number(words.next(), "y")?,
            },
            "accept" => Self::Accept,
            "decline" => Self::Decline,
            "dismiss" => Self::Dismiss,
            "resize" => Self::Resize {
                width: number(words.next(), "width")?,
                height: number(words.next(), "height")?,
            },
            "wait" => Self::Wait(Duration::from_millis(number(words.next(), "milliseconds")?)),
            "load" => match words.next() {
                Some("room") => Self::LoadRoom,
                Some("gift") => Self::LoadGift,
                Some(other) => bail!("unknown asset `{other}`; expected `room` or `gift`"),
                None => bail!("missing asset; expected `room` or `gift`"),
            },
            other => bail!("unknown command `{other}`"),
        };
        if let Some(extra) = words.next() {
            bail!("unexpected argument `{extra}` after `{verb}`");
        }
        Ok(command)
    }
}

fn number<T>(word: Option<&str>, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let word = word.ok_or_else(|| anyhow!("missing {name}"))?;
    word.parse()
        .with_context(|| format!("invalid {name} `{word}`"))
}

/// Parses a script, skipping blank lines and `#` comments.
pub(crate) fn parse(source: &str) -> Result<Vec<ScriptCommand>> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| {
            line.parse::<ScriptCommand>()
                .with_context(|| format!("script line {line_number}: `{line}`"))
        })
        .collect()
}

/// Feeds one command into the session.
pub(crate) fn execute(
    session: &mut Session,
    presenter: &mut LoggingPresenter,
    command: ScriptCommand,
) {
    match command {
        ScriptCommand::Click { x, y } => {
            let resolution = session.click(Vec2::new(x, y), presenter);
            report(&format!("click ({x}, {y})"), resolution);
        }
        ScriptCommand::Accept => activate(session, presenter, Control::Accept, "accept"),
        ScriptCommand::Decline => activate(session, presenter, Control::Decline, "decline"),
        ScriptCommand::Dismiss => activate(session, presenter, Control::Background, "dismiss"),
        ScriptCommand::Resize { width, height } => {
            presenter.resize((width, height));
            session.resize(Viewport::new(width, height), presenter);
        }
        ScriptCommand::Wait(duration) => session.advance(duration, presenter),
        ScriptCommand::LoadRoom => session.room_loaded(room::scene()),
        ScriptCommand::LoadGift => session.gift_loaded(presenter),
    }
}

fn activate(
    session: &mut Session,
    presenter: &mut LoggingPresenter,
    control: Control,
    label: &str,
) {
    let resolution = session.activate(control, presenter);
    report(label, resolution);
}

fn report(input: &str, resolution: Resolution) {
    match resolution {
        Resolution::Ignored => log::debug!("{input}: no effect"),
        other => log::info!("{input}: {other:?}"),
    }
}
