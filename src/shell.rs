//! Line-oriented interactive driver.
//!
//! Reads commands from stdin on a dedicated thread and feeds them into the
//! event loop, so user input and fetch completions are processed one at a
//! time on the same thread. After every command the current page is printed.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::app::{PickerApp, PickerMsg};
use crate::model::RecordId;
use crate::render;
use crate::runtime::{EventLoop, LoopEvent};

/// How long to wait for a fetch before rendering a "loading" view anyway.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

pub const HELP: &str = "\
commands:
  page <n>       show page n          next / prev    move one page
  toggle <id>    flip a row           on <id> / off <id>
  all / none     check or uncheck the page header
  first <n>      select the first n records overall
  clear          drop the whole selection
  show           redraw               export         print selected ids
  help           this text            quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Msg(PickerMsg),
    Show,
    Export,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(ShellCommand::Show);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(format!("too many arguments for `{verb}`"));
    }

    let cmd = match (verb.to_ascii_lowercase().as_str(), arg) {
        ("page" | "p", Some(n)) => ShellCommand::Msg(PickerMsg::PageRequested(parse_num(n)?)),
        ("next" | "n", None) => ShellCommand::Msg(PickerMsg::NextPage),
        ("prev" | "b", None) => ShellCommand::Msg(PickerMsg::PrevPage),
        ("toggle" | "t", Some(id)) => ShellCommand::Msg(PickerMsg::RowFlipped(parse_id(id)?)),
        ("on", Some(id)) => ShellCommand::Msg(PickerMsg::RowToggled {
            id: parse_id(id)?,
            selected: true,
        }),
        ("off", Some(id)) => ShellCommand::Msg(PickerMsg::RowToggled {
            id: parse_id(id)?,
            selected: false,
        }),
        ("all", None) => ShellCommand::Msg(PickerMsg::HeaderToggled(true)),
        ("none", None) => ShellCommand::Msg(PickerMsg::HeaderToggled(false)),
        ("first", Some(n)) => ShellCommand::Msg(PickerMsg::TargetSet(parse_num(n)?)),
        ("clear", None) => ShellCommand::Msg(PickerMsg::SelectionCleared),
        ("show", None) => ShellCommand::Show,
        ("export", None) => ShellCommand::Export,
        ("help" | "?", None) => ShellCommand::Help,
        ("quit" | "q" | "exit", None) => ShellCommand::Quit,
        (other, _) => return Err(format!("unknown command `{other}` (try `help`)")),
    };
    Ok(cmd)
}

fn parse_num<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("`{raw}` is not a non-negative number"))
}

fn parse_id(raw: &str) -> Result<RecordId, String> {
    parse_num(raw)
}

/// Spawn the stdin reader feeding `event_loop`.
fn spawn_input_reader(event_loop: &EventLoop) {
    let tx = event_loop.sender();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(LoopEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(LoopEvent::InputClosed);
    });
}

/// Run the interactive shell until `quit` or end of input.
pub fn run(event_loop: &EventLoop, app: &mut PickerApp, json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    spawn_input_reader(event_loop);

    event_loop.dispatch(app, PickerMsg::PageRequested(1));
    let mut pending = event_loop.settle(app, SETTLE_TIMEOUT);
    print_view(&mut stdout.lock(), app, json)?;

    loop {
        let event = match pending.pop_front() {
            Some(event) => event,
            None => match event_loop.next_event() {
                Some(event) => event,
                None => break,
            },
        };

        match event {
            LoopEvent::Msg(msg) => {
                // A completion outside settle(): only redraw if it changed the page.
                let before = app.status();
                event_loop.dispatch(app, msg);
                if app.status() != before {
                    print_view(&mut stdout.lock(), app, json)?;
                }
            }
            LoopEvent::InputClosed => break,
            LoopEvent::Input(line) => {
                debug!(%line, "shell input");
                let mut out = stdout.lock();
                match parse_command(&line) {
                    Err(msg) => {
                        writeln!(out, "error: {msg}")?;
                    }
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Help) => writeln!(out, "{HELP}")?,
                    Ok(ShellCommand::Show) => print_view(&mut out, app, json)?,
                    Ok(ShellCommand::Export) => print_export(&mut out, app, json)?,
                    Ok(ShellCommand::Msg(msg)) => {
                        drop(out);
                        event_loop.dispatch(app, msg);
                        pending.extend(event_loop.settle(app, SETTLE_TIMEOUT));
                        print_view(&mut stdout.lock(), app, json)?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_view(out: &mut impl Write, app: &PickerApp, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(&render::snapshot(app)).context("encoding snapshot")?;
        writeln!(out, "{line}")?;
    } else {
        write!(out, "{}", render::page_text(app))?;
    }
    out.flush()?;
    Ok(())
}

fn print_export(out: &mut impl Write, app: &PickerApp, json: bool) -> Result<()> {
    let ids = app.selection.included_ids();
    if json {
        let payload = serde_json::json!({ "selected": ids, "count": ids.len() });
        writeln!(out, "{payload}")?;
    } else {
        let joined: Vec<String> = ids.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", joined.join(","))?;
    }
    out.flush()?;
    Ok(())
}
