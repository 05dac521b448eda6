//! Operator commands read from stdin.

use kickstream_common::KickstreamError;

pub const HELP: &str = "\
commands:
  like <name>          simulate a like (test mode)
  rose <name> [count]  simulate a rose gift (test mode)
  perfume [name]       simulate a perfume gift (test mode)
  kick                 run one combo action now
  squad                spawn the squad now
  status               print connection, queue and heart state
  clear                drop queued combos
  config               print the effective config as JSON
  connect | disconnect
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Like { subject: String },
    Rose { subject: String, count: u32 },
    Perfume { subject: String },
    /// Forwarded to the session's manual command handler.
    Manual(String),
    Status,
    Clear,
    Config,
    Connect,
    Disconnect,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, KickstreamError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let verb = verb.to_lowercase();
        let subject = words.next().map(str::to_owned);

        let command = match verb.as_str() {
            "like" => ConsoleCommand::Like {
                subject: subject.ok_or_else(|| usage("like <name>"))?,
            },
            "rose" => {
                let subject = subject.ok_or_else(|| usage("rose <name> [count]"))?;
                let count = match words.next() {
                    Some(raw) => raw
                        .parse::<u32>()
                        .map_err(|_| usage("rose <name> [count]"))?,
                    None => 1,
                };
                ConsoleCommand::Rose { subject, count }
            }
            "perfume" => ConsoleCommand::Perfume {
                subject: subject.unwrap_or_else(|| "console".to_string()),
            },
            "kick" | "combo" | "super_kick" | "superkick" | "squad" | "spawn"
            | "squad_spawn" => ConsoleCommand::Manual(verb),
            "status" => ConsoleCommand::Status,
            "clear" => ConsoleCommand::Clear,
            "config" => ConsoleCommand::Config,
            "connect" => ConsoleCommand::Connect,
            "disconnect" => ConsoleCommand::Disconnect,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            _ => return Err(KickstreamError::UnknownCommand(verb)),
        };
        Ok(Some(command))
    }
}

fn usage(form: &str) -> KickstreamError {
    KickstreamError::Other(format!("usage: {form}"))
}
