//! REPL command parsing.

use crate::form::ToneOption;

pub const HELP: &str = "\
Commands:
  from <address>     set the sender address
  to <address>       set the recipient address
  subject <text>     set the subject
  tone <style>       Professional, Formal, Friendly, Urgent, Casual, or any text
  body               enter the body; finish with a line containing only '.'
  show               print the current fields
  polish             polish the draft
  copy               copy the polished draft
  send               send the polished draft
  theme              toggle light/dark
  health             check the backend
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    From(String),
    To(String),
    Subject(String),
    Tone(ToneOption),
    Body,
    Show,
    Polish,
    Copy,
    Send,
    Theme,
    Health,
    Help,
    Quit,
    /// An empty line; the equivalent of a native form submit.
    Submit,
}

impl Command {
    /// Parse one input line. Field values keep their inner whitespace.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(Self::Submit);
        }

        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let cmd = match word.to_ascii_lowercase().as_str() {
            "from" => Self::From(rest.to_string()),
            "to" => Self::To(rest.to_string()),
            "subject" => Self::Subject(rest.to_string()),
            "tone" if rest.trim().is_empty() => return Err("Usage: tone <style>".into()),
            "tone" => match rest.parse() {
                Ok(tone) => Self::Tone(tone),
                Err(never) => match never {},
            },
            "body" => Self::Body,
            "show" => Self::Show,
            "polish" => Self::Polish,
            "copy" => Self::Copy,
            "send" => Self::Send,
            "theme" => Self::Theme,
            "health" => Self::Health,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "/quit" => Self::Quit,
            other => return Err(format!("Unknown command: {other} (try 'help')")),
        };
        Ok(cmd)
    }
}

/// Whether a body line ends multi-line body entry.
pub fn is_body_terminator(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "."
}
