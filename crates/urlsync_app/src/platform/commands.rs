use thiserror::Error;
use urlsync_core::{FieldValue, Trigger};

/// One line of host input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Trigger),
    Share,
    Clear,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line; blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb {
        "edit" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .ok_or(CommandError::Usage("edit <field> <value>"))?;
            Command::Dispatch(Trigger::FieldEdited {
                field: field.to_string(),
                value: FieldValue::parse_input(value.trim()),
            })
        }
        "nav" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("nav <url>"));
            }
            Command::Dispatch(Trigger::Navigated {
                href: rest.to_string(),
            })
        }
        "restore" => Command::Dispatch(Trigger::StoreRestored),
        "share" => Command::Share,
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
