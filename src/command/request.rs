//! Command requests

use std::fmt;
use thinking_cleaner_shared::{commands, endpoints};

/// How a command reaches the module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTarget {
    /// `command.json?command={name}&...`
    Wrapped,
    /// `/{name}?...`
    Bare,
}

/// A single command with its parameters. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    name: String,
    params: Vec<(String, String)>,
    target: CommandTarget,
}

impl CommandRequest {
    /// Command sent through the `command.json` wrapper
    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            target: CommandTarget::Wrapped,
        }
    }

    /// Command sent to its own endpoint, e.g. `/find_me`
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            target: CommandTarget::Bare,
        }
    }

    /// The terminal stop
    pub fn stop() -> Self {
        Self::command(commands::DRIVE_STOP)
    }

    /// Append a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn target(&self) -> CommandTarget {
        self.target
    }

    /// Request path relative to the module root
    pub fn path(&self) -> &str {
        match self.target {
            CommandTarget::Wrapped => endpoints::COMMAND,
            CommandTarget::Bare => &self.name,
        }
    }

    /// Query parameters in send order, command name first for wrapped commands
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(self.params.len() + 1);
        if self.target == CommandTarget::Wrapped {
            query.push((endpoints::COMMAND_PARAM.to_string(), self.name.clone()));
        }
        query.extend(self.params.iter().cloned());
        query
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())?;
        for (i, (key, value)) in self.query().iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_command_query() {
        let request = CommandRequest::command("drive_only")
            .param("degrees", 180)
            .param("speed", -250);

        assert_eq!(request.path(), "command.json");
        assert_eq!(
            request.query(),
            vec![
                ("command".to_string(), "drive_only".to_string()),
                ("degrees".to_string(), "180".to_string()),
                ("speed".to_string(), "-250".to_string()),
            ]
        );
        assert_eq!(
            request.to_string(),
            "command.json?command=drive_only&degrees=180&speed=-250"
        );
    }

    #[test]
    fn test_bare_command() {
        let request = CommandRequest::bare("find_me");
        assert_eq!(request.path(), "find_me");
        assert!(request.query().is_empty());
        assert_eq!(request.to_string(), "find_me");
    }

    #[test]
    fn test_stop_is_wrapped_drivestop() {
        let stop = CommandRequest::stop();
        assert_eq!(stop.name(), "drivestop");
        assert_eq!(stop.target(), CommandTarget::Wrapped);
    }
}
