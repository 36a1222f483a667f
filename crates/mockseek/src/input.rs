//! Turns terminal lines into user actions.

use mockseek_core::QUICK_PROMPTS;

/// What the user asked for with one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    /// Send the text as a message.
    Send(String),
    /// Pick a quick-prompt card (zero-based).
    PickPrompt(usize),
    /// Start a new chat.
    NewChat,
    /// Show the list of commands.
    Help,
    /// Leave the program.
    Quit,
}

/// Parses a complete input into an action.
///
/// Slash commands are `/new`, `/help`, `/quit` and `/1` to `/N` for the
/// quick-prompt cards. Anything else, including an unknown command, is
/// sent as it is.
pub fn parse_action(input: &str) -> UserAction {
    let trimmed = input.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return UserAction::Send(input.to_owned());
    };
    match command {
        "new" => UserAction::NewChat,
        "help" | "?" => UserAction::Help,
        "quit" | "exit" => UserAction::Quit,
        _ => match command.parse::<usize>() {
            Ok(card) if (1..=QUICK_PROMPTS.len()).contains(&card) => {
                UserAction::PickPrompt(card - 1)
            }
            _ => UserAction::Send(input.to_owned()),
        },
    }
}

/// Joins lines ending with a backslash into one input, which is how a
/// newline is typed without sending.
#[derive(Debug, Default)]
pub struct LineJoiner {
    buf: String,
}

impl LineJoiner {
    /// Feeds one line, without its terminator.
    ///
    /// Returns the complete input once a line does not end with a
    /// backslash.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(partial) = line.strip_suffix('\\') {
            self.buf.push_str(partial);
            self.buf.push('\n');
            return None;
        }
        self.buf.push_str(line);
        Some(std::mem::take(&mut self.buf))
    }

    /// Returns `true` if a continued input is waiting for more lines.
    #[inline]
    pub fn is_continuing(&self) -> bool {
        !self.buf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("/new"), UserAction::NewChat);
        assert_eq!(parse_action("  /quit "), UserAction::Quit);
        assert_eq!(parse_action("/help"), UserAction::Help);
        assert_eq!(parse_action("/1"), UserAction::PickPrompt(0));
        assert_eq!(
            parse_action(&format!("/{}", QUICK_PROMPTS.len())),
            UserAction::PickPrompt(QUICK_PROMPTS.len() - 1)
        );
        assert_eq!(parse_action("/0"), UserAction::Send("/0".to_owned()));
        assert_eq!(parse_action("/99"), UserAction::Send("/99".to_owned()));
        assert_eq!(
            parse_action("what is /new?"),
            UserAction::Send("what is /new?".to_owned())
        );
    }

    #[test]
    fn test_line_joiner() {
        let mut joiner = LineJoiner::default();
        assert_eq!(joiner.push_line("first line\\"), None);
        assert!(joiner.is_continuing());
        assert_eq!(joiner.push_line("second\\\r"), None);
        assert_eq!(
            joiner.push_line("third").as_deref(),
            Some("first line\nsecond\nthird")
        );
        assert!(!joiner.is_continuing());
        assert_eq!(joiner.push_line("single").as_deref(), Some("single"));
    }
}
