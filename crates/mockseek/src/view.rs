//! Draws render events on a line-oriented terminal.

use std::collections::HashMap;

use mockseek_core::QUICK_PROMPTS;
use mockseek_core::conversation::{Role, format_time};
use mockseek_core::render::RenderEvent;
use mockseek_core::transcript::{Entry, EntryId, EntryKind};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";

/// What the terminal should do for an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    /// Print the text as it is, without adding a newline.
    Print(String),
    /// Show a spinner with the label.
    StartSpinner(String),
    /// Clear the spinner.
    StopSpinner,
    /// Show the input prompt.
    Prompt,
}

/// Keeps track of what has already been printed, so that a reveal only
/// prints the characters that are new.
#[derive(Debug, Default)]
pub struct TerminalView {
    printed: HashMap<EntryId, usize>,
    spinner: Option<EntryId>,
}

impl TerminalView {
    /// Creates an empty view.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one render event into terminal actions.
    pub fn apply(&mut self, event: &RenderEvent) -> Vec<ViewAction> {
        match event {
            RenderEvent::WelcomeShown => {
                vec![ViewAction::Print(welcome_screen()), ViewAction::Prompt]
            }
            RenderEvent::MessagesShown => vec![],
            RenderEvent::EntryAppended(entry) => self.append(entry),
            RenderEvent::EntryRemoved(id) => {
                self.printed.remove(id);
                if self.spinner == Some(*id) {
                    self.spinner = None;
                    vec![ViewAction::StopSpinner]
                } else {
                    vec![]
                }
            }
            RenderEvent::TextChanged { id, text } => {
                let Some(printed) = self.printed.get_mut(id) else {
                    return vec![];
                };
                let Some(delta) = text.get(*printed..) else {
                    warn!("revealed text is shorter than what was printed");
                    return vec![];
                };
                if delta.is_empty() {
                    return vec![];
                }
                *printed = text.len();
                vec![ViewAction::Print(indent_continuation(
                    delta,
                    Role::Assistant,
                ))]
            }
            RenderEvent::TimestampSet { id, timestamp } => {
                self.printed.remove(id);
                vec![ViewAction::Print(format!(
                    "\n{}{}\n\n",
                    bar(Role::Assistant),
                    format_time(timestamp).dimmed()
                ))]
            }
            RenderEvent::Cleared => {
                self.printed.clear();
                let mut actions = vec![];
                if self.spinner.take().is_some() {
                    actions.push(ViewAction::StopSpinner);
                }
                actions.push(ViewAction::Print(format!(
                    "\n{}\n",
                    "──────── new chat ────────".dimmed()
                )));
                actions
            }
            RenderEvent::SubmitStateChanged(_) => vec![],
        }
    }

    fn append(&mut self, entry: &Entry) -> Vec<ViewAction> {
        match &entry.kind {
            EntryKind::Typing { label } => {
                self.spinner = Some(entry.id);
                vec![ViewAction::StartSpinner(format!("{label}..."))]
            }
            EntryKind::Message { text, timestamp } => {
                let mut out = format!(
                    "{}{} {}\n{}",
                    bar(entry.role),
                    avatar(entry.role),
                    role_name(entry.role).bold(),
                    bar(entry.role),
                );
                out.push_str(&indent_continuation(text, entry.role));
                match timestamp {
                    Some(timestamp) => {
                        out.push_str(&format!(
                            "\n{}{}\n\n",
                            bar(entry.role),
                            format_time(timestamp).dimmed()
                        ));
                    }
                    None => {
                        // Still being revealed.
                        self.printed.insert(entry.id, text.len());
                    }
                }
                vec![ViewAction::Print(out)]
            }
        }
    }
}

/// The welcome screen with the quick-prompt cards.
pub fn welcome_screen() -> String {
    let mut out = format!(
        "\n{}\n{}\n\n",
        "How can I help you today?".bold(),
        "Type a message, or pick a card:".dimmed()
    );
    for (idx, card) in QUICK_PROMPTS.iter().enumerate() {
        out.push_str(&format!(
            "  {} {}  {}\n",
            format!("/{}", idx + 1).bright_cyan(),
            card.title.bold(),
            card.prompt.dimmed()
        ));
    }
    out.push_str(&format!("\n{}\n\n", help_line().dimmed()));
    out
}

/// One line listing the commands.
pub fn help_line() -> &'static str {
    "/new starts a new chat, /quit leaves, end a line with \\ to continue it"
}

#[inline]
fn avatar(role: Role) -> &'static str {
    match role {
        Role::User => "👤",
        Role::Assistant => "🐋",
    }
}

#[inline]
fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    }
}

fn bar(role: Role) -> String {
    match role {
        Role::User => BAR_CHAR.bright_yellow().to_string(),
        Role::Assistant => BAR_CHAR.bright_cyan().to_string(),
    }
}

/// Keeps the bar in front of every line of a multi-line bubble.
fn indent_continuation(text: &str, role: Role) -> String {
    text.replace('\n', &format!("\n{}", bar(role)))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mockseek_core::responder::KeywordTableBuilder;
    use mockseek_core::{ChatBuilder, TurnTiming};
    use tokio::sync::mpsc;

    use super::*;

    fn printed(actions: &[ViewAction]) -> String {
        actions
            .iter()
            .filter_map(|action| match action {
                ViewAction::Print(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Runs one turn that replies with `reply` and returns the events.
    async fn record_turn(reply: &str) -> Vec<RenderEvent> {
        let table = KeywordTableBuilder::with_default(reply).build().unwrap();
        let events = Arc::new(Mutex::new(vec![]));
        let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();
        let chat = ChatBuilder::with_responder(table)
            .with_timing(TurnTiming::instant())
            .on_render({
                let events = Arc::clone(&events);
                move |event| events.lock().unwrap().push(event.clone())
            })
            .on_idle(move || {
                idle_tx.send(()).ok();
            })
            .build();
        chat.send_message("hello").unwrap();
        idle_rx.recv().await.unwrap();
        events.lock().unwrap().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_output() {
        let events = record_turn("Hel\nlo").await;
        let mut view = TerminalView::new();
        let mut actions = vec![];
        for event in &events {
            actions.extend(view.apply(event));
        }

        assert_eq!(actions[1], ViewAction::Prompt);
        assert!(actions.contains(&ViewAction::StartSpinner(
            "DeepSeek is thinking...".to_owned()
        )));
        let spinner_start = actions
            .iter()
            .position(|a| matches!(a, ViewAction::StartSpinner(_)))
            .unwrap();
        let spinner_stop = actions
            .iter()
            .position(|a| *a == ViewAction::StopSpinner)
            .unwrap();
        assert!(spinner_start < spinner_stop);

        let after_spinner = strip_ansi(&printed(&actions[spinner_stop..]));
        assert!(after_spinner.contains("Hel\n▎lo\n"));
        let before_spinner = strip_ansi(&printed(&actions[..spinner_start]));
        assert!(before_spinner.contains("You"));
        assert!(before_spinner.contains("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_frames_ignored() {
        let events = record_turn("Hi").await;
        let mut view = TerminalView::new();
        for event in &events {
            view.apply(event);
        }

        let reply_id = events
            .iter()
            .rev()
            .find_map(|event| match event {
                RenderEvent::TimestampSet { id, .. } => Some(*id),
                _ => None,
            })
            .unwrap();
        let actions = view.apply(&RenderEvent::TextChanged {
            id: reply_id,
            text: "Hi there".to_owned(),
        });
        assert!(actions.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleared_stops_spinner() {
        let events = record_turn("Hi").await;
        let typing = events
            .iter()
            .find(|event| {
                matches!(event, RenderEvent::EntryAppended(entry) if entry.is_typing())
            })
            .unwrap();

        let mut view = TerminalView::new();
        view.apply(typing);
        let actions = view.apply(&RenderEvent::Cleared);
        assert_eq!(actions[0], ViewAction::StopSpinner);
        assert!(strip_ansi(&printed(&actions)).contains("new chat"));
    }

    #[test]
    fn test_welcome_lists_cards() {
        let screen = strip_ansi(&welcome_screen());
        for (idx, card) in QUICK_PROMPTS.iter().enumerate() {
            assert!(screen.contains(&format!("/{}", idx + 1)));
            assert!(screen.contains(card.prompt));
        }
    }
}
