//! A terminal front-end for the mock chat assistant.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mockseek::input::{LineJoiner, UserAction, parse_action};
use mockseek::view::{TerminalView, ViewAction, help_line};
use mockseek::{Session, SessionBuilder};
use mockseek_core::{ChatClosedError, TurnTiming};
use mockseek_core::render::RenderEvent;
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};
use tokio::sync::mpsc;

/// Chat with an assistant that only knows a handful of canned replies.
#[derive(Debug, Parser)]
#[command(name = "mockseek", version)]
struct Args {
    /// JSON file with a custom keyword table.
    #[arg(short, long, value_name = "FILE")]
    keywords: Option<PathBuf>,
    /// Shortest "thinking" delay, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    min_delay_ms: u64,
    /// Longest "thinking" delay (exclusive), in milliseconds.
    #[arg(long, default_value_t = 3000)]
    max_delay_ms: u64,
    /// Pause between two revealed characters, in milliseconds.
    #[arg(long, default_value_t = 15)]
    reveal_interval_ms: u64,
    /// Name shown while the assistant is "thinking".
    #[arg(long, default_value = "DeepSeek")]
    assistant_name: String,
}

impl Args {
    fn timing(&self) -> TurnTiming {
        TurnTiming {
            min_delay: Duration::from_millis(self.min_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            reveal_interval: Duration::from_millis(self.reveal_interval_ms),
        }
    }
}

enum UiEvent {
    Render(RenderEvent),
    Idle,
    Line(String),
    Eof,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    debug!("{args:?}");

    let builder = match &args.keywords {
        Some(path) => match SessionBuilder::with_keyword_file(path) {
            Ok(builder) => builder,
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                return;
            }
        },
        None => SessionBuilder::new(),
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let session = builder
        .with_timing(args.timing())
        .with_assistant_name(args.assistant_name.as_str())
        .on_render({
            let event_tx = event_tx.clone();
            move |event| {
                event_tx.send(UiEvent::Render(event.clone())).ok();
            }
        })
        .on_idle({
            let event_tx = event_tx.clone();
            move || {
                event_tx.send(UiEvent::Idle).ok();
            }
        })
        .build();

    spawn_stdin_reader(event_tx);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut spinner: Option<ProgressBar> = None;
    let mut view = TerminalView::new();
    let mut joiner = LineJoiner::default();

    while let Some(event) = event_rx.recv().await {
        match event {
            UiEvent::Render(event) => {
                for action in view.apply(&event) {
                    match action {
                        ViewAction::Print(text) => {
                            print!("{text}");
                            std::io::stdout().flush().ok();
                        }
                        ViewAction::StartSpinner(label) => {
                            let progress_bar = ProgressBar::new_spinner();
                            progress_bar.set_style(progress_style.clone());
                            progress_bar.set_message(label);
                            progress_bar
                                .enable_steady_tick(Duration::from_millis(100));
                            spinner = Some(progress_bar);
                        }
                        ViewAction::StopSpinner => {
                            if let Some(progress_bar) = spinner.take() {
                                progress_bar.finish_and_clear();
                            }
                        }
                        ViewAction::Prompt => show_prompt(),
                    }
                }
            }
            UiEvent::Idle => show_prompt(),
            UiEvent::Line(line) => {
                let Some(input) = joiner.push_line(&line) else {
                    continue;
                };
                let action = parse_action(&input);
                if action == UserAction::Quit {
                    break;
                }
                if input.trim().is_empty() {
                    // Blank sends are ignored by the session.
                    show_prompt();
                }
                if let Err(err) = dispatch(&session, action) {
                    eprintln!("{err}");
                    break;
                }
            }
            UiEvent::Eof => break,
        }
    }

    if let Some(progress_bar) = spinner.take() {
        progress_bar.finish_and_clear();
    }
}

fn dispatch(
    session: &Session,
    action: UserAction,
) -> Result<(), ChatClosedError> {
    match action {
        UserAction::Send(text) => session.send_message(&text),
        UserAction::PickPrompt(idx) => session.pick_prompt(idx),
        UserAction::NewChat => session.new_chat(),
        UserAction::Help => {
            println!("{}", help_line().dimmed());
            show_prompt();
            Ok(())
        }
        UserAction::Quit => Ok(()),
    }
}

fn spawn_stdin_reader(event_tx: mpsc::UnboundedSender<UiEvent>) {
    tokio::spawn(async move {
        let mut lines = io::BufReader::new(io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if event_tx.send(UiEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    event_tx.send(UiEvent::Eof).ok();
                    break;
                }
                Err(err) => {
                    error!("error reading input: {}", err);
                    event_tx.send(UiEvent::Eof).ok();
                    break;
                }
            }
        }
    });
}

#[inline]
fn show_prompt() {
    print!("{} ", ">".bright_white().bold());
    std::io::stdout().flush().ok();
}
