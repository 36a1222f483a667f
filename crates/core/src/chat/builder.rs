use std::sync::Arc;

use mockseek_responder::{KeywordTable, Responder};

use super::Chat;
use super::state::ChatState;
use crate::render::{RenderEvent, Renderer};
use crate::timing::TurnTiming;

/// [`Chat`] builder.
pub struct ChatBuilder {
    responder: Arc<dyn Responder>,
    timing: TurnTiming,
    assistant_name: String,
    renderer: Renderer,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChatBuilder {
    /// Creates a builder that answers with the given responder.
    #[inline]
    pub fn with_responder<R: Responder + 'static>(responder: R) -> Self {
        Self {
            responder: Arc::new(responder),
            timing: TurnTiming::default(),
            assistant_name: "DeepSeek".to_owned(),
            renderer: Renderer::default(),
            on_idle: None,
        }
    }

    /// Sets the delays of a turn.
    #[inline]
    pub fn with_timing(mut self, timing: TurnTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Sets the name shown in the "thinking" placeholder.
    #[inline]
    pub fn with_assistant_name<S: Into<String>>(mut self, name: S) -> Self {
        self.assistant_name = name.into();
        self
    }

    /// Attaches a callback to be invoked for every change to the view.
    ///
    /// The callback runs inside the session task, so it should return
    /// quickly.
    #[inline]
    pub fn on_render(
        mut self,
        on_render: impl Fn(&RenderEvent) + Send + Sync + 'static,
    ) -> Self {
        self.renderer = Renderer::new(on_render);
        self
    }

    /// Attaches a callback to be invoked when a turn ends, either
    /// because the reply was fully revealed or because a new chat was
    /// started in the middle of it.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the chat and spawns its task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn build(self) -> Chat {
        let ChatBuilder {
            responder,
            timing,
            assistant_name,
            renderer,
            on_idle,
        } = self;

        renderer.emit(RenderEvent::WelcomeShown);
        let state = ChatState::new(
            responder,
            timing.normalized(),
            assistant_name,
            renderer,
            on_idle,
        );
        Chat::spawn(state)
    }
}

impl Default for ChatBuilder {
    /// A builder that answers from the built-in keyword table.
    #[inline]
    fn default() -> Self {
        Self::with_responder(KeywordTable::builtin())
    }
}
