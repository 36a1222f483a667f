use crate::render::{RenderEvent, Renderer};

/// The input box: a draft text plus a lock held while a turn is in
/// flight.
#[derive(Debug)]
pub(crate) struct Composer {
    draft: String,
    locked: bool,
    submit_enabled: bool,
    renderer: Renderer,
}

impl Composer {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            draft: String::new(),
            locked: false,
            submit_enabled: false,
            renderer,
        }
    }

    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
        self.refresh();
    }

    /// Takes the trimmed draft out of the input box.
    ///
    /// Returns `None` and leaves the draft untouched if it is blank or
    /// the composer is locked.
    pub fn take_submission(&mut self) -> Option<String> {
        if self.locked {
            return None;
        }
        let submission = self.draft.trim();
        if submission.is_empty() {
            return None;
        }
        let submission = submission.to_owned();
        self.draft.clear();
        self.refresh();
        Some(submission)
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.refresh();
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.refresh();
    }

    fn refresh(&mut self) {
        let enabled = !self.locked && !self.draft.trim().is_empty();
        if enabled != self.submit_enabled {
            self.submit_enabled = enabled;
            self.renderer.emit(RenderEvent::SubmitStateChanged(enabled));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_draft() {
        let mut composer = Composer::new(Renderer::default());
        composer.set_draft("   \n\t".to_owned());
        assert!(!composer.submit_enabled());
        assert_eq!(composer.take_submission(), None);
        assert_eq!(composer.draft(), "   \n\t");
    }

    #[test]
    fn test_take_trimmed() {
        let mut composer = Composer::new(Renderer::default());
        composer.set_draft("  hello \n".to_owned());
        assert!(composer.submit_enabled());
        assert_eq!(composer.take_submission().as_deref(), Some("hello"));
        assert_eq!(composer.draft(), "");
        assert!(!composer.submit_enabled());
    }

    #[test]
    fn test_locked() {
        let mut composer = Composer::new(Renderer::default());
        composer.lock();
        composer.set_draft("hello".to_owned());
        assert!(composer.is_locked());
        assert!(!composer.submit_enabled());
        assert_eq!(composer.take_submission(), None);
        assert_eq!(composer.draft(), "hello");

        composer.unlock();
        assert!(composer.submit_enabled());
    }
}
