use std::iter;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;

use futures_util::Stream;
use pin_project_lite::pin_project;
use tokio::time::{Sleep, sleep};

/// One render state of a [`Reveal`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RevealFrame {
    /// Number of characters shown in this frame.
    pub shown: usize,
    /// Number of characters in the full text.
    pub total: usize,
    /// The shown prefix of the text.
    pub text: String,
}

impl RevealFrame {
    /// Returns `true` if this frame shows the full text.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.shown == self.total
    }
}

pin_project! {
    /// A stream that discloses a text one character at a time.
    ///
    /// For a text of `N` characters the stream yields `N + 1` frames,
    /// showing `0` to `N` characters, and waits for the interval after
    /// every frame. The first frame is yielded without waiting.
    ///
    /// Characters are Unicode scalar values, so a multi-byte character
    /// is never split.
    pub struct Reveal {
        text: String,
        boundaries: Vec<usize>,
        next_frame: usize,
        interval: Duration,
        #[pin]
        sleep: Option<Sleep>,
    }
}

impl Reveal {
    /// Creates a reveal of `text` with the interval between frames.
    pub fn new<S: Into<String>>(text: S, interval: Duration) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            next_frame: 0,
            interval,
            sleep: None,
        }
    }

    /// Returns the number of frames this reveal yields in total.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Returns the full text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Stream for Reveal {
    type Item = RevealFrame;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
            ready!(sleep.poll(cx));
            this.sleep.set(None);
        }

        let Some(&end) = this.boundaries.get(*this.next_frame) else {
            return Poll::Ready(None);
        };
        let frame = RevealFrame {
            shown: *this.next_frame,
            total: this.boundaries.len() - 1,
            text: this.text[..end].to_owned(),
        };
        *this.next_frame += 1;
        this.sleep.set(Some(sleep(*this.interval)));

        Poll::Ready(Some(frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.boundaries.len() - self.next_frame;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use std::pin::pin;

    use futures_util::StreamExt;
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_frames() {
        let reveal = Reveal::new("abc", Duration::from_millis(15));
        assert_eq!(reveal.frame_count(), 4);

        let frames: Vec<_> = reveal.collect().await;
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["", "a", "ab", "abc"]);
        assert!(frames.last().unwrap().is_complete());
        assert!(!frames[2].is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text() {
        let frames: Vec<_> =
            Reveal::new("", Duration::from_millis(15)).collect().await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].text, "");
        assert!(frames[0].is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_multibyte_chars() {
        let frames: Vec<_> =
            Reveal::new("日本へ", Duration::from_millis(1)).collect().await;
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["", "日", "日本", "日本へ"]);
        assert_eq!(frames[3].total, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval() {
        let start = Instant::now();
        let mut reveal = pin!(Reveal::new("hi", Duration::from_millis(15)));

        reveal.next().await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        reveal.next().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(15));
        reveal.next().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(reveal.next().await.is_none());
        assert!(start.elapsed() >= Duration::from_millis(45));
    }
}
