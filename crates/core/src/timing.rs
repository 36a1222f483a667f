use std::time::Duration;

use rand::Rng;

/// Delays used to imitate a model that takes time to answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnTiming {
    /// Lower bound (inclusive) of the "thinking" delay.
    pub min_delay: Duration,
    /// Upper bound (exclusive) of the "thinking" delay.
    pub max_delay: Duration,
    /// Pause between two revealed characters.
    pub reveal_interval: Duration,
}

impl TurnTiming {
    /// No delays at all, for tests and scripted sessions.
    pub const fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            reveal_interval: Duration::ZERO,
        }
    }

    /// Returns the timing with the delay bounds in ascending order.
    pub(crate) fn normalized(self) -> Self {
        if self.min_delay <= self.max_delay {
            return self;
        }
        Self {
            min_delay: self.max_delay,
            max_delay: self.min_delay,
            ..self
        }
    }

    /// Draws a "thinking" delay uniformly from `[min_delay, max_delay)`.
    ///
    /// Equal bounds give a fixed delay.
    pub(crate) fn draw_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        if self.min_delay >= self.max_delay {
            return self.min_delay;
        }
        rng.gen_range(self.min_delay..self.max_delay)
    }
}

impl Default for TurnTiming {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(3000),
            reveal_interval: Duration::from_millis(15),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_draw_in_range() {
        let timing = TurnTiming::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let delay = timing.draw_delay(&mut rng);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_fixed_delay() {
        let timing = TurnTiming {
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_millis(200),
            ..TurnTiming::instant()
        };
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(timing.draw_delay(&mut rng), Duration::from_millis(200));
        assert_eq!(
            TurnTiming::instant().draw_delay(&mut rng),
            Duration::ZERO
        );
    }

    #[test]
    fn test_normalized() {
        let timing = TurnTiming {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(100),
            reveal_interval: Duration::from_millis(3),
        }
        .normalized();
        assert_eq!(timing.min_delay, Duration::from_millis(100));
        assert_eq!(timing.max_delay, Duration::from_millis(500));
        assert_eq!(timing.reveal_interval, Duration::from_millis(3));
    }
}
