//! Quick-prompt cards shown on the welcome screen.

/// A card that fills the input with a fixed prompt and sends it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuickPrompt {
    /// Short heading shown on the card.
    pub title: &'static str,
    /// The literal prompt sent when the card is picked.
    pub prompt: &'static str,
}

/// The cards, in display order.
pub const QUICK_PROMPTS: [QuickPrompt; 4] = [
    QuickPrompt {
        title: "Explain a concept",
        prompt: "Explain quantum computing in simple terms",
    },
    QuickPrompt {
        title: "Write code",
        prompt: "Write a Python function to calculate fibonacci numbers",
    },
    QuickPrompt {
        title: "Plan a trip",
        prompt: "Help me plan a trip to Japan",
    },
    QuickPrompt {
        title: "Analyze data",
        prompt: "Analyze this data and provide insights",
    },
];

#[cfg(test)]
mod tests {
    use mockseek_responder::KeywordTable;

    use super::*;

    #[test]
    fn test_cards_hit_distinct_replies() {
        let table = KeywordTable::builtin();
        let replies: Vec<_> = QUICK_PROMPTS
            .iter()
            .map(|card| table.resolve(card.prompt))
            .collect();
        for (idx, reply) in replies.iter().enumerate() {
            assert_ne!(*reply, table.default_response());
            assert!(!replies[..idx].contains(reply));
        }
    }
}
