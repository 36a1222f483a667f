use serde::{Deserialize, Serialize};

/// A keyword entry in a preset table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetEntry {
    /// The keyword to look for in the user input.
    pub keyword: String,
    /// The canned response returned when the keyword matches.
    pub response: String,
}

/// The serialized form of a keyword table.
///
/// Entries are matched in the order they appear, so a more specific
/// keyword should be placed before a more general one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetTable {
    /// Keyword entries, in matching order.
    pub entries: Vec<PresetEntry>,
    /// The response used when no keyword matches.
    pub default: String,
}

pub(crate) const QUANTUM: &str = "Quantum computing leverages quantum \
mechanical phenomena like superposition and entanglement to process \
information in ways that classical computers cannot. Unlike classical bits \
that are either 0 or 1, quantum bits (qubits) can exist in multiple states \
simultaneously, allowing quantum computers to perform certain calculations \
exponentially faster than classical computers.";

pub(crate) const MACHINE_LEARNING: &str = "Machine learning is a subset of \
artificial intelligence that enables systems to automatically learn and \
improve from experience without being explicitly programmed. It involves \
algorithms that can identify patterns in data, make predictions, and adapt \
their behavior based on new information.";

pub(crate) const PYTHON: &str = "Here's a Python function to calculate \
Fibonacci numbers:

```python
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n-1) + fibonacci(n-2)

# More efficient iterative version:
def fibonacci_iterative(n):
    if n <= 1:
        return n
    a, b = 0, 1
    for _ in range(2, n + 1):
        a, b = b, a + b
    return b
```";

pub(crate) const TRIP: &str = "For planning a trip to Japan, I'd recommend:

1. **Best time to visit**: Spring (March-May) for cherry blossoms or autumn \
(September-November) for fall colors
2. **Must-visit cities**: Tokyo, Kyoto, Osaka, Hiroshima
3. **Transportation**: Get a JR Pass for unlimited train travel
4. **Cultural experiences**: Visit temples, try traditional ryokan, attend a \
tea ceremony
5. **Food**: Don't miss sushi, ramen, tempura, and local specialties
6. **Duration**: 10-14 days for a comprehensive first visit";

pub(crate) const DATA: &str = "I'd be happy to help analyze data and provide \
insights! To give you the most relevant analysis, could you please:

1. Share the dataset or describe the type of data you have
2. Specify what kind of insights you're looking for
3. Mention any particular questions you want answered
4. Let me know the format of your data (CSV, JSON, etc.)

Once I have this information, I can help with statistical analysis, \
visualization suggestions, pattern identification, and actionable \
recommendations.";

pub(crate) const DEFAULT: &str = "I'm DeepSeek, an AI assistant created by \
DeepSeek. I'm here to help you with a wide range of tasks including \
answering questions, writing code, analyzing data, creative writing, and \
problem-solving. How can I assist you today?";

/// Keywords of the built-in table, in matching order.
pub(crate) const BUILTIN_ENTRIES: [(&str, &str); 5] = [
    ("quantum", QUANTUM),
    ("machine learning", MACHINE_LEARNING),
    ("python", PYTHON),
    ("trip", TRIP),
    ("data", DATA),
];
