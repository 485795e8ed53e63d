/// One row of the reply table.
#[derive(Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    /// Lowercase substrings, any of which triggers the rule.
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

impl Rule {
    fn matches(&self, lowercased: &str) -> bool {
        self.triggers.iter().any(|t| lowercased.contains(t))
    }
}

/// Evaluated top to bottom; earlier rules win.
pub static RULES: &[Rule] = &[
    Rule {
        name: "greeting",
        triggers: &["hello", "hi"],
        reply: "Hello! I'm MindfulMe AI, your companion. How are you feeling today?",
    },
    Rule {
        name: "sadness",
        triggers: &["sad", "depress"],
        reply: "I'm sorry to hear you're feeling down. Remember that it's okay to feel this way \
                sometimes. Would you like to try a breathing exercise to help calm your mind?",
    },
    Rule {
        name: "anxiety",
        triggers: &["anxious", "stress"],
        reply: "I understand that anxiety can be challenging. Try focusing on your breathing - \
                inhale deeply for 4 seconds, hold for 4 seconds, and exhale for 6 seconds. This \
                can help activate your parasympathetic nervous system.",
    },
    Rule {
        name: "positive",
        triggers: &["happy", "good"],
        reply: "I'm glad to hear you're feeling good! It's important to acknowledge and \
                celebrate these positive moments.",
    },
    Rule {
        name: "tiredness",
        triggers: &["tired", "exhausted"],
        reply: "Being tired can affect your mood and mental wellbeing. Make sure you're giving \
                yourself enough time to rest. Is there anything specific that's draining your \
                energy lately?",
    },
    Rule {
        name: "loneliness",
        triggers: &["lonely", "alone"],
        reply: "Feeling lonely is a common human experience. Remember that connection comes in \
                many forms. Is there someone you could reach out to today, even for a brief \
                conversation?",
    },
];

pub const FALLBACK_REPLY: &str = "Thank you for sharing. I'm here to listen and support you. \
                                  Would you like to tell me more about how you're feeling?";

/// The first rule whose trigger appears in `message`, ignoring case.
pub fn matching_rule(message: &str) -> Option<&'static Rule> {
    let lowercased = message.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&lowercased))
}

/// Pick the companion's reply. Never fails; unmatched input gets [`FALLBACK_REPLY`].
pub fn select_response(message: &str) -> &'static str {
    matching_rule(message).map_or(FALLBACK_REPLY, |rule| rule.reply)
}
