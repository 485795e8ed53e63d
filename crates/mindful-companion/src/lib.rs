/// Mindful Companion
///
/// Rule-based replies for the chat companion. A message is lowercased and
/// checked against an ordered table of trigger substrings; the first rule
/// with a matching trigger supplies the reply, otherwise a fallback is used.
///
/// There is no language understanding here. "this" contains "hi", and that
/// counts as a greeting.
pub mod rules;

pub use rules::{FALLBACK_REPLY, RULES, Rule, matching_rule, select_response};
