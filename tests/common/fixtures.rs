//! Static advice corpora and generated text used across harnesses.

use fake::{faker::lorem::en::Sentence, Fake};

/// A small sample of realistic advice.
pub const CORPUS_ADVICE: &[&str] = &[
    "Drink water before coffee.",
    "Write the test first, then the fix.",
    "Sleep on big decisions.",
    "Leave the campsite cleaner than you found it.",
    "Read the error message twice.",
    "Call your grandparents.",
];

/// Text with awkward characters that must survive a round trip untouched.
pub const CORPUS_AWKWARD: &[&str] = &[
    "Use \"quotes\" sparingly",
    "Back\\slashes are fine",
    "Multi\nline\nadvice",
    "Ünïcödé is welcome ✓",
    "Emoji 🚀 too",
    "{\"not\": \"json\"}",
];

/// Bodies that must be rejected with 400.
pub const INVALID_BODIES: &[&str] = &[
    r#"{}"#,
    r#"{"text": null}"#,
    r#"{"text": 42}"#,
    r#"{"text": true}"#,
    r#"{"text": ["a"]}"#,
    r#"{"text": {"nested": "x"}}"#,
    r#"{"text": ""}"#,
    r#"{"text": "   "}"#,
    r#"{"advice": "wrong field"}"#,
    r#"not json at all"#,
];

/// A random sentence of advice.
pub fn fake_advice() -> String {
    Sentence(3..10).fake()
}

/// `n` distinct pieces of advice, suffixed with their index.
pub fn fake_corpus(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{} #{i}", fake_advice())).collect()
}
