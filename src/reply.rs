//! Post-processing of model replies: the `[BUTTON]` tag convention, markdown
//! rendering, and strict parsing of quiz JSON.

use markdown::{to_html_with_options, Options as MarkdownOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{CramlyError, Result};

static BUTTON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[BUTTON\](.*?)\[/BUTTON\]").unwrap());

/// A model reply with inline button tags stripped out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub text: String,
    pub buttons: Vec<String>,
}

/// Scan `content` for `[BUTTON]label[/BUTTON]` tags. Labels are trimmed and
/// kept in order of appearance, duplicates included; the cleaned text is the
/// input with every matched tag removed, then trimmed.
pub fn parse_buttons(content: &str) -> ParsedReply {
    let buttons = BUTTON_RE
        .captures_iter(content)
        .map(|caps| caps[1].trim().to_string())
        .collect();
    let text = BUTTON_RE.replace_all(content, "").trim().to_string();
    ParsedReply { text, buttons }
}

/// Convert model markdown to HTML. The renderer refusing the input is not a
/// request failure; the raw text is shown instead.
pub fn render_markdown(text: &str) -> String {
    // Default compile options: raw HTML in the model's output stays escaped.
    let options = MarkdownOptions::gfm();
    to_html_with_options(text, &options).unwrap_or_else(|_| text.to_string())
}

/// One multiple-choice question as produced by the quiz prompt.
///
/// `correct_answer` should be one of the `options` keys; that invariant is
/// not enforced here, a violation degrades the rendered feedback rather than
/// failing the request.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct QuizItem {
    pub question: String,
    #[serde(deserialize_with = "ordered_options")]
    pub options: Vec<(String, String)>,
    pub correct_answer: String,
    pub explanation: String,
}

// Options keep the provider's key order; a sorted map would reorder any
// reply whose keys are not already alphabetical.
fn ordered_options<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, String)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct OptionsVisitor;

    impl<'de> serde::de::Visitor<'de> for OptionsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a map of option keys to option text")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, String>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OptionsVisitor)
}

/// Strict parse of the quiz generator's reply. Anything other than complete,
/// well-formed JSON is an invalid-quiz-format error, kept distinct from
/// upstream and transport failures.
pub fn parse_quiz(raw: &str) -> Result<QuizItem> {
    let item: QuizItem =
        serde_json::from_str(raw).map_err(|e| CramlyError::InvalidQuizFormat(e.to_string()))?;
    let correct = item.correct_answer.trim();
    if !item.options.iter().any(|(key, _)| key == correct) {
        tracing::warn!(
            correct_answer = %item.correct_answer,
            "quiz correct_answer is not an option key"
        );
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tags_returns_trimmed_input_and_no_labels() {
        let parsed = parse_buttons("  plain explanation  ");
        assert_eq!(parsed.text, "plain explanation");
        assert!(parsed.buttons.is_empty());
    }

    #[test]
    fn strips_tags_and_collects_labels_in_order() {
        let parsed = parse_buttons("A[BUTTON] X [/BUTTON]B[BUTTON]Y[/BUTTON]C");
        assert_eq!(parsed.text, "ABC");
        assert_eq!(parsed.buttons, vec!["X", "Y"]);
    }

    #[test]
    fn duplicate_labels_are_preserved() {
        let parsed = parse_buttons("[BUTTON]Quiz[/BUTTON][BUTTON]Quiz[/BUTTON]");
        assert_eq!(parsed.buttons, vec!["Quiz", "Quiz"]);
        assert_eq!(parsed.text, "");
    }

    #[test]
    fn unclosed_tag_is_left_alone() {
        let parsed = parse_buttons("text [BUTTON]dangling");
        assert_eq!(parsed.text, "text [BUTTON]dangling");
        assert!(parsed.buttons.is_empty());
    }

    #[test]
    fn lowercase_tags_do_not_match() {
        let parsed = parse_buttons("[button]x[/button]");
        assert!(parsed.buttons.is_empty());
    }

    #[test]
    fn markdown_renders_emphasis() {
        let html = render_markdown("**bold** term");
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn markdown_escapes_raw_html() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn parses_complete_quiz() {
        let raw = r#"{
            "question": "Q?",
            "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
            "correct_answer": "C",
            "explanation": "because"
        }"#;
        let item = parse_quiz(raw).unwrap();
        assert_eq!(item.question, "Q?");
        assert_eq!(item.options.len(), 4);
        assert_eq!(item.correct_answer, "C");
    }

    #[test]
    fn options_keep_reply_order() {
        let raw = r#"{
            "question": "Q?",
            "options": {"C": "c", "A": "a", "B": "b"},
            "correct_answer": "A",
            "explanation": "e"
        }"#;
        let item = parse_quiz(raw).unwrap();
        let keys: Vec<&str> = item.options.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["C", "A", "B"]);
    }

    #[test]
    fn truncated_json_is_invalid_quiz_format() {
        let err = parse_quiz(r#"{"question": "Q?", "options"#).unwrap_err();
        assert!(matches!(err, CramlyError::InvalidQuizFormat(_)));
    }

    #[test]
    fn missing_field_is_invalid_quiz_format() {
        let raw = r#"{"question": "Q?", "options": {"A": "a"}, "explanation": "e"}"#;
        let err = parse_quiz(raw).unwrap_err();
        assert!(matches!(err, CramlyError::InvalidQuizFormat(_)));
    }

    #[test]
    fn non_json_prose_is_invalid_quiz_format() {
        assert!(parse_quiz("Here is your question: ...").is_err());
    }
}
