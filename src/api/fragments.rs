//! HTML fragment builders.
//!
//! Pure string assembly over askama templates; auto-escaping covers every
//! interpolated value except the pre-rendered markdown body, which is marked
//! safe explicitly. Builders do no I/O and no validation; malformed inputs
//! degrade to placeholder text.

use askama::Template;

use crate::reply::QuizItem;

/// An action affordance offered under a chat reply. Labels containing
/// "Quiz" become live quiz-generation controls; everything else is a
/// disabled placeholder.
pub struct ActionButton<'a> {
    pub label: &'a str,
    pub starts_quiz: bool,
}

#[derive(Template)]
#[template(
    source = r##"<div class="flex justify-end animate-fade-in"><div class="bg-primary text-white p-3 rounded-t-xl rounded-bl-xl max-w-[80%] shadow">{{ topic }}</div></div>
<div class="flex justify-start animate-fade-in"><div class="prose prose-sm bg-gray-100 text-gray-800 p-3 rounded-t-xl rounded-br-xl max-w-[80%] shadow">{{ answer_html|safe }}</div></div>
<div id="action-buttons" class="flex flex-wrap gap-2 justify-start pl-4" hx-swap-oob="true">
{%- for button in buttons %}
{%- if button.starts_quiz %}
<form hx-post="/generate-quiz" hx-target="#dynamic-content-area" hx-swap="innerHTML" hx-indicator="#loading-indicator">
  <input type="hidden" name="topic" value="{{ topic }}">
  <button type="submit" class="bg-secondary hover:bg-purple-700 text-white font-medium py-2 px-4 rounded-full text-sm transition-all">{{ button.label }}</button>
</form>
{%- else %}
<button class="bg-gray-600 cursor-not-allowed text-white font-medium py-2 px-4 rounded-full text-sm" disabled title="Feature coming soon!">{{ button.label }}</button>
{%- endif %}
{%- endfor %}
</div>"##,
    ext = "html"
)]
struct ChatTurnTemplate<'a> {
    topic: &'a str,
    answer_html: &'a str,
    buttons: Vec<ActionButton<'a>>,
}

/// User bubble, AI bubble, and the out-of-band action-button row.
pub fn chat_turn(topic: &str, answer_html: &str, buttons: &[String]) -> String {
    let buttons = buttons
        .iter()
        .map(|label| ActionButton {
            label,
            starts_quiz: label.contains("Quiz"),
        })
        .collect();
    let template = ChatTurnTemplate {
        topic,
        answer_html,
        buttons,
    };
    template.render().unwrap_or_else(render_failure)
}

#[derive(Template)]
#[template(
    source = r##"<div id="quiz-container" class="p-4 border-2 border-dashed border-secondary rounded-lg bg-purple-50 animate-fade-in">
  <h3 class="font-bold text-lg mb-2 text-secondary">📝 Quiz Time!</h3>
  <p class="mb-4 font-semibold">{{ question }}</p>
  <div class="space-y-2">
{%- for option in options %}
    <form hx-post="/submit-answer" hx-target="#quiz-container" hx-swap="innerHTML">
      <input type="hidden" name="selected_answer" value="{{ option.key }}">
      <input type="hidden" name="correct_answer" value="{{ correct_answer }}">
      <input type="hidden" name="explanation" value="{{ explanation }}">
      <button type="submit" class="w-full text-left p-3 border border-gray-300 rounded-lg hover:bg-purple-100 hover:border-secondary transition-all"><span class="font-bold mr-2">{{ option.key }})</span> {{ option.text }}</button>
    </form>
{%- endfor %}
  </div>
</div>"##,
    ext = "html"
)]
struct QuizQuestionTemplate<'a> {
    question: &'a str,
    options: Vec<OptionRow<'a>>,
    correct_answer: &'a str,
    explanation: &'a str,
}

struct OptionRow<'a> {
    key: &'a str,
    text: &'a str,
}

/// One option control per choice; each carries the selected key, correct key,
/// and explanation as hidden state so grading needs no server-side memory.
pub fn quiz_question(item: &QuizItem) -> String {
    let question = if item.question.trim().is_empty() {
        "No question found."
    } else {
        &item.question
    };
    let options = item
        .options
        .iter()
        .map(|(key, text)| OptionRow { key, text })
        .collect();
    let template = QuizQuestionTemplate {
        question,
        options,
        correct_answer: &item.correct_answer,
        explanation: &item.explanation,
    };
    template.render().unwrap_or_else(render_failure)
}

#[derive(Template)]
#[template(
    source = r##"<div class="p-4 rounded-lg {% if is_correct %}border-2 border-success bg-green-50{% else %}border-2 border-error bg-red-50{% endif %} animate-fade-in">
{%- if is_correct %}
  <h3 class="font-bold text-lg text-success">✅ Correct! Great job!</h3>
{%- else %}
  <h3 class="font-bold text-lg text-error">❌ Not quite.</h3>
  <p class="mt-1 text-gray-700">The correct answer was <strong class="font-bold">{{ correct_answer }}</strong>.</p>
{%- endif %}
  <div class="mt-4 p-3 bg-gray-100 rounded"><p class="font-semibold">Explanation:</p><p class="text-gray-600">{{ explanation }}</p></div>
  <p class="mt-4 text-sm text-center text-gray-500">You can now ask another question in the chat box below.</p>
</div>"##,
    ext = "html"
)]
struct QuizFeedbackTemplate<'a> {
    is_correct: bool,
    correct_answer: &'a str,
    explanation: &'a str,
}

pub fn quiz_feedback(is_correct: bool, correct_answer: &str, explanation: &str) -> String {
    let template = QuizFeedbackTemplate {
        is_correct,
        correct_answer,
        explanation,
    };
    template.render().unwrap_or_else(render_failure)
}

#[derive(Template)]
#[template(
    source = r##"<div class="flex justify-start animate-fade-in"><div class="bg-red-100 border border-error text-error p-3 rounded-t-xl rounded-br-xl max-w-[80%] shadow">
  <p class="font-semibold">Oops! Something went wrong.</p>
  <p>{{ message }}</p>
</div></div>"##,
    ext = "html"
)]
struct ErrorCardTemplate<'a> {
    message: &'a str,
}

pub fn error_card(message: &str) -> String {
    ErrorCardTemplate { message }
        .render()
        .unwrap_or_else(render_failure)
}

#[derive(Template)]
#[template(path = "index.html")]
struct DashboardTemplate {
    version: &'static str,
}

/// The full dashboard page shell served at `/`.
pub fn dashboard_page() -> String {
    DashboardTemplate {
        version: env!("CARGO_PKG_VERSION"),
    }
    .render()
    .unwrap_or_else(render_failure)
}

// Static templates with escaped interpolation do not fail to render in
// practice; if one does, serve a bare error block rather than panicking.
fn render_failure(err: askama::Error) -> String {
    tracing::error!(error = %err, "template rendering failed");
    "<div class=\"text-error\">Oops! Something went wrong.</div>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quiz() -> QuizItem {
        QuizItem {
            question: "Q?".to_string(),
            options: vec![
                ("A".to_string(), "a".to_string()),
                ("B".to_string(), "b".to_string()),
            ],
            correct_answer: "A".to_string(),
            explanation: "e".to_string(),
        }
    }

    #[test]
    fn chat_turn_escapes_topic() {
        let html = chat_turn("<script>alert(1)</script>", "<p>safe</p>", &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        // Pre-rendered markdown passes through unescaped
        assert!(html.contains("<p>safe</p>"));
    }

    #[test]
    fn quiz_label_becomes_submit_control() {
        let buttons = vec!["Take a Quiz".to_string(), "Flashcards".to_string()];
        let html = chat_turn("osmosis", "<p>x</p>", &buttons);
        assert_eq!(html.matches("hx-post=\"/generate-quiz\"").count(), 1);
        assert_eq!(html.matches("disabled").count(), 1);
        assert!(html.contains("Take a Quiz"));
        assert!(html.contains("Flashcards"));
        // The quiz form carries the topic for the next request
        assert!(html.contains("name=\"topic\" value=\"osmosis\""));
    }

    #[test]
    fn quiz_question_renders_one_form_per_option() {
        let html = quiz_question(&sample_quiz());
        assert_eq!(html.matches("hx-post=\"/submit-answer\"").count(), 2);
        assert_eq!(
            html.matches("name=\"correct_answer\" value=\"A\"").count(),
            2
        );
        assert_eq!(html.matches("name=\"explanation\" value=\"e\"").count(), 2);
        assert!(html.contains("Q?"));
    }

    #[test]
    fn quiz_question_escapes_option_text() {
        let mut item = sample_quiz();
        item.options
            .push(("C".to_string(), "x < y & \"z\"".to_string()));
        let html = quiz_question(&item);
        assert!(html.contains("x &lt; y &amp;"));
    }

    #[test]
    fn quiz_question_renders_options_in_given_order() {
        let mut item = sample_quiz();
        item.options = vec![
            ("C".to_string(), "c".to_string()),
            ("A".to_string(), "a".to_string()),
        ];
        let html = quiz_question(&item);
        let first = html.find("name=\"selected_answer\" value=\"C\"").unwrap();
        let second = html.find("name=\"selected_answer\" value=\"A\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn empty_question_renders_placeholder() {
        let mut item = sample_quiz();
        item.question = "  ".to_string();
        let html = quiz_question(&item);
        assert!(html.contains("No question found."));
    }

    #[test]
    fn feedback_success_has_no_correct_answer_line() {
        let html = quiz_feedback(true, "C", "because");
        assert!(html.contains("Correct! Great job!"));
        assert!(!html.contains("The correct answer was"));
        assert!(html.contains("because"));
    }

    #[test]
    fn feedback_failure_names_correct_answer() {
        let html = quiz_feedback(false, "C", "because");
        assert!(html.contains("Not quite."));
        assert!(html.contains("The correct answer was <strong class=\"font-bold\">C</strong>."));
    }

    #[test]
    fn error_card_escapes_message() {
        let html = error_card("boom <b>bold</b>");
        assert!(html.contains("Oops! Something went wrong."));
        assert!(html.contains("boom &lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn dashboard_page_has_learn_form() {
        let html = dashboard_page();
        assert!(html.contains("hx-post=\"/learn\""));
        assert!(html.contains("name=\"topic\""));
        assert!(html.contains("dynamic-content-area"));
    }
}
