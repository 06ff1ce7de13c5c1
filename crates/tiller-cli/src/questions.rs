//! Loading questions from files and command-line flags.
//!
//! A question file is JSON, either a bare list of questions or the same
//! `{"questions": [...]}` object the `ask_user` tool accepts:
//!
//! ```json
//! {"questions": [
//!   {"question": "Which database?", "choices": [
//!     {"label": "Postgres", "description": "relational"},
//!     {"label": "SQLite"}
//!   ]},
//!   {"question": "Anything else?"}
//! ]}
//! ```
//!
//! On the command line each `--question` is `TEXT|CHOICE|CHOICE...`, and a
//! choice written `label - description` gets a description.

use std::path::Path;

use serde::Deserialize;
use tiller_rs::question::{Choice, Question};
use tracing::debug;

/// Separates the question text and its choices in a `--question` flag.
pub const FIELD_SEPARATOR: char = '|';
/// Separates a choice label from its description.
pub const DESCRIPTION_SEPARATOR: &str = " - ";

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionFile {
    List(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

/// Read questions from a JSON file.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let questions = parse_questions(&raw).map_err(|e| format!("{}: {e}", path.display()))?;
    debug!(path = %path.display(), count = questions.len(), "Loaded questions");
    Ok(questions)
}

/// Parse questions from JSON text.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, String> {
    let file: QuestionFile =
        serde_json::from_str(raw).map_err(|e| format!("invalid question file: {e}"))?;
    let questions = match file {
        QuestionFile::List(q) | QuestionFile::Wrapped { questions: q } => q,
    };
    validate(questions)
}

/// Build questions from `--question` flag values.
pub fn questions_from_flags(flags: &[String]) -> Result<Vec<Question>, String> {
    let questions = flags
        .iter()
        .map(|flag| parse_question_flag(flag))
        .collect::<Result<Vec<_>, _>>()?;
    validate(questions)
}

/// Parse one `TEXT|CHOICE|...` flag value.
pub fn parse_question_flag(flag: &str) -> Result<Question, String> {
    let mut fields = flag.split(FIELD_SEPARATOR).map(str::trim);
    let text = fields.next().unwrap_or_default();
    if text.is_empty() {
        return Err(format!("question text is empty in '{flag}'"));
    }

    let choices = fields
        .filter(|field| !field.is_empty())
        .map(|field| match field.split_once(DESCRIPTION_SEPARATOR) {
            Some((label, description)) => {
                Choice::new(label.trim()).with_description(description.trim())
            }
            None => Choice::new(field),
        })
        .collect();

    Ok(Question::new(text, choices))
}

fn validate(questions: Vec<Question>) -> Result<Vec<Question>, String> {
    if questions.is_empty() {
        return Err("at least 1 question is required".to_string());
    }
    if let Some(i) = questions.iter().position(|q| q.question.trim().is_empty()) {
        return Err(format!("question {} has no text", i + 1));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_list_and_wrapped_object() {
        let bare = parse_questions(r#"[{"question": "A?"}, {"question": "B?"}]"#).unwrap();
        let wrapped =
            parse_questions(r#"{"questions": [{"question": "A?"}, {"question": "B?"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
        assert!(bare[0].choices.is_empty());
    }

    #[test]
    fn rejects_empty_and_blank_questions() {
        assert!(parse_questions("[]").unwrap_err().contains("at least 1"));
        assert!(
            parse_questions(r#"[{"question": "ok"}, {"question": "  "}]"#)
                .unwrap_err()
                .contains("question 2")
        );
        assert!(parse_questions("not json").unwrap_err().starts_with("invalid"));
    }

    #[test]
    fn flag_with_choices_and_descriptions() {
        let q = parse_question_flag("Which database?|Postgres - relational| SQLite ").unwrap();
        assert_eq!(q.question, "Which database?");
        assert_eq!(
            q.choices,
            vec![
                Choice::new("Postgres").with_description("relational"),
                Choice::new("SQLite"),
            ]
        );
    }

    #[test]
    fn flag_without_choices_and_empty_fields() {
        let q = parse_question_flag("Name?||").unwrap();
        assert!(q.choices.is_empty());
        assert!(parse_question_flag("|a|b").is_err());
    }

    #[test]
    fn flags_keep_order() {
        let flags = vec!["First?|a".to_string(), "Second?".to_string()];
        let questions = questions_from_flags(&flags).unwrap();
        let texts: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(texts, vec!["First?", "Second?"]);
        assert!(questions_from_flags(&[]).is_err());
    }
}
