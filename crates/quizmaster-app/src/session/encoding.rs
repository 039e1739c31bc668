/*
[INPUT]:  Recorded answers and the quiz's questions
[OUTPUT]: Submission body in the encoding the backend expects
[POS]:    Session layer - answer encoding policy
[UPDATE]: When the backend changes how it reads submitted answers
*/

use quizmaster_client::{AnswerValue, Question, SubmitAnswersRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// How recorded answers are put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerEncoding {
    /// Send values exactly as recorded
    Raw,
    /// Resolve every answer to its position in the question's options
    #[default]
    OptionIndex,
}

pub fn encode_answers(
    encoding: AnswerEncoding,
    questions: &[Question],
    answers: &BTreeMap<u64, AnswerValue>,
) -> SubmitAnswersRequest {
    let encoded = answers.iter().filter_map(|(question_id, value)| {
        let value = match (encoding, value) {
            (AnswerEncoding::Raw, value) => value.clone(),
            (AnswerEncoding::OptionIndex, AnswerValue::Index(index)) => AnswerValue::Index(*index),
            (AnswerEncoding::OptionIndex, AnswerValue::Text(text)) => {
                let resolved = questions
                    .iter()
                    .find(|question| question.id == *question_id)
                    .and_then(|question| question.option_index(text));
                match resolved {
                    Some(index) => AnswerValue::Index(index),
                    None => {
                        warn!(question_id, answer = %text, "answer not among options; dropped");
                        return None;
                    }
                }
            }
        };
        Some((*question_id, value))
    });

    SubmitAnswersRequest::from_answers(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question {
                id: 1,
                text: "Capital of France?".to_string(),
                options: vec!["Berlin".to_string(), "Paris".to_string()],
                marks: 1,
            },
            Question {
                id: 2,
                text: "Largest ocean?".to_string(),
                options: vec!["Pacific".to_string(), "Atlantic".to_string()],
                marks: 1,
            },
        ]
    }

    #[test]
    fn test_option_index_resolves_text() {
        let mut answers = BTreeMap::new();
        answers.insert(1, AnswerValue::Text("Paris".to_string()));
        answers.insert(2, AnswerValue::Index(0));

        let request = encode_answers(AnswerEncoding::OptionIndex, &questions(), &answers);
        assert_eq!(request.answers.get("1"), Some(&AnswerValue::Index(1)));
        assert_eq!(request.answers.get("2"), Some(&AnswerValue::Index(0)));
    }

    #[test]
    fn test_option_index_drops_unknown_text() {
        let mut answers = BTreeMap::new();
        answers.insert(1, AnswerValue::Text("Madrid".to_string()));

        let request = encode_answers(AnswerEncoding::OptionIndex, &questions(), &answers);
        assert!(request.answers.is_empty());
    }

    #[test]
    fn test_raw_keeps_recorded_values() {
        let mut answers = BTreeMap::new();
        answers.insert(1, AnswerValue::Text("Paris".to_string()));
        answers.insert(2, AnswerValue::Index(1));

        let request = encode_answers(AnswerEncoding::Raw, &questions(), &answers);
        assert_eq!(
            request.answers.get("1"),
            Some(&AnswerValue::Text("Paris".to_string()))
        );
        assert_eq!(request.answers.get("2"), Some(&AnswerValue::Index(1)));
    }
}
