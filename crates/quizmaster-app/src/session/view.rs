/*
[INPUT]:  Session snapshots
[OUTPUT]: Derived display values (clock text, question markers, progress)
[POS]:    Session layer - pure helpers recomputed on read
[UPDATE]: When the quiz page needs a new derived value
*/

use super::quiz::SessionSnapshot;

/// Palette marker for the question navigator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMarker {
    Current,
    Answered,
    Unanswered,
}

/// `m:ss` countdown text
pub fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub fn answered_count(snapshot: &SessionSnapshot) -> usize {
    snapshot
        .questions
        .iter()
        .filter(|question| snapshot.answers.contains_key(&question.id))
        .count()
}

pub fn question_marker(snapshot: &SessionSnapshot, index: usize) -> QuestionMarker {
    if snapshot.current_question == index {
        return QuestionMarker::Current;
    }
    match snapshot.questions.get(index) {
        Some(question) if snapshot.answers.contains_key(&question.id) => QuestionMarker::Answered,
        _ => QuestionMarker::Unanswered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmaster_client::{AnswerValue, Question};

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(60), "1:00");
        assert_eq!(format_time(905), "15:05");
    }

    #[test]
    fn test_markers_and_progress() {
        let mut snapshot = SessionSnapshot::loading(3);
        snapshot.questions = (1..=3)
            .map(|id| Question {
                id,
                text: format!("Q{id}"),
                options: vec!["a".to_string(), "b".to_string()],
                marks: 1,
            })
            .collect();
        snapshot.answers.insert(2, AnswerValue::Index(0));
        snapshot.answers.insert(99, AnswerValue::Index(0));

        assert_eq!(question_marker(&snapshot, 0), QuestionMarker::Current);
        assert_eq!(question_marker(&snapshot, 1), QuestionMarker::Answered);
        assert_eq!(question_marker(&snapshot, 2), QuestionMarker::Unanswered);
        assert_eq!(question_marker(&snapshot, 7), QuestionMarker::Unanswered);
        assert_eq!(answered_count(&snapshot), 1);
    }
}
