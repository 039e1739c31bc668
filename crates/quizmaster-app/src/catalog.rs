/*
[INPUT]:  Available quizzes, subjects and chapters fetched for the student catalog
[OUTPUT]: Filtered quiz and chapter lists for display
[POS]:    Presentation helpers - student quiz catalog filtering
[UPDATE]: When adding catalog filters or searchable fields
*/

use quizmaster_client::{Chapter, QuizSummary};

/// Subject / chapter / free-text filter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFilter {
    pub subject_id: Option<u64>,
    pub chapter_id: Option<u64>,
    pub search: String,
}

impl QuizFilter {
    /// Change the subject; clearing it also clears the chapter
    pub fn select_subject(&mut self, subject_id: Option<u64>) {
        if subject_id.is_none() {
            self.chapter_id = None;
        }
        self.subject_id = subject_id;
    }

    /// Drop a chapter selection that no longer belongs to the fetched chapters
    pub fn reconcile_chapter(&mut self, chapters: &[Chapter]) {
        if let Some(chapter_id) = self.chapter_id
            && !chapters.iter().any(|chapter| chapter.id == chapter_id)
        {
            self.chapter_id = None;
        }
    }

    pub fn has_active_filters(&self) -> bool {
        self.subject_id.is_some() || self.chapter_id.is_some() || !self.search.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Chapters of the selected subject (all when no subject is chosen)
    pub fn chapters_for<'a>(&self, chapters: &'a [Chapter]) -> Vec<&'a Chapter> {
        chapters
            .iter()
            .filter(|chapter| match self.subject_id {
                Some(subject_id) => chapter.subject_id == Some(subject_id),
                None => true,
            })
            .collect()
    }

    pub fn apply<'a>(&self, quizzes: &'a [QuizSummary]) -> Vec<&'a QuizSummary> {
        let query = self.search.trim().to_lowercase();
        quizzes
            .iter()
            .filter(|quiz| self.subject_id.is_none_or(|id| quiz.subject_id == id))
            .filter(|quiz| self.chapter_id.is_none_or(|id| quiz.chapter_id == id))
            .filter(|quiz| {
                query.is_empty()
                    || [
                        &quiz.title,
                        &quiz.description,
                        &quiz.subject_name,
                        &quiz.chapter_name,
                    ]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .collect()
    }
}
