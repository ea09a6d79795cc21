//! Question sheet and results view for a quiz document.
//!
//! Prompts go through table mode, explanations through markdown mode, and option
//! texts are escaped with the renderer's policy. The result is one HTML fragment.

use std::sync::Arc;

use tracing::debug;

use crate::application::render::{QuizTextRenderService, RenderRequest, RenderService};
use crate::domain::quiz::{QuizDocument, option_label};
use crate::presentation::views::{
    OptionView, QuestionView, QuizResultsTemplate, QuizSheetTemplate, ResultItemView,
    TemplateRenderError, render_template,
};

#[derive(Clone)]
pub struct QuizSheetService {
    renderer: Arc<QuizTextRenderService>,
}

impl QuizSheetService {
    pub fn new(renderer: Arc<QuizTextRenderService>) -> Self {
        Self { renderer }
    }

    pub fn sheet_view(&self, document: &QuizDocument) -> QuizSheetTemplate {
        let questions = document
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionView {
                id: question.id,
                number: index + 1,
                prompt_html: self.prompt_html(&question.question),
                options: question
                    .options
                    .iter()
                    .enumerate()
                    .filter_map(|(position, text)| {
                        option_label(position).map(|label| OptionView {
                            label,
                            html: self.renderer.render_inline(text, None),
                        })
                    })
                    .collect(),
            })
            .collect();

        QuizSheetTemplate { questions }
    }

    pub fn results_view(&self, document: &QuizDocument) -> QuizResultsTemplate {
        let score = document.score();

        let items = document
            .questions()
            .iter()
            .zip(&score.outcomes)
            .enumerate()
            .map(|(index, (question, outcome))| {
                let explanation_html = outcome
                    .explanation
                    .as_deref()
                    .map(|body| self.renderer.render(&RenderRequest::markdown(body)).html)
                    .unwrap_or_default();
                let correct_text_html = question
                    .correct_text()
                    .map(|text| self.renderer.render_inline(text, None))
                    .unwrap_or_default();

                ResultItemView {
                    id: outcome.id,
                    number: index + 1,
                    prompt_html: self.prompt_html(&question.question),
                    user_answer: outcome.user_answer.clone().unwrap_or_default(),
                    answered: outcome.user_answer.is_some(),
                    correct_answer: outcome.correct_answer.clone(),
                    correct_text_html,
                    is_correct: outcome.is_correct,
                    explanation_html,
                }
            })
            .collect();

        debug!(
            target = "application::quiz",
            total = score.total_questions,
            correct = score.correct_answers,
            percentage = score.percentage,
            "scored quiz document"
        );

        QuizResultsTemplate {
            total_questions: score.total_questions,
            correct_answers: score.correct_answers,
            percentage: format!("{:.2}", score.percentage),
            items,
        }
    }

    pub fn render_sheet(&self, document: &QuizDocument) -> Result<String, TemplateRenderError> {
        render_template(self.sheet_view(document))
    }

    pub fn render_results(&self, document: &QuizDocument) -> Result<String, TemplateRenderError> {
        render_template(self.results_view(document))
    }

    fn prompt_html(&self, prompt: &str) -> String {
        self.renderer.render(&RenderRequest::table(prompt)).html
    }
}
