use askama::{Error as AskamaError, Template};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }

    /// Module path of the caller that failed to render.
    pub fn origin(&self) -> &'static str {
        self.source
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

/// One answer option. `html` is already rendered by the text pipeline.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub label: char,
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct QuestionView {
    pub id: u32,
    /// 1-indexed position on the sheet.
    pub number: usize,
    pub prompt_html: String,
    pub options: Vec<OptionView>,
}

#[derive(Template)]
#[template(path = "quiz/sheet.html")]
pub struct QuizSheetTemplate {
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone)]
pub struct ResultItemView {
    pub id: u32,
    pub number: usize,
    pub prompt_html: String,
    pub user_answer: String,
    pub answered: bool,
    pub correct_answer: String,
    pub correct_text_html: String,
    pub is_correct: bool,
    /// Empty when no explanation applies.
    pub explanation_html: String,
}

#[derive(Template)]
#[template(path = "quiz/results.html")]
pub struct QuizResultsTemplate {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Percentage preformatted with two decimals.
    pub percentage: String,
    pub items: Vec<ResultItemView>,
}
