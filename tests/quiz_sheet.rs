use std::sync::Arc;

use quizmark::{
    application::{quiz::QuizSheetService, render::QuizTextRenderService},
    domain::{error::DomainError, quiz::QuizDocument},
};

fn load_document() -> QuizDocument {
    QuizDocument::from_json(include_str!("fixtures/quiz.json")).expect("valid fixture")
}

fn service() -> QuizSheetService {
    QuizSheetService::new(Arc::new(QuizTextRenderService::default()))
}

#[test]
fn sheet_renders_every_question_with_tables_and_options() {
    let html = service()
        .render_sheet(&load_document())
        .expect("sheet renders");

    assert_eq!(html.matches("<section class=\"quiz-question\"").count(), 3);
    assert!(html.contains("id=\"question-101\""));
    assert!(html.contains(
        "Which gate produces this output?<br><table class=\"quiz-table\"><thead><tr><th>A</th><th>B</th><th>X</th></tr></thead>"
    ));
    assert!(html.contains("<tr><td>SSH</td><td>TCP</td><td>?</td></tr>"));
    assert!(html.contains("<span class=\"quiz-option-label\">D.</span> NAND"));
    assert!(html.contains("<span class=\"quiz-option-label\">C.</span> &lt;23&gt;"));
    assert!(!html.contains("<23>"));
}

#[test]
fn results_score_and_explain_wrong_answers() {
    let html = service()
        .render_results(&load_document())
        .expect("results render");

    assert!(html.contains("1 / 3 correct (33.33%)"));
    assert_eq!(html.matches("quiz-result-wrong").count(), 2);
    assert_eq!(html.matches("quiz-result-correct").count(), 1);
    assert_eq!(html.matches("class=\"quiz-explanation\"").count(), 1);
    assert!(html.contains("<h3>Why</h3><br><strong>OR</strong> outputs 1 when <code>A = 1</code>.<br><hr>"));
    assert!(html.contains("<span style=\"color: #dc3545\">\u{274C}</span> OR"));
    assert!(html.contains("A AND"));
    assert!(html.contains("No answer"));
}

#[test]
fn results_fall_back_to_generated_explanation() {
    let json = r#"[{"id": 7, "question": "2 + 2?", "options": ["3", "4"], "correct": ["B"], "user_answer": ["A"]}]"#;
    let document = QuizDocument::from_json(json).expect("valid document");

    let view = service().results_view(&document);

    assert_eq!(view.percentage, "0.00");
    insta::assert_snapshot!(
        view.items[0].explanation_html,
        @r#"<strong>Your answer:</strong> A <span style="color: #dc3545">❌</span><br><strong>Correct answer:</strong> B <span style="color: #28a745">✅</span><br><br><span style="color: #f0ad4e">💡</span> <strong>Tip:</strong> review the study material on this topic."#
    );
}

#[test]
fn duplicate_question_ids_are_rejected() {
    let json = r#"[
        {"id": 1, "question": "a", "options": ["x"]},
        {"id": 1, "question": "b", "options": ["y"]}
    ]"#;

    let err = QuizDocument::from_json(json).unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = QuizDocument::from_json("{\"id\": 1}").unwrap_err();
    assert!(matches!(err, DomainError::Parse(_)));
}
