//! Text-to-markup rendering for quiz content.
//!
//! The pipeline is pure: it accepts question or explanation text, produces
//! deterministic HTML, and never fails. Escaping, conversion and sanitisation run
//! as separate stages so the escape policy can be chosen per request.

mod service;
mod types;

pub use service::{
    QuizTextRenderService, RenderConfigError, RenderPipelineConfig, configure_render_service,
    render_service,
};
pub use types::{
    EscapePolicy, ParseEscapePolicyError, RenderMode, RenderOutput, RenderRequest, RenderService,
    TableShape,
};
