use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::render::RenderConfigError, config::LoadError, domain::error::DomainError,
    infra::error::InfraError, presentation::views::TemplateRenderError,
};

/// Top-level error surfaced by the `quizmark` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error(transparent)]
    RenderConfig(#[from] RenderConfigError),
}

impl AppError {
    /// Messages of this error and every source below it, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = StdError::source(self);
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        messages
    }
}
