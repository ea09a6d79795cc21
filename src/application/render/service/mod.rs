mod config;
mod escape;
mod markdown;
mod table;

use std::{borrow::Cow, sync::Arc};

use metrics::counter;
use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;
use tracing::{debug, trace};

use crate::application::render::types::{
    EscapePolicy, RenderMode, RenderOutput, RenderRequest, RenderService,
};
use crate::config::DEFAULT_TABLE_CLASS;

use self::config::build_sanitizer;
use escape::escape_html;
use markdown::{MarkdownConversion, convert_markdown};
use table::{TableConversion, convert_tabular_text};

/// Text renderer for quiz prompts (table mode) and explanations (markdown mode).
pub struct QuizTextRenderService {
    config: RenderPipelineConfig,
    sanitizer: ammonia::Builder<'static>,
}

impl QuizTextRenderService {
    pub fn new(config: RenderPipelineConfig) -> Self {
        Self {
            config,
            sanitizer: build_sanitizer(),
        }
    }

    /// Escape a fragment that bypasses the conversion passes (option labels,
    /// answer letters) with the same policy a request would get.
    pub fn render_inline(&self, text: &str, policy: Option<EscapePolicy>) -> String {
        let policy = policy.unwrap_or(self.config.escape);
        let escaped = escape_stage(text, policy);
        sanitize_stage(escaped.into_owned(), policy, &self.sanitizer)
    }
}

static RENDER_SERVICE: Lazy<Arc<QuizTextRenderService>> =
    Lazy::new(|| Arc::new(QuizTextRenderService::new(active_render_config())));

/// Access the shared render service instance, initialised on first use.
pub fn render_service() -> Arc<QuizTextRenderService> {
    Arc::clone(&RENDER_SERVICE)
}

impl Default for QuizTextRenderService {
    fn default() -> Self {
        Self::new(RenderPipelineConfig::default())
    }
}

impl RenderService for QuizTextRenderService {
    fn render(&self, request: &RenderRequest) -> RenderOutput {
        let policy = request.escape.unwrap_or(self.config.escape);
        counter!("quizmark_render_total", "mode" => request.mode.as_str()).increment(1);

        let text = normalize_line_endings(&request.text);
        let source = escape_stage(&text, policy);
        let output = match request.mode {
            RenderMode::Table => table_stage(&source, &self.config.table_class),
            RenderMode::Markdown => markdown_stage(&source),
        };

        let RenderOutput {
            html,
            tables,
            contains_code,
        } = output;
        let html = sanitize_stage(html, policy, &self.sanitizer);

        debug!(
            target = "application::render",
            mode = %request.mode,
            policy = %policy,
            tables = tables.len(),
            contains_code,
            "rendered quiz text"
        );

        RenderOutput {
            html,
            tables,
            contains_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPipelineConfig {
    pub escape: EscapePolicy,
    pub table_class: String,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            escape: EscapePolicy::default(),
            table_class: DEFAULT_TABLE_CLASS.to_string(),
        }
    }
}

impl From<&crate::config::RenderSettings> for RenderPipelineConfig {
    fn from(settings: &crate::config::RenderSettings) -> Self {
        Self {
            escape: settings.escape,
            table_class: settings.table_class.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderConfigError {
    #[error("render service already configured")]
    AlreadyConfigured,
}

static RENDER_PIPELINE_CONFIG: OnceCell<RenderPipelineConfig> = OnceCell::new();

pub fn configure_render_service(config: RenderPipelineConfig) -> Result<(), RenderConfigError> {
    RENDER_PIPELINE_CONFIG
        .set(config)
        .map_err(|_| RenderConfigError::AlreadyConfigured)
}

fn active_render_config() -> RenderPipelineConfig {
    RENDER_PIPELINE_CONFIG.get().cloned().unwrap_or_default()
}

/// Lines are split on `\n` only, so CRLF input is folded first.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn escape_stage(text: &str, policy: EscapePolicy) -> Cow<'_, str> {
    match policy {
        EscapePolicy::Escape => escape_html(text),
        EscapePolicy::Sanitize | EscapePolicy::Raw => Cow::Borrowed(text),
    }
}

fn table_stage(text: &str, table_class: &str) -> RenderOutput {
    let TableConversion { html, tables } = convert_tabular_text(text, table_class);
    if !tables.is_empty() {
        counter!("quizmark_tables_rendered_total").increment(tables.len() as u64);
        trace!(
            target = "application::render::table",
            tables = ?tables,
            "converted tabular text"
        );
    }

    RenderOutput {
        html,
        tables,
        contains_code: false,
    }
}

fn markdown_stage(text: &str) -> RenderOutput {
    let MarkdownConversion {
        html,
        contains_code,
    } = convert_markdown(text);

    RenderOutput {
        html,
        tables: Vec::new(),
        contains_code,
    }
}

fn sanitize_stage(
    html: String,
    policy: EscapePolicy,
    sanitizer: &ammonia::Builder<'static>,
) -> String {
    match policy {
        EscapePolicy::Sanitize => sanitizer.clean(&html).to_string(),
        EscapePolicy::Escape | EscapePolicy::Raw => html,
    }
}
