use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selects which conversion pipeline a piece of text goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Question prompts: detect pipe or whitespace delimited tables.
    Table,
    /// Explanation bodies: apply the minimal markdown passes.
    Markdown,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Table => "table",
            RenderMode::Markdown => "markdown",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How reserved HTML characters coming from the source text are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapePolicy {
    /// Escape `& < > " '` before conversion; only renderer markup survives.
    #[default]
    Escape,
    /// Keep source HTML, then filter the result through a tag whitelist.
    Sanitize,
    /// Insert source text verbatim. Only for trusted content.
    Raw,
}

impl EscapePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscapePolicy::Escape => "escape",
            EscapePolicy::Sanitize => "sanitize",
            EscapePolicy::Raw => "raw",
        }
    }
}

impl fmt::Display for EscapePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown escape policy `{0}`, expected one of: escape, sanitize, raw")]
pub struct ParseEscapePolicyError(String);

impl FromStr for EscapePolicy {
    type Err = ParseEscapePolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "escape" => Ok(EscapePolicy::Escape),
            "sanitize" => Ok(EscapePolicy::Sanitize),
            "raw" => Ok(EscapePolicy::Raw),
            _ => Err(ParseEscapePolicyError(value.to_string())),
        }
    }
}

/// Rendering request passed into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub mode: RenderMode,
    /// Question prompt or explanation body as received from the quiz source.
    pub text: String,
    /// Per-request override of the service's escape policy.
    #[serde(default)]
    pub escape: Option<EscapePolicy>,
}

impl RenderRequest {
    pub fn new(mode: RenderMode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
            escape: None,
        }
    }

    pub fn table(text: impl Into<String>) -> Self {
        Self::new(RenderMode::Table, text)
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self::new(RenderMode::Markdown, text)
    }

    pub fn with_escape(mut self, policy: EscapePolicy) -> Self {
        self.escape = Some(policy);
        self
    }
}

/// Dimensions of one table produced in table mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableShape {
    pub header_cells: usize,
    pub body_rows: usize,
}

/// Result of a render call. The renderer never fails; malformed input simply
/// yields fewer (or no) tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutput {
    pub html: String,
    /// Tables spliced into the output, in document order. Always empty in markdown mode.
    #[serde(default)]
    pub tables: Vec<TableShape>,
    /// Whether the markdown passes produced any code markup.
    #[serde(default)]
    pub contains_code: bool,
}

/// Trait exposed by the rendering pipeline. Implementations must be pure and
/// deterministic: the same request always yields the same output.
pub trait RenderService: Send + Sync {
    fn render(&self, request: &RenderRequest) -> RenderOutput;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_policy_parses_case_insensitively() {
        assert_eq!("Sanitize".parse::<EscapePolicy>(), Ok(EscapePolicy::Sanitize));
        assert_eq!(" raw ".parse::<EscapePolicy>(), Ok(EscapePolicy::Raw));
        assert!("verbatim".parse::<EscapePolicy>().is_err());
    }

    #[test]
    fn request_override_is_optional() {
        let request = RenderRequest::markdown("**hi**");
        assert_eq!(request.escape, None);

        let request = request.with_escape(EscapePolicy::Raw);
        assert_eq!(request.escape, Some(EscapePolicy::Raw));
        assert_eq!(request.mode, RenderMode::Markdown);
    }
}
