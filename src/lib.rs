//! Quiz text rendering: turns question prompts and explanation bodies into HTML.
//!
//! Prompts run through table mode, which finds pipe-delimited or truth-table text
//! and converts it into `<table>` markup. Explanations run through markdown mode, a
//! short fixed sequence of rewrites (headings, bold, code, line breaks, rules and
//! marker emoji). Both are reachable through [`application::render`], and
//! [`application::quiz`] composes them into a question sheet and a results view.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
