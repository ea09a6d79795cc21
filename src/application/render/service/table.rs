//! Tabular-text detection for question prompts.
//!
//! Two shapes are recognised. Pipe-delimited rows (`A | B | C`) take priority and
//! may produce several tables from one prompt. Failing that, a truth-table layout
//! (`A B X` followed by rows of bits) is converted as a single whitespace table.
//! Everything that is not part of a table is passed through as a plain line, and all
//! segments are joined with `<br>`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::render::types::TableShape;

use super::escape::escape_html;

pub(crate) const LINE_BREAK: &str = "<br>";

/// Header-like sequence anywhere in the text: two capitals and an output column.
static TRUTH_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]\s+[A-Z]\s+[X-Z]").expect("valid regex"));
static TRUTH_HEADER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]\s+[A-Z]\s+[X-Z]").expect("valid regex"));
static BINARY_ROW_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[01]\s+[01]\s+[01]").expect("valid regex"));

/// Minimum number of non-empty `|`-separated cells for a line to count as a table row.
const MIN_PIPE_CELLS: usize = 3;

pub(crate) struct TableConversion {
    pub(crate) html: String,
    pub(crate) tables: Vec<TableShape>,
}

impl TableConversion {
    fn unchanged(text: &str) -> Self {
        Self {
            html: text.to_string(),
            tables: Vec::new(),
        }
    }
}

/// Rows of cells; the first row is the header. Only lives for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableBlock {
    header: Vec<String>,
    body: Vec<Vec<String>>,
}

impl TableBlock {
    /// Build a block from pipe-delimited lines. `None` when there are no lines.
    fn from_pipe_lines(lines: &[&str]) -> Option<Self> {
        let mut rows = lines.iter().map(|line| split_pipe_cells(line));
        let header = rows.next()?;
        Some(Self {
            header,
            body: rows.collect(),
        })
    }

    /// Build a block from a whitespace header line and its data lines. Rows with
    /// fewer cells than the header are dropped.
    fn from_whitespace_lines(header: &str, data: &[&str]) -> Self {
        let header = split_whitespace_cells(header);
        let body = data
            .iter()
            .map(|line| split_whitespace_cells(line))
            .filter(|cells| cells.len() >= header.len())
            .collect();
        Self { header, body }
    }

    pub(crate) fn shape(&self) -> TableShape {
        TableShape {
            header_cells: self.header.len(),
            body_rows: self.body.len(),
        }
    }

    pub(crate) fn to_html(&self, table_class: &str) -> String {
        let mut html = String::new();
        if table_class.is_empty() {
            html.push_str("<table>");
        } else {
            html.push_str("<table class=\"");
            html.push_str(&escape_html(table_class));
            html.push_str("\">");
        }

        html.push_str("<thead><tr>");
        for cell in &self.header {
            push_cell(&mut html, "th", cell);
        }
        html.push_str("</tr></thead><tbody>");

        for row in &self.body {
            html.push_str("<tr>");
            for cell in row {
                push_cell(&mut html, "td", cell);
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
        html
    }
}

fn push_cell(html: &mut String, tag: &str, content: &str) {
    html.push('<');
    html.push_str(tag);
    html.push('>');
    html.push_str(content);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
}

/// Convert any tabular segments of `text` into HTML tables.
pub(crate) fn convert_tabular_text(text: &str, table_class: &str) -> TableConversion {
    if text.contains('|') {
        convert_pipe_tables(text, table_class)
    } else if TRUTH_HEADER.is_match(text) {
        convert_truth_table(text, table_class)
    } else {
        TableConversion::unchanged(text)
    }
}

/// `x || y` and bare `| |` lines have fewer than three real cells and stay text.
pub(crate) fn is_pipe_table_line(line: &str) -> bool {
    line.split('|')
        .filter(|cell| !cell.trim().is_empty())
        .take(MIN_PIPE_CELLS)
        .count()
        >= MIN_PIPE_CELLS
}

fn is_truth_table_line(line: &str) -> bool {
    let line = line.trim_start();
    TRUTH_HEADER_LINE.is_match(line) || BINARY_ROW_LINE.is_match(line)
}

fn split_pipe_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_whitespace_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn convert_pipe_tables(text: &str, table_class: &str) -> TableConversion {
    let mut segments: Vec<String> = Vec::new();
    let mut tables = Vec::new();
    let mut group: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if is_pipe_table_line(line) {
            group.push(line);
            continue;
        }
        flush_pipe_group(&mut group, table_class, &mut segments, &mut tables);
        segments.push(line.to_string());
    }
    flush_pipe_group(&mut group, table_class, &mut segments, &mut tables);

    TableConversion {
        html: segments.join(LINE_BREAK),
        tables,
    }
}

fn flush_pipe_group(
    group: &mut Vec<&str>,
    table_class: &str,
    segments: &mut Vec<String>,
    tables: &mut Vec<TableShape>,
) {
    if group.is_empty() {
        return;
    }

    match TableBlock::from_pipe_lines(group) {
        Some(block) => {
            tables.push(block.shape());
            segments.push(block.to_html(table_class));
        }
        None => segments.push(String::new()),
    }
    group.clear();
}

fn convert_truth_table(text: &str, table_class: &str) -> TableConversion {
    let lines: Vec<&str> = text.split('\n').collect();

    let Some(start) = lines.iter().position(|line| is_truth_table_line(line)) else {
        return TableConversion::unchanged(text);
    };
    let end = lines[start + 1..]
        .iter()
        .position(|line| !is_truth_table_line(line))
        .map_or(lines.len(), |offset| start + 1 + offset);

    let block = TableBlock::from_whitespace_lines(lines[start], &lines[start + 1..end]);

    let mut segments: Vec<String> = Vec::with_capacity(lines.len() - (end - start) + 1);
    segments.extend(lines[..start].iter().map(|line| line.to_string()));
    segments.push(block.to_html(table_class));
    segments.extend(lines[end..].iter().map(|line| line.to_string()));

    TableConversion {
        html: segments.join(LINE_BREAK),
        tables: vec![block.shape()],
    }
}
