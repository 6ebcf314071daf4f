//! JSON rendering of findings.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ast::Span;
use crate::findings::Finding;

/// One row of the JSON report.
#[derive(Debug, Serialize)]
pub(crate) struct Row {
    #[serde(rename = "sourceLine")]
    pub(crate) source_line: u32,
    pub(crate) kind: &'static str,
    #[serde(rename = "offendingCode")]
    pub(crate) offending_code: String,
}

/// Renders findings against the source text they were raised on, keeping
/// analysis order.
pub(crate) fn render(findings: &[Finding], source: &str) -> Vec<Row> {
    findings
        .iter()
        .map(|finding| Row {
            source_line: finding.span.line,
            kind: finding.kind.as_str(),
            offending_code: snippet(source, finding.span),
        })
        .collect()
}

pub(crate) fn write<W: Write>(writer: &mut W, findings: &[Finding], source: &str) -> Result<()> {
    let rows = render(findings, source);
    serde_json::to_writer_pretty(&mut *writer, &rows).context("failed to serialize report")?;
    writer.write_all(b"\n").context("failed to write report")?;
    Ok(())
}

/// Span slice of the source with whitespace runs collapsed, so spans that
/// cross lines still print as one line of code.
fn snippet(source: &str, span: Span) -> String {
    source
        .get(span.start..span.end)
        .unwrap_or("")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
