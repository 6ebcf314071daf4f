//! Shared helpers for analysis tests: wrap a method body in a class,
//! analyze it, and locate expected report lines by marker comment.

use crate::analysis;
use crate::findings::{Finding, FindingKind};
use crate::parse::parse_unit;

const MARKER: &str = "//mark";

pub(crate) fn class_source(body: &str) -> String {
    format!("public class Test {{\n{body}\n}}")
}

pub(crate) fn analyze_class_body(body: &str) -> Vec<Finding> {
    let unit = parse_unit(&class_source(body));
    analysis::analyze_unit(&unit)
}

/// 1-based line of the statement directly below the `//mark` comment in
/// the assembled source.
pub(crate) fn marked_line(body: &str) -> u32 {
    let source = class_source(body);
    let index = source
        .lines()
        .position(|line| line.contains(MARKER))
        .expect("body must contain a //mark comment");
    index as u32 + 2
}

pub(crate) fn kinds(findings: &[Finding]) -> Vec<FindingKind> {
    findings.iter().map(|finding| finding.kind).collect()
}
