//! Textual comparison of two DXF outputs, e.g. the local pipeline against the
//! remote conversion server, rendered as a Markdown report.

use indexmap::IndexMap;
use similar::{ChangeTag, TextDiff};

/// Holds the results of a DXF comparison, formatted as a Markdown report.
#[derive(Debug, Clone, PartialEq)]
pub struct DxfDiffReport {
    pub markdown_report: String,
    pub has_differences: bool,
    pub lines_added: usize,
    pub lines_removed: usize,
}

/// Counts entities (`0` group code followed by an entity name) inside the
/// ENTITIES section, keyed by entity type in order of first appearance.
pub fn entity_counts(dxf: &str) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    let mut lines = dxf.lines().map(str::trim);
    let mut in_entities = false;

    while let Some(code) = lines.next() {
        let Some(value) = lines.next() else {
            break;
        };
        match (code, value) {
            ("2", "ENTITIES") => in_entities = true,
            ("0", "ENDSEC") => in_entities = false,
            ("0", entity) if in_entities => *counts.entry(entity.to_string()).or_insert(0) += 1,
            _ => {}
        }
    }
    counts
}

/// Compares two DXF texts and generates a Markdown report with an entity
/// summary and a unified diff.
///
/// # Arguments
///
/// * `base_dxf` - The reference DXF text.
/// * `changed_dxf` - The DXF text to compare against it.
/// * `base_name`, `changed_name` - Labels used in the report headings.
///
/// # Returns
///
/// A [`DxfDiffReport`] with the Markdown text and added/removed line counts.
pub fn compare_dxf_content(
    base_dxf: &str,
    changed_dxf: &str,
    base_name: &str,
    changed_name: &str,
) -> DxfDiffReport {
    let has_differences = base_dxf != changed_dxf;
    let mut report = String::new();

    report.push_str("# Summary of DXF Changes\n\n");
    report.push_str("---\n");
    report.push_str(&format!(
        "## Comparison: `{}` vs `{}`\n\n",
        base_name, changed_name
    ));

    let base_counts = entity_counts(base_dxf);
    let changed_counts = entity_counts(changed_dxf);
    let mut kinds: Vec<&String> = base_counts.keys().collect();
    kinds.extend(changed_counts.keys().filter(|k| !base_counts.contains_key(*k)));
    if !kinds.is_empty() {
        report.push_str(&format!("| Entity | `{}` | `{}` |\n", base_name, changed_name));
        report.push_str("|---|---:|---:|\n");
        for kind in kinds {
            report.push_str(&format!(
                "| {} | {} | {} |\n",
                kind,
                base_counts.get(kind).copied().unwrap_or(0),
                changed_counts.get(kind).copied().unwrap_or(0)
            ));
        }
        report.push('\n');
    }

    let mut lines_added = 0;
    let mut lines_removed = 0;
    if has_differences {
        let diff = TextDiff::from_lines(base_dxf, changed_dxf);
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => lines_added += 1,
                ChangeTag::Delete => lines_removed += 1,
                ChangeTag::Equal => (),
            }
        }
        let hunks = diff
            .unified_diff()
            .header(base_name, changed_name)
            .context_radius(3)
            .to_string();

        report.push_str("> DXF files differ.\n");
        report.push_str(&format!("> - Lines Added: {}\n", lines_added));
        report.push_str(&format!("> - Lines Removed: {}\n\n", lines_removed));
        report.push_str("```diff\n");
        report.push_str(&hunks);
        if !hunks.ends_with('\n') {
            report.push('\n');
        }
        report.push_str("```\n");
    } else {
        report.push_str("> No textual differences found between DXF files.\n");
    }

    report.push_str("\n---\n");

    DxfDiffReport {
        markdown_report: report,
        has_differences,
        lines_added,
        lines_removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n10\n0\n20\n0\n0\nARC\n8\n0\n0\nENDSEC\n0\nEOF\n";
    const CHANGED: &str = "0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n10\n0\n20\n5\n0\nLINE\n8\n0\n0\nENDSEC\n0\nEOF\n";

    #[test]
    fn counts_entities_only_inside_entities_section() {
        let counts = entity_counts(BASE);
        assert_eq!(counts.get("LINE"), Some(&1));
        assert_eq!(counts.get("ARC"), Some(&1));
        assert_eq!(counts.get("SECTION"), None);
        assert_eq!(counts.get("EOF"), None);
    }

    #[test]
    fn identical_outputs_report_no_differences() {
        let result = compare_dxf_content(BASE, BASE, "local.dxf", "remote.dxf");
        assert!(!result.has_differences);
        assert_eq!((result.lines_added, result.lines_removed), (0, 0));
        assert!(result.markdown_report.contains("# Summary of DXF Changes"));
        assert!(result
            .markdown_report
            .contains("## Comparison: `local.dxf` vs `remote.dxf`"));
        assert!(result
            .markdown_report
            .contains("> No textual differences found between DXF files."));
        assert!(result.markdown_report.ends_with("---\n"));
    }

    #[test]
    fn differing_outputs_include_summary_and_unified_diff() {
        let result = compare_dxf_content(BASE, CHANGED, "local.dxf", "remote.dxf");
        assert!(result.has_differences);
        let report = &result.markdown_report;
        assert!(report.contains("| LINE | 1 | 2 |"), "{report}");
        assert!(report.contains("| ARC | 1 | 0 |"), "{report}");
        assert!(report.contains("> DXF files differ."));
        assert!(report.contains("```diff"));
        assert!(report.contains("--- local.dxf"));
        assert!(report.contains("+++ remote.dxf"));
        assert!(report.contains("-ARC\n"));
        assert!(result.lines_added > 0 && result.lines_removed > 0);
    }
}
