//! Markdown proposal for human review
//!
//! Projects are grouped by category (categories in lexicographic order) and
//! listed by suggested name within each group. Ties keep inventory order.

use chrono::{DateTime, TimeZone};
use organizer_sdk::types::AnalyzedProject;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Write;

/// Render the proposal document.
pub fn render_proposal<Tz>(projects: &[AnalyzedProject], generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut by_category: BTreeMap<&str, Vec<&AnalyzedProject>> = BTreeMap::new();
    for project in projects {
        by_category
            .entry(project.analysis.category.as_str())
            .or_default()
            .push(project);
    }

    let mut out = String::new();

    // String formatting into a String cannot fail
    let _ = write!(
        out,
        "# Project Intelligence Report\n\n\
         Generated: {}\n\
         Total projects: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        projects.len()
    );

    out.push_str("## Summary by Category\n\n");
    for (category, members) in &by_category {
        let _ = writeln!(out, "- **{}**: {} projects", category, members.len());
    }

    for (category, members) in &mut by_category {
        let _ = write!(out, "\n## {}\n\n", category.to_uppercase());

        members.sort_by(|a, b| a.analysis.suggested_name.cmp(&b.analysis.suggested_name));

        for project in members.iter() {
            write_entry(&mut out, project);
        }
    }

    out
}

fn write_entry(out: &mut String, project: &AnalyzedProject) {
    let ai = &project.analysis;
    let record = &project.record;

    let _ = write!(out, "### {}\n\n", ai.suggested_name);
    let _ = writeln!(out, "**Original**: {}", record.name);
    let _ = writeln!(out, "**Path**: `{}`", record.original_path_or_unknown());
    let _ = writeln!(out, "**Business Context**: {}", ai.business_context);
    let _ = writeln!(out, "**Tech Stack**: {}", ai.tech_stack.join(", "));

    if !ai.status_flags.is_empty() {
        let _ = writeln!(out, "**Flags**: {}", ai.status_flags.join(", "));
    }

    let _ = write!(out, "\n{}\n\n", ai.description);

    if let Some(remote) = record.git.remote_url() {
        let _ = writeln!(out, "**Git**: {}", remote);
    }

    out.push_str("---\n\n");
}
