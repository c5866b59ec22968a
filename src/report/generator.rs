//! Markdown report generation.
//!
//! This module renders the analysis summary and the ranked skill
//! recommendations into a Markdown document, or into JSON.

use crate::models::{AnalysisSummary, Bucket, Recommendation, SkillReport};
use anyhow::Result;

/// Heatmap glyph repeated once per heat level.
const HEAT_GLYPH: &str = "🔥";

/// Placeholder for missing fields in recommendation blocks.
const MISSING_FIELD: &str = "N/A";

/// Placeholder for missing fields in the ROI dashboard.
const MISSING_CELL: &str = "TBD";

const DEFAULT_NEXT_ACTION: &str = "Start by documenting your current workflow";

/// Generate a complete Markdown report.
///
/// `analysis_date` is printed verbatim in the header; everything else is
/// derived from the summary and the recommendations.
pub fn generate_markdown_report(
    summary: &AnalysisSummary,
    recommendations: &[Recommendation],
    analysis_date: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&generate_header(summary, analysis_date));
    output.push_str(&generate_heatmap_section(summary));
    output.push_str(&generate_executive_summary());

    for rec in recommendations {
        output.push_str(&generate_recommendation_block(rec));
    }

    output.push_str(&generate_roi_dashboard(recommendations));
    output.push_str(&generate_implementation_priority());

    output
}

/// Generate the title and metadata lines.
fn generate_header(summary: &AnalysisSummary, analysis_date: &str) -> String {
    let mut section = String::new();

    section.push_str("# Top 5 Claude Skills You Should Build\n\n");
    section.push_str(&format!("**Analysis Date:** {}\n", analysis_date));
    section.push_str(&format!(
        "**Conversations Analyzed:** {}\n\n",
        summary.total_conversations
    ));

    section
}

/// Number of heat glyphs for a pattern seen `count` times.
fn heat_level(count: usize) -> usize {
    (count / 2).clamp(1, 5)
}

/// Generate the workflow pattern heatmap.
fn generate_heatmap_section(summary: &AnalysisSummary) -> String {
    let mut section = String::new();

    section.push_str("## Your Workflow Pattern Heatmap\n\n");

    let mut patterns: Vec<_> = summary.workflow_patterns.iter().collect();
    patterns.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

    for (pattern, count) in patterns {
        section.push_str(&format!(
            "{} {} ({} conversations)\n",
            HEAT_GLYPH.repeat(heat_level(count)),
            pattern.label(),
            count
        ));
    }
    section.push_str("\n\n");

    section
}

/// Generate the fixed executive summary.
fn generate_executive_summary() -> String {
    let mut section = String::new();

    section.push_str("## Executive Summary\n\n");
    section.push_str("Based on analysis of your conversation history, these skills would:\n");
    section.push_str("- Accelerate your client consulting work\n");
    section.push_str("- Automate your most time-consuming repeated tasks\n");
    section.push_str("- Create billable service offerings\n");
    section.push_str("- Reduce environment setup friction\n");
    section.push_str("- Leverage your unique domain expertise\n\n");

    section
}

/// Generate the block for a single recommendation.
fn generate_recommendation_block(rec: &Recommendation) -> String {
    let mut block = String::new();

    let or_missing = |field: &Option<String>| field.as_deref().unwrap_or(MISSING_FIELD).to_string();
    let evidence = rec
        .evidence_strength
        .map(|strength| strength.to_string())
        .unwrap_or_else(|| MISSING_FIELD.to_string());

    block.push_str(&format!("## {}. {}\n\n", rec.rank, rec.title));
    block.push_str(&format!("**Skill Name:** `{}`\n", rec.name));
    block.push_str(&format!("**Impact:** {}\n", rec.impact));
    block.push_str(&format!("**Complexity:** {}\n", rec.complexity));
    block.push_str(&format!("**Evidence Strength:** {}\n\n", evidence));

    block.push_str("### Description\n");
    block.push_str(&format!("{}\n\n", rec.description));

    block.push_str("### Why This Skill?\n");
    block.push_str(&format!("{}\n\n", rec.rationale));

    block.push_str("### ROI Metrics\n");
    block.push_str(&format!(
        "- **Time Savings:** {} per week\n",
        or_missing(&rec.time_savings_weekly)
    ));
    block.push_str(&format!(
        "- **Revenue Potential:** {}\n",
        or_missing(&rec.revenue_potential)
    ));
    block.push_str(&format!(
        "- **Implementation Time:** {}\n",
        or_missing(&rec.implementation_time)
    ));
    block.push_str(&format!(
        "- **Break-Even Point:** {}\n\n",
        or_missing(&rec.break_even_point)
    ));

    block.push_str("### Key Features\n");
    for feature in &rec.key_features {
        block.push_str(&format!("- {}\n", feature));
    }
    block.push('\n');

    block.push_str("### Next Action\n");
    block.push_str(&format!(
        "📍 {}\n\n",
        rec.next_action.as_deref().unwrap_or(DEFAULT_NEXT_ACTION)
    ));

    block
}

/// Generate the ROI dashboard table.
fn generate_roi_dashboard(recommendations: &[Recommendation]) -> String {
    let mut section = String::new();

    section.push_str("## Skill ROI Dashboard\n\n");
    section.push_str("| Skill | Time Investment | Time Saved/Week | Annual Value | Priority |\n");
    section.push_str("|-------|----------------|-----------------|--------------|----------|\n");

    let or_tbd = |field: &Option<String>| field.as_deref().unwrap_or(MISSING_CELL).to_string();

    for rec in recommendations {
        let priority = if rec.is_urgent() {
            "🚀 URGENT"
        } else {
            "⭐ HIGH"
        };
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            rec.title,
            or_tbd(&rec.implementation_time),
            or_tbd(&rec.time_savings_weekly),
            or_tbd(&rec.revenue_potential),
            priority
        ));
    }
    section.push_str("\n\n");

    section
}

/// Generate the fixed implementation order.
///
/// Always names skills #3, #1 and #2, whichever rules fired.
fn generate_implementation_priority() -> String {
    let mut section = String::new();

    section.push_str("## Implementation Priority\n\n");
    section.push_str("**Start with:** Development Environment Automator (#3)\n");
    section.push_str("- You're losing hours to this weekly\n");
    section.push_str("- Immediate personal ROI\n");
    section.push_str("- Foundation for other skills\n\n");
    section.push_str("**Then build:** Client Automation Proposal Builder (#1)\n");
    section.push_str("- Directly monetizable\n");
    section.push_str("- Differentiates your consulting\n");
    section.push_str("- Faster deal cycles\n\n");
    section.push_str("**Finally:** Research Intelligence Synthesizer (#2)\n");
    section.push_str("- Supports all client work\n");
    section.push_str("- Improves recommendation quality\n");
    section.push_str("- Compounds in value over time\n");

    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SkillReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}
