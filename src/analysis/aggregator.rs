//! Conversation aggregation and statistics.
//!
//! This module folds per-record classifications into a single
//! [`AnalysisSummary`] and computes text summaries of it.

use super::classifier::classify;
use crate::models::{AnalysisSummary, Bucket, ConversationRecord, Tally};
use tracing::debug;

/// Entries kept per counter mapping.
pub const TOP_CATEGORIES: usize = 10;

/// Pain points kept in the summary.
pub const MAX_PAIN_POINTS: usize = 5;

/// Classify every conversation and aggregate the counts.
pub fn analyze_conversations(records: &[ConversationRecord]) -> AnalysisSummary {
    let mut workflow_patterns = Tally::new();
    let mut domain_areas = Tally::new();
    let mut repeated_tasks = Tally::new();
    let mut pain_points = Vec::new();

    for record in records {
        let classification = classify(record);

        for pattern in classification.workflows {
            workflow_patterns.increment(pattern);
        }
        for domain in classification.domains {
            domain_areas.increment(domain);
        }
        for task in classification.tasks {
            repeated_tasks.increment(task);
        }
        if let Some(pain_point) = classification.pain_point {
            pain_points.push(pain_point);
        }
    }

    debug!(
        "Scanned {} conversations, {} pain points flagged",
        records.len(),
        pain_points.len()
    );
    pain_points.truncate(MAX_PAIN_POINTS);

    AnalysisSummary {
        workflow_patterns: workflow_patterns.most_common(TOP_CATEGORIES),
        domain_areas: domain_areas.most_common(TOP_CATEGORIES),
        repeated_tasks: repeated_tasks.most_common(TOP_CATEGORIES),
        pain_points,
        total_conversations: records.len(),
    }
}

/// Render one tally as `- Label: count` lines, highest first.
fn tally_lines<K: Bucket>(tally: &Tally<K>) -> Vec<String> {
    tally
        .iter()
        .map(|(bucket, count)| format!("- {}: {}", bucket.label(), count))
        .collect()
}

/// Generate a plain-text summary of the analysis counts.
pub fn generate_summary_text(summary: &AnalysisSummary) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Conversations Analyzed: {}",
        summary.total_conversations
    ));

    let sections = [
        ("Workflow Patterns:", tally_lines(&summary.workflow_patterns)),
        ("Domain Areas:", tally_lines(&summary.domain_areas)),
        ("Repeated Tasks:", tally_lines(&summary.repeated_tasks)),
    ];

    for (heading, entries) in sections {
        if entries.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.extend(entries);
    }

    if !summary.pain_points.is_empty() {
        lines.push(String::new());
        lines.push("Pain Points:".to_string());
        for pain_point in &summary.pain_points {
            lines.push(format!("- {}: {}", pain_point.title, pain_point.context));
        }
    }

    lines.join("\n")
}
