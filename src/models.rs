//! Data models for the skill analyzer.
//!
//! This module contains the core data structures shared by the
//! classifier, the recommendation rules and the report generator.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single conversation summary supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Conversation title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Free-text summary of the conversation.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl ConversationRecord {
    /// Creates a record from a title and a summary.
    #[allow(dead_code)] // Constructor for library-style callers and tests
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
        }
    }

    /// Lowercased `title + " " + summary`, the text every keyword rule runs against.
    pub fn content(&self) -> String {
        format!(
            "{} {}",
            self.title.to_lowercase(),
            self.summary.to_lowercase()
        )
    }
}

/// A named counter bucket inside one rule family.
pub trait Bucket: Copy + Eq + fmt::Debug {
    /// Machine-readable key, e.g. `client_consulting`.
    fn key(&self) -> &'static str;

    /// Human-readable label, e.g. `Client Consulting`.
    fn label(&self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Coarse category of conversational activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowPattern {
    BusinessAutomation,
    ClientConsulting,
    ResearchAnalysis,
    DocumentCreation,
    Development,
}

impl Bucket for WorkflowPattern {
    fn key(&self) -> &'static str {
        match self {
            WorkflowPattern::BusinessAutomation => "business_automation",
            WorkflowPattern::ClientConsulting => "client_consulting",
            WorkflowPattern::ResearchAnalysis => "research_analysis",
            WorkflowPattern::DocumentCreation => "document_creation",
            WorkflowPattern::Development => "development",
        }
    }
}

/// Coarse subject-matter category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainArea {
    HealthcareInsurance,
    Finance,
    ApiIntegration,
    DataManagement,
    DevelopmentEnvironment,
}

impl Bucket for DomainArea {
    fn key(&self) -> &'static str {
        match self {
            DomainArea::HealthcareInsurance => "healthcare_insurance",
            DomainArea::Finance => "finance",
            DomainArea::ApiIntegration => "api_integration",
            DomainArea::DataManagement => "data_management",
            DomainArea::DevelopmentEnvironment => "development_environment",
        }
    }
}

/// Narrow recurring chore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepeatedTask {
    ContactCleanup,
    SkillCreation,
    EnvironmentSetup,
}

impl Bucket for RepeatedTask {
    fn key(&self) -> &'static str {
        match self {
            RepeatedTask::ContactCleanup => "contact_cleanup",
            RepeatedTask::SkillCreation => "skill_creation",
            RepeatedTask::EnvironmentSetup => "environment_setup",
        }
    }
}

/// Occurrence counts per bucket, kept in first-seen order.
///
/// Buckets that never matched are absent; [`Tally::get`] reports them as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Bucket> Tally<K> {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `bucket`.
    pub fn increment(&mut self, bucket: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == bucket) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((bucket, 1)),
        }
    }

    /// Count for `bucket`, zero when it never matched.
    pub fn get(&self, bucket: K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| *k == bucket)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Keeps the `n` highest counts; ties keep first-seen order.
    pub fn most_common(mut self, n: usize) -> Self {
        self.entries.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        self.entries.truncate(n);
        self
    }

    /// Iterates over `(bucket, count)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.entries.iter().copied()
    }

    #[allow(dead_code)] // Utility for callers inspecting bucket coverage
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)] // Utility for callers inspecting bucket coverage
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Bucket> Serialize for Tally<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (bucket, count) in &self.entries {
            map.serialize_entry(bucket.key(), count)?;
        }
        map.end()
    }
}

/// A conversation flagged by error/issue/problem wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PainPoint {
    /// Original (non-lowercased) title of the conversation.
    pub title: String,
    /// First 200 characters of the lowercased combined text.
    pub context: String,
}

/// Aggregate counts produced by one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub workflow_patterns: Tally<WorkflowPattern>,
    pub domain_areas: Tally<DomainArea>,
    pub repeated_tasks: Tally<RepeatedTask>,
    pub pain_points: Vec<PainPoint>,
    pub total_conversations: usize,
}

/// Qualitative level used for impact and complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Medium => write!(f, "MEDIUM"),
            Level::High => write!(f, "HIGH"),
            Level::VeryHigh => write!(f, "VERY HIGH"),
        }
    }
}

/// A level plus a short explanation, rendered as `LEVEL - detail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub level: Level,
    pub detail: String,
}

impl Assessment {
    pub fn new(level: Level, detail: impl Into<String>) -> Self {
        Self {
            level,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.detail)
    }
}

impl Serialize for Assessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Confidence in a recommendation, expressed as a star count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EvidenceStrength(u8);

impl EvidenceStrength {
    pub const THREE_STARS: Self = Self(3);
    pub const FOUR_STARS: Self = Self(4);
    pub const FIVE_STARS: Self = Self(5);

    #[allow(dead_code)] // Numeric access for JSON consumers and tests
    pub fn stars(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for EvidenceStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "⭐".repeat(self.0 as usize))
    }
}

/// One synthesized skill suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Fixed rank of the rule that produced this recommendation (1-5).
    pub rank: u8,
    /// Machine-readable skill slug.
    pub name: String,
    pub title: String,
    pub description: String,
    /// Why the skill is suggested, quoting the triggering count.
    pub rationale: String,
    pub impact: Assessment,
    pub complexity: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_strength: Option<EvidenceStrength>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_savings_weekly: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_potential: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_even_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    pub key_features: Vec<String>,
}

impl Recommendation {
    /// Whether the dashboard should flag this skill as urgent.
    pub fn is_urgent(&self) -> bool {
        self.impact.level == Level::VeryHigh
    }
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of conversations analyzed.
    pub total_conversations: usize,
    /// Number of recommendations that fired.
    pub recommendation_count: usize,
    /// Version of the tool that produced the report.
    pub tool_version: String,
}

/// The complete skill report, as emitted in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct SkillReport {
    pub metadata: ReportMetadata,
    pub summary: AnalysisSummary,
    pub recommendations: Vec<Recommendation>,
}

impl SkillReport {
    /// Bundles a summary and its recommendations with fresh metadata.
    pub fn new(
        summary: AnalysisSummary,
        recommendations: Vec<Recommendation>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let metadata = ReportMetadata {
            generated_at,
            total_conversations: summary.total_conversations,
            recommendation_count: recommendations.len(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Self {
            metadata,
            summary,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_content_is_lowercased() {
        let record = ConversationRecord::new("Client PROPOSAL", "Automate Things");
        assert_eq!(record.content(), "client proposal automate things");
    }

    #[test]
    fn test_record_missing_and_null_fields() {
        let record: ConversationRecord = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(record, ConversationRecord::default());
        assert_eq!(record.content(), " ");
    }

    #[test]
    fn test_bucket_label() {
        assert_eq!(
            WorkflowPattern::BusinessAutomation.label(),
            "Business Automation"
        );
        assert_eq!(WorkflowPattern::Development.label(), "Development");
        assert_eq!(
            DomainArea::DevelopmentEnvironment.label(),
            "Development Environment"
        );
    }

    #[test]
    fn test_tally_counts_and_missing_buckets() {
        let mut tally = Tally::new();
        tally.increment(RepeatedTask::EnvironmentSetup);
        tally.increment(RepeatedTask::EnvironmentSetup);

        assert_eq!(tally.get(RepeatedTask::EnvironmentSetup), 2);
        assert_eq!(tally.get(RepeatedTask::ContactCleanup), 0);
        assert_eq!(tally.len(), 1);
    }

    #[test]
    fn test_tally_most_common_keeps_first_seen_order_on_ties() {
        let mut tally = Tally::new();
        tally.increment(DomainArea::Finance);
        tally.increment(DomainArea::DataManagement);
        tally.increment(DomainArea::ApiIntegration);
        tally.increment(DomainArea::ApiIntegration);

        let ranked: Vec<_> = tally.most_common(10).iter().collect();
        assert_eq!(
            ranked,
            vec![
                (DomainArea::ApiIntegration, 2),
                (DomainArea::Finance, 1),
                (DomainArea::DataManagement, 1),
            ]
        );
    }

    #[test]
    fn test_tally_serializes_as_ordered_map() {
        let mut tally = Tally::new();
        tally.increment(WorkflowPattern::Development);
        tally.increment(WorkflowPattern::ClientConsulting);

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"development":1,"client_consulting":1}"#);
    }

    #[test]
    fn test_assessment_display() {
        let impact = Assessment::new(Level::VeryHigh, "Saves hours");
        assert_eq!(impact.to_string(), "VERY HIGH - Saves hours");
        assert!(impact.to_string().starts_with("VERY HIGH"));
    }

    #[test]
    fn test_evidence_strength_display() {
        assert_eq!(EvidenceStrength::THREE_STARS.to_string(), "⭐⭐⭐");
        assert_eq!(EvidenceStrength::FIVE_STARS.stars(), 5);
        assert!(EvidenceStrength::FOUR_STARS < EvidenceStrength::FIVE_STARS);
    }
}
