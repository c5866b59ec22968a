//! Keyword rule tables and per-record classification.
//!
//! Every family is an ordered table of `(bucket, matcher)` pairs evaluated
//! against the lowercased combined text of a conversation. Families are
//! independent and a record may land in any number of buckets.

use crate::models::{ConversationRecord, DomainArea, PainPoint, RepeatedTask, WorkflowPattern};
use tracing::trace;

/// Substring test over a record's combined text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// At least one keyword occurs.
    AnyOf(&'static [&'static str]),
    /// Every keyword occurs somewhere in the same text.
    AllOf(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, content: &str) -> bool {
        match self {
            Matcher::AnyOf(keywords) => keywords.iter().any(|kw| content.contains(kw)),
            Matcher::AllOf(keywords) => keywords.iter().all(|kw| content.contains(kw)),
        }
    }
}

/// A bucket and the condition that increments it.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<K> {
    pub bucket: K,
    pub matcher: Matcher,
}

pub const WORKFLOW_RULES: [KeywordRule<WorkflowPattern>; 5] = [
    KeywordRule {
        bucket: WorkflowPattern::BusinessAutomation,
        matcher: Matcher::AnyOf(&[
            "automate",
            "automation",
            "workflow",
            "process",
            "integrate",
            "sync",
        ]),
    },
    KeywordRule {
        bucket: WorkflowPattern::ClientConsulting,
        matcher: Matcher::AnyOf(&["client", "proposal", "consulting", "recommend", "help them"]),
    },
    KeywordRule {
        bucket: WorkflowPattern::ResearchAnalysis,
        matcher: Matcher::AnyOf(&["search", "find", "research", "analyze", "compare", "evaluate"]),
    },
    KeywordRule {
        bucket: WorkflowPattern::DocumentCreation,
        matcher: Matcher::AnyOf(&["document", "report", "presentation", "spreadsheet", "template"]),
    },
    KeywordRule {
        bucket: WorkflowPattern::Development,
        matcher: Matcher::AnyOf(&["code", "script", "develop", "build", "program", "application"]),
    },
];

pub const DOMAIN_RULES: [KeywordRule<DomainArea>; 5] = [
    KeywordRule {
        bucket: DomainArea::HealthcareInsurance,
        matcher: Matcher::AnyOf(&["insurance", "health"]),
    },
    KeywordRule {
        bucket: DomainArea::Finance,
        matcher: Matcher::AnyOf(&["financial", "loan", "investment"]),
    },
    KeywordRule {
        bucket: DomainArea::ApiIntegration,
        matcher: Matcher::AnyOf(&["api", "integration"]),
    },
    KeywordRule {
        bucket: DomainArea::DataManagement,
        matcher: Matcher::AnyOf(&["data", "database"]),
    },
    KeywordRule {
        bucket: DomainArea::DevelopmentEnvironment,
        matcher: Matcher::AnyOf(&["github", "codespace"]),
    },
];

// Cleanup and skill creation need both concepts; setup needs either signal.
pub const TASK_RULES: [KeywordRule<RepeatedTask>; 3] = [
    KeywordRule {
        bucket: RepeatedTask::ContactCleanup,
        matcher: Matcher::AllOf(&["contacts", "clean"]),
    },
    KeywordRule {
        bucket: RepeatedTask::SkillCreation,
        matcher: Matcher::AllOf(&["skill", "build"]),
    },
    KeywordRule {
        bucket: RepeatedTask::EnvironmentSetup,
        matcher: Matcher::AnyOf(&["setup", "configure"]),
    },
];

pub const PAIN_POINT_TRIGGER: Matcher = Matcher::AnyOf(&["error", "issue", "problem"]);

/// Characters of combined text kept as pain-point context.
pub const PAIN_POINT_EXCERPT_CHARS: usize = 200;

/// Buckets from one family whose matcher accepts `content`, in table order.
pub fn matching_buckets<K: Copy>(rules: &[KeywordRule<K>], content: &str) -> Vec<K> {
    rules
        .iter()
        .filter(|rule| rule.matcher.matches(content))
        .map(|rule| rule.bucket)
        .collect()
}

/// Every bucket a single conversation falls into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub workflows: Vec<WorkflowPattern>,
    pub domains: Vec<DomainArea>,
    pub tasks: Vec<RepeatedTask>,
    pub pain_point: Option<PainPoint>,
}

/// Classify one conversation against all rule families.
pub fn classify(record: &ConversationRecord) -> Classification {
    let content = record.content();

    let pain_point = PAIN_POINT_TRIGGER.matches(&content).then(|| PainPoint {
        title: record.title.clone(),
        context: content.chars().take(PAIN_POINT_EXCERPT_CHARS).collect(),
    });

    let classification = Classification {
        workflows: matching_buckets(&WORKFLOW_RULES, &content),
        domains: matching_buckets(&DOMAIN_RULES, &content),
        tasks: matching_buckets(&TASK_RULES, &content),
        pain_point,
    };

    trace!(title = %record.title, ?classification, "Classified conversation");

    classification
}
