//! Skill recommendation rules.
//!
//! Each rule is a pure function over the analysis summary that either
//! fires with a fully populated [`Recommendation`] or returns `None`.
//! Rules carry a fixed rank, so the output order never depends on
//! which rules happened to fire.

use crate::models::{
    AnalysisSummary, Assessment, DomainArea, EvidenceStrength, Level, Recommendation,
    RepeatedTask, WorkflowPattern,
};
use tracing::debug;

/// Upper bound on recommendations returned from one pass.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Signature shared by every skill rule.
pub type SkillRule = fn(&AnalysisSummary) -> Option<Recommendation>;

/// All rules, in rank order.
pub const SKILL_RULES: [SkillRule; 5] = [
    client_proposal_builder,
    research_synthesizer,
    dev_environment_automator,
    insurance_document_processor,
    data_cleanup_suite,
];

/// Static guidance attached to one skill.
struct SkillContent {
    rank: u8,
    name: &'static str,
    title: &'static str,
    description: &'static str,
    impact: (Level, &'static str),
    complexity: (Level, &'static str),
    time_savings_weekly: &'static str,
    revenue_potential: &'static str,
    implementation_time: &'static str,
    break_even_point: &'static str,
    next_action: &'static str,
    key_features: [&'static str; 5],
}

impl SkillContent {
    fn into_recommendation(
        self,
        rationale: String,
        evidence_strength: EvidenceStrength,
    ) -> Recommendation {
        Recommendation {
            rank: self.rank,
            name: self.name.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            rationale,
            impact: Assessment::new(self.impact.0, self.impact.1),
            complexity: Assessment::new(self.complexity.0, self.complexity.1),
            evidence_strength: Some(evidence_strength),
            time_savings_weekly: Some(self.time_savings_weekly.to_string()),
            revenue_potential: Some(self.revenue_potential.to_string()),
            implementation_time: Some(self.implementation_time.to_string()),
            break_even_point: Some(self.break_even_point.to_string()),
            next_action: Some(self.next_action.to_string()),
            key_features: self.key_features.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Fires on any client-facing conversation.
pub fn client_proposal_builder(summary: &AnalysisSummary) -> Option<Recommendation> {
    let count = summary
        .workflow_patterns
        .get(WorkflowPattern::ClientConsulting);
    if count == 0 {
        return None;
    }

    let strength = if count > 5 {
        EvidenceStrength::FIVE_STARS
    } else {
        EvidenceStrength::FOUR_STARS
    };

    let content = SkillContent {
        rank: 1,
        name: "client-automation-proposal-builder",
        title: "Client Automation Proposal Builder",
        description: "Automates creation of AI automation proposals for clients based on their industry and pain points",
        impact: (Level::High, "Directly monetizable, saves 2-4 hours per proposal"),
        complexity: (Level::Medium, "Requires industry templates and workflow analysis patterns"),
        time_savings_weekly: "4-6 hours",
        revenue_potential: "$10,000-$30,000 annually",
        implementation_time: "3-4 days",
        break_even_point: "After 2 proposals",
        next_action: "Start by mapping your standard proposal template structure and identifying common industry pain points",
        key_features: [
            "Industry-specific automation templates",
            "ROI calculation frameworks",
            "Process mapping and pain point analysis",
            "Proposal generation with case studies",
            "Implementation roadmap builder",
        ],
    };

    let rationale = format!(
        "You've had {} conversations about client work. This skill would encode your consulting methodology into reusable templates.",
        count
    );
    Some(content.into_recommendation(rationale, strength))
}

/// Fires once research-heavy conversations pass two.
pub fn research_synthesizer(summary: &AnalysisSummary) -> Option<Recommendation> {
    let count = summary
        .workflow_patterns
        .get(WorkflowPattern::ResearchAnalysis);
    if count <= 2 {
        return None;
    }

    let strength = if count > 8 {
        EvidenceStrength::FIVE_STARS
    } else {
        EvidenceStrength::FOUR_STARS
    };

    let content = SkillContent {
        rank: 2,
        name: "research-intelligence-synthesizer",
        title: "Research Intelligence Synthesizer",
        description: "Systematic research methodology for evaluating technologies, products, and vendors",
        impact: (Level::High, "Critical for client recommendations and product evaluations"),
        complexity: (Level::Medium, "Requires structured research workflows and validation criteria"),
        time_savings_weekly: "3-5 hours",
        revenue_potential: "$8,000-$20,000 annually",
        implementation_time: "2-3 days",
        break_even_point: "After 5 research projects",
        next_action: "Document your current research process and create a template for technology evaluation criteria",
        key_features: [
            "Multi-source research orchestration",
            "Competitive analysis frameworks",
            "Technology evaluation matrices",
            "Vendor assessment criteria",
            "Evidence-based recommendation builder",
        ],
    };

    let rationale = format!(
        "You've had {} research-heavy conversations. This skill would encode your research frameworks.",
        count
    );
    Some(content.into_recommendation(rationale, strength))
}

/// Fires once development-environment work appears more than once.
pub fn dev_environment_automator(summary: &AnalysisSummary) -> Option<Recommendation> {
    let count = summary
        .domain_areas
        .get(DomainArea::DevelopmentEnvironment);
    if count <= 1 {
        return None;
    }

    let content = SkillContent {
        rank: 3,
        name: "dev-environment-automator",
        title: "Development Environment Automator",
        description: "One-command setup of complete development environments with all tools and configs",
        impact: (Level::VeryHigh, "You personally lose hours to environment setup issues"),
        complexity: (Level::High, "Requires scripts for multiple environments and tools"),
        time_savings_weekly: "5-8 hours",
        revenue_potential: "$15,000-$25,000 annually",
        implementation_time: "4-6 days",
        break_even_point: "After 1 week",
        next_action: "List all the setup steps you repeat when creating a new environment, then script the top 3 most painful ones",
        key_features: [
            "GitHub Codespaces auto-configuration",
            "Claude Code + SuperClaude setup automation",
            "MCP server installation and config",
            "Dotfiles and shell configuration",
            "API key and secrets management",
        ],
    };

    let rationale = format!(
        "You've spent significant time on Codespaces, MCP, and environment setup across {} conversations.",
        count
    );
    Some(content.into_recommendation(rationale, EvidenceStrength::FIVE_STARS))
}

/// Fires on any healthcare or insurance conversation.
pub fn insurance_document_processor(summary: &AnalysisSummary) -> Option<Recommendation> {
    let count = summary.domain_areas.get(DomainArea::HealthcareInsurance);
    if count == 0 {
        return None;
    }

    let strength = if count > 3 {
        EvidenceStrength::FIVE_STARS
    } else {
        EvidenceStrength::THREE_STARS
    };

    let content = SkillContent {
        rank: 4,
        name: "insurance-document-processor",
        title: "Insurance Document Processor",
        description: "Automated insurance verification, comparison, and appeals generation",
        impact: (Level::VeryHigh, "Billable service offering, saves clients thousands"),
        complexity: (Level::VeryHigh, "Requires OCR, plan comparison logic, regulatory knowledge"),
        time_savings_weekly: "2-4 hours",
        revenue_potential: "$25,000-$50,000+ annually",
        implementation_time: "7-10 days",
        break_even_point: "After 2 client engagements",
        next_action: "Create a library of insurance document templates and common comparison scenarios",
        key_features: [
            "EOB and denial letter analysis",
            "Provider network verification automation",
            "Plan comparison and recommendation engine",
            "Appeals letter generation",
            "Cost-benefit analysis calculations",
        ],
    };

    let rationale = format!(
        "You've worked on {} insurance-related projects. This is highly specialized domain expertise.",
        count
    );
    Some(content.into_recommendation(rationale, strength))
}

/// Fires on any contact cleanup, or on data management past one conversation.
///
/// The rationale always quotes the data-management count, even when the
/// contact cleanup signal is what fired the rule.
pub fn data_cleanup_suite(summary: &AnalysisSummary) -> Option<Recommendation> {
    let cleanup = summary.repeated_tasks.get(RepeatedTask::ContactCleanup);
    let data = summary.domain_areas.get(DomainArea::DataManagement);
    if cleanup == 0 && data <= 1 {
        return None;
    }

    let strength = if data > 3 {
        EvidenceStrength::FOUR_STARS
    } else {
        EvidenceStrength::THREE_STARS
    };

    let content = SkillContent {
        rank: 5,
        name: "data-cleanup-transformation-suite",
        title: "Data Cleanup & Transformation Suite",
        description: "Intelligent data deduplication, cleaning, and transformation for various data sources",
        impact: (Level::High, "Solves recurring client problems with messy data"),
        complexity: (Level::High, "Requires fuzzy matching, SQLite expertise, validation logic"),
        time_savings_weekly: "3-5 hours",
        revenue_potential: "$12,000-$20,000 annually",
        implementation_time: "5-7 days",
        break_even_point: "After 3 cleanup projects",
        next_action: "Build a simple contact deduplication script first, then expand to other data types",
        key_features: [
            "Smart duplicate detection algorithms",
            "Contact database cleanup automation",
            "CSV/Excel data transformation",
            "SQLite database repair tools",
            "Data validation and quality scoring",
        ],
    };

    let rationale = format!(
        "You've dealt with data cleanup in {} conversations including complex contact database issues.",
        data
    );
    Some(content.into_recommendation(rationale, strength))
}

/// Evaluate every rule and return the ones that fired, ordered by rank.
pub fn generate_recommendations(summary: &AnalysisSummary) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> =
        SKILL_RULES.iter().filter_map(|rule| rule(summary)).collect();

    recommendations.sort_by_key(|r| r.rank);
    recommendations.truncate(MAX_RECOMMENDATIONS);

    debug!(
        "{} of {} skill rules fired: {:?}",
        recommendations.len(),
        SKILL_RULES.len(),
        recommendations.iter().map(|r| r.rank).collect::<Vec<_>>()
    );

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_conversations;
    use crate::models::{ConversationRecord, Tally};

    fn create_test_summary() -> AnalysisSummary {
        AnalysisSummary::default()
    }

    fn tally_of<K: crate::models::Bucket>(bucket: K, count: usize) -> Tally<K> {
        let mut tally = Tally::new();
        for _ in 0..count {
            tally.increment(bucket);
        }
        tally
    }

    #[test]
    fn test_no_rules_fire_on_empty_summary() {
        assert!(generate_recommendations(&create_test_summary()).is_empty());
    }

    #[test]
    fn test_client_rule_evidence_strength() {
        let mut summary = create_test_summary();
        summary.workflow_patterns = tally_of(WorkflowPattern::ClientConsulting, 1);
        let rec = client_proposal_builder(&summary).unwrap();
        assert_eq!(rec.rank, 1);
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FOUR_STARS));
        assert!(rec.rationale.contains("You've had 1 conversations"));

        summary.workflow_patterns = tally_of(WorkflowPattern::ClientConsulting, 6);
        let rec = client_proposal_builder(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FIVE_STARS));
        assert!(rec.rationale.contains("6"));
    }

    #[test]
    fn test_research_rule_threshold() {
        let mut summary = create_test_summary();
        summary.workflow_patterns = tally_of(WorkflowPattern::ResearchAnalysis, 2);
        assert!(research_synthesizer(&summary).is_none());

        summary.workflow_patterns = tally_of(WorkflowPattern::ResearchAnalysis, 3);
        let rec = research_synthesizer(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FOUR_STARS));

        summary.workflow_patterns = tally_of(WorkflowPattern::ResearchAnalysis, 9);
        let rec = research_synthesizer(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FIVE_STARS));
    }

    #[test]
    fn test_dev_environment_rule() {
        let mut summary = create_test_summary();
        summary.domain_areas = tally_of(DomainArea::DevelopmentEnvironment, 1);
        assert!(dev_environment_automator(&summary).is_none());

        summary.domain_areas = tally_of(DomainArea::DevelopmentEnvironment, 2);
        let rec = dev_environment_automator(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FIVE_STARS));
        assert!(rec.is_urgent());
    }

    #[test]
    fn test_insurance_rule_evidence_strength() {
        let mut summary = create_test_summary();
        summary.domain_areas = tally_of(DomainArea::HealthcareInsurance, 3);
        let rec = insurance_document_processor(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::THREE_STARS));

        summary.domain_areas = tally_of(DomainArea::HealthcareInsurance, 4);
        let rec = insurance_document_processor(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FIVE_STARS));
    }

    #[test]
    fn test_data_rule_fires_on_either_signal() {
        let mut summary = create_test_summary();
        summary.domain_areas = tally_of(DomainArea::DataManagement, 1);
        assert!(data_cleanup_suite(&summary).is_none());

        summary.repeated_tasks = tally_of(RepeatedTask::ContactCleanup, 1);
        let rec = data_cleanup_suite(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::THREE_STARS));
        assert!(rec.rationale.contains("in 1 conversations"));

        summary.repeated_tasks = Tally::new();
        summary.domain_areas = tally_of(DomainArea::DataManagement, 4);
        let rec = data_cleanup_suite(&summary).unwrap();
        assert_eq!(rec.evidence_strength, Some(EvidenceStrength::FOUR_STARS));
    }

    #[test]
    fn test_recommendations_sorted_by_rank() {
        let records = vec![
            ConversationRecord::new("Health insurance appeal", "client wants help"),
            ConversationRecord::new("GitHub codespace", "setup"),
            ConversationRecord::new("GitHub actions", "configure"),
        ];
        let recommendations = generate_recommendations(&analyze_conversations(&records));

        let ranks: Vec<_> = recommendations.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 3, 4]);
    }

    #[test]
    fn test_all_rules_fire() {
        let mut summary = create_test_summary();
        summary.workflow_patterns = tally_of(WorkflowPattern::ClientConsulting, 1);
        for _ in 0..3 {
            summary
                .workflow_patterns
                .increment(WorkflowPattern::ResearchAnalysis);
        }
        summary.domain_areas = tally_of(DomainArea::DevelopmentEnvironment, 2);
        summary.domain_areas.increment(DomainArea::HealthcareInsurance);
        summary.repeated_tasks = tally_of(RepeatedTask::ContactCleanup, 1);

        let recommendations = generate_recommendations(&summary);
        let ranks: Vec<_> = recommendations.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_contact_cleanup_record_fires_data_rule() {
        let records = vec![ConversationRecord::new("Clean contacts database", "")];
        let recommendations = generate_recommendations(&analyze_conversations(&records));

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].name, "data-cleanup-transformation-suite");
    }
}
