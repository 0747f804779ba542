//! Advisory annotations
//!
//! An annotation is pre-computed commentary attached to one proposal. It is
//! looked up by proposal id, never derived from proposal content.
//!
//! Severity is a closed set; how a severity is drawn (icon, colour) is left
//! to the presentation layer.

use serde::Serialize;

use crate::ProposalId;

/// Severity of a single finding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// No action needed
    Compliant,
    /// Worth a second look before voting
    Caution,
    /// Irreversible or high-impact consequence
    HighRisk,
}

impl Severity {
    /// Ordering weight (higher = more severe)
    pub fn rank(self) -> u8 {
        match self {
            Severity::Compliant => 0,
            Severity::Caution => 1,
            Severity::HighRisk => 2,
        }
    }
}

/// Which part of the analysis a finding belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FindingCategory {
    Compliance,
    Strategy,
    Risk,
}

impl FindingCategory {
    pub fn title(self) -> &'static str {
        match self {
            FindingCategory::Compliance => "Compliance Check",
            FindingCategory::Strategy => "Strategic Analysis",
            FindingCategory::Risk => "Risk Assessment",
        }
    }
}

/// One line of advisory commentary
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisFinding {
    /// Short verdict, e.g. `RECOMMEND ACCEPT`
    pub status_label: String,
    pub severity: Severity,
    pub narrative: String,
}

impl AnalysisFinding {
    pub fn new(
        status_label: impl Into<String>,
        severity: Severity,
        narrative: impl Into<String>,
    ) -> Self {
        AnalysisFinding {
            status_label: status_label.into(),
            severity,
            narrative: narrative.into(),
        }
    }
}

/// Compliance, strategy and risk findings for one proposal
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdvisoryAnnotation {
    pub proposal_id: ProposalId,
    pub compliance: AnalysisFinding,
    pub strategy: AnalysisFinding,
    pub risk: AnalysisFinding,
}

impl AdvisoryAnnotation {
    /// Findings in display order
    pub fn findings(&self) -> [(FindingCategory, &AnalysisFinding); 3] {
        [
            (FindingCategory::Compliance, &self.compliance),
            (FindingCategory::Strategy, &self.strategy),
            (FindingCategory::Risk, &self.risk),
        ]
    }

    /// Most severe level across all findings
    pub fn worst_severity(&self) -> Severity {
        self.findings()
            .iter()
            .map(|(_, f)| f.severity)
            .max_by_key(|s| s.rank())
            .unwrap_or(Severity::Compliant)
    }
}
