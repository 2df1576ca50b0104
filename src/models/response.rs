//! Typed views of backend responses
//!
//! The client returns raw `serde_json::Value`s and leaves shape checks to the
//! caller. These structs are an opt-in, lenient reading of the payloads the
//! backend currently produces: missing lists become `[]`, missing strings
//! become `""`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write;

/// Deterministic ATS facts computed by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtsFacts {
    pub ats_score: f64,
    pub skills_found: Vec<String>,
    pub missing_skills: Vec<String>,
    pub impact_score: f64,
    pub experience_years: f64,
}

/// Human-readable explanation of the ATS facts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Explanation {
    pub verdict: String,
    pub summary: String,
    pub strengths: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub next_actions: Vec<String>,
}

/// Result of `POST /api/resume/upload`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub ats_facts: AtsFacts,
    pub explanation: Explanation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text_preview: Option<String>,
}

/// A must-have skill and whether the resume covers it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonNegotiableItem {
    pub skill: String,
    pub status: String,
    pub reason: String,
}

/// Result of `POST /api/role/analyze`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleReadiness {
    pub target_role: String,
    pub readiness_score: u32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub non_negotiable: Vec<NonNegotiableItem>,
    pub priority_skills: Vec<String>,
    pub verdict: String,
    pub experience_gap: String,
    pub explanation: String,
}

impl ResumeEvaluation {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Short multi-line summary for terminals
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if let Some(id) = &self.resume_id {
            let _ = writeln!(out, "Resume ID: {}", id);
        }
        if !self.file_name.is_empty() {
            let _ = writeln!(out, "File: {}", self.file_name);
        }
        let _ = writeln!(out, "ATS score: {:.0}", self.ats_facts.ats_score);
        let _ = writeln!(out, "Experience: {:.1} years", self.ats_facts.experience_years);
        write_list(&mut out, "Skills found", &self.ats_facts.skills_found);
        write_list(&mut out, "Missing skills", &self.ats_facts.missing_skills);
        if !self.explanation.verdict.is_empty() {
            let _ = writeln!(out, "Verdict: {}", self.explanation.verdict);
        }
        write_list(&mut out, "Next actions", &self.explanation.next_actions);
        out
    }
}

impl RoleReadiness {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Role: {}", self.target_role);
        let _ = writeln!(out, "Readiness score: {}/100", self.readiness_score);
        write_list(&mut out, "Strengths", &self.strengths);
        write_list(&mut out, "Gaps", &self.gaps);
        write_list(&mut out, "Priority skills", &self.priority_skills);
        for item in &self.non_negotiable {
            let _ = writeln!(out, "  [{}] {}: {}", item.status, item.skill, item.reason);
        }
        if !self.verdict.is_empty() {
            let _ = writeln!(out, "Verdict: {}", self.verdict);
        }
        out
    }
}

fn write_list(out: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "{}: {}", label, items.join(", "));
    }
}
