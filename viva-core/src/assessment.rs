use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Pass,
    Fail,
}

/// Structure extracted from the free-text assessment. Every piece is
/// optional: the evaluator writes prose, and absent sections are normal,
/// not parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub score: Option<u8>,
    pub decision: Option<Decision>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Score: 82/100" with an optional label; a bare "82/100" also counts.
    RE.get_or_init(|| Regex::new(r"(?i)(?:score:?\s*)?(\d{1,3})\s*/\s*100").expect("valid score regex"))
}

fn decision_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)decision:?\s*(pass|fail)|\b(PASS|FAIL)\b").expect("valid decision regex"))
}

fn strengths_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)key strengths:\s*(.*?)(?:areas for improvement:|$)")
            .expect("valid strengths regex")
    })
}

fn improvements_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)areas for improvement:\s*(.*?)(?:specific tips:|$)")
            .expect("valid improvements regex")
    })
}

pub fn parse_assessment(text: &str) -> AssessmentSummary {
    let score = score_re()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .filter(|n| *n <= 100)
        .map(|n| n as u8);

    let decision = decision_re().captures(text).and_then(|caps| {
        let token = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_ascii_uppercase())?;
        match token.as_str() {
            "PASS" => Some(Decision::Pass),
            "FAIL" => Some(Decision::Fail),
            _ => None,
        }
    });

    let strengths = bullet_items(strengths_re(), text);
    let improvements = bullet_items(improvements_re(), text);

    AssessmentSummary {
        score,
        decision,
        strengths,
        improvements,
    }
}

fn bullet_items(section: &Regex, text: &str) -> Vec<String> {
    let Some(caps) = section.captures(text) else {
        return Vec::new();
    };
    let Some(body) = caps.get(1) else {
        return Vec::new();
    };

    body.as_str()
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('*') || line.starts_with('-'))
        .map(|line| line.trim_start_matches(['*', '-']).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Overall a solid performance.

Score: 82/100

Key Strengths:
* Clear communication
- Good grasp of fundamentals

Areas for Improvement:
* More concrete examples

Specific Tips:
* Practice the STAR method

Decision: PASS";

    #[test]
    fn extracts_score_and_decision() {
        let summary = parse_assessment(SAMPLE);
        assert_eq!(summary.score, Some(82));
        assert_eq!(summary.decision, Some(Decision::Pass));
    }

    #[test]
    fn extracts_bullet_sections() {
        let summary = parse_assessment(SAMPLE);
        assert_eq!(
            summary.strengths,
            vec!["Clear communication", "Good grasp of fundamentals"]
        );
        assert_eq!(summary.improvements, vec!["More concrete examples"]);
    }

    #[test]
    fn bare_fraction_and_fail_token_count() {
        let summary = parse_assessment("You scored 41/100 overall. FAIL.");
        assert_eq!(summary.score, Some(41));
        assert_eq!(summary.decision, Some(Decision::Fail));
    }

    #[test]
    fn out_of_range_score_is_ignored() {
        let summary = parse_assessment("Score: 482/100");
        assert_eq!(summary.score, None);
    }

    #[test]
    fn prose_without_structure_parses_to_empty() {
        let summary = parse_assessment("The candidate should keep practicing.");
        assert_eq!(summary, AssessmentSummary::default());
    }
}
