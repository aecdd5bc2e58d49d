//! Display model built from a [`ScanResult`].
//!
//! Everything the result panel shows is computed here, independent of any
//! widget toolkit: the animated score, the badge, the staggered warning list,
//! the line-annotated code preview and the grouped risk summary.

use crate::common::models::{RiskLevel, ScanResult, Warning};
use std::collections::HashMap;
use std::time::Duration;

pub const NO_WARNINGS_MESSAGE: &str = "✅ No dangerous operations detected.";

/// Interval between two score animation frames.
pub const SCORE_TICK: Duration = Duration::from_millis(20);
const SCORE_STEPS: u32 = 20;

/// Entry delay between consecutive warning items.
pub const WARNING_STAGGER: Duration = Duration::from_millis(40);

/// Counts the score up from zero toward its target in roughly twenty steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreAnimation {
    target: u32,
    step: u32,
    current: u32,
    done: bool,
}

impl ScoreAnimation {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            step: (target / SCORE_STEPS).max(1),
            current: 0,
            done: false,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance one frame and return the value to display.
    pub fn advance(&mut self) -> u32 {
        if self.done {
            return self.current;
        }
        self.current = self.current.saturating_add(self.step);
        if self.current >= self.target {
            self.current = self.target;
            self.done = true;
        }
        self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Literal `risk_level` as returned by the backend.
    pub text: String,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningItem {
    pub line: usize,
    pub code: String,
    pub category: String,
    pub explanation: String,
    pub risk: RiskLevel,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub number: usize,
    pub text: String,
    pub risk: Option<RiskLevel>,
}

impl PreviewLine {
    pub fn gutter(&self) -> String {
        format!("{:>3}", self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePreview {
    pub lines: Vec<PreviewLine>,
    /// First line classed critical or high; the view scrolls it into view.
    pub focus_line: Option<usize>,
}

impl CodePreview {
    pub fn build(source: &str, warnings: &[Warning]) -> Self {
        let risk_map = build_risk_map(warnings);
        let lines: Vec<PreviewLine> = source
            .split('\n')
            .enumerate()
            .map(|(idx, text)| {
                let number = idx + 1;
                PreviewLine {
                    number,
                    text: if text.is_empty() { " ".to_string() } else { text.to_string() },
                    risk: risk_map.get(&number).cloned(),
                }
            })
            .collect();

        let focus_line = lines
            .iter()
            .find(|l| l.risk.as_ref().map(|r| r.is_alarming()).unwrap_or(false))
            .map(|l| l.number);

        Self { lines, focus_line }
    }
}

/// Line number to the risk that colours it.
///
/// The first warning on a line sets its risk; a later `critical` always wins.
pub fn build_risk_map(warnings: &[Warning]) -> HashMap<usize, RiskLevel> {
    let mut map: HashMap<usize, RiskLevel> = HashMap::new();
    for w in warnings {
        let risk = w.risk_level();
        let overwrite = risk == RiskLevel::Critical || !map.contains_key(&w.line);
        if overwrite {
            map.insert(w.line, risk);
        }
    }
    map
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryGroup {
    /// Upper-cased risk label.
    pub risk: String,
    pub total: usize,
    pub categories: Vec<(String, usize)>,
}

/// Warnings grouped by risk then category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskSummary {
    pub groups: Vec<SummaryGroup>,
}

impl RiskSummary {
    pub fn build(warnings: &[Warning]) -> Self {
        let mut groups: Vec<SummaryGroup> = Vec::new();
        for w in warnings {
            let risk = w.risk.trim().to_uppercase();
            let idx = match groups.iter().position(|g| g.risk == risk) {
                Some(i) => i,
                None => {
                    groups.push(SummaryGroup { risk, total: 0, categories: Vec::new() });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            group.total += 1;
            match group.categories.iter_mut().find(|(c, _)| *c == w.category) {
                Some((_, count)) => *count += 1,
                None => group.categories.push((w.category.clone(), 1)),
            }
        }
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Everything the result panel renders for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub score: ScoreAnimation,
    pub badge: Badge,
    pub pulse: bool,
    pub language: Option<String>,
    pub warnings: Vec<WarningItem>,
    pub preview: Option<CodePreview>,
    pub summary: RiskSummary,
}

impl ScanReport {
    /// `source` is the pasted code, if any; file uploads have no preview.
    pub fn build(result: &ScanResult, source: Option<&str>) -> Self {
        let level = result.level();
        let warnings = result
            .warnings
            .iter()
            .enumerate()
            .map(|(i, w)| WarningItem {
                line: w.line,
                code: w.code.clone(),
                category: w.category.clone(),
                explanation: w.explanation.clone(),
                risk: w.risk_level(),
                delay: WARNING_STAGGER * i as u32,
            })
            .collect();

        let preview = source
            .filter(|s| !s.trim().is_empty())
            .map(|s| CodePreview::build(s, &result.warnings));

        Self {
            score: ScoreAnimation::new(result.risk_score),
            pulse: level.is_alarming(),
            badge: Badge {
                text: result.risk_level.clone(),
                level,
            },
            language: result.language.clone(),
            warnings,
            preview,
            summary: RiskSummary::build(&result.warnings),
        }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
