//! Result rendering — projects an `AnalysisReport` onto the results view.
//!
//! Pure and infallible: every field already has a default by the time it
//! gets here.

use serde::Serialize;

use crate::analysis::animation::AnimationPlan;
use crate::analysis::report::{AnalysisReport, Verdict};

/// Score-based colour tier, independent of the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Pass,
    Warn,
    Fail,
}

impl ScoreTier {
    /// `score` is the clamped, unrounded value, so 69.6 is still `Warn`.
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ScoreTier::Pass
        } else if score >= 45.0 {
            ScoreTier::Warn
        } else {
            ScoreTier::Fail
        }
    }

    /// Extra colour class on the score elements. Pass uses the default colour.
    pub fn color_class(&self) -> &'static str {
        match self {
            ScoreTier::Pass => "",
            ScoreTier::Warn => "yellow",
            ScoreTier::Fail => "red",
        }
    }
}

/// Styling chosen from the verdict field alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictTreatment {
    Positive,
    Neutral,
    Negative,
}

impl VerdictTreatment {
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Good => VerdictTreatment::Positive,
            Verdict::Poor => VerdictTreatment::Negative,
            Verdict::NeedsWork => VerdictTreatment::Neutral,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            VerdictTreatment::Positive => "good",
            VerdictTreatment::Neutral => "okay",
            VerdictTreatment::Negative => "bad",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            VerdictTreatment::Positive => "\u{1F33F}",
            VerdictTreatment::Neutral => "\u{1F504}",
            VerdictTreatment::Negative => "\u{26A0}\u{FE0F}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipKind {
    Positive,
    Negative,
}

impl ChipKind {
    fn css_class(&self) -> &'static str {
        match self {
            ChipKind::Positive => "tag tag-positive",
            ChipKind::Negative => "tag tag-negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    pub kind: ChipKind,
    pub text: String,
}

/// Row category; each has its own marker colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Impact,
    Improvement,
    Alternative,
}

impl RowKind {
    pub fn marker_class(&self) -> &'static str {
        match self {
            RowKind::Impact => "dot-green",
            RowKind::Improvement => "dot-yellow",
            RowKind::Alternative => "dot-cyan",
        }
    }

    fn heading(&self) -> &'static str {
        match self {
            RowKind::Impact => "Environmental Impact",
            RowKind::Improvement => "How It Could Improve",
            RowKind::Alternative => "Greener Alternatives",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
}

/// Everything the results region shows for one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    /// Clamped score as the label shows it once the animation settles.
    pub score: u8,
    pub tier: ScoreTier,
    pub grade: Option<&'static str>,
    pub verdict: &'static str,
    pub verdict_treatment: VerdictTreatment,
    pub summary: String,
    pub positive_chips: Vec<Chip>,
    pub negative_chips: Vec<Chip>,
    pub impacts: Vec<Row>,
    pub improvements: Vec<Row>,
    pub alternatives: Vec<Row>,
    pub animation: AnimationPlan,
}

impl RenderedReport {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let clamped = report.score.clamp(0.0, 100.0);
        let verdict_treatment = VerdictTreatment::for_verdict(report.verdict);

        Self {
            score: clamped.round() as u8,
            tier: ScoreTier::for_score(clamped),
            grade: report.grade.map(|g| g.as_str()),
            verdict: report.verdict.label(),
            verdict_treatment,
            summary: report.summary.clone(),
            positive_chips: chips(ChipKind::Positive, &report.positive_tags),
            negative_chips: chips(ChipKind::Negative, &report.negative_tags),
            impacts: rows(RowKind::Impact, &report.impacts),
            improvements: rows(RowKind::Improvement, &report.improvements),
            alternatives: rows(RowKind::Alternative, &report.alternatives),
            animation: AnimationPlan::for_score(clamped),
        }
    }

    /// HTML for the results region. The score elements start at 0 and are
    /// driven by `animation` on the page.
    pub fn to_html(&self) -> String {
        let color = self.tier.color_class();
        let grade = self.grade.unwrap_or("\u{2014}");
        let verdict_class = self.verdict_treatment.css_class();

        let positive: String = self.positive_chips.iter().map(chip_html).collect();
        let negative: String = self.negative_chips.iter().map(chip_html).collect();

        format!(
            r#"<div class="score-card">
  <div class="score-ring {color}"><span id="scoreNum" class="score-num {color}">0</span><span class="score-max">/100</span></div>
  <div class="score-meta">
    <div class="grade">Grade {grade}</div>
    <div class="verdict verdict-{verdict_class}">{emoji} {verdict}</div>
    <p class="summary">{summary}</p>
  </div>
  <div class="bar-track"><div id="scoreBar" class="bar-fill {color}" style="width:0%"></div><span id="barLabel" class="bar-label">0%</span></div>
</div>
<div class="tags">{positive}{negative}</div>
{impacts}{improvements}{alternatives}"#,
            emoji = self.verdict_treatment.emoji(),
            verdict = escape_html(self.verdict),
            summary = escape_html(&self.summary),
            impacts = section_html(RowKind::Impact, &self.impacts),
            improvements = section_html(RowKind::Improvement, &self.improvements),
            alternatives = section_html(RowKind::Alternative, &self.alternatives),
        )
    }
}

fn chips(kind: ChipKind, tags: &[String]) -> Vec<Chip> {
    tags.iter()
        .map(|t| Chip {
            kind,
            text: t.clone(),
        })
        .collect()
}

fn rows(kind: RowKind, items: &[String]) -> Vec<Row> {
    items
        .iter()
        .map(|i| Row {
            kind,
            text: i.clone(),
        })
        .collect()
}

fn chip_html(chip: &Chip) -> String {
    format!(
        r#"<span class="{}">{}</span>"#,
        chip.kind.css_class(),
        escape_html(&chip.text)
    )
}

/// Empty when there are no rows; no heading without content.
fn section_html(kind: RowKind, rows: &[Row]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let body: String = rows
        .iter()
        .map(|r| {
            format!(
                r#"<div class="item-row"><span class="item-dot {}"></span>{}</div>"#,
                kind.marker_class(),
                escape_html(&r.text)
            )
        })
        .collect();
    format!(
        r#"<div class="section"><div class="section-title">{}</div>{body}</div>"#,
        kind.heading()
    )
}

/// Escapes text for use inside HTML element content and quoted attributes.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
