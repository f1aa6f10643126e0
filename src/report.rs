//! Strategic report: a Markdown summary rendered from a [`Dashboard`].
//!
//! All findings are derived from the aggregates; nothing here reads documents.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

use crate::aggregate::{Dashboard, DimensionAverage};
use crate::classify::Emotion;
use crate::intention::IntentionLevel;
use crate::lexicon::Dimension;

/// Share of fear + skepticism (percent) above which the report flags concerns.
const CONCERN_SHARE: f64 = 30.0;
/// Number of brands listed in the leaderboard.
const TOP_BRANDS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub label: &'static str,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandLine {
    pub name: &'static str,
    pub total: usize,
    pub average_intention: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategicReport {
    pub generated_at: DateTime<Utc>,
    pub total_documents: usize,
    pub dominant_emotion: Option<Emotion>,
    pub majority_intention: Option<IntentionLevel>,
    pub average_intention: f64,
    pub concern_share: f64,
    pub top_brands: Vec<BrandLine>,
    pub utaut2_strongest: Option<Finding>,
    pub utaut2_weakest: Option<Finding>,
    pub marketing_weakest: Option<Finding>,
    pub funnel_bottleneck: Option<Finding>,
    pub recommendations: Vec<String>,
}

fn extreme<D: Dimension>(avgs: &[DimensionAverage<D>], highest: bool) -> Option<Finding> {
    // first wins on ties so the canonical order decides
    let mut best: Option<&DimensionAverage<D>> = None;
    for a in avgs {
        let better = match best {
            None => true,
            Some(b) if highest => a.average > b.average,
            Some(b) => a.average < b.average,
        };
        if better {
            best = Some(a);
        }
    }
    best.map(|a| Finding {
        label: a.label,
        average: a.average,
    })
}

impl StrategicReport {
    pub fn from_dashboard(dash: &Dashboard, generated_at: DateTime<Utc>) -> Self {
        let entries = dash.emotions.entries();
        let concern_share: f64 = entries
            .iter()
            .filter(|e| matches!(e.emotion, Emotion::Fear | Emotion::Skepticism))
            .map(|e| e.percentage)
            .sum();

        let top_brands = dash
            .brands
            .iter()
            .filter(|b| b.total > 0)
            .take(TOP_BRANDS)
            .map(|b| BrandLine {
                name: b.name,
                total: b.total,
                average_intention: b.average_intention,
            })
            .collect();

        let empty = dash.total_documents == 0;
        let mut report = Self {
            generated_at,
            total_documents: dash.total_documents,
            dominant_emotion: dash.emotions.dominant(),
            majority_intention: dash.intention.majority(),
            average_intention: dash.average_intention,
            concern_share,
            top_brands,
            utaut2_strongest: (!empty).then(|| extreme(&dash.utaut2, true)).flatten(),
            utaut2_weakest: (!empty).then(|| extreme(&dash.utaut2, false)).flatten(),
            marketing_weakest: (!empty)
                .then(|| extreme(&dash.marketing_mix, false))
                .flatten(),
            funnel_bottleneck: (!empty).then(|| extreme(&dash.funnel, false)).flatten(),
            recommendations: Vec::new(),
        };
        report.recommendations = report.recommend(dash);
        report
    }

    fn recommend(&self, dash: &Dashboard) -> Vec<String> {
        if self.total_documents == 0 {
            return vec!["Upload a review dataset to generate insights.".to_string()];
        }
        let mut out = Vec::new();
        if let Some(w) = &self.utaut2_weakest {
            out.push(format!(
                "Strengthen {} messaging; it is the weakest adoption driver (avg {:.1}).",
                w.label, w.average
            ));
        }
        if let Some(w) = &self.marketing_weakest {
            out.push(format!(
                "Review the {} element of the marketing mix (avg {:.1}).",
                w.label, w.average
            ));
        }
        if let Some(b) = &self.funnel_bottleneck {
            out.push(format!(
                "The funnel narrows at {} (avg {:.1}); target campaigns at that stage.",
                b.label, b.average
            ));
        }
        if self.concern_share > CONCERN_SHARE {
            out.push(format!(
                "Fear and skepticism make up {:.1}% of reviews; address safety, battery and warranty concerns.",
                self.concern_share
            ));
        }
        if dash.intention.low > dash.intention.high {
            out.push(
                "Low purchase intention outweighs high intention; consider trial rides and financing offers."
                    .to_string(),
            );
        }
        out
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let _ = writeln!(md, "# EV Motorcycle Strategic Report");
        let _ = writeln!(
            md,
            "_Generated {}_\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );

        let _ = writeln!(md, "## Overview\n");
        let _ = writeln!(md, "- **Documents analyzed:** {}", self.total_documents);
        let _ = writeln!(
            md,
            "- **Dominant emotion:** {}",
            self.dominant_emotion.map_or("—", |e| e.label_id())
        );
        let _ = writeln!(
            md,
            "- **Majority purchase intention:** {}",
            self.majority_intention.map_or("—", |l| l.as_str())
        );
        let _ = writeln!(md, "- **Average intention score:** {:.1}", self.average_intention);
        let _ = writeln!(md, "- **Fear + skepticism share:** {:.1}%\n", self.concern_share);

        let _ = writeln!(md, "## Brand Leaderboard\n");
        if self.top_brands.is_empty() {
            let _ = writeln!(md, "No brand mentions detected.\n");
        } else {
            let _ = writeln!(md, "| Brand | Mentions | Avg. intention |");
            let _ = writeln!(md, "|---|---:|---:|");
            for b in &self.top_brands {
                let _ = writeln!(md, "| {} | {} | {:.1} |", b.name, b.total, b.average_intention);
            }
            md.push('\n');
        }

        let _ = writeln!(md, "## Key Findings\n");
        let line = |f: &Option<Finding>| {
            f.as_ref()
                .map_or_else(|| "—".to_string(), |f| format!("{} ({:.1})", f.label, f.average))
        };
        let _ = writeln!(md, "- **Strongest UTAUT2 driver:** {}", line(&self.utaut2_strongest));
        let _ = writeln!(md, "- **Weakest UTAUT2 driver:** {}", line(&self.utaut2_weakest));
        let _ = writeln!(md, "- **Weakest marketing-mix element:** {}", line(&self.marketing_weakest));
        let _ = writeln!(md, "- **Funnel bottleneck:** {}\n", line(&self.funnel_bottleneck));

        let _ = writeln!(md, "## Recommendations\n");
        for (i, r) in self.recommendations.iter().enumerate() {
            let _ = writeln!(md, "{}. {}", i + 1, r);
        }
        md
    }
}
