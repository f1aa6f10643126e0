//! Dimension families scored by the lexicon.
//!
//! Each family is a closed enum with a fixed canonical order (`ALL`). Charts,
//! matrices and config files all index dimensions through that order, so a
//! family never produces a missing or reordered column.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A closed set of scoring dimensions sharing one keyword table.
pub trait Dimension: Copy + Eq + Debug + Send + Sync + 'static {
    /// Every dimension of the family in canonical order.
    const ALL: &'static [Self];
    /// Table name used in `config/lexicon.toml`.
    const FAMILY: &'static str;

    /// Short, stable key (config files, JSON).
    fn key(self) -> &'static str;
    /// Human readable label (report, charts).
    fn label(self) -> &'static str;

    /// Position inside `ALL`.
    fn index(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Case-insensitive lookup by key or label.
    fn from_key(key: &str) -> Option<Self> {
        let k = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.key().eq_ignore_ascii_case(k) || d.label().eq_ignore_ascii_case(k))
    }
}

/// UTAUT2 constructs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utaut2 {
    #[serde(rename = "PE")]
    PerformanceExpectancy,
    #[serde(rename = "EE")]
    EffortExpectancy,
    #[serde(rename = "SI")]
    SocialInfluence,
    #[serde(rename = "HM")]
    HedonicMotivation,
    #[serde(rename = "FC")]
    FacilitatingConditions,
    #[serde(rename = "PV")]
    PriceValue,
    #[serde(rename = "H")]
    Habit,
}

impl Dimension for Utaut2 {
    const ALL: &'static [Self] = &[
        Self::PerformanceExpectancy,
        Self::EffortExpectancy,
        Self::SocialInfluence,
        Self::HedonicMotivation,
        Self::FacilitatingConditions,
        Self::PriceValue,
        Self::Habit,
    ];
    const FAMILY: &'static str = "utaut2";

    fn key(self) -> &'static str {
        match self {
            Self::PerformanceExpectancy => "PE",
            Self::EffortExpectancy => "EE",
            Self::SocialInfluence => "SI",
            Self::HedonicMotivation => "HM",
            Self::FacilitatingConditions => "FC",
            Self::PriceValue => "PV",
            Self::Habit => "H",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::PerformanceExpectancy => "Performance Expectancy",
            Self::EffortExpectancy => "Effort Expectancy",
            Self::SocialInfluence => "Social Influence",
            Self::HedonicMotivation => "Hedonic Motivation",
            Self::FacilitatingConditions => "Facilitating Conditions",
            Self::PriceValue => "Price Value",
            Self::Habit => "Habit",
        }
    }
}

/// Marketing mix (8P).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketingMix {
    Product,
    Price,
    Place,
    Promotion,
    People,
    Process,
    PhysicalEvidence,
    ProductivityQuality,
}

impl Dimension for MarketingMix {
    const ALL: &'static [Self] = &[
        Self::Product,
        Self::Price,
        Self::Place,
        Self::Promotion,
        Self::People,
        Self::Process,
        Self::PhysicalEvidence,
        Self::ProductivityQuality,
    ];
    const FAMILY: &'static str = "marketing_mix";

    fn key(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Price => "price",
            Self::Place => "place",
            Self::Promotion => "promotion",
            Self::People => "people",
            Self::Process => "process",
            Self::PhysicalEvidence => "physical_evidence",
            Self::ProductivityQuality => "productivity_quality",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Price => "Price",
            Self::Place => "Place",
            Self::Promotion => "Promotion",
            Self::People => "People",
            Self::Process => "Process",
            Self::PhysicalEvidence => "Physical Evidence",
            Self::ProductivityQuality => "Productivity & Quality",
        }
    }
}

/// Marketing funnel stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    Awareness,
    Consideration,
    Preference,
    Intent,
    Advocacy,
}

impl Dimension for FunnelStage {
    const ALL: &'static [Self] = &[
        Self::Awareness,
        Self::Consideration,
        Self::Preference,
        Self::Intent,
        Self::Advocacy,
    ];
    const FAMILY: &'static str = "funnel";

    fn key(self) -> &'static str {
        match self {
            Self::Awareness => "awareness",
            Self::Consideration => "consideration",
            Self::Preference => "preference",
            Self::Intent => "intent",
            Self::Advocacy => "advocacy",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Awareness => "Awareness",
            Self::Consideration => "Consideration",
            Self::Preference => "Preference",
            Self::Intent => "Intent",
            Self::Advocacy => "Advocacy",
        }
    }
}

/// Psycho-social dimensions used by the dimension x emotion heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PsychoSocial {
    Trust,
    Anxiety,
    Excitement,
    SocialInfluence,
    SelfEfficacy,
    RiskPerception,
}

impl Dimension for PsychoSocial {
    const ALL: &'static [Self] = &[
        Self::Trust,
        Self::Anxiety,
        Self::Excitement,
        Self::SocialInfluence,
        Self::SelfEfficacy,
        Self::RiskPerception,
    ];
    const FAMILY: &'static str = "psycho_social";

    fn key(self) -> &'static str {
        match self {
            Self::Trust => "trust",
            Self::Anxiety => "anxiety",
            Self::Excitement => "excitement",
            Self::SocialInfluence => "social_influence",
            Self::SelfEfficacy => "self_efficacy",
            Self::RiskPerception => "risk_perception",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Trust => "Trust",
            Self::Anxiety => "Anxiety",
            Self::Excitement => "Excitement",
            Self::SocialInfluence => "Social Influence",
            Self::SelfEfficacy => "Self-Efficacy",
            Self::RiskPerception => "Risk Perception",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_sizes() {
        assert_eq!(Utaut2::ALL.len(), 7);
        assert_eq!(MarketingMix::ALL.len(), 8);
        assert_eq!(FunnelStage::ALL.len(), 5);
        assert_eq!(PsychoSocial::ALL.len(), 6);
    }

    #[test]
    fn index_matches_canonical_order() {
        for (i, d) in MarketingMix::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
        assert_eq!(Utaut2::Habit.index(), 6);
    }

    #[test]
    fn from_key_accepts_key_or_label_any_case() {
        assert_eq!(Utaut2::from_key("pv"), Some(Utaut2::PriceValue));
        assert_eq!(
            MarketingMix::from_key("Physical Evidence"),
            Some(MarketingMix::PhysicalEvidence)
        );
        assert_eq!(PsychoSocial::from_key(" self_efficacy "), Some(PsychoSocial::SelfEfficacy));
        assert_eq!(FunnelStage::from_key("loyalty"), None);
    }
}
