//! # Purchase Intention
//! Deterministic 0–100 purchase-intention score for a single text.
//!
//! Baseline comes from a stable 32-bit polynomial string hash (`h*31 + unit`
//! over UTF-16 code units, wrapping), reduced `mod 101`. Keyword hits then
//! nudge it: +5 per distinct purchase word (capped at 100), -5 per distinct
//! hesitation word (floored at 0). No clock, no RNG: same text, same result.

use serde::{Deserialize, Serialize};

/// Score returned for empty / whitespace-only text.
pub const NEUTRAL_SCORE: u8 = 50;
/// Inclusive lower bound of the `High` band.
pub const HIGH_THRESHOLD: u8 = 75;
/// Inclusive lower bound of the `Medium` band.
pub const MEDIUM_THRESHOLD: u8 = 55;
/// Points per keyword hit.
pub const KEYWORD_STEP: i64 = 5;

const HASH_MODULUS: i64 = 101;

// Purchase-intent words (ID + EN).
static POSITIVE_KEYWORDS: &[&str] = &[
    "beli",
    "membeli",
    "pesan",
    "tertarik",
    "minat",
    "ingin punya",
    "rencana",
    "incar",
    "buy",
    "purchase",
    "order",
    "interested",
    "want to get",
    "plan to",
];

// Hesitation / rejection words (ID + EN).
static NEGATIVE_KEYWORDS: &[&str] = &[
    "tidak jadi",
    "batal",
    "ragu",
    "nanti dulu",
    "pikir-pikir",
    "mahal",
    "kecewa",
    "tidak tertarik",
    "cancel",
    "hesitant",
    "not interested",
    "too expensive",
    "doubt",
];

/// Intention tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentionLevel {
    Low,
    Medium,
    High,
}

impl IntentionLevel {
    /// Chart order: high first.
    pub const ALL: [IntentionLevel; 3] = [Self::High, Self::Medium, Self::Low];

    /// `>= 75` high, `55..75` medium, below 55 low.
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Score plus tier for one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentionResult {
    pub score: u8,
    pub level: IntentionLevel,
}

impl IntentionResult {
    pub fn from_score(score: u8) -> Self {
        let score = score.min(100);
        Self {
            score,
            level: IntentionLevel::from_score(score),
        }
    }

    /// Empty input is neutral: 50 / medium (not derived from the bands).
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            level: IntentionLevel::Medium,
        }
    }
}

/// Java-style `String.hashCode` over UTF-16 code units, wrapping at 32 bits.
pub fn stable_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Derive the intention score/tier for `text`.
pub fn derive_intention(text: &str) -> IntentionResult {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return IntentionResult::neutral();
    }

    // i64 so that |i32::MIN| does not overflow
    let baseline = (stable_hash(&normalized) as i64).abs() % HASH_MODULUS;
    let pos = count_hits(&normalized, POSITIVE_KEYWORDS);
    let neg = count_hits(&normalized, NEGATIVE_KEYWORDS);

    IntentionResult::from_score(apply_keyword_adjustment(baseline, pos, neg))
}

fn count_hits(lowered: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| lowered.contains(*k)).count()
}

/// Positive boost is capped at 100 before the negative penalty is floored at 0.
fn apply_keyword_adjustment(baseline: i64, pos: usize, neg: usize) -> u8 {
    let boosted = (baseline + KEYWORD_STEP * pos as i64).min(100);
    let penalized = (boosted - KEYWORD_STEP * neg as i64).max(0);
    penalized as u8
}
