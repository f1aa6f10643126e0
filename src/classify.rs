//! # Emotion / Brand / Location classifier
//!
//! First-match rules, unlike the additive dimension scorer in `lexicon`:
//! - brand: ordered variant list, first contained variant wins and is
//!   canonicalized to its parent brand (`Viar Q1` → `Viar`, `Fox-R` → `Polytron`);
//! - emotion: keyword groups checked in priority order
//!   satisfaction → trust → fear → skepticism, default `interest`;
//! - location: ordered city/province aliases, default `Other`.
//!
//! All matching is case-insensitive substring containment.

use serde::{Deserialize, Serialize};

/// Canonical emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Interest,
    Trust,
    Fear,
    Skepticism,
    Satisfaction,
}

impl Emotion {
    pub const ALL: [Emotion; 5] = [
        Self::Interest,
        Self::Trust,
        Self::Fear,
        Self::Skepticism,
        Self::Satisfaction,
    ];

    pub fn index(self) -> usize {
        match self {
            Self::Interest => 0,
            Self::Trust => 1,
            Self::Fear => 2,
            Self::Skepticism => 3,
            Self::Satisfaction => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interest => "interest",
            Self::Trust => "trust",
            Self::Fear => "fear",
            Self::Skepticism => "skepticism",
            Self::Satisfaction => "satisfaction",
        }
    }

    /// Indonesian display label.
    pub fn label_id(self) -> &'static str {
        match self {
            Self::Interest => "Minat",
            Self::Trust => "Kepercayaan",
            Self::Fear => "Ketakutan",
            Self::Skepticism => "Skeptisisme",
            Self::Satisfaction => "Kepuasan",
        }
    }

    /// Reverse lookup from either the English key or the Indonesian label.
    pub fn from_label(label: &str) -> Option<Self> {
        let l = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(l) || e.label_id().eq_ignore_ascii_case(l))
    }
}

/// Known electric motorcycle brands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Gesits,
    Viar,
    Selis,
    Alva,
    Polytron,
    United,
    Volta,
    Yadea,
    Honda,
    Smoot,
}

impl Brand {
    pub const ALL: [Brand; 10] = [
        Self::Gesits,
        Self::Viar,
        Self::Selis,
        Self::Alva,
        Self::Polytron,
        Self::United,
        Self::Volta,
        Self::Yadea,
        Self::Honda,
        Self::Smoot,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|b| *b == self).unwrap_or(0)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Gesits => "Gesits",
            Self::Viar => "Viar",
            Self::Selis => "Selis",
            Self::Alva => "Alva",
            Self::Polytron => "Polytron",
            Self::United => "United",
            Self::Volta => "Volta",
            Self::Yadea => "Yadea",
            Self::Honda => "Honda",
            Self::Smoot => "Smoot",
        }
    }
}

/// Variant → canonical brand. Longer variants come before their parents.
static BRAND_VARIANTS: &[(&str, Brand)] = &[
    ("gesits", Brand::Gesits),
    ("viar q1", Brand::Viar),
    ("viar", Brand::Viar),
    ("selis", Brand::Selis),
    ("alva one", Brand::Alva),
    ("alva", Brand::Alva),
    ("polytron fox-r", Brand::Polytron),
    ("fox-r", Brand::Polytron),
    ("polytron", Brand::Polytron),
    ("united t1800", Brand::United),
    ("united", Brand::United),
    ("volta", Brand::Volta),
    ("yadea", Brand::Yadea),
    ("honda em1", Brand::Honda),
    ("smoot", Brand::Smoot),
];

/// Region buckets for the geo breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Jakarta,
    Bandung,
    Surabaya,
    Yogyakarta,
    Semarang,
    Medan,
    Bali,
    Makassar,
    Other,
}

impl Location {
    pub const ALL: [Location; 9] = [
        Self::Jakarta,
        Self::Bandung,
        Self::Surabaya,
        Self::Yogyakarta,
        Self::Semarang,
        Self::Medan,
        Self::Bali,
        Self::Makassar,
        Self::Other,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|l| *l == self).unwrap_or(Self::ALL.len() - 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jakarta => "Jakarta",
            Self::Bandung => "Bandung",
            Self::Surabaya => "Surabaya",
            Self::Yogyakarta => "Yogyakarta",
            Self::Semarang => "Semarang",
            Self::Medan => "Medan",
            Self::Bali => "Bali",
            Self::Makassar => "Makassar",
            Self::Other => "Other",
        }
    }
}

static LOCATION_ALIASES: &[(&str, Location)] = &[
    ("jakarta", Location::Jakarta),
    ("jabodetabek", Location::Jakarta),
    ("bandung", Location::Bandung),
    ("surabaya", Location::Surabaya),
    ("yogyakarta", Location::Yogyakarta),
    ("jogja", Location::Yogyakarta),
    ("semarang", Location::Semarang),
    ("medan", Location::Medan),
    ("denpasar", Location::Bali),
    ("bali", Location::Bali),
    ("makassar", Location::Makassar),
];

// Emotion groups, in priority order.
static SATISFACTION: &[&str] = &[
    "puas",
    "mantap",
    "senang",
    "bangga",
    "memuaskan",
    "satisfied",
    "happy",
    "love it",
];
static TRUST: &[&str] = &[
    "percaya",
    "terpercaya",
    "andal",
    "awet",
    "garansi",
    "berkualitas",
    "trust",
    "reliable",
];
static FEAR: &[&str] = &[
    "takut",
    "khawatir",
    "cemas",
    "bahaya",
    "meledak",
    "kebakaran",
    "afraid",
    "worried",
];
static SKEPTICISM: &[&str] = &[
    "ragu",
    "skeptis",
    "belum yakin",
    "tidak yakin",
    "masa sih",
    "doubt",
    "not sure",
    "overpriced",
];

static EMOTION_RULES: &[(Emotion, &[&str])] = &[
    (Emotion::Satisfaction, SATISFACTION),
    (Emotion::Trust, TRUST),
    (Emotion::Fear, FEAR),
    (Emotion::Skepticism, SKEPTICISM),
];

/// Result of classifying one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub emotion: Emotion,
    pub brand: Option<Brand>,
}

/// Classify emotion and brand for `content`.
pub fn classify(content: &str) -> Classification {
    let lowered = content.to_lowercase();
    Classification {
        emotion: emotion_of_lowered(&lowered),
        brand: brand_of_lowered(&lowered),
    }
}

pub fn detect_emotion(content: &str) -> Emotion {
    emotion_of_lowered(&content.to_lowercase())
}

pub fn detect_brand(content: &str) -> Option<Brand> {
    brand_of_lowered(&content.to_lowercase())
}

pub fn detect_location(content: &str) -> Location {
    let lowered = content.to_lowercase();
    LOCATION_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .map(|(_, loc)| *loc)
        .unwrap_or(Location::Other)
}

fn emotion_of_lowered(lowered: &str) -> Emotion {
    EMOTION_RULES
        .iter()
        .find(|(_, kws)| kws.iter().any(|k| lowered.contains(k)))
        .map(|(e, _)| *e)
        .unwrap_or(Emotion::Interest)
}

fn brand_of_lowered(lowered: &str) -> Option<Brand> {
    BRAND_VARIANTS
        .iter()
        .find(|(variant, _)| lowered.contains(variant))
        .map(|(_, b)| *b)
}
