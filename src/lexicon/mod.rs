//! Lexicon-scored dimensions.
//!
//! One generic scorer ([`score_keywords`]) is shared by every dimension family.
//! A family is a base value plus, per dimension, an ordered list of
//! `(keyword, weight, polarity)` rules. Scoring is additive: every keyword
//! contained in the lower-cased text applies its weight, then the total is
//! clamped into `[0, 100]`.
//!
//! Built-in tables live in [`defaults`]. A TOML file (default
//! `config/lexicon.toml`, override via `LEXICON_CONFIG_PATH`) can replace whole
//! families:
//!
//! ```toml
//! [utaut2]
//! base = 50
//!
//! [[utaut2.rules]]
//! dimension = "PV"
//! keyword = "mahal"
//! weight = 12
//! polarity = "negative"
//! ```

pub mod defaults;
pub mod dimensions;

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::Path;
use tracing::info;

pub use dimensions::{Dimension, FunnelStage, MarketingMix, PsychoSocial, Utaut2};

pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 100;

/// Direction in which a keyword hit moves the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

/// Single lexicon entry. `keyword` is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: String,
    pub weight: i32,
    pub polarity: Polarity,
}

impl KeywordRule {
    pub fn new(keyword: &str, weight: i32, polarity: Polarity) -> Self {
        Self {
            keyword: keyword.trim().to_lowercase(),
            weight: weight.abs(),
            polarity,
        }
    }

    pub fn positive(keyword: &str, weight: i32) -> Self {
        Self::new(keyword, weight, Polarity::Positive)
    }

    pub fn negative(keyword: &str, weight: i32) -> Self {
        Self::new(keyword, weight, Polarity::Negative)
    }

    #[inline]
    fn delta(&self) -> i32 {
        match self.polarity {
            Polarity::Positive => self.weight,
            Polarity::Negative => -self.weight,
        }
    }
}

/// Clamp any intermediate value into the score range.
#[inline]
pub fn clamp_score(value: i32) -> u8 {
    value.clamp(SCORE_MIN, SCORE_MAX) as u8
}

/// The one scoring routine behind every family.
///
/// `lowered` must already be lower-cased; callers scoring several dimensions
/// lower-case once and reuse it.
pub fn score_keywords(lowered: &str, base: i32, rules: &[KeywordRule]) -> u8 {
    let total = rules
        .iter()
        .filter(|r| !r.keyword.is_empty() && lowered.contains(r.keyword.as_str()))
        .fold(base, |acc, r| acc.saturating_add(r.delta()));
    clamp_score(total)
}

/// Score of one document on one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionScore<D> {
    pub dimension: D,
    pub label: &'static str,
    pub score: u8,
}

/// Keyword table for one dimension family.
#[derive(Debug, Clone)]
pub struct FamilyLexicon<D: Dimension> {
    base: i32,
    rules: Vec<Vec<KeywordRule>>,
    _family: PhantomData<D>,
}

impl<D: Dimension> FamilyLexicon<D> {
    /// Empty table: every dimension scores `base`.
    pub fn new(base: i32) -> Self {
        Self {
            base,
            rules: vec![Vec::new(); D::ALL.len()],
            _family: PhantomData,
        }
    }

    /// Builder style: append rules for `dimension` (order is preserved).
    pub fn with_rules(mut self, dimension: D, rules: impl IntoIterator<Item = KeywordRule>) -> Self {
        self.rules[dimension.index()].extend(rules);
        self
    }

    pub fn push(&mut self, dimension: D, rule: KeywordRule) {
        self.rules[dimension.index()].push(rule);
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn rules_for(&self, dimension: D) -> &[KeywordRule] {
        &self.rules[dimension.index()]
    }

    /// Score raw content on one dimension.
    pub fn score(&self, content: &str, dimension: D) -> u8 {
        self.score_lowered(&content.to_lowercase(), dimension)
    }

    /// Score already lower-cased content.
    pub fn score_lowered(&self, lowered: &str, dimension: D) -> u8 {
        score_keywords(lowered, self.base, self.rules_for(dimension))
    }

    /// Score every dimension of the family, in canonical order.
    pub fn score_all(&self, content: &str) -> Vec<DimensionScore<D>> {
        let lowered = content.to_lowercase();
        D::ALL
            .iter()
            .map(|&d| DimensionScore {
                dimension: d,
                label: d.label(),
                score: self.score_lowered(&lowered, d),
            })
            .collect()
    }

    fn from_table(table: &FamilyTable) -> anyhow::Result<Self> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&table.base) {
            bail!(
                "[{}] base {} is outside {}..={}",
                D::FAMILY,
                table.base,
                SCORE_MIN,
                SCORE_MAX
            );
        }
        let mut fam = Self::new(table.base);
        for (i, r) in table.rules.iter().enumerate() {
            let dim = D::from_key(&r.dimension).ok_or_else(|| {
                anyhow!(
                    "[{}] rule #{}: unknown dimension `{}`",
                    D::FAMILY,
                    i,
                    r.dimension
                )
            })?;
            if r.keyword.trim().is_empty() {
                bail!("[{}] rule #{}: empty keyword", D::FAMILY, i);
            }
            if r.weight < 0 {
                bail!(
                    "[{}] rule #{}: negative weight for `{}` (use polarity = \"negative\")",
                    D::FAMILY,
                    i,
                    r.keyword
                );
            }
            fam.push(dim, KeywordRule::new(&r.keyword, r.weight, r.polarity));
        }
        Ok(fam)
    }
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconFile {
    pub utaut2: Option<FamilyTable>,
    pub marketing_mix: Option<FamilyTable>,
    pub funnel: Option<FamilyTable>,
    pub psycho_social: Option<FamilyTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyTable {
    pub base: i32,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleEntry {
    pub dimension: String,
    pub keyword: String,
    pub weight: i32,
    #[serde(default)]
    pub polarity: Polarity,
}

/// All four keyword tables, injected wherever documents are scored.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub utaut2: FamilyLexicon<Utaut2>,
    pub marketing_mix: FamilyLexicon<MarketingMix>,
    pub funnel: FamilyLexicon<FunnelStage>,
    pub psycho_social: FamilyLexicon<PsychoSocial>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// Tables compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            utaut2: defaults::utaut2(),
            marketing_mix: defaults::marketing_mix(),
            funnel: defaults::funnel(),
            psycho_social: defaults::psycho_social(),
        }
    }

    /// Parse a TOML document. Families present in the file replace the
    /// built-in ones; absent families keep the defaults.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: LexiconFile = toml::from_str(toml_str)?;
        let mut lex = Self::builtin();
        if let Some(t) = &file.utaut2 {
            lex.utaut2 = FamilyLexicon::from_table(t)?;
        }
        if let Some(t) = &file.marketing_mix {
            lex.marketing_mix = FamilyLexicon::from_table(t)?;
        }
        if let Some(t) = &file.funnel {
            lex.funnel = FamilyLexicon::from_table(t)?;
        }
        if let Some(t) = &file.psycho_social {
            lex.psycho_social = FamilyLexicon::from_table(t)?;
        }
        Ok(lex)
    }

    /// Load from `path`; a missing file falls back to the built-in tables.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(target: "lexicon", path = %path.display(), "no lexicon file, using built-in tables");
            return Ok(Self::builtin());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        let lex = Self::from_toml_str(&content)
            .with_context(|| format!("parsing lexicon {}", path.display()))?;
        info!(target: "lexicon", path = %path.display(), "lexicon loaded");
        Ok(lex)
    }
}
