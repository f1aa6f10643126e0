//! Per-document analysis: every score the dashboard shows for one text.

use serde::Serialize;

use crate::classify::{classify, detect_location, Brand, Emotion, Location};
use crate::document::Document;
use crate::intention::{derive_intention, IntentionResult};
use crate::lexicon::{DimensionScore, FunnelStage, Lexicon, MarketingMix, PsychoSocial, Utaut2};

#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub emotion: Emotion,
    pub emotion_label: &'static str,
    pub brand: Option<Brand>,
    pub location: Location,
    pub intention: IntentionResult,
    pub utaut2: Vec<DimensionScore<Utaut2>>,
    pub marketing_mix: Vec<DimensionScore<MarketingMix>>,
    pub funnel: Vec<DimensionScore<FunnelStage>>,
    pub psycho_social: Vec<DimensionScore<PsychoSocial>>,
}

/// Analyze a free text (no document id).
pub fn analyze_text(text: &str, lexicon: &Lexicon) -> DocumentAnalysis {
    let c = classify(text);
    DocumentAnalysis {
        id: None,
        emotion: c.emotion,
        emotion_label: c.emotion.label_id(),
        brand: c.brand,
        location: detect_location(text),
        intention: derive_intention(text),
        utaut2: lexicon.utaut2.score_all(text),
        marketing_mix: lexicon.marketing_mix.score_all(text),
        funnel: lexicon.funnel.score_all(text),
        psycho_social: lexicon.psycho_social.score_all(text),
    }
}

pub fn analyze_document(doc: &Document, lexicon: &Lexicon) -> DocumentAnalysis {
    DocumentAnalysis {
        id: Some(doc.id),
        ..analyze_text(&doc.content, lexicon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_covers_all_families() {
        let lex = Lexicon::builtin();
        let a = analyze_text("Viar Q1 di Bandung murah, saya puas dan mau beli lagi", &lex);
        assert_eq!(a.brand, Some(Brand::Viar));
        assert_eq!(a.location, Location::Bandung);
        assert_eq!(a.emotion, Emotion::Satisfaction);
        assert_eq!(a.emotion_label, "Kepuasan");
        assert_eq!(a.utaut2.len(), 7);
        assert_eq!(a.marketing_mix.len(), 8);
        assert_eq!(a.funnel.len(), 5);
        assert_eq!(a.psycho_social.len(), 6);
        assert!(a.id.is_none());
    }

    #[test]
    fn document_analysis_keeps_id() {
        let lex = Lexicon::builtin();
        let doc = Document::new(42, "Gesits");
        let a = analyze_document(&doc, &lex);
        assert_eq!(a.id, Some(42));
        assert_eq!(a.intention, derive_intention("Gesits"));
    }
}
