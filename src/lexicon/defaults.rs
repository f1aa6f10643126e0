//! Built-in keyword tables (Indonesian + English).
//!
//! Bases: UTAUT2 and psycho-social start neutral at 50, marketing mix at 40,
//! funnel stages at 35 (most texts never reach the deeper stages).

use super::dimensions::{Dimension, FunnelStage, MarketingMix, PsychoSocial, Utaut2};
use super::{FamilyLexicon, KeywordRule};

pub const UTAUT2_BASE: i32 = 50;
pub const MARKETING_MIX_BASE: i32 = 40;
pub const FUNNEL_BASE: i32 = 35;
pub const PSYCHO_SOCIAL_BASE: i32 = 50;

struct Table<D: 'static> {
    dimension: D,
    positive: &'static [(&'static str, i32)],
    negative: &'static [(&'static str, i32)],
}

fn build<D: Dimension>(base: i32, tables: &[Table<D>]) -> FamilyLexicon<D> {
    let mut fam = FamilyLexicon::new(base);
    for t in tables {
        for &(kw, w) in t.positive {
            fam.push(t.dimension, KeywordRule::positive(kw, w));
        }
        for &(kw, w) in t.negative {
            fam.push(t.dimension, KeywordRule::negative(kw, w));
        }
    }
    fam
}

// ── UTAUT2 ──────────────────────────────────────────────────────────

static UTAUT2: &[Table<Utaut2>] = &[
    Table {
        dimension: Utaut2::PerformanceExpectancy,
        positive: &[
            ("irit", 10),
            ("hemat", 10),
            ("efisien", 10),
            ("cepat", 8),
            ("bertenaga", 8),
            ("jarak tempuh", 6),
            ("performa", 6),
            ("efficient", 10),
            ("fast", 8),
            ("powerful", 8),
            ("range", 5),
        ],
        negative: &[
            ("lemot", 10),
            ("lambat", 8),
            ("boros", 8),
            ("slow", 8),
            ("weak", 6),
        ],
    },
    Table {
        dimension: Utaut2::EffortExpectancy,
        positive: &[
            ("mudah", 10),
            ("gampang", 10),
            ("praktis", 8),
            ("simpel", 6),
            ("ringan", 6),
            ("easy", 10),
            ("simple", 6),
            ("convenient", 8),
        ],
        negative: &[
            ("ribet", 10),
            ("susah", 10),
            ("sulit", 8),
            ("rumit", 8),
            ("complicated", 10),
            ("difficult", 8),
        ],
    },
    Table {
        dimension: Utaut2::SocialInfluence,
        positive: &[
            ("teman", 8),
            ("keluarga", 8),
            ("rekomendasi", 10),
            ("viral", 8),
            ("tetangga", 6),
            ("friends", 8),
            ("family", 8),
            ("recommended", 10),
            ("influencer", 6),
        ],
        negative: &[("diejek", 8), ("malu", 8), ("gengsi", 6)],
    },
    Table {
        dimension: Utaut2::HedonicMotivation,
        positive: &[
            ("seru", 10),
            ("asyik", 10),
            ("keren", 8),
            ("suka", 6),
            ("senang", 8),
            ("nyaman", 6),
            ("fun", 10),
            ("enjoy", 8),
            ("cool", 6),
            ("love", 8),
        ],
        negative: &[("bosan", 8), ("membosankan", 10), ("boring", 10)],
    },
    Table {
        dimension: Utaut2::FacilitatingConditions,
        positive: &[
            ("spklu", 10),
            ("charging station", 10),
            ("stasiun pengisian", 10),
            ("bengkel", 8),
            ("suku cadang", 8),
            ("dealer", 6),
            ("swap baterai", 8),
            ("service center", 8),
        ],
        negative: &[
            ("jarang", 8),
            ("langka", 10),
            ("tidak ada bengkel", 12),
            ("susah cari", 10),
            ("no charging", 12),
        ],
    },
    Table {
        dimension: Utaut2::PriceValue,
        positive: &[
            ("murah", 10),
            ("terjangkau", 10),
            ("subsidi", 10),
            ("worth", 8),
            ("hemat biaya", 10),
            ("affordable", 10),
            ("cheap", 8),
            ("value", 6),
        ],
        negative: &[
            ("mahal", 12),
            ("kemahalan", 10),
            ("overpriced", 12),
            ("expensive", 10),
        ],
    },
    Table {
        dimension: Utaut2::Habit,
        positive: &[
            ("setiap hari", 10),
            ("sehari-hari", 10),
            ("rutin", 8),
            ("terbiasa", 10),
            ("daily", 10),
            ("everyday", 10),
            ("commute", 6),
        ],
        negative: &[("jarang pakai", 10), ("belum terbiasa", 10), ("rarely", 8)],
    },
];

// ── Marketing mix (8P) ──────────────────────────────────────────────

static MARKETING_MIX: &[Table<MarketingMix>] = &[
    Table {
        dimension: MarketingMix::Product,
        positive: &[
            ("desain", 8),
            ("fitur", 8),
            ("kualitas", 8),
            ("baterai", 6),
            ("motor listrik", 5),
            ("design", 8),
            ("feature", 8),
            ("battery", 6),
        ],
        negative: &[("cacat", 12), ("rusak", 10), ("defect", 12)],
    },
    Table {
        dimension: MarketingMix::Price,
        positive: &[
            ("harga", 8),
            ("murah", 10),
            ("terjangkau", 10),
            ("cicilan", 8),
            ("subsidi", 10),
            ("diskon", 6),
            ("price", 8),
            ("affordable", 10),
        ],
        negative: &[("mahal", 10), ("expensive", 10), ("overpriced", 12)],
    },
    Table {
        dimension: MarketingMix::Place,
        positive: &[
            ("dealer", 10),
            ("diler", 10),
            ("showroom", 10),
            ("tersedia", 6),
            ("online", 6),
            ("marketplace", 6),
            ("store", 6),
        ],
        negative: &[
            ("susah dicari", 10),
            ("tidak tersedia", 10),
            ("out of stock", 10),
        ],
    },
    Table {
        dimension: MarketingMix::Promotion,
        positive: &[
            ("promo", 10),
            ("iklan", 8),
            ("diskon", 8),
            ("cashback", 10),
            ("gratis", 6),
            ("pameran", 6),
            ("advertisement", 8),
            ("campaign", 6),
            ("discount", 8),
        ],
        negative: &[],
    },
    Table {
        dimension: MarketingMix::People,
        positive: &[
            ("sales", 8),
            ("pelayanan", 10),
            ("ramah", 10),
            ("teknisi", 8),
            ("mekanik", 8),
            ("staff", 6),
            ("friendly", 10),
            ("service", 6),
        ],
        negative: &[("tidak ramah", 12), ("jutek", 10), ("rude", 10)],
    },
    Table {
        dimension: MarketingMix::Process,
        positive: &[
            ("proses", 6),
            ("pengiriman", 8),
            ("test ride", 8),
            ("kredit", 6),
            ("registrasi", 6),
            ("delivery", 8),
        ],
        negative: &[
            ("inden", 10),
            ("lama", 8),
            ("ribet", 10),
            ("antre", 8),
            ("delay", 10),
        ],
    },
    Table {
        dimension: MarketingMix::PhysicalEvidence,
        positive: &[
            ("showroom", 8),
            ("tampilan", 8),
            ("garansi", 10),
            ("sertifikat", 8),
            ("kokoh", 8),
            ("warranty", 10),
        ],
        negative: &[("kusam", 8), ("lecet", 8)],
    },
    Table {
        dimension: MarketingMix::ProductivityQuality,
        positive: &[
            ("awet", 10),
            ("tahan lama", 10),
            ("kualitas", 8),
            ("andal", 10),
            ("reliable", 10),
            ("durable", 10),
            ("quality", 8),
        ],
        negative: &[("mogok", 12), ("cepat rusak", 12), ("breakdown", 12)],
    },
];

// ── Marketing funnel ────────────────────────────────────────────────

static FUNNEL: &[Table<FunnelStage>] = &[
    Table {
        dimension: FunnelStage::Awareness,
        positive: &[
            ("tahu", 6),
            ("dengar", 6),
            ("lihat", 6),
            ("iklan", 8),
            ("baru tahu", 10),
            ("heard", 8),
            ("saw", 6),
            ("aware", 8),
        ],
        negative: &[],
    },
    Table {
        dimension: FunnelStage::Consideration,
        positive: &[
            ("pertimbangkan", 12),
            ("bandingkan", 10),
            ("membandingkan", 10),
            ("review", 8),
            ("spesifikasi", 8),
            ("compare", 10),
            ("considering", 12),
        ],
        negative: &[],
    },
    Table {
        dimension: FunnelStage::Preference,
        positive: &[
            ("lebih suka", 12),
            ("lebih baik", 10),
            ("pilih", 8),
            ("favorit", 10),
            ("prefer", 12),
            ("better than", 10),
        ],
        negative: &[],
    },
    Table {
        dimension: FunnelStage::Intent,
        positive: &[
            ("mau beli", 15),
            ("ingin beli", 15),
            ("akan membeli", 15),
            ("rencana beli", 12),
            ("pesan", 8),
            ("buy", 10),
            ("purchase", 10),
            ("order", 8),
        ],
        negative: &[("tidak jadi", 12), ("batal", 12)],
    },
    Table {
        dimension: FunnelStage::Advocacy,
        positive: &[
            ("rekomendasi", 12),
            ("sarankan", 10),
            ("ajak", 8),
            ("recommend", 12),
            ("share", 6),
            ("puas", 8),
        ],
        negative: &[],
    },
];

// ── Psycho-social ───────────────────────────────────────────────────

static PSYCHO_SOCIAL: &[Table<PsychoSocial>] = &[
    Table {
        dimension: PsychoSocial::Trust,
        positive: &[
            ("percaya", 12),
            ("terpercaya", 12),
            ("andal", 10),
            // bare "aman" would also hit "nyaman"
            ("keamanan", 8),
            ("rasa aman", 8),
            ("lebih aman", 8),
            ("cukup aman", 8),
            ("sangat aman", 8),
            ("garansi", 8),
            ("trust", 12),
            ("reliable", 10),
            ("safe", 8),
        ],
        negative: &[("tidak percaya", 15), ("penipuan", 15), ("scam", 15)],
    },
    Table {
        dimension: PsychoSocial::Anxiety,
        positive: &[
            ("khawatir", 12),
            ("cemas", 12),
            ("takut", 12),
            ("was-was", 10),
            ("worried", 12),
            ("anxious", 12),
            ("afraid", 10),
        ],
        negative: &[("tenang", 10), ("yakin", 8), ("calm", 8)],
    },
    Table {
        dimension: PsychoSocial::Excitement,
        positive: &[
            ("seru", 10),
            ("keren", 10),
            ("wow", 8),
            ("antusias", 12),
            ("tidak sabar", 12),
            ("excited", 12),
            ("amazing", 10),
            ("mantap", 8),
        ],
        negative: &[("kecewa", 10), ("disappointed", 10)],
    },
    Table {
        dimension: PsychoSocial::SocialInfluence,
        positive: &[
            ("teman", 8),
            ("keluarga", 8),
            ("viral", 10),
            ("tren", 8),
            ("kata orang", 10),
            ("friends", 8),
            ("influencer", 10),
        ],
        negative: &[],
    },
    Table {
        dimension: PsychoSocial::SelfEfficacy,
        positive: &[
            ("bisa", 6),
            ("mampu", 10),
            ("mudah", 8),
            ("paham", 8),
            ("sendiri", 6),
            ("confident", 10),
            ("easy", 8),
        ],
        negative: &[("bingung", 10), ("tidak paham", 12), ("confused", 10)],
    },
    Table {
        dimension: PsychoSocial::RiskPerception,
        positive: &[
            ("risiko", 12),
            ("bahaya", 12),
            ("meledak", 15),
            ("kebakaran", 15),
            ("mogok", 10),
            ("banjir", 10),
            ("risk", 12),
            ("danger", 12),
            ("explode", 15),
        ],
        negative: &[
            ("keamanan", 8),
            ("rasa aman", 8),
            ("lebih aman", 8),
            ("cukup aman", 8),
            ("sangat aman", 8),
            ("safe", 8),
        ],
    },
];

pub fn utaut2() -> FamilyLexicon<Utaut2> {
    build(UTAUT2_BASE, UTAUT2)
}

pub fn marketing_mix() -> FamilyLexicon<MarketingMix> {
    build(MARKETING_MIX_BASE, MARKETING_MIX)
}

pub fn funnel() -> FamilyLexicon<FunnelStage> {
    build(FUNNEL_BASE, FUNNEL)
}

pub fn psycho_social() -> FamilyLexicon<PsychoSocial> {
    build(PSYCHO_SOCIAL_BASE, PSYCHO_SOCIAL)
}
