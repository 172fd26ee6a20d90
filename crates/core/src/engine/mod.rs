pub mod tables;

use crate::config::Settings;
use crate::domain::company::CompanyInput;
use crate::domain::insight::{
    AiMetadata, CompanyInsight, Recommendation, ANALYSIS_TYPE, MODEL_VERSION,
};
use crate::domain::sentiment::SentimentReading;
use crate::entropy::{EntropySource, SeededEntropy, ThreadEntropy};
use crate::error::ValidationError;
use chrono::Utc;
use rand::distributions::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;
use statrs::distribution::Normal;
use std::ops::Range;
use std::sync::Arc;
use uuid::Uuid;

use self::tables::SectorProfile;

const CONFIDENCE_MEAN: f64 = 75.0;
const CONFIDENCE_STD_DEV: f64 = 10.0;
const CONFIDENCE_FLOOR: f64 = 50.0;
const CONFIDENCE_CEILING: f64 = 95.0;

const SENTIMENT_MEAN: f64 = 0.6;
const SENTIMENT_STD_DEV: f64 = 0.2;

const MAX_KEY_FACTORS: usize = 5;

// Upper bounds are exclusive.
const DATA_POINTS_RANGE: Range<u32> = 500..2000;
const PROCESSING_TIME_MS_RANGE: Range<u32> = 150..500;
const SENTIMENT_CONFIDENCE_RANGE: Range<u32> = 70..95;

/// Simulated insight generator. Holds no state besides its noise model, so a
/// single instance is shared by every request.
pub struct InsightEngine {
    entropy: Arc<dyn EntropySource>,
    analyst_noise: Normal,
    market_noise: Normal,
}

impl InsightEngine {
    pub fn new(entropy: Arc<dyn EntropySource>) -> anyhow::Result<Self> {
        let analyst_noise = Normal::new(CONFIDENCE_MEAN, CONFIDENCE_STD_DEV)
            .map_err(|e| anyhow::anyhow!("invalid analyst noise parameters: {e:?}"))?;
        let market_noise = Normal::new(SENTIMENT_MEAN, SENTIMENT_STD_DEV)
            .map_err(|e| anyhow::anyhow!("invalid market noise parameters: {e:?}"))?;

        Ok(Self {
            entropy,
            analyst_noise,
            market_noise,
        })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let entropy: Arc<dyn EntropySource> = match settings.insight_seed {
            Some(seed) => {
                tracing::info!(seed, "using seeded entropy; insights are reproducible");
                Arc::new(SeededEntropy::new(seed))
            }
            None => Arc::new(ThreadEntropy),
        };
        Self::new(entropy)
    }

    /// Coerces a raw company payload and scores it.
    pub fn generate_company_insight(
        &self,
        company: &Value,
    ) -> Result<CompanyInsight, ValidationError> {
        let company = CompanyInput::from_json(company)?;
        Ok(self.insight_for(&company))
    }

    pub fn insight_for(&self, company: &CompanyInput) -> CompanyInsight {
        let mut rng = self.entropy.rng();
        let profile = tables::sector_profile(&company.sector);

        let confidence = blend_confidence(
            self.analyst_noise.sample(&mut rng),
            profile,
            company.current_price,
        );
        let recommendation =
            Recommendation::classify(confidence, profile.growth * 100.0, profile.risk * 100.0);

        let pool = tables::factor_pool(&company.sector);
        let mut candidates = pool.to_vec();
        let (picked, _) = candidates.partial_shuffle(&mut rng, pool.len().min(MAX_KEY_FACTORS));
        let key_factors: Vec<String> = picked.iter().map(|f| f.to_string()).collect();

        let ai_metadata = AiMetadata {
            model_version: MODEL_VERSION.to_string(),
            analysis_type: ANALYSIS_TYPE.to_string(),
            data_points_analyzed: rng.gen_range(DATA_POINTS_RANGE),
            processing_time_ms: rng.gen_range(PROCESSING_TIME_MS_RANGE),
        };

        tracing::debug!(
            symbol = %company.symbol,
            sector = %company.sector,
            recommendation = recommendation.as_str(),
            confidence,
            "generated company insight"
        );

        CompanyInsight {
            id: Uuid::new_v4(),
            company_id: company.id,
            company_name: format!("{} Analysis", company.symbol),
            symbol: company.symbol.clone(),
            insight_text: recommendation.narrative(&company.symbol, &company.sector),
            confidence_score: confidence as u32,
            recommendation,
            date_generated: Utc::now(),
            key_factors,
            ai_metadata,
        }
    }

    /// Scores each company independently. Companies that fail validation are
    /// dropped; the caller only sees how many succeeded.
    pub fn batch_analyze(&self, companies: &[Value]) -> Vec<CompanyInsight> {
        let mut insights = Vec::with_capacity(companies.len());
        for (index, company) in companies.iter().enumerate() {
            match self.generate_company_insight(company) {
                Ok(insight) => insights.push(insight),
                Err(e) => tracing::warn!(index, error = %e, "skipping company in batch"),
            }
        }
        insights
    }

    pub fn market_sentiment(&self) -> SentimentReading {
        let mut rng = self.entropy.rng();
        let score = round_sentiment(self.market_noise.sample(&mut rng));
        let confidence = rng.gen_range(SENTIMENT_CONFIDENCE_RANGE);
        SentimentReading::new(score, confidence, Utc::now())
    }
}

/// Analyst noise plus sector stability plus a price term that rewards prices
/// at or below 100 and saturates for very cheap stocks. Clamped, not truncated.
pub fn blend_confidence(base: f64, profile: &SectorProfile, price: f64) -> f64 {
    let sector_adjustment = profile.stability * 10.0;
    let price_stability = (100.0 / price).min(10.0) * 5.0;
    (base + sector_adjustment + price_stability).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

/// Clamp to [-1, 1] and keep three decimals.
pub fn round_sentiment(raw: f64) -> f64 {
    (raw.clamp(-1.0, 1.0) * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::Sentiment;
    use serde_json::json;
    use std::collections::HashSet;

    const ALL_SECTORS: [&str; 7] = [
        "Technology",
        "Healthcare",
        "Finance",
        "Education",
        "E-commerce",
        "Unknown-Sector-XYZ",
        "",
    ];

    fn seeded_engine(seed: u64) -> InsightEngine {
        InsightEngine::new(Arc::new(SeededEntropy::new(seed))).unwrap()
    }

    fn company(sector: &str, price: f64) -> CompanyInput {
        CompanyInput {
            id: 42,
            symbol: "ACME".to_string(),
            current_price: price,
            sector: sector.to_string(),
        }
    }

    #[test]
    fn confidence_is_clamped() {
        let profile = tables::sector_profile("Finance");
        assert_eq!(blend_confidence(500.0, profile, 100.0), 95.0);
        assert_eq!(blend_confidence(-500.0, profile, 100.0), 50.0);
    }

    #[test]
    fn price_term_saturates_for_cheap_stocks() {
        let profile = &tables::DEFAULT_PROFILE;
        // 100/1 and 100/0.01 both hit the cap of 10 -> +50.
        assert_eq!(
            blend_confidence(0.0, profile, 1.0),
            blend_confidence(0.0, profile, 0.01)
        );
        // 75 + 7 + 5 at the neutral price.
        assert!((blend_confidence(75.0, profile, 100.0) - 87.0).abs() < 1e-9);
        // Expensive stocks get almost nothing from price.
        assert!((blend_confidence(75.0, profile, 10_000.0) - 82.05).abs() < 1e-9);
    }

    #[test]
    fn sentiment_is_clamped_and_rounded() {
        assert_eq!(round_sentiment(1.7), 1.0);
        assert_eq!(round_sentiment(-3.0), -1.0);
        assert_eq!(round_sentiment(0.123456), 0.123);
        assert_eq!(round_sentiment(-0.2996), -0.3);
    }

    #[test]
    fn insight_respects_invariants_for_every_sector() {
        let engine = seeded_engine(1);
        for sector in ALL_SECTORS {
            for price in [0.5, 12.0, 100.0, 2_500.0] {
                for _ in 0..25 {
                    let insight = engine.insight_for(&company(sector, price));
                    assert!((50..=95).contains(&insight.confidence_score));
                    assert!((500..=2000).contains(&insight.ai_metadata.data_points_analyzed));
                    assert!((150..=500).contains(&insight.ai_metadata.processing_time_ms));

                    let pool = tables::factor_pool(sector);
                    assert!(insight.key_factors.len() <= MAX_KEY_FACTORS);
                    assert_eq!(insight.key_factors.len(), pool.len().min(MAX_KEY_FACTORS));
                    let unique: HashSet<_> = insight.key_factors.iter().collect();
                    assert_eq!(unique.len(), insight.key_factors.len());
                    assert!(insight.key_factors.iter().all(|f| pool.contains(&f.as_str())));
                }
            }
        }
    }

    #[test]
    fn unknown_sector_uses_default_tables() {
        let engine = seeded_engine(2);
        let insight = engine
            .generate_company_insight(&json!({"symbol": "XYZ", "sector": "Unknown-Sector-XYZ"}))
            .unwrap();
        assert!(insight
            .key_factors
            .iter()
            .all(|f| tables::DEFAULT_FACTORS.contains(&f.as_str())));
        assert!(insight.insight_text.contains("Unknown-Sector-XYZ sector"));
    }

    #[test]
    fn insight_shape_matches_input() {
        let engine = seeded_engine(3);
        let insight = engine
            .generate_company_insight(&json!({
                "id": 9,
                "symbol": "MEDI",
                "current_price": 80,
                "sector": "Healthcare",
            }))
            .unwrap();
        assert_eq!(insight.company_id, 9);
        assert_eq!(insight.company_name, "MEDI Analysis");
        assert_eq!(insight.symbol, "MEDI");
        assert_eq!(
            insight.insight_text,
            insight.recommendation.narrative("MEDI", "Healthcare")
        );
        assert_eq!(insight.ai_metadata.model_version, MODEL_VERSION);
        assert_eq!(insight.ai_metadata.analysis_type, ANALYSIS_TYPE);
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let engine = seeded_engine(4);
        let insight = engine.generate_company_insight(&json!({})).unwrap();
        assert_eq!(insight.company_id, 1);
        assert_eq!(insight.symbol, "UNKNOWN");
        assert!(insight.insight_text.contains("Technology sector"));
    }

    #[test]
    fn healthcare_holds_when_confident() {
        // growth 70 is not > 70, so BUY is out of reach; risk 50 < 60 allows HOLD.
        let engine = seeded_engine(5);
        for _ in 0..20 {
            // A price of 1 adds the full +50, pinning confidence at the ceiling.
            let insight = engine.insight_for(&company("Healthcare", 1.0));
            assert_eq!(insight.confidence_score, 95);
            assert_eq!(insight.recommendation, Recommendation::Hold);
        }
    }

    #[test]
    fn neutral_risk_sectors_always_watch() {
        // risk 60 blocks HOLD and growth <= 70 blocks BUY.
        let engine = seeded_engine(6);
        for sector in ["Finance", "Education", "Unknown-Sector-XYZ"] {
            for price in [1.0, 100.0, 5_000.0] {
                let insight = engine.insight_for(&company(sector, price));
                assert_eq!(insight.recommendation, Recommendation::Watch);
            }
        }
    }

    #[test]
    fn high_growth_sectors_buy_or_watch() {
        let engine = seeded_engine(6);
        for sector in ["Technology", "E-commerce"] {
            for price in [1.0, 100.0, 5_000.0] {
                for _ in 0..25 {
                    let insight = engine.insight_for(&company(sector, price));
                    match insight.recommendation {
                        Recommendation::Buy => assert!(insight.confidence_score >= 80),
                        Recommendation::Watch => assert!(insight.confidence_score <= 80),
                        other => panic!("unexpected {other:?} for {sector}"),
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_same_insights() {
        let a = seeded_engine(99);
        let b = seeded_engine(99);
        for sector in ALL_SECTORS {
            let x = a.insight_for(&company(sector, 55.0));
            let y = b.insight_for(&company(sector, 55.0));
            assert_eq!(x.confidence_score, y.confidence_score);
            assert_eq!(x.recommendation, y.recommendation);
            assert_eq!(x.key_factors, y.key_factors);
            assert_eq!(x.ai_metadata, y.ai_metadata);
            assert_ne!(x.id, y.id);
        }
    }

    #[test]
    fn factor_order_varies_between_calls() {
        let engine = seeded_engine(7);
        let orders: HashSet<Vec<String>> = (0..20)
            .map(|_| engine.insight_for(&company("Finance", 100.0)).key_factors)
            .collect();
        assert!(orders.len() > 1);
    }

    #[test]
    fn batch_drops_malformed_companies() {
        let engine = seeded_engine(8);
        let companies = vec![
            json!({"symbol": "AAA", "current_price": 10, "sector": "Finance"}),
            json!({"symbol": "BBB", "current_price": "not-a-price"}),
            json!({"symbol": "CCC", "current_price": 250.0, "sector": "Education"}),
        ];
        let insights = engine.batch_analyze(&companies);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].symbol, "AAA");
        assert_eq!(insights[1].symbol, "CCC");
    }

    #[test]
    fn market_sentiment_is_consistent() {
        let engine = seeded_engine(9);
        for _ in 0..200 {
            let reading = engine.market_sentiment();
            assert!((-1.0..=1.0).contains(&reading.score));
            assert_eq!(reading.score, round_sentiment(reading.score));
            assert_eq!(reading.sentiment, Sentiment::from_score(reading.score));
            assert!((70..=95).contains(&reading.confidence));
            assert_eq!(reading.factors.len(), 5);
        }
    }

    #[test]
    fn thread_entropy_engine_works() {
        let engine = InsightEngine::new(Arc::new(ThreadEntropy)).unwrap();
        let insight = engine.insight_for(&CompanyInput::default());
        assert!((50..=95).contains(&insight.confidence_score));
    }
}
