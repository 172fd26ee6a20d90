use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MODEL_VERSION: &str = "2.1.0";
pub const ANALYSIS_TYPE: &str = "fundamental_technical_hybrid";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
    Watch,
}

impl Recommendation {
    /// First matching rule wins; the rules overlap, so the order matters.
    pub fn classify(confidence: f64, growth_score: f64, risk_score: f64) -> Self {
        if confidence > 80.0 && growth_score > 70.0 {
            Self::Buy
        } else if confidence > 65.0 && risk_score < 60.0 {
            Self::Hold
        } else if risk_score > 80.0 {
            Self::Sell
        } else {
            Self::Watch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::Watch => "WATCH",
        }
    }

    pub fn narrative(self, symbol: &str, sector: &str) -> String {
        match self {
            Self::Buy => format!(
                "{symbol} shows strong AI-analyzed fundamentals with high growth potential in the {sector} sector. \
                 Machine learning models indicate favorable market conditions and positive sentiment indicators."
            ),
            Self::Hold => format!(
                "{symbol} demonstrates stable performance metrics according to our AI analysis. \
                 The {sector} sector shows moderate growth with balanced risk-reward ratio suitable for long-term holding."
            ),
            Self::Sell => format!(
                "AI risk assessment for {symbol} indicates elevated volatility in the {sector} sector. \
                 Predictive models suggest potential downward pressure with increased market uncertainty."
            ),
            Self::Watch => format!(
                "{symbol} presents mixed signals in our AI analysis. \
                 The {sector} sector requires careful monitoring as machine learning models show conflicting trend indicators."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMetadata {
    pub model_version: String,
    pub analysis_type: String,
    pub data_points_analyzed: u32,
    pub processing_time_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInsight {
    pub id: Uuid,
    pub company_id: i64,
    pub company_name: String,
    pub symbol: String,
    pub insight_text: String,
    pub confidence_score: u32,
    pub recommendation: Recommendation,
    pub date_generated: DateTime<Utc>,
    pub key_factors: Vec<String>,
    pub ai_metadata: AiMetadata,
}
