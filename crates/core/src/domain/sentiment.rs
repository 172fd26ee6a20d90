use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MARKET_FACTORS: [&str; 5] = [
    "Technical indicator analysis",
    "News sentiment processing",
    "Trading volume patterns",
    "Sector rotation analysis",
    "Global market correlation",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Neutral,
    Bearish,
}

impl Sentiment {
    pub fn from_score(score: f64) -> Self {
        if score > 0.3 {
            Self::Bullish
        } else if score > -0.3 {
            Self::Neutral
        } else {
            Self::Bearish
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Bullish => {
                "AI models indicate positive market momentum with strong investor confidence"
            }
            Self::Neutral => "Market shows balanced sentiment with mixed signals from AI indicators",
            Self::Bearish => {
                "AI analysis suggests cautious market conditions with risk-off sentiment"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub sentiment: Sentiment,
    pub score: f64,
    pub description: String,
    pub confidence: u32,
    pub timestamp: DateTime<Utc>,
    pub factors: Vec<String>,
}

impl SentimentReading {
    pub fn new(score: f64, confidence: u32, timestamp: DateTime<Utc>) -> Self {
        let sentiment = Sentiment::from_score(score);
        Self {
            sentiment,
            score,
            description: sentiment.description().to_string(),
            confidence,
            timestamp,
            factors: MARKET_FACTORS.iter().map(|f| f.to_string()).collect(),
        }
    }
}
