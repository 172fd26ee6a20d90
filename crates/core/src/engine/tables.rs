//! Static weight and factor tables. Adding a sector is a data change here.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorProfile {
    pub growth: f64,
    pub stability: f64,
    pub risk: f64,
}

pub const DEFAULT_PROFILE: SectorProfile = SectorProfile {
    growth: 0.6,
    stability: 0.7,
    risk: 0.6,
};

pub const SECTOR_PROFILES: &[(&str, SectorProfile)] = &[
    (
        "Technology",
        SectorProfile {
            growth: 0.8,
            stability: 0.6,
            risk: 0.7,
        },
    ),
    (
        "Healthcare",
        SectorProfile {
            growth: 0.7,
            stability: 0.8,
            risk: 0.5,
        },
    ),
    (
        "Finance",
        SectorProfile {
            growth: 0.6,
            stability: 0.9,
            risk: 0.6,
        },
    ),
    (
        "Education",
        SectorProfile {
            growth: 0.7,
            stability: 0.7,
            risk: 0.6,
        },
    ),
    (
        "E-commerce",
        SectorProfile {
            growth: 0.9,
            stability: 0.5,
            risk: 0.8,
        },
    ),
];

pub const DEFAULT_FACTORS: &[&str] = &[
    "Strong market position in sector",
    "Consistent revenue growth trajectory",
    "Effective cost management strategies",
    "Experienced management team",
    "Favorable industry dynamics",
];

// E-commerce has a profile but no pool of its own.
pub const FACTOR_POOLS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "Strong innovation pipeline and R&D investment",
            "Market leadership in emerging technologies",
            "Scalable business model with network effects",
            "High customer retention and engagement metrics",
            "Competitive moat through proprietary technology",
        ],
    ),
    (
        "Healthcare",
        &[
            "Robust clinical trial pipeline",
            "Regulatory approval momentum",
            "Strong intellectual property portfolio",
            "Growing addressable market size",
            "Strategic partnerships with healthcare providers",
        ],
    ),
    (
        "Finance",
        &[
            "Strong capital adequacy ratios",
            "Diversified revenue streams",
            "Digital transformation progress",
            "Regulatory compliance excellence",
            "Market share expansion in key segments",
        ],
    ),
    (
        "Education",
        &[
            "Growing digital adoption trends",
            "Strong brand recognition and trust",
            "Scalable online delivery platform",
            "International expansion opportunities",
            "Government policy support for education",
        ],
    ),
];

/// Case-sensitive lookup; anything unknown gets [`DEFAULT_PROFILE`].
pub fn sector_profile(sector: &str) -> &'static SectorProfile {
    SECTOR_PROFILES
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, profile)| profile)
        .unwrap_or(&DEFAULT_PROFILE)
}

pub fn factor_pool(sector: &str) -> &'static [&'static str] {
    FACTOR_POOLS
        .iter()
        .find(|(name, _)| *name == sector)
        .map(|(_, pool)| *pool)
        .unwrap_or(DEFAULT_FACTORS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_sectors_resolve_to_their_profile() {
        assert_eq!(sector_profile("Finance").stability, 0.9);
        assert_eq!(sector_profile("E-commerce").growth, 0.9);
    }

    #[test]
    fn unknown_sector_falls_back_to_default() {
        assert_eq!(*sector_profile("Unknown-Sector-XYZ"), DEFAULT_PROFILE);
        assert_eq!(*sector_profile("technology"), DEFAULT_PROFILE);
        assert_eq!(factor_pool("Unknown-Sector-XYZ"), DEFAULT_FACTORS);
    }

    #[test]
    fn e_commerce_uses_default_factor_pool() {
        assert_eq!(factor_pool("E-commerce"), DEFAULT_FACTORS);
    }

    #[test]
    fn weights_are_unit_interval() {
        for (_, p) in SECTOR_PROFILES.iter().chain([("default", DEFAULT_PROFILE)].iter()) {
            for w in [p.growth, p.stability, p.risk] {
                assert!((0.0..=1.0).contains(&w));
            }
        }
    }

    #[test]
    fn pools_have_five_distinct_factors() {
        for pool in FACTOR_POOLS.iter().map(|(_, p)| *p).chain([DEFAULT_FACTORS]) {
            assert_eq!(pool.len(), 5);
            assert_eq!(pool.iter().collect::<HashSet<_>>().len(), 5);
        }
    }
}
