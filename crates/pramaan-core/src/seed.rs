//! Reference seed set
//!
//! Two assets, two proposals against the first asset and one advisory
//! annotation. Loading seed data is the caller's concern; these builders
//! exist so the runtime, tests and demos start from the same records.

use crate::{
    AdvisoryAnnotation, AnalysisFinding, Asset, AssetId, Identity, LicenseTerms, OwnershipRecord,
    PramaanResult, Proposal, ProposalId, Severity,
};

/// License every seeded asset starts under
pub const DEFAULT_LICENSE: &str = "Default 5% Public Royalty";

pub const CELESTIAL_ECHO: AssetId = AssetId(1);
pub const QUANTUM_LULLABY: AssetId = AssetId(2);
pub const GAME_STUDIO_OFFER: ProposalId = ProposalId(101);
pub const INDIE_FILM_OFFER: ProposalId = ProposalId(102);

/// The verified creator of both seeded assets
pub fn creator() -> Identity {
    Identity::named("Shri Sharma")
        .with_wallet("0x...SBT_Identity")
        .with_verified(true)
}

pub fn reference_assets() -> PramaanResult<Vec<Asset>> {
    Ok(vec![
        Asset::new(
            CELESTIAL_ECHO,
            "Celestial Echo",
            "AI-Generated Artwork",
            creator(),
            vec![
                OwnershipRecord::new(creator(), 40),
                OwnershipRecord::new(Identity::named("Uthkarsh M."), 20),
                OwnershipRecord::new(Identity::named("Public DAO"), 40),
            ],
            DEFAULT_LICENSE,
        )?,
        Asset::new(
            QUANTUM_LULLABY,
            "Quantum Lullaby",
            "Generative Music Track",
            creator(),
            vec![OwnershipRecord::new(creator(), 100)],
            DEFAULT_LICENSE,
        )?,
    ])
}

pub fn reference_proposals() -> Vec<Proposal> {
    vec![
        Proposal::new(
            GAME_STUDIO_OFFER,
            CELESTIAL_ECHO,
            "Exclusive License Offer: 'GameStudio X'",
            "0x...GameStudio",
            "$25,000 (Flat Buyout)",
            "GameStudio X offers a one-time payment of $25,000 for a perpetual, exclusive \
             license to use 'Celestial Echo' in their upcoming AAA game 'Nebula's End'. \
             This will void all other royalty structures.",
            LicenseTerms::exclusive("GameStudio X"),
        ),
        Proposal::new(
            INDIE_FILM_OFFER,
            CELESTIAL_ECHO,
            "Non-Exclusive License: 'Indie Film'",
            "0x...IndieFilms",
            "$500 + 3% Revenue Share",
            "Offer for a non-exclusive license for a short film.",
            LicenseTerms::non_exclusive("Indie Film"),
        ),
    ]
}

pub fn reference_annotations() -> Vec<AdvisoryAnnotation> {
    vec![AdvisoryAnnotation {
        proposal_id: GAME_STUDIO_OFFER,
        compliance: AnalysisFinding::new(
            "PASSED",
            Severity::Compliant,
            "Proposal terms are compliant with EU Digital Services Act & US DMCA safe harbor.",
        ),
        strategy: AnalysisFinding::new(
            "RECOMMEND ACCEPT",
            Severity::Caution,
            "This $25,000 flat-fee represents a 170% premium over current 12-month projected \
             market value for similar assets.",
        ),
        risk: AnalysisFinding::new(
            "HIGH-RISK / HIGH-REWARD",
            Severity::HighRisk,
            "Accepting this deal locks in a high profit but sacrifices all future royalty \
             streams permanently. This is an irreversible decision.",
        ),
    }]
}
