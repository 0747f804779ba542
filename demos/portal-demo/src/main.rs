//! Pramaan Portal Demo
//!
//! Walks the reference seed set the way a user would:
//! - Dashboard of assets
//! - Asset page with ownership and proposals
//! - Proposal page with its advisory annotation
//! - A governance vote and the resulting license change
//!
//! Pass `--reject` to vote NO, `--json` for JSON logs and a JSON dump of
//! the final dashboard.

use std::env;

use pramaan_core::seed::{CELESTIAL_ECHO, GAME_STUDIO_OFFER};
use pramaan_core::Severity;
use pramaan_governance::{Ballot, VotePhase};
use pramaan_runtime::{LogFormat, Portal, PortalConfig};
use pramaan_store::{ProposalView, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let ballot = if args.iter().any(|a| a == "--reject") {
        Ballot::Reject
    } else {
        Ballot::Accept
    };

    let config = PortalConfig {
        log_format: if json { LogFormat::Json } else { LogFormat::Pretty },
        ..PortalConfig::default()
    };
    let mut portal = Portal::launch(Store::reference()?, config);

    println!("=== Pramaan Portal ===\n");
    println!("1. Asset dashboard");
    for card in portal.dashboard() {
        let verified = if card.creator_verified { " (Verified)" } else { "" };
        println!("   [{}] {} - {}", card.id, card.title, card.asset_type);
        println!("       Creator: {}{}", card.creator, verified);
        println!("       License: {}", card.current_license);
    }

    println!("\n2. Asset page");
    let asset = portal.select_asset(CELESTIAL_ECHO)?;
    println!("   {} ({})", asset.asset.title(), asset.asset.asset_type());
    println!("   Ownership:");
    for (holder, share) in asset.ownership_rows() {
        println!("     {:<14} {:>3}%", holder, share);
    }
    println!("   Proposals:");
    for proposal in &asset.proposals {
        println!(
            "     [{}] {} - {} [{}]",
            proposal.id(),
            proposal.title(),
            proposal.offer(),
            proposal.status()
        );
    }

    println!("\n3. Proposal page");
    let view = portal.select_proposal(GAME_STUDIO_OFFER)?;
    print_proposal(&view);

    println!("\n4. Governance vote ({:?})", ballot);
    portal.cast_ballot(ballot)?;
    if portal.vote_phase() == Some(VotePhase::InProgress) {
        println!("   VOTING IN PROGRESS...");
    }

    match portal.wait_for_resolution().await {
        Some(_) => match portal.vote_outcome() {
            Some(banner) => {
                println!("   {}", banner.headline);
                println!("   Asset license is now: \"{}\"", banner.license);
            }
            None => println!("   Vote resolved but the outcome was not applied"),
        },
        None => println!("   Vote did not resolve"),
    }

    if json {
        println!("\n5. Final dashboard");
        println!("{}", serde_json::to_string_pretty(&portal.dashboard())?);
    }

    portal.teardown();
    println!("\n=== Demo Complete ===");
    Ok(())
}

fn print_proposal(view: &ProposalView) {
    let proposal = &view.proposal;
    println!("   {}", proposal.title());
    println!("   For asset: {}", view.asset_title);
    println!("   Offer: {}", proposal.offer());
    println!("   {}", proposal.description());

    let Some(annotation) = &view.annotation else {
        println!("   No advisory analysis available for this proposal.");
        return;
    };

    println!("   Advisory analysis:");
    for (category, finding) in annotation.findings() {
        let marker = match finding.severity {
            Severity::Compliant => "ok",
            Severity::Caution => "!!",
            Severity::HighRisk => "XX",
        };
        println!("     [{}] {}: {}", marker, category.title(), finding.status_label);
        println!("          {}", finding.narrative);
    }
}
