//! BGP peer session check.
//!
//! A peer is flagged when it is administratively started but its session is
//! not established.

use crate::{
    configuration::BgpPeersArgs,
    entities::BgpPeer,
    mib::{Family, BGP_PEER_TABLE},
    transport::Transport,
    verdict::{PerfSample, Verdict},
};

use super::{walk_tables, CheckError};

pub fn run(transport: &mut dyn Transport, args: &BgpPeersArgs) -> (Verdict, Option<serde_json::Value>) {
    let peers = match collect(transport) {
        Ok(peers) => peers,
        Err(e) => return (e.into_verdict(), None),
    };

    let mismatched: Vec<&BgpPeer> = peers.iter().filter(|p| p.is_mismatched()).collect();

    let verdict = if mismatched.is_empty() {
        let verdict = Verdict::ok(format!(
            "All {} BGP peers have matching admin and operational status",
            peers.len()
        ));
        with_count(verdict, args.perf_data, "total_peers", peers.len())
    } else {
        let listing: Vec<String> = mismatched
            .iter()
            .map(|p| format!("{} ({})", p.remote_addr, p.state_name()))
            .collect();
        let verdict = Verdict::critical(format!(
            "Found {} BGP peer(s) with admin status mismatch: {}",
            mismatched.len(),
            listing.join(", ")
        ));
        with_count(verdict, args.perf_data, "mismatched_peers", mismatched.len())
    };

    let details = serde_json::to_value(&peers)
        .map_err(|e| log::warn!("Cannot serialize BGP peers: {}", e))
        .ok();

    (verdict, details)
}

/// Collects every peer, ordered by remote address.
pub fn collect(transport: &mut dyn Transport) -> Result<Vec<BgpPeer>, CheckError> {
    let collected = walk_tables(transport, Family::BgpPeer, &[BGP_PEER_TABLE])?;
    log::debug!(
        "{} BGP peers on {}",
        collected.records.len(),
        transport.target()
    );
    Ok(collected.records.values().map(BgpPeer::from_record).collect())
}

fn with_count(verdict: Verdict, enabled: bool, label: &str, count: usize) -> Verdict {
    if enabled {
        verdict.with_perf(PerfSample::new(label, count as f64, ""))
    } else {
        verdict
    }
}
