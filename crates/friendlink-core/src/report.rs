use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{FriendLinkError, Result};
use crate::graph::MutualFriendFinder;
use crate::matcher::{Candidate, CandidateMatcher, MatchThresholds};
use crate::user::{Snapshot, UserId};

/// Both queries answered for one start user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub user_id: UserId,
    pub user_name: String,
    pub mutual_suggestions: BTreeSet<UserId>,
    pub matches: Vec<Candidate>,
}

pub fn build_report(snapshot: &Snapshot, start: &str, thresholds: MatchThresholds) -> Result<Report> {
    let user = snapshot
        .get(start)
        .ok_or_else(|| FriendLinkError::UserNotFound(start.to_string()))?;
    let mutual_suggestions = MutualFriendFinder::new().find(snapshot, start);
    let matches = CandidateMatcher::new(thresholds).find_matches(snapshot, start)?;
    Ok(Report {
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        mutual_suggestions,
        matches,
    })
}

/// One report per requested id, computed in parallel, in input order.
pub fn build_reports<S>(
    snapshot: &Snapshot,
    ids: &[S],
    thresholds: MatchThresholds,
) -> Vec<Result<Report>>
where
    S: AsRef<str> + Sync,
{
    ids.par_iter()
        .map(|id| build_report(snapshot, id.as_ref(), thresholds))
        .collect()
}
