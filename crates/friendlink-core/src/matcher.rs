use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{FriendLinkError, Result};
use crate::similarity::{interest_overlap, mutual_friend_count};
use crate::user::{Snapshot, UserId};

/// Independent inclusion thresholds. A candidate qualifies when any one
/// signal passes; a shared location always passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub min_similarity: f64,
    pub min_mutual_friends: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            min_mutual_friends: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    SharedInterests,
    MutualFriends,
    SameLocation,
}

/// Raw per-signal values behind a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub matched_interests: BTreeSet<String>,
    pub similarity: f64,
    pub mutual_friends: usize,
    pub same_location: bool,
    reasons: Vec<MatchReason>,
}

impl Evidence {
    /// Signals that passed their threshold, in a fixed order.
    pub fn reasons(&self) -> &[MatchReason] {
        &self.reasons
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: UserId,
    pub name: String,
    pub evidence: Evidence,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CandidateMatcher {
    thresholds: MatchThresholds,
}

impl CandidateMatcher {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Every user other than `start` and its direct friends that passes at
    /// least one threshold, in ascending id order.
    pub fn find_matches(&self, snapshot: &Snapshot, start: &str) -> Result<Vec<Candidate>> {
        let base = snapshot
            .get(start)
            .ok_or_else(|| FriendLinkError::UserNotFound(start.to_string()))?;

        let mut out = Vec::new();
        for user in snapshot.users() {
            if user.id == base.id || base.is_friend_of(&user.id) {
                continue;
            }
            let overlap = interest_overlap(base, user);
            let mutual_friends = mutual_friend_count(base, user);
            let same_location = base.location == user.location;

            let mut reasons = Vec::new();
            if overlap.score >= self.thresholds.min_similarity {
                reasons.push(MatchReason::SharedInterests);
            }
            if mutual_friends >= self.thresholds.min_mutual_friends {
                reasons.push(MatchReason::MutualFriends);
            }
            if same_location {
                reasons.push(MatchReason::SameLocation);
            }
            if reasons.is_empty() {
                continue;
            }

            out.push(Candidate {
                id: user.id.clone(),
                name: user.name.clone(),
                evidence: Evidence {
                    matched_interests: overlap.shared,
                    similarity: overlap.score,
                    mutual_friends,
                    same_location,
                    reasons,
                },
            });
        }

        tracing::debug!(user = start, matches = out.len(), "candidate matching done");
        Ok(out)
    }
}
