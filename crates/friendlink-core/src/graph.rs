use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::error::{FriendLinkError, Result};
use crate::user::{Snapshot, UserId};

/// Levels explored from the start user: 0 (start), 1 (direct friends),
/// 2 (friends of friends).
pub const MAX_DEPTH: usize = 2;

/// Second-degree friend suggestions over the directed friendship graph.
#[derive(Debug, Default, Clone, Copy)]
pub struct MutualFriendFinder;

impl MutualFriendFinder {
    pub fn new() -> Self {
        Self
    }

    /// Ids reachable at exactly two hops that the start user does not
    /// already list as friends. An unknown start id yields an empty set.
    /// Ids with no user record are never reported.
    pub fn find(&self, snapshot: &Snapshot, start: &str) -> BTreeSet<UserId> {
        let Some(direct) = snapshot.friends_of(start) else {
            tracing::debug!(user = start, "start user absent, no suggestions");
            return BTreeSet::new();
        };

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::new();
        let mut out = BTreeSet::new();
        queue.push_back((start, 0));
        visited.insert(start);

        while let Some((node, level)) = queue.pop_front() {
            if level >= MAX_DEPTH {
                continue;
            }
            // dangling ids were visited but have no edges to follow
            let Some(edges) = snapshot.friends_of(node) else {
                continue;
            };
            for next in edges {
                if !visited.insert(next.as_str()) {
                    continue;
                }
                queue.push_back((next.as_str(), level + 1));
                if level + 1 == MAX_DEPTH
                    && next != start
                    && !direct.contains(next)
                    && snapshot.contains(next)
                {
                    out.insert(next.clone());
                }
            }
        }

        tracing::debug!(user = start, suggestions = out.len(), "mutual friend search done");
        out
    }

    /// Same as [`find`](Self::find) but an unknown start id is reported as
    /// [`FriendLinkError::UserNotFound`] instead of an empty set.
    pub fn find_strict(&self, snapshot: &Snapshot, start: &str) -> Result<BTreeSet<UserId>> {
        if !snapshot.contains(start) {
            return Err(FriendLinkError::UserNotFound(start.to_string()));
        }
        Ok(self.find(snapshot, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    fn ids(items: &[&str]) -> BTreeSet<UserId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn example() -> Snapshot {
        Snapshot::from_users([
            User::new("u1", "Ann").with_friends(["u2", "u3"]),
            User::new("u2", "Bob").with_friends(["u1", "u4"]),
            User::new("u3", "Cid").with_friends(["u1"]),
            User::new("u4", "Dee").with_friends(["u2"]),
        ])
    }

    #[test]
    fn finds_friends_of_friends() {
        let found = MutualFriendFinder::new().find(&example(), "u1");
        assert_eq!(found, ids(&["u4"]));
    }

    #[test]
    fn unknown_start_is_empty_not_error() {
        let finder = MutualFriendFinder::new();
        assert!(finder.find(&example(), "nobody").is_empty());
        assert!(matches!(
            finder.find_strict(&example(), "nobody"),
            Err(FriendLinkError::UserNotFound(id)) if id == "nobody"
        ));
    }

    #[test]
    fn never_goes_past_two_hops() {
        // chain u1 -> u2 -> u3 -> u4 -> u5
        let snapshot = Snapshot::from_users([
            User::new("u1", "a").with_friends(["u2"]),
            User::new("u2", "b").with_friends(["u3"]),
            User::new("u3", "c").with_friends(["u4"]),
            User::new("u4", "d").with_friends(["u5"]),
            User::new("u5", "e"),
        ]);
        assert_eq!(MutualFriendFinder::new().find(&snapshot, "u1"), ids(&["u3"]));
    }

    #[test]
    fn excludes_start_and_direct_friends() {
        // u3 is both a direct friend and a friend of u2
        let snapshot = Snapshot::from_users([
            User::new("u1", "a").with_friends(["u1", "u2", "u3"]),
            User::new("u2", "b").with_friends(["u1", "u3", "u4"]),
            User::new("u3", "c").with_friends(["u2", "u5"]),
            User::new("u4", "d"),
            User::new("u5", "e"),
        ]);
        let found = MutualFriendFinder::new().find(&snapshot, "u1");
        assert_eq!(found, ids(&["u4", "u5"]));
        assert!(!found.contains("u1"));
    }

    #[test]
    fn shared_second_degree_reported_once() {
        let snapshot = Snapshot::from_users([
            User::new("u1", "a").with_friends(["u2", "u3"]),
            User::new("u2", "b").with_friends(["u9"]),
            User::new("u3", "c").with_friends(["u9"]),
            User::new("u9", "z"),
        ]);
        let found = MutualFriendFinder::new().find(&snapshot, "u1");
        assert_eq!(found, ids(&["u9"]));
    }

    #[test]
    fn tolerates_dangling_and_self_edges() {
        let snapshot = Snapshot::from_users([
            User::new("u1", "a").with_friends(["ghost", "u2"]),
            User::new("u2", "b").with_friends(["u2", "phantom", "u3"]),
            User::new("u3", "c"),
        ]);
        let found = MutualFriendFinder::new().find(&snapshot, "u1");
        assert_eq!(found, ids(&["u3"]));
    }

    #[test]
    fn edges_are_directed() {
        // u2 lists u1 but u1 lists nobody
        let snapshot = Snapshot::from_users([
            User::new("u1", "a"),
            User::new("u2", "b").with_friends(["u1", "u3"]),
            User::new("u3", "c"),
        ]);
        assert!(MutualFriendFinder::new().find(&snapshot, "u1").is_empty());
        assert!(MutualFriendFinder::new().find(&snapshot, "u2").is_empty());
    }
}
