use std::collections::BTreeSet;

use crate::user::User;

/// Jaccard index of two interest sets together with the shared interests.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestOverlap {
    pub score: f64,
    pub shared: BTreeSet<String>,
}

/// `|a ∩ b| / |a ∪ b|`; two empty sets score 0.0.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> InterestOverlap {
    let shared: BTreeSet<String> = a.intersection(b).cloned().collect();
    let union = a.union(b).count();
    if union == 0 {
        return InterestOverlap {
            score: 0.0,
            shared,
        };
    }
    InterestOverlap {
        score: shared.len() as f64 / union as f64,
        shared,
    }
}

pub fn interest_overlap(a: &User, b: &User) -> InterestOverlap {
    jaccard(&a.interests, &b.interests)
}

/// Ids present in both outgoing friend lists. Not symmetrised.
pub fn mutual_friend_count(a: &User, b: &User) -> usize {
    a.friends.intersection(&b.friends).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn jaccard_boundaries() {
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["c"])).score, 0.0);
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["b", "a"])).score, 1.0);

        let empty = jaccard(&set(&[]), &set(&[]));
        assert_eq!(empty.score, 0.0);
        assert!(empty.shared.is_empty());
    }

    #[test]
    fn one_shared_out_of_three() {
        let overlap = jaccard(&set(&["chess", "hiking"]), &set(&["chess", "cooking"]));
        assert!((overlap.score - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(overlap.shared, set(&["chess"]));
    }

    #[test]
    fn interests_are_case_sensitive() {
        let overlap = jaccard(&set(&["Chess"]), &set(&["chess"]));
        assert_eq!(overlap.score, 0.0);
    }

    #[test]
    fn mutual_count_uses_outgoing_edges_only() {
        let a = User::new("a", "A").with_friends(["x", "y", "z"]);
        let b = User::new("b", "B").with_friends(["y", "z", "w"]);
        let c = User::new("c", "C").with_friends(["a"]);
        assert_eq!(mutual_friend_count(&a, &b), 2);
        assert_eq!(mutual_friend_count(&b, &a), 2);
        assert_eq!(mutual_friend_count(&a, &c), 0);
    }
}
