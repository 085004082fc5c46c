use friendlink_core::{Candidate, FriendLinkError, Report, Snapshot};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::fmt::Write;

pub fn mutual_suggestions(snapshot: &Snapshot, ids: &BTreeSet<String>) -> String {
    if ids.is_empty() {
        return "\nNo mutual friends found.\n".to_string();
    }
    let mut out = String::from("\nMutual Friend Suggestions:\n");
    for id in ids {
        let _ = writeln!(out, " - {} ({})", id, snapshot.display_name(id));
    }
    out
}

pub fn matches(user_name: &str, candidates: &[Candidate]) -> String {
    let mut out = format!("\nFriend Suggestions for {user_name} (Jaccard + Mutual + Location):\n\n");
    if candidates.is_empty() {
        out.push_str("No matching users.\n");
    }
    for c in candidates {
        let interests: Vec<&str> = c.evidence.matched_interests.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{} ({})", c.name, c.id);
        let _ = writeln!(out, "  - Matched Interests: {:?}", interests);
        let _ = writeln!(out, "  - Similarity: {:.2}", c.evidence.similarity);
        let _ = writeln!(out, "  - Mutual Friends: {}", c.evidence.mutual_friends);
        let _ = writeln!(
            out,
            "  - Same Location: {}\n",
            if c.evidence.same_location { "Yes" } else { "No" }
        );
    }
    out
}

/// Text for one start user. A missing user still gets the empty mutual
/// section, then the not-found line.
pub fn report_text(snapshot: &Snapshot, result: &Result<Report, FriendLinkError>) -> String {
    match result {
        Ok(report) => {
            let mut out = mutual_suggestions(snapshot, &report.mutual_suggestions);
            out.push_str(&matches(&report.user_name, &report.matches));
            out
        }
        Err(FriendLinkError::UserNotFound(_)) => {
            let mut out = mutual_suggestions(snapshot, &BTreeSet::new());
            out.push_str("User not found.\n");
            out
        }
        Err(e) => format!("error: {e}\n"),
    }
}

pub fn report_json(id: &str, result: &Result<Report, FriendLinkError>) -> Value {
    match result {
        Ok(report) => json!(report),
        Err(e) => json!({ "user_id": id, "error": e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use friendlink_core::{build_report, MatchThresholds, User};

    fn snapshot() -> Snapshot {
        Snapshot::from_users([
            User::new("u1", "Ann")
                .with_location("Oslo")
                .with_interests(["chess"])
                .with_friends(["u2"]),
            User::new("u2", "Bob").with_friends(["u3"]),
            User::new("u3", "Cid").with_location("Oslo").with_interests(["chess"]),
        ])
    }

    #[test]
    fn renders_found_user() {
        let snap = snapshot();
        let result = build_report(&snap, "u1", MatchThresholds::default());
        let text = report_text(&snap, &result);
        assert!(text.contains(" - u3 (Cid)"));
        assert!(text.contains("Friend Suggestions for Ann"));
        assert!(text.contains("  - Matched Interests: [\"chess\"]"));
        assert!(text.contains("  - Same Location: Yes"));
    }

    #[test]
    fn renders_not_found() {
        let snap = snapshot();
        let result = build_report(&snap, "u9", MatchThresholds::default());
        let text = report_text(&snap, &result);
        assert!(text.contains("No mutual friends found."));
        assert!(text.ends_with("User not found.\n"));

        let value = report_json("u9", &result);
        assert_eq!(value["user_id"], "u9");
        assert!(value["error"].as_str().unwrap().contains("u9"));
    }

    #[test]
    fn json_report_carries_evidence() {
        let snap = snapshot();
        let result = build_report(&snap, "u1", MatchThresholds::default());
        let value = report_json("u1", &result);
        assert_eq!(value["mutual_suggestions"][0], "u3");
        assert_eq!(value["matches"][0]["evidence"]["same_location"], true);
        assert_eq!(value["matches"][0]["evidence"]["reasons"][1], "same_location");
    }
}
