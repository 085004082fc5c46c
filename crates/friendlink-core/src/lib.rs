pub mod error;
pub mod graph;
pub mod matcher;
pub mod report;
pub mod similarity;
pub mod store;
pub mod user;

pub use error::{FriendLinkError, Result};
pub use graph::MutualFriendFinder;
pub use matcher::{Candidate, CandidateMatcher, Evidence, MatchReason, MatchThresholds};
pub use report::{build_report, build_reports, Report};
pub use store::{add_user, load_or_empty, load_snapshot, save_snapshot, NewUser};
pub use user::{Snapshot, User, UserId};
