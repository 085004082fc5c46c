use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub type UserId = String;

/// One node of the friendship graph.
///
/// `friends` is a directed out-edge list: it may name ids that are not in
/// the snapshot, or the user itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(skip)]
    pub id: UserId,
    pub name: String,
    pub age: u32,
    pub location: String,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub friends: BTreeSet<UserId>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: 0,
            location: String::new(),
            interests: BTreeSet::new(),
            friends: BTreeSet::new(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_friends<I, S>(mut self, friends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<UserId>,
    {
        self.friends = friends.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_friend_of(&self, id: &str) -> bool {
        self.friends.contains(id)
    }
}

/// Immutable view of the user graph for the duration of a query.
///
/// Users are kept ordered by id so every result derived from a snapshot is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<UserId, User>", into = "BTreeMap<UserId, User>")]
pub struct Snapshot {
    users: BTreeMap<UserId, User>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut snapshot = Self::new();
        for user in users {
            snapshot.insert(user);
        }
        snapshot
    }

    /// Insert or replace a user keyed by its id.
    pub fn insert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id.clone(), user)
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    /// Outgoing friend ids of `id`, or `None` for an unknown (dangling) id.
    pub fn friends_of(&self, id: &str) -> Option<&BTreeSet<UserId>> {
        self.users.get(id).map(|u| &u.friends)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &UserId> {
        self.users.keys()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|u| u.name.as_str()).unwrap_or(id)
    }
}

impl From<BTreeMap<UserId, User>> for Snapshot {
    fn from(map: BTreeMap<UserId, User>) -> Self {
        let users = map
            .into_iter()
            .map(|(id, mut user)| {
                user.id = id.clone();
                (id, user)
            })
            .collect();
        Self { users }
    }
}

impl From<Snapshot> for BTreeMap<UserId, User> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.users
    }
}
