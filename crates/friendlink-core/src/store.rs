use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{FriendLinkError, Result};
use crate::user::{Snapshot, User, UserId};

/// Read a snapshot from a JSON object of `id -> user` records.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let file = File::open(path.as_ref())?;
    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), users = snapshot.len(), "snapshot loaded");
    Ok(snapshot)
}

/// Like [`load_snapshot`] but a missing file is an empty snapshot.
pub fn load_or_empty(path: impl AsRef<Path>) -> Result<Snapshot> {
    match load_snapshot(path) {
        Err(e) if e.is_missing_file() => Ok(Snapshot::new()),
        other => other,
    }
}

/// Write the snapshot as pretty JSON, replacing `path` via a sibling temp file.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    {
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), users = snapshot.len(), "snapshot saved");
    Ok(())
}

/// Unvalidated input for a new user, as typed by a person.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: u32,
    pub location: String,
    pub interests: Vec<String>,
    pub friends: Vec<String>,
}

impl NewUser {
    /// Split a comma separated list, trimming entries and dropping blanks.
    pub fn split_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Lowest free id of the form `u{n}`, starting at `len + 1`.
pub fn next_user_id(snapshot: &Snapshot) -> UserId {
    let mut n = snapshot.len() + 1;
    loop {
        let id = format!("u{n}");
        if !snapshot.contains(&id) {
            return id;
        }
        n += 1;
    }
}

/// Normalise `input`, allocate an id and insert the user. Friend ids that are
/// not in the snapshot are dropped.
pub fn add_user(snapshot: &mut Snapshot, input: NewUser) -> Result<UserId> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(FriendLinkError::Validation("name must not be empty".into()));
    }

    let mut friends = Vec::new();
    for raw in &input.friends {
        let id = raw.trim();
        if id.is_empty() {
            continue;
        }
        if snapshot.contains(id) {
            friends.push(id.to_string());
        } else {
            tracing::warn!(friend = id, "unknown friend id dropped");
        }
    }

    let id = next_user_id(snapshot);
    let user = User::new(id.clone(), name)
        .with_age(input.age)
        .with_location(input.location.trim())
        .with_interests(
            input
                .interests
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty()),
        )
        .with_friends(friends);
    snapshot.insert(user);
    tracing::info!(user = %id, "user added");
    Ok(id)
}
