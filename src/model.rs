// src/model.rs

use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Full commit hash as printed by git
pub type CommitId = String;

/// Length of the abbreviated id shown in node labels
pub const SHORT_ID_LEN: usize = 7;

/// A single commit retrieved from history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: CommitId,
    /// Subject line of the commit message
    pub message: String,
    /// First entry is the primary lineage parent
    pub parents: Vec<CommitId>,
    pub changed_files: BTreeSet<String>,
    /// Unix seconds, only used as the cutoff boundary
    pub timestamp: Option<i64>,
    /// Branch that first discovered this commit (branch walking only)
    pub branch: Option<String>,
}

impl CommitRecord {
    pub fn new(id: impl Into<CommitId>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            parents: Vec::new(),
            changed_files: BTreeSet::new(),
            timestamp: None,
            branch: None,
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CommitId>,
    {
        self.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// Abbreviates a commit id without splitting a multi-byte character.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// Commit records keyed by id, iterated in discovery order.
///
/// Inserting an id that is already present is a no-op: the first
/// discovery wins, which is how branch attribution is decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSet {
    records: IndexMap<CommitId, CommitRecord>,
}

impl CommitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing record) if the id was already present.
    pub fn insert(&mut self, record: CommitRecord) -> bool {
        if self.records.contains_key(&record.id) {
            return false;
        }
        self.records.insert(record.id.clone(), record);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&CommitRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitRecord> {
        self.records.values()
    }

    /// Branch names in order of first appearance.
    pub fn branches(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for branch in self.iter().filter_map(|r| r.branch.as_deref()) {
            if !seen.contains(&branch) {
                seen.push(branch);
            }
        }
        seen
    }
}

impl FromIterator<CommitRecord> for CommitSet {
    fn from_iter<T: IntoIterator<Item = CommitRecord>>(iter: T) -> Self {
        let mut set = CommitSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CommitSet {
    type Item = &'a CommitRecord;
    type IntoIter = indexmap::map::Values<'a, CommitId, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.values()
    }
}
