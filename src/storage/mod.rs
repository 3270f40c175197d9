//! Storage layer for splitledger
//!
//! Loads a read-only ledger export from disk and hands out per-group
//! snapshots. Writes only ever happen for exported reports, through the
//! atomic helpers in [`file_io`].

pub mod file_io;
pub mod records;

pub use file_io::{read_json_required, write_atomic, write_json_atomic};
pub use records::{GroupRecord, LedgerExport};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{GroupId, LedgerSnapshot, MemberId, SnapshotIssue};

/// Snapshots of every group in one ledger export
#[derive(Debug, Clone, Default)]
pub struct Storage {
    source: Option<PathBuf>,
    groups: BTreeMap<GroupId, LedgerSnapshot>,
}

impl Storage {
    /// Load a ledger export from `path`
    pub fn load(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let export: LedgerExport = read_json_required(path)?;

        let mut storage = Self::from_export(export);
        storage.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            groups = storage.groups.len(),
            "loaded ledger export"
        );
        Ok(storage)
    }

    /// Build from an already decoded export
    ///
    /// When two entries resolve to the same group id the later key wins and
    /// the collision is logged.
    pub fn from_export(export: LedgerExport) -> Self {
        let mut groups = BTreeMap::new();

        for (key, record) in export.groups {
            let snapshot = record.into_snapshot(&key);
            if let Some(replaced) = groups.insert(snapshot.group_id.clone(), snapshot) {
                tracing::warn!(
                    group = %replaced.group_id,
                    key = %key,
                    replaced = %replaced.name,
                    "duplicate group id in export, keeping the later entry"
                );
            }
        }

        Self {
            source: None,
            groups,
        }
    }

    /// Build from snapshots held in memory
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = LedgerSnapshot>) -> Self {
        Self {
            source: None,
            groups: snapshots
                .into_iter()
                .map(|s| (s.group_id.clone(), s))
                .collect(),
        }
    }

    /// File this storage was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Find a group by id, or failing that by exact name
    pub fn group(&self, identifier: &str) -> LedgerResult<&LedgerSnapshot> {
        let identifier = identifier.trim();

        if let Some(snapshot) = self.groups.get(&GroupId::from(identifier)) {
            return Ok(snapshot);
        }

        self.groups
            .values()
            .find(|s| s.name == identifier)
            .ok_or_else(|| LedgerError::group_not_found(identifier))
    }

    /// Every group, ordered by id
    pub fn groups(&self) -> Vec<&LedgerSnapshot> {
        self.groups.values().collect()
    }

    /// Groups where `member` is a current member, ordered by id
    pub fn groups_for_member(&self, member: &MemberId) -> Vec<&LedgerSnapshot> {
        self.groups
            .values()
            .filter(|s| s.is_member(member))
            .collect()
    }

    /// Whether `member` belongs, or once belonged, to any group
    pub fn knows_member(&self, member: &MemberId) -> bool {
        self.groups
            .values()
            .any(|s| s.is_member(member) || s.is_former_member(member))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Validate every group, logging each issue found
    ///
    /// Returns the issues per group, skipping groups without any.
    pub fn validate(&self) -> Vec<(&LedgerSnapshot, Vec<SnapshotIssue>)> {
        self.groups
            .values()
            .filter_map(|snapshot| {
                let issues = snapshot.validate();
                for issue in &issues {
                    tracing::warn!(group = %snapshot.group_id, "{}", issue);
                }
                (!issues.is_empty()).then_some((snapshot, issues))
            })
            .collect()
    }
}
