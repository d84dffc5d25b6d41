//! Pose library
//!
//! An ordered, read-only catalog of encoded poses. The built-in catalog is
//! seeded from a static table, gets its mirrored variants derived once, and
//! is shared process-wide.

use crate::codec::decode;
use crate::error::{PoseError, Result};
use crate::mirror::mirror_entry;
use bitruvius_core::Pose;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// One catalog record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseLibraryEntry {
    pub id: String,
    #[serde(rename = "cat")]
    pub category: String,
    pub name: String,
    #[serde(rename = "src")]
    pub source: String,
    /// Encoded pose string
    pub data: String,
}

impl PoseLibraryEntry {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        name: impl Into<String>,
        source: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            name: name.into(),
            source: source.into(),
            data: data.into(),
        }
    }

    pub fn pose(&self) -> Pose {
        decode(&self.data)
    }
}

/// Seed table: `(id, category, name, source, data)`
const SEED_POSES: [(&str, &str, &str, &str, &str); 7] = [
    (
        "B01",
        "Base",
        "T-Pose",
        "Bitruvius",
        "r:0,600;br:0;w:0;t:0;c:0;h:0;ls:-90;le:0;lw:0;rs:90;re:0;rw:0;lt:0;lc:0;la:0;rt:0;rc:0;ra:0",
    ),
    (
        "A06",
        "Action",
        "Shield",
        "Manual",
        "r:0,197.5;br:0;w:0;t:0;c:0;h:187.81;rs:178.87;re:176.45;rw:62.24;ls:-178.18;le:177.87;lw:0;rt:-169.88;rc:180.62;ra:90;lt:-189.97;lc:179.19;la:90",
    ),
    (
        "D02",
        "Dance",
        "Ballerina",
        "Manual",
        "r:0,385;br:0;w:0;t:5;c:0;h:-10;ls:60;le:-45;lw:20;rs:-135;re:30;rw:-20;lt:-10;lc:100;la:90;rt:30;rc:0;ra:90",
    ),
    (
        "A08",
        "Action",
        "Fly",
        "User",
        "r:0,197.5;br:0;w:0;t:180.51;c:0;h:0;rs:-252.19;re:0;rw:0;ls:-108.15;le:0;lw:0;rt:0;rc:-179.21;ra:90;lt:0;lc:-179.23;la:90",
    ),
    (
        "S01",
        "Still",
        "Tree Ornament",
        "User",
        "r:-67.04,95.43;br:0;w:0;t:180.51;c:0;h:-184.08;rs:-252.19;re:71.74;rw:0;ls:-108.15;le:285.89;lw:0;rt:0;rc:-179.21;ra:90;lt:0;lc:-179.23;la:90",
    ),
    (
        "C01",
        "Character",
        "Mustachioed",
        "User",
        "r:0,91.25;br:0;w:0;t:180.56;c:0;h:0;rs:0;re:0;rw:0;ls:0;le:0;lw:0;rt:-80.31;rc:131.28;ra:90;lt:-275.29;lc:-132.04;la:90",
    ),
    (
        "C02",
        "Character",
        "Lobster",
        "User",
        "r:0,91.25;br:0;w:0;t:180.39;c:0;h:-190.78;rs:291.03;re:179.18;rw:0;ls:65.93;le:186.1;lw:0;rt:0;rc:0;ra:90;lt:0;lc:0;la:90",
    ),
];

/// Left-leaning seed poses that get a derived right-hand variant
pub const MIRRORED_SEEDS: [&str; 3] = ["A06", "D02", "S01"];

/// The static seed entries, without derived variants
pub fn seed_entries() -> Vec<PoseLibraryEntry> {
    SEED_POSES
        .iter()
        .map(|(id, cat, name, src, data)| PoseLibraryEntry::new(*id, *cat, *name, *src, *data))
        .collect()
}

/// Ordered id → entry catalog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseLibrary {
    entries: IndexMap<String, PoseLibraryEntry>,
}

impl PoseLibrary {
    /// Build a catalog from `entries`, then append a mirrored variant for
    /// every id in `mirror_ids`
    ///
    /// Ids that are not present are skipped with a warning. A repeated id,
    /// derived ones included, replaces the earlier entry in place with a
    /// warning.
    pub fn from_entries<I, S>(entries: I, mirror_ids: &[S]) -> Self
    where
        I: IntoIterator<Item = PoseLibraryEntry>,
        S: AsRef<str>,
    {
        let mut library = Self::default();
        for entry in entries {
            if library.entries.contains_key(&entry.id) {
                tracing::warn!("PoseLibrary: duplicate id {}, keeping the later entry", entry.id);
            }
            library.entries.insert(entry.id.clone(), entry);
        }

        let derived: Vec<PoseLibraryEntry> = mirror_ids
            .iter()
            .filter_map(|id| match library.mirror_entry(id.as_ref()) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!("PoseLibrary: not mirroring: {}", err);
                    None
                }
            })
            .collect();

        for entry in derived {
            if library.entries.contains_key(&entry.id) {
                tracing::warn!(
                    "PoseLibrary: mirrored id {} replaces an existing entry",
                    entry.id
                );
            }
            library.entries.insert(entry.id.clone(), entry);
        }

        tracing::debug!("PoseLibrary: {} entries", library.entries.len());
        library
    }

    /// The built-in catalog, built on first use
    pub fn builtin() -> &'static PoseLibrary {
        static BUILTIN: OnceLock<PoseLibrary> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::from_entries(seed_entries(), &MIRRORED_SEEDS))
    }

    /// Parse a JSON array of `{id, cat, name, src, data}` records
    pub fn from_json_str<S: AsRef<str>>(json: &str, mirror_ids: &[S]) -> Result<Self> {
        let entries: Vec<PoseLibraryEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries, mirror_ids))
    }

    /// Serialize every entry, derived ones included, as a JSON array
    pub fn to_json(&self) -> Result<String> {
        let entries: Vec<&PoseLibraryEntry> = self.entries.values().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }

    /// Write [`PoseLibrary::to_json`] to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| PoseError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, id: &str) -> Option<&PoseLibraryEntry> {
        self.entries.get(id)
    }

    /// Decoded pose for `id`
    pub fn pose(&self, id: &str) -> Result<Pose> {
        self.get(id)
            .map(PoseLibraryEntry::pose)
            .ok_or_else(|| PoseError::UnknownPose(id.to_string()))
    }

    /// Derive the mirrored variant of `id` without adding it
    pub fn mirror_entry(&self, id: &str) -> Result<PoseLibraryEntry> {
        self.get(id)
            .map(mirror_entry)
            .ok_or_else(|| PoseError::UnknownPose(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoseLibraryEntry> {
        self.entries.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in self.entries.values() {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(&entry.category);
            }
        }
        seen
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PoseLibraryEntry> {
        self.entries.values().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Load a library file, deriving mirrored variants for `mirror_ids`
pub fn load_library_json<S: AsRef<str>>(path: &Path, mirror_ids: &[S]) -> Result<PoseLibrary> {
    let json = std::fs::read_to_string(path).map_err(|source| PoseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PoseLibrary::from_json_str(&json, mirror_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::MIRROR_SOURCE;

    #[test]
    fn test_builtin_order_and_size() {
        let library = PoseLibrary::builtin();
        let ids: Vec<&str> = library.ids().collect();
        assert_eq!(
            ids,
            vec!["B01", "A06", "D02", "A08", "S01", "C01", "C02", "A06_R", "D02_R", "S01_R"]
        );
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(PoseLibrary::builtin(), PoseLibrary::builtin()));
    }

    #[test]
    fn test_derived_entries() {
        let library = PoseLibrary::builtin();
        let shield = library.get("A06_R").unwrap();
        assert_eq!(shield.name, "RIGHT Shield");
        assert_eq!(shield.category, "Action");
        assert_eq!(shield.source, MIRROR_SOURCE);

        let pose = shield.pose();
        assert_eq!(pose.l_shoulder, Some(-178.87));
        assert_eq!(pose.r_shoulder, Some(178.18));
        assert_eq!(pose.head, Some(187.81));
    }

    #[test]
    fn test_missing_mirror_ids_are_skipped() {
        let library = PoseLibrary::from_entries(seed_entries(), &["A06", "ZZ9"]);
        assert_eq!(library.len(), 8);
        assert!(library.get("ZZ9_R").is_none());
        assert!(matches!(
            library.mirror_entry("ZZ9"),
            Err(PoseError::UnknownPose(id)) if id == "ZZ9"
        ));
    }

    #[test]
    fn test_duplicate_ids_replace_in_place() {
        let entries = vec![
            PoseLibraryEntry::new("X", "Base", "first", "User", "h:1"),
            PoseLibraryEntry::new("Y", "Base", "other", "User", "h:2"),
            PoseLibraryEntry::new("X", "Base", "second", "User", "h:3"),
        ];
        let library = PoseLibrary::from_entries(entries, &[] as &[&str]);
        assert_eq!(library.ids().collect::<Vec<_>>(), vec!["X", "Y"]);
        assert_eq!(library.get("X").unwrap().name, "second");
    }

    #[test]
    fn test_mirrored_id_replaces_existing_entry() {
        let entries = vec![
            PoseLibraryEntry::new("X", "Base", "lean", "User", "ls:10"),
            PoseLibraryEntry::new("X_R", "Base", "hand-made", "User", "h:1"),
        ];
        let library = PoseLibrary::from_entries(entries, &["X"]);
        assert_eq!(library.ids().collect::<Vec<_>>(), vec!["X", "X_R"]);

        let derived = library.get("X_R").unwrap();
        assert_eq!(derived.name, "RIGHT lean");
        assert_eq!(derived.source, MIRROR_SOURCE);
        assert_eq!(derived.data, "rs:-10");
    }

    #[test]
    fn test_categories() {
        let library = PoseLibrary::builtin();
        assert_eq!(
            library.categories(),
            vec!["Base", "Action", "Dance", "Still", "Character"]
        );
        assert_eq!(library.by_category("Action").count(), 3);
    }

    #[test]
    fn test_json_uses_short_field_names() {
        let json = PoseLibrary::builtin().to_json().unwrap();
        assert!(json.contains("\"cat\": \"Base\""));
        assert!(json.contains("\"src\": \"Bitruvius Generated\""));
        assert!(!json.contains("category"));

        let reloaded = PoseLibrary::from_json_str(&json, &[] as &[&str]).unwrap();
        assert_eq!(&reloaded, PoseLibrary::builtin());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = PoseLibrary::from_json_str("{\"id\": 1}", &[] as &[&str]).unwrap_err();
        assert!(matches!(err, PoseError::Json(_)));
    }

    #[test]
    fn test_unknown_pose_lookup() {
        assert!(PoseLibrary::builtin().pose("B01").is_ok());
        assert!(matches!(
            PoseLibrary::builtin().pose("nope"),
            Err(PoseError::UnknownPose(_))
        ));
    }
}
