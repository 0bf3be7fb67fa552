// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use profview_app::{Record, RecordSet, Resolution, ResourceResolver};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const FACULTY_HEADER: &str = "name,title,office_location,phone_number,profile_website_link,CP5105_project,education,profile,research_areas,research_interests,selected_publications,award_and_honors,courses_taught,photo";

/// Three rows in the faculty layout, with quoted multi-line cells and blanks.
pub const FACULTY_CSV: &str = "name,title,office_location,phone_number,profile_website_link,CP5105_project,education,profile,research_areas,research_interests,selected_publications,award_and_honors,courses_taught,photo
Dr. A,Professor,Rm 1,555-0101,https://example.edu/a,\"Swarm planner\n\nRobot arm\",\"PhD, MIT\nBSc, NUS\",Works on robots.,Robotics,\"Planning\n  \nControl\",\"Paper one\nPaper two\",Best paper,\"CS101\n\nCS202\",photos/a.png
Dr. B,Lecturer,Rm 2,,,,,,,,,,,
Dr. C,Associate Professor,Rm 3,555-0103,NaN,,PhD,,Systems,,,,CS303,photos/missing.png
";

/// The two-record walkthrough used across crates.
pub fn scenario_records() -> RecordSet {
    match RecordSet::new(vec![
        Record::from_pairs([
            ("name", "Dr. A"),
            ("office_location", "Rm 1"),
            ("courses_taught", "CS101\n\nCS202"),
        ]),
        Record::from_pairs([("name", "Dr. B"), ("office_location", "Rm 2")]),
    ]) {
        Ok(records) => records,
        Err(error) => panic!("scenario records must be non-empty: {error}"),
    }
}

pub fn named_records(count: usize) -> RecordSet {
    let records = (0..count)
        .map(|index| {
            Record::from_pairs([
                ("name", format!("Prof {index}")),
                ("office_location", format!("Rm {index}")),
            ])
        })
        .collect();
    match RecordSet::new(records) {
        Ok(records) => records,
        Err(error) => panic!("named_records needs count > 0: {error}"),
    }
}

/// Temp directory holding a CSV file and optional photo files.
pub struct TempDataset {
    dir: tempfile::TempDir,
    csv_path: PathBuf,
}

impl TempDataset {
    pub fn with_csv(contents: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dataset dir")?;
        let csv_path = dir.path().join("profiles.csv");
        fs::write(&csv_path, contents)
            .with_context(|| format!("write {}", csv_path.display()))?;
        Ok(Self { dir, csv_path })
    }

    pub fn faculty() -> Result<Self> {
        let dataset = Self::with_csv(FACULTY_CSV)?;
        dataset.add_file("photos/a.png", b"\x89PNG\r\n\x1a\nfake")?;
        Ok(dataset)
    }

    pub fn add_file(&self, relative: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

/// In-memory resolver; unknown paths are not found.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    entries: BTreeMap<String, Resolution>,
}

impl StaticResolver {
    pub fn with(mut self, path: &str, resolution: Resolution) -> Self {
        self.entries.insert(path.to_owned(), resolution);
        self
    }
}

impl ResourceResolver for StaticResolver {
    fn resolve(&self, path: &str) -> Resolution {
        self.entries
            .get(path)
            .cloned()
            .unwrap_or(Resolution::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::{FACULTY_CSV, FACULTY_HEADER, TempDataset, named_records, scenario_records};
    use anyhow::Result;

    #[test]
    fn fixture_header_matches_csv() {
        assert!(FACULTY_CSV.starts_with(FACULTY_HEADER));
    }

    #[test]
    fn scenario_has_two_records() {
        assert_eq!(scenario_records().len(), 2);
        assert_eq!(named_records(5).len(), 5);
    }

    #[test]
    fn faculty_dataset_writes_csv_and_photo() -> Result<()> {
        let dataset = TempDataset::faculty()?;
        assert!(dataset.csv_path().exists());
        assert!(dataset.root().join("photos/a.png").exists());
        Ok(())
    }
}
