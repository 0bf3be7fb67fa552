// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use profview_app::{Field, ProfileError, Record, RecordSet, Resolution, ResourceResolver};
use std::env;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAME: &str = "profview";
pub const DEFAULT_DATA_FILE: &str = "profiles.csv";
pub const MAX_PHOTO_SIZE: u64 = 10 << 20;

// Cell contents that pandas-style exports use for "no value".
const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn load_record_set(path: &Path) -> Result<RecordSet, ProfileError> {
    let file = File::open(path).map_err(|error| {
        let reason = match error.kind() {
            io::ErrorKind::NotFound => format!(
                "data file {} not found; pass --data or set [data].csv_path",
                path.display()
            ),
            _ => format!("open data file {}: {error}", path.display()),
        };
        ProfileError::data_unavailable(reason)
    })?;

    let records = read_record_set(file).map_err(|error| match error {
        ProfileError::DataUnavailable { reason } => {
            ProfileError::data_unavailable(format!("{}: {reason}", path.display()))
        }
        other => other,
    })?;
    info!(path = %path.display(), count = records.len(), "loaded profiles");
    Ok(records)
}

/// Parses headed CSV into records. Quoted cells may span lines.
pub fn read_record_set<R: Read>(reader: R) -> Result<RecordSet, ProfileError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|error| ProfileError::data_unavailable(format!("read CSV header: {error}")))?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_owned())
        .collect::<Vec<_>>();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(ProfileError::data_unavailable("CSV has no header row"));
    }

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        let row_values = result.map_err(|error| {
            ProfileError::data_unavailable(format!("read CSV row {}: {error}", row + 1))
        })?;
        let fields = headers
            .iter()
            .enumerate()
            .map(|(column, name)| Field {
                name: name.clone(),
                value: row_values.get(column).and_then(cell_value),
            })
            .collect();
        records.push(Record::new(fields));
    }
    debug!(columns = headers.len(), rows = records.len(), "parsed CSV");

    RecordSet::new(records)
}

fn cell_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if NULL_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(raw.to_owned())
    }
}

/// Reads photos from disk, resolving relative paths against `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsResourceResolver {
    root: PathBuf,
    max_bytes: u64,
}

impl FsResourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_bytes: MAX_PHOTO_SIZE,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Photos default to living next to the data file.
    pub fn beside(data_path: &Path) -> Self {
        let root = data_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn full_path(&self, path: &str) -> PathBuf {
        let candidate = Path::new(path);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        }
    }
}

impl ResourceResolver for FsResourceResolver {
    fn resolve(&self, path: &str) -> Resolution {
        let full = self.full_path(path);
        let metadata = match fs::metadata(&full) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Resolution::NotFound;
            }
            Err(error) => return Resolution::LoadError(format!("stat {}: {error}", full.display())),
        };
        if !metadata.is_file() {
            return Resolution::NotFound;
        }
        if metadata.len() > self.max_bytes {
            return Resolution::LoadError(format!(
                "{} is {} bytes; limit is {}",
                full.display(),
                metadata.len(),
                self.max_bytes
            ));
        }

        match fs::read(&full) {
            Ok(bytes) => {
                debug!(path = %full.display(), bytes = bytes.len(), "loaded resource");
                Resolution::Found(bytes)
            }
            Err(error) => Resolution::LoadError(format!("read {}: {error}", full.display())),
        }
    }
}

pub fn default_data_path() -> PathBuf {
    match env::var_os("PROFVIEW_DATA_PATH") {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(DEFAULT_DATA_FILE),
    }
}

pub fn validate_data_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("data path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "data path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("data path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}

/// Small built-in roster for trying the browser without a data file.
pub fn demo_record_set() -> Result<RecordSet, ProfileError> {
    let rows: [&[(&str, &str)]; 4] = [
        &[
            ("name", "Dr. Avery Walker"),
            ("title", "Associate Professor"),
            ("office_location", "COM2-03-14"),
            ("phone_number", "+65 6516 2701"),
            ("profile_website_link", "https://example.edu/~awalker"),
            ("CP5105_project", "Robust perception for campus robots\nSim-to-real transfer study"),
            ("education", "PhD, Computer Science\n\nBSc, Mathematics"),
            ("profile", "Works on learning-based perception for mobile robots."),
            ("research_areas", "Robotics; Computer Vision"),
            ("research_interests", "Visual odometry\nActive perception\n"),
            (
                "selected_publications",
                "Walker A. Seeing in the dark. 2023\nWalker A, Reed D. Loop closure at scale. 2021",
            ),
            ("award_and_honors", "Teaching Excellence Award 2022"),
            ("courses_taught", "CS1010 Programming Methodology\n\nCS4278 Intelligent Robots"),
            ("photo", "photos/walker.jpg"),
        ],
        &[
            ("name", "Dr. Jordan Hill"),
            ("title", "Assistant Professor"),
            ("office_location", "COM3-02-41"),
            ("phone_number", "+65 6516 2702"),
            ("education", "PhD, Electrical Engineering"),
            ("profile", "Studies fault-tolerant distributed storage."),
            ("research_areas", "Systems"),
            ("research_interests", "Consensus protocols\nErasure coding"),
            ("courses_taught", "CS3223 Database Systems Implementation"),
        ],
        &[
            ("name", "Prof. Morgan Diaz"),
            ("title", "Professor"),
            ("office_location", "AS6-05-02"),
            ("phone_number", "+65 6516 2703"),
            ("profile_website_link", "https://example.edu/~mdiaz"),
            ("CP5105_project", "Interpretable clinical risk scores"),
            ("research_areas", "Machine Learning; Health Informatics"),
            ("selected_publications", "Diaz M. Sparse additive risk models. 2020"),
            ("award_and_honors", "Fellow, Example Society\nYoung Researcher Award 2015"),
            ("photo", "photos/diaz.png"),
        ],
        &[
            ("name", "Dr. Riley Evans"),
            ("title", "Senior Lecturer"),
            ("office_location", "COM1-01-20"),
            ("profile", "Coordinates the undergraduate software engineering track."),
            ("courses_taught", "CS2103T Software Engineering\nCS2101 Effective Communication"),
        ],
    ];

    RecordSet::new(rows.iter().map(|row| Record::from_pairs(row.iter().copied())).collect())
}

#[cfg(test)]
mod tests {
    use super::{cell_value, demo_record_set, validate_data_path};

    #[test]
    fn null_markers_read_as_absent() {
        assert_eq!(cell_value(""), None);
        assert_eq!(cell_value("  NaN "), None);
        assert_eq!(cell_value("N/A"), None);
        for marker in ["<NA>", "#NA", "-NaN", "-nan", "#N/A N/A", "1.#QNAN", "-1.#IND"] {
            assert_eq!(cell_value(marker), None, "{marker}");
        }
        assert_eq!(cell_value("NAN"), Some("NAN".to_owned()));
        assert_eq!(cell_value(" Rm 1 "), Some(" Rm 1 ".to_owned()));
    }

    #[test]
    fn validate_data_path_rejects_uri_forms() {
        assert!(validate_data_path("").is_err());
        assert!(validate_data_path("https://example.com/profiles.csv").is_err());
        assert!(validate_data_path("file:profiles.csv").is_err());
        assert!(validate_data_path("/srv/profiles.csv").is_ok());
        assert!(validate_data_path("profiles.csv").is_ok());
    }

    #[test]
    fn demo_roster_has_named_profiles() {
        let records = demo_record_set().expect("demo data");
        assert_eq!(records.len(), 4);
        assert!(records.display_names().iter().all(|name| !name.starts_with('(')));
    }
}
