// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use std::num::NonZeroUsize;

use crate::ProfileError;

pub const NAME_FIELD: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Option<String>,
}

/// One row of the source table, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| Field {
                    name: name.into(),
                    value: Some(value.into()),
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Raw value for `name`; `None` when the column is missing or the cell is empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.value.as_deref())
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME_FIELD)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Result<Self, ProfileError> {
        if records.is_empty() {
            return Err(ProfileError::data_unavailable(
                "the data source contains no profiles",
            ));
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn bounds(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.records.len()).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// First record whose name matches exactly.
    pub fn position_of_name(&self, name: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.name() == Some(name))
    }

    pub fn display_names(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| match record.name() {
                Some(name) => name.to_owned(),
                None => format!("(unnamed #{})", index + 1),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderReason {
    NotFound,
    LoadError,
}

impl PlaceholderReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "Image not found",
            Self::LoadError => "Unable to load image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResourceStatus {
    /// Formatter output before the projector asks the resolver.
    Unresolved,
    Loaded { bytes: usize },
    Placeholder { reason: PlaceholderReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    Text {
        label: Option<String>,
        text: String,
    },
    Bullet {
        text: String,
        highlighted: bool,
    },
    Link {
        label: String,
        target: String,
    },
    Resource {
        path: String,
        status: ResourceStatus,
    },
}

impl Line {
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } | Self::Bullet { text, .. } => text,
            Self::Link { target, .. } => target,
            Self::Resource { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub lines: Vec<Line>,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub record_index: usize,
    pub sections: Vec<Section>,
}

impl ProfileView {
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }

    pub fn collapsible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|section| section.collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Record, RecordSet};
    use crate::ProfileError;

    #[test]
    fn empty_record_set_is_data_unavailable() {
        let error = RecordSet::new(Vec::new()).expect_err("empty set should fail");
        assert!(matches!(error, ProfileError::DataUnavailable { .. }));
    }

    #[test]
    fn get_treats_missing_column_and_empty_cell_alike() {
        let record = Record::new(vec![
            Field {
                name: "name".to_owned(),
                value: Some("Dr. A".to_owned()),
            },
            Field {
                name: "phone_number".to_owned(),
                value: None,
            },
        ]);
        assert_eq!(record.get("name"), Some("Dr. A"));
        assert_eq!(record.get("phone_number"), None);
        assert_eq!(record.get("photo"), None);
    }

    #[test]
    fn name_lookup_is_exact_and_first_match_wins() -> Result<(), ProfileError> {
        let set = RecordSet::new(vec![
            Record::from_pairs([("name", "Dr. A")]),
            Record::from_pairs([("name", "Dr. B")]),
            Record::from_pairs([("name", "Dr. B")]),
        ])?;
        assert_eq!(set.position_of_name("Dr. B"), Some(1));
        assert_eq!(set.position_of_name("dr. b"), None);
        assert_eq!(set.position_of_name("Dr."), None);
        Ok(())
    }

    #[test]
    fn display_names_fill_in_blank_names() -> Result<(), ProfileError> {
        let set = RecordSet::new(vec![
            Record::from_pairs([("name", "Dr. A")]),
            Record::from_pairs([("name", "   ")]),
        ])?;
        assert_eq!(set.display_names(), vec!["Dr. A", "(unnamed #2)"]);
        Ok(())
    }
}
