// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Deserialize;
use std::collections::BTreeSet;

use crate::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    SingleLine,
    BulletedMultiline,
    HighlightedMultiline,
    Link,
    OptionalLink,
    Resource,
}

impl RenderMode {
    pub const ALL: [Self; 6] = [
        Self::SingleLine,
        Self::BulletedMultiline,
        Self::HighlightedMultiline,
        Self::Link,
        Self::OptionalLink,
        Self::Resource,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleLine => "single-line",
            Self::BulletedMultiline => "bulleted-multiline",
            Self::HighlightedMultiline => "highlighted-multiline",
            Self::Link => "link",
            Self::OptionalLink => "optional-link",
            Self::Resource => "resource",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "single-line" => Some(Self::SingleLine),
            "bulleted-multiline" => Some(Self::BulletedMultiline),
            "highlighted-multiline" => Some(Self::HighlightedMultiline),
            "link" => Some(Self::Link),
            "optional-link" => Some(Self::OptionalLink),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionDef {
    pub key: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: String,
    pub label: String,
    pub mode: RenderMode,
    pub section: String,
    pub collapsible: bool,
}

/// Field spec as written in a config file, before the mode string is checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawFieldSpec {
    pub field: String,
    #[serde(default)]
    pub label: String,
    pub mode: String,
    pub section: String,
    #[serde(default)]
    pub collapsible: bool,
}

impl RawFieldSpec {
    fn parse(self) -> Result<FieldSpec, ProfileError> {
        let mode = RenderMode::parse(&self.mode).ok_or_else(|| {
            let known = RenderMode::ALL
                .iter()
                .map(|mode| mode.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            ProfileError::configuration(format!(
                "field {:?} has unknown mode {:?}; expected one of: {known}",
                self.field, self.mode
            ))
        })?;
        Ok(FieldSpec {
            field: self.field,
            label: self.label,
            mode,
            section: self.section,
            collapsible: self.collapsible,
        })
    }
}

/// Validated, ordered field layout shared by every record in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    sections: Vec<SectionDef>,
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(sections: Vec<SectionDef>, fields: Vec<FieldSpec>) -> Result<Self, ProfileError> {
        let mut keys = BTreeSet::new();
        for section in &sections {
            if section.key.trim().is_empty() {
                return Err(ProfileError::configuration("section key must not be empty"));
            }
            if !keys.insert(section.key.as_str()) {
                return Err(ProfileError::configuration(format!(
                    "section {:?} is declared twice",
                    section.key
                )));
            }
        }

        if fields.is_empty() {
            return Err(ProfileError::configuration("schema declares no fields"));
        }

        for spec in &fields {
            if spec.field.trim().is_empty() {
                return Err(ProfileError::configuration("field name must not be empty"));
            }
            if !keys.contains(spec.section.as_str()) {
                return Err(ProfileError::configuration(format!(
                    "field {:?} targets unknown section {:?}",
                    spec.field, spec.section
                )));
            }
        }

        Ok(Self { sections, fields })
    }

    pub fn from_raw(
        sections: Vec<SectionDef>,
        fields: Vec<RawFieldSpec>,
    ) -> Result<Self, ProfileError> {
        let fields = fields
            .into_iter()
            .map(RawFieldSpec::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sections, fields)
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn section(&self, key: &str) -> Option<&SectionDef> {
        self.sections.iter().find(|section| section.key == key)
    }

    /// Built-in layout for the faculty profile table.
    pub fn faculty() -> Self {
        let sections = [
            ("identity", "Faculty Member"),
            ("photo", "Photo"),
            ("contact", "Contact Info"),
            ("project", "CP5105 Project"),
            ("education", "Education"),
            ("profile", "Profile"),
            ("research_areas", "Research Areas"),
            ("research_interests", "Research Interests"),
            ("publications", "Selected Publications"),
            ("awards", "Awards and Honors"),
            ("courses", "Courses Taught"),
        ]
        .into_iter()
        .map(|(key, title)| SectionDef {
            key: key.to_owned(),
            title: title.to_owned(),
        })
        .collect();

        use RenderMode::*;
        let fields = [
            ("name", "Name", SingleLine, "identity", false),
            ("title", "Title", SingleLine, "identity", false),
            ("photo", "Photo", Resource, "photo", false),
            ("office_location", "Office", SingleLine, "contact", false),
            ("phone_number", "Phone", SingleLine, "contact", false),
            ("profile_website_link", "Website", OptionalLink, "contact", false),
            ("CP5105_project", "CP5105 Project", HighlightedMultiline, "project", false),
            ("education", "Education", BulletedMultiline, "education", false),
            ("profile", "", SingleLine, "profile", false),
            ("research_areas", "", SingleLine, "research_areas", false),
            (
                "research_interests",
                "Research Interests",
                BulletedMultiline,
                "research_interests",
                false,
            ),
            (
                "selected_publications",
                "Selected Publications",
                BulletedMultiline,
                "publications",
                true,
            ),
            ("award_and_honors", "Awards and Honors", BulletedMultiline, "awards", true),
            ("courses_taught", "Courses Taught", BulletedMultiline, "courses", true),
        ]
        .into_iter()
        .map(|(field, label, mode, section, collapsible)| FieldSpec {
            field: field.to_owned(),
            label: label.to_owned(),
            mode,
            section: section.to_owned(),
            collapsible,
        })
        .collect();

        Self { sections, fields }
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::faculty()
    }
}
