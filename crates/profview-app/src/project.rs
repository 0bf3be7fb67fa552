// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::warn;

use crate::{
    FieldSchema, Line, PlaceholderReason, ProfileError, ProfileView, Record, ResourceStatus,
    Section, format_field,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(Vec<u8>),
    NotFound,
    LoadError(String),
}

/// Looks up the bytes behind a resource path such as a photo.
pub trait ResourceResolver {
    fn resolve(&self, path: &str) -> Resolution;
}

/// Resolver for sessions that never display resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceResolver for NoResources {
    fn resolve(&self, _path: &str) -> Resolution {
        Resolution::NotFound
    }
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn resolve(&self, path: &str) -> Resolution {
        (**self).resolve(path)
    }
}

pub fn project_record<R: ResourceResolver + ?Sized>(
    record_index: usize,
    record: &Record,
    schema: &FieldSchema,
    resolver: &R,
) -> ProfileView {
    let mut sections: Vec<Section> = Vec::new();

    for spec in schema.fields() {
        let lines = format_field(record.get(&spec.field), spec);
        if lines.is_empty() {
            continue;
        }

        let position = match sections.iter().position(|section| section.key == spec.section) {
            Some(position) => position,
            None => {
                let title = schema
                    .section(&spec.section)
                    .map_or_else(|| spec.section.clone(), |def| def.title.clone());
                sections.push(Section {
                    key: spec.section.clone(),
                    title,
                    lines: Vec::new(),
                    collapsed: false,
                });
                sections.len() - 1
            }
        };

        let section = &mut sections[position];
        section.collapsed |= spec.collapsible;
        section
            .lines
            .extend(lines.into_iter().map(|line| resolve_line(line, resolver)));
    }

    ProfileView {
        record_index,
        sections,
    }
}

fn resolve_line<R: ResourceResolver + ?Sized>(line: Line, resolver: &R) -> Line {
    let Line::Resource { path, .. } = line else {
        return line;
    };

    let status = match resolver.resolve(&path) {
        Resolution::Found(bytes) => ResourceStatus::Loaded { bytes: bytes.len() },
        Resolution::NotFound => {
            let error = ProfileError::ResourceUnavailable {
                path: path.clone(),
                reason: "not found".to_owned(),
            };
            warn!(%error, "showing placeholder");
            ResourceStatus::Placeholder {
                reason: PlaceholderReason::NotFound,
            }
        }
        Resolution::LoadError(reason) => {
            let error = ProfileError::ResourceUnavailable {
                path: path.clone(),
                reason,
            };
            warn!(%error, "showing placeholder");
            ResourceStatus::Placeholder {
                reason: PlaceholderReason::LoadError,
            }
        }
    };

    Line::Resource { path, status }
}
