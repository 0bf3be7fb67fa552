// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{FieldSpec, Line, RenderMode, ResourceStatus};

/// Turns one raw value into presentation lines. Blank values yield nothing.
pub fn format_field(value: Option<&str>, spec: &FieldSpec) -> Vec<Line> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Vec::new();
    };

    match spec.mode {
        RenderMode::SingleLine => vec![Line::Text {
            label: non_empty(&spec.label),
            text: value.to_owned(),
        }],
        RenderMode::BulletedMultiline => bullet_lines(value, false),
        RenderMode::HighlightedMultiline => bullet_lines(value, true),
        RenderMode::Link | RenderMode::OptionalLink => vec![Line::Link {
            label: non_empty(&spec.label).unwrap_or_else(|| value.to_owned()),
            target: value.to_owned(),
        }],
        RenderMode::Resource => vec![Line::Resource {
            path: value.to_owned(),
            status: ResourceStatus::Unresolved,
        }],
    }
}

/// Non-blank lines of a text block, trimmed, in source order.
pub fn split_block(block: &str) -> impl Iterator<Item = &str> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

fn bullet_lines(block: &str, highlighted: bool) -> Vec<Line> {
    split_block(block)
        .map(|text| Line::Bullet {
            text: text.to_owned(),
            highlighted,
        })
        .collect()
}

fn non_empty(label: &str) -> Option<String> {
    let label = label.trim();
    (!label.is_empty()).then(|| label.to_owned())
}
