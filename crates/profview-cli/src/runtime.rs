// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::{Context, Result};
use profview_app::{BrowserState, FieldSchema, JumpTarget, Session};
use profview_data::FsResourceResolver;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Where the browser's records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Demo,
    File(PathBuf),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Demo => "built-in demo roster".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

pub fn resolver_for(config: &Config, source: &DataSource) -> FsResourceResolver {
    let resolver = match (config.photo_root(), source) {
        (Some(root), _) => FsResourceResolver::new(root),
        (None, DataSource::File(path)) => FsResourceResolver::beside(path),
        (None, DataSource::Demo) => FsResourceResolver::new(Path::new(".")),
    };
    resolver.with_max_bytes(config.max_photo_size())
}

/// Loads records and wraps them in a browser; load failures become the
/// unavailable state rather than an error.
pub fn open_browser(
    source: &DataSource,
    schema: Arc<FieldSchema>,
    resolver: FsResourceResolver,
) -> BrowserState<FsResourceResolver> {
    let loaded = match source {
        DataSource::Demo => profview_data::demo_record_set(),
        DataSource::File(path) => profview_data::load_record_set(path),
    };
    match &loaded {
        Ok(records) => info!(
            source = %source.describe(),
            count = records.len(),
            photo_root = %resolver.root().display(),
            "browser ready"
        ),
        Err(error) => warn!(source = %source.describe(), %error, "profile data unavailable"),
    }
    BrowserState::from_load(loaded, schema, resolver)
}

/// Numeric targets are zero-based indexes; anything else is a name.
pub fn parse_jump_target(raw: &str) -> JumpTarget {
    let trimmed = raw.trim();
    match trimmed.parse::<usize>() {
        Ok(index) => JumpTarget::Index(index),
        Err(_) => JumpTarget::Name(trimmed.to_owned()),
    }
}

/// Renders one profile as pretty JSON without touching the terminal UI.
pub fn dump_profile(session: &mut Session<FsResourceResolver>, raw_target: &str) -> Result<String> {
    let moved = match parse_jump_target(raw_target) {
        JumpTarget::Index(index) => session.jump_to_index(index),
        JumpTarget::Name(name) => session.jump_to_name(&name),
    };
    moved?;

    let view = session.render_current();
    serde_json::to_string_pretty(&view).context("encode profile as JSON")
}
