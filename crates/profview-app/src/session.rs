// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::Arc;
use tracing::warn;

use crate::{
    FieldSchema, JumpTarget, Navigator, ProfileError, ProfileView, Record, RecordSet,
    ResourceResolver, project_record,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    Jump(JumpTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Moved { from: usize, to: usize },
    Unchanged { index: usize },
}

/// One user's view of a shared, read-only record set.
///
/// The record set and schema are shared behind `Arc`; the cursor is owned by
/// the session so concurrent sessions never observe each other's position.
/// Views are projected on demand and never cached.
#[derive(Debug)]
pub struct Session<R> {
    records: Arc<RecordSet>,
    schema: Arc<FieldSchema>,
    navigator: Navigator,
    resolver: R,
}

impl<R: ResourceResolver> Session<R> {
    pub fn new(records: Arc<RecordSet>, schema: Arc<FieldSchema>, resolver: R) -> Self {
        let navigator = Navigator::new(records.bounds());
        Self {
            records,
            schema,
            navigator,
            resolver,
        }
    }

    pub fn render_current(&self) -> ProfileView {
        let index = self.navigator.current_index();
        match self.records.get(index) {
            Some(record) => project_record(index, record, &self.schema, &self.resolver),
            None => ProfileView {
                record_index: index,
                sections: Vec::new(),
            },
        }
    }

    pub fn dispatch(&mut self, command: NavCommand) -> Result<NavEvent, ProfileError> {
        let from = self.navigator.current_index();
        match command {
            NavCommand::Next => {
                self.navigator.next();
            }
            NavCommand::Prev => {
                self.navigator.prev();
            }
            NavCommand::Jump(JumpTarget::Index(index)) => self.navigator.jump_to(index)?,
            NavCommand::Jump(JumpTarget::Name(name)) => {
                let index = self.index_of_name(&name)?;
                self.navigator.jump_to(index)?;
            }
        }

        let to = self.navigator.current_index();
        if from == to {
            Ok(NavEvent::Unchanged { index: to })
        } else {
            Ok(NavEvent::Moved { from, to })
        }
    }

    pub fn next(&mut self) -> NavEvent {
        self.step(NavCommand::Next)
    }

    pub fn prev(&mut self) -> NavEvent {
        self.step(NavCommand::Prev)
    }

    pub fn jump_to_index(&mut self, index: usize) -> Result<NavEvent, ProfileError> {
        self.dispatch(NavCommand::Jump(JumpTarget::Index(index)))
    }

    pub fn jump_to_name(&mut self, name: &str) -> Result<NavEvent, ProfileError> {
        self.dispatch(NavCommand::Jump(JumpTarget::Name(name.to_owned())))
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    pub fn current_record(&self) -> Option<&Record> {
        self.records.get(self.navigator.current_index())
    }

    pub fn names(&self) -> Vec<String> {
        self.records.display_names()
    }

    fn step(&mut self, command: NavCommand) -> NavEvent {
        let index = self.navigator.current_index();
        self.dispatch(command).unwrap_or(NavEvent::Unchanged { index })
    }

    fn index_of_name(&self, name: &str) -> Result<usize, ProfileError> {
        self.records.position_of_name(name).ok_or_else(|| {
            let error = ProfileError::IndexOutOfRange {
                target: JumpTarget::Name(name.to_owned()),
                len: self.records.len(),
            };
            warn!(%error, "rejected jump");
            error
        })
    }
}

/// What the presentation layer shows: a live session or the reason there is none.
#[derive(Debug)]
pub enum BrowserState<R> {
    Ready(Session<R>),
    Unavailable { reason: String },
}

impl<R: ResourceResolver> BrowserState<R> {
    pub fn from_load(
        records: Result<RecordSet, ProfileError>,
        schema: Arc<FieldSchema>,
        resolver: R,
    ) -> Self {
        match records {
            Ok(records) => Self::Ready(Session::new(Arc::new(records), schema, resolver)),
            Err(error) => {
                warn!(%error, "starting without profiles");
                Self::Unavailable {
                    reason: error.to_string(),
                }
            }
        }
    }

    pub fn session(&self) -> Option<&Session<R>> {
        match self {
            Self::Ready(session) => Some(session),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<R>> {
        match self {
            Self::Ready(session) => Some(session),
            Self::Unavailable { .. } => None,
        }
    }
}
