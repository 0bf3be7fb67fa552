// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod error;
pub mod format;
pub mod model;
pub mod navigator;
pub mod project;
pub mod schema;
pub mod session;

pub use error::*;
pub use format::*;
pub use model::*;
pub use navigator::*;
pub use project::*;
pub use schema::*;
pub use session::*;
