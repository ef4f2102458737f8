// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod alerts;
pub mod health;
pub mod jobs;
pub mod people;

pub use alerts::{Alert, AlertLevel, AlertQuery};
pub use health::{HealthResponse, HealthStatus, JobsHealth};
pub use jobs::{JobStatusResponse, LogEntryResponse, StatusQuery};
pub use people::{ErrorResponse, IndexResponse, NameForm, PersonResponse};
