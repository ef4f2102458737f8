// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod database;
mod http;
mod jobs;
mod logging;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use jobs::{JobsConfig, JobsConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
