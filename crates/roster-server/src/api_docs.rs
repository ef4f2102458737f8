// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for roster-server, served at `/api/openapi.json`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster Server API",
        version = "1.0.0",
        description = "Records people synchronously or through named background jobs whose progress can be polled.",
        license(name = "Proprietary"),
        contact(
            name = "Geoffrey Huntley",
            email = "ghuntley@ghuntley.com",
            url = "https://ghuntley.com"
        )
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "people", description = "Listing and synchronous creation of people"),
        (name = "jobs", description = "Background jobs: start, poll, delete"),
        (name = "health", description = "Health checks")
    ),
    paths(
        crate::routes::people::index,
        crate::routes::people::add_person,
        crate::routes::background::start_background,
        crate::routes::status::get_status,
        crate::routes::status::delete_status,
        crate::routes::health::health_check,
    ),
    components(schemas(
        roster_server_api::Alert,
        roster_server_api::AlertLevel,
        roster_server_api::ErrorResponse,
        roster_server_api::HealthResponse,
        roster_server_api::HealthStatus,
        roster_server_api::IndexResponse,
        roster_server_api::JobStatusResponse,
        roster_server_api::JobsHealth,
        roster_server_api::LogEntryResponse,
        roster_server_api::NameForm,
        roster_server_api::PersonResponse,
    ))
)]
pub struct ApiDoc;
