// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod background;
pub mod docs;
pub mod health;
pub mod people;
pub mod status;
