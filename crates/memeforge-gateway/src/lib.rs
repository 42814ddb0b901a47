// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway exposing the MemeForge pipeline.
//!
//! A thin axum surface over [`MemePipeline`]: one full-pipeline route
//! plus per-stage routes and a public health endpoint. Each request
//! runs under the configured timeout; on expiry any partially produced
//! assets are abandoned in place.

pub mod handlers;
pub mod server;

pub use server::{build_router, start_server, GatewayState, ServerConfig};
