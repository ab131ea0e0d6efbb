// ABOUTME: HTTP middleware wiring the CSRF protection layer into an Axum router
// ABOUTME: Re-exports the request orchestrator and its shared state type
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod csrf;

// CSRF orchestrator middleware and shared state
pub use csrf::{csrf_protection_middleware, CsrfProtection};
