// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! Directive resolvers are instrumented with Rust's `tracing` framework. They only emit events;
//! installing a subscriber is the host's call.
//!
//! Calling the `init` function installs a global console subscriber filtered by the value of
//! `DC_LOG`, which follows the same conventions as `RUST_LOG` (for example
//! `DC_LOG=directive_resolvers=debug`). Without it, only warnings and errors are printed.

use directive_env::Environment;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

use crate::env_const::DC_LOG;

/// Initialize the tracing subscriber.
///
/// Fails (instead of panicking) if a global subscriber has already been installed.
pub fn init(env: &dyn Environment) -> Result<(), LoggingError> {
    let filter = env_filter(env);
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter(env: &dyn Environment) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env.get(DC_LOG).unwrap_or_default())
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}
