// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core measurement library for linebench.
//!
//! Linebench benchmarks line-oriented data pipelines: an external
//! generator pushes text through the system under test, and the meters
//! in this crate read the resulting stream and report on it. Two meters
//! are provided:
//!
//! - [`throughput::measure`] counts lines and bytes over time and
//!   produces a [`ThroughputResult`].
//! - [`latency::measure`] parses a `<timestamp>|<payload>` prefix per
//!   line and produces a [`LatencyResult`], or an [`EmptyResult`] when
//!   no line could be parsed.
//!
//! Both meters are single-threaded and make exactly one pass over the
//! input. Wall-clock time is supplied through the [`Clock`] trait so
//! measurement logic stays deterministic under test.
//!
//! # Modules
//!
//! - [`stream`] - line iterator over any buffered reader
//! - [`clock`] - wall-clock abstraction
//! - [`stats`] - pure statistics helpers
//! - [`throughput`] - throughput meter
//! - [`latency`] - latency meter
//! - [`result`] - result document types
//! - [`io`] - result document persistence

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod clock;
pub mod error;
pub mod io;
pub mod latency;
pub mod result;
pub mod stats;
pub mod stream;
pub mod throughput;

pub use clock::{Clock, SystemClock};
pub use error::{Error, Result};
pub use result::{EmptyResult, LatencyOutcome, LatencyResult, LatencyStats, ThroughputResult};
pub use stream::LineStream;
