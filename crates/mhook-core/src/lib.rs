//! # mhook-core
//!
//! Foundation shared by the mhook crates: `tracing` subscriber setup and
//! an in-memory log capture layer for asserting on emitted events in tests.

#![deny(unsafe_code)]

pub mod logging;
