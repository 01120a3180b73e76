//! Popperian Falsification Tests for Enlace
//!
//! | Category | ID Range | Description |
//! |----------|----------|-------------|
//! | A | F001-F008 | Service Resolution |
//! | B | F009-F014, F037 | Transaction Coordinator |
//! | C | F015-F021 | Task Executor |
//! | D | F022-F030 | Management Endpoint |
//! | E | F031-F036 | Registry Failure |

// Allow test-specific patterns that are denied in production code
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod failure;
mod management;
mod transactions;
