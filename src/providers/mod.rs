// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Production implementations of the [`crate::traits`] seams.
//!
//! - [`AlloyChainAdapter`]: one wallet-backed Alloy provider per chain
//! - [`IrisAttestationProvider`]: Circle's Iris HTTP API over reqwest
//! - [`TokioClock`]: `tokio::time`
//!
//! Tests use the fakes in [`crate::testing`] instead.

mod alloy;
mod iris;
mod tokio_clock;

pub use self::alloy::AlloyChainAdapter;
pub use self::iris::IrisAttestationProvider;
pub use self::tokio_clock::TokioClock;
