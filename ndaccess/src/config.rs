/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Configuration for slicing.
//!
//! Slice bounds are validated according to [`SliceOpts`]. The
//! process-wide options in [`global`] are read from the environment
//! the first time they are needed and can be temporarily overridden
//! in tests.

use std::env;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable selecting strict (`1`, `true`, `yes`) or
/// lenient (`0`, `false`, `no`) slice bounds.
pub const SLICE_STRICT_BOUNDS_ENV: &str = "NDACCESS_SLICE_STRICT_BOUNDS";

/// Options controlling how slice bounds are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SliceOpts {
    /// Reject bounds outside the axis instead of clamping them.
    pub strict_bounds: bool,
}

impl SliceOpts {
    /// Out-of-range bounds are errors.
    pub fn strict() -> Self {
        Self {
            strict_bounds: true,
        }
    }

    /// Out-of-range bounds are clamped to the axis.
    pub fn lenient() -> Self {
        Self {
            strict_bounds: false,
        }
    }
}

impl Default for SliceOpts {
    fn default() -> Self {
        Self::strict()
    }
}

/// Load options from environment variables, falling back to the
/// defaults for anything unset or unparseable.
pub fn from_env() -> SliceOpts {
    from_lookup(|key| env::var(key).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SliceOpts {
    let mut opts = SliceOpts::default();
    if let Some(val) = lookup(SLICE_STRICT_BOUNDS_ENV) {
        match val.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => opts.strict_bounds = true,
            "0" | "false" | "no" => opts.strict_bounds = false,
            other => {
                tracing::warn!("ignoring {}={:?}", SLICE_STRICT_BOUNDS_ENV, other);
            }
        }
    }
    opts
}

/// Global configuration functions
pub mod global {
    use std::sync::LazyLock;
    use std::sync::Mutex;
    use std::sync::MutexGuard;
    use std::sync::PoisonError;
    use std::sync::RwLock;

    use super::*;

    /// Global options, initialized from environment variables.
    static CONFIG: LazyLock<RwLock<SliceOpts>> = LazyLock::new(|| RwLock::new(from_env()));

    /// Serializes tests that override the global options.
    static LOCK: Mutex<()> = Mutex::new(());

    /// The current global options.
    pub fn get() -> SliceOpts {
        *CONFIG.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(opts: SliceOpts) {
        *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = opts;
    }

    /// Reset the global options to defaults (for testing only)
    pub fn reset_to_defaults() {
        set(SliceOpts::default());
    }

    /// Acquire the global configuration lock for testing.
    pub fn lock() -> ConfigLock {
        ConfigLock {
            _guard: LOCK.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Exclusive access to the global options while held.
    pub struct ConfigLock {
        _guard: MutexGuard<'static, ()>,
    }

    impl ConfigLock {
        /// Replace the global options until the returned guard is
        /// dropped.
        pub fn override_opts(&self, opts: SliceOpts) -> OverrideGuard<'_> {
            let previous = get();
            set(opts);
            OverrideGuard {
                previous,
                _lock: self,
            }
        }
    }

    /// Restores the previous global options on drop.
    pub struct OverrideGuard<'a> {
        previous: SliceOpts,
        _lock: &'a ConfigLock,
    }

    impl Drop for OverrideGuard<'_> {
        fn drop(&mut self) {
            set(self.previous);
        }
    }
}
