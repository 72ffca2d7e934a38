// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! At-most-one-backend guard.
//!
//! Two keyboard backends listening on the same window would both react to
//! every key, so installation goes through an [`InstallSlot`]. The host keeps
//! one slot per window (typically for the life of the process) and passes it
//! to [`KeyboardBackend::install`](crate::backend::KeyboardBackend::install)
//! and [`KeyboardBackend::uninstall`](crate::backend::KeyboardBackend::uninstall).
//! Independent slots never interfere, which keeps tests isolated.

use crate::error::Error;

/// Records whether a keyboard backend is installed.
#[derive(Debug, Default)]
pub struct InstallSlot {
    occupied: bool,
}

impl InstallSlot {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self { occupied: false }
    }

    /// Whether a backend currently holds the slot.
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub(crate) fn acquire(&mut self) -> Result<(), Error> {
        if self.occupied {
            return Err(Error::AlreadyInstalled);
        }
        self.occupied = true;
        Ok(())
    }

    pub(crate) fn release(&mut self) {
        self.occupied = false;
    }
}
