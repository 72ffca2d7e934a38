// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type.

use core::fmt;

/// Errors raised by the keyboard backend.
///
/// Only configuration mistakes are errors. A missing window or document and
/// nodes without geometry degrade to no-ops instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A keyboard backend is already installed in this [`InstallSlot`](crate::install::InstallSlot).
    AlreadyInstalled,
    /// A focus selector was empty or whitespace.
    EmptySelector,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled => {
                f.write_str("cannot have two keyboard backends installed at the same time")
            }
            Self::EmptySelector => f.write_str("focus selector must not be empty"),
        }
    }
}

impl core::error::Error for Error {}
