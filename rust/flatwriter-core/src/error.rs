// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error type shared by the buffer and the table writer.
//!
//! Every failure the writer can report is a programming error on the caller's
//! side or an internal bookkeeping bug: mismatched scopes, references that do
//! not point into the finished extent, offsets that do not fit the format's
//! integer widths. None of them are retryable, and an encode that returns an
//! error leaves the buffer in an unspecified state.
//!
//! ## Debug Mode: FLATWRITER_PANIC_ON_ERROR
//!
//! Set `FLATWRITER_PANIC_ON_ERROR=1` at compile time to panic at the exact
//! location where an error is created:
//!
//! ```bash
//! RUST_BACKTRACE=1 FLATWRITER_PANIC_ON_ERROR=1 cargo test
//! ```

use std::borrow::Cow;

use thiserror::Error;

/// Set `FLATWRITER_PANIC_ON_ERROR` at compile time to enable panic on error.
pub const PANIC_ON_ERROR: bool = option_env!("FLATWRITER_PANIC_ON_ERROR").is_some();

/// Check if `FLATWRITER_PANIC_ON_ERROR` was set at compile time.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for flatbuffer encoding.
///
/// **Always** build errors with the constructor functions ([`Error::scope_mismatch`],
/// [`Error::offset_overflow`], ...) rather than the variants, so that the
/// `FLATWRITER_PANIC_ON_ERROR` switch is honoured.
///
/// ```rust
/// use flatwriter_core::error::Error;
///
/// let err = Error::invalid_reference(64, 16);
/// assert_eq!(
///     err.to_string(),
///     "Reference to finished offset 64 is outside the finished extent of 16 bytes"
/// );
/// ```
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A peek or erase fell outside one of the buffer extents.
    ///
    /// Do not construct this variant directly; use [`Error::buffer_out_of_bound`] instead.
    #[error("Buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// A table or vector scope was closed with a mark that does not belong to
    /// the innermost open scope.
    ///
    /// Do not construct this variant directly; use [`Error::scope_mismatch`] instead.
    #[error("{0}")]
    ScopeMismatch(Cow<'static, str>),

    /// A computed offset or size does not fit the integer width the format
    /// stores it in.
    ///
    /// Do not construct this variant directly; use [`Error::offset_overflow`] instead.
    #[error("{0}")]
    OffsetOverflow(Cow<'static, str>),

    /// A reference targets a position that is not inside the finished extent.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_reference`] instead.
    #[error("Reference to finished offset {0} is outside the finished extent of {1} bytes")]
    InvalidReference(usize, usize),

    /// Pending field records were left behind after a top-level encode.
    ///
    /// Do not construct this variant directly; use [`Error::pending_leak`] instead.
    #[error("Unexpected temporary memory left behind: {0} pending bytes")]
    PendingLeak(usize),

    /// A nested object was started after a value field in the same table.
    ///
    /// Do not construct this variant directly; use [`Error::field_order`] instead.
    #[error("{0}")]
    FieldOrder(Cow<'static, str>),

    /// Too many nested table/vector scopes.
    ///
    /// Do not construct this variant directly; use [`Error::depth_exceed`] instead.
    #[error("{0}")]
    DepthExceed(Cow<'static, str>),

    /// A field slot collides with the vtable header or exceeds the vtable range.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_slot`] instead.
    #[error("Invalid field slot {0}")]
    InvalidSlot(u16),

    /// Unsupported operation or value shape.
    ///
    /// Do not construct this variant directly; use [`Error::unsupported`] instead.
    #[error("{0}")]
    Unsupported(Cow<'static, str>),

    /// Malformed input handed to the writer.
    ///
    /// Do not construct this variant directly; use [`Error::invalid_data`] instead.
    #[error("{0}")]
    InvalidData(Cow<'static, str>),
}

impl Error {
    /// Creates a new [`Error::BufferOutOfBound`] with the given bounds.
    ///
    /// ```
    /// use flatwriter_core::error::Error;
    ///
    /// let err = Error::buffer_out_of_bound(10, 20, 25);
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, size: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, size);
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::ScopeMismatch`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn scope_mismatch<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::ScopeMismatch(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::OffsetOverflow`].
    ///
    /// ```
    /// use flatwriter_core::error::Error;
    ///
    /// let err = Error::offset_overflow(format!("vtable offset {} exceeds u16", 70_000));
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn offset_overflow<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::OffsetOverflow(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidReference`] for a target outside the
    /// finished extent of `finished_size` bytes.
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_reference(target: usize, finished_size: usize) -> Self {
        let err = Error::InvalidReference(target, finished_size);
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::PendingLeak`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn pending_leak(leftover: usize) -> Self {
        let err = Error::PendingLeak(leftover);
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::FieldOrder`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn field_order<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::FieldOrder(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DepthExceed`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn depth_exceed<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DepthExceed(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidSlot`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_slot(slot: u16) -> Self {
        let err = Error::InvalidSlot(slot);
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::Unsupported`].
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn unsupported<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::Unsupported(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    ///
    /// ```
    /// use flatwriter_core::error::Error;
    ///
    /// let err = Error::invalid_data("root table is absent");
    /// ```
    #[inline(always)]
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("FLATWRITER_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Ensures a condition is true; otherwise returns an [`enum@Error`].
///
/// # Examples
/// ```
/// use flatwriter_core::ensure;
/// use flatwriter_core::error::Error;
///
/// fn check_slot(slot: u16) -> Result<(), Error> {
///     ensure!(slot >= 2, Error::invalid_slot(slot));
///     ensure!(slot < 100, "slot {} too large", slot);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal) => {
        if !$cond {
            return Err($crate::error::Error::invalid_data($msg));
        }
    };
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)));
        }
    };
}

/// Returns early with an [`Error::InvalidData`].
///
/// # Examples
/// ```
/// use flatwriter_core::bail;
/// use flatwriter_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!("something went wrong");
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($crate::error::Error::invalid_data($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::invalid_data(format!($fmt, $($arg)*)))
    };
}
