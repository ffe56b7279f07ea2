// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Where a log statement is.

use crate::basename::basename;

/// The source position of a log statement: file, line, and the enclosing function.
///
/// Built by the [`location!`](crate::location!) macro at the call site.  All three parts are
/// static strings, so a `Location` is free to copy around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    file: &'static str,
    line: u32,
    routine: &'static str,
}

impl Location {
    /// Describe a source position.
    pub const fn new(file: &'static str, line: u32, routine: &'static str) -> Location {
        Location {
            file,
            line,
            routine,
        }
    }

    /// The path as given to [`new`](Self::new).
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// The last segment of the path.
    pub const fn basename(&self) -> &'static str {
        basename(self.file)
    }

    /// The line number.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// The enclosing function.
    pub const fn routine(&self) -> &'static str {
        self.routine
    }
}

/// Reduce a type path, as produced by [`core::any::type_name`] on a marker function nested in the
/// caller, to the caller's own name.
///
/// `app::sensors::read_temp::__routine` gives `read_temp`.  Closure frames are skipped, so the name
/// of the function holding the closure is used.
pub fn routine_name(path: &'static str) -> &'static str {
    let mut path = path.strip_suffix("::__routine").unwrap_or(path);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    match path.rfind("::") {
        Some(pos) => &path[pos + 2..],
        None => path,
    }
}

/// The name of the enclosing function, as a `&'static str`.
#[macro_export]
macro_rules! routine {
    () => {{
        fn __routine() {}
        $crate::location::routine_name($crate::_export::type_name_of(__routine))
    }};
}

/// The [`Location`] of the macro invocation.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(::core::file!(), ::core::line!(), $crate::routine!())
    };
}
