// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the shared generated-file preamble in each comment syntax.
// Author: Lukas Bower

use crate::codegen::sink::Sink;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// slash-star, for C sources and headers.
    CStyle,
    /// hash, for Perl modules and POD fragments.
    HashStyle,
    /// paren-star, for OCaml sources.
    OCamlStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Licence {
    /// Library-side artefacts.
    Lgpl,
    /// Daemon and shell artefacts.
    Gpl,
}

const WARNING: &[&str] = &[
    "guestfs generated file",
    "WARNING: THIS FILE IS GENERATED BY guestfs-gen.",
    "ANY CHANGES YOU MAKE TO THIS FILE WILL BE LOST.",
    "",
    "Copyright © 2025 Lukas Bower",
    "",
];

const LGPL: &[&str] = &[
    "This library is free software; you can redistribute it and/or",
    "modify it under the terms of the GNU Lesser General Public",
    "License as published by the Free Software Foundation; either",
    "version 2 of the License, or (at your option) any later version.",
    "",
    "This library is distributed in the hope that it will be useful,",
    "but WITHOUT ANY WARRANTY; without even the implied warranty of",
    "MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU",
    "Lesser General Public License for more details.",
    "",
    "You should have received a copy of the GNU Lesser General Public",
    "License along with this library; if not, write to the Free Software",
    "Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA",
];

const GPL: &[&str] = &[
    "This program is free software; you can redistribute it and/or modify",
    "it under the terms of the GNU General Public License as published by",
    "the Free Software Foundation; either version 2 of the License, or",
    "(at your option) any later version.",
    "",
    "This program is distributed in the hope that it will be useful,",
    "but WITHOUT ANY WARRANTY; without even the implied warranty of",
    "MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the",
    "GNU General Public License for more details.",
    "",
    "You should have received a copy of the GNU General Public License along",
    "with this program; if not, write to the Free Software Foundation, Inc.,",
    "51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA",
];

/// Write the standard top-of-file block: the do-not-edit warning, the
/// copyright line, and the licence, wrapped in the requested comment syntax
/// and followed by one blank line.
pub fn emit(sink: &mut Sink, style: CommentStyle, licence: Licence) {
    let licence_lines = match licence {
        Licence::Lgpl => LGPL,
        Licence::Gpl => GPL,
    };
    let lines: Vec<&str> = WARNING.iter().chain(licence_lines.iter()).copied().collect();

    match style {
        CommentStyle::CStyle => {
            writeln!(sink, "/* {}", lines[0]).ok();
            for line in &lines[1..] {
                if line.is_empty() {
                    writeln!(sink, " *").ok();
                } else {
                    writeln!(sink, " * {line}").ok();
                }
            }
            writeln!(sink, " */").ok();
        }
        CommentStyle::HashStyle => {
            for line in &lines {
                if line.is_empty() {
                    writeln!(sink, "#").ok();
                } else {
                    writeln!(sink, "# {line}").ok();
                }
            }
        }
        CommentStyle::OCamlStyle => {
            writeln!(sink, "(* {}", lines[0]).ok();
            for line in &lines[1..] {
                if line.is_empty() {
                    writeln!(sink, " *").ok();
                } else {
                    writeln!(sink, " * {line}").ok();
                }
            }
            writeln!(sink, " *)").ok();
        }
    }
    writeln!(sink).ok();
}
