// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the public struct header and the client action header.
// Author: Lukas Bower

use crate::api::{ApiModel, ColKind};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::ctype::{format_prototype, ProtoOpts};
use crate::codegen::sink::Sink;
use std::fmt::Write as _;

/// Caller-visible definitions only. The LVM structs mirror the wire layout
/// bit for bit: the library transfers them by plain copy, so field types,
/// widths and order must agree with the XDR records.
pub fn emit_structs(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    writeln!(sink, "struct guestfs_int_bool {{").ok();
    writeln!(sink, "  int32_t i;").ok();
    writeln!(sink, "  int32_t b;").ok();
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();

    for record in &model.records {
        let name = record.public_name();
        writeln!(sink, "struct {name} {{").ok();
        for (col, kind) in &record.cols {
            match kind {
                ColKind::Str => writeln!(sink, "  char *{col};").ok(),
                ColKind::Uuid => {
                    writeln!(
                        sink,
                        "  /* The next field is NOT nul-terminated, be careful when printing it: */"
                    )
                    .ok();
                    writeln!(sink, "  char {col}[32];").ok()
                }
                ColKind::Bytes => writeln!(sink, "  uint64_t {col};").ok(),
                ColKind::Int => writeln!(sink, "  int64_t {col};").ok(),
                ColKind::OptPercent => {
                    writeln!(sink, "  float {col}; /* [0..100] or -1 */").ok()
                }
            };
        }
        writeln!(sink, "}};").ok();
        writeln!(sink).ok();
        writeln!(sink, "struct {name}_list {{").ok();
        writeln!(sink, "  uint32_t len;").ok();
        writeln!(sink, "  struct {name} *val;").ok();
        writeln!(sink, "}};").ok();
        writeln!(sink).ok();
    }
}

/// One single-line extern declaration per call, daemon and client-only alike.
pub fn emit_actions(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    let opts = ProtoOpts {
        is_extern: true,
        semicolon: true,
        single_line: true,
        newline: true,
        handle: Some("handle"),
        ..ProtoOpts::default()
    };
    for call in &model.calls {
        sink.push_str(&format_prototype(call, &opts));
    }
}
