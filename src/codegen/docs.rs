// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the client, shell and struct manual-page fragments.
// Author: Lukas Bower

use crate::api::{ApiModel, ColKind, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::ctype::{fishify, format_prototype, ProtoOpts};
use crate::codegen::fish_synopsis;
use crate::codegen::sink::Sink;
use crate::codegen::PROTOCOL_LIMIT_WARNING;
use std::fmt::Write as _;

/// Public prototype, prose and return-value clause for every call,
/// alphabetically.
pub fn emit_actions_pod(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::HashStyle, Licence::Lgpl);

    let opts = ProtoOpts {
        semicolon: true,
        newline: true,
        handle: Some("handle"),
        ..ProtoOpts::default()
    };
    for call in model.sorted_calls() {
        writeln!(sink, "=head2 guestfs_{}", call.name).ok();
        writeln!(sink).ok();
        sink.push_str(" ");
        sink.push_str(&format_prototype(call, &opts));
        writeln!(sink).ok();
        writeln!(sink, "{}", call.description).ok();
        writeln!(sink).ok();
        match call.ret {
            Ret::Err => {
                writeln!(sink, "This function returns 0 on success or -1 on error.").ok();
            }
            Ret::Int(_) => {
                writeln!(sink, "On error this function returns -1.").ok();
            }
            Ret::Bool(_) => {
                writeln!(
                    sink,
                    "This function returns a C truth value on success or -1 on error."
                )
                .ok();
            }
            Ret::ConstString(_) => {
                writeln!(
                    sink,
                    "This function returns a string or NULL on error.\n\
                     The string is owned by the guest handle and must I<not> be freed."
                )
                .ok();
            }
            Ret::String(_) => {
                writeln!(
                    sink,
                    "This function returns a string or NULL on error.\n\
                     I<The caller must free the returned string after use>."
                )
                .ok();
            }
            Ret::StringList(_) => {
                writeln!(
                    sink,
                    "This function returns a NULL-terminated array of strings\n\
                     (like L<environ(3)>), or NULL if there was an error.\n\
                     I<The caller must free the strings and the array after use>."
                )
                .ok();
            }
            Ret::IntBool(_, _) => {
                writeln!(
                    sink,
                    "This function returns a C<struct guestfs_int_bool *>,\n\
                     or NULL if there was an error.\n\
                     I<The caller must call C<guestfs_free_int_bool> after use>."
                )
                .ok();
            }
            Ret::PvList(_) => emit_list_clause(sink, "pv"),
            Ret::VgList(_) => emit_list_clause(sink, "vg"),
            Ret::LvList(_) => emit_list_clause(sink, "lv"),
        }
        if call.protocol_limit_warning() {
            writeln!(sink).ok();
            writeln!(sink, "{PROTOCOL_LIMIT_WARNING}").ok();
        }
        writeln!(sink).ok();
    }
}

fn emit_list_clause(sink: &mut Sink, kind: &str) {
    writeln!(
        sink,
        "This function returns a C<struct guestfs_lvm_{kind}_list *>\n\
         (see E<lt>guestfs-structs.hE<gt>),\n\
         or NULL if there was an error.\n\
         I<The caller must call C<guestfs_free_lvm_{kind}_list> after use>."
    )
    .ok();
}

/// Shell synopsis and rewritten prose for every shell-visible call.
pub fn emit_fish_pod(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::HashStyle, Licence::Gpl);

    for call in model.fish_calls_sorted() {
        match call.fish_alias() {
            Some(alias) => {
                writeln!(sink, "=head2 {} | {alias}", call.fish_name()).ok();
            }
            None => {
                writeln!(sink, "=head2 {}", call.fish_name()).ok();
            }
        }
        writeln!(sink).ok();
        writeln!(sink, " {}", fish_synopsis(call)).ok();
        writeln!(sink).ok();
        writeln!(sink, "{}", fishify(call.description)).ok();
        if call.protocol_limit_warning() {
            writeln!(sink).ok();
            writeln!(sink, "{PROTOCOL_LIMIT_WARNING}").ok();
        }
        writeln!(sink).ok();
    }
}

/// Public C declaration and list container for each LVM record kind.
pub fn emit_structs_pod(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::HashStyle, Licence::Lgpl);

    for record in &model.records {
        let name = record.public_name();
        writeln!(sink, "=head2 {name}").ok();
        writeln!(sink).ok();
        writeln!(sink, " struct {name} {{").ok();
        for (col, kind) in &record.cols {
            match kind {
                ColKind::Str => {
                    writeln!(sink, "   char *{col};").ok();
                }
                ColKind::Uuid => {
                    writeln!(
                        sink,
                        "   /* The next field is NOT nul-terminated, be careful when printing it: */"
                    )
                    .ok();
                    writeln!(sink, "   char {col}[32];").ok();
                }
                ColKind::Bytes => {
                    writeln!(sink, "   uint64_t {col};").ok();
                }
                ColKind::Int => {
                    writeln!(sink, "   int64_t {col};").ok();
                }
                ColKind::OptPercent => {
                    writeln!(sink, "   float {col}; /* [0..100] or -1 */").ok();
                }
            }
        }
        writeln!(sink, " }};").ok();
        writeln!(sink).ok();
        writeln!(sink, " struct {name}_list {{").ok();
        writeln!(sink, "   uint32_t len; /* Number of elements in list. */").ok();
        writeln!(sink, "   struct {name} *val; /* Elements. */").ok();
        writeln!(sink, " }};").ok();
        writeln!(sink).ok();
    }
}
