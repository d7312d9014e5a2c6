// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the XDR interface description consumed by the RPC stub generator.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, ColKind, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::sink::Sink;
use std::fmt::Write as _;

pub fn emit(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    writeln!(sink, "/* This file defines the protocol used between the library and").ok();
    writeln!(sink, " * the daemon.  Messages are limited to GUESTFS_MESSAGE_MAX bytes").ok();
    writeln!(sink, " * in either direction.").ok();
    writeln!(sink, " */").ok();
    writeln!(sink).ok();
    writeln!(sink, "typedef string str<>;").ok();
    writeln!(sink).ok();

    for record in &model.records {
        writeln!(sink, "struct {} {{", record.wire_name()).ok();
        for (name, kind) in &record.cols {
            match kind {
                ColKind::Str => writeln!(sink, "  string {name}<>;").ok(),
                ColKind::Uuid => writeln!(sink, "  opaque {name}[32];").ok(),
                ColKind::Bytes | ColKind::Int => writeln!(sink, "  hyper {name};").ok(),
                ColKind::OptPercent => writeln!(sink, "  float {name};").ok(),
            };
        }
        writeln!(sink, "}};").ok();
        writeln!(sink).ok();
        writeln!(
            sink,
            "typedef {} {}_list<>;",
            record.wire_name(),
            record.wire_name()
        )
        .ok();
        writeln!(sink).ok();
    }

    for call in model.daemon_calls() {
        if !call.args.is_empty() {
            writeln!(sink, "struct guestfs_{}_args {{", call.name).ok();
            for arg in &call.args {
                match arg {
                    Arg::Str(name) => writeln!(sink, "  string {name}<>;").ok(),
                    Arg::OptStr(name) => writeln!(sink, "  str *{name};").ok(),
                    Arg::Bool(name) => writeln!(sink, "  bool {name};").ok(),
                    Arg::Int(name) => writeln!(sink, "  int {name};").ok(),
                };
            }
            writeln!(sink, "}};").ok();
            writeln!(sink).ok();
        }

        match call.ret {
            Ret::Err => {}
            Ret::Int(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  int {name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::Bool(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  bool {name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::ConstString(_) => {
                // Rejected by the validator before emission starts.
            }
            Ret::String(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  string {name}<>;").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::StringList(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  str {name}<>;").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::IntBool(int_name, bool_name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  int {int_name};").ok();
                writeln!(sink, "  bool {bool_name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::PvList(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  guestfs_lvm_int_pv_list {name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::VgList(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  guestfs_lvm_int_vg_list {name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
            Ret::LvList(name) => {
                writeln!(sink, "struct guestfs_{}_ret {{", call.name).ok();
                writeln!(sink, "  guestfs_lvm_int_lv_list {name};").ok();
                writeln!(sink, "}};").ok();
                writeln!(sink).ok();
            }
        }
    }

    writeln!(sink, "enum guestfs_procedure {{").ok();
    for call in model.daemon_calls() {
        writeln!(sink, "  {} = {},", call.proc_const(), call.proc_num).ok();
    }
    writeln!(sink, "  GUESTFS_PROC_NR_PROCS").ok();
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();

    writeln!(sink, "const GUESTFS_MESSAGE_MAX = {};", 4 * 1024 * 1024).ok();
    writeln!(sink).ok();
    writeln!(sink, "const GUESTFS_PROGRAM = 0x2000F5F5;").ok();
    writeln!(sink, "const GUESTFS_PROTOCOL_VERSION = 1;").ok();
    writeln!(sink).ok();
    writeln!(sink, "enum guestfs_message_direction {{").ok();
    writeln!(sink, "  GUESTFS_DIRECTION_CALL = 0,        /* client -> daemon */").ok();
    writeln!(sink, "  GUESTFS_DIRECTION_REPLY = 1        /* daemon -> client */").ok();
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();
    writeln!(sink, "enum guestfs_message_status {{").ok();
    writeln!(sink, "  GUESTFS_STATUS_OK = 0,").ok();
    writeln!(sink, "  GUESTFS_STATUS_ERROR = 1").ok();
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();
    writeln!(sink, "const GUESTFS_ERROR_LEN = 256;").ok();
    writeln!(sink).ok();
    writeln!(sink, "struct guestfs_message_error {{").ok();
    writeln!(sink, "  string error<GUESTFS_ERROR_LEN>;   /* error message */").ok();
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();
    writeln!(sink, "struct guestfs_message_header {{").ok();
    writeln!(sink, "  unsigned prog;                     /* GUESTFS_PROGRAM */").ok();
    writeln!(sink, "  unsigned vers;                     /* GUESTFS_PROTOCOL_VERSION */").ok();
    writeln!(sink, "  guestfs_procedure proc;            /* GUESTFS_PROC_x */").ok();
    writeln!(sink, "  guestfs_message_direction direction;").ok();
    writeln!(sink, "  unsigned serial;                   /* message serial number */").ok();
    writeln!(sink, "  guestfs_message_status status;").ok();
    writeln!(sink, "}};").ok();
}
