// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the OCaml binding: interface, implementation and C glue.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, Call, ColKind, RecordSchema, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::sink::Sink;
use std::fmt::Write as _;

fn ocaml_arg_type(arg: &Arg) -> &'static str {
    match arg {
        Arg::Str(_) => "string",
        Arg::OptStr(_) => "string option",
        Arg::Bool(_) => "bool",
        Arg::Int(_) => "int",
    }
}

fn ocaml_ret_type(ret: Ret) -> &'static str {
    match ret {
        Ret::Err => "unit",
        Ret::Int(_) => "int",
        Ret::Bool(_) => "bool",
        Ret::ConstString(_) | Ret::String(_) => "string",
        Ret::StringList(_) => "string array",
        Ret::IntBool(_, _) => "int * bool",
        Ret::PvList(_) => "lvm_pv array",
        Ret::VgList(_) => "lvm_vg array",
        Ret::LvList(_) => "lvm_lv array",
    }
}

fn ocaml_signature(call: &Call) -> String {
    let mut parts = vec!["t".to_owned()];
    parts.extend(call.args.iter().map(|arg| ocaml_arg_type(arg).to_owned()));
    parts.push(ocaml_ret_type(call.ret).to_owned());
    parts.join(" -> ")
}

fn emit_record_type(record: &RecordSchema, sink: &mut Sink) {
    writeln!(sink, "type lvm_{} = {{", record.kind).ok();
    for (col, kind) in &record.cols {
        let ty = match kind {
            ColKind::Str | ColKind::Uuid => "string",
            ColKind::Bytes | ColKind::Int => "int64",
            ColKind::OptPercent => "float",
        };
        writeln!(sink, "  {col} : {ty};").ok();
    }
    writeln!(sink, "}}").ok();
}

pub fn emit_mli(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::OCamlStyle, Licence::Lgpl);

    writeln!(sink, "type t").ok();
    writeln!(sink, "(** A [guestfs_h] handle. *)").ok();
    writeln!(sink).ok();
    writeln!(sink, "exception Error of string").ok();
    writeln!(sink, "(** This exception is raised when there is an error. *)").ok();
    writeln!(sink).ok();
    writeln!(sink, "val create : unit -> t").ok();
    writeln!(sink).ok();
    writeln!(sink, "val close : t -> unit").ok();
    writeln!(sink, "(** Close the [guestfs_h] handle.  The handle is closed").ok();
    writeln!(sink, "    automatically if it is garbage collected. *)").ok();
    writeln!(sink).ok();
    for record in &model.records {
        emit_record_type(record, sink);
        writeln!(sink).ok();
    }
    for call in &model.calls {
        writeln!(sink, "val {} : {}", call.name, ocaml_signature(call)).ok();
        writeln!(sink, "(** {} *)", call.summary).ok();
        writeln!(sink).ok();
    }
}

pub fn emit_ml(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::OCamlStyle, Licence::Lgpl);

    writeln!(sink, "type t").ok();
    writeln!(sink, "exception Error of string").ok();
    writeln!(sink, "external create : unit -> t = \"ocaml_guestfs_create\"").ok();
    writeln!(sink, "external close : t -> unit = \"ocaml_guestfs_close\"").ok();
    writeln!(sink).ok();
    writeln!(sink, "(* Give the exception a name, so it can be raised from the C code. *)").ok();
    writeln!(sink, "let () =").ok();
    writeln!(sink, "  Callback.register_exception \"ocaml_guestfs_error\" (Error \"\")").ok();
    writeln!(sink).ok();
    for record in &model.records {
        emit_record_type(record, sink);
        writeln!(sink).ok();
    }
    for call in &model.calls {
        writeln!(
            sink,
            "external {} : {} = \"ocaml_guestfs_{}\"",
            call.name,
            ocaml_signature(call),
            call.name
        )
        .ok();
    }
}

pub fn emit_glue(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    writeln!(sink, "#include <stdio.h>").ok();
    writeln!(sink, "#include <stdlib.h>").ok();
    writeln!(sink, "#include <string.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include <caml/config.h>").ok();
    writeln!(sink, "#include <caml/alloc.h>").ok();
    writeln!(sink, "#include <caml/callback.h>").ok();
    writeln!(sink, "#include <caml/fail.h>").ok();
    writeln!(sink, "#include <caml/memory.h>").ok();
    writeln!(sink, "#include <caml/mlvalues.h>").ok();
    writeln!(sink, "#include <caml/signals.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include <guestfs.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include \"guestfs_c.h\"").ok();
    writeln!(sink).ok();

    for record in &model.records {
        emit_record_copy(record, sink);
    }
    for call in &model.calls {
        emit_glue_stub(call, sink);
    }
}

/// Deep-copy one wire-layout struct into an OCaml record, column by column.
fn emit_record_copy(record: &RecordSchema, sink: &mut Sink) {
    let kind = record.kind;
    let public = record.public_name();

    writeln!(sink, "static value").ok();
    writeln!(sink, "copy_lvm_{kind} (const struct {public} *{kind})").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  CAMLparam0 ();").ok();
    writeln!(sink, "  CAMLlocal2 (rv, v);").ok();
    writeln!(sink).ok();
    writeln!(sink, "  rv = caml_alloc ({}, 0);", record.cols.len()).ok();
    for (index, (col, col_kind)) in record.cols.iter().enumerate() {
        match col_kind {
            ColKind::Str => {
                writeln!(sink, "  v = caml_copy_string ({kind}->{col});").ok();
            }
            ColKind::Uuid => {
                writeln!(sink, "  v = caml_alloc_string (32);").ok();
                writeln!(sink, "  memcpy (String_val (v), {kind}->{col}, 32);").ok();
            }
            ColKind::Bytes | ColKind::Int => {
                writeln!(sink, "  v = caml_copy_int64 ({kind}->{col});").ok();
            }
            ColKind::OptPercent => {
                writeln!(sink, "  v = caml_copy_double ({kind}->{col});").ok();
            }
        }
        writeln!(sink, "  Store_field (rv, {index}, v);").ok();
    }
    writeln!(sink, "  CAMLreturn (rv);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
    writeln!(sink, "static value").ok();
    writeln!(sink, "copy_lvm_{kind}_list (const struct {public}_list *{kind}s)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  CAMLparam0 ();").ok();
    writeln!(sink, "  CAMLlocal2 (rv, v);").ok();
    writeln!(sink, "  int i;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  if ({kind}s->len == 0)").ok();
    writeln!(sink, "    CAMLreturn (Atom (0));").ok();
    writeln!(sink, "  else {{").ok();
    writeln!(sink, "    rv = caml_alloc ({kind}s->len, 0);").ok();
    writeln!(sink, "    for (i = 0; i < {kind}s->len; ++i) {{").ok();
    writeln!(sink, "      v = copy_lvm_{kind} (&{kind}s->val[i]);").ok();
    writeln!(sink, "      caml_modify (&Field (rv, i), v);").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink, "    CAMLreturn (rv);").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_glue_stub(call: &Call, sink: &mut Sink) {
    let name = call.name;
    let mut params = vec!["value handlev".to_owned()];
    params.extend(call.args.iter().map(|arg| format!("value {}v", arg.name())));

    writeln!(sink, "CAMLprim value").ok();
    writeln!(sink, "ocaml_guestfs_{name} ({})", params.join(", ")).ok();
    writeln!(sink, "{{").ok();
    let mut caml_params = vec!["handlev".to_owned()];
    caml_params.extend(call.args.iter().map(|arg| format!("{}v", arg.name())));
    writeln!(
        sink,
        "  CAMLparam{} ({});",
        caml_params.len(),
        caml_params.join(", ")
    )
    .ok();
    writeln!(sink, "  CAMLlocal1 (rv);").ok();
    writeln!(sink).ok();
    writeln!(sink, "  guestfs_h *handle = Guestfs_val (handlev);").ok();
    for arg in &call.args {
        let arg_name = arg.name();
        match arg {
            Arg::Str(_) => {
                writeln!(sink, "  const char *{arg_name} = String_val ({arg_name}v);").ok();
            }
            Arg::OptStr(_) => {
                writeln!(
                    sink,
                    "  const char *{arg_name} ="
                )
                .ok();
                writeln!(
                    sink,
                    "    {arg_name}v == Val_int (0) ? NULL : String_val (Field ({arg_name}v, 0));"
                )
                .ok();
            }
            Arg::Bool(_) => {
                writeln!(sink, "  int {arg_name} = Bool_val ({arg_name}v);").ok();
            }
            Arg::Int(_) => {
                writeln!(sink, "  int {arg_name} = Int_val ({arg_name}v);").ok();
            }
        }
    }
    match call.ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => {
            writeln!(sink, "  int r;").ok();
        }
        Ret::ConstString(_) => {
            writeln!(sink, "  const char *r;").ok();
        }
        Ret::String(_) => {
            writeln!(sink, "  char *r;").ok();
        }
        Ret::StringList(_) => {
            writeln!(sink, "  char **r;").ok();
            writeln!(sink, "  int i;").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(sink, "  struct guestfs_int_bool *r;").ok();
        }
        Ret::PvList(_) => {
            writeln!(sink, "  struct guestfs_lvm_pv_list *r;").ok();
        }
        Ret::VgList(_) => {
            writeln!(sink, "  struct guestfs_lvm_vg_list *r;").ok();
        }
        Ret::LvList(_) => {
            writeln!(sink, "  struct guestfs_lvm_lv_list *r;").ok();
        }
    }
    writeln!(sink).ok();
    writeln!(sink, "  if (handle == NULL)").ok();
    writeln!(sink, "    caml_failwith (\"{name}: used handle after closing it\");").ok();
    writeln!(sink).ok();
    let mut call_args = vec!["handle".to_owned()];
    call_args.extend(call.args.iter().map(|arg| arg.name().to_owned()));
    writeln!(sink, "  caml_enter_blocking_section ();").ok();
    writeln!(sink, "  r = guestfs_{name} ({});", call_args.join(", ")).ok();
    writeln!(sink, "  caml_leave_blocking_section ();").ok();
    let marker = match call.ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => "-1",
        _ => "NULL",
    };
    writeln!(sink, "  if (r == {marker})").ok();
    writeln!(sink, "    ocaml_guestfs_raise_error (handle, \"{name}\");").ok();
    writeln!(sink).ok();
    match call.ret {
        Ret::Err => {
            writeln!(sink, "  rv = Val_unit;").ok();
        }
        Ret::Int(_) => {
            writeln!(sink, "  rv = Val_int (r);").ok();
        }
        Ret::Bool(_) => {
            writeln!(sink, "  rv = Val_bool (r);").ok();
        }
        Ret::ConstString(_) => {
            writeln!(sink, "  rv = caml_copy_string (r);").ok();
        }
        Ret::String(_) => {
            writeln!(sink, "  rv = caml_copy_string (r);").ok();
            writeln!(sink, "  free (r);").ok();
        }
        Ret::StringList(_) => {
            writeln!(sink, "  rv = caml_copy_string_array ((const char **) r);").ok();
            writeln!(sink, "  for (i = 0; r[i] != NULL; ++i) free (r[i]);").ok();
            writeln!(sink, "  free (r);").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(sink, "  rv = caml_alloc (2, 0);").ok();
            writeln!(sink, "  Store_field (rv, 0, Val_int (r->i));").ok();
            writeln!(sink, "  Store_field (rv, 1, Val_bool (r->b));").ok();
            writeln!(sink, "  guestfs_free_int_bool (r);").ok();
        }
        Ret::PvList(_) => {
            writeln!(sink, "  rv = copy_lvm_pv_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_pv_list (r);").ok();
        }
        Ret::VgList(_) => {
            writeln!(sink, "  rv = copy_lvm_vg_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_vg_list (r);").ok();
        }
        Ret::LvList(_) => {
            writeln!(sink, "  rv = copy_lvm_lv_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_lv_list (r);").ok();
        }
    }
    writeln!(sink, "  CAMLreturn (rv);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}
