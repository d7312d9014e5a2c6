// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the client-side action stubs that marshal calls over the wire.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, Call, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::ctype::{error_marker, format_prototype, ProtoOpts};
use crate::codegen::sink::Sink;
use std::fmt::Write as _;

pub fn emit(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    writeln!(sink, "#include <stdio.h>").ok();
    writeln!(sink, "#include <stdlib.h>").ok();
    writeln!(sink, "#include <string.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include \"guestfs.h\"").ok();
    writeln!(sink, "#include \"guestfs_protocol.h\"").ok();
    writeln!(sink).ok();
    writeln!(sink, "#define error guestfs_error").ok();
    writeln!(sink, "#define perrorf guestfs_perrorf").ok();
    writeln!(sink, "#define safe_malloc guestfs_safe_malloc").ok();
    writeln!(sink, "#define safe_realloc guestfs_safe_realloc").ok();
    writeln!(sink, "#define safe_strdup guestfs_safe_strdup").ok();
    writeln!(sink, "#define safe_memdup guestfs_safe_memdup").ok();
    writeln!(sink).ok();
    writeln!(sink, "/* Check the return message from a call for validity. */").ok();
    writeln!(sink, "static int").ok();
    writeln!(sink, "check_reply_header (guestfs_h *handle,").ok();
    writeln!(sink, "                    const struct guestfs_message_header *hdr,").ok();
    writeln!(sink, "                    int proc_nr, int serial)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  if (hdr->prog != GUESTFS_PROGRAM) {{").ok();
    writeln!(sink, "    error (handle, \"wrong program (%d/%d)\", hdr->prog, GUESTFS_PROGRAM);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (hdr->vers != GUESTFS_PROTOCOL_VERSION) {{").ok();
    writeln!(sink, "    error (handle, \"wrong protocol version (%d/%d)\",").ok();
    writeln!(sink, "           hdr->vers, GUESTFS_PROTOCOL_VERSION);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (hdr->direction != GUESTFS_DIRECTION_REPLY) {{").ok();
    writeln!(sink, "    error (handle, \"unexpected message direction (%d/%d)\",").ok();
    writeln!(sink, "           hdr->direction, GUESTFS_DIRECTION_REPLY);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (hdr->proc != proc_nr) {{").ok();
    writeln!(sink, "    error (handle, \"unexpected procedure number (%d/%d)\", hdr->proc, proc_nr);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (hdr->serial != serial) {{").ok();
    writeln!(sink, "    error (handle, \"unexpected serial number (%d/%d)\", hdr->serial, serial);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "  return 0;").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();

    for call in model.daemon_calls() {
        emit_reply_vessel(call, sink);
        emit_reply_callback(call, sink);
        emit_stub(call, sink);
    }
}

/// Holds everything the reply callback parses for one outstanding call.
fn emit_reply_vessel(call: &Call, sink: &mut Sink) {
    writeln!(sink, "struct {}_rv {{", call.name).ok();
    writeln!(sink, "  int cb_done;  /* flag to indicate callback was called */").ok();
    writeln!(sink, "  struct guestfs_message_header hdr;").ok();
    writeln!(sink, "  struct guestfs_message_error err;").ok();
    if matches!(call.ret, Ret::Err) {
        writeln!(sink, "  /* no return value */").ok();
    } else {
        writeln!(sink, "  struct guestfs_{}_ret ret;", call.name).ok();
    }
    writeln!(sink, "}};").ok();
    writeln!(sink).ok();
}

fn emit_reply_callback(call: &Call, sink: &mut Sink) {
    let name = call.name;
    writeln!(sink, "static void {name}_cb (guestfs_h *handle, void *data, XDR *xdr)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  struct {name}_rv *rv = (struct {name}_rv *) data;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  if (!xdr_guestfs_message_header (xdr, &rv->hdr)) {{").ok();
    writeln!(sink, "    error (handle, \"%s: failed to parse reply header\", \"guestfs_{name}\");").ok();
    writeln!(sink, "    return;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (rv->hdr.status == GUESTFS_STATUS_ERROR) {{").ok();
    writeln!(sink, "    if (!xdr_guestfs_message_error (xdr, &rv->err)) {{").ok();
    writeln!(sink, "      error (handle, \"%s: failed to parse reply error\", \"guestfs_{name}\");").ok();
    writeln!(sink, "      return;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink, "    goto done;").ok();
    writeln!(sink, "  }}").ok();
    if !matches!(call.ret, Ret::Err) {
        writeln!(sink, "  if (!xdr_guestfs_{name}_ret (xdr, &rv->ret)) {{").ok();
        writeln!(sink, "    error (handle, \"%s: failed to parse reply\", \"guestfs_{name}\");").ok();
        writeln!(sink, "    return;").ok();
        writeln!(sink, "  }}").ok();
    }
    writeln!(sink, " done:").ok();
    writeln!(sink, "  rv->cb_done = 1;").ok();
    writeln!(sink, "  main_loop.main_loop_quit (handle);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_stub(call: &Call, sink: &mut Sink) {
    let name = call.name;
    let marker = error_marker(call.ret);
    let opts = ProtoOpts {
        newline: true,
        handle: Some("handle"),
        ..ProtoOpts::default()
    };
    sink.push_str(&format_prototype(call, &opts));
    writeln!(sink, "{{").ok();
    if !call.args.is_empty() {
        writeln!(sink, "  struct guestfs_{name}_args args;").ok();
    }
    writeln!(sink, "  struct {name}_rv rv;").ok();
    writeln!(sink, "  int serial;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  if (handle->state != READY) {{").ok();
    writeln!(sink, "    error (handle, \"guestfs_{name} called from the wrong state, %d != READY\",").ok();
    writeln!(sink, "           handle->state);").ok();
    writeln!(sink, "    return {marker};").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "  memset (&rv, 0, sizeof rv);").ok();
    writeln!(sink).ok();
    if call.args.is_empty() {
        writeln!(sink, "  serial = dispatch (handle, {}, NULL, NULL);", call.proc_const()).ok();
    } else {
        for arg in &call.args {
            match arg {
                Arg::Str(arg_name) => {
                    writeln!(sink, "  args.{arg_name} = (char *) {arg_name};").ok();
                }
                Arg::OptStr(arg_name) => {
                    writeln!(
                        sink,
                        "  args.{arg_name} = {arg_name} ? (char **) &{arg_name} : NULL;"
                    )
                    .ok();
                }
                Arg::Bool(arg_name) | Arg::Int(arg_name) => {
                    writeln!(sink, "  args.{arg_name} = {arg_name};").ok();
                }
            }
        }
        writeln!(sink, "  serial = dispatch (handle, {},", call.proc_const()).ok();
        writeln!(
            sink,
            "                     (xdrproc_t) xdr_guestfs_{name}_args, (char *) &args);"
        )
        .ok();
    }
    writeln!(sink, "  if (serial == -1)").ok();
    writeln!(sink, "    return {marker};").ok();
    writeln!(sink).ok();
    writeln!(sink, "  rv.cb_done = 0;").ok();
    writeln!(sink, "  handle->reply_cb_internal = {name}_cb;").ok();
    writeln!(sink, "  handle->reply_cb_internal_data = &rv;").ok();
    writeln!(sink, "  main_loop.main_loop_run (handle);").ok();
    writeln!(sink, "  handle->reply_cb_internal = NULL;").ok();
    writeln!(sink, "  handle->reply_cb_internal_data = NULL;").ok();
    writeln!(sink, "  if (!rv.cb_done) {{").ok();
    writeln!(sink, "    error (handle, \"guestfs_{name} failed, see earlier error messages\");").ok();
    writeln!(sink, "    return {marker};").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(
        sink,
        "  if (check_reply_header (handle, &rv.hdr, {}, serial) == -1)",
        call.proc_const()
    )
    .ok();
    writeln!(sink, "    return {marker};").ok();
    writeln!(sink).ok();
    writeln!(sink, "  if (rv.hdr.status == GUESTFS_STATUS_ERROR) {{").ok();
    writeln!(sink, "    error (handle, \"%s\", rv.err.error);").ok();
    writeln!(sink, "    return {marker};").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    match call.ret {
        Ret::Err => {
            writeln!(sink, "  return 0;").ok();
        }
        Ret::Int(field) | Ret::Bool(field) => {
            writeln!(sink, "  return rv.ret.{field};").ok();
        }
        Ret::ConstString(_) => {
            // Rejected by the validator before emission starts.
        }
        Ret::String(field) => {
            writeln!(sink, "  return rv.ret.{field}; /* caller will free */").ok();
        }
        Ret::StringList(field) => {
            writeln!(sink, "  /* caller will free this, but we need to add a NULL entry */").ok();
            writeln!(sink, "  rv.ret.{field}.{field}_val =").ok();
            writeln!(sink, "    safe_realloc (handle, rv.ret.{field}.{field}_val,").ok();
            writeln!(
                sink,
                "                  sizeof (char *) * (rv.ret.{field}.{field}_len + 1));"
            )
            .ok();
            writeln!(sink, "  rv.ret.{field}.{field}_val[rv.ret.{field}.{field}_len] = NULL;").ok();
            writeln!(sink, "  return rv.ret.{field}.{field}_val;").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(sink, "  /* caller will free this */").ok();
            writeln!(sink, "  return safe_memdup (handle, &rv.ret, sizeof (rv.ret));").ok();
        }
        Ret::PvList(field) | Ret::VgList(field) | Ret::LvList(field) => {
            writeln!(sink, "  /* caller will free this */").ok();
            writeln!(
                sink,
                "  return safe_memdup (handle, &rv.ret.{field}, sizeof (rv.ret.{field}));"
            )
            .ok();
        }
    }
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}
