// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the daemon action header, dispatch stubs and LVM tokenizers.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, Call, ColKind, RecordSchema, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::ctype::{format_prototype, ProtoOpts};
use crate::codegen::sink::Sink;
use std::fmt::Write as _;

/// One do_<name> prototype per daemon call.
pub fn emit_header(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Gpl);

    writeln!(sink, "#include \"../src/guestfs_protocol.h\"").ok();
    writeln!(sink).ok();
    let opts = ProtoOpts {
        is_extern: true,
        semicolon: true,
        single_line: true,
        newline: true,
        in_daemon: true,
        prefix: "do_",
        ..ProtoOpts::default()
    };
    for call in model.daemon_calls() {
        sink.push_str(&format_prototype(call, &opts));
    }
}

pub fn emit_stubs(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Gpl);

    writeln!(sink, "#include <rpc/types.h>").ok();
    writeln!(sink, "#include <rpc/xdr.h>").ok();
    writeln!(sink, "#include <stdio.h>").ok();
    writeln!(sink, "#include <stdlib.h>").ok();
    writeln!(sink, "#include <string.h>").ok();
    writeln!(sink, "#include <ctype.h>").ok();
    writeln!(sink, "#include <inttypes.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include \"daemon.h\"").ok();
    writeln!(sink, "#include \"../src/guestfs_protocol.h\"").ok();
    writeln!(sink, "#include \"actions.h\"").ok();
    writeln!(sink).ok();

    for call in model.daemon_calls() {
        emit_stub(call, sink);
    }
    emit_dispatch(model, sink);
    for record in &model.records {
        emit_tokenizer(record, sink);
        emit_list_driver(record, sink);
    }
}

fn ret_local(call: &Call) -> &'static str {
    match call.ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => "int r;",
        Ret::ConstString(_) => "const char *r;",
        Ret::String(_) => "char *r;",
        Ret::StringList(_) => "char **r;",
        Ret::IntBool(_, _) => "",
        Ret::PvList(_) => "guestfs_lvm_int_pv_list *r;",
        Ret::VgList(_) => "guestfs_lvm_int_vg_list *r;",
        Ret::LvList(_) => "guestfs_lvm_int_lv_list *r;",
    }
}

fn emit_stub(call: &Call, sink: &mut Sink) {
    let name = call.name;
    writeln!(sink, "static void {name}_stub (XDR *xdr_in)").ok();
    writeln!(sink, "{{").ok();

    // Locals first, including the reply struct where one is needed.
    if matches!(call.ret, Ret::IntBool(_, _)) {
        writeln!(sink, "  guestfs_{name}_ret *r;").ok();
    } else {
        writeln!(sink, "  {}", ret_local(call)).ok();
    }
    if !call.args.is_empty() {
        writeln!(sink, "  struct guestfs_{name}_args args;").ok();
        for arg in &call.args {
            match arg {
                Arg::Str(arg_name) | Arg::OptStr(arg_name) => {
                    writeln!(sink, "  const char *{arg_name};").ok();
                }
                Arg::Bool(arg_name) | Arg::Int(arg_name) => {
                    writeln!(sink, "  int {arg_name};").ok();
                }
            }
        }
    }
    match call.ret {
        Ret::Err | Ret::ConstString(_) | Ret::IntBool(_, _) => {}
        _ => {
            writeln!(sink, "  struct guestfs_{name}_ret ret;").ok();
        }
    }
    writeln!(sink).ok();

    if !call.args.is_empty() {
        writeln!(sink, "  memset (&args, 0, sizeof args);").ok();
        writeln!(sink).ok();
        writeln!(sink, "  if (!xdr_guestfs_{name}_args (xdr_in, &args)) {{").ok();
        writeln!(
            sink,
            "    reply_with_error (\"%s: daemon failed to decode procedure arguments\", \"{name}\");"
        )
        .ok();
        writeln!(sink, "    return;").ok();
        writeln!(sink, "  }}").ok();
        for arg in &call.args {
            match arg {
                Arg::Str(arg_name) => {
                    writeln!(sink, "  {arg_name} = args.{arg_name};").ok();
                }
                Arg::OptStr(arg_name) => {
                    writeln!(
                        sink,
                        "  {arg_name} = args.{arg_name} ? *args.{arg_name} : NULL;"
                    )
                    .ok();
                }
                Arg::Bool(arg_name) | Arg::Int(arg_name) => {
                    writeln!(sink, "  {arg_name} = args.{arg_name};").ok();
                }
            }
        }
        writeln!(sink).ok();
    }

    let arg_list = call
        .args
        .iter()
        .map(|arg| arg.name())
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(sink, "  r = do_{name} ({arg_list});").ok();
    let marker = match call.ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => "-1",
        _ => "NULL",
    };
    writeln!(sink, "  if (r == {marker})").ok();
    writeln!(sink, "    /* do_{name} has already called reply_with_error */").ok();
    let fail_exit = if call.args.is_empty() { "return;" } else { "goto done;" };
    writeln!(sink, "    {fail_exit}").ok();
    writeln!(sink).ok();

    match call.ret {
        Ret::Err => {
            writeln!(sink, "  reply (NULL, NULL);").ok();
        }
        Ret::Int(field) | Ret::Bool(field) => {
            writeln!(sink, "  ret.{field} = r;").ok();
            writeln!(
                sink,
                "  reply ((xdrproc_t) &xdr_guestfs_{name}_ret, (char *) &ret);"
            )
            .ok();
        }
        Ret::ConstString(_) => {
            // Rejected by the validator before emission starts.
        }
        Ret::String(field) => {
            writeln!(sink, "  ret.{field} = r;").ok();
            writeln!(
                sink,
                "  reply ((xdrproc_t) &xdr_guestfs_{name}_ret, (char *) &ret);"
            )
            .ok();
            writeln!(sink, "  free (r);").ok();
        }
        Ret::StringList(field) => {
            writeln!(sink, "  ret.{field}.{field}_len = count_strings (r);").ok();
            writeln!(sink, "  ret.{field}.{field}_val = r;").ok();
            writeln!(
                sink,
                "  reply ((xdrproc_t) &xdr_guestfs_{name}_ret, (char *) &ret);"
            )
            .ok();
            writeln!(sink, "  free_strings (r);").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(
                sink,
                "  reply ((xdrproc_t) xdr_guestfs_{name}_ret, (char *) r);"
            )
            .ok();
            writeln!(
                sink,
                "  xdr_free ((xdrproc_t) xdr_guestfs_{name}_ret, (char *) r);"
            )
            .ok();
            writeln!(sink, "  free (r);").ok();
        }
        Ret::PvList(field) | Ret::VgList(field) | Ret::LvList(field) => {
            writeln!(sink, "  ret.{field} = *r;").ok();
            writeln!(sink, "  free (r);").ok();
            writeln!(
                sink,
                "  reply ((xdrproc_t) xdr_guestfs_{name}_ret, (char *) &ret);"
            )
            .ok();
            writeln!(
                sink,
                "  xdr_free ((xdrproc_t) xdr_guestfs_{name}_ret, (char *) &ret);"
            )
            .ok();
        }
    }
    if !call.args.is_empty() {
        writeln!(sink, "done:").ok();
        writeln!(
            sink,
            "  xdr_free ((xdrproc_t) xdr_guestfs_{name}_args, (char *) &args);"
        )
        .ok();
    }
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_dispatch(model: &ApiModel, sink: &mut Sink) {
    writeln!(sink, "void dispatch_incoming_message (XDR *xdr_in)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  switch (proc_nr) {{").ok();
    for call in model.daemon_calls() {
        writeln!(sink, "    case {}:", call.proc_const()).ok();
        writeln!(sink, "      {}_stub (xdr_in);", call.name).ok();
        writeln!(sink, "      break;").ok();
    }
    writeln!(sink, "    default:").ok();
    writeln!(
        sink,
        "      reply_with_error (\"dispatch_incoming_message: unknown procedure number %d\", proc_nr);"
    )
    .ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

/// Fill one wire record from a comma-separated line of lvm output. The
/// column order is the schema order; a line that is NULL, empty, starts with
/// whitespace, runs out of tokens, fails a parse, or has tokens left over is
/// rejected with its own diagnostic.
fn emit_tokenizer(record: &RecordSchema, sink: &mut Sink) {
    let kind = record.kind;
    let wire = record.wire_name();

    writeln!(sink, "static const char *lvm_{kind}_cols = \"{}\";", record.col_spec()).ok();
    writeln!(sink).ok();
    writeln!(sink, "static int lvm_tokenize_{kind} (char *str, {wire} *r)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  char *tok, *p, *next;").ok();
    writeln!(sink, "  int i, j;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  if (!str) {{").ok();
    writeln!(sink, "    fprintf (stderr, \"%s: failed: passed a NULL string\\n\", __func__);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  if (!*str || isspace (*str)) {{").ok();
    writeln!(
        sink,
        "    fprintf (stderr, \"%s: failed: passed a empty string or one beginning with whitespace\\n\", __func__);"
    )
    .ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  tok = str;").ok();

    for (col, kind_col) in &record.cols {
        writeln!(sink, "  if (!tok) {{").ok();
        writeln!(
            sink,
            "    fprintf (stderr, \"%s: failed: string finished early, around token %s\\n\", __func__, \"{col}\");"
        )
        .ok();
        writeln!(sink, "    return -1;").ok();
        writeln!(sink, "  }}").ok();
        writeln!(sink, "  p = strchrnul (tok, ',');").ok();
        writeln!(sink, "  if (*p) next = p+1; else next = NULL;").ok();
        writeln!(sink, "  *p = '\\0';").ok();
        match kind_col {
            ColKind::Str => {
                writeln!(sink, "  r->{col} = strdup (tok);").ok();
                writeln!(sink, "  if (r->{col} == NULL) {{").ok();
                writeln!(sink, "    perror (\"strdup\");").ok();
                writeln!(sink, "    return -1;").ok();
                writeln!(sink, "  }}").ok();
            }
            ColKind::Uuid => {
                writeln!(sink, "  for (i = j = 0; i < 32; ++j) {{").ok();
                writeln!(sink, "    if (tok[j] == '\\0') {{").ok();
                writeln!(
                    sink,
                    "      fprintf (stderr, \"%s: failed to parse UUID from '%s'\\n\", __func__, tok);"
                )
                .ok();
                writeln!(sink, "      return -1;").ok();
                writeln!(sink, "    }} else if (tok[j] != '-')").ok();
                writeln!(sink, "      r->{col}[i++] = tok[j];").ok();
                writeln!(sink, "  }}").ok();
            }
            ColKind::Bytes => {
                writeln!(sink, "  if (sscanf (tok, \"%\" SCNu64, &r->{col}) != 1) {{").ok();
                writeln!(
                    sink,
                    "    fprintf (stderr, \"%s: failed to parse size '%s' from token %s\\n\", __func__, tok, \"{col}\");"
                )
                .ok();
                writeln!(sink, "    return -1;").ok();
                writeln!(sink, "  }}").ok();
            }
            ColKind::Int => {
                writeln!(sink, "  if (sscanf (tok, \"%\" SCNi64, &r->{col}) != 1) {{").ok();
                writeln!(
                    sink,
                    "    fprintf (stderr, \"%s: failed to parse int '%s' from token %s\\n\", __func__, tok, \"{col}\");"
                )
                .ok();
                writeln!(sink, "    return -1;").ok();
                writeln!(sink, "  }}").ok();
            }
            ColKind::OptPercent => {
                writeln!(sink, "  if (tok[0] == '\\0')").ok();
                writeln!(sink, "    r->{col} = -1;").ok();
                writeln!(sink, "  else if (sscanf (tok, \"%f\", &r->{col}) != 1) {{").ok();
                writeln!(
                    sink,
                    "    fprintf (stderr, \"%s: failed to parse float '%s' from token %s\\n\", __func__, tok, \"{col}\");"
                )
                .ok();
                writeln!(sink, "    return -1;").ok();
                writeln!(sink, "  }}").ok();
            }
        }
        writeln!(sink, "  tok = next;").ok();
    }

    writeln!(sink, "  if (tok != NULL) {{").ok();
    writeln!(sink, "    fprintf (stderr, \"%s: failed: extra tokens at end of string\\n\", __func__);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink, "  return 0;").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

/// Run the lvm report command for one record kind and tokenize every line of
/// its output into a freshly grown wire list.
fn emit_list_driver(record: &RecordSchema, sink: &mut Sink) {
    let kind = record.kind;
    let wire = record.wire_name();
    let list = format!("{wire}_list");
    let cmd = format!("{kind}s");

    writeln!(sink, "{list} *").ok();
    writeln!(sink, "parse_command_line_{cmd} (void)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  char *out, *err;").ok();
    writeln!(sink, "  char *p, *pend;").ok();
    writeln!(sink, "  int r, i;").ok();
    writeln!(sink, "  {list} *ret;").ok();
    writeln!(sink, "  void *newp;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  ret = malloc (sizeof *ret);").ok();
    writeln!(sink, "  if (!ret) {{").ok();
    writeln!(sink, "    reply_with_perror (\"malloc\");").ok();
    writeln!(sink, "    return NULL;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "  ret->{list}_len = 0;").ok();
    writeln!(sink, "  ret->{list}_val = NULL;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  r = command (&out, &err,").ok();
    writeln!(sink, "               \"/sbin/lvm\", \"{cmd}\",").ok();
    writeln!(
        sink,
        "               \"-o\", lvm_{kind}_cols, \"--unbuffered\", \"--noheadings\","
    )
    .ok();
    writeln!(
        sink,
        "               \"--nosuffix\", \"--separator\", \",\", \"--units\", \"b\", NULL);"
    )
    .ok();
    writeln!(sink, "  if (r == -1) {{").ok();
    writeln!(sink, "    reply_with_error (\"%s\", err);").ok();
    writeln!(sink, "    free (out);").ok();
    writeln!(sink, "    free (err);").ok();
    writeln!(sink, "    free (ret);").ok();
    writeln!(sink, "    return NULL;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "  free (err);").ok();
    writeln!(sink).ok();
    writeln!(sink, "  /* Tokenize each line of the output. */").ok();
    writeln!(sink, "  p = out;").ok();
    writeln!(sink, "  i = 0;").ok();
    writeln!(sink, "  while (p) {{").ok();
    writeln!(sink, "    pend = strchr (p, '\\n');   /* Get the next line of output. */").ok();
    writeln!(sink, "    if (pend) {{").ok();
    writeln!(sink, "      *pend = '\\0';").ok();
    writeln!(sink, "      pend++;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "    while (*p && isspace (*p))  /* Skip any leading whitespace. */").ok();
    writeln!(sink, "      p++;").ok();
    writeln!(sink).ok();
    writeln!(sink, "    if (!*p) {{                 /* Empty line?  Skip it. */").ok();
    writeln!(sink, "      p = pend;").ok();
    writeln!(sink, "      continue;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "    /* Allocate some space to store this next entry. */").ok();
    writeln!(sink, "    newp = realloc (ret->{list}_val,").ok();
    writeln!(sink, "                    sizeof ({wire}) * (i+1));").ok();
    writeln!(sink, "    if (newp == NULL) {{").ok();
    writeln!(sink, "      reply_with_perror (\"realloc\");").ok();
    writeln!(sink, "      free (out);").ok();
    writeln!(sink, "      free (ret);").ok();
    writeln!(sink, "      return NULL;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink, "    ret->{list}_val = newp;").ok();
    writeln!(sink).ok();
    writeln!(sink, "    /* Tokenize the next entry. */").ok();
    writeln!(sink, "    r = lvm_tokenize_{kind} (p, &ret->{list}_val[i]);").ok();
    writeln!(sink, "    if (r == -1) {{").ok();
    writeln!(
        sink,
        "      reply_with_error (\"failed to parse output of '{cmd}' command\");"
    )
    .ok();
    writeln!(sink, "      free (out);").ok();
    writeln!(sink, "      free (ret);").ok();
    writeln!(sink, "      return NULL;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "    ++i;").ok();
    writeln!(sink, "    p = pend;").ok();
    writeln!(sink, "  }}").ok();
    writeln!(sink).ok();
    writeln!(sink, "  ret->{list}_len = i;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  free (out);").ok();
    writeln!(sink, "  return ret;").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}
