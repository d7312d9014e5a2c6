// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the interactive shell's command table, help and dispatcher.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, Call, ColKind, RecordSchema, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::ctype::{c_quote, fishify};
use crate::codegen::sink::Sink;
use crate::codegen::{fish_synopsis, PROTOCOL_LIMIT_WARNING};
use std::fmt::Write as _;

pub fn emit(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Gpl);

    writeln!(sink, "#include <stdio.h>").ok();
    writeln!(sink, "#include <stdlib.h>").ok();
    writeln!(sink, "#include <string.h>").ok();
    writeln!(sink, "#include <inttypes.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include \"fish.h\"").ok();
    writeln!(sink).ok();

    emit_list_commands(model, sink);
    emit_display_command(model, sink);
    for record in &model.records {
        emit_record_printers(record, sink);
    }
    for call in model.fish_calls_sorted() {
        emit_runner(call, sink);
    }
    emit_run_action(model, sink);
}

/// Every spelling the shell accepts for this command, compared
/// case-insensitively: public name, hyphenated name, alias.
fn match_condition(call: &Call) -> String {
    let mut conds = vec![format!("strcasecmp (cmd, \"{}\") == 0", call.name)];
    let fish_name = call.fish_name();
    if fish_name != call.name {
        conds.push(format!("strcasecmp (cmd, \"{fish_name}\") == 0"));
    }
    if let Some(alias) = call.fish_alias() {
        conds.push(format!("strcasecmp (cmd, \"{alias}\") == 0"));
    }
    conds.join(" || ")
}

fn emit_list_commands(model: &ApiModel, sink: &mut Sink) {
    writeln!(sink, "void list_commands (void)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  printf (\"    %-16s     %s\\n\", \"Command\", \"Description\");").ok();
    writeln!(sink, "  list_builtin_commands ();").ok();
    for call in model.fish_calls_sorted() {
        writeln!(
            sink,
            "  printf (\"%-20s %s\\n\", \"{}\", \"{}\");",
            call.fish_name(),
            c_quote(call.summary)
        )
        .ok();
    }
    writeln!(
        sink,
        "  printf (\"    Use -h <cmd> / help <cmd> to show detailed help for a command.\\n\");"
    )
    .ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_display_command(model: &ApiModel, sink: &mut Sink) {
    writeln!(sink, "void display_command (const char *cmd)").ok();
    writeln!(sink, "{{").ok();
    for call in model.fish_calls_sorted() {
        let mut body = format!("{}\n\n{}", fish_synopsis(call), fishify(call.description));
        if call.protocol_limit_warning() {
            body.push_str("\n\n");
            body.push_str(PROTOCOL_LIMIT_WARNING);
        }
        if let Some(alias) = call.fish_alias() {
            body.push_str(&format!(
                "\n\nYou can use '{alias}' as an alias for this command."
            ));
        }
        writeln!(sink, "  if ({})", match_condition(call)).ok();
        writeln!(
            sink,
            "    pod2text (\"{} - {}\", \" {}\");",
            call.fish_name(),
            c_quote(call.summary),
            c_quote(&body)
        )
        .ok();
        writeln!(sink, "  else").ok();
    }
    writeln!(sink, "    display_builtin_command (cmd);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_record_printers(record: &RecordSchema, sink: &mut Sink) {
    let kind = record.kind;
    let public = record.public_name();

    writeln!(sink, "static void print_{kind} (struct {public} *{kind})").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  int i;").ok();
    writeln!(sink).ok();
    for (col, col_kind) in &record.cols {
        match col_kind {
            ColKind::Str => {
                writeln!(sink, "  printf (\"{col}: %s\\n\", {kind}->{col});").ok();
            }
            ColKind::Uuid => {
                writeln!(sink, "  printf (\"{col}: \");").ok();
                writeln!(sink, "  for (i = 0; i < 32; ++i)").ok();
                writeln!(sink, "    printf (\"%c\", {kind}->{col}[i]);").ok();
                writeln!(sink, "  printf (\"\\n\");").ok();
            }
            ColKind::Bytes => {
                writeln!(sink, "  printf (\"{col}: %\" PRIu64 \"\\n\", {kind}->{col});").ok();
            }
            ColKind::Int => {
                writeln!(sink, "  printf (\"{col}: %\" PRIi64 \"\\n\", {kind}->{col});").ok();
            }
            ColKind::OptPercent => {
                writeln!(
                    sink,
                    "  if ({kind}->{col} >= 0) printf (\"{col}: %g %%\\n\", {kind}->{col});"
                )
                .ok();
                writeln!(sink, "  else printf (\"{col}: \\n\");").ok();
            }
        }
    }
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
    writeln!(
        sink,
        "static void print_{kind}_list (struct {public}_list *{kind}s)"
    )
    .ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  int i;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  for (i = 0; i < {kind}s->len; ++i)").ok();
    writeln!(sink, "    print_{kind} (&{kind}s->val[i]);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_runner(call: &Call, sink: &mut Sink) {
    let name = call.name;
    writeln!(sink, "static int run_{name} (const char *cmd, int argc, char *argv[])").ok();
    writeln!(sink, "{{").ok();

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
    writeln!(sink).ok();
    writeln!(sink, "  if (argc != {}) {{", call.args.len()).ok();
    writeln!(
        sink,
        "    fprintf (stderr, \"%s should have {} parameter(s)\\n\", cmd);",
        call.args.len()
    )
    .ok();
    writeln!(sink, "    fprintf (stderr, \"type 'help %s' for help on %s\\n\", cmd, cmd);").ok();
    writeln!(sink, "    return -1;").ok();
    writeln!(sink, "  }}").ok();
    for (index, arg) in call.args.iter().enumerate() {
        match arg {
            Arg::Str(arg_name) => {
                writeln!(sink, "  {arg_name} = argv[{index}];").ok();
            }
            Arg::OptStr(arg_name) => {
                writeln!(
                    sink,
                    "  {arg_name} = strcmp (argv[{index}], \"\") != 0 ? argv[{index}] : NULL;"
                )
                .ok();
            }
            Arg::Bool(arg_name) => {
                writeln!(sink, "  {arg_name} = is_true (argv[{index}]) ? 1 : 0;").ok();
            }
            Arg::Int(arg_name) => {
                writeln!(sink, "  {arg_name} = atoi (argv[{index}]);").ok();
            }
        }
    }

    let arg_list = call
        .args
        .iter()
        .map(|arg| arg.name().to_owned())
        .collect::<Vec<_>>();
    let invocation = match call.fish_action() {
        Some(action) => {
            let mut params = vec!["g".to_owned()];
            params.extend(arg_list);
            format!("{action} ({})", params.join(", "))
        }
        None => {
            let mut params = vec!["g".to_owned()];
            params.extend(arg_list);
            format!("guestfs_{name} ({})", params.join(", "))
        }
    };
    writeln!(sink, "  r = {invocation};").ok();
    match call.ret {
        Ret::Err => {
            writeln!(sink, "  return r;").ok();
        }
        Ret::Int(_) => {
            writeln!(sink, "  if (r == -1) return -1;").ok();
            writeln!(sink, "  printf (\"%d\\n\", r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::Bool(_) => {
            writeln!(sink, "  if (r == -1) return -1;").ok();
            writeln!(sink, "  printf (\"%s\\n\", r ? \"true\" : \"false\");").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::ConstString(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  printf (\"%s\\n\", r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::String(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  printf (\"%s\\n\", r);").ok();
            writeln!(sink, "  free (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::StringList(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  print_strings (r);").ok();
            writeln!(sink, "  free_strings (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  printf (\"%d, %s\\n\", r->i, r->b ? \"true\" : \"false\");").ok();
            writeln!(sink, "  guestfs_free_int_bool (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::PvList(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  print_pv_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_pv_list (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::VgList(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  print_vg_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_vg_list (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
        Ret::LvList(_) => {
            writeln!(sink, "  if (r == NULL) return -1;").ok();
            writeln!(sink, "  print_lv_list (r);").ok();
            writeln!(sink, "  guestfs_free_lvm_lv_list (r);").ok();
            writeln!(sink, "  return 0;").ok();
        }
    }
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
}

fn emit_run_action(model: &ApiModel, sink: &mut Sink) {
    writeln!(sink, "int run_action (const char *cmd, int argc, char *argv[])").ok();
    writeln!(sink, "{{").ok();
    for call in model.fish_calls_sorted() {
        writeln!(sink, "  if ({})", match_condition(call)).ok();
        writeln!(sink, "    return run_{} (cmd, argc, argv);", call.name).ok();
        writeln!(sink, "  else").ok();
    }
    writeln!(sink, "    {{").ok();
    writeln!(sink, "      fprintf (stderr, \"%s: unknown command\\n\", cmd);").ok();
    writeln!(sink, "      return -1;").ok();
    writeln!(sink, "    }}").ok();
    writeln!(sink, "}}").ok();
}
