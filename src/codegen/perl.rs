// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Emit the Perl binding: XS stub module and documentation module.
// Author: Lukas Bower

use crate::api::{ApiModel, Arg, Call, ColKind, Ret};
use crate::codegen::banner::{self, CommentStyle, Licence};
use crate::codegen::sink::Sink;
use crate::codegen::PROTOCOL_LIMIT_WARNING;
use std::fmt::Write as _;

pub fn emit_xs(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::CStyle, Licence::Lgpl);

    writeln!(sink, "#include \"EXTERN.h\"").ok();
    writeln!(sink, "#include \"perl.h\"").ok();
    writeln!(sink, "#include \"XSUB.h\"").ok();
    writeln!(sink).ok();
    writeln!(sink, "#include <guestfs.h>").ok();
    writeln!(sink).ok();
    writeln!(sink, "#ifndef PRId64").ok();
    writeln!(sink, "#define PRId64 \"lld\"").ok();
    writeln!(sink, "#endif").ok();
    writeln!(sink).ok();
    writeln!(sink, "static SV *").ok();
    writeln!(sink, "my_newSVll (long long val) {{").ok();
    writeln!(sink, "#ifdef USE_64_BIT_ALL").ok();
    writeln!(sink, "  return newSViv (val);").ok();
    writeln!(sink, "#else").ok();
    writeln!(sink, "  char buf[100];").ok();
    writeln!(sink, "  int len;").ok();
    writeln!(sink, "  len = snprintf (buf, 100, \"%\" PRId64, val);").ok();
    writeln!(sink, "  return newSVpv (buf, len);").ok();
    writeln!(sink, "#endif").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
    writeln!(sink, "#ifndef PRIu64").ok();
    writeln!(sink, "#define PRIu64 \"llu\"").ok();
    writeln!(sink, "#endif").ok();
    writeln!(sink).ok();
    writeln!(sink, "static SV *").ok();
    writeln!(sink, "my_newSVull (unsigned long long val) {{").ok();
    writeln!(sink, "#ifdef USE_64_BIT_ALL").ok();
    writeln!(sink, "  return newSVuv (val);").ok();
    writeln!(sink, "#else").ok();
    writeln!(sink, "  char buf[100];").ok();
    writeln!(sink, "  int len;").ok();
    writeln!(sink, "  len = snprintf (buf, 100, \"%\" PRIu64, val);").ok();
    writeln!(sink, "  return newSVpv (buf, len);").ok();
    writeln!(sink, "#endif").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
    writeln!(sink, "/* Not thread-safe: one error slot shared by every handle. */").ok();
    writeln!(sink, "static char *last_error = NULL;").ok();
    writeln!(sink).ok();
    writeln!(sink, "static void").ok();
    writeln!(sink, "error_handler (guestfs_h *handle,").ok();
    writeln!(sink, "               void *data,").ok();
    writeln!(sink, "               const char *msg)").ok();
    writeln!(sink, "{{").ok();
    writeln!(sink, "  if (last_error != NULL) free (last_error);").ok();
    writeln!(sink, "  last_error = strdup (msg);").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();
    writeln!(sink, "MODULE = Sys::Guestfs  PACKAGE = Sys::Guestfs").ok();
    writeln!(sink).ok();
    writeln!(sink, "guestfs_h *").ok();
    writeln!(sink, "_create ()").ok();
    writeln!(sink, "   CODE:").ok();
    writeln!(sink, "      RETVAL = guestfs_create ();").ok();
    writeln!(sink, "      if (!RETVAL)").ok();
    writeln!(sink, "        croak (\"could not create guestfs handle\");").ok();
    writeln!(sink, "      guestfs_set_error_handler (RETVAL, error_handler, NULL);").ok();
    writeln!(sink, " OUTPUT:").ok();
    writeln!(sink, "      RETVAL").ok();
    writeln!(sink).ok();
    writeln!(sink, "void").ok();
    writeln!(sink, "DESTROY (g)").ok();
    writeln!(sink, "      guestfs_h *g;").ok();
    writeln!(sink, " PPCODE:").ok();
    writeln!(sink, "      guestfs_close (g);").ok();
    writeln!(sink).ok();

    for call in &model.calls {
        emit_xs_stub(model, call, sink);
    }
}

fn xs_arg_decls(call: &Call, sink: &mut Sink) {
    writeln!(sink, "      guestfs_h *g;").ok();
    for (index, arg) in call.args.iter().enumerate() {
        let arg_name = arg.name();
        match arg {
            Arg::Str(_) => {
                writeln!(sink, "      char *{arg_name};").ok();
            }
            Arg::OptStr(_) => {
                writeln!(
                    sink,
                    "      char *{arg_name} = SvOK(ST({})) ? SvPV_nolen(ST({})) : NULL;",
                    index + 1,
                    index + 1
                )
                .ok();
            }
            Arg::Bool(_) | Arg::Int(_) => {
                writeln!(sink, "      int {arg_name};").ok();
            }
        }
    }
}

fn xs_params(call: &Call) -> String {
    let mut params = vec!["g".to_owned()];
    params.extend(call.args.iter().map(|arg| arg.name().to_owned()));
    params.join(", ")
}

fn emit_xs_stub(model: &ApiModel, call: &Call, sink: &mut Sink) {
    let name = call.name;
    let params = xs_params(call);

    match call.ret {
        Ret::Err => {
            writeln!(sink, "void").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, " PPCODE:").ok();
            writeln!(sink, "      if (guestfs_{name} ({params}) == -1)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
        }
        Ret::Int(field) | Ret::Bool(field) => {
            writeln!(sink, "SV *").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, "PREINIT:").ok();
            writeln!(sink, "      int {field};").ok();
            writeln!(sink, "   CODE:").ok();
            writeln!(sink, "      {field} = guestfs_{name} ({params});").ok();
            writeln!(sink, "      if ({field} == -1)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
            writeln!(sink, "      RETVAL = newSViv ({field});").ok();
            writeln!(sink, " OUTPUT:").ok();
            writeln!(sink, "      RETVAL").ok();
        }
        Ret::ConstString(field) => {
            writeln!(sink, "SV *").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, "PREINIT:").ok();
            writeln!(sink, "      const char *{field};").ok();
            writeln!(sink, "   CODE:").ok();
            writeln!(sink, "      {field} = guestfs_{name} ({params});").ok();
            writeln!(sink, "      if ({field} == NULL)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
            writeln!(sink, "      RETVAL = newSVpv ({field}, 0);").ok();
            writeln!(sink, " OUTPUT:").ok();
            writeln!(sink, "      RETVAL").ok();
        }
        Ret::String(field) => {
            writeln!(sink, "SV *").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, "PREINIT:").ok();
            writeln!(sink, "      char *{field};").ok();
            writeln!(sink, "   CODE:").ok();
            writeln!(sink, "      {field} = guestfs_{name} ({params});").ok();
            writeln!(sink, "      if ({field} == NULL)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
            writeln!(sink, "      RETVAL = newSVpv ({field}, 0);").ok();
            writeln!(sink, "      free ({field});").ok();
            writeln!(sink, " OUTPUT:").ok();
            writeln!(sink, "      RETVAL").ok();
        }
        Ret::StringList(field) => {
            writeln!(sink, "void").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, "PREINIT:").ok();
            writeln!(sink, "      char **{field};").ok();
            writeln!(sink, "      int i, n;").ok();
            writeln!(sink, " PPCODE:").ok();
            writeln!(sink, "      {field} = guestfs_{name} ({params});").ok();
            writeln!(sink, "      if ({field} == NULL)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
            writeln!(sink, "      for (n = 0; {field}[n] != NULL; ++n) /**/;").ok();
            writeln!(sink, "      EXTEND (SP, n);").ok();
            writeln!(sink, "      for (i = 0; i < n; ++i) {{").ok();
            writeln!(sink, "        PUSHs (sv_2mortal (newSVpv ({field}[i], 0)));").ok();
            writeln!(sink, "        free ({field}[i]);").ok();
            writeln!(sink, "      }}").ok();
            writeln!(sink, "      free ({field});").ok();
        }
        Ret::IntBool(_, _) => {
            writeln!(sink, "void").ok();
            writeln!(sink, "{name} ({params})").ok();
            xs_arg_decls(call, sink);
            writeln!(sink, "PREINIT:").ok();
            writeln!(sink, "      struct guestfs_int_bool *r;").ok();
            writeln!(sink, " PPCODE:").ok();
            writeln!(sink, "      r = guestfs_{name} ({params});").ok();
            writeln!(sink, "      if (r == NULL)").ok();
            writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
            writeln!(sink, "      EXTEND (SP, 2);").ok();
            writeln!(sink, "      PUSHs (sv_2mortal (newSViv (r->i)));").ok();
            writeln!(sink, "      PUSHs (sv_2mortal (newSViv (r->b)));").ok();
            writeln!(sink, "      guestfs_free_int_bool (r);").ok();
        }
        Ret::PvList(field) => emit_xs_record_list(model, call, sink, "pv", field),
        Ret::VgList(field) => emit_xs_record_list(model, call, sink, "vg", field),
        Ret::LvList(field) => emit_xs_record_list(model, call, sink, "lv", field),
    }
    writeln!(sink).ok();
}

/// Push one hashref per record onto the Perl stack, one key per column.
fn emit_xs_record_list(model: &ApiModel, call: &Call, sink: &mut Sink, kind: &str, field: &str) {
    let name = call.name;
    let params = xs_params(call);
    let record = model.record(kind);

    writeln!(sink, "void").ok();
    writeln!(sink, "{name} ({params})").ok();
    xs_arg_decls(call, sink);
    writeln!(sink, "PREINIT:").ok();
    writeln!(sink, "      struct guestfs_lvm_{kind}_list *{field};").ok();
    writeln!(sink, "      int i;").ok();
    writeln!(sink, "      HV *hv;").ok();
    writeln!(sink, " PPCODE:").ok();
    writeln!(sink, "      {field} = guestfs_{name} ({params});").ok();
    writeln!(sink, "      if ({field} == NULL)").ok();
    writeln!(sink, "        croak (\"{name}: %s\", last_error);").ok();
    writeln!(sink, "      EXTEND (SP, {field}->len);").ok();
    writeln!(sink, "      for (i = 0; i < {field}->len; ++i) {{").ok();
    writeln!(sink, "        hv = newHV ();").ok();
    for (col, col_kind) in &record.cols {
        let key_len = col.len();
        let value = match col_kind {
            ColKind::Str => format!("newSVpv ({field}->val[i].{col}, 0)"),
            ColKind::Uuid => format!("newSVpv ({field}->val[i].{col}, 32)"),
            ColKind::Bytes => format!("my_newSVull ({field}->val[i].{col})"),
            ColKind::Int => format!("my_newSVll ({field}->val[i].{col})"),
            ColKind::OptPercent => format!("newSVnv ({field}->val[i].{col})"),
        };
        writeln!(
            sink,
            "        (void) hv_store (hv, \"{col}\", {key_len}, {value}, 0);"
        )
        .ok();
    }
    writeln!(sink, "        PUSHs (sv_2mortal (newRV ((SV *) hv)));").ok();
    writeln!(sink, "      }}").ok();
    writeln!(sink, "      guestfs_free_lvm_{kind}_list ({field});").ok();
}

pub fn emit_pm(model: &ApiModel, sink: &mut Sink) {
    banner::emit(sink, CommentStyle::HashStyle, Licence::Lgpl);

    writeln!(sink, "=pod").ok();
    writeln!(sink).ok();
    writeln!(sink, "=head1 NAME").ok();
    writeln!(sink).ok();
    writeln!(sink, "Sys::Guestfs - Perl bindings for libguestfs").ok();
    writeln!(sink).ok();
    writeln!(sink, "=head1 SYNOPSIS").ok();
    writeln!(sink).ok();
    writeln!(sink, " use Sys::Guestfs;").ok();
    writeln!(sink).ok();
    writeln!(sink, " my $h = Sys::Guestfs->new ();").ok();
    writeln!(sink, " $h->add_drive ('guest.img');").ok();
    writeln!(sink, " $h->launch ();").ok();
    writeln!(sink, " $h->wait_ready ();").ok();
    writeln!(sink, " $h->mount ('/dev/sda1', '/');").ok();
    writeln!(sink, " $h->touch ('/hello');").ok();
    writeln!(sink, " $h->sync ();").ok();
    writeln!(sink).ok();
    writeln!(sink, "=head1 DESCRIPTION").ok();
    writeln!(sink).ok();
    writeln!(sink, "The C<Sys::Guestfs> module provides a Perl XS binding to the").ok();
    writeln!(sink, "libguestfs API for examining and modifying virtual machine").ok();
    writeln!(sink, "disk images.").ok();
    writeln!(sink).ok();
    writeln!(sink, "Errors which happen while using the module are turned into").ok();
    writeln!(sink, "Perl exceptions (see L<perlfunc/die>).").ok();
    writeln!(sink).ok();
    writeln!(sink, "=head1 METHODS").ok();
    writeln!(sink).ok();
    writeln!(sink, "=over 4").ok();
    writeln!(sink).ok();
    writeln!(sink, "=cut").ok();
    writeln!(sink).ok();
    writeln!(sink, "package Sys::Guestfs;").ok();
    writeln!(sink).ok();
    writeln!(sink, "use strict;").ok();
    writeln!(sink, "use warnings;").ok();
    writeln!(sink).ok();
    writeln!(sink, "require XSLoader;").ok();
    writeln!(sink, "XSLoader::load ('Sys::Guestfs');").ok();
    writeln!(sink).ok();
    writeln!(sink, "=item $h = Sys::Guestfs->new ();").ok();
    writeln!(sink).ok();
    writeln!(sink, "Create a new guestfs handle.").ok();
    writeln!(sink).ok();
    writeln!(sink, "=cut").ok();
    writeln!(sink).ok();
    writeln!(sink, "sub new {{").ok();
    writeln!(sink, "  my $proto = shift;").ok();
    writeln!(sink, "  my $class = ref ($proto) || $proto;").ok();
    writeln!(sink).ok();
    writeln!(sink, "  my $self = Sys::Guestfs::_create ();").ok();
    writeln!(sink, "  bless $self, $class;").ok();
    writeln!(sink, "  return $self;").ok();
    writeln!(sink, "}}").ok();
    writeln!(sink).ok();

    for call in model.sorted_calls() {
        writeln!(sink, "=item {};", perl_convention(call)).ok();
        writeln!(sink).ok();
        writeln!(sink, "{}", call.description).ok();
        if call.protocol_limit_warning() {
            writeln!(sink).ok();
            writeln!(sink, "{PROTOCOL_LIMIT_WARNING}").ok();
        }
        writeln!(sink).ok();
    }

    writeln!(sink, "=back").ok();
    writeln!(sink).ok();
    writeln!(sink, "=cut").ok();
    writeln!(sink).ok();
    writeln!(sink, "1;").ok();
    writeln!(sink).ok();
    writeln!(sink, "=head1 SEE ALSO").ok();
    writeln!(sink).ok();
    writeln!(sink, "L<guestfs(3)>, L<guestfish(1)>.").ok();
    writeln!(sink).ok();
    writeln!(sink, "=cut").ok();
}

/// The Perl calling convention shown in the POD reference.
fn perl_convention(call: &Call) -> String {
    let args = call
        .args
        .iter()
        .map(|arg| format!("${}", arg.name()))
        .collect::<Vec<_>>()
        .join(", ");
    let invocation = format!("$h->{} ({})", call.name, args);
    match call.ret {
        Ret::Err => invocation,
        Ret::Int(field) | Ret::Bool(field) => format!("${field} = {invocation}"),
        Ret::ConstString(field) | Ret::String(field) => format!("${field} = {invocation}"),
        Ret::StringList(field) => format!("@{field} = {invocation}"),
        Ret::IntBool(int_field, bool_field) => {
            format!("(${int_field}, ${bool_field}) = {invocation}")
        }
        Ret::PvList(field) | Ret::VgList(field) | Ret::LvList(field) => {
            format!("@{field} = {invocation}")
        }
    }
}
