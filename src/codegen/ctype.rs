// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Format call signatures for each backend flavour.
// Author: Lukas Bower

use crate::api::{Arg, Call, Ret};
use std::fmt::Write as _;

/// Layout controls for one rendered prototype. `in_daemon` selects the wire
/// struct types for structured returns; the client sees the public structs.
#[derive(Debug, Clone, Copy)]
pub struct ProtoOpts {
    pub is_extern: bool,
    pub is_static: bool,
    pub semicolon: bool,
    pub single_line: bool,
    pub newline: bool,
    pub in_daemon: bool,
    pub prefix: &'static str,
    pub handle: Option<&'static str>,
}

impl Default for ProtoOpts {
    fn default() -> Self {
        Self {
            is_extern: false,
            is_static: false,
            semicolon: false,
            single_line: false,
            newline: false,
            in_daemon: false,
            prefix: "guestfs_",
            handle: None,
        }
    }
}

/// Render a declaration or definition head for `call`.
pub fn format_prototype(call: &Call, opts: &ProtoOpts) -> String {
    let mut out = String::new();
    if opts.is_extern {
        out.push_str("extern ");
    }
    if opts.is_static {
        out.push_str("static ");
    }
    out.push_str(&ret_c_type(call, opts.in_daemon));
    write!(out, "{}{} (", opts.prefix, call.name).ok();

    let separator = if opts.single_line { ", " } else { ",\n\t\t" };
    let mut first = true;
    if let Some(handle) = opts.handle {
        write!(out, "guestfs_h *{handle}").ok();
        first = false;
    }
    for arg in &call.args {
        if !first {
            out.push_str(separator);
        }
        first = false;
        match arg {
            Arg::Str(name) | Arg::OptStr(name) => {
                write!(out, "const char *{name}").ok();
            }
            Arg::Bool(name) | Arg::Int(name) => {
                write!(out, "int {name}").ok();
            }
        }
    }
    if first {
        out.push_str("void");
    }
    out.push(')');
    if opts.semicolon {
        out.push(';');
    }
    if opts.newline {
        out.push('\n');
    }
    out
}

/// The C spelling of a call's return type, including any trailing space or
/// pointer star, so the function name can be appended directly.
pub fn ret_c_type(call: &Call, in_daemon: bool) -> String {
    match call.ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => "int ".to_owned(),
        Ret::ConstString(_) => "const char *".to_owned(),
        Ret::String(_) => "char *".to_owned(),
        Ret::StringList(_) => "char **".to_owned(),
        Ret::IntBool(_, _) => {
            if in_daemon {
                format!("guestfs_{}_ret *", call.name)
            } else {
                "struct guestfs_int_bool *".to_owned()
            }
        }
        Ret::PvList(_) => lvm_list_type("pv", in_daemon),
        Ret::VgList(_) => lvm_list_type("vg", in_daemon),
        Ret::LvList(_) => lvm_list_type("lv", in_daemon),
    }
}

fn lvm_list_type(kind: &str, in_daemon: bool) -> String {
    if in_daemon {
        format!("guestfs_lvm_int_{kind}_list *")
    } else {
        format!("struct guestfs_lvm_{kind}_list *")
    }
}

/// The error marker a call returns on failure: -1 for integral kinds, NULL
/// for every pointer kind.
pub fn error_marker(ret: Ret) -> &'static str {
    match ret {
        Ret::Err | Ret::Int(_) | Ret::Bool(_) => "-1",
        _ => "NULL",
    }
}

/// Escape text for inclusion in a C string literal.
pub fn c_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

/// Rewrite C<guestfs_...> cross-references to their shell-facing C<...> form.
pub fn fishify(text: &str) -> String {
    text.replace("C<guestfs_", "C<")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiModel;

    fn find<'a>(model: &'a ApiModel, name: &str) -> &'a Call {
        model.calls.iter().find(|call| call.name == name).unwrap()
    }

    #[test]
    fn client_extern_is_single_line() {
        let model = ApiModel::builtin();
        let touch = find(&model, "touch");
        let opts = ProtoOpts {
            is_extern: true,
            semicolon: true,
            single_line: true,
            newline: true,
            handle: Some("handle"),
            ..ProtoOpts::default()
        };
        assert_eq!(
            format_prototype(touch, &opts),
            "extern int guestfs_touch (guestfs_h *handle, const char *path);\n"
        );
    }

    #[test]
    fn daemon_stub_takes_no_handle() {
        let model = ApiModel::builtin();
        let sync = find(&model, "sync");
        let opts = ProtoOpts {
            is_extern: true,
            semicolon: true,
            single_line: true,
            newline: true,
            in_daemon: true,
            prefix: "do_",
            ..ProtoOpts::default()
        };
        assert_eq!(format_prototype(sync, &opts), "extern int do_sync (void);\n");
    }

    #[test]
    fn structured_returns_split_by_flavour() {
        let model = ApiModel::builtin();
        let pvs_full = find(&model, "pvs_full");
        assert_eq!(
            ret_c_type(pvs_full, false),
            "struct guestfs_lvm_pv_list *"
        );
        assert_eq!(ret_c_type(pvs_full, true), "guestfs_lvm_int_pv_list *");
        let defnode = find(&model, "aug_defnode");
        assert_eq!(ret_c_type(defnode, true), "guestfs_aug_defnode_ret *");
    }
}
