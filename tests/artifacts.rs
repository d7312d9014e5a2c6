// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Check the emitted artefacts against their behavioural contracts.
// Author: Lukas Bower

use guestfs_gen::{compile, CompileOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn options_in(dir: &Path) -> CompileOptions {
    CompileOptions {
        xdr_out: dir.join("guestfs_protocol.x"),
        structs_h_out: dir.join("guestfs-structs.h"),
        actions_h_out: dir.join("guestfs-actions.h"),
        actions_c_out: dir.join("guestfs-actions.c"),
        daemon_h_out: dir.join("actions.h"),
        daemon_stubs_out: dir.join("stubs.c"),
        fish_cmds_out: dir.join("cmds.c"),
        actions_pod_out: dir.join("guestfs-actions.pod"),
        fish_pod_out: dir.join("guestfish-actions.pod"),
        structs_pod_out: dir.join("guestfs-structs.pod"),
        ocaml_mli_out: dir.join("guestfs.mli"),
        ocaml_ml_out: dir.join("guestfs.ml"),
        ocaml_glue_out: dir.join("guestfs_c_actions.c"),
        perl_xs_out: dir.join("Guestfs.xs"),
        perl_pm_out: dir.join("Guestfs.pm"),
        api_json_out: dir.join("guestfs_api.json"),
    }
}

fn generate(dir: &TempDir) -> CompileOptions {
    let options = options_in(dir.path());
    compile(&options).expect("compile model");
    options
}

#[test]
fn xdr_schema_covers_calls_and_protocol() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let xdr = fs::read_to_string(&options.xdr_out).expect("xdr");

    assert!(xdr.contains("typedef string str<>;"));
    assert!(xdr.contains("struct guestfs_touch_args {\n  string path<>;\n};"));
    assert!(xdr.contains("GUESTFS_PROC_TOUCH = 3,"));
    assert!(xdr.contains("GUESTFS_PROC_CAT = 4,"));
    assert!(xdr.contains("GUESTFS_PROC_NR_PROCS"));
    assert!(xdr.contains("const GUESTFS_MESSAGE_MAX = 4194304;"));
    assert!(xdr.contains("const GUESTFS_PROGRAM = 0x2000F5F5;"));
    assert!(xdr.contains("const GUESTFS_PROTOCOL_VERSION = 1;"));
    assert!(xdr.contains("const GUESTFS_ERROR_LEN = 256;"));
    assert!(xdr.contains("GUESTFS_DIRECTION_CALL = 0"));
    assert!(xdr.contains("GUESTFS_STATUS_ERROR = 1"));

    // Optional text wires as an optional pointer to the text alias.
    assert!(xdr.contains("struct guestfs_aug_defvar_args {\n  string name<>;\n  str *expr;\n};"));

    // An integer and boolean pair in one reply struct.
    assert!(xdr.contains("struct guestfs_aug_defnode_ret {\n  int nrnodes;\n  bool created;\n};"));

    // The record layout: 32-byte opaque UUID, 64-bit sizes, float percent.
    assert!(xdr.contains("opaque pv_uuid[32];"));
    assert!(xdr.contains("hyper pv_size;"));
    assert!(xdr.contains("float snap_percent;"));
    assert!(xdr.contains("typedef guestfs_lvm_int_pv guestfs_lvm_int_pv_list<>;"));

    // Client-only calls never reach the wire.
    assert!(!xdr.contains("GUESTFS_PROC_SET_PATH"));
    assert!(!xdr.contains("guestfs_set_path_args"));
}

#[test]
fn client_header_declares_every_call() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let header = fs::read_to_string(&options.actions_h_out).expect("actions header");

    assert!(header.contains("extern int guestfs_touch (guestfs_h *handle, const char *path);"));
    assert!(header.contains("extern char *guestfs_cat (guestfs_h *handle, const char *path);"));
    assert!(header.contains("extern const char *guestfs_get_path (guestfs_h *handle);"));
    assert!(header.contains(
        "extern struct guestfs_lvm_pv_list *guestfs_pvs_full (guestfs_h *handle);"
    ));
    assert!(header.contains(
        "extern struct guestfs_int_bool *guestfs_aug_defnode (guestfs_h *handle, const char *name, const char *expr, const char *val);"
    ));
}

#[test]
fn client_stubs_enforce_the_call_contract() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let actions = fs::read_to_string(&options.actions_c_out).expect("actions impl");

    assert!(actions.contains("if (handle->state != READY) {"));
    assert!(actions.contains("guestfs_touch called from the wrong state, %d != READY"));
    assert!(actions.contains("guestfs_touch failed, see earlier error messages"));
    assert!(actions.contains("check_reply_header (handle, &rv.hdr, GUESTFS_PROC_TOUCH, serial)"));

    // Ownership: string lists grow a NULL terminator before returning.
    assert!(actions.contains("/* caller will free this, but we need to add a NULL entry */"));
    // Structured returns are duplicated into fresh heap storage.
    assert!(actions.contains("return safe_memdup (handle, &rv.ret.physvols, sizeof (rv.ret.physvols));"));
    // Optional text collapses to a null pointer.
    assert!(actions.contains("args.expr = expr ? (char **) &expr : NULL;"));
    // Client-only calls have no wire stubs.
    assert!(!actions.contains("guestfs_set_path ("));
}

#[test]
fn daemon_stubs_dispatch_and_tokenize() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let header = fs::read_to_string(&options.daemon_h_out).expect("daemon header");
    let stubs = fs::read_to_string(&options.daemon_stubs_out).expect("daemon stubs");

    assert!(header.contains("extern int do_mount (const char *device, const char *mountpoint);"));
    assert!(header.contains("extern guestfs_lvm_int_pv_list *do_pvs_full (void);"));
    assert!(header.contains("extern guestfs_aug_defnode_ret *do_aug_defnode (const char *name, const char *expr, const char *val);"));

    assert!(stubs.contains("case GUESTFS_PROC_TOUCH:"));
    assert!(stubs.contains("touch_stub (xdr_in);"));
    assert!(stubs.contains("dispatch_incoming_message: unknown procedure number %d"));
    assert!(stubs.contains("daemon failed to decode procedure arguments"));
    assert!(stubs.contains("expr = args.expr ? *args.expr : NULL;"));

    // Tokenizer diagnostics, one per failure case.
    assert!(stubs.contains("passed a NULL string"));
    assert!(stubs.contains("passed a empty string or one beginning with whitespace"));
    assert!(stubs.contains("string finished early, around token %s"));
    assert!(stubs.contains("failed to parse size '%s' from token %s"));
    assert!(stubs.contains("extra tokens at end of string"));

    // The lvm invocation carries the full fixed flag set.
    assert!(stubs.contains("\"/sbin/lvm\", \"pvs\","));
    assert!(stubs.contains("\"--nosuffix\", \"--separator\", \",\", \"--units\", \"b\", NULL);"));

    // UUID copy skips dashes; empty opt_percent yields the sentinel.
    assert!(stubs.contains("else if (tok[j] != '-')"));
    assert!(stubs.contains("r->snap_percent = -1;"));
}

#[test]
fn shell_dispatcher_matches_names_and_aliases() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let cmds = fs::read_to_string(&options.fish_cmds_out).expect("fish cmds");

    // The command table lists hyphenated names with summaries.
    assert!(cmds.contains("printf (\"%-20s %s\\n\", \"touch\", \"update file timestamps or create a new file\");"));
    assert!(cmds.contains("printf (\"%-20s %s\\n\", \"list-devices\", \"list the block devices\");"));

    // set_path answers to its public name, hyphenated name and alias.
    assert!(cmds.contains(
        "strcasecmp (cmd, \"set_path\") == 0 || strcasecmp (cmd, \"set-path\") == 0 || strcasecmp (cmd, \"path\") == 0"
    ));

    // wait_ready is excluded from the shell.
    assert!(!cmds.contains("run_wait_ready"));
    assert!(!cmds.contains("\"wait-ready\""));

    // The launch runner calls the shell builtin, not the client API.
    assert!(cmds.contains("r = launch (g);"));

    // Optional text collapses the empty token to absent.
    assert!(cmds.contains("qemuvalue = strcmp (argv[1], \"\") != 0 ? argv[1] : NULL;"));

    // Booleans parse by truth value and print as true/false.
    assert!(cmds.contains("before = is_true (argv[2]) ? 1 : 0;"));
    assert!(cmds.contains("printf (\"%s\\n\", r ? \"true\" : \"false\");"));

    // Structured output goes through the per-column field printers.
    assert!(cmds.contains("if (lv->snap_percent >= 0) printf (\"snap_percent: %g %%\\n\", lv->snap_percent);"));
    assert!(cmds.contains("else printf (\"snap_percent: \\n\");"));

    assert!(cmds.contains("fprintf (stderr, \"%s: unknown command\\n\", cmd);"));
}

#[test]
fn manual_pages_state_ownership_and_limits() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let actions_pod = fs::read_to_string(&options.actions_pod_out).expect("actions pod");
    let fish_pod = fs::read_to_string(&options.fish_pod_out).expect("fish pod");
    let structs_pod = fs::read_to_string(&options.structs_pod_out).expect("structs pod");

    assert!(actions_pod.contains("=head2 guestfs_cat"));
    assert!(actions_pod.contains("I<The caller must free the returned string after use>."));
    assert!(actions_pod.contains("there is a transfer limit"));
    assert!(actions_pod.contains("This function returns 0 on success or -1 on error."));
    assert!(actions_pod.contains("I<The caller must call C<guestfs_free_lvm_pv_list> after use>."));

    assert!(fish_pod.contains("=head2 set-path | path"));
    assert!(fish_pod.contains(" aug-insert <path> <label> <true|false>"));
    // Shell docs drop the guestfs_ prefix from cross-references.
    assert!(fish_pod.contains("C<lvs>"));
    assert!(!fish_pod.contains("C<guestfs_lvs>"));
    assert!(!fish_pod.contains("=head2 wait-ready"));

    assert!(structs_pod.contains("=head2 guestfs_lvm_pv"));
    assert!(structs_pod.contains("char pv_uuid[32];"));
    assert!(structs_pod.contains("float snap_percent; /* [0..100] or -1 */"));
    assert!(structs_pod.contains("uint32_t len; /* Number of elements in list. */"));
}

#[test]
fn ocaml_binding_is_typed_per_call() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let mli = fs::read_to_string(&options.ocaml_mli_out).expect("mli");
    let ml = fs::read_to_string(&options.ocaml_ml_out).expect("ml");
    let glue = fs::read_to_string(&options.ocaml_glue_out).expect("glue");

    assert!(mli.contains("val touch : t -> string -> unit"));
    assert!(mli.contains("val aug_defvar : t -> string -> string option -> int"));
    assert!(mli.contains("val aug_defnode : t -> string -> string -> string -> int * bool"));
    assert!(mli.contains("val pvs_full : t -> lvm_pv array"));

    assert!(ml.contains("external touch : t -> string -> unit = \"ocaml_guestfs_touch\""));
    assert!(ml.contains("Callback.register_exception \"ocaml_guestfs_error\" (Error \"\")"));

    assert!(glue.contains("caml_enter_blocking_section ();"));
    assert!(glue.contains("caml_leave_blocking_section ();"));
    assert!(glue.contains("ocaml_guestfs_raise_error (handle, \"touch\");"));
    assert!(glue.contains("copy_lvm_pv_list (r);"));
    assert!(glue.contains("memcpy (String_val (v), pv->pv_uuid, 32);"));
    assert!(glue.contains("for (i = 0; r[i] != NULL; ++i) free (r[i]);"));
}

#[test]
fn perl_binding_croaks_and_documents() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let xs = fs::read_to_string(&options.perl_xs_out).expect("xs");
    let pm = fs::read_to_string(&options.perl_pm_out).expect("pm");

    assert!(xs.contains("MODULE = Sys::Guestfs  PACKAGE = Sys::Guestfs"));
    assert!(xs.contains("croak (\"touch: %s\", last_error);"));
    assert!(xs.contains("char *qemuvalue = SvOK(ST(2)) ? SvPV_nolen(ST(2)) : NULL;"));
    assert!(xs.contains("PUSHs (sv_2mortal (newSViv (r->i)));"));
    assert!(xs.contains("(void) hv_store (hv, \"pv_uuid\", 7, newSVpv (physvols->val[i].pv_uuid, 32), 0);"));
    assert!(xs.contains("guestfs_free_lvm_pv_list (physvols);"));

    assert!(pm.contains("package Sys::Guestfs;"));
    assert!(pm.contains("=item $content = $h->cat ($path);"));
    assert!(pm.contains("=item ($nrnodes, $created) = $h->aug_defnode ($name, $expr, $val);"));
    assert!(pm.contains("=item @devices = $h->list_devices ();"));
}

#[test]
fn model_dump_carries_a_fingerprint() {
    let dir = TempDir::new().expect("tempdir");
    let options = generate(&dir);
    let json = fs::read_to_string(&options.api_json_out).expect("api json");
    let hash = fs::read_to_string(dir.path().join("guestfs_api.json.sha256")).expect("hash");

    assert!(json.contains("\"name\": \"touch\""));
    assert!(json.contains("\"proc_num\": 3"));
    let digest_line = hash.lines().last().expect("digest line");
    assert!(digest_line.ends_with("guestfs_api.json"));
    assert_eq!(digest_line.split_whitespace().next().map(str::len), Some(64));
}
