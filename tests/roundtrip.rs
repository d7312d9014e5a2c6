// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate guestfs-gen determinism across repeated runs.
// Author: Lukas Bower

use guestfs_gen::{compile, CompileOptions};
use std::fs;
use std::path::{Path, PathBuf};
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

fn snapshot_dir(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut entries = fs::read_dir(path)
        .expect("read dir")
        .map(|entry| {
            let entry = entry.expect("entry");
            let file_name = entry.file_name().to_string_lossy().to_string();
            let contents = fs::read(entry.path()).expect("read file");
            (file_name, contents)
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

#[test]
fn generator_output_is_deterministic() {
    let temp_dir = TempDir::new().expect("tempdir");
    let options = options_in(temp_dir.path());

    let first = compile(&options).expect("compile model");
    let baseline = snapshot_dir(temp_dir.path());

    let second = compile(&options).expect("compile model again");
    let again = snapshot_dir(temp_dir.path());

    assert_eq!(baseline, again);
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn every_artifact_is_written() {
    let temp_dir = TempDir::new().expect("tempdir");
    let options = options_in(temp_dir.path());

    compile(&options).expect("compile model");

    let expected: Vec<PathBuf> = vec![
        options.xdr_out.clone(),
        options.structs_h_out.clone(),
        options.actions_h_out.clone(),
        options.actions_c_out.clone(),
        options.daemon_h_out.clone(),
        options.daemon_stubs_out.clone(),
        options.fish_cmds_out.clone(),
        options.actions_pod_out.clone(),
        options.fish_pod_out.clone(),
        options.structs_pod_out.clone(),
        options.ocaml_mli_out.clone(),
        options.ocaml_ml_out.clone(),
        options.ocaml_glue_out.clone(),
        options.perl_xs_out.clone(),
        options.perl_pm_out.clone(),
        options.api_json_out.clone(),
        temp_dir.path().join("guestfs_api.json.sha256"),
    ];
    for path in expected {
        assert!(path.is_file(), "missing artifact {}", path.display());
    }
}

#[test]
fn no_staged_files_left_behind() {
    let temp_dir = TempDir::new().expect("tempdir");
    let options = options_in(temp_dir.path());

    compile(&options).expect("compile model");

    let staged = snapshot_dir(temp_dir.path())
        .into_iter()
        .filter(|(name, _)| name.ends_with(".new"))
        .collect::<Vec<_>>();
    assert!(staged.is_empty(), "staged files remain: {staged:?}");
}

#[test]
fn generated_files_carry_the_banner() {
    let temp_dir = TempDir::new().expect("tempdir");
    let options = options_in(temp_dir.path());

    compile(&options).expect("compile model");

    let xdr = fs::read_to_string(&options.xdr_out).expect("xdr");
    assert!(xdr.starts_with("/* guestfs generated file"));
    assert!(xdr.contains("ANY CHANGES YOU MAKE TO THIS FILE WILL BE LOST."));

    let mli = fs::read_to_string(&options.ocaml_mli_out).expect("mli");
    assert!(mli.starts_with("(* guestfs generated file"));

    let pm = fs::read_to_string(&options.perl_pm_out).expect("pm");
    assert!(pm.starts_with("# guestfs generated file"));

    let stubs = fs::read_to_string(&options.daemon_stubs_out).expect("stubs");
    assert!(stubs.contains("GNU General Public License"));
    let actions = fs::read_to_string(&options.actions_c_out).expect("actions");
    assert!(actions.contains("GNU Lesser General Public"));
}
