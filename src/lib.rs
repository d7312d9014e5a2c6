// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Expose guestfs-gen compilation helpers for tests and the CLI.
// Author: Lukas Bower

pub mod api;
pub mod codegen;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// One output path per artefact. Every field has a build-tree default so the
/// generator runs with no arguments.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub xdr_out: PathBuf,
    pub structs_h_out: PathBuf,
    pub actions_h_out: PathBuf,
    pub actions_c_out: PathBuf,
    pub daemon_h_out: PathBuf,
    pub daemon_stubs_out: PathBuf,
    pub fish_cmds_out: PathBuf,
    pub actions_pod_out: PathBuf,
    pub fish_pod_out: PathBuf,
    pub structs_pod_out: PathBuf,
    pub ocaml_mli_out: PathBuf,
    pub ocaml_ml_out: PathBuf,
    pub ocaml_glue_out: PathBuf,
    pub perl_xs_out: PathBuf,
    pub perl_pm_out: PathBuf,
    pub api_json_out: PathBuf,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            xdr_out: default_xdr_path(),
            structs_h_out: default_structs_h_path(),
            actions_h_out: default_actions_h_path(),
            actions_c_out: default_actions_c_path(),
            daemon_h_out: default_daemon_h_path(),
            daemon_stubs_out: default_daemon_stubs_path(),
            fish_cmds_out: default_fish_cmds_path(),
            actions_pod_out: default_actions_pod_path(),
            fish_pod_out: default_fish_pod_path(),
            structs_pod_out: default_structs_pod_path(),
            ocaml_mli_out: default_ocaml_mli_path(),
            ocaml_ml_out: default_ocaml_ml_path(),
            ocaml_glue_out: default_ocaml_glue_path(),
            perl_xs_out: default_perl_xs_path(),
            perl_pm_out: default_perl_pm_path(),
            api_json_out: default_api_json_path(),
        }
    }
}

/// Validate the compiled-in model, then emit every artefact. No file is
/// touched if validation fails.
pub fn compile(options: &CompileOptions) -> Result<codegen::GeneratedArtifacts> {
    let model = api::ApiModel::builtin();
    model.validate()?;
    codegen::emit_all(&model, options)
}

pub fn default_xdr_path() -> PathBuf {
    Path::new("lib").join("guestfs_protocol.x")
}

pub fn default_structs_h_path() -> PathBuf {
    Path::new("lib").join("guestfs-structs.h")
}

pub fn default_actions_h_path() -> PathBuf {
    Path::new("lib").join("guestfs-actions.h")
}

pub fn default_actions_c_path() -> PathBuf {
    Path::new("lib").join("guestfs-actions.c")
}

pub fn default_daemon_h_path() -> PathBuf {
    Path::new("daemon").join("actions.h")
}

pub fn default_daemon_stubs_path() -> PathBuf {
    Path::new("daemon").join("stubs.c")
}

pub fn default_fish_cmds_path() -> PathBuf {
    Path::new("fish").join("cmds.c")
}

pub fn default_actions_pod_path() -> PathBuf {
    Path::new("docs").join("guestfs-actions.pod")
}

pub fn default_fish_pod_path() -> PathBuf {
    Path::new("docs").join("guestfish-actions.pod")
}

pub fn default_structs_pod_path() -> PathBuf {
    Path::new("docs").join("guestfs-structs.pod")
}

pub fn default_ocaml_mli_path() -> PathBuf {
    Path::new("ocaml").join("guestfs.mli")
}

pub fn default_ocaml_ml_path() -> PathBuf {
    Path::new("ocaml").join("guestfs.ml")
}

pub fn default_ocaml_glue_path() -> PathBuf {
    Path::new("ocaml").join("guestfs_c_actions.c")
}

pub fn default_perl_xs_path() -> PathBuf {
    Path::new("perl").join("Guestfs.xs")
}

pub fn default_perl_pm_path() -> PathBuf {
    Path::new("perl").join("lib").join("Sys").join("Guestfs.pm")
}

pub fn default_api_json_path() -> PathBuf {
    Path::new("out").join("guestfs_api.json")
}
