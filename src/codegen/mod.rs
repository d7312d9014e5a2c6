// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Run every backend over the model and commit the artefacts.
// Author: Lukas Bower

pub mod banner;
pub mod chdr;
pub mod client;
pub mod ctype;
pub mod daemon;
pub mod docs;
pub mod fish;
pub mod ocaml;
pub mod perl;
pub mod sink;
pub mod xdr;

use crate::api::{ApiModel, Arg, Call};
use crate::CompileOptions;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use sink::Sink;
use std::path::{Path, PathBuf};

/// Notice appended to the documentation of calls whose payload can hit the
/// message-size ceiling.
pub const PROTOCOL_LIMIT_WARNING: &str = "\
Because of the message protocol, there is a transfer limit
of somewhere between 2MB and 4MB.  To transfer large files you should use
FTP.";

/// Shell synopsis: hyphenated name followed by one placeholder per argument.
pub(crate) fn fish_synopsis(call: &Call) -> String {
    let mut out = call.fish_name();
    for arg in &call.args {
        match arg {
            Arg::Bool(_) => out.push_str(" <true|false>"),
            arg => {
                out.push_str(" <");
                out.push_str(arg.name());
                out.push('>');
            }
        }
    }
    out
}

#[derive(Debug)]
pub struct GeneratedArtifacts {
    pub xdr: PathBuf,
    pub structs_h: PathBuf,
    pub actions_h: PathBuf,
    pub actions_c: PathBuf,
    pub daemon_h: PathBuf,
    pub daemon_stubs: PathBuf,
    pub fish_cmds: PathBuf,
    pub actions_pod: PathBuf,
    pub fish_pod: PathBuf,
    pub structs_pod: PathBuf,
    pub ocaml_mli: PathBuf,
    pub ocaml_ml: PathBuf,
    pub ocaml_glue: PathBuf,
    pub perl_xs: PathBuf,
    pub perl_pm: PathBuf,
    pub api_json: PathBuf,
    pub api_json_hash: PathBuf,
}

impl GeneratedArtifacts {
    pub fn summary(&self) -> String {
        format!(
            "xdr={}, structs_h={}, actions_h={}, actions_c={}, daemon_h={}, daemon_stubs={}, fish_cmds={}, actions_pod={}, fish_pod={}, structs_pod={}, ocaml_mli={}, ocaml_ml={}, ocaml_glue={}, perl_xs={}, perl_pm={}, api_json={}, api_json_hash={}",
            self.xdr.display(),
            self.structs_h.display(),
            self.actions_h.display(),
            self.actions_c.display(),
            self.daemon_h.display(),
            self.daemon_stubs.display(),
            self.fish_cmds.display(),
            self.actions_pod.display(),
            self.fish_pod.display(),
            self.structs_pod.display(),
            self.ocaml_mli.display(),
            self.ocaml_ml.display(),
            self.ocaml_glue.display(),
            self.perl_xs.display(),
            self.perl_pm.display(),
            self.api_json.display(),
            self.api_json_hash.display()
        )
    }
}

/// Emit every artefact, each through its own sink: open, render, close.
/// The model has already been validated.
pub fn emit_all(model: &ApiModel, options: &CompileOptions) -> Result<GeneratedArtifacts> {
    emit_one(&options.xdr_out, |sink| xdr::emit(model, sink))?;
    emit_one(&options.structs_h_out, |sink| {
        chdr::emit_structs(model, sink)
    })?;
    emit_one(&options.actions_h_out, |sink| {
        chdr::emit_actions(model, sink)
    })?;
    emit_one(&options.actions_c_out, |sink| client::emit(model, sink))?;
    emit_one(&options.daemon_h_out, |sink| {
        daemon::emit_header(model, sink)
    })?;
    emit_one(&options.daemon_stubs_out, |sink| {
        daemon::emit_stubs(model, sink)
    })?;
    emit_one(&options.fish_cmds_out, |sink| fish::emit(model, sink))?;
    emit_one(&options.actions_pod_out, |sink| {
        docs::emit_actions_pod(model, sink)
    })?;
    emit_one(&options.fish_pod_out, |sink| {
        docs::emit_fish_pod(model, sink)
    })?;
    emit_one(&options.structs_pod_out, |sink| {
        docs::emit_structs_pod(model, sink)
    })?;
    emit_one(&options.ocaml_mli_out, |sink| ocaml::emit_mli(model, sink))?;
    emit_one(&options.ocaml_ml_out, |sink| ocaml::emit_ml(model, sink))?;
    emit_one(&options.ocaml_glue_out, |sink| ocaml::emit_glue(model, sink))?;
    emit_one(&options.perl_xs_out, |sink| perl::emit_xs(model, sink))?;
    emit_one(&options.perl_pm_out, |sink| perl::emit_pm(model, sink))?;

    let model_json = serde_json::to_string_pretty(model)
        .context("failed to serialize the API model")?;
    let model_hash = hash_bytes(model_json.as_bytes());

    let mut sink = Sink::open(&options.api_json_out)?;
    sink.push_str(&model_json);
    sink.push_str("\n");
    sink.close()?;

    let hash_path = options.api_json_out.with_extension("json.sha256");
    let hash_contents = format!(
        "# Author: Lukas Bower\n# Purpose: SHA-256 fingerprint for {}.\n{}  {}\n",
        file_name(&options.api_json_out),
        model_hash,
        file_name(&options.api_json_out)
    );
    let mut sink = Sink::open(&hash_path)?;
    sink.push_str(&hash_contents);
    sink.close()?;

    Ok(GeneratedArtifacts {
        xdr: options.xdr_out.clone(),
        structs_h: options.structs_h_out.clone(),
        actions_h: options.actions_h_out.clone(),
        actions_c: options.actions_c_out.clone(),
        daemon_h: options.daemon_h_out.clone(),
        daemon_stubs: options.daemon_stubs_out.clone(),
        fish_cmds: options.fish_cmds_out.clone(),
        actions_pod: options.actions_pod_out.clone(),
        fish_pod: options.fish_pod_out.clone(),
        structs_pod: options.structs_pod_out.clone(),
        ocaml_mli: options.ocaml_mli_out.clone(),
        ocaml_ml: options.ocaml_ml_out.clone(),
        ocaml_glue: options.ocaml_glue_out.clone(),
        perl_xs: options.perl_xs_out.clone(),
        perl_pm: options.perl_pm_out.clone(),
        api_json: options.api_json_out.clone(),
        api_json_hash: hash_path,
    })
}

fn emit_one(path: &Path, render: impl FnOnce(&mut Sink)) -> Result<()> {
    let mut sink = Sink::open(path)?;
    render(&mut sink);
    sink.close()
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("guestfs_api.json")
}

pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}
