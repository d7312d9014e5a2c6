// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: CLI entry point for the guestfs artefact generator.
// Author: Lukas Bower

use anyhow::Result;
use clap::Parser;
use guestfs_gen::{
    compile, default_actions_c_path, default_actions_h_path, default_actions_pod_path,
    default_api_json_path, default_daemon_h_path, default_daemon_stubs_path,
    default_fish_cmds_path, default_fish_pod_path, default_ocaml_glue_path,
    default_ocaml_ml_path, default_ocaml_mli_path, default_perl_pm_path, default_perl_xs_path,
    default_structs_h_path, default_structs_pod_path, default_xdr_path, CompileOptions,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Output path for the XDR wire schema.
    #[arg(long, default_value_os_t = default_xdr_path())]
    xdr: PathBuf,
    /// Output path for the public struct header.
    #[arg(long, default_value_os_t = default_structs_h_path())]
    structs_header: PathBuf,
    /// Output path for the client action header.
    #[arg(long, default_value_os_t = default_actions_h_path())]
    actions_header: PathBuf,
    /// Output path for the client action implementation.
    #[arg(long, default_value_os_t = default_actions_c_path())]
    actions_impl: PathBuf,
    /// Output path for the daemon action header.
    #[arg(long, default_value_os_t = default_daemon_h_path())]
    daemon_header: PathBuf,
    /// Output path for the daemon dispatch stubs.
    #[arg(long, default_value_os_t = default_daemon_stubs_path())]
    daemon_stubs: PathBuf,
    /// Output path for the shell command dispatcher.
    #[arg(long, default_value_os_t = default_fish_cmds_path())]
    fish_cmds: PathBuf,
    /// Output path for the client API manual page.
    #[arg(long, default_value_os_t = default_actions_pod_path())]
    actions_pod: PathBuf,
    /// Output path for the shell manual page.
    #[arg(long, default_value_os_t = default_fish_pod_path())]
    fish_pod: PathBuf,
    /// Output path for the struct manual page.
    #[arg(long, default_value_os_t = default_structs_pod_path())]
    structs_pod: PathBuf,
    /// Output path for the OCaml interface.
    #[arg(long, default_value_os_t = default_ocaml_mli_path())]
    ocaml_mli: PathBuf,
    /// Output path for the OCaml implementation.
    #[arg(long, default_value_os_t = default_ocaml_ml_path())]
    ocaml_ml: PathBuf,
    /// Output path for the OCaml C glue.
    #[arg(long, default_value_os_t = default_ocaml_glue_path())]
    ocaml_glue: PathBuf,
    /// Output path for the Perl XS stubs.
    #[arg(long, default_value_os_t = default_perl_xs_path())]
    perl_xs: PathBuf,
    /// Output path for the Perl module.
    #[arg(long, default_value_os_t = default_perl_pm_path())]
    perl_pm: PathBuf,
    /// Output path for the resolved API model JSON.
    #[arg(long, default_value_os_t = default_api_json_path())]
    api_json: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = CompileOptions {
        xdr_out: args.xdr,
        structs_h_out: args.structs_header,
        actions_h_out: args.actions_header,
        actions_c_out: args.actions_impl,
        daemon_h_out: args.daemon_header,
        daemon_stubs_out: args.daemon_stubs,
        fish_cmds_out: args.fish_cmds,
        actions_pod_out: args.actions_pod,
        fish_pod_out: args.fish_pod,
        structs_pod_out: args.structs_pod,
        ocaml_mli_out: args.ocaml_mli,
        ocaml_ml_out: args.ocaml_ml,
        ocaml_glue_out: args.ocaml_glue,
        perl_xs_out: args.perl_xs,
        perl_pm_out: args.perl_pm,
        api_json_out: args.api_json,
    };
    let output = compile(&options)?;
    println!("guestfs-gen: wrote {}", output.summary());
    Ok(())
}
