// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Validate model-invariant enforcement and the built-in table.
// Author: Lukas Bower

use guestfs_gen::api::{ApiModel, Arg, Call, Ret, PROC_NONE};

fn sample_call(name: &'static str, proc_num: i32) -> Call {
    Call {
        name,
        ret: Ret::Err,
        args: vec![],
        proc_num,
        flags: vec![],
        summary: "a sample call",
        description: "A sample call used by the validator tests.",
    }
}

fn model_of(calls: Vec<Call>) -> ApiModel {
    ApiModel {
        calls,
        records: vec![],
    }
}

#[test]
fn duplicate_procedure_numbers_rejected() {
    let model = model_of(vec![sample_call("a", 7), sample_call("b", 7)]);
    let err = model.validate().expect_err("duplicate numbers");
    let message = err.to_string();
    assert!(message.contains("duplicate procedure number 7"), "{message}");
    assert!(message.contains("'a'"), "{message}");
    assert!(message.contains("'b'"), "{message}");
}

#[test]
fn hyphenated_name_rejected() {
    let model = model_of(vec![sample_call("set-path", PROC_NONE)]);
    let err = model.validate().expect_err("hyphenated name");
    assert!(err.to_string().contains("hyphen"));
}

#[test]
fn trailing_newline_in_description_rejected() {
    let mut call = sample_call("touch", 3);
    call.description = "Touch a file.\n";
    let err = model_of(vec![call]).validate().expect_err("trailing newline");
    assert!(err.to_string().contains("line terminator"));
}

#[test]
fn daemon_call_needs_positive_procedure_number() {
    let model = model_of(vec![sample_call("broken", 0)]);
    let err = model.validate().expect_err("non-positive number");
    assert!(err.to_string().contains("strictly positive"));
}

#[test]
fn const_string_on_daemon_call_rejected() {
    let mut call = sample_call("foo", 9);
    call.ret = Ret::ConstString("x");
    let err = model_of(vec![call]).validate().expect_err("const string");
    assert!(err.to_string().contains("const string"));
}

#[test]
fn const_string_on_client_call_allowed() {
    let mut call = sample_call("get_path", PROC_NONE);
    call.ret = Ret::ConstString("path");
    model_of(vec![call]).validate().expect("client-side const string");
}

#[test]
fn too_many_arguments_rejected() {
    let mut call = sample_call("wide", 5);
    call.args = vec![
        Arg::Str("a"),
        Arg::Str("b"),
        Arg::Str("c"),
        Arg::Str("d"),
    ];
    let err = model_of(vec![call]).validate().expect_err("four arguments");
    assert!(err.to_string().contains("more than three"));
}

#[test]
fn builtin_table_is_valid() {
    ApiModel::builtin().validate().expect("built-in table");
}

#[test]
fn builtin_names_are_well_formed() {
    let model = ApiModel::builtin();
    for call in &model.calls {
        let mut chars = call.name.chars();
        let first = chars.next().expect("non-empty name");
        assert!(
            first.is_ascii_lowercase() || first == '_',
            "bad name {}",
            call.name
        );
        assert!(
            chars.all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_'),
            "bad name {}",
            call.name
        );
    }
}

#[test]
fn builtin_client_calls_carry_the_sentinel() {
    let model = ApiModel::builtin();
    for call in &model.calls {
        if call.is_daemon() {
            assert!(call.proc_num > 0, "{} has {}", call.name, call.proc_num);
        } else {
            assert_eq!(call.proc_num, PROC_NONE, "{}", call.name);
        }
    }
}

#[test]
fn builtin_argument_vectors_cover_every_size() {
    let model = ApiModel::builtin();
    for want in 0..=3 {
        assert!(
            model
                .daemon_calls()
                .any(|call| call.args.len() == want),
            "no daemon call with {want} arguments"
        );
    }
}
