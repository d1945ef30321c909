//! Tests for cat, put and ls.

use super::command;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_cat() {
    match command(&["fsreg", "cat", "uploads", "a/b.txt"]) {
        CliCommand::Cat { name, file } => {
            assert_eq!(name, "uploads");
            assert_eq!(file, "a/b.txt");
        }
        _ => panic!("expected Cat"),
    }
}

#[test]
fn cli_parse_put() {
    match command(&["fsreg", "put", "mem", "foo.txt", "test"]) {
        CliCommand::Put { name, file, text } => {
            assert_eq!(name, "mem");
            assert_eq!(file, "foo.txt");
            assert_eq!(text, "test");
        }
        _ => panic!("expected Put"),
    }
}

#[test]
fn cli_parse_put_missing_text() {
    assert!(Cli::try_parse_from(["fsreg", "put", "mem", "foo.txt"]).is_err());
}

#[test]
fn cli_parse_ls() {
    match command(&["fsreg", "ls", "mem"]) {
        CliCommand::Ls { name, dir } => {
            assert_eq!(name, "mem");
            assert!(dir.is_none());
        }
        _ => panic!("expected Ls"),
    }
}

#[test]
fn cli_parse_ls_dir() {
    match command(&["fsreg", "ls", "mem", "sub"]) {
        CliCommand::Ls { dir, .. } => assert_eq!(dir.as_deref(), Some("sub")),
        _ => panic!("expected Ls with dir"),
    }
}
