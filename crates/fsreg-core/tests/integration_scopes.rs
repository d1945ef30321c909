//! End-to-end: configuration → registry → contexts → backend I/O.

mod common;

use std::io::{Read, Write};
use std::sync::Arc;

use fsreg_core::config::RegistryConfig;
use fsreg_core::init::init;
use fsreg_core::{ContextProxy, InitError, Scope};
use tempfile::tempdir;

#[test]
fn global_memory_path_round_trips_text() {
    let cfg = RegistryConfig::from_pairs([("path.foo", "mem://")]);
    let reg = init(&cfg, None).unwrap();

    let fs = reg.get("foo").unwrap();
    {
        let mut w = fs.open_write("foo.txt").unwrap();
        w.write_all(b"test").unwrap();
    }
    let mut out = String::new();
    reg.get("foo")
        .unwrap()
        .open_read("foo.txt")
        .unwrap()
        .read_to_string(&mut out)
        .unwrap();
    assert_eq!(out, "test");
}

#[test]
fn context_scoped_path_is_per_context() {
    let (reg, mgr) = common::with_ctx("[path]\nmem = \"mem://?scope=ctx\"\n");

    assert!(reg.contains("mem"));
    assert!(reg.get("mem").unwrap_err().is_not_found());
    assert_eq!(reg.descriptor("mem").unwrap().scope(), Scope::Context);
    assert_eq!(reg.descriptor("mem").unwrap().url(), "mem://");

    let fs1 = {
        let mut ctx = mgr.new_context();
        let proxy = ctx.member_mut::<ContextProxy>("fs").unwrap();
        let fs1 = proxy.get("mem").unwrap();
        fs1.write_string("foo.txt", "test").unwrap();
        assert!(Arc::ptr_eq(&fs1, &proxy.get("mem").unwrap()));
        fs1
    };

    let fs2 = {
        let mut ctx = mgr.new_context();
        let proxy = ctx.member_mut::<ContextProxy>("fs").unwrap();
        let fs2 = proxy.get("mem").unwrap();
        fs2
    };

    assert!(!Arc::ptr_eq(&fs1, &fs2));
    assert_eq!(fs1.read_to_string("foo.txt").unwrap(), "test");
    assert!(fs2.open_read("foo.txt").err().unwrap().is_not_found());
}

#[test]
fn global_path_is_shared_by_contexts() {
    let (reg, mgr) = common::with_ctx("[path]\nmem = \"mem://\"\n");

    let mut ctx_a = mgr.new_context();
    let mut ctx_b = mgr.new_context();
    let a = ctx_a.member_mut::<ContextProxy>("fs").unwrap().get("mem").unwrap();
    let b = ctx_b.member_mut::<ContextProxy>("fs").unwrap().get("mem").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a, &reg.get("mem").unwrap()));
}

#[test]
fn local_directory_path() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("present.txt"), "here").unwrap();
    let cfg = RegistryConfig::from_pairs([("path.foo", dir.path().to_str().unwrap())]);
    let reg = init(&cfg, None).unwrap();

    let fs = reg.get("foo").unwrap();
    assert!(fs.is_file("present.txt").unwrap());
    assert_eq!(fs.read_to_string("present.txt").unwrap(), "here");
}

#[test]
fn scope_parameter_does_not_change_directory_with_space() {
    let dir = tempdir().unwrap();
    let spaced = dir.path().join("my dir");
    std::fs::create_dir(&spaced).unwrap();
    std::fs::write(spaced.join("present.txt"), "here").unwrap();
    let cfg = RegistryConfig::from_pairs([
        ("path.plain", format!("osfs://{}", spaced.display())),
        ("path.scoped", format!("osfs://{}?scope=global", spaced.display())),
    ]);
    let reg = init(&cfg, None).unwrap();

    assert!(reg.get("plain").unwrap().is_file("present.txt").unwrap());
    assert!(reg.get("scoped").unwrap().is_file("present.txt").unwrap());
    assert_eq!(
        reg.descriptor("scoped").unwrap().url(),
        format!("osfs://{}", spaced.display())
    );
}

#[test]
fn context_scoped_local_directory_persists_after_context() {
    let dir = tempdir().unwrap();
    let toml = format!(
        "[path]\nshared_disk = \"osfs://{}?scope=ctx\"\n",
        dir.path().display()
    );
    let (_reg, mgr) = common::with_ctx(&toml);

    {
        let mut ctx = mgr.new_context();
        let fs = ctx
            .member_mut::<ContextProxy>("fs")
            .unwrap()
            .get("shared_disk")
            .unwrap();
        fs.write_string("kept.txt", "durable").unwrap();
    }

    let mut ctx = mgr.new_context();
    let fs = ctx
        .member_mut::<ContextProxy>("fs")
        .unwrap()
        .get("shared_disk")
        .unwrap();
    assert_eq!(fs.read_to_string("kept.txt").unwrap(), "durable");
}

#[test]
fn invalid_names_fail_initialization() {
    for name in ["paths", "_private"] {
        let cfg = RegistryConfig::from_pairs([(format!("path.{name}"), "mem://")]);
        let err = init(&cfg, None).unwrap_err();
        assert!(matches!(err, InitError::Registration(_)), "{name}: {err}");
    }
}

#[test]
fn ctx_scope_needs_context_subsystem() {
    let cfg = RegistryConfig::from_pairs([("path.path", "mem://?scope=ctx")]);
    assert!(matches!(
        init(&cfg, None).unwrap_err(),
        InitError::ContextUnavailable(_)
    ));
    let (reg, _mgr) = common::with_ctx("[path]\npath = \"mem://?scope=ctx\"\n");
    assert!(reg.contains("path"));
}
