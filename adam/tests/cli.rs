use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("adam-cli-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn writes_default_output() {
    let dir = scratch_dir("default-output");
    let input = dir.join("hello.adam");
    fs::write(&input, r#"fn main() { print("hi"); }"#).unwrap();

    cargo_bin_cmd!("adam")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Compiled"));

    let output = fs::read_to_string(dir.join("hello.rs")).unwrap();
    assert!(output.starts_with("#![allow("));
    assert!(output.ends_with(
        "fn main() {\nprintln!(\"{}\", Object::String(\"hi\".to_string()));\n}\n"
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn prints_to_stdout() {
    let dir = scratch_dir("stdout");
    let input = dir.join("add.adam");
    fs::write(&input, "fn add(a, b) { return a + b; }").unwrap();

    cargo_bin_cmd!("adam")
        .arg(&input)
        .arg("--stdout")
        .arg("--no-prelude")
        .assert()
        .success()
        .stdout(
            "fn add(args: Vec<Object>) -> Object {\nlet a = args[0].clone();\nlet b = args[1].clone();\nreturn a + b;\n}\n",
        );

    assert!(!dir.join("add.rs").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn explicit_output_and_ast_debug() {
    let dir = scratch_dir("explicit-output");
    let input = dir.join("main.adam");
    let output = dir.join("out.rs");
    fs::write(&input, "fn main() { let x = 1; }").unwrap();

    cargo_bin_cmd!("adam")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("--ast-debug")
        .arg("-v")
        .assert()
        .success()
        .stderr(
            predicate::str::contains("LetDeclaration")
                .and(predicate::str::contains("parsed 1 functions"))
                .and(predicate::str::contains("wrote")),
        );

    assert!(fs::read_to_string(&output)
        .unwrap()
        .contains("let mut x = Object::Number(1.0);"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn reports_syntax_error() {
    let dir = scratch_dir("syntax-error");
    let input = dir.join("bad.adam");
    fs::write(&input, "fn main() {\n  1 +;\n}\n").unwrap();

    cargo_bin_cmd!("adam")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:").and(predicate::str::contains("fn main() {")));

    assert!(!dir.join("bad.rs").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn refuses_to_overwrite_input() {
    let dir = scratch_dir("overwrite");
    let input = dir.join("same.rs");
    fs::write(&input, "fn main() {}").unwrap();

    cargo_bin_cmd!("adam")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    assert_eq!(fs::read_to_string(&input).unwrap(), "fn main() {}");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input() {
    cargo_bin_cmd!("adam")
        .arg("adam-no-such-file.adam")
        .assert()
        .failure()
        .stderr(predicate::str::contains("adam-no-such-file.adam"));
}
