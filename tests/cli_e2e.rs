use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn binpack_bin() -> &'static str {
    env!("CARGO_BIN_EXE_binpack")
}

fn test_temp_dir(tag: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("binpack-cli-e2e-{tag}-{}-{ts}", std::process::id()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_binpack(args: &[&str]) -> Output {
    Command::new(binpack_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run binpack")
}

fn stdout(out: &Output) -> String {
    assert!(out.status.success(), "binpack failed: {}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout.clone()).expect("utf-8 stdout").trim_end().to_owned()
}

fn json(out: &Output) -> serde_json::Value {
    serde_json::from_str(&stdout(out)).expect("stdout is JSON")
}

#[test]
fn pack_prints_hex() {
    let out = run_binpack(&["pack", "-f", ">I16 p", r#"[4660, "hi"]"#]);
    assert_eq!(stdout(&out), "1234026869");
}

#[test]
fn unpack_from_hex() {
    let out = run_binpack(&["unpack", "-f", "<I16 I16", "--hex", "3412 0100"]);
    assert_eq!(json(&out), serde_json::json!({ "values": [4660, 1], "next_offset": 4 }));
}

#[test]
fn unpack_with_offset() {
    let out = run_binpack(&["unpack", "-f", "I8", "--hex", "0a0b0c", "--offset", "2"]);
    assert_eq!(json(&out), serde_json::json!({ "values": [12], "next_offset": 3 }));
}

#[test]
fn pack_file_then_unpack_file() {
    let dir = test_temp_dir("roundtrip");
    let bin = dir.join("out.bin");
    let format = "b4 i16 g V z A";
    let values = r#"[[true,false,true,true],-2,1.5,300,"grüße",[1,2,255]]"#;

    let pack = run_binpack(&["pack", "-f", format, values, "-o", bin.to_str().unwrap()]);
    assert!(pack.status.success(), "pack failed: {}", String::from_utf8_lossy(&pack.stderr));
    assert!(!dir.join("out.bin.tmp").exists());

    let bytes = fs::read(&bin).expect("read packed file");
    let size = run_binpack(&["size", "-f", format, values]);
    assert_eq!(json(&size)["size"], bytes.len());

    let unpack = run_binpack(&["unpack", "-f", format, "-i", bin.to_str().unwrap()]);
    let doc = json(&unpack);
    let expected: serde_json::Value = serde_json::from_str(values).unwrap();
    assert_eq!(doc["values"], expected);
    assert_eq!(doc["next_offset"], bytes.len());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unsigned_64_bit_values_print_unsigned() {
    let out = run_binpack(&["unpack", "-f", "I64 i64", "--hex", "ffffffffffffffff ffffffffffffffff"]);
    assert_eq!(json(&out)["values"], serde_json::json!([u64::MAX, -1]));
}

#[test]
fn size_prediction_without_values() {
    let out = run_binpack(&["size", "-f", "i32 z x2"]);
    assert_eq!(
        json(&out),
        serde_json::json!({ "fixed_bytes": 6, "variable_fields": 1, "exact": null })
    );
    let out = run_binpack(&["size", "-f", "i32 f64"]);
    assert_eq!(json(&out)["exact"], 12);
}

#[test]
fn pretty_output_is_multiline() {
    let out = run_binpack(&["unpack", "-f", "b", "--hex", "01", "--pretty"]);
    let text = stdout(&out);
    assert!(text.contains('\n'));
    assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap()["values"], serde_json::json!([true]));
}

#[test]
fn format_error_exits_with_one() {
    let out = run_binpack(&["pack", "-f", "i12", "[1]"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid integer width 12"));
}

#[test]
fn argument_error_exits_with_one() {
    let out = run_binpack(&["pack", "-f", "i", "[1, 2]"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("too many arguments"));

    let out = run_binpack(&["pack", "-f", "i", "[1, 2]", "--ignore-extra"]);
    assert_eq!(stdout(&out), "01000000");
}

#[test]
fn data_error_exits_with_two() {
    let out = run_binpack(&["unpack", "-f", "i32", "--hex", "0102"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unexpected end of data"));
}

#[test]
fn lenient_strings_flag() {
    let out = run_binpack(&["unpack", "-f", "z", "--hex", "6162"]);
    assert_eq!(out.status.code(), Some(2));

    let out = run_binpack(&["unpack", "-f", "z", "--hex", "6162", "--lenient-strings"]);
    assert_eq!(json(&out)["values"], serde_json::json!(["ab"]));
}

#[test]
fn lossy_utf8_flag() {
    let out = run_binpack(&["unpack", "-f", "p", "--hex", "01ff", "--lossy-utf8"]);
    assert_eq!(json(&out)["values"], serde_json::json!(["\u{FFFD}"]));
}

#[test]
fn non_finite_floats_as_strings() {
    let out = run_binpack(&["pack", "-f", "f32 g", r#"["inf", "NaN"]"#]);
    let hex = stdout(&out);
    let out = run_binpack(&["unpack", "-f", "f32 g", "--hex", &hex]);
    assert_eq!(json(&out)["values"], serde_json::json!(["inf", "NaN"]));
}

#[test]
fn invalid_json_is_rejected() {
    let out = run_binpack(&["pack", "-f", "i", "not json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Fehler: JSON-Parse-Fehler:"));
    let out = run_binpack(&["pack", "-f", "i", r#"["seven"]"#]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("Fehler: JSON-Wert-Fehler:"), "{stderr}");
    assert!(stderr.contains("cannot convert"));
}

#[test]
fn invalid_hex_is_rejected() {
    let out = run_binpack(&["unpack", "-f", "b", "--hex", "0g"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Fehler: Hex-Fehler:"));
}
