//! End-to-end build against shell-script stand-ins for cargo and
//! uniffi-bindgen.
//!
//! Kept to a single test in its own binary: the scripts are written and
//! then executed, and a concurrent fork from another test thread could
//! still hold them open for writing.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const LIB: &str = "libdeepseek_ocr_android.so";

const FAKE_CARGO: &str = r#"#!/bin/sh
if [ -n "$FAKE_CARGO_FAIL" ]; then
    echo "error: could not compile" >&2
    exit 3
fi
: > "$FAKE_ARTIFACT"
"#;

const BROKEN_RUSTUP: &str = "#!/bin/sh\necho 'error: toolchain is broken' >&2\nexit 1\n";

// The last argument is the output directory.
const FAKE_BINDGEN: &str = r#"#!/bin/sh
for last; do :; done
: > "$last/DeepseekOcr.kt"
"#;

fn install(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_build_with_fake_toolchain() {
    let tmp = TempDir::new().unwrap();
    let bin = tmp.path().join("bin");
    let out_dir = tmp.path().join("android");
    let bindings = tmp.path().join("kotlin");
    let artifact = out_dir.join("arm64-v8a/release").join(LIB);

    fs::create_dir_all(&bin).unwrap();
    fs::create_dir_all(artifact.parent().unwrap()).unwrap();
    install(&bin, "cargo", FAKE_CARGO);
    install(&bin, "cargo-ndk", "#!/bin/sh\nexit 0\n");
    install(&bin, "uniffi-bindgen", FAKE_BINDGEN);
    install(&bin, "rustup", BROKEN_RUSTUP);

    let droidbuild = || {
        let mut cmd = Command::cargo_bin("droidbuild").unwrap();
        cmd.current_dir(tmp.path())
            .env("PATH", &bin)
            .env("HOME", tmp.path())
            .env("FAKE_ARTIFACT", &artifact)
            .env_remove("FAKE_CARGO_FAIL")
            .env_remove("DROIDBUILD_CONFIG")
            .env_remove("ANDROID_TARGET")
            .env_remove("ANDROID_ABI")
            .env_remove("ANDROID_PROFILE")
            .env("ANDROID_OUT_DIR", &out_dir)
            .env("BINDINGS_DIR", &bindings);
        cmd
    };

    // Generator not installed under this name: build succeeds, bindings skipped
    droidbuild()
        .env("UNIFFI_BINDGEN", "no-such-bindgen")
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished"))
        .stdout(predicate::str::contains(artifact.display().to_string()))
        .stdout(predicate::str::contains("no-such-bindgen` not found"));
    assert!(artifact.is_file());
    assert!(!bindings.exists());

    // Generator present: bindings land in a freshly created directory
    droidbuild()
        .env_remove("UNIFFI_BINDGEN")
        .arg("build")
        .assert()
        .success();
    assert!(bindings.join("DeepseekOcr.kt").is_file());

    // Compiler failure: its exit code is propagated and its stderr shown
    droidbuild()
        .env_remove("UNIFFI_BINDGEN")
        .env("FAKE_CARGO_FAIL", "1")
        .arg("build")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("could not compile"))
        .stderr(predicate::str::contains("failed to compile"));

    // Doctor reports the listing failure in its own report, not rustup's stderr
    droidbuild()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("could not list targets"))
        .stderr(predicate::str::contains("toolchain is broken").not());

    // Plain path: rustup's own diagnostic reaches the user
    fs::remove_file(bin.join("cargo-ndk")).unwrap();
    droidbuild()
        .env("CARGO_TARGET_DIR", tmp.path().join("target"))
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("toolchain is broken"))
        .stderr(predicate::str::contains("failed to provision target"));
}
