// build.rs: pick the linker script for the target board.
//
// Host builds (no `--target`) get nothing; the kernel only links for a
// bare-metal target.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if os != "none" {
        return;
    }

    let script = match arch.as_str() {
        "x86_64" => "linker-x86_64.ld",
        "aarch64" => "linker-aarch64.ld",
        other => panic!("no linker script for target arch {other:?}"),
    };

    let dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let path = dir.join(script);
    println!("cargo:rerun-if-changed={}", path.display());

    // Static link for bare-metal kernel
    println!("cargo:rustc-link-arg-bins=-T{}", path.display());
    println!("cargo:rustc-link-arg-bins=-nostdlib");
    println!("cargo:rustc-link-arg-bins=-static");
    println!("cargo:rustc-link-arg-bins=--gc-sections");
    println!("cargo:rustc-link-arg-bins=-z");
    println!("cargo:rustc-link-arg-bins=max-page-size=0x1000");
}
