//! Generate `include/school_finder.h` from the `extern "C"` surface.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let config = cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("SCHOOL_FINDER_H".into()),
        ..Default::default()
    };

    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(bindings) => {
            bindings.write_to_file(crate_dir.join("include/school_finder.h"));
        }
        // Header generation must not block the library build.
        Err(err) => println!("cargo:warning=cbindgen failed: {err}"),
    }
}
