// Build scripts signal errors by panicking; there is no caller to
// return Result to. Cargo treats a non-zero exit as a build failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Build script for the dropconv binary crate.
//!
//! ## Stylesheet
//!
//! Copies `site/dropconv.css` into `OUT_DIR` so that `main.rs` can
//! `include_str!` it via a stable environment variable path instead of
//! a `../../site/` relative path.
//!
//! ## Generated `index.html`
//!
//! Generates `index.html` at the crate root with the default widget
//! config embedded as a JSON block, so the dev server page exercises
//! the same config path a hosting page does.

use std::path::{Path, PathBuf};
use std::{env, fs};

use dropconv_core::WidgetConfig;

/// Must match `dropconv_io::config::CONFIG_ELEMENT_ID`.
const CONFIG_ELEMENT_ID: &str = "dropconv-config";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    // Workspace root is two levels up from crates/dropconv/.
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .expect("could not find workspace root");
    let site_dir = workspace_root.join("site");

    stage_stylesheet(&site_dir, &out_dir);
    generate_index_html(&manifest_dir);
}

/// Copy `site/dropconv.css` into `OUT_DIR` and expose its path as
/// `DROPCONV_CSS_PATH` for `include_str!(env!("DROPCONV_CSS_PATH"))`.
fn stage_stylesheet(site_dir: &Path, out_dir: &Path) {
    let src = site_dir.join("dropconv.css");
    let dst = out_dir.join("dropconv.css");

    println!("cargo:rerun-if-changed={}", src.display());
    fs::copy(&src, &dst)
        .unwrap_or_else(|e| panic!("failed to stage {}: {e}", src.display()));
    println!("cargo:rustc-env=DROPCONV_CSS_PATH={}", dst.display());
}

/// Generate `crates/dropconv/index.html` with the default config block.
///
/// Note: this writes to `manifest_dir` (the source tree) rather than
/// `OUT_DIR` because Dioxus CLI expects `index.html` at the crate
/// root for serving. The file is gitignored.
fn generate_index_html(manifest_dir: &Path) {
    let config_json = serde_json::to_string_pretty(&WidgetConfig::default())
        .expect("default widget config serializes");

    assert!(
        !config_json.contains("</script"),
        "widget config must not contain '</script'; it is inlined in a <script> tag"
    );

    let index_html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>{{app_title}}</title>
    <meta content="text/html;charset=utf-8" http-equiv="Content-Type" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <meta charset="UTF-8" />
    <script type="application/json" id="{CONFIG_ELEMENT_ID}">
{config_json}
    </script>
  </head>
  <body>
    <div id="main"></div>
  </body>
</html>
"#
    );

    let index_path = manifest_dir.join("index.html");
    fs::write(&index_path, index_html)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", index_path.display()));
}
