//! End-to-end bundling tests over an in-memory module tree.

use std::path::Path;

use fardel_bundler::{BundleError, BundleOptions};
use fardel_graph::{GraphError, GraphMode, MemoryFileSystem};

fn options() -> BundleOptions {
    BundleOptions::new("src/main.js").root("/proj")
}

fn seed_basic(fs: &MemoryFileSystem) {
    fs.add_file(
        "/proj/src/main.js",
        r#"import { greet } from "./src/greet.js";
greet("bundle");
"#,
    );
    fs.add_file(
        "/proj/src/greet.js",
        r#"export function greet(name) {
  console.log("hello " + name);
}
"#,
    );
}

#[test]
fn bundles_to_a_self_executing_artifact() {
    let fs = MemoryFileSystem::new();
    seed_basic(&fs);

    let output = options().bundle(&fs).unwrap();

    assert_eq!(output.modules, 2);
    assert_eq!(output.out_path, Path::new("/proj/dist/bundle.js"));

    let written = fs.file(&output.out_path).expect("artifact on disk");
    assert_eq!(written, output.artifact);

    // Loader plus both factories, keyed by id, started from the entry.
    assert!(written.contains("function load(id)"));
    assert!(written.contains("load(1);"));
    assert!(written.contains("1: [function (require, module, exports) {"));
    assert!(written.contains("2: [function (require, module, exports) {"));
    assert!(written.contains(r#"{"./src/greet.js":2}"#));

    // Module bodies were rewritten into the factory convention.
    assert!(written.contains(r#"const { greet } = require("./src/greet.js");"#));
    assert!(written.contains("module.exports.greet = greet;"));
    assert!(!written.contains("import "));
    assert!(!written.contains("export function"));
}

#[test]
fn shared_module_is_embedded_once_per_import_edge() {
    let fs = MemoryFileSystem::new();
    fs.add_file(
        "/proj/src/main.js",
        "import \"./src/log.js\";\nimport \"./src/mid.js\";\n",
    );
    fs.add_file("/proj/src/mid.js", "import \"./src/log.js\";\n");
    fs.add_file("/proj/src/log.js", "console.log(\"side effect\");\n");

    let output = options().bundle(&fs).unwrap();

    assert_eq!(output.modules, 4, "log.js is duplicated per import edge");
    let copies = output
        .artifact
        .matches("console.log(\"side effect\");")
        .count();
    assert_eq!(copies, 2);
}

#[test]
fn shared_linking_embeds_one_copy() {
    let fs = MemoryFileSystem::new();
    fs.add_file(
        "/proj/src/main.js",
        "import \"./log.js\";\nimport \"./mid.js\";\n",
    );
    fs.add_file("/proj/src/mid.js", "import \"./log.js\";\n");
    fs.add_file("/proj/src/log.js", "console.log(\"side effect\");\n");

    let output = options().mode(GraphMode::Shared).bundle(&fs).unwrap();

    assert_eq!(output.modules, 3);
    let copies = output
        .artifact
        .matches("console.log(\"side effect\");")
        .count();
    assert_eq!(copies, 1);
}

#[test]
fn check_validates_without_writing() {
    let fs = MemoryFileSystem::new();
    seed_basic(&fs);

    let modules = options().check(&fs).unwrap();

    assert_eq!(modules, 2);
    assert!(fs.file(Path::new("/proj/dist/bundle.js")).is_none());
}

#[test]
fn build_errors_pass_through_with_context() {
    let fs = MemoryFileSystem::new();
    fs.add_file("/proj/src/main.js", "import \"./src/missing.js\";\n");

    let err = options().bundle(&fs).unwrap_err();
    match err {
        BundleError::Graph(GraphError::Resolution { specifier, .. }) => {
            assert_eq!(specifier, "./src/missing.js");
        }
        other => panic!("expected resolution error, got {other}"),
    }
    assert!(fs.file(Path::new("/proj/dist/bundle.js")).is_none(), "no partial output");
}

#[test]
fn cycle_fails_the_bundle() {
    let fs = MemoryFileSystem::new();
    fs.add_file("/proj/src/main.js", "import \"./src/a.js\";\n");
    fs.add_file("/proj/src/a.js", "import \"./src/main.js\";\n");

    let err = options().bundle(&fs).unwrap_err();
    assert!(matches!(
        err,
        BundleError::Graph(GraphError::CircularDependency { .. })
    ));
}

#[test]
fn custom_out_dir_and_file_name() {
    let fs = MemoryFileSystem::new();
    seed_basic(&fs);

    let output = options()
        .out_dir("build/js")
        .file_name("app.js")
        .bundle(&fs)
        .unwrap();

    assert_eq!(output.out_path, Path::new("/proj/build/js/app.js"));
    assert!(fs.file(&output.out_path).is_some());
}
