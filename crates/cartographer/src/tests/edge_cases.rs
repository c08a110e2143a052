//! Facade-level and boundary-condition tests.

use tempfile::TempDir;

use super::test_helpers::*;
use crate::facade::CartographerError;
use crate::record::EdgeError;

#[tokio::test]
async fn unresolvable_entry_is_file_not_found() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[]);

    let error = cartographer_at(&root).analyze("./nope").await.unwrap_err();

    assert!(matches!(error, CartographerError::EntryNotFound(_)));
    assert_eq!(error.to_string(), "file not found: ./nope");
}

#[tokio::test]
async fn empty_entry_specifier_is_rejected() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[]);

    let error = cartographer_at(&root).analyze("").await.unwrap_err();
    assert!(matches!(error, CartographerError::EmptySpecifier));
}

#[tokio::test]
async fn bare_entry_resolves_through_module_directories() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("node_modules/pkg/package.json", r#"{"main":"lib.js"}"#),
            ("node_modules/pkg/lib.js", "require('./helper');\n"),
            ("node_modules/pkg/helper.js", ""),
        ],
    );

    let record = cartographer_at(&root).analyze("pkg").await.unwrap();

    assert!(record.path.ends_with("lib.js"));
    let dep = &record.dependencies().unwrap()[0];
    assert!(dep.file.as_ref().unwrap().path.ends_with("helper.js"));
}

#[tokio::test]
async fn malformed_manifest_on_the_entry_path_is_fatal() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("lib/package.json", "{ nope"), ("lib/index.js", "")],
    );

    let error = cartographer_at(&root).analyze("./lib").await.unwrap_err();

    assert!(matches!(error, CartographerError::Resolve(_)));
    assert!(error.to_string().starts_with("malformed package manifest: "));
}

#[tokio::test]
async fn malformed_manifest_inside_the_graph_is_per_edge() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("main.js", "require('./broken');\nrequire('./fine');\n"),
            ("broken/package.json", "{ nope"),
            ("fine.js", ""),
        ],
    );

    let record = cartographer_at(&root).analyze("./main.js").await.unwrap();
    let deps = record.dependencies().unwrap();

    let broken = &deps[0];
    assert!(broken.file.is_none());
    match broken.error.as_ref().unwrap() {
        EdgeError::Resolve(message) => {
            assert!(message.starts_with("malformed package manifest: "));
        }
        other => panic!("unexpected edge error: {other}"),
    }

    // The walk continued past the failure.
    assert!(deps[1].file.is_some());
}

#[tokio::test]
async fn empty_import_specifier_is_recorded_per_edge() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[("main.js", "require('');\n")]);

    let record = cartographer_at(&root).analyze("./main.js").await.unwrap();
    let dep = &record.dependencies().unwrap()[0];

    assert_eq!(dep.specifier, "");
    assert!(dep.file.is_none());
    assert_eq!(
        dep.error,
        Some(EdgeError::Resolve("specifier must not be empty".to_string()))
    );
}

#[tokio::test]
async fn references_survive_into_dependency_records() {
    let temp = TempDir::new().unwrap();
    let source = "const b = require('./b');\nconst again = require('./b');\n";
    let root = create_test_project(&temp, &[("main.js", source), ("b.js", "")]);

    let record = cartographer_at(&root).analyze("./main.js").await.unwrap();
    let dep = &record.dependencies().unwrap()[0];

    assert_eq!(dep.references.len(), 2);
    for reference in &dep.references {
        assert_eq!(&source[reference.start..reference.end], "require('./b')");
    }
}

#[tokio::test]
async fn deep_chain_resolves_transitively() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("m0.js", "require('./m1');\n"),
            ("m1.js", "require('./m2');\n"),
            ("m2.js", "require('./m3');\n"),
            ("m3.js", ""),
        ],
    );

    let cartographer = cartographer_at(&root);
    let record = cartographer.analyze("./m0.js").await.unwrap();

    let mut current = record;
    for expected in ["m1.js", "m2.js", "m3.js"] {
        let next = current.dependencies().unwrap()[0].file.clone().unwrap();
        assert!(next.path.ends_with(expected));
        current = next;
    }
    assert!(current.dependencies().unwrap().is_empty());
    assert_eq!(cartographer.resolver().files().len(), 4);
}

#[tokio::test]
async fn grapher_reset_allows_reanalysis() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[("main.js", "require('./b');\n"), ("b.js", "")],
    );

    let cartographer = cartographer_at(&root);
    let first = cartographer.analyze("./main.js").await.unwrap();

    cartographer.grapher().reset();
    cartographer.resolver().files().clear();

    let second = cartographer.analyze("./main.js").await.unwrap();

    // A fresh walk over a cleared cache builds fresh records.
    assert!(!std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(second.dependencies().unwrap().len(), 1);
}
