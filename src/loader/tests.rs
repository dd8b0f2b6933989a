// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

fn isolated() -> LoaderBuilder {
    Loader::builder().store(Arc::new(VariableStore::new()))
}

fn plain(yaml: &str) -> Value {
    let node: serde_yaml::Value = serde_yaml::from_str(yaml).expect("fixture is valid YAML");
    Value::from_plain(&node).expect("fixture has no tags")
}

fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_includes_share_variables() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(
        dir.path(),
        "test.yaml",
        "a: !store [b, 2]\n\
         c: !include inc1/include_var.yaml\n\
         d: $e\n\
         f: !sum [$g, !sum [!include inc2/include_seq.yaml]]\n\
         h: !join [$i, ' ', world]\n",
    );
    write(
        dir.path(),
        "inc1/include_var.yaml",
        "e: !store [e, !product [$b, 2]]\n\
         g: !store [g, 2]\n\
         i: i<=hello\n",
    );
    write(dir.path(), "inc2/include_seq.yaml", "[3, 4, 5]\n");

    let loader = isolated().build();
    let value = loader.load_file(&main).unwrap();

    assert_eq!(
        value,
        plain("a: 2\nc: {e: 4, g: 2, i: hello}\nd: 4\nf: 14\nh: hello world\n")
    );
    assert_eq!(loader.store().keys(), vec!["b", "e", "g", "i"]);
}

#[test]
fn test_plain_document_is_structural() {
    let text = "name: mnist\nlayers:\n  - units: 64\n    dropout: 0.5\n  - null\nflags: {fast: true}\n";
    let value = isolated().build().load_str(text).unwrap();
    assert_eq!(value, plain(text));
}

#[test]
fn test_store_outlives_a_load() {
    let loader = isolated().build();
    loader.load_str("batch: batch_size <= 32\n").unwrap();
    let value = loader.load_str("half: !product [$batch_size, 0.5]\n").unwrap();
    assert_eq!(value, plain("half: 16.0\n"));
}

#[test]
fn test_separate_stores_are_isolated() {
    isolated().build().load_str("x: secret <= 1\n").unwrap();
    let err = isolated().build().load_str("y: $secret\n").unwrap_err();
    assert!(matches!(err.root_cause(), ConfigError::UndefinedVariable { .. }));
}

#[test]
fn test_error_location_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "model.yaml",
        "model:\n  layers:\n    - 1\n    - $missing\n",
    );

    let err = isolated().build().load_file(&path).unwrap_err();
    let locations = err.locations();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].node, "model.layers[1]");
    assert_eq!(locations[0].file.as_deref(), Some(path.as_path()));
    assert!(err.to_string().contains("model.layers[1]"));
    assert!(err.hint().is_some());
}

#[test]
fn test_error_in_include_has_both_locations() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.yaml", "model: !include parts/model.yaml\n");
    write(dir.path(), "parts/model.yaml", "units: !sum [1, wide]\n");

    let err = isolated().build().load_file(&main).unwrap_err();
    let locations = err.locations();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].node, "model");
    assert_eq!(locations[1].node, "units");
    assert!(
        locations[1]
            .file
            .as_ref()
            .is_some_and(|f| f.ends_with("parts/model.yaml"))
    );
    assert!(matches!(err.root_cause(), ConfigError::TypeMismatch { tag: "sum", .. }));
}

#[test]
fn test_include_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.yaml", "c: !include nowhere.yaml\n");

    let err = isolated().build().load_file(&main).unwrap_err();
    assert_eq!(err.code(), 301);
    match err.root_cause() {
        ConfigError::IncludeNotFound { path, .. } => assert!(path.ends_with("nowhere.yaml")),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_missing_top_level_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = isolated().build().load_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileError { .. }));
    assert_eq!(err.code(), 303);
}

#[test]
fn test_parse_error_reports_position() {
    let err = isolated().build().load_str("a: [1, 2\nb: 3\n").unwrap_err();
    match err {
        ConfigError::ParseError { file, line, .. } => {
            assert!(file.is_none());
            assert!(line.is_some());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_non_scalar_key_rejected() {
    let err = isolated().build().load_str("? [1, 2]\n: x\n").unwrap_err();
    assert!(matches!(err.root_cause(), ConfigError::Conversion { .. }));
}

#[test]
fn test_include_depth_guard() {
    let dir = tempfile::tempdir().unwrap();
    let looped = write(dir.path(), "loop.yaml", "again: !include loop.yaml\n");

    let loader = isolated().max_include_depth(3).build();
    assert_eq!(loader.max_include_depth(), Some(3));

    let err = loader.load_file(&looped).unwrap_err();
    assert_eq!(err.locations().len(), 4);
    match err.root_cause() {
        ConfigError::IncludeDepthExceeded { limit, path } => {
            assert_eq!(*limit, 3);
            assert!(path.ends_with("loop.yaml"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_include_depth_limit_is_inclusive() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.yaml", "child: !include child.yaml\n");
    write(dir.path(), "child.yaml", "grandchild: !include grandchild.yaml\n");
    write(dir.path(), "grandchild.yaml", "leaf: 1\n");

    let value = isolated().max_include_depth(2).build().load_file(&main).unwrap();
    assert_eq!(value, plain("child: {grandchild: {leaf: 1}}\n"));

    let err = isolated().max_include_depth(1).build().load_file(&main).unwrap_err();
    assert!(matches!(err.root_cause(), ConfigError::IncludeDepthExceeded { limit: 1, .. }));
}

#[test]
fn test_nested_include_resolves_against_its_own_directory() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.yaml", "data: !include sets/mnist.yaml\n");
    write(dir.path(), "sets/mnist.yaml", "train: !include splits/train.yaml\n");
    write(dir.path(), "sets/splits/train.yaml", "size: 60000\n");

    let value = isolated().build().load_file(&main).unwrap();
    assert_eq!(value, plain("data: {train: {size: 60000}}\n"));
}

#[test]
fn test_named_reader_resolves_includes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared.yaml", "lr: 0.1\n");

    let reader = Cursor::new("opt: !include shared.yaml\n".to_string());
    let source = Source::named_reader(reader, dir.path().join("virtual.yaml"));
    let value = isolated().build().load(source).unwrap();
    assert_eq!(value, plain("opt: {lr: 0.1}\n"));
}

#[test]
fn test_unnamed_reader() {
    let value = isolated()
        .build()
        .load_reader(Cursor::new(b"epochs: !sum [1, 2]\n".to_vec()))
        .unwrap();
    assert_eq!(value, plain("epochs: 3\n"));
}

#[test]
fn test_loader_include_directly() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "part.yaml", "[1, 2]\n");

    let value = isolated().build().include("part.yaml", dir.path()).unwrap();
    assert_eq!(value, plain("[1, 2]\n"));
}

#[test]
fn test_includes_inherit_run_mode() {
    let dir = tempfile::tempdir().unwrap();
    let main = write(dir.path(), "main.yaml", "fit: !include fit.yaml\n");
    write(dir.path(), "fit.yaml", "epochs: !switchcmd {fit: 10, default: 1}\n");

    let value = isolated().run_mode("fit").build().load_file(&main).unwrap();
    assert_eq!(value, plain("fit: {epochs: 10}\n"));
}

#[test]
fn test_later_extension_replaces_earlier() {
    let loader = isolated()
        .run_mode("fit")
        .extension(Extension::SwitchCmd { run_mode: None })
        .build();
    assert_eq!(loader.run_mode(), None);
    assert!(loader.tags().contains("switchcmd"));
}

#[test]
fn test_load_function_with_run_mode() {
    let text = "v: !switchcmd {A: 10, B: 11, default: 12}";
    assert_eq!(load(text, Some("A")).unwrap(), plain("v: 10\n"));
    assert_eq!(load(text, Some("B")).unwrap(), plain("v: 11\n"));
    assert_eq!(load(text, Some("C")).unwrap(), plain("v: 12\n"));
}

#[test]
fn test_load_function_without_run_mode_uses_default() {
    let value = load("v: !switchcmd {A: 10, B: 11, default: 12}", None).unwrap();
    assert_eq!(value, plain("v: 12\n"));

    let err = load("v: !switchcmd {A: 10}", None).unwrap_err();
    match err.root_cause() {
        ConfigError::NoMatchingCase { run_mode, .. } => assert_eq!(*run_mode, None),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_quoting_does_not_prevent_inference() {
    let loader = isolated().build();
    let value = loader
        .load_str("a: 'v <= 3'\nb: '$v'\nc: \"$v\"\n")
        .unwrap();
    assert_eq!(value, plain("a: 3\nb: 3\nc: 3\n"));

    let err = isolated().build().load_str("x: '$v'\n").unwrap_err();
    assert!(matches!(err.root_cause(), ConfigError::UndefinedVariable { name } if name == "v"));
    assert_eq!(err.locations()[0].node, "x");
}

#[test]
fn test_stored_text_keeps_yaml_syntax() {
    let loader = isolated().build();
    let value = loader
        .load_str(
            "c: 'color <= #ff0000'\n\
             t: 't <= a # b'\n\
             m: 'msg <= note: hi'\n\
             l: 'list <= [1, 2]'\n",
        )
        .unwrap();
    assert_eq!(
        value,
        plain("c: '#ff0000'\nt: 'a # b'\nm: 'note: hi'\nl: '[1, 2]'\n")
    );
    assert_eq!(loader.store().get("color").unwrap(), Value::from("#ff0000"));
    assert_eq!(loader.store().get("msg").unwrap(), Value::from("note: hi"));
}

#[test]
fn test_stored_text_typed_scalars_and_tags() {
    let loader = isolated().build();
    let value = loader
        .load_str(
            "n: n <= 5\n\
             f: f <= 0.5\n\
             b: b <= true\n\
             z: z <= ~\n\
             p: p <= !product [$n, 2]\n\
             c: c <= $n\n\
             s: s <= hello world\n",
        )
        .unwrap();
    assert_eq!(
        value,
        plain("n: 5\nf: 0.5\nb: true\nz: null\np: 10\nc: 5\ns: hello world\n")
    );
}

#[test]
fn test_default_loader_uses_global_store() {
    let loader = Loader::new();
    assert!(Arc::ptr_eq(loader.store(), &VariableStore::global()));
    assert_eq!(loader.run_mode(), None);
    assert_eq!(loader.max_include_depth(), None);
}
