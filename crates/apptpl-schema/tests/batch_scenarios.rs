//! Integration test: batch validation over real files on disk.
//!
//! Covers the mixed batch of a clean template, a template missing a
//! required field, and a template that only trips a business rule, under
//! both lenient and strict policies.

use std::path::{Path, PathBuf};

use apptpl_schema::TemplateValidator;

const CLEAN: &str = r#"
namespace:
  id: ns-prod
  location:
    provider: cloud
    region: us-south
application_template:
  id: tpl-web
  name: Web application
  summary: Three-tier web app
  labels: [web, demo]
  tags:
    - key: env
      value: prod
  actions:
    - id: act-deploy
      name: Deploy
  variable_options:
    - name: instance_count
      type: number
      editable: true
  module_source: git::https://example.com/modules/web.git
  module_id: mod-web
  tf_execution_mode: agent
  tf_agent_pool_id: pool-7
use_module_readme: false
"#;

const MISSING_TEMPLATE_NAME: &str = r#"
namespace:
  id: ns-prod
application_template:
  id: tpl-broken
"#;

const MODULE_SOURCE_WITHOUT_ID: &str = r#"
namespace:
  id: ns-prod
application_template:
  id: tpl-module
  name: Module backed
  module_source: x
"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

struct Fixture {
    _dir: tempfile::TempDir,
    clean: PathBuf,
    invalid: PathBuf,
    warned: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let clean = write(dir.path(), "file1.yaml", CLEAN);
    let invalid = write(dir.path(), "file2.yaml", MISSING_TEMPLATE_NAME);
    let warned = write(dir.path(), "file3.yaml", MODULE_SOURCE_WITHOUT_ID);
    Fixture {
        _dir: dir,
        clean,
        invalid,
        warned,
    }
}

#[test]
fn clean_and_warned_pass_when_lenient() {
    let f = fixture();
    let outcome = TemplateValidator::default().run_batch(&[f.clean, f.warned], false);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.warning_count(), 1);
}

#[test]
fn strict_mode_fails_on_warning() {
    let f = fixture();
    let outcome = TemplateValidator::default().run_batch(&[f.clean, f.warned], true);
    assert_eq!(outcome.exit_code(), 1);
    // The warned file is still structurally valid.
    assert!(outcome.files()[1].result().is_valid());
    assert!(outcome.files()[1].fails(true));
}

#[test]
fn invalid_file_fails_regardless_of_strictness() {
    let f = fixture();
    let paths = vec![f.clean, f.invalid, f.warned];
    let validator = TemplateValidator::default();

    for strict in [false, true] {
        let outcome = validator.run_batch(&paths, strict);
        assert_eq!(outcome.exit_code(), 1, "strict = {strict}");
        assert_eq!(outcome.files().len(), 3);
        assert_eq!(outcome.valid_count(), 2);
        assert_eq!(outcome.invalid_count(), 1);

        let invalid = &outcome.files()[1];
        assert_eq!(invalid.path(), paths[1].as_path());
        assert!(invalid.result().errors()[0].contains("application_template.name"));
    }
}

#[test]
fn results_follow_input_order() {
    let f = fixture();
    let paths = vec![f.warned, f.invalid, f.clean];
    let outcome = TemplateValidator::default().run_batch(&paths, false);
    let reported: Vec<&Path> = outcome.files().iter().map(|r| r.path()).collect();
    let expected: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    assert_eq!(reported, expected);
}

#[test]
fn malformed_yaml_is_a_syntax_error() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write(dir.path(), "bad.yaml", "namespace:\n  id: [ns-1\n");
    let outcome = TemplateValidator::default().run_batch(&[bad], false);
    let result = outcome.files()[0].result();
    assert!(!result.is_valid());
    assert!(result.errors()[0].starts_with("invalid YAML:"), "got: {:?}", result.errors());
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn directory_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = TemplateValidator::default().run_batch(&[dir.path().to_path_buf()], false);
    let result = outcome.files()[0].result();
    assert!(!result.is_valid());
    assert!(result.errors()[0].starts_with("cannot read"));
}

#[test]
fn same_batch_twice_is_identical() {
    let f = fixture();
    let paths = vec![f.clean, f.invalid, f.warned];
    let validator = TemplateValidator::default();
    assert_eq!(validator.run_batch(&paths, true), validator.run_batch(&paths, true));
}
