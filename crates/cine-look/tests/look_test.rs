//! Look file loading from disk.

use std::io::Write;

use approx::assert_abs_diff_eq;
use cine_look::{LookError, LookFile};
use cine_ops::LookParams;
use cine_ops::pipeline::{apron, is_identity};

#[test]
fn test_load_from_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        tmp,
        "name: dusk\nfilm:\n  amount: 0.7\n  preset: portra\nhalation:\n  enabled: true\n  amount: 0.4\n  radius: 30"
    )
    .unwrap();

    let file = LookFile::from_file(tmp.path()).unwrap();
    assert_eq!(file.name.as_deref(), Some("dusk"));
    let look = file.to_params().unwrap();
    assert_abs_diff_eq!(look.film.amount, 0.7);
    assert!(look.halation.enable);
    assert_eq!(apron::for_look(&look, 1.0), 32);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = LookFile::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, LookError::NotFound { .. }));
}

#[test]
fn test_malformed_yaml() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    writeln!(tmp, "glow: [unterminated").unwrap();
    assert!(matches!(LookFile::from_file(tmp.path()), Err(LookError::Yaml(_))));
}

#[test]
fn test_template_parses_to_default() {
    let yaml = LookFile::template().unwrap();
    assert!(yaml.contains("halation:"));
    assert!(yaml.contains("stock: custom"));
    let look = LookFile::from_yaml_str(&yaml).unwrap().to_params().unwrap();
    assert_eq!(look, LookParams::default());
}

#[test]
fn test_neutral_file_is_identity() {
    let yaml = "tonal:\n  enabled: false\nhighlight:\n  enabled: false\nglow:\n  amount: 1.0\n";
    let look = LookFile::from_yaml_str(yaml).unwrap().to_params().unwrap();
    assert!(is_identity(&look));
}

#[test]
fn test_roi_margin_matches_enabled_modules() {
    let yaml = "mist:\n  enabled: true\nstreak:\n  enabled: true\n  length: 0.5\naberration:\n  enabled: true\n  amount: 0.5\n";
    let margin = LookFile::from_yaml_str(yaml).unwrap().roi_margin().unwrap();
    assert_abs_diff_eq!(margin, 10.0 + 6.0 + 40.0 + 10.0);
}
