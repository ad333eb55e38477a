//! Parameterised path derivation tests for `dockergen-core`.

use std::path::{Path, PathBuf};

use dockergen_core::paths::{
    definition_label, derive_output_dir, derive_relative, flavor_segment, DEFAULT_FLAVOR,
};
use dockergen_core::{CoreError, ImageDefinition, ScalarValue};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn base(comfyui: &str, cuda: &str) -> ImageDefinition {
    ImageDefinition::new()
        .with("comfyui_version", comfyui)
        .with("cuda_version", cuda)
}

// ---------------------------------------------------------------------------
// Flavor segment
// ---------------------------------------------------------------------------

#[rstest]
#[case("runtime")]
#[case("devel")]
#[case("full-with-models")]
#[case("Mixed Case")]
fn explicit_flavor_is_last_segment_verbatim(#[case] flavor: &str) {
    let def = base("v0.3.9", "12.4.0").with("flavor", flavor);
    let dir = derive_output_dir(Path::new("dockerfiles"), &def).expect("derive");
    assert_eq!(dir.file_name().and_then(|n| n.to_str()), Some(flavor));
}

#[rstest]
#[case(None)]
#[case(Some(ScalarValue::Null))]
#[case(Some(ScalarValue::from("")))]
fn absent_or_blank_flavor_defaults_to_runtime(#[case] flavor: Option<ScalarValue>) {
    let mut def = base("v0.3.9", "12.4.0");
    if let Some(value) = flavor {
        def.insert("flavor", value);
    }
    assert_eq!(flavor_segment(&def), DEFAULT_FLAVOR);
    let dir = derive_output_dir(Path::new("dockerfiles"), &def).expect("derive");
    assert!(dir.ends_with("runtime"));
}

// ---------------------------------------------------------------------------
// Exact composition
// ---------------------------------------------------------------------------

#[rstest]
#[case("dockerfiles", "v0.3.9", "12.4.0", "runtime", "dockerfiles/comfyui-v0.3.9/cuda-12.4.0/runtime")]
#[case("out", "v0.3.10", "12.6.3", "devel", "out/comfyui-v0.3.10/cuda-12.6.3/devel")]
#[case("/abs/root", "master", "11.8", "runtime", "/abs/root/comfyui-master/cuda-11.8/runtime")]
#[case("dockerfiles", "v 0.3", "12.4.0", "x", "dockerfiles/comfyui-v 0.3/cuda-12.4.0/x")]
fn path_is_exact_join(
    #[case] root: &str,
    #[case] comfyui: &str,
    #[case] cuda: &str,
    #[case] flavor: &str,
    #[case] expected: &str,
) {
    let def = base(comfyui, cuda).with("flavor", flavor);
    let dir = derive_output_dir(Path::new(root), &def).expect("derive");
    assert_eq!(dir, PathBuf::from(expected));
}

#[test]
fn numeric_versions_use_json_text() {
    let def = ImageDefinition::new()
        .with("comfyui_version", 3_i64)
        .with("cuda_version", 12.4);
    let rel = derive_relative(&def).expect("derive");
    assert_eq!(rel, PathBuf::from("comfyui-3/cuda-12.4/runtime"));
}

#[test]
fn extra_keys_do_not_affect_path() {
    let plain = base("v0.3.9", "12.4.0");
    let extra = plain
        .clone()
        .with("base_image", "nvidia/cuda:12.4.0")
        .with("python_version", "3.12");
    assert_eq!(
        derive_relative(&plain).unwrap(),
        derive_relative(&extra).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Missing required fields
// ---------------------------------------------------------------------------

#[rstest]
#[case("comfyui_version")]
#[case("cuda_version")]
fn missing_required_field_is_reported(#[case] field: &str) {
    let def: ImageDefinition = [("comfyui_version", "v0.3.9"), ("cuda_version", "12.4.0")]
        .into_iter()
        .filter(|(k, _)| *k != field)
        .collect();
    match derive_relative(&def) {
        Err(CoreError::MissingField { field: reported }) => assert_eq!(reported, field),
        other => panic!("expected MissingField for {field}, got {other:?}"),
    }
    assert_eq!(definition_label(7, &def), "#7");
}

#[test]
fn empty_required_field_is_missing() {
    let def = base("", "12.4.0");
    assert!(matches!(
        derive_relative(&def),
        Err(CoreError::MissingField { field: "comfyui_version" })
    ));
}
