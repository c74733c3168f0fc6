//! Integration tests for the manifest converter
//!
//! Tests the full pipeline: zstd jsonwall manifest -> normalize -> document graph -> SPDX JSON

use std::io::Write;
use std::path::PathBuf;

use chisel_sbom_builder::{
    Converter, ConverterConfigBuilder, SbomBuilderError, SpdxOptions, to_spdx_json,
};

const MANIFEST: &str = r#"{"jsonwall":"1.0","schema":"1.0","count":5}
{"kind":"content","slice":"test_slice","path":"/test"}
{"kind":"package","name":"test","version":"1.0","sha256":"sha256","arch":"amd64"}
{"kind":"path","path":"/dir/","mode":"0755","slices":["test_slice"]}
{"kind":"path","path":"/test","mode":"0644","slices":["test_slice"],"sha256":"sha256","size":1024}
{"kind":"slice","name":"test_slice"}
"#;

fn write_manifest(dir: &tempfile::TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("manifest.wall");
    let mut file = std::fs::File::create(&path).unwrap();
    let compressed = zstd::stream::encode_all(text.as_bytes(), 3).unwrap();
    file.write_all(&compressed).unwrap();
    path
}

fn fixed_options() -> SpdxOptions {
    SpdxOptions {
        namespace: Some("https://example.com/spdx/test".to_owned()),
        created: Some("2024-01-01T00:00:00Z".to_owned()),
        ..Default::default()
    }
}

#[test]
fn test_e2e_manifest_to_graph() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let config = ConverterConfigBuilder::new()
        .document_name("test")
        .build()
        .unwrap();
    let graph = Converter::new(config).unwrap().convert_path(&path).unwrap();

    assert_eq!(graph.packages.len(), 2);
    assert_eq!(graph.files.len(), 1, "directory records should be dropped");
    let edges: Vec<String> = graph.relationships.iter().map(ToString::to_string).collect();
    assert_eq!(
        edges,
        [
            "DESCRIBES(DOCUMENT,Package-test)",
            "CONTAINS(Package-test,Slice-test_slice)",
            "CONTAINS(Slice-test_slice,File-/test)",
        ]
    );
}

#[test]
fn test_e2e_manifest_to_spdx_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let graph = Converter::default().convert_path(&path).unwrap();
    let json = to_spdx_json(&graph, &fixed_options()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["spdxVersion"], "SPDX-2.3");
    assert_eq!(v["name"], "manifest");
    assert_eq!(v["packages"][0]["name"], "test");
    assert_eq!(v["packages"][0]["supplier"], "Person: Ubuntu Developers <ubuntu-devel-discuss@lists.ubuntu.com>");
    assert_eq!(v["packages"][1]["name"], "test_slice");
    assert_eq!(v["files"][0]["fileName"], "/test");
    assert_eq!(v["relationships"][2]["relationshipType"], "CONTAINS");
    assert_eq!(v["relationships"][2]["spdxElementId"], "SPDXRef-Slice-test_slice");
}

#[test]
fn test_contradictory_manifest_fails() {
    let text = r#"{"jsonwall":"1.0","schema":"1.0","count":1}
{"kind":"path","path":"/bad","mode":"0644","slices":["test_slice"],"sha256":"a","final_sha256":"b","link":"/x"}
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, text);

    let err = Converter::default().convert_path(&path).unwrap_err();
    assert!(matches!(err, SbomBuilderError::ModifiedLink { ref path, .. } if path == "/bad"));
}

#[test]
fn test_oversized_manifest_rejected_before_decompression() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let config = ConverterConfigBuilder::new()
        .max_manifest_size(16)
        .build()
        .unwrap();
    let err = Converter::new(config).unwrap().convert_path(&path).unwrap_err();
    assert!(matches!(err, SbomBuilderError::FileTooBig { max: 16, .. }));
}

#[test]
fn test_decompression_bomb_rejected() {
    // 압축률이 높은 큰 manifest: 파일 크기는 제한 이하, 압축 해제 후 초과
    let mut text = String::from("{\"jsonwall\":\"1.0\",\"schema\":\"1.0\",\"count\":20000}\n");
    for _ in 0..20_000 {
        text.push_str("{\"kind\":\"slice\",\"name\":\"test_slice\"}\n");
    }
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, &text);
    let compressed_size = std::fs::metadata(&path).unwrap().len() as usize;
    assert!(compressed_size < 64 * 1024);

    let config = ConverterConfigBuilder::new()
        .max_manifest_size(64 * 1024)
        .build()
        .unwrap();
    let err = Converter::new(config).unwrap().convert_path(&path).unwrap_err();
    assert!(matches!(err, SbomBuilderError::DecompressedTooLarge { .. }));
}

#[test]
fn test_corrupt_manifest_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.wall");
    std::fs::write(&path, b"not zstd at all").unwrap();

    let err = Converter::default().convert_path(&path).unwrap_err();
    assert!(matches!(err, SbomBuilderError::ManifestRead(_)));
    assert!(err.to_string().starts_with("cannot read manifest"));
}

#[test]
fn test_malformed_record_reports_line() {
    let text = "{\"jsonwall\":\"1.0\",\"schema\":\"1.0\",\"count\":1}\n{\"kind\":\"slice\"\n";
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, text);

    let err = Converter::default().convert_path(&path).unwrap_err();
    assert!(matches!(err, SbomBuilderError::ManifestParse { line: 2, .. }));
}
