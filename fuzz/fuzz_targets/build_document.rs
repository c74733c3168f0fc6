#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use chisel_sbom_builder::{
    PackageInfo, PathInfo, SliceInfo, SpdxOptions, build_document, to_spdx_json,
};

/// 퍼저용 구조적 문서 입력
#[derive(Arbitrary, Debug)]
struct FuzzDocument {
    packages: Vec<FuzzPackage>,
    slices: Vec<String>,
    paths: Vec<FuzzPath>,
}

#[derive(Arbitrary, Debug)]
struct FuzzPackage {
    name: String,
    version: String,
    sha256: String,
}

#[derive(Arbitrary, Debug)]
struct FuzzPath {
    path: String,
    slices: Vec<String>,
    sha256: String,
    final_sha256: String,
    link: String,
    inode: u8,
}

fuzz_target!(|input: FuzzDocument| {
    // 입력 크기 제한 (퍼징 성능)
    let packages: Vec<PackageInfo> = input
        .packages
        .into_iter()
        .take(50)
        .map(|p| PackageInfo {
            name: p.name,
            version: p.version,
            sha256: p.sha256,
        })
        .collect();
    let slices: Vec<SliceInfo> = input
        .slices
        .into_iter()
        .take(50)
        .map(|name| SliceInfo { name })
        .collect();
    let paths: Vec<PathInfo> = input
        .paths
        .into_iter()
        .take(200)
        .map(|p| PathInfo {
            path: p.path,
            mode: "0644".to_owned(),
            slices: p.slices,
            sha256: p.sha256,
            final_sha256: p.final_sha256,
            link: p.link,
            inode: u64::from(p.inode),
        })
        .collect();

    let expected_edges = packages.len()
        + slices.len()
        + paths.iter().map(|p| p.slices.len()).sum::<usize>();

    let Ok(graph) = build_document("fuzz", &slices, &packages, &paths) else {
        return;
    };

    // 패키지/슬라이스마다 1개, 경로마다 소유 슬라이스 수만큼 간선
    assert_eq!(graph.files.len(), paths.len());
    assert_eq!(graph.relationships.len(), expected_edges);

    let options = SpdxOptions {
        created: Some("2024-01-01T00:00:00Z".to_owned()),
        ..Default::default()
    };
    if let Ok(json) = to_spdx_json(&graph, &options) {
        let _: serde_json::Value =
            serde_json::from_str(&json).expect("SPDX output must be valid JSON");
    }
});
