//! 레코드 정규화 -- manifest 레코드를 빌더 입력으로 변환
//!
//! 입력 순서를 그대로 유지하며, `/`로 끝나는 디렉토리 경로만 걸러냅니다.
//! 그 외 검증은 하지 않으므로 실패하지 않습니다.

use tracing::debug;

use crate::manifest::{ManifestData, ManifestPath};
use crate::types::{PackageInfo, PathInfo, SliceInfo};

/// 빌더 입력 세 컬렉션
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedManifest {
    /// 슬라이스 레코드
    pub slices: Vec<SliceInfo>,
    /// 패키지 레코드
    pub packages: Vec<PackageInfo>,
    /// 경로 레코드 (디렉토리 제외)
    pub paths: Vec<PathInfo>,
}

/// package 레코드를 [`PackageInfo`]로 변환합니다.
pub fn process_packages(data: &ManifestData) -> Vec<PackageInfo> {
    data.packages
        .iter()
        .map(|p| PackageInfo {
            name: p.name.clone(),
            version: p.version.clone(),
            sha256: p.digest.clone(),
        })
        .collect()
}

/// slice 레코드를 [`SliceInfo`]로 변환합니다.
pub fn process_slices(data: &ManifestData) -> Vec<SliceInfo> {
    data.slices
        .iter()
        .map(|s| SliceInfo {
            name: s.name.clone(),
        })
        .collect()
}

/// path 레코드를 [`PathInfo`]로 변환합니다. 디렉토리 경로는 제외됩니다.
pub fn process_paths(data: &ManifestData) -> Vec<PathInfo> {
    let paths: Vec<PathInfo> = data
        .paths
        .iter()
        .filter(|p| !is_directory(p))
        .map(|p| PathInfo {
            path: p.path.clone(),
            mode: p.mode.clone(),
            slices: p.slices.clone(),
            sha256: p.sha256.clone(),
            final_sha256: p.final_sha256.clone(),
            link: p.link.clone(),
            inode: p.inode,
        })
        .collect();

    let dropped = data.paths.len() - paths.len();
    if dropped > 0 {
        debug!(dropped, "dropped directory path records");
    }
    paths
}

/// 세 컬렉션을 한 번에 만듭니다.
pub fn normalize(data: &ManifestData) -> NormalizedManifest {
    NormalizedManifest {
        slices: process_slices(data),
        packages: process_packages(data),
        paths: process_paths(data),
    }
}

fn is_directory(path: &ManifestPath) -> bool {
    path.path.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ManifestPackage, ManifestSlice};

    fn path(p: &str) -> ManifestPath {
        ManifestPath {
            path: p.to_owned(),
            mode: "0644".to_owned(),
            slices: vec!["test_slice".to_owned()],
            sha256: "sha256".to_owned(),
            size: 1024,
            ..Default::default()
        }
    }

    #[test]
    fn packages_map_digest_to_sha256() {
        let data = ManifestData {
            packages: vec![ManifestPackage {
                name: "test".to_owned(),
                version: "1.0".to_owned(),
                digest: "sha256".to_owned(),
                arch: "amd64".to_owned(),
            }],
            ..Default::default()
        };
        assert_eq!(
            process_packages(&data),
            vec![PackageInfo {
                name: "test".to_owned(),
                version: "1.0".to_owned(),
                sha256: "sha256".to_owned(),
            }]
        );
    }

    #[test]
    fn slices_keep_order() {
        let data = ManifestData {
            slices: vec![
                ManifestSlice {
                    name: "b_x".to_owned(),
                },
                ManifestSlice {
                    name: "a_y".to_owned(),
                },
            ],
            ..Default::default()
        };
        let names: Vec<_> = process_slices(&data).into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["b_x", "a_y"]);
    }

    #[test]
    fn directories_are_dropped() {
        let data = ManifestData {
            paths: vec![path("/etc/"), path("/etc/hosts"), path("/usr/")],
            ..Default::default()
        };
        let paths = process_paths(&data);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].path, "/etc/hosts");
    }

    #[test]
    fn path_fields_are_carried() {
        let mut p = path("/test");
        p.final_sha256 = "final".to_owned();
        p.link = "/file".to_owned();
        p.inode = 3;
        let data = ManifestData {
            paths: vec![p],
            ..Default::default()
        };
        let info = &process_paths(&data)[0];
        assert_eq!(info.mode, "0644");
        assert_eq!(info.slices, ["test_slice"]);
        assert_eq!(info.final_sha256, "final");
        assert_eq!(info.link, "/file");
        assert_eq!(info.inode, 3);
    }

    #[test]
    fn normalize_empty_manifest() {
        assert_eq!(
            normalize(&ManifestData::default()),
            NormalizedManifest::default()
        );
    }
}
