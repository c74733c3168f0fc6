//! manifest 읽기 -- zstd 압축 해제 및 jsonwall 레코드 해석
//!
//! chisel이 생성하는 `manifest.wall`은 zstd로 압축된 jsonwall 파일입니다.
//! [`read_manifest`]는 압축을 풀고 [`jsonwall::parse_jsonwall`]로 레코드를
//! 종류별로 모아 [`ManifestData`]를 반환합니다.
//!
//! # jsonwall 형식 예시
//!
//! ```text
//! {"jsonwall":"1.0","schema":"1.0","count":4}
//! {"kind":"package","name":"hello","version":"1.0","sha256":"...","arch":"amd64"}
//! {"kind":"path","path":"/usr/bin/hello","mode":"0755","slices":["hello_bins"],"sha256":"...","size":1024}
//! {"kind":"slice","name":"hello_bins"}
//! ```

pub mod jsonwall;

use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use crate::error::SbomBuilderError;

pub use jsonwall::{JsonwallHeader, parse_jsonwall};

/// manifest의 package 레코드
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestPackage {
    /// 패키지 이름
    pub name: String,
    /// 패키지 버전
    #[serde(default)]
    pub version: String,
    /// 패키지 digest
    #[serde(default, rename = "sha256")]
    pub digest: String,
    /// 아키텍처
    #[serde(default)]
    pub arch: String,
}

/// manifest의 slice 레코드
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestSlice {
    /// 슬라이스 이름
    pub name: String,
}

/// manifest의 path 레코드
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ManifestPath {
    /// 경로 (디렉토리는 `/`로 끝남)
    pub path: String,
    /// 권한 문자열
    pub mode: String,
    /// 이 경로를 설치한 슬라이스 목록
    pub slices: Vec<String>,
    /// 선언된 digest
    pub sha256: String,
    /// 설치 후 변경된 digest
    pub final_sha256: String,
    /// 파일 크기
    pub size: u64,
    /// 심볼릭 링크 대상
    pub link: String,
    /// 하드 링크 그룹 id
    pub inode: u64,
}

/// manifest의 content 레코드 (슬라이스와 경로 연결)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestContent {
    /// 슬라이스 이름
    pub slice: String,
    /// 경로
    pub path: String,
}

/// `kind` 필드로 구분되는 manifest 레코드
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ManifestRecord {
    /// package 레코드
    Package(ManifestPackage),
    /// slice 레코드
    Slice(ManifestSlice),
    /// path 레코드
    Path(ManifestPath),
    /// content 레코드
    Content(ManifestContent),
    /// 알 수 없는 종류 (무시됨)
    #[serde(other)]
    Unknown,
}

/// 종류별로 모은 manifest 레코드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestData {
    /// package 레코드 (파일 순서 유지)
    pub packages: Vec<ManifestPackage>,
    /// slice 레코드
    pub slices: Vec<ManifestSlice>,
    /// path 레코드
    pub paths: Vec<ManifestPath>,
    /// content 레코드
    pub contents: Vec<ManifestContent>,
}

impl ManifestData {
    /// 레코드 하나를 종류에 맞는 목록에 추가합니다.
    ///
    /// 알 수 없는 종류면 `false`를 반환합니다.
    pub fn push(&mut self, record: ManifestRecord) -> bool {
        match record {
            ManifestRecord::Package(p) => self.packages.push(p),
            ManifestRecord::Slice(s) => self.slices.push(s),
            ManifestRecord::Path(p) => self.paths.push(p),
            ManifestRecord::Content(c) => self.contents.push(c),
            ManifestRecord::Unknown => return false,
        }
        true
    }

    /// 전체 레코드 수
    pub fn record_count(&self) -> usize {
        self.packages.len() + self.slices.len() + self.paths.len() + self.contents.len()
    }
}

/// zstd 압축된 manifest를 읽어 해석합니다.
///
/// 압축 해제된 크기가 `max_size`를 넘으면 실패합니다.
///
/// # Errors
///
/// - 압축 해제 실패 또는 UTF-8이 아닌 내용: `ManifestRead`
/// - 크기 초과: `DecompressedTooLarge`
/// - jsonwall 해석 실패: `ManifestParse`, `UnsupportedJsonwall`
pub fn read_manifest<R: Read>(reader: R, max_size: usize) -> Result<ManifestData, SbomBuilderError> {
    let decoder = zstd::stream::Decoder::new(reader)
        .map_err(|e| SbomBuilderError::ManifestRead(e.to_string()))?;

    let limit = u64::try_from(max_size).unwrap_or(u64::MAX).saturating_add(1);
    let mut buf = Vec::new();
    decoder
        .take(limit)
        .read_to_end(&mut buf)
        .map_err(|e| SbomBuilderError::ManifestRead(e.to_string()))?;

    if buf.len() > max_size {
        return Err(SbomBuilderError::DecompressedTooLarge { max: max_size });
    }

    let content =
        String::from_utf8(buf).map_err(|e| SbomBuilderError::ManifestRead(e.to_string()))?;
    debug!(bytes = content.len(), "manifest decompressed");

    parse_jsonwall(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL: &str = concat!(
        "{\"jsonwall\":\"1.0\",\"schema\":\"1.0\",\"count\":4}\n",
        "{\"kind\":\"content\",\"slice\":\"test_slice\",\"path\":\"/test\"}\n",
        "{\"kind\":\"package\",\"name\":\"test\",\"version\":\"1.0\",\"sha256\":\"sha256\",\"arch\":\"amd64\"}\n",
        "{\"kind\":\"path\",\"path\":\"/test\",\"mode\":\"0644\",\"slices\":[\"test_slice\"],\"sha256\":\"sha256\",\"size\":1024}\n",
        "{\"kind\":\"slice\",\"name\":\"test_slice\"}\n",
    );

    fn compress(text: &str) -> Vec<u8> {
        zstd::stream::encode_all(text.as_bytes(), 0).unwrap()
    }

    #[test]
    fn read_manifest_decompresses_and_parses() {
        let data = read_manifest(compress(WALL).as_slice(), 1024 * 1024).unwrap();
        assert_eq!(data.packages.len(), 1);
        assert_eq!(data.packages[0].digest, "sha256");
        assert_eq!(data.packages[0].arch, "amd64");
        assert_eq!(data.slices[0].name, "test_slice");
        assert_eq!(data.paths[0].size, 1024);
        assert_eq!(data.contents.len(), 1);
        assert_eq!(data.record_count(), 4);
    }

    #[test]
    fn read_manifest_rejects_oversized_content() {
        let err = read_manifest(compress(WALL).as_slice(), 16).unwrap_err();
        assert!(matches!(err, SbomBuilderError::DecompressedTooLarge { max: 16 }));
    }

    #[test]
    fn read_manifest_accepts_exact_size() {
        let data = read_manifest(compress(WALL).as_slice(), WALL.len()).unwrap();
        assert_eq!(data.record_count(), 4);
    }

    #[test]
    fn read_manifest_rejects_uncompressed_input() {
        let err = read_manifest(WALL.as_bytes(), 1024 * 1024).unwrap_err();
        assert!(matches!(err, SbomBuilderError::ManifestRead(_)));
    }

    #[test]
    fn path_record_defaults_optional_fields() {
        let rec: ManifestRecord =
            serde_json::from_str(r#"{"kind":"path","path":"/etc/","mode":"0755","slices":["a_b"]}"#)
                .unwrap();
        match rec {
            ManifestRecord::Path(p) => {
                assert_eq!(p.path, "/etc/");
                assert!(p.sha256.is_empty());
                assert!(p.final_sha256.is_empty());
                assert!(p.link.is_empty());
                assert_eq!(p.inode, 0);
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_not_stored() {
        let rec: ManifestRecord = serde_json::from_str(r#"{"kind":"future"}"#).unwrap();
        assert_eq!(rec, ManifestRecord::Unknown);
        let mut data = ManifestData::default();
        assert!(!data.push(rec));
        assert_eq!(data.record_count(), 0);
    }
}
