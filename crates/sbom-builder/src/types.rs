//! 도메인 타입 -- 빌더 입력 레코드와 문서 그래프
//!
//! 입력 레코드([`PackageInfo`], [`SliceInfo`], [`PathInfo`])는 manifest와
//! 분리된 평범한 값 타입이며, 출력은 노드와 관계 목록으로 이루어진
//! [`DocumentGraph`]입니다. 노드는 자연 키에서 결정론적으로 파생된
//! 문자열 식별자로만 서로를 참조합니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 문서 루트 요소 식별자
pub const DOCUMENT_ID: &str = "DOCUMENT";

/// 선언되지 않은 값 (SPDX `NOASSERTION`)
pub const NOASSERTION: &str = "NOASSERTION";

const PACKAGE_PREFIX: &str = "Package-";
const SLICE_PREFIX: &str = "Slice-";
const FILE_PREFIX: &str = "File-";

/// 패키지 노드 식별자 (`Package-<name>`)
pub fn package_id(name: &str) -> String {
    format!("{PACKAGE_PREFIX}{name}")
}

/// 슬라이스 노드 식별자 (`Slice-<name>`)
pub fn slice_id(name: &str) -> String {
    format!("{SLICE_PREFIX}{name}")
}

/// 파일 노드 식별자 (`File-<path>`)
pub fn file_id(path: &str) -> String {
    format!("{FILE_PREFIX}{path}")
}

/// 최상위 패키지 입력 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// 패키지 이름 (고유 키)
    pub name: String,
    /// 패키지 버전
    pub version: String,
    /// 패키지 내용 digest
    pub sha256: String,
}

impl PackageInfo {
    /// 노드 식별자를 반환합니다.
    pub fn spdx_id(&self) -> String {
        package_id(&self.name)
    }
}

/// 슬라이스(패키지의 하위 선택) 입력 레코드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceInfo {
    /// 슬라이스 이름 (`<package>_<slice>`)
    pub name: String,
}

impl SliceInfo {
    /// 노드 식별자를 반환합니다.
    pub fn spdx_id(&self) -> String {
        slice_id(&self.name)
    }
}

/// 설치 경로 입력 레코드
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathInfo {
    /// 파일 시스템 경로 (문서 내 고유 키)
    pub path: String,
    /// 권한 문자열 (예: "0644")
    pub mode: String,
    /// 이 경로를 설치하는 슬라이스 목록 (순서 유지)
    pub slices: Vec<String>,
    /// 선언된 내용 digest
    pub sha256: String,
    /// 설치 후 변경된 내용 digest (없으면 빈 문자열)
    pub final_sha256: String,
    /// 심볼릭 링크 대상 (없으면 빈 문자열)
    pub link: String,
    /// 하드 링크 그룹 id (0이면 그룹 없음)
    pub inode: u64,
}

impl PathInfo {
    /// 노드 식별자를 반환합니다.
    pub fn spdx_id(&self) -> String {
        file_id(&self.path)
    }
}

/// 체크섬 알고리즘
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    /// SHA-256
    Sha256,
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha256 => write!(f, "SHA256"),
        }
    }
}

/// 노드 체크섬
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    /// 알고리즘
    pub algorithm: ChecksumAlgorithm,
    /// 해시 값
    pub value: String,
}

impl Checksum {
    /// SHA-256 체크섬을 생성합니다.
    pub fn sha256(value: impl Into<String>) -> Self {
        Self {
            algorithm: ChecksumAlgorithm::Sha256,
            value: value.into(),
        }
    }
}

/// 관계 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipType {
    /// 문서가 패키지를 기술함
    Describes,
    /// 패키지가 슬라이스를, 슬라이스가 파일을 포함함
    Contains,
    /// 파일이 슬라이스에 의해 변경됨 (파일 → 슬라이스 방향)
    FileModified,
}

impl RelationshipType {
    /// SPDX `relationshipType` 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Describes => "DESCRIBES",
            Self::Contains => "CONTAINS",
            Self::FileModified => "FILE_MODIFIED",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 문서 작성자 (SPDX `creators` 항목)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// 작성자 종류 (Tool, Person, Organization)
    pub creator_type: String,
    /// 작성자 이름
    pub name: String,
}

impl Creator {
    /// 도구 작성자를 생성합니다.
    pub fn tool(name: impl Into<String>) -> Self {
        Self {
            creator_type: "Tool".to_owned(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.creator_type, self.name)
    }
}

/// 문서 생성 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInfo {
    /// 작성자 목록
    pub creators: Vec<Creator>,
}

/// 패키지 노드 (최상위 패키지 또는 슬라이스)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    /// 노드 식별자
    pub identifier: String,
    /// 패키지 또는 슬라이스 이름
    pub name: String,
    /// 버전 (슬라이스는 없음)
    pub version: Option<String>,
    /// 공급자 (슬라이스는 없음)
    pub supplier: Option<String>,
    /// 다운로드 위치
    pub download_location: String,
    /// 파일 분석 여부
    pub files_analyzed: bool,
    /// 체크섬 (슬라이스는 비어 있음)
    pub checksums: Vec<Checksum>,
    /// 설명
    pub comment: Option<String>,
}

/// 파일 노드
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// 노드 식별자
    pub identifier: String,
    /// 파일 경로
    pub name: String,
    /// 유효 digest 체크섬
    pub checksums: Vec<Checksum>,
    /// 저작권 표기
    pub copyright_text: String,
    /// 설명
    pub comment: Option<String>,
}

impl FileNode {
    /// 유효 digest를 반환합니다.
    pub fn effective_digest(&self) -> Option<&str> {
        self.checksums.first().map(|c| c.value.as_str())
    }
}

/// 방향이 있는 관계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// 출발 노드 식별자
    pub from: String,
    /// 도착 노드 식별자
    pub to: String,
    /// 관계 종류
    pub relationship_type: RelationshipType,
    /// 설명
    pub comment: Option<String>,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.relationship_type, self.from, self.to)
    }
}

/// SBOM 문서 그래프
///
/// 노드와 관계는 생성 순서대로 저장되며, 같은 입력은 항상 같은 그래프를 만듭니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentGraph {
    /// 문서 식별자 (항상 [`DOCUMENT_ID`])
    pub identifier: String,
    /// 문서 이름
    pub name: String,
    /// 생성 정보
    pub creation_info: CreationInfo,
    /// 패키지 노드 (패키지 다음 슬라이스 순)
    pub packages: Vec<PackageNode>,
    /// 파일 노드
    pub files: Vec<FileNode>,
    /// 관계 목록
    pub relationships: Vec<Relationship>,
}

impl DocumentGraph {
    /// 빈 문서 그래프를 생성합니다.
    pub fn new(name: impl Into<String>, creation_info: CreationInfo) -> Self {
        Self {
            identifier: DOCUMENT_ID.to_owned(),
            name: name.into(),
            creation_info,
            packages: Vec::new(),
            files: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// 최상위 패키지 노드 수 (슬라이스 제외)
    pub fn package_count(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| p.identifier.starts_with(PACKAGE_PREFIX))
            .count()
    }

    /// 슬라이스 노드 수
    pub fn slice_count(&self) -> usize {
        self.packages
            .iter()
            .filter(|p| p.identifier.starts_with(SLICE_PREFIX))
            .count()
    }

    /// 식별자로 패키지 노드를 찾습니다.
    pub fn find_package(&self, identifier: &str) -> Option<&PackageNode> {
        self.packages.iter().find(|p| p.identifier == identifier)
    }

    /// 식별자로 파일 노드를 찾습니다.
    pub fn find_file(&self, identifier: &str) -> Option<&FileNode> {
        self.files.iter().find(|f| f.identifier == identifier)
    }

    /// 주어진 노드를 출발 또는 도착점으로 하는 관계를 반환합니다.
    pub fn relationships_of<'a>(
        &'a self,
        identifier: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |r| r.from == identifier || r.to == identifier)
    }
}

impl fmt::Display for DocumentGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DocumentGraph({}, {} packages, {} files, {} relationships)",
            self.name,
            self.packages.len(),
            self.files.len(),
            self.relationships.len(),
        )
    }
}
