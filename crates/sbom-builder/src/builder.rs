//! 문서 빌더 -- 경로 분류 및 그래프 구성
//!
//! [`DocumentBuilder`]는 정규화된 세 입력 컬렉션에서 [`DocumentGraph`]를
//! 만듭니다. 처리 순서는 패키지, 슬라이스, 경로 순이며 출력 순서는
//! 입력 순서를 그대로 따릅니다.
//!
//! # 파일 분류
//!
//! ```text
//! 종류       |  inode  |  link  |  final_sha256  | 유효 digest    | 관계
//! ---------------------------------------------------------------------------------
//! Regular    |    0    |   ""   |       ""       | sha256         | slice -CONTAINS-> file
//! Modified   |    0    |   ""   |     != ""      | final_sha256   | file -FILE_MODIFIED-> slice
//! Symlink    |    0    |  != "" |       ""       | sha256         | slice -CONTAINS-> file
//! HardLink   |   > 0   |   ""   |       ""       | sha256         | slice -CONTAINS-> file
//! ---------------------------------------------------------------------------------
//! 그 외 조합은 모순으로 거부됩니다.
//! ```

use metrics::counter;
use tracing::{debug, info, warn};

use chisel_sbom_core::metrics as m;

use crate::error::SbomBuilderError;
use crate::types::{
    Checksum, CreationInfo, Creator, DOCUMENT_ID, DocumentGraph, FileNode, NOASSERTION,
    PackageInfo, PackageNode, PathInfo, Relationship, RelationshipType, SliceInfo, package_id,
    slice_id,
};

/// 기본 작성 도구 이름
pub const DEFAULT_CREATOR_TOOL: &str = "Chisel SBOM Exporter";

/// 최상위 패키지 공급자
pub const PACKAGE_SUPPLIER: &str =
    "Person: Ubuntu Developers <ubuntu-devel-discuss@lists.ubuntu.com>";

/// 슬라이스 이름에서 소유 패키지 이름을 구분하는 문자
pub const SLICE_SEPARATOR: char = '_';

/// 슬라이스 이름에서 소유 패키지 이름을 구합니다.
///
/// 첫 번째 `_` 앞부분이 패키지 이름이며, `_`가 없으면 이름 전체를 사용합니다.
pub fn owner_of(slice_name: &str) -> &str {
    match slice_name.split_once(SLICE_SEPARATOR) {
        Some((owner, _)) => owner,
        None => slice_name,
    }
}

/// 경로 항목의 파일 분류
///
/// 경로마다 한 번 결정되며, 유효 digest와 관계 모양은 모두 이 값에서 파생됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind<'a> {
    /// 일반 파일
    Regular,
    /// 설치 후 변경된 파일
    Modified {
        /// 변경 후 digest
        final_sha256: &'a str,
    },
    /// 심볼릭 링크
    Symlink {
        /// 링크 대상
        target: &'a str,
    },
    /// 하드 링크 그룹 멤버
    HardLink {
        /// 하드 링크 그룹 id
        group: u64,
    },
}

impl<'a> FileKind<'a> {
    /// 경로 항목을 분류합니다.
    ///
    /// # Errors
    ///
    /// - final sha256과 링크/하드 링크가 함께 있으면 `ModifiedLink`
    /// - inode와 link가 함께 있으면 `InvalidFileType`
    pub fn classify(entry: &'a PathInfo) -> Result<Self, SbomBuilderError> {
        let has_link = !entry.link.is_empty();
        let has_inode = entry.inode > 0;

        if !entry.final_sha256.is_empty() {
            if has_inode || has_link {
                return Err(SbomBuilderError::ModifiedLink {
                    path: entry.path.clone(),
                    inode: entry.inode,
                    link: entry.link.clone(),
                });
            }
            return Ok(Self::Modified {
                final_sha256: &entry.final_sha256,
            });
        }

        match (has_inode, has_link) {
            (true, true) => Err(SbomBuilderError::InvalidFileType {
                path: entry.path.clone(),
                inode: entry.inode,
                link: entry.link.clone(),
            }),
            (true, false) => Ok(Self::HardLink { group: entry.inode }),
            (false, true) => Ok(Self::Symlink {
                target: &entry.link,
            }),
            (false, false) => Ok(Self::Regular),
        }
    }

    /// 메트릭 레이블용 이름
    pub fn label(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Modified { .. } => "modified",
            Self::Symlink { .. } => "symlink",
            Self::HardLink { .. } => "hardlink",
        }
    }

    /// 파일 노드에 기록할 유효 digest
    pub fn effective_digest(&self, entry: &'a PathInfo) -> &'a str {
        match self {
            Self::Modified { final_sha256 } => final_sha256,
            _ => &entry.sha256,
        }
    }

    /// 슬라이스와 파일 사이 관계 종류
    pub fn relationship_type(&self) -> RelationshipType {
        match self {
            Self::Modified { .. } => RelationshipType::FileModified,
            _ => RelationshipType::Contains,
        }
    }

    /// 관계 방향이 파일 → 슬라이스인지 여부
    pub fn is_reversed(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }

    /// 파일 노드 설명
    pub fn file_comment(&self, slices: &[String]) -> String {
        match self {
            Self::Regular => format!(
                "This file is included in the slice(s) {}; see Relationship information.",
                slices.join(", ")
            ),
            Self::Modified { .. } => format!(
                "This file is mutated by the slice {}; see Relationship information.",
                slices.join(", ")
            ),
            Self::Symlink { target } => format!("This file is a symlink to the file {target}."),
            Self::HardLink { group } => format!(
                "This file is within the hard link group {group}; files in the same hard link group are alias of each other."
            ),
        }
    }

    /// 슬라이스 하나와의 관계 설명
    fn relationship_comment(&self, path: &str, slice: &str) -> String {
        match self {
            Self::Modified { .. } => format!("File {path} is mutated by the slice {slice}."),
            _ => format!("File {path} is included in the slice {slice}."),
        }
    }
}

/// SBOM 문서 그래프 빌더
///
/// # 사용 예시
///
/// ```
/// use chisel_sbom_builder::builder::DocumentBuilder;
/// use chisel_sbom_builder::types::{PackageInfo, PathInfo, SliceInfo};
///
/// let packages = vec![PackageInfo {
///     name: "test".to_owned(),
///     version: "1.0".to_owned(),
///     sha256: "sha256".to_owned(),
/// }];
/// let slices = vec![SliceInfo { name: "test_slice".to_owned() }];
/// let paths = vec![PathInfo {
///     path: "/test".to_owned(),
///     sha256: "sha256".to_owned(),
///     slices: vec!["test_slice".to_owned()],
///     ..Default::default()
/// }];
///
/// let graph = DocumentBuilder::new("test")
///     .build(&slices, &packages, &paths)
///     .unwrap();
/// assert_eq!(graph.packages.len(), 2);
/// assert_eq!(graph.relationships.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    name: String,
    creators: Vec<Creator>,
}

impl DocumentBuilder {
    /// 기본 작성 도구로 빌더를 생성합니다.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creators: vec![Creator::tool(DEFAULT_CREATOR_TOOL)],
        }
    }

    /// 작성자 목록을 교체합니다.
    pub fn creators(mut self, creators: Vec<Creator>) -> Self {
        self.creators = creators;
        self
    }

    /// 작성 도구 이름을 설정합니다.
    pub fn creator_tool(self, tool: impl Into<String>) -> Self {
        self.creators(vec![Creator::tool(tool)])
    }

    /// 문서 그래프를 생성합니다.
    ///
    /// 모순된 경로 항목이 하나라도 있으면 즉시 실패하며 부분 그래프는 반환하지 않습니다.
    pub fn build(
        &self,
        slices: &[SliceInfo],
        packages: &[PackageInfo],
        paths: &[PathInfo],
    ) -> Result<DocumentGraph, SbomBuilderError> {
        debug!(
            name = %self.name,
            packages = packages.len(),
            slices = slices.len(),
            paths = paths.len(),
            "building sbom document"
        );

        let mut graph = DocumentGraph::new(
            self.name.clone(),
            CreationInfo {
                creators: self.creators.clone(),
            },
        );

        for package in packages {
            let (node, rel) = package_section(package);
            graph.packages.push(node);
            graph.relationships.push(rel);
        }

        for slice in slices {
            let (node, rel) = slice_section(slice);
            graph.packages.push(node);
            graph.relationships.push(rel);
        }

        for entry in paths {
            let (node, rels) = match path_section(entry) {
                Ok(section) => section,
                Err(e) => {
                    let reason = match e {
                        SbomBuilderError::ModifiedLink { .. } => "modified_link",
                        _ => "invalid_file_type",
                    };
                    counter!(m::BUILD_FAILURES_TOTAL, m::LABEL_REASON => reason).increment(1);
                    warn!(path = %entry.path, error = %e, "rejecting contradictory path entry");
                    return Err(e);
                }
            };
            graph.files.push(node);
            graph.relationships.extend(rels);
        }

        counter!(m::DOCUMENTS_BUILT_TOTAL).increment(1);
        counter!(m::RELATIONSHIPS_TOTAL).increment(graph.relationships.len() as u64);

        info!(
            name = %graph.name,
            packages = packages.len(),
            slices = slices.len(),
            files = graph.files.len(),
            relationships = graph.relationships.len(),
            "sbom document built"
        );

        Ok(graph)
    }
}

/// 기본 설정으로 문서 그래프를 생성합니다.
///
/// [`DocumentBuilder::new`]`(name).build(..)`의 축약형입니다.
pub fn build_document(
    name: &str,
    slices: &[SliceInfo],
    packages: &[PackageInfo],
    paths: &[PathInfo],
) -> Result<DocumentGraph, SbomBuilderError> {
    DocumentBuilder::new(name).build(slices, packages, paths)
}

fn package_section(package: &PackageInfo) -> (PackageNode, Relationship) {
    let identifier = package.spdx_id();
    let node = PackageNode {
        identifier: identifier.clone(),
        name: package.name.clone(),
        version: Some(package.version.clone()),
        supplier: Some(PACKAGE_SUPPLIER.to_owned()),
        download_location: NOASSERTION.to_owned(),
        files_analyzed: false,
        checksums: vec![Checksum::sha256(package.sha256.clone())],
        comment: Some(
            "This package includes one or more slice(s); see Relationship information.".to_owned(),
        ),
    };
    let rel = Relationship {
        from: DOCUMENT_ID.to_owned(),
        to: identifier,
        relationship_type: RelationshipType::Describes,
        comment: None,
    };
    (node, rel)
}

fn slice_section(slice: &SliceInfo) -> (PackageNode, Relationship) {
    let owner = owner_of(&slice.name);
    let identifier = slice.spdx_id();
    let node = PackageNode {
        identifier: identifier.clone(),
        name: slice.name.clone(),
        version: None,
        supplier: None,
        download_location: NOASSERTION.to_owned(),
        files_analyzed: false,
        checksums: Vec::new(),
        comment: Some(format!(
            "This slice is a sub-package of the package {owner}; see Relationship information."
        )),
    };
    let rel = Relationship {
        from: package_id(owner),
        to: identifier,
        relationship_type: RelationshipType::Contains,
        comment: None,
    };
    (node, rel)
}

fn path_section(entry: &PathInfo) -> Result<(FileNode, Vec<Relationship>), SbomBuilderError> {
    let kind = FileKind::classify(entry)?;
    counter!(m::FILES_TOTAL, m::LABEL_FILE_KIND => kind.label()).increment(1);

    let identifier = entry.spdx_id();
    let node = FileNode {
        identifier: identifier.clone(),
        name: entry.path.clone(),
        checksums: vec![Checksum::sha256(kind.effective_digest(entry))],
        copyright_text: NOASSERTION.to_owned(),
        comment: Some(kind.file_comment(&entry.slices)),
    };

    let rels = entry
        .slices
        .iter()
        .map(|slice| {
            let slice_node = slice_id(slice);
            let (from, to) = if kind.is_reversed() {
                (identifier.clone(), slice_node)
            } else {
                (slice_node, identifier.clone())
            };
            Relationship {
                from,
                to,
                relationship_type: kind.relationship_type(),
                comment: Some(kind.relationship_comment(&entry.path, slice)),
            }
        })
        .collect();

    Ok((node, rels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> PathInfo {
        PathInfo {
            path: path.to_owned(),
            mode: "0644".to_owned(),
            slices: vec!["test_slice".to_owned()],
            sha256: "sha256".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn owner_of_takes_prefix_before_first_separator() {
        assert_eq!(owner_of("test_slice"), "test");
        assert_eq!(owner_of("libc6_libs_extra"), "libc6");
        assert_eq!(owner_of("base-files_release-info"), "base-files");
    }

    #[test]
    fn owner_of_without_separator_is_whole_name() {
        assert_eq!(owner_of("test"), "test");
        assert_eq!(owner_of(""), "");
    }

    #[test]
    fn classify_regular() {
        let e = entry("/test");
        assert_eq!(FileKind::classify(&e).unwrap(), FileKind::Regular);
    }

    #[test]
    fn classify_modified() {
        let mut e = entry("/test");
        e.final_sha256 = "final_sha256".to_owned();
        let kind = FileKind::classify(&e).unwrap();
        assert_eq!(
            kind,
            FileKind::Modified {
                final_sha256: "final_sha256"
            }
        );
        assert_eq!(kind.effective_digest(&e), "final_sha256");
        assert_eq!(kind.relationship_type(), RelationshipType::FileModified);
        assert!(kind.is_reversed());
    }

    #[test]
    fn classify_symlink() {
        let mut e = entry("/test");
        e.link = "/file".to_owned();
        let kind = FileKind::classify(&e).unwrap();
        assert_eq!(kind, FileKind::Symlink { target: "/file" });
        assert_eq!(kind.effective_digest(&e), "sha256");
        assert!(!kind.is_reversed());
    }

    #[test]
    fn classify_hardlink() {
        let mut e = entry("/test");
        e.inode = 7;
        let kind = FileKind::classify(&e).unwrap();
        assert_eq!(kind, FileKind::HardLink { group: 7 });
        assert_eq!(kind.relationship_type(), RelationshipType::Contains);
    }

    #[test]
    fn classify_rejects_inode_with_link() {
        let mut e = entry("/test");
        e.inode = 1;
        e.link = "/file".to_owned();
        let err = FileKind::classify(&e).unwrap_err();
        assert!(matches!(err, SbomBuilderError::InvalidFileType { inode: 1, .. }));
    }

    #[test]
    fn classify_rejects_modified_symlink() {
        let mut e = entry("/test");
        e.final_sha256 = "final_sha256".to_owned();
        e.link = "/file".to_owned();
        assert!(matches!(
            FileKind::classify(&e).unwrap_err(),
            SbomBuilderError::ModifiedLink { .. }
        ));
    }

    #[test]
    fn classify_rejects_modified_hardlink() {
        let mut e = entry("/test");
        e.final_sha256 = "final_sha256".to_owned();
        e.inode = 1;
        assert!(matches!(
            FileKind::classify(&e).unwrap_err(),
            SbomBuilderError::ModifiedLink { .. }
        ));
    }

    #[test]
    fn classify_all_three_reports_modified_link() {
        let mut e = entry("/test");
        e.final_sha256 = "final_sha256".to_owned();
        e.inode = 1;
        e.link = "/file".to_owned();
        assert!(matches!(
            FileKind::classify(&e).unwrap_err(),
            SbomBuilderError::ModifiedLink { .. }
        ));
    }

    #[test]
    fn classification_is_total_over_valid_inputs() {
        for (final_sha256, link, inode) in [("", "", 0), ("f", "", 0), ("", "/l", 0), ("", "", 3)]
        {
            let mut e = entry("/x");
            e.final_sha256 = final_sha256.to_owned();
            e.link = link.to_owned();
            e.inode = inode;
            assert!(FileKind::classify(&e).is_ok(), "{final_sha256:?} {link:?} {inode}");
        }
    }

    #[test]
    fn file_comments() {
        let slices = vec!["test_slice".to_owned(), "test_slice2".to_owned()];
        assert_eq!(
            FileKind::Regular.file_comment(&slices),
            "This file is included in the slice(s) test_slice, test_slice2; see Relationship information."
        );
        assert_eq!(
            FileKind::Symlink { target: "/file" }.file_comment(&slices),
            "This file is a symlink to the file /file."
        );
        assert_eq!(
            FileKind::HardLink { group: 1 }.file_comment(&slices),
            "This file is within the hard link group 1; files in the same hard link group are alias of each other."
        );
        assert_eq!(
            FileKind::Modified { final_sha256: "f" }.file_comment(&slices[..1]),
            "This file is mutated by the slice test_slice; see Relationship information."
        );
    }

    #[test]
    fn package_section_describes_package() {
        let (node, rel) = package_section(&PackageInfo {
            name: "test".to_owned(),
            version: "1.0".to_owned(),
            sha256: "sha256".to_owned(),
        });
        assert_eq!(node.identifier, "Package-test");
        assert_eq!(node.version.as_deref(), Some("1.0"));
        assert_eq!(node.supplier.as_deref(), Some(PACKAGE_SUPPLIER));
        assert_eq!(node.checksums, vec![Checksum::sha256("sha256")]);
        assert_eq!(rel.from, DOCUMENT_ID);
        assert_eq!(rel.to, "Package-test");
        assert_eq!(rel.relationship_type, RelationshipType::Describes);
        assert!(rel.comment.is_none());
    }

    #[test]
    fn slice_section_is_contained_by_owner() {
        let (node, rel) = slice_section(&SliceInfo {
            name: "test_slice".to_owned(),
        });
        assert_eq!(node.identifier, "Slice-test_slice");
        assert!(node.version.is_none());
        assert!(node.checksums.is_empty());
        assert_eq!(
            node.comment.as_deref(),
            Some("This slice is a sub-package of the package test; see Relationship information.")
        );
        assert_eq!(rel.from, "Package-test");
        assert_eq!(rel.to, "Slice-test_slice");
        assert_eq!(rel.relationship_type, RelationshipType::Contains);
    }

    #[test]
    fn path_section_emits_one_relationship_per_slice() {
        let mut e = entry("/test");
        e.slices = vec!["a_x".to_owned(), "a_y".to_owned(), "b_z".to_owned()];
        let (node, rels) = path_section(&e).unwrap();
        assert_eq!(node.identifier, "File-/test");
        assert_eq!(rels.len(), 3);
        assert!(rels.iter().all(|r| r.to == "File-/test"));
        assert_eq!(rels[2].from, "Slice-b_z");
        assert_eq!(
            rels[2].comment.as_deref(),
            Some("File /test is included in the slice b_z.")
        );
    }

    #[test]
    fn path_section_without_slices_emits_node_only() {
        let mut e = entry("/orphan");
        e.slices.clear();
        let (node, rels) = path_section(&e).unwrap();
        assert_eq!(node.name, "/orphan");
        assert!(rels.is_empty());
    }

    #[test]
    fn builder_uses_custom_creator_tool() {
        let graph = DocumentBuilder::new("doc")
            .creator_tool("my-tool")
            .build(&[], &[], &[])
            .unwrap();
        assert_eq!(graph.creation_info.creators, vec![Creator::tool("my-tool")]);
        assert_eq!(graph.name, "doc");
    }

    #[test]
    fn build_fails_without_partial_graph() {
        let good = entry("/good");
        let mut bad = entry("/bad");
        bad.inode = 2;
        bad.link = "/good".to_owned();
        let result = build_document("test", &[], &[], &[good, bad]);
        assert!(matches!(
            result,
            Err(SbomBuilderError::InvalidFileType { ref path, .. }) if path == "/bad"
        ));
    }
}
