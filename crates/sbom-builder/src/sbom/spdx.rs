//! SPDX 2.3 JSON 직렬화
//!
//! [SPDX](https://spdx.dev/) 2.3 사양에 따라 [`DocumentGraph`]를 JSON으로 기록합니다.
//! 그래프 식별자 앞에 `SPDXRef-`를 붙이는 것 외에는 값을 바꾸지 않습니다.

use std::io::Write;

use serde::Serialize;

use super::util;
use crate::error::SbomBuilderError;
use crate::types::{Checksum, DocumentGraph, FileNode, PackageNode, Relationship};

/// SPDX 사양 버전
pub const SPDX_VERSION: &str = "SPDX-2.3";

/// 문서 데이터 라이선스
pub const DATA_LICENSE: &str = "CC0-1.0";

/// SPDX 식별자 접두어
pub const SPDX_REF_PREFIX: &str = "SPDXRef-";

/// 직렬화 옵션
///
/// `namespace`와 `created`를 지정하면 출력이 결정론적이 됩니다 (테스트, 재현 빌드).
#[derive(Debug, Clone)]
pub struct SpdxOptions {
    /// `documentNamespace` 접두어
    pub namespace_base: String,
    /// `documentNamespace` 전체 값 (지정 시 접두어와 UUID 무시)
    pub namespace: Option<String>,
    /// `creationInfo.created` 값 (미지정 시 현재 시각)
    pub created: Option<String>,
}

impl Default for SpdxOptions {
    fn default() -> Self {
        Self {
            namespace_base: "https://spdx.org/spdxdocs/chisel-sbom".to_owned(),
            namespace: None,
            created: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument<'a> {
    spdx_version: &'static str,
    data_license: &'static str,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    name: &'a str,
    document_namespace: String,
    creation_info: SpdxCreationInfo,
    packages: Vec<SpdxPackage<'a>>,
    files: Vec<SpdxFile<'a>>,
    relationships: Vec<SpdxRelationship<'a>>,
}

#[derive(Serialize)]
struct SpdxCreationInfo {
    created: String,
    creators: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxPackage<'a> {
    name: &'a str,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_info: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<&'a str>,
    download_location: &'a str,
    files_analyzed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    checksums: Vec<SpdxChecksum<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxFile<'a> {
    file_name: &'a str,
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    checksums: Vec<SpdxChecksum<'a>>,
    copyright_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxChecksum<'a> {
    algorithm: String,
    checksum_value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxRelationship<'a> {
    spdx_element_id: String,
    related_spdx_element: String,
    relationship_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

fn spdx_ref(identifier: &str) -> String {
    format!("{SPDX_REF_PREFIX}{identifier}")
}

fn checksums(list: &[Checksum]) -> Vec<SpdxChecksum<'_>> {
    list.iter()
        .map(|c| SpdxChecksum {
            algorithm: c.algorithm.to_string(),
            checksum_value: &c.value,
        })
        .collect()
}

fn package(node: &PackageNode) -> SpdxPackage<'_> {
    SpdxPackage {
        name: &node.name,
        spdx_id: spdx_ref(&node.identifier),
        version_info: node.version.as_deref(),
        supplier: node.supplier.as_deref(),
        download_location: &node.download_location,
        files_analyzed: node.files_analyzed,
        checksums: checksums(&node.checksums),
        comment: node.comment.as_deref(),
    }
}

fn file(node: &FileNode) -> SpdxFile<'_> {
    SpdxFile {
        file_name: &node.name,
        spdx_id: spdx_ref(&node.identifier),
        checksums: checksums(&node.checksums),
        copyright_text: &node.copyright_text,
        comment: node.comment.as_deref(),
    }
}

fn relationship(rel: &Relationship) -> SpdxRelationship<'_> {
    SpdxRelationship {
        spdx_element_id: spdx_ref(&rel.from),
        related_spdx_element: spdx_ref(&rel.to),
        relationship_type: rel.relationship_type.as_str(),
        comment: rel.comment.as_deref(),
    }
}

fn document<'a>(graph: &'a DocumentGraph, options: &SpdxOptions) -> SpdxDocument<'a> {
    SpdxDocument {
        spdx_version: SPDX_VERSION,
        data_license: DATA_LICENSE,
        spdx_id: spdx_ref(&graph.identifier),
        name: &graph.name,
        document_namespace: options
            .namespace
            .clone()
            .unwrap_or_else(|| util::document_namespace(&options.namespace_base, &graph.name)),
        creation_info: SpdxCreationInfo {
            created: options
                .created
                .clone()
                .unwrap_or_else(util::current_timestamp),
            creators: graph
                .creation_info
                .creators
                .iter()
                .map(ToString::to_string)
                .collect(),
        },
        packages: graph.packages.iter().map(package).collect(),
        files: graph.files.iter().map(file).collect(),
        relationships: graph.relationships.iter().map(relationship).collect(),
    }
}

/// 문서 그래프를 들여쓴 SPDX JSON 문자열로 변환합니다.
pub fn to_spdx_json(
    graph: &DocumentGraph,
    options: &SpdxOptions,
) -> Result<String, SbomBuilderError> {
    serde_json::to_string_pretty(&document(graph, options))
        .map_err(|e| SbomBuilderError::Serialization(format!("SPDX serialization failed: {e}")))
}

/// 문서 그래프를 SPDX JSON으로 `writer`에 기록합니다.
pub fn write_spdx_json<W: Write>(
    graph: &DocumentGraph,
    options: &SpdxOptions,
    mut writer: W,
) -> Result<(), SbomBuilderError> {
    serde_json::to_writer_pretty(&mut writer, &document(graph, options))
        .map_err(|e| SbomBuilderError::Serialization(format!("SPDX serialization failed: {e}")))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| SbomBuilderError::Serialization(format!("SPDX write failed: {e}")))
}
