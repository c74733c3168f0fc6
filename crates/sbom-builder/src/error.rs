//! SBOM 빌더 에러 타입
//!
//! [`SbomBuilderError`]는 manifest 해석부터 SPDX 직렬화까지 이 크레이트에서
//! 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<SbomBuilderError> for ChiselSbomError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **경로 분류 모순**: `InvalidFileType`, `ModifiedLink`
//! - **manifest 해석**: `ManifestRead`, `ManifestParse`, `UnsupportedJsonwall`
//! - **크기 제한**: `FileTooBig`, `DecompressedTooLarge`
//! - **직렬화**: `Serialization`
//! - **설정**: `Config`
//! - **파일 I/O**: `Io`

use chisel_sbom_core::error::{ChiselSbomError, ConfigError, DocumentError, ManifestError};

/// SBOM 빌더 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum SbomBuilderError {
    /// inode와 link가 동시에 설정된 경로
    #[error(
        "cannot build file section: invalid file type: file {path} simultaneously has inode {inode} and link {link}"
    )]
    InvalidFileType {
        /// 문제의 경로
        path: String,
        /// 하드 링크 그룹 id
        inode: u64,
        /// 심볼릭 링크 대상
        link: String,
    },

    /// 링크 또는 하드 링크에 final sha256이 설정된 경로
    #[error(
        "cannot build file section: invalid link: link {path} has a final sha256 (inode {inode}, link '{link}')"
    )]
    ModifiedLink {
        /// 문제의 경로
        path: String,
        /// 하드 링크 그룹 id (0이면 없음)
        inode: u64,
        /// 심볼릭 링크 대상 (빈 문자열이면 없음)
        link: String,
    },

    /// manifest 압축 해제/읽기 실패
    #[error("cannot read manifest: {0}")]
    ManifestRead(String),

    /// manifest 레코드 파싱 실패
    #[error("cannot read manifest: line {line}: {reason}")]
    ManifestParse {
        /// 1부터 시작하는 줄 번호
        line: usize,
        /// 파싱 실패 사유
        reason: String,
    },

    /// 지원하지 않는 jsonwall 버전
    #[error("cannot read manifest: unsupported jsonwall version '{version}'")]
    UnsupportedJsonwall {
        /// 헤더에 기록된 버전
        version: String,
    },

    /// manifest 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 파일 크기 (바이트)
        size: usize,
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// 압축 해제된 manifest 크기 초과
    #[error("decompressed manifest exceeds {max} bytes")]
    DecompressedTooLarge {
        /// 최대 허용 크기 (바이트)
        max: usize,
    },

    /// SPDX 직렬화 실패
    #[error("spdx serialization error: {0}")]
    Serialization(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 파일 I/O 에러
    #[error("io error: {path}: {source}")]
    Io {
        /// 관련 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },
}

impl SbomBuilderError {
    /// 경로 분류 모순 에러인지 여부
    pub fn is_contradiction(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileType { .. } | Self::ModifiedLink { .. }
        )
    }
}

impl From<SbomBuilderError> for ChiselSbomError {
    fn from(err: SbomBuilderError) -> Self {
        match err {
            e @ (SbomBuilderError::InvalidFileType { .. } | SbomBuilderError::ModifiedLink { .. }) => {
                ChiselSbomError::Document(DocumentError::BuildFailed(e.to_string()))
            }
            SbomBuilderError::Serialization(msg) => {
                ChiselSbomError::Document(DocumentError::SerializeFailed(msg))
            }
            e @ (SbomBuilderError::ManifestRead(_) | SbomBuilderError::UnsupportedJsonwall { .. }) => {
                ChiselSbomError::Manifest(ManifestError::ReadFailed(e.to_string()))
            }
            e @ SbomBuilderError::ManifestParse { .. } => {
                ChiselSbomError::Manifest(ManifestError::ParseFailed(e.to_string()))
            }
            SbomBuilderError::FileTooBig { size, max, .. } => {
                ChiselSbomError::Manifest(ManifestError::TooLarge { size, max })
            }
            SbomBuilderError::DecompressedTooLarge { max } => {
                ChiselSbomError::Manifest(ManifestError::TooLarge {
                    size: max.saturating_add(1),
                    max,
                })
            }
            SbomBuilderError::Config { field, reason } => {
                ChiselSbomError::Config(ConfigError::InvalidValue { field, reason })
            }
            SbomBuilderError::Io { source, .. } => ChiselSbomError::Io(source),
        }
    }
}
