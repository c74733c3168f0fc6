//! 변환기 설정
//!
//! [`ConverterConfig`]는 core의 [`DocumentConfig`](chisel_sbom_core::config::DocumentConfig)에서
//! 파생되며, 문서 이름, 작성 도구, 네임스페이스, manifest 크기 제한을 담습니다.
//!
//! # 사용 예시
//!
//! ```
//! use chisel_sbom_builder::{ConverterConfig, ConverterConfigBuilder};
//!
//! let config = ConverterConfig::default();
//! config.validate().unwrap();
//!
//! let config = ConverterConfigBuilder::new()
//!     .document_name("rootfs")
//!     .max_manifest_size(8 * 1024 * 1024)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.document_name, "rootfs");
//! ```

use serde::{Deserialize, Serialize};

use chisel_sbom_core::config::DocumentConfig;

use crate::error::SbomBuilderError;

/// manifest 최대 크기 상한 (1 GiB)
const MAX_MANIFEST_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// 변환기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// SPDX 문서 이름
    pub document_name: String,
    /// `creationInfo.creators`에 기록할 도구 이름
    pub creator_tool: String,
    /// `documentNamespace` 접두어
    pub namespace_base: String,
    /// manifest 최대 크기 (바이트, 압축 전/후 모두 적용)
    pub max_manifest_size: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::from_core(&DocumentConfig::default())
    }
}

impl ConverterConfig {
    /// core의 `DocumentConfig`에서 변환기 설정을 생성합니다.
    pub fn from_core(core: &DocumentConfig) -> Self {
        Self {
            document_name: core.name.clone(),
            creator_tool: core.creator_tool.clone(),
            namespace_base: core.namespace_base.clone(),
            max_manifest_size: core.max_manifest_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `document_name`, `creator_tool`: 비어 있으면 안 됨
    /// - `namespace_base`: http(s) URI
    /// - `max_manifest_size`: 1-1073741824 (1 GiB)
    pub fn validate(&self) -> Result<(), SbomBuilderError> {
        if self.document_name.trim().is_empty() {
            return Err(SbomBuilderError::Config {
                field: "document_name".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.creator_tool.trim().is_empty() {
            return Err(SbomBuilderError::Config {
                field: "creator_tool".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if !(self.namespace_base.starts_with("https://")
            || self.namespace_base.starts_with("http://"))
        {
            return Err(SbomBuilderError::Config {
                field: "namespace_base".to_owned(),
                reason: "must be an http(s) URI".to_owned(),
            });
        }

        if self.max_manifest_size == 0 || self.max_manifest_size > MAX_MANIFEST_SIZE_LIMIT {
            return Err(SbomBuilderError::Config {
                field: "max_manifest_size".to_owned(),
                reason: format!("must be 1-{MAX_MANIFEST_SIZE_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// [`ConverterConfig`] 빌더
///
/// 빌드 시 유효성을 검증합니다.
#[derive(Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 문서 이름을 설정합니다.
    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.config.document_name = name.into();
        self
    }

    /// 작성 도구 이름을 설정합니다.
    pub fn creator_tool(mut self, tool: impl Into<String>) -> Self {
        self.config.creator_tool = tool.into();
        self
    }

    /// 네임스페이스 접두어를 설정합니다.
    pub fn namespace_base(mut self, base: impl Into<String>) -> Self {
        self.config.namespace_base = base.into();
        self
    }

    /// manifest 최대 크기(바이트)를 설정합니다.
    pub fn max_manifest_size(mut self, size: usize) -> Self {
        self.config.max_manifest_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `SbomBuilderError::Config` 반환
    pub fn build(self) -> Result<ConverterConfig, SbomBuilderError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
