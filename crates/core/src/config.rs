//! 설정 관리 -- chisel-sbom.toml 파싱 및 런타임 설정
//!
//! [`SbomConfig`]는 CLI와 변환기가 공유하는 최상위 설정 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CHISEL_SBOM_DOCUMENT_NAME=rootfs` 형식)
//! 3. 설정 파일 (`chisel-sbom.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), chisel_sbom_core::error::ChiselSbomError> {
//! use chisel_sbom_core::config::SbomConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = SbomConfig::load("chisel-sbom.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = SbomConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChiselSbomError, ConfigError};

/// manifest 최대 크기 상한 (1 GiB)
const MAX_MANIFEST_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// chisel-sbom 통합 설정
///
/// `chisel-sbom.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SbomConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// SBOM 문서 설정
    #[serde(default)]
    pub document: DocumentConfig,
}

impl SbomConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ChiselSbomError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값으로 대체하여 설정을 로드합니다.
    ///
    /// 기본 설정 경로처럼 파일이 존재하지 않아도 되는 경우에 사용합니다.
    /// 파일이 존재하지만 파싱에 실패하면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ChiselSbomError> {
        let path = path.as_ref();
        match Self::from_file(path).await {
            Ok(mut config) => {
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(ChiselSbomError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(e),
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ChiselSbomError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChiselSbomError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ChiselSbomError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ChiselSbomError> {
        toml::from_str(toml_str).map_err(|e| {
            ChiselSbomError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CHISEL_SBOM_{SECTION}_{FIELD}`
    /// 예: `CHISEL_SBOM_DOCUMENT_NAME=rootfs`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CHISEL_SBOM_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CHISEL_SBOM_GENERAL_LOG_FORMAT");

        // Document
        override_string(&mut self.document.name, "CHISEL_SBOM_DOCUMENT_NAME");
        override_string(
            &mut self.document.namespace_base,
            "CHISEL_SBOM_DOCUMENT_NAMESPACE_BASE",
        );
        override_string(
            &mut self.document.creator_tool,
            "CHISEL_SBOM_DOCUMENT_CREATOR_TOOL",
        );
        override_string(
            &mut self.document.output_file_name,
            "CHISEL_SBOM_DOCUMENT_OUTPUT_FILE_NAME",
        );
        override_usize(
            &mut self.document.max_manifest_size,
            "CHISEL_SBOM_DOCUMENT_MAX_MANIFEST_SIZE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ChiselSbomError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.document.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// SBOM 문서 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// SPDX 문서 이름
    pub name: String,
    /// `documentNamespace` 접두어 (문서 이름과 UUID가 뒤에 붙음)
    pub namespace_base: String,
    /// `creationInfo.creators`에 기록할 도구 이름
    pub creator_tool: String,
    /// 출력 경로를 지정하지 않았을 때 manifest 옆에 생성할 파일명
    pub output_file_name: String,
    /// manifest 최대 크기 (바이트, 압축 전/후 모두 적용)
    pub max_manifest_size: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name: "manifest".to_owned(),
            namespace_base: "https://spdx.org/spdxdocs/chisel-sbom".to_owned(),
            creator_tool: "Chisel SBOM Exporter".to_owned(),
            output_file_name: "manifest.spdx.json".to_owned(),
            max_manifest_size: 64 * 1024 * 1024, // 64 MB
        }
    }
}

impl DocumentConfig {
    /// 문서 설정의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - `name`, `creator_tool`: 비어 있으면 안 됨
    /// - `namespace_base`: `http://` 또는 `https://`로 시작
    /// - `output_file_name`: 비어 있지 않은 파일명 (경로 구분자 불가)
    /// - `max_manifest_size`: 1-1073741824 (1 GiB)
    pub fn validate(&self) -> Result<(), ChiselSbomError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "document.name".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if !(self.namespace_base.starts_with("https://")
            || self.namespace_base.starts_with("http://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "document.namespace_base".to_owned(),
                reason: "must be an http(s) URI".to_owned(),
            }
            .into());
        }

        if self.creator_tool.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "document.creator_tool".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.output_file_name.is_empty()
            || self.output_file_name.contains('/')
            || self.output_file_name.contains('\\')
        {
            return Err(ConfigError::InvalidValue {
                field: "document.output_file_name".to_owned(),
                reason: "must be a plain file name without path separators".to_owned(),
            }
            .into());
        }

        if self.max_manifest_size == 0 || self.max_manifest_size > MAX_MANIFEST_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "document.max_manifest_size".to_owned(),
                reason: format!("must be 1-{MAX_MANIFEST_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
