//! 에러 타입 -- 도메인별 에러 정의
//!
//! 각 크레이트는 자체 에러 enum을 가지며, `From` 구현을 통해
//! 최상위 [`ChiselSbomError`]로 변환됩니다.

/// chisel-sbom 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ChiselSbomError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// manifest 읽기/해석 에러
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// SBOM 문서 생성 에러
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// manifest 에러
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// 압축 해제 또는 읽기 실패
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// 레코드 파싱 실패
    #[error("parse failed: {0}")]
    ParseFailed(String),

    /// 입력 데이터 초과
    #[error("input too large: {size} bytes (max: {max})")]
    TooLarge { size: usize, max: usize },
}

/// SBOM 문서 에러
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// 경로 항목의 속성 조합이 모순됨
    #[error("build failed: {0}")]
    BuildFailed(String),

    /// 직렬화 실패
    #[error("serialization failed: {0}")]
    SerializeFailed(String),
}
