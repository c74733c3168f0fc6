//! jsonwall 해석기
//!
//! jsonwall은 한 줄에 JSON 객체 하나를 담는 텍스트 형식입니다.
//! 첫 줄은 버전과 레코드 수를 담은 헤더이고, 이후 줄은 `kind` 필드로
//! 구분되는 레코드입니다.

use metrics::counter;
use serde::Deserialize;
use tracing::{debug, warn};

use chisel_sbom_core::metrics as m;

use super::{ManifestData, ManifestRecord};
use crate::error::SbomBuilderError;

/// 지원하는 jsonwall 형식 버전
pub const SUPPORTED_JSONWALL_VERSION: &str = "1.0";

/// jsonwall 헤더 줄
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonwallHeader {
    /// jsonwall 형식 버전
    pub jsonwall: String,
    /// 레코드 스키마 버전
    #[serde(default)]
    pub schema: String,
    /// 헤더를 제외한 레코드 수
    #[serde(default)]
    pub count: usize,
}

/// jsonwall 텍스트를 해석합니다.
///
/// 빈 줄은 건너뛰고, 알 수 없는 `kind`의 레코드는 무시합니다.
/// 헤더의 레코드 수와 실제 레코드 수가 다르면 경고만 남깁니다.
///
/// # Errors
///
/// - 헤더가 없거나 JSON이 잘못된 줄: `ManifestParse` (1부터 시작하는 줄 번호 포함)
/// - 지원하지 않는 jsonwall 버전: `UnsupportedJsonwall`
pub fn parse_jsonwall(content: &str) -> Result<ManifestData, SbomBuilderError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header_text) = lines.next().ok_or(SbomBuilderError::ManifestParse {
        line: 1,
        reason: "missing jsonwall header".to_owned(),
    })?;

    let header: JsonwallHeader =
        serde_json::from_str(header_text).map_err(|e| SbomBuilderError::ManifestParse {
            line: header_line,
            reason: format!("invalid jsonwall header: {e}"),
        })?;

    if header.jsonwall != SUPPORTED_JSONWALL_VERSION {
        return Err(SbomBuilderError::UnsupportedJsonwall {
            version: header.jsonwall,
        });
    }

    let mut data = ManifestData::default();
    let mut records = 0usize;
    let mut skipped = 0usize;

    for (line, text) in lines {
        let record: ManifestRecord =
            serde_json::from_str(text).map_err(|e| SbomBuilderError::ManifestParse {
                line,
                reason: e.to_string(),
            })?;
        records += 1;
        if !data.push(record) {
            debug!(line, "skipping manifest record of unknown kind");
            skipped += 1;
        }
    }

    if header.count != records {
        warn!(
            expected = header.count,
            actual = records,
            "jsonwall record count does not match header"
        );
    }

    counter!(m::MANIFEST_RECORDS_TOTAL).increment(data.record_count() as u64);

    debug!(
        schema = %header.schema,
        packages = data.packages.len(),
        slices = data.slices.len(),
        paths = data.paths.len(),
        contents = data.contents.len(),
        skipped,
        "jsonwall parsed"
    );

    Ok(data)
}
