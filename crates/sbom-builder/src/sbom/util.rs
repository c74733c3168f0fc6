//! 직렬화 유틸리티 -- 타임스탬프, 네임스페이스

use std::time::{SystemTime, UNIX_EPOCH};

/// 현재 시각을 RFC3339 UTC 형식(`YYYY-MM-DDTHH:MM:SSZ`)으로 반환합니다.
///
/// 시스템 시간이 epoch 이전이면 epoch를 사용합니다.
pub fn current_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    rfc3339_utc(secs)
}

/// Unix 초를 RFC3339 UTC 문자열로 변환합니다.
pub fn rfc3339_utc(secs: u64) -> String {
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// epoch 이후 일수를 (년, 월, 일)로 변환합니다.
///
/// 400년 주기(146097일) 단위로 계산하며 3월을 한 해의 시작으로 둡니다.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // 0000-03-01 기준으로 이동
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

/// `documentNamespace` 값을 만듭니다 (`<base>/<name>-<uuid>`).
pub fn document_namespace(base: &str, name: &str) -> String {
    format!(
        "{}/{}-{}",
        base.trim_end_matches('/'),
        name,
        uuid::Uuid::new_v4()
    )
}
