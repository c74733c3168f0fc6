//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! exporter는 설치하지 않으며, 라이브러리 사용자가 필요 시 설치합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `chisel_sbom_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(chisel_sbom_core::metrics::DOCUMENTS_BUILT_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 파일 분류 레이블 키 (regular, modified, symlink, hardlink)
pub const LABEL_FILE_KIND: &str = "kind";

/// 실패 사유 레이블 키 (invalid_file_type, modified_link)
pub const LABEL_REASON: &str = "reason";

// ─── Document Builder 메트릭 ───────────────────────────────────────

/// 생성 완료된 SBOM 문서 수 (counter)
pub const DOCUMENTS_BUILT_TOTAL: &str = "chisel_sbom_documents_built_total";

/// 실패한 문서 생성 수 (counter, label: reason)
pub const BUILD_FAILURES_TOTAL: &str = "chisel_sbom_build_failures_total";

/// 분류된 파일 수 (counter, label: kind)
pub const FILES_TOTAL: &str = "chisel_sbom_files_total";

/// 생성된 관계(relationship) 수 (counter)
pub const RELATIONSHIPS_TOTAL: &str = "chisel_sbom_relationships_total";

// ─── Manifest 메트릭 ───────────────────────────────────────────────

/// 해석된 manifest 레코드 수 (counter)
pub const MANIFEST_RECORDS_TOTAL: &str = "chisel_sbom_manifest_records_total";

/// 모든 메트릭의 설명을 등록합니다.
///
/// recorder 설치 직후 한 번 호출합니다. recorder가 없으면 아무 일도 하지 않습니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        DOCUMENTS_BUILT_TOTAL,
        "Total number of SBOM documents built successfully"
    );
    describe_counter!(
        BUILD_FAILURES_TOTAL,
        "Total number of document builds rejected due to contradictory path entries"
    );
    describe_counter!(FILES_TOTAL, "Total number of file nodes emitted, by kind");
    describe_counter!(
        RELATIONSHIPS_TOTAL,
        "Total number of relationships emitted"
    );
    describe_counter!(
        MANIFEST_RECORDS_TOTAL,
        "Total number of manifest records decoded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_prefix() {
        for name in [
            DOCUMENTS_BUILT_TOTAL,
            BUILD_FAILURES_TOTAL,
            FILES_TOTAL,
            RELATIONSHIPS_TOTAL,
            MANIFEST_RECORDS_TOTAL,
        ] {
            assert!(name.starts_with("chisel_sbom_"), "{name}");
            assert!(name.ends_with("_total"), "{name}");
        }
    }

    #[test]
    fn describe_all_without_recorder_is_noop() {
        describe_all();
    }
}
