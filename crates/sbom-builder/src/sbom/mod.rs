//! SBOM 문서 직렬화
//!
//! 빌더가 만든 [`DocumentGraph`](crate::types::DocumentGraph)는 형식과 무관한
//! 모델입니다. 이 모듈은 그래프를 디스크에 기록할 SPDX 2.3 JSON으로 변환합니다.
//! 시간과 UUID처럼 실행마다 달라지는 값은 여기서만 채워집니다.

pub mod spdx;
pub mod util;

pub use spdx::{SpdxOptions, to_spdx_json, write_spdx_json};
