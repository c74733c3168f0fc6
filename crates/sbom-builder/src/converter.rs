//! 변환기 -- manifest 읽기, 정규화, 문서 생성을 한 번에 수행
//!
//! ```text
//! manifest.wall --> read_manifest --> normalize --> DocumentBuilder --> DocumentGraph
//! ```
//!
//! # 사용 예시
//!
//! ```no_run
//! use chisel_sbom_builder::{Converter, ConverterConfig};
//! use chisel_sbom_builder::sbom::to_spdx_json;
//!
//! let converter = Converter::new(ConverterConfig::default()).unwrap();
//! let graph = converter.convert_path("manifest.wall").unwrap();
//! let json = to_spdx_json(&graph, &converter.spdx_options()).unwrap();
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::builder::DocumentBuilder;
use crate::config::ConverterConfig;
use crate::error::SbomBuilderError;
use crate::manifest::read_manifest;
use crate::normalize::normalize;
use crate::sbom::SpdxOptions;
use crate::types::DocumentGraph;

/// manifest → 문서 그래프 변환기
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    builder: DocumentBuilder,
}

impl Converter {
    /// 설정을 검증하고 변환기를 생성합니다.
    pub fn new(config: ConverterConfig) -> Result<Self, SbomBuilderError> {
        config.validate()?;
        let builder =
            DocumentBuilder::new(config.document_name.clone()).creator_tool(&config.creator_tool);
        Ok(Self { config, builder })
    }

    /// 현재 설정을 반환합니다.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// zstd 압축된 manifest 스트림을 변환합니다.
    pub fn convert<R: Read>(&self, reader: R) -> Result<DocumentGraph, SbomBuilderError> {
        let data = read_manifest(reader, self.config.max_manifest_size)?;
        let input = normalize(&data);
        debug!(
            packages = input.packages.len(),
            slices = input.slices.len(),
            paths = input.paths.len(),
            "manifest normalized"
        );
        self.builder
            .build(&input.slices, &input.packages, &input.paths)
    }

    /// 메모리의 압축된 manifest를 변환합니다.
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<DocumentGraph, SbomBuilderError> {
        if bytes.len() > self.config.max_manifest_size {
            return Err(SbomBuilderError::FileTooBig {
                path: "<memory>".to_owned(),
                size: bytes.len(),
                max: self.config.max_manifest_size,
            });
        }
        self.convert(bytes)
    }

    /// 파일에서 manifest를 읽어 변환합니다.
    ///
    /// 압축 해제 전에 파일 크기를 먼저 확인합니다.
    pub fn convert_path(&self, path: impl AsRef<Path>) -> Result<DocumentGraph, SbomBuilderError> {
        let path = path.as_ref();
        let io_err = |source| SbomBuilderError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > self.config.max_manifest_size {
            return Err(SbomBuilderError::FileTooBig {
                path: path.display().to_string(),
                size,
                max: self.config.max_manifest_size,
            });
        }

        info!(path = %path.display(), bytes = size, "reading manifest");
        self.convert(BufReader::new(file))
    }

    /// 설정에 맞는 SPDX 직렬화 옵션을 반환합니다.
    pub fn spdx_options(&self) -> SpdxOptions {
        SpdxOptions {
            namespace_base: self.config.namespace_base.clone(),
            ..Default::default()
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        let config = ConverterConfig::default();
        let builder =
            DocumentBuilder::new(config.document_name.clone()).creator_tool(&config.creator_tool);
        Self { config, builder }
    }
}
