#![no_main]

use libfuzzer_sys::fuzz_target;
use chisel_sbom_builder::read_manifest;

// 임의 바이트를 zstd 스트림으로 취급 (크기 상한 64 KiB)
fuzz_target!(|data: &[u8]| {
    let _ = read_manifest(data, 64 * 1024);
});
