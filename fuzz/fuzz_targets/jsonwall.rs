#![no_main]

use libfuzzer_sys::fuzz_target;
use chisel_sbom_builder::manifest::parse_jsonwall;
use chisel_sbom_builder::normalize;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(manifest) = parse_jsonwall(text) {
            let _ = normalize(&manifest);
        }
    }
});
