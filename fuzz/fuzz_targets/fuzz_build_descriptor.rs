#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz binding.gyp target scanning - this should never panic
        for name in nativepack::domain::services::declared_targets(content) {
            assert!(!name.is_empty());
        }
    }
});
