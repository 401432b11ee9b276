#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz TOML config parsing - this should never panic
        if let Ok(config) = toml::from_str::<nativepack::BuildConfig>(content) {
            let _ = config.process_class();
            let _ = config.manifest_path();
        }
    }
});
