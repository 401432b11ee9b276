#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use nativepack::domain::entities::PackageDescriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz package.json parsing - this should never panic
        if let Ok(descriptor) = PackageDescriptor::from_json(content) {
            let _ = descriptor.main_path(Path::new("/app/node_modules/pkg"));
        }
    }
});
