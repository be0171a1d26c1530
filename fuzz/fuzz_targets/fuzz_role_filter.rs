#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let _ = deckhand::Role::new(content);
        let _ = deckhand::RoleFilter::parse(content);
    }
});
