#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Parsing, validation and host expansion must never panic
        if let Ok(config) = deckhand::Config::from_toml_str(content) {
            let _ = config.validate();
            let _ = config.hosts();
        }
    }
});
