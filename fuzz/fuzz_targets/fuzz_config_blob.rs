//! Fuzz target: config blob decoding
//!
//! Feeds arbitrary bytes to the NVS adapter as a stored config blob.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Anything `load()` returns passes `SystemConfig::validate()`
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use sauna::adapters::nvs::NvsAdapter;
use sauna::app::ports::ConfigPort;

fuzz_target!(|data: &[u8]| {
    let Ok(nvs) = NvsAdapter::new() else {
        return;
    };
    nvs.sim_put_raw(data);
    if let Ok(cfg) = nvs.load() {
        assert!(cfg.validate().is_ok());
    }
});
