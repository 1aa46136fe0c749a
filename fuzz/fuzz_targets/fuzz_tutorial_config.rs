#![no_main]

use dotcal_tutorial::TutorialConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Any config that loads must already be valid.
    for loaded in [
        TutorialConfig::from_toml_str(text),
        TutorialConfig::from_json_str(text),
    ] {
        if let Ok(config) = loaded {
            assert!(config.validate().is_empty(), "loaded invalid config: {config:?}");
            let _ = config.positioner().box_size(Default::default());
        }
    }
});
