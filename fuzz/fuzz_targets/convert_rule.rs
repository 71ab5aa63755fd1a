#![no_main]
#![allow(unused_must_use)] // workaround for "error: unused `Result` that must be used"

use adblock_scriptlets::{
    convert_adg_to_ubo, convert_redirect_to_adg, convert_scriptlet_to_adg, is_valid_scriptlet_rule,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(rule) = std::str::from_utf8(data) {
        if let Ok(converted) = convert_scriptlet_to_adg(rule) {
            for adg in converted {
                convert_adg_to_ubo(&adg);
            }
        }
        convert_redirect_to_adg(rule);
        is_valid_scriptlet_rule(rule);
    }
});
