#![no_main]

use inline_variant_fuzz::Scenario;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|scenario: Scenario<'_>| {
    scenario.run();
});
