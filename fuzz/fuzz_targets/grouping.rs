#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = ridgeline::arbitrary::checks::grouping(&mut Unstructured::new(data));
});
