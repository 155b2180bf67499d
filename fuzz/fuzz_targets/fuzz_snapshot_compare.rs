#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot parsing and comparison.
///
/// Arbitrary bytes are parsed as a processor payload. Whatever parses must
/// compare equal to itself and render every change record without panicking.
fuzz_target!(|data: &[u8]| {
    let (Ok(a), Ok(b)) = (
        led_volume_logger::Snapshot::from_slice(data),
        led_volume_logger::Snapshot::from_slice(data),
    ) else {
        return;
    };

    let engine = led_volume_logger::DiffEngine::new();
    assert!(engine.compare(&a, &b).is_empty());

    let empty = led_volume_logger::Snapshot::empty_map();
    let comparison = led_volume_logger::probe::Comparison::between("fuzz", &empty, &a, &engine);
    for record in comparison.records() {
        let _ = record.line();
    }
});
