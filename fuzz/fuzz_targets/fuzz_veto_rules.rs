#![no_main]
use libfuzzer_sys::fuzz_target;
use led_volume_logger::{ChangePath, VetoRuleSet};

/// Fuzz veto matching and user-supplied patterns.
///
/// The first line is tried as an extra pattern; the rest is matched as a
/// dotted path against the resulting rule set.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (pattern, path) = s.split_once('\n').unwrap_or(("", s));

    let path = ChangePath::new(path);
    let standard = VetoRuleSet::standard();
    let builtin_hit = standard.is_vetoed(&path);

    if let Ok(widened) = standard.with_extra_patterns([pattern].iter().filter(|p| !p.is_empty())) {
        // Extra patterns only ever widen the union.
        assert!(!builtin_hit || widened.is_vetoed(&path));
    }
});
