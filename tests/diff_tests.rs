//! Integration tests for snapshot comparison and veto rules.

use led_volume_logger::diff::{resolve, ChangeKind, DiffEngine, VetoRuleSet};
use led_volume_logger::model::{ChangePath, Snapshot};
use led_volume_logger::probe::Comparison;

fn snap(json: &str) -> Snapshot {
    Snapshot::from_json_str(json).expect("valid JSON")
}

fn changed(old: &str, new: &str) -> Vec<String> {
    DiffEngine::new().compare(&snap(old), &snap(new)).path_strings()
}

// ============================================================================
// Reference examples
// ============================================================================

#[test]
fn test_temperature_change_is_suppressed() {
    assert_eq!(
        changed(
            r#"{"sys":{"temps":{"fan1":30}},"name":"X"}"#,
            r#"{"sys":{"temps":{"fan1":45}},"name":"Y"}"#,
        ),
        vec!["name"]
    );
}

#[test]
fn test_added_top_level_key() {
    assert_eq!(changed(r#"{"a":{"b":1}}"#, r#"{"a":{"b":1},"c":2}"#), vec!["c"]);
}

#[test]
fn test_identical_snapshots_have_no_changes() {
    let doc = r#"{"sys":{"info":{"serial":"HX-1","ports":[1,2,3]}},"uptime":12}"#;
    assert!(changed(doc, doc).is_empty());
}

// ============================================================================
// Additions and removals
// ============================================================================

#[test]
fn test_nested_removal_is_reported() {
    let changes = DiffEngine::new().compare(
        &snap(r#"{"out":{"a":1,"b":{"c":2}}}"#),
        &snap(r#"{"out":{"a":1}}"#),
    );
    assert_eq!(changes.path_strings(), vec!["out.b"]);
    assert_eq!(changes.iter().next().map(|c| c.kind), Some(ChangeKind::Removed));
}

#[test]
fn test_removal_of_vetoed_key_is_reported() {
    assert_eq!(
        changed(r#"{"sys":{"uptime":5}}"#, r#"{"sys":{}}"#),
        vec!["sys.uptime"]
    );
}

#[test]
fn test_addition_is_never_vetoed() {
    assert_eq!(
        changed(r#"{"sys":{}}"#, r#"{"sys":{"uptime":5,"_private":1}}"#),
        vec!["sys.uptime", "sys._private"]
    );
    assert_eq!(changed("{}", r#"{"_internal":{"x":1}}"#), vec!["_internal"]);
}

#[test]
fn test_report_order_follows_old_keys_then_new_keys() {
    assert_eq!(
        changed(
            r#"{"z":1,"a":1,"m":1}"#,
            r#"{"new2":0,"m":2,"a":2,"new1":0}"#,
        ),
        vec!["z", "a", "m", "new2", "new1"]
    );
}

// ============================================================================
// Veto rules
// ============================================================================

#[test]
fn test_builtin_veto_examples() {
    let rules = VetoRuleSet::standard();
    let vetoed = [
        "sensors.voltage_I",
        "sys.reboots",
        "uptime",
        "net.current-date-time",
        "outputs.stringId",
        "cooling.FanCtrl(3)",
        "io.SFP #2 Tx",
        "io.SFP #12 Rx",
        "io.SFP #1 Temp",
        "psu.volts.rail1",
        "board.fans.f2",
        "_meta.version",
    ];
    for path in vetoed {
        assert!(rules.is_vetoed(&ChangePath::new(path)), "{path} should be vetoed");
    }

    let reported = [
        "name",
        "sys.reboots_total",
        "outputs.stringIdentity",
        "cooling.FanCtrl",
        "io.SFP #2 Txt",
        "psu.volts",
        "psu.volts.rail1.limit",
        "meta._version",
    ];
    for path in reported {
        assert!(!rules.is_vetoed(&ChangePath::new(path)), "{path} should be reported");
    }
}

#[test]
fn test_veto_applies_to_lists() {
    assert!(changed(r#"{"sys":{"since":[1]}}"#, r#"{"sys":{"since":[2]}}"#).is_empty());
}

#[test]
fn test_nested_map_under_vetoed_name_is_descended() {
    // `temps` itself is a map, so only its children are veto-checked.
    assert_eq!(
        changed(
            r#"{"temps":{"fan1":1,"detail":{"unit":"C"}}}"#,
            r#"{"temps":{"fan1":2,"detail":{"unit":"F"}}}"#,
        ),
        vec!["temps.detail.unit"]
    );
}

#[test]
fn test_extra_patterns_widen_the_set() {
    let rules = VetoRuleSet::standard()
        .with_extra_patterns(["^output\\.brightness$"])
        .unwrap();
    let engine = DiffEngine::new().with_veto_rules(rules);
    let changes = engine.compare(
        &snap(r#"{"output":{"brightness":100,"gamma":2.2},"uptime":1}"#),
        &snap(r#"{"output":{"brightness":80,"gamma":2.4},"uptime":2}"#),
    );
    assert_eq!(changes.path_strings(), vec!["output.gamma"]);
}

#[test]
fn test_empty_rule_set_reports_everything() {
    let engine = DiffEngine::new().with_veto_rules(VetoRuleSet::empty());
    let changes = engine.compare(
        &snap(r#"{"sys":{"temps":{"fan1":30}},"uptime":1}"#),
        &snap(r#"{"sys":{"temps":{"fan1":45}},"uptime":2}"#),
    );
    assert_eq!(changes.path_strings(), vec!["sys.temps.fan1", "uptime"]);
}

// ============================================================================
// Lists and type changes
// ============================================================================

#[test]
fn test_lists_compare_as_sets() {
    assert!(changed(r#"{"l":[1,2,3]}"#, r#"{"l":[3,1,2]}"#).is_empty());
    assert!(changed(r#"{"l":[1,1,2]}"#, r#"{"l":[2,1]}"#).is_empty());
    assert_eq!(changed(r#"{"l":[1,2]}"#, r#"{"l":[1,2,3]}"#), vec!["l"]);
    assert_eq!(changed(r#"{"l":[1,2,3]}"#, r#"{"l":[1,2]}"#), vec!["l"]);
}

#[test]
fn test_numbers_compare_by_value() {
    assert!(changed(r#"{"brightness":30}"#, r#"{"brightness":30.0}"#).is_empty());
    assert!(changed(r#"{"gain":-2}"#, r#"{"gain":-2.0}"#).is_empty());
    assert!(changed(r#"{"l":[30,1]}"#, r#"{"l":[1.0,30.0]}"#).is_empty());
    assert_eq!(
        changed(r#"{"brightness":30}"#, r#"{"brightness":30.5}"#),
        vec!["brightness"]
    );
    assert_eq!(changed(r#"{"a":1}"#, r#"{"a":"1"}"#), vec!["a"]);
}

#[test]
fn test_map_replaced_by_scalar() {
    let changes = DiffEngine::new().compare(&snap(r#"{"a":{"b":1}}"#), &snap(r#"{"a":5}"#));
    assert_eq!(changes.path_strings(), vec!["a"]);
    assert_eq!(changes.iter().next().map(|c| c.kind), Some(ChangeKind::Modified));
}

#[test]
fn test_scalar_replaced_by_map() {
    assert_eq!(changed(r#"{"a":5}"#, r#"{"a":{"b":1}}"#), vec!["a"]);
}

#[test]
fn test_non_map_roots() {
    let engine = DiffEngine::new();
    assert_eq!(engine.compare(&snap("[1]"), &snap("[2]")).len(), 1);
    assert!(engine.compare(&snap("3"), &snap("3")).is_empty());
}

// ============================================================================
// Value resolution
// ============================================================================

#[test]
fn test_resolve_walks_nested_maps() {
    let doc = snap(r#"{"sys":{"info":{"serial":"HX-1"}}}"#);
    let value = resolve(&doc, &ChangePath::new("sys.info.serial")).unwrap();
    assert_eq!(value.to_string(), "HX-1");
    assert!(resolve(&doc, &ChangePath::new("sys.missing.serial")).is_none());
}

#[test]
fn test_keys_containing_dots_resolve_both_sides() {
    let old = snap(r#"{"firmware":{"ver.major":"4","ver.minor":"2"}}"#);
    let new = snap(r#"{"firmware":{"ver.major":"5","ver.minor":"2"}}"#);
    let comparison = Comparison::between("Helios 1", &old, &new, &DiffEngine::new());
    let lines: Vec<String> = comparison.records().map(|r| r.line()).collect();
    assert_eq!(lines, vec!["Helios 1:firmware.ver.major: 4 -> 5"]);
}
