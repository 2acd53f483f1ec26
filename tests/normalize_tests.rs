use coverage_verify::normalize::{filter_by_assembly, normalize};
use coverage_verify::parser::parse_trace_content;
use coverage_verify::utils::config::LABEL_JITTED;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn allow(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn test_same_record_in_both_labels_collapses_to_one_line() {
    // Scenario: a method both inlined and jitted counts once; the
    // comparison cares about which methods were touched, not how.
    let doc = parse_trace_content("Inlined=1:mA\nJitted=1:mA\n", "trace.txt");
    assert_eq!(normalize(&doc, &allow(&["1"])), "1:mA");
}

#[test]
fn test_records_of_excluded_assemblies_are_dropped() {
    let doc = parse_trace_content("Inlined=2:mB\nJitted=3:mC\n", "trace.txt");
    assert_eq!(normalize(&doc, &allow(&["2"])), "2:mB");
}

#[test]
fn test_differently_ordered_traces_normalize_identically() {
    let first = parse_trace_content(
        "Jitted=2:mA\nInlined=2:mB\nJitted=2:mC\nInlined=3:mD\n",
        "first.txt",
    );
    let second = parse_trace_content(
        "Inlined=3:mD\nJitted=2:mC\nJitted=2:mA\nInlined=2:mB\n",
        "second.txt",
    );

    let ids = allow(&["2", "3"]);
    assert_eq!(normalize(&first, &ids), normalize(&second, &ids));
}

#[test]
fn test_mismatch_surfaces_the_extra_line() {
    let actual = parse_trace_content("Inlined=1:mA\n", "actual.txt");
    let reference = parse_trace_content("Inlined=1:mA\nJitted=2:mB\n", "reference.txt");

    let ids = allow(&["1", "2"]);
    let normalized_actual = normalize(&actual, &ids);
    let normalized_reference = normalize(&reference, &ids);

    assert_ne!(normalized_actual, normalized_reference);
    assert_eq!(normalized_actual, "1:mA");
    assert_eq!(normalized_reference, "1:mA\n2:mB");
}

#[test]
fn test_normalization_is_idempotent() {
    let doc = parse_trace_content(
        "Jitted=2:mC\nInlined=2:mA\nJitted=2:mA\nInlined=2:mB\n",
        "trace.txt",
    );
    let ids = allow(&["2"]);
    let once = normalize(&doc, &ids);

    let reparsed: String = once.lines().map(|line| format!("Jitted={}\n", line)).collect();
    let twice = normalize(&parse_trace_content(&reparsed, "trace.txt"), &ids);

    assert_eq!(once, twice);
}

#[test]
fn test_filter_monotonicity() {
    let doc = parse_trace_content(
        "Jitted=2:mA\nJitted=3:mB\nJitted=4:mC\nJitted=2:mD\n",
        "trace.txt",
    );

    let subset: Vec<&str> = filter_by_assembly(doc.records(LABEL_JITTED), &allow(&["2"]))
        .iter()
        .map(|record| record.text())
        .collect();
    let superset: Vec<&str> = filter_by_assembly(doc.records(LABEL_JITTED), &allow(&["2", "3", "4"]))
        .iter()
        .map(|record| record.text())
        .collect();

    assert!(subset.iter().all(|text| superset.contains(text)));
    assert!(subset.len() <= superset.len());
}

#[test]
fn test_empty_allow_set_normalizes_to_empty_string() {
    let doc = parse_trace_content("Jitted=2:mA\nInlined=3:mB\n", "trace.txt");
    assert_eq!(normalize(&doc, &allow(&[])), "");
}

#[test]
fn test_assembly_id_must_match_exactly() {
    // "2" must not match "22"; the id is one whole key field.
    let doc = parse_trace_content("Jitted=22:mA\nJitted=2:mB\n", "trace.txt");
    assert_eq!(normalize(&doc, &allow(&["2"])), "2:mB");
}
