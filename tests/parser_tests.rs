use coverage_verify::parser::{parse_trace_content, read_trace_document, TraceRecord};
use coverage_verify::utils::config::{LABEL_INLINED, LABEL_JITTED};

#[test]
fn test_parse_groups_records_by_label() {
    let content = "\
Info=Command Line: ProfilerTestee.exe all
Assembly=mscorlib:2 Version:4.0.0.0
Jitted=2:100663297
Inlined=2:100663298
Jitted=3:100663299
";

    let doc = parse_trace_content(content, "trace.txt");

    assert_eq!(doc.records(LABEL_JITTED).len(), 2);
    assert_eq!(doc.records(LABEL_INLINED).len(), 1);
    assert_eq!(doc.records("Info").len(), 1);
    assert_eq!(doc.records("Assembly").len(), 1);
}

#[test]
fn test_parse_preserves_insertion_order_per_label() {
    let content = "Jitted=2:30\nInlined=2:5\nJitted=2:10\nJitted=2:20\n";
    let doc = parse_trace_content(content, "trace.txt");

    let jitted: Vec<&str> = doc
        .records(LABEL_JITTED)
        .iter()
        .map(TraceRecord::text)
        .collect();
    assert_eq!(jitted, vec!["2:30", "2:10", "2:20"]);
}

#[test]
fn test_parse_tolerates_malformed_lines() {
    // A malformed line is a logged warning, not a fatal error; the rest of
    // the trace must still be available for comparison.
    let content = "Jitted=2:1\nthis line has no separator\nInlined=2:2\n";
    let doc = parse_trace_content(content, "trace.txt");

    assert_eq!(doc.records(LABEL_JITTED).len(), 1);
    assert_eq!(doc.records(LABEL_INLINED).len(), 1);
}

#[test]
fn test_parse_entirely_absent_labels_is_not_an_error() {
    let doc = parse_trace_content("Info=Started\n", "trace.txt");
    assert!(doc.records(LABEL_JITTED).is_empty());
    assert!(doc.records(LABEL_INLINED).is_empty());
}

#[test]
fn test_parse_handles_crlf_line_endings() {
    let doc = parse_trace_content("Jitted=2:1\r\nInlined=2:2\r\n", "trace.txt");
    assert_eq!(doc.records(LABEL_JITTED)[0].text(), "2:1");
}

#[test]
fn test_read_trace_document_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coverage_test.txt");
    std::fs::write(&path, "Jitted=2:1\n").unwrap();

    let doc = read_trace_document(&path).unwrap();
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_read_trace_document_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_trace_document(dir.path().join("absent.txt")).is_err());
}
