use codecsight_cli::commands::list;
use codecsight_core::default_registry;

#[test]
fn test_list_has_one_line_per_entry() {
    let registry = default_registry().unwrap();
    let lines = list::format_entries(&registry);
    assert_eq!(lines.len(), registry.len());
}

#[test]
fn test_list_shows_identifiers_and_labels() {
    let lines = list::format_entries(&default_registry().unwrap());
    assert!(lines[0].starts_with("avc1, avc2, avc3, avc4"));
    assert!(lines[0].ends_with("AVC/H.264"));
    assert!(lines.iter().any(|l| l.starts_with("hev1, hvc1") && l.ends_with("HEVC/H.265")));
    assert!(lines.iter().any(|l| l.starts_with("lvc1")));
}

#[test]
fn test_list_execute() {
    list::execute().unwrap();
}
