//! Integration tests for the complete input → dispatch → report flow

use codecsight_core::{
    classify::{ClassificationRule, RuleTable},
    default_registry, Classifier, CodingParameters, Diagnostic, Engine, MediaType, Registry,
};

fn engine() -> Engine {
    Engine::with_defaults().unwrap()
}

#[test]
fn test_avc_end_to_end_with_classification() {
    let report = engine().dispatch("avc1.64002A");
    assert_eq!(report.len(), 1);

    let result = &report.results[0];
    assert_eq!(result.identifier, "avc1");
    assert_eq!(result.label.as_deref(), Some("AVC/H.264"));
    assert!(result
        .diagnostics
        .contains(&Diagnostic::normal("profile=High (64)")));
    assert!(result
        .diagnostics
        .contains(&Diagnostic::normal("level=4.2 (2a)")));
    assert_eq!(
        result.diagnostics.last(),
        Some(&Diagnostic::cross_reference(
            "urn:dvb:metadata:cs:VideoCodecCS:2022:1.4.14"
        ))
    );
}

#[test]
fn test_custom_rule_table() {
    // a single rule; the engine must use whatever classifier it is given
    let table = RuleTable::new(
        "urn:example:cs",
        vec![ClassificationRule::new("hi", "avc1")
            .with_profile("High")
            .with_level("4.2")],
    )
    .unwrap();
    let classifier = Classifier::empty().with_table(MediaType::Video, table);
    let engine = Engine::new(default_registry().unwrap(), classifier);

    let report = engine.dispatch("avc1.64002A,avc1.64001F");
    assert_eq!(
        report.results[0].diagnostics.last(),
        Some(&Diagnostic::cross_reference("urn:example:cs:hi"))
    );
    assert!(!report.results[1]
        .diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::CrossReferenceTerm(_))));
}

#[test]
fn test_multi_codec_input_keeps_order_and_isolation() {
    let engine = engine();
    let report = engine.dispatch("hvc1.1.6.L93.B0, bogus.1.2 ,opus,evc1.vlev41");

    let ids: Vec<_> = report.results.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, ["hvc1", "bogus", "opus", "evc1"]);

    assert_eq!(
        report.results[1].diagnostics,
        vec![Diagnostic::error("unsupported codec=bogus")]
    );
    assert_eq!(
        report.results[2].diagnostics,
        vec![Diagnostic::error("unsupported codec=opus")]
    );

    let alone = engine.dispatch("hvc1.1.6.L93.B0");
    assert_eq!(report.results[0].diagnostics, alone.results[0].diagnostics);
    let alone = engine.dispatch("evc1.vlev41");
    assert_eq!(report.results[3].diagnostics, alone.results[0].diagnostics);
}

#[test]
fn test_unknown_identifier_is_reported_lowercase() {
    let report = engine().dispatch("unknownFourCC.1.2");
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.results[0].diagnostics,
        vec![Diagnostic::error("unsupported codec=unknownfourcc")]
    );
    assert!(report.results[0].label.is_none());
}

#[test]
fn test_identifier_case_is_ignored() {
    let engine = engine();
    let upper = engine.dispatch("AVC1.64002A");
    assert_eq!(upper.results[0].label.as_deref(), Some("AVC/H.264"));
    assert_eq!(upper.results[0].diagnostics.len(), 5);
}

#[test]
fn test_label_only_identifiers() {
    let report = engine().dispatch("lhv1.1,vvcN,vvs1.x");
    let labels: Vec<_> = report
        .results
        .iter()
        .map(|r| r.label.as_deref().unwrap())
        .collect();
    assert_eq!(
        labels,
        ["Layered HEVC", "VVC non-VCL track", "VVC subpicture track"]
    );
    assert!(report.results.iter().all(|r| !r.has_errors()));
}

#[test]
fn test_rendered_report() {
    let text = engine().dispatch("lvc1.vlev2,nope").render();
    assert_eq!(
        text,
        "MPEG Low Complexity Enhancement Video Coding\n\
         default   Profile (vprf)=0 (Main profile)\n\
         \x20         Level (vlev)=2 (Level 2)\n\
         ----\n\
         error: unsupported codec=nope\n"
    );
}

#[test]
fn test_report_serializes_to_tagged_json() {
    let report = engine().dispatch("mhm1.0x0D");
    let json = serde_json::to_value(&report).unwrap();
    let result = &json["results"][0];
    assert_eq!(result["identifier"], "mhm1");
    assert_eq!(result["label"], "MPEG-H Audio");
    assert_eq!(result["diagnostics"][0]["kind"], "normal");
    assert_eq!(result["diagnostics"][0]["text"], "LC Profile Level 3");
}

#[test]
fn test_registry_entries_are_listed_in_registration_order() {
    let registry: Registry = default_registry().unwrap();
    let labels: Vec<_> = registry.entries().iter().map(|e| e.label()).collect();
    assert_eq!(labels.first(), Some(&"AVC/H.264"));
    assert_eq!(labels.last(), Some(&"MPEG-H Audio"));
}

#[test]
fn test_classifier_requires_exact_attribute_set() {
    let dvb = Classifier::dvb().unwrap();
    let missing = CodingParameters::video("avc1").with_level("4.2");
    let extra = CodingParameters::video("avc1")
        .with_profile("High")
        .with_level("4.2")
        .with_mode("LC");
    assert!(dvb.classify(&missing).is_none());
    assert!(dvb.classify(&extra).is_none());
}

#[test]
fn test_engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
}
