mod support;

use geocatalog_core::{BufferedDiagnosticSink, ResolverConfig, ServiceFactory, Severity};
use std::sync::Arc;
use support::{identifiers, params, registry, Build, CallLog, Derive, ScriptedExtension};

#[test]
fn never_derives_params_from_known_connection_parameters() {
    let log = CallLog::default();
    let factory = ServiceFactory::new(registry(vec![
        ScriptedExtension::specific("wms", Derive::Panic, Build::Decline, &log),
        ScriptedExtension::generic("geotools", Derive::Panic, Build::Handle("generic"), &log),
    ]));

    let services = factory.resolve_params(&params("url", "http://example.com/wms"));

    assert_eq!(identifiers(&services), vec!["generic"]);
    assert_eq!(log.count_prefix("derive:"), 0);
}

#[test]
fn specific_handles_suppress_generic_pass() {
    let log = CallLog::default();
    let factory = ServiceFactory::new(registry(vec![
        ScriptedExtension::generic("geotools", Derive::Decline, Build::Handle("generic"), &log),
        ScriptedExtension::specific("wms", Derive::Decline, Build::Handle("wms-handle"), &log),
        ScriptedExtension::specific("wfs", Derive::Decline, Build::Handle("wfs-handle"), &log),
    ]));

    let services = factory.resolve_params(&params("url", "http://example.com/ows"));

    assert_eq!(identifiers(&services), vec!["wms-handle", "wfs-handle"]);
    assert!(!log.contains("instantiate:geotools"));
}

#[test]
fn specific_failures_are_reported_as_errors() {
    let log = CallLog::default();
    let sink = Arc::new(BufferedDiagnosticSink::new());
    let factory = ServiceFactory::builder(registry(vec![
        ScriptedExtension::specific("wms", Derive::Decline, Build::Fail, &log),
        ScriptedExtension::specific("wfs", Derive::Decline, Build::Handle("wfs-handle"), &log),
    ]))
    .diagnostics(sink.clone())
    .build();

    let services = factory.resolve_params(&params("url", "http://example.com/ows"));

    assert_eq!(identifiers(&services), vec!["wfs-handle"]);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].severity, Severity::Error);
    assert_eq!(records[0].message, "wms could not create service");
}

#[test]
fn generic_failures_are_traced_not_warned() {
    let log = CallLog::default();
    let sink = Arc::new(BufferedDiagnosticSink::new());
    let factory = ServiceFactory::builder(registry(vec![
        ScriptedExtension::specific("wms", Derive::Decline, Build::Decline, &log),
        ScriptedExtension::generic("geotools.a", Derive::Decline, Build::Fail, &log),
        ScriptedExtension::generic("geotools.b", Derive::Decline, Build::Panic, &log),
        ScriptedExtension::generic("geotools.c", Derive::Decline, Build::Handle("generic"), &log),
    ]))
    .diagnostics(sink.clone())
    .config(ResolverConfig::default().with_debug(true))
    .build();

    let services = factory.resolve_params(&params("url", "jdbc:postgresql://db/gis"));

    assert_eq!(identifiers(&services), vec!["generic"]);
    let records = sink.records();
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|record| record.severity == Severity::Trace));
    assert_eq!(records[0].message, "geotools.a could not create service");
    assert_eq!(records[1].message, "geotools.b could not create service");
}

#[test]
fn all_extensions_declining_yields_empty_list() {
    let log = CallLog::default();
    let factory = ServiceFactory::new(registry(vec![
        ScriptedExtension::specific("wms", Derive::Decline, Build::Decline, &log),
        ScriptedExtension::generic("geotools", Derive::Decline, Build::Decline, &log),
    ]));

    assert!(factory.resolve_params(&params("url", "x")).is_empty());
    assert_eq!(log.entries(), vec!["instantiate:wms", "instantiate:geotools"]);
}

#[test]
fn missing_sink_degrades_silently() {
    let log = CallLog::default();
    let factory = ServiceFactory::new(registry(vec![
        ScriptedExtension::specific("wms", Derive::Decline, Build::Panic, &log),
        ScriptedExtension::generic("geotools", Derive::Decline, Build::Fail, &log),
    ]));

    assert!(factory.resolve_params(&params("url", "x")).is_empty());
}
