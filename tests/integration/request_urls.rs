//! URL preparation for both API generations.

use estat::config::EstatConfig;
use estat::report::{MemoryReporter, Reported};
use estat::settings::{ApiVersion, BulkSection, Lang};
use estat::{ApiError, Node, Session};
use std::sync::Arc;

fn config(version: ApiVersion) -> EstatConfig {
    let mut config = EstatConfig::default();
    config.api.version = version;
    config
}

#[test]
fn test_legacy_data_url() {
    let session = Session::new(&config(ApiVersion::First)).unwrap();
    let url = session
        .data_url("nama_10_gdp", &Node::map([("geo", "EU28")]))
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://ec.europa.eu/eurostat/wdds/rest/data/v2.1/json/en/nama_10_gdp?precision=1&sort=1&geo=EU28"
    );
}

#[test]
fn test_legacy_path_settings_come_from_request() {
    let session = Session::new(&config(ApiVersion::First)).unwrap();
    let request = Node::map([
        ("lang", Node::from("de")),
        ("format", Node::from("unicode")),
        ("sort", Node::Absent),
    ]);
    let url = session.data_url("tps00001", &request).unwrap();
    assert_eq!(
        url.as_str(),
        "http://ec.europa.eu/eurostat/wdds/rest/data/v2.1/unicode/de/tps00001?precision=1"
    );
}

#[test]
fn test_legacy_rejects_unknown_format() {
    let session = Session::new(&config(ApiVersion::First)).unwrap();
    let err = session
        .data_url("tps00001", &Node::map([("format", "dcat")]))
        .unwrap_err();
    assert!(matches!(err, ApiError::UnsupportedFormat { version: 1, .. }));

    let err = session
        .data_url("tps00001", &Node::map([("lang", "it")]))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidParameter { .. }));
}

#[test]
fn test_sdmx_data_url_with_repeated_values() {
    let mut config = config(ApiVersion::New);
    config.api.lang = Lang::Fr;
    let session = Session::new(&config).unwrap();

    let request = Node::map([
        ("geo", Node::pairs([(0, "DE"), (1, "FR")])),
        ("time", Node::from(2020)),
    ]);
    let url = session.data_url("nama_10_gdp", &request).unwrap();
    assert_eq!(
        url.as_str(),
        "https://webgate.acceptance.ec.europa.eu/estat/api/dissemination/sdmx/2.1/data/nama_10_gdp?lang=fr&format=json&geo=DE&geo=FR&time=2020"
    );
}

#[test]
fn test_config_defaults_reach_the_query() {
    let mut config = config(ApiVersion::New);
    config
        .defaults
        .insert("unit".to_string(), "CP_MEUR".to_string());
    let session = Session::new(&config).unwrap();

    let url = session.data_url("nama_10_gdp", &Node::Absent).unwrap();
    assert_eq!(url.query(), Some("lang=en&format=json&unit=CP_MEUR"));

    let url = session
        .data_url("nama_10_gdp", &Node::map([("unit", Node::Absent)]))
        .unwrap();
    assert_eq!(url.query(), Some("lang=en&format=json"));
}

#[test]
fn test_bulk_urls() {
    let session = Session::new(&config(ApiVersion::First)).unwrap();
    assert_eq!(
        session.bulk_listing_url().unwrap().as_str(),
        "http://ec.europa.eu/eurostat/estat-navtree-portlet-prod/BulkDownloadListing"
    );

    let url = session
        .bulk_file_url(BulkSection::Data, Some("nama_10_gdp"), "tsv", true)
        .unwrap();
    assert_eq!(url.query(), Some("file=data%2Fnama_10_gdp.tsv.gz"));

    let url = session
        .bulk_file_url(BulkSection::Dic, Some("geo"), "dic", false)
        .unwrap();
    assert_eq!(url.query(), Some("file=dic%2Fen%2Fgeo.dic"));

    let url = session
        .bulk_file_url(BulkSection::Toc, None, "txt", false)
        .unwrap();
    assert_eq!(url.query(), Some("file=table_of_contents.txt"));
}

#[test]
fn test_verbose_messages_reach_reporter() {
    let mut config = config(ApiVersion::New);
    config.api.verbose = true;
    let reporter = Arc::new(MemoryReporter::new());
    let session = Session::with_reporter(&config, reporter.clone()).unwrap();

    session.params(&Node::map([("geo", "DE")])).unwrap();
    assert_eq!(
        reporter.entries(),
        vec![Reported::Verbose("3 request parameters".to_string())]
    );
}

#[test]
fn test_error_report_rendering() {
    let session = Session::new(&config(ApiVersion::New)).unwrap();
    let err = session.data_url("", &Node::Absent).unwrap_err();
    assert_eq!(
        err.report(Some("data_url")).to_string(),
        "!!! InvalidParameter: Invalid parameter dataset: dataset code is empty data_url !!!"
    );
}
