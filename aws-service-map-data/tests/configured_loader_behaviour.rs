//! Behavioural coverage for environment-driven loader selection.
#![cfg(feature = "remote")]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use aws_service_map_core::{LoadError, ServiceMap};
use aws_service_map_data::test_support::StaticServer;
use aws_service_map_data::{
    ConfiguredLoader, DatasetSource, ENV_SOURCE, ENV_TIMEOUT_SECS, ENV_URL, ServiceMapConfig,
    service_map,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Listing = Result<BTreeSet<String>, LoadError>;

const TWO_REGION_DOCUMENT: &str = r#"{"prices":[
    {"id":"s3:us-east-1"},
    {"id":"9f2c:eu-west-1","attributes":{"aws:region":"eu-west-1","aws:serviceUrl":"https://aws.amazon.com/s3/"}}
]}"#;

#[derive(Debug, Default)]
struct SourceContext {
    environment: RefCell<HashMap<&'static str, String>>,
    server: RefCell<Option<StaticServer>>,
    map: RefCell<Option<ServiceMap<ConfiguredLoader>>>,
    listings: RefCell<Vec<Listing>>,
}

impl SourceContext {
    fn set(&self, key: &'static str, value: impl Into<String>) {
        self.environment.borrow_mut().insert(key, value.into());
    }

    fn with_map<T>(&self, f: impl FnOnce(&ServiceMap<ConfiguredLoader>) -> T) -> T {
        let guard = self.map.borrow();
        let map = guard
            .as_ref()
            .unwrap_or_else(|| panic!("service map must be built"));
        f(map)
    }

    fn list_s3(&self) {
        let listing = self.with_map(|map| map.regions_for_service("s3").cloned());
        self.listings.borrow_mut().push(listing);
    }
}

#[fixture]
fn source_context() -> SourceContext {
    SourceContext::default()
}

// --- Given steps ---

#[given("an empty environment")]
fn empty_environment(#[from(source_context)] ctx: &SourceContext) {
    ctx.environment.borrow_mut().clear();
}

#[given("the source setting names an unknown source")]
fn unknown_source(#[from(source_context)] ctx: &SourceContext) {
    ctx.set(ENV_SOURCE, "carrier-pigeon");
}

#[given("a regional table server publishing s3 in two regions")]
fn publishing_server(#[from(source_context)] ctx: &SourceContext) {
    let server = StaticServer::start(200, TWO_REGION_DOCUMENT)
        .unwrap_or_else(|err| panic!("server should start: {err}"));
    *ctx.server.borrow_mut() = Some(server);
}

#[given("the environment selects the download source for that server")]
fn download_from_server(#[from(source_context)] ctx: &SourceContext) {
    let url = ctx
        .server
        .borrow()
        .as_ref()
        .map(StaticServer::url)
        .unwrap_or_else(|| panic!("server must be running"));
    ctx.set(ENV_SOURCE, "DOWNLOAD_FROM_AWS");
    ctx.set(ENV_URL, url);
    ctx.set(ENV_TIMEOUT_SECS, "5");
}

#[given("the environment selects the download source for an unreachable server")]
fn download_from_nowhere(#[from(source_context)] ctx: &SourceContext) {
    let url = StaticServer::unreachable_url()
        .unwrap_or_else(|err| panic!("port should be reserved: {err}"));
    ctx.set(ENV_SOURCE, "download-from-aws");
    ctx.set(ENV_URL, url);
}

// --- When steps ---

#[when("I build the service map")]
fn build_map(#[from(source_context)] ctx: &SourceContext) {
    let environment = ctx.environment.borrow().clone();
    let config = ServiceMapConfig::from_lookup(|key| environment.get(key).cloned())
        .unwrap_or_else(|err| panic!("configuration should be valid: {err}"));
    let map = service_map(&config).unwrap_or_else(|err| panic!("loader should build: {err}"));
    *ctx.map.borrow_mut() = Some(map);
}

#[when("I list the regions for s3")]
fn list_once(#[from(source_context)] ctx: &SourceContext) {
    ctx.list_s3();
}

#[when("I list the regions for s3 twice")]
fn list_twice(#[from(source_context)] ctx: &SourceContext) {
    ctx.list_s3();
    ctx.list_s3();
}

// --- Then steps ---

#[then("the map reads from the bundled snapshot")]
fn reads_bundled(#[from(source_context)] ctx: &SourceContext) {
    ctx.with_map(|map| {
        assert_eq!(map.loader().source(), DatasetSource::EmbeddedInPackage);
    });
}

#[then("ec2 is offered in us-east-1")]
fn ec2_in_virginia(#[from(source_context)] ctx: &SourceContext) {
    ctx.with_map(|map| assert_eq!(map.is_service_in_region("ec2", "us-east-1"), Ok(true)));
}

#[then("s3 is offered in eu-west-1 and us-east-1")]
fn s3_in_two_regions(#[from(source_context)] ctx: &SourceContext) {
    let expected: BTreeSet<String> = ["eu-west-1", "us-east-1"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    assert_eq!(ctx.listings.borrow().as_slice(), &[Ok(expected)]);
}

#[then("the server received one request")]
fn one_request(#[from(source_context)] ctx: &SourceContext) {
    let requests = ctx
        .server
        .borrow()
        .as_ref()
        .map(StaticServer::requests)
        .unwrap_or_default();
    assert_eq!(requests.len(), 1);
}

#[then("both listings report a network error")]
fn both_fail(#[from(source_context)] ctx: &SourceContext) {
    let listings = ctx.listings.borrow();
    assert_eq!(listings.len(), 2);
    assert!(
        listings
            .iter()
            .all(|listing| matches!(listing, Err(LoadError::Network { .. }))),
        "expected network errors, got {listings:?}"
    );
    assert_eq!(listings.first(), listings.last());
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/configured_loader.feature", name = $title)]
        fn $fn_name(source_context: SourceContext) {
            let _ = source_context;
        }
    };
}

register_scenario!(serving_bundled, "serving the bundled snapshot by default");
register_scenario!(ignoring_unknown_source, "ignoring an unrecognized source setting");
register_scenario!(downloading_live, "downloading the live document");
register_scenario!(reporting_unreachable, "reporting an unreachable regional table");
