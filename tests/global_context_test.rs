//! Process-wide network debug registration.
//!
//! These tests share one global context, so they run serially.

use std::sync::Arc;

use serde_json::json;
use serial_test::serial;
use toolcat::adapters::mock::{InMemoryPreferences, MockHttpClient, MockResponse};
use toolcat::debug::panic::panic_logger_installed;
use toolcat::debug::{global, init_global, NetworkDebug, SharedClient};
use toolcat::startup::{install_network_debug, StartupConfig};
use toolcat::traits::{HttpClient, Request};

fn ctx(launch_flag: bool) -> NetworkDebug {
    NetworkDebug::from_parts(launch_flag, Arc::new(InMemoryPreferences::new()), 0)
}

#[test]
#[serial]
fn test_first_registration_wins() {
    let first = init_global(ctx(false));
    let second = init_global(ctx(true));

    assert!(std::ptr::eq(first, second));
    assert!(Arc::ptr_eq(&first.state, &second.state));
    assert!(global().is_some_and(|g| std::ptr::eq(g, first)));
}

#[tokio::test]
#[serial]
async fn test_install_from_startup_is_idempotent() {
    let mock = MockHttpClient::new();
    mock.set_default_response(MockResponse::json(200, &json!([])));
    let shared = SharedClient::new(Arc::new(mock.clone()));
    let config = StartupConfig::default();

    let a = install_network_debug(&config, Arc::new(InMemoryPreferences::new()), &shared);
    let b = install_network_debug(&config, Arc::new(InMemoryPreferences::new()), &shared);
    assert!(std::ptr::eq(a, b));
    assert!(shared.is_instrumented());
    assert!(panic_logger_installed());

    let before = a.log.len();
    shared.send(Request::get("/tools")).await.unwrap();
    assert_eq!(a.log.len(), before + 1);
}
