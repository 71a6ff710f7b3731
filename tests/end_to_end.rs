//
//  cpanel-publicapi
//  tests/end_to_end.rs
//

//! End-to-end call scenarios against a mock panel host.
//!
//! Each test stands up a local mock server, points a session at its port
//! (plaintext, since the mock has no TLS listener), and exercises one of
//! the call operations through encode, transport, and decode.

use std::io::Write;
use std::time::{Duration, Instant};

use cpanel_publicapi::{Config, HeaderInput, Method, PublicApi, ResponseFormat, Service};

fn client_for(server: &mockito::Server) -> PublicApi {
    let (host, _) = split_address(server);
    PublicApi::new(
        Config::default()
            .user("bob")
            .pass("secret")
            .host(host)
            .usessl(false)
            .timeout(5),
    )
    .unwrap()
}

fn split_address(server: &mockito::Server) -> (String, u16) {
    let address = server.host_with_port();
    let (host, port) = address.split_once(':').unwrap();
    (host.to_string(), port.parse().unwrap())
}

fn service_for(server: &mockito::Server) -> Service {
    Service::Port(split_address(server).1)
}

#[test]
fn whm_version_call_decodes_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/xml-api/version")
        .match_body(mockito::Matcher::Regex("api\\.output=json".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"version": "100"}"#)
        .create();

    let client = client_for(&server);
    // Explicit service, so the call reaches the mock's random port
    // instead of the well-known administrative one.
    let result = client.whm_api_on(service_for(&server), "version", &[], ResponseFormat::Json);

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    assert_eq!(result.data["version"], "100");
    mock.assert();
}

#[test]
fn api1_positional_arguments_hit_the_wire_numbered() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/xml-api/cpanel")
        .match_body(mockito::Matcher::Regex(
            "arg-0=somedb&arg-1=somedbuser&arg-2=ALL".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"cpanelresult": {"status": 1, "data": {"result": "ok"}, "error": ""}}"#)
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api1(
        service_for(&server),
        "Mysql",
        "adduserdb",
        None,
        &["somedb", "somedbuser", "ALL"],
        ResponseFormat::Native,
    );

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    assert_eq!(result.data["result"], "ok");
    mock.assert();
}

#[test]
fn api2_named_parameters_and_envelope_unwrap() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/xml-api/cpanel")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::Regex("cpanel_xmlapi_apiversion=2".to_string()),
            mockito::Matcher::Regex("cpanel_xmlapi_module=Email".to_string()),
            mockito::Matcher::Regex("domain=example.com".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"cpanelresult": {"status": 1, "data": [{"email": "a@example.com"}], "error": ""}}"#,
        )
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api2(
        service_for(&server),
        "Email",
        "listpops",
        None,
        &[("domain", "example.com")],
        ResponseFormat::Native,
    );

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    assert_eq!(result.data[0]["email"], "a@example.com");
    mock.assert();
}

#[test]
fn xml_response_is_normalized_like_json() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(
            "<cpanelresult><status>1</status><data><db>mydb</db></data><error></error></cpanelresult>",
        )
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api2(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Xml,
    );

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    assert_eq!(result.data["db"], "mydb");
}

#[test]
fn remote_failure_envelope_becomes_ok_false() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"cpanelresult": {"status": 0, "data": null, "error": "database exists"}}"#)
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api1(
        service_for(&server),
        "Mysql",
        "adduserdb",
        None,
        &["somedb"],
        ResponseFormat::Native,
    );

    assert!(!result.ok);
    assert_eq!(result.error.as_deref(), Some("database exists"));
}

#[test]
fn http_error_status_is_a_failure_even_with_a_parsable_body() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Internal Server Error"}"#)
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api2(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Native,
    );

    assert!(!result.ok);
    let error = result.error.unwrap();
    assert!(error.contains("500"), "missing status: {}", error);
}

#[test]
fn failure_envelope_on_an_error_status_keeps_the_remote_message() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"cpanelresult": {"status": 0, "data": null, "error": "Access denied"}}"#)
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api1(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Native,
    );

    assert!(!result.ok);
    assert_eq!(result.error.as_deref(), Some("Access denied"));
}

#[test]
fn malformed_body_with_explicit_format_is_a_failure() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{truncated")
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api2(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Json,
    );

    assert!(!result.ok);
    assert!(result.error.unwrap().contains("decode"));
}

#[test]
fn basic_auth_header_carries_the_password() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/xml-api/cpanel")
        // base64("bob:secret")
        .match_header("authorization", "Basic Ym9iOnNlY3JldA==")
        .with_status(200)
        .with_body(r#"{"cpanelresult": {"status": 1, "data": {}, "error": ""}}"#)
        .create();

    let client = client_for(&server);
    let result = client.cpanel_api2(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Native,
    );

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    mock.assert();
}

#[test]
fn accesshash_uses_the_panel_authorization_scheme() {
    let mut server = mockito::Server::new();
    let (host, port) = {
        let address = server.host_with_port();
        let (host, port) = address.split_once(':').unwrap();
        (host.to_string(), port.parse::<u16>().unwrap())
    };

    let mock = server
        .mock("POST", "/xml-api/cpanel")
        .match_header("authorization", "cPanel bob:ffee")
        .with_status(200)
        .with_body(r#"{"cpanelresult": {"status": 1, "data": {}, "error": ""}}"#)
        .create();

    let client = PublicApi::new(
        Config::default()
            .user("bob")
            .accesshash("ff\nee\n")
            .host(host)
            .usessl(false)
            .timeout(5),
    )
    .unwrap();

    let result = client.cpanel_api2(
        Service::Port(port),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Native,
    );

    assert!(result.ok, "unexpected failure: {:?}", result.error);
    mock.assert();
}

#[test]
fn raw_request_returns_the_body_verbatim() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/cgi/custom")
        .match_query(mockito::Matcher::UrlEncoded(
            "check".to_string(),
            "1".to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("plain, undecoded output")
        .create();

    let client = client_for(&server);
    let body = client
        .api_request(
            service_for(&server),
            "/cgi/custom",
            Method::Get,
            &[("check", "1")],
            Some(HeaderInput::Map(vec![(
                "X-Custom".to_string(),
                "yes".to_string(),
            )])),
        )
        .unwrap();

    assert_eq!(body, "plain, undecoded output");
}

#[test]
fn timeout_is_a_bounded_uniform_failure() {
    // A non-pooled server: the slow chunked body blocks the server's
    // runtime thread past the end of this test, so the server must not
    // be returned to the shared pool where another test would pick it up.
    let mut server = mockito::Server::new_with_opts(mockito::ServerOpts::default());
    server
        .mock("POST", "/xml-api/cpanel")
        .with_status(200)
        .with_chunked_body(|writer| {
            std::thread::sleep(Duration::from_secs(10));
            writer.write_all(b"{}")
        })
        .create();

    let (host, _) = {
        let address = server.host_with_port();
        let (host, port) = address.split_once(':').unwrap();
        (host.to_string(), port.parse::<u16>().unwrap())
    };

    let client = PublicApi::new(
        Config::default()
            .user("bob")
            .pass("secret")
            .host(host)
            .usessl(false)
            .timeout(1),
    )
    .unwrap();

    let started = Instant::now();
    let result = client.cpanel_api2(
        service_for(&server),
        "Mysql",
        "listdbs",
        None,
        &[],
        ResponseFormat::Native,
    );
    let elapsed = started.elapsed();

    assert!(!result.ok);
    assert!(result.error.unwrap().contains("transport failure"));
    assert!(elapsed < Duration::from_secs(5), "hung past the deadline: {:?}", elapsed);
}
