#![cfg(feature = "reqwest")]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde::{Deserialize, Serialize};
// self
use mamis_utils::{
	CancellationToken,
	error::{Error, RequestError},
	http::{Method, ReadyRequest, ReqwestTransport},
	url::Url,
};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Donor {
	id: i32,
	first_name: String,
}

fn transport() -> Arc<ReqwestTransport> {
	Arc::new(
		ReqwestTransport::builder()
			.user_agent("mamis-utils-it")
			.build()
			.expect("Test transport should build successfully."),
	)
}

fn address(server: &MockServer, path: &str) -> Url {
	Url::parse(&server.url(path)).expect("Mock server address should parse successfully.")
}

#[tokio::test]
async fn get_with_query_decodes_json_body() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/donors")
				.query_param("campaign", "Navidemos")
				.query_param("page", "2");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":7,"firstName":"Ana"}]"#);
		})
		.await;
	let donors: Vec<Donor> = ReadyRequest::get(transport(), address(&server, "/api/donors"))
		.with_query([("campaign", Some("Navidemos")), ("name", None), ("page", Some("2"))])?
		.execute(&CancellationToken::new())
		.await?;

	assert_eq!(donors, vec![Donor { id: 7, first_name: "Ana".into() }]);

	mock.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn post_sends_buffered_json_content() -> color_eyre::Result<()> {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/donors")
				.header("content-type", "application/json")
				.json_body(serde_json::json!({ "id": 0, "firstName": "Luz" }));
			then.status(201)
				.header("content-type", "application/json")
				.body(r#"{"id":12,"firstName":"Luz"}"#);
		})
		.await;
	let created: Donor = ReadyRequest::post(transport(), address(&server, "/api/donors"))
		.with_content(&Donor { id: 0, first_name: "Luz".into() })?
		.execute(&CancellationToken::new())
		.await?;

	assert_eq!(created.id, 12);

	mock.assert_async().await;

	Ok(())
}

#[tokio::test]
async fn not_found_surfaces_status_and_body() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/donors/404");
			then.status(404).body("Donor 404 does not exist");
		})
		.await;
	let err = ReadyRequest::get(transport(), address(&server, "/api/donors/404"))
		.execute::<Donor>(&CancellationToken::new())
		.await
		.expect_err("A 404 response must fail.");

	match err {
		Error::Status { status, body } => {
			assert_eq!(status, 404);
			assert_eq!(body, "Donor 404 does not exist");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn execute_empty_accepts_no_content_and_rejects_conflicts() {
	let server = MockServer::start_async().await;
	let deleted = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/donors/1");
			then.status(204);
		})
		.await;
	let conflict = server
		.mock_async(|when, then| {
			when.method(PUT).path("/api/donors/2");
			then.status(409).body("stale version");
		})
		.await;
	let cancel = CancellationToken::new();

	ReadyRequest::delete(transport(), address(&server, "/api/donors/1"))
		.execute_empty(&cancel)
		.await
		.expect("A 204 response should succeed.");

	let err = ReadyRequest::put(transport(), address(&server, "/api/donors/2"))
		.with_content(&Donor { id: 2, first_name: "Sol".into() })
		.expect("Donor body should serialize.")
		.execute_empty(&cancel)
		.await
		.expect_err("A 409 response must fail.");

	assert_eq!(err.status(), Some(409));
	assert_eq!(err.body(), Some("stale version"));

	deleted.assert_async().await;
	conflict.assert_async().await;
}

#[tokio::test]
async fn requests_without_address_fail_before_sending() {
	let err = ReadyRequest::new(transport(), Method::GET)
		.with_query([("a", Some("1"))])
		.expect_err("Query construction must require an address.");

	assert!(matches!(err, Error::Request(RequestError::MissingAddress)));

	let err = ReadyRequest::new(transport(), Method::GET)
		.execute_empty(&CancellationToken::new())
		.await
		.expect_err("Executing without an address must fail.");

	assert!(matches!(err, Error::Request(RequestError::MissingAddress)));
}

#[tokio::test]
async fn cancelled_token_aborts_the_call() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/slow");
			then.status(200).delay(std::time::Duration::from_secs(5)).body("{}");
		})
		.await;
	let cancel = CancellationToken::new();
	let trigger = cancel.clone();

	tokio::spawn(async move {
		tokio::time::sleep(std::time::Duration::from_millis(50)).await;
		trigger.cancel();
	});

	let err = ReadyRequest::get(transport(), address(&server, "/slow"))
		.execute::<serde_json::Value>(&cancel)
		.await
		.expect_err("Cancelled requests must fail.");

	assert!(matches!(err, Error::Cancelled));

	let _ = mock;
}
