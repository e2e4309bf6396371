//! Mock Acquia Cloud token and API endpoints.

use httptest::{all_of, matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};

use super::fixtures::{application, collection, ACCESS_TOKEN, APP_UUID, HOSTING_ID};

const TOKEN_PATH: &str = "/oauth/token";
const API_PREFIX: &str = "/api";

/// An httptest server standing in for Acquia Cloud.
///
/// Every expectation states how often it must be hit; the server checks
/// them when it drops.
pub struct CloudMock {
    pub server: Server,
}

impl CloudMock {
    pub fn new() -> Self {
        Self {
            server: Server::run(),
        }
    }

    pub fn api_url(&self) -> String {
        self.server.url_str(API_PREFIX)
    }

    pub fn token_url(&self) -> String {
        self.server.url_str(TOKEN_PATH)
    }

    /// Hand out a token `times` times.
    pub fn grants_token(&self, times: usize) -> &Self {
        self.server.expect(
            Expectation::matching(request::method_path("POST", TOKEN_PATH))
                .times(times)
                .respond_with(json_encoded(json!({
                    "access_token": ACCESS_TOKEN,
                    "expires_in": 300,
                    "token_type": "bearer",
                    "scope": null
                }))),
        );
        self
    }

    /// Refuse the client credentials `times` times.
    pub fn refuses_token(&self, times: usize) -> &Self {
        self.server.expect(
            Expectation::matching(request::method_path("POST", TOKEN_PATH))
                .times(times)
                .respond_with(status_code(400).body(
                    json!({
                        "error": "invalid_client",
                        "error_description": "The client credentials are invalid"
                    })
                    .to_string(),
                )),
        );
        self
    }

    /// Fail the token endpoint with a server error `times` times.
    pub fn token_service_fails(&self, times: usize) -> &Self {
        self.server.expect(
            Expectation::matching(request::method_path("POST", TOKEN_PATH))
                .times(times)
                .respond_with(status_code(503).body("upstream unavailable")),
        );
        self
    }

    /// Serve the application list `times` times.
    pub fn lists_applications(&self, times: usize) -> &Self {
        self.server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", format!("{}/applications", API_PREFIX)),
                request::headers(contains(key("authorization"))),
            ])
            .times(times)
            .respond_with(json_encoded(collection(vec![application(HOSTING_ID)]))),
        );
        self
    }

    /// Serve the application record once, with the given hosting id.
    pub fn serves_application(&self, hosting_id: &str) -> &Self {
        self.server.expect(
            Expectation::matching(request::method_path(
                "GET",
                format!("{}/applications/{}", API_PREFIX, APP_UUID),
            ))
            .respond_with(json_encoded(application(hosting_id))),
        );
        self
    }

    /// Serve the environment list once.
    pub fn serves_environments(&self, environments: Vec<Value>) -> &Self {
        self.server.expect(
            Expectation::matching(request::method_path(
                "GET",
                format!("{}/applications/{}/environments", API_PREFIX, APP_UUID),
            ))
            .respond_with(json_encoded(collection(environments))),
        );
        self
    }

    /// Expect one full successful run: token, trial call, application,
    /// environments.
    pub fn full_run(&self, environments: Vec<Value>) -> &Self {
        self.grants_token(1)
            .lists_applications(1)
            .serves_application(HOSTING_ID)
            .serves_environments(environments)
    }
}
