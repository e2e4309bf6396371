//! Test fixtures and constants.

use serde_json::{json, Value};

/// UUID of the application the mock serves.
pub const APP_UUID: &str = "a47ac10b-58cc-4372-a567-0e02b2c3d479";

/// Name of the application the mock serves.
pub const APP_NAME: &str = "My Site";

/// Hosting id of the application the mock serves.
pub const HOSTING_ID: &str = "myrealm:mysite";

/// Site part of [`HOSTING_ID`].
pub const SITE: &str = "mysite";

/// Credentials the mock token endpoint accepts.
pub const GOOD_KEY: &str = "17feaf34-5d04-402b-9a67-15d5161d24e1";
pub const GOOD_SECRET: &str = "Ep0+cN7Dmh0kL6nQTkfyqzBfGNTzA0fwg+T7MkSA4cs=";

/// Bearer token the mock token endpoint hands out.
pub const ACCESS_TOKEN: &str = "test-access-token";

/// An application record as the API returns it.
pub fn application(hosting_id: &str) -> Value {
    json!({
        "id": 1234,
        "uuid": APP_UUID,
        "name": APP_NAME,
        "hosting": { "type": "acp", "id": hosting_id },
        "subscription": { "uuid": "f47ac10b-58cc-4372-a567-0e02b2c3d470", "name": "My Subscription" },
        "_links": { "self": { "href": format!("https://cloud.acquia.com/api/applications/{}", APP_UUID) } }
    })
}

/// An environment record as the API returns it.
pub fn environment(name: &str, domains: &[&str], ssh_url: &str) -> Value {
    json!({
        "id": format!("24-{}", name),
        "label": name,
        "name": name,
        "domains": domains,
        "ssh_url": ssh_url,
        "flags": { "production": name == "prod" }
    })
}

/// The dev/test/prod environments of [`SITE`].
pub fn standard_environments() -> Vec<Value> {
    vec![
        environment("dev", &["dev.example.com"], "devuser@dev.host"),
        environment(
            "test",
            &["test.example.com", "stage.example.com"],
            "mysite.test@staging-1.prod.hosting.acquia.com",
        ),
        environment(
            "prod",
            &["www.example.com"],
            "mysite.prod@web-1.prod.hosting.acquia.com",
        ),
    ]
}

/// Wrap records in a HAL collection.
pub fn collection(items: Vec<Value>) -> Value {
    json!({
        "total": items.len(),
        "_links": {},
        "_embedded": { "items": items }
    })
}
