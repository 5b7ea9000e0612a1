//! `github`: a blocking GitHub REST client.
//!
//! Shaped like the common GitHub client libraries: a `Github(login_or_token,
//! base_url)` class whose methods return resource objects exposing their
//! response body as `raw_data`, so results normalize to plain JSON.
//!
//! The HTTP client is `reqwest::blocking`; callers running inside an async
//! runtime must invoke these methods from a blocking task.

use bridge_domain::{
    BoundArguments, CallError, Class, Instance, Module, NativeFunction, Returned, Signature,
};
use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

pub const IMPORT_PATH: &str = "github";
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("sdk-bridge/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Build the `github` module
pub fn module() -> Module {
    Module::new(IMPORT_PATH)
        .with_doc("GitHub REST API v3 client")
        .with_class(github_class())
}

struct GithubApi {
    http: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl GithubApi {
    fn new(token: Option<SecretString>, base_url: &str) -> Result<Self, CallError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CallError::new("ConnectionError", e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url).header("Accept", ACCEPT);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    fn send(&self, builder: RequestBuilder) -> Result<Value, CallError> {
        let response = builder
            .send()
            .map_err(|e| CallError::new("ConnectionError", e.to_string()))?;
        let status = response.status();
        let body: Value = response.json().unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(CallError::new(
                "GithubException",
                error_message(status.as_u16(), status.canonical_reason(), &body),
            ));
        }
        Ok(body)
    }

    fn get(&self, path: &str) -> Result<Value, CallError> {
        debug!(path, "GET");
        self.send(self.request(Method::GET, path))
    }
}

/// `"{status} {message}"`, preferring the API's own `message` field
fn error_message(status: u16, reason: Option<&str>, body: &Value) -> String {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or(reason)
        .unwrap_or("Unknown error");
    format!("{} {}", status, message)
}

/// Wrap a response body as a resource object.
///
/// Top-level scalar fields become attributes; the full body is `raw_data`.
fn resource(type_name: &str, label_key: &str, raw: Value) -> Returned {
    let label = raw.get(label_key).cloned().unwrap_or(Value::Null);
    let mut instance = Instance::new(type_name).with_repr(format!("{}({}={})", type_name, label_key, label));
    if let Value::Object(fields) = &raw {
        for (key, value) in fields {
            if !value.is_object() && !value.is_array() {
                instance = instance.with_attribute(key.clone(), value.clone());
            }
        }
    }
    Returned::object(instance.with_attribute("raw_data", raw))
}

fn repo_path(args: &BoundArguments, name: &str) -> Result<String, CallError> {
    match args.get(name) {
        Some(Value::String(full_name)) if full_name.contains('/') => {
            Ok(format!("/repos/{}", full_name))
        }
        Some(Value::Number(id)) if id.is_u64() => Ok(format!("/repositories/{}", id)),
        _ => Err(CallError::value_error(format!(
            "argument '{}' must be 'owner/name' or a numeric id",
            name
        ))),
    }
}

fn github_class() -> Class {
    Class::new(
        "Github",
        Signature::new()
            .optional("login_or_token", Value::Null)
            .optional("base_url", DEFAULT_BASE_URL),
        |args| {
            let token = match args.get("login_or_token") {
                None | Some(Value::Null) => None,
                Some(Value::String(token)) => Some(SecretString::from(token.clone())),
                Some(_) => return Err(CallError::type_error("login_or_token must be a string")),
            };
            let base_url = args.get_str("base_url").unwrap_or(DEFAULT_BASE_URL);
            let api = Arc::new(GithubApi::new(token, base_url)?);
            Ok(Returned::object(client_instance(api)))
        },
    )
    .with_doc("Main entry point of the GitHub API.")
}

fn client_instance(api: Arc<GithubApi>) -> Instance {
    let repr = format!("Github(base_url={:?})", api.base_url);

    let user_api = Arc::clone(&api);
    let repo_api = Arc::clone(&api);
    let rate_api = Arc::clone(&api);
    let search_api = Arc::clone(&api);
    let issue_api = Arc::clone(&api);

    Instance::new("Github")
        .with_repr(repr)
        .with_method(
            NativeFunction::new(
                "Github.get_user",
                Signature::new().optional("login", Value::Null),
                move |args| {
                    let path = match args.get_str("login") {
                        Some(login) => format!("/users/{}", login),
                        None => "/user".to_string(),
                    };
                    Ok(resource("NamedUser", "login", user_api.get(&path)?))
                },
            )
            .with_doc("Get a user by login, or the authenticated user when omitted."),
        )
        .with_method(
            NativeFunction::new(
                "Github.get_repo",
                Signature::new().required("full_name_or_id"),
                move |args| {
                    let path = repo_path(args, "full_name_or_id")?;
                    Ok(resource("Repository", "full_name", repo_api.get(&path)?))
                },
            )
            .with_doc("Get a repository by 'owner/name' or numeric id."),
        )
        .with_method(
            NativeFunction::new("Github.get_rate_limit", Signature::new(), move |_| {
                let body = rate_api.get("/rate_limit")?;
                let core = body.pointer("/resources/core").cloned().unwrap_or(Value::Null);
                let mut instance = Instance::new("RateLimit")
                    .with_repr(format!("RateLimit(core={})", core))
                    .with_attribute("raw_data", body);
                if !core.is_null() {
                    instance = instance.with_attribute("core", core);
                }
                Ok(Returned::object(instance))
            })
            .with_doc("Get the current rate limit status."),
        )
        .with_method(
            NativeFunction::new(
                "Github.search_repositories",
                Signature::new()
                    .required("query")
                    .optional("sort", Value::Null)
                    .optional("order", Value::Null),
                move |args| {
                    let query = args.require_str("query").map_err(CallError::type_error)?;
                    let mut params = vec![("q", query.to_string())];
                    for key in ["sort", "order"] {
                        if let Some(value) = args.get_str(key) {
                            params.push((key, value.to_string()));
                        }
                    }
                    let builder = search_api
                        .request(Method::GET, "/search/repositories")
                        .query(&params);
                    let body = search_api.send(builder)?;
                    Ok(body.get("items").cloned().unwrap_or_else(|| json!([])).into())
                },
            )
            .with_doc("Search repositories; returns the first page of matching items."),
        )
        .with_method(
            NativeFunction::new(
                "Github.create_issue",
                Signature::new()
                    .required("full_name_or_id")
                    .required("title")
                    .optional("body", Value::Null)
                    .optional("labels", Value::Null),
                move |args| {
                    let path = format!("{}/issues", repo_path(args, "full_name_or_id")?);
                    let title = args.require_str("title").map_err(CallError::type_error)?;
                    let mut payload = json!({ "title": title });
                    for key in ["body", "labels"] {
                        if let Some(value) = args.get(key).filter(|v| !v.is_null()) {
                            payload[key] = value.clone();
                        }
                    }
                    let builder = issue_api.request(Method::POST, &path).json(&payload);
                    Ok(resource("Issue", "number", issue_api.send(builder)?))
                },
            )
            .with_doc("Open an issue on a repository."),
        )
}
