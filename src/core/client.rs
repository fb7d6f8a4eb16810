//! Blocking client for the certification API.
//!
//! Every request carries the operator's `username` and `api_key` as query
//! parameters. Failures are never retried: a bad status, a transport error
//! or an undecodable body ends the call with an error.

use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use crate::constants;
use crate::core::dates;
use crate::error::{Error, Result};
use crate::state::SubmissionStatus;

/// Operator credential pair.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Filter for the submission search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryFilter {
    pub canonical_id: String,
    pub release: String,
    pub form_factor: Option<String>,
    /// Free-form start date; normalized before it is sent.
    pub from_date: String,
}

/// Client for one API host with one credential.
pub struct QueryClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
    limit: u32,
}

impl QueryClient {
    /// Builds a client for `base_url`.
    ///
    /// `limit` is sent with every search; 0 asks the server for as many
    /// records as it allows.
    pub fn new(base_url: &str, credentials: Credentials, limit: u32) -> Result<Self> {
        let invalid = |source| Error::InvalidUrl {
            url: base_url.to_string(),
            source,
        };
        let parsed = Url::parse(base_url).map_err(invalid)?;
        if parsed.cannot_be_a_base() {
            return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let base_url = parsed;

        let http = Client::builder()
            .user_agent(format!("{}/{}", constants::APP_NAME, constants::APP_VERSION))
            .build()
            .map_err(|e| Error::Request {
                endpoint: base_url.to_string(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url,
            credentials,
            limit,
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Issues a GET to `endpoint` and returns the decoded JSON body.
    ///
    /// `params` are merged over the credential pair, so a caller parameter
    /// with the same name wins.
    pub fn query(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint);
        let request_params = self.merge_params(params);

        let names: Vec<&str> = request_params.iter().map(|(name, _)| *name).collect();
        tracing::debug!(endpoint, params = ?names, "GET");

        let response = self
            .http
            .get(url)
            .query(&request_params)
            .send()
            .map_err(|e| request_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(endpoint, %status, "request rejected");
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body = response.text().map_err(|e| request_error(endpoint, e))?;
        serde_json::from_str(&body).map_err(|e| Error::decode(format!("content of {endpoint}"), e))
    }

    /// Searches submissions for `filter`, starting at its `from_date`.
    pub fn retrieve_machine_reports(&self, filter: &QueryFilter) -> Result<Value> {
        let from_date = dates::normalize_from_date(&filter.from_date)?;

        let mut params = vec![
            ("format", constants::API_FORMAT.to_string()),
            ("limit", self.limit.to_string()),
            ("canonical_id", filter.canonical_id.clone()),
            ("release", filter.release.clone()),
            ("from_date", from_date),
        ];
        if let Some(form_factor) = &filter.form_factor {
            params.push(("form_factor", form_factor.clone()));
        }

        self.query(constants::ENDPOINT_MACHINE_REPORTS, &params)
    }

    /// Looks up the counts and last update of one submission.
    pub fn submission_status(&self, submission_id: u64) -> Result<SubmissionStatus> {
        let endpoint = format!("{}{submission_id}/", constants::ENDPOINT_SUBMISSIONS);
        let value = self.query(&endpoint, &[("format", constants::API_FORMAT.to_string())])?;
        serde_json::from_value(value)
            .map_err(|e| Error::decode(format!("submission {submission_id}"), e))
    }

    /// Appends `endpoint` to the base URL's path.
    fn endpoint_url(&self, endpoint: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{endpoint}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    fn merge_params<'a>(&'a self, params: &[(&'a str, String)]) -> Vec<(&'a str, String)> {
        let mut merged = vec![
            ("username", self.credentials.username.clone()),
            ("api_key", self.credentials.api_key.clone()),
        ];
        for (name, value) in params {
            if let Some(slot) = merged.iter_mut().find(|slot| slot.0 == *name) {
                slot.1.clone_from(value);
            } else {
                merged.push((*name, value.clone()));
            }
        }
        merged
    }
}

/// Wraps a transport error without the URL, which carries the API key.
fn request_error(endpoint: &str, source: reqwest::Error) -> Error {
    Error::Request {
        endpoint: endpoint.to_string(),
        source: source.without_url(),
    }
}
