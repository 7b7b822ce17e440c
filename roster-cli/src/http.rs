//! Blocking HTTP implementation of [`DirectoryApi`].
//!
//! Every request carries the company id and pre-shared key as headers. All
//! paths are relative to `<api_url>/companies/<company_id>`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use roster_core::types::{Email, GroupId, GroupName, RemoteGroup};
use roster_sync::{ApiError, DirectoryApi, InviteOutcome};

const COMPANY_HEADER: &str = "X-Company-Id";
const KEY_HEADER: &str = "X-Api-Key";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequest<'a> {
    emails: &'a [Email],
    group_id: GroupId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InviteResponse {
    #[serde(default)]
    not_invited: Vec<Email>,
}

#[derive(Serialize)]
struct EmailsRequest<'a> {
    emails: &'a [Email],
}

#[derive(Serialize)]
struct CreateGroupRequest<'a> {
    name: &'a GroupName,
}

/// Remote directory reached over HTTPS with `ureq`.
pub struct HttpDirectoryApi {
    agent: ureq::Agent,
    base: String,
    company_id: String,
    psk: String,
}

impl HttpDirectoryApi {
    pub fn new(api_url: &str, company_id: &str, psk: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base: format!("{}/companies/{}", api_url.trim_end_matches('/'), company_id),
            company_id: company_id.to_owned(),
            psk: psk.to_owned(),
        }
    }

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        self.agent
            .request(method, &format!("{}{}", self.base, path))
            .set(COMPANY_HEADER, &self.company_id)
            .set(KEY_HEADER, &self.psk)
            .set("Accept", "application/json")
    }

    fn send<B: Serialize>(
        &self,
        method: &str,
        path: &str,
        body: Option<B>,
    ) -> Result<ureq::Response, ApiError> {
        let request = self.request(method, path);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        result.map_err(|e| api_error(endpoint(method, path), e))
    }
}

fn endpoint(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

fn api_error(endpoint: String, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => ApiError::Status {
            endpoint,
            status,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => ApiError::Transport {
            endpoint,
            message: transport.to_string(),
        },
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    response: ureq::Response,
    endpoint: String,
) -> Result<T, ApiError> {
    response
        .into_json()
        .map_err(|source| ApiError::Decode { endpoint, source })
}

impl DirectoryApi for HttpDirectoryApi {
    fn fetch_groups(&mut self) -> Result<Vec<RemoteGroup>, ApiError> {
        let response = self.send::<()>("GET", "/groups", None)?;
        decode(response, endpoint("GET", "/groups"))
    }

    fn invite_users(
        &mut self,
        emails: &[Email],
        group: GroupId,
    ) -> Result<InviteOutcome, ApiError> {
        let body = InviteRequest {
            emails,
            group_id: group,
        };
        let response = self.send("POST", "/users/invite", Some(body))?;
        let parsed: InviteResponse = decode(response, endpoint("POST", "/users/invite"))?;
        Ok(InviteOutcome {
            not_invited: parsed.not_invited,
        })
    }

    fn delete_users(&mut self, emails: &[Email]) -> Result<(), ApiError> {
        self.send("DELETE", "/users", Some(EmailsRequest { emails }))?;
        Ok(())
    }

    fn create_group(&mut self, name: &GroupName) -> Result<(), ApiError> {
        self.send("POST", "/groups", Some(CreateGroupRequest { name }))?;
        Ok(())
    }

    fn move_users(&mut self, emails: &[Email], group: GroupId) -> Result<(), ApiError> {
        let path = format!("/groups/{group}/members");
        self.send("PUT", &path, Some(EmailsRequest { emails }))?;
        Ok(())
    }
}
