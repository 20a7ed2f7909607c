use crate::config::EnvConfig;
use crate::forms::ProfileFiles;
use crate::models::{
    FileUpload, LoginRequest, ProfileFileSlot, Project, RegisterRequest, ServerMessage, Skill,
    UserProfile,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, warn};

#[cfg(test)]
mod http_tests;

/// Shown for transport failures and unreadable success bodies.
pub(crate) const RETRY_LATER_MESSAGE: &str =
    "Error contacting the server. Please try again later.";

const JSON_MIME: &str = "application/json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    /// DNS, refused connection, timeout, aborted body.
    Network,
    /// The server answered with a non-2xx status.
    Http,
    /// A 2xx body that does not match the expected shape, or a payload we
    /// could not encode.
    Parse,
}

#[derive(Error, Clone, Debug)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        error!(error = %e, "request did not complete");
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: RETRY_LATER_MESSAGE.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        error!(error = %e, "unreadable response body");
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: RETRY_LATER_MESSAGE.to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: &str) -> Self {
        let message = extract_error_message(status.as_u16(), body);
        warn!(status = status.as_u16(), message = %message, "request rejected");
        Self {
            kind: ApiErrorKind::Http,
            status: Some(status.as_u16()),
            message,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Turn an error body into the text shown under the form: the JSON `message`
/// field when there is one, else the raw body.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            if !msg.trim().is_empty() {
                return msg.trim().to_string();
            }
        }
    }

    let raw = body.trim();
    if raw.is_empty() {
        format!("Request failed ({status})")
    } else {
        raw.to_string()
    }
}

/// One part of a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PayloadPart {
    Json { name: &'static str, body: String },
    File { name: &'static str, file: FileUpload },
}

impl PayloadPart {
    pub fn name(&self) -> &'static str {
        match self {
            PayloadPart::Json { name, .. } | PayloadPart::File { name, .. } => *name,
        }
    }
}

/// Request body. Multipart is used only when at least one file is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Payload {
    Json(String),
    Multipart(Vec<PayloadPart>),
}

/// Build the body for `dto` plus optional files keyed by the server's part
/// names. Absent files produce no part.
pub(crate) fn build_payload<T: Serialize>(
    dto_key: &'static str,
    dto: &T,
    files: &[(&'static str, Option<&FileUpload>)],
) -> Result<Payload, serde_json::Error> {
    let body = serde_json::to_string(dto)?;

    let present: Vec<PayloadPart> = files
        .iter()
        .filter_map(|&(name, file)| {
            file.map(|f| PayloadPart::File {
                name,
                file: f.clone(),
            })
        })
        .collect();

    if present.is_empty() {
        return Ok(Payload::Json(body));
    }

    let mut parts = Vec::with_capacity(present.len() + 1);
    parts.push(PayloadPart::Json {
        name: dto_key,
        body,
    });
    parts.extend(present);
    Ok(Payload::Multipart(parts))
}

fn into_form(parts: Vec<PayloadPart>) -> ApiResult<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            PayloadPart::Json { name, body } => {
                let p = Part::bytes(body.into_bytes())
                    .mime_str(JSON_MIME)
                    .map_err(ApiError::parse)?;
                form.part(name, p)
            }
            PayloadPart::File { name, file } => {
                let p = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.mime)
                    .map_err(ApiError::parse)?;
                form.part(name, p)
            }
        };
    }
    Ok(form)
}

fn segment(s: &str) -> String {
    urlencoding::encode(s.trim()).into_owned()
}

/// An owner-scoped REST collection (skills, projects).
pub(crate) trait Resource: Serialize + DeserializeOwned + Clone {
    /// e.g. `/api/skills`.
    const BASE_PATH: &'static str;
    /// Multipart key for the JSON-encoded entity.
    const DTO_KEY: &'static str;
    /// Multipart key for the single optional attachment.
    const FILE_KEY: &'static str;
    /// Used in user-facing success messages.
    const NOUN: &'static str;

    fn list_path(owner: &str) -> String;
    fn id(&self) -> Option<i64>;
    fn owner(&self) -> &str;
}

impl Resource for Skill {
    const BASE_PATH: &'static str = "/api/skills";
    const DTO_KEY: &'static str = "skillDTO";
    const FILE_KEY: &'static str = "skillIcon";
    const NOUN: &'static str = "Skill";

    fn list_path(owner: &str) -> String {
        format!("{}/getAll/{}", Self::BASE_PATH, segment(owner))
    }

    fn id(&self) -> Option<i64> {
        self.skill_id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

impl Resource for Project {
    const BASE_PATH: &'static str = "/api/projects";
    const DTO_KEY: &'static str = "projectDTO";
    const FILE_KEY: &'static str = "file";
    const NOUN: &'static str = "Project";

    fn list_path(owner: &str) -> String {
        format!("{}/user/{}", Self::BASE_PATH, segment(owner))
    }

    fn id(&self) -> Option<i64> {
        self.project_id
    }

    fn owner(&self) -> &str {
        &self.user_id
    }
}

/// What a request does to a collection; decides method and path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operation<'a> {
    Create,
    Update,
    Delete { owner: &'a str, id: i64 },
    Fetch { owner: &'a str },
}

impl Operation<'_> {
    pub fn method(&self) -> Method {
        match self {
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
            Operation::Delete { .. } => Method::DELETE,
            Operation::Fetch { .. } => Method::GET,
        }
    }

    pub fn path<R: Resource>(&self) -> String {
        match self {
            Operation::Create => format!("{}/create", R::BASE_PATH),
            Operation::Update => format!("{}/update", R::BASE_PATH),
            Operation::Delete { owner, id } => {
                format!("{}/delete/{}/{}", R::BASE_PATH, segment(owner), id)
            }
            Operation::Fetch { owner } => R::list_path(owner),
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            Operation::Create => "added",
            Operation::Update => "updated",
            Operation::Delete { .. } => "deleted",
            Operation::Fetch { .. } => "loaded",
        }
    }
}

/// Prefer the server's `message`; projects answer with the entity instead.
fn success_message(body: &serde_json::Value, fallback: String) -> String {
    body.get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .unwrap_or(fallback)
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(EnvConfig::new().api_url)
    }

    /// Send and return the raw 2xx body.
    async fn execute(&self, method: Method, path: &str, payload: Option<Payload>) -> ApiResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "sending request");

        let mut req = self.http.request(method, url);
        match payload {
            Some(Payload::Json(body)) => {
                req = req.header(CONTENT_TYPE, JSON_MIME).body(body);
            }
            Some(Payload::Multipart(parts)) => {
                let names: Vec<&str> = parts.iter().map(PayloadPart::name).collect();
                debug!(parts = ?names, "multipart body");
                req = req.multipart(into_form(parts)?);
            }
            None => {}
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        let body = res.text().await.map_err(ApiError::network)?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::http(status, &body))
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<Payload>,
    ) -> ApiResult<T> {
        let body = self.execute(method, path, payload).await?;
        serde_json::from_str(&body).map_err(ApiError::parse)
    }

    pub async fn register(
        &self,
        req: &RegisterRequest,
        files: &ProfileFiles,
    ) -> ApiResult<ServerMessage> {
        let parts: Vec<(&'static str, Option<&FileUpload>)> = ProfileFileSlot::ALL
            .iter()
            .map(|slot| (slot.register_key(), files.get(*slot)))
            .collect();
        let payload = build_payload("userDTO", req, &parts).map_err(ApiError::parse)?;
        self.request(Method::POST, "/api/users/register", Some(payload))
            .await
    }

    /// Succeeds on any 2xx; the body is not inspected.
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<()> {
        let payload = build_payload("loginDTO", req, &[]).map_err(ApiError::parse)?;
        self.execute(Method::POST, "/api/users/login", Some(payload))
            .await
            .map(|_| ())
    }

    pub async fn get_user(&self, user_id: &str) -> ApiResult<UserProfile> {
        self.request(
            Method::GET,
            &format!("/api/users/get/{}", segment(user_id)),
            None,
        )
        .await
    }

    pub async fn update_user_info(&self, profile: &UserProfile) -> ApiResult<ServerMessage> {
        let payload = build_payload("userDTO", profile, &[]).map_err(ApiError::parse)?;
        self.request(Method::PUT, "/api/users/update/info", Some(payload))
            .await
    }

    pub async fn update_user_file(
        &self,
        user_id: &str,
        slot: ProfileFileSlot,
        file: &FileUpload,
    ) -> ApiResult<ServerMessage> {
        let payload = Payload::Multipart(vec![PayloadPart::File {
            name: slot.update_key(),
            file: file.clone(),
        }]);
        self.request(
            Method::PUT,
            &format!("/api/users/update/{}/{}", slot.update_key(), segment(user_id)),
            Some(payload),
        )
        .await
    }

    pub async fn list<R: Resource>(&self, owner: &str) -> ApiResult<Vec<R>> {
        let op = Operation::Fetch { owner };
        self.request(op.method(), &op.path::<R>(), None).await
    }

    /// Create or update `entity` and return the message to show.
    pub async fn submit<R: Resource>(
        &self,
        op: Operation<'_>,
        entity: &R,
        file: Option<&FileUpload>,
    ) -> ApiResult<String> {
        let payload =
            build_payload(R::DTO_KEY, entity, &[(R::FILE_KEY, file)]).map_err(ApiError::parse)?;
        let body: serde_json::Value = self
            .request(op.method(), &op.path::<R>(), Some(payload))
            .await?;
        Ok(success_message(
            &body,
            format!("{} {} successfully!", R::NOUN, op.past_tense()),
        ))
    }

    /// Create when the entity has no id yet, otherwise update it in place.
    pub async fn save<R: Resource>(&self, entity: &R, file: Option<&FileUpload>) -> ApiResult<String> {
        let op = if entity.id().is_some() {
            Operation::Update
        } else {
            Operation::Create
        };
        self.submit(op, entity, file).await
    }

    pub async fn delete<R: Resource>(&self, owner: &str, id: i64) -> ApiResult<String> {
        let op = Operation::Delete { owner, id };
        let body = self.execute(op.method(), &op.path::<R>(), None).await?;
        // Some deployments answer deletes with an empty 200.
        let value = if body.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&body).map_err(ApiError::parse)?
        };
        Ok(success_message(
            &value,
            format!("{} {} successfully!", R::NOUN, op.past_tense()),
        ))
    }
}
