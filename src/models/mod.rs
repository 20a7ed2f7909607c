use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize};

/// The backend sends `null` for unset text columns; treat it as empty.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// `{ "message": "..." }` body returned by most mutating endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct ServerMessage {
    #[serde(default)]
    pub message: String,
}

/// A file picked in the browser, read fully into memory before upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FileUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = mime.into();
        Self {
            name: name.into(),
            mime: if mime.trim().is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime
            },
            bytes,
        }
    }
}

/// Image bytes embedded in a read response as base64 plus a MIME type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub(crate) struct EmbeddedImage {
    pub name: Option<String>,
    pub mime: Option<String>,
    pub data: Option<String>,
}

impl EmbeddedImage {
    /// `data:` URI for an `<img src>`, or `None` when nothing usable was sent.
    pub fn data_uri(&self) -> Option<String> {
        let mime = self.mime.as_deref().map(str::trim).filter(|m| !m.is_empty())?;
        let data = self.data.as_deref().map(str::trim).filter(|d| !d.is_empty())?;
        if STANDARD.decode(data).is_err() {
            return None;
        }
        Some(format!("data:{mime};base64,{data}"))
    }
}

/// Backend user record. `password` is write-only and never echoed back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfile {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: String,
}

/// Non-file registration fields, sent as the `userDTO` part.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub about: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest {
    pub user_id: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Skill {
    #[serde(default)]
    pub skill_id: Option<i64>,
    pub user_id: String,
    pub skill_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub learned_from: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point3: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point4: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point5: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_link: String,

    // Icon columns, present on reads only.
    #[serde(default, skip_serializing)]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_type: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_data: Option<String>,
}

impl Skill {
    pub fn icon(&self) -> EmbeddedImage {
        EmbeddedImage {
            name: self.image_name.clone(),
            mime: self.image_type.clone(),
            data: self.image_data.clone(),
        }
    }

    pub fn points(&self) -> [&str; 5] {
        [
            &self.point1,
            &self.point2,
            &self.point3,
            &self.point4,
            &self.point5,
        ]
    }
}

/// Points worth rendering, in order. Empty means the points list is omitted.
pub(crate) fn non_empty_points(skill: &Skill) -> Vec<String> {
    skill
        .points()
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Project {
    #[serde(default)]
    pub project_id: Option<i64>,
    pub user_id: String,
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub live_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technology: String,

    #[serde(default, skip_serializing)]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_type: Option<String>,
    /// Older payloads spell this `imageDate`.
    #[serde(default, alias = "imageDate", skip_serializing)]
    pub image_data: Option<String>,
}

impl Project {
    pub fn image(&self) -> EmbeddedImage {
        EmbeddedImage {
            name: self.image_name.clone(),
            mime: self.image_type.clone(),
            data: self.image_data.clone(),
        }
    }
}

/// Profile attachment slots, named the way the per-file update route expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ProfileFileSlot {
    Image1,
    Image2,
    Image3,
    Resume,
}

impl ProfileFileSlot {
    pub const ALL: [ProfileFileSlot; 4] = [
        ProfileFileSlot::Image1,
        ProfileFileSlot::Image2,
        ProfileFileSlot::Image3,
        ProfileFileSlot::Resume,
    ];

    /// Path segment and part name for `PUT /api/users/update/{slot}/{userId}`.
    pub fn update_key(self) -> &'static str {
        match self {
            ProfileFileSlot::Image1 => "userImage1",
            ProfileFileSlot::Image2 => "userImage2",
            ProfileFileSlot::Image3 => "userImage3",
            ProfileFileSlot::Resume => "resume",
        }
    }

    /// Part name used by `POST /api/users/register`.
    pub fn register_key(self) -> &'static str {
        match self {
            ProfileFileSlot::Image1 => "userProfile1",
            ProfileFileSlot::Image2 => "userProfile2",
            ProfileFileSlot::Image3 => "userProfile3",
            ProfileFileSlot::Resume => "resume",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileFileSlot::Image1 => "Profile image 1",
            ProfileFileSlot::Image2 => "Profile image 2",
            ProfileFileSlot::Image3 => "Profile image 3",
            ProfileFileSlot::Resume => "Resume",
        }
    }
}
