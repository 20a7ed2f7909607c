use crate::models::{
    FileUpload, LoginRequest, ProfileFileSlot, Project, RegisterRequest, Skill, UserProfile,
};
use crate::validate::{check_email, check_password, check_required, check_user_id, ValidationError};

/// Inline status under a form. Error and success can never both be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FormMessage {
    Error(String),
    Success(String),
}

/// Field records for an owner-scoped entity that can be created, loaded for
/// editing, and saved back.
pub(crate) trait EditFields: Default + Clone {
    type Entity;

    /// Copy the entity's values in. File fields always come back empty:
    /// attachments are never re-downloaded for editing.
    fn from_entity(entity: &Self::Entity) -> Self;

    fn entity_id(entity: &Self::Entity) -> Option<i64>;

    fn validate(&self) -> Result<(), ValidationError>;

    fn to_entity(&self, owner: &str, id: Option<i64>) -> Self::Entity;

    fn attachment(&self) -> Option<&FileUpload>;
}

/// Per-feature form state: the field record plus edit/message/busy flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FormState<F> {
    pub fields: F,
    pub editing_id: Option<i64>,
    pub message: Option<FormMessage>,
    busy: bool,
}

impl<F: Default> FormState<F> {
    pub fn new() -> Self {
        Self {
            fields: F::default(),
            editing_id: None,
            message: None,
            busy: false,
        }
    }

    pub fn with_fields(fields: F) -> Self {
        Self {
            fields,
            ..Self::new()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start a submission. Returns `false` (and changes nothing) while another
    /// submission from this form is still in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.message = None;
        true
    }

    /// Record a failure. Fields and `editing_id` are left as entered.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.message = Some(FormMessage::Error(message.into()));
    }

    pub fn fail_validation(&mut self, err: ValidationError) {
        self.fail(err.message);
    }

    /// Record a success and clear the record for the next entry.
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.fields = F::default();
        self.editing_id = None;
        self.busy = false;
        self.message = Some(FormMessage::Success(message.into()));
    }

    /// Record a success but keep the entered values (profile edits).
    pub fn succeed_keep(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.message = Some(FormMessage::Success(message.into()));
    }

    pub fn reset(&mut self) {
        self.fields = F::default();
        self.editing_id = None;
        self.message = None;
    }

    /// Drop the edit in progress. Ignored while a submission is in flight.
    pub fn cancel_edit(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.reset();
        true
    }

    /// Load an entity for editing. Ignored while a submission is in flight.
    pub fn load_for_edit(&mut self, entity: &<F as EditFields>::Entity) -> bool
    where
        F: EditFields,
    {
        if self.busy {
            return false;
        }
        self.fields = F::from_entity(entity);
        self.editing_id = F::entity_id(entity);
        self.message = None;
        true
    }

    /// Record a message without touching the busy flag, for problems noticed
    /// before anything is sent.
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.message = Some(FormMessage::Error(message.into()));
    }
}

/// The four profile attachments, used by registration and profile edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProfileFiles {
    pub image1: Option<FileUpload>,
    pub image2: Option<FileUpload>,
    pub image3: Option<FileUpload>,
    pub resume: Option<FileUpload>,
}

impl ProfileFiles {
    pub fn get(&self, slot: ProfileFileSlot) -> Option<&FileUpload> {
        match slot {
            ProfileFileSlot::Image1 => self.image1.as_ref(),
            ProfileFileSlot::Image2 => self.image2.as_ref(),
            ProfileFileSlot::Image3 => self.image3.as_ref(),
            ProfileFileSlot::Resume => self.resume.as_ref(),
        }
    }

    pub fn set(&mut self, slot: ProfileFileSlot, file: Option<FileUpload>) {
        match slot {
            ProfileFileSlot::Image1 => self.image1 = file,
            ProfileFileSlot::Image2 => self.image2 = file,
            ProfileFileSlot::Image3 => self.image3 = file,
            ProfileFileSlot::Resume => self.resume = file,
        }
    }
}

impl FormState<ProfileFiles> {
    /// Claim the form for uploading one slot. `None` while another upload is
    /// in flight, or when the slot is empty (the form then says so).
    pub fn begin_upload(&mut self, slot: ProfileFileSlot) -> Option<FileUpload> {
        if self.busy {
            return None;
        }
        let Some(file) = self.fields.get(slot).cloned() else {
            self.notify_error(format!("Choose a file for {} first.", slot.label()));
            return None;
        };
        self.begin_submit();
        Some(file)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RegisterFields {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub about: String,
    pub files: ProfileFiles,
}

impl RegisterFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_user_id(&self.user_id)?;
        check_required("Name", &self.name)?;
        check_email(&self.email)?;
        check_password(&self.password)?;
        Ok(())
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            user_id: self.user_id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.trim().to_string(),
            about: self.about.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoginFields {
    pub user_id: String,
    pub email: String,
    pub password: String,
}

impl LoginFields {
    /// Login only checks shape; strength rules belong to account creation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("User ID", &self.user_id)?;
        check_email(&self.email)?;
        check_required("Password", &self.password)?;
        Ok(())
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            user_id: self.user_id.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProfileFields {
    pub user_id: String,
    pub name: String,
    pub email: String,
    /// Empty keeps the current password.
    pub password: String,
    pub role: String,
    pub about: String,
}

/// Whether the stored profile has been read. The info form is only sent once
/// it holds the server's values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ProfileLoad {
    Loading,
    Loaded,
    Failed(String),
}

/// Claim the profile form and validate it. `None` means nothing is sent.
pub(crate) fn prepare_profile_update(
    form: &mut FormState<ProfileFields>,
    load: &ProfileLoad,
) -> Option<UserProfile> {
    if *load != ProfileLoad::Loaded || !form.begin_submit() {
        return None;
    }
    match form.fields.validate() {
        Ok(()) => Some(form.fields.to_profile()),
        Err(e) => {
            form.fail_validation(e);
            None
        }
    }
}

impl ProfileFields {
    pub fn from_profile(p: &UserProfile) -> Self {
        Self {
            user_id: p.user_id.clone(),
            name: p.name.clone(),
            email: p.email.clone(),
            password: String::new(),
            role: p.role.clone(),
            about: p.about.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("Name", &self.name)?;
        check_email(&self.email)?;
        if !self.password.is_empty() {
            check_password(&self.password)?;
        }
        Ok(())
    }

    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.user_id.clone(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role.trim().to_string(),
            about: self.about.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SkillFields {
    pub skill_name: String,
    pub learned_from: String,
    pub points: [String; 5],
    pub source_link: String,
    pub icon: Option<FileUpload>,
}

impl EditFields for SkillFields {
    type Entity = Skill;

    fn from_entity(s: &Skill) -> Self {
        Self {
            skill_name: s.skill_name.clone(),
            learned_from: s.learned_from.clone(),
            points: [
                s.point1.clone(),
                s.point2.clone(),
                s.point3.clone(),
                s.point4.clone(),
                s.point5.clone(),
            ],
            source_link: s.source_link.clone(),
            icon: None,
        }
    }

    fn entity_id(s: &Skill) -> Option<i64> {
        s.skill_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("Skill name", &self.skill_name)
    }

    fn to_entity(&self, owner: &str, skill_id: Option<i64>) -> Skill {
        let [p1, p2, p3, p4, p5] = self.points.clone();
        Skill {
            skill_id,
            user_id: owner.to_string(),
            skill_name: self.skill_name.trim().to_string(),
            learned_from: self.learned_from.trim().to_string(),
            point1: p1,
            point2: p2,
            point3: p3,
            point4: p4,
            point5: p5,
            source_link: self.source_link.trim().to_string(),
            ..Default::default()
        }
    }

    fn attachment(&self) -> Option<&FileUpload> {
        self.icon.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProjectFields {
    pub project_name: String,
    pub project_description: String,
    pub live_link: String,
    pub code_link: String,
    pub technology: String,
    pub image: Option<FileUpload>,
}

impl EditFields for ProjectFields {
    type Entity = Project;

    fn from_entity(p: &Project) -> Self {
        Self {
            project_name: p.project_name.clone(),
            project_description: p.project_description.clone(),
            live_link: p.live_link.clone(),
            code_link: p.code_link.clone(),
            technology: p.technology.clone(),
            image: None,
        }
    }

    fn entity_id(p: &Project) -> Option<i64> {
        p.project_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        check_required("Project name", &self.project_name)
    }

    fn to_entity(&self, owner: &str, project_id: Option<i64>) -> Project {
        Project {
            project_id,
            user_id: owner.to_string(),
            project_name: self.project_name.trim().to_string(),
            project_description: self.project_description.clone(),
            live_link: self.live_link.trim().to_string(),
            code_link: self.code_link.trim().to_string(),
            technology: self.technology.trim().to_string(),
            ..Default::default()
        }
    }

    fn attachment(&self) -> Option<&FileUpload> {
        self.image.as_ref()
    }
}
