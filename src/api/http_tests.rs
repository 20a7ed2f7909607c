//! Client behavior against a mock backend.

use super::*;
use crate::crud::{delete_and_refresh, prepare_save, save_and_refresh};
use crate::forms::{FormState, ProjectFields, SkillFields};
use crate::refresh::{refresh, EntityList};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const OWNER: &str = "12345678";

fn body_text(req: &Request) -> String {
    String::from_utf8_lossy(&req.body).into_owned()
}

fn skill_json(id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "skillId": id,
        "userId": OWNER,
        "skillName": name,
        "learnedFrom": "Book",
        "point1": "ownership",
        "point2": "",
        "point3": null,
        "point4": "",
        "point5": "",
        "sourceLink": ""
    })
}

fn filled_skill_form() -> FormState<SkillFields> {
    FormState::with_fields(SkillFields {
        skill_name: "Rust".to_string(),
        learned_from: "Book".to_string(),
        ..Default::default()
    })
}

mod users {
    use super::*;

    #[tokio::test]
    async fn test_register_sends_multipart_with_present_files_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/users/register"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "User registered" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let req = RegisterRequest {
            user_id: OWNER.to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "analytic1".to_string(),
            ..Default::default()
        };
        let mut files = ProfileFiles::default();
        files.image1 = Some(FileUpload::new("me.png", "image/png", vec![1, 2, 3]));
        files.resume = Some(FileUpload::new("cv.pdf", "application/pdf", vec![4]));

        let msg = client.register(&req, &files).await.expect("register");
        assert_eq!(msg.message, "User registered");

        let received = mock_server.received_requests().await.unwrap_or_default();
        assert_eq!(received.len(), 1);
        let body = body_text(&received[0]);
        assert_eq!(body.matches("name=\"userDTO\"").count(), 1);
        assert!(body.contains("name=\"userProfile1\""));
        assert!(body.contains("name=\"resume\""));
        assert!(!body.contains("name=\"userProfile2\""));
        assert!(!body.contains("name=\"userProfile3\""));
        assert!(body.contains("\"userId\":\"12345678\""));
    }

    #[tokio::test]
    async fn test_register_duplicate_user_shows_server_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/users/register"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({ "message": "User ID already exists" })),
            )
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let err = client
            .register(&RegisterRequest::default(), &ProfileFiles::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, Some(409));
        assert_eq!(err.message, "User ID already exists");
    }

    #[tokio::test]
    async fn test_login_accepts_empty_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("\"userId\":\"12345678\""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let req = LoginRequest {
            user_id: OWNER.to_string(),
            email: "ada@example.com".to_string(),
            password: "analytic1".to_string(),
        };
        assert!(client.login(&req).await.is_ok());
    }

    #[tokio::test]
    async fn test_login_plain_text_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/users/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let err = client.login(&LoginRequest::default()).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.message, "Invalid credentials");
    }

    #[tokio::test]
    async fn test_get_user_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/users/get/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "userId": OWNER,
                "name": "Ada",
                "email": "ada@example.com",
                "role": "Engineer",
                "about": "Notes on the engine"
            })))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let profile = client.get_user(OWNER).await.expect("profile");
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.role, "Engineer");
        assert!(profile.password.is_empty());
    }

    #[tokio::test]
    async fn test_update_info_is_json_and_omits_blank_password() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/users/update/info"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Profile updated" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let profile = UserProfile {
            user_id: OWNER.to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let msg = client.update_user_info(&profile).await.expect("update");
        assert_eq!(msg.message, "Profile updated");

        let received = mock_server.received_requests().await.unwrap_or_default();
        assert!(!body_text(&received[0]).contains("password"));
    }

    #[tokio::test]
    async fn test_update_user_file_uses_slot_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/users/update/userImage2/12345678"))
            .and(body_string_contains("name=\"userImage2\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Image updated" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let file = FileUpload::new("me.png", "image/png", vec![7, 7]);
        let msg = client
            .update_user_file(OWNER, ProfileFileSlot::Image2, &file)
            .await
            .expect("upload");
        assert_eq!(msg.message, "Image updated");
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_maps_to_retry_message() {
        let client = ApiClient::new("http://127.0.0.1:1");
        let err = client.list::<Skill>(OWNER).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.message, RETRY_LATER_MESSAGE);
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let err = client.list::<Skill>(OWNER).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
        assert_eq!(err.message, RETRY_LATER_MESSAGE);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_items() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut list = EntityList::new();
        list.apply(Ok(vec![Skill {
            skill_id: Some(1),
            skill_name: "Rust".to_string(),
            ..Default::default()
        }]));

        list.loading = true;
        list.apply(refresh::<Skill>(&client, OWNER).await);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.last_error.as_deref(), Some("Service Unavailable"));
        assert!(!list.loading);
    }
}

mod skills {
    use super::*;

    #[tokio::test]
    async fn test_create_without_icon_sends_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/skills/create"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Skill created" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                skill_json(1, "Rust")
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = filled_skill_form();
        let mut list = EntityList::new();

        let prepared = prepare_save(&mut form, OWNER).expect("valid form");
        save_and_refresh(&client, prepared)
            .await
            .apply_save(&mut form, &mut list);

        assert_eq!(form.success(), Some("Skill created"));
        assert_eq!(form.fields, SkillFields::default());
        assert!(!form.is_busy());
        assert_eq!(list.refreshes, 1);
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].skill_name, "Rust");
        assert_eq!(list.items[0].point3, "");
    }

    #[tokio::test]
    async fn test_create_with_icon_sends_one_dto_part_and_icon() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/skills/create"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Skill created" })),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = filled_skill_form();
        form.fields.icon = Some(FileUpload::new("rust.svg", "image/svg+xml", b"<svg/>".to_vec()));
        let mut list = EntityList::new();

        let prepared = prepare_save(&mut form, OWNER).expect("valid form");
        save_and_refresh(&client, prepared)
            .await
            .apply_save(&mut form, &mut list);

        let received = mock_server.received_requests().await.unwrap_or_default();
        let create = received
            .iter()
            .find(|r| r.url.path() == "/api/skills/create")
            .expect("create request");
        let body = body_text(create);
        assert_eq!(body.matches("name=\"skillDTO\"").count(), 1);
        assert_eq!(body.matches("name=\"skillIcon\"").count(), 1);
        assert!(body.contains("filename=\"rust.svg\""));
    }

    #[tokio::test]
    async fn test_server_error_keeps_fields_and_skips_refresh() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/skills/create"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "message": "Internal error" })),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = filled_skill_form();
        let before = form.fields.clone();
        let mut list = EntityList::new();

        let prepared = prepare_save(&mut form, OWNER).expect("valid form");
        save_and_refresh(&client, prepared)
            .await
            .apply_save(&mut form, &mut list);

        assert_eq!(form.fields, before);
        assert_eq!(form.error(), Some("Internal error"));
        assert!(!form.is_busy());
        assert_eq!(list.refreshes, 0);
    }

    #[tokio::test]
    async fn test_update_uses_put_and_refreshes_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/skills/update"))
            .and(body_string_contains("\"skillId\":7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "message": "Skill updated" })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                skill_json(7, "Rust 2024")
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = FormState::<SkillFields>::new();
        form.load_for_edit(&Skill {
            skill_id: Some(7),
            user_id: OWNER.to_string(),
            skill_name: "Rust".to_string(),
            ..Default::default()
        });
        form.fields.skill_name = "Rust 2024".to_string();
        let mut list = EntityList::new();

        let prepared = prepare_save(&mut form, OWNER).expect("valid form");
        save_and_refresh(&client, prepared)
            .await
            .apply_save(&mut form, &mut list);

        assert!(!form.is_editing());
        assert_eq!(list.items[0].skill_name, "Rust 2024");
    }

    #[tokio::test]
    async fn test_delete_refreshes_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/skills/delete/12345678/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/skills/getAll/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = FormState::<SkillFields>::new();
        let mut list = EntityList::new();
        list.apply(Ok(vec![Skill {
            skill_id: Some(7),
            ..Default::default()
        }]));

        delete_and_refresh::<Skill>(&client, OWNER, 7)
            .await
            .apply_delete(7, &mut form, &mut list);

        assert_eq!(form.success(), Some("Skill deleted successfully!"));
        assert!(list.is_empty());
        assert_eq!(list.refreshes, 2);
    }
}

mod projects {
    use super::*;

    #[tokio::test]
    async fn test_create_with_image_uses_file_part_and_fallback_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/projects/create"))
            .and(body_string_contains("name=\"projectDTO\""))
            .and(body_string_contains("name=\"file\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "projectId": 3,
                "userId": OWNER,
                "projectName": "Portfolio"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/projects/user/12345678"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "projectId": 3,
                "userId": OWNER,
                "projectName": "Portfolio",
                "imageName": "shot.png",
                "imageType": "image/png",
                "imageDate": "iVBORw0KGgo="
            }])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = FormState::with_fields(ProjectFields {
            project_name: "Portfolio".to_string(),
            image: Some(FileUpload::new("shot.png", "image/png", b"PNG".to_vec())),
            ..Default::default()
        });
        let mut list = EntityList::new();

        let prepared = prepare_save(&mut form, OWNER).expect("valid form");
        save_and_refresh(&client, prepared)
            .await
            .apply_save(&mut form, &mut list);

        assert_eq!(form.success(), Some("Project added successfully!"));
        assert_eq!(list.items.len(), 1);
        assert_eq!(
            list.items[0].image().data_uri().as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/projects/delete/12345678/3"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Project not found"))
            .mount(&mock_server)
            .await;

        let client = ApiClient::new(mock_server.uri());
        let mut form = FormState::<ProjectFields>::new();
        let mut list = EntityList::new();
        list.apply(Ok(vec![Project {
            project_id: Some(3),
            ..Default::default()
        }]));

        delete_and_refresh::<Project>(&client, OWNER, 3)
            .await
            .apply_delete(3, &mut form, &mut list);

        assert_eq!(form.error(), Some("Project not found"));
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.refreshes, 1);
    }
}
