//! Integration tests for survey-form-http against a mock server

use serde_json::json;
use survey_form::{
    AccessToken, AnswerType, DraftEditor, ParticipantToken, PublicSurveyService, QuestionForm,
    ResponseSession, SurveyService, SurveyStatus,
};
use survey_form_http::{HttpClient, LoginError};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/api", server.uri()))
        .unwrap()
        .with_token(AccessToken::new("secret-token"))
}

fn survey_json() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "Team pulse",
        "expireDate": "2030-01-31",
        "status": "DRAFT",
        "questions": [
            { "id": 7, "text": "How satisfied?", "answerType": "LIKERT" },
            { "id": 8, "text": "Comments?", "answerType": "FREE_TEXT" }
        ],
        "participants": ["a@b.co"]
    })
}

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "a@b.co", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/api", server.uri())).unwrap();
    let token = client.login(" a@b.co ", "pw").await.unwrap();
    assert_eq!(token.expose(), "abc123");
}

#[tokio::test]
async fn test_login_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/api", server.uri())).unwrap();
    match client.login("a@b.co", "wrong").await {
        Err(LoginError::Service(err)) => {
            assert!(err.is_unauthenticated());
            assert_eq!(err.to_string(), "Invalid credentials");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_sends_camel_case_draft_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_json(json!({
            "name": "Team pulse",
            "expireDate": null,
            "questions": [
                { "text": "Comments?", "answerType": "FREE_TEXT" },
                { "text": "How satisfied?", "answerType": "LIKERT" }
            ],
            "participants": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(survey_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut editor = DraftEditor::new();
    editor.set_name("Team pulse");
    editor.open_question_modal();
    editor
        .save_question_as(QuestionForm::new("How satisfied?", AnswerType::Likert))
        .unwrap();
    editor.open_question_modal();
    editor
        .save_question_as(QuestionForm::new("Comments?", AnswerType::FreeText))
        .unwrap();
    editor.reorder_questions(1, 0);

    let saved = editor.submit(&client).await.unwrap();
    assert_eq!(saved.id.as_str(), "42");
    assert_eq!(saved.questions[0].id().map(|id| id.as_str()), Some("7"));
    assert!(editor.questions().is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let mut editor = DraftEditor::new();
    editor.set_name("Keep me");
    let before = editor.project();

    let err = editor.submit(&client).await.unwrap_err();
    assert_eq!(err.to_string(), "Internal Server Error");
    assert_eq!(editor.project(), before);
    assert!(!editor.is_submitting());
}

#[tokio::test]
async fn test_list_and_actions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/surveys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Draft one", "status": "DRAFT", "participantCount": 3 },
            { "id": "2", "name": "Sent one", "status": "SENT", "expireDate": null }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/surveys/1/send"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/surveys/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/surveys/1/copy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(survey_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let surveys = client.list().await.unwrap();
    assert_eq!(surveys.len(), 2);
    assert!(surveys[0].is_draft());
    assert_eq!(surveys[0].participant_total(), 3);
    assert_eq!(surveys[1].status, SurveyStatus::Sent);

    client.send(&surveys[0].id).await.unwrap();
    client.delete(&surveys[1].id).await.unwrap();
    let copy = client.copy(&surveys[0].id).await.unwrap();
    assert_eq!(copy.id.as_str(), "42");
}

#[tokio::test]
async fn test_results_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/surveys/42/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalResponses": 4,
            "questions": [
                {
                    "questionId": 7,
                    "text": "How satisfied?",
                    "answerType": "LIKERT",
                    "likertAverage": 4.25,
                    "likertDistribution": { "3": 1, "4": 1, "5": 2 }
                },
                {
                    "questionId": 8,
                    "text": "Comments?",
                    "answerType": "FREE_TEXT",
                    "freeTextResponses": ["Great", "More coffee"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let summary = client.results(&"42".into()).await.unwrap();
    assert_eq!(summary.total_responses, 4);
    assert_eq!(summary.questions[0].count_for(5), 2);
    assert_eq!(summary.overall_likert_average(), Some(4.25));
    assert_eq!(summary.questions[1].free_text_responses.len(), 2);
}

#[tokio::test]
async fn test_public_flow_sends_one_value_per_entry() {
    let server = MockServer::start().await;
    let mut sent = survey_json();
    sent["status"] = json!("SENT");
    Mock::given(method("GET"))
        .and(path("/api/public/surveys/tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/public/surveys/tok-1/responses"))
        .and(body_json(json!({
            "responses": [
                { "questionId": "7", "likertValue": 5 },
                { "questionId": "8", "textValue": "Nice" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    // The public endpoints need no token
    let client = HttpClient::new(&format!("{}/api", server.uri())).unwrap();
    let token = ParticipantToken::new("tok-1");
    let survey = client.get_by_token(&token).await.unwrap();

    let mut session = ResponseSession::new(survey).unwrap();
    session.answer_likert(5).unwrap();
    session.next();
    session.answer_text("Nice").unwrap();
    session.submit(&client, &token).await.unwrap();
    assert!(session.is_submitted());
}

#[tokio::test]
async fn test_expired_link_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/surveys/old"))
        .respond_with(
            ResponseTemplate::new(410).set_body_json(json!({ "message": "This survey has expired" })),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/api", server.uri())).unwrap();
    let err = client
        .get_by_token(&ParticipantToken::new("old"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "This survey has expired");
}
