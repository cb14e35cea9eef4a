use super::*;
use crate::ai::testing::StubGenerator;
use crate::config::AiConfig;
use crate::trace::testing::RecordingSink;
use crate::trace::Tracer;
use chrono::{NaiveDate, NaiveDateTime};
use rand::{rngs::StdRng, SeedableRng};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

struct TestApp {
    base: String,
    client: reqwest::Client,
    stub: Arc<StubGenerator>,
}

impl TestApp {
    async fn spawn(replies: &[&str]) -> Self {
        let stub = Arc::new(StubGenerator::replying(replies));
        let tracer = Tracer::new(Arc::new(RecordingSink::default()), 32);
        let gateway = AiGateway::new(stub.clone(), tracer, &AiConfig::default());
        let dashboard = Dashboard::new(at(2024, 6, 15), StdRng::seed_from_u64(7));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(AppState::new(dashboard, gateway));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            stub,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        (resp.status(), resp.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status(), resp.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .put(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        (resp.status(), resp.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = TestApp::spawn(&[]).await;
    let (status, body) = app.get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generator"], "stub");
    assert_eq!(body["traceSink"], "recording");
}

#[tokio::test]
async fn test_short_directive_is_unprocessable() {
    let app = TestApp::spawn(&[]).await;
    let (status, body) = app.post("/api/directive", json!({"text": "abc"})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("directive"));
    assert!(app.stub.prompts().is_empty());

    let (_, snap) = app.get("/api/dashboard").await;
    assert_eq!(snap["hasDirective"], false);
    assert_eq!(snap["directiveMode"], "editing");
}

#[tokio::test]
async fn test_directive_generates_visions_once() {
    let app = TestApp::spawn(&[r#"{"vision": "You ship weekly.", "antiVision": "You polish forever."}"#])
        .await;

    let (status, snap) = app
        .post("/api/directive", json!({"text": "Ship the MVP"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["directiveMode"], "viewing");
    assert_eq!(snap["vision"], "You ship weekly.");
    assert_eq!(snap["antiVision"], "You polish forever.");
    assert_eq!(snap["pending"], json!([]));

    // Vision exists now, so re-saving does not call the model again
    app.post("/api/directive/edit", json!({})).await;
    let (status, _) = app
        .post("/api/directive", json!({"text": "Ship the MVP today"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stub.prompts().len(), 1);
}

#[tokio::test]
async fn test_saved_directive_rejects_resave() {
    let app = TestApp::spawn(&[r#"{"vision": "You ship weekly.", "antiVision": "You stall."}"#])
        .await;
    app.post("/api/directive", json!({"text": "Ship the MVP"})).await;

    let (status, body) = app
        .post("/api/directive", json!({"text": "Ship something else"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap_or_default().contains("edit"));

    let (_, snap) = app.get("/api/dashboard").await;
    assert_eq!(snap["directive"], "Ship the MVP");
}

#[tokio::test]
async fn test_failed_regeneration_keeps_vision() {
    // No scripted replies: every model call fails
    let app = TestApp::spawn(&[]).await;
    app.put(
        "/api/boss-fight/vision",
        json!({"text": "A calm, shipping founder"}),
    )
    .await;

    let (status, body) = app
        .post("/api/boss-fight/vision/generate", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vision"], "A calm, shipping founder");

    let (_, snap) = app.get("/api/dashboard").await;
    assert_eq!(snap["pending"], json!([]));
}

#[tokio::test]
async fn test_regenerated_anti_vision_is_applied() {
    let app = TestApp::spawn(&["  Still rewriting the landing page in 2030.  "]).await;

    let (status, body) = app
        .post("/api/boss-fight/anti-vision/generate", json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["antiVision"], "Still rewriting the landing page in 2030.");
}

#[tokio::test]
async fn test_journal_crud() {
    let app = TestApp::spawn(&[]).await;

    let (status, entry) = app.post("/api/journal", json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = entry["id"].as_str().unwrap().to_string();
    assert_eq!(entry["response"], "");

    let (_, list) = app.get("/api/journal").await;
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["id"], id.as_str());

    let (status, updated) = app
        .put(&format!("/api/journal/{}", id), json!({"response": "Shipped"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["response"], "Shipped");
    assert_eq!(updated["id"], id.as_str());

    let (status, _) = app
        .put("/api/journal/missing", json!({"response": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for expected in [true, false] {
        let resp = app
            .client
            .delete(app.url(&format!("/api/journal/{}", id)))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["removed"], expected);
    }
}

#[tokio::test]
async fn test_journal_analysis_is_stored() {
    let app = TestApp::spawn(&[
        r#"{"themes": ["perfectionism"], "emotionalTrend": "anxious", "suggestions": ["Ship v1"]}"#,
    ])
    .await;

    let (status, body) = app.post("/api/journal/analysis", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["analysis"]["themes"], json!(["perfectionism"]));

    let (_, snap) = app.get("/api/dashboard").await;
    assert_eq!(snap["journalAnalysis"]["emotionalTrend"], "anxious");
}

#[tokio::test]
async fn test_quest_toggle_and_bounds() {
    let app = TestApp::spawn(&[]).await;

    let (_, first) = app.post("/api/quests/1/toggle", json!({})).await;
    assert_eq!(first["completed"], true);
    let (_, second) = app.post("/api/quests/1/toggle", json!({})).await;
    assert_eq!(second["completed"], false);

    let (status, _) = app.post("/api/quests/42/toggle", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_calendar_marks_seed_entry() {
    let app = TestApp::spawn(&[]).await;

    let (status, view) = app.get("/api/calendar?year=2024&month=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["label"], "JUN");
    assert_eq!(view["wins"], 1);

    let (_, day) = app.get("/api/calendar/day?year=2024&month=5&day=15").await;
    assert_eq!(day["status"], "win");

    let (status, _) = app.get("/api/calendar?year=2024&month=12").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_calendar_offset_navigates_months() {
    let app = TestApp::spawn(&[]).await;

    let (status, view) = app.get("/api/calendar?year=2024&month=0&offset=-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["year"], 2023);
    assert_eq!(view["month"], 11);
    assert_eq!(view["label"], "DEC");

    let (_, view) = app.get("/api/calendar?year=2024&month=4&offset=1").await;
    assert_eq!(view["label"], "JUN");
    assert_eq!(view["wins"], 1);

    let (status, _) = app.get("/api/calendar?year=2024&month=12&offset=-1").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_dossier_rejects_blank_answers() {
    let app = TestApp::spawn(&[]).await;

    let (status, _) = app.put("/api/dossier/0/0", json!({"response": "  "})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, item) = app
        .put("/api/dossier/0/0", json!({"response": "Late nights"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["response"], "Late nights");
}

#[tokio::test]
async fn test_onboarding_and_tabs() {
    let app = TestApp::spawn(&[]).await;

    let (_, view) = app.post("/api/onboarding/next", json!({})).await;
    assert_eq!(view["step"], 1);
    let (_, view) = app.put("/api/onboarding/step", json!({"step": 3})).await;
    assert_eq!(view["current"]["title"], "New Horizons");

    let (status, tab) = app.put("/api/tab", json!({"tab": "boss-fight"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tab["tab"], "boss-fight");
}

#[tokio::test]
async fn test_terminate_resets_session() {
    let app = TestApp::spawn(&[]).await;
    app.post("/api/onboarding/next", json!({})).await;
    app.put("/api/boss-fight/vision", json!({"text": "A calm founder"}))
        .await;

    let (status, snap) = app.post("/api/session/terminate", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snap["onboarding"]["step"], 0);
    assert_eq!(snap["vision"], "");
    assert_eq!(snap["journal"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_metrics_count_model_calls() {
    let app = TestApp::spawn(&["A vision long enough"]).await;
    app.post("/api/boss-fight/vision/generate", json!({})).await;

    let (status, body) = app.get("/api/metrics?limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metrics"]["totalCalls"], 1);
    assert_eq!(body["recent"][0]["name"], "generate_vision");
    assert_eq!(body["recent"][0]["success"], true);
}
