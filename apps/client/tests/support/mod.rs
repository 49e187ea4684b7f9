#![allow(dead_code)]

//! Stub backend for integration tests.
//!
//! Serves the same routes and JSON shapes as the real API from in-memory
//! maps, and records every request (method, path, Authorization header) so
//! tests can assert how many network calls the client actually made.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub auth: Option<String>,
}

#[derive(Default)]
pub struct StubState {
    pub resumes: Mutex<HashMap<String, Value>>,
    pub applications: Mutex<HashMap<String, Value>>,
    pub analyses: Mutex<HashMap<String, Value>>,
    pub requests: Mutex<Vec<Recorded>>,
}

impl StubState {
    fn record(&self, method: &str, path: impl Into<String>, headers: &HeaderMap) {
        self.requests.lock().unwrap().push(Recorded {
            method: method.to_string(),
            path: path.into(),
            auth: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
    }

    /// Number of recorded requests with this method and exact path.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.requests.lock().unwrap().last()?.auth.clone()
    }
}

pub fn seed_resume(state: &StubState, id: &str, name: &str, starred: bool) {
    state.resumes.lock().unwrap().insert(
        id.to_string(),
        json!({
            "_id": id,
            "user_id": "u1",
            "name": name,
            "starred": starred,
            "contact": null,
            "education": [],
            "experience": [],
            "projects": [],
            "skills": [],
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        }),
    );
}

pub fn seed_application(state: &StubState, id: &str, title: &str, company: &str, status: &str) {
    state.applications.lock().unwrap().insert(
        id.to_string(),
        json!({
            "_id": id,
            "user_id": "u1",
            "job_title": title,
            "company_name": company,
            "company_website": null,
            "job_url": null,
            "location": null,
            "status": status,
            "application_date": "2025-03-01",
            "last_updated": Utc::now(),
            "interview_dates": [],
            "notes": null,
            "associated_resume_id": null,
            "associated_analysis_id": null,
        }),
    );
}

pub fn seed_analysis(state: &StubState, id: &str, resume_id: &str, job_title: &str) {
    state.analyses.lock().unwrap().insert(
        id.to_string(),
        json!({
            "_id": id,
            "llm_analysis": {
                "relevance_score": 72,
                "skills": ["rust"],
                "total_years_of_experience": 4,
                "project_categories": ["backend"],
            },
            "resume_id": resume_id,
            "job_title": job_title,
            "job_description": "old description",
            "created_at": Utc::now(),
        }),
    );
}

pub fn app(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/resumes/", get(list_resumes).post(create_resume))
        .route(
            "/resumes/:id",
            get(get_resume).patch(patch_resume).delete(delete_resume),
        )
        .route(
            "/job-applications/",
            get(list_applications).post(create_application),
        )
        .route(
            "/job-applications/:id",
            get(get_application)
                .patch(patch_application)
                .delete(delete_application),
        )
        .route("/ats/analyze", post(analyze))
        .route("/ats/history", get(history))
        .route(
            "/ats/history/:id",
            put(update_analysis).delete(delete_analysis),
        )
        .with_state(state)
}

/// Serves `app` on a random loopback port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Full stub backend on a random port; returns its base URL and state.
pub async fn spawn_stub() -> (String, Arc<StubState>) {
    let state = Arc::new(StubState::default());
    let addr = spawn(app(state.clone())).await;
    (format!("http://{addr}"), state)
}

type ErrorResponse = (StatusCode, Json<Value>);

fn not_found(what: &str) -> ErrorResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("{what} not found") })),
    )
}

fn paginate(mut items: Vec<Value>, query: &HashMap<String, String>) -> Value {
    let page: usize = query.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
    let page_size: usize = query
        .get("page_size")
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    items.sort_by_key(|v| v["_id"].as_str().unwrap_or_default().to_string());
    let total = items.len();
    let page_items: Vec<Value> = items
        .into_iter()
        .skip(page.saturating_sub(1) * page_size)
        .take(page_size)
        .collect();
    json!({
        "total": total,
        "page": page,
        "page_size": page_size,
        "items": page_items,
    })
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Value::Object(target), Value::Object(patch)) = (target, patch) {
        for (k, v) in patch {
            target.insert(k.clone(), v.clone());
        }
    }
}

async fn list_resumes(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/resumes/", &headers);
    let items = state.resumes.lock().unwrap().values().cloned().collect();
    Json(paginate(items, &query))
}

async fn create_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record("POST", "/resumes/", &headers);
    let mut resumes = state.resumes.lock().unwrap();
    let id = format!("r-gen-{}", resumes.len() + 1);
    merge(
        &mut body,
        &json!({ "_id": id.clone(), "created_at": Utc::now(), "updated_at": Utc::now() }),
    );
    resumes.insert(id, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    state.record("GET", format!("/resumes/{id}"), &headers);
    let resumes = state.resumes.lock().unwrap();
    resumes
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Resume"))
}

async fn patch_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, ErrorResponse> {
    state.record("PATCH", format!("/resumes/{id}"), &headers);
    let mut resumes = state.resumes.lock().unwrap();
    let stored = resumes.get_mut(&id).ok_or_else(|| not_found("Resume"))?;
    merge(stored, &patch);
    merge(stored, &json!({ "updated_at": Utc::now() }));
    Ok(Json(stored.clone()))
}

async fn delete_resume(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    state.record("DELETE", format!("/resumes/{id}"), &headers);
    let mut resumes = state.resumes.lock().unwrap();
    resumes
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("Resume"))
}

async fn list_applications(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/job-applications/", &headers);
    let items = state
        .applications
        .lock()
        .unwrap()
        .values()
        .cloned()
        .collect();
    Json(paginate(items, &query))
}

async fn create_application(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.record("POST", "/job-applications/", &headers);
    let mut applications = state.applications.lock().unwrap();
    let id = format!("app-gen-{}", applications.len() + 1);
    merge(
        &mut body,
        &json!({ "_id": id.clone(), "last_updated": Utc::now() }),
    );
    applications.insert(id, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn get_application(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorResponse> {
    state.record("GET", format!("/job-applications/{id}"), &headers);
    let applications = state.applications.lock().unwrap();
    applications
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Job application"))
}

async fn patch_application(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, ErrorResponse> {
    state.record("PATCH", format!("/job-applications/{id}"), &headers);
    let mut applications = state.applications.lock().unwrap();
    let stored = applications
        .get_mut(&id)
        .ok_or_else(|| not_found("Job application"))?;
    merge(stored, &patch);
    merge(stored, &json!({ "last_updated": Utc::now() }));
    Ok(Json(stored.clone()))
}

async fn delete_application(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    state.record("DELETE", format!("/job-applications/{id}"), &headers);
    let mut applications = state.applications.lock().unwrap();
    applications
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("Job application"))
}

async fn analyze(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record("POST", "/ats/analyze", &headers);
    let mut analyses = state.analyses.lock().unwrap();
    let id = format!("ats-gen-{}", analyses.len() + 1);
    analyses.insert(
        id.clone(),
        json!({
            "_id": id,
            "llm_analysis": {
                "relevance_score": 85,
                "skills": ["rust", "sql"],
                "total_years_of_experience": 5,
                "project_categories": ["backend"],
            },
            "resume_id": body["resume_id"],
            "job_title": body["job_title"],
            "job_description": body["job_description"],
            "created_at": Utc::now(),
        }),
    );
    Json(json!({
        "relevance_score": 85,
        "skills": ["rust", "sql"],
        "total_years_of_experience": 5,
        "project_categories": ["backend"],
    }))
}

async fn history(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET", "/ats/history", &headers);
    let analyses = state.analyses.lock().unwrap();
    let mut items: Vec<Value> = analyses
        .values()
        .filter(|a| {
            query
                .get("resume_id")
                .map_or(true, |r| a["resume_id"] == json!(r))
                && query
                    .get("job_title")
                    .map_or(true, |t| a["job_title"] == json!(t))
        })
        .cloned()
        .collect();
    items.sort_by_key(|v| v["_id"].as_str().unwrap_or_default().to_string());
    Json(json!(items))
}

async fn update_analysis(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>, ErrorResponse> {
    state.record("PUT", format!("/ats/history/{id}"), &headers);
    let mut analyses = state.analyses.lock().unwrap();
    let stored = analyses.get_mut(&id).ok_or_else(|| not_found("Analysis"))?;
    merge(stored, &patch);
    Ok(Json(stored.clone()))
}

async fn delete_analysis(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ErrorResponse> {
    state.record("DELETE", format!("/ats/history/{id}"), &headers);
    let mut analyses = state.analyses.lock().unwrap();
    analyses
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("Analysis"))
}
