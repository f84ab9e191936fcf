//! Runs the client against a throwaway axum server standing in for the Query Service.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use backend::{
    api::{auth, disease, users},
    http_utils::query_service::QueryService,
};
use common::{
    disease_entry::{AdditionalField, EntryDraft},
    entries_query::{EntriesQuery, SuggestionRequest, ValueScope},
    filter::{ChainField, FilterDraft, SearchField},
    query_response::ExportFormat,
    session::LoginRequest,
    users::{UserListQuery, UserRole},
};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    authorization: Option<String>,
    body: Option<Value>,
}

type Log = Arc<Mutex<Vec<Captured>>>;

fn entry_json(id: &str, disease: &str) -> Value {
    json!({
        "_id": id,
        "disease": disease,
        "autoantibody": "Anti-Sm",
        "autoantigen": "Sm",
        "epitope": null,
        "additional": {"source": "PMID:1", "note": "x"},
    })
}

async fn fake_query_service(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    log.lock().unwrap().push(Captured {
        method: method.clone(),
        path: path.clone(),
        query,
        authorization: headers.get("authorization").and_then(|v| v.to_str().ok()).map(String::from),
        body: serde_json::from_slice(&body).ok(),
    });

    let ok = |v: Value| Json(v).into_response();
    match (method.as_str(), path.as_str()) {
        ("GET", "/api/disease") => ok(json!({
            "success": true,
            "data": [entry_json("e1", "SLE")],
            "pagination": {"page": 1, "limit": 20, "total": 1, "pages": 1},
            "appliedFilters": {},
        })),
        ("GET", "/api/disease/unique/disease") => ok(json!({"success": true, "data": ["Graves disease", "SLE"]})),
        ("GET", p) if p.starts_with("/api/disease/unique-filtered/") => ok(json!({"data": ["Anti-dsDNA"]})),
        ("GET", "/api/disease/search/entries") => ok(json!({"data": [entry_json("e1", "SLE")], "count": 1})),
        ("GET", "/api/disease/statistics/overview") => ok(json!({"data": {
            "overview": {"totalEntries": 12, "uniqueDiseases": 3},
            "diseaseBreakdown": [{"_id": "SLE", "count": 7}],
        }})),
        ("GET", "/api/disease/export/data") => {
            ([("content-type", "text/csv")], "disease,autoantibody,autoantigen\nSLE,Anti-Sm,Sm\n").into_response()
        }
        ("GET", "/api/disease/e1") => ok(json!({"data": entry_json("e1", "SLE"), "relatedEntries": [entry_json("e2", "SLE")]})),
        ("POST", "/api/disease") => ok(json!({"success": true, "data": entry_json("e9", "Myasthenia gravis")})),
        ("DELETE", "/api/disease/e1") => ok(json!({"success": true, "message": "Entry deleted successfully"})),
        ("GET", "/api/users") => ok(json!({"data": {
            "users": [{"_id": "u1", "name": "Ada", "username": "ada", "email": "ada@example.org", "role": "Doctor"}],
            "pagination": {"currentPage": 1, "totalPages": 1, "totalUsers": 1, "hasNextPage": false, "hasPrevPage": false},
        }})),
        ("PUT", "/api/users/u1/toggle-status") => ok(json!({"data": {"user": {
            "_id": "u1", "name": "Ada", "username": "ada", "email": "ada@example.org", "role": "Doctor", "isActive": false,
        }}})),
        ("DELETE", "/api/users/u1") => ok(json!({"message": "User deleted"})),
        ("POST", "/api/auth/login") => ok(json!({
            "token": "jwt-1",
            "user": {"id": "u0", "name": "Root", "email": "root@example.org", "role": "superAdmin"},
        })),
        _ => (StatusCode::NOT_FOUND, Json(json!({"success": false, "message": "Entry not found"}))).into_response(),
    }
}

async fn spawn_fake() -> (QueryService, Log) {
    let log: Log = Arc::default();
    let app = Router::new().fallback(fake_query_service).with_state(log.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let service = QueryService::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
    (service, log)
}

fn last(log: &Log) -> Captured {
    log.lock().unwrap().last().cloned().unwrap()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn entries_query_is_sparse() {
    let (service, log) = spawn_fake().await;
    let filters = FilterDraft { search: "lupus".into(), disease: " SLE ".into(), ..Default::default() };
    let page = disease::list_entries(&service, EntriesQuery::first_page(filters)).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].additional, vec![AdditionalField::new("source", "PMID:1"), AdditionalField::new("note", "x")]);
    let request = last(&log);
    assert_eq!(request.path, "/api/disease");
    assert_eq!(
        request.query,
        pairs(&[("page", "1"), ("limit", "20"), ("sortBy", "disease"), ("sortOrder", "asc"), ("search", "lupus"), ("disease", "SLE")])
    );
    assert_eq!(request.authorization, None);
}

#[tokio::test]
async fn root_options_use_the_unscoped_route() {
    let (service, log) = spawn_fake().await;
    let values = disease::unique_values(&service, ChainField::Disease, ValueScope::unscoped()).await.unwrap();
    assert_eq!(values.field, ChainField::Disease);
    assert_eq!(values.data, vec!["Graves disease".to_string(), "SLE".to_string()]);
    assert_eq!(last(&log).path, "/api/disease/unique/disease");
}

#[tokio::test]
async fn epitope_options_are_scoped_by_disease_and_antigen() {
    let (service, log) = spawn_fake().await;
    let scope = ValueScope::unscoped().with(ChainField::Disease, "SLE").with(ChainField::Autoantigen, "dsDNA");
    let values = disease::unique_values(&service, ChainField::Epitope, scope).await.unwrap();
    assert_eq!(values.field, ChainField::Epitope);
    let request = last(&log);
    assert_eq!(request.path, "/api/disease/unique-filtered/epitope");
    assert_eq!(request.query, pairs(&[("disease", "SLE"), ("autoantigen", "dsDNA")]));
}

#[tokio::test]
async fn suggestions_ask_all_fields_with_raw_limit() {
    let (service, log) = spawn_fake().await;
    let matches = disease::search_suggestions(&service, SuggestionRequest::all_fields(" lu ")).await.unwrap();
    assert_eq!(matches.count, 1);
    let request = last(&log);
    assert_eq!(request.path, "/api/disease/search/entries");
    assert_eq!(request.query, pairs(&[("q", "lu"), ("field", SearchField::All.as_str()), ("limit", "50")]));
}

#[tokio::test]
async fn statistics_are_unwrapped() {
    let (service, _log) = spawn_fake().await;
    let stats = disease::statistics_overview(&service).await.unwrap();
    assert_eq!(stats.disease_breakdown[0].name, "SLE");
    assert_eq!(stats.overview["totalEntries"], json!(12));
}

#[tokio::test]
async fn bearer_token_is_forwarded() {
    let (service, log) = spawn_fake().await;
    let service = service.with_token(Some("jwt-1".into()));
    disease::get_entry(&service, "e1".into()).await.unwrap();
    assert_eq!(last(&log).authorization.as_deref(), Some("Bearer jwt-1"));
}

#[tokio::test]
async fn error_status_carries_the_service_message() {
    let (service, _log) = spawn_fake().await;
    let err = disease::get_entry(&service, "missing".into()).await.unwrap_err();
    assert_eq!(err.to_string(), "404 Not Found: Entry not found");
}

#[tokio::test]
async fn invalid_drafts_never_leave_the_process() {
    let (service, log) = spawn_fake().await;
    let draft = EntryDraft { disease: "SLE".into(), uniprot_id: "nope".into(), ..Default::default() };
    let err = disease::create_entry(&service, draft).await.unwrap_err();
    assert!(err.to_string().contains("uniprotId"));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_posts_the_trimmed_draft() {
    let (service, log) = spawn_fake().await;
    let draft = EntryDraft {
        disease: " Myasthenia gravis ".into(),
        autoantibody: "Anti-AChR".into(),
        autoantigen: "AChR".into(),
        uniprot_id: "P02708".into(),
        additional: vec![AdditionalField::new("source", "PMID:2")],
        ..Default::default()
    };
    let created = disease::create_entry(&service, draft).await.unwrap();
    assert_eq!(created.id, "e9");
    let request = last(&log);
    assert_eq!(request.method, Method::POST);
    let body = request.body.unwrap();
    assert_eq!(body["disease"], "Myasthenia gravis");
    assert_eq!(body["uniprotId"], "P02708");
    assert_eq!(body["additional"], json!({"source": "PMID:2"}));
}

#[tokio::test]
async fn export_returns_the_raw_file() {
    let (service, log) = spawn_fake().await;
    let params = disease::ExportParams { format: ExportFormat::Csv, disease: Some("SLE".into()), ..Default::default() };
    let body = disease::export_data(&service, &params).await.unwrap();
    assert!(String::from_utf8_lossy(&body).starts_with("disease,autoantibody"));
    assert_eq!(last(&log).query, pairs(&[("format", "csv"), ("disease", "SLE")]));
}

#[tokio::test]
async fn user_routes_unwrap_their_envelopes() {
    let (service, log) = spawn_fake().await;
    let query = UserListQuery { role: Some(UserRole::Doctor), ..Default::default() };
    let page = users::list_users(&service, query).await.unwrap();
    assert_eq!(page.users[0].username, "ada");
    assert!(page.users[0].is_active);
    assert_eq!(last(&log).query, pairs(&[("page", "1"), ("limit", "10"), ("role", "Doctor")]));

    let toggled = users::toggle_user_status(&service, "u1".into()).await.unwrap();
    assert!(!toggled.is_active);
    assert_eq!(last(&log).method, Method::PUT);

    users::delete_user(&service, "u1".into(), true).await.unwrap();
    let request = last(&log);
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.query, pairs(&[("permanent", "true")]));
}

#[tokio::test]
async fn login_returns_the_session_material() {
    let (service, log) = spawn_fake().await;
    let response = auth::login(&service, LoginRequest { email: " root@example.org ".into(), password: "secret1".into() })
        .await
        .unwrap();
    assert_eq!(response.token, "jwt-1");
    assert_eq!(response.user.role, UserRole::SuperAdmin);
    assert_eq!(last(&log).body.unwrap()["email"], "root@example.org");
}
