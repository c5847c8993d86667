use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;
use sunstone::dashboard::{Dashboard, DashboardError};
use sunstone::db::{Database, PROJECTS_KEY};
use sunstone::models::*;
use sunstone::observer::{NotificationKind, NotificationLog};
use sunstone::remote::BackendClient;
use sunstone::wizard::{FormField, ValidationError};

fn setup_db() -> Database {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    db
}

fn open(backend: Option<BackendClient>) -> (Dashboard, Arc<NotificationLog>, Database) {
    let db = setup_db();
    let log = Arc::new(NotificationLog::new());
    let dashboard = Dashboard::open(db.clone(), log.clone(), backend);
    log.drain();
    (dashboard, log, db)
}

fn valid_input(name: &str) -> CreateProjectInput {
    CreateProjectInput {
        name: name.to_string(),
        industry: "Fintech".to_string(),
        model_type: "B2B".to_string(),
        phase: "Pre-PMF".to_string(),
        region: "España".to_string(),
        objectives: vec!["pmf".to_string()],
        main_concerns: "No sabemos quién es nuestro cliente ideal".to_string(),
        main_opportunities: String::new(),
        duration: "4-6-weeks-discovery".to_string(),
        deliverable: "discovery-strategy".to_string(),
        budget: "10k-25k".to_string(),
    }
}

#[derive(Clone)]
struct MockBackend {
    status: StatusCode,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn mock_insert(
    State(mock): State<MockBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.received.lock().unwrap().push((auth, body));
    mock.status
}

/// Serve a fake backend on a random local port and return its base URL.
async fn spawn_backend(status: StatusCode) -> (String, MockBackend) {
    let mock = MockBackend {
        status,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/projects", post(mock_insert))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), mock)
}

mod dashboard_open {
    use super::*;

    #[tokio::test]
    async fn publishes_projects_and_stats() {
        let db = setup_db();
        let log = Arc::new(NotificationLog::new());
        let _dashboard = Dashboard::open(db, log.clone(), None);

        assert_eq!(log.last_projects(), sample_projects());
        assert_eq!(
            log.last_stats(),
            Stats {
                total: 2,
                discovery_count: 1,
                strategy_count: 1,
                success_rate_percent: 50,
            }
        );
    }

    #[tokio::test]
    async fn builds_one_card_per_project() {
        let (dashboard, _log, _db) = open(None);

        let cards = dashboard.cards(Utc::now());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "TechFlow Solutions");
        assert_eq!(cards[0].status_style, StatusStyle::Blue);
        assert_eq!(cards[1].status_style, StatusStyle::Green);
    }
}

mod create_project {
    use super::*;

    #[tokio::test]
    async fn navigates_to_the_new_project() {
        let (mut dashboard, log, _db) = open(None);

        let navigation = dashboard
            .create_project(valid_input("Acme Corp"))
            .await
            .expect("Failed to create");

        let newest = &dashboard.projects()[0];
        assert_eq!(newest.name, "Acme Corp");
        assert_eq!(navigation.project_id, newest.id);
        assert_eq!(navigation.target, "project.html");
        assert_eq!(
            dashboard.current_project().map(|p| p.id),
            Some(navigation.project_id.clone())
        );

        let notifications = log.drain();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
        assert_eq!(notifications[0].message, "Proyecto creado: Acme Corp");
    }

    #[tokio::test]
    async fn republishes_projects_and_stats() {
        let (mut dashboard, log, _db) = open(None);

        dashboard
            .create_project(valid_input("Acme Corp"))
            .await
            .expect("Failed to create");

        assert_eq!(log.last_projects().len(), 3);
        let stats = log.last_stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.discovery_count, 2);
        assert_eq!(stats.success_rate_percent, 33);
    }

    #[tokio::test]
    async fn rejects_a_short_name_without_changes() {
        let (mut dashboard, log, db) = open(None);
        let before = db.get_item(PROJECTS_KEY).unwrap();

        let result = dashboard.create_project(valid_input("ab")).await;

        assert!(matches!(
            result,
            Err(DashboardError::Validation(ValidationError::InvalidName))
        ));
        assert_eq!(dashboard.projects().len(), 2);
        assert_eq!(db.get_item(PROJECTS_KEY).unwrap(), before);
        assert!(dashboard.current_project().is_none());

        let notifications = log.drain();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Error);
        assert_eq!(
            notifications[0].message,
            "Por favor ingresa un nombre de proyecto válido"
        );
    }

    #[tokio::test]
    async fn requires_every_mandatory_field() {
        let (mut dashboard, _log, _db) = open(None);

        let input = CreateProjectInput {
            duration: String::new(),
            ..valid_input("Acme Corp")
        };
        let result = dashboard.create_project(input).await;

        assert!(matches!(
            result,
            Err(DashboardError::Validation(ValidationError::MissingField(
                FormField::Duration
            )))
        ));
        assert_eq!(dashboard.projects().len(), 2);
    }

    #[tokio::test]
    async fn uses_the_configured_project_page() {
        let (dashboard, _log, _db) = open(None);
        let mut dashboard = dashboard.with_project_page("proyecto.html");

        let navigation = dashboard
            .create_project(valid_input("Acme Corp"))
            .await
            .expect("Failed to create");
        assert_eq!(navigation.target, "proyecto.html");
    }
}

mod remote_sync {
    use super::*;

    #[tokio::test]
    async fn sends_the_project_to_the_backend() {
        let (url, mock) = spawn_backend(StatusCode::CREATED).await;
        let backend = BackendClient::new(url, Some("secret".to_string()));
        let (mut dashboard, log, _db) = open(Some(backend));

        let navigation = dashboard
            .create_project(valid_input("Acme Corp"))
            .await
            .expect("Failed to create");

        let received = mock.received.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer secret"));
        assert_eq!(body["id"], navigation.project_id.as_str());
        assert_eq!(body["name"], "Acme Corp");
        assert_eq!(body["modelType"], "B2B");

        let messages: Vec<_> = log.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec!["Proyecto creado: Acme Corp", "Proyecto guardado en la nube"]
        );
    }

    #[tokio::test]
    async fn keeps_local_state_when_backend_rejects() {
        let (url, _mock) = spawn_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
        let (mut dashboard, log, db) = open(Some(BackendClient::new(url, None)));

        let navigation = dashboard
            .create_project(valid_input("Acme Corp"))
            .await
            .expect("Local create should succeed");

        assert!(dashboard.find(&navigation.project_id).is_some());
        let saved: Vec<ProjectRecord> = db.get_json(PROJECTS_KEY).unwrap().unwrap();
        assert_eq!(saved.len(), 3);

        let notifications = log.drain();
        let last = notifications.last().expect("Expected a notification");
        assert_eq!(last.kind, NotificationKind::Error);
        assert_eq!(last.message, "No se pudo guardar el proyecto en la nube");
    }

    #[tokio::test]
    async fn keeps_local_state_when_backend_is_unreachable() {
        let backend = BackendClient::new("http://127.0.0.1:1", None);
        let (mut dashboard, log, _db) = open(Some(backend));

        let result = dashboard.create_project(valid_input("Acme Corp")).await;

        assert!(result.is_ok());
        assert_eq!(dashboard.projects().len(), 3);
        assert!(log
            .drain()
            .iter()
            .any(|n| n.kind == NotificationKind::Error));
    }
}

mod open_project {
    use super::*;

    #[tokio::test]
    async fn snapshots_the_project_and_announces_it() {
        let (dashboard, log, _db) = open(None);

        let navigation = dashboard.open_project("2").expect("Failed to open");

        assert_eq!(navigation.project_id, "2");
        assert_eq!(
            dashboard.current_project().map(|p| p.name),
            Some("MarketPlace Pro".to_string())
        );

        let notifications = log.drain();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Info);
        assert_eq!(
            notifications[0].message,
            "Abriendo proyecto: MarketPlace Pro"
        );
    }

    #[tokio::test]
    async fn fails_for_unknown_project() {
        let (dashboard, log, _db) = open(None);

        let result = dashboard.open_project("missing");

        assert!(matches!(result, Err(DashboardError::NotFound(id)) if id == "missing"));
        assert!(dashboard.current_project().is_none());
        assert!(log.drain().is_empty());
    }
}
