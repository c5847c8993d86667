//! Application context for one dashboard session.
//!
//! A [`Dashboard`] is built once when the dashboard is entered and dropped on
//! navigation. It is handed explicitly to whatever renders it; nothing about
//! it is global.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Database;
use crate::models::{CardSummary, CreateProjectInput, ProjectRecord, Stats};
use crate::observer::{DashboardObserver, Notification};
use crate::presenter;
use crate::remote::BackendClient;
use crate::store::ProjectStore;
use crate::wizard::{validate_all, ValidationError};

/// Page that shows a single project.
pub const PROJECT_PAGE: &str = "project.html";

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Project not found: {0}")]
    NotFound(String),
}

/// Where the view should go once an operation has finished.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    pub project_id: String,
}

pub struct Dashboard {
    store: ProjectStore,
    observer: Arc<dyn DashboardObserver>,
    backend: Option<BackendClient>,
    project_page: String,
}

impl Dashboard {
    /// Load the stored projects and publish them to the observer.
    pub fn open(
        db: Database,
        observer: Arc<dyn DashboardObserver>,
        backend: Option<BackendClient>,
    ) -> Self {
        let mut store = ProjectStore::new(db, observer.clone());
        store.load();

        let dashboard = Self {
            store,
            observer,
            backend,
            project_page: PROJECT_PAGE.to_string(),
        };
        dashboard.publish();
        dashboard
    }

    pub fn with_project_page(mut self, page: impl Into<String>) -> Self {
        self.project_page = page.into();
        self
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        self.store.projects()
    }

    pub fn find(&self, id: &str) -> Option<&ProjectRecord> {
        self.store.find_by_id(id)
    }

    pub fn cards(&self, now: DateTime<Utc>) -> Vec<CardSummary> {
        self.store
            .projects()
            .iter()
            .map(|p| presenter::summarize(p, now))
            .collect()
    }

    pub fn stats(&self) -> Stats {
        presenter::aggregate(self.store.projects())
    }

    pub fn current_project(&self) -> Option<ProjectRecord> {
        self.store.current()
    }

    /// Submit the new-project form.
    ///
    /// The input is validated as a whole, the project is created and
    /// persisted locally and made the current project, and only then is the
    /// remote backend tried. The returned navigation points at the new
    /// project and is produced after all local work and notifications are done.
    pub async fn create_project(
        &mut self,
        input: CreateProjectInput,
    ) -> Result<Navigation, DashboardError> {
        let record = match validate_all(&input).and_then(|()| self.store.create(input)) {
            Ok(record) => record,
            Err(e) => {
                self.observer.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.store.set_current(&record);
        self.publish();
        self.observer
            .notify(Notification::success(format!("Proyecto creado: {}", record.name)));

        self.sync_remote(&record).await;

        Ok(self.navigation_to(&record))
    }

    /// Make `id` the current project and hand over to the project page.
    pub fn open_project(&self, id: &str) -> Result<Navigation, DashboardError> {
        let record = self
            .store
            .find_by_id(id)
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))?;

        self.store.set_current(record);
        self.observer
            .notify(Notification::info(format!("Abriendo proyecto: {}", record.name)));

        Ok(self.navigation_to(record))
    }

    async fn sync_remote(&self, record: &ProjectRecord) {
        let Some(backend) = &self.backend else {
            return;
        };

        match backend.insert_project(record).await {
            Ok(()) => {
                tracing::info!("Project {} saved to backend", record.id);
                self.observer
                    .notify(Notification::success("Proyecto guardado en la nube"));
            }
            Err(e) => {
                tracing::error!("Backend insert failed for {}: {}", record.id, e);
                self.observer.notify(Notification::error(
                    "No se pudo guardar el proyecto en la nube",
                ));
            }
        }
    }

    fn navigation_to(&self, record: &ProjectRecord) -> Navigation {
        Navigation {
            target: self.project_page.clone(),
            project_id: record.id.clone(),
        }
    }

    fn publish(&self) {
        self.observer.projects_changed(self.store.projects());
        self.observer.stats_changed(&self.stats());
    }
}
