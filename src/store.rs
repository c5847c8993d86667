//! The authoritative list of project records.
//!
//! [`ProjectStore`] owns the in-memory list and is the only writer of the
//! persisted copy. Every mutation writes the full list back. Storage failures
//! never reach the caller as errors: they are logged and reported through the
//! observer, and the in-memory list is kept even when it could not be saved.

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::db::{Database, StorageError, CURRENT_PROJECT_KEY, PROJECTS_KEY};
use crate::models::*;
use crate::observer::{DashboardObserver, Notification};
use crate::wizard::{validate_name, ValidationError};

pub struct ProjectStore {
    db: Database,
    observer: Arc<dyn DashboardObserver>,
    projects: Vec<ProjectRecord>,
}

impl ProjectStore {
    /// Create an empty store. Call [`ProjectStore::load`] to read persisted data.
    pub fn new(db: Database, observer: Arc<dyn DashboardObserver>) -> Self {
        Self {
            db,
            observer,
            projects: Vec::new(),
        }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    /// Read the persisted list into memory.
    ///
    /// Missing or empty data, or data that is not a JSON array, is replaced by
    /// the built-in sample projects, which are persisted straight away. Odd
    /// field values inside a record fall back to defaults, and entries that are
    /// not objects are skipped.
    pub fn load(&mut self) -> &[ProjectRecord] {
        let loaded = match self.db.get_json::<Vec<Value>>(PROJECTS_KEY) {
            Ok(Some(items)) => Some(read_records(items)).filter(|list| !list.is_empty()),
            Ok(None) => None,
            Err(e) => {
                self.report_read_failure(&e);
                None
            }
        };

        match loaded {
            Some(list) => {
                tracing::info!("Loaded {} projects", list.len());
                self.projects = list;
            }
            None => {
                tracing::info!("No saved projects, seeding sample projects");
                self.projects = sample_projects();
                self.save(&self.projects);
            }
        }

        &self.projects
    }

    /// Write `records` as the full persisted list, replacing what was there.
    ///
    /// Returns whether the write succeeded.
    pub fn save(&self, records: &[ProjectRecord]) -> bool {
        match self.db.set_json(PROJECTS_KEY, records) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error writing projects to storage: {}", e);
                self.observer.notify(Notification::error("Error al guardar datos"));
                false
            }
        }
    }

    /// Create a new project from wizard input.
    ///
    /// Only the name is checked here. The record starts in discovery with no
    /// progress, is placed at the head of the list (newest first) and the list
    /// is persisted.
    pub fn create(&mut self, input: CreateProjectInput) -> Result<ProjectRecord, ValidationError> {
        validate_name(&input.name)?;

        let record = ProjectRecord {
            id: self.next_id(),
            name: input.name.trim().to_string(),
            industry: input.industry,
            model_type: input.model_type,
            phase: input.phase,
            region: input.region,
            objectives: input.objectives,
            main_concerns: input.main_concerns,
            main_opportunities: input.main_opportunities,
            duration: input.duration,
            deliverable: input.deliverable,
            budget: input.budget,
            status: Some(ProjectStatus::Discovery.as_str().to_string()),
            progress: 0,
            created: Some(Utc::now()),
            discovery: default_discovery(),
            strategy: default_strategy(),
            roadmap: default_roadmap(),
            extra: Default::default(),
        };

        tracing::info!("Created project {} ({})", record.name, record.id);
        self.projects.insert(0, record.clone());
        self.save(&self.projects);

        Ok(record)
    }

    /// Persist a snapshot of `record` for the project page to pick up.
    ///
    /// The snapshot is a copy; later changes to the store do not reach it.
    pub fn set_current(&self, record: &ProjectRecord) -> bool {
        match self.db.set_json(CURRENT_PROJECT_KEY, record) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error writing current project to storage: {}", e);
                self.observer.notify(Notification::error("Error al guardar datos"));
                false
            }
        }
    }

    /// Read the current-project snapshot, if one exists and is readable.
    pub fn current(&self) -> Option<ProjectRecord> {
        match self.db.get_json(CURRENT_PROJECT_KEY) {
            Ok(record) => record,
            Err(e) => {
                self.report_read_failure(&e);
                None
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find_by_id(&id).is_none() {
                return id;
            }
        }
    }

    fn report_read_failure(&self, e: &StorageError) {
        match e {
            StorageError::Malformed { .. } => tracing::warn!("Ignoring saved data: {}", e),
            _ => tracing::error!("Error reading from storage: {}", e),
        }
        self.observer
            .notify(Notification::error("Error al cargar datos guardados"));
    }
}

fn read_records(items: Vec<Value>) -> Vec<ProjectRecord> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping unreadable project entry: {}", e);
                None
            }
        })
        .collect()
}
