use crate::entities::task;
use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use sea_orm::*;
use serde::Deserialize;

pub mod web;

/// Priority stored when the form leaves it out.
pub const DEFAULT_PRIORITY: i32 = 3;

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: u32,
    description: String,
    priority: i32,
    created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(id: u32, description: String, priority: i32, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            priority,
            created_at,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns when the task was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time as shown on the dashboard.
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id as u32,
            model.description,
            model.priority,
            model.created_at,
        )
    }
}

/// Raw add-task form fields, exactly as submitted.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    pub description: Option<String>,
    pub priority: Option<String>,
}

/// A validated task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub description: String,
    pub priority: i32,
}

impl TaskForm {
    /// Validates the submitted fields into a [`NewTask`].
    ///
    /// A missing or blank priority falls back to [`DEFAULT_PRIORITY`].
    pub fn parse(&self) -> Result<NewTask, ValidationError> {
        let description = validation::parse_description(self.description.as_deref())?;
        let priority = match validation::non_blank(self.priority.as_deref()) {
            None => DEFAULT_PRIORITY,
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| ValidationError::InvalidPriority(raw.to_string()))?,
        };
        Ok(NewTask {
            description,
            priority,
        })
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Stores a new task stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `new_task` - The validated task to store.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task, TaskServiceError> {
        let active_model = task::ActiveModel {
            description: ActiveValue::Set(new_task.description),
            priority: ActiveValue::Set(new_task.priority),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        tracing::info!("Created task {}", created_model.id);
        Ok(Task::from(created_model))
    }

    /// Retrieves all tasks, most recently created first.
    ///
    /// Tasks sharing a timestamp keep reverse insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn get_tasks_newest_first(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_desc(task::Column::CreatedAt)
            .order_by_desc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }
}
