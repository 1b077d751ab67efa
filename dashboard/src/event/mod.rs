use crate::entities::event;
use crate::validation::{self, ValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::*;
use serde::Deserialize;

pub mod web;

/// The only date format the add-event form accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Event {
    id: u32,
    description: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(id: u32, description: String, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            date,
            created_at,
        }
    }

    /// Returns the ID of the event.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the calendar date of the event.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns when the event was recorded.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn date_display(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl From<event::Model> for Event {
    fn from(model: event::Model) -> Self {
        Event::new(
            model.id as u32,
            model.description,
            model.date,
            model.created_at,
        )
    }
}

/// Raw add-event form fields, exactly as submitted.
#[derive(Debug, Default, Deserialize)]
pub struct EventForm {
    pub description: Option<String>,
    pub date: Option<String>,
}

/// A validated event that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub description: String,
    pub date: NaiveDate,
}

impl EventForm {
    /// Validates the submitted fields into a [`NewEvent`].
    pub fn parse(&self) -> Result<NewEvent, ValidationError> {
        let description = validation::parse_description(self.description.as_deref())?;
        let raw_date =
            validation::non_blank(self.date.as_deref()).ok_or(ValidationError::MissingDate)?;
        let date = parse_date(raw_date)?;
        Ok(NewEvent { description, date })
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    // chrono accepts unpadded fields, which the form format does not allow.
    let well_formed = raw.len() == 10
        && raw.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !well_formed {
        return Err(ValidationError::InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Error type for EventService operations.
#[derive(Debug, thiserror::Error)]
pub enum EventServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct EventService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl EventService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> EventService<'_> {
        EventService { db }
    }

    /// Stores a new event stamped with the current time.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Event` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_event(&self, new_event: NewEvent) -> Result<Event, EventServiceError> {
        let active_model = event::ActiveModel {
            description: ActiveValue::Set(new_event.description),
            date: ActiveValue::Set(new_event.date),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        tracing::info!("Created event {} on {}", created_model.id, created_model.date);
        Ok(Event::from(created_model))
    }

    /// Retrieves all events, soonest date first.
    #[tracing::instrument(skip(self))]
    pub async fn get_events_soonest_first(&self) -> Result<Vec<Event>, EventServiceError> {
        let events = event::Entity::find()
            .order_by_asc(event::Column::Date)
            .order_by_asc(event::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Event::from)
            .collect();
        Ok(events)
    }
}
