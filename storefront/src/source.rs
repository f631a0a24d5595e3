//! Event sources: where the full, unfiltered catalogue comes from.
//!
//! - [`StaticEventSource`]: a compiled-in table, settles immediately
//! - [`HttpEventSource`]: one `GET` returning a JSON array of events
//!
//! No query parameters are ever sent; filtering happens locally.

use crate::types::Event;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Errors loading the catalogue
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request could not be sent or did not complete
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status
    #[error("Unexpected status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not a JSON array of events
    #[error("Invalid catalogue payload: {0}")]
    Decode(String),
}

/// Future returned by [`EventSource::fetch_events`]
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Event>, SourceError>> + Send + 'a>>;

/// Supplies the full event list
///
/// Uses explicit `Pin<Box<dyn Future>>` so the trait stays object safe and can be
/// shared as `Arc<dyn EventSource>`.
pub trait EventSource: Send + Sync {
    /// Fetch every event, unsorted and unfiltered
    fn fetch_events(&self) -> FetchFuture<'_>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// In-process catalogue
#[derive(Debug, Clone)]
pub struct StaticEventSource {
    events: Vec<Event>,
}

impl StaticEventSource {
    /// Serve the given events
    #[must_use]
    pub const fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Serve the built-in sample catalogue
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Decode`] if the embedded table is malformed.
    pub fn sample() -> Result<Self, SourceError> {
        serde_json::from_str(SAMPLE_EVENTS)
            .map(Self::new)
            .map_err(|e| SourceError::Decode(e.to_string()))
    }

    /// The events served
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventSource for StaticEventSource {
    fn fetch_events(&self) -> FetchFuture<'_> {
        let events = self.events.clone();
        Box::pin(async move { Ok(events) })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Remote catalogue behind a single JSON endpoint
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    url: String,
}

impl HttpEventSource {
    /// Create a source for `url`; every fetch is bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::RequestFailed`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<Vec<Event>, SourceError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else {
                SourceError::RequestFailed(e.to_string())
            }
        })?;

        serde_json::from_str(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl EventSource for HttpEventSource {
    fn fetch_events(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            tracing::debug!(url = %self.url, "Fetching event catalogue");
            let result = self.fetch().await;
            match &result {
                Ok(events) => tracing::info!(count = events.len(), "Event catalogue loaded"),
                Err(error) => tracing::warn!(%error, url = %self.url, "Event catalogue fetch failed"),
            }
            result
        })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Built-in catalogue used when no remote endpoint is configured
const SAMPLE_EVENTS: &str = r#"[
  {
    "id": "1",
    "name": "Summer Music Festival",
    "description": "Three stages of indie, rock and electronic acts.",
    "category": "Music",
    "date": "2025-07-12T16:00:00Z",
    "time": "16:00",
    "venue": "Riverside Park",
    "location": "Madrid",
    "price": 89.99,
    "image": "/images/summer-festival.jpg",
    "long_description": "A full day outdoors with three stages, food trucks and a closing fireworks show.",
    "lineup": ["The Lanterns", "Neon Tides", "Marea Baja"],
    "schedule": [
      { "time": "16:00", "activity": "Gates open" },
      { "time": "18:00", "activity": "Main stage opens" },
      { "time": "23:30", "activity": "Fireworks" }
    ]
  },
  {
    "id": "2",
    "name": "Late Night Sessions",
    "description": "An intimate evening of live Jazz and soul.",
    "category": "Music",
    "date": "2025-05-03T21:00:00Z",
    "time": "21:00",
    "venue": "Blue Room",
    "location": "Barcelona",
    "price": 35.0,
    "image": "/images/late-night.jpg",
    "lineup": ["Clara Vidal Quartet"]
  },
  {
    "id": "3",
    "name": "City Derby",
    "description": "The season's biggest football rivalry.",
    "category": "Sports",
    "date": "2025-04-20T18:30:00Z",
    "time": "18:30",
    "venue": "Estadio Central",
    "location": "Sevilla",
    "price": 55.0,
    "image": "/images/derby.jpg"
  },
  {
    "id": "4",
    "name": "Hamlet",
    "description": "A modern staging of Shakespeare's tragedy.",
    "category": "Theatre",
    "date": "2025-03-15T19:30:00Z",
    "time": "19:30",
    "venue": "Teatro Real",
    "location": "Madrid",
    "price": 42.5,
    "image": "/images/hamlet.jpg",
    "schedule": [
      { "time": "19:30", "activity": "Act I" },
      { "time": "21:00", "activity": "Interval" },
      { "time": "21:20", "activity": "Act II" }
    ]
  },
  {
    "id": "5",
    "name": "Rust Conference",
    "description": "Talks and workshops on systems programming.",
    "category": "Conference",
    "date": "2025-09-18T09:00:00Z",
    "time": "09:00",
    "venue": "Palacio de Congresos",
    "location": "Valencia",
    "price": 150.0,
    "image": "/images/conference.jpg"
  },
  {
    "id": "6",
    "name": "Stand-up Night",
    "description": "Five comedians, one microphone.",
    "category": "Comedy",
    "date": "2025-06-06T22:00:00Z",
    "time": "22:00",
    "venue": "La Risa Club",
    "location": "Bilbao",
    "price": 18.0
  },
  {
    "id": "7",
    "name": "Symphony No. 9",
    "description": "Beethoven's ninth with full choir.",
    "category": "Music",
    "date": "2025-10-04T20:00:00Z",
    "time": "20:00",
    "venue": "Auditorio Nacional",
    "location": "Madrid",
    "price": 60.0,
    "image": "/images/symphony.jpg"
  },
  {
    "id": "8",
    "name": "Basketball Finals",
    "description": "Game one of the national finals.",
    "category": "Sports",
    "date": "2025-06-14T20:45:00Z",
    "time": "20:45",
    "venue": "Palau Arena",
    "location": "Barcelona",
    "price": 70.0,
    "image": "/images/finals.jpg"
  },
  {
    "id": "9",
    "name": "Street Food Fair",
    "description": "Forty stalls and live music all weekend.",
    "category": "Festival",
    "date": "2025-08-23T12:00:00Z",
    "time": "12:00",
    "venue": "Old Harbour",
    "location": "Málaga",
    "price": 0.0
  },
  {
    "id": "10",
    "name": "Flamenco Evening",
    "description": "Guitar, cante and dance in a historic courtyard.",
    "category": "Theatre",
    "date": "2025-05-24T21:30:00Z",
    "time": "21:30",
    "venue": "Corral del Carbón",
    "location": "Granada",
    "price": 28.0,
    "image": "/images/flamenco.jpg"
  },
  {
    "id": "11",
    "name": "Photography Workshop",
    "description": "Hands-on night photography session.",
    "category": "Conference",
    "date": "2025-11-08T17:00:00Z",
    "time": "17:00",
    "venue": "Casa de la Luz",
    "location": "Valencia",
    "price": 25.0
  },
  {
    "id": "12",
    "name": "New Year's Eve Gala",
    "description": "Dinner, dancing and a countdown with a live big band.",
    "category": "Festival",
    "date": "2025-12-31T21:00:00Z",
    "time": "21:00",
    "venue": "Gran Hotel",
    "location": "Madrid",
    "price": 120.0,
    "image": "/images/gala.jpg"
  }
]"#;
