use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id type of a hostel. Always derived by the server from the hostel's name.
pub type HostelId = String;

/// A hostel as exchanged with the service. Decodes the same spellings as the
/// server's record so bodies round-trip between the two crates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hostel {
    pub id: HostelId,
    pub name: String,
    #[serde(rename = "dateoforigin", alias = "dateOfOrigin")]
    pub date_of_origin: DateTime<Utc>,
    #[serde(rename = "numofrooms", alias = "numOfRooms")]
    pub num_of_rooms: i64,
}

impl Hostel {
    /// A hostel founded now. The id is left empty for the server to assign.
    pub fn new(name: impl Into<String>, num_of_rooms: i64) -> Self {
        Self {
            id: HostelId::new(),
            name: name.into(),
            date_of_origin: Utc::now(),
            num_of_rooms,
        }
    }
}

/// Error type for hostel clients
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("No such hostel: {0}")]
    NotFound(String),
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// [`HostelApi`] is the interface to the hostel registry. Every call is a single
/// attempt; failures are returned to the caller untouched.
#[async_trait::async_trait]
pub trait HostelApi: Send + Sync + 'static {
    /// Returns every registered hostel, in no particular order.
    async fn list(&self) -> Result<Vec<Hostel>, ClientError>;

    async fn get(&self, id: &str) -> Result<Hostel, ClientError>;

    /// Registers a new hostel and returns it with its assigned id.
    async fn create(&self, hostel: &Hostel) -> Result<Hostel, ClientError>;

    /// Replaces the hostel stored under `id`. Renaming moves it to a new id.
    async fn update(&self, id: &str, hostel: &Hostel) -> Result<Hostel, ClientError>;

    async fn delete(&self, id: &str) -> Result<(), ClientError>;
}
