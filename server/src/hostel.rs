// hostel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{hostel_id, HostelId};

/// A hostel record as stored and as exchanged over the wire.
///
/// Missing fields decode to their zero values. `id` is never trusted from a
/// request body: the store always rederives it from `name`.
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
    pub fn new(name: impl Into<String>, date_of_origin: DateTime<Utc>, num_of_rooms: i64) -> Self {
        Self {
            id: HostelId::new(),
            name: name.into(),
            date_of_origin,
            num_of_rooms,
        }
    }

    /// The id this record would be stored under.
    pub fn derived_id(&self) -> HostelId {
        hostel_id(&self.name)
    }

    /// The record seeded by `--seed-sample`.
    pub fn sample() -> Self {
        Self::new("Tagore Bhavan", Utc::now(), 122)
    }
}
