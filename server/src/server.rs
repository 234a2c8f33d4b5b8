use log::{debug, info};
use rocket::data::{self, ByteUnit, Data, FromData, Limits, ToByteUnit};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{catch, catchers, delete, get, post, put, routes, Build, Request, Rocket, State};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use crate::error::ApiError;
use crate::hostel::Hostel;
use crate::store::HostelStore;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JSON_LIMIT_KIB: u64 = 1024;

// Request bodies ----------------------------------------------------------------

/// A hostel decoded from a request body.
///
/// Only `application/json` bodies are accepted. The body is read in full before
/// the store is touched, so no lock is ever held across I/O.
pub struct HostelPayload(pub Hostel);

#[rocket::async_trait]
impl<'r> FromData<'r> for HostelPayload {
    type Error = ApiError;

    async fn from_data(req: &'r Request<'_>, data: Data<'r>) -> data::Outcome<'r, Self> {
        if !req.content_type().map_or(false, |ct| ct.is_json()) {
            return Outcome::Error((Status::UnsupportedMediaType, ApiError::UnsupportedMediaType));
        }

        let limit = req.limits().get("json").unwrap_or(Limits::JSON);
        let body = match data.open(limit).into_string().await {
            Ok(body) if body.is_complete() => body.into_inner(),
            Ok(_) => {
                return Outcome::Error((Status::PayloadTooLarge, ApiError::PayloadTooLarge(limit)));
            }
            Err(e) => {
                return Outcome::Error((Status::InternalServerError, ApiError::Internal(e.to_string())));
            }
        };

        match serde_json::from_str::<Hostel>(&body) {
            Ok(hostel) => Outcome::Success(HostelPayload(hostel)),
            Err(e) => Outcome::Error((Status::BadRequest, ApiError::Malformed(e.to_string()))),
        }
    }
}

#[derive(Serialize)]
pub struct Stats {
    pub hostels: usize,
}

// Routes ------------------------------------------------------------------------

#[get("/")]
fn health_check() -> &'static str {
    "Healthy\n"
}

#[get("/stats")]
fn store_stats(store: &State<Arc<HostelStore>>) -> Json<Stats> {
    Json(Stats {
        hostels: store.len(),
    })
}

#[get("/")]
fn list_hostels(store: &State<Arc<HostelStore>>) -> Json<Vec<Hostel>> {
    Json(store.list())
}

#[get("/<id>")]
fn get_hostel(id: &str, store: &State<Arc<HostelStore>>) -> Result<Json<Hostel>, ApiError> {
    Ok(Json(store.get(id)?))
}

#[post("/", data = "<payload>")]
fn create_hostel(
    payload: Result<HostelPayload, ApiError>,
    store: &State<Arc<HostelStore>>,
) -> Result<Created<Json<Hostel>>, ApiError> {
    let HostelPayload(hostel) = payload?;
    let created = store.create(hostel)?;
    info!("Created hostel {} ({})", created.id, created.name);
    Ok(Created::new(format!("/hostels/{}", created.id)).body(Json(created)))
}

#[put("/<id>", data = "<payload>")]
fn update_hostel(
    id: &str,
    payload: Result<HostelPayload, ApiError>,
    store: &State<Arc<HostelStore>>,
) -> Result<Json<Hostel>, ApiError> {
    let HostelPayload(hostel) = payload?;
    let updated = store.update(id, hostel)?;
    info!("Updated hostel {} -> {}", id, updated.id);
    Ok(Json(updated))
}

#[delete("/<id>")]
fn delete_hostel(id: &str, store: &State<Arc<HostelStore>>) -> Result<Status, ApiError> {
    store.delete(id)?;
    info!("Deleted hostel {}", id);
    Ok(Status::NoContent)
}

#[catch(404)]
fn not_found(req: &Request) -> String {
    format!("No route for {} {}\n", req.method(), req.uri())
}

#[catch(default)]
fn default_catcher(status: Status, _req: &Request) -> String {
    format!("{}\n", status)
}

// Server node -------------------------------------------------------------------

pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub json_limit_kib: u64,
    pub seed_sample: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            json_limit_kib: DEFAULT_JSON_LIMIT_KIB,
            seed_sample: false,
        }
    }
}

impl ServerConfig {
    pub fn json_limit(&self) -> ByteUnit {
        self.json_limit_kib.kibibytes()
    }
}

pub struct ServerNode {
    store: Arc<HostelStore>,
    config: ServerConfig,
}

impl ServerNode {
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(HostelStore::new());
        if config.seed_sample {
            match store.create(Hostel::sample()) {
                Ok(hostel) => info!("Seeded sample hostel {} ({})", hostel.id, hostel.name),
                Err(e) => debug!("Sample hostel not seeded: {}", e),
            }
        }
        ServerNode { store, config }
    }

    pub fn store(&self) -> Arc<HostelStore> {
        self.store.clone()
    }

    pub fn build(&self) -> Rocket<Build> {
        let limits = Limits::default().limit("json", self.config.json_limit());
        let figment = rocket::Config::figment()
            .merge(("address", self.config.address))
            .merge(("port", self.config.port))
            .merge(("limits", limits));
        rocket::custom(figment)
            .manage(self.store.clone())
            .mount("/", routes![health_check, store_stats])
            .mount(
                "/hostels",
                routes![
                    list_hostels,
                    get_hostel,
                    create_hostel,
                    update_hostel,
                    delete_hostel,
                ],
            )
            .register("/", catchers![not_found, default_catcher])
    }
}
