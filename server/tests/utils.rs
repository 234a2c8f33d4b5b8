use hostelites_server::server::{ServerConfig, ServerNode};
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

pub fn get_server_config(seed_sample: bool) -> ServerConfig {
    ServerConfig {
        seed_sample,
        ..ServerConfig::default()
    }
}

pub fn launch_server_node(seed_sample: bool) -> (ServerNode, Client) {
    launch_server_node_with(get_server_config(seed_sample))
}

pub fn launch_server_node_with(config: ServerConfig) -> (ServerNode, Client) {
    let _ = env_logger::builder().is_test(true).try_init();
    let node = ServerNode::new(config);
    let client = Client::tracked(node.build()).expect("valid rocket instance");
    (node, client)
}

pub fn hostel_body(name: &str, rooms: i64) -> String {
    json!({
        "name": name,
        "dateoforigin": "1921-12-23T00:00:00Z",
        "numofrooms": rooms,
    })
    .to_string()
}

/// Creates a hostel through the API and returns the stored record.
pub fn create(client: &Client, name: &str, rooms: i64) -> Value {
    let response = client
        .post("/hostels")
        .header(ContentType::JSON)
        .body(hostel_body(name, rooms))
        .dispatch();
    assert_eq!(response.status(), Status::Created);
    response.into_json::<Value>().expect("hostel json")
}
