use clap::{App, Arg};
use hostelites_client::client_api::{Hostel, HostelApi, HostelId};
use hostelites_client::hostel_client::HttpHostelClient;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

// Registers `count` hostels with distinct names concurrently, then checks that
// every one of them shows up in a single listing before removing them again.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let matches = App::new("hostelites-benchmark")
        .about("Concurrent create/list workload against a hostelites server")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .default_value("127.0.0.1:8080"),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .takes_value(true)
                .default_value("200"),
        )
        .get_matches();

    let server = matches.value_of("server").unwrap_or("127.0.0.1:8080");
    let count = matches.value_of("count").unwrap_or("200").parse::<usize>()?;
    let client = Arc::new(HttpHostelClient::new(server));

    let names = load_gen(count);
    let created = load_run(client.clone(), names).await;
    verify(&*client, &created).await?;
    cleanup(&*client, &created).await;
    Ok(())
}

// Names are tagged with the start time so repeated runs do not collide.
fn load_gen(count: usize) -> Vec<String> {
    let tag = chrono::Utc::now().timestamp_millis();
    (0..count).map(|i| format!("bench-{}-{}", tag, i)).collect()
}

async fn load_run(client: Arc<HttpHostelClient>, names: Vec<String>) -> Vec<HostelId> {
    println!("Creating {} hostels", names.len());
    let start = Instant::now();
    let tasks: Vec<_> = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let client = client.clone();
            tokio::spawn(async move { client.create(&Hostel::new(name, i as i64)).await })
        })
        .collect();

    let mut created = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(Ok(hostel)) => created.push(hostel.id),
            Ok(Err(e)) => eprintln!("Create failed: {}", e),
            Err(e) => eprintln!("Create task panicked: {}", e),
        }
    }
    println!("Created {} hostels in {:?}", created.len(), start.elapsed());
    created
}

async fn verify(client: &dyn HostelApi, created: &[HostelId]) -> anyhow::Result<()> {
    let start = Instant::now();
    let listed: HashSet<HostelId> = client.list().await?.into_iter().map(|h| h.id).collect();
    println!("Listed {} hostels in {:?}", listed.len(), start.elapsed());

    let missing: Vec<&HostelId> = created.iter().filter(|id| !listed.contains(*id)).collect();
    if !missing.is_empty() {
        anyhow::bail!("{} created hostels missing from listing: {:?}", missing.len(), missing);
    }
    println!("All {} created hostels present", created.len());
    Ok(())
}

async fn cleanup(client: &dyn HostelApi, created: &[HostelId]) {
    for id in created {
        if let Err(e) = client.delete(id).await {
            eprintln!("Delete {} failed: {}", id, e);
        }
    }
}
