use clap::{App, Arg};
use hostelites_client::client_api::{Hostel, HostelApi};
use hostelites_client::command::{parse_command, Command, HELP};
use hostelites_client::hostel_client::HttpHostelClient;
use tokio::io::{self, AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let matches = App::new("Hostelites Client")
        .version("0.1")
        .about("Talks to a hostelites server")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .takes_value(true)
                .help("Server address (IP:Port or base url)"),
        )
        .get_matches();

    let server = matches.value_of("server").unwrap_or("127.0.0.1:8080");
    let client = HttpHostelClient::new(server);

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    println!("Hostelites Client ({})", client.base_url());
    println!("Type 'help' for a list of commands");

    while reader.read_line(&mut line).await? > 0 {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(command) => run(&client, command).await,
            Err(usage) => eprintln!("{}", usage),
        }
        line.clear();
    }

    Ok(())
}

async fn run(client: &dyn HostelApi, command: Command) {
    let result = match command {
        Command::List => client.list().await.map(|hostels| {
            for hostel in hostels {
                print_hostel(&hostel);
            }
        }),
        Command::Get(id) => client.get(&id).await.map(|hostel| print_hostel(&hostel)),
        Command::Create { rooms, name } => client
            .create(&Hostel::new(name, rooms))
            .await
            .map(|hostel| print_hostel(&hostel)),
        Command::Update { id, rooms, name } => client
            .update(&id, &Hostel::new(name, rooms))
            .await
            .map(|hostel| print_hostel(&hostel)),
        Command::Delete(id) => client.delete(&id).await.map(|_| println!("Deleted {}", id)),
        Command::Help | Command::Quit => Ok(()),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }
}

fn print_hostel(hostel: &Hostel) {
    println!(
        "{:<12} {:<30} rooms={:<5} founded={}",
        hostel.id,
        hostel.name,
        hostel.num_of_rooms,
        hostel.date_of_origin.to_rfc3339()
    );
}
