// Commands understood by the interactive shell.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Get(String),
    Create { rooms: i64, name: String },
    Update { id: String, rooms: i64, name: String },
    Delete(String),
    Help,
    Quit,
}

pub const HELP: &str = "Available commands:
  list                         - List every hostel
  get <id>                     - Show one hostel
  create <rooms> <name...>     - Register a hostel
  update <id> <rooms> <name...> - Replace a hostel (renaming changes its id)
  delete <id>                  - Remove a hostel
  help                         - Show this message
  quit                         - Exit the client";

/// Parses one input line. The error is a usage message for the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["list"] => Ok(Command::List),
        ["get", id] => Ok(Command::Get(id.to_string())),
        ["get", ..] => Err("Usage: get <id>".into()),
        ["create", rooms, name @ ..] if !name.is_empty() => Ok(Command::Create {
            rooms: parse_rooms(rooms)?,
            name: name.join(" "),
        }),
        ["create", ..] => Err("Usage: create <rooms> <name...>".into()),
        ["update", id, rooms, name @ ..] if !name.is_empty() => Ok(Command::Update {
            id: id.to_string(),
            rooms: parse_rooms(rooms)?,
            name: name.join(" "),
        }),
        ["update", ..] => Err("Usage: update <id> <rooms> <name...>".into()),
        ["delete", id] => Ok(Command::Delete(id.to_string())),
        ["delete", ..] => Err("Usage: delete <id>".into()),
        ["help"] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),
        _ => Err(format!("Unknown command: '{}'", line.trim())),
    }
}

fn parse_rooms(rooms: &str) -> Result<i64, String> {
    rooms
        .parse()
        .map_err(|_| format!("Invalid number of rooms: '{}'", rooms))
}
