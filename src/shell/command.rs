/*!
 * Shell Commands
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Alloc,
    Free,
    Show,
    Map,
    Stats,
    Dump,
    Help,
    Exit,
    Unknown(String),
}

impl Command {
    /// Every recognised command, in help order
    pub const ALL: [Command; 8] = [
        Command::Alloc,
        Command::Free,
        Command::Show,
        Command::Map,
        Command::Stats,
        Command::Dump,
        Command::Help,
        Command::Exit,
    ];

    pub fn parse(token: &str) -> Self {
        match token {
            "alloc" => Command::Alloc,
            "free" => Command::Free,
            "show" => Command::Show,
            "map" => Command::Map,
            "stats" => Command::Stats,
            "dump" => Command::Dump,
            "help" => Command::Help,
            "exit" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Alloc => "alloc",
            Command::Free => "free",
            Command::Show => "show",
            Command::Map => "map",
            Command::Stats => "stats",
            Command::Dump => "dump",
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Unknown(_) => "unknown",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Command::Alloc => "allocate memory",
            Command::Free => "free memory",
            Command::Show => "show memory table",
            Command::Map => "ASCII memory map",
            Command::Stats => "usage statistics",
            Command::Dump => "memory table as JSON",
            Command::Help => "list commands",
            Command::Exit => "quit",
            Command::Unknown(_) => "",
        }
    }
}
