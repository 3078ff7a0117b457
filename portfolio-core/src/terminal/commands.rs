use std::time::Duration;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::calc;
use super::fs::{static_file, Entry};
use super::{CommandOutcome, Terminal, TerminalEffect};
use crate::profile::{self, Category, ProjectFilter};

pub const MATRIX_DURATION: Duration = Duration::from_secs(5);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT[offset_hour sign:mandatory][offset_minute]"
);
const ENTRY_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Whoami,
    Skills,
    Projects,
    About,
    Contact,
    Clear,
    Date,
    Crypto,
    Gas,
    Hash,
    Matrix,
    Hack,
    Ls,
    Cd,
    Pwd,
    Mkdir,
    Rm,
    Cat,
    Echo,
    Ping,
    Calc,
    History,
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub command: Command,
}

const fn spec(name: &'static str, usage: &'static str, summary: &'static str, command: Command) -> CommandSpec {
    CommandSpec {
        name,
        usage,
        summary,
        command,
    }
}

pub const COMMAND_TABLE: &[CommandSpec] = &[
    spec("help", "help", "Show this help message", Command::Help),
    spec("whoami", "whoami", "Display user information", Command::Whoami),
    spec("skills", "skills", "Show technical skills", Command::Skills),
    spec("projects", "projects [--web3|--iot|--ml|--fullstack]", "List projects", Command::Projects),
    spec("about", "about", "About me", Command::About),
    spec("contact", "contact", "Contact information", Command::Contact),
    spec("clear", "clear", "Clear terminal", Command::Clear),
    spec("date", "date", "Current date/time", Command::Date),
    spec("crypto", "crypto", "Live crypto prices", Command::Crypto),
    spec("gas", "gas", "Ethereum gas tracker", Command::Gas),
    spec("hash", "hash <text>", "Generate hash", Command::Hash),
    spec("matrix", "matrix", "Enable matrix mode", Command::Matrix),
    spec("hack", "hack", "Enter hacker mode", Command::Hack),
    spec("ls", "ls [-a|-l]", "List files and directories", Command::Ls),
    spec("cd", "cd <dir>", "Change directory", Command::Cd),
    spec("pwd", "pwd", "Print working directory", Command::Pwd),
    spec("mkdir", "mkdir <dir>", "Create directory", Command::Mkdir),
    spec("rm", "rm <file>", "Remove file", Command::Rm),
    spec("cat", "cat <file>", "Read file content", Command::Cat),
    spec("echo", "echo <text>", "Echo text", Command::Echo),
    spec("ping", "ping", "Test connection", Command::Ping),
    spec("calc", "calc <expression>", "Calculator", Command::Calc),
    spec("history", "history", "Show command history", Command::History),
];

pub fn lookup(token: &str) -> Option<Command> {
    let token = token.to_lowercase();
    COMMAND_TABLE
        .iter()
        .find(|entry| entry.name == token)
        .map(|entry| entry.command)
}

pub fn supported_commands() -> impl Iterator<Item = &'static str> {
    COMMAND_TABLE.iter().map(|entry| entry.name)
}

pub fn help_text() -> String {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        COMMAND_TABLE
            .iter()
            .map(|entry| format!("• {} - {}", entry.usage, entry.summary)),
    );
    lines.join("\n")
}

/// Java-style string hash: `h = 31 * h + unit` over UTF-16 code units with
/// 32-bit wraparound. Not a cryptographic digest.
pub fn rolling_hash(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("{:08x}", i64::from(hash).abs())
}

pub(super) fn dispatch(terminal: &mut Terminal, command: Command, args: &str) -> CommandOutcome {
    match command {
        Command::Help => CommandOutcome::text(help_text()),
        Command::Whoami => CommandOutcome::text(profile::whoami_text()),
        Command::Skills => CommandOutcome::text(profile::skills_text()),
        Command::Projects => handle_projects(args),
        Command::About => CommandOutcome::text(profile::about_text()),
        Command::Contact => CommandOutcome::text(profile::contact_text()),
        Command::Clear => CommandOutcome::effect_only(TerminalEffect::Clear),
        Command::Date => match (terminal.clock)().format(DATE_FORMAT) {
            Ok(formatted) => CommandOutcome::text(formatted),
            Err(error) => CommandOutcome::error(format!("date: {error}")),
        },
        Command::Crypto => CommandOutcome::text(
            [
                "Live Crypto Prices (Demo):",
                "• ETH: $2,847.32 (+2.4%)",
                "• BTC: $43,156.78 (+1.8%)",
                "• MATIC: $0.89 (+5.2%)",
                "• USDT: $1.00 (stable)",
            ]
            .join("\n"),
        ),
        Command::Gas => CommandOutcome::text(
            [
                "Ethereum Gas Tracker:",
                "• Slow: 15 gwei ($2.34)",
                "• Standard: 25 gwei ($3.90)",
                "• Fast: 35 gwei ($5.46)",
                "• Instant: 50 gwei ($7.80)",
            ]
            .join("\n"),
        ),
        Command::Hash => {
            if args.is_empty() {
                return CommandOutcome::text("Usage: hash <text>");
            }
            CommandOutcome::text(format!("Hash: {}", rolling_hash(args)))
        }
        Command::Matrix => CommandOutcome::text("Matrix mode activated for 5 seconds...").with_effect(
            TerminalEffect::Matrix {
                duration: MATRIX_DURATION,
            },
        ),
        Command::Hack => {
            terminal.hacker_mode = !terminal.hacker_mode;
            let message = if terminal.hacker_mode {
                "Hacker mode activated!"
            } else {
                "Hacker mode deactivated!"
            };
            CommandOutcome::text(message).with_effect(TerminalEffect::HackerMode(terminal.hacker_mode))
        }
        Command::Ls => handle_ls(terminal, args),
        Command::Cd => handle_cd(terminal, args),
        Command::Pwd => CommandOutcome::text(terminal.cwd.clone()),
        Command::Mkdir => handle_mkdir(terminal, args),
        Command::Rm => handle_rm(terminal, args),
        Command::Cat => {
            if args.is_empty() {
                return CommandOutcome::text("Usage: cat <filename>");
            }
            match static_file(args) {
                Some(content) => CommandOutcome::text(content),
                None => CommandOutcome::error(format!("File '{args}' not found")),
            }
        }
        Command::Echo => {
            if args.is_empty() {
                CommandOutcome::text("Usage: echo <text>")
            } else {
                CommandOutcome::text(args)
            }
        }
        Command::Ping => CommandOutcome::text("PONG! Connection successful."),
        Command::Calc => {
            if args.is_empty() {
                return CommandOutcome::text("Usage: calc <expression>");
            }
            match calc::evaluate(args) {
                Ok(value) => CommandOutcome::text(format!("Result: {value}")),
                Err(error) => {
                    tracing::debug!(%error, "terminal.calc_rejected");
                    CommandOutcome::error("Invalid expression")
                }
            }
        }
        Command::History => {
            if terminal.history.is_empty() {
                return CommandOutcome::text("No command history");
            }
            CommandOutcome::text(
                terminal
                    .history
                    .iter()
                    .enumerate()
                    .map(|(index, line)| format!("{}  {line}", index + 1))
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        }
    }
}

fn handle_projects(args: &str) -> CommandOutcome {
    if args.is_empty() {
        let mut lines = vec!["Featured Projects:".to_string()];
        lines.extend(
            profile::projects(ProjectFilter::All)
                .enumerate()
                .map(|(index, project)| format!("{}. {}", index + 1, project.name)),
        );
        lines.push(String::new());
        lines.extend(
            Category::ALL
                .iter()
                .map(|category| format!("Type 'projects --{}' for {category} projects", category.slug())),
        );
        return CommandOutcome::text(lines.join("\n"));
    }

    let Some(category) = Category::from_slug(args) else {
        return CommandOutcome::error(format!(
            "Unknown category '{args}'. Try one of: --web3 --iot --ml --fullstack"
        ));
    };
    let mut lines = vec![format!("{category} Projects:")];
    lines.extend(
        profile::projects(ProjectFilter::Only(category))
            .enumerate()
            .map(|(index, project)| {
                format!("{}. {} [{}]", index + 1, project.name, project.stack.join(", "))
            }),
    );
    CommandOutcome::text(lines.join("\n"))
}

fn handle_ls(terminal: &Terminal, args: &str) -> CommandOutcome {
    let flags: String = args
        .split_whitespace()
        .filter_map(|arg| arg.strip_prefix('-'))
        .collect();
    let show_all = flags.contains('a');
    let long_format = flags.contains('l');

    let Some(node) = terminal.fs.node(&terminal.cwd) else {
        return CommandOutcome::error(format!("ls: cannot access '{}'", terminal.cwd));
    };

    let header = match (long_format, show_all) {
        (true, true) => "Detailed directory listing (including hidden):",
        (true, false) => "Detailed directory listing:",
        (false, true) => "Directory listing (including hidden):",
        (false, false) => "Directory listing:",
    };
    let mut lines = vec![header.to_string()];
    lines.extend(node.entries(show_all).map(|entry| {
        if long_format {
            entry.long_line()
        } else {
            entry.display_name()
        }
    }));
    CommandOutcome::text(lines.join("\n"))
}

fn handle_cd(terminal: &mut Terminal, args: &str) -> CommandOutcome {
    match args {
        "" | "~" => {
            terminal.cwd = terminal.fs.home().to_string();
            CommandOutcome::text("Changed to home directory")
        }
        ".." => match terminal.fs.parent_of(&terminal.cwd) {
            Some(parent) => {
                terminal.cwd = parent;
                CommandOutcome::text("Changed to parent directory")
            }
            None => CommandOutcome::error("Cannot go up from root"),
        },
        target => match terminal.fs.resolve_dir(&terminal.cwd, target) {
            Some(resolved) => {
                terminal.cwd = resolved;
                CommandOutcome::text(format!("Changed to {target}"))
            }
            None => CommandOutcome::error(format!("Directory '{target}' not found")),
        },
    }
}

fn handle_mkdir(terminal: &mut Terminal, args: &str) -> CommandOutcome {
    if args.is_empty() {
        return CommandOutcome::text("Usage: mkdir <directory_name>");
    }
    let date = (terminal.clock)()
        .format(ENTRY_DATE_FORMAT)
        .unwrap_or_default();
    let cwd = terminal.cwd.clone();
    match terminal.fs.node_mut(&cwd) {
        Some(node) => {
            node.dirs.push(Entry::directory(args, &date));
            CommandOutcome::text(format!("Created directory '{args}'"))
        }
        None => CommandOutcome::error(format!("mkdir: cannot create directory '{args}'")),
    }
}

fn handle_rm(terminal: &mut Terminal, args: &str) -> CommandOutcome {
    if args.is_empty() {
        return CommandOutcome::text("Usage: rm <filename>");
    }
    let cwd = terminal.cwd.clone();
    let Some(node) = terminal.fs.node_mut(&cwd) else {
        return CommandOutcome::error(format!("File '{args}' not found"));
    };
    match node.files.iter().position(|entry| entry.name == args) {
        Some(index) => {
            node.files.remove(index);
            CommandOutcome::text(format!("Removed '{args}'"))
        }
        None => CommandOutcome::error(format!("File '{args}' not found")),
    }
}
