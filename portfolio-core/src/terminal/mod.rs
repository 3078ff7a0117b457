//! The portfolio's interactive terminal: a fixed command table over a small
//! in-memory filesystem, with shell-style history recall.

pub mod calc;
pub mod commands;
pub mod fs;

use std::time::Duration;

use time::OffsetDateTime;

pub use commands::{help_text, lookup, rolling_hash, supported_commands, Command, CommandSpec, COMMAND_TABLE};
pub use fs::{to_display_path, VirtualFs};

use crate::profile::{HOSTNAME, OWNER_HANDLE};

pub type Clock = fn() -> OffsetDateTime;

/// Visual side effect a command asks the view to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalEffect {
    Clear,
    Matrix { duration: Duration },
    HackerMode(bool),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: Option<String>,
    pub effect: Option<TerminalEffect>,
    pub error: bool,
}

impl CommandOutcome {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            effect: None,
            error: true,
        }
    }

    pub fn effect_only(effect: TerminalEffect) -> Self {
        Self {
            effect: Some(effect),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect: TerminalEffect) -> Self {
        self.effect = Some(effect);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Terminal {
    fs: VirtualFs,
    cwd: String,
    history: Vec<String>,
    cursor: usize,
    hacker_mode: bool,
    clock: Clock,
}

impl Terminal {
    pub fn new(home: &str) -> Self {
        Self::with_clock(home, OffsetDateTime::now_utc)
    }

    pub fn with_clock(home: &str, clock: Clock) -> Self {
        let fs = VirtualFs::seeded(home);
        let cwd = fs.home().to_string();
        Self {
            fs,
            cwd,
            history: Vec::new(),
            cursor: 0,
            hacker_mode: false,
            clock,
        }
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn hacker_mode(&self) -> bool {
        self.hacker_mode
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    /// `yogeshwara@portfolio:/home/yogeshwara$`
    pub fn prompt_label(&self) -> String {
        format!("{OWNER_HANDLE}@{HOSTNAME}:{}$", self.cwd)
    }

    pub fn display_cwd(&self) -> String {
        to_display_path(&self.cwd, self.fs.home())
    }

    /// Runs one input line. The line is recorded in history before dispatch so
    /// that `history` lists itself; blank input is neither run nor recorded.
    pub fn execute(&mut self, line: &str) -> CommandOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return CommandOutcome::default();
        }

        self.history.push(trimmed.to_string());
        self.cursor = self.history.len();

        let (token, args) = match trimmed.split_once(char::is_whitespace) {
            Some((token, rest)) => (token, rest.trim_start()),
            None => (trimmed, ""),
        };

        let Some(command) = lookup(token) else {
            tracing::debug!(token, "terminal.unknown_command");
            return CommandOutcome::error(format!(
                "Command '{token}' not found. Type 'help' for available commands."
            ));
        };

        tracing::debug!(?command, cwd = %self.cwd, "terminal.execute");
        commands::dispatch(self, command, args)
    }

    /// Arrow-up: steps back through history. Returns `None` at the oldest entry.
    pub fn recall_previous(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.history.get(self.cursor).map(String::as_str)
    }

    /// Arrow-down: steps forward. Past the newest entry the cursor parks at
    /// `history.len()` and the input is cleared (empty string).
    pub fn recall_next(&mut self) -> &str {
        if self.cursor + 1 < self.history.len() {
            self.cursor += 1;
            &self.history[self.cursor]
        } else {
            self.cursor = self.history.len();
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    const HOME: &str = "/home/yogeshwara";

    fn fixed_clock() -> OffsetDateTime {
        datetime!(2024-03-09 14:05:07 UTC)
    }

    fn terminal() -> Terminal {
        Terminal::with_clock(HOME, fixed_clock)
    }

    fn output(outcome: CommandOutcome) -> String {
        outcome.output.unwrap_or_default()
    }

    #[test]
    fn unknown_command_echoes_exact_token() {
        let mut term = terminal();
        let outcome = term.execute("FooBar --x");
        assert!(outcome.error);
        assert_eq!(
            output(outcome),
            "Command 'FooBar' not found. Type 'help' for available commands."
        );
    }

    #[test]
    fn commands_are_case_insensitive() {
        let mut term = terminal();
        assert_eq!(output(term.execute("PWD")), HOME);
        assert_eq!(output(term.execute("  Ping  ")), "PONG! Connection successful.");
    }

    #[test]
    fn remainder_is_kept_verbatim() {
        let mut term = terminal();
        assert_eq!(output(term.execute("echo  hello   there")), "hello   there");
        assert_eq!(output(term.execute("echo")), "Usage: echo <text>");
    }

    #[test]
    fn repeated_cd_up_stops_at_home() {
        let mut term = terminal();
        assert_eq!(output(term.execute("cd projects")), "Changed to projects");
        assert_eq!(term.cwd(), "/home/yogeshwara/projects");
        assert_eq!(output(term.execute("cd ..")), "Changed to parent directory");
        for _ in 0..5 {
            let outcome = term.execute("cd ..");
            assert_eq!(output(outcome), "Cannot go up from root");
            assert_eq!(term.cwd(), HOME);
        }
        assert!(term.cwd().split('/').filter(|s| !s.is_empty()).count() >= 1);
    }

    #[test]
    fn cd_home_forms_and_missing_targets() {
        let mut term = terminal();
        term.execute("cd web3");
        assert_eq!(output(term.execute("cd")), "Changed to home directory");
        assert_eq!(term.cwd(), HOME);
        term.execute("cd /home/yogeshwara/about");
        assert_eq!(term.display_cwd(), "~/about");
        assert_eq!(output(term.execute("cd ~")), "Changed to home directory");
        let outcome = term.execute("cd nowhere");
        assert!(outcome.error);
        assert_eq!(output(outcome), "Directory 'nowhere' not found");
        assert_eq!(term.cwd(), HOME);
    }

    #[test]
    fn mkdir_does_not_create_an_enterable_node() {
        let mut term = terminal();
        assert_eq!(output(term.execute("mkdir foo")), "Created directory 'foo'");
        assert!(output(term.execute("ls")).contains("foo/"));
        assert!(output(term.execute("ls -l")).contains("drwxr-xr-x 4096 2024-03-09 foo/"));
        let outcome = term.execute("cd foo");
        assert_eq!(output(outcome), "Directory 'foo' not found");
        assert_eq!(term.cwd(), HOME);
        assert_eq!(output(term.execute("mkdir")), "Usage: mkdir <directory_name>");
    }

    #[test]
    fn cat_ignores_filesystem_mutations() {
        let mut term = terminal();
        let before = output(term.execute("cat README.md"));
        assert_eq!(output(term.execute("rm README.md")), "Removed 'README.md'");
        assert!(!output(term.execute("ls")).contains("README.md"));
        assert_eq!(output(term.execute("cat README.md")), before);
        assert_eq!(output(term.execute("rm README.md")), "File 'README.md' not found");
        assert_eq!(output(term.execute("cat nope.txt")), "File 'nope.txt' not found");
    }

    #[test]
    fn rm_never_touches_directories() {
        let mut term = terminal();
        assert_eq!(output(term.execute("rm projects")), "File 'projects' not found");
        assert_eq!(output(term.execute("cd projects")), "Changed to projects");
    }

    #[test]
    fn ls_orders_directories_before_files_and_hides_dotfiles() {
        let mut term = terminal();
        let listing = output(term.execute("ls"));
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Directory listing:");
        assert_eq!(lines[1], "projects/");
        assert_eq!(lines[6], "resume.pdf");
        assert!(!listing.contains(".gitignore"));

        let hidden = output(term.execute("ls -a"));
        assert!(hidden.starts_with("Directory listing (including hidden):"));
        assert!(hidden.contains(".gitignore"));

        let long = output(term.execute("ls -la"));
        assert!(long.starts_with("Detailed directory listing (including hidden):"));
        assert!(long.contains("-rw-r--r-- 1KB 2024-01-15 .gitignore"));
        assert!(long.contains("drwxr-xr-x 4096 2024-01-15 projects/"));
    }

    #[test]
    fn calc_reports_results_and_rejects_infinity() {
        let mut term = terminal();
        assert!(output(term.execute("calc 2+2")).contains('4'));
        assert_eq!(output(term.execute("calc 7/2")), "Result: 3.5");
        assert_eq!(output(term.execute("calc 1/0")), "Invalid expression");
        assert_eq!(output(term.execute("calc 2+")), "Invalid expression");
        assert_eq!(output(term.execute("calc")), "Usage: calc <expression>");
        let nested = format!("calc {}1{}", "(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(output(term.execute(&nested)), "Invalid expression");
        assert_eq!(output(term.execute("calc -3--2")), "Invalid expression");
    }

    #[test]
    fn history_lists_itself_and_failures() {
        let mut term = terminal();
        assert_eq!(output(term.execute("history")), "1  history");
        term.execute("bogus");
        term.execute("   ");
        assert_eq!(output(term.execute("history")), "1  history\n2  bogus\n3  history");
    }

    #[test]
    fn arrow_recall_walks_history() {
        let mut term = terminal();
        term.execute("whoami");
        term.execute("pwd");
        term.execute("ls");
        assert_eq!(term.cursor(), 3);

        assert_eq!(term.recall_previous(), Some("ls"));
        assert_eq!(term.recall_previous(), Some("pwd"));
        assert_eq!(term.recall_previous(), Some("whoami"));
        assert_eq!(term.recall_previous(), None);
        assert_eq!(term.cursor(), 0);

        assert_eq!(term.recall_next(), "pwd");
        assert_eq!(term.recall_next(), "ls");
        assert_eq!(term.recall_next(), "");
        assert_eq!(term.cursor(), 3);
        assert_eq!(term.recall_next(), "");
        assert!(term.cursor() <= term.history().len());
    }

    #[test]
    fn effects_for_clear_matrix_and_hack() {
        let mut term = terminal();
        assert_eq!(term.execute("clear"), CommandOutcome::effect_only(TerminalEffect::Clear));

        let matrix = term.execute("matrix");
        assert_eq!(
            matrix.effect,
            Some(TerminalEffect::Matrix {
                duration: Duration::from_secs(5)
            })
        );

        let on = term.execute("hack");
        assert_eq!(output(on.clone()), "Hacker mode activated!");
        assert_eq!(on.effect, Some(TerminalEffect::HackerMode(true)));
        let off = term.execute("HACK");
        assert_eq!(off.effect, Some(TerminalEffect::HackerMode(false)));
        assert!(!term.hacker_mode());
    }

    #[test]
    fn date_uses_injected_clock() {
        let mut term = terminal();
        assert_eq!(output(term.execute("date")), "Sat Mar 09 2024 14:05:07 GMT+0000");
    }

    #[test]
    fn hash_and_projects() {
        let mut term = terminal();
        assert_eq!(output(term.execute("hash hello")), "Hash: 05e918d2");
        assert_eq!(output(term.execute("hash")), "Usage: hash <text>");

        let web3 = output(term.execute("projects --web3"));
        assert!(web3.starts_with("Web3 Projects:"));
        assert!(web3.contains("Decentralized Crowdfunding DApp"));
        assert!(!web3.contains("Bird Species Classifier"));

        let all = output(term.execute("projects"));
        assert!(all.contains("6. LLM NER Testing"));
        assert!(term.execute("projects --rust").error);
    }

    #[test]
    fn prompt_shows_full_path() {
        let mut term = terminal();
        term.execute("cd skills");
        assert_eq!(term.prompt_label(), "yogeshwara@portfolio:/home/yogeshwara/skills$");
    }
}
