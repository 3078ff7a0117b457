use std::collections::BTreeMap;

const SEED_DATE: &str = "2024-01-15";
const DIR_PERMISSIONS: &str = "drwxr-xr-x";
const FILE_PERMISSIONS: &str = "-rw-r--r--";
const DIR_SIZE: &str = "4096";

/// Files `cat` can print. Deliberately independent of the directory tree:
/// removing `README.md` with `rm` does not make `cat README.md` fail.
const STATIC_FILES: &[(&str, &str)] = &[
    ("resume.pdf", "PDF file - Yogeshwara B Resume"),
    ("portfolio.html", "Main portfolio HTML file"),
    ("styles.css", "CSS styles for the portfolio"),
    ("script.js", "JavaScript functionality"),
    (
        "README.md",
        "# Yogeshwara B Portfolio\n\nFull-Stack Web Developer & Blockchain Enthusiast\n\n## Skills\n- Frontend: HTML, CSS, JavaScript, React\n- Backend: Node.js, JSP, JDBC\n- Blockchain: Solidity, Web3.js\n- IoT: Arduino, Sensors\n- ML: Python, CNN",
    ),
    (".gitignore", "node_modules/\n.env\n.DS_Store\n*.log"),
    (
        "package.json",
        "{\n  \"name\": \"yogeshwara-portfolio\",\n  \"version\": \"1.0.0\",\n  \"description\": \"Personal portfolio website\",\n  \"main\": \"index.html\"\n}",
    ),
];

pub fn static_file(name: &str) -> Option<&'static str> {
    STATIC_FILES
        .iter()
        .find(|(file_name, _)| *file_name == name)
        .map(|(_, content)| *content)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub permissions: String,
    pub size: String,
    pub date: String,
    pub hidden: bool,
}

impl Entry {
    pub fn directory(name: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Directory,
            permissions: DIR_PERMISSIONS.to_string(),
            size: DIR_SIZE.to_string(),
            date: date.to_string(),
            hidden: false,
        }
    }

    pub fn file(name: &str, size: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
            permissions: FILE_PERMISSIONS.to_string(),
            size: size.to_string(),
            date: date.to_string(),
            hidden: name.starts_with('.'),
        }
    }

    /// Name as `ls` prints it; directories carry a trailing slash.
    pub fn display_name(&self) -> String {
        match self.kind {
            EntryKind::Directory => format!("{}/", self.name),
            EntryKind::File => self.name.clone(),
        }
    }

    pub fn long_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.permissions,
            self.size,
            self.date,
            self.display_name()
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirNode {
    pub dirs: Vec<Entry>,
    pub files: Vec<Entry>,
}

impl DirNode {
    /// Directories first, then files, each in insertion order.
    pub fn entries(&self, include_hidden: bool) -> impl Iterator<Item = &Entry> {
        self.dirs
            .iter()
            .chain(self.files.iter())
            .filter(move |entry| include_hidden || !entry.hidden)
    }
}

/// In-memory tree of display records keyed by absolute path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualFs {
    home: String,
    nodes: BTreeMap<String, DirNode>,
}

impl VirtualFs {
    pub fn seeded(home: &str) -> Self {
        let home = normalize_virtual(home).unwrap_or_else(|| "/".to_string());
        let mut nodes = BTreeMap::new();

        let sections: &[(&str, &[(&str, &str)])] = &[
            (
                "projects",
                &[
                    ("arbinet.md", "5KB"),
                    ("crowdfunding.md", "4KB"),
                    ("bird-classifier.md", "3KB"),
                    ("coffee-system.md", "2KB"),
                    ("vegetation-monitoring.md", "4KB"),
                    ("llm-ner-testing.md", "3KB"),
                ],
            ),
            (
                "skills",
                &[
                    ("frontend.md", "2KB"),
                    ("backend.md", "2KB"),
                    ("blockchain.md", "3KB"),
                    ("iot.md", "2KB"),
                    ("ml.md", "2KB"),
                ],
            ),
            (
                "about",
                &[("bio.md", "1KB"), ("education.md", "1KB"), ("experience.md", "2KB")],
            ),
            (
                "contact",
                &[("email.txt", "100B"), ("github.txt", "100B"), ("linkedin.txt", "100B")],
            ),
            (
                "web3",
                &[("solidity.md", "3KB"), ("uniswap.md", "2KB"), ("ipfs.md", "2KB")],
            ),
        ];

        let root = DirNode {
            dirs: sections
                .iter()
                .map(|(name, _)| Entry::directory(name, SEED_DATE))
                .collect(),
            files: [
                ("resume.pdf", "245KB"),
                ("portfolio.html", "12KB"),
                ("styles.css", "8KB"),
                ("script.js", "15KB"),
                ("README.md", "2KB"),
                (".gitignore", "1KB"),
                ("package.json", "500B"),
            ]
            .iter()
            .map(|(name, size)| Entry::file(name, size, SEED_DATE))
            .collect(),
        };
        nodes.insert(home.clone(), root);

        for (section, files) in sections {
            let node = DirNode {
                dirs: Vec::new(),
                files: files
                    .iter()
                    .map(|(name, size)| Entry::file(name, size, SEED_DATE))
                    .collect(),
            };
            nodes.insert(join_path(&home, section), node);
        }

        Self { home, nodes }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn node(&self, path: &str) -> Option<&DirNode> {
        self.nodes.get(path)
    }

    pub fn node_mut(&mut self, path: &str) -> Option<&mut DirNode> {
        self.nodes.get_mut(path)
    }

    /// Resolves `input` against `current` and returns it only when it names
    /// an existing node.
    pub fn resolve_dir(&self, current: &str, input: &str) -> Option<String> {
        let candidate = resolve_virtual_path(current, input)?;
        self.contains(&candidate).then_some(candidate)
    }

    /// Parent of `current`, if the parent is itself a node. The home
    /// directory has no parent node, which makes it the virtual root.
    pub fn parent_of(&self, current: &str) -> Option<String> {
        let (parent, _) = current.trim_end_matches('/').rsplit_once('/')?;
        let parent = if parent.is_empty() { "/" } else { parent };
        self.contains(parent).then(|| parent.to_string())
    }
}

pub fn normalize_virtual(value: &str) -> Option<String> {
    if value.contains('\0') || !value.starts_with('/') {
        return None;
    }

    let mut parts: Vec<&str> = Vec::new();
    for segment in value.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{}", parts.join("/")))
    }
}

pub fn resolve_virtual_path(current: &str, input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() || input == "." {
        return normalize_virtual(current);
    }
    if input.starts_with('/') {
        return normalize_virtual(input);
    }
    normalize_virtual(&join_path(current, input))
}

fn join_path(base: &str, segment: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{segment}")
    } else {
        format!("{base}/{segment}")
    }
}

/// `~`-relative rendering of `path` used in prompts.
pub fn to_display_path(path: &str, home: &str) -> String {
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home) {
        Some(suffix) if suffix.starts_with('/') => format!("~{suffix}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HOME: &str = "/home/yogeshwara";

    #[test]
    fn normalizes_separators_and_dots() {
        assert_eq!(normalize_virtual("/home//yogeshwara/./projects/"), Some("/home/yogeshwara/projects".into()));
        assert_eq!(normalize_virtual("/home/yogeshwara/projects/.."), Some(HOME.into()));
        assert_eq!(normalize_virtual("/../.."), Some("/".into()));
        assert_eq!(normalize_virtual("relative"), None);
    }

    #[test]
    fn resolves_relative_and_absolute() {
        let fs = VirtualFs::seeded(HOME);
        assert_eq!(fs.resolve_dir(HOME, "projects/"), Some(format!("{HOME}/projects")));
        assert_eq!(
            fs.resolve_dir(&format!("{HOME}/projects"), "../skills"),
            Some(format!("{HOME}/skills"))
        );
        assert_eq!(fs.resolve_dir(HOME, "/home/yogeshwara/web3"), Some(format!("{HOME}/web3")));
        assert_eq!(fs.resolve_dir(HOME, "nowhere"), None);
        assert_eq!(fs.resolve_dir(HOME, "/"), None);
    }

    #[test]
    fn home_is_the_virtual_root() {
        let fs = VirtualFs::seeded(HOME);
        assert_eq!(fs.parent_of(&format!("{HOME}/about")), Some(HOME.to_string()));
        assert_eq!(fs.parent_of(HOME), None);
    }

    #[test]
    fn hidden_entries_are_filtered() {
        let fs = VirtualFs::seeded(HOME);
        let node = fs.node(HOME).unwrap();
        assert!(node.entries(true).any(|entry| entry.name == ".gitignore"));
        assert!(!node.entries(false).any(|entry| entry.name == ".gitignore"));
    }

    #[test]
    fn display_path_is_home_relative() {
        assert_eq!(to_display_path(HOME, HOME), "~");
        assert_eq!(to_display_path(&format!("{HOME}/web3"), HOME), "~/web3");
        assert_eq!(to_display_path("/home/yogeshwara2", HOME), "/home/yogeshwara2");
    }
}
