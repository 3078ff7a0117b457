//! Static portfolio content shared by the page sections and the terminal.

use serde::Serialize;
use std::fmt;

pub const OWNER_NAME: &str = "Yogeshwara B";
pub const OWNER_HANDLE: &str = "yogeshwara";
pub const HOSTNAME: &str = "portfolio";

pub const TAGLINES: &[&str] = &[
    "Web3 Developer",
    "ML Explorer",
    "IoT Innovator",
    "Full-Stack Engineer",
    "Blockchain Enthusiast",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web3,
    Iot,
    Ml,
    Fullstack,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Web3, Category::Iot, Category::Ml, Category::Fullstack];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Web3 => "web3",
            Category::Iot => "iot",
            Category::Ml => "ml",
            Category::Fullstack => "fullstack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Web3 => "Web3",
            Category::Iot => "IoT",
            Category::Ml => "ML",
            Category::Fullstack => "Full-Stack",
        }
    }

    pub fn from_slug(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches('-').to_ascii_lowercase();
        Category::ALL.into_iter().find(|category| category.slug() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Project {
    pub name: &'static str,
    pub summary: &'static str,
    pub categories: &'static [Category],
    pub stack: &'static [&'static str],
}

impl Project {
    pub fn matches(&self, filter: ProjectFilter) -> bool {
        match filter {
            ProjectFilter::All => true,
            ProjectFilter::Only(category) => self.categories.contains(&category),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Only(Category),
}

pub const PROJECTS: &[Project] = &[
    Project {
        name: "ArbiNet – IoT Crypto Arbitrage System",
        summary: "Arduino-driven display that tracks DEX price spreads and flags arbitrage windows.",
        categories: &[Category::Iot, Category::Web3],
        stack: &["Arduino UNO", "Uniswap", "Web3.js"],
    },
    Project {
        name: "Decentralized Crowdfunding DApp",
        summary: "Solidity campaign contracts with an IPFS-hosted React front end.",
        categories: &[Category::Web3, Category::Fullstack],
        stack: &["Solidity", "React", "IPFS"],
    },
    Project {
        name: "Bird Species Classifier",
        summary: "CNN image classifier for regional bird species.",
        categories: &[Category::Ml],
        stack: &["Python", "CNN", "Scikit-learn"],
    },
    Project {
        name: "Coffee Management System",
        summary: "Order and inventory management for a campus coffee shop.",
        categories: &[Category::Fullstack],
        stack: &["JSP", "JDBC", "XAMPP"],
    },
    Project {
        name: "Vegetation Monitoring using AI and Cloud",
        summary: "Satellite imagery pipeline estimating vegetation health on GCP.",
        categories: &[Category::Ml],
        stack: &["Python", "GCP"],
    },
    Project {
        name: "LLM NER Testing",
        summary: "Evaluation harness for named-entity extraction with large language models.",
        categories: &[Category::Ml],
        stack: &["Python"],
    },
];

pub fn projects(filter: ProjectFilter) -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(move |project| project.matches(filter))
}

pub fn whoami_text() -> String {
    [
        OWNER_NAME,
        "Computer Science & Engineering Student",
        "Alvas Institute of Engineering and Technology",
        "Specializing in Full-Stack Web Development, Blockchain/Web3, IoT, and Machine Learning",
    ]
    .join("\n")
}

pub fn skills_text() -> String {
    [
        "Technical Skills:",
        "Frontend: HTML, CSS, JavaScript, React",
        "Backend: Node.js, JSP, JDBC",
        "Blockchain: Solidity, Uniswap, Web3.js, IPFS",
        "IoT: Arduino UNO, LCD, Sensors",
        "Machine Learning: Python, CNN, Scikit-learn",
        "Tools: GitHub, GCP, XAMPP, VS Code, Maven",
    ]
    .join("\n")
}

pub fn about_text() -> String {
    [
        format!("About {OWNER_NAME}:"),
        "• Computer Science & Engineering Student".to_string(),
        "• Passionate about Web3, IoT, and ML".to_string(),
        "• Participated in Virsat Fest".to_string(),
        "• International Jamboree attendee".to_string(),
        "• Rover & Rangers member".to_string(),
        "• Building secure, smart, and decentralized systems".to_string(),
    ]
    .join("\n")
}

pub fn contact_text() -> String {
    [
        "Contact Information:",
        "• Email: yogeshwara@example.com",
        "• GitHub: github.com/yogeshwara",
        "• LinkedIn: linkedin.com/in/yogeshwara",
        "• ENS: yogeshwara.eth",
        "• Location: Karnataka, India",
    ]
    .join("\n")
}

pub const TECH_STACK: &str = "\
🛠️ Tech Stack:

Frontend:
├── HTML5
├── CSS3 (Custom Properties, Grid, Flexbox)
├── JavaScript (ES6+, Async/Await)
└── React.js

Backend:
├── Node.js
├── JSP (JavaServer Pages)
└── JDBC (Java Database Connectivity)

Blockchain:
├── Solidity (Smart Contracts)
├── Web3.js
├── Uniswap Protocol
└── IPFS (InterPlanetary File System)

IoT:
├── Arduino UNO
├── LCD Display
└── Various Sensors

Machine Learning:
├── Python
├── CNN (Convolutional Neural Networks)
└── Scikit-learn

Tools & Platforms:
├── GitHub
├── Google Cloud Platform
├── XAMPP
├── VS Code
└── Maven";

/// Published next to the page when a real resume exists.
pub const RESUME_PDF: &str = "Yogeshwara-resume.pdf";
pub const RESUME_FILE_NAME: &str = "Yogeshwara_B_Resume.txt";

/// Plain-text resume offered when no PDF is published alongside the site.
pub fn text_resume() -> String {
    let mut lines = vec![
        format!("{OWNER_NAME} - Resume"),
        String::new(),
        "Computer Science & Engineering".to_string(),
        "Alvas Institute of Engineering and Technology".to_string(),
        String::new(),
        "Skills: Full-Stack Web Development, Blockchain/Web3, IoT, Machine Learning".to_string(),
        String::new(),
        "Projects:".to_string(),
    ];
    lines.extend(PROJECTS.iter().map(|project| format!("- {}", project.name)));
    lines.extend([
        String::new(),
        "Contact: yogeshwara567@gmail.com".to_string(),
        "LinkedIn: https://www.linkedin.com/in/yogeshwara7/".to_string(),
        "GitHub: https://github.com/Yogeshwara7".to_string(),
    ]);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_slugs_accept_flag_form() {
        assert_eq!(Category::from_slug("--web3"), Some(Category::Web3));
        assert_eq!(Category::from_slug("IOT"), Some(Category::Iot));
        assert_eq!(Category::from_slug("--rust"), None);
    }

    #[test]
    fn filter_narrows_projects() {
        let ml: Vec<&str> = projects(ProjectFilter::Only(Category::Ml)).map(|p| p.name).collect();
        assert_eq!(
            ml,
            vec![
                "Bird Species Classifier",
                "Vegetation Monitoring using AI and Cloud",
                "LLM NER Testing",
            ]
        );
        assert_eq!(projects(ProjectFilter::All).count(), PROJECTS.len());
    }

    #[test]
    fn resume_lists_every_project() {
        let resume = text_resume();
        for project in PROJECTS {
            assert!(resume.contains(project.name), "missing {}", project.name);
        }
    }
}
