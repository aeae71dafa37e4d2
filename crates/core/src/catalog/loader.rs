use super::{Domain, Question, QuestionCatalog};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk shape of one domain file.
#[derive(Debug, Deserialize)]
pub struct DomainFile {
    pub domain: Domain,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Builds a catalog from every `*.json` file in `dir_path`, one domain per file.
///
/// Domains are ordered by file name so the listing is stable across platforms.
pub fn load_catalog(dir_path: &Path) -> Result<QuestionCatalog> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read catalog directory: {}", dir_path.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut domains = Vec::with_capacity(paths.len());
    let mut questions = HashMap::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let file: DomainFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;

        tracing::debug!(
            "Loaded domain '{}' with {} questions from {}",
            file.domain.id,
            file.questions.len(),
            path.display()
        );
        questions.insert(file.domain.id.clone(), file.questions);
        domains.push(file.domain);
    }

    QuestionCatalog::new(domains, questions)
        .with_context(|| format!("Invalid catalog in {}", dir_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const DEVOPS: &str = r#"{
        "domain": {
            "id": "devops",
            "title": "DevOps Engineer",
            "description": "CI/CD, containers, and observability",
            "duration": "30 min",
            "persona": { "persona_id": "p1", "replica_id": "r1", "name": "Sam Reed" }
        },
        "questions": [
            { "id": "do-1", "category": "Containers", "question": "What is a container image?", "type": "technical", "difficulty": "easy" },
            { "id": "do-2", "category": "Incidents", "text": "Describe an outage you handled.", "type": "behavioral", "difficulty": "hard" }
        ]
    }"#;

    #[test]
    fn test_load_catalog_successfully() -> Result<()> {
        let dir = tempdir()?;
        let dir_path = dir.path();

        let mut file = File::create(dir_path.join("devops.json"))?;
        write!(file, "{DEVOPS}")?;

        // Ignored: wrong extension and a subdirectory.
        let mut notes = File::create(dir_path.join("notes.txt"))?;
        writeln!(notes, "not a domain")?;
        std::fs::create_dir(dir_path.join("drafts"))?;

        let catalog = load_catalog(dir_path)?;

        assert_eq!(catalog.domains().len(), 1);
        let domain = catalog.domain("devops").expect("devops should be loaded");
        assert_eq!(domain.persona_ref.display_name, "Sam Reed");
        let questions = catalog.lookup("devops");
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].text, "Describe an outage you handled.");
        Ok(())
    }

    #[test]
    fn test_load_catalog_from_nonexistent_dir() {
        let result = load_catalog(Path::new("nonexistent_dir_for_testing_catalog"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_catalog_rejects_malformed_file() -> Result<()> {
        let dir = tempdir()?;
        let mut file = File::create(dir.path().join("broken.json"))?;
        writeln!(file, "{{ \"domain\": 42 }}")?;

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
        Ok(())
    }

    #[test]
    fn test_load_catalog_rejects_duplicate_ids() -> Result<()> {
        let dir = tempdir()?;
        let duplicated = DEVOPS.replace("\"do-2\"", "\"do-1\"");
        let mut file = File::create(dir.path().join("devops.json"))?;
        write!(file, "{duplicated}")?;

        assert!(load_catalog(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_load_catalog_from_empty_dir() -> Result<()> {
        let dir = tempdir()?;
        let catalog = load_catalog(dir.path())?;
        assert!(catalog.domains().is_empty());
        assert!(catalog.all().is_empty());
        Ok(())
    }
}
