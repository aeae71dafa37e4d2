use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

mod builtin;
pub mod loader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Technical,
    Behavioral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Technical => write!(f, "technical"),
            QuestionType::Behavioral => write!(f, "behavioral"),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "technical" => Ok(QuestionType::Technical),
            "behavioral" => Ok(QuestionType::Behavioral),
            other => Err(format!("unknown question type '{other}'")),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// A single interview prompt. List order within a domain is the default
/// interview sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    #[serde(alias = "question")]
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(
        id: &str,
        category: &str,
        text: &str,
        question_type: QuestionType,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.to_string(),
            category: category.to_string(),
            text: text.to_string(),
            question_type,
            difficulty,
        }
    }
}

/// Opaque identifiers for the hosted persona. The core never looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaRef {
    pub persona_id: String,
    pub replica_id: String,
    #[serde(alias = "name")]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(alias = "persona")]
    pub persona_ref: PersonaRef,
}

/// Counts shown in the "what to expect" preview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub total: usize,
    pub technical: usize,
    pub behavioral: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

/// Static mapping from domain id to its ordered question list.
///
/// Built once and validated at construction; every accessor afterwards is a
/// pure lookup.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    domains: Vec<Domain>,
    questions: HashMap<String, Vec<Question>>,
}

impl QuestionCatalog {
    pub fn new(
        domains: Vec<Domain>,
        questions: HashMap<String, Vec<Question>>,
    ) -> Result<Self, CatalogError> {
        let mut seen_domains = HashSet::new();
        for domain in &domains {
            if !seen_domains.insert(domain.id.as_str()) {
                return Err(CatalogError::DuplicateDomain(domain.id.clone()));
            }
            if !questions.contains_key(&domain.id) {
                tracing::warn!("Domain '{}' has no questions in the catalog", domain.id);
            }
        }

        for (domain_id, list) in &questions {
            let mut seen_ids = HashSet::new();
            for question in list {
                if question.id.trim().is_empty() {
                    return Err(CatalogError::EmptyField {
                        domain: domain_id.clone(),
                        field: "id",
                    });
                }
                if question.text.trim().is_empty() {
                    return Err(CatalogError::EmptyField {
                        domain: domain_id.clone(),
                        field: "text",
                    });
                }
                if !seen_ids.insert(question.id.as_str()) {
                    return Err(CatalogError::DuplicateQuestion {
                        domain: domain_id.clone(),
                        id: question.id.clone(),
                    });
                }
            }
        }

        Ok(Self { domains, questions })
    }

    /// The compiled-in frontend, backend and data-analyst tracks.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin::domains(), builtin::questions())
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn domain(&self, domain_id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == domain_id)
    }

    /// Returns the question list for `domain_id`, or an empty slice for an
    /// unknown id.
    pub fn lookup(&self, domain_id: &str) -> &[Question] {
        self.questions
            .get(domain_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all(&self) -> &HashMap<String, Vec<Question>> {
        &self.questions
    }
}

pub fn filter_by_type(questions: &[Question], question_type: QuestionType) -> Vec<&Question> {
    questions
        .iter()
        .filter(|q| q.question_type == question_type)
        .collect()
}

pub fn filter_by_difficulty(questions: &[Question], difficulty: Difficulty) -> Vec<&Question> {
    questions
        .iter()
        .filter(|q| q.difficulty == difficulty)
        .collect()
}

pub fn summarize(questions: &[Question]) -> QuestionSummary {
    questions
        .iter()
        .fold(QuestionSummary::default(), |mut summary, q| {
            summary.total += 1;
            match q.question_type {
                QuestionType::Technical => summary.technical += 1,
                QuestionType::Behavioral => summary.behavioral += 1,
            }
            match q.difficulty {
                Difficulty::Easy => summary.easy += 1,
                Difficulty::Medium => summary.medium += 1,
                Difficulty::Hard => summary.hard += 1,
            }
            summary
        })
}

/// First `n` questions, used for the pre-interview preview.
pub fn sample(questions: &[Question], n: usize) -> &[Question] {
    &questions[..n.min(questions.len())]
}
