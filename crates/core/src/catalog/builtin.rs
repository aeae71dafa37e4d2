use super::{Difficulty, Domain, PersonaRef, Question, QuestionType};
use std::collections::HashMap;

use Difficulty::{Easy, Hard, Medium};
use QuestionType::{Behavioral, Technical};

type Row = (&'static str, &'static str, &'static str, QuestionType, Difficulty);

fn persona(persona_id: &str, replica_id: &str, display_name: &str) -> PersonaRef {
    PersonaRef {
        persona_id: persona_id.to_string(),
        replica_id: replica_id.to_string(),
        display_name: display_name.to_string(),
    }
}

pub(super) fn domains() -> Vec<Domain> {
    vec![
        Domain {
            id: "frontend".to_string(),
            title: "Frontend Developer".to_string(),
            description: "React, JavaScript, CSS, and UI/UX skills assessment".to_string(),
            duration: "45-60 min".to_string(),
            persona_ref: persona("p3f85b2723cc", "re0eae1fbe11", "Claire Dalton"),
        },
        Domain {
            id: "backend".to_string(),
            title: "Backend Developer".to_string(),
            description: "APIs, databases, server architecture, and scalability".to_string(),
            duration: "45-60 min".to_string(),
            persona_ref: persona("p87da90823bb", "r4dcf31b60e1", "Evelyn Cross"),
        },
        Domain {
            id: "data-analyst".to_string(),
            title: "Data Analyst".to_string(),
            description: "SQL, data visualization, statistics, and insights".to_string(),
            duration: "45-60 min".to_string(),
            persona_ref: persona("p2e3bf82d71f", "re10607e3db7", "Eric Thompson"),
        },
    ]
}

pub(super) fn questions() -> HashMap<String, Vec<Question>> {
    [
        ("frontend", FRONTEND),
        ("backend", BACKEND),
        ("data-analyst", DATA_ANALYST),
    ]
    .into_iter()
    .map(|(domain, rows)| (domain.to_string(), rows.iter().map(to_question).collect()))
    .collect()
}

fn to_question(&(id, category, text, question_type, difficulty): &Row) -> Question {
    Question::new(id, category, text, question_type, difficulty)
}

const FRONTEND: &[Row] = &[
    ("fe-1", "JavaScript Fundamentals", "What is the difference between null and undefined in JavaScript?", Technical, Easy),
    ("fe-2", "CSS", "Explain the box model in CSS.", Technical, Easy),
    ("fe-3", "JavaScript Events", "How does event delegation work in JavaScript?", Technical, Medium),
    ("fe-4", "Frontend Frameworks", "What are the differences between React, Vue, and Angular?", Technical, Medium),
    ("fe-5", "Performance", "What is DOM Virtualization?", Technical, Hard),
    ("fe-6", "JavaScript Fundamentals", "What is the difference between == and ===?", Technical, Easy),
    ("fe-7", "Browser Storage", "Explain how localStorage, sessionStorage, and cookies differ.", Technical, Medium),
    ("fe-8", "Architecture", "What are SPA and SSR?", Technical, Medium),
    ("fe-9", "Performance", "How would you optimize a website's performance?", Technical, Hard),
    ("fe-10", "Security", "What is CORS and how do you handle it on the frontend?", Technical, Medium),
    ("fe-11", "Learning & Development", "How do you stay updated with frontend technologies?", Behavioral, Easy),
    ("fe-12", "Problem Solving", "How do you handle browser compatibility issues?", Behavioral, Medium),
    ("fe-13", "Project Experience", "Can you describe a UI project you're most proud of?", Behavioral, Easy),
    ("fe-14", "Code Organization", "How do you manage large-scale CSS?", Behavioral, Medium),
    ("fe-15", "Debugging", "What tools do you use for debugging frontend issues?", Behavioral, Easy),
];

const BACKEND: &[Row] = &[
    ("be-1", "API Design", "What is REST API and how is it different from GraphQL?", Technical, Medium),
    ("be-2", "Authentication", "How do JWT tokens work for authentication?", Technical, Medium),
    ("be-3", "Database", "What are the differences between SQL and NoSQL databases?", Technical, Easy),
    ("be-4", "Architecture", "Explain the MVC architecture.", Technical, Easy),
    ("be-5", "Performance", "How do you handle rate limiting in an API?", Technical, Hard),
    ("be-6", "Express.js", "What are middleware functions in Express.js?", Technical, Medium),
    ("be-7", "Scalability", "How does load balancing work?", Technical, Hard),
    ("be-8", "Database", "What is ORM and give examples (e.g., Sequelize, TypeORM)?", Technical, Medium),
    ("be-9", "Security", "How do you ensure secure password storage?", Technical, Medium),
    ("be-10", "Integration", "What is a webhook and when would you use one?", Technical, Medium),
    ("be-11", "Error Handling", "How do you handle and log errors on the backend?", Behavioral, Medium),
    ("be-12", "Scalability", "Describe a time you had to scale a backend system.", Behavioral, Hard),
    ("be-13", "Database Design", "How do you structure your database for performance?", Behavioral, Medium),
    ("be-14", "Security", "How do you ensure your API is secure?", Behavioral, Medium),
    ("be-15", "Problem Solving", "What do you do when your server crashes unexpectedly?", Behavioral, Hard),
];

const DATA_ANALYST: &[Row] = &[
    ("da-1", "SQL", "What is the difference between INNER JOIN, LEFT JOIN, and RIGHT JOIN in SQL?", Technical, Medium),
    ("da-2", "Data Cleaning", "How would you handle missing data?", Technical, Medium),
    ("da-3", "Database Design", "Explain normalization and denormalization in databases.", Technical, Hard),
    ("da-4", "Statistics", "What's the difference between variance and standard deviation?", Technical, Easy),
    ("da-5", "Statistics", "What is p-value and how is it used in hypothesis testing?", Technical, Medium),
    ("da-6", "Business Intelligence", "What are some common KPIs you've worked with?", Technical, Easy),
    ("da-7", "Data Visualization", "Describe how you would build a dashboard for sales performance.", Technical, Medium),
    ("da-8", "Tools", "What are the differences between Excel, SQL, and Python in data analysis?", Technical, Easy),
    ("da-9", "Data Visualization", "How do you decide which visualization to use for which data?", Technical, Medium),
    ("da-10", "Data Pipeline", "What is ETL? Explain a simple pipeline you've built.", Technical, Hard),
    ("da-11", "Stakeholder Management", "How do you prioritize when working with multiple stakeholders?", Behavioral, Medium),
    ("da-12", "Problem Solving", "Describe a time you found a critical insight from data.", Behavioral, Medium),
    ("da-13", "Data Quality", "How do you validate the accuracy of your data?", Behavioral, Medium),
    ("da-14", "Communication", "How do you explain technical insights to non-technical stakeholders?", Behavioral, Hard),
    ("da-15", "Impact", "Describe a time your analysis influenced a business decision.", Behavioral, Hard),
];
