//! Deterministic demo data. Every table is seeded at most once: a table that
//! already holds records is left untouched.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::{Record, Store, StoreResult, Table};
use crate::models::assessment::{Assessment, Question, QuestionType, Section};
use crate::models::candidate::{Candidate, Stage};
use crate::models::job::{slugify, Job, JobStatus, JobType};

pub const SEED_JOBS: usize = 25;
pub const SEED_CANDIDATES: usize = 500;

const TITLES: &[&str] = &[
    "Frontend Engineer",
    "Backend Engineer",
    "Platform Engineer",
    "Data Analyst",
    "Product Designer",
    "Product Manager",
    "DevOps Engineer",
    "QA Engineer",
    "Mobile Developer",
    "Security Engineer",
    "Machine Learning Engineer",
    "Technical Writer",
    "Support Engineer",
    "Solutions Architect",
    "Engineering Manager",
    "Site Reliability Engineer",
    "Data Engineer",
    "UX Researcher",
    "Recruiter",
    "Sales Engineer",
    "Customer Success Manager",
    "Marketing Analyst",
    "Embedded Engineer",
    "Database Administrator",
    "Release Manager",
];

const LOCATIONS: &[&str] = &["Remote", "Berlin", "Bangalore", "New York", "London"];

const TAGS: &[&str] = &[
    "rust", "react", "typescript", "python", "aws", "sql", "design", "kubernetes", "go", "figma",
];

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Maya", "Liam", "Noor", "Kenji", "Sofia", "Tariq", "Elena", "Ravi", "Chloe",
    "Mateo", "Amara", "Jonas", "Priya", "Lucas", "Zara",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Okafor", "Novak", "Haddad", "Tanaka", "Rossi", "Fischer", "Mendes", "Kowalski",
    "Nguyen", "Iyer", "Larsen",
];

/// Seeds every table that is still empty.
pub async fn seed_if_empty(store: &Store) -> StoreResult<()> {
    seed_table(&store.jobs, seed_jobs).await?;
    seed_table(&store.candidates, seed_candidates).await?;
    seed_table(&store.assessments, seed_assessments).await?;
    Ok(())
}

async fn seed_table<T: Record>(table: &Table<T>, records: fn() -> Vec<T>) -> StoreResult<bool> {
    if table.count().await? > 0 {
        return Ok(false);
    }
    let records = records();
    table.put_all(&records).await?;
    info!("Seeded {} {}", records.len(), T::TABLE);
    Ok(true)
}

fn epoch() -> DateTime<Utc> {
    // 2024-01-01T00:00:00Z
    DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

pub fn seed_jobs() -> Vec<Job> {
    TITLES
        .iter()
        .take(SEED_JOBS)
        .enumerate()
        .map(|(i, title)| Job {
            id: format!("job-{}", i + 1),
            title: title.to_string(),
            slug: slugify(title),
            status: if i % 5 == 4 {
                JobStatus::Archived
            } else {
                JobStatus::Active
            },
            job_type: JobType::ALL[i % JobType::ALL.len()],
            location: LOCATIONS[i % LOCATIONS.len()].to_string(),
            salary: format!("${}k - ${}k", 60 + i * 5, 90 + i * 5),
            description: format!("Join us as a {title} and help candidates find their next role."),
            requirements: vec![
                format!("{}+ years of relevant experience", 1 + i % 6),
                "Clear written communication".to_string(),
            ],
            tags: vec![
                TAGS[i % TAGS.len()].to_string(),
                TAGS[(i + 3) % TAGS.len()].to_string(),
                TAGS[(i + 7) % TAGS.len()].to_string(),
            ],
            order: i as i64,
            created_at: epoch() - Duration::days(i as i64),
        })
        .collect()
}

pub fn seed_candidates() -> Vec<Candidate> {
    (0..SEED_CANDIDATES)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()];
            Candidate {
                id: format!("cand-{:04}", i + 1),
                job_id: format!("job-{}", i % SEED_JOBS + 1),
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i
                ),
                phone: format!("+1-555-{:04}", i),
                resume: String::new(),
                cover_letter: String::new(),
                experience: format!("{} years", i % 12),
                education: String::new(),
                skills: vec![
                    TAGS[i % TAGS.len()].to_string(),
                    TAGS[(i + 5) % TAGS.len()].to_string(),
                ],
                stage: Stage::ALL[i % Stage::ALL.len()],
                applied_at: epoch() - Duration::hours(i as i64 * 7),
            }
        })
        .collect()
}

pub fn seed_assessments() -> Vec<Assessment> {
    (0..3)
        .map(|i| {
            let job_id = format!("job-{}", i + 1);
            let sections = (0..2)
                .map(|s| Section {
                    id: format!("section-{i}-{s}"),
                    title: if s == 0 {
                        "Fundamentals".to_string()
                    } else {
                        "Experience".to_string()
                    },
                    questions: seed_questions(s),
                })
                .collect();
            Assessment {
                id: format!("assessment-{}", i + 1),
                job_id,
                title: format!("{} Assessment", TITLES[i]),
                description: format!("Screening questions for the {} role.", TITLES[i]),
                sections,
                created_at: epoch(),
            }
        })
        .collect()
}

fn seed_questions(section: usize) -> Vec<Question> {
    let kinds = [
        QuestionType::SingleChoice,
        QuestionType::MultiChoice,
        QuestionType::ShortText,
        QuestionType::LongText,
        QuestionType::Numeric,
    ];
    kinds
        .iter()
        .enumerate()
        .map(|(n, kind)| Question {
            id: format!("q-{section}-{n}"),
            kind: *kind,
            question: match kind {
                QuestionType::SingleChoice => "Which best describes your seniority?".to_string(),
                QuestionType::MultiChoice => "Which tools have you used?".to_string(),
                QuestionType::ShortText => "What is your notice period?".to_string(),
                QuestionType::LongText => "Describe a project you are proud of.".to_string(),
                QuestionType::Numeric => "Years of professional experience?".to_string(),
            },
            options: if kind.has_options() {
                vec!["Junior".to_string(), "Mid".to_string(), "Senior".to_string()]
            } else {
                vec![]
            },
            required: n % 2 == 0,
        })
        .collect()
}
