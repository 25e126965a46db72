//! Learning roadmap templates keyed by skill category

use crate::error::Result;
use crate::taxonomy::TaxonomyIndex;

pub const FALLBACK_PATH: [&str; 3] = [
    "Learn fundamentals",
    "Build a small project using it",
    "Add a portfolio example",
];

/// Ordered learning steps for a category. Unknown categories get [`FALLBACK_PATH`].
pub fn path_for_category(category: &str) -> &'static [&'static str] {
    match category {
        "Cloud (AWS)" => &[
            "Cloud basics",
            "IAM permissions",
            "Networking basics (VPC)",
            "Deploy a small API",
            "Monitoring + cost basics",
        ],
        "Cloud (Azure)" => &[
            "Cloud basics",
            "Identity (Entra ID)",
            "Networking basics (VNet)",
            "Deploy a Function/App",
            "Monitoring + cost basics",
        ],
        "DevOps Fundamentals" => &[
            "Git workflow",
            "Containers",
            "CI pipeline",
            "CD pipeline",
            "Observability basics",
        ],
        "Auth & Security" => &[
            "Threat basics",
            "OAuth/JWT",
            "Secure storage",
            "OWASP checks",
            "Audit logging",
        ],
        "Databases" => &[
            "Schema design",
            "Indexes",
            "Transactions",
            "Query tuning",
            "Backup/restore basics",
        ],
        "APIs & Integration" => &[
            "REST design",
            "Validation",
            "Auth",
            "Docs (OpenAPI)",
            "Performance + caching",
        ],
        "Frontend Concepts" => &[
            "Core fundamentals",
            "Component patterns",
            "State management",
            "Testing",
            "Performance + a11y",
        ],
        "Architecture & Patterns" => &[
            "Baseline design",
            "Reliability patterns",
            "Scaling",
            "Tradeoffs",
            "Hands-on refactor",
        ],
        _ => &FALLBACK_PATH,
    }
}

/// Learning steps for a skill, resolved through its category.
pub fn suggested_path(taxonomy: &TaxonomyIndex, skill_id: &str) -> Result<Vec<String>> {
    let skill = taxonomy.skill(skill_id)?;
    Ok(path_for_category(&skill.category)
        .iter()
        .map(|step| step.to_string())
        .collect())
}
