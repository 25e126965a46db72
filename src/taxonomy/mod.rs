//! Skill taxonomy: skill definitions, role tags and the immutable lookup index

pub mod loader;

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Level tag that grants the core-skill importance boost.
pub const CORE_LEVEL: &str = "core";

/// Target job family. Only skills tagged with the requested role are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Backend,
    Fullstack,
    CloudDevops,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Backend, Role::Fullstack, Role::CloudDevops];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Backend => "backend",
            Role::Fullstack => "fullstack",
            Role::CloudDevops => "cloud_devops",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SkillGapError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                SkillGapError::InvalidInput(format!(
                    "Invalid target role: '{}'. Supported: backend, fullstack, cloud_devops",
                    s
                ))
            })
    }
}

/// A single skill definition from the taxonomy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub canonical_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Role tags as written in the catalog. Tags outside [`Role`] are kept but never match.
    #[serde(default)]
    pub roles: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub level: Option<String>,
}

impl Skill {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn is_core(&self) -> bool {
        self.level.as_deref() == Some(CORE_LEVEL)
    }

    /// Canonical name followed by every alias, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Read-only index over the skill catalog, built once at startup.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    skills: Vec<Skill>,
    by_id: HashMap<String, usize>,
}

impl TaxonomyIndex {
    /// Build the index, rejecting duplicate ids.
    pub fn new(skills: Vec<Skill>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(skills.len());

        for (position, skill) in skills.iter().enumerate() {
            if skill.id.trim().is_empty() {
                return Err(SkillGapError::Taxonomy(format!(
                    "Skill at position {} has an empty id",
                    position
                )));
            }
            if by_id.insert(skill.id.clone(), position).is_some() {
                return Err(SkillGapError::Taxonomy(format!(
                    "Duplicate skill id: {}",
                    skill.id
                )));
            }
            if skill.aliases.is_empty() {
                log::warn!(
                    "Skill '{}' has no aliases and can never be matched lexically",
                    skill.id
                );
            }
        }

        Ok(Self { skills, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.by_id.get(id).map(|&i| &self.skills[i])
    }

    /// Look up a skill that is expected to exist.
    pub fn skill(&self, id: &str) -> Result<&Skill> {
        self.get(id)
            .ok_or_else(|| SkillGapError::UnknownSkill(id.to_string()))
    }

    /// All skills in catalog order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skills_for_role(&self, role: Role) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.has_role(role))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
