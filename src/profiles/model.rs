use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const UNKNOWN_USER: &str = "Unknown User";

/// A `profiles` row as stored. `profile_data` is a JSON blob written by
/// account provisioning and is not trusted to be well formed.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRecord {
    pub id: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_data: Option<String>,
}

/// A profile with every fallback already applied: `full_name` is always
/// present (possibly [`UNKNOWN_USER`]) and legacy skill objects are
/// flattened to plain names.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProfileData {
    branch: Option<String>,
    year: Option<String>,
    #[serde(default)]
    skills: Vec<SkillEntry>,
    #[serde(rename = "personalInfo")]
    personal_info: Option<PersonalInfo>,
}

#[derive(Debug, Clone, Deserialize)]
struct PersonalInfo {
    name: Option<String>,
}

/// Skills appear either as plain strings or, in rows written by an older
/// provisioning flow, as `{ "name": "..." }` objects. Anything else is
/// dropped on resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum SkillEntry {
    Name(String),
    Legacy { name: String },
    Other(serde_json::Value),
}

impl SkillEntry {
    fn name(&self) -> Option<&str> {
        match self {
            SkillEntry::Name(name) | SkillEntry::Legacy { name } => Some(name),
            SkillEntry::Other(_) => None,
        }
    }
}

impl ProfileRecord {
    /// Display name precedence: `full_name`, then the legacy
    /// `profile_data.personalInfo.name`, then [`UNKNOWN_USER`]. Malformed
    /// `profile_data` degrades to the empty attribute set rather than
    /// failing the lookup.
    pub fn resolve(self) -> Profile {
        let data: ProfileData = self
            .profile_data
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        let full_name = self
            .full_name
            .filter(|name| !name.is_empty())
            .or_else(|| data.personal_info.as_ref().and_then(|p| p.name.clone()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_owned());

        let skills = data
            .skills
            .iter()
            .filter_map(SkillEntry::name)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();

        Profile {
            id: self.id,
            full_name,
            avatar_url: self.avatar_url,
            branch: data.branch,
            year: data.year,
            skills,
        }
    }
}

/// Stand-in for a profile that could not be resolved.
pub fn placeholder(id: &str) -> Profile {
    Profile {
        id: id.to_owned(),
        full_name: UNKNOWN_USER.to_owned(),
        avatar_url: None,
        branch: None,
        year: None,
        skills: Vec::new(),
    }
}
