use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String, // formatted, e.g. "450 kr"
    pub location: String,
    pub time: String, // "2-3 timmar", "Halvdag", ...
    pub category: String,
    pub skills: Vec<String>,
    pub author: String,
    pub date: String, // display label: "Idag", "Igår", ...
    pub icon: String,
    pub match_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMode {
    Helper,
    Needer,
}

impl fmt::Display for UserMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserMode::Helper => write!(f, "helper"),
            UserMode::Needer => write!(f, "needer"),
        }
    }
}

impl FromStr for UserMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "helper" => Ok(UserMode::Helper),
            "needer" => Ok(UserMode::Needer),
            other => Err(anyhow!("Unknown mode '{}' (expected helper or needer)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub location: String,
    pub mode: UserMode,
    pub is_verified: bool,
    // Comes from config, never persisted with the profile
    #[serde(skip)]
    pub skills: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Anders".to_string(),
            location: "Stockholm".to_string(),
            mode: UserMode::Helper,
            is_verified: true,
            skills: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub count: u32,
}
