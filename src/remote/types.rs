use serde::{Deserialize, Serialize};

/// Response of `/subjects/{subject}.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectResponse {
    #[serde(default)]
    pub works: Vec<Work>,
}

/// A work listed under a subject
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub cover_id: Option<u64>,
    #[serde(default)]
    pub subject: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: Option<String>,
}

/// Response of `/search.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// A single search hit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub cover_i: Option<u64>,
}
