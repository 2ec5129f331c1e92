use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::error::{PortfolioError, Result};

/// Catalog identifier. The catalog may spell ids as strings or numbers;
/// both normalize to the same text form used in `data-project` attributes
/// and detail-page URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
            Float(f64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(number) => Self(number.to_string()),
            RawId::Float(number) if number.fract() == 0.0 && number.abs() < 9.0e15 => {
                Self(format!("{}", number as i64))
            }
            RawId::Float(number) => Self(number.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyFeature {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FullDescription {
    pub intro: Option<String>,
    pub key_features: Option<Vec<KeyFeature>>,
    pub pricing: Option<Pricing>,
    pub perfect_for: Option<Vec<String>>,
    pub technical_specs: Option<Vec<String>>,
    pub quote: Option<String>,
    pub getting_started: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
    #[serde(default)]
    pub full_description: Option<FullDescription>,
}

impl Project {
    /// Tagline, treating an empty string as absent.
    pub fn tagline(&self) -> Option<&str> {
        non_empty_str(self.tagline.as_deref())
    }

    pub fn features(&self) -> Option<&[Feature]> {
        non_empty(self.features.as_deref())
    }
}

pub(crate) fn non_empty_str(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

pub(crate) fn non_empty<T>(value: Option<&[T]>) -> Option<&[T]> {
    value.filter(|items| !items.is_empty())
}

/// Wire shape of `projects.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    pub projects: Vec<Project>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|error| PortfolioError::Decode(error.to_string()))
    }
}

/// Projects in catalog order plus an id index.
///
/// Built once from a fetched catalog and never mutated afterwards. When the
/// catalog repeats an id, the index points at the last record carrying it.
#[derive(Debug, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    index: HashMap<ProjectId, usize>,
}

impl ProjectStore {
    pub fn from_catalog(catalog: Catalog) -> Self {
        let mut index = HashMap::with_capacity(catalog.projects.len());
        for (position, project) in catalog.projects.iter().enumerate() {
            if index.insert(project.id.clone(), position).is_some() {
                log::warn!(
                    "event=catalog_duplicate_id id={} policy=last_write_wins",
                    project.id
                );
            }
        }

        Self {
            projects: catalog.projects,
            index,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.index
            .get(&ProjectId::new(id))
            .and_then(|&position| self.projects.get(position))
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
