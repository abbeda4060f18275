//! Load skill catalogs from TOML files

use crate::core::error::{BuildError, Result};
use crate::core::types::{AttributeKind, SkillId};
use crate::skills::catalog::{Skill, SkillCatalog, SkillTier, SkillType};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of raw skill definitions
pub trait SkillCatalogProvider {
    fn list_skills(&self) -> Result<Vec<Skill>>;
}

/// One `[[skills]]` entry as written in catalog files
#[derive(Debug, Deserialize)]
struct SkillRecord {
    id: String,
    name: String,
    /// 1, 2, 3, or absent for special abilities
    tier: Option<u8>,
    #[serde(default, rename = "type")]
    kind: SkillType,
    /// Three-letter attribute code, or "none"
    #[serde(default)]
    attribute: Option<String>,
    #[serde(default)]
    parents: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<SkillRecord>,
}

impl SkillRecord {
    fn into_skill(self) -> Result<Skill> {
        let tier = SkillTier::from_level(self.tier).ok_or_else(|| {
            BuildError::InvalidCatalog(format!("{}: invalid tier {:?}", self.id, self.tier))
        })?;

        let attribute = match self.attribute.as_deref() {
            None | Some("none") | Some("NONE") => None,
            Some(code) => Some(AttributeKind::from_code(code).ok_or_else(|| {
                BuildError::InvalidCatalog(format!("{}: unknown attribute '{}'", self.id, code))
            })?),
        };

        Ok(Skill {
            id: SkillId(self.id),
            name: self.name,
            tier,
            kind: self.kind,
            attribute,
            parents: self.parents.into_iter().map(SkillId).collect(),
        })
    }
}

/// Parse catalog TOML into skill definitions (not yet validated as a graph)
pub fn parse_skills_toml(content: &str) -> Result<Vec<Skill>> {
    let file: CatalogFile = toml::from_str(content)?;
    file.skills.into_iter().map(SkillRecord::into_skill).collect()
}

/// Catalog backed by a single TOML file
#[derive(Debug, Clone)]
pub struct TomlCatalogProvider {
    path: PathBuf,
}

impl TomlCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SkillCatalogProvider for TomlCatalogProvider {
    fn list_skills(&self) -> Result<Vec<Skill>> {
        let content = fs::read_to_string(&self.path)?;
        parse_skills_toml(&content)
    }
}

/// Fixed list of skills, mostly for tests and embedding callers
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogProvider {
    pub skills: Vec<Skill>,
}

impl SkillCatalogProvider for StaticCatalogProvider {
    fn list_skills(&self) -> Result<Vec<Skill>> {
        Ok(self.skills.clone())
    }
}

/// Load and validate a catalog once for a session
pub fn load_skill_catalog(provider: &dyn SkillCatalogProvider) -> Result<Arc<SkillCatalog>> {
    let catalog = SkillCatalog::new(provider.list_skills()?)?;
    tracing::info!("Loaded skill catalog with {} skills", catalog.len());
    Ok(Arc::new(catalog))
}

/// Convenience for the common single-file case
pub fn load_skill_catalog_file(path: &Path) -> Result<Arc<SkillCatalog>> {
    load_skill_catalog(&TomlCatalogProvider::new(path))
}
