//! Campaign point budgets
//!
//! Each campaign may override how many points a new build gets to spend.
//! Campaigns without a config fall back to the defaults below.

use crate::core::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Point budgets and thresholds for one campaign
///
/// Read-only to the engine. Every field defaults independently so a
/// campaign file only needs to name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Upper bound on the sum of all six attribute scores
    ///
    /// At the default 150 every attribute can sit at the 25 default,
    /// so a fresh build starts with the whole pool committed.
    pub attribute_point_budget: u32,

    /// Skill points to spend before the build locks into XP mode
    pub skill_point_budget: u32,

    /// Points a non-magic parent needs before its children unlock
    ///
    /// Higher than the 10-point pre-lock cap, so standard tier-2 skills
    /// only open up after XP growth.
    pub points_needed_for_next_tier: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            attribute_point_budget: 150,
            skill_point_budget: 50,
            points_needed_for_next_tier: 25,
        }
    }
}

impl BudgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.attribute_point_budget == 0 {
            return Err(BuildError::InvalidConfig(
                "attribute_point_budget must be positive".into(),
            ));
        }
        if self.skill_point_budget == 0 {
            return Err(BuildError::InvalidConfig(
                "skill_point_budget must be positive".into(),
            ));
        }
        if self.points_needed_for_next_tier == 0 {
            return Err(BuildError::InvalidConfig(
                "points_needed_for_next_tier must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Load and validate a budget config from a TOML file
pub fn load_budget_config(path: &Path) -> Result<BudgetConfig> {
    let contents = fs::read_to_string(path)?;
    let config: BudgetConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Source of campaign-specific budgets
pub trait BudgetConfigProvider {
    /// Config for a campaign, or None when the campaign sets no budgets
    fn config(&self, campaign_id: &str) -> Result<Option<BudgetConfig>>;
}

/// Reads `<dir>/<campaign_id>.toml`
#[derive(Debug, Clone)]
pub struct FileBudgetConfigProvider {
    dir: PathBuf,
}

impl FileBudgetConfigProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl BudgetConfigProvider for FileBudgetConfigProvider {
    fn config(&self, campaign_id: &str) -> Result<Option<BudgetConfig>> {
        let path = self.dir.join(format!("{}.toml", campaign_id));
        if !path.exists() {
            return Ok(None);
        }
        load_budget_config(&path).map(Some)
    }
}

/// Resolves the budgets a build session runs under
pub struct BudgetConfigResolver {
    provider: Option<Box<dyn BudgetConfigProvider>>,
}

impl BudgetConfigResolver {
    /// Resolver that always yields the defaults
    pub fn defaults_only() -> Self {
        Self { provider: None }
    }

    pub fn with_provider(provider: impl BudgetConfigProvider + 'static) -> Self {
        Self {
            provider: Some(Box::new(provider)),
        }
    }

    /// Campaign budgets, falling back to defaults when no campaign or config exists
    pub fn resolve(&self, campaign_id: Option<&str>) -> Result<BudgetConfig> {
        let (Some(provider), Some(campaign)) = (&self.provider, campaign_id) else {
            return Ok(BudgetConfig::default());
        };
        match provider.config(campaign)? {
            Some(config) => {
                config.validate()?;
                tracing::debug!(campaign, ?config, "Resolved campaign budgets");
                Ok(config)
            }
            None => Ok(BudgetConfig::default()),
        }
    }
}
