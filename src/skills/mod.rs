//! Tiered skill catalog and the allocation graph over it
//!
//! A skill's tier decides how it unlocks: tier-1 and special abilities are
//! always open, tier-2 skills open under a sufficiently trained tier-1 parent,
//! and tier-3 skills under a tier-2 parent on the same lineage.

pub mod allocation;
pub mod catalog;
pub mod graph;
pub mod loader;
pub mod sheet;

pub use allocation::{AllocationEntry, AllocationMap};
pub use catalog::{Skill, SkillCatalog, SkillTier, SkillType, MAX_PARENTS};
pub use graph::{allocate_unlocked, SkillGraph, SKILL_POINT_CAP, UNTRAINED_PERCENT};
pub use loader::{
    load_skill_catalog, load_skill_catalog_file, parse_skills_toml, SkillCatalogProvider,
    StaticCatalogProvider, TomlCatalogProvider,
};
pub use sheet::{skill_sheet, SheetRow};
