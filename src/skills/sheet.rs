//! Sheet rows for rendering a build's trained skills

use crate::attributes::AttributeScores;
use crate::core::error::Result;
use crate::core::types::AllocationKey;
use crate::skills::allocation::AllocationMap;
use crate::skills::graph::SkillGraph;
use serde::Serialize;

/// One trained (skill, lineage) with its computed numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub key: AllocationKey,
    /// Skill names along the lineage, e.g. "Arcane Casting > Fire Sphere"
    pub name: String,
    pub points: u32,
    pub rank: i32,
    pub percent: i32,
}

/// Rows for every key holding points, ordered by key
pub fn skill_sheet(graph: &SkillGraph<'_>, map: &AllocationMap, scores: &AttributeScores) -> Result<Vec<SheetRow>> {
    let catalog = graph.catalog();
    map.sorted()
        .into_iter()
        .map(|(key, points)| {
            let name = key
                .path()
                .iter()
                .map(|id| catalog.require(id).map(|s| s.name.as_str()))
                .collect::<Result<Vec<_>>>()?
                .join(" > ");
            Ok(SheetRow {
                key: key.clone(),
                name,
                points,
                rank: graph.rank(key, map, scores)?,
                percent: graph.percent(key, map, scores)?,
            })
        })
        .collect()
}
