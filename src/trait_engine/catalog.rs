/*
 * Dino Forge - Trait Catalog
 * 开发心理过程:
 * 1. 设计特性定义的数据模型:类别、稀有度、冲突和协同关系
 * 2. 加载时检测重复标识符,保证目录内id唯一
 * 3. 关系声明可能只出现在单侧,这里统一做对称闭包
 * 4. 用邻接集合存储闭包结果,单个特性的关系查询为常数时间
 * 5. 目录构建后只读,选择由调用方持有,引擎只做借用
 */

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::{TraitEngineError, TraitEngineResult};

// 特性类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitCategory {
    Physical,
    Behavioral,
    Defensive,
    Hunting,
    Environmental,
}

impl TraitCategory {
    pub fn all_variants() -> [TraitCategory; 5] {
        [
            TraitCategory::Physical,
            TraitCategory::Behavioral,
            TraitCategory::Defensive,
            TraitCategory::Hunting,
            TraitCategory::Environmental,
        ]
    }
}

impl fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitCategory::Physical => write!(f, "Physical"),
            TraitCategory::Behavioral => write!(f, "Behavioral"),
            TraitCategory::Defensive => write!(f, "Defensive"),
            TraitCategory::Hunting => write!(f, "Hunting"),
            TraitCategory::Environmental => write!(f, "Environmental"),
        }
    }
}

// 稀有度等级,顺序即权重顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl TraitRarity {
    // 推荐置信度中的稀有度权重
    pub fn weight(self) -> f64 {
        match self {
            TraitRarity::Common => 0.1,
            TraitRarity::Uncommon => 0.3,
            TraitRarity::Rare => 0.6,
            TraitRarity::Legendary => 1.0,
        }
    }

    pub fn all_variants() -> [TraitRarity; 4] {
        [
            TraitRarity::Common,
            TraitRarity::Uncommon,
            TraitRarity::Rare,
            TraitRarity::Legendary,
        ]
    }
}

impl fmt::Display for TraitRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraitRarity::Common => write!(f, "Common"),
            TraitRarity::Uncommon => write!(f, "Uncommon"),
            TraitRarity::Rare => write!(f, "Rare"),
            TraitRarity::Legendary => write!(f, "Legendary"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitDefinition {
    pub id: String,
    pub name: String,
    pub category: TraitCategory,
    #[serde(default)]
    pub conflicts: Vec<String>,
    #[serde(default)]
    pub synergies: Vec<String>,
    pub rarity: TraitRarity,
    #[serde(default)]
    pub description: String,
}

// 当前为一只恐龙选中的特性集合
// 保持插入顺序,id唯一;有效性与顺序无关
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSelection {
    traits: IndexSet<String>,
}

impl TraitSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            traits: ids.into_iter().map(Into::into).collect(),
        }
    }

    // 返回true表示新增,false表示已存在
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        self.traits.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.traits.shift_remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.traits.contains(id)
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(String::as_str)
    }

    // 最近添加的特性,可作为推荐上下文
    pub fn last_added(&self) -> Option<&str> {
        self.traits.last().map(String::as_str)
    }
}

// 不可变的特性目录句柄
// 构建后不再变更,无内部可变性,可跨线程共享引用
#[derive(Debug, Clone)]
pub struct TraitCatalog {
    definitions: IndexMap<String, TraitDefinition>,
    conflict_edges: HashMap<String, HashSet<String>>,
    synergy_edges: HashMap<String, HashSet<String>>,
}

impl TraitCatalog {
    pub fn load(definitions: Vec<TraitDefinition>) -> TraitEngineResult<Self> {
        let mut map: IndexMap<String, TraitDefinition> = IndexMap::with_capacity(definitions.len());
        for def in definitions {
            if map.contains_key(&def.id) {
                return Err(TraitEngineError::DuplicateTrait(def.id));
            }
            map.insert(def.id.clone(), def);
        }

        let mut conflict_edges: HashMap<String, HashSet<String>> = HashMap::new();
        let mut synergy_edges: HashMap<String, HashSet<String>> = HashMap::new();
        for id in map.keys() {
            conflict_edges.insert(id.clone(), HashSet::new());
            synergy_edges.insert(id.clone(), HashSet::new());
        }

        // 对称闭包:单侧声明即对双方生效
        for def in map.values() {
            for other in &def.conflicts {
                conflict_edges.entry(def.id.clone()).or_default().insert(other.clone());
                conflict_edges.entry(other.clone()).or_default().insert(def.id.clone());
            }
            for other in &def.synergies {
                synergy_edges.entry(def.id.clone()).or_default().insert(other.clone());
                synergy_edges.entry(other.clone()).or_default().insert(def.id.clone());
            }
        }

        Ok(Self {
            definitions: map,
            conflict_edges,
            synergy_edges,
        })
    }

    pub fn from_json_str(json: &str) -> TraitEngineResult<Self> {
        let definitions: Vec<TraitDefinition> = serde_json::from_str(json)
            .map_err(|e| TraitEngineError::CatalogFormat(e.to_string()))?;
        Self::load(definitions)
    }

    pub fn get(&self, id: &str) -> Option<&TraitDefinition> {
        self.definitions.get(id)
    }

    pub fn by_category(&self, category: TraitCategory) -> Vec<&TraitDefinition> {
        self.definitions
            .values()
            .filter(|def| def.category == category)
            .collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TraitDefinition> {
        self.definitions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub(crate) fn require(&self, id: &str) -> TraitEngineResult<&TraitDefinition> {
        self.definitions
            .get(id)
            .ok_or_else(|| TraitEngineError::UnknownTrait(id.to_string()))
    }

    pub(crate) fn in_conflict(&self, a: &str, b: &str) -> bool {
        self.conflict_edges.get(a).map_or(false, |set| set.contains(b))
    }

    pub(crate) fn in_synergy(&self, a: &str, b: &str) -> bool {
        self.synergy_edges.get(a).map_or(false, |set| set.contains(b))
    }

    // 显示名,目录外的id原样返回
    pub(crate) fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.definitions.get(id).map_or(id, |def| def.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_definition(id: &str, conflicts: &[&str], synergies: &[&str]) -> TraitDefinition {
        TraitDefinition {
            id: id.to_string(),
            name: id.to_string(),
            category: TraitCategory::Physical,
            conflicts: conflicts.iter().map(|s| s.to_string()).collect(),
            synergies: synergies.iter().map(|s| s.to_string()).collect(),
            rarity: TraitRarity::Common,
            description: String::new(),
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let defs = vec![
            sample_definition("agile", &[], &[]),
            sample_definition("agile", &[], &[]),
        ];
        let err = TraitCatalog::load(defs).unwrap_err();
        assert_eq!(err, TraitEngineError::DuplicateTrait("agile".to_string()));
    }

    #[test]
    fn test_symmetric_closure_of_one_sided_conflict() {
        // 冲突只声明在a一侧
        let defs = vec![
            sample_definition("a", &["b"], &[]),
            sample_definition("b", &[], &[]),
        ];
        let catalog = TraitCatalog::load(defs).unwrap();
        assert!(catalog.in_conflict("a", "b"));
        assert!(catalog.in_conflict("b", "a"));
    }

    #[test]
    fn test_symmetric_closure_of_one_sided_synergy() {
        let defs = vec![
            sample_definition("a", &[], &["b"]),
            sample_definition("b", &[], &[]),
        ];
        let catalog = TraitCatalog::load(defs).unwrap();
        assert!(catalog.in_synergy("a", "b"));
        assert!(catalog.in_synergy("b", "a"));
    }

    #[test]
    fn test_lookup_by_category() {
        let mut def = sample_definition("armored", &[], &[]);
        def.category = TraitCategory::Defensive;
        let defs = vec![sample_definition("agile", &[], &[]), def];
        let catalog = TraitCatalog::load(defs).unwrap();

        let defensive = catalog.by_category(TraitCategory::Defensive);
        assert_eq!(defensive.len(), 1);
        assert_eq!(defensive[0].id, "armored");
        assert!(catalog.by_category(TraitCategory::Hunting).is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": "agile", "name": "Agile", "category": "physical", "rarity": "common"},
            {"id": "herbivore", "name": "Herbivore", "category": "behavioral",
             "conflicts": ["sharp-teeth"], "rarity": "common"}
        ]"#;
        let catalog = TraitCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("agile").is_some());
        assert!(catalog.in_conflict("herbivore", "sharp-teeth"));
    }

    #[test]
    fn test_from_json_str_bad_input() {
        let err = TraitCatalog::from_json_str("not json").unwrap_err();
        assert!(matches!(err, TraitEngineError::CatalogFormat(_)));
    }

    #[test]
    fn test_selection_keeps_insertion_order() {
        let mut selection = TraitSelection::new();
        assert!(selection.add("b"));
        assert!(selection.add("a"));
        assert!(!selection.add("b"));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(selection.last_added(), Some("a"));

        assert!(selection.remove("b"));
        assert!(!selection.remove("b"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_rarity_weights_are_ordered() {
        let weights: Vec<f64> = TraitRarity::all_variants().iter().map(|r| r.weight()).collect();
        for pair in weights.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
