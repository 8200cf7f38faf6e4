/*
 * Dino Forge - Conflict Validation
 * 开发心理过程:
 * 1. 对当前选择做成对扫描,找出所有互斥的特性组合
 * 2. 已选特性之间的冲突是Error,候选特性的冲突只是Warning
 * 3. 冲突对做归一化(trait1 < trait2),输出顺序完全确定
 * 4. 冲突是数据不是错误,只有未知id才返回错误
 */

use serde::{Deserialize, Serialize};

use super::{TraitCatalog, TraitEngineResult, TraitSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    // 候选特性与已选特性冲突,尚未加入选择
    Warning,
    // 两个冲突特性同时在选择中,选择无效
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitConflict {
    pub trait1: String,
    pub trait2: String,
    pub reason: String,
    pub severity: ConflictSeverity,
}

// 候选特性加入前的兼容性检查结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCheck {
    pub compatible: bool,
    pub conflicts: Vec<TraitConflict>,
}

impl TraitCatalog {
    /// 返回当前选择中所有成对冲突,空列表表示选择有效。
    /// 结果按(trait1, trait2)排序,trait1 < trait2。
    pub fn validate_selection(
        &self,
        selection: &TraitSelection,
    ) -> TraitEngineResult<Vec<TraitConflict>> {
        let mut ids: Vec<&str> = Vec::with_capacity(selection.len());
        for id in selection.iter() {
            self.require(id)?;
            ids.push(id);
        }
        ids.sort_unstable();

        let mut conflicts = Vec::new();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                if self.in_conflict(ids[i], ids[j]) {
                    conflicts.push(self.build_conflict(ids[i], ids[j], ConflictSeverity::Error));
                }
            }
        }

        Ok(conflicts)
    }

    /// 假设性检查:把候选特性加入当前选择是否会引入冲突。
    /// 候选尚未提交,冲突记录的严重度为Warning。
    pub fn check_candidate(
        &self,
        selection: &TraitSelection,
        candidate_id: &str,
    ) -> TraitEngineResult<CandidateCheck> {
        self.require(candidate_id)?;
        let mut ids: Vec<&str> = Vec::with_capacity(selection.len());
        for id in selection.iter() {
            self.require(id)?;
            if id != candidate_id {
                ids.push(id);
            }
        }
        ids.sort_unstable();

        let mut conflicts = Vec::new();
        for id in ids {
            if self.in_conflict(id, candidate_id) {
                conflicts.push(self.build_conflict(id, candidate_id, ConflictSeverity::Warning));
            }
        }

        Ok(CandidateCheck {
            compatible: conflicts.is_empty(),
            conflicts,
        })
    }

    fn build_conflict(&self, a: &str, b: &str, severity: ConflictSeverity) -> TraitConflict {
        let (trait1, trait2) = if a <= b { (a, b) } else { (b, a) };
        TraitConflict {
            trait1: trait1.to_string(),
            trait2: trait2.to_string(),
            reason: format!(
                "{} cannot coexist with {}",
                self.name_of(trait1),
                self.name_of(trait2)
            ),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trait_engine::TraitEngineError;

    fn catalog() -> TraitCatalog {
        TraitCatalog::builtin().unwrap()
    }

    #[test]
    fn test_conflicting_pair_reported_once() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["sharp-teeth", "herbivore"]);

        let conflicts = catalog.validate_selection(&selection).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].trait1, "herbivore");
        assert_eq!(conflicts[0].trait2, "sharp-teeth");
        assert_eq!(conflicts[0].severity, ConflictSeverity::Error);
    }

    #[test]
    fn test_valid_selection_has_no_conflicts() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["sharp-teeth", "massive-jaw", "pack-hunter"]);
        assert!(catalog.validate_selection(&selection).unwrap().is_empty());
    }

    #[test]
    fn test_one_sided_declaration_still_invalid() {
        // predator-instincts的冲突只声明在自己一侧
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["herbivore", "predator-instincts"]);
        let conflicts = catalog.validate_selection(&selection).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].trait1, "herbivore");
        assert_eq!(conflicts[0].trait2, "predator-instincts");
    }

    #[test]
    fn test_unknown_id_in_selection() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["sharp-teeth", "laser-eyes"]);
        let err = catalog.validate_selection(&selection).unwrap_err();
        assert_eq!(err, TraitEngineError::UnknownTrait("laser-eyes".to_string()));
    }

    #[test]
    fn test_candidate_incompatible_with_selection() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["herbivore"]);

        let check = catalog.check_candidate(&selection, "sharp-teeth").unwrap();
        assert!(!check.compatible);
        assert_eq!(check.conflicts.len(), 1);
        assert_eq!(check.conflicts[0].trait1, "herbivore");
        assert_eq!(check.conflicts[0].trait2, "sharp-teeth");
        assert_eq!(check.conflicts[0].severity, ConflictSeverity::Warning);
    }

    #[test]
    fn test_candidate_compatible() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["sharp-teeth"]);

        let check = catalog.check_candidate(&selection, "massive-jaw").unwrap();
        assert!(check.compatible);
        assert!(check.conflicts.is_empty());
    }

    #[test]
    fn test_unknown_candidate() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["herbivore"]);
        let err = catalog.check_candidate(&selection, "laser-eyes").unwrap_err();
        assert_eq!(err, TraitEngineError::UnknownTrait("laser-eyes".to_string()));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let catalog = catalog();
        let selection = TraitSelection::from_ids(["sharp-teeth", "herbivore", "agile"]);

        let first = catalog.validate_selection(&selection).unwrap();
        let second = catalog.validate_selection(&selection).unwrap();
        assert_eq!(first, second);
    }
}
