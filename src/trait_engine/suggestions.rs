/*
 * Dino Forge - Suggestion Ranker
 * 开发心理过程:
 * 1. 候选池 = 未选中且与当前选择无冲突的全部目录特性
 * 2. 协同得分 = 与候选有协同关系的已选特性数 / 选择大小
 * 3. 与稀有度权重混合得到置信度,空选择时退化为纯稀有度排序
 * 4. 置信度降序、id升序的双关键字排序,结果完全确定
 */

use serde::{Deserialize, Serialize};

use super::{TraitCatalog, TraitEngineResult, TraitSelection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitSuggestion {
    pub trait_id: String,
    pub reason: String,
    pub confidence: f64,
}

// 置信度混合权重,默认值来自产品调优
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestionWeights {
    pub synergy: f64,
    pub rarity: f64,
}

impl Default for SuggestionWeights {
    fn default() -> Self {
        Self {
            synergy: 0.7,
            rarity: 0.3,
        }
    }
}

impl TraitCatalog {
    /// 按置信度降序返回可加入当前选择的候选特性。
    /// `max_results`为None时返回全部候选。
    pub fn suggest(
        &self,
        selection: &TraitSelection,
        max_results: Option<usize>,
    ) -> TraitEngineResult<Vec<TraitSuggestion>> {
        self.suggest_with_weights(selection, max_results, SuggestionWeights::default())
    }

    pub fn suggest_with_weights(
        &self,
        selection: &TraitSelection,
        max_results: Option<usize>,
        weights: SuggestionWeights,
    ) -> TraitEngineResult<Vec<TraitSuggestion>> {
        for id in selection.iter() {
            self.require(id)?;
        }

        let mut suggestions = Vec::new();
        for def in self.definitions() {
            if selection.contains(&def.id) {
                continue;
            }
            if selection.iter().any(|id| self.in_conflict(id, &def.id)) {
                continue;
            }

            // 驱动协同得分的已选特性
            let drivers: Vec<&str> = selection
                .iter()
                .filter(|id| self.in_synergy(id, &def.id))
                .collect();

            let synergy_score = if selection.is_empty() {
                0.0
            } else {
                drivers.len() as f64 / selection.len() as f64
            };

            let confidence = (weights.synergy * synergy_score
                + weights.rarity * def.rarity.weight())
            .clamp(0.0, 1.0);

            let reason = if selection.is_empty() {
                format!("rarity-based ({})", def.rarity)
            } else if drivers.is_empty() {
                "compatible with current selection".to_string()
            } else {
                let names: Vec<&str> = drivers.iter().map(|id| self.name_of(id)).collect();
                format!("synergizes with {}", names.join(", "))
            };

            suggestions.push(TraitSuggestion {
                trait_id: def.id.clone(),
                reason,
                confidence,
            });
        }

        suggestions.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.trait_id.cmp(&b.trait_id))
        });

        if let Some(max) = max_results {
            suggestions.truncate(max);
        }

        Ok(suggestions)
    }
}
