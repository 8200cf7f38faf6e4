/*
 * Dino Forge - Builtin Trait Table
 * 开发心理过程:
 * 1. 内置一套覆盖五个类别的恐龙特性表,开箱即用
 * 2. 冲突/协同关系有意只在单侧声明,闭包在加载时补全
 * 3. 表是静态数据,语言无关,也可以从JSON目录文件替换
 */

use super::{TraitCatalog, TraitCategory, TraitDefinition, TraitEngineResult, TraitRarity};

fn def(
    id: &str,
    name: &str,
    category: TraitCategory,
    rarity: TraitRarity,
    conflicts: &[&str],
    synergies: &[&str],
    description: &str,
) -> TraitDefinition {
    TraitDefinition {
        id: id.to_string(),
        name: name.to_string(),
        category,
        conflicts: conflicts.iter().map(|s| s.to_string()).collect(),
        synergies: synergies.iter().map(|s| s.to_string()).collect(),
        rarity,
        description: description.to_string(),
    }
}

pub fn builtin_definitions() -> Vec<TraitDefinition> {
    use TraitCategory::*;
    use TraitRarity::*;

    vec![
        // 体型特征
        def(
            "sharp-teeth",
            "Sharp Teeth",
            Physical,
            Rare,
            &["herbivore"],
            &["massive-jaw", "predator-instincts"],
            "Serrated, blade-like teeth built for tearing flesh.",
        ),
        def(
            "massive-jaw",
            "Massive Jaw",
            Physical,
            Rare,
            &[],
            &["sharp-teeth"],
            "Crushing bite force rivaling the largest theropods.",
        ),
        def(
            "long-neck",
            "Long Neck",
            Physical,
            Uncommon,
            &["compact-build"],
            &["canopy-grazer"],
            "Reaches vegetation far above the forest floor.",
        ),
        def(
            "compact-build",
            "Compact Build",
            Physical,
            Common,
            &[],
            &["agile"],
            "Small, dense frame that slips through tight terrain.",
        ),
        def(
            "feathered",
            "Feathered",
            Physical,
            Uncommon,
            &[],
            &["swift-runner"],
            "Insulating plumage with flashes of display color.",
        ),
        def(
            "agile",
            "Agile",
            Physical,
            Common,
            &[],
            &["swift-runner"],
            "Quick, precise movement and sharp turns.",
        ),
        // 行为特征
        def(
            "herbivore",
            "Herbivore",
            Behavioral,
            Common,
            &["sharp-teeth"],
            &["canopy-grazer"],
            "Feeds exclusively on plants.",
        ),
        def(
            "predator-instincts",
            "Predator Instincts",
            Behavioral,
            Rare,
            &["herbivore"],
            &["sharp-teeth", "pack-hunter"],
            "Hardwired drive to stalk and strike.",
        ),
        def(
            "pack-hunter",
            "Pack Hunter",
            Behavioral,
            Uncommon,
            &[],
            &["ambush-predator"],
            "Coordinates kills with others of its kind.",
        ),
        def(
            "solitary",
            "Solitary",
            Behavioral,
            Common,
            &["pack-hunter"],
            &[],
            "Roams and hunts alone.",
        ),
        def(
            "territorial",
            "Territorial",
            Behavioral,
            Common,
            &[],
            &["crest-display"],
            "Aggressively defends a claimed range.",
        ),
        // 防御特征
        def(
            "armored-plates",
            "Armored Plates",
            Defensive,
            Rare,
            &["feathered"],
            &["club-tail", "thick-hide"],
            "Bony osteoderms deflecting bites and claws.",
        ),
        def(
            "club-tail",
            "Club Tail",
            Defensive,
            Rare,
            &[],
            &[],
            "A fused bone club capable of shattering limbs.",
        ),
        def(
            "thick-hide",
            "Thick Hide",
            Defensive,
            Common,
            &[],
            &[],
            "Leathery skin that shrugs off scrapes.",
        ),
        def(
            "crest-display",
            "Crest Display",
            Defensive,
            Uncommon,
            &[],
            &[],
            "A vivid crest that warns rivals away.",
        ),
        // 狩猎特征
        def(
            "ambush-predator",
            "Ambush Predator",
            Hunting,
            Rare,
            &["herbivore"],
            &["night-vision"],
            "Strikes from cover after long, patient waits.",
        ),
        def(
            "night-vision",
            "Night Vision",
            Hunting,
            Uncommon,
            &[],
            &[],
            "Large light-gathering eyes for hunting after dusk.",
        ),
        def(
            "swift-runner",
            "Swift Runner",
            Hunting,
            Uncommon,
            &[],
            &[],
            "Sustained sprints that run prey to exhaustion.",
        ),
        def(
            "tyrant-presence",
            "Tyrant Presence",
            Hunting,
            Legendary,
            &["herbivore"],
            &["sharp-teeth", "massive-jaw", "predator-instincts"],
            "An apex aura that scatters lesser creatures.",
        ),
        // 环境特征
        def(
            "semi-aquatic",
            "Semi-Aquatic",
            Environmental,
            Uncommon,
            &["desert-adapted"],
            &[],
            "Equally at home in rivers and on shorelines.",
        ),
        def(
            "desert-adapted",
            "Desert Adapted",
            Environmental,
            Uncommon,
            &[],
            &[],
            "Conserves water through scorching days.",
        ),
        def(
            "canopy-grazer",
            "Canopy Grazer",
            Environmental,
            Uncommon,
            &[],
            &["long-neck"],
            "Browses the treetops other herbivores cannot reach.",
        ),
        def(
            "volcanic-born",
            "Volcanic Born",
            Environmental,
            Legendary,
            &["semi-aquatic"],
            &["thick-hide"],
            "Hatched in ashfall, indifferent to heat.",
        ),
    ]
}

impl TraitCatalog {
    /// 加载内置恐龙特性目录。
    pub fn builtin() -> TraitEngineResult<Self> {
        Self::load(builtin_definitions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = TraitCatalog::builtin().unwrap();
        assert!(catalog.len() >= 20);
        assert!(catalog.get("sharp-teeth").is_some());
        assert!(catalog.get("agile").is_some());
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let catalog = TraitCatalog::builtin().unwrap();
        for category in TraitCategory::all_variants() {
            assert!(
                !catalog.by_category(category).is_empty(),
                "no builtin traits in category {}",
                category
            );
        }
    }

    #[test]
    fn test_builtin_relationships_reference_known_ids() {
        let catalog = TraitCatalog::builtin().unwrap();
        for definition in builtin_definitions() {
            for other in definition.conflicts.iter().chain(definition.synergies.iter()) {
                assert!(
                    catalog.get(other).is_some(),
                    "{} references unknown trait {}",
                    definition.id,
                    other
                );
            }
        }
    }
}
