// 搜索系统 - 图片/资料查询提供方的封装
// 开发心理：查询提供方是不透明的外部服务，接口按约定不抛错
// 设计原则：网络缺失时降级为空结果集而不是失败，未知输入返回空列表

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub score: f64,
}

// 查询接口:按约定不可失败,传输层问题由实现方内部消化
pub trait LookupProvider {
    fn query(&self, text: &str) -> Vec<SearchResult>;
}

struct MockEntry {
    keywords: &'static [&'static str],
    id: &'static str,
    title: &'static str,
    image_url: &'static str,
}

// 关键词匹配的离线查询实现
pub struct MockLookupProvider {
    entries: Vec<MockEntry>,
}

impl Default for MockLookupProvider {
    fn default() -> Self {
        Self {
            entries: vec![
                MockEntry {
                    keywords: &["rex", "tyrannosaurus", "carnivore", "predator"],
                    id: "dino-trex",
                    title: "Tyrannosaurus Rex",
                    image_url: "https://img.dinoforge.dev/trex.png",
                },
                MockEntry {
                    keywords: &["triceratops", "horn", "herbivore", "frill"],
                    id: "dino-trike",
                    title: "Triceratops",
                    image_url: "https://img.dinoforge.dev/triceratops.png",
                },
                MockEntry {
                    keywords: &["velociraptor", "raptor", "pack", "predator"],
                    id: "dino-raptor",
                    title: "Velociraptor",
                    image_url: "https://img.dinoforge.dev/velociraptor.png",
                },
                MockEntry {
                    keywords: &["brachiosaurus", "neck", "herbivore", "sauropod"],
                    id: "dino-brachio",
                    title: "Brachiosaurus",
                    image_url: "https://img.dinoforge.dev/brachiosaurus.png",
                },
                MockEntry {
                    keywords: &["ankylosaurus", "armor", "club", "tank"],
                    id: "dino-anky",
                    title: "Ankylosaurus",
                    image_url: "https://img.dinoforge.dev/ankylosaurus.png",
                },
                MockEntry {
                    keywords: &["spinosaurus", "sail", "aquatic", "fish"],
                    id: "dino-spino",
                    title: "Spinosaurus",
                    image_url: "https://img.dinoforge.dev/spinosaurus.png",
                },
            ],
        }
    }
}

impl MockLookupProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LookupProvider for MockLookupProvider {
    fn query(&self, text: &str) -> Vec<SearchResult> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let terms: Vec<&str> = needle.split_whitespace().collect();
        let mut results = Vec::new();
        for entry in &self.entries {
            let hits = terms
                .iter()
                .filter(|term| {
                    entry.keywords.iter().any(|k| k.contains(*term))
                        || entry.title.to_lowercase().contains(*term)
                })
                .count();
            if hits > 0 {
                results.push(SearchResult {
                    id: entry.id.to_string(),
                    title: entry.title.to_string(),
                    image_url: entry.image_url.to_string(),
                    score: hits as f64 / terms.len() as f64,
                });
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        debug!("查询 {:?} 命中 {} 条", text, results.len());
        results
    }
}
