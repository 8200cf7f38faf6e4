// 预设系统 - 恐龙配置的命名快照
// 开发心理：预设是玩家投入时间的保障，需要可靠的持久化和容量控制
// 设计原则：存储后端可注入、固定保留上限、最旧优先淘汰、版本兼容

use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trait_engine::TraitSelection;

// 快照格式版本
pub const PRESET_VERSION: u32 = 1;

// 默认保留上限
pub const DEFAULT_PRESET_CAPACITY: usize = 20;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("Preset not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type PresetResult<T> = Result<T, PresetError>;

impl From<serde_json::Error> for PresetError {
    fn from(error: serde_json::Error) -> Self {
        PresetError::Serialization(error.to_string())
    }
}

// 键值存储抽象,预设管理器不关心底层介质
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PresetResult<()>;
    fn delete(&mut self, key: &str) -> PresetResult<()>;
    fn keys(&self) -> PresetResult<Vec<String>>;
}

// 内存存储,用于测试和未登录会话
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PresetResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> PresetResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> PresetResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// 单文件JSON存储,整表读写
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> PresetResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let file = File::open(&path).map_err(|e| PresetError::Storage(e.to_string()))?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            HashMap::new()
        };
        debug!("预设文件已打开: {:?} ({} 条)", path, entries.len());
        Ok(Self { path, entries })
    }

    fn persist(&self) -> PresetResult<()> {
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent).map_err(|e| PresetError::Storage(e.to_string()))?;
        }
        let file = File::create(&self.path).map_err(|e| PresetError::Storage(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush().map_err(|e| PresetError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PresetResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PresetResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn delete(&mut self, key: &str) -> PresetResult<()> {
        self.entries.remove(key);
        self.persist()
    }

    fn keys(&self) -> PresetResult<Vec<String>> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// 预设快照数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetSnapshot {
    pub version: u32,
    pub id: String,
    pub name: String,
    pub traits: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl PresetSnapshot {
    pub fn selection(&self) -> TraitSelection {
        TraitSelection::from_ids(self.traits.iter().cloned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// 进程内单调序号,保证同一毫秒内生成的id仍可排序
static PRESET_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn generate_preset_id() -> String {
    let sequence = PRESET_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "preset-{}-{:06}-{:04x}",
        Utc::now().timestamp_millis(),
        sequence,
        fastrand::u16(..)
    )
}

// 预设管理器,持有注入的存储后端和固定保留上限
pub struct PresetManager {
    store: Box<dyn KeyValueStore>,
    capacity: usize,
}

impl PresetManager {
    pub fn new(store: Box<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    pub fn with_default_capacity(store: Box<dyn KeyValueStore>) -> Self {
        Self::new(store, DEFAULT_PRESET_CAPACITY)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn save(&mut self, name: &str, selection: &TraitSelection) -> PresetResult<String> {
        let id = generate_preset_id();
        let snapshot = PresetSnapshot {
            version: PRESET_VERSION,
            id: id.clone(),
            name: name.to_string(),
            traits: selection.iter().map(String::from).collect(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&snapshot)?;
        self.store.set(&id, &json)?;
        info!("预设已保存: {} ({})", name, id);
        self.enforce_capacity()?;
        Ok(id)
    }

    /// 按创建时间升序列出全部预设。
    pub fn list(&self) -> PresetResult<Vec<PresetSummary>> {
        let mut summaries = Vec::new();
        for key in self.store.keys()? {
            match self.load(&key) {
                Ok(snapshot) => summaries.push(PresetSummary {
                    id: snapshot.id,
                    name: snapshot.name,
                    created_at: snapshot.created_at,
                }),
                Err(e) => warn!("预设条目损坏,已跳过: {} ({})", key, e),
            }
        }
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    pub fn load(&self, id: &str) -> PresetResult<PresetSnapshot> {
        let json = self
            .store
            .get(id)?
            .ok_or_else(|| PresetError::NotFound(id.to_string()))?;
        let snapshot: PresetSnapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }

    pub fn delete(&mut self, id: &str) -> PresetResult<()> {
        if self.store.get(id)?.is_none() {
            return Err(PresetError::NotFound(id.to_string()));
        }
        self.store.delete(id)
    }

    // 超出上限时按最旧优先淘汰
    fn enforce_capacity(&mut self) -> PresetResult<()> {
        let summaries = self.list()?;
        if summaries.len() <= self.capacity {
            return Ok(());
        }
        let excess = summaries.len() - self.capacity;
        for summary in summaries.into_iter().take(excess) {
            info!("预设超出上限,淘汰最旧条目: {}", summary.id);
            self.store.delete(&summary.id)?;
        }
        Ok(())
    }
}
