use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::BudgetConfig;

/// An empty `day` marks the state stale; first use rolls it over.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BudgetState {
    day: String,
    calls: HashMap<String, u32>,
}

impl BudgetState {
    fn calls_for(&self, product_key: &str) -> u32 {
        self.calls.get(product_key).copied().unwrap_or(0)
    }

    fn total_calls(&self) -> u32 {
        self.calls.values().sum()
    }
}

/// Caps spend on the AI service, per day and per product, with state
/// persisted beside the journal.
pub struct AiBudget {
    config: BudgetConfig,
    state_path: PathBuf,
    state: BudgetState,
}

impl AiBudget {
    pub fn load(config: BudgetConfig, data_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(data_dir)?;
        let state_path = data_dir.join("ai-budget-state.json");
        let state = match fs::read_to_string(&state_path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(e) if e.kind() == ErrorKind::NotFound => BudgetState::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            config,
            state_path,
            state,
        })
    }

    fn rollover_if_needed(&mut self) {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        if self.state.day != today {
            self.state = BudgetState {
                day: today,
                calls: HashMap::new(),
            };
        }
    }

    fn persist(&self) -> anyhow::Result<()> {
        fs::write(&self.state_path, serde_json::to_string_pretty(&self.state)?)?;
        Ok(())
    }

    pub fn can_spend_call(&mut self, product_key: &str) -> bool {
        self.rollover_if_needed();
        self.state.total_calls() < self.config.daily_max_calls
            && self.state.calls_for(product_key) < self.config.per_product_max_calls
    }

    pub fn record_call(&mut self, product_key: &str) -> anyhow::Result<()> {
        self.rollover_if_needed();
        *self.state.calls.entry(product_key.to_string()).or_default() += 1;
        self.persist()
    }

    pub fn usage_snapshot(&mut self, product_key: &str) -> (u32, u32, u32, u32) {
        self.rollover_if_needed();
        (
            self.state.total_calls(),
            self.config.daily_max_calls,
            self.state.calls_for(product_key),
            self.config.per_product_max_calls,
        )
    }
}
