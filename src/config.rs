use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub budget: BudgetConfig,
    pub pricing: PricingConfig,
    pub fallback: FallbackConfig,
    /// Overrides the journal/budget directory. Mostly for tests.
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub enabled: bool,
    pub base_url: String,
    /// Name of the environment variable holding the service key.
    pub api_key_env: String,
    pub timeout_ms: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_ai_base_url(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_ai_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub daily_max_calls: u32,
    pub per_product_max_calls: u32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            daily_max_calls: default_daily_max_calls(),
            per_product_max_calls: default_per_product_max_calls(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Flat shipping estimate used when the supplier does not break it out.
    pub default_shipping_cost: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_shipping_cost: default_shipping_cost(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fixes the sampling seed so fallback output is reproducible.
    pub seed: Option<u64>,
}

fn default_ai_base_url() -> String {
    "http://127.0.0.1:8790".into()
}

fn default_api_key_env() -> String {
    "ETSMART_AI_API_KEY".into()
}

fn default_ai_timeout_ms() -> u64 {
    // Upstream platform cuts us off around 50s; leave headroom.
    45_000
}

fn default_daily_max_calls() -> u32 {
    200
}

fn default_per_product_max_calls() -> u32 {
    3
}

fn default_shipping_cost() -> f64 {
    5.0
}

impl AppConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
