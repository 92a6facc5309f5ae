//! User configuration: `~/.pino/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use pino_core::SettlementRates;
use pino_report::{ExportOptions, StatementOptions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rates: RatesSection,
    pub export: ExportSection,
    pub statement: StatementSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesSection {
    pub rate_per_km: f64,
    pub daily_allowance: i64,
}

impl Default for RatesSection {
    fn default() -> Self {
        let rates = SettlementRates::default();
        Self {
            rate_per_km: rates.rate_per_km,
            daily_allowance: rates.daily_allowance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub out_dir: PathBuf,
    pub settle_delay_ms: u64,
    pub interval_delay_ms: u64,
    pub halt_on_error: bool,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            settle_delay_ms: 100,
            interval_delay_ms: 500,
            halt_on_error: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementSection {
    /// Settlement period shown in statement titles.
    pub period_label: String,
    /// Footer note; empty means no note line.
    pub note: String,
}

impl Default for StatementSection {
    fn default() -> Self {
        Self {
            period_label: "1月".to_string(),
            note: String::new(),
        }
    }
}

impl Config {
    pub fn rates(&self) -> SettlementRates {
        SettlementRates {
            rate_per_km: self.rates.rate_per_km,
            daily_allowance: self.rates.daily_allowance,
        }
    }

    pub fn statement_options(&self) -> StatementOptions {
        StatementOptions {
            period_label: self.statement.period_label.clone(),
            note: if self.statement.note.is_empty() {
                None
            } else {
                Some(self.statement.note.clone())
            },
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            out_dir: self.export.out_dir.clone(),
            settle_delay: Duration::from_millis(self.export.settle_delay_ms),
            interval_delay: Duration::from_millis(self.export.interval_delay_ms),
            halt_on_error: self.export.halt_on_error,
        }
    }
}

pub fn pino_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pino"))
}

pub fn ensure_pino_home() -> Result<PathBuf> {
    let dir = pino_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pino_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
