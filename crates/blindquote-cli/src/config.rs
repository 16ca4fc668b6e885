// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use blindquote_app::{
    AxisLimits, DimensionLimits, FabricType, PriceKey, PriceMatrices, PriceMatrix, PriceTable,
    QuoteSettings, dollars_to_cents,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "blindquote";
const DEFAULT_DUE_DAYS: i64 = 14;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub quote: Quote,
    #[serde(default)]
    pub matrix: Vec<MatrixEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            prices: BTreeMap::new(),
            limits: Limits::default(),
            quote: Quote::default(),
            matrix: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Limits {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quote {
    pub due_days: Option<i64>,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            due_days: Some(DEFAULT_DUE_DAYS),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatrixEntry {
    pub fabric: String,
    pub widths: Vec<f64>,
    pub drops: Vec<f64>,
    pub prices: Vec<Vec<f64>>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("BLINDQUOTE_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set BLINDQUOTE_CONFIG_PATH to the config file"
            )
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` at the top and keep values under [prices], [limits], [quote] and [[matrix]]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        for (axis, min, max) in [
            ("width", self.limits.min_width, self.limits.max_width),
            ("height", self.limits.min_height, self.limits.max_height),
        ] {
            for (bound, value) in [("min", min), ("max", max)] {
                if let Some(value) = value
                    && (!value.is_finite() || value <= 0.0)
                {
                    bail!(
                        "limits.{bound}_{axis} in {} must be a positive number, got {value}",
                        path.display()
                    );
                }
            }
            if let (Some(min), Some(max)) = (min, max)
                && min > max
            {
                bail!(
                    "limits.min_{axis} ({min}) is larger than limits.max_{axis} ({max}) in {}",
                    path.display()
                );
            }
        }

        if let Some(days) = self.quote.due_days
            && !(1..=i64::from(u16::MAX)).contains(&days)
        {
            bail!(
                "quote.due_days in {} must be between 1 and {}, got {}",
                path.display(),
                u16::MAX,
                days
            );
        }

        self.price_table()
            .with_context(|| format!("invalid [prices] in {}", path.display()))?;
        self.matrices()
            .with_context(|| format!("invalid [[matrix]] in {}", path.display()))?;
        Ok(())
    }

    pub fn price_table(&self) -> Result<PriceTable> {
        let mut table = PriceTable::default();
        for (name, dollars) in &self.prices {
            let key = PriceKey::parse(name).ok_or_else(|| {
                let known = PriceKey::ALL.map(PriceKey::as_str).join(", ");
                anyhow!("unknown price key {name:?}; expected one of: {known}")
            })?;
            table.set(key, dollars_to_cents(name, *dollars)?)?;
        }
        Ok(table)
    }

    pub fn matrices(&self) -> Result<PriceMatrices> {
        let mut matrices = PriceMatrices::default();
        for entry in &self.matrix {
            let fabric = FabricType::parse(&entry.fabric).ok_or_else(|| {
                anyhow!(
                    "unknown fabric {:?}; use one of B1, B2, B3, B4, B5, SN",
                    entry.fabric
                )
            })?;
            let matrix = entry
                .to_matrix()
                .with_context(|| format!("matrix for fabric {}", fabric.as_str()))?;
            if matrices.insert(fabric, matrix).is_some() {
                bail!("fabric {} has more than one matrix", fabric.as_str());
            }
        }
        Ok(matrices)
    }

    pub fn limits(&self) -> DimensionLimits {
        DimensionLimits {
            width: AxisLimits {
                min: self.limits.min_width,
                max: self.limits.max_width,
            },
            height: AxisLimits {
                min: self.limits.min_height,
                max: self.limits.max_height,
            },
        }
    }

    pub fn due_days(&self) -> u16 {
        self.quote
            .due_days
            .and_then(|days| u16::try_from(days).ok())
            .unwrap_or(DEFAULT_DUE_DAYS as u16)
    }

    pub fn settings(&self) -> Result<QuoteSettings> {
        Ok(QuoteSettings {
            prices: self.price_table()?,
            matrices: self.matrices()?,
            limits: self.limits(),
        })
    }

    pub fn example_config(path: &Path) -> String {
        let prices = PriceKey::ALL
            .into_iter()
            .map(|key| {
                let cents = key.default_cents();
                format!("{} = {}.{:02}\n", key.as_str(), cents / 100, cents % 100)
            })
            .collect::<String>();
        format!(
            "# blindquote config\n# Place this file at: {}\n\nversion = 1\n\n[prices]\n# Unit sale prices in dollars. combo_bracket is per pair of dual rows.\n{}\n[limits]\n# Optional dimension bounds in mm.\n# min_width = 250\n# max_width = 3300\n# min_height = 300\n# max_height = 3500\n\n[quote]\ndue_days = {}\n\n# One [[matrix]] per fabric type. prices[i][j] is the price for drops[i] by widths[j].\n# [[matrix]]\n# fabric = \"B1\"\n# widths = [600, 900, 1200]\n# drops = [1000, 2000]\n# prices = [[100.0, 120.0, 140.0], [150.0, 170.0, 190.0]]\n",
            path.display(),
            prices,
            DEFAULT_DUE_DAYS,
        )
    }
}

impl MatrixEntry {
    fn to_matrix(&self) -> Result<PriceMatrix> {
        check_bounds("widths", &self.widths)?;
        check_bounds("drops", &self.drops)?;
        if self.prices.len() != self.drops.len() {
            bail!(
                "prices has {} rows but drops has {} entries",
                self.prices.len(),
                self.drops.len()
            );
        }

        let mut prices = Vec::with_capacity(self.prices.len());
        for (drop_index, row) in self.prices.iter().enumerate() {
            if row.len() != self.widths.len() {
                bail!(
                    "prices row {} has {} cells but widths has {} entries",
                    drop_index + 1,
                    row.len(),
                    self.widths.len()
                );
            }
            let cents = row
                .iter()
                .map(|dollars| dollars_to_cents("matrix price", *dollars))
                .collect::<Result<Vec<_>, _>>()?;
            prices.push(cents);
        }

        Ok(PriceMatrix {
            widths: self.widths.clone(),
            drops: self.drops.clone(),
            prices,
        })
    }
}

fn check_bounds(name: &str, bounds: &[f64]) -> Result<()> {
    if bounds.is_empty() {
        bail!("{name} must list at least one size");
    }
    if bounds.iter().any(|bound| !bound.is_finite() || *bound <= 0.0) {
        bail!("{name} must contain positive sizes only");
    }
    if bounds.windows(2).any(|pair| pair[1] <= pair[0]) {
        bail!("{name} must be strictly increasing");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use blindquote_app::{FabricType, PriceKey};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let (temp, path) = blindquote_testkit::temp_config_path()?;
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.due_days(), 14);
        assert_eq!(config.price_table()?.unit_cents(PriceKey::ComboBracket), 1_000);
        assert!(config.matrices()?.is_empty());
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[prices]\ncharger = 45.0\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        assert!(error.to_string().contains("version = 1"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn v1_config_parses_prices_limits_and_matrix() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[prices]\ncombo_bracket = 12.5\nremote_multi_channel_16 = 75\n[limits]\nmax_width = 3000\n[quote]\ndue_days = 30\n[[matrix]]\nfabric = \"b2\"\nwidths = [600, 900]\ndrops = [1000]\nprices = [[100.0, 120.5]]\n",
        )?;
        let config = Config::load(&path)?;
        let settings = config.settings()?;
        assert_eq!(settings.prices.unit_cents(PriceKey::ComboBracket), 1_250);
        assert_eq!(settings.prices.unit_cents(PriceKey::RemoteMultiChannel16), 7_500);
        assert_eq!(settings.prices.unit_cents(PriceKey::Charger), 5_000);
        assert_eq!(settings.limits.width.max, Some(3000.0));
        assert_eq!(config.due_days(), 30);
        let matrix = settings
            .matrices
            .get(FabricType::B2)
            .expect("B2 matrix from config");
        assert_eq!(matrix.line_price(700.0, 900.0), Ok(12_050));
        Ok(())
    }

    #[test]
    fn unknown_price_key_lists_known_keys() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[prices]\nslim_bracket = 4.0\n")?;
        let error = Config::load(&path).expect_err("unknown price key should fail");
        let message = format!("{error:#}");
        assert!(message.contains("slim_bracket"), "unexpected message: {message}");
        assert!(message.contains("combo_bracket"), "unexpected message: {message}");
        Ok(())
    }

    #[test]
    fn remote_prices_are_configured_per_channel() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[prices]\nremote_standard = 99.0\n")?;
        let error = Config::load(&path).expect_err("flat remote price should fail");
        assert!(format!("{error:#}").contains("remote_single_channel"));

        let example = Config::example_config(&path);
        assert!(!example.contains("remote_standard"));
        assert!(example.contains("remote_single_channel = 20.00"));
        assert!(example.contains("remote_multi_channel_16 = 70.00"));
        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[prices]\ncord_3m = -5\n")?;
        let error = Config::load(&path).expect_err("negative price should fail");
        assert!(format!("{error:#}").contains("non-negative"));
        Ok(())
    }

    #[test]
    fn inverted_limits_are_rejected() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[limits]\nmin_height = 2000\nmax_height = 1000\n")?;
        let error = Config::load(&path).expect_err("inverted limits should fail");
        assert!(error.to_string().contains("limits.min_height"));
        Ok(())
    }

    #[test]
    fn due_days_must_be_positive() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[quote]\ndue_days = 0\n")?;
        let error = Config::load(&path).expect_err("zero due days should fail");
        assert!(error.to_string().contains("quote.due_days"));
        Ok(())
    }

    #[test]
    fn ragged_matrix_is_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[[matrix]]\nfabric = \"B1\"\nwidths = [600, 900]\ndrops = [1000]\nprices = [[100.0]]\n",
        )?;
        let error = Config::load(&path).expect_err("ragged matrix should fail");
        assert!(format!("{error:#}").contains("prices row 1 has 1 cells"));
        Ok(())
    }

    #[test]
    fn unsorted_matrix_bounds_are_rejected() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[[matrix]]\nfabric = \"B1\"\nwidths = [900, 600]\ndrops = [1000]\nprices = [[100.0, 90.0]]\n",
        )?;
        let error = Config::load(&path).expect_err("unsorted widths should fail");
        assert!(format!("{error:#}").contains("strictly increasing"));
        Ok(())
    }

    #[test]
    fn duplicate_fabric_matrix_is_rejected() -> Result<()> {
        let entry = "[[matrix]]\nfabric = \"SN\"\nwidths = [600]\ndrops = [1000]\nprices = [[80.0]]\n";
        let (_temp, path) = write_config(&format!("version = 1\n{entry}{entry}"))?;
        let error = Config::load(&path).expect_err("duplicate fabric should fail");
        assert!(format!("{error:#}").contains("more than one matrix"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("BLINDQUOTE_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("BLINDQUOTE_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let (_temp, path) = blindquote_testkit::temp_config_path()?;
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[prices]"));
        assert!(example.contains("combo_bracket = 10.00"));
        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(
            config.price_table()?,
            blindquote_testkit::reference_prices()
        );
        Ok(())
    }
}
