//! Loader for section-tour configuration with YAML + environment overlays.
//!
//! Sources are merged in increasing precedence: struct defaults, YAML files,
//! inline YAML, then `TOUR__`-prefixed environment variables (`__` separates
//! nesting levels, e.g. `TOUR__TOUR__DELAY_MS=500`). String values may contain
//! `${VAR}` placeholders which are expanded after merging.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tour_common::observability::{LogConfig, LogFormat};
use tour_scroller::{ScrollBehavior, ScrollBlock, ScrollOptions, SectionId, SequentialScroller};
use url::Url;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "TOUR";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub version: Option<String>,
    /// Page to open before touring. Required by the binary unless given on the CLI.
    pub page_url: Option<String>,
    pub driver: DriverConfig,
    pub tour: TourSettings,
    pub logging: LoggingConfig,
}

impl TourConfig {
    /// Parse `page_url`, failing when it is missing or malformed.
    pub fn page_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .page_url
            .as_deref()
            .ok_or(ConfigError::NotFound("page_url".into()))?;
        Url::parse(raw).map_err(|e| ConfigError::Message(format!("invalid page_url {raw:?}: {e}")))
    }
}

/// WebDriver session settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub window_size: (u32, u32),
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: false,
            window_size: (1920, 1080),
        }
    }
}

/// The section list and pacing of a run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    pub sections: Vec<SectionId>,
    pub delay_ms: u64,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            sections: SectionId::defaults(),
            delay_ms: 1000,
            behavior: ScrollBehavior::default(),
            block: ScrollBlock::default(),
        }
    }
}

impl TourSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn scroll_options(&self) -> ScrollOptions {
        ScrollOptions {
            behavior: self.behavior,
            block: self.block,
        }
    }

    pub fn scroller(&self) -> SequentialScroller {
        SequentialScroller::new(self.sections.clone(), self.delay())
            .with_options(self.scroll_options())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub emit_stderr: bool,
    pub dir: Option<PathBuf>,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let base = LogConfig::default();
        Self {
            format: base.format,
            emit_stderr: base.emit_stderr,
            dir: base.log_dir,
            filter: base.default_filter,
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            log_dir: self.dir.clone(),
            emit_stderr: self.emit_stderr,
            format: self.format,
            default_filter: self.filter.clone(),
            ..LogConfig::default()
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct TourConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env: Environment,
}

impl Default for TourConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TourConfigLoader {
    /// Start from struct defaults; `TOUR__` env overrides are applied last.
    ///
    /// ```
    /// use tour_config::TourConfigLoader;
    ///
    /// let config = TourConfigLoader::new()
    ///     .with_yaml_str("version: '1'\ntour:\n  delay_ms: 250")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.tour.delay_ms, 250);
    /// assert_eq!(config.tour.sections.len(), 5);
    /// ```
    pub fn new() -> Self {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("tour.sections");
        Self {
            builder: Config::builder(),
            env,
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, so env-only setups still load.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use tour_config::TourConfigLoader;
    /// use tour_scroller::ScrollBlock;
    ///
    /// let cfg = TourConfigLoader::new()
    ///     .with_yaml_str(
    ///         r##"
    /// page_url: "file:///srv/cv/index.html"
    /// tour:
    ///   sections: ["#profile", "#career"]
    ///   block: center
    /// "##,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.tour.sections.len(), 2);
    /// assert_eq!(cfg.tour.block, ScrollBlock::Center);
    /// assert_eq!(cfg.page_url().unwrap().scheme(), "file");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// Blank section selectors are rejected here, before any browser is started.
    pub fn load(self) -> Result<TourConfig, ConfigError> {
        let cfg = self.builder.add_source(self.env).build()?;

        let mut v: Value = cfg.try_deserialize()?;
        if v.is_null() {
            v = Value::Object(Default::default());
        }
        expand_env_in_value(&mut v);

        let typed: TourConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
