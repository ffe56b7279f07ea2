// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

// Pre-build code for the fwlog crate.

// This makes the values from a Kconfig-style dotconfig available to fwlog, both as conditional
// compilation (for the boolean entries) and as constants in a generated `config` module.  Only the
// fwlog crate itself sees the cfgs.  Applications observe the result through `fwlog::config` and
// `fwlog::level::STATIC_MAX_LEVEL`.

use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regex::Regex;

/// Environment variable naming the dotconfig file.
pub const CONFIG_ENV: &str = "FWLOG_CONFIG";

/// Whether an output device exists.  Without it every log statement compiles away.
pub const PORT: &str = "CONFIG_FWLOG_PORT";
/// The threshold, 0 (none) through 5 (verbose).
pub const LEVEL: &str = "CONFIG_FWLOG_LEVEL";
/// Selects the structured backend instead of the stream backend.
pub const STRUCTURED: &str = "CONFIG_FWLOG_STRUCTURED";
/// Routing tag handed to the structured backend.
pub const TAG: &str = "CONFIG_FWLOG_TAG";

const DEFAULT_LEVEL: i64 = 3;
const DEFAULT_TAG: &str = "fwlog";

/// A single value from a dotconfig line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// `CONFIG_X=y`
    Bool(bool),
    /// `CONFIG_X=12` or `CONFIG_X=-1`
    Int(i64),
    /// `CONFIG_X=0x20`
    Hex(u64),
    /// `CONFIG_X="text"`, stored with its quotes.
    Str(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Hex(n) => write!(f, "{:#x}", n),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// The parsed contents of a dotconfig.
#[derive(Debug, Default)]
pub struct DotConfig {
    entries: BTreeMap<String, Value>,
}

impl DotConfig {
    /// The configuration used when no dotconfig is given: a device is present, the stream backend
    /// is used, and the threshold is INFO.
    pub fn host_default() -> DotConfig {
        let mut config = DotConfig::default();
        config.entries.insert(PORT.to_string(), Value::Bool(true));
        config.fill_defaults();
        config
    }

    /// Parse the text of a dotconfig.  Comments and `# CONFIG_X is not set` lines are skipped.
    /// Anything else that is not a `CONFIG_` assignment is an error.
    pub fn parse(text: &str) -> Result<DotConfig> {
        // The assumption is that hex values are unsigned, and decimal are signed.
        let config_y = Regex::new(r"^(CONFIG_[A-Za-z0-9_]+)=y$").unwrap();
        let config_n = Regex::new(r"^(CONFIG_[A-Za-z0-9_]+)=n$").unwrap();
        let config_hex = Regex::new(r"^(CONFIG_[A-Za-z0-9_]+)=(0x[0-9a-fA-F]+)$").unwrap();
        let config_int = Regex::new(r"^(CONFIG_[A-Za-z0-9_]+)=(-?(?:0|[1-9][0-9]*))$").unwrap();
        // It is unclear what quoting might be used in the .config.
        let config_str = Regex::new(r#"^(CONFIG_[A-Za-z0-9_]+)=(".*")$"#).unwrap();

        let mut config = DotConfig::default();
        for (num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) = if let Some(caps) = config_y.captures(line) {
                (caps[1].to_string(), Value::Bool(true))
            } else if let Some(caps) = config_n.captures(line) {
                (caps[1].to_string(), Value::Bool(false))
            } else if let Some(caps) = config_hex.captures(line) {
                let n = u64::from_str_radix(&caps[2][2..], 16)
                    .with_context(|| format!("line {}: bad hex value", num + 1))?;
                (caps[1].to_string(), Value::Hex(n))
            } else if let Some(caps) = config_int.captures(line) {
                let n = caps[2]
                    .parse()
                    .with_context(|| format!("line {}: bad integer value", num + 1))?;
                (caps[1].to_string(), Value::Int(n))
            } else if let Some(caps) = config_str.captures(line) {
                (caps[1].to_string(), Value::Str(caps[2].to_string()))
            } else {
                bail!("line {}: unrecognized dotconfig entry: {:?}", num + 1, line);
            };
            config.entries.insert(name, value);
        }

        config.fill_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Load the dotconfig named by `FWLOG_CONFIG`, or the host default when it isn't set.
    pub fn from_env() -> Result<DotConfig> {
        match env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("Unable to open dotconfig {:?}", path))?;
                DotConfig::parse(&text).with_context(|| format!("Parsing {:?}", path))
            }
            Err(_) => Ok(DotConfig::host_default()),
        }
    }

    /// Look up a single entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Is the given boolean entry set to `y`.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Value::Bool(true)))
    }

    /// The names of all entries set to `y`.  These become `cfg` directives.
    pub fn bool_cfgs(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| **v == Value::Bool(true))
            .map(|(k, _)| k.as_str())
    }

    /// Write the `config` module.  Every fwlog key is always present, other entries are passed
    /// through so firmware can put its own settings in the same file.
    pub fn write_module<W: Write>(&self, out: &mut W) -> Result<()> {
        for (name, value) in &self.entries {
            writeln!(out, "#[allow(dead_code)]")?;
            match value {
                Value::Bool(b) => writeln!(out, "pub const {}: bool = {};", name, b)?,
                Value::Int(n) => writeln!(out, "pub const {}: isize = {};", name, n)?,
                Value::Hex(n) => writeln!(out, "pub const {}: usize = {:#x};", name, n)?,
                Value::Str(s) => writeln!(out, "pub const {}: &'static str = {};", name, s)?,
            }
        }
        Ok(())
    }

    fn fill_defaults(&mut self) {
        self.entries.entry(PORT.to_string()).or_insert(Value::Bool(false));
        self.entries.entry(STRUCTURED.to_string()).or_insert(Value::Bool(false));
        self.entries.entry(LEVEL.to_string()).or_insert(Value::Int(DEFAULT_LEVEL));
        self.entries
            .entry(TAG.to_string())
            .or_insert_with(|| Value::Str(format!("{:?}", DEFAULT_TAG)));
    }

    fn validate(&self) -> Result<()> {
        match self.entries.get(LEVEL) {
            Some(Value::Int(_)) => (),
            Some(other) => bail!("{} must be a decimal number, got {}", LEVEL, other),
            None => (),
        }
        for name in [PORT, STRUCTURED] {
            if let Some(v) = self.entries.get(name) {
                if !matches!(v, Value::Bool(_)) {
                    bail!("{} must be y or n, got {}", name, v);
                }
            }
        }
        if let Some(v) = self.entries.get(TAG) {
            if !matches!(v, Value::Str(_)) {
                bail!("{} must be a quoted string, got {}", TAG, v);
            }
        }
        Ok(())
    }
}

impl DotConfig {
    /// The `cargo:rustc-cfg` lines for the boolean entries.
    pub fn cfg_directives(&self) -> impl Iterator<Item = String> + '_ {
        self.bool_cfgs().map(|name| format!("cargo:rustc-cfg={}", name))
    }

    /// Problems worth reporting that do not stop the build.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(Value::Int(level)) = self.get(LEVEL) {
            if !(0..=5).contains(level) {
                warnings.push(format!("{}={} is outside 0..=5 and will be clamped", LEVEL, level));
            }
        }
        if self.is_set(STRUCTURED) && !self.is_set(PORT) {
            warnings.push(format!("{} has no effect without {}", STRUCTURED, PORT));
        }
        warnings
    }

    /// Export boolean config entries as `cfg` directives.  This must happen in the crate that
    /// wishes to test them with `#[cfg(...)]`.
    pub fn export_bool_config(&self) {
        for line in self.cfg_directives() {
            println!("{}", line);
        }
    }

    /// Capture all config values as constants in `$OUT_DIR/config.rs`.
    pub fn build_config_mod(&self) {
        let outdir = env::var("OUT_DIR").expect("OUT_DIR must be set");
        let gen_path = Path::new(&outdir).join("config.rs");

        let mut f = fs::File::create(&gen_path).expect("Unable to create config.rs");
        self.write_module(&mut f).expect("Writing config.rs");
    }
}

/// Load the build's dotconfig, once per build script run.  Tells cargo when to rerun, and passes on
/// any warnings.
pub fn load() -> DotConfig {
    // Ensure the build script is rerun when the dotconfig changes.
    println!("cargo:rerun-if-env-changed={}", CONFIG_ENV);
    if let Ok(path) = env::var(CONFIG_ENV) {
        println!("cargo:rerun-if-changed={}", path);
    }

    let config = match DotConfig::from_env() {
        Ok(config) => config,
        Err(e) => panic!("fwlog configuration: {:#}", e),
    };
    for warning in config.warnings() {
        println!("cargo:warning={}", warning);
    }
    config
}
