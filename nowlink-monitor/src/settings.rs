use std::error::Error;
use std::path::PathBuf;
use std::{env, io};

use nowlink_api::MacAddress;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Serial {
    /// Device node of the gateway; line settings are left to the OS
    pub path: String,
    #[serde(default = "Serial::default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl Serial {
    fn default_reconnect_delay_ms() -> u64 {
        2000
    }
}

/// Entity to ask for a discovery announcement once the gateway is up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Probe {
    pub mac: String,
    pub entity: String,
}

impl Probe {
    pub fn peer(&self) -> Result<MacAddress, Box<dyn Error>> {
        Ok(self.mac.parse::<MacAddress>()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub serial: Serial,
    #[serde(rename = "probe", default)]
    pub probes: Vec<Probe>,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }

    pub fn from_toml(source: &str) -> Result<Self, Box<dyn Error>> {
        let mut settings: Settings = toml::from_str(source)?;

        for probe in &settings.probes {
            probe.peer()?;
        }

        settings.serial.path = Self::normalize_path(&settings.serial.path)?
            .to_string_lossy()
            .to_string();

        Ok(settings)
    }

    /// Parsed probe targets, in file order
    pub fn probe_targets(&self) -> Result<Vec<(MacAddress, String)>, Box<dyn Error>> {
        self.probes
            .iter()
            .map(|probe| Ok((probe.peer()?, probe.entity.clone())))
            .collect()
    }

    fn normalize_path(path: &str) -> io::Result<PathBuf> {
        let path_buf = PathBuf::from(path);

        Ok(if path_buf.is_absolute() {
            path_buf
        } else {
            env::current_dir()?.as_path().join(&path_buf)
        })
    }
}
