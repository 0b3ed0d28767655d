//! Command-line surface

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser};

use dz_config::{load_config, parse_list, parse_name_overrides, ConfigResult, GeneratorConfig};
use dz_core::{Artifact, UnitSystem};

/// Generate Home Assistant MQTT bridge configuration from a Domoticz hub.
#[derive(Parser, Debug)]
#[command(name = "dz-hass-gen")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration file; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hub address, e.g. 192.168.1.5:8080.
    #[arg(long, visible_alias = "host")]
    pub domoticz_host: Option<String>,

    /// Temperature units of the generated entities (metric or imperial).
    #[arg(short, long)]
    pub unit: Option<UnitSystem>,

    /// Comma-separated hardware names whose devices are skipped.
    #[arg(long)]
    pub ignore_types: Option<String>,

    /// Comma-separated thermostat names, e.g. "50:Downstairs,40:Upstairs".
    #[arg(long)]
    pub climate_naming_override: Option<String>,

    /// Directory the output directories are resolved against (default: current directory).
    #[arg(long)]
    pub output_root: Option<PathBuf>,

    #[command(flatten)]
    pub outputs: OutputArgs,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Per-artifact destination overrides
#[derive(ClapArgs, Debug, Default)]
pub struct OutputArgs {
    /// Automation output directory.
    #[arg(long)]
    pub automation_dir: Option<PathBuf>,
    /// Automation output file name.
    #[arg(long)]
    pub automation_file: Option<String>,

    /// Binary sensor output directory.
    #[arg(long)]
    pub binary_sensor_dir: Option<PathBuf>,
    /// Binary sensor output file name.
    #[arg(long)]
    pub binary_sensor_file: Option<String>,

    /// Climate output directory.
    #[arg(long)]
    pub climate_dir: Option<PathBuf>,
    /// Climate output file name.
    #[arg(long)]
    pub climate_file: Option<String>,

    /// Group output directory.
    #[arg(long)]
    pub group_dir: Option<PathBuf>,
    /// Group output file name.
    #[arg(long)]
    pub group_file: Option<String>,

    /// Light output directory.
    #[arg(long)]
    pub light_dir: Option<PathBuf>,
    /// Light output file name.
    #[arg(long)]
    pub light_file: Option<String>,

    /// Lock output directory.
    #[arg(long)]
    pub lock_dir: Option<PathBuf>,
    /// Lock output file name.
    #[arg(long)]
    pub lock_file: Option<String>,

    /// Power sensor output directory.
    #[arg(long)]
    pub power_dir: Option<PathBuf>,
    /// Power sensor output file name.
    #[arg(long)]
    pub power_file: Option<String>,

    /// Sensor output directory.
    #[arg(long)]
    pub sensor_dir: Option<PathBuf>,
    /// Sensor output file name.
    #[arg(long)]
    pub sensor_file: Option<String>,

    /// Utility meter output directory.
    #[arg(long)]
    pub utility_meter_dir: Option<PathBuf>,
    /// Utility meter output file name.
    #[arg(long)]
    pub utility_meter_file: Option<String>,
}

impl OutputArgs {
    fn overrides(&self, artifact: Artifact) -> (Option<&PathBuf>, Option<&String>) {
        let (dir, file) = match artifact {
            Artifact::Automation => (&self.automation_dir, &self.automation_file),
            Artifact::BinarySensor => (&self.binary_sensor_dir, &self.binary_sensor_file),
            Artifact::Climate => (&self.climate_dir, &self.climate_file),
            Artifact::Group => (&self.group_dir, &self.group_file),
            Artifact::Light => (&self.light_dir, &self.light_file),
            Artifact::Lock => (&self.lock_dir, &self.lock_file),
            Artifact::Power => (&self.power_dir, &self.power_file),
            Artifact::Sensor => (&self.sensor_dir, &self.sensor_file),
            Artifact::UtilityMeter => (&self.utility_meter_dir, &self.utility_meter_file),
        };
        (dir.as_ref(), file.as_ref())
    }
}

impl Args {
    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self) -> ConfigResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorConfig::default(),
        };
        self.apply(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut GeneratorConfig) -> ConfigResult<()> {
        if let Some(host) = &self.domoticz_host {
            config.host = host.clone();
        }
        if let Some(unit) = self.unit {
            config.unit = unit;
        }
        if let Some(list) = &self.ignore_types {
            config.ignore_hardware = parse_list(list);
        }
        if let Some(pairs) = &self.climate_naming_override {
            config.climate_names = parse_name_overrides(pairs)?;
        }

        for artifact in Artifact::ALL {
            let (dir, file) = self.outputs.overrides(artifact);
            let target = config.outputs.get_mut(artifact);
            if let Some(dir) = dir {
                target.dir = dir.clone();
            }
            if let Some(file) = file {
                target.file = file.clone();
            }
        }
        Ok(())
    }
}
