use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::settings::Settings;

const USER_SETTINGS_FILE_NAME: &str = "settings.yaml";

pub struct FileContext {
    /// Root directory for settings and any other files the program reads.
    pub data_root: PathBuf,
}

impl FileContext {
    pub fn new(data_root: PathBuf) -> Self {
        FileContext { data_root }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.data_root.is_dir() {
            log::info!("Creating data directory {:?}", self.data_root);
            std::fs::create_dir_all(&self.data_root).context(format!(
                "Creating data directory {}",
                self.data_root.to_string_lossy()
            ))?;
        }
        Ok(())
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_root.join(USER_SETTINGS_FILE_NAME)
    }

    /// Loads the settings file, first writing the defaults to it if it does not exist.
    pub fn load_settings(&self) -> Result<Settings> {
        let fp = self.settings_path();

        if fp.is_file() {
            log::info!("Loading settings from {:?}", fp);
            load_settings_file(&fp)
        } else {
            log::info!("Creating default settings file {:?}", fp);
            let settings = Settings::default();
            let file = std::fs::File::create(&fp).context("Creating settings file")?;
            serde_yaml::to_writer(file, &settings).context("Serializing settings")?;
            Ok(settings)
        }
    }
}

fn load_settings_file(fp: &Path) -> Result<Settings> {
    let file = std::fs::File::open(fp).context("Opening settings file")?;
    Ok(serde_yaml::from_reader(file).context("Parsing settings file")?)
}
