use std::path::PathBuf;

pub use wallet_config::{Config, ConfigError, ConfigManager, CONFIG_KEYS};

pub fn manager_with_base(base: PathBuf) -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}

/// Directory holding the wallet documents: the configured `data_dir`, or
/// `base` when none is set.
pub fn data_dir_for(config: &Config, base: PathBuf) -> PathBuf {
    config.data_dir.clone().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_defaults_to_base() {
        let base = PathBuf::from("/tmp/wallet-home");
        let mut config = Config::default();
        assert_eq!(data_dir_for(&config, base.clone()), base);

        config.data_dir = Some(PathBuf::from("/srv/wallet"));
        assert_eq!(data_dir_for(&config, base), PathBuf::from("/srv/wallet"));
    }
}
