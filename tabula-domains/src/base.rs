//! Configurable domains.
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::Path;

/// A domain built from a configuration.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the domain.
    fn build(config: Self::Config) -> Self;

    /// Builds the domain with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config))
    }
}
