//! Configuration of tabular processes.
use crate::reachability::EntityOrdering;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TabularMdp`](crate::TabularMdp), [`TabularPomdp`](crate::TabularPomdp)
/// and [`TabularStochasticGame`](crate::TabularStochasticGame).
#[derive(Debug, Default, Deserialize, Serialize, PartialEq, Clone)]
pub struct TabularConfig {
    /// Order of states, actions and observations along the array axes.
    #[serde(default)]
    pub ordering: EntityOrdering,
}

impl TabularConfig {
    /// Sets the order of entities along the array axes.
    pub fn ordering(mut self, v: EntityOrdering) -> Self {
        self.ordering = v;
        self
    }

    /// Constructs [`TabularConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TabularConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
