use anyhow::{anyhow, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug, Default)]
#[command(
    name = "Rust Hike",
    about = "Longest hike through a sloped maze, solved by corridor condensation.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the map file")]
    pub map_path: Option<String>,

    #[arg(long, help = "Append run statistics as JSON lines to this file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Solver to use: graph or grid")]
    pub solver: Option<String>,

    #[arg(long, help = "Movement regime: slopes, free or both")]
    pub regime: Option<String>,

    #[arg(long, help = "Give up after expanding this many search states")]
    pub budget: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub map_path: String,
    pub output_path: Option<String>,
    pub solver: String,
    pub regime: String,
    pub budget: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: "map_file/test/sample.map".to_string(),
            output_path: None,
            solver: "graph".to_string(),
            regime: "both".to_string(),
            budget: None,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML config")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(map_path) = &cli.map_path {
            self.map_path = map_path.clone();
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        if let Some(solver) = &cli.solver {
            self.solver = solver.clone();
        }
        if let Some(regime) = &cli.regime {
            self.regime = regime.clone();
        }
        if cli.budget.is_some() {
            self.budget = cli.budget;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.solver.as_str() {
            "graph" | "grid" => {}
            other => return Err(anyhow!("Unknown solver {other:?}, expected graph or grid")),
        }

        self.directed_regimes()?;

        if self.budget == Some(0) {
            return Err(anyhow!("Search budget must be greater than 0"));
        }
        Ok(())
    }

    /// Regimes to run, as values of the `directed` flag: `true` follows slopes.
    pub fn directed_regimes(&self) -> anyhow::Result<Vec<bool>> {
        match self.regime.as_str() {
            "slopes" => Ok(vec![true]),
            "free" => Ok(vec![false]),
            "both" => Ok(vec![true, false]),
            other => Err(anyhow!(
                "Unknown regime {other:?}, expected slopes, free or both"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.directed_regimes().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_yaml_fills_missing_fields_with_defaults() {
        let config = Config::from_yaml_str("solver: grid\nbudget: 500\n").unwrap();
        assert_eq!(config.solver, "grid");
        assert_eq!(config.budget, Some(500));
        assert_eq!(config.regime, "both");
        assert_eq!(config.map_path, Config::default().map_path);
    }

    #[test]
    fn test_yaml_rejects_unknown_fields() {
        assert!(Config::from_yaml_str("seed: 3\n").is_err());
    }

    #[test]
    fn test_command_line_overrides_yaml() {
        let config = Config::from_yaml_str("regime: free\nmap_path: a.map\n").unwrap();
        let cli = Cli {
            map_path: Some("b.map".to_string()),
            regime: Some("slopes".to_string()),
            ..Cli::default()
        };
        let config = config.override_from_command_line(&cli).unwrap();
        assert_eq!(config.map_path, "b.map");
        assert_eq!(config.directed_regimes().unwrap(), vec![true]);
        assert_eq!(config.solver, "graph");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_solver = Config {
            solver: "astar".to_string(),
            ..Config::default()
        };
        assert!(bad_solver.validate().is_err());

        let bad_regime = Config {
            regime: "uphill".to_string(),
            ..Config::default()
        };
        assert!(bad_regime.validate().is_err());

        let zero_budget = Config {
            budget: Some(0),
            ..Config::default()
        };
        assert!(zero_budget.validate().is_err());
    }
}
