//! Mechanism for loading and sharing the run configuration

use event_shapes::{Float, RapidityConvention, ShapeConfig};

use eyre::{ensure, eyre, Result, WrapErr};

use std::{fs, str::FromStr};

/// Run configuration
pub struct Configuration {
    /// Number of events to be generated
    pub num_events: usize,

    /// Collision energy at center of mass (GeV)
    pub e_total: Float,

    /// Number of final-state particles per event
    pub num_outgoing: usize,

    /// Seed of the random number generator
    pub seed: u64,

    /// Parameters of the event shape computation
    pub shapes: ShapeConfig,
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and print it out
    pub fn load(file_name: &str) -> Result<Self> {
        // Read out the run's configuration file or die trying.
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Could not read configuration file {file_name}"))?;

        // Configuration items are the first non-whitespace chunk of text on
        // each line, anything after that is a comment. Blank lines are ignored.
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // This closure fetches the next configuration item, tagging it with
        // the name of the configuration field which it is supposed to fill to
        // ease error reporting, and handling unexpected end-of-file too.
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        // Decode the configuration items into concrete values
        let num_events = next_item("num_events")?.parse::<usize>()?;
        let e_total = next_item("e_total")?.parse::<Float>()?;
        let num_outgoing = next_item("num_outgoing")?.parse::<usize>()?;
        let eta_central = next_item("eta_central")?.parse::<Float>()?;
        let convention = if next_item("rapidity")?.parse_bool()? {
            RapidityConvention::Rapidity
        } else {
            RapidityConvention::Pseudorapidity
        };
        let min_multiplicity = next_item("min_multiplicity")?.parse::<usize>()?;
        let beam_distance_factor = next_item("beam_distance_factor")?.parse::<Float>()?;
        let seed = next_item("seed")?.parse::<u64>()?;
        let shapes = ShapeConfig::new(eta_central, convention, min_multiplicity)
            .and_then(|cfg| cfg.with_beam_distance_factor(beam_distance_factor))
            .wrap_err("Invalid event shape parameters")?;
        let config = Configuration {
            num_events,
            e_total,
            num_outgoing,
            seed,
            shapes,
        };

        // Display it so that runs can be told apart in logs
        config.print();

        // A sensible run must process at least one event
        ensure!(config.num_events > 0, "Please generate at least one event");

        // Event shapes are meaningless with less than two outgoing particles
        ensure!(
            config.num_outgoing >= 2,
            "Please generate at least two outgoing particles per event"
        );

        // The phase space generator needs some energy to share
        ensure!(
            config.e_total.is_finite() && config.e_total > 0.,
            "Collision energy must be positive"
        );

        // If nothing bad occured, we can now return the configuration
        Ok(config)
    }

    /// Display the configuration
    pub fn print(&self) {
        tracing::info!(
            num_events = self.num_events,
            e_total = self.e_total,
            num_outgoing = self.num_outgoing,
            seed = self.seed,
            eta_central = self.shapes.eta_central(),
            convention = ?self.shapes.convention(),
            min_multiplicity = self.shapes.min_multiplicity(),
            beam_distance_factor = self.shapes.beam_distance_factor(),
            "loaded run configuration"
        );
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }

    /// Parse this data using special logic which handles Fortran's bool syntax
    fn parse_bool(self) -> Result<bool> {
        match self.data.to_lowercase().as_str() {
            // Handle FORTRAN booleans as a special case
            ".true." => Ok(true),
            ".false." => Ok(false),
            // Delegate other booleans to the standard Rust parser
            _ => self.parse::<bool>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_items() {
        assert_eq!(ConfigItem::new("n", "42").parse::<usize>().unwrap(), 42);
        assert!(ConfigItem::new("n", "-1").parse::<usize>().is_err());
        assert!(ConfigItem::new("b", ".TRUE.").parse_bool().unwrap());
        assert!(!ConfigItem::new("b", ".false.").parse_bool().unwrap());
        assert!(ConfigItem::new("b", "true").parse_bool().unwrap());
        assert!(ConfigItem::new("b", "yes").parse_bool().is_err());
    }

    #[test]
    fn load_sample_configuration() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/shapes.cfg");
        let cfg = Configuration::load(path).unwrap();
        assert_eq!(cfg.shapes, ShapeConfig::default());
        assert!(cfg.num_outgoing >= 2);
    }
}
