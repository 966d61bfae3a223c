/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatch::DispatchMode;
use crate::shared::{ConfigError, Floor, FloorRange};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub elevator: ElevatorConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElevatorConfig {
    pub min_floor: Floor,
    pub max_floor: Floor,
    #[serde(default)]
    pub start_floor: Option<Floor>,
    pub idle_shutdown_ticks: u32,
    pub stopped_dwell_ticks: u32,
    pub tick_interval_ms: u64,
    #[serde(default = "default_queue_capacity")]
    pub request_queue_capacity: usize,
    #[serde(default)]
    pub dispatch: DispatchMode,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    pub poll_interval_ms: u64,
    pub max_polls: u32,
    #[serde(default)]
    pub passengers: Vec<PassengerConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PassengerConfig {
    pub name: String,
    pub origin: Floor,
    pub destination: Floor,
    #[serde(default)]
    pub start_delay_ms: u64,
}

fn default_queue_capacity() -> usize {
    16
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            poll_interval_ms: 100,
            max_polls: 200,
            passengers: Vec::new(),
        }
    }
}

impl ElevatorConfig {
    pub fn floor_range(&self) -> FloorRange {
        FloorRange::new(self.min_floor, self.max_floor)
    }

    pub fn start_floor(&self) -> Floor {
        self.start_floor.unwrap_or(self.min_floor)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_floor > self.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                self.min_floor, self.max_floor
            )));
        }
        if !self.floor_range().contains(self.start_floor()) {
            return Err(ConfigError::Invalid(format!(
                "start_floor {} is outside [{}, {}]",
                self.start_floor(),
                self.min_floor,
                self.max_floor
            )));
        }
        if self.idle_shutdown_ticks == 0 || self.stopped_dwell_ticks == 0 {
            return Err(ConfigError::Invalid(
                "idle_shutdown_ticks and stopped_dwell_ticks must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.request_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "request_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl SimulationConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self, range: FloorRange) -> Result<(), ConfigError> {
        if self.max_polls == 0 || self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "max_polls and poll_interval_ms must be at least 1".to_string(),
            ));
        }
        for passenger in &self.passengers {
            if !range.contains(passenger.origin) || !range.contains(passenger.destination) {
                return Err(ConfigError::Invalid(format!(
                    "passenger '{}' travels outside [{}, {}]",
                    passenger.name, range.min, range.max
                )));
            }
            if passenger.origin == passenger.destination {
                return Err(ConfigError::Invalid(format!(
                    "passenger '{}' starts at their destination",
                    passenger.name
                )));
            }
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.elevator.validate()?;
    config.simulation.validate(config.elevator.floor_range())?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod config_tests {
    use super::*;

    const SAMPLE: &str = r#"
        [elevator]
        min_floor = -2
        max_floor = 6
        idle_shutdown_ticks = 10
        stopped_dwell_ticks = 3
        tick_interval_ms = 50
        dispatch = "scan"

        [simulation]
        poll_interval_ms = 20
        max_polls = 30

        [[simulation.passengers]]
        name = "ada"
        origin = -2
        destination = 4
    "#;

    #[test]
    fn test_parse_sample_config() {
        // Arrange / Act
        let config = parse_config(SAMPLE).unwrap();

        // Assert
        assert_eq!(config.elevator.floor_range(), FloorRange::new(-2, 6));
        assert_eq!(config.elevator.start_floor(), -2);
        assert_eq!(config.elevator.request_queue_capacity, 16);
        assert_eq!(config.elevator.dispatch, DispatchMode::Scan);
        assert_eq!(config.elevator.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.simulation.passengers.len(), 1);
        assert_eq!(config.simulation.passengers[0].start_delay_ms, 0);
    }

    #[test]
    fn test_dispatch_defaults_to_single_slot() {
        let config = parse_config(&SAMPLE.replace("dispatch = \"scan\"", "")).unwrap();
        assert_eq!(config.elevator.dispatch, DispatchMode::SingleSlot);
    }

    #[test]
    fn test_reject_inverted_range() {
        let broken = SAMPLE.replace("max_floor = 6", "max_floor = -5");
        assert!(matches!(parse_config(&broken), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_reject_passenger_outside_range() {
        let broken = SAMPLE.replace("destination = 4", "destination = 7");
        assert!(matches!(parse_config(&broken), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_reject_zero_ticks() {
        let broken = SAMPLE.replace("stopped_dwell_ticks = 3", "stopped_dwell_ticks = 0");
        assert!(matches!(parse_config(&broken), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_reject_zero_intervals() {
        // Purpose: a zero interval would make the controller or passengers spin
        let no_tick = SAMPLE.replace("tick_interval_ms = 50", "tick_interval_ms = 0");
        assert!(matches!(parse_config(&no_tick), Err(ConfigError::Invalid(_))));

        let no_poll = SAMPLE.replace("poll_interval_ms = 20", "poll_interval_ms = 0");
        assert!(matches!(parse_config(&no_poll), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(parse_config("[elevator"), Err(ConfigError::Parse(_))));
    }
}
