/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::io;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub requests: Vec<RequestConfig>,
    #[serde(default)]
    pub presses: Vec<PressConfig>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub n_floors: usize,
    pub n_elevators: usize,
    #[serde(default)]
    pub id_offset: u32,
    pub ticks: u64,
}

/// A passenger travelling from `from` to `to`, seeded before the first tick.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct RequestConfig {
    pub from: i64,
    pub to: i64,
}

/// Cabin buttons and the occupancy sensor, addressed by elevator id.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Floor,
    Call,
    OpenDoors,
    CloseDoors,
    SensorOn,
    SensorOff,
}

/**
 * A button pressed inside an elevator right before tick `tick` runs.
 *
 * # Fields
 * - `tick`:     Tick number the press belongs to, the first tick is 1.
 * - `elevator`: Elevator id, including the bank's `id_offset`.
 * - `button`:   Which button.
 * - `floor`:    Floor label, only read by `floor` presses.
 */
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct PressConfig {
    pub tick: u64,
    pub elevator: u32,
    pub button: ButtonKind,
    pub floor: Option<i64>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            simulation: SimulationConfig {
                n_floors: 20,
                n_elevators: 2,
                id_offset: 0,
                ticks: 38,
            },
            requests: vec![
                RequestConfig { from: 1, to: 14 },
                RequestConfig { from: 15, to: 1 },
            ],
            presses: Vec::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> io::Result<()> {
        if self.simulation.n_floors == 0 || self.simulation.n_elevators == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "n_floors and n_elevators must both be at least 1",
            ));
        }
        for press in self.presses.iter() {
            if press.button == ButtonKind::Floor && press.floor.is_none() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("floor press at tick {} has no floor", press.tick),
                ));
            }
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &str) -> io::Result<Config> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> io::Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    config.validate()?;
    Ok(config)
}
