/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{error, info, warn};
use std::thread::Builder;

/* Custom libraries */
use config::{ButtonKind, PressConfig};
use controller::ElevatorController;
use observer::{ChannelObserver, Event};
use shared::ControllerError;

/* Modules */
mod config;
mod controller;
mod elevator;
mod floor;
mod observer;
mod shared;

/* Main */
fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator-bank")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Step-by-step simulation of an elevator bank")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .help("Simulation configuration, the built-in 20 floor scenario is used when omitted"),
        )
        .arg(
            Arg::new("ticks")
                .short('t')
                .long("ticks")
                .value_name("N")
                .takes_value(true)
                .help("Number of simulation steps, overrides the configuration"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print a JSON snapshot of the bank after every step"),
        )
        .get_matches();

    // Load the configuration
    let mut config = match matches.value_of("config") {
        Some(path) => unwrap_or_exit!(config::load_config(path), "Failed to load configuration"),
        None => config::Config::default(),
    };
    if let Some(ticks) = matches.value_of("ticks") {
        config.simulation.ticks = unwrap_or_exit!(ticks.parse::<u64>(), "Invalid --ticks value");
    }
    let print_json = matches.is_present("json");

    // Create the bank
    let mut controller = unwrap_or_exit!(
        ElevatorController::new(
            config.simulation.n_floors,
            config.simulation.n_elevators,
            config.simulation.id_offset,
        ),
        "Failed to build the elevator bank"
    );

    // Seed the passengers, a bad request is reported and skipped
    for request in config.requests.iter() {
        if let Err(e) = controller.add_wished_floors(request.from, request.to) {
            warn!("Skipping request {} -> {}: {}", request.from, request.to, e);
        }
    }

    // Start the display thread
    let (event_tx, event_rx) = cbc::unbounded::<Event>();
    let display_thread = Builder::new().name("display".into()).spawn(move || {
        for event in event_rx.iter() {
            info!("{}", event);
        }
    })?;

    // Run the simulation
    let mut observer = ChannelObserver::new(event_tx);
    for tick in 1..=config.simulation.ticks {
        for press in config.presses.iter().filter(|press| press.tick == tick) {
            if let Err(e) = press_button(&mut controller, press) {
                warn!("Skipping {:?} press in elevator #{}: {}", press.button, press.elevator, e);
            }
        }
        controller.update_state(&mut observer);

        if print_json {
            match serde_json::to_string(&controller.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => error!("Failed to serialize snapshot: {}", e),
            }
        }
    }

    // Closing the channel ends the display thread
    drop(observer);
    if display_thread.join().is_err() {
        error!("Display thread panicked");
    }

    for floor in controller.floors() {
        if floor.is_button_pressed() || floor.wished_floors().next().is_some() {
            warn!(
                "Floor {} still has pending requests after {} steps",
                floor.label(),
                controller.tick()
            );
        }
    }
    for elevator in controller.elevators() {
        info!(
            "Elevator #{} stopped at floor {} while {}, sensor {}",
            elevator.id(),
            elevator.running_floor(),
            elevator.state(),
            if elevator.is_move_detected() { "triggered" } else { "clear" }
        );
    }
    if let Ok(info) = controller.display_info(1) {
        info!("{}", info.trim_end());
    }

    Ok(())
}

fn press_button(controller: &mut ElevatorController, press: &PressConfig) -> Result<(), ControllerError> {
    let honoured = match press.button {
        // Config validation guarantees a floor, 0 is rejected as an invalid label
        ButtonKind::Floor => controller
            .press_floor_button(press.elevator, press.floor.unwrap_or(0))
            .map(|_| true)?,
        ButtonKind::Call => controller.press_call_button(press.elevator).map(|_| true)?,
        ButtonKind::OpenDoors => controller.press_opening_doors_button(press.elevator)?,
        ButtonKind::CloseDoors => controller.press_closing_doors_button(press.elevator)?,
        ButtonKind::SensorOn => controller.set_move_detected(press.elevator, true).map(|_| true)?,
        ButtonKind::SensorOff => controller.set_move_detected(press.elevator, false).map(|_| true)?,
    };
    if !honoured {
        info!(
            "Elevator #{} ignored the {:?} button at tick {} while {}",
            press.elevator,
            press.button,
            controller.tick() + 1,
            controller.elevator(press.elevator)?.state()
        );
    }
    Ok(())
}
