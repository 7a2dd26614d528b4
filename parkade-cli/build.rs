//! Build script for parkade-cli.
//!
//! Renders `parkade.1` into `OUT_DIR/man` with clap_mangen. Build scripts
//! cannot depend on the crate being built, so the command tree is restated
//! here in outline.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in step with src/cli.rs.
fn build_cli() -> Command {
    Command::new("parkade")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Allocate parking spots across lots and floors")
        .long_about(
            "Tracks the occupancy of registered parking spots, parks arriving vehicles in free \
             spots of the requested type, frees spots on exit and reports availability. \
             The same operations are served as JSON over HTTP by `parkade serve`.",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("PARKADE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format (human or json)")
                .value_name("FORMAT")
                .global(true),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the parkade database and, optionally, a commented config.yaml"),
            Command::new("serve")
                .about("Serve the JSON HTTP API")
                .long_about("Listen on server.bind with server.workers threads until interrupted"),
            Command::new("lot")
                .about("Manage parking lots")
                .long_about("Create, list and show parking lots"),
            Command::new("floor")
                .about("Manage floors of a lot")
                .long_about("Add, list and show the floors of a parking lot"),
            Command::new("spot")
                .about("Manage parking spots")
                .long_about("Add, list, show and find free parking spots"),
            Command::new("park")
                .about("Park a vehicle in a free spot")
                .long_about("Claim the lowest-id free spot of the requested type for a vehicle"),
            Command::new("exit")
                .about("Record a vehicle leaving and free its spot")
                .long_about("Close the open session for a license plate and free its spot"),
            Command::new("availability")
                .about("Show free spots per type")
                .long_about("Count free spots of every spot type and in total"),
            Command::new("seed")
                .about("Register the configured layout")
                .long_about("Register lots, floors and spots from the layout configuration"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("parkade.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
