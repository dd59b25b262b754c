use clap::Parser;
use std::process;
use vex_schedule::cli::{args::Args, commands};

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("VEX Schedule - per-station scan schedules from VEX observing plans");
    println!("==================================================================");
    println!();
    println!("Extract one station's scans from a VEX or SKED schedule and write them");
    println!("as the XML scan schedule read by recorder control.");
    println!();
    println!("USAGE:");
    println!("    vex_schedule <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    convert     Extract a station's scans and write the XML schedule");
    println!("    inspect     List the scans of an emitted XML schedule");
    println!("    stations    Show the built-in station table and equivalences");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Write e16b08.xml with the scans of the SMT:");
    println!("    vex_schedule convert -f e16b08.vex -s Az");
    println!();
    println!("    # Record a second SMT feed from the Az lines, with backend addresses:");
    println!("    vex_schedule convert -f e16b08.vex -s A1 --with-backend-config");
    println!();
    println!("    # Check which scans are still to come:");
    println!("    vex_schedule inspect e16b08.xml");
    println!();
    println!("For detailed help on any command, use:");
    println!("    vex_schedule <COMMAND> --help");
}
