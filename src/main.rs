use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};

use sqflint::convention::Convention;
use sqflint::error::concise_loading_error;
use sqflint::language::LoadingError;
use sqflint::parsing;
use sqflint::templating;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let convention_arg = Arg::new("convention")
        .long("convention")
        .value_parser(value_parser!(PathBuf))
        .help("A JSON file describing the project title, authors, types, and sentinels to enforce instead of the built-in convention.");

    let matches = Command::new("sqflint")
        .version(VERSION)
        .propagate_version(true)
        .author("NetFusion")
        .about("Header and parameter layout checker for SQF.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log progress of the checks to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the header and parameter layout of the given files")
                .arg(convention_arg.clone())
                .arg(
                    Arg::new("extension")
                        .long("extension")
                        .default_value("sqf")
                        .help("Only files with this extension are checked when searching directories."),
                )
                .arg(
                    Arg::new("paths")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf))
                        .help("Files, or directories to search recursively, to check."),
                ),
        )
        .subcommand(
            Command::new("header")
                .about("Print the boilerplate a new file should start with")
                .arg(convention_arg)
                .arg(
                    Arg::new("author")
                        .long("author")
                        .help("The author to name in the header. Defaults to the first known author."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let convention = load_convention(submatches);
            let extension = submatches
                .get_one::<String>("extension")
                .map(String::as_str)
                .unwrap_or("sqf");
            let paths: Vec<&PathBuf> = submatches
                .get_many::<PathBuf>("paths")
                .map(|values| values.collect())
                .unwrap_or_default();

            println!("Validating SQF...");

            let mut errors: u32 = 0;
            for path in paths {
                let found = match parsing::discover(path, extension) {
                    Ok(found) => found,
                    Err(error) => {
                        eprintln!("{}", concise_loading_error(&error));
                        errors += 1;
                        continue;
                    }
                };
                info!("Found {} files in {}", found.files.len(), path.display());

                // anything that couldn't be read was never checked
                for (directory, error) in &found.unreadable {
                    let error = LoadingError::from_io(error, directory);
                    eprintln!("{}", concise_loading_error(&error));
                    errors += 1;
                }

                for file in &found.files {
                    errors += check_file(file, &convention);
                }
            }

            println!("Validating finished with {} errors.", errors);

            // exit statuses are taken modulo 256
            std::process::exit(errors.min(255) as i32);
        }
        Some(("header", submatches)) => {
            let convention = load_convention(submatches);
            let author = submatches
                .get_one::<String>("author")
                .map(String::as_str);

            if let Some(name) = author {
                if !convention.is_author(name) {
                    warn!("Author {:?} is not one the convention accepts", name);
                }
            }

            match templating::skeleton(&convention, author) {
                Ok(content) => print!("{}", content),
                Err(error) => {
                    eprintln!("error: {}", error);
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: sqflint [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn load_convention(submatches: &ArgMatches) -> Convention {
    match submatches.get_one::<PathBuf>("convention") {
        Some(filename) => match Convention::load(filename) {
            Ok(convention) => {
                debug!("Loaded convention from {}", filename.display());
                convention
            }
            Err(error) => {
                eprintln!("{}", concise_loading_error(&error));
                std::process::exit(1);
            }
        },
        None => Convention::default(),
    }
}

/// Check a single file, returning the number of errors (0 or 1).
fn check_file(filename: &Path, convention: &Convention) -> u32 {
    debug!("Checking {}", filename.display());

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            return 1;
        }
    };

    match parsing::lex(filename, &content) {
        Ok(tokens) => parsing::check_layout(tokens, filename, &content, convention),
        Err(error) => {
            eprintln!("{}\n", error.full_details());
            1
        }
    }
}
