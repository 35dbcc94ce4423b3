#[macro_use]
extern crate log;

use std::env::current_dir;
use std::error::Error;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::process::exit;

use clap::{crate_authors, crate_description, crate_version, App, Arg, SubCommand};

use shapestrings::config::{Config, CONFIG_FILE};
use shapestrings::Error as SError;

macro_rules! unwrap {
    ($e: expr, $error: expr) => {
        match $e {
            Some(e) => e,
            None => return Err(Box::new($error)),
        }
    };
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        exit(1);
    }
}

#[allow(unknown_lints, dangerous_implicit_autorefs)]
fn run() -> Result<(), Box<dyn Error>> {
    let matches = App::new("ShapeStrings")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("init")
                .about("Creates a new default shape string project")
                .arg(Arg::with_name("TITLE").required(false)),
        )
        .subcommand(
            SubCommand::with_name("build")
                .about("Renders the project and writes its PDF preview"),
        )
        .get_matches();

    if let Some(init) = matches.subcommand_matches("init") {
        let mut current_dir = unwrap!(current_dir().ok(), SError::CannotReadCurrentDir);
        let current_dir_name = current_dir.clone();
        let current_dir_name = unwrap!(current_dir_name.file_name(), SError::CannotReadCurrentDir);
        let current_dir_name = unwrap!(current_dir_name.to_str(), SError::CannotReadCurrentDir);

        // A title creates a directory for the project
        let title = match init.value_of("TITLE") {
            Some(title) => {
                current_dir.push(title);
                title
            }
            None => current_dir_name,
        };

        create_dir_all(&current_dir)?;

        current_dir.push(CONFIG_FILE);
        Config::with_title(title).save(&current_dir)?;
        info!("created {}", current_dir.display());
    } else if matches.subcommand_matches("build").is_some() {
        // Look up for the project file
        let mut current_dir = PathBuf::from(unwrap!(
            current_dir().ok(),
            SError::CannotReadCurrentDir
        ));
        let config_path = loop {
            current_dir.push(CONFIG_FILE);

            if current_dir.is_file() {
                break current_dir;
            }

            current_dir.pop();

            if !current_dir.pop() {
                return Err(Box::new(SError::NoConfigFile));
            }
        };

        let config = Config::from_file(&config_path)?;
        let root = unwrap!(config_path.parent(), SError::NoConfigFile);
        let warnings = config.build(root)?;

        if !warnings.is_empty() {
            eprint!("{}", warnings);
        }
    }

    Ok(())
}
