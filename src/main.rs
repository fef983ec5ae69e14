use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use hinagata::api::{self, ApplyOptions, Outcome};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("apply")
                .about("Materializes a manifest into a destination directory")
                .arg(
                    Arg::new("manifest")
                        .help("built-in manifest name or path to a manifest file")
                        .required(true),
                )
                .arg(
                    Arg::new("destination")
                        .help("The destination directory, defaults to the manifest root"),
                )
                .arg(
                    Arg::new("interactive")
                        .help("preview the tree and confirm before writing")
                        .short('i')
                        .long("interactive")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("quiet")
                        .help("do not print a line per path")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Prints the tree a manifest would produce without writing it")
                .arg(
                    Arg::new("manifest")
                        .help("built-in manifest name or path to a manifest file")
                        .required(true),
                )
                .arg(
                    Arg::new("destination")
                        .help("The destination directory, defaults to the manifest root"),
                ),
        )
        .subcommand(Command::new("list").about("lists built-in manifests"))
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    init_logger(is_verbose);

    match matches.subcommand() {
        Some(("apply", args)) => handle_apply(args),
        Some(("preview", args)) => handle_preview(args),
        Some(("list", _)) => {
            handle_list();
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn init_logger(is_verbose: bool) {
    let default_filter = if is_verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn handle_apply(args: &ArgMatches) -> miette::Result<()> {
    let manifest = args
        .get_one::<String>("manifest")
        .expect("manifest required");
    let destination = args.get_one::<String>("destination").map(String::as_str);

    let options = ApplyOptions {
        interactive: args.get_flag("interactive"),
        quiet: args.get_flag("quiet"),
    };

    match api::apply(manifest, destination, options)? {
        Outcome::Applied(summary) => {
            println!(
                "\n{} materialized {} directories and {} files",
                "✅".green(),
                summary.directories,
                summary.files
            );
        }
        Outcome::Canceled => {
            println!("{}", "canceled, nothing was written".yellow());
        }
    }

    Ok(())
}

fn handle_preview(args: &ArgMatches) -> miette::Result<()> {
    let manifest = args
        .get_one::<String>("manifest")
        .expect("manifest required");
    let destination = args.get_one::<String>("destination").map(String::as_str);

    api::preview(manifest, destination)?;

    Ok(())
}

fn handle_list() {
    for builtin in api::list() {
        println!("{:<12} {}", builtin.name.bold(), builtin.description);
    }
}
