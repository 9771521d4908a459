use clap::Parser;
use lockbox::cli::commands::add::AddArgs;
use lockbox::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { ref salt } => lockbox::cli::commands::init::execute(&cli, salt.as_deref()),
        Commands::Add {
            category,
            ref name,
            ref login,
            ref notes,
        } => lockbox::cli::commands::add::execute(
            &cli,
            AddArgs {
                category,
                name: name.clone(),
                login: login.clone(),
                notes: notes.clone(),
            },
        ),
        Commands::Get { index, show } => lockbox::cli::commands::get::execute(&cli, index, show),
        Commands::Search { ref query } => {
            lockbox::cli::commands::search::execute_search(&cli, query)
        }
        Commands::List => lockbox::cli::commands::search::execute_list(&cli),
        Commands::Delete { index, force } => {
            lockbox::cli::commands::delete::execute(&cli, index, force)
        }
        Commands::Category { ref action } => {
            lockbox::cli::commands::category::execute(&cli, action)
        }
        Commands::ChangeKey => lockbox::cli::commands::change_key::execute(&cli),
        Commands::Shell => lockbox::cli::commands::shell::execute(&cli),
        Commands::Completions { shell } => lockbox::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        lockbox::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lockbox={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
