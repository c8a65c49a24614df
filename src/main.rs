use clap::Parser;
use lockup::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    lockup::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => lockup::cli::commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            ref password,
        } => lockup::cli::commands::add::execute(&cli, service, username, password.as_deref()),
        Commands::List => lockup::cli::commands::list::execute(&cli),
        Commands::Show { id } => lockup::cli::commands::show::execute(&cli, id),
        Commands::Update {
            id,
            ref service,
            ref username,
            ref password,
        } => lockup::cli::commands::update::execute(
            &cli,
            id,
            service.as_deref(),
            username.as_deref(),
            password.as_deref(),
        ),
        Commands::Delete { id, force } => lockup::cli::commands::delete::execute(&cli, id, force),
        Commands::Export { ref file } => lockup::cli::commands::export::execute(&cli, file),
        Commands::Import { ref file } => lockup::cli::commands::import_cmd::execute(&cli, file),
        Commands::ResetPassword => lockup::cli::commands::reset_password::execute(&cli),
    };

    if let Err(e) = result {
        lockup::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
