use clap::{Args, Subcommand};

mod bootstrap;
mod set_password;

#[derive(Debug, Args)]
pub(crate) struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Debug, Subcommand)]
enum UsersSubcommand {
    /// Apply migrations and create the seed admin and designer accounts
    Bootstrap(bootstrap::BootstrapArgs),

    /// Replace a user's password
    SetPassword(set_password::SetPasswordArgs),
}

pub(crate) async fn run(command: UsersCommand) -> Result<(), String> {
    match command.command {
        UsersSubcommand::Bootstrap(args) => bootstrap::run(args).await,
        UsersSubcommand::SetPassword(args) => set_password::run(args).await,
    }
}
