use clap::{Parser, Subcommand};

mod users;

#[derive(Debug, Parser)]
#[command(name = "sowraashi-app", about = "Sowraashi storefront administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Users(users::UsersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Users(command) => users::run(command).await,
        }
    }
}
