use clap::Args;
use sowraashi_app::{
    auth::{Password, PgAuthService},
    database::{self, PoolSettings},
};

#[derive(Debug, Args)]
pub(crate) struct SetPasswordArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long)]
    username: String,

    #[arg(long, env = "NEW_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: SetPasswordArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, PoolSettings::default())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    PgAuthService::for_administration(pool)
        .reset_password(&args.username, Password::from(args.password))
        .await
        .map_err(|error| format!("failed to set password for `{}`: {error}", args.username))?;

    println!("password updated for {}", args.username);

    Ok(())
}
