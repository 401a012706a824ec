use clap::Args;
use sowraashi_app::{
    auth::{AuthService, Password, PgAuthService, Role, SeedUser},
    database::{self, PoolSettings},
};

#[derive(Debug, Args)]
pub(crate) struct BootstrapArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long, env = "ADMIN_USERNAME", default_value = "admin")]
    admin_username: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: String,

    #[arg(long, env = "ADMIN_NAME", default_value = "Administrator")]
    admin_name: String,

    #[arg(long, env = "DESIGNER_USERNAME", default_value = "designer")]
    designer_username: String,

    /// Designer password; the designer account is skipped when omitted
    #[arg(long, env = "DESIGNER_PASSWORD", hide_env_values = true)]
    designer_password: Option<String>,

    #[arg(long, env = "DESIGNER_NAME", default_value = "Designer")]
    designer_name: String,
}

pub(crate) async fn run(args: BootstrapArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, PoolSettings::default())
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let service = PgAuthService::for_administration(pool);

    let mut seeds = vec![SeedUser {
        username: args.admin_username,
        password: Password::from(args.admin_password),
        role: Role::Admin,
        name: args.admin_name,
        email: None,
    }];

    if let Some(password) = args.designer_password {
        seeds.push(SeedUser {
            username: args.designer_username,
            password: Password::from(password),
            role: Role::Designer,
            name: args.designer_name,
            email: None,
        });
    }

    for seed in seeds {
        let username = seed.username.clone();
        let role = seed.role;

        let created = service
            .ensure_user(seed)
            .await
            .map_err(|error| format!("failed to seed user `{username}`: {error}"))?;

        if created {
            println!("created {role} user: {username}");
        } else {
            println!("{role} user already exists: {username}");
        }
    }

    Ok(())
}
