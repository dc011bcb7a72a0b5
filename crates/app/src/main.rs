//! Hireline Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use hireline_app::{
    database,
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::{Role, UserUuid},
    },
};

#[derive(Debug, Parser)]
#[command(name = "hireline-app", about = "Hireline CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the initial admin account if none exists yet.
    SeedAdmin(SeedAdminArgs),
}

#[derive(Debug, Args)]
struct SeedAdminArgs {
    /// Admin e-mail address
    #[arg(long, env = "ADMIN_EMAIL")]
    email: String,

    /// Admin password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Admin display name
    #[arg(long, default_value = "Admin")]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::SeedAdmin(args) => seed_admin(args).await,
    }
}

/// One-time initialization step invoked by deployment tooling: creates the
/// admin account unless one is already present.
async fn seed_admin(args: SeedAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(pool);

    let already_seeded = service
        .admin_exists()
        .await
        .map_err(|error| format!("failed to check for existing admin: {error}"))?;

    if already_seeded {
        println!("admin account already exists; nothing to do");

        return Ok(());
    }

    let admin = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name: args.name,
            email: args.email,
            password: args.password,
            role: Role::Admin,
        })
        .await
        .map_err(|error| format!("failed to create admin account: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_email: {}", admin.email);

    Ok(())
}
