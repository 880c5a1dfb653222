use clap::Args;
use warunk_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, models::Registration},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Login name, 5-14 alphanumeric characters
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let admin = service
        .create_admin(Registration {
            name: args.name,
            username: args.username,
            email: args.email,
            password_confirm: args.password.clone(),
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", admin.uuid);
    println!("admin_username: {}", admin.username);

    Ok(())
}
