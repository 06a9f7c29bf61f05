use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, UsersServiceError, records::Role},
};

#[derive(Debug, Args)]
pub(crate) struct RoleArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// E-mail address of the user to change
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: RoleArgs, admin: bool) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let role = if admin { Role::Admin } else { Role::User };

    let user = service
        .set_role(&args.email, role)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => format!("no user registered as {}", args.email),
            other => format!("failed to change role: {other}"),
        })?;

    println!("{} is now {}", user.email, user.role);

    Ok(())
}
