use clap::Args;
use storefront_app::{
    auth::{BCRYPT_COST, hash_password},
    database::{self, Db},
    domain::users::{
        PgUsersService, UsersService,
        data::{NewUser, check_password_policy, normalise_email, normalise_name},
        records::{Role, UserUuid},
    },
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Login e-mail address
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long, env = "STOREFRONT_USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Create the user with the admin role
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let name = normalise_name(&args.name).map_err(|error| error.to_string())?;
    let email = normalise_email(&args.email).map_err(|error| error.to_string())?;

    check_password_policy(&args.password).map_err(|error| error.to_string())?;

    let password_hash = hash_password(args.password, BCRYPT_COST)
        .await
        .map_err(|error| format!("failed to hash password: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));

    let role = if args.admin { Role::Admin } else { Role::User };

    let user = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            name,
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);
    println!("user_role: {}", user.role);

    Ok(())
}
