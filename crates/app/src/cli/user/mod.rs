use clap::{Args, Subcommand};

mod create;
mod role;

#[derive(Debug, Args)]
pub(crate) struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    /// Register a user, optionally as an admin
    Create(create::CreateUserArgs),

    /// Grant the admin role
    Promote(role::RoleArgs),

    /// Revoke the admin role
    Demote(role::RoleArgs),
}

pub(crate) async fn run(command: UserCommand) -> Result<(), String> {
    match command.command {
        UserSubcommand::Create(args) => create::run(args).await,
        UserSubcommand::Promote(args) => role::run(args, true).await,
        UserSubcommand::Demote(args) => role::run(args, false).await,
    }
}
