use clap::Args;
use storefront_app::{
    auth::PgAuthService,
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, data::NewUser},
};

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Login email, unique per user
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Grant access to the admin order endpoints
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let users = PgUsersService::new(Db::new(pool.clone()));
    let auth = PgAuthService::new(pool);

    let user = users
        .create_user(NewUser {
            email: args.email,
            name: args.name,
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = auth
        .issue_api_token(user.id)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_id: {}", user.id);
    println!("user_email: {}", user.email);
    println!("user_is_admin: {}", user.is_admin);
    println!("token_id: {}", issued.metadata.id);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
