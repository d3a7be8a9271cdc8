use clap::Args;
use storefront_app::{
    auth::{ApiTokenId, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Token id to revoke
    #[arg(long)]
    token_id: i64,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let revoked = service
        .revoke_api_token(ApiTokenId::from_i64(args.token_id))
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("revoked token {}", args.token_id);
    } else {
        println!("token {} was not active", args.token_id);
    }

    Ok(())
}
