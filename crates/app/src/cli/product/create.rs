use clap::Args;
use rust_decimal::Decimal;
use storefront_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
    money,
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 9.99
    #[arg(long)]
    price: Decimal,

    /// Units available for sale
    #[arg(long, default_value_t = 0)]
    stock: i32,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let price = money::to_minor_units(args.price)
        .map_err(|error| format!("invalid price {}: {error}", args.price))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            name: args.name,
            price,
            stock: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("product_name: {}", product.name);
    println!("product_price: {}", money::from_minor_units(product.price));
    println!("product_stock: {}", product.stock);

    Ok(())
}
