use rust_decimal::Decimal;
use shop_inventory::{
    config::AppConfig,
    models::{Category, NewProduct},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    let existing = state.products.fetch_products().await?;
    if !existing.is_empty() {
        println!(
            "Seed skipped: {} already holds {} products.",
            config.products_table,
            existing.len()
        );
        return Ok(());
    }

    let samples = sample_products();
    for record in &samples {
        state.products.insert_product(record).await?;
    }

    println!("Seed completed. Inserted {} products.", samples.len());
    Ok(())
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        product("iPhone Case", Category::Phones, Decimal::new(250, 1), 10),
        product("Samsung A14 Battery", Category::Batteries, Decimal::new(455, 1), 6),
        product("Moto G32 Screen", Category::Screens, Decimal::new(1200, 1), 3),
        product("USB-C Fast Charger", Category::Chargers, Decimal::new(350, 1), 15),
        product("Wired Earphones", Category::Headphones, Decimal::new(195, 1), 20),
    ]
}

fn product(name: &str, category: Category, price: Decimal, stock: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category,
        price,
        stock,
        image_url: None,
    }
}
