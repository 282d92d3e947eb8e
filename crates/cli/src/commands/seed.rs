//! Seed the catalog with sample products.
//!
//! Idempotent by default: if the products table already has rows, seeding is
//! skipped unless `--force` is passed. Forced seeding inserts another copy of
//! the sample set rather than truncating, so existing baskets stay valid.

use rust_decimal::Decimal;

use super::CommandError;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    brand: &'static str,
    product_type: &'static str,
    quantity_in_stock: i32,
}

const SAMPLE_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Angular Speedster Board 2000",
        description: "Fast entry-level board with a forgiving flex.",
        price_cents: 20_000,
        brand: "Angular",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Green Angular Board 3000",
        description: "All-mountain board in signature green.",
        price_cents: 15_000,
        brand: "Angular",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Core Board Speed Rush 3",
        description: "Stiff carving board for groomed runs.",
        price_cents: 18_000,
        brand: "NetCore",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Net Core Super Board",
        description: "Wide powder board with a tapered tail.",
        price_cents: 30_000,
        brand: "NetCore",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "React Board Super Whizzy Fast",
        description: "Lightweight freestyle board for the park.",
        price_cents: 25_000,
        brand: "React",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Typescript Entry Board",
        description: "Soft-flex board for first-timers.",
        price_cents: 12_000,
        brand: "TypeScript",
        product_type: "Boards",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Core Blue Hat",
        description: "Warm knit hat in team blue.",
        price_cents: 1_000,
        brand: "NetCore",
        product_type: "Hats",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Green React Woolen Hat",
        description: "Merino wool hat with a fold-up brim.",
        price_cents: 8_000,
        brand: "React",
        product_type: "Hats",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Purple React Woolen Hat",
        description: "Merino wool hat, purple colorway.",
        price_cents: 1_500,
        brand: "React",
        product_type: "Hats",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Blue Code Gloves",
        description: "Waterproof gloves with wrist leashes.",
        price_cents: 1_800,
        brand: "VS Code",
        product_type: "Gloves",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Green Code Gloves",
        description: "Waterproof gloves, green colorway.",
        price_cents: 1_500,
        brand: "VS Code",
        product_type: "Gloves",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Purple React Gloves",
        description: "Insulated park gloves.",
        price_cents: 1_600,
        brand: "React",
        product_type: "Gloves",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Green React Gloves",
        description: "Insulated park gloves, green colorway.",
        price_cents: 1_400,
        brand: "React",
        product_type: "Gloves",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Redis Red Boots",
        description: "Stiff freeride boots with quick lacing.",
        price_cents: 25_000,
        brand: "Redis",
        product_type: "Boots",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Core Red Boots",
        description: "Mid-flex all-mountain boots.",
        price_cents: 18_999,
        brand: "NetCore",
        product_type: "Boots",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Core Purple Boots",
        description: "Mid-flex all-mountain boots, purple colorway.",
        price_cents: 19_999,
        brand: "NetCore",
        product_type: "Boots",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Angular Purple Boots",
        description: "Soft beginner boots with heat-moldable liners.",
        price_cents: 15_000,
        brand: "Angular",
        product_type: "Boots",
        quantity_in_stock: 100,
    },
    SeedProduct {
        name: "Angular Blue Boots",
        description: "Soft beginner boots, blue colorway.",
        price_cents: 18_000,
        brand: "Angular",
        product_type: "Boots",
        quantity_in_stock: 100,
    },
];

/// Insert the sample products.
pub async fn run(force: bool) -> Result<(), CommandError> {
    let pool = super::connect().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;

    if count > 0 && !force {
        tracing::info!(existing = count, "Products already seeded, skipping");
        return Ok(());
    }

    tracing::info!(products = SAMPLE_PRODUCTS.len(), "Seeding catalog...");

    let mut tx = pool.begin().await?;
    for product in SAMPLE_PRODUCTS {
        let picture_url = format!(
            "/images/products/{}.png",
            product.name.to_lowercase().replace(' ', "-")
        );
        sqlx::query(
            "INSERT INTO products \
             (name, description, price, picture_url, brand, product_type, quantity_in_stock) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(Decimal::new(product.price_cents, 2))
        .bind(&picture_url)
        .bind(product.brand)
        .bind(product.product_type)
        .bind(product.quantity_in_stock)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!("Seeding complete");
    Ok(())
}
