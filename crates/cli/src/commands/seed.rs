//! Demo data seeding command.
//!
//! Populates the database with a small, deterministic set of categories,
//! shops, products, orders, expenses, and payment logs so the dashboard
//! has something to aggregate on a fresh install.

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::types::Json;

use orderdeck_core::model::{ExpenseItem, LineItem};

use super::{CommandError, connect};

/// Seed the database with demo data.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let existing: i64 = sqlx::query_scalar("SELECT count(*) FROM orders")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        return Err(CommandError::Invalid(
            "database already contains orders; refusing to seed".to_string(),
        ));
    }

    seed_catalog(&pool).await?;
    seed_orders(&pool).await?;

    tracing::info!("Seed complete!");
    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), CommandError> {
    tracing::info!("Seeding categories, shops, and products...");

    let categories = ["Electronics", "Kitchen", "Stationery"];
    for name in categories {
        sqlx::query("INSERT INTO categories (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    sqlx::query("INSERT INTO shops (name, address) VALUES ($1, $2), ($3, $4)")
        .bind("City Traders")
        .bind("14 Canal Road")
        .bind("Harbor Imports")
        .bind("3 Dock Street")
        .execute(pool)
        .await?;

    // (name, category, owned/imported, company, shop, price, stock)
    let products: [(&str, &str, &str, Option<&str>, Option<&str>, i64, i32); 4] = [
        ("Desk Lamp", "Electronics", "owned", Some("Lumen Works"), None, 2499, 40),
        ("Steel Kettle", "Kitchen", "imported", None, Some("City Traders"), 3250, 18),
        ("Notebook A5", "Stationery", "owned", Some("Paperline"), None, 450, 200),
        ("Blender", "Kitchen", "imported", None, Some("Harbor Imports"), 5999, 7),
    ];

    for (name, category, flag, company, shop, price_cents, stock) in products {
        sqlx::query(
            "INSERT INTO products \
                 (name, category_id, owned_imported, company_name, shop_name, \
                  price, stock_quantity, description) \
             SELECT $1, id, $3, $4, $5, $6, $7, '' FROM categories WHERE name = $2",
        )
        .bind(name)
        .bind(category)
        .bind(flag)
        .bind(company)
        .bind(shop)
        .bind(Decimal::new(price_cents, 2))
        .bind(stock)
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn seed_orders(pool: &PgPool) -> Result<(), CommandError> {
    tracing::info!("Seeding orders, expenses, and payment logs...");

    let now = Utc::now();

    // (customer, days_ago, total_cents, paid_cents, status)
    let orders: [(&str, u64, i64, i64, &str); 5] = [
        ("Asha Rahim", 45, 8498, 8498, "paid"),
        ("Farid Noor", 30, 3250, 0, "pending"),
        ("Sana Malik", 14, 6449, 2000, "pending"),
        ("Omar Qureshi", 7, 450, 450, "paid"),
        ("Leila Haddad", 2, 5999, 0, "canceled"),
    ];

    for (customer, days_ago, total_cents, paid_cents, status) in orders {
        let created_at = now
            .checked_sub_days(Days::new(days_ago))
            .unwrap_or(now);
        let total = Decimal::new(total_cents, 2);
        let paid = Decimal::new(paid_cents, 2);
        let line_items = Json(vec![LineItem {
            product_name: "Desk Lamp".to_string(),
            quantity: 1,
            unit_price: total,
        }]);

        let order_id: i32 = sqlx::query_scalar(
            "INSERT INTO orders \
                 (customer_name, customer_email, line_items, total_amount, \
                  paid_payment, pending_payment, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING id",
        )
        .bind(customer)
        .bind(format!(
            "{}@example.com",
            customer.to_lowercase().replace(' ', ".")
        ))
        .bind(line_items)
        .bind(total)
        .bind(paid)
        .bind(total - paid)
        .bind(status)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            "INSERT INTO expenses (order_id, items, expense_date) VALUES ($1, $2, $3)",
        )
        .bind(order_id)
        .bind(Json(vec![ExpenseItem {
            kind: "shipping".to_string(),
            amount: Decimal::new(350, 2),
        }]))
        .bind(created_at.date_naive())
        .execute(pool)
        .await?;

        if paid > Decimal::ZERO {
            sqlx::query(
                "INSERT INTO order_payment_logs (order_id, amount, paid_at) \
                 VALUES ($1, $2, $3)",
            )
            .bind(order_id)
            .bind(paid)
            .bind(created_at)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}
