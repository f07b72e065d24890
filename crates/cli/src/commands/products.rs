//! Catalog browsing commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use verde_core::{CategoryId, ProductId};
use verde_storefront::catalog::{Catalog, Product, ProductQuery, SortKey};
use verde_storefront::{AppError, AppState};

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products, optionally filtered and sorted
    List {
        /// Restrict to one category id
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Inclusive lower price bound
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Inclusive upper price bound
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order: featured, price-asc, price-desc, rating
        #[arg(long, default_value = "featured")]
        sort: SortKey,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: String,
    },
    /// List categories
    Categories,
}

pub fn run(state: &AppState, action: ProductsAction) -> Result<(), AppError> {
    match action {
        ProductsAction::List {
            category,
            search,
            min_price,
            max_price,
            sort,
        } => {
            let query = ProductQuery {
                category: category.map(CategoryId::new),
                search,
                min_price,
                max_price,
                sort,
            };
            list(state, &query);
            Ok(())
        }
        ProductsAction::Show { id } => show(state, &ProductId::new(id)),
        ProductsAction::Categories => {
            categories(state);
            Ok(())
        }
    }
}

fn list(state: &AppState, query: &ProductQuery) {
    let products = state.catalog().query(query);
    if products.is_empty() {
        println!("No products match.");
        return;
    }

    for product in products {
        println!("{}", summary_line(product));
    }
}

fn show(state: &AppState, id: &ProductId) -> Result<(), AppError> {
    let product = state
        .catalog()
        .product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    println!("{}", product.name);
    println!("  id:       {}", product.id);
    match (product.original_price, product.discount_percent()) {
        (Some(original), Some(percent)) => println!(
            "  price:    {} (was {}, {percent}% off)",
            product.price, original
        ),
        _ => println!("  price:    {}", product.price),
    }
    println!(
        "  rating:   {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    println!("  category: {}", product.category);
    if let Some(badge) = product.badge {
        println!("  badge:    {badge:?}");
    }
    println!(
        "  stock:    {}",
        if product.in_stock { "in stock" } else { "out of stock" }
    );
    Ok(())
}

fn categories(state: &AppState) {
    for category in state.catalog().categories() {
        println!(
            "{:<16} {} ({} products)",
            category.id, category.name, category.product_count
        );
    }
}

fn summary_line(product: &Product) -> String {
    let badge = product
        .badge
        .map(|b| format!(" [{}]", format!("{b:?}").to_lowercase()))
        .unwrap_or_default();
    let stock = if product.in_stock { "" } else { " (out of stock)" };
    format!(
        "{:<24} {:>8}  {:.1}\u{2605}{badge}{stock}  {}",
        product.id,
        product.price.display(),
        product.rating,
        product.name
    )
}
