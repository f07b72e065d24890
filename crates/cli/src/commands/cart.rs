//! Cart commands.

use clap::Subcommand;

use verde_core::ProductId;
use verde_storefront::cart::CartSnapshot;
use verde_storefront::{AppError, AppState};

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// How many to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (zero removes the line)
    Set {
        /// Product id
        id: String,

        /// New quantity
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

pub fn run(state: &AppState, action: Option<CartAction>) -> Result<(), AppError> {
    match action {
        None => {
            show(state);
            Ok(())
        }
        Some(CartAction::Add { id, quantity }) => {
            let snapshot = state.add_to_cart(&ProductId::new(id), quantity)?;
            println!("Added to cart.");
            print_snapshot(state, &snapshot);
            Ok(())
        }
        Some(CartAction::Remove { id }) => {
            let snapshot = state.remove_from_cart(&ProductId::new(id));
            print_snapshot(state, &snapshot);
            Ok(())
        }
        Some(CartAction::Set { id, quantity }) => {
            let snapshot = state.set_quantity(&ProductId::new(id), quantity);
            print_snapshot(state, &snapshot);
            Ok(())
        }
        Some(CartAction::Clear) => {
            state.clear_cart();
            println!("Cart cleared.");
            Ok(())
        }
    }
}

fn show(state: &AppState) {
    let snapshot = state.cart();
    print_snapshot(state, &snapshot);
}

fn print_snapshot(state: &AppState, snapshot: &CartSnapshot) {
    if snapshot.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    println!("Cart ({} items):", snapshot.item_count);
    for item in &snapshot.items {
        println!(
            "  {:<24} {:>3} x {:>8} = {:>9}",
            item.id,
            item.quantity,
            item.unit_price.display(),
            item.line_total().display()
        );
    }

    let totals = state.cart_totals();
    println!("  {:-<58}", "");
    println!("  Subtotal: {:>9}", totals.subtotal.display());
    if totals.shipping_fee.is_zero() {
        println!("  Shipping:      Free");
    } else {
        println!("  Shipping: {:>9}", totals.shipping_fee.display());
    }
    println!("  Total:    {:>9}", totals.grand_total.display());
}
