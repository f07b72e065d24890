//! Checkout flow command.
//!
//! Drives the full `Shipping -> Payment -> Confirmation` sequence in one
//! invocation: the guard runs first, the collected fields are stored
//! unvalidated, and order placement goes through the simulated gateway with
//! its configured latency.

use clap::Args;

use verde_storefront::checkout::{PaymentDetails, Redirect, ShippingDetails};
use verde_storefront::{AppError, AppState};

#[derive(Args)]
pub struct CheckoutArgs {
    /// Shipping first name
    #[arg(long, default_value = "Jane")]
    first_name: String,

    /// Shipping last name
    #[arg(long, default_value = "Doe")]
    last_name: String,

    /// Contact email
    #[arg(long, default_value = "jane@example.com")]
    email: String,

    /// Street address
    #[arg(long, default_value = "123 Main Street")]
    address: String,

    /// City
    #[arg(long, default_value = "San Francisco")]
    city: String,

    /// ZIP code
    #[arg(long, default_value = "94102")]
    zip: String,

    /// Card number (never validated, never charged)
    #[arg(long, default_value = "4242 4242 4242 4242")]
    card_number: String,
}

pub async fn run(state: &AppState, args: CheckoutArgs) -> Result<(), AppError> {
    let mut flow = match state.begin_checkout() {
        Ok(flow) => flow,
        Err(Redirect::Cart | Redirect::Products) => {
            println!("Your cart is empty. Add something before checking out.");
            return Ok(());
        }
    };

    let totals = state.checkout_totals(&flow);
    println!("Order summary");
    println!("  Subtotal: {:>9}", totals.subtotal.display());
    if totals.shipping_fee.is_zero() {
        println!("  Shipping:      Free");
    } else {
        println!("  Shipping: {:>9}", totals.shipping_fee.display());
    }
    println!("  Total:    {:>9}", totals.grand_total.display());
    println!();

    flow.continue_to_payment(ShippingDetails {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        address: args.address,
        city: args.city,
        zip: args.zip,
    })?;
    flow.set_payment_details(PaymentDetails {
        card_number: args.card_number,
        ..PaymentDetails::default()
    });

    println!("Processing payment of {}...", totals.grand_total.display());
    let order_id = state.place_order(&mut flow).await?;

    println!();
    println!("Order confirmed!");
    println!("Thank you for your purchase. Your order number is #{order_id}.");
    println!("We've sent a confirmation email with your order details.");
    Ok(())
}
