//! Interactive shopping session: cart and checkout.

use anyhow::{Context as _, Result};
use astharhat_commerce::cart::{CartStore, OrderTotals};
use astharhat_commerce::checkout::{CheckoutFlow, CheckoutForm, OrderReceipt};
use astharhat_commerce::ProductId;
use dialoguer::{Confirm, Input, Select};
use tracing::info;

use super::ShopArgs;
use crate::context::Context;
use crate::output::{money, state_badge};

/// Menu entries of the shopping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    ViewCart,
    Remove,
    Clear,
    Checkout,
    LastOrder,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Add => "Add a product",
            Action::ViewCart => "View cart",
            Action::Remove => "Remove a product",
            Action::Clear => "Clear cart",
            Action::Checkout => "Checkout",
            Action::LastOrder => "Show last order",
            Action::Quit => "Quit",
        }
    }
}

/// Actions available for the current cart.
fn actions(cart: &CartStore) -> Vec<Action> {
    let mut actions = vec![Action::Add];
    if !cart.is_empty() {
        actions.extend([Action::ViewCart, Action::Remove, Action::Clear, Action::Checkout]);
    }
    if cart.last_order().is_some() {
        actions.push(Action::LastOrder);
    }
    actions.push(Action::Quit);
    actions
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let mut cart = CartStore::new(ctx.config.pricing.currency()?);
    let mut flow = ctx.checkout_flow()?;

    for id in &args.add {
        let item = ctx.catalog.require(&ProductId::new(id.as_str()))?;
        cart.add_item(item)?;
    }

    ctx.output.header("AstharHat Shop");

    loop {
        let menu = actions(&cart);
        let labels: Vec<&str> = menu.iter().map(|a| a.label()).collect();
        let prompt = format!("Cart: {} item(s)", cart.total_quantity());
        let choice = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()
            .context("Failed to read selection")?;

        match menu[choice] {
            Action::Add => add_product(&mut cart, ctx)?,
            Action::ViewCart => view_cart(&mut cart, &flow, ctx)?,
            Action::Remove => remove_product(&mut cart, ctx)?,
            Action::Clear => {
                cart.clear();
                ctx.output.success("Cart cleared");
            }
            Action::Checkout => checkout(&mut cart, &mut flow, ctx).await?,
            Action::LastOrder => {
                if let Some(receipt) = cart.last_order() {
                    print_receipt(receipt, ctx);
                }
                let dismiss = Confirm::new()
                    .with_prompt("Dismiss this receipt?")
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if dismiss {
                    cart.set_last_order(None);
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn add_product(cart: &mut CartStore, ctx: &Context) -> Result<()> {
    let items = ctx.catalog.items();
    let labels: Vec<String> = items
        .iter()
        .map(|item| format!("{} - {}", item.name, crate::output::price_label(item)))
        .collect();

    let choice = Select::new()
        .with_prompt("Product")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    let item = &items[choice];
    match cart.add_item(item) {
        Ok(quantity) => ctx
            .output
            .success(&format!("{} in cart (qty {})", item.name, quantity)),
        Err(e) => ctx.output.error(&e.to_string()),
    }
    Ok(())
}

fn remove_product(cart: &mut CartStore, ctx: &Context) -> Result<()> {
    let labels: Vec<String> = cart
        .lines()
        .iter()
        .map(|line| format!("{} x{}", line.item.name, line.quantity))
        .collect();

    let choice = Select::new()
        .with_prompt("Remove")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    let id = cart.lines()[choice].id().clone();
    if cart.remove_item(&id) {
        ctx.output.success(&format!("Removed {}", labels[choice]));
    }
    Ok(())
}

fn view_cart(cart: &mut CartStore, flow: &CheckoutFlow, ctx: &Context) -> Result<()> {
    cart.set_visible(true);
    let totals = flow.quote(cart)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cart": cart, "totals": totals }));
    } else {
        ctx.output.header("Your Cart");
        let widths = [28, 5, 14];
        ctx.output.table_row(&["ITEM", "QTY", "LINE TOTAL"], &widths);
        for line in cart.lines() {
            ctx.output.table_row(
                &[
                    &line.item.name,
                    &line.quantity.to_string(),
                    &line.line_total()?.display(),
                ],
                &widths,
            );
        }
        print_totals(&totals, ctx);
    }

    cart.set_visible(false);
    Ok(())
}

async fn checkout(cart: &mut CartStore, flow: &mut CheckoutFlow, ctx: &Context) -> Result<()> {
    let totals = flow.quote(cart)?;
    ctx.output.header("Checkout");
    print_totals(&totals, ctx);

    fill_form(flow.form_mut()?)?;

    let missing = flow.form().missing_fields();
    if !missing.is_empty() {
        ctx.output
            .warn(&format!("Please fill in: {}", missing.join(", ")));
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Place order for {}?", totals.total.display()))
        .default(true)
        .interact()
        .context("Failed to read confirmation")?;
    if !confirmed {
        ctx.output.info("Order not placed. Your details are kept for next time.");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Processing your order...");
    let result = flow.submit(cart, &ctx.submitter()).await;
    spinner.finish_and_clear();

    match result {
        Ok(receipt) => {
            info!(tracking = %receipt.tracking_number, "order placed");
            ctx.output.success("Order placed");
            print_receipt(&receipt, ctx);
            flow.restart();
        }
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            ctx.output
                .debug(&format!("Checkout state: {}", state_badge(flow.state().as_str())));
            ctx.output.info("Your cart is unchanged. You can try again.");
        }
    }

    Ok(())
}

/// Prompt for every form field, prefilled with what was entered before.
fn fill_form(form: &mut CheckoutForm) -> Result<()> {
    for (index, label) in CheckoutForm::FIELDS.iter().enumerate() {
        let Some(field) = form.field_mut(index) else {
            continue;
        };
        let value: String = Input::new()
            .with_prompt(capitalize(label))
            .with_initial_text(field.clone())
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;
        *field = value;
    }
    Ok(())
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_totals(totals: &OrderTotals, ctx: &Context) {
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    let shipping = if totals.has_free_shipping() {
        "Free".to_string()
    } else {
        totals.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Tax", &totals.tax.display());
    ctx.output.kv("Total", &money(&totals.total));
}

fn print_receipt(receipt: &OrderReceipt, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    ctx.output
        .header(&format!("Thank you, {}!", receipt.first_name));
    ctx.output.kv("Tracking number", receipt.tracking_number.as_str());
    ctx.output.kv("Items", &receipt.item_count.to_string());
    ctx.output.kv("Total paid", &money(&receipt.total));
    ctx.output.kv("Deliver to", &receipt.delivery_address);
    ctx.output.kv("Estimated delivery", &receipt.delivery_estimate);
    ctx.output.kv(
        "Placed at",
        &receipt.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    ctx.output.info(&format!(
        "A confirmation has been sent to {}",
        receipt.contact_email
    ));
}
