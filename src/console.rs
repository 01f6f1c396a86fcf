//! Console front end - a line-oriented ordering session.
//!
//! Each input line is one command. The console only renders state and forwards
//! selections to the command wrappers; it keeps no state of its own.

use crate::{
    commands::{AddToCart, PlaceOrder},
    core::{
        cart::CartSnapshot,
        catalog::{CatalogItem, SimpleItem},
        notifier::CartListener,
        packaging::PackagingResolver,
    },
    errors::Result,
    session::SessionContext,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{debug, warn};

const HELP_TEXT: &str = "Commands:\n\
    \x20 menu                      list everything on the menu\n\
    \x20 search <text>             find menu items\n\
    \x20 add <number>              add one unit of a menu item\n\
    \x20 remove <number>           remove one unit of a menu item\n\
    \x20 cart                      show the cart\n\
    \x20 clear                     empty the cart\n\
    \x20 checkout <name> ; <address>  place the order\n\
    \x20 help                      show this text\n\
    \x20 quit                      leave";

/// What the console should do after handling a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and read the next line
    Continue(String),
    /// Print the text and stop
    Quit(String),
}

impl Reply {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Continue(text) | Self::Quit(text) => text,
        }
    }
}

/// Logs every cart change; stands in for a rendered cart view.
#[derive(Debug, Default)]
pub struct CartLogView;

impl CartListener for CartLogView {
    fn cart_updated(&self, snapshot: &CartSnapshot) -> Result<()> {
        debug!(
            "Cart view refreshed: {} units, total ${:.2}",
            snapshot.item_count(),
            snapshot.total()
        );
        Ok(())
    }
}

/// Reads commands from `input` until EOF or `quit`, writing replies to `output`.
///
/// # Errors
/// Returns an error only if reading input or writing output fails.
pub async fn run<R, W>(session: &SessionContext, input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    session.cart().subscribe(Arc::new(CartLogView));
    writeln!(output, "Welcome! Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let reply = handle_line(session, &line).await;
        writeln!(output, "{}", reply.text())?;
        output.flush()?;
        if matches!(reply, Reply::Quit(_)) {
            break;
        }
    }
    Ok(())
}

/// Handles one command line.
pub async fn handle_line(session: &SessionContext, line: &str) -> Reply {
    let line = line.trim();
    let (command, argument) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let text = match command.to_lowercase().as_str() {
        "" => String::new(),
        "menu" => render_menu(session),
        "search" => render_search(session, argument),
        "add" => add_item(session, argument),
        "remove" => remove_item(session, argument),
        "cart" => render_cart(&session.cart().snapshot()),
        "clear" => match session.cart().clear() {
            Ok(()) => "Cart cleared.".to_string(),
            Err(e) => format!("Cart cleared, but the view failed: {e}"),
        },
        "checkout" => checkout(session, argument).await,
        "help" => HELP_TEXT.to_string(),
        "quit" | "exit" => return Reply::Quit("Goodbye!".to_string()),
        other => format!("Unknown command '{other}'. Type 'help' for commands."),
    };
    Reply::Continue(text)
}

fn render_menu(session: &SessionContext) -> String {
    let mut out = Vec::new();
    let mut current_category = "";
    for (index, item) in session.items().iter().enumerate() {
        if item.category_name() != current_category {
            current_category = item.category_name();
            out.push(format!("== {current_category} =="));
        }
        out.push(menu_entry(index + 1, item));
    }
    if out.is_empty() {
        return "The menu is empty.".to_string();
    }
    out.join("\n")
}

fn render_search(session: &SessionContext, text: &str) -> String {
    if text.is_empty() {
        return "Usage: search <text>".to_string();
    }
    let matches: Vec<String> = session
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| CatalogItem::Simple((*item).clone()).search(text))
        .map(|(index, item)| menu_entry(index + 1, item))
        .collect();
    if matches.is_empty() {
        return format!("Nothing matches '{text}'.");
    }
    matches.join("\n")
}

fn menu_entry(number: usize, item: &SimpleItem) -> String {
    format!("{number:>3}. {} - ${:.2}", item.name(), item.price())
}

fn add_item(session: &SessionContext, argument: &str) -> String {
    let item = match select_item(session, argument) {
        Ok(item) => item.clone(),
        Err(message) => return message,
    };
    let cart = session.cart();

    let packaged = match PackagingResolver::new().with_item(item).build() {
        Ok(packaged) => packaged,
        Err(e) => return format!("Could not add item: {e}"),
    };
    match AddToCart::new(packaged, &cart).execute() {
        Ok(outcome) => outcome.message(),
        Err(e) => {
            warn!("Cart view failed after add: {e}");
            format!("Item added, but the cart view failed: {e}")
        }
    }
}

fn remove_item(session: &SessionContext, argument: &str) -> String {
    let item = match select_item(session, argument) {
        Ok(item) => item,
        Err(message) => return message,
    };
    match session.cart().remove(item) {
        Ok(true) => format!("Removed one {}.", item.name()),
        Ok(false) => format!("{} is not in the cart.", item.name()),
        Err(e) => format!("Item removed, but the cart view failed: {e}"),
    }
}

fn select_item<'a>(
    session: &'a SessionContext,
    argument: &str,
) -> std::result::Result<&'a SimpleItem, String> {
    let number: usize = argument
        .parse()
        .map_err(|_| format!("'{argument}' is not a menu number."))?;
    session
        .item_by_number(number)
        .ok_or_else(|| format!("There is no menu item {number}."))
}

fn render_cart(snapshot: &CartSnapshot) -> String {
    if snapshot.is_empty() {
        return "Your cart is empty.".to_string();
    }
    let mut out = snapshot.display_lines();
    out.push(format!("Total: ${:.2}", snapshot.total()));
    out.join("\n")
}

async fn checkout(session: &SessionContext, argument: &str) -> String {
    let Some((name, address)) = argument.split_once(';') else {
        return "Usage: checkout <name> ; <address>".to_string();
    };
    let cart = session.cart();
    match PlaceOrder::new(&cart, session.committer(), name, address)
        .execute()
        .await
    {
        Ok(receipt) => format!(
            "Order #{} placed. Total charged: ${:.2}. Thank you!",
            receipt.order_id, receipt.total
        ),
        Err(e) => format!("Order failed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::order;
    use crate::test_utils::*;

    async fn sample_session() -> Result<SessionContext> {
        let db = setup_with_sample_menu().await?;
        SessionContext::open(db).await
    }

    fn number_of(session: &SessionContext, name: &str) -> usize {
        session
            .items()
            .iter()
            .position(|item| item.name() == name)
            .unwrap()
            + 1
    }

    #[tokio::test]
    async fn test_add_shows_packaging_text() -> Result<()> {
        let session = sample_session().await?;
        let number = number_of(&session, "Margherita");

        let reply = handle_line(&session, &format!("add {number}")).await;
        assert_eq!(
            reply.text(),
            "Your freshly baked Margherita is snug in its signature delivery box!"
        );
        assert_eq!(session.cart().snapshot().item_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_selection_is_reported() -> Result<()> {
        let session = sample_session().await?;
        let reply = handle_line(&session, "add pizza").await;
        assert_eq!(reply.text(), "'pizza' is not a menu number.");
        let reply = handle_line(&session, "remove 999").await;
        assert_eq!(reply.text(), "There is no menu item 999.");
        Ok(())
    }

    #[tokio::test]
    async fn test_search_matches_variant_names() -> Result<()> {
        let session = sample_session().await?;
        let reply = handle_line(&session, "search large").await;
        assert!(reply.text().contains("Pepperoni (Large)"));
        assert!(!reply.text().contains("Margherita"));
        Ok(())
    }

    #[tokio::test]
    async fn test_cart_and_remove() -> Result<()> {
        let session = sample_session().await?;
        let number = number_of(&session, "Cola");

        handle_line(&session, &format!("add {number}")).await;
        handle_line(&session, &format!("add {number}")).await;
        let reply = handle_line(&session, "cart").await;
        assert_eq!(reply.text(), "2 x Cola @ $1.75 = $3.50\nTotal: $3.50");

        handle_line(&session, &format!("remove {number}")).await;
        handle_line(&session, &format!("remove {number}")).await;
        let reply = handle_line(&session, &format!("remove {number}")).await;
        assert_eq!(reply.text(), "Cola is not in the cart.");
        assert_eq!(
            handle_line(&session, "cart").await.text(),
            "Your cart is empty."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_places_order() -> Result<()> {
        let session = sample_session().await?;
        let number = number_of(&session, "Margherita");
        handle_line(&session, &format!("add {number}")).await;

        let reply = handle_line(&session, "checkout Ada ; 12 Analytical Row").await;
        assert!(reply.text().starts_with("Order #"), "{}", reply.text());
        assert!(session.cart().is_empty());

        let orders = order::get_order_by_id(session.database(), 1).await?.unwrap();
        assert_eq!(orders.customer_address, "12 Analytical Row");
        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_reports_error() -> Result<()> {
        let session = sample_session().await?;
        let reply = handle_line(&session, "checkout Ada ; 12 Analytical Row").await;
        assert_eq!(
            reply.text(),
            "Order failed: Cannot place an order: the cart is empty"
        );
        let reply = handle_line(&session, "checkout Ada").await;
        assert_eq!(reply.text(), "Usage: checkout <name> ; <address>");
        Ok(())
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() -> Result<()> {
        let session = sample_session().await?;
        let input = b"help\nquit\nmenu\n".as_slice();
        let mut output = Vec::new();

        run(&session, input, &mut output).await?;
        let printed = String::from_utf8(output).unwrap();
        assert!(printed.contains("Commands:"));
        assert!(printed.trim_end().ends_with("Goodbye!"));
        assert!(!printed.contains("== Pizzas =="));
        Ok(())
    }
}
