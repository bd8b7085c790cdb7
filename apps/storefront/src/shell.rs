//! # Storefront Shell
//!
//! A line-oriented front end over the command layer. One line in, one
//! command out; toasts raised while the command ran are printed after it.
//!
//! ## Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ menu [words] [category=<name>] [sort=name|price-low|price-high|time]    │
//! │ add <item-id> [qty] [note...]                                           │
//! │ qty <entry> <n>           entry = cart position (1, 2, ..) or entry id  │
//! │ rm <entry>                                                              │
//! │ cart | clear                                                            │
//! │ address <street> | <city> | <state> | <zip> | <phone> [| <landmark>]    │
//! │ summary                                                                 │
//! │ order [instructions...]                                                 │
//! │ register <name> | <email> | <password> | <confirm>                      │
//! │ login <email> <password>                                                │
//! │ logout | whoami                                                         │
//! │ go <path> | config                                                      │
//! │ help | quit                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use bite_core::routing::{Access, Route};
use bite_core::{CartEntry, DeliveryAddress, Money, NotificationKind, OrderTotals};

use crate::commands;
use crate::error::ApiError;
use crate::notify::RecordingNotifier;
use crate::state::{AppState, RegisterForm};

const HELP: &str = "\
commands:
  menu [words] [category=<name>] [sort=name|price-low|price-high|time]
  add <item-id> [qty] [note...]
  qty <entry> <n>
  rm <entry>
  cart
  clear
  address <street> | <city> | <state> | <zip> | <phone> [| <landmark>]
  summary
  order [instructions...]
  register <name> | <email> | <password> | <confirm>
  login <email> <password>
  logout
  whoami
  go <path>
  config
  quit";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu {
        search: Option<String>,
        category: Option<String>,
        sort: Option<String>,
    },
    Add {
        item_id: String,
        quantity: Option<i64>,
        note: Option<String>,
    },
    Quantity {
        entry: String,
        quantity: i64,
    },
    Remove {
        entry: String,
    },
    Cart,
    Clear,
    Address(DeliveryAddress),
    Summary,
    Order {
        instructions: Option<String>,
    },
    Register(RegisterForm),
    Login {
        email: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Go {
        path: String,
    },
    Config,
    Help,
    Quit,
}

impl Command {
    /// The screen a command acts on, if that screen is guarded.
    pub fn screen(&self) -> Option<Route> {
        match self {
            Command::Menu { .. } | Command::Add { .. } => Some(Route::Menu),
            Command::Quantity { .. } | Command::Remove { .. } | Command::Cart | Command::Clear => {
                Some(Route::Cart)
            }
            Command::Address(_) => Some(Route::CheckoutAddress),
            Command::Summary => Some(Route::CheckoutSummary),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parses one line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    let Some((verb, rest)) = split_verb(line) else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "menu" | "m" => parse_menu(rest),
        "add" | "a" => {
            let mut words = rest.split_whitespace();
            let item_id = words
                .next()
                .ok_or(ParseError::Usage("add <item-id> [qty] [note...]"))?
                .to_string();
            let mut remaining: Vec<&str> = words.collect();
            let quantity = match remaining.first().map(|w| w.parse::<i64>()) {
                Some(Ok(n)) => {
                    remaining.remove(0);
                    Some(n)
                }
                _ => None,
            };
            Command::Add {
                item_id,
                quantity,
                note: non_empty(remaining.join(" ")),
            }
        }
        "qty" | "q" => {
            let words: Vec<&str> = rest.split_whitespace().collect();
            match words.as_slice() {
                [entry, n] => Command::Quantity {
                    entry: entry.to_string(),
                    quantity: n.parse().map_err(|_| ParseError::Usage("qty <entry> <n>"))?,
                },
                _ => return Err(ParseError::Usage("qty <entry> <n>")),
            }
        }
        "rm" | "remove" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [entry] => Command::Remove {
                entry: entry.to_string(),
            },
            _ => return Err(ParseError::Usage("rm <entry>")),
        },
        "cart" | "c" => Command::Cart,
        "clear" => Command::Clear,
        "address" => {
            const USAGE: &str = "address <street> | <city> | <state> | <zip> | <phone> [| <landmark>]";
            let parts: Vec<String> = rest.split('|').map(|p| p.trim().to_string()).collect();
            if parts.len() < 5 || parts.len() > 6 {
                return Err(ParseError::Usage(USAGE));
            }
            let mut parts = parts.into_iter();
            let mut next = || parts.next().unwrap_or_default();
            Command::Address(DeliveryAddress {
                street: next(),
                city: next(),
                state: next(),
                zip_code: next(),
                phone_number: next(),
                landmark: non_empty(next()),
                is_default: true,
            })
        }
        "summary" => Command::Summary,
        "order" => Command::Order {
            instructions: non_empty(rest.to_string()),
        },
        "register" => {
            let parts: Vec<String> = rest.split('|').map(|p| p.trim().to_string()).collect();
            match <[String; 4]>::try_from(parts) {
                Ok([name, email, password, confirm_password]) => Command::Register(RegisterForm {
                    name,
                    email,
                    password,
                    confirm_password,
                }),
                Err(_) => {
                    return Err(ParseError::Usage(
                        "register <name> | <email> | <password> | <confirm>",
                    ))
                }
            }
        }
        "login" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(ParseError::Usage("login <email> <password>")),
        },
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "go" => match rest.split_whitespace().next() {
            Some(path) => Command::Go {
                path: path.to_string(),
            },
            None => return Err(ParseError::Usage("go <path>")),
        },
        "config" => Command::Config,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn split_verb(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    })
}

fn parse_menu(rest: &str) -> Command {
    let mut search = Vec::new();
    let mut category = None;
    let mut sort = None;

    for word in rest.split_whitespace() {
        if let Some(value) = word.strip_prefix("category=") {
            category = Some(value.to_string());
        } else if let Some(value) = word.strip_prefix("sort=") {
            sort = Some(value.to_string());
        } else {
            search.push(word);
        }
    }

    Command::Menu {
        search: non_empty(search.join(" ")),
        category,
        sort,
    }
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// =============================================================================
// Execution
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs parsed commands against one [`AppState`].
pub struct Shell {
    state: AppState,
    toasts: RecordingNotifier,
}

impl Shell {
    /// `toasts` must be the notifier `state` was built with.
    pub fn new(state: AppState, toasts: RecordingNotifier) -> Self {
        Shell { state, toasts }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Reads lines until EOF or `quit`.
    pub async fn run<R, W>(&self, input: R, out: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(
            out,
            "Welcome to {}! Type 'help' for commands.",
            self.state.config.store_name
        )?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}> ", self.state.navigation.current())?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                writeln!(out)?;
                break;
            };

            let command = match parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            };

            if self.execute(command, out).await? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Runs one command, then prints the toasts it raised.
    ///
    /// A failed command prints its error only when no toast already said so.
    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> io::Result<Flow> {
        if command == Command::Quit {
            writeln!(out, "Bye!")?;
            return Ok(Flow::Quit);
        }

        let result = self.dispatch(command, out).await?;
        let toasts = self.toasts.drain();

        for toast in &toasts {
            let mark = match toast.kind {
                NotificationKind::Success => "✓",
                NotificationKind::Destructive => "✗",
            };
            writeln!(out, "{} {}: {}", mark, toast.title, toast.message)?;
        }

        if let Err(err) = result {
            if toasts.is_empty() {
                writeln!(out, "error: {}", err.message)?;
            }
        }

        Ok(Flow::Continue)
    }

    async fn dispatch<W: Write>(
        &self,
        command: Command,
        out: &mut W,
    ) -> io::Result<Result<(), ApiError>> {
        let s = &self.state;

        // Guarded commands move to their screen first and stop on a redirect
        if let Some(screen) = command.screen() {
            let res = commands::navigation::navigate(&s.navigation, &s.session, &s.cart, screen.path());
            if let Access::Redirect { to, .. } = res.access {
                writeln!(out, "{} is not available yet, redirected to {}", res.requested, to)?;
                return Ok(Ok(()));
            }
        }

        let result = match command {
            Command::Menu {
                search,
                category,
                sort,
            } => commands::catalog::list_menu(
                &s.catalog,
                &s.cart,
                search.as_deref(),
                category.as_deref(),
                sort.as_deref(),
            )
            .map(|menu| self.print_menu(&menu, out)),
            Command::Add {
                item_id,
                quantity,
                note,
            } => commands::cart::add_to_cart(&s.catalog, &s.cart, &s.config, &item_id, quantity, note)
                .map(|_| Ok(())),
            Command::Quantity { entry, quantity } => {
                let entry_id = self.resolve_entry(&entry);
                let res = commands::cart::update_cart_item(&s.cart, &s.config, &entry_id, quantity);
                Ok(self.print_cart(&res.entries, &res.totals, out))
            }
            Command::Remove { entry } => {
                let entry_id = self.resolve_entry(&entry);
                let res = commands::cart::remove_from_cart(&s.cart, &s.config, &entry_id);
                Ok(self.print_cart(&res.entries, &res.totals, out))
            }
            Command::Cart => {
                let res = commands::cart::get_cart(&s.cart, &s.config);
                Ok(self.print_cart(&res.entries, &res.totals, out))
            }
            Command::Clear => {
                commands::cart::clear_cart(&s.cart, &s.config);
                Ok(writeln!(out, "Cart cleared."))
            }
            Command::Address(address) => {
                commands::checkout::submit_address(&s.checkout, s.notifier.as_ref(), address)
                    .await
                    .map(|_| Ok(()))
            }
            Command::Summary => commands::checkout::get_order_summary(&s.cart, &s.checkout).map(
                |summary| {
                    self.print_cart(&summary.entries, &summary.totals, out)?;
                    match &summary.delivery_address {
                        Some(a) => writeln!(
                            out,
                            "Deliver to: {}, {}, {} {}",
                            a.street, a.city, a.state, a.zip_code
                        )?,
                        None => writeln!(out, "Deliver to: (no address yet, use 'address')")?,
                    }
                    writeln!(
                        out,
                        "Estimated delivery: {} minutes",
                        summary.estimated_delivery_minutes
                    )
                },
            ),
            Command::Order { instructions } => commands::checkout::place_order(
                &s.session,
                &s.cart,
                &s.checkout,
                s.notifier.as_ref(),
                instructions,
            )
            .await
            .map(|order| {
                commands::navigation::navigate(&s.navigation, &s.session, &s.cart, "/order-confirmation");
                writeln!(
                    out,
                    "Order {} total {}, arriving around {}",
                    order.id,
                    self.money(order.totals.total),
                    order.estimated_delivery_at.format("%H:%M UTC")
                )
            }),
            Command::Register(form) => {
                commands::auth::register(&s.session, s.notifier.as_ref(), form)
                    .await
                    .map(|_| self.after_sign_in(out))
            }
            Command::Login { email, password } => {
                commands::auth::login(&s.session, s.notifier.as_ref(), &email, &password)
                    .await
                    .map(|_| self.after_sign_in(out))
            }
            Command::Logout => Ok(match commands::auth::logout(&s.session) {
                Some(user) => writeln!(out, "Signed out {}.", user.email),
                None => writeln!(out, "Nobody is signed in."),
            }),
            Command::WhoAmI => Ok(match commands::auth::current_user(&s.session) {
                Some(user) => writeln!(out, "{} <{}>", user.name, user.email),
                None => writeln!(out, "Not signed in."),
            }),
            Command::Go { path } => {
                let res = commands::navigation::navigate(&s.navigation, &s.session, &s.cart, &path);
                Ok(match res.access {
                    Access::Allow => writeln!(out, "-> {}", res.current),
                    Access::Redirect { to, .. } => {
                        writeln!(out, "{} is not available yet, redirected to {}", res.requested, to)
                    }
                })
            }
            Command::Config => {
                let config = commands::config::get_config(&s.config);
                let pricing = config.pricing;
                Ok(writeln!(
                    out,
                    "{} ({}): tax {}%, delivery {} (free over {}), +{} min transit",
                    config.store_name,
                    config.currency_code,
                    pricing.tax_rate.percentage(),
                    self.money(pricing.delivery_fee),
                    self.money(pricing.free_delivery_over),
                    pricing.transit_minutes
                ))
            }
            Command::Help => Ok(writeln!(out, "{}", HELP)),
            Command::Quit => Ok(Ok(())),
        };

        // Flip Result<io::Result<()>, ApiError> so io errors abort the shell.
        match result {
            Ok(io_result) => io_result.map(Ok),
            Err(err) => Ok(Err(err)),
        }
    }

    /// Position in the cart (1-based) or a raw entry id.
    fn resolve_entry(&self, entry: &str) -> String {
        let by_position = entry.parse::<usize>().ok().and_then(|n| {
            self.state.cart.with_engine(|engine| {
                n.checked_sub(1)
                    .and_then(|i| engine.entries().get(i))
                    .map(|e| e.id.clone())
            })
        });
        by_position.unwrap_or_else(|| entry.to_string())
    }

    fn after_sign_in<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = &self.state;
        let res = commands::navigation::after_sign_in(&s.navigation, &s.session, &s.cart);
        writeln!(out, "-> {}", res.current)
    }

    fn money(&self, amount: Money) -> String {
        self.state.config.format_currency(amount.cents())
    }

    fn print_menu<W: Write>(&self, menu: &commands::catalog::MenuResponse, out: &mut W) -> io::Result<()> {
        if menu.items.is_empty() {
            return writeln!(out, "No dishes match.");
        }

        for view in &menu.items {
            let item = &view.item;
            let mut tags = Vec::new();
            if item.is_vegetarian {
                tags.push("veg".to_string());
            }
            if !item.is_available {
                tags.push("unavailable".to_string());
            }
            if view.in_cart > 0 {
                tags.push(format!("{} in cart", view.in_cart));
            }

            writeln!(
                out,
                "{:>3}  {:<24} {:>8}  {:<8} {:>3} min  {}",
                item.id,
                item.name,
                self.money(item.price),
                item.category,
                item.preparation_time,
                tags.join(", ")
            )?;
        }
        Ok(())
    }

    fn print_cart<W: Write>(
        &self,
        entries: &[CartEntry],
        totals: &OrderTotals,
        out: &mut W,
    ) -> io::Result<()> {
        if entries.is_empty() {
            return writeln!(out, "Your cart is empty.");
        }

        for (i, entry) in entries.iter().enumerate() {
            writeln!(
                out,
                "{:>2}. {:<24} x{:<3} {:>8}",
                i + 1,
                entry.item.name,
                entry.quantity,
                self.money(entry.line_total())
            )?;
            if let Some(note) = &entry.special_instructions {
                writeln!(out, "      note: {}", note)?;
            }
        }

        writeln!(out, "    Subtotal {:>26}", self.money(totals.subtotal))?;
        writeln!(out, "    Delivery {:>26}", self.money(totals.delivery_fee))?;
        writeln!(out, "    Tax      {:>26}", self.money(totals.tax))?;
        writeln!(out, "    Total    {:>26}", self.money(totals.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StorefrontConfig;
    use bite_store::{MemoryStore, Storage};
    use std::sync::Arc;

    fn shell() -> Shell {
        let toasts = RecordingNotifier::new();
        let state = AppState::new(
            StorefrontConfig::instant(),
            &Storage::with_store(MemoryStore::new()),
            Arc::new(toasts.clone()),
        );
        Shell::new(state, toasts)
    }

    async fn run(shell: &Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("dance"), Err(ParseError::Unknown("dance".to_string())));
        assert_eq!(parse("QUIT"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse("add 1 2 no onions please"),
            Ok(Some(Command::Add {
                item_id: "1".to_string(),
                quantity: Some(2),
                note: Some("no onions please".to_string()),
            }))
        );
        assert_eq!(
            parse("add 3 extra crispy"),
            Ok(Some(Command::Add {
                item_id: "3".to_string(),
                quantity: None,
                note: Some("extra crispy".to_string()),
            }))
        );
        assert!(matches!(parse("add"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_menu_options() {
        assert_eq!(
            parse("menu spicy roll category=Asian sort=price-low"),
            Ok(Some(Command::Menu {
                search: Some("spicy roll".to_string()),
                category: Some("Asian".to_string()),
                sort: Some("price-low".to_string()),
            }))
        );
    }

    #[test]
    fn test_parse_address() {
        let Ok(Some(Command::Address(a))) =
            parse("address 123 Main Street | Springfield | IL | 62701 | 555 123 4567")
        else {
            panic!("expected address");
        };
        assert_eq!(a.city, "Springfield");
        assert_eq!(a.phone_number, "555 123 4567");
        assert_eq!(a.landmark, None);

        assert!(matches!(parse("address 1 Main | Town"), Err(ParseError::Usage(_))));
    }

    #[test]
    fn test_parse_register_and_qty() {
        assert!(matches!(
            parse("register Jane Doe | jane@example.com | secret1 | secret1"),
            Ok(Some(Command::Register(ref f))) if f.name == "Jane Doe"
        ));
        assert!(matches!(parse("register Jane | jane@example.com"), Err(ParseError::Usage(_))));
        assert!(matches!(parse("qty 1 two"), Err(ParseError::Usage(_))));
    }

    #[tokio::test]
    async fn test_full_session() {
        let shell = shell();
        let output = run(
            &shell,
            "go /cart\n\
             register Jane Doe | jane@example.com | secret1 | secret1\n\
             add 1 2\n\
             add 7\n\
             address 123 Main Street | Springfield | IL | 62701 | 555 123 4567\n\
             summary\n\
             order ring the bell\n\
             cart\n\
             quit\n",
        )
        .await;

        assert!(output.contains("redirected to /login"));
        assert!(output.contains("✓ Account Created!"));
        assert!(output.contains("-> /cart"));
        assert!(output.contains("✓ Added to Cart: Margherita Pizza has been added to your cart."));
        assert!(output.contains("✗ Item Unavailable"));
        assert!(output.contains("$28.06"));
        assert!(output.contains("Estimated delivery: 50 minutes"));
        assert!(output.contains("✓ Order Placed Successfully!"));
        assert!(output.ends_with("Bye!\n"));

        assert_eq!(shell.state().navigation.current(), Route::OrderConfirmation);
        assert!(shell.state().checkout.last_order().is_some());

        let output = run(&shell, "cart\n").await;
        assert!(output.contains("Your cart is empty."));
        assert_eq!(shell.state().navigation.current(), Route::Cart);
    }

    #[tokio::test]
    async fn test_cart_commands_need_sign_in() {
        let shell = shell();
        let output = run(&shell, "add 1 2\nmenu\ncart\n").await;

        assert!(output.contains("/menu is not available yet, redirected to /login"));
        assert!(output.contains("/cart is not available yet, redirected to /login"));
        assert!(!output.contains("Added to Cart"));
        assert!(!output.contains("Margherita Pizza"));
        assert!(shell.state().cart.with_engine(|e| e.is_empty()));
        assert_eq!(shell.state().navigation.current(), Route::Login);
    }

    #[tokio::test]
    async fn test_checkout_commands_need_items() {
        let shell = shell();
        let output = run(
            &shell,
            "register Jane Doe | jane@example.com | secret1 | secret1\n\
             summary\n\
             address 123 Main Street | Springfield | IL | 62701 | 555 123 4567\n",
        )
        .await;

        assert!(output.contains("/checkout/summary is not available yet, redirected to /menu"));
        assert!(output.contains("/checkout/address is not available yet, redirected to /menu"));
        assert!(shell.state().checkout.saved_address().is_none());
        assert_eq!(shell.state().navigation.current(), Route::Menu);
    }

    #[tokio::test]
    async fn test_errors_without_toast_are_printed() {
        let shell = shell();
        let output = run(
            &shell,
            "register Jane Doe | jane@example.com | secret1 | secret1\n\
             add 99\n\
             menu category=Spaceships\n",
        )
        .await;

        assert!(output.contains("error: Menu item not found: 99"));
        assert!(output.contains("error: Unknown category: Spaceships"));
    }

    #[tokio::test]
    async fn test_config_line() {
        let shell = shell();
        let output = run(&shell, "config\n").await;
        assert!(output.contains("tax 8%, delivery $2.99 (free over $25.00), +30 min transit"));
    }

    #[tokio::test]
    async fn test_qty_by_position() {
        let shell = shell();
        run(
            &shell,
            "register Jane Doe | jane@example.com | secret1 | secret1\n\
             add 1\nadd 8\nqty 2 3\nrm 1\n",
        )
        .await;

        let entries = shell.state().cart.with_engine(|e| e.entries().to_vec());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].item.id, "8");
        assert_eq!(entries[0].quantity, 3);
    }
}
