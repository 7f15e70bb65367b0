//! Interactive browsing session over stdin.

use storefront_core::{Intent, ProductId};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;
use crate::runtime::Runtime;

pub(crate) const HELP: &str = "\
commands:
  search [TERM]      filter by name/description (no term clears)
  category [NAME]    filter by category (no name selects all)
  categories         list categories
  next | prev        change page
  show ID            open product detail
  back               return to the product list
  add ID             add product to cart
  remove ID          remove product from cart
  cart               show cart
  list               show product list
  reload             refetch the catalog
  help               show this help
  quit               exit";

/// One parsed line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Intents(Vec<Intent>),
    Categories,
    Help,
    Quit,
}

/// Parses one input line.
///
/// # Errors
///
/// Returns a user-facing message for unknown commands or bad arguments.
pub(crate) fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    let one = |intent: Intent| -> Result<ShellCommand, String> {
        Ok(ShellCommand::Intents(vec![intent]))
    };

    match verb.to_lowercase().as_str() {
        "search" => Ok(ShellCommand::Intents(vec![
            Intent::EditSearch(rest.to_string()),
            Intent::SubmitSearch,
        ])),
        "category" => one(Intent::SelectCategory(rest.to_string())),
        "categories" => Ok(ShellCommand::Categories),
        "next" => one(Intent::NextPage),
        "prev" | "previous" => one(Intent::PreviousPage),
        "show" => one(Intent::SelectProduct(parse_id(verb, rest)?)),
        "back" => one(Intent::Deselect),
        "add" => one(Intent::AddToCart(parse_id(verb, rest)?)),
        "remove" => one(Intent::RemoveFromCart(parse_id(verb, rest)?)),
        "cart" => one(Intent::ShowCart),
        "list" => one(Intent::ShowCatalog),
        "reload" => one(Intent::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "" => Ok(ShellCommand::Intents(Vec::new())),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_id(verb: &str, rest: &str) -> Result<ProductId, String> {
    rest.parse::<ProductId>()
        .map_err(|_| format!("usage: {verb} ID (got '{rest}')"))
}

/// Reads commands from stdin until `quit` or end of input.
pub(crate) async fn run(mut runtime: Runtime) -> anyhow::Result<()> {
    let effects = runtime.session.start();
    runtime.run_effects(effects).await;
    println!("{}", render::CurrentScreen(&runtime.session));
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => println!("{HELP}"),
            Ok(ShellCommand::Categories) => {
                let categories = runtime.session.categories();
                print!(
                    "{}",
                    render::Categories {
                        categories: &categories,
                        selected: &runtime.session.filter().category,
                    }
                );
            }
            Ok(ShellCommand::Intents(intents)) => {
                if intents.is_empty() {
                    continue;
                }
                let mut notices = Vec::new();
                for intent in intents {
                    let effects = runtime.session.dispatch(intent);
                    notices.extend(runtime.run_effects(effects).await);
                }
                for notice in notices {
                    println!("** {notice}");
                }
                println!("{}", render::CurrentScreen(&runtime.session));
            }
            Err(message) => println!("{message}"),
        }
    }
    Ok(())
}
