use std::io::Write as _;

use actions_frontend_rs::client::DEFAULT_API_URL;
use actions_frontend_rs::{
    ActionItems, Category, ConfirmationPrompt, HttpItemsClient, ItemId, LogFeedback,
    UpdateItemRequest, init_logging,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Manage action items from the terminal.
#[derive(Parser, Debug)]
#[command(name = "actions")]
struct Args {
    /// Items collection URL
    #[arg(long, env = "ACTIONS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

type Input = Lines<BufReader<Stdin>>;
type Items = ActionItems<HttpItemsClient, LogFeedback>;

const HELP: &str = "\
Commands:
  list                      show items
  refresh                   re-fetch items from the server
  add [category] <text>     add an item (remind, email, invite, prioritize)
  show <n>                  show details for item n
  done <n>                  mark item n complete or incomplete
  edit <n> <text>           change the text of item n
  tag <n> <category>        change the category of item n
  rm <n>                    delete item n
  quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let mut items = ActionItems::with_feedback(HttpItemsClient::new(args.api_url), LogFeedback);
    println!("Syncing...");
    let _ = items.load().await;
    print_items(&items);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = input.next_line().await? else {
            break;
        };
        let (command, rest) = split_word(line.trim());

        match command {
            "" => {}
            "list" | "ls" => print_items(&items),
            "refresh" => {
                if items.load().await.is_err() {
                    println!("Could not reach the server; showing the last known items");
                }
                print_items(&items);
            }
            "add" => {
                let (first, remainder) = split_word(rest);
                let (category, text) = match first.parse::<Category>() {
                    Ok(category) => (category, remainder),
                    Err(_) => (Category::default(), rest),
                };
                match items.create(text, category).await {
                    Ok(()) => print_items(&items),
                    Err(e) => println!("Not added: {e}"),
                }
            }
            "show" => match pick(&items, rest) {
                Some(id) => {
                    if let Some(item) = items.open_detail(&id) {
                        println!("{}", item.text);
                        println!("  Category: {}", item.category);
                        println!("  Created: {}", item.created_at.format("%Y-%m-%d %H:%M"));
                        println!(
                            "  Status: {}",
                            if item.completed { "Completed" } else { "Pending" }
                        );
                    }
                    items.close_detail();
                }
                None => println!("No item {rest}"),
            },
            "done" | "toggle" => {
                let Some(prompt) = pick(&items, rest).and_then(|id| items.request_toggle(&id))
                else {
                    println!("No item {rest}");
                    continue;
                };
                if confirm(&mut input, &prompt).await? {
                    if let Err(e) = items.confirm_toggle().await {
                        println!("Update failed ({e}); reloaded from server");
                    }
                    print_items(&items);
                } else {
                    items.cancel_toggle();
                }
            }
            "edit" | "tag" => {
                let (number, value) = split_word(rest);
                let Some(id) = pick(&items, number) else {
                    println!("No item {number}");
                    continue;
                };
                let updates = if command == "edit" {
                    UpdateItemRequest::text(value)
                } else {
                    match value.parse::<Category>() {
                        Ok(category) => UpdateItemRequest::default().with_category(category),
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    }
                };
                items.open_detail(&id);
                match items.edit(&id, updates).await {
                    Ok(()) => print_items(&items),
                    Err(e) => {
                        println!("Not saved: {e}");
                        items.close_detail();
                    }
                }
            }
            "rm" | "delete" => {
                let Some(prompt) = pick(&items, rest).and_then(|id| items.request_delete(&id))
                else {
                    println!("No item {rest}");
                    continue;
                };
                if confirm(&mut input, &prompt).await? {
                    if let Err(e) = items.confirm_delete().await {
                        println!("Delete failed ({e}); reloaded from server");
                    }
                    print_items(&items);
                } else {
                    items.cancel_delete();
                }
            }
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}`, try `help`"),
        }
    }

    Ok(())
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (s, ""),
    }
}

/// Items are numbered from 1 in display order.
fn pick(items: &Items, number: &str) -> Option<ItemId> {
    let index = number.trim().parse::<usize>().ok()?.checked_sub(1)?;
    items
        .sorted_items()
        .into_iter()
        .nth(index)
        .map(|item| item.id)
}

async fn confirm(input: &mut Input, prompt: &ConfirmationPrompt) -> anyhow::Result<bool> {
    println!("{}", prompt.title);
    println!("{}", prompt.description);
    print!("{}? [y/N] ", prompt.confirm_label);
    std::io::stdout().flush()?;
    let answer = input.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_items(items: &Items) {
    println!("Action Items ({} pending tasks)", items.pending_count());
    for (number, item) in items.sorted_items().iter().enumerate() {
        let check = if item.completed { "x" } else { " " };
        let flag = if item.category == Category::Prioritize {
            "!"
        } else {
            " "
        };
        println!(
            "{:>3}. [{check}]{flag}{}  ({})",
            number + 1,
            item.text,
            item.category
        );
    }
}
