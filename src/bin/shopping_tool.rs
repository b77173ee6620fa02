use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shopping::{IdGenerator, Seed, ShoppingList, sort_items, sort_shopping_lists};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shopping-tool")]
#[command(about = "Developer tooling for the shopping list app")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the seed collection as session records (JSON)
    Seed {
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Print every seeded list in display order
    Show {
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Seed { seed } => print_records(seed.as_deref()),
        Command::Show { seed } => print_lists(seed.as_deref()),
    }
}

fn build_lists(path: Option<&Path>) -> Result<Vec<ShoppingList>> {
    let seed = match path {
        Some(path) => Seed::from_path(path)
            .with_context(|| format!("failed to load seed file {}", path.display()))?,
        None => Seed::builtin(),
    };
    seed.build(&IdGenerator::new())
        .context("seed data does not form valid shopping lists")
}

fn print_records(path: Option<&Path>) -> Result<()> {
    let lists = build_lists(path)?;
    let records = shopping::session::dehydrate(&lists);
    let json = serde_json::to_string_pretty(&records).context("failed to encode records")?;
    println!("{json}");
    Ok(())
}

fn print_lists(path: Option<&Path>) -> Result<()> {
    let lists = build_lists(path)?;
    for list in sort_shopping_lists(&lists) {
        let mut ordered = ShoppingList::restore(list.id(), list.title());
        for item in sort_items(list) {
            ordered
                .add(item.clone())
                .context("sorted items must keep unique ids")?;
        }
        println!("{ordered}\n");
    }
    Ok(())
}
