use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use std::io::{self, BufRead, Write};

use recipe_finder::catalog::filter_names;
use recipe_finder::view::{render_list, render_modal, NavKey};
use recipe_finder::{App, FinderConfig, FinderError, RecipeFinder, SearchForm};

/// Find recipes by the ingredients you have
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API root (overrides RECIPE_FINDER__BASE_URL and recipe-finder.toml)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Do not read or write stored results
    #[arg(long, global = true)]
    no_store: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the ingredients that can be searched for
    Ingredients {
        /// Only show names containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Search for recipes using all of the given ingredients
    Search {
        /// Ingredient to include (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
        /// Skip recipes with more ingredients than this
        #[arg(long)]
        max: Option<usize>,
    },
    /// Step through the results of the last search
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    let mut config = FinderConfig::load()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.no_store {
        config.storage.enabled = false;
    }
    debug!("{:#?}", config);

    let mut app = RecipeFinder::builder()
        .config(&config)
        .build_restored()
        .await?;

    match args.command {
        Commands::Ingredients { filter } => list_ingredients(&mut app, filter.as_deref()).await,
        Commands::Search { ingredients, max } => {
            if let Some(max) = max {
                let limit = config.ui.max_ingredient_choices;
                if max > limit {
                    return Err(FinderError::Validation(format!(
                        "--max must be between 1 and {limit}"
                    ))
                    .into());
                }
            }
            search(&mut app, ingredients, max).await
        }
        Commands::Browse => browse(&mut app).await,
    }
}

async fn list_ingredients(
    app: &mut App,
    filter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let names = match app.load_catalog().await {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error loading ingredients");
            return Err(e.into());
        }
    };

    for name in filter_names(&names, filter.unwrap_or_default()) {
        println!("{}", name);
    }
    Ok(())
}

async fn search(
    app: &mut App,
    ingredients: Vec<String>,
    max: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    *app.form_mut() = SearchForm::with_selection(ingredients, None);
    app.form_mut().set_max_ingredients(max)?;

    match app.search().await {
        Ok(recipes) => {
            print!("{}", render_list(recipes));
            Ok(())
        }
        Err(e) if e.is_validation() => Err(e.into()),
        Err(e) => {
            if let Some(alert) = &app.state().alert {
                eprintln!("{}", alert);
            }
            Err(e.into())
        }
    }
}

async fn browse(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    if app.state().results.is_empty() {
        println!("No stored results. Run `recipe-finder search` first.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}", render_list(&app.state().results));

    loop {
        prompt(&mut stdout, app)?;
        let Some(line) = stdin.lock().lines().next().transpose()? else {
            return Ok(());
        };
        let line = line.trim();

        if let Ok(number) = line.parse::<usize>() {
            app.open_detail(number.saturating_sub(1));
        } else if let Some(key) = NavKey::parse(line) {
            if key == NavKey::Escape && !app.state().modal.is_open() {
                return Ok(());
            }
            app.handle_key(key);
        } else if !line.is_empty() {
            println!("Unknown command: {}", line);
            continue;
        }

        let state = app.state();
        match render_modal(&state.results, &state.modal) {
            Some(detail) => print!("\n{}", detail),
            None => print!("{}", render_list(&state.results)),
        }
    }
}

fn prompt(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    if app.state().modal.is_open() {
        write!(stdout, "> ")?;
    } else {
        write!(stdout, "Recipe number (q to quit)> ")?;
    }
    stdout.flush()
}
