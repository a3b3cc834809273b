use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use log::log_enabled;

use kitchen_dash::constants::{API_URL, DEFAULT_API_URL};
use kitchen_dash::data_backend::http_backend::HttpBackend;
use kitchen_dash::data_backend::{build_date_string, KitchenBackend};
use kitchen_dash::data_types::demand_data_types::Season;
use kitchen_dash::data_types::Page;
use kitchen_dash::pages::ai_dish::{generated_dishes_to_msg, DishGenerator};
use kitchen_dash::pages::demand_page::{demand_to_msg, DemandPage};
use kitchen_dash::pages::dish_list::{dish_card_to_msg, dish_collection_to_msg, DishList};
use kitchen_dash::pages::dish_page::{dish_form_to_msg, DishForm, PhotoInputMode};
use kitchen_dash::pages::home::home_to_msg;
use kitchen_dash::pages::navbar::{navbar_to_msg, select_page};
use kitchen_dash::shared_main::{logger_init, parse_ingredient_arg, read_local_file};

/// Terminal client for the kitchen analytics backend.
/// {n}Demand analysis, dish management and AI dish suggestions.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base address of the kitchen backend
    #[arg(long, env = "KITCHEN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Enable verbose logging (mostly performance metrics){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dashboard overview
    Home,
    /// Upload a consumption spreadsheet (.xlsx, .xls) and show the demand analysis
    Demand {
        file: PathBuf,
        #[arg(long, value_enum)]
        season: Option<Season>,
    },
    /// List the dishes stored on the backend
    Dishes {
        /// Highlight the dish with this id
        #[arg(long)]
        select: Option<String>,
    },
    /// Create a dish, ingredients are detected from its photo
    CreateDish {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long, conflicts_with = "photo_file")]
        photo_url: Option<String>,
        #[arg(long)]
        photo_file: Option<PathBuf>,
        /// Added after detection, may be repeated
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,
    },
    /// Let the AI suggest new dishes
    Generate {
        #[command(subcommand)]
        mode: GenerateMode,
    },
}

#[derive(Subcommand, Debug)]
enum GenerateMode {
    /// Use whatever the inventory has in surplus
    Inventory,
    /// Use your own ingredient list
    Custom {
        #[arg(short, long = "ingredient", value_name = "NAME=QUANTITY")]
        ingredients: Vec<String>,
        /// Preferences, e.g. vegetarian or spicy
        #[arg(short, long, default_value = "")]
        message: String,
    },
}

impl Command {
    fn route(&self) -> &'static str {
        match self {
            Command::Home => Page::Home.route(),
            Command::Demand { .. } => Page::Demand.route(),
            Command::Dishes { .. } | Command::CreateDish { .. } => Page::Menu.route(),
            Command::Generate { .. } => Page::AiDishes.route(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging for performance metrics");
    }

    let api_url = API_URL.get_or_init(|| args.api_url);
    let backend = HttpBackend::new(api_url.as_str());
    log::debug!("Using backend at {}", backend.base_url());

    let mut active_page = Page::Home;
    select_page(args.command.route(), |page| active_page = page);
    println!("{}\n", navbar_to_msg(active_page));

    let error = match args.command {
        Command::Home => {
            println!("{}", home_to_msg());
            None
        }
        Command::Demand { file, season } => {
            let mut page = DemandPage::default();
            if page.choose_file(read_local_file(&file).await?).is_ok() {
                page.set_season(season);
                page.upload(&backend, build_date_string(chrono::Local::now()))
                    .await;
            }

            println!("{}", demand_to_msg(&page));
            page.error().map(str::to_string)
        }
        Command::Dishes { select } => {
            let mut list = DishList::default();
            list.fetch(&backend).await;
            if let Some(id) = select {
                list.select(&id);
            }

            println!("{}", dish_collection_to_msg(&list));
            None
        }
        Command::CreateDish {
            name,
            price,
            photo_url,
            photo_file,
            ingredients,
        } => {
            let mut form = DishForm::default();
            form.set_name(&name);
            form.set_price(&price);

            if let Some(path) = photo_file {
                form.set_photo_mode(PhotoInputMode::File);
                form.select_photo_file(read_local_file(&path).await?, &backend);
            } else if let Some(url) = photo_url {
                form.select_photo_url(&url, &backend);
            }
            form.settle_detection().await;

            for ingredient in &ingredients {
                form.set_ingredient_input(ingredient);
                form.add_ingredient();
            }
            println!("{}", dish_form_to_msg(&form));

            let mut submitted = None;
            match form.handle_add_dish(|new_dish| submitted = Some(new_dish)) {
                Err(e) => Some(e.to_string()),
                Ok(()) => match submitted {
                    Some(new_dish) => match backend.add_dish(new_dish).await {
                        Ok(saved) => {
                            println!("Dish saved:\n{}", dish_card_to_msg(&saved, false));
                            None
                        }
                        Err(e) => Some(e.to_string()),
                    },
                    None => None,
                },
            }
        }
        Command::Generate { mode } => {
            let mut generator = DishGenerator::default();
            match mode {
                GenerateMode::Inventory => generator.generate_from_inventory(&backend).await,
                GenerateMode::Custom {
                    ingredients,
                    message,
                } => {
                    generator.toggle_custom_ingredients();
                    for (i, arg) in ingredients.iter().enumerate() {
                        let (name, quantity) = parse_ingredient_arg(arg)?;
                        if i > 0 {
                            generator.add_ingredient();
                        }
                        generator.update_name(i, &name)?;
                        generator.update_quantity(i, &quantity)?;
                    }
                    generator.set_message(&message);
                    generator.generate_from_custom_ingredients(&backend).await;
                }
            }

            println!("{}", generated_dishes_to_msg(generator.dishes()));
            generator.error().map(str::to_string)
        }
    };

    if let Some(error) = error {
        log::error!("{}", error);
        exit(1);
    }

    Ok(())
}
