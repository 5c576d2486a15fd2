use std::{
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pc_builder::{
    Category, ProductDraft, ProductId,
    compat::Level,
    config::{AppConfig, load_config_path},
    export::{format_price, printable_html, summary_text},
    import::{UnknownCategoryPolicy, import_file},
    parts::PartSpec,
    store::{ImportMode, SqliteKv, Workspace},
};
use shared_utils::{get_env_bool, get_env_var_opt};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version, about = "PC parts catalog and build checker")]
struct Cli {
    /// Config file (TOML). Falls back to $PC_BUILDER_CONFIG.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// SQLite file holding catalog and build. Overrides config and $PC_BUILDER_DB.
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Manage catalog products
    Catalog(CatalogCmd),
    /// Pick parts and check compatibility
    Build(BuildCmd),
    /// Render the current build
    Export(ExportCmd),
}

#[derive(Args)]
struct CatalogCmd {
    #[command(subcommand)]
    sub: CatalogSub,
}

#[derive(Args)]
struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    stock: Option<u32>,
    /// Attributes as a JSON object, e.g. '{"socket":"AM5","tdp":65}'
    #[arg(long)]
    attributes: Option<String>,
}

#[derive(Subcommand)]
enum CatalogSub {
    /// List products
    List {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Show one product with the fields the checker reads
    Show { id: String },
    /// Add a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit a product; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Remove a product
    Remove { id: String },
    /// Import products from .xlsx/.xls/.ods/.csv/.json
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Fail on unknown categories instead of defaulting to CPU
        #[arg(long)]
        strict: bool,
        /// Replace the catalog instead of appending
        #[arg(long)]
        replace: bool,
        /// Parse and report without saving
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args)]
struct BuildCmd {
    #[command(subcommand)]
    sub: BuildSub,
}

#[derive(Subcommand)]
enum BuildSub {
    /// Put a catalog product into its category slot
    Pick { id: String },
    /// Empty one category slot
    Clear { category: Category },
    /// Empty every slot
    Reset,
    /// Show the chosen parts and compatibility notes
    Show,
    /// Exit non-zero when the build has a compatibility error
    Check,
}

#[derive(Args)]
struct ExportCmd {
    #[command(subcommand)]
    sub: ExportSub,
}

#[derive(Subcommand)]
enum ExportSub {
    /// Plain-text summary
    Text {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Printable HTML page
    Html {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if get_env_bool("PC_BUILDER_LOG_JSON", false)? {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => get_env_var_opt("PC_BUILDER_CONFIG")?.map(PathBuf::from),
    };
    let mut cfg = match path {
        Some(p) => load_config_path(&p)?,
        None => AppConfig::default(),
    };
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    } else if let Some(db) = get_env_var_opt("PC_BUILDER_DB")? {
        cfg.database = PathBuf::from(db);
    }
    Ok(cfg)
}

fn draft_from(fields: ProductFields, base: Option<ProductDraft>) -> Result<ProductDraft> {
    let draft = match base {
        Some(mut d) => {
            if let Some(name) = fields.name {
                d.name = name;
            }
            if let Some(c) = fields.category {
                d.category = c;
            }
            if let Some(p) = fields.price {
                d.price = p;
            }
            if let Some(s) = fields.stock {
                d.stock = s;
            }
            if let Some(a) = fields.attributes {
                d.attributes_json = a;
            }
            d
        }
        None => ProductDraft {
            name: fields.name.context("--name is required")?,
            category: fields.category.context("--category is required")?,
            price: fields.price.unwrap_or(0.0),
            stock: fields.stock.unwrap_or(0),
            attributes_json: fields.attributes.unwrap_or_default(),
        },
    };
    Ok(draft)
}

fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), "export written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes()).context("write to stdout")?;
            stdout.flush().context("flush stdout")?;
        }
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    init_tracing()?;
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    let db_url = cfg.database.to_string_lossy().to_string();
    let kv = SqliteKv::open(&db_url).with_context(|| format!("open store {db_url}"))?;
    let mut ws = Workspace::open(kv);

    match cli.cmd {
        Cmd::Catalog(CatalogCmd { sub }) => match sub {
            CatalogSub::List { category } => {
                for p in ws.catalog().list() {
                    if category.is_some_and(|c| c != p.category) {
                        continue;
                    }
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        p.id,
                        p.category,
                        p.name,
                        format_price(p.price, &cfg.currency),
                        p.stock,
                        serde_json::to_string(&p.attributes)?
                    );
                }
            }
            CatalogSub::Show { id } => {
                let id = ProductId::from(id);
                let p = ws
                    .catalog()
                    .get(&id)
                    .with_context(|| format!("no product with id {id}"))?;
                println!("{}", serde_json::to_string_pretty(p)?);
                println!("{:#?}", PartSpec::of(p));
            }
            CatalogSub::Add { fields } => {
                let id = ws.add_product(draft_from(fields, None)?)?;
                println!("{id}");
            }
            CatalogSub::Edit { id, fields } => {
                let id = ProductId::from(id);
                let base = ws
                    .catalog()
                    .get(&id)
                    .map(ProductDraft::from_product)
                    .with_context(|| format!("no product with id {id}"))?;
                ws.update_product(&id, draft_from(fields, Some(base))?)?;
            }
            CatalogSub::Remove { id } => {
                let removed = ws.remove_product(&ProductId::from(id))?;
                println!("removed {} ({})", removed.name, removed.id);
            }
            CatalogSub::Import {
                file,
                strict,
                replace,
                dry_run,
            } => {
                let policy = if strict {
                    UnknownCategoryPolicy::Error
                } else {
                    cfg.import_policy()
                };
                let (products, report) = import_file(&file, policy)
                    .with_context(|| format!("import {}", file.display()))?;
                eprintln!(
                    "rows: {}, blank: {}, products: {}, category defaulted: {}, bad attribute JSON: {}",
                    report.rows_seen,
                    report.rows_skipped_blank,
                    report.products,
                    report.categories_defaulted,
                    report.attribute_json_failures
                );
                if !dry_run {
                    let mode = if replace {
                        ImportMode::Replace
                    } else {
                        ImportMode::Append
                    };
                    ws.import_products(products, mode)?;
                }
            }
        },
        Cmd::Build(BuildCmd { sub }) => match sub {
            BuildSub::Pick { id } => {
                if let Some(old) = ws.pick(&ProductId::from(id))? {
                    eprintln!("replaced {}", old.name);
                }
            }
            BuildSub::Clear { category } => {
                ws.clear(category);
            }
            BuildSub::Reset => ws.reset_build(),
            BuildSub::Show => {
                let report = ws.report();
                print!("{}", summary_text(ws.build(), &report, &cfg.currency));
            }
            BuildSub::Check => {
                let report = ws.report();
                for n in &report.notes {
                    println!("[{}] {}", n.level, n.message);
                }
                match report.overall() {
                    None => println!("nothing to check yet"),
                    Some(Level::Error) => return Ok(ExitCode::FAILURE),
                    Some(_) => {}
                }
            }
        },
        Cmd::Export(ExportCmd { sub }) => {
            let report = ws.report();
            match sub {
                ExportSub::Text { out } => {
                    emit(&summary_text(ws.build(), &report, &cfg.currency), out.as_deref())?
                }
                ExportSub::Html { out } => emit(
                    &printable_html(ws.build(), &report, &cfg.currency, chrono::Utc::now()),
                    out.as_deref(),
                )?,
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
