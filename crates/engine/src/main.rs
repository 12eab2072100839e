//! Plotlyst Engine - workspace maintenance entry point.
//!
//! ```text
//! plotlyst-engine                 list novels in the workspace
//! plotlyst-engine create <title>  create a novel with the default setup
//! plotlyst-engine open <id>       load a novel (migrating its record) and summarize it
//! ```

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plotlyst_domain::NovelId;
use plotlyst_engine::infrastructure::config::AppConfig;
use plotlyst_engine::App;

fn main() -> anyhow::Result<()> {
    // Load environment from repo root, then read configuration from it.
    load_dotenv_from_repo_root();
    let config = AppConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = App::open(&config).context("Failed to open workspace")?;
    let management = &app.use_cases.management;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => {
            let novels = management.novel.list_novels()?;
            tracing::info!(count = novels.len(), "Listing novels");
            for novel in novels {
                println!("{}  {}", novel.id, novel.title);
            }
        }
        Some("create") => {
            let title = args[1..].join(" ");
            let novel = management.novel.create_novel(&title)?;
            println!("{}  {}", novel.id(), novel.title());
        }
        Some("open") => {
            let Some(id) = args.get(1) else {
                bail!("Usage: plotlyst-engine open <id>");
            };
            let id: NovelId = id.parse()?;
            let mut novel = management.novel.open_novel(id)?;
            app.use_cases.manuscript.load_manuscript(&mut novel)?;
            println!("{}", novel.title());
            println!("  characters: {}", novel.characters().len());
            println!("  scenes:     {}", novel.scenes().len());
            println!("  chapters:   {}", novel.chapters().len());
            println!("  documents:  {}", novel.documents().len());
        }
        Some(other) => bail!("Unknown command: {other}"),
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
