//! content-admin - terminal front end for the content dashboard

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use content_admin::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "content-admin", version, about = "Manage users, episodes, seasons, stories and force updates")]
struct Cli {
    /// YAML configuration file
    #[arg(long, env = "CONTENT_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the configuration)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filtered and sorted list
    List {
        entity: EntityKind,
        #[arg(long, default_value = "")]
        search: String,
        /// Sort key, e.g. `storyNumber-desc`
        #[arg(long)]
        sort: Option<String>,
    },
    /// Print the sort keys an entity offers
    SortKeys { entity: EntityKind },
    /// Create a record from a JSON form
    Create {
        entity: EntityKind,
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Replace a record from a JSON form
    Update {
        entity: EntityKind,
        id: String,
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a record
    Delete { entity: EntityKind, id: String },
    /// Store a session token
    Login {
        #[arg(long, env = "CONTENT_ADMIN_TOKEN")]
        token: String,
    },
    /// Forget the stored session token
    Logout,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EntityKind {
    Users,
    Episodes,
    Seasons,
    SingleStories,
    ForceUpdates,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli.command, &config).await {
        match e.downcast_ref::<AdminError>() {
            Some(admin) => eprintln!("{}", admin.operator_message()),
            None => eprintln!("{:#}", e),
        }
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AdminConfig> {
    let config = match &cli.config {
        Some(path) => AdminConfig::from_yaml_file(path)?,
        None => AdminConfig::default(),
    };
    let mut config = config.apply_env()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    Ok(config)
}

async fn run(command: Command, config: &AdminConfig) -> anyhow::Result<()> {
    let session = FileSession::new(&config.token_file);

    match &command {
        Command::Login { token } => {
            anyhow::ensure!(!token.trim().is_empty(), "token must not be empty");
            session
                .store(token)
                .await
                .with_context(|| format!("failed to write {}", session.path().display()))?;
            println!("Logged in");
            return Ok(());
        }
        Command::Logout => {
            session.clear().await;
            println!("Logged out");
            return Ok(());
        }
        Command::SortKeys { entity } => {
            match *entity {
                EntityKind::Users => print_sort_keys::<User>(),
                EntityKind::Episodes => print_sort_keys::<Episode>(),
                EntityKind::Seasons => print_sort_keys::<Season>(),
                EntityKind::SingleStories => print_sort_keys::<SingleStory>(),
                EntityKind::ForceUpdates => print_sort_keys::<ForceUpdate>(),
            }
            return Ok(());
        }
        _ => {}
    }

    let client = ApiClient::new(config, Arc::new(session))?;

    match command {
        Command::List { entity, search, sort } => {
            let sort = sort.as_deref();
            match entity {
                EntityKind::Users => list::<User>(client, &search, sort).await,
                EntityKind::Episodes => list::<Episode>(client, &search, sort).await,
                EntityKind::Seasons => list::<Season>(client, &search, sort).await,
                EntityKind::SingleStories => list::<SingleStory>(client, &search, sort).await,
                EntityKind::ForceUpdates => list::<ForceUpdate>(client, &search, sort).await,
            }
        }
        Command::Create { entity, data, image } => {
            save(entity, client, None, &data, image.as_deref()).await
        }
        Command::Update { entity, id, data, image } => {
            save(entity, client, Some(&id), &data, image.as_deref()).await
        }
        Command::Delete { entity, id } => match entity {
            EntityKind::Users => delete::<User>(client, &id).await,
            EntityKind::Episodes => delete::<Episode>(client, &id).await,
            EntityKind::Seasons => delete::<Season>(client, &id).await,
            EntityKind::SingleStories => delete::<SingleStory>(client, &id).await,
            EntityKind::ForceUpdates => delete::<ForceUpdate>(client, &id).await,
        },
        Command::Login { .. } | Command::Logout | Command::SortKeys { .. } => Ok(()),
    }
}

async fn save(
    entity: EntityKind,
    client: ApiClient,
    id: Option<&str>,
    data: &Path,
    image: Option<&Path>,
) -> anyhow::Result<()> {
    match entity {
        EntityKind::Users => bail!("users are read-only"),
        EntityKind::Episodes => submit::<Episode>(client, id, data, image).await,
        EntityKind::Seasons => submit::<Season>(client, id, data, image).await,
        EntityKind::SingleStories => submit::<SingleStory>(client, id, data, image).await,
        EntityKind::ForceUpdates => submit::<ForceUpdate>(client, id, data, image).await,
    }
}

fn print_sort_keys<T: Record>() {
    for key in T::SortKey::all() {
        let marker = if *key == T::default_sort() { " (default)" } else { "" };
        println!("{:<24} {}{}", key.key(), key.label(), marker);
    }
}

async fn list<T: Record>(client: ApiClient, search: &str, sort: Option<&str>) -> anyhow::Result<()> {
    let mut page = EntityPage::<T>::new(client)?;
    if let Some(sort) = sort {
        page.set_sort_str(sort)?;
    }
    page.set_search(search);
    page.load().await?;
    print_table(page.view());
    Ok(())
}

async fn submit<T: Editable>(
    client: ApiClient,
    id: Option<&str>,
    data: &Path,
    image: Option<&Path>,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(data)
        .await
        .with_context(|| format!("failed to read {}", data.display()))?;
    let mut form: T::Form = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid {} form", data.display(), T::entity_name()))?;

    if let Some(path) = image {
        let upload = Upload::from_path(path).await?;
        if !form.attach_image(upload) {
            bail!("{} forms do not take an image", T::entity_name());
        }
    }

    let mut page = EntityPage::<T>::new(client)?;
    page.submit(id, &form).await?;
    println!("Saved {}", T::entity_name());
    print_table(page.view());
    Ok(())
}

async fn delete<T: Record>(client: ApiClient, id: &str) -> anyhow::Result<()> {
    let mut page = EntityPage::<T>::new(client)?;
    page.delete(id).await?;
    println!("Deleted {} {}", T::entity_name(), id);
    Ok(())
}

fn print_table<T: Record>(records: &[T]) {
    let header: Vec<&str> = std::iter::once("_id")
        .chain(T::fields().iter().map(|f| f.name))
        .collect();
    println!("{}", header.join("\t"));

    for record in records {
        let row: Vec<String> = std::iter::once(record.id().to_string())
            .chain(T::fields().iter().map(|f| (f.get)(record).display()))
            .collect();
        println!("{}", row.join("\t"));
    }
    println!("({} {})", records.len(), T::plural_name());
}
