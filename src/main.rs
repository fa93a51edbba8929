//! Command line access to back-office lists: fetch a collection, optionally
//! flip one record's status, and print the requested page as JSON.

use std::env;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;
use validator::Validate;

use fm_backoffice::client::HttpResourceClient;
use fm_backoffice::client::query::RemoteQuery;
use fm_backoffice::domain::generic::GenericEntity;
use fm_backoffice::domain::resource::{ResourceDescriptor, UpdateMethod};
use fm_backoffice::domain::types::EntityId;
use fm_backoffice::dto::list::ListPageData;
use fm_backoffice::dto::notification::Notification;
use fm_backoffice::list::{ListDataController, SortDirection};
use fm_backoffice::models::config::ClientConfig;
use fm_backoffice::services::list::refresh_list;
use fm_backoffice::services::toggle::{toggle_exclusive, toggle_field, toggle_status};
use fm_backoffice::services::{ServiceError, ServiceResult, notification_for};

#[derive(Debug, Parser)]
#[command(name = "fm-backoffice")]
#[command(about = "Fetch a back-office list, optionally flip one record, print a page as JSON")]
#[command(
    after_help = "Environment:\n  APP_ENV           Config profile (default: local)\n  APP_BASE_URL      Backend base URL\n  APP_ACCESS_TOKEN  Bearer token"
)]
struct CliArgs {
    /// Backend collection, e.g. `banners` or `referral_configs`.
    collection: String,
    /// Key update bodies are wrapped in (defaults to the singular collection).
    #[arg(long)]
    member: Option<String>,
    /// Send updates with PATCH instead of PUT.
    #[arg(long, default_value_t = false)]
    patch: bool,
    /// Send update fields at the top level of the body.
    #[arg(long, default_value_t = false)]
    unwrapped: bool,
    /// Extra query parameter, repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    params: Vec<(String, String)>,
    #[arg(long)]
    search: Option<String>,
    /// Fields the search term is matched against.
    #[arg(long, value_delimiter = ',', default_value = "name,title")]
    fields: Vec<String>,
    #[arg(long)]
    sort: Option<String>,
    #[arg(long, default_value_t = false)]
    desc: bool,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Id of the record whose switch is flipped before rendering.
    #[arg(long, value_name = "ID")]
    toggle: Option<i64>,
    /// Switch to flip instead of `active`.
    #[arg(long, value_name = "NAME", requires = "toggle")]
    field: Option<String>,
    /// Switch every other record off before switching this one on.
    #[arg(long, default_value_t = false, requires = "toggle", conflicts_with = "field")]
    exclusive: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

impl CliArgs {
    fn descriptor(&self) -> Result<ResourceDescriptor, ServiceError> {
        let mut descriptor = ResourceDescriptor::new(&self.collection, self.member.as_deref())?;
        if self.patch {
            descriptor = descriptor.with_method(UpdateMethod::Patch);
        }
        if self.unwrapped {
            descriptor = descriptor.unwrapped();
        }
        Ok(descriptor)
    }
}

async fn toggle_record(
    client: &HttpResourceClient,
    descriptor: &ResourceDescriptor,
    records: &mut [GenericEntity],
    id: EntityId,
    args: &CliArgs,
) -> ServiceResult<Notification> {
    if args.exclusive {
        return toggle_exclusive(client, descriptor, records, id).await;
    }
    match &args.field {
        Some(name) => {
            let field = records
                .iter()
                .find(|record| record.id == id)
                .map(|record| record.switch(name))
                .ok_or(ServiceError::NotFound)?;
            toggle_field(client, descriptor, records, id, &field).await
        }
        None => toggle_status(client, descriptor, records, id).await,
    }
}

fn load_config() -> Result<ClientConfig, String> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()
        .map_err(|e| format!("Error loading settings: {e}"))?;

    let client_config = settings
        .try_deserialize::<ClientConfig>()
        .map_err(|e| format!("Error loading client config: {e}"))?;

    client_config
        .validate()
        .map_err(|e| format!("Invalid client config: {e}"))?;

    Ok(client_config)
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = CliArgs::parse();

    let client_config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let client = match HttpResourceClient::new(&client_config) {
        Ok(client) => client,
        Err(err) => {
            log::error!("Failed to build client: {err}");
            std::process::exit(1);
        }
    };

    let descriptor = match args.descriptor() {
        Ok(descriptor) => descriptor,
        Err(err) => {
            log::error!("Invalid resource: {err}");
            std::process::exit(2);
        }
    };

    let remote = args
        .params
        .iter()
        .fold(RemoteQuery::new(), |query, (key, value)| {
            query.param(key.as_str(), value)
        });

    let mut controller: ListDataController<GenericEntity> =
        ListDataController::new(args.fields.iter().cloned(), client_config.page_size);

    if let Err(err) = refresh_list(&client, &descriptor, &remote, &mut controller).await {
        log::error!("{}", notification_for(&err).message);
        std::process::exit(1);
    }

    if let Some(raw_id) = args.toggle {
        let outcome = match EntityId::new(raw_id) {
            Ok(id) => {
                toggle_record(&client, &descriptor, controller.records_mut(), id, &args).await
            }
            Err(err) => Err(err.into()),
        };
        match outcome {
            Ok(notification) => log::info!("{}", notification.message),
            Err(err) => log::error!("{}", notification_for(&err).message),
        }
    }

    if let Some(term) = &args.search {
        controller.set_search_term(term.as_str());
    }
    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        controller.set_sort(key.as_str(), direction);
    }
    controller.set_page(args.page);

    let page = ListPageData::new(controller.view(), args.search.clone());
    if let Some(message) = page.empty_message {
        log::info!("{message}");
    }

    match serde_json::to_string_pretty(&page) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to render page: {err}");
            std::process::exit(1);
        }
    }
}
