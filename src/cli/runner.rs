//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, CursorAction, OutputFormat};
use crate::config::HostConfig;
use crate::cursor::{self, CompositeCursor};
use crate::error::{Error, Result};
use crate::fetch::{FetchRequest, Page, PageFetcher};
use crate::http::ReqwestTransport;
use crate::registry::{EntityDescriptor, EntityRegistry};
use crate::types::{AttributeConfig, OptionStringExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Options of the `page` command
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    pub entity: String,
    pub page_size: Option<u32>,
    pub filter: Option<String>,
    pub cursor: Option<String>,
    pub unique_id: Option<String>,
    pub attributes: Vec<String>,
    pub all: bool,
    pub max_pages: Option<usize>,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
    registry: Arc<EntityRegistry>,
}

impl Runner {
    /// Create a new runner over the built-in entities
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            registry: Arc::new(EntityRegistry::builtin()),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Entities => self.entities(),
            Commands::Page {
                entity,
                page_size,
                filter,
                cursor,
                unique_id,
                attributes,
                all,
                max_pages,
            } => {
                let options = PageOptions {
                    entity: entity.clone(),
                    page_size: *page_size,
                    filter: filter.clone(),
                    cursor: cursor.clone(),
                    unique_id: unique_id.clone(),
                    attributes: attributes.clone(),
                    all: *all,
                    max_pages: *max_pages,
                };
                self.page(&options).await
            }
            Commands::Cursor { action } => self.cursor(action),
        }
    }

    /// Load host configuration, applying `--token`
    fn load_config(&self) -> Result<HostConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -C flag)"))?;
        Ok(HostConfig::from_file(path)?.with_token(self.cli.token.clone()))
    }

    /// List registered entities
    fn entities(&self) -> Result<()> {
        let entities: Vec<Value> = self
            .registry
            .entity_ids()
            .into_iter()
            .map(|(id, _)| self.registry.resolve(id).map(describe_entity))
            .collect::<Result<_>>()?;

        self.output_message(&json!({
            "type": "ENTITIES",
            "entities": entities
        }));
        Ok(())
    }

    /// Fetch one page, or every page with `--all`
    async fn page(&self, options: &PageOptions) -> Result<()> {
        let config = self.load_config()?;
        let descriptor = self.registry.resolve(&options.entity)?;
        let mut request = build_request(&config, descriptor, options)?;

        let fetcher = PageFetcher::new(Arc::clone(&self.registry), ReqwestTransport::new()?);
        let mut pages = 0usize;
        let mut records = 0usize;

        loop {
            let page = fetcher.get_page_until(&request, ctrl_c()).await?;
            pages += 1;
            records += page.records.len();
            self.output_page(&page);

            let page = page.error_for_status()?;
            let Some(next) = page.next_cursor else {
                break;
            };
            if !options.all || options.max_pages.is_some_and(|max| pages >= max) {
                break;
            }
            request = request.next(next);
        }

        info!(entity = %options.entity, pages, records, "Paging finished");
        Ok(())
    }

    /// Decode or encode a cursor
    fn cursor(&self, action: &CursorAction) -> Result<()> {
        match action {
            CursorAction::Decode { cursor } => {
                let decoded = cursor::decode("cli", cursor)?;
                self.output_message(&serde_json::to_value(decoded)?);
            }
            CursorAction::Encode { json } => {
                let parsed: CompositeCursor = serde_json::from_str(json)?;
                self.output_message(&json!({ "cursor": cursor::encode(&parsed)? }));
            }
        }
        Ok(())
    }

    fn output_page(&self, page: &Page) {
        match serde_json::to_value(page) {
            Ok(value) => self.output_message(&json!({ "type": "PAGE", "page": value })),
            Err(e) => eprintln!("Failed to serialize page: {e}"),
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn describe_entity(descriptor: &EntityDescriptor) -> Value {
    json!({
        "id": descriptor.id,
        "protocol": descriptor.protocol(),
        "dialect": descriptor.cursor_dialect().as_str(),
        "uniqueId": descriptor.unique_id_attribute,
        "sort": descriptor.sort_key(),
    })
}

/// First request of a `page` run
pub(crate) fn build_request(
    config: &HostConfig,
    descriptor: &EntityDescriptor,
    options: &PageOptions,
) -> Result<FetchRequest> {
    let unique_id = options
        .unique_id
        .clone()
        .unwrap_or_else(|| descriptor.unique_id_attribute.clone());

    let extra = options
        .attributes
        .iter()
        .filter(|a| **a != unique_id)
        .map(AttributeConfig::new);
    let attributes: Vec<_> = std::iter::once(AttributeConfig::unique(unique_id.as_str()))
        .chain(extra)
        .collect();

    let mut request = config
        .request(descriptor.id.as_str())?
        .with_attributes(attributes);
    if let Some(size) = options.page_size {
        request = request.with_page_size(size);
    }
    if let Some(filter) = options.filter.clone().none_if_empty() {
        request = request.with_filter(filter);
    }
    if let Some(cursor) = &options.cursor {
        request = request.with_cursor(cursor.as_str());
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> HostConfig {
        HostConfig::new("https://api.example.com").with_token(Some("t".to_string()))
    }

    #[test]
    fn test_build_request_defaults_unique_id() {
        let registry = EntityRegistry::builtin();
        let descriptor = registry.resolve("endpoint_protection_device").unwrap();
        let options = PageOptions {
            entity: "endpoint_protection_device".to_string(),
            attributes: vec!["hostname".to_string(), "device_id".to_string()],
            ..Default::default()
        };

        let request = build_request(&config(), descriptor, &options).unwrap();

        assert_eq!(
            request.attributes,
            vec![
                AttributeConfig::unique("device_id"),
                AttributeConfig::new("hostname")
            ]
        );
        assert!(crate::fetch::validate_request(&registry, &request).is_ok());
    }

    #[test]
    fn test_build_request_overrides() {
        let registry = EntityRegistry::builtin();
        let descriptor = registry.resolve("user").unwrap();
        let options = PageOptions {
            entity: "user".to_string(),
            page_size: Some(7),
            filter: Some("riskScoreSeverities: [HIGH]".to_string()),
            cursor: Some("eyJjdXJzb3IiOiJjMSJ9".to_string()),
            unique_id: Some("userId".to_string()),
            ..Default::default()
        };

        let request = build_request(&config(), descriptor, &options).unwrap();

        assert_eq!(request.page_size, 7);
        assert_eq!(request.filter.as_deref(), Some("riskScoreSeverities: [HIGH]"));
        assert_eq!(request.cursor.as_deref(), Some("eyJjdXJzb3IiOiJjMSJ9"));
        assert!(matches!(
            crate::fetch::validate_request(&registry, &request),
            Err(Error::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_describe_entity() {
        let registry = EntityRegistry::builtin();
        let value = describe_entity(registry.resolve("endpoint_protection_alert").unwrap());

        assert_eq!(
            value,
            json!({
                "id": "endpoint_protection_alert",
                "protocol": "rest",
                "dialect": "after_token",
                "uniqueId": "composite_id",
                "sort": "created_timestamp|desc"
            })
        );
    }
}
