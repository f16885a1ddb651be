/// MCP server exposing the internship catalog to the presentation layer.
///
/// Exposes five tools:
/// - `list_domains`: domain filter options, "All" first
/// - `search_internships`: filtered cards with highlight spans
/// - `get_internship`: one listing with sanitized detail sections
/// - `render_rich_text`: sanitize an arbitrary rich-text value
/// - `application_status`: deadline countdown and open/closed state
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{debug, info};

use crate::cache::CatalogCache;
use crate::config::Config;
use crate::error::AppError;
use crate::loader::Catalog;
use crate::model::{InternshipRecord, ALL_DOMAINS};
use crate::sanitize;
use crate::schedule;
use crate::search::{self, HighlightSpan, CARD_TAG_LIMIT};
use catalog_common::catalog_api::{
    ApplicationStatusResponse, CountdownInfo, DetailSection, DomainListResponse,
    GetInternshipParams, InternshipCard, InternshipDetailResponse, RenderRichTextParams,
    RenderRichTextResponse, SearchInternshipsParams, SearchInternshipsResponse, TextSpan,
};

#[derive(Clone)]
pub struct PuraConnectServer {
    catalog: Arc<Catalog>,
    domains: Arc<Vec<String>>,
    cache: Arc<CatalogCache>,
    config: Config,
    tool_router: ToolRouter<PuraConnectServer>,
}

impl PuraConnectServer {
    pub fn new(catalog: Arc<Catalog>, cache: Arc<CatalogCache>, config: Config) -> Self {
        let domains = Arc::new(search::list_domains(catalog.records()));
        Self {
            catalog,
            domains,
            cache,
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn search_response(
        &self,
        query: &str,
        domain: &str,
        limit: Option<usize>,
    ) -> SearchInternshipsResponse {
        let matches = search::search(self.catalog.records(), query, domain);
        let total = matches.len();
        let results = matches
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(index, record)| to_card(record, query, index))
            .collect();

        SearchInternshipsResponse {
            query: query.to_string(),
            domain: domain.to_string(),
            total,
            label: search::result_count_label(total),
            results,
        }
    }

    fn status_at(&self, now: chrono::NaiveDateTime) -> ApplicationStatusResponse {
        let deadline = self.config.deadline;
        let left = schedule::countdown(now, deadline);
        ApplicationStatusResponse {
            open: schedule::applications_open(now, deadline, self.config.applications_closed),
            deadline: deadline.format("%Y-%m-%dT%H:%M:%S").to_string(),
            countdown: CountdownInfo {
                days: left.days,
                hours: left.hours,
                minutes: left.minutes,
                seconds: left.seconds,
                expired: left.expired,
            },
            listings: self.catalog.len(),
        }
    }
}

#[tool_router]
impl PuraConnectServer {
    #[tool(description = "List the domain filter options for the internship catalog. The first entry is always \"All\"; listings without a domain are grouped under \"Other\".")]
    async fn list_domains(&self) -> Result<Json<DomainListResponse>, String> {
        Ok(Json(DomainListResponse {
            domains: self.domains.as_ref().clone(),
        }))
    }

    #[tool(description = "Search internship listings by case-insensitive substring over title, company, tags, excerpt and location, optionally filtered by domain. Results keep catalog order and include highlight spans.")]
    async fn search_internships(
        &self,
        Parameters(params): Parameters<SearchInternshipsParams>,
    ) -> Result<Json<SearchInternshipsResponse>, String> {
        let query = params.query.trim().to_lowercase();
        let domain = params
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(ALL_DOMAINS)
            .to_string();
        if !self.domains.iter().any(|d| *d == domain) {
            return Err(format!(
                "unknown domain: '{domain}'. Available domains: {}",
                self.domains.join(", ")
            ));
        }
        let limit = params.limit.map(|l| l as usize);

        if let Some(cached) = self.cache.get_search(&query, &domain, limit).await {
            debug!(query = %query, domain = %domain, "search cache hit");
            return Ok(Json(cached));
        }

        let response = self.search_response(&query, &domain, limit);
        info!(query = %query, domain = %domain, total = response.total, "catalog searched");
        self.cache.set_search(&query, &domain, limit, &response).await;
        Ok(Json(response))
    }

    #[tool(description = "Get one internship listing by id (e.g. 'PFE-26-DEV1') with its description, objectives, scope and deliverables rendered as sanitized HTML.")]
    async fn get_internship(
        &self,
        Parameters(params): Parameters<GetInternshipParams>,
    ) -> Result<Json<InternshipDetailResponse>, String> {
        let id = params.id.trim().to_string();
        if id.is_empty() {
            return Err("id must not be empty".to_string());
        }

        if let Some(cached) = self.cache.get_detail(&id).await {
            return Ok(Json(cached));
        }

        let record = self
            .catalog
            .get(&id)
            .ok_or_else(|| AppError::NotFound(id.clone()).to_string())?;
        let detail = to_detail(record);
        self.cache.set_detail(&detail).await;
        Ok(Json(detail))
    }

    #[tool(description = "Render a rich-text value as sanitized HTML. Strings with markup are sanitized, plain strings become paragraphs split on blank lines, and arrays become a bullet list.")]
    async fn render_rich_text(
        &self,
        Parameters(params): Parameters<RenderRichTextParams>,
    ) -> Result<Json<RenderRichTextResponse>, String> {
        Ok(Json(RenderRichTextResponse {
            html: sanitize::to_safe_html(&params.value),
        }))
    }

    #[tool(description = "Report whether applications are open, the application deadline, and the time remaining until it.")]
    async fn application_status(&self) -> Result<Json<ApplicationStatusResponse>, String> {
        Ok(Json(self.status_at(chrono::Local::now().naive_local())))
    }
}

fn to_spans(spans: Vec<HighlightSpan>) -> Vec<TextSpan> {
    spans
        .into_iter()
        .map(|s| TextSpan {
            text: s.text,
            matched: s.matched,
        })
        .collect()
}

fn to_card(record: &InternshipRecord, query: &str, index: usize) -> InternshipCard {
    let location = if record.location.is_empty() {
        "Remote"
    } else {
        record.location.as_str()
    };
    InternshipCard {
        id: record.id.clone(),
        title: record.title.clone(),
        company: record.company.clone(),
        domain: record.domain_label().to_string(),
        level: record.level.clone(),
        location: location.to_string(),
        tags: search::card_tags(record, CARD_TAG_LIMIT).to_vec(),
        id_spans: to_spans(search::highlight(&record.id, query)),
        title_spans: to_spans(search::highlight(&record.title, query)),
        location_spans: to_spans(search::highlight(location, query)),
        excerpt_spans: to_spans(search::highlight(record.summary(), query)),
        reveal_delay_ms: schedule::reveal_delay(index).as_millis() as u64,
    }
}

fn to_detail(record: &InternshipRecord) -> InternshipDetailResponse {
    InternshipDetailResponse {
        id: record.id.clone(),
        title: record.title.clone(),
        company: record.company.clone(),
        domain: record.domain_label().to_string(),
        subdomain: record.subdomain.clone(),
        location: record.location.clone(),
        duration: record.duration.clone(),
        level: record.level.clone(),
        tags: record.tags.clone(),
        sections: sanitize::render_detail(record)
            .into_iter()
            .map(|s| DetailSection {
                heading: s.heading.to_string(),
                html: s.html,
            })
            .collect(),
    }
}

#[tool_handler]
impl ServerHandler for PuraConnectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "pura-connect".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Pura Connect internship catalog. Use list_domains for filter options, \
                 search_internships to browse or search listings, get_internship for a \
                 listing's full details, render_rich_text to sanitize content, and \
                 application_status for the deadline countdown."
                    .to_string(),
            ),
        }
    }
}
