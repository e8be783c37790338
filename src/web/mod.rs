//! HTTP surface: month pages, JSON views, and the root redirect.

mod error;

pub use error::ApiError;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tera::Tera;
use tower_http::trace::TraceLayer;

use crate::calendar::{
    self, day_view, parse_day, parse_month, parse_year, weekday_from_index, Cell, DayView,
    MonthDescriptor, PadMode, YearMonth,
};
use crate::config::{CalendarSettings, ServerConfig};
use crate::theme::ThemeConfig;

const MONTH_TEMPLATE: &str = include_str!("templates/month.html");

// ─── Shared state ─────────────────────────────────────────────────────────────

pub struct AppState {
    pub settings: CalendarSettings,
    /// Notes keyed by date, shown on matching cells.
    pub plan:     BTreeMap<NaiveDate, String>,
    tera:         Tera,
    clock:        fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(settings: CalendarSettings, plan: BTreeMap<NaiveDate, String>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("month.html", MONTH_TEMPLATE)?;
        Ok(Self { settings, plan, tera, clock: Utc::now })
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/",                              get(index))
        .route("/health",                        get(health))
        .route("/month/{year}/{month}",          get(month_page))
        .route("/api/month/{year}/{month}",      get(month_json))
        .route("/api/day/{year}/{month}/{day}",  get(day_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, server: &ServerConfig) -> Result<()> {
    let addr     = format!("{}:{}", server.bind, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
}

// ─── Request parsing ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    week_start: Option<String>,
    pad_mode:   Option<String>,
    theme:      Option<String>,
}

struct MonthRequest {
    year:       i32,
    month:      u32,
    week_start: Weekday,
    pad_mode:   PadMode,
}

impl MonthRequest {
    fn resolve(
        settings: &CalendarSettings,
        (year, month): &(String, String),
        q: &MonthQuery,
    ) -> Result<Self, ApiError> {
        let week_start = match q.week_start.as_deref() {
            Some(raw) => {
                let index = raw.trim().parse().map_err(|_| {
                    calendar::CalendarError::param(
                        "weekStart",
                        "Invalid weekStart. Expected 0 (Sun) through 6 (Sat)",
                    )
                })?;
                weekday_from_index(index)?
            }
            None => settings.week_start,
        };
        let pad_mode = match q.pad_mode.as_deref() {
            Some(raw) => raw.parse::<PadMode>()?,
            None      => settings.pad_mode,
        };

        Ok(Self {
            year:  parse_year(year)?,
            month: parse_month(month)?,
            week_start,
            pad_mode,
        })
    }

    /// Query string that keeps the same layout on prev/next links.
    fn nav_query(&self, theme: &str) -> String {
        let pad = match self.pad_mode {
            PadMode::Blank    => "blank",
            PadMode::Adjacent => "adjacent",
        };
        format!(
            "?weekStart={}&padMode={pad}&theme={theme}",
            self.week_start.num_days_from_sunday()
        )
    }
}

fn build_month(state: &AppState, req: &MonthRequest) -> Result<MonthDescriptor, ApiError> {
    let annotate = |cell: Cell| match cell.date().and_then(|d| state.plan.get(&d)) {
        Some(entry) => cell.with_note(entry.clone()),
        None        => cell,
    };

    let mut opts = state.settings.month_options((state.clock)());
    opts.week_start = req.week_start;
    opts.pad_mode   = req.pad_mode;
    if !state.plan.is_empty() {
        opts.hooks.on_day    = Some(&annotate);
        opts.hooks.on_prefix = Some(&annotate);
        opts.hooks.on_suffix = Some(&annotate);
    }

    Ok(calendar::build(req.year, req.month, &opts)?)
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

async fn index(State(state): State<Arc<AppState>>) -> Redirect {
    let now = YearMonth::of(state.settings.today((state.clock)()));
    Redirect::to(&format!("/month/{:04}/{:02}", now.year, now.month))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status":  "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn month_page(
    State(state): State<Arc<AppState>>,
    Path(path): Path<(String, String)>,
    Query(q): Query<MonthQuery>,
) -> Result<Html<String>, ApiError> {
    let req   = MonthRequest::resolve(&state.settings, &path, &q)?;
    let month = build_month(&state, &req)?;
    let theme = ThemeConfig::by_name(q.theme.as_deref().unwrap_or(&state.settings.theme));

    let mut ctx = tera::Context::new();
    ctx.insert("month", &month);
    ctx.insert("theme", &theme);
    ctx.insert("query", &req.nav_query(&theme.name));
    Ok(Html(state.tera.render("month.html", &ctx)?))
}

async fn month_json(
    State(state): State<Arc<AppState>>,
    Path(path): Path<(String, String)>,
    Query(q): Query<MonthQuery>,
) -> Result<Json<MonthDescriptor>, ApiError> {
    let req = MonthRequest::resolve(&state.settings, &path, &q)?;
    Ok(Json(build_month(&state, &req)?))
}

async fn day_json(
    Path((year, month, day)): Path<(String, String, String)>,
) -> Result<Json<DayView>, ApiError> {
    let view = day_view(parse_year(&year)?, parse_month(&month)?, parse_day(&day)?)?;
    Ok(Json(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use chrono::{FixedOffset, TimeZone};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap()
    }

    fn settings() -> CalendarSettings {
        CalendarSettings {
            week_start: Weekday::Sun,
            pad_mode:   PadMode::Blank,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
            theme:      "catppuccin-mocha".into(),
        }
    }

    fn app(plan: BTreeMap<NaiveDate, String>) -> Router {
        let state = AppState::new(settings(), plan).unwrap().with_clock(fixed_now);
        router(Arc::new(state))
    }

    async fn fetch(router: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status  = response.status();
        let headers = response.headers().clone();
        let body    = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn root_redirects_to_current_month() {
        let (status, headers, _) = fetch(app(BTreeMap::new()), "/").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/month/2024/03");
    }

    #[tokio::test]
    async fn month_json_uses_configured_defaults() {
        let (status, _, body) = fetch(app(BTreeMap::new()), "/api/month/2024/02").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["dayCount"], 29);
        assert_eq!(json["weekStart"], 0);
        assert_eq!(json["weekDayFirst"], 4);
        assert_eq!(json["matrix"][0][0]["kind"], "prefix_blank");
        assert_eq!(json["matrix"][0][4]["iso"], "2024-02-01");
    }

    #[tokio::test]
    async fn query_overrides_week_start_and_padding() {
        let (status, _, body) =
            fetch(app(BTreeMap::new()), "/api/month/2023/02?weekStart=1&padMode=adjacent").await;
        assert_eq!(status, StatusCode::OK);

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["weekStart"], 1);
        assert_eq!(json["padMode"], "adjacent");
        assert_eq!(json["matrix"][0][0]["kind"], "prefix");
        assert_eq!(json["matrix"][0][0]["iso"], "2023-01-30");
    }

    #[tokio::test]
    async fn invalid_parameters_are_rejected() {
        let cases = [
            ("/api/month/2024/13", "Invalid month. Example format: 01 02 ... 11 12"),
            ("/api/month/24/02", "Invalid year. Example format: 1970 1971 ... 2029 2030"),
            ("/api/month/2024/02?weekStart=9", "Invalid weekStart. Expected 0 (Sun) through 6 (Sat)"),
            ("/api/month/2024/02?padMode=mirror", "Invalid padMode. Expected one of: blank, adjacent (or 0, 1)"),
            ("/month/2024/00", "Invalid month. Example format: 01 02 ... 11 12"),
        ];
        for (uri, message) in cases {
            let (status, _, body) = fetch(app(BTreeMap::new()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, message, "{uri}");
        }
    }

    #[tokio::test]
    async fn month_page_renders_grid_and_today() {
        let (status, _, body) = fetch(app(BTreeMap::new()), "/month/2024/03?theme=nord").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Mar 2024"));
        assert!(body.contains(r#"class="day today" data-date="2024-03-10""#));
        assert!(body.contains(&ThemeConfig::nord().bg_primary));
        assert!(body.contains("/month/2024/2?weekStart=0&amp;padMode=blank&amp;theme=nord"));
    }

    #[tokio::test]
    async fn plan_entries_annotate_cells() {
        let mut plan = BTreeMap::new();
        plan.insert(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), "taper".to_owned());
        plan.insert(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), "race".to_owned());

        let (_, _, body) = fetch(app(plan), "/api/month/2024/03").await;
        let json: Value = serde_json::from_str(&body).unwrap();
        let noted: Vec<(String, String)> = json["matrix"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|row| row.as_array().unwrap().iter())
            .filter(|c| c["note"].is_string())
            .map(|c| (c["iso"].as_str().unwrap().to_owned(), c["note"].as_str().unwrap().to_owned()))
            .collect();
        assert_eq!(
            noted,
            [("2024-03-09".to_owned(), "taper".to_owned()), ("2024-03-10".to_owned(), "race".to_owned())]
        );
    }

    #[tokio::test]
    async fn day_view_reports_neighbours() {
        let (status, _, body) = fetch(app(BTreeMap::new()), "/api/day/2024/02/29").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["weekday"], "Thu");
        assert_eq!(json["next"], "2024-03-01");

        let (status, _, body) = fetch(app(BTreeMap::new()), "/api/day/2023/02/29").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "invalid date: 2023-02-29");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, _, body) = fetch(app(BTreeMap::new()), "/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }
}
