use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

use rfx_assessor::config::AppConfig;
use rfx_assessor::error::AppError;
use rfx_assessor::telemetry;
use rfx_assessor::workflows::assessment::{
    assessment_router, records_from_path, AssessmentService, ComparisonReport, DescriptorError,
    InMemoryAssessmentCache, IngestError, NoopAssessmentCache, Scorecard,
};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "RFX Assessor",
    about = "Score vendor RFP proposals against a weighted scorecard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run assessments from the command line
    Assess {
        #[command(subcommand)]
        command: AssessCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AssessCommand {
    /// Score vendors and print the comparative ranking
    Run(AssessRunArgs),
}

#[derive(Args, Debug)]
struct AssessRunArgs {
    /// Path to the scorecard descriptor (JSON array of categories)
    #[arg(long)]
    scorecard: PathBuf,
    /// Path to evidence records (.json array or .csv export)
    #[arg(long)]
    evidence: PathBuf,
    /// Override the low-confidence review threshold
    #[arg(long)]
    low_confidence_threshold: Option<f64>,
    /// Override the free-text fallback confidence multiplier
    #[arg(long)]
    freetext_multiplier: Option<f64>,
    /// Emit the full report as JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess {
            command: AssessCommand::Run(args),
        } => run_assessment(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(AssessmentService::new(
        config.scoring.clone(),
        Arc::new(InMemoryAssessmentCache::default()),
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rfx assessor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_assessment(args: AssessRunArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let mut policy = config.scoring;
    if let Some(threshold) = args.low_confidence_threshold {
        policy.low_confidence_threshold = threshold;
    }
    if let Some(multiplier) = args.freetext_multiplier {
        policy.freetext_fallback_multiplier = multiplier;
    }

    let descriptor = fs::read_to_string(&args.scorecard)?;
    let scorecard = Scorecard::from_descriptor(&descriptor).map_err(|error| match error {
        DescriptorError::Invalid(invalid) => AppError::Scorecard(invalid),
        DescriptorError::Json(json) => AppError::Ingest(IngestError::Json(json)),
    })?;
    let records = records_from_path(&args.evidence)?;

    let service = AssessmentService::new(policy, Arc::new(NoopAssessmentCache));
    let report = service.run(&scorecard, &records);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_report(report: &ComparisonReport) {
    println!("Vendor ranking");
    for entry in &report.ranking {
        let marker = if entry.disqualified {
            " [DISQUALIFIED]"
        } else {
            ""
        };
        println!(
            "{}. {} - {:.1}/100 (confidence {:.2}, {}){}",
            entry.rank,
            entry.vendor_id,
            entry.overall_score,
            entry.overall_confidence,
            entry.confidence_band.label(),
            marker
        );
    }

    println!("\nCategory scores");
    for row in &report.category_matrix {
        let cells: Vec<String> = row
            .scores
            .iter()
            .map(|score| format!("{score:.1}"))
            .collect();
        let title = if row.name.is_empty() {
            row.category_id.to_string()
        } else {
            row.name.clone()
        };
        println!("- {}: {}", title, cells.join(" | "));
    }

    if report.review_flags.is_empty() {
        println!("\nLow-confidence flags: none");
    } else {
        println!("\nLow-confidence flags (human review suggested)");
        for flag in &report.review_flags {
            println!(
                "- {} / {}: confidence {:.2}",
                flag.vendor_id, flag.category_id, flag.confidence
            );
        }
    }

    if !report.failures.is_empty() {
        println!("\nVendors that could not be scored");
        for failure in &report.failures {
            println!("- {}: {}", failure.vendor_id, failure.reason);
        }
    }

    if let Some(summary) = &report.executive_summary {
        println!("\nExecutive summary");
        match &summary.recommended_vendor {
            Some(vendor) => println!(
                "Recommended vendor: {} ({:.1}/100, grade {}, {} confidence)",
                vendor,
                summary.winning_score,
                summary.grade.label(),
                summary.confidence.label()
            ),
            None => println!("No vendor can be recommended (all disqualified or failed)"),
        }
        for highlight in &summary.highlights {
            if highlight.strengths.is_empty() && highlight.weaknesses.is_empty() {
                continue;
            }
            let strengths: Vec<String> =
                highlight.strengths.iter().map(|id| id.to_string()).collect();
            let weaknesses: Vec<String> = highlight
                .weaknesses
                .iter()
                .map(|id| id.to_string())
                .collect();
            println!(
                "- {}: strengths [{}], weaknesses [{}]",
                highlight.vendor_id,
                strengths.join(", "),
                weaknesses.join(", ")
            );
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
