//! Command-line interface for the feishu-notifier binary.
//!
//! Designed to run as a GitHub Actions step: the event type is passed as a
//! flag while the webhook URL and event payload path come from the
//! environment. One card is built and delivered per invocation.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Parser};
use feishu_notifier::{
    Delivery, Error, EventKind, FeishuClient, RawSettings, Settings, WebhookPayload, build_card,
    load_event, normalize, serialize_error, should_skip,
};
use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "feishu_notifier=info";

/// Command line interface for delivering GitHub events to Feishu.
#[derive(Debug, Parser,)]
#[command(
    name = "feishu-notifier",
    version,
    about = "Send GitHub webhook events to a Feishu group as cards"
)]
struct Cli
{
    /// GitHub event name, e.g. `pull_request` or `issue_comment`.
    #[arg(long = "event-type", value_name = "KIND")]
    event_type: Option<String,>,

    /// Feishu incoming webhook URL.
    #[arg(long = "webhook-url", value_name = "URL", env = "FEISHU_WEBHOOK", hide_env_values = true)]
    webhook_url: Option<String,>,

    /// Path to the webhook payload JSON written by GitHub Actions.
    #[arg(long = "event-path", value_name = "PATH", env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf,>,

    /// Print the card payload instead of delivering it.
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    dry_run: bool,

    /// Pretty-print the payload written by `--dry-run`.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,
}

impl From<Cli,> for RawSettings
{
    fn from(cli: Cli,) -> Self
    {
        Self {
            event_type:  cli.event_type,
            webhook_url: cli.webhook_url,
            event_path:  cli.event_path,
            dry_run:     cli.dry_run,
            pretty:      cli.pretty,
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run(Cli::parse(),).await {
        error!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER,),);

    // Logs go to stderr so `--dry-run` output on stdout stays parseable.
    let _ = tracing_subscriber::registry()
        .with(filter,)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr,),)
        .try_init();
}

/// Resolves settings, renders the card, and delivers it.
///
/// Settings are validated before the event file is opened.
///
/// # Errors
///
/// Propagates configuration, parse, and delivery errors.
async fn run(cli: Cli,) -> Result<(), Error,>
{
    let settings = Settings::resolve(cli.into(),)?;
    info!(
        "Handling {} event from {}",
        settings.event_kind,
        settings.event_path.display()
    );

    let event = load_event(&settings.event_path,)?;
    let Some(payload,) = render(settings.event_kind, &event,)? else {
        return Ok((),);
    };

    deliver(&settings.delivery, &payload,).await
}

/// Normalizes the payload and builds the card, or returns `None` when the
/// delivery is intentionally skipped.
fn render(kind: EventKind, event: &Value,) -> Result<Option<WebhookPayload,>, Error,>
{
    let record = normalize(kind, event,)?;
    debug!("Projected {} record: {:?}", record.shape(), record);

    if should_skip(&record,) {
        info!("Skipping {} event: commented review without a body", kind);
        return Ok(None,);
    }

    let card = build_card(kind, &record,)?;
    Ok(Some(WebhookPayload::interactive(card,),),)
}

async fn deliver(delivery: &Delivery, payload: &WebhookPayload,) -> Result<(), Error,>
{
    match delivery {
        Delivery::Webhook {
            url,
        } => FeishuClient::new(url.as_str(),)?.send_card(payload,).await,
        Delivery::DryRun {
            pretty,
        } => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_payload(&mut handle, payload, *pretty,)
        }
    }
}

fn write_payload<W: io::Write,>(
    writer: &mut W,
    payload: &WebhookPayload,
    pretty: bool,
) -> Result<(), Error,>
{
    if pretty {
        serde_json::to_writer_pretty(writer, payload,).map_err(serialize_error,)?;
    } else {
        serde_json::to_writer(writer, payload,).map_err(serialize_error,)?;
    }

    Ok((),)
}
