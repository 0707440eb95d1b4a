//! mtx-replay - Replays joins, receipts and pass purchases against
//! file-backed player documents.
//!
//! Useful for reproducing redelivery incidents: feed the receipts the
//! platform sent, in the order it sent them, and inspect the decisions,
//! the published events and the resulting documents.
//!
//! ```text
//! mtx-replay incident.json --data-dir ./replay-data
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

use mtx_entitlements::adapters::{
    FilePlayerDocument, FnHandler, InMemoryEventBus, InMemoryPlayerSessions, MockMarketplace,
};
use mtx_entitlements::application::{MtxService, MtxSettings};
use mtx_entitlements::config::AppConfig;
use mtx_entitlements::domain::foundation::{GamePassId, PlayerId};
use mtx_entitlements::domain::mtx::{InfoType, MtxEvent, ProductInfo, Receipt};
use mtx_entitlements::ports::PlayerSession;
use mtx_entitlements::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "mtx-replay")]
#[command(about = "Replay monetization callbacks against file-backed player documents", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON replay script
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Directory holding player documents (overrides storage.data_dir)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// TOML configuration file (overrides MTX_CONFIG_FILE)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// A replay script.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    #[serde(default)]
    marketplace: MarketplaceScript,
    steps: Vec<Step>,
}

/// Platform state the mock marketplace starts from.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketplaceScript {
    #[serde(default)]
    product_infos: Vec<ScriptedInfo>,
    #[serde(default)]
    owned_game_passes: Vec<ScriptedOwnership>,
    #[serde(default)]
    failing_game_passes: Vec<GamePassId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptedInfo {
    info_type: InfoType,
    info: ProductInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScriptedOwnership {
    player_id: PlayerId,
    game_pass_id: GamePassId,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Step {
    #[serde(rename_all = "camelCase")]
    Join { player_id: PlayerId, name: String },
    #[serde(rename_all = "camelCase")]
    Leave { player_id: PlayerId },
    Receipt { receipt: Receipt },
    #[serde(rename_all = "camelCase")]
    GamePassPurchase {
        player_id: PlayerId,
        game_pass_id: GamePassId,
        was_purchased: bool,
    },
    #[serde(rename_all = "camelCase")]
    ProductInfo { info_type: InfoType, id: u64 },
}

/// One line of replay output.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum Output<'a> {
    Event { event: &'a MtxEvent },
    Joined { player_id: PlayerId, newly_owned: Vec<GamePassId>, failed: Vec<GamePassId> },
    Left { player_id: PlayerId },
    Decision { purchase_id: String, decision: String },
    GamePassPurchase { player_id: PlayerId, game_pass_id: GamePassId, outcome: String },
    ProductInfo { id: u64, info: Option<ProductInfo> },
}

fn emit(output: &Output<'_>) {
    match serde_json::to_string(output) {
        Ok(line) => println!("{}", line),
        Err(err) => tracing::error!(error = %err, "failed to serialize replay output"),
    }
}

fn build_marketplace(script: &MarketplaceScript) -> MockMarketplace {
    let mut marketplace = MockMarketplace::new();
    for scripted in &script.product_infos {
        marketplace = marketplace.with_product_info(scripted.info_type, scripted.info.clone());
    }
    for owned in &script.owned_game_passes {
        marketplace = marketplace.with_owned_game_pass(owned.player_id, owned.game_pass_id);
    }
    for &game_pass_id in &script.failing_game_passes {
        marketplace = marketplace.with_failing_game_pass(game_pass_id);
    }
    marketplace
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("failed to load configuration")?;
    init_tracing(&config.logging);

    let settings = MtxSettings::from_config(&config).context("invalid configuration")?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.storage.data_dir.clone());

    let raw = tokio::fs::read_to_string(&cli.script)
        .await
        .with_context(|| format!("failed to read script {}", cli.script.display()))?;
    let script: Script = serde_json::from_str(&raw).context("failed to parse script")?;

    let sessions = InMemoryPlayerSessions::new();
    let bus = Arc::new(InMemoryEventBus::new());
    let service = MtxService::new(
        settings,
        Arc::new(sessions.clone()),
        Arc::new(build_marketplace(&script.marketplace)),
        bus,
    );
    service.subscribe(Arc::new(FnHandler::new("replay-printer", |event| {
        emit(&Output::Event { event });
    })));

    tracing::info!(
        steps = script.steps.len(),
        data_dir = %data_dir.display(),
        "starting replay"
    );

    for step in script.steps {
        match step {
            Step::Join { player_id, name } => {
                let document = FilePlayerDocument::load(&data_dir, player_id)
                    .await
                    .with_context(|| format!("failed to load document for player {}", player_id))?;
                tracing::debug!(
                    player_id = %player_id,
                    path = %document.path().display(),
                    "loaded player document"
                );
                let session = PlayerSession::new(player_id, name, Arc::new(document));
                sessions.connect(session.clone()).await;

                let report = service.on_player_join(session).await;
                emit(&Output::Joined {
                    player_id,
                    newly_owned: report.newly_owned,
                    failed: report.failed,
                });
            }
            Step::Leave { player_id } => {
                sessions.disconnect(player_id).await;
                emit(&Output::Left { player_id });
            }
            Step::Receipt { receipt } => {
                let purchase_id = receipt.purchase_id.to_string();
                let decision = service.process_receipt(receipt).await;
                emit(&Output::Decision {
                    purchase_id,
                    decision: decision.to_string(),
                });
            }
            Step::GamePassPurchase {
                player_id,
                game_pass_id,
                was_purchased,
            } => {
                let outcome = match service
                    .on_game_pass_purchase_finished(player_id, game_pass_id, was_purchased)
                    .await
                {
                    Ok(outcome) => format!("{:?}", outcome),
                    Err(err) => err.to_string(),
                };
                emit(&Output::GamePassPurchase {
                    player_id,
                    game_pass_id,
                    outcome,
                });
            }
            Step::ProductInfo { info_type, id } => {
                let info = service.get_product_info(info_type, id).await;
                emit(&Output::ProductInfo { id, info });
            }
        }
    }

    tracing::info!("replay finished");
    Ok(())
}
