//! Console walkthrough of the ExoSeekr dashboard tour.
//!
//! Simulates the dashboard's pages on stdout and drives the orchestrator
//! from stdin commands, standing in for the real render layer.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use exoseekr_tour::config::TourConfig;
use exoseekr_tour::error::NavigationError;
use exoseekr_tour::host::{Anchor, AnchorResolver, Navigator, RouteId, StepRenderer, StepView, UserIntent};
use exoseekr_tour::store::{FlagStore, LibSqlFlagStore, MemoryFlagStore};
use exoseekr_tour::tour::{
    CompletionFlag, NavigationSynchronizer, Placement, StepDescriptor, StepRegistry, TourManager,
    TourService,
};

/// Simulated dashboard: tracks the mounted route and knows which
/// highlight targets each page renders.
struct ConsoleDashboard {
    current: Mutex<RouteId>,
    /// Selector → routes that render the element. Nav links live in the
    /// sidebar, so they exist on every page; widgets only on their own.
    anchors: HashMap<&'static str, Vec<&'static str>>,
    routes: Vec<&'static str>,
}

impl ConsoleDashboard {
    fn new() -> Self {
        let routes = vec!["home", "upload", "models", "training", "results", "discoveries"];
        let mut anchors: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for link in [
            "[data-tour=\"dashboard-link\"]",
            "[data-tour=\"upload-link\"]",
            "[data-tour=\"models-link\"]",
            "[data-tour=\"training-link\"]",
            "[data-tour=\"results-link\"]",
            "[data-tour=\"discoveries-link\"]",
        ] {
            anchors.insert(link, routes.clone());
        }
        anchors.insert("[data-tour=\"stats-cards\"]", vec!["home"]);
        anchors.insert("[data-tour=\"model-status\"]", vec!["home"]);
        anchors.insert("[data-tour=\"recent-activity\"]", vec!["home"]);

        Self {
            current: Mutex::new(RouteId::new("home")),
            anchors,
            routes,
        }
    }

    fn known_routes(&self) -> HashSet<RouteId> {
        self.routes.iter().map(|r| RouteId::new(*r)).collect()
    }
}

#[async_trait]
impl Navigator for ConsoleDashboard {
    async fn current_route(&self) -> RouteId {
        self.current.lock().await.clone()
    }

    async fn navigate_to(&self, route: &RouteId) -> Result<(), NavigationError> {
        *self.current.lock().await = route.clone();
        println!("  ~ navigated to /{route}");
        Ok(())
    }
}

#[async_trait]
impl AnchorResolver for ConsoleDashboard {
    async fn find_anchor(&self, selector: &str) -> Option<Anchor> {
        let current = self.current.lock().await.clone();
        let routes = self.anchors.get(selector)?;
        routes
            .iter()
            .any(|r| *r == current.as_str())
            .then(|| Anchor::new(selector))
    }
}

#[async_trait]
impl StepRenderer for ConsoleDashboard {
    async fn show(&self, view: StepView) {
        println!();
        println!("┌─ Step {} of {} ─ {}", view.index + 1, view.total, view.step.title);
        println!("│  {}", view.step.body);
        match &view.anchor {
            Some(anchor) => println!("│  highlighting {} ({:?})", anchor.as_str(), view.placement),
            None => println!("│  full-screen ({:?})", view.placement),
        }
        println!("└─ next / prev / skip");
        eprint!("> ");
    }

    async fn dismiss(&self) {
        println!("\n  tour closed\n");
        eprint!("> ");
    }
}

/// The eleven-step ExoSeekr tour, routes carried on the descriptors.
fn exoseekr_steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::fullscreen(
            "welcome",
            "Welcome to ExoSeekr!",
            "Your AI-driven platform for detecting exoplanet transits in TESS/Kepler light curves. Let's take a quick tour.",
        )
        .on_route("home"),
        StepDescriptor::anchored(
            "dashboard",
            "Dashboard",
            "Your central hub showing dataset statistics, active model performance, and recent activity.",
            "[data-tour=\"dashboard-link\"]",
            Placement::Bottom,
        )
        .on_route("home"),
        StepDescriptor::anchored(
            "stats",
            "Dataset Statistics",
            "Track your total, processed, and pending datasets at a glance.",
            "[data-tour=\"stats-cards\"]",
            Placement::Bottom,
        )
        .on_route("home"),
        StepDescriptor::anchored(
            "model-status",
            "Active Model Status",
            "View your currently deployed model's performance on transit detection.",
            "[data-tour=\"model-status\"]",
            Placement::Top,
        )
        .on_route("home"),
        StepDescriptor::anchored(
            "activity",
            "Recent Activity Feed",
            "Stay updated with completed training runs, uploads, and processing status.",
            "[data-tour=\"recent-activity\"]",
            Placement::Top,
        )
        .on_route("home"),
        StepDescriptor::anchored(
            "upload",
            "Upload Page",
            "Ingest new light curve data from TESS or Kepler missions as CSV time series.",
            "[data-tour=\"upload-link\"]",
            Placement::Bottom,
        )
        .on_route("upload"),
        StepDescriptor::anchored(
            "models",
            "Models Library",
            "Browse trained models, compare metrics, and switch between versions.",
            "[data-tour=\"models-link\"]",
            Placement::Bottom,
        )
        .on_route("models"),
        StepDescriptor::anchored(
            "training",
            "Training Page",
            "Train new models with custom hyperparameters and watch live loss/accuracy charts.",
            "[data-tour=\"training-link\"]",
            Placement::Bottom,
        )
        .on_route("training"),
        StepDescriptor::anchored(
            "results",
            "Results Page",
            "Explore accuracy, precision, recall, and F1 across exoplanet classes.",
            "[data-tour=\"results-link\"]",
            Placement::Bottom,
        )
        .on_route("results"),
        StepDescriptor::anchored(
            "discoveries",
            "Discoveries Page",
            "View confirmed exoplanet discoveries with distance, radius, and habitability details.",
            "[data-tour=\"discoveries-link\"]",
            Placement::Bottom,
        )
        .on_route("discoveries"),
        StepDescriptor::fullscreen(
            "finish",
            "You're all set!",
            "Upload light curves, train models, and discover new exoplanets. Reopen this tour anytime from the help icon.",
        )
        .on_route("home"),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = TourConfig::default();

    // Durable store at EXOSEEKR_TOUR_DB, in-memory otherwise.
    let store: Arc<dyn FlagStore> = match std::env::var("EXOSEEKR_TOUR_DB") {
        Ok(path) => Arc::new(LibSqlFlagStore::new_local(&PathBuf::from(path)).await?),
        Err(_) => Arc::new(MemoryFlagStore::new()),
    };

    let dashboard = Arc::new(ConsoleDashboard::new());
    let registry = StepRegistry::new(exoseekr_steps(), &dashboard.known_routes())?;

    let flag = CompletionFlag::new(store, config.storage_key.clone());
    let sync = NavigationSynchronizer::new(dashboard.clone(), dashboard.clone(), config.anchor_settle);
    let manager = Arc::new(TourManager::new(registry, flag, sync, dashboard.clone()));
    let service = TourService::init(manager.clone(), config.entry_route.clone(), config.auto_start_delay);

    eprintln!("🔭 ExoSeekr tour demo");
    eprintln!("   Commands: next, prev, skip, start, reset, clear, status, quit");
    eprintln!("   First visit auto-starts the tour after {:?}.\n", config.auto_start_delay);
    eprint!("> ");

    // The entry page just mounted; schedule the first-visit auto-start.
    service.on_route_mounted(&config.entry_route).await;

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "next" | "n" => manager.handle_intent(UserIntent::Next).await,
            "prev" | "p" => manager.handle_intent(UserIntent::Prev).await,
            "skip" | "s" => manager.handle_intent(UserIntent::Skip).await,
            "start" => service.start_tour().await,
            "reset" => service.reset_and_start_tour().await,
            "clear" => {
                service.clear_completion().await;
                println!("  completion flag cleared");
            }
            "status" => {
                let report = manager.status().await;
                println!("  {}", serde_json::to_string(&report)?);
            }
            "quit" | "q" => break,
            other => println!("  unknown command: {other}"),
        }
        eprint!("> ");
    }

    service.dispose().await;
    Ok(())
}
