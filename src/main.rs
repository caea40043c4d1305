use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use indoc::indoc;
use serde::Serialize;
use tracing::Level;

use geoview_wm::actions::UiAction;
use geoview_wm::registry::{
    LoadError, WidgetCatalog, WidgetLoader, WidgetRegistry, WidgetResolver,
};
use geoview_wm::session::SessionSnapshot;
use geoview_wm::tracing_sub;
use geoview_wm::window::{Limits, WindowManager};

#[derive(Parser, Debug)]
#[command(
    name = "geoview-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay a widget session against a catalog and print the resulting workspace",
    after_help = indoc! {"
        The catalog is a JSON document with `widgets` and `overlayWidgets`
        arrays. The session file holds `{ \"widgetsActivos\": [...] }`; every
        listed widget is opened, resolved and shown in a floating window.
    "}
)]
struct Cli {
    /// Widget catalog JSON.
    #[arg(short = 'c', long = "catalog", value_name = "PATH")]
    catalog: PathBuf,

    /// Session snapshot JSON to replay. A missing file replays nothing.
    #[arg(short = 's', long = "session", value_name = "PATH")]
    session: Option<PathBuf>,

    /// Host container width in pixels.
    #[arg(long = "width", default_value_t = 1280.0)]
    width: f64,

    /// Host container height in pixels.
    #[arg(long = "height", default_value_t = 800.0)]
    height: f64,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: Level,
}

/// Stand-in UI module: the CLI has no real widget bundles to load.
#[derive(Debug)]
struct CatalogModule {
    title: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowSummary {
    id: String,
    widget: String,
    module: Option<String>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    z_index: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WorkspaceSummary {
    open_widgets: Vec<String>,
    unavailable: Vec<String>,
    windows: Vec<WindowSummary>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    tracing_sub::init_with_level(cli.log_level);

    let catalog = WidgetCatalog::load(&cli.catalog)?;
    let registry = WidgetRegistry::from_catalog(&catalog, |name| {
        let title = catalog
            .widgets
            .iter()
            .chain(&catalog.overlay_widgets)
            .find(|w| w.name == name)
            .map(|w| w.title.clone())?;
        let loader = move || {
            let title = title.clone();
            async move { Ok::<_, LoadError>(CatalogModule { title }) }
        };
        Some(Arc::new(loader) as Arc<dyn WidgetLoader<CatalogModule>>)
    })?;
    let resolver = WidgetResolver::new(Arc::new(registry));

    let mut wm = WindowManager::new(Limits::container(cli.width, cli.height));
    wm.dispatch(UiAction::SetInitialWidgets(catalog.widgets.clone()));
    wm.dispatch(UiAction::SetOverlayWidgets(catalog.overlay_widgets.clone()));

    let session = match &cli.session {
        Some(path) => SessionSnapshot::load(path)?,
        None => SessionSnapshot::default(),
    };
    session.replay(wm.store_mut());

    let mut unavailable = Vec::new();
    let mut modules = Vec::new();
    for name in wm.state().open_widget_names() {
        match resolver.resolve(&name).await {
            Ok(module) => {
                wm.show_window(&format!("window-{name}"), &name, None);
                modules.push((name, module.title.clone()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "widget unavailable");
                unavailable.push(name);
            }
        }
    }

    let windows = wm
        .windows()
        .into_iter()
        .map(|w| WindowSummary {
            module: modules
                .iter()
                .find(|(name, _)| *name == w.widget)
                .map(|(_, title)| title.clone()),
            id: w.id,
            widget: w.widget,
            x: w.rect.x,
            y: w.rect.y,
            width: w.rect.width,
            height: w.rect.height,
            z_index: w.z_index,
        })
        .collect();

    let summary = WorkspaceSummary {
        open_widgets: wm.state().open_widget_names(),
        unavailable,
        windows,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
