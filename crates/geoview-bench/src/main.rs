use std::time::{Duration, Instant};

use clap::Parser;

use geoview_wm::actions::UiAction;
use geoview_wm::history::{ViewHistory, ViewSnapshot};
use geoview_wm::registry::WidgetDescriptor;
use geoview_wm::window::{Limits, WindowEvent, WindowManager};

#[derive(Parser, Debug)]
#[command(
    name = "geoview-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Transition-heavy benchmark for window stacking, drag and view history"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Number of floating windows kept on screen.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 12)]
    windows: usize,
}

struct BenchConfig {
    duration: Duration,
    windows: usize,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1..=500).contains(&cli.windows) {
            return Err("windows must be between 1 and 500".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            windows: cli.windows,
        })
    }
}

#[derive(Debug, Default)]
struct BenchStats {
    focus_ops: u64,
    drag_moves: u64,
    history_pushes: u64,
    history_navigations: u64,
}

impl BenchStats {
    fn total(&self) -> u64 {
        self.focus_ops + self.drag_moves + self.history_pushes + self.history_navigations
    }
}

fn main() {
    let cli = BenchCli::parse();
    let config = match BenchConfig::try_from(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let mut wm = WindowManager::new(Limits::container(1920.0, 1080.0));
    let widgets = (0..config.windows)
        .map(|i| WidgetDescriptor::new(format!("widget-{i}"), format!("Widget {i}"), 320.0, 240.0))
        .collect();
    wm.dispatch(UiAction::SetInitialWidgets(widgets));
    let ids: Vec<String> = (0..config.windows).map(|i| format!("w{i}")).collect();
    for (i, id) in ids.iter().enumerate() {
        wm.show_window(id, &format!("widget-{i}"), None);
    }

    let mut history = ViewHistory::with_limit(256);
    let mut stats = BenchStats::default();
    let started = Instant::now();
    let mut tick: u64 = 0;

    while started.elapsed() < config.duration {
        let id = &ids[(tick as usize) % ids.len()];
        wm.handle_event(&WindowEvent::HeaderPointerDown {
            id: id.clone(),
            x: 10.0,
            y: 10.0,
        });
        stats.focus_ops += 1;
        for step in 0..16 {
            let offset = (step as f64) * 7.5;
            wm.handle_event(&WindowEvent::PointerMove {
                x: offset + (tick % 97) as f64,
                y: offset,
            });
            stats.drag_moves += 1;
        }
        wm.handle_event(&WindowEvent::PointerUp);

        // repeated pushes model an undebounced map-move listener
        let view = ViewSnapshot::new([(tick % 13) as f64, 0.0], (tick % 18) as f64, 0.0);
        for _ in 0..4 {
            history.push(view);
            stats.history_pushes += 1;
        }
        if tick % 5 == 0 {
            history.go_back();
            history.go_forward();
            stats.history_navigations += 2;
        }
        tick += 1;
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!("windows:              {}", config.windows);
    println!("elapsed:              {elapsed:.2}s");
    println!("focus ops:            {}", stats.focus_ops);
    println!("drag moves:           {}", stats.drag_moves);
    println!("history pushes:       {}", stats.history_pushes);
    println!("history navigations:  {}", stats.history_navigations);
    println!(
        "transitions/sec:      {:.0}",
        stats.total() as f64 / elapsed.max(f64::EPSILON)
    );
    println!("past entries kept:    {}", history.past().len());
}
