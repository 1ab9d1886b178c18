// src/bin/trader.rs

use clap::Parser;
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use std::path::PathBuf;
use stock_trader::{GameSession, SessionConfig, Stock};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the market, overrides the config
    #[arg(long)]
    seed: Option<u64>,
}

/// Turns what the holdings input shows into a whole-share request. An
/// untouched fractional holding (left by a share issue) is passed through.
fn whole_shares(desired: f64, held: f64, max: f64) -> f64 {
    if desired == held {
        return held;
    }
    desired.round().min(max.floor())
}

struct TraderApp {
    session: GameSession,
    /// What the holdings inputs currently show, one per stock.
    desired: Vec<f64>,
    /// Set after a round with bankruptcies or share issues. Trading waits
    /// until it is dismissed.
    news: Option<String>,
    last_error: Option<String>,
    price_history: Vec<Vec<f64>>,
}

impl TraderApp {
    fn new(session: GameSession) -> Self {
        let mut app = Self {
            price_history: session.stocks().iter().map(|s| vec![s.price()]).collect(),
            session,
            desired: Vec::new(),
            news: None,
            last_error: None,
        };
        app.sync_inputs();
        app
    }

    fn sync_inputs(&mut self) {
        let player = self.session.current_player();
        self.desired = self.session.stocks().iter().map(|s| player.holding(s)).collect();
    }

    fn trade(&mut self, index: usize) {
        let Some(stock) = self.session.stocks().get(index).map(Stock::id) else {
            return;
        };
        let held = self
            .session
            .stock(stock)
            .map(|s| self.session.current_player().holding(s))
            .unwrap_or(0.0);
        let max = self.session.max_affordable(stock).unwrap_or(held);
        let desired = whole_shares(self.desired[index], held, max);
        match self.session.buy_or_sell(stock, desired) {
            Ok(_) => self.last_error = None,
            Err(err) => {
                warn!(%err, "trade rejected");
                self.last_error = Some(err.to_string());
            }
        }
        self.sync_inputs();
    }

    fn next_round(&mut self) {
        let report = self.session.advance_round();
        self.news = report.headline(self.session.market());
        for (history, stock) in self.price_history.iter_mut().zip(self.session.stocks()) {
            history.push(stock.price());
        }
        self.last_error = None;
        self.sync_inputs();
    }
}

impl eframe::App for TraderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let trading = self.news.is_none() && !self.session.is_over();

        egui::TopBottomPanel::top("player_panel").show(ctx, |ui| {
            egui::Grid::new("player_grid").show(ui, |ui| {
                ui.label("Round:");
                ui.label(self.session.round().to_string());
                ui.end_row();
                ui.label("Player:");
                ui.label(self.session.current_player().name());
                ui.end_row();
                ui.label("Cash:");
                ui.label(format!("{:.2}", self.session.current_player().cash()));
                ui.end_row();
            });
            ui.horizontal(|ui| {
                if ui.add_enabled(trading, egui::Button::new("Next round")).clicked() {
                    self.next_round();
                }
                if self.session.is_over() {
                    ui.label(RichText::new("Game over").strong());
                }
            });
            if let Some(err) = &self.last_error {
                ui.label(RichText::new(err).color(Color32::RED));
            }
        });

        let mut changed = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Grid::new("stock_grid").striped(true).show(ui, |ui| {
                for title in ["Company", "Price", "Owned", "Change", "Old price", "New price", "Dividend"] {
                    ui.label(RichText::new(title).underline());
                }
                ui.end_row();

                for (i, stock) in self.session.stocks().iter().enumerate() {
                    let max = self.session.max_affordable(stock.id()).unwrap_or(0.0);
                    ui.label(stock.name());
                    ui.label(format!("{:.2}", stock.price()));
                    let owned = egui::DragValue::new(&mut self.desired[i])
                        .clamp_range(0.0..=max)
                        .speed(1.0)
                        .fixed_decimals(0);
                    if ui.add_enabled(trading, owned).changed() {
                        changed = Some(i);
                    }
                    let change_color = if stock.change() < 0.0 {
                        Color32::RED
                    } else if stock.change() > 0.0 {
                        Color32::GREEN
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(format!("{:.2}", stock.change())).color(change_color));
                    ui.label(format!("{:.2}", stock.previous_price()));
                    ui.label(format!("{:.2}", stock.price()));
                    ui.label(format!("{:.2}", stock.dividend()));
                    ui.end_row();
                }
            });

            ui.separator();
            Plot::new("price_history")
                .legend(Legend::default())
                .height(220.0)
                .show(ui, |plot_ui| {
                    for (stock, history) in self.session.stocks().iter().zip(&self.price_history) {
                        plot_ui.line(Line::new(PlotPoints::from_ys_f64(history)).name(stock.name()));
                    }
                });

            if self.session.is_over() {
                ui.separator();
                ui.heading("Standings");
                for standing in self.session.standings() {
                    ui.label(format!("{}: {:.2}", standing.name, standing.net_worth));
                }
            }
        });
        if let Some(index) = changed {
            self.trade(index);
        }

        if let Some(text) = self.news.clone() {
            let mut close = false;
            egui::Window::new("Stock news!")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    for line in text.lines() {
                        ui.label(line);
                    }
                    ui.add_space(5.0);
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            if close {
                self.news = None;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let app_state = TraderApp::new(GameSession::new(&config)?);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 640.0])
            .with_title("Stock Trader"),
        ..Default::default()
    };

    eframe::run_native(
        "Stock Trader",
        native_options,
        Box::new(|_cc| Box::new(app_state)),
    )?;
    Ok(())
}
