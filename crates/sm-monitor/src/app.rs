//! The egui application: drains the feed, draws the panels.
//!
//! Layout per frame:
//! - top status bar: aggregate listener state and sample count
//! - left panel: one checkbox + link state per instrument
//! - central panel: the sentiment time-series plot
//!
//! Every `update` call first empties the feed channel into the history
//! store, then renders from the store. A repaint is scheduled every 100 ms
//! so samples keep flowing in even when the user provides no input.

use std::time::Duration;

use ahash::AHashMap;
use eframe::egui::{self, Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};
use sm_core::{LinkState, Watchlist};
use sm_feed::{drain, FeedRuntime, HistoryStore};
use tracing::warn;

use crate::chart;

const COLOR_LISTENING: Color32 = Color32::from_rgb(0x00, 0xff, 0x88);
const COLOR_WAITING: Color32 = Color32::from_rgb(0xff, 0xaa, 0x00);
const COLOR_FAILED: Color32 = Color32::from_rgb(0xff, 0x44, 0x44);

pub struct MonitorApp {
    watchlist: Watchlist,
    runtime: FeedRuntime,
    store: HistoryStore,
    /// Ticker -> plotted. Everything starts visible.
    selected: AHashMap<String, bool>,
    /// Set once the channel disconnects; it never comes back.
    feed_down: bool,
}

impl MonitorApp {
    pub fn new(watchlist: Watchlist, runtime: FeedRuntime) -> Self {
        let store = HistoryStore::new(&watchlist);
        let selected = default_selection(&watchlist);
        Self {
            watchlist,
            runtime,
            store,
            selected,
            feed_down: false,
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Sentiment Feed").strong());
            ui.separator();

            let listening = self.store.listening_count();
            let total = self.watchlist.len();
            let color = if listening == total {
                COLOR_LISTENING
            } else {
                COLOR_WAITING
            };
            ui.colored_label(color, format!("listening on {listening} of {total} ports"));

            let failed = self.store.failed_count();
            if failed > 0 {
                ui.separator();
                ui.colored_label(COLOR_FAILED, format!("{failed} failed"));
            }
            if self.feed_down {
                ui.separator();
                ui.colored_label(COLOR_FAILED, "feed stopped");
            }

            ui.separator();
            ui.label(format!("{} samples", self.store.total_observations()));
        });
    }

    fn watchlist_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Instruments");
        ui.separator();
        for inst in self.watchlist.iter() {
            let checked = self.selected.entry(inst.ticker.clone()).or_insert(true);
            ui.checkbox(checked, format!("{}  ({})", inst.ticker, inst.company));
            if let Some(state) = self.store.link(&inst.ticker) {
                ui.horizontal(|ui| {
                    ui.add_space(24.0);
                    ui.colored_label(link_color(state), state.to_string());
                });
            }
            ui.add_space(4.0);
        }
    }

    fn plot_panel(&self, ui: &mut egui::Ui) {
        let series = chart::visible_series(&self.watchlist, &self.selected, &self.store);
        let any_selected = self.selected.values().any(|&on| on);

        let mut plot = Plot::new("sentiment_plot")
            .include_y(-1.0)
            .include_y(1.0)
            .x_axis_formatter(|mark, _range| chart::format_clock(mark.value));
        if any_selected {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, |plot_ui| {
            for s in series {
                plot_ui.line(Line::new(PlotPoints::from(s.points)).name(&s.ticker));
            }
        });
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let stats = drain(self.runtime.receiver(), &mut self.store);
        if stats.disconnected && !self.feed_down {
            warn!("feed channel disconnected, no further samples will arrive");
            self.feed_down = true;
        }

        egui::TopBottomPanel::top("status_bar").show(ctx, |ui| self.status_bar(ui));
        egui::SidePanel::left("watchlist_panel")
            .default_width(220.0)
            .show(ctx, |ui| self.watchlist_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.plot_panel(ui));

        // Keep repainting while idle so fresh samples show up promptly.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn link_color(state: &LinkState) -> Color32 {
    match state {
        LinkState::Listening => COLOR_LISTENING,
        LinkState::Waiting => COLOR_WAITING,
        LinkState::Failed(_) => COLOR_FAILED,
    }
}

fn default_selection(watchlist: &Watchlist) -> AHashMap<String, bool> {
    watchlist.iter().map(|i| (i.ticker.clone(), true)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_instrument_starts_selected() {
        let watchlist = Watchlist::builtin();
        let selected = default_selection(&watchlist);
        assert_eq!(selected.len(), watchlist.len());
        assert!(selected.values().all(|&on| on));
    }

    #[test]
    fn link_states_map_to_distinct_colors() {
        let listening = link_color(&LinkState::Listening);
        let waiting = link_color(&LinkState::Waiting);
        let failed = link_color(&LinkState::Failed("bind".into()));
        assert_ne!(listening, waiting);
        assert_ne!(waiting, failed);
        assert_ne!(listening, failed);
    }
}
