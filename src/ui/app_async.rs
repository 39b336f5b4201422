use eframe::egui;
use poll_promise::Promise;
use std::sync::Arc;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::{DatasetSource, TournamentData, load_tournament_data};
use crate::domain::{MatchSelector, TournamentKey};
use crate::error::AppError;
use crate::ui::app::MomentumApp;
use crate::utils::app_time::now;

pub(super) struct LoadResult {
    pub(super) key: TournamentKey,
    pub(super) selector: Option<MatchSelector>,
    pub(super) result: Result<(Arc<TournamentData>, &'static str), AppError>,
    elapsed_time: Duration,
}

impl MomentumApp {
    /// Reads a tournament's files off the UI thread (inline on wasm, where the
    /// embedded demo is all there is).
    pub(super) fn start_tournament_load(&mut self, key: TournamentKey, selector: Option<MatchSelector>) {
        // One load at a time; the newest request replaces a pending one
        if self.load_promise.is_some() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Dropping pending load of {:?} for {}", self.pending_key, key);
            }
            self.load_promise = None;
        }

        let sources = Arc::clone(&self.sources);

        #[cfg(not(target_arch = "wasm32"))]
        let promise = Promise::spawn_thread("tournament_load", move || {
            run_tournament_load(&sources, key, selector)
        });

        #[cfg(target_arch = "wasm32")]
        let promise = Promise::from_ready(run_tournament_load(&sources, key, selector));

        self.pending_key = Some(key);
        self.last_error = None;
        self.load_promise = Some(promise);
    }

    pub(super) fn poll_tournament_load(&mut self, ctx: &egui::Context) {
        let finished = self
            .load_promise
            .as_ref()
            .is_some_and(|promise| promise.ready().is_some());

        if !finished {
            if self.load_promise.is_some() {
                ctx.request_repaint();
            }
            return;
        }

        let Some(promise) = self.load_promise.take() else {
            return;
        };
        self.pending_key = None;

        let LoadResult {
            key,
            selector,
            result,
            elapsed_time,
        } = match promise.try_take() {
            Ok(load) => load,
            Err(_) => return,
        };

        match result {
            Ok((data, signature)) => {
                if elapsed_time.as_millis() > 100 {
                    log::info!(
                        "Loaded {} from {} in {:.2}s",
                        key,
                        signature,
                        elapsed_time.as_secs_f32()
                    );
                }
                self.tournaments.insert(key, Arc::clone(&data));
                self.source_by_tournament.insert(key, signature);
                self.browser_key = Some(key);

                if let Some(selector) = selector {
                    self.show_from_tournament(&data, &selector);
                }
            }
            Err(error) => {
                log::error!("Loading {} failed: {}", key, error);
                self.last_error = Some(error);
            }
        }
    }

    pub(super) fn is_loading(&self) -> bool {
        self.load_promise.is_some()
    }
}

fn run_tournament_load(
    sources: &[Box<dyn DatasetSource>],
    key: TournamentKey,
    selector: Option<MatchSelector>,
) -> LoadResult {
    let load_start = now();
    let result = load_tournament_data(sources, key).map(|(data, signature)| (Arc::new(data), signature));
    LoadResult {
        key,
        selector,
        result,
        elapsed_time: load_start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::EmbeddedDemoSource;

    #[test]
    fn load_result_carries_selector_through() {
        let sources: Vec<Box<dyn DatasetSource>> = vec![Box::new(EmbeddedDemoSource)];
        let selector = MatchSelector::ById("2011-frenchopen-9001".into());
        let load = run_tournament_load(&sources, EmbeddedDemoSource::key(), Some(selector.clone()));
        assert_eq!(load.selector, Some(selector));
        let (data, signature) = load.result.unwrap();
        assert_eq!(signature, "Embedded demo data");
        assert_eq!(data.listings().len(), 2);
        assert!(load.elapsed_time < Duration::from_secs(60));
    }
}
