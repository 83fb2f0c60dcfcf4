use jobscout_logging::{scout_debug, scout_info, scout_warn};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_closed() {
        scout_debug!("Ignoring {:?} after shutdown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started => {
            let request_id = state.begin_sites_request();
            vec![Effect::LoadSites { request_id }]
        }
        Msg::RefreshSites => {
            // A reload settling mid-search would leave an error beside the
            // loading state; the reload control is disabled while loading.
            if state.is_loading() {
                scout_debug!("Reload requested while a scrape is in flight; ignored");
                return (state, Vec::new());
            }
            state.clear_error();
            let request_id = state.begin_sites_request();
            vec![Effect::LoadSites { request_id }]
        }
        Msg::SitesLoaded { request_id, result } => {
            if !state.apply_sites(request_id, result) {
                scout_debug!("Dropped stale site list for request {}", request_id);
            }
            Vec::new()
        }
        Msg::SiteSelected(site) => {
            if !state.select_site(site.clone()) {
                scout_warn!("Ignoring selection of unknown site {:?}", site);
            }
            Vec::new()
        }
        Msg::KeywordChanged(keyword) => {
            state.set_keyword(keyword);
            Vec::new()
        }
        Msg::SearchClicked => {
            if state.selected_site().is_none() {
                state.set_validation_error();
                return (state, Vec::new());
            }
            // One search at a time; the button is disabled while loading.
            if state.is_loading() {
                scout_debug!("Search clicked while a scrape is in flight; ignored");
                return (state, Vec::new());
            }
            match state.begin_search() {
                Some((request_id, site, keyword)) => {
                    scout_info!(
                        "Scrape request {} site={} keyword={:?}",
                        request_id,
                        site,
                        keyword
                    );
                    vec![Effect::Scrape {
                        request_id,
                        site,
                        keyword,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::ScrapeFinished { request_id, result } => {
            if !state.apply_scrape(request_id, result) {
                scout_debug!("Dropped stale scrape result for request {}", request_id);
            }
            Vec::new()
        }
        Msg::QuitRequested => {
            state.close();
            vec![Effect::Shutdown]
        }
        Msg::Tick => {
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
