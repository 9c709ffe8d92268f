use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use catalogue_core::{update, CatalogueState, CatalogueViewModel, Effect, Msg, QueryState};
use catalogue_logging::{catalogue_debug, catalogue_info, LevelFilter, LogDestination};

use super::address_bar::{AddressBar, LocationBar};
use super::config::BrowseConfig;
use super::effects::{EngineDispatcher, FetchDispatch};
use super::input::{parse_input, Input, HELP};
use super::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Owns the state and the two outward boundaries effects are run against.
pub struct Controller<A: AddressBar, D: FetchDispatch> {
    state: CatalogueState,
    address_bar: A,
    dispatch: D,
}

impl<A: AddressBar, D: FetchDispatch> Controller<A, D> {
    pub fn new(state: CatalogueState, address_bar: A, dispatch: D) -> Self {
        Self {
            state,
            address_bar,
            dispatch,
        }
    }

    pub fn address_bar(&self) -> &A {
        &self.address_bar
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatch
    }

    pub fn state(&self) -> &CatalogueState {
        &self.state
    }

    /// Seeds the query from the address bar and kicks off the first fetch.
    pub fn start(&mut self) -> Option<CatalogueViewModel> {
        let query = QueryState::from_query_string(&self.address_bar.initial_query());
        catalogue_info!("Starting with {}", query.to_query_string());
        self.dispatch_msg(Msg::Initialized(query))
    }

    /// Applies one message, runs its effects and returns a view to render
    /// when anything changed.
    pub fn dispatch_msg(&mut self, msg: Msg) -> Option<CatalogueViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        for effect in effects {
            self.run_effect(effect);
        }
        let view = state.view();
        let was_dirty = state.consume_dirty();
        self.state = state;
        was_dirty.then_some(view)
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ReplaceUrl { query } => self.address_bar.replace_query(&query),
            Effect::FetchPage { request_id, query } => self.dispatch.fetch(request_id, &query),
        }
    }
}

pub fn run_browse(config: BrowseConfig, level: LevelFilter) -> anyhow::Result<()> {
    catalogue_logging::initialize(LogDestination::File(config.log_file.clone()), level);
    catalogue_info!("Browsing {} via {}", config.location, config.collection.endpoint);

    let dispatcher =
        EngineDispatcher::new(config.collection.clone()).context("starting fetch engine")?;
    let mut controller = Controller::new(
        CatalogueState::with_card_settings(config.cards.clone()),
        LocationBar::new(config.location.clone()),
        dispatcher,
    );

    let (input_tx, input_rx) = mpsc::channel::<Input>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if input_tx.send(parse_input(&line)).is_err() {
                break;
            }
        }
        let _ = input_tx.send(Input::Quit);
    });

    let mut stdout = io::stdout();
    writeln!(stdout, "{HELP}")?;
    if let Some(view) = controller.start() {
        draw(&mut stdout, &view, &controller)?;
    }

    loop {
        let input = match input_rx.recv_timeout(POLL_INTERVAL) {
            Ok(input) => Some(input),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => Some(Input::Quit),
        };
        match input {
            Some(Input::Quit) => break,
            Some(Input::Help) => writeln!(stdout, "{HELP}")?,
            Some(Input::Msg(msg)) => {
                catalogue_debug!("Input {:?}", msg);
                if let Some(view) = controller.dispatch_msg(msg) {
                    draw(&mut stdout, &view, &controller)?;
                }
            }
            None => {}
        }

        while let Some(msg) = controller.dispatcher().poll() {
            if let Some(view) = controller.dispatch_msg(msg) {
                draw(&mut stdout, &view, &controller)?;
            }
        }
    }

    catalogue_info!("Leaving at {}", controller.address_bar().current());
    Ok(())
}

fn draw(
    out: &mut impl Write,
    view: &CatalogueViewModel,
    controller: &Controller<LocationBar, EngineDispatcher>,
) -> io::Result<()> {
    for line in ui::render::render(view, controller.address_bar().current()) {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
