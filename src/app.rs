use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use tracing::{debug, error, warn};

use crate::Theme;
use crate::clinic::{LandingMsg, LandingScreen, catalog};
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::modal::ModalManager;
use crate::tui::{Event, Tui};
use crate::ui::{Handled, Screen, Toast, ToastManager};

const FRAME_RATE: f64 = 60.0;
const TICK_RATE: f64 = 20.0;

/// Routes terminal events to the dialogs, the landing page and the toasts.
///
/// Open dialogs see input first and block the page below them.
pub struct App {
    resolver: Arc<KeyResolver>,
    theme: Theme,
    modals: ModalManager,
    toasts: ToastManager,
    landing: LandingScreen,
    should_quit: bool,
    should_suspend: bool,
}

impl App {
    pub fn new(config: &AppConfig, resolver: Arc<KeyResolver>, theme: Theme) -> Result<Self> {
        let mut modals = ModalManager::from_config(&config.modals, resolver.clone());
        catalog::register_defaults(&mut modals)?;

        Ok(Self {
            landing: LandingScreen::new(resolver.clone()),
            toasts: ToastManager::from_config(&config.toasts),
            resolver,
            theme,
            modals,
            should_quit: false,
            should_suspend: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        loop {
            if let Some(event) = tui.next_event().await {
                self.handle_event(&mut tui, event)?;
            }
            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.enter()?;
                tui.clear()?;
            } else if self.should_quit {
                break;
            }
        }

        self.modals.shutdown();
        tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Error(error) => warn!(%error, "Terminal event error"),
            Event::Tick => self.on_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(Rect::new(0, 0, width, height))?;
                self.render(tui)?;
            }
            Event::Key(key) => {
                if let Err(error) = self.handle_key(key) {
                    self.report(&error);
                }
            }
            Event::Mouse(mouse) => {
                if let Err(error) = self.handle_mouse(mouse) {
                    self.report(&error);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // An open dialog captures every key
        if !self.modals.visible_ids().is_empty() {
            self.modals.handle_key(key)?;
            return Ok(());
        }

        if !self.landing.is_capturing() {
            if self.resolver.matches_global(&key, GlobalAction::Quit) {
                self.should_quit = true;
                return Ok(());
            }
            if self.resolver.matches_global(&key, GlobalAction::Suspend) {
                self.should_suspend = true;
                return Ok(());
            }
        }

        if let Handled::Event(msg) = self.landing.handle_key(key)? {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.modals.handle_mouse(mouse).is_consumed() {
            return Ok(());
        }
        let locked = self.modals.scroll_locked();
        if let Handled::Event(msg) = self.landing.handle_mouse(mouse, locked) {
            self.dispatch(msg)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: LandingMsg) -> Result<()> {
        debug!(?msg, "Handling landing message");
        match msg {
            LandingMsg::OpenModal(id) => self.modals.open(id.as_str()),
            LandingMsg::ShowCondition(name) => catalog::show_condition(&mut self.modals, &name)?,
        }
        Ok(())
    }

    fn on_tick(&mut self) {
        self.modals.on_tick();
        for toast in self.modals.update() {
            self.toasts.show(toast);
        }
        self.landing.on_tick();
        self.toasts.on_tick();
    }

    fn report(&mut self, error: &color_eyre::Report) {
        error!(%error, "Failed to handle input");
        self.toasts.show(Toast::error(error.to_string()));
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let area = frame.area();
            self.landing.render(frame, area, &self.theme);
            self.modals.render(frame, area, &self.theme);
            self.toasts.render(frame, area, &self.theme);
        })?;
        Ok(())
    }
}
