use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use cookie_kingdom_core::{
    config::UiConfig,
    models::{Building, Position, Rarity},
    session::{InertAction, Intent, Outcome},
    GameSession, View,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const CARD_WIDTH: u16 = 20;
const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    gold: Color,
    gems: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            gold: Color::Yellow,
            gems: Color::LightMagenta,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Legendary => Color::Magenta,
        Rarity::Epic => Color::LightBlue,
        Rarity::Rare => Color::Cyan,
        Rarity::Common => Color::Gray,
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

struct StatusMessage {
    text: String,
    ticks_left: u32,
}

#[derive(Default)]
struct UiState {
    view: View,
    building_cursor: usize,
    shop_cursor: usize,
    cookie_cursor: usize,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl UiState {
    fn select_view(&mut self, view: View) {
        if self.view != view {
            debug!(from = %self.view, to = %view, "View selected");
            self.view = view;
        }
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        let cursor = match self.view {
            View::Kingdom => &mut self.building_cursor,
            View::Shop => &mut self.shop_cursor,
            View::Cookies => &mut self.cookie_cursor,
            View::Game | View::Profile => return,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }
}

/// Terminal front end. Holds no game rules; every change goes through [`GameSession`].
pub struct KingdomApp {
    session: GameSession,
    state: UiState,
    theme: Theme,
    tick_rate: Duration,
    status_ttl: u32,
}

impl KingdomApp {
    pub fn new(session: GameSession, ui: &UiConfig) -> Self {
        Self {
            session,
            state: UiState::default(),
            theme: Theme::default(),
            tick_rate: Duration::from_millis(ui.tick_rate_ms),
            status_ttl: ui.status_ttl_ticks,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx, self.tick_rate);
        info!("Terminal UI started");

        let result = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err.into());
            }
            if self.state.should_quit {
                break Ok(());
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break Ok(());
            }
        };

        restore_terminal(&mut terminal)?;
        info!("Terminal UI stopped");
        result
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                self.handle_key(key);
                true
            }
            Some(AppEvent::Input(_)) => true,
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn handle_tick(&mut self) {
        if let Some(status) = self.state.status.as_mut() {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.state.status = None;
            }
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let text = format!("{}  {}", Local::now().format("%H:%M:%S"), message.into());
        self.state.status = Some(StatusMessage {
            text,
            ticks_left: self.status_ttl.max(1),
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.state.should_quit = true;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.state.select_view(self.state.view.next());
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.state.select_view(self.state.view.previous());
            }
            KeyCode::Char(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                if let Some(view) = View::from_index(index) {
                    self.state.select_view(view);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.selectable_len();
                self.state.move_cursor(1, len);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.selectable_len();
                self.state.move_cursor(-1, len);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selection(),
            KeyCode::Char('u') if self.state.view == View::Kingdom => self.activate_selection(),
            _ => {}
        }
    }

    fn selectable_len(&self) -> usize {
        let state = self.session.state();
        match self.state.view {
            View::Kingdom => state.buildings.len(),
            View::Shop => self.session.catalog().len(),
            View::Cookies => state.cookies.len(),
            View::Game | View::Profile => 0,
        }
    }

    fn activate_selection(&mut self) {
        let state = self.session.state();
        let intent = match self.state.view {
            View::Kingdom => state
                .buildings
                .get(self.state.building_cursor)
                .map(|building| Intent::UpgradeBuilding(building.id.clone())),
            View::Shop => self
                .session
                .catalog()
                .get(self.state.shop_cursor)
                .map(|item| Intent::BuyShopItem(item.id.clone())),
            View::Cookies => match state.cookies.get(self.state.cookie_cursor) {
                Some(cookie) if cookie.owned => {
                    let message = format!("{} is already in your collection", cookie.name);
                    self.set_status(message);
                    return;
                }
                Some(cookie) => Some(Intent::AcquireCookie(cookie.id.clone())),
                None => None,
            },
            View::Game => Some(Intent::StartAdventure),
            View::Profile => None,
        };

        if let Some(intent) = intent {
            let outcome = self.session.dispatch(intent);
            let message = self.describe_outcome(&outcome);
            self.set_status(message);
        }
    }

    fn describe_outcome(&self, outcome: &Outcome) -> String {
        let state = self.session.state();
        match outcome {
            Outcome::Upgraded {
                building,
                level,
                gold,
            } => {
                let name = state
                    .building(building)
                    .map(|b| b.name.as_str())
                    .unwrap_or("Building");
                format!("{name} upgraded to level {level} ({gold} gold left)")
            }
            Outcome::InsufficientGold {
                required,
                available,
            } => format!("Not enough gold: need {required}, have {available}"),
            Outcome::UnknownBuilding(id) => format!("No building with id {id}"),
            Outcome::LevelOverflow(id) => format!("Building {id} cannot be upgraded further"),
            Outcome::Inert(InertAction::AcquireCookie(_)) => {
                "Recruiting cookies is not available yet".to_string()
            }
            Outcome::Inert(InertAction::BuyShopItem(_)) => {
                "The shop is not open yet".to_string()
            }
            Outcome::Inert(InertAction::StartAdventure) => {
                "Adventures are coming soon".to_string()
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(area);

        self.render_header(frame, rows[0]);
        self.render_experience(frame, rows[1]);
        self.render_tabs(frame, rows[2]);
        match self.state.view {
            View::Kingdom => self.render_kingdom(frame, rows[3]),
            View::Shop => self.render_shop(frame, rows[3]),
            View::Cookies => self.render_cookies(frame, rows[3]),
            View::Game => self.render_game(frame, rows[3]),
            View::Profile => self.render_profile(frame, rows[3]),
        }
        self.render_status(frame, rows[4]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let stats = &self.session.state().stats;
        let line = Line::from(vec![
            Span::styled(
                "🍪 Cookie Kingdom",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("   Level {}", stats.level)),
            Span::raw("   "),
            Span::styled(
                format!(" 💰 {} ", stats.gold),
                Style::default().fg(self.theme.gold).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(" 💎 {} ", stats.gems),
                Style::default().fg(self.theme.gems).add_modifier(Modifier::BOLD),
            ),
        ]);
        let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, area);
    }

    fn render_experience(&self, frame: &mut Frame, area: Rect) {
        let stats = &self.session.state().stats;
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(self.theme.accent).bg(self.theme.muted))
            .ratio(self.session.experience_ratio())
            .label(format!("XP {}/{}", stats.experience, stats.max_experience));
        frame.render_widget(gauge, area);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = View::ALL
            .iter()
            .map(|view| format!("{} {}", view.index() + 1, view.title()))
            .collect::<Vec<_>>();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(self.state.view.index())
            .style(Style::default().fg(self.theme.primary_fg))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("|");
        frame.render_widget(tabs, area);
    }

    fn render_kingdom(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Your Kingdom 👑")
            .title_alignment(Alignment::Center);
        let map = block.inner(area);
        frame.render_widget(block, area);

        let affordable = self.session.can_afford_upgrade();
        let cost = self.session.rules().upgrade_cost;
        for (idx, building) in self.session.state().buildings.iter().enumerate() {
            let card = building_card_area(building.position, map, CARD_WIDTH, CARD_HEIGHT);
            let selected = idx == self.state.building_cursor;
            self.render_building_card(frame, card, building, selected, affordable, cost);
        }
    }

    fn render_building_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        building: &Building,
        selected: bool,
        affordable: bool,
        cost: u64,
    ) {
        let border_style = if selected {
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.muted)
        };
        let upgrade_style = if affordable {
            Style::default().fg(self.theme.success)
        } else {
            Style::default().fg(self.theme.danger)
        };
        let lines = vec![
            Line::from(format!("{} {}", building.icon, building.name)),
            Line::from(Span::styled(
                format!("Lv. {}", building.level),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("▲ Upgrade {cost}g"), upgrade_style)),
        ];
        let card = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        frame.render_widget(Clear, area);
        frame.render_widget(card, area);
    }

    fn render_shop(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .session
            .catalog()
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", item.icon)),
                    Span::styled(
                        format!("{:<16}", item.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<22}", item.reward),
                        Style::default().fg(self.theme.muted),
                    ),
                    Span::styled(
                        format!("💎 {}", item.price_label()),
                        Style::default().fg(self.theme.gems),
                    ),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(self.state.shop_cursor.min(items.len() - 1)));
        }
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Shop 🏪"))
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_cookies(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .session
            .state()
            .cookies
            .iter()
            .map(|cookie| {
                let rarity = rarity_color(cookie.rarity);
                let (owned_label, owned_style) = if cookie.owned {
                    ("✔ In collection", Style::default().fg(self.theme.success))
                } else {
                    ("🔒 Recruit", Style::default().fg(self.theme.muted))
                };
                let name_style = if cookie.owned {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.muted)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", cookie.icon)),
                    Span::styled(format!("{:<12}", cookie.name), name_style),
                    Span::styled(
                        format!(" {:^11} ", cookie.rarity.label()),
                        Style::default().fg(Color::Black).bg(rarity),
                    ),
                    Span::styled(
                        format!("  ⚡{:>4}  ", cookie.power),
                        Style::default().fg(self.theme.gold),
                    ),
                    Span::styled(owned_label, owned_style),
                ]))
            })
            .collect();

        let progress = self.session.collection();
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(self.state.cookie_cursor.min(items.len() - 1)));
        }
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Cookies 🍪 ({}/{})", progress.owned, progress.total)),
            )
            .highlight_style(Style::default().bg(self.theme.selection_bg))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_game(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("🗺️"),
            Line::from(Span::styled(
                "Adventure Map",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Set out on thrilling adventures with your cookies!",
                Style::default().fg(self.theme.muted),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] ▶ Start adventure",
                Style::default().fg(self.theme.accent),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Adventures 🎮"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_profile(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Profile 👤");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(2),
            ])
            .split(inner);

        let stats = &self.session.state().stats;
        let progress = self.session.collection();
        let started = self.session.started_at().with_timezone(&Local);

        let summary = vec![
            Line::from(Span::styled(
                "Cookie Master",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Level {}", stats.level)),
            Line::from(Span::styled(
                format!("💰 Gold: {}", stats.gold),
                Style::default().fg(self.theme.gold),
            )),
            Line::from(Span::styled(
                format!("💎 Gems: {}", stats.gems),
                Style::default().fg(self.theme.gems),
            )),
        ];
        frame.render_widget(Paragraph::new(summary).alignment(Alignment::Center), rows[0]);

        frame.render_widget(
            Paragraph::new(format!(
                "Experience to next level: {}/{}",
                stats.experience, stats.max_experience
            )),
            rows[1],
        );
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(self.theme.accent).bg(self.theme.muted))
            .ratio(self.session.experience_ratio());
        frame.render_widget(gauge, rows[2]);

        let footer = vec![
            Line::from(format!(
                "Cookies collected: {}/{}",
                progress.owned, progress.total
            )),
            Line::from(Span::styled(
                format!("Session started {}", started.format("%H:%M:%S")),
                Style::default().fg(self.theme.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(footer), rows[3]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = self
            .state
            .status
            .as_ref()
            .map(|status| status.text.clone())
            .unwrap_or_else(|| "Ready".to_string());
        let help = Line::from(Span::styled(
            "Tab/←→ switch view · ↑↓ select · Enter act · q quit",
            Style::default().fg(self.theme.muted),
        ));
        let paragraph = Paragraph::new(vec![Line::from(primary), help])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

/// Place a card of `width`x`height` centred on `position` (percent of `map`), kept inside `map`.
fn building_card_area(position: Position, map: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(map.width);
    let height = height.min(map.height);
    let center_x = u32::from(map.x) + u32::from(map.width) * u32::from(position.x) / 100;
    let center_y = u32::from(map.y) + u32::from(map.height) * u32::from(position.y) / 100;
    let max_x = u32::from(map.x + map.width - width);
    let max_y = u32::from(map.y + map.height - height);
    let x = center_x
        .saturating_sub(u32::from(width) / 2)
        .clamp(u32::from(map.x), max_x);
    let y = center_y
        .saturating_sub(u32::from(height) / 2)
        .clamp(u32::from(map.y), max_y);
    Rect::new(x as u16, y as u16, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

/// Why the input pump stopped.
#[derive(Debug)]
enum InputStop {
    /// The event loop dropped its receiver.
    Disconnected,
    /// The terminal backend failed to poll or read.
    Failed(io::Error),
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>, tick_rate: Duration) {
    thread::spawn(move || {
        match pump_input(&sender, || event::poll(tick_rate), event::read) {
            InputStop::Failed(err) => error!(%err, "Input thread stopped"),
            InputStop::Disconnected => debug!("Input thread stopped after receiver closed"),
        }
    });
}

/// Forward terminal events and ticks until the receiver closes or the backend fails.
fn pump_input<P, R>(sender: &mpsc::Sender<AppEvent>, mut poll: P, mut read: R) -> InputStop
where
    P: FnMut() -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    loop {
        let event = match poll() {
            Ok(true) => match read() {
                Ok(evt) => AppEvent::Input(evt),
                Err(err) => return InputStop::Failed(err),
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => return InputStop::Failed(err),
        };
        if sender.blocking_send(event).is_err() {
            return InputStop::Disconnected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookie_kingdom_core::{models::BuildingId, AppConfig};
    use ratatui::backend::TestBackend;

    fn app() -> KingdomApp {
        let config = AppConfig::default();
        KingdomApp::new(GameSession::new(&config), &config.ui)
    }

    fn press(app: &mut KingdomApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn render(app: &mut KingdomApp) -> Result<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 32))?;
        terminal.draw(|frame| app.draw(frame))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    fn level_of(app: &KingdomApp, id: &str) -> Option<u32> {
        app.session
            .state()
            .building(&BuildingId::new(id))
            .map(|b| b.level)
    }

    #[test]
    fn enter_upgrades_selected_building() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.state().stats.gold, 4000);
        assert_eq!(level_of(&app, "2"), Some(3));
        assert_eq!(level_of(&app, "1"), Some(3));
        let status = app.state.status.as_ref().map(|s| s.text.as_str()).unwrap_or("");
        assert!(status.contains("Bakery upgraded to level 3"));
    }

    #[test]
    fn upgrades_stop_when_gold_runs_out() {
        let mut app = app();
        for _ in 0..7 {
            press(&mut app, KeyCode::Char('u'));
        }
        assert_eq!(app.session.state().stats.gold, 0);
        assert_eq!(level_of(&app, "1"), Some(8));
        let status = app.state.status.as_ref().map(|s| s.text.as_str()).unwrap_or("");
        assert!(status.contains("Not enough gold"));
    }

    #[test]
    fn tab_keys_cycle_views() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.view, View::Shop);
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.state.view, View::Profile);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.state.view, View::Kingdom);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.view, View::Profile);
    }

    #[test]
    fn inert_actions_leave_state_alone() {
        let mut app = app();
        let before = app.session.state().clone();

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.state(), &before);
        let status = app.state.status.as_ref().map(|s| s.text.as_str()).unwrap_or("");
        assert!(status.contains("Adventures are coming soon"));
    }

    #[test]
    fn cursor_is_clamped_to_list() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.state.building_cursor, 2);
        for _ in 0..10 {
            press(&mut app, KeyCode::Up);
        }
        assert_eq!(app.state.building_cursor, 0);
    }

    #[test]
    fn status_expires_after_ttl() {
        let mut app = app();
        app.status_ttl = 2;
        app.set_status("hello");
        app.handle_tick();
        assert!(app.state.status.is_some());
        app.handle_tick();
        assert!(app.state.status.is_none());
    }

    #[test]
    fn quit_keys_set_flag() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state.should_quit);
    }

    #[test]
    fn kingdom_renders_every_building() -> Result<()> {
        let mut app = app();
        let screen = render(&mut app)?;
        for name in ["Castle", "Bakery", "Farm", "Lv. 3"] {
            assert!(screen.contains(name), "missing {name}");
        }
        Ok(())
    }

    #[test]
    fn profile_renders_derived_values() -> Result<()> {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        let screen = render(&mut app)?;
        assert!(screen.contains("350/500"));
        assert!(screen.contains("Cookies collected: 2/4"));
        Ok(())
    }

    #[test]
    fn cards_stay_inside_map() {
        let map = Rect::new(1, 1, 60, 12);
        for (x, y) in [(0, 0), (50, 40), (100, 100)] {
            let card = building_card_area(Position::new(x, y), map, CARD_WIDTH, CARD_HEIGHT);
            assert!(card.x >= map.x && card.right() <= map.right());
            assert!(card.y >= map.y && card.bottom() <= map.bottom());
        }

        let tiny = Rect::new(0, 0, 8, 2);
        let card = building_card_area(Position::new(50, 50), tiny, CARD_WIDTH, CARD_HEIGHT);
        assert_eq!(card, tiny);
    }

    #[test]
    fn poll_failure_stops_input_with_error() {
        let (sender, mut receiver) = mpsc::channel(4);
        let mut polls = 0;
        let stop = pump_input(
            &sender,
            || {
                polls += 1;
                if polls == 1 {
                    Ok(false)
                } else {
                    Err(io::Error::other("terminal gone"))
                }
            },
            || Err(io::Error::other("unreachable")),
        );

        assert!(matches!(stop, InputStop::Failed(ref err) if err.to_string() == "terminal gone"));
        assert!(matches!(receiver.try_recv(), Ok(AppEvent::Tick)));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn read_failure_stops_input_with_error() {
        let (sender, _receiver) = mpsc::channel(4);
        let stop = pump_input(&sender, || Ok(true), || Err(io::Error::other("bad read")));
        assert!(matches!(stop, InputStop::Failed(_)));
    }

    #[test]
    fn closed_receiver_stops_input_quietly() {
        let (sender, receiver) = mpsc::channel(4);
        drop(receiver);
        let stop = pump_input(
            &sender,
            || Ok(true),
            || Ok(Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))),
        );
        assert!(matches!(stop, InputStop::Disconnected));
    }
}
