mod form;

use std::{collections::VecDeque, time::Duration};

use api_types::expense::ExpenseNew;
use chrono::Utc;
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use uuid::Uuid;

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    sort::SortMode,
    state::ExpenseState,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use form::{AddForm, FormField, parse_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
}

impl ToastState {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Info,
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Success,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: ToastLevel::Error,
        }
    }
}

/// Server calls queued by key handling and run between frames, so the
/// optimistic entry is drawn before the request goes out.
#[derive(Debug)]
enum PendingOp {
    Fetch,
    Create { token: Uuid, request: ExpenseNew },
    Reset,
}

#[derive(Debug)]
pub struct AppState {
    pub expenses: ExpenseState,
    pub sort: SortMode,
    pub selected: usize,
    pub mode: Mode,
    pub form: AddForm,
    pub toast: Option<ToastState>,
    pub loading: bool,
    pub base_url: String,
    pub timezone: Tz,
}

impl AppState {
    pub fn new(base_url: String, timezone: Tz, sort: SortMode) -> Self {
        Self {
            expenses: ExpenseState::default(),
            sort,
            selected: 0,
            mode: Mode::List,
            form: AddForm::default(),
            toast: None,
            loading: false,
            base_url,
            timezone,
        }
    }

    fn select_next(&mut self) {
        if self.expenses.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.expenses.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.expenses.len().saturating_sub(1));
    }

    fn handle_list_key(&mut self, action: AppAction) -> Option<PendingOp> {
        match action {
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(),
            AppAction::Input('j') => self.select_next(),
            AppAction::Input('k') => self.select_prev(),
            AppAction::Input('a') => {
                self.form = AddForm::default();
                self.mode = Mode::Add;
            }
            AppAction::Input('s') => {
                self.sort = self.sort.next();
                self.selected = 0;
            }
            AppAction::Input('r') => {
                self.loading = true;
                return Some(PendingOp::Fetch);
            }
            AppAction::Input('R') => {
                self.toast = Some(ToastState::info("Resetting..."));
                return Some(PendingOp::Reset);
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, action: AppAction) -> Option<PendingOp> {
        match action {
            AppAction::Cancel => self.mode = Mode::List,
            AppAction::NextField => self.form.advance_focus(),
            AppAction::Backspace => self.form.backspace(),
            AppAction::Left | AppAction::Right if self.form.focus == FormField::Payer => {
                self.form.toggle_payer();
            }
            AppAction::Input(ch) => self.form.input(ch),
            AppAction::Submit => return self.submit_form(),
            _ => {}
        }
        None
    }

    fn submit_form(&mut self) -> Option<PendingOp> {
        let draft = match self.form.to_draft(Utc::now()) {
            Ok(draft) => draft,
            Err(message) => {
                self.form.message = Some(message);
                return None;
            }
        };

        let token = self.expenses.begin_create(&draft);
        self.form = AddForm::default();
        self.mode = Mode::List;
        self.selected = 0;
        Some(PendingOp::Create {
            token,
            request: draft.to_request(),
        })
    }
}

pub struct App {
    client: Client,
    pub state: AppState,
    pending: VecDeque<PendingOp>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let timezone = config.tz()?;
        let mut state = AppState::new(config.base_url.clone(), timezone, config.sort);
        state.loading = true;

        Ok(Self {
            client,
            state,
            pending: VecDeque::from([PendingOp::Fetch]),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if let Some(op) = self.pending.pop_front() {
                self.run_op(op).await;
                continue;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let typing = self.state.mode == Mode::Add;
        let action = map_key(key, typing);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if action != AppAction::None && self.state.mode == Mode::List {
            self.state.toast = None;
        }

        let op = match self.state.mode {
            Mode::List => self.state.handle_list_key(action),
            Mode::Add => self.state.handle_form_key(action),
        };
        if let Some(op) = op {
            self.pending.push_back(op);
        }
    }

    async fn run_op(&mut self, op: PendingOp) {
        let state = &mut self.state;
        match op {
            PendingOp::Fetch => {
                let result = state.expenses.fetch_all(&self.client).await;
                state.loading = false;
                if let Err(err) = result {
                    tracing::warn!("fetch failed: {err}");
                    state.toast = Some(ToastState::error(format!(
                        "Could not load expenses: {err}"
                    )));
                }
            }
            PendingOp::Create { token, request } => {
                let result = self.client.expense_create(&request).await;
                match state.expenses.settle_create(token, result) {
                    Ok(()) => state.toast = Some(ToastState::success("Expense added")),
                    Err(err) => {
                        tracing::warn!("create failed: {err}");
                        state.toast = Some(ToastState::error(format!(
                            "Could not add expense: {err}"
                        )));
                    }
                }
            }
            PendingOp::Reset => match state.expenses.reset_all(&self.client).await {
                Ok(()) => state.toast = Some(ToastState::success("Expenses reset")),
                Err(err) => {
                    tracing::warn!("reset failed: {err}");
                    state.toast = Some(ToastState::error(format!(
                        "Could not reset expenses: {err}"
                    )));
                }
            },
        }
        state.clamp_selection();
    }
}
