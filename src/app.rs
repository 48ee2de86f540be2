// src/app.rs

use crate::core::classifier::{self, DisplayModel};
use crate::core::lifecycle::{ScanCompletion, ScanController, ScanLifecycleState};
use crate::core::models::{ServiceHealth, Vulnerability};
use crate::pacing::MinimumDisplay;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tracing::debug;

pub const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Reachability of the scanning service as last probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Unknown,
    Online(ServiceHealth),
    Unreachable,
}

pub struct App {
    pub should_quit: bool,
    pub input: String,
    pub controller: ScanController,
    /// Classification of the current `Completed` payload, computed once per scan.
    pub display: Option<DisplayModel>,
    pub findings_state: ListState,
    pub service_status: ServiceStatus,
    pub spinner_frame: usize,
    min_scanning_display: Duration,
    scanning_gate: Option<MinimumDisplay>,
    held_completion: Option<ScanCompletion>,
}

impl App {
    pub fn new(controller: ScanController, min_scanning_display: Duration) -> Self {
        Self {
            should_quit: false,
            input: String::new(),
            controller,
            display: None,
            findings_state: ListState::default(),
            service_status: ServiceStatus::Unknown,
            spinner_frame: 0,
            min_scanning_display,
            scanning_gate: None,
            held_completion: None,
        }
    }

    pub fn state(&self) -> &ScanLifecycleState {
        self.controller.state()
    }

    /// True while the scanning screen should be shown, which includes the tail of
    /// the minimum display time after the result is already in.
    pub fn is_busy(&self) -> bool {
        self.controller.is_scanning()
    }

    pub fn submit(&mut self) {
        if self.controller.submit(&self.input) {
            self.input = self.input.trim().to_string();
            self.display = None;
            self.findings_state = ListState::default();
            self.held_completion = None;
            self.scanning_gate = Some(MinimumDisplay::start(Instant::now(), self.min_scanning_display));
        }
    }

    pub fn on_scan_completion(&mut self, completion: ScanCompletion) {
        self.on_scan_completion_at(completion, Instant::now());
    }

    pub fn on_scan_completion_at(&mut self, completion: ScanCompletion, now: Instant) {
        let is_current = self.controller.current_ticket_id() == Some(completion.ticket_id);
        match self.scanning_gate {
            // Only the current result is held; anything else goes straight to the
            // controller, which discards it without touching the held one.
            Some(gate) if is_current && !gate.is_satisfied(now) => {
                debug!(remaining_ms = gate.remaining(now).as_millis() as u64, "Holding scan result.");
                self.held_completion = Some(completion);
            }
            _ => self.apply_completion(completion),
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    pub fn on_tick_at(&mut self, now: Instant) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();

        let ready = self.scanning_gate.is_none_or(|gate| gate.is_satisfied(now));
        if ready {
            if let Some(completion) = self.held_completion.take() {
                self.apply_completion(completion);
            }
        }
    }

    fn apply_completion(&mut self, completion: ScanCompletion) {
        if !self.controller.resolve(completion) {
            return;
        }
        self.scanning_gate = None;
        if let ScanLifecycleState::Completed(response) = self.controller.state() {
            self.display = Some(classifier::classify(&response.body));
            if !self.findings().is_empty() {
                self.findings_state.select(Some(0));
            }
        }
    }

    pub fn cancel_scan(&mut self) {
        if self.controller.cancel() {
            self.held_completion = None;
            self.scanning_gate = None;
        }
    }

    pub fn set_service_status(&mut self, status: ServiceStatus) {
        self.service_status = status;
    }

    /// Findings of the current report, empty for every other state.
    pub fn findings(&self) -> &[Vulnerability] {
        match &self.display {
            Some(DisplayModel::Report(report)) => report.findings.as_slice(),
            _ => &[],
        }
    }

    pub fn selected_finding(&self) -> Option<&Vulnerability> {
        self.findings_state.selected().and_then(|i| self.findings().get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.findings().len();
        if len == 0 {
            return;
        }
        let next = self.findings_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.findings_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.findings().is_empty() {
            return;
        }
        let previous = self.findings_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.findings_state.select(Some(previous));
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.is_busy() {
            match key.code {
                KeyCode::Esc => self.cancel_scan(),
                KeyCode::Char('q') => self.quit(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            _ => {}
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
