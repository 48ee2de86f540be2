// src/core/lifecycle.rs

//! The scan lifecycle: `Idle -> Scanning -> Completed | Failed`, re-entered on every
//! new submission. The controller is the only thing allowed to change the state.

use crate::core::client::ScanService;
use crate::core::models::{ScanFailure, ScanRequest, ScanResponse};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Identifies one dispatched request. Completions for any other ticket are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTicket {
    pub id: u64,
    pub target: String,
}

/// What a spawned request reports back.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanCompletion {
    pub ticket_id: u64,
    pub outcome: Result<ScanResponse, ScanFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanLifecycleState {
    Idle,
    Scanning {
        ticket: ScanTicket,
        started_at: DateTime<Utc>,
    },
    Completed(ScanResponse),
    Failed(ScanFailure),
}

pub struct ScanController {
    state: ScanLifecycleState,
    service: Arc<dyn ScanService>,
    completions: UnboundedSender<ScanCompletion>,
    last_ticket: u64,
}

impl ScanController {
    /// `completions` receives one [`ScanCompletion`] per accepted submission.
    pub fn new(service: Arc<dyn ScanService>, completions: UnboundedSender<ScanCompletion>) -> Self {
        Self {
            state: ScanLifecycleState::Idle,
            service,
            completions,
            last_ticket: 0,
        }
    }

    pub fn state(&self) -> &ScanLifecycleState {
        &self.state
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.state, ScanLifecycleState::Scanning { .. })
    }

    /// Ticket of the request in flight, if any.
    pub fn current_ticket_id(&self) -> Option<u64> {
        match &self.state {
            ScanLifecycleState::Scanning { ticket, .. } => Some(ticket.id),
            _ => None,
        }
    }

    /// Starts a scan for `raw_target`.
    ///
    /// Returns `false` without touching anything when the target is blank or a scan is
    /// already in flight. Requires a running tokio runtime.
    pub fn submit(&mut self, raw_target: &str) -> bool {
        if self.is_scanning() {
            debug!("Submission dropped: a scan is already in flight.");
            return false;
        }
        let Some(request) = ScanRequest::parse(raw_target) else {
            debug!("Submission dropped: blank target.");
            return false;
        };

        self.last_ticket += 1;
        let ticket = ScanTicket {
            id: self.last_ticket,
            target: request.target,
        };
        info!(ticket = ticket.id, target = %ticket.target, "Scan submitted.");

        let service = Arc::clone(&self.service);
        let completions = self.completions.clone();
        let ticket_id = ticket.id;
        let target = ticket.target.clone();
        tokio::spawn(async move {
            let outcome = service.scan(&target).await;
            if completions.send(ScanCompletion { ticket_id, outcome }).is_err() {
                warn!(ticket = ticket_id, "Scan finished after the receiver was dropped.");
            }
        });

        self.state = ScanLifecycleState::Scanning {
            ticket,
            started_at: Utc::now(),
        };
        true
    }

    /// Applies the outcome of the in-flight request. Returns `false` if the completion
    /// belongs to a request that is no longer current.
    pub fn resolve(&mut self, completion: ScanCompletion) -> bool {
        match &self.state {
            ScanLifecycleState::Scanning { ticket, .. } if ticket.id == completion.ticket_id => {}
            _ => {
                debug!(ticket = completion.ticket_id, "Discarding stale scan completion.");
                return false;
            }
        }

        self.state = match completion.outcome {
            Ok(response) => {
                info!(ticket = completion.ticket_id, target = %response.target, "Scan completed.");
                ScanLifecycleState::Completed(response)
            }
            Err(failure) => {
                info!(ticket = completion.ticket_id, target = %failure.target, "Scan failed.");
                ScanLifecycleState::Failed(failure)
            }
        };
        true
    }

    /// Abandons the in-flight scan. The request keeps running, its result is ignored.
    pub fn cancel(&mut self) -> bool {
        if let ScanLifecycleState::Scanning { ticket, .. } = &self.state {
            info!(ticket = ticket.id, "Scan cancelled.");
            self.state = ScanLifecycleState::Idle;
            return true;
        }
        false
    }
}
