use log::debug;

use crate::models::analysis::Analysis;
use crate::models::common::ModelVariant;
use crate::models::property::PropertyId;

/// Identifies one analysis request; later tickets supersede earlier ones
pub type Ticket = u64;

/// The request currently awaited, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub property_id: PropertyId,
}

/// Everything the presentation layer renders besides the property list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub analysis: Option<Analysis>,
    pub loading: bool,
    pub error: Option<String>,
    pub model: ModelVariant,
    pub pending: Option<PendingRequest>,
    next_ticket: Ticket,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    ModelSelected(ModelVariant),
    AnalysisRequested {
        ticket: Ticket,
        property_id: PropertyId,
    },
    AnalysisSucceeded {
        ticket: Ticket,
        analysis: Analysis,
    },
    AnalysisFailed {
        ticket: Ticket,
        message: String,
    },
    PropertyRemoved(PropertyId),
    ErrorDismissed,
}

impl AppState {
    pub fn with_model(model: ModelVariant) -> Self {
        Self { model, ..Self::default() }
    }

    /// Reserve the ticket for the next analysis request
    pub fn issue_ticket(&self) -> Ticket {
        self.next_ticket + 1
    }

    /// Apply one event; stale completions are dropped, not merged
    pub fn update(self, event: AppEvent) -> AppState {
        match event {
            AppEvent::ModelSelected(model) => AppState { model, ..self },
            AppEvent::AnalysisRequested { ticket, property_id } => {
                if let Some(prior) = self.pending {
                    debug!("Request {} supersedes pending request {}", ticket, prior.ticket);
                }
                AppState {
                    loading: true,
                    error: None,
                    pending: Some(PendingRequest { ticket, property_id }),
                    next_ticket: self.next_ticket.max(ticket),
                    ..self
                }
            }
            AppEvent::AnalysisSucceeded { ticket, analysis } => {
                if !self.is_current(ticket) {
                    debug!("Dropping stale result for request {}", ticket);
                    return self;
                }
                AppState {
                    analysis: Some(analysis),
                    loading: false,
                    error: None,
                    pending: None,
                    ..self
                }
            }
            AppEvent::AnalysisFailed { ticket, message } => {
                if !self.is_current(ticket) {
                    debug!("Dropping stale failure for request {}", ticket);
                    return self;
                }
                AppState {
                    loading: false,
                    error: Some(message),
                    pending: None,
                    ..self
                }
            }
            AppEvent::PropertyRemoved(id) => {
                let analysis = self.analysis.filter(|a| a.property.id != id);
                let cancelled = self.pending.map_or(false, |p| p.property_id == id);
                AppState {
                    analysis,
                    loading: if cancelled { false } else { self.loading },
                    pending: if cancelled { None } else { self.pending },
                    ..self
                }
            }
            AppEvent::ErrorDismissed => AppState { error: None, ..self },
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.pending.map_or(false, |p| p.ticket == ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::ModelAssessment;
    use crate::models::property::{ Condition, Property };
    use uuid::Uuid;

    fn analysis_for(id: PropertyId, address: &str) -> Analysis {
        let property = Property {
            id,
            address: address.to_string(),
            purchase_price: 250_000,
            square_feet: 1500,
            bedrooms: 3,
            bathrooms: 2,
            condition: Condition::Average,
            market_description: String::new(),
        };
        let assessment = ModelAssessment {
            predicted_resale_value: 400_000.0,
            estimated_renovation_costs: 50_000.0,
            market_analysis: String::new(),
            renovation_breakdown: String::new(),
            risk_factors: String::new(),
            investment_rating: "GOOD".to_string(),
            recommendation_summary: String::new(),
        };
        Analysis::assemble(property, assessment, ModelVariant::Flash25)
    }

    fn requested(state: AppState, property_id: PropertyId) -> (AppState, Ticket) {
        let ticket = state.issue_ticket();
        (state.update(AppEvent::AnalysisRequested { ticket, property_id }), ticket)
    }

    #[test]
    fn success_replaces_analysis_and_clears_loading() {
        let id = Uuid::new_v4();
        let (state, ticket) = requested(AppState::default(), id);
        assert!(state.loading);

        let state = state.update(AppEvent::AnalysisSucceeded { ticket, analysis: analysis_for(id, "a") });
        assert!(!state.loading);
        assert!(state.pending.is_none());
        assert_eq!(state.analysis.as_ref().map(|a| a.property.id), Some(id));
    }

    #[test]
    fn failure_keeps_prior_analysis_and_clears_loading() {
        let id = Uuid::new_v4();
        let (state, ticket) = requested(AppState::default(), id);
        let state = state.update(AppEvent::AnalysisSucceeded { ticket, analysis: analysis_for(id, "a") });
        let prior = state.analysis.clone();

        let (state, ticket) = requested(state, id);
        let state = state.update(AppEvent::AnalysisFailed { ticket, message: "bad json".into() });
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("bad json"));
        assert_eq!(state.analysis, prior);

        let state = state.update(AppEvent::ErrorDismissed);
        assert!(state.error.is_none());
    }

    #[test]
    fn newer_request_wins_over_stale_response() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let (state, old_ticket) = requested(AppState::default(), first);
        let (state, new_ticket) = requested(state, second);
        assert!(new_ticket > old_ticket);

        let state = state.update(AppEvent::AnalysisSucceeded {
            ticket: old_ticket,
            analysis: analysis_for(first, "old"),
        });
        assert!(state.analysis.is_none());
        assert!(state.loading);

        let state = state.update(AppEvent::AnalysisFailed { ticket: old_ticket, message: "late".into() });
        assert!(state.error.is_none());

        let state = state.update(AppEvent::AnalysisSucceeded {
            ticket: new_ticket,
            analysis: analysis_for(second, "new"),
        });
        assert_eq!(state.analysis.map(|a| a.property.id), Some(second));
    }

    #[test]
    fn removing_displayed_property_clears_analysis() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (state, ticket) = requested(AppState::default(), id);
        let state = state.update(AppEvent::AnalysisSucceeded { ticket, analysis: analysis_for(id, "a") });

        let state = state.update(AppEvent::PropertyRemoved(other));
        assert!(state.analysis.is_some());

        let state = state.update(AppEvent::PropertyRemoved(id));
        assert!(state.analysis.is_none());
    }

    #[test]
    fn removing_pending_property_cancels_request() {
        let id = Uuid::new_v4();
        let (state, ticket) = requested(AppState::default(), id);
        let state = state.update(AppEvent::PropertyRemoved(id));
        assert!(!state.loading);
        assert!(state.pending.is_none());

        let state = state.update(AppEvent::AnalysisSucceeded { ticket, analysis: analysis_for(id, "a") });
        assert!(state.analysis.is_none());
    }

    #[test]
    fn tickets_keep_increasing_after_completion() {
        let id = Uuid::new_v4();
        let (state, first) = requested(AppState::default(), id);
        let state = state.update(AppEvent::AnalysisFailed { ticket: first, message: "x".into() });
        assert!(state.issue_ticket() > first);
    }
}
