use crate::lifecycle::engine::ExitTrigger;

pub struct ExitOrchestrator;

impl ExitOrchestrator {
    /// Reason tag reported when a paper trade closes.
    pub fn decide(trigger: ExitTrigger) -> &'static str {
        match trigger {
            ExitTrigger::TakeProfit => "TakeProfit",
            ExitTrigger::StopLoss => "StopLoss",
            ExitTrigger::TimeExit => "TimeExit",
        }
    }
}
