use perp_momentum_scanner::lifecycle::{ExitOrchestrator, ExitTrigger};

#[test]
fn reason_tags_match_triggers() {
    assert_eq!(ExitOrchestrator::decide(ExitTrigger::TakeProfit), "TakeProfit");
    assert_eq!(ExitOrchestrator::decide(ExitTrigger::StopLoss), "StopLoss");
    assert_eq!(ExitOrchestrator::decide(ExitTrigger::TimeExit), "TimeExit");
}

#[test]
fn display_uses_the_reason_tag() {
    assert_eq!(ExitTrigger::TimeExit.to_string(), "TimeExit");
}
