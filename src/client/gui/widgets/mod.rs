pub mod code_preview;
pub mod risk_badge;
pub mod warning_list;
