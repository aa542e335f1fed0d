pub mod auth_controller;
pub mod client_controller;
pub mod company_controller;
pub mod driver_controller;
pub mod intervention_controller;
pub mod invoice_controller;
pub mod partner_controller;
pub mod report_controller;
pub mod rule_controller;
pub mod shift_controller;
pub mod vehicle_controller;
