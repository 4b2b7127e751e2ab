pub mod bookkeeping_service;
pub use bookkeeping_service::BookkeepingService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod document_service;
pub use document_service::DocumentService;
pub mod grant_service;
pub use grant_service::GrantService;
pub mod analysis_service;
pub use analysis_service::AnalysisService;
pub mod user_service;
pub use user_service::UserService;
