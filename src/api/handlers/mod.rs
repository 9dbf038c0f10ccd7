pub mod books;
pub mod borrowing_records;
pub mod members;

use crate::application::library::ServiceDependencies;

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// 貸出・返却・空き状況の基準日（UTC）
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
