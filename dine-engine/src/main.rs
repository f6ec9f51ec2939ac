use anyhow::Context;
use dine_engine::{PosManager, RedbSnapshotStore, print_banner, setup_environment};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 工作目录, 日志)
    let config = setup_environment()?;

    // 打印横幅
    print_banner();

    tracing::info!(environment = %config.environment, "Dine Engine starting...");

    // 2. 打开快照数据库
    let db_path = config.db_path();
    let persistence = RedbSnapshotStore::open(&db_path)
        .with_context(|| format!("failed to open snapshot database at {}", db_path.display()))?;

    // 3. 加载状态 (无快照时使用默认菜单和桌台)
    let manager = PosManager::open(Arc::new(persistence), config.tax_rate_decimal());

    // 4. 输出状态摘要
    let now = chrono::Utc::now();
    let tables = manager.tables();
    let occupied = tables
        .iter()
        .filter(|t| t.status == shared::models::TableStatus::Occupied)
        .count();
    let today = manager.today_summary(now);
    let stats = manager.customer_stats();
    tracing::info!(
        tables = tables.len(),
        occupied,
        kitchen_tickets = manager.kitchen_tickets(now).len(),
        customers = stats.total_customers,
        total_due = stats.total_due,
        sales_today = today.sales,
        "Store ready"
    );

    Ok(())
}
