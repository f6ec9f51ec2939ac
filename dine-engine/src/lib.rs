//! Dine Engine - 餐厅堂食点单与结账引擎
//!
//! # 架构概述
//!
//! - **点单会话** (`pos::session`): 桌台状态机、顾客分单
//! - **金额计算** (`pos::money`): 小计、税、平分账单
//! - **结账** (`pos::billing`): 结算、欠款记录、历史订单
//! - **顾客与欠款** (`pos::customers`, `pos::ledger`)
//! - **报表** (`reports`): 今日汇总、热销、厨房视图
//! - **导入导出** (`transfer`): JSON 合并、CSV 导出
//! - **持久化** (`persistence`): redb 快照存储
//!
//! # 模块结构
//!
//! ```text
//! dine-engine/src/
//! ├── core/          # 配置
//! ├── pos/           # 业务规则与命令处理
//! ├── persistence/   # 快照存储
//! ├── reports/       # 报表
//! ├── transfer/      # 导入导出
//! └── utils/         # 日志
//! ```

pub mod core;
pub mod persistence;
pub mod pos;
pub mod reports;
pub mod transfer;
pub mod utils;

// Re-export 公共类型
pub use core::Config;
pub use persistence::{MemorySnapshotStore, RedbSnapshotStore, SnapshotStore, StorageError};
pub use pos::{PosError, PosManager, PosResult, PosStore};
pub use transfer::TransferError;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 .env、创建工作目录、初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {}", e);
    }

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____  _               ______            _
   / __ \(_)___  ___     / ____/___  ____ _(_)___  ___
  / / / / / __ \/ _ \   / __/ / __ \/ __ `/ / __ \/ _ \
 / /_/ / / / / /  __/  / /___/ / / / /_/ / / / / /  __/
/_____/_/_/ /_/\___/  /_____/_/ /_/\__, /_/_/ /_/\___/
                                  /____/
    "#
    );
}
