use rust_decimal::Decimal;
use std::path::PathBuf;

/// 引擎配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (快照数据库、日志) |
/// | DB_FILE | dine.redb | 快照数据库文件名 |
/// | TAX_RATE | 0 | 税率 (小数, 例如 0.05) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 设置后按天滚动写入日志文件 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/dine TAX_RATE=0.05 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 快照数据库文件名 (位于 work_dir 下)
    pub db_file: String,
    /// 全局税率, 范围 [0, 1]
    pub tax_rate: f64,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 运行环境: development | production
    pub environment: String,
}

/// 校验税率: 必须是 [0, 1] 内的有限数，否则回退到 0
fn sanitize_tax_rate(rate: f64) -> f64 {
    if rate.is_finite() && (0.0..=1.0).contains(&rate) {
        rate
    } else {
        tracing::warn!(rate, "Invalid tax rate, falling back to 0");
        0.0
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let tax_rate = match std::env::var("TAX_RATE") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(rate) => sanitize_tax_rate(rate),
                Err(_) => {
                    tracing::warn!(value = %raw, "TAX_RATE is not a number, falling back to 0");
                    0.0
                }
            },
            Err(_) => 0.0,
        };
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            db_file: std::env::var("DB_FILE").unwrap_or_else(|_| "dine.redb".into()),
            tax_rate,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, tax_rate: f64) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.tax_rate = sanitize_tax_rate(tax_rate);
        config
    }

    /// 快照数据库完整路径
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn tax_rate_decimal(&self) -> Decimal {
        Decimal::try_from(self.tax_rate).unwrap_or(Decimal::ZERO)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_validate_tax_rate() {
        let config = Config::with_overrides("/tmp/dine-test", 0.05);
        assert_eq!(config.work_dir, "/tmp/dine-test");
        assert_eq!(config.tax_rate_decimal(), Decimal::new(5, 2));
        assert!(config.db_path().starts_with("/tmp/dine-test"));

        assert_eq!(Config::with_overrides(".", 1.5).tax_rate, 0.0);
        assert_eq!(Config::with_overrides(".", f64::NAN).tax_rate, 0.0);
        assert_eq!(Config::with_overrides(".", -0.1).tax_rate, 0.0);
    }
}
