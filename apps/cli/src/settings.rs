//! 配置文件定位与加载

use anyhow::{Context, Result};
use ssc32_controller::ControllerConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 默认配置文件路径：`<config_dir>/ssc32/controller.toml`
pub fn default_config_file() -> Result<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| anyhow::anyhow!("无法确定配置目录"))?;
    path.push("ssc32");
    path.push("controller.toml");
    Ok(path)
}

/// 加载控制器配置
///
/// 显式指定的文件必须存在；默认路径下没有文件时使用空配置。
pub fn load_config(explicit: Option<&Path>) -> Result<ControllerConfig> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => (default_config_file()?, false),
    };

    if !required && !path.exists() {
        warn!("No config file at {}, using an empty joint table", path.display());
        return Ok(ControllerConfig::default());
    }

    let config = ControllerConfig::load_from_file(&path)
        .with_context(|| format!("加载配置文件失败: {}", path.display()))?;
    info!(path = %path.display(), joints = config.joints.len(), "config loaded");
    Ok(config)
}
