use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use paypage::models::{ChannelId, DeviceClassification, DialogError, DialogEvent, DialogSurface};
use paypage::services::{ConfigService, LoadOutcome, OpenOutcome, PaymentPage, RecordingNavigator};
use paypage::utils::logger;

/// 渲染设备自适应支付页
///
/// 模拟一次页面加载 (可选地点击一个渠道按钮),
/// 在标准输出打印弹窗状态报告。
#[derive(Debug, Parser)]
#[command(name = "paypage", version, about)]
struct Cli {
    /// 配置载荷路径 (默认读取 PAYPAGE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// 请求的 User-Agent
    #[arg(long, default_value = "")]
    user_agent: String,

    /// 页面URL的查询串,如 `open=true`
    #[arg(long, default_value = "")]
    query: String,

    /// 加载后点击的渠道: alipay | wechatpay | tenpay
    #[arg(long)]
    channel: Option<ChannelId>,

    /// 保存 qrcode.png 的路径 (仅通用浏览器提供下载)
    #[arg(long)]
    out: Option<PathBuf>,

    /// 日志目录 (默认读取 PAYPAGE_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    classification: DeviceClassification,
    load: LoadOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger: Option<TriggerReport>,
    navigations: Vec<String>,
    surface: DialogSurface,
    #[serde(skip_serializing_if = "Option::is_none")]
    download: Option<PathBuf>,
    events: Vec<DialogEvent>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum TriggerReport {
    Ok(OpenOutcome),
    Err(DialogError),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = ConfigService::settings();

    let log_dir = cli.log_dir.clone().unwrap_or(settings.log_dir);
    logger::init(&log_dir)?;

    let config_path = cli
        .config
        .clone()
        .or(settings.config_path)
        .ok_or_else(|| {
            paypage::models::ConfigError::MissingPath(
                paypage::services::config_service::CONFIG_ENV.to_string(),
            )
        })?;
    let config = ConfigService::load(&config_path)?;

    let navigator = Arc::new(RecordingNavigator::new());
    let page = PaymentPage::new(&config, &cli.user_agent, navigator.clone());

    let load = page.on_load(&cli.query).await;

    let trigger = match cli.channel {
        Some(id) => Some(match page.trigger(id).await {
            Ok(outcome) => TriggerReport::Ok(outcome),
            Err(e) => {
                tracing::error!(channel = %id, error = %e, "Channel action failed");
                TriggerReport::Err(e)
            }
        }),
        None => None,
    };

    let mut download = None;
    if let Some(out) = &cli.out {
        if let Some((filename, png)) = page.dialog().download().await {
            let target = if out.is_dir() {
                out.join(filename)
            } else {
                out.clone()
            };
            tokio::fs::write(&target, png).await?;
            tracing::info!(path = %target.display(), "QR code saved");
            download = Some(target);
        } else {
            tracing::warn!("No downloadable QR code for this device, nothing written");
        }
    }

    let report = Report {
        classification: page.classification(),
        load,
        trigger,
        navigations: navigator.history(),
        surface: page.dialog().surface().await,
        download,
        events: page.dialog().events().await,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
