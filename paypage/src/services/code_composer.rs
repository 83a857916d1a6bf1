//! 二维码合成器
//!
//! 职责: 把支付载荷编码为 320x320 的二维码,再在中心叠加 44x44 的品牌Logo。
//!
//! # 失败策略
//! - 编码失败是致命的: 返回 [`ComposeError`],绝不返回空白图片
//! - Logo加载失败是非致命的: 记录警告,返回未加Logo的二维码
//!
//! 容错级别固定为 H,因为Logo会遮挡部分模块,二维码必须依然可识别。

use base64::{engine::general_purpose, Engine as _};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use qrcode::{Color, EcLevel, QrCode};
use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use crate::models::{ComposeError, LogoError, RenderedImage};

/// 画布边长
pub const CANVAS_SIZE: u32 = 320;

/// 静区宽度 (模块数)
pub const QUIET_MARGIN: u32 = 1;

/// Logo边长
pub const LOGO_SIZE: u32 = 44;

/// Logo在两个轴上的偏移: (320 - 44) / 2 = 138
pub const LOGO_OFFSET: i64 = ((CANVAS_SIZE - LOGO_SIZE) / 2) as i64;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Logo加载器
///
/// 合成器通过该接口异步获取Logo,测试中可替换为失败或延迟的实现。
pub trait LogoLoader {
    fn load(&self, source: &str) -> impl Future<Output = Result<DynamicImage, LogoError>> + Send;
}

/// 默认Logo加载器
///
/// 支持三种来源:
/// - `http://` / `https://`: 通过 reqwest 下载
/// - `data:image/...;base64,...`: 内联图片
/// - 其他: 本地文件路径
pub struct LogoFetcher {
    client: reqwest::Client,
}

impl LogoFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build logo HTTP client, using defaults");
                reqwest::Client::new()
            });
        Self { client }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>, LogoError> {
        if source.starts_with("data:") {
            return decode_data_url(source);
        }

        if source.starts_with("http://") || source.starts_with("https://") {
            let response = self.client.get(source).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LogoError::HttpStatus {
                    status: status.as_u16(),
                    url: source.to_string(),
                });
            }
            return Ok(response.bytes().await?.to_vec());
        }

        Ok(tokio::fs::read(source).await?)
    }
}

impl Default for LogoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LogoLoader for LogoFetcher {
    async fn load(&self, source: &str) -> Result<DynamicImage, LogoError> {
        let bytes = self.fetch_bytes(source).await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// 解析 `data:[<mime>];base64,<payload>`
fn decode_data_url(source: &str) -> Result<Vec<u8>, LogoError> {
    let (header, payload) = source
        .split_once(',')
        .ok_or_else(|| LogoError::InvalidDataUrl("缺少逗号分隔符".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(LogoError::InvalidDataUrl("仅支持base64编码".to_string()));
    }

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| LogoError::InvalidDataUrl(e.to_string()))
}

/// 二维码合成器
pub struct CodeImageComposer<L = LogoFetcher> {
    loader: L,
}

impl<L: LogoLoader> CodeImageComposer<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// 合成二维码
    ///
    /// # 参数
    /// - `payload`: 要编码的支付链接
    /// - `logo`: 品牌Logo来源 (可选)
    ///
    /// # 错误
    /// - `ComposeError::EncodeFailed`: 载荷为空或超出容量
    /// - `ComposeError::ImageEncodeFailed`: PNG编码失败
    pub async fn compose(
        &self,
        payload: &str,
        logo: Option<&str>,
    ) -> Result<RenderedImage, ComposeError> {
        let mut bitmap = encode_matrix(payload)?;
        let mut branded = false;

        if let Some(source) = logo {
            match self.loader.load(source).await {
                Ok(logo_image) => {
                    overlay_logo(&mut bitmap, &logo_image);
                    branded = true;
                }
                Err(e) => {
                    let reason = e.to_string();
                    crate::log_event!(
                        "LogoLoadFailed",
                        logo = source,
                        error = reason.as_str(),
                    );
                    tracing::warn!(error = %e, "Logo unavailable, showing plain QR code");
                }
            }
        }

        let png = encode_png(&bitmap)?;
        let data_url = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&png)
        );

        tracing::debug!(
            payload_len = payload.len(),
            png_bytes = png.len(),
            branded,
            "QR code composed"
        );

        Ok(RenderedImage {
            bitmap,
            png,
            data_url,
            branded,
        })
    }
}

/// 编码载荷为二维码位图
///
/// 静区为1个模块,整体按最近邻缩放到画布尺寸。
pub fn encode_matrix(payload: &str) -> Result<RgbaImage, ComposeError> {
    if payload.is_empty() {
        return Err(ComposeError::EncodeFailed("载荷为空".to_string()));
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let total = modules + 2 * QUIET_MARGIN;

    let mut bitmap = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, LIGHT);
    for (x, y, pixel) in bitmap.enumerate_pixels_mut() {
        let mx = x * total / CANVAS_SIZE;
        let my = y * total / CANVAS_SIZE;
        let inside = QUIET_MARGIN..QUIET_MARGIN + modules;
        if !inside.contains(&mx) || !inside.contains(&my) {
            continue;
        }
        let index = ((my - QUIET_MARGIN) * modules + (mx - QUIET_MARGIN)) as usize;
        if colors[index] == Color::Dark {
            *pixel = DARK;
        }
    }

    Ok(bitmap)
}

/// 在画布中心绘制Logo,关闭平滑以保持边缘清晰
fn overlay_logo(bitmap: &mut RgbaImage, logo: &DynamicImage) {
    let logo = imageops::resize(&logo.to_rgba8(), LOGO_SIZE, LOGO_SIZE, FilterType::Nearest);
    imageops::overlay(bitmap, &logo, LOGO_OFFSET, LOGO_OFFSET);
}

fn encode_png(bitmap: &RgbaImage) -> Result<Vec<u8>, ComposeError> {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(bitmap.clone())
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;
    Ok(png)
}
